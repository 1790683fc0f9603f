//! Orquestación de una ejecución: carga, recorrido, poda y serialización.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::error_log::ErrorLog;
use super::matcher::{evaluate_item, item_title};
use super::prune::{PrunePlan, apply_plan};
use super::Cleaner;
use crate::document::{Document, locate_items, write_atomically};
use crate::error::CleanError;

/// Etapas por las que pasa una ejecución que no falla.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Loaded,
    Scanning,
    ItemDone(usize),
    Pruned,
    Serialized,
}

/// Resultado visible para quien invoca: limpio o con errores registrados.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "errors", rename_all = "snake_case")]
pub enum RunOutcome {
    Clean,
    WithErrors(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub items_found: usize,
    pub entries_scanned: usize,
    pub entries_removed: usize,
    pub items_failed: usize,
}

/// Documento final, bytes serializados y errores de una ejecución completa.
#[derive(Debug)]
pub struct RunResult {
    document: Document,
    output: Vec<u8>,
    errors: Vec<String>,
    stats: RunStats,
}

impl RunResult {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.errors.is_empty() {
            RunOutcome::Clean
        } else {
            RunOutcome::WithErrors(self.errors.len())
        }
    }

    /// Guarda el documento depurado en una ruta personalizada.
    pub fn save_to(&self, path: &Path) -> Result<(), CleanError> {
        write_atomically(path, &self.output)
    }

    /// Sobrescribe el archivo del que se cargó el documento.
    pub fn overwrite_source(&self) -> Result<(), CleanError> {
        let path = self
            .document
            .source_path()
            .ok_or(CleanError::MissingSource)?;
        write_atomically(path, &self.output)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            path: self
                .document
                .source_path()
                .map(|path| path.display().to_string()),
            stats: self.stats,
            outcome: self.outcome(),
            errors: self.errors.clone(),
        }
    }
}

/// Resumen exportable de una ejecución.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub path: Option<String>,
    pub stats: RunStats,
    pub outcome: RunOutcome,
    pub errors: Vec<String>,
}

struct PlannedItem {
    ordinal: usize,
    title: Option<String>,
    plan: PrunePlan,
}

impl Cleaner {
    /// Carga el archivo indicado y lo depura.
    #[instrument(level = "info", skip(self))]
    pub fn clean_path(&self, path: &Path) -> Result<RunResult, CleanError> {
        let document = Document::open(path)?;
        self.clean_document(document)
    }

    pub fn clean_bytes(&self, bytes: &[u8]) -> Result<RunResult, CleanError> {
        let document = Document::from_bytes(bytes)?;
        self.clean_document(document)
    }

    /// Ejecuta la limpieza sobre un documento ya cargado.
    ///
    /// Un elemento que falla se registra y se deja intacto; solo un fallo de
    /// serialización detiene la ejecución.
    pub fn clean_document(&self, mut document: Document) -> Result<RunResult, CleanError> {
        let mut state = RunState::Loaded;
        let mut errors = ErrorLog::new();
        let mut stats = RunStats::default();

        let items = locate_items(&document, &self.item_tag);
        advance(&mut state, RunState::Scanning);
        stats.items_found = items.len();
        info!("Se encontraron {} elemento(s)", items.len());

        let mut planned = Vec::new();
        for (position, path) in items.into_iter().enumerate() {
            let ordinal = position + 1;
            let Some(item) = document.element_at(&path) else {
                continue;
            };

            let title = item_title(item, &self.title_tag);
            info!(ordinal, title = title.as_deref().unwrap_or(""), "Procesando elemento");

            match evaluate_item(item, &self.scope, &self.rules) {
                Ok(decisions) => {
                    stats.entries_scanned += decisions.len();
                    let removals: Vec<usize> = decisions
                        .iter()
                        .filter(|decision| decision.prune)
                        .inspect(|decision| debug!(ordinal, key = %decision.key, "Entrada marcada"))
                        .map(|decision| decision.index)
                        .collect();

                    if !removals.is_empty() {
                        planned.push(PlannedItem {
                            ordinal,
                            title,
                            plan: PrunePlan {
                                item: path,
                                removals,
                            },
                        });
                    }
                }
                Err(error) => {
                    warn!(ordinal, %error, "Elemento omitido");
                    stats.items_failed += 1;
                    errors.record_item(ordinal, title.as_deref(), &error);
                }
            }
            advance(&mut state, RunState::ItemDone(ordinal));
        }

        // En orden inverso: podar un elemento no desplaza las rutas de los anteriores
        for item in planned.iter().rev() {
            match apply_plan(&mut document, &item.plan, &self.scope.container) {
                Ok(removed) => stats.entries_removed += removed,
                Err(error) => {
                    warn!(ordinal = item.ordinal, %error, "No se pudo podar el elemento");
                    stats.items_failed += 1;
                    errors.record_item(item.ordinal, item.title.as_deref(), &error);
                }
            }
        }
        advance(&mut state, RunState::Pruned);

        let output = document.to_bytes(self.output)?;
        advance(&mut state, RunState::Serialized);

        info!(
            removed = stats.entries_removed,
            errors = errors.len(),
            "Limpieza completada"
        );

        Ok(RunResult {
            document,
            output,
            errors: errors.into_messages(),
            stats,
        })
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!(from = ?*state, to = ?next, "Transición de estado");
    *state = next;
}
