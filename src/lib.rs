//! Depuración de exportaciones XML de WordPress: carga el documento, recorre
//! sus elementos y elimina las entradas de metadata cuya clave coincide con
//! las reglas configuradas.
//!
//! ```no_run
//! use std::path::Path;
//! use wxrclean::{Cleaner, CleanerConfig, RunOutcome};
//!
//! let cleaner = Cleaner::new(&CleanerConfig::default())?;
//! let result = cleaner.clean_path(Path::new("export.xml"))?;
//! if let RunOutcome::WithErrors(count) = result.outcome() {
//!     eprintln!("{count} elemento(s) con errores");
//! }
//! result.save_to(Path::new("export.limpio.xml"))?;
//! # Ok::<(), wxrclean::CleanError>(())
//! ```

pub mod cleaner;
pub mod config;
pub mod document;
pub mod error;
pub mod formatting;
pub mod logging;

pub use cleaner::{Cleaner, RunOutcome, RunResult, RunStats, RunSummary};
pub use config::CleanerConfig;
pub use document::Document;
pub use error::{CleanError, ConfigError, ItemProcessingError};
