use crate::error::ItemProcessingError;

/// Lista de errores legibles acumulados durante una única ejecución.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<String>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra el fallo de un elemento identificándolo por posición y título.
    pub fn record_item(&mut self, ordinal: usize, title: Option<&str>, error: &ItemProcessingError) {
        let message = match title {
            Some(title) => format!("Elemento #{ordinal} («{title}»): {error}"),
            None => format!("Elemento #{ordinal}: {error}"),
        };
        self.entries.push(message);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn into_messages(self) -> Vec<String> {
        self.entries
    }
}
