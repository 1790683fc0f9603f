//! Errores del motor de limpieza.

use std::path::PathBuf;
use thiserror::Error;

/// Errores fatales: detienen la ejecución y no producen salida.
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("No se pudo leer `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("El XML no está bien formado: {message}")]
    Parse { message: String },

    #[error("No se pudo serializar el documento: {message}")]
    Serialize { message: String },

    #[error("No se pudo guardar `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("El documento no tiene una ruta de origen que sobrescribir")]
    MissingSource,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errores de configuración detectados antes de tocar cualquier documento.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No se pudo leer la configuración `{}`: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Configuración TOML inválida: {0}")]
    Toml(String),

    #[error("La etiqueta `{0}` no puede estar vacía")]
    EmptyTag(&'static str),

    #[error("La regla #{0} tiene un patrón vacío")]
    EmptyPattern(usize),

    #[error("Expresión regular inválida `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// Fallo recuperable al procesar un único elemento del documento.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemProcessingError {
    #[error("la entrada de metadata #{entry} no tiene clave `{key}`")]
    MissingKey { entry: usize, key: String },

    #[error("la entrada de metadata #{entry} tiene {count} claves `{key}`")]
    AmbiguousKey {
        entry: usize,
        key: String,
        count: usize,
    },

    #[error("la clave de la entrada de metadata #{entry} contiene elementos anidados")]
    NestedKey { entry: usize },

    #[error("el elemento ya no existe en {path}")]
    Detached { path: String },

    #[error("el hijo {index} de {path} ya no es una entrada de metadata")]
    StalePlan { path: String, index: usize },
}
