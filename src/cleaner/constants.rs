//! Valores por defecto para depurar exportaciones de WordPress.

pub const DEFAULT_ITEM_TAG: &str = "item";
pub const DEFAULT_CONTAINER_TAG: &str = "postmeta";
pub const DEFAULT_KEY_CHILD: &str = "meta_key";
pub const TITLE_TAG: &str = "title";

/// Metadata generada por el plugin de relevancia de búsqueda, inútil fuera del sitio original.
pub const DEFAULT_PRUNE_PATTERN: &str = "_fss_relevance";
