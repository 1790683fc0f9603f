use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CleanError;

/// Escribe `bytes` en un temporal junto a `path` y lo renombra sobre el destino.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), CleanError> {
    let temp_path = generate_temp_filename(path);

    fs::write(&temp_path, bytes).map_err(|source| CleanError::Write {
        path: temp_path.clone(),
        source,
    })?;

    // El reemplazo conserva los permisos del archivo original
    if let Ok(metadata) = fs::metadata(path)
        && let Err(source) = fs::set_permissions(&temp_path, metadata.permissions())
    {
        let _ = fs::remove_file(&temp_path);
        return Err(CleanError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        CleanError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Crea un nombre de archivo temporal estable en el mismo directorio que `path`.
fn generate_temp_filename(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();

    // Timestamp para evitar colisiones entre ejecuciones consecutivas.
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    parent.join(format!(".{}_temp_{}.{}", stem, timestamp, extension))
}
