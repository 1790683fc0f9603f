/// Tamaño legible en unidades binarias, con coma decimal.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return pluralize(bytes as usize, "byte", "bytes");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{} {unit}", decimal(value))
}

/// Cuánto se redujo la exportación tras la poda.
pub fn format_reduction(before: u64, after: u64) -> String {
    let saved = before.saturating_sub(after);
    if saved == 0 {
        return "sin cambios de tamaño".to_string();
    }
    let percent = saved as f64 * 100.0 / before as f64;
    format!("{} menos ({} %)", format_size(saved), decimal(percent))
}

/// Texto para el número de elementos, en singular o plural.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn decimal(value: f64) -> String {
    format!("{value:.1}").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_use_binary_units_and_decimal_comma() {
        assert_eq!(format_size(1), "1 byte");
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(1536), "1,5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3,0 MB");
    }

    #[test]
    fn reduction_reports_saved_share() {
        assert_eq!(format_reduction(4096, 3072), "1,0 KB menos (25,0 %)");
        assert_eq!(format_reduction(100, 100), "sin cambios de tamaño");
        assert_eq!(format_reduction(100, 120), "sin cambios de tamaño");
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize(1, "error", "errores"), "1 error");
        assert_eq!(pluralize(0, "error", "errores"), "0 errores");
    }
}
