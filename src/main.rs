use clap::{ArgAction, Parser};
use console::style;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use wxrclean::cleaner::RunSummary;
use wxrclean::formatting::{format_reduction, format_size, pluralize};
use wxrclean::logging::setup_logging;
use wxrclean::{Cleaner, CleanerConfig, RunResult};

/// Elimina metadata innecesaria de exportaciones XML de WordPress.
#[derive(Parser, Debug)]
#[command(name = "wxrclean", version, about)]
struct Cli {
    /// Ruta del XML exportado (se puede repetir)
    #[arg(short, long = "file", value_name = "PATH", required = true)]
    files: Vec<PathBuf>,

    /// Guarda el resultado en otra ruta en lugar de sobrescribir el original
    #[arg(short, long, value_name = "PATH", conflicts_with = "print")]
    save: Option<PathBuf>,

    /// Muestra el XML depurado por la salida estándar sin guardarlo
    #[arg(long)]
    print: bool,

    /// Archivo TOML con etiquetas y reglas
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Literal que, contenido en la clave, provoca la eliminación (sustituye las reglas)
    #[arg(short, long = "rule", value_name = "LITERAL")]
    rules: Vec<String>,

    /// Escribe un resumen JSON de cada ejecución
    #[arg(long, value_name = "JSON")]
    report: Option<PathBuf>,

    /// Aumenta el detalle de las trazas (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("{}", style(format!("Error: {message}")).red());
            ExitCode::FAILURE
        }
    }
}

/// Devuelve `false` si algún archivo no pudo procesarse.
fn run(cli: &Cli) -> Result<bool, String> {
    if cli.save.is_some() && cli.files.len() > 1 {
        return Err("--save solo admite un archivo de entrada".to_string());
    }

    let mut config = match &cli.config {
        Some(path) => CleanerConfig::from_file(path).map_err(|e| e.to_string())?,
        None => CleanerConfig::default(),
    };
    if !cli.rules.is_empty() {
        config = config.with_literal_rules(cli.rules.iter().cloned());
    }
    let cleaner = Cleaner::new(&config).map_err(|e| e.to_string())?;

    let mut summaries = Vec::new();
    let mut all_ok = true;

    // Un archivo fallido no detiene los siguientes ni el informe
    for path in &cli.files {
        match process_file(cli, &cleaner, path) {
            Ok(summary) => summaries.push(summary),
            Err(message) => {
                all_ok = false;
                println!("\n{}", style("┌─ No se pudo depurar el archivo ─").red());
                println!("{}", style(format!("│ {message}")).red());
                println!("{}", style("└─").red());
            }
        }
    }

    if let Some(report) = &cli.report {
        write_report(report, &summaries)?;
    }

    Ok(all_ok)
}

fn process_file(cli: &Cli, cleaner: &Cleaner, path: &Path) -> Result<RunSummary, String> {
    let original_size = render_file_info(path)?;
    let result = cleaner.clean_path(path).map_err(|e| e.to_string())?;
    deliver(cli, &result)?;
    render_outcome(&result, original_size);
    Ok(result.summary())
}

/// Muestra nombre, tamaño y ruta del archivo; devuelve su tamaño en bytes.
fn render_file_info(path: &Path) -> Result<u64, String> {
    let metadata = fs::metadata(path)
        .map_err(|error| format!("El archivo `{}` no existe: {error}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!("\n{}", style("┌─ Archivo ─").cyan());
    println!("{}", style(format!("│ Nombre: {name}")).cyan());
    println!("{}", style(format!("│ Tamaño: {}", format_size(metadata.len()))).cyan());
    println!("{}", style(format!("│ Ruta:   {}", path.display())).cyan());
    println!("{}", style("└─").cyan());
    Ok(metadata.len())
}

fn deliver(cli: &Cli, result: &RunResult) -> Result<(), String> {
    if cli.print {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(result.output())
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|e| format!("No se pudo escribir en la salida estándar: {e}"))?;
        return Ok(());
    }

    let saved = match &cli.save {
        Some(target) => result.save_to(target),
        None => result.overwrite_source(),
    };
    saved.map_err(|e| e.to_string())
}

fn render_outcome(result: &RunResult, original_size: u64) {
    let stats = result.stats();
    println!(
        "{}",
        style(format!(
            "│ {} revisados, {} de metadata eliminadas, {}",
            pluralize(stats.items_found, "elemento", "elementos"),
            pluralize(stats.entries_removed, "entrada", "entradas"),
            format_reduction(original_size, result.output().len() as u64),
        ))
        .dim()
    );

    if result.errors().is_empty() {
        println!("\n{}", style("┌─ ¡Listo! Archivo depurado ─").green());
        println!("{}", style("└─").green());
        return;
    }

    println!(
        "\n{}",
        style(format!(
            "┌─ Depurado con {} ─",
            pluralize(result.errors().len(), "error", "errores")
        ))
        .yellow()
    );
    for error in result.errors() {
        println!("{}", style(format!("│ {error}")).yellow());
    }
    println!("{}", style("└─").yellow());
}

fn write_report(path: &Path, summaries: &[RunSummary]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(summaries)
        .map_err(|err| format!("No se pudo serializar JSON: {err}"))?;
    fs::write(path, json).map_err(|err| format!("No se pudo guardar el JSON: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn save_conflicts_with_print() {
        let parsed = Cli::try_parse_from(["wxrclean", "-f", "a.xml", "--save", "b.xml", "--print"]);
        assert!(parsed.is_err());
    }

    const EXPORT: &str = "<rss><channel><item><title>Entrada</title><postmeta><meta_key>_fss_relevance</meta_key></postmeta><postmeta><meta_key>_thumbnail_id</meta_key></postmeta></item></channel></rss>";

    #[test]
    fn failed_file_does_not_stop_batch_or_report() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("no-existe.xml");
        let valid = dir.path().join("export.xml");
        let report = dir.path().join("informe.json");
        fs::write(&valid, EXPORT)?;

        let cli = Cli::try_parse_from([
            OsStr::new("wxrclean"),
            OsStr::new("-f"),
            missing.as_os_str(),
            OsStr::new("-f"),
            valid.as_os_str(),
            OsStr::new("--report"),
            report.as_os_str(),
        ])?;

        assert_eq!(run(&cli), Ok(false));

        let cleaned = fs::read_to_string(&valid)?;
        assert!(!cleaned.contains("_fss_relevance"));
        assert!(cleaned.contains("_thumbnail_id"));

        let summaries: Vec<RunSummary> = serde_json::from_str(&fs::read_to_string(&report)?)?;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].stats.entries_removed, 1);

        Ok(())
    }

    #[test]
    fn failed_save_is_reported_per_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let valid = dir.path().join("export.xml");
        let target = dir.path().join("falta").join("salida.xml");
        let report = dir.path().join("informe.json");
        fs::write(&valid, EXPORT)?;

        let cli = Cli::try_parse_from([
            OsStr::new("wxrclean"),
            OsStr::new("-f"),
            valid.as_os_str(),
            OsStr::new("--save"),
            target.as_os_str(),
            OsStr::new("--report"),
            report.as_os_str(),
        ])?;

        assert_eq!(run(&cli), Ok(false));
        assert_eq!(fs::read_to_string(&valid)?, EXPORT);
        assert!(report.exists());

        Ok(())
    }

    #[test]
    fn repeated_rules_and_files() {
        let cli = Cli::try_parse_from([
            "wxrclean", "-f", "a.xml", "-f", "b.xml", "-r", "_edit_lock", "-r", "_fss", "-dd",
        ])
        .expect("argumentos válidos");

        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.rules, ["_edit_lock", "_fss"]);
        assert_eq!(cli.debug, 2);
    }
}
