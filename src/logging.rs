//! Inicialización del registro de trazas para el binario.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Traduce el número de `-d` a un nivel de traza.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Envía las trazas a stderr. `RUST_LOG`, si está definido, tiene prioridad.
pub fn setup_logging(verbosity: u8) {
    let level = level_for_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter);

    if let Err(error) = tracing_subscriber::registry().with(fmt_layer).try_init() {
        eprintln!("No se pudo inicializar el registro: {error}");
    }
}
