//! Construccion del logger de procesos.

use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter, layer::SubscriberExt};

use crate::error::ServerError;
use crate::settings::{LogFormat, LogSettings};

/// Parses a level name; unknown names disable level filtering.
///
/// `fatal` and `panic` are accepted as aliases of `error`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "fatal" | "panic" => LevelFilter::ERROR,
        other => other.parse().unwrap_or(LevelFilter::TRACE),
    }
}

/// Creates a JSON logger writing timestamped events to `writer`.
///
/// Events at a level below `level` are discarded. An unrecognised level
/// logs everything.
///
/// # Example
///
/// ```
/// let logger = reqlog_server::logger::new_logger(std::io::stderr, "info");
/// tracing::dispatcher::with_default(&logger, || tracing::info!(tag = "server", "ready"));
/// ```
pub fn new_logger<W>(writer: W, level: &str) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .with_max_level(parse_level(level))
        .finish();

    Dispatch::new(subscriber)
}

/// Installs the process-wide logger and returns a handle to it.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(settings: &LogSettings) -> Result<Dispatch, ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(&settings.level).to_string()));

    let registry = tracing_subscriber::registry().with(filter);
    let dispatch = match settings.format {
        LogFormat::Json => Dispatch::new(
            registry.with(tracing_subscriber::fmt::layer().json().flatten_event(true)),
        ),
        LogFormat::Pretty => Dispatch::new(registry.with(tracing_subscriber::fmt::layer().pretty())),
    };

    tracing::dispatcher::set_global_default(dispatch.clone())?;
    Ok(dispatch)
}
