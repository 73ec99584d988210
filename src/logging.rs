use configuration::{LogFormat, LoggingSettings};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const LOG_FILE_PREFIX: &str = "meridian.log";

/// Installs the global subscriber.
///
/// Console output always goes to stderr so that table and JSON output on
/// stdout stays clean. `RUST_LOG` takes precedence over the configured level.
/// When a log directory is configured, a JSON copy of every event is written
/// to a daily rolling file; the returned guard must be kept alive until exit
/// for that file to be flushed.
pub fn init(settings: &LoggingSettings, format_override: Option<LogFormat>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    let console_layer = match format_override.unwrap_or(settings.format) {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
        LogFormat::Json => fmt::layer().with_writer(std::io::stderr).json().boxed(),
    };

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
