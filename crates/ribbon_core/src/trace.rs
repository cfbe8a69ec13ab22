use cap_std::fs_utf8::Dir;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "ribbon.log";
/// used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

pub struct RibbonTracing;

impl RibbonTracing {
    /// Installs the global subscriber: a human readable layer on stdout and a plain layer
    /// writing into [`LOG_FILE_NAME`] inside `data_dir`.
    /// The returned guard flushes the file writer when dropped, so keep it alive until exit.
    pub fn install_tracing(data_dir: &Dir) -> Result<WorkerGuard> {
        let log_file = data_dir
            .create(LOG_FILE_NAME)
            .into_diagnostic()
            .wrap_err("failed to create log file")?;
        let (file_writer, guard) = tracing_appender::non_blocking(log_file.into_std());

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .with_writer(file_writer),
            )
            .try_init()
            .into_diagnostic()
            .wrap_err("failed to install global tracing subscriber")?;
        tracing::info!(log_file = LOG_FILE_NAME, "tracing installed");
        Ok(guard)
    }
}
