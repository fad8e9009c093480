use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialise logging.
///
/// With `debug` the default level is `debug` and `RUST_LOG` may override it;
/// otherwise the level is forced to `info`. When `log_file` is given, output is
/// appended to that file instead of stderr. Calling this more than once keeps
/// the first subscriber.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_file.as_deref().and_then(|path| Some((path.parent()?, path.file_name()?))) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            builder.with_ansi(false).with_writer(appender).try_init()
        }
        None => builder.try_init(),
    };
    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}
