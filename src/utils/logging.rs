use std::path::Path;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

const LOG_PREFIX: &str = "ccpulse";

/// Install the global subscriber.
///
/// `RUST_LOG` wins; otherwise `--debug` selects `debug` and everything else
/// stays at `warn`. When `log_dir` is given (watch mode owns the terminal),
/// records go to a daily-rotated file there instead of stderr.
pub(crate) fn init_logging(debug: bool, log_dir: Option<&Path>) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={default_level}",
            env!("CARGO_PKG_NAME").replace('-', "_")
        ))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_dir {
        Some(dir) => {
            let appender = match tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix(LOG_PREFIX)
                .filename_suffix("log")
                .build(dir)
            {
                Ok(appender) => appender,
                // Stderr would scribble over the live screen
                Err(_) => return,
            };
            builder.with_ansi(false).with_writer(appender).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {e}");
    }
}
