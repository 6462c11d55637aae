use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "helpdesk.log";
/// Environment variable holding an EnvFilter directive
pub const LOG_ENV: &str = "HELPDESK_LOG";

/// Route `tracing` output to `helpdesk/helpdesk.log`.
///
/// The terminal belongs to the TUI (or to CLI output), so nothing is ever
/// written to stdout/stderr. If the log file can't be opened, logging is
/// simply off.
pub fn init(data_dir: &Path) {
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
    {
        Ok(f) => f,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "helpdesk=info".into());

    // A second init (tests, repeated dispatch) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
}
