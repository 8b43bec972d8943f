pub mod cmd;
pub mod config;

use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "llm_gateway=info".into());

    #[cfg(not(debug_assertions))]
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!cfg!(windows))
        .with_target(false)
        .compact()
        .init();

    // Debug builds: show file and line number
    #[cfg(debug_assertions)]
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!cfg!(windows))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    debug!("Logging initialized");
}
