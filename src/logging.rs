//! Logging setup.
//!
//! Installs a global `tracing` subscriber writing to stderr. The filter comes
//! from `CMOOD_LOG`, then `RUST_LOG`. The CLI defaults to `warn`; the TUI
//! stays silent unless a filter is set, since stderr shares the terminal with
//! the alternate screen.

use tracing_subscriber::EnvFilter;

/// Which front-end is about to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Cli,
    Tui,
}

const DEFAULT_CLI_FILTER: &str = "warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init(mode: LogMode) {
    let Some(directive) = filter_directive(
        std::env::var("CMOOD_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
        mode,
    ) else {
        return;
    };

    let env_filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_CLI_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Pick the filter directive. `None` means "do not log".
fn filter_directive(cmood: Option<String>, rust: Option<String>, mode: LogMode) -> Option<String> {
    let explicit = cmood
        .filter(|s| !s.trim().is_empty())
        .or_else(|| rust.filter(|s| !s.trim().is_empty()));
    match (explicit, mode) {
        (Some(directive), _) => Some(directive),
        (None, LogMode::Cli) => Some(DEFAULT_CLI_FILTER.to_string()),
        (None, LogMode::Tui) => None,
    }
}
