//! Logging setup
//!
//! Logs go to stderr so they never mix with command output. `RUST_LOG` wins
//! over `--verbose`.

use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "jirosso=debug";
const DEFAULT_FILTER: &str = "warn";

pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    })
}
