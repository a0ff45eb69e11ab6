/* src/cli/core/src/logging.rs */

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "GIG_LOG";

/// Diagnostics go to stderr so `gig head` output can be piped. `-v` forces
/// debug; otherwise `GIG_LOG` decides, defaulting to warn.
pub fn init(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
