use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
/// Safe to call more than once; a subscriber that is already installed is kept.
pub fn init_logging(default_level: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let installed = fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();

  if let Err(e) = installed {
    debug!(error = %e, "Keeping the existing tracing subscriber");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_init_logging_twice_keeps_first_subscriber() {
    init_logging("debug");
    init_logging("info");
    debug!("still logging after a second init");
  }
}
