//! Subscriber installation.
//!
//! Output is one JSON object per event on stdout. The filter comes from
//! `RUST_LOG` and falls back to `info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init() {
    let _ = try_init();
}

/// Like [`init`], but reports whether this call installed the subscriber.
pub fn try_init() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_a_no_op() {
        init();
        assert!(!try_init());
        init();
    }
}
