//! Process-wide tracing setup shared by the stock book binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filter + JSON formatter).
pub mod tracing;
