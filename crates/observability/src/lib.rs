//! Logging setup shared by the server binary and tests.

/// Tracing subscriber configuration.
pub mod tracing;

/// Initialize process-wide logging with the default `info` filter.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}
