//! Process-wide logging setup for the contact service.

/// Tracing subscriber configuration (filters, formatting).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide structured logging with JSON output.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with(LogFormat::Json);
}

/// Initialize process-wide logging with an explicit output format.
pub fn init_with(format: LogFormat) {
    self::tracing::init(format);
}
