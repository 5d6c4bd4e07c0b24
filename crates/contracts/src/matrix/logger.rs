/// Logging seam for the matrix flow.
///
/// The library never talks to a console directly; the host injects an
/// implementation and routes events wherever it wants (browser console, test
/// buffer, nothing).
pub trait MatrixLogger {
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards everything. Useful for tests and for callers that do not care.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl MatrixLogger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
