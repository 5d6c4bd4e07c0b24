use contracts::matrix::MatrixLogger;

/// Routes matrix events to the browser console via the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMatrixLogger;

impl MatrixLogger for ConsoleMatrixLogger {
    fn debug(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
    }
}
