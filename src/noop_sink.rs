use crate::error::SinkError;
use crate::level::Level;
use crate::sink::LogSink;

/// A sink that simply drops all lines.
///
/// Records are still built in full, so template and serialization errors
/// keep surfacing. Useful for tests that only care about those errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn send(&self, _level: Level, _line: &str) -> Result<(), SinkError> {
        Ok(())
    }
}
