use crate::error::SinkError;
use crate::level::Level;

/// Destination for finished log lines.
///
/// The adapter builds the JSON string and hands it over together with its
/// level; everything after that (writing, shipping, filtering by the
/// backend's own configuration) belongs to the sink.
pub trait LogSink: Send + Sync {
    /// Deliver one finished line.
    ///
    /// **Parameters**
    /// - `level`: severity of the statement, for backends that route or
    ///   filter by level.
    /// - `line`: the serialized record exactly as the serializer produced
    ///   it, without a trailing newline.
    ///
    /// **Returns**
    /// - `Ok(())` if the backend accepted the line.
    /// - `Err(..)` if it did not. The error is passed back to the caller of
    ///   [`LogAdapter::log`](crate::adapter::LogAdapter::log) unchanged.
    fn send(&self, level: Level, line: &str) -> Result<(), SinkError>;

    /// Flush any buffered lines, if the backend implements buffering.
    ///
    /// Default implementation is a no-op.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Whether a line at `level` would be kept. The adapter skips building
    /// records for levels the sink would discard.
    ///
    /// Default implementation accepts every level.
    fn enabled(&self, _level: Level) -> bool {
        true
    }
}
