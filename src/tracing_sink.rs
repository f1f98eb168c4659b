use crate::error::SinkError;
use crate::level::Level;
use crate::sink::LogSink;

/// Forwards each line to `tracing` as an event with target `jaylog`.
///
/// The line becomes the event message, so whatever subscriber the process
/// has installed decides where it ends up. `Critical` is emitted at
/// `ERROR` since `tracing` has no higher level. Pair with
/// [`init_tracing`](crate::init::init_tracing) for plain JSON-lines output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn send(&self, level: Level, line: &str) -> Result<(), SinkError> {
        match level {
            Level::Debug => tracing::debug!(target: "jaylog", "{}", line),
            Level::Info => tracing::info!(target: "jaylog", "{}", line),
            Level::Warning => tracing::warn!(target: "jaylog", "{}", line),
            Level::Error | Level::Critical => tracing::error!(target: "jaylog", "{}", line),
        }
        Ok(())
    }

    fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Debug => tracing::enabled!(target: "jaylog", tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: "jaylog", tracing::Level::INFO),
            Level::Warning => tracing::enabled!(target: "jaylog", tracing::Level::WARN),
            Level::Error | Level::Critical => tracing::enabled!(target: "jaylog", tracing::Level::ERROR),
        }
    }
}
