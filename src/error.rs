use crate::serialize::SerializationError;
use crate::template::TemplateError;

/// Error type for sink failures, matching [`LogSink`](crate::sink::LogSink).
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Everything a log call can fail with.
///
/// None of these are retried: a template or serialization failure is a
/// programming error at the call site, and sink errors are reported to the
/// caller as-is.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error("log sink failed: {0}")]
    Sink(#[source] SinkError),
}

pub type Result<T> = std::result::Result<T, Error>;
