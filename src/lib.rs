//! Structured log statements as single JSON lines.
//!
//! A [`LogAdapter`] turns a `$name` message template plus key-value fields
//! into one JSON object carrying the level, the interpolated message, a
//! timestamp, the call site, constant fields and tags, then hands the
//! string to an optional [`LogSink`].

pub mod adapter;
pub mod call;
pub mod clock;
pub mod error;
pub mod keys;
pub mod level;
pub mod location;
pub mod record;
pub mod serialize;
pub mod template;
pub mod value;

pub mod env;
pub mod sink;
pub mod memory_sink;
pub mod noop_sink;
pub mod tracing_sink;
pub mod writer_sink;

#[cfg(feature = "subscriber")]
pub mod init;

pub use adapter::LogAdapter;
pub use call::LogCall;
pub use error::{Error, Result};
pub use keys::FieldKeys;
pub use level::Level;
pub use location::CallSite;
pub use record::LogRecord;
pub use serialize::{JsonSerializer, RecordSerializer, SerializationError};
pub use sink::LogSink;
pub use template::TemplateError;
pub use value::{FieldValue, Fields, Opaque};
