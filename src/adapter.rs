use crate::call::LogCall;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::keys::{ConfigError, FieldKeys};
use crate::level::Level;
use crate::record::LogRecord;
use crate::serialize::{JsonSerializer, RecordSerializer};
use crate::sink::LogSink;
use crate::template::{self, TemplateError};
use crate::value::{FieldValue, Fields};
use chrono::SecondsFormat;
use std::sync::Arc;

/// Builds one JSON log line per call and optionally hands it to a sink.
///
/// Configuration (reserved keys, constant fields, serializer, clock, sink)
/// is fixed once the adapter is built; every method takes `&self`, so one
/// adapter can be shared across threads behind an `Arc`.
///
/// ```
/// use jaylog::{fields, Level, LogAdapter};
///
/// let adapter = LogAdapter::new(None).with_constants(fields! { "pid" => 12345, "app" => "APP NAME" });
/// let line = adapter
///     .build_log_statement(Level::Info, "started $n workers", &["boot"], &["location", "ts"], fields! { "n" => 4 })
///     .unwrap();
/// assert_eq!(
///     line,
///     r#"{"level":"INFO","msg":"started 4 workers","pid":12345,"app":"APP NAME","tags":["boot"],"n":4}"#
/// );
/// ```
pub struct LogAdapter {
    keys: FieldKeys,
    constants: Fields,
    serializer: Arc<dyn RecordSerializer>,
    clock: Arc<dyn Clock>,
    sink: Option<Arc<dyn LogSink>>,
}

impl LogAdapter {
    /// Create an adapter with default keys, [`JsonSerializer`] and the
    /// system clock.
    ///
    /// **Parameters**
    /// - `sink`: where [`log`](Self::log) delivers lines. `None` builds
    ///   records and discards them, which is handy in tests.
    pub fn new(sink: Option<Arc<dyn LogSink>>) -> Self {
        LogAdapter {
            keys: FieldKeys::default(),
            constants: Fields::new(),
            serializer: Arc::new(JsonSerializer::new()),
            clock: Arc::new(SystemClock),
            sink,
        }
    }

    /// Add a field written into every record. Caller fields with the same
    /// key replace it for that call.
    pub fn with_constant(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.constants.insert(key, value);
        self
    }

    pub fn with_constants(mut self, constants: Fields) -> Self {
        self.constants.extend(constants);
        self
    }

    /// Rename the reserved keys. Fails if a key is empty or shared by two
    /// roles.
    pub fn with_keys(mut self, keys: FieldKeys) -> std::result::Result<Self, ConfigError> {
        keys.validate()?;
        self.keys = keys;
        Ok(self)
    }

    pub fn with_serializer(mut self, serializer: impl RecordSerializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn keys(&self) -> &FieldKeys {
        &self.keys
    }

    pub fn constants(&self) -> &Fields {
        &self.constants
    }

    pub fn sink(&self) -> Option<&Arc<dyn LogSink>> {
        self.sink.as_ref()
    }

    /// Assemble the record for `call` without serializing it.
    ///
    /// Order of entries: level, message, timestamp, location, constants,
    /// tags, caller fields. Keys named in the call's suppression set (or
    /// in the caller field under the `without` key) are left out of the
    /// computed part, and caller fields never override reserved keys.
    pub fn record(&self, call: &LogCall) -> std::result::Result<LogRecord, TemplateError> {
        let keys = &self.keys;

        let mut fields = call.caller_fields().clone();
        let mut without: Vec<String> = call.suppressed().to_vec();
        if let Some(extra) = fields.remove(&keys.without) {
            collect_suppressed(&keys.without, extra, &mut without);
        }
        let suppressed = |key: &str| without.iter().any(|w| w == key);

        let message = template::substitute(call.template(), &fields)?;

        let mut record = Fields::with_capacity(5 + self.constants.len() + fields.len());
        if !suppressed(&keys.level) {
            record.insert(keys.level.as_str(), call.level().name());
        }
        if !suppressed(&keys.message) {
            record.insert(keys.message.as_str(), message);
        }
        if !suppressed(&keys.timestamp) {
            let ts = self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
            record.insert(keys.timestamp.as_str(), ts);
        }
        if !suppressed(&keys.location) {
            record.insert(keys.location.as_str(), call.site().to_string());
        }

        for (key, value) in self.constants.iter() {
            if !keys.is_reserved(key) {
                record.insert(key, value.clone());
            }
        }

        if !call.tags().is_empty() && !suppressed(&keys.tags) {
            record.insert(keys.tags.as_str(), call.tags().to_vec());
        }

        for (key, value) in fields {
            if keys.is_reserved(&key) {
                tracing::trace!(key = %key, "dropping caller field that collides with a reserved key");
                continue;
            }
            record.insert(key, value);
        }

        Ok(LogRecord::new(record))
    }

    /// Build the serialized line for `call`.
    ///
    /// The string is exactly what the configured serializer returned.
    pub fn statement(&self, call: &LogCall) -> Result<String> {
        let record = self.record(call)?;
        Ok(self.serializer.serialize(&record)?)
    }

    /// Positional form of [`statement`](Self::statement).
    ///
    /// **Parameters**
    /// - `level`: severity written under the level key.
    /// - `template`: message with `$name` placeholders resolved from
    ///   `fields`.
    /// - `tags`: labels stored as a list, omitted when empty.
    /// - `without`: reserved keys to leave out of this record.
    /// - `fields`: caller data, used for the template and merged into the
    ///   record.
    #[track_caller]
    pub fn build_log_statement(
        &self,
        level: Level,
        template: &str,
        tags: &[&str],
        without: &[&str],
        fields: Fields,
    ) -> Result<String> {
        let mut call = LogCall::new(level, template).tags_from(tags.iter().copied()).fields(fields);
        for key in without {
            call = call.without(*key);
        }
        self.statement(&call)
    }

    /// Build the line for `call` and deliver it to the sink.
    ///
    /// Nothing is built when the sink reports the level as disabled. With
    /// no sink the line is built and dropped, so errors still surface.
    pub fn log(&self, call: &LogCall) -> Result<()> {
        if let Some(sink) = &self.sink {
            if !sink.enabled(call.level()) {
                return Ok(());
            }
        }

        let line = self.statement(call)?;

        match &self.sink {
            Some(sink) => sink.send(call.level(), &line).map_err(Error::Sink),
            None => Ok(()),
        }
    }

    #[track_caller]
    pub fn debug(&self, template: &str, fields: Fields) -> Result<()> {
        self.log(&LogCall::debug(template).fields(fields))
    }

    #[track_caller]
    pub fn info(&self, template: &str, fields: Fields) -> Result<()> {
        self.log(&LogCall::info(template).fields(fields))
    }

    #[track_caller]
    pub fn warning(&self, template: &str, fields: Fields) -> Result<()> {
        self.log(&LogCall::warning(template).fields(fields))
    }

    #[track_caller]
    pub fn error(&self, template: &str, fields: Fields) -> Result<()> {
        self.log(&LogCall::error(template).fields(fields))
    }

    #[track_caller]
    pub fn critical(&self, template: &str, fields: Fields) -> Result<()> {
        self.log(&LogCall::critical(template).fields(fields))
    }

    /// Flush the sink, if there is one.
    pub fn flush(&self) -> Result<()> {
        match &self.sink {
            Some(sink) => sink.flush().map_err(Error::Sink),
            None => Ok(()),
        }
    }
}

impl Default for LogAdapter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for LogAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogAdapter")
            .field("keys", &self.keys)
            .field("constants", &self.constants)
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

/// Accepts a single key or a list of keys; anything else is ignored.
fn collect_suppressed(field: &str, value: FieldValue, out: &mut Vec<String>) {
    match value {
        FieldValue::Str(key) => out.push(key),
        FieldValue::List(items) => {
            for item in items {
                match item {
                    FieldValue::Str(key) => out.push(key),
                    other => tracing::debug!(
                        field,
                        kind = other.kind(),
                        "ignoring non-string entry in suppression list"
                    ),
                }
            }
        }
        other => tracing::debug!(field, kind = other.kind(), "ignoring suppression field that is not a key list"),
    }
}
