use crate::record::LogRecord;
use crate::value::FieldValue;
use chrono::SecondsFormat;
use serde_json::{Map, Number, Value};

/// Turns an assembled [`LogRecord`] into the final output string.
///
/// This is the extension point for domain-specific encodings. The builder
/// returns whatever `serialize` produces, unchanged; an `Err` aborts the
/// call and nothing is emitted.
///
/// Plain functions and closures with the right signature are serializers
/// too:
///
/// ```
/// use jaylog::{LogRecord, SerializationError};
///
/// fn keys_only(record: &LogRecord) -> Result<String, SerializationError> {
///     Ok(record.iter().map(|(k, _)| k).collect::<Vec<_>>().join(","))
/// }
/// let _adapter = jaylog::LogAdapter::new(None).with_serializer(keys_only);
/// ```
pub trait RecordSerializer: Send + Sync {
    fn serialize(&self, record: &LogRecord) -> Result<String, SerializationError>;
}

impl<F> RecordSerializer for F
where
    F: Fn(&LogRecord) -> Result<String, SerializationError> + Send + Sync,
{
    fn serialize(&self, record: &LogRecord) -> Result<String, SerializationError> {
        self(record)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SerializationError {
    #[error("field {field:?}: value of type {kind} is not JSON serializable")]
    Unsupported { field: String, kind: String },

    #[error("field {field:?}: non-finite float cannot be encoded")]
    NonFinite { field: String },

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl SerializationError {
    pub fn custom(msg: impl Into<String>) -> Self {
        SerializationError::Custom(msg.into())
    }
}

/// Encoding for values without a built-in JSON form.
///
/// Returning `None` leaves the value unsupported and the record fails with
/// [`SerializationError::Unsupported`]; it is not written as `null`. A
/// fallback that wants `null` must return `Some(Value::Null)`.
pub type Fallback = dyn Fn(&FieldValue) -> Option<Value> + Send + Sync;

/// Default serializer: one line of JSON, keys in record order.
///
/// Without a fallback, `DateTime`, `Date` and `Opaque` values are rejected
/// with [`SerializationError::Unsupported`].
pub struct JsonSerializer {
    fallback: Option<Box<Fallback>>,
    pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for JsonSerializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSerializer")
            .field("fallback", &self.fallback.is_some())
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl JsonSerializer {
    pub fn new() -> Self {
        JsonSerializer {
            fallback: None,
            pretty: false,
        }
    }

    /// Use `fallback` for values that have no built-in encoding.
    ///
    /// A `None` from the fallback is an error, not `null`; see [`Fallback`].
    pub fn with_fallback<F>(fallback: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<Value> + Send + Sync + 'static,
    {
        JsonSerializer {
            fallback: Some(Box::new(fallback)),
            pretty: false,
        }
    }

    /// Indented multi-line output instead of a single line.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Convert the record into a `serde_json` object, preserving key order.
    pub fn to_value(&self, record: &LogRecord) -> Result<Value, SerializationError> {
        let mut map = Map::with_capacity(record.len());
        for (key, value) in record.iter() {
            map.insert(key.to_string(), self.encode(key, value)?);
        }
        Ok(Value::Object(map))
    }

    fn encode(&self, path: &str, value: &FieldValue) -> Result<Value, SerializationError> {
        Ok(match value {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::UInt(u) => Value::from(*u),
            FieldValue::Float(x) => Number::from_f64(*x)
                .map(Value::Number)
                .ok_or_else(|| SerializationError::NonFinite { field: path.to_string() })?,
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::List(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.encode(&format!("{path}[{i}]"), item))
                    .collect::<Result<_, _>>()?,
            ),
            FieldValue::Map(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (key, item) in fields.iter() {
                    map.insert(key.to_string(), self.encode(&format!("{path}.{key}"), item)?);
                }
                Value::Object(map)
            }
            FieldValue::DateTime(_) | FieldValue::Date(_) | FieldValue::Opaque(_) => self
                .fallback
                .as_ref()
                .and_then(|f| f(value))
                .ok_or_else(|| SerializationError::Unsupported {
                    field: path.to_string(),
                    kind: value.kind().to_string(),
                })?,
        })
    }
}

impl RecordSerializer for JsonSerializer {
    fn serialize(&self, record: &LogRecord) -> Result<String, SerializationError> {
        let value = self.to_value(record)?;
        let out = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(out)
    }
}

/// Fallback that writes dates and timestamps as ISO 8601 strings.
///
/// ```
/// use jaylog::serialize::{iso8601, JsonSerializer};
/// let serializer = JsonSerializer::with_fallback(iso8601);
/// # let _ = serializer;
/// ```
pub fn iso8601(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::DateTime(dt) => Some(Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))),
        FieldValue::Date(d) => Some(Value::String(d.format("%Y-%m-%d").to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::value::{Fields, Opaque};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(fields: Fields) -> LogRecord {
        LogRecord::new(fields)
    }

    #[test]
    fn keeps_key_order() {
        let rec = record(fields! { "level" => "INFO", "msg" => "hi", "a" => 1, "b" => vec!["x", "y"] });
        let out = JsonSerializer::new().serialize(&rec).unwrap();
        assert_eq!(out, r#"{"level":"INFO","msg":"hi","a":1,"b":["x","y"]}"#);
    }

    #[test]
    fn nested_maps_and_nulls() {
        let rec = record(fields! { "ctx" => fields! { "user" => 7u32, "ok" => true }, "none" => None::<i32> });
        let out = JsonSerializer::new().serialize(&rec).unwrap();
        assert_eq!(out, r#"{"ctx":{"user":7,"ok":true},"none":null}"#);
    }

    #[test]
    fn datetime_rejected_by_default() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let rec = record(fields! { "created" => created });
        let err = JsonSerializer::new().serialize(&rec).unwrap_err();
        match err {
            SerializationError::Unsupported { field, kind } => {
                assert_eq!(field, "created");
                assert_eq!(kind, "datetime");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_unsupported_reports_path() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rec = record(fields! { "batch" => vec![FieldValue::from(1), FieldValue::from(day)] });
        let err = JsonSerializer::new().serialize(&rec).unwrap_err();
        assert!(matches!(err, SerializationError::Unsupported { ref field, .. } if field == "batch[1]"));
    }

    #[test]
    fn iso8601_fallback_encodes_dates() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let rec = record(fields! { "created" => created, "day" => day, "n" => 1 });
        let out = JsonSerializer::with_fallback(iso8601).serialize(&rec).unwrap();
        assert_eq!(out, r#"{"created":"2024-01-02T03:04:05+00:00","day":"2024-01-02","n":1}"#);
    }

    #[test]
    fn fallback_can_decline() {
        let rec = record(fields! { "thing" => Opaque::new(42u8) });
        let err = JsonSerializer::with_fallback(iso8601).serialize(&rec).unwrap_err();
        assert!(matches!(err, SerializationError::Unsupported { .. }));
    }

    #[test]
    fn fallback_writes_null_only_when_asked() {
        let rec = record(fields! { "thing" => Opaque::new(42u8) });
        let out = JsonSerializer::with_fallback(|_: &FieldValue| Some(Value::Null))
            .serialize(&rec)
            .unwrap();
        assert_eq!(out, r#"{"thing":null}"#);
    }

    #[test]
    fn non_finite_floats_are_errors() {
        let rec = record(fields! { "ratio" => f64::NAN });
        let err = JsonSerializer::new().serialize(&rec).unwrap_err();
        assert!(matches!(err, SerializationError::NonFinite { ref field } if field == "ratio"));
    }

    #[test]
    fn closures_are_serializers() {
        let count = |rec: &LogRecord| -> Result<String, SerializationError> { Ok(rec.len().to_string()) };
        let rec = record(fields! { "a" => 1, "b" => 2 });
        assert_eq!(count.serialize(&rec).unwrap(), "2");
    }

    #[test]
    fn pretty_output_is_multiline() {
        let rec = record(fields! { "a" => 1 });
        let out = JsonSerializer::new().pretty().serialize(&rec).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }
}
