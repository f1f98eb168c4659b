use chrono::Utc;
use jaylog::serialize::iso8601;
use jaylog::writer_sink::WriterSink;
use jaylog::{FieldValue, JsonSerializer, LogAdapter, LogCall, LogSink};
use std::sync::Arc;

/// Money amounts travel as opaque values and are written as strings with
/// two decimals.
struct Cents(i64);

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

fn encode(value: &FieldValue) -> Option<serde_json::Value> {
    if let FieldValue::Opaque(o) = value {
        if let Some(cents) = o.downcast_ref::<Cents>() {
            return Some(serde_json::Value::String(cents.to_string()));
        }
    }
    iso8601(value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sink: Arc<dyn LogSink> = Arc::new(WriterSink::stdout());
    let adapter = LogAdapter::new(Some(sink)).with_serializer(JsonSerializer::with_fallback(encode));

    adapter.log(
        &LogCall::info("order $order paid $amount")
            .field("order", "A-1001")
            .field("amount", jaylog::Opaque::new(Cents(129_99)))
            .field("paid_at", Utc::now())
            .without("location"),
    )?;

    // The plain serializer refuses the same record.
    let plain = LogAdapter::new(None);
    let err = plain
        .statement(&LogCall::info("paid").field("paid_at", Utc::now()))
        .unwrap_err();
    eprintln!("default serializer: {err}");

    adapter.flush()?;
    Ok(())
}
