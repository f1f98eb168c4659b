//! End-to-end behaviour of built log statements, checked by parsing the
//! produced JSON back.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use jaylog::clock::FixedClock;
use jaylog::serialize::iso8601;
use jaylog::{
    fields, Error, FieldKeys, Fields, JsonSerializer, Level, LogAdapter, LogCall, SerializationError,
};
use serde_json::Value;

fn parse(line: &str) -> Value {
    serde_json::from_str(line).expect("statement is valid JSON")
}

fn logger() -> LogAdapter {
    LogAdapter::new(None)
}

#[test]
fn arbitrary_constants_are_in_every_record() {
    let logger = LogAdapter::new(None).with_constants(fields! { "pid" => 12345, "app" => "APP NAME" });

    for call in [LogCall::info(""), LogCall::error("other").field("x", 1)] {
        let res = parse(&logger.statement(&call).unwrap());
        assert_eq!(res["pid"], 12345);
        assert_eq!(res["app"], "APP NAME");
    }
}

#[test]
fn simple_log_statement() {
    let stmt = "simple log statement";
    let res = parse(&logger().statement(&LogCall::debug(stmt)).unwrap());
    assert_eq!(res["msg"], stmt);
    assert_eq!(res["level"], "DEBUG");
}

#[test]
fn with_string_formatting() {
    let stmt = "simple log statement with variable $var";
    let line = logger()
        .build_log_statement(Level::Debug, stmt, &[], &[], fields! { "var" => 1 })
        .unwrap();
    let res = parse(&line);
    assert_eq!(res["msg"], "simple log statement with variable 1");
    assert_eq!(res["var"], 1);
}

#[test]
fn tags_are_an_ordered_list() {
    let line = logger()
        .build_log_statement(Level::Debug, "", &["TAG1", "TAG2"], &[], Fields::new())
        .unwrap();
    let res = parse(&line);
    let tags = res["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0], "TAG1");
    assert_eq!(tags[1], "TAG2");
}

#[test]
fn custom_serializer_handles_datetimes() {
    let created = Utc::now();
    let call = LogCall::debug("$created").field("created", created).field("n", 3);

    let err = logger().statement(&call).unwrap_err();
    assert!(matches!(err, Error::Serialization(SerializationError::Unsupported { .. })));

    let custom = LogAdapter::new(None).with_serializer(JsonSerializer::with_fallback(iso8601));
    let res = parse(&custom.statement(&call).unwrap());
    assert_ne!(res["level"], "ERROR");
    assert_eq!(res["level"], "DEBUG");
    assert_eq!(res["n"], 3);

    let parsed = DateTime::parse_from_rfc3339(res["created"].as_str().unwrap()).unwrap();
    assert_eq!(parsed, created);
    assert_eq!(res["msg"], res["created"]);
}

#[test]
fn closure_serializer_sees_the_whole_record() {
    let adapter = LogAdapter::new(None)
        .with_clock(FixedClock(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()))
        .with_serializer(|record: &jaylog::LogRecord| -> Result<String, SerializationError> {
            let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let mut value = JsonSerializer::with_fallback(iso8601).to_value(record)?;
            value["day"] = Value::String(day.to_string());
            Ok(value.to_string())
        });
    let res = parse(&adapter.statement(&LogCall::info("x").without("location")).unwrap());
    assert_eq!(res["day"], "2020-01-01");
    assert_eq!(res["ts"], "2020-01-01T00:00:00.000Z");
}

#[test]
fn core_fields_follow_renamed_keys() {
    let keys = FieldKeys {
        message: "m".to_string(),
        level: "l".to_string(),
        without: "w".to_string(),
        ..FieldKeys::default()
    };
    let logger = LogAdapter::new(None).with_keys(keys.clone()).unwrap();
    let call = LogCall::debug("").field("w", vec![keys.location.as_str()]);
    let res = parse(&logger.statement(&call).unwrap());

    assert!(res.get(&keys.message).is_some());
    assert!(res.get(&keys.level).is_some());
    assert!(res.get(&keys.location).is_none());
    assert!(res.get(&keys.without).is_none());
    assert!(res.get("msg").is_none());
}

#[test]
fn without_parameter_suppresses_only_named_fields() {
    let line = logger()
        .build_log_statement(Level::Info, "x", &["t"], &["location"], fields! { "k" => "v" })
        .unwrap();
    let res = parse(&line);
    assert!(res.get("location").is_none());
    for key in ["level", "msg", "ts", "tags", "k"] {
        assert!(res.get(key).is_some(), "{key} should be present");
    }
}

#[test]
fn caller_cannot_override_level_or_message() {
    let call = LogCall::info("real message")
        .field("level", "CRITICAL")
        .field("msg", "forged");
    let res = parse(&logger().statement(&call).unwrap());
    assert_eq!(res["level"], "INFO");
    assert_eq!(res["msg"], "real message");
}

#[test]
fn location_points_at_the_calling_line() {
    let line = line!() + 1;
    let call = LogCall::info("here");
    let res = parse(&logger().statement(&call).unwrap());
    assert_eq!(res["location"], format!("{}:{}", file!(), line));

    let res = parse(&logger().statement(&LogCall::info("here").at(jaylog::callsite!())).unwrap());
    assert!(res["location"].as_str().unwrap().starts_with("adapter_test:"));
}

#[test]
fn timestamp_comes_from_the_clock() {
    let at = Utc.with_ymd_and_hms(2023, 11, 5, 22, 1, 2).unwrap();
    let adapter = LogAdapter::new(None).with_clock(FixedClock(at));
    let call = LogCall::info("x");
    let first = adapter.statement(&call).unwrap();
    let second = adapter.statement(&call).unwrap();
    assert_eq!(first, second);
    assert_eq!(parse(&first)["ts"], "2023-11-05T22:01:02.000Z");
}

#[test]
fn missing_template_value_fails_without_output() {
    let sink = std::sync::Arc::new(jaylog::memory_sink::MemorySink::new());
    let adapter = LogAdapter::new(Some(sink.clone()));
    let err = adapter.log(&LogCall::warning("user $user")).unwrap_err();
    assert!(matches!(err, Error::Template(_)));
    assert!(sink.is_empty());
}

#[test]
fn level_and_message_can_be_suppressed() {
    let line = logger()
        .build_log_statement(Level::Info, "x", &[], &["level", "msg"], fields! { "k" => 1 })
        .unwrap();
    let res = parse(&line);
    assert!(res.get("level").is_none());
    assert!(res.get("msg").is_none());
    assert_eq!(res["k"], 1);
    assert!(res.get("ts").is_some());
    assert!(res.get("location").is_some());

    let call = LogCall::info("x")
        .field("without", vec!["level", "msg"])
        .field("level", "forged")
        .field("msg", "forged");
    let res = parse(&logger().statement(&call).unwrap());
    assert!(res.get("level").is_none());
    assert!(res.get("msg").is_none());
    assert!(res.get("without").is_none());
    assert!(res.get("ts").is_some());
}

#[test]
fn adapter_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LogAdapter>();

    let sink = std::sync::Arc::new(jaylog::memory_sink::MemorySink::new());
    let adapter = std::sync::Arc::new(LogAdapter::new(Some(sink.clone())));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let adapter = adapter.clone();
            std::thread::spawn(move || adapter.info("worker $i", fields! { "i" => i }))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(sink.len(), 4);
}
