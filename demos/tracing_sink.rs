use std::sync::Arc;

use jaylog::init::init_tracing;
use jaylog::tracing_sink::TracingSink;
use jaylog::{callsite, fields, LogAdapter, LogCall};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let adapter = LogAdapter::new(Some(Arc::new(TracingSink)))
        .with_constant("pid", std::process::id())
        .with_constant("app", "tracing-sink-demo");

    adapter.info("starting service", fields! {})?;

    adapter.log(
        &LogCall::error("authentication failed for user $user_id")
            .at(callsite!())
            .tag("auth")
            .tag("security")
            .field("user_id", 42)
            .field("reason", "invalid password"),
    )?;

    // Filtered out by the default INFO subscriber before anything is built.
    adapter.debug("cache warmed with $n entries", fields! { "n" => 1024 })?;

    Ok(())
}
