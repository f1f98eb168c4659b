use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

pub use tracing::subscriber::SetGlobalDefaultError;

/// Configuration of the `fmt` subscriber installed by [`init_tracing`].
///
/// **Fields**
/// - `max_level`: most verbose `tracing` level that gets printed.
/// - `ansi`: colour escape codes in the output; keep `false` when lines
///   are consumed as JSON.
/// - `stderr`: write to stderr instead of stdout.
/// - `with_metadata`: prefix every line with time, level and target. With
///   `false` each output line is exactly the JSON produced by the adapter.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub max_level: tracing::Level,
    pub ansi: bool,
    pub stderr: bool,
    pub with_metadata: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            max_level: tracing::Level::INFO,
            ansi: false,
            stderr: false,
            with_metadata: false,
        }
    }
}

/// Install a global `tracing` subscriber that prints the lines emitted by
/// [`TracingSink`](crate::tracing_sink::TracingSink).
///
/// **Returns**
/// - `Err(..)` if a global subscriber was already set.
pub fn init_tracing_with_config(config: TracingConfig) -> Result<(), SetGlobalDefaultError> {
    let filter = LevelFilter::from_level(config.max_level);

    // The writer and the formatter change the layer type, so each
    // combination is assembled separately.
    match (config.stderr, config.with_metadata) {
        (false, false) => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_ansi(config.ansi)
                .without_time()
                .with_level(false)
                .with_target(false);
            tracing::subscriber::set_global_default(Registry::default().with(fmt_layer).with(filter))
        }
        (true, false) => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .without_time()
                .with_level(false)
                .with_target(false);
            tracing::subscriber::set_global_default(Registry::default().with(fmt_layer).with(filter))
        }
        (false, true) => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_ansi(config.ansi);
            tracing::subscriber::set_global_default(Registry::default().with(fmt_layer).with(filter))
        }
        (true, true) => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi);
            tracing::subscriber::set_global_default(Registry::default().with(fmt_layer).with(filter))
        }
    }
}

/// Initialize tracing with [`TracingConfig::default`]: raw JSON lines on
/// stdout at `INFO` and above.
pub fn init_tracing() -> Result<(), SetGlobalDefaultError> {
    init_tracing_with_config(TracingConfig::default())
}
