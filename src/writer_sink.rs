use crate::error::SinkError;
use crate::level::Level;
use crate::sink::LogSink;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes each line followed by `\n` to any [`io::Write`].
///
/// Writes are serialized through a mutex so concurrent callers never
/// interleave within a line. Wrap the writer in a `BufWriter` for files and
/// call [`LogSink::flush`] before shutdown.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink {
            writer: Mutex::new(writer),
        }
    }

    /// Return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn send(&self, _level: Level, line: &str) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().map_err(|_| "log writer mutex poisoned")?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().map_err(|_| "log writer mutex poisoned")?;
        writer.flush()?;
        Ok(())
    }
}
