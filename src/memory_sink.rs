use crate::error::SinkError;
use crate::level::Level;
use crate::sink::LogSink;
use std::sync::{Mutex, MutexGuard};

/// Keeps every delivered line in memory.
///
/// Optionally drops lines below a minimum level, which also exercises the
/// adapter's [`LogSink::enabled`] short-circuit.
#[derive(Debug, Default)]
pub struct MemorySink {
    min_level: Option<Level>,
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_level(level: Level) -> Self {
        MemorySink {
            min_level: Some(level),
            lines: Mutex::default(),
        }
    }

    /// Copy of everything captured so far.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.guard().clone()
    }

    /// Captured lines without their levels.
    pub fn texts(&self) -> Vec<String> {
        self.guard().iter().map(|(_, line)| line.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Remove and return everything captured so far.
    pub fn take(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.guard())
    }

    fn guard(&self) -> MutexGuard<'_, Vec<(Level, String)>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn send(&self, level: Level, line: &str) -> Result<(), SinkError> {
        self.guard().push((level, line.to_string()));
        Ok(())
    }

    fn enabled(&self, level: Level) -> bool {
        self.min_level.map_or(true, |min| level >= min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_and_takes() {
        let sink = MemorySink::new();
        sink.send(Level::Info, "a").unwrap();
        sink.send(Level::Error, "b").unwrap();
        assert_eq!(sink.texts(), vec!["a", "b"]);
        assert_eq!(sink.take(), vec![(Level::Info, "a".to_string()), (Level::Error, "b".to_string())]);
        assert!(sink.is_empty());
    }

    #[test]
    fn min_level_filters() {
        let sink = MemorySink::with_min_level(Level::Warning);
        assert!(!sink.enabled(Level::Info));
        assert!(sink.enabled(Level::Warning));
        assert!(sink.enabled(Level::Critical));
    }
}
