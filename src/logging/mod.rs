//! JSON-lines structured logging for layout canvases.
//!
//! Events are plain serde structs; sinks decide where the serialized line
//! goes. Hosts that do not care about logs use [`Logger::disabled`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

pub const CANVAS_TARGET: &str = "layout::canvas";
pub const METRICS_TARGET: &str = "layout::canvas.metrics";

pub type LogFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "LogFields::is_empty")]
    pub fields: LogFields,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    pub fn with_fields(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
        fields: LogFields,
    ) -> Self {
        Self {
            fields,
            ..Self::new(level, target, message)
        }
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self::from_arc(Arc::new(sink))
    }

    /// Share a sink the caller keeps a handle to, e.g. a [`MemorySink`].
    pub fn from_arc(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: LogLevel::Trace,
        }
    }

    pub fn disabled() -> Self {
        Self::new(NullSink)
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) -> LoggingResult<()> {
        self.log_event(LogEvent::new(level, target, message))
    }

    pub fn log_with_fields(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: LogFields,
    ) -> LoggingResult<()> {
        self.log_event(LogEvent::with_fields(level, target, message, fields))
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        if !self.enabled(event.level) {
            return Ok(());
        }
        self.sink.log(&event)
    }
}

/// Appends one JSON object per line, truncating the file once it would grow
/// past `max_bytes` (0 disables the limit).
pub struct FileSink {
    path: PathBuf,
    max_bytes: u64,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            max_bytes,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_line(&self, mut line: String) -> LoggingResult<()> {
        line.push('\n');
        let mut guard = lock(&self.writer);

        if self.should_rotate(guard.get_ref(), line.len() as u64)? {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)?;
            *guard = BufWriter::new(file);
        }

        guard.write_all(line.as_bytes())?;
        guard.flush()?;
        Ok(())
    }

    fn should_rotate(&self, file: &File, incoming_len: u64) -> std::io::Result<bool> {
        if self.max_bytes == 0 {
            return Ok(false);
        }
        let current = file.metadata()?.len();
        Ok(current + incoming_len > self.max_bytes)
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let line = serde_json::to_string(event)?;
        self.write_line(line)
    }
}

/// Keeps events in memory. Hosts can drain it into their own telemetry.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        lock(&self.events).clone()
    }

    pub fn take(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *lock(&self.events))
    }

    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        lock(&self.events).push(event.clone());
        Ok(())
    }
}

// A panic while holding a sink lock leaves the buffer usable; keep logging.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn event_with_fields(
    level: LogLevel,
    target: &str,
    message: &str,
    fields: impl IntoIterator<Item = (String, Value)>,
) -> LogEvent {
    LogEvent::with_fields(level, target, message, fields.into_iter().collect())
}

pub fn json_kv(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}
