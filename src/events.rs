//! Structured run events
//!
//! Adapters report milestones (outputs drained, scores, frames, faults) as
//! structured events so the CLI can print them either as colored
//! human-readable lines or as JSON lines for machine consumption.

use chrono::{DateTime, Utc};
use colored::Colorize;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Mutex;

/// One reportable event from a machine run or an adapter cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// "info", "warn", or "error"
    pub level: String,
    /// Source of the event, e.g. "machine", "pipeline", "robot", "arcade"
    pub tag: String,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Output format for emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

static LOG_FORMAT: Lazy<Mutex<LogFormat>> = Lazy::new(|| Mutex::new(LogFormat::Pretty));

impl Event {
    pub fn new<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        level: S1,
        tag: S2,
        message: S3,
    ) -> Self {
        let now: DateTime<Utc> = Utc::now();

        Self {
            level: level.into(),
            tag: tag.into(),
            message: message.into(),
            timestamp: now.to_rfc3339(),
            data: None,
        }
    }

    /// Attach structured payload data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn info<S1: Into<String>, S2: Into<String>>(tag: S1, message: S2) -> Self {
        Self::new("info", tag, message)
    }

    pub fn warn<S1: Into<String>, S2: Into<String>>(tag: S1, message: S2) -> Self {
        Self::new("warn", tag, message)
    }

    pub fn error<S1: Into<String>, S2: Into<String>>(tag: S1, message: S2) -> Self {
        Self::new("error", tag, message)
    }

    /// Print the event in the globally selected format.
    pub fn emit(&self) -> io::Result<()> {
        let format = *LOG_FORMAT
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to lock LOG_FORMAT: {:?}", e)))?;

        match format {
            LogFormat::Pretty => self.emit_pretty(),
            LogFormat::Json => self.emit_json(),
        }
    }

    fn emit_pretty(&self) -> io::Result<()> {
        // Show only the time portion of the RFC 3339 timestamp
        let time_str = self
            .timestamp
            .split('T')
            .nth(1)
            .unwrap_or(&self.timestamp)
            .split('.')
            .next()
            .unwrap_or("");

        let header = format!("{} [{}] [{}]", time_str, self.level.to_uppercase(), self.tag);
        let header = match self.level.as_str() {
            "info" => header.green(),
            "warn" => header.yellow(),
            "error" => header.red(),
            _ => header.normal(),
        };

        println!("{} {}", header, self.message);
        Ok(())
    }

    fn emit_json(&self) -> io::Result<()> {
        let json = serde_json::to_string(&self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to serialize event: {}", e)))?;
        println!("{}", json);
        Ok(())
    }
}

/// Select the global event output format.
pub fn set_log_format(format: LogFormat) -> io::Result<()> {
    let mut log_format = LOG_FORMAT
        .lock()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to lock LOG_FORMAT: {:?}", e)))?;
    *log_format = format;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_construction() {
        let event = Event::info("machine", "halted after 12 steps");
        assert_eq!(event.level, "info");
        assert_eq!(event.tag, "machine");
        assert!(event.data.is_none());
    }

    #[test]
    fn test_event_with_data_serializes() {
        let event = Event::info("arcade", "score updated")
            .with_data(serde_json::json!({ "score": 10_776 }));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"score\":10776"));
    }
}
