//! Analytics sinks.
//!
//! All sinks are fire-and-forget: failures are logged and never reach the caller.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::ports::AnalyticsPort;

/// Builds the record written for one event.
fn record(event: &AnalyticsEvent, session_id: &str) -> Value {
    let mut record = json!({
        "event": event.name(),
        "session_id": session_id,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    if let Value::Object(map) = &mut record {
        map.extend(event.metadata());
    }
    record
}

/// Emits events through `tracing` under the `analytics` target.
#[derive(Debug, Clone)]
pub struct TracingAnalytics {
    session_id: String,
}

impl TracingAnalytics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for TracingAnalytics {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsPort for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        let metadata = Value::Object(event.metadata());
        info!(
            target: "analytics",
            event = event.name(),
            session_id = %self.session_id,
            %metadata,
            "Tracked"
        );
    }
}

/// Appends one JSON object per event to a file.
pub struct JsonLinesAnalytics {
    path: PathBuf,
    session_id: String,
    file: Mutex<Option<File>>,
}

impl JsonLinesAnalytics {
    /// Opens `path` lazily on the first event.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            session_id: Uuid::new_v4().to_string(),
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn open(&self) -> std::io::Result<File> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }

    fn write(&self, line: &str) -> std::io::Result<()> {
        let mut guard = self.file.lock();
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{line}")?;
        }
        Ok(())
    }
}

impl AnalyticsPort for JsonLinesAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        let line = record(event, &self.session_id).to_string();
        if let Err(e) = self.write(&line) {
            warn!(error = %e, path = %self.path.display(), "Failed to record analytics event");
        }
    }
}

/// Drops every event. Used when analytics is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAnalytics;

impl AnalyticsPort for DisabledAnalytics {
    fn track(&self, _event: &AnalyticsEvent) {}
}
