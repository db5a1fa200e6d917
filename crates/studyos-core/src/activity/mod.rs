//! Append-only record of what the pipeline did during one run.
//!
//! Each entry names the stage that acted, what it did, and when. Entries
//! are serialized as `{agent, action, timestamp}` records, the shape the
//! HTTP boundary returns under `logs`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line in an [`ActivityLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Name of the stage (or the orchestrator) that produced the entry.
    #[serde(rename = "agent")]
    pub stage: String,
    /// What the stage is doing.
    #[serde(rename = "action")]
    pub message: String,
    /// Captured at append time; serialized as RFC 3339.
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only sequence of [`ActivityEntry`] values.
///
/// A fresh log is created for every pipeline run. There is no way to
/// remove or edit an entry once appended.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry stamped with the current time.
    ///
    /// Timestamps never go backwards within a log: if the wall clock has
    /// stepped back since the previous append, the previous timestamp is
    /// reused.
    pub fn append(&mut self, stage: impl Into<String>, message: impl Into<String>) {
        self.append_at(stage, message, Utc::now());
    }

    fn append_at(
        &mut self,
        stage: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let timestamp = match self.entries.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        let entry = ActivityEntry {
            stage: stage.into(),
            message: message.into(),
            timestamp,
        };
        tracing::info!(stage = %entry.stage, "{}", entry.message);
        self.entries.push(entry);
    }

    /// Copy of every entry so far, in insertion order.
    pub fn snapshot(&self) -> Vec<ActivityEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
