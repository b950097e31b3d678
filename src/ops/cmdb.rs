//! Fake configuration management database that only records change entries.

use crate::llm::tools::FunctionTool;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    pub change_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub summary: String,
}

/// In-memory change log; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct CmdbWriter {
    records: Arc<Mutex<Vec<ChangeRecord>>>,
}

impl CmdbWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change and answer with a confirmation line
    pub fn write(&self, summary: &str) -> String {
        let summary = summary.trim();
        if summary.is_empty() {
            return "Nothing recorded: describe the change that was made.".to_string();
        }

        let record = ChangeRecord {
            change_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            summary: summary.to_string(),
        };
        info!(change_id = %record.change_id, "Recorded CMDB change");

        let reply = format!("Recorded change {} in the CMDB: {}", record.change_id, record.summary);
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(record);
        reply
    }

    pub fn records(&self) -> Vec<ChangeRecord> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// The writer as an agent tool sharing this writer's log
    pub fn tool(&self) -> FunctionTool {
        let writer = self.clone();
        FunctionTool::new(
            "write_to_cmdb",
            "Record a completed change in the configuration management database. Input is a \
             one-line summary naming the instance ids and what was done to them.",
            move |input| Ok(writer.write(input)),
        )
    }
}
