use chrono::{DateTime, Utc};
use serde::Serialize;

use super::CommandOutput;

/// One line of the visible terminal log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Raw input as typed, before parsing.
    pub command: String,
    pub result: CommandOutput,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>, result: CommandOutput) -> Self {
        Self {
            command: command.into(),
            result,
            timestamp: Utc::now(),
        }
    }
}
