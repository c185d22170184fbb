use serde::{Deserialize, Serialize};

/// One row of the internal audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u32,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}
