use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::RecordId;

/// One transformation recorded by the server. `applied` flips to true once a
/// checkpoint has absorbed it; unapplied entries are the ones Undo can reverse.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: RecordId,
    pub action_type: String,
    #[serde(default)]
    pub action_details: Option<serde_json::Value>,
    pub timestamp: NaiveDateTime,
    pub checkpoint_id: Option<RecordId>,
    pub applied: bool,
}

/// Number of entries Undo can still reverse
pub fn undoable_count(logs: &[LogEntry]) -> usize {
    logs.iter().filter(|log| !log.applied).count()
}

/// Oldest first, ties broken by id
pub fn sort_ascending(logs: &mut [LogEntry]) {
    logs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
}
