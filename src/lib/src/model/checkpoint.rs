use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::RecordId;

/// A user named save point. The server keeps the snapshot, the client only
/// ever sees the metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub id: RecordId,
    pub message: String,
    pub created_at: NaiveDateTime,
}

/// Newest first, the order the checkpoint list is shown in
pub fn sort_newest_first(checkpoints: &mut [Checkpoint]) {
    checkpoints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
