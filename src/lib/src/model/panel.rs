use serde::Serialize;

use crate::model::RecordId;

/// Transform preview panels. Their contents refer to column indices and row
/// counts of the table they were opened on.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Filter,
    Sort,
    Pivot,
    DropDuplicate,
    AdvancedQuery,
    Melt,
    GroupBy,
    CastDataType,
    Chart,
    Logs,
    Checkpoints,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmDialog {
    /// `None` reverts to the originally uploaded data
    Revert { checkpoint_id: Option<RecordId> },
}
