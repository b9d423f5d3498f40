//! # Model - data records the client keeps for an open project
//!

pub mod chart;
pub mod checkpoint;
pub mod log_entry;
pub mod notice;
pub mod operation;
pub mod panel;
pub mod project;
pub mod record_id;

pub use crate::model::chart::{ChartColumn, ChartData};
pub use crate::model::checkpoint::Checkpoint;
pub use crate::model::log_entry::{undoable_count, LogEntry};
pub use crate::model::notice::{Notice, NoticeLevel};
pub use crate::model::operation::{
    AggFunc, BackendOperation, CastTarget, DropDuplicateParams, DuplicateKeep, FillEmptyParams,
    FilterCondition, FilterParams, GroupByParams, MeltParams, Operation, PivotParams,
    RenameColParams, SampleParams, SortParams, StringReplaceParams,
};
pub use crate::model::panel::{ConfirmDialog, Panel};
pub use crate::model::project::{Cell, DisplayRow, Project, RecentProject};
pub use crate::model::record_id::RecordId;
