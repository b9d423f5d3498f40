//! Response bodies as the server sends them, converted into `model` records at
//! the api boundary
//!

pub mod chart;
pub mod checkpoint;
pub mod error_response;
pub mod profile;
pub mod project;
pub mod status_message;

pub use crate::view::chart::ChartColumnsResponse;
pub use crate::view::checkpoint::CheckpointsResponse;
pub use crate::view::error_response::ErrorResponse;
pub use crate::view::profile::ProfileResponse;
pub use crate::view::project::{ProjectResponse, RecentProjectView};
pub use crate::view::status_message::StatusMessage;
