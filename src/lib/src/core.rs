//! Core logic of the client: the column mapping, the page window, the
//! dispatcher and history controller, and the session that ties them to one
//! open project.
//!

pub mod backend;
pub mod column_order;
pub mod dispatcher;
pub mod history;
pub mod pagination;
pub mod preview;
pub mod session;
pub mod session_store;
