//! libdataloom
//!
//! Client side of DataLoom: keeps an interactively edited table consistent with
//! the transformation history on a DataLoom server.
//!
//! # Examples
//!
//! Open a project, move a column and delete it:
//!
//! ```ignore
//! use libdataloom::config::ClientConfig;
//! use libdataloom::core::session_store::SessionStore;
//! use libdataloom::model::{Operation, RecordId};
//!
//! let config = ClientConfig::get()?;
//! let mut store = SessionStore::from_config(&config)?;
//! let session = store.open(&RecordId::from("12")).await?;
//!
//! // Show the third column first, then delete it by its display position
//! session.reorder_column(2, 0)?;
//! session.apply(Operation::del_col(1)).await?;
//! ```
//!
//! Save a checkpoint and revert to it later:
//!
//! ```ignore
//! let history = session.history();
//! history.save("removed test rows").await?;
//! // ...
//! history.request_revert(Some(checkpoint.id.clone()));
//! history.confirm_revert().await?;
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod model;
pub mod opts;
pub mod test;
pub mod util;
pub mod view;
