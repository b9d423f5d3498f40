//! Configuration for the DataLoom client, where the server lives and how to talk to it
//!

pub mod client_config;

pub use crate::config::client_config::ClientConfig;
pub use crate::config::client_config::CLIENT_CONFIG_FILENAME;
