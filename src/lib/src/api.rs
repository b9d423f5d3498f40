//! # API - talk to a DataLoom server over HTTP
//!

pub mod client;
pub mod endpoint;
