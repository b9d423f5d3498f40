//! Errors for the dataloom client library
//!
//! Enumeration for all errors that can occur while talking to a DataLoom server
//!

use derive_more::{Display, Error};
use std::fmt::Debug;
use std::io;
use std::path::Path;

pub mod string_error;
pub mod transform_error;

pub use crate::error::string_error::StringError;
pub use crate::error::transform_error::{TransformError, GENERIC_FAILURE_MSG};

pub const IMMUTABLE_COLUMN_MSG: &str = "The row number column cannot be renamed, deleted or edited.";

pub const BUSY_MSG: &str = "Another change is still being applied, wait for it to finish.";

pub const NO_ACTIVE_SESSION_MSG: &str = "No project is open.";

#[derive(Debug, Display, Error)]
pub enum LoomError {
    // Rejected client side, no request is sent
    ImmutableColumn(StringError),
    Busy(StringError),
    Validation(StringError),

    // Server responses
    Transform(Box<TransformError>),
    ProjectNotFound(StringError),
    CheckpointNotFound(StringError),

    // Session lifecycle
    NoActiveSession(StringError),

    // External Library Errors
    Network(reqwest::Error),
    IO(io::Error),
    JSON(serde_json::Error),
    URL(url::ParseError),
    TomlSer(toml::ser::Error),
    TomlDe(toml::de::Error),

    // Fallback
    Basic(StringError),
}

impl LoomError {
    pub fn basic_str(s: impl AsRef<str>) -> Self {
        LoomError::Basic(StringError::from(s.as_ref()))
    }

    pub fn immutable_column() -> Self {
        LoomError::ImmutableColumn(StringError::from(IMMUTABLE_COLUMN_MSG))
    }

    pub fn busy() -> Self {
        LoomError::Busy(StringError::from(BUSY_MSG))
    }

    pub fn validation(s: impl AsRef<str>) -> Self {
        LoomError::Validation(StringError::from(s.as_ref()))
    }

    pub fn required_field(field: impl AsRef<str>) -> Self {
        LoomError::validation(format!("{} is required", field.as_ref()))
    }

    pub fn transform(status: u16, url: impl AsRef<str>, detail: Option<String>) -> Self {
        LoomError::Transform(Box::new(TransformError::new(status, url, detail)))
    }

    pub fn project_not_found(project_id: impl AsRef<str>) -> Self {
        let err = format!("Project not found: {}", project_id.as_ref());
        LoomError::ProjectNotFound(StringError::from(err))
    }

    pub fn checkpoint_not_found(checkpoint_id: impl AsRef<str>) -> Self {
        let err = format!("Checkpoint not found: {}", checkpoint_id.as_ref());
        LoomError::CheckpointNotFound(StringError::from(err))
    }

    pub fn no_active_session() -> Self {
        LoomError::NoActiveSession(StringError::from(NO_ACTIVE_SESSION_MSG))
    }

    pub fn column_out_of_range(display_index: usize, column_count: usize) -> Self {
        LoomError::validation(format!(
            "Column {display_index} does not exist, the table has {column_count} columns"
        ))
    }

    pub fn invalid_page_size(page_size: usize) -> Self {
        LoomError::validation(format!(
            "Invalid page size {page_size}, expected one of {:?}",
            crate::constants::PAGE_SIZES
        ))
    }

    pub fn no_revert_requested() -> Self {
        LoomError::validation("Revert must be confirmed before it is sent")
    }

    pub fn file_write_error(path: impl AsRef<Path>, error: io::Error) -> Self {
        let err = format!("Could not write file: {:?} error {:?}", path.as_ref(), error);
        LoomError::basic_str(err)
    }

    pub fn home_dir_not_found() -> LoomError {
        LoomError::basic_str("Home directory not found")
    }

    /// Errors that are handled inline next to the control that caused them
    /// and never reach a global notification.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LoomError::ImmutableColumn(_) | LoomError::Busy(_) | LoomError::Validation(_)
        )
    }

    /// Errors coming from the transport or the server. These leave local state
    /// untouched and are reported with a transient notice.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            LoomError::Transform(_)
                | LoomError::Network(_)
                | LoomError::ProjectNotFound(_)
                | LoomError::CheckpointNotFound(_)
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            LoomError::Transform(err) => err.user_message(),
            LoomError::Network(err) if err.is_timeout() => {
                String::from("The server took too long to respond, please try again.")
            }
            LoomError::Network(_) => GENERIC_FAILURE_MSG.to_string(),
            LoomError::ImmutableColumn(msg)
            | LoomError::Busy(msg)
            | LoomError::Validation(msg)
            | LoomError::ProjectNotFound(msg)
            | LoomError::CheckpointNotFound(msg)
            | LoomError::NoActiveSession(msg)
            | LoomError::Basic(msg) => msg.to_string(),
            LoomError::IO(err) => err.to_string(),
            _ => GENERIC_FAILURE_MSG.to_string(),
        }
    }
}

// if you do not want to call .map_err, implement the std::convert::From trait
impl From<io::Error> for LoomError {
    fn from(error: io::Error) -> Self {
        LoomError::IO(error)
    }
}

impl From<String> for LoomError {
    fn from(error: String) -> Self {
        LoomError::Basic(StringError::from(error))
    }
}

impl From<toml::ser::Error> for LoomError {
    fn from(error: toml::ser::Error) -> Self {
        LoomError::TomlSer(error)
    }
}

impl From<toml::de::Error> for LoomError {
    fn from(error: toml::de::Error) -> Self {
        LoomError::TomlDe(error)
    }
}

impl From<url::ParseError> for LoomError {
    fn from(error: url::ParseError) -> Self {
        LoomError::URL(error)
    }
}

impl From<serde_json::Error> for LoomError {
    fn from(error: serde_json::Error) -> Self {
        LoomError::JSON(error)
    }
}

impl From<reqwest::Error> for LoomError {
    fn from(error: reqwest::Error) -> Self {
        LoomError::Network(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_errors_are_not_remote() {
        for err in [
            LoomError::immutable_column(),
            LoomError::busy(),
            LoomError::required_field("Column name"),
        ] {
            assert!(err.is_local());
            assert!(!err.is_remote());
        }
    }

    #[test]
    fn test_transform_error_user_message() {
        let err = LoomError::transform(400, "http://localhost", Some("Row index 9 out of range".into()));
        assert!(err.is_remote());
        assert_eq!(err.user_message(), "Row index 9 out of range");

        let err = LoomError::transform(502, "http://localhost", None);
        assert_eq!(err.user_message(), GENERIC_FAILURE_MSG);
    }

    #[test]
    fn test_display_uses_message() {
        let err = LoomError::required_field("Commit message");
        assert_eq!(err.to_string(), "Commit message is required");
    }
}
