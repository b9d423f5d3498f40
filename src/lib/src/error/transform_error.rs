//! # TransformError
//!
//! A non-success response from one of the project mutation endpoints.
//!

use std::fmt;

pub const GENERIC_FAILURE_MSG: &str = "Something went wrong, please try again.";

pub struct TransformError {
    pub status: u16,
    pub url: String,
    /// Human readable detail supplied by the server, if any
    pub detail: Option<String>,
}

impl TransformError {
    pub fn new(status: u16, url: impl AsRef<str>, detail: Option<String>) -> Self {
        TransformError {
            status,
            url: url.as_ref().to_string(),
            detail: detail.filter(|d| !d.trim().is_empty()),
        }
    }

    pub fn user_message(&self) -> String {
        match &self.detail {
            Some(detail) => detail.to_owned(),
            None => GENERIC_FAILURE_MSG.to_string(),
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "Transform failed [{}]: {}", self.status, detail),
            None => write!(f, "Transform failed [{}] from {}", self.status, self.url),
        }
    }
}

impl fmt::Debug for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TransformError {{ status: {}, url: {}, detail: {:?} }}",
            self.status, self.url, self.detail
        )
    }
}

impl std::error::Error for TransformError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = TransformError::new(400, "http://localhost/x", Some("Column 'age' not found".into()));
        assert_eq!(err.user_message(), "Column 'age' not found");
    }

    #[test]
    fn test_blank_detail_falls_back_to_generic() {
        let err = TransformError::new(500, "http://localhost/x", Some("   ".into()));
        assert!(err.detail.is_none());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MSG);
    }
}
