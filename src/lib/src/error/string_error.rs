//! Message carried by the message-only `LoomError` variants. Displays and
//! debug-prints as the bare message, which is what `user_message` shows.

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct StringError(String);

impl StringError {
    pub fn new(s: impl Into<String>) -> Self {
        StringError(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StringError {
    fn from(s: &str) -> Self {
        StringError::new(s)
    }
}

impl From<String> for StringError {
    fn from(s: String) -> Self {
        StringError(s)
    }
}

impl fmt::Display for StringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for StringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StringError {}
