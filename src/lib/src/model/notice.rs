use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::constants::NOTICE_TTL_SECS;
use crate::error::LoomError;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient feedback for the last mutating action
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn success(message: impl AsRef<str>) -> Notice {
        Notice::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl AsRef<str>) -> Notice {
        Notice::new(NoticeLevel::Info, message)
    }

    pub fn from_error(err: &LoomError) -> Notice {
        Notice::new(NoticeLevel::Error, err.user_message())
    }

    fn new(level: NoticeLevel, message: impl AsRef<str>) -> Notice {
        Notice {
            level,
            message: message.as_ref().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(NOTICE_TTL_SECS)
    }
}
