use serde::{Deserialize, Serialize};

/// `{success, message}` acknowledgement, returned by delete
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusMessage {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
