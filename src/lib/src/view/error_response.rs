use serde::Deserialize;

/// Error bodies the server produces
///
/// `{"detail": "Column 'x' not found"}` for raised HTTP errors,
/// `{"detail": [{"msg": "...", ...}]}` for request validation errors and
/// `{"success": false, "message": "..."}` for handled failures.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    detail: Option<Detail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Validation(Vec<ValidationItem>),
    Other(serde_json::Value),
}

#[derive(Deserialize, Debug, Clone)]
struct ValidationItem {
    msg: String,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> ErrorResponse {
        match serde_json::from_str(body) {
            Ok(response) => response,
            Err(err) => {
                log::debug!("ErrorResponse::parse could not decode error body: {err}");
                ErrorResponse::default()
            }
        }
    }

    /// Human readable detail, if the server sent one
    pub fn detail(&self) -> Option<String> {
        let detail = match &self.detail {
            Some(Detail::Text(text)) => Some(text.to_owned()),
            Some(Detail::Validation(items)) if !items.is_empty() => Some(
                items
                    .iter()
                    .map(|item| item.msg.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Some(Detail::Validation(_)) | Some(Detail::Other(_)) | None => None,
        };
        detail
            .or_else(|| self.message.clone())
            .filter(|s| !s.trim().is_empty())
    }
}
