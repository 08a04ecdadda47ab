use thiserror::Error;

/// Errors returned by the WooCommerce REST client.
#[derive(Debug, Error)]
pub enum WooError {
    /// Store answered with a non-success status. The message is the
    /// `message` field of the JSON error body when one was present.
    #[error("WooCommerce API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse WooCommerce response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WooError {
    /// Build an `Api` error from a raw response body, pulling out the
    /// `message` field if the body is a JSON object that carries one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from)))
            .or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.chars().take(200).collect())
                }
            });
        WooError::Api { status, message }
    }

    /// Human-readable message for per-item sync results.
    pub fn item_message(&self) -> String {
        match self {
            WooError::Api {
                message: Some(m), ..
            } => m.clone(),
            WooError::Api { status, .. } => format!("API request failed with status {}", status),
            WooError::Transport(e) => format!("request failed: {}", e),
            WooError::Parse(e) => format!("invalid response: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_from_json_body() {
        let err = WooError::from_response(404, r#"{"code":"woocommerce_rest_product_invalid_id","message":"Invalid ID.","data":{"status":404}}"#);
        match err {
            WooError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("Invalid ID."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn falls_back_to_raw_body_when_not_json() {
        let err = WooError::from_response(500, "Internal Server Error");
        match err {
            WooError::Api { message, .. } => {
                assert_eq!(message.as_deref(), Some("Internal Server Error"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_body_yields_no_message() {
        let err = WooError::from_response(502, "");
        match err {
            WooError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
