use serde::{Deserialize, Serialize};

/// Aggregated outcome of a sync batch.
///
/// `results` corresponds 1:1, in order, to the request's `products`
/// list; no entry is ever dropped or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(rename = "successCount")]
    pub success_count: usize,

    pub results: Vec<SyncItemResult>,
}

/// Outcome of one request item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncItemResult {
    pub sku: String,

    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncItemResult {
    pub fn ok(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(sku: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_match_the_contract() {
        let response = SyncResponse {
            success_count: 1,
            results: vec![
                SyncItemResult::failed("A-1", "Product not found"),
                SyncItemResult::ok("B-2"),
            ],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["successCount"], 1);
        assert_eq!(json["results"][0]["sku"], "A-1");
        assert_eq!(json["results"][0]["success"], false);
        assert_eq!(json["results"][0]["error"], "Product not found");
        // Successful items omit the error field entirely
        assert!(json["results"][1].get("error").is_none());
    }
}
