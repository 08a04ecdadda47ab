use serde::{Deserialize, Serialize};

/// Batch of change intents against one shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Shop identifier, resolved through the configured shop registry
    #[serde(rename = "shopId")]
    pub shop_id: String,

    /// Items to push, processed strictly in order
    pub products: Vec<SyncItem>,
}

/// One change intent: overwrite the remote price (and optionally the
/// category) of the product carrying this SKU
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncItem {
    pub sku: String,

    pub price: f64,

    /// Either a numeric category id or a category name; resolved
    /// syntactically, never by a remote lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
