use serde::{Deserialize, Serialize};

/// Request to materialize a shop's remote catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRequest {
    #[serde(rename = "shopId")]
    pub shop_id: String,

    /// When present, fetch only this page; otherwise fetch everything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size, bounded; defaults to 100
    #[serde(default, rename = "perPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}
