use serde::{Deserialize, Serialize};

/// Result of a catalog fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub items: Vec<RemoteProduct>,

    #[serde(rename = "totalCount")]
    pub total_count: u64,

    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

/// Catalog position of a remote product.
///
/// Every item listed at the top level of the catalog is a parent; simple
/// products are parents with zero variations. An item is only ever a
/// variation when it was fetched as a child of an explicit parent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemoteProductKind {
    #[default]
    Parent,
    Variation,
}

/// Normalized view of a WooCommerce product or variation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteProduct {
    #[serde(rename = "remoteId")]
    pub remote_id: i64,

    pub sku: String,

    pub name: String,

    pub kind: RemoteProductKind,

    #[serde(rename = "parentRemoteId", skip_serializing_if = "Option::is_none")]
    pub parent_remote_id: Option<i64>,

    pub price: Option<f64>,

    #[serde(rename = "regularPrice", skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<f64>,

    #[serde(rename = "salePrice", skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,

    #[serde(rename = "stockQuantity", skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,

    #[serde(rename = "stockStatus", skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,

    #[serde(rename = "categoryName", skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Normalized children; empty for simple products and variations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<RemoteProduct>,
}
