use async_trait::async_trait;
use contracts::domain::a001_shop::aggregate::Shop;
use serde::{Deserialize, Serialize};

use super::error::WooError;

/// Which remote entity an update is addressed to. Variations live under
/// their parent in the WooCommerce REST API, so they need both ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateTarget {
    Product(i64),
    Variation { parent_id: i64, variation_id: i64 },
}

impl UpdateTarget {
    pub fn endpoint_path(&self) -> String {
        match self {
            UpdateTarget::Product(id) => format!("/products/{}", id),
            UpdateTarget::Variation {
                parent_id,
                variation_id,
            } => format!("/products/{}/variations/{}", parent_id, variation_id),
        }
    }
}

/// Category reference in an update payload. A value that parses as an
/// integer addresses an existing category by id; anything else is sent
/// by name and the store resolves or creates it.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
}

impl CategoryRef {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(id) => CategoryRef::Id(id),
            Err(_) => CategoryRef::Name(raw.to_string()),
        }
    }
}

impl Serialize for CategoryRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            CategoryRef::Id(id) => map.serialize_entry("id", id)?,
            CategoryRef::Name(name) => map.serialize_entry("name", name)?,
        }
        map.end()
    }
}

/// Body of a product/variation update. WooCommerce expects prices as
/// decimal strings, not numbers.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPatch {
    pub regular_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryRef>>,
}

// ============================================================================
// Wire structures for WooCommerce REST API v3
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WooProduct {
    pub id: i64,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub parent_id: i64,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub regular_price: Option<String>,
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub stock_status: Option<String>,
    #[serde(default)]
    pub categories: Vec<WooCategory>,
    #[serde(default)]
    pub images: Vec<WooImage>,
    #[serde(default)]
    pub attributes: Vec<WooAttribute>,
    /// Variation ids hanging off a variable product. Empty for simple
    /// products and for variations themselves.
    #[serde(default)]
    pub variations: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooCategory {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooImage {
    #[serde(default)]
    pub src: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WooAttribute {
    #[serde(default)]
    pub name: String,
    /// Variations carry a single `option`, parents carry `options`.
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

impl WooAttribute {
    pub fn first_value(&self) -> Option<&str> {
        self.option
            .as_deref()
            .or_else(|| self.options.first().map(String::as_str))
    }
}

/// One page of a product listing, with totals read from the
/// X-WP-Total / X-WP-TotalPages response headers.
#[derive(Debug, Clone)]
pub struct WooProductPage {
    pub items: Vec<WooProduct>,
    pub total_count: u64,
    pub total_pages: u32,
}

// ============================================================================
// Catalog API trait and HTTP client
// ============================================================================

/// Operations the sync and fetch executors need against a remote store.
/// The HTTP client implements it for real stores; tests substitute a
/// recording mock.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn find_by_sku(&self, shop: &Shop, sku: &str) -> Result<Vec<WooProduct>, WooError>;

    async fn list_products(
        &self,
        shop: &Shop,
        page: u32,
        per_page: u32,
    ) -> Result<WooProductPage, WooError>;

    async fn list_variations(
        &self,
        shop: &Shop,
        parent_id: i64,
    ) -> Result<Vec<WooProduct>, WooError>;

    async fn update_product(
        &self,
        shop: &Shop,
        target: UpdateTarget,
        patch: &ProductPatch,
    ) -> Result<(), WooError>;

    /// Lightweight connectivity check: list a single product.
    async fn probe(&self, shop: &Shop) -> Result<(), WooError>;
}

/// HTTP client for the WooCommerce REST API (wc/v3), authenticated with
/// the shop's consumer key/secret over Basic auth.
pub struct WooApiClient {
    client: reqwest::Client,
}

impl WooApiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    fn base_url(shop: &Shop) -> String {
        format!("{}/wp-json/wc/v3", shop.url.trim_end_matches('/'))
    }

    fn get(&self, shop: &Shop, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", Self::base_url(shop), path))
            .basic_auth(&shop.api_key, Some(&shop.api_secret))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WooError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("WooCommerce API request failed: {} {}", status, body);
            return Err(WooError::from_response(status.as_u16(), &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn header_u64(response: &reqwest::Response, name: &str) -> u64 {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }
}

impl Default for WooApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogApi for WooApiClient {
    async fn find_by_sku(&self, shop: &Shop, sku: &str) -> Result<Vec<WooProduct>, WooError> {
        let response = self
            .get(shop, "/products")
            .query(&[("sku", sku)])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_products(
        &self,
        shop: &Shop,
        page: u32,
        per_page: u32,
    ) -> Result<WooProductPage, WooError> {
        let response = self
            .get(shop, "/products")
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .send()
            .await?;

        let total_count = Self::header_u64(&response, "X-WP-Total");
        let total_pages = Self::header_u64(&response, "X-WP-TotalPages") as u32;
        let items: Vec<WooProduct> = Self::read_json(response).await?;

        Ok(WooProductPage {
            items,
            total_count,
            total_pages,
        })
    }

    async fn list_variations(
        &self,
        shop: &Shop,
        parent_id: i64,
    ) -> Result<Vec<WooProduct>, WooError> {
        let response = self
            .get(shop, &format!("/products/{}/variations", parent_id))
            .query(&[("per_page", "100")])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn update_product(
        &self,
        shop: &Shop,
        target: UpdateTarget,
        patch: &ProductPatch,
    ) -> Result<(), WooError> {
        tracing::debug!("PUT {}", target.endpoint_path());
        let response = self
            .client
            .put(format!("{}{}", Self::base_url(shop), target.endpoint_path()))
            .basic_auth(&shop.api_key, Some(&shop.api_secret))
            .json(patch)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("WooCommerce update failed: {} {}", status, body);
            return Err(WooError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }

    async fn probe(&self, shop: &Shop) -> Result<(), WooError> {
        let response = self
            .get(shop, "/products")
            .query(&[("per_page", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WooError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_category_is_addressed_by_id() {
        assert_eq!(CategoryRef::parse("42"), CategoryRef::Id(42));
        assert_eq!(CategoryRef::parse(" 7 "), CategoryRef::Id(7));
    }

    #[test]
    fn non_numeric_category_is_addressed_by_name() {
        assert_eq!(
            CategoryRef::parse("Shoes"),
            CategoryRef::Name("Shoes".to_string())
        );
        // Decimals are not category ids
        assert_eq!(
            CategoryRef::parse("4.2"),
            CategoryRef::Name("4.2".to_string())
        );
    }

    #[test]
    fn category_ref_serializes_to_id_or_name_object() {
        let id = serde_json::to_string(&CategoryRef::Id(42)).unwrap();
        assert_eq!(id, r#"{"id":42}"#);
        let name = serde_json::to_string(&CategoryRef::Name("Shoes".into())).unwrap();
        assert_eq!(name, r#"{"name":"Shoes"}"#);
    }

    #[test]
    fn variation_endpoint_nests_under_parent() {
        let target = UpdateTarget::Variation {
            parent_id: 500,
            variation_id: 501,
        };
        assert_eq!(target.endpoint_path(), "/products/500/variations/501");
        assert_eq!(UpdateTarget::Product(120).endpoint_path(), "/products/120");
    }

    #[test]
    fn patch_omits_categories_when_absent() {
        let patch = ProductPatch {
            regular_price: "99.5".to_string(),
            categories: None,
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"regular_price":"99.5"}"#);
    }

    #[test]
    fn attribute_first_value_prefers_singular_option() {
        let attr = WooAttribute {
            name: "Color".to_string(),
            option: Some("Red".to_string()),
            options: vec!["Blue".to_string()],
        };
        assert_eq!(attr.first_value(), Some("Red"));

        let parent_attr = WooAttribute {
            name: "Color".to_string(),
            option: None,
            options: vec!["Blue".to_string(), "Green".to_string()],
        };
        assert_eq!(parent_attr.first_value(), Some("Blue"));
    }
}
