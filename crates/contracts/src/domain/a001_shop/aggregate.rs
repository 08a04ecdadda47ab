use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a WooCommerce storefront connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopId(pub Uuid);

impl ShopId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ShopId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ShopId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A WooCommerce storefront: base URL plus REST API credentials.
///
/// `is_connected` is a cached, best-effort flag maintained by the
/// connectivity probe; it is only as fresh as the last probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    #[serde(flatten)]
    pub base: BaseAggregate<ShopId>,

    /// Store base URL, e.g. "https://shop.example.dk"
    pub url: String,

    /// WooCommerce REST consumer key (Basic auth username)
    pub api_key: String,

    /// WooCommerce REST consumer secret (Basic auth password)
    pub api_secret: String,

    /// Result of the last connectivity probe
    pub is_connected: bool,

    /// Timestamp of the last successful catalog fetch
    pub last_sync_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Shop {
    /// Create a new shop for insertion into the DB
    pub fn new_for_insert(
        code: String,
        description: String,
        url: String,
        api_key: String,
        api_secret: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ShopId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            url,
            api_key,
            api_secret,
            is_connected: false,
            last_sync_at: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// True when both credential fields are present.
    /// Missing credentials are a precondition failure for every remote
    /// operation, not a remote error.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_secret.trim().is_empty()
    }

    /// Apply editable fields from a DTO
    pub fn update(&mut self, dto: &ShopDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.url = dto.url.clone();
        self.api_key = dto.api_key.clone();
        self.api_secret = dto.api_secret.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Shop name must not be empty".into());
        }
        if self.url.trim().is_empty() {
            return Err("Shop URL must not be empty".into());
        }
        Ok(())
    }

    /// Hook invoked right before persisting
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Shop {
    type Id = ShopId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "shop"
    }

    fn element_name() -> &'static str {
        "Shop"
    }

    fn list_name() -> &'static str {
        "Shops"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating or updating a shop
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShopDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,

    pub url: String,

    #[serde(rename = "apiKey")]
    pub api_key: String,

    #[serde(rename = "apiSecret")]
    pub api_secret: String,
}

/// Outcome of a connectivity probe against a shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopProbeResult {
    pub success: bool,
    pub message: String,
    pub duration_ms: u64,
    pub tested_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_are_detected() {
        let mut shop = Shop::new_for_insert(
            "s1".into(),
            "Test shop".into(),
            "https://x.test".into(),
            String::new(),
            String::new(),
            None,
        );
        assert!(!shop.has_credentials());

        shop.api_key = "ck_123".into();
        assert!(!shop.has_credentials());

        shop.api_secret = "cs_456".into();
        assert!(shop.has_credentials());
    }

    #[test]
    fn validate_rejects_empty_name_and_url() {
        let shop = Shop::new_for_insert(
            "s1".into(),
            "  ".into(),
            "https://x.test".into(),
            "k".into(),
            "s".into(),
            None,
        );
        assert!(shop.validate().is_err());

        let shop = Shop::new_for_insert(
            "s1".into(),
            "Shop".into(),
            "".into(),
            "k".into(),
            "s".into(),
            None,
        );
        assert!(shop.validate().is_err());
    }
}
