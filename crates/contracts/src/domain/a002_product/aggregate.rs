use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a locally cached product row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Catalog position of a product.
///
/// A parent owns zero or more variations; a variation exists only as a
/// child of exactly one parent. A simple product is a parent with zero
/// variations, not a separate kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    #[default]
    Parent,
    Variation,
}

impl ProductKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Parent => "parent",
            Self::Variation => "variation",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "variation" => Self::Variation,
            _ => Self::Parent,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Locally cached product row, produced by CSV import or a catalog fetch.
///
/// Identity is the SKU within the cache. The sync engine only ever reads
/// these rows; its writes land on the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    pub sku: String,

    pub kind: ProductKind,

    pub price: Option<f64>,

    pub category: Option<String>,

    #[serde(rename = "stockStatus")]
    pub stock_status: Option<String>,

    #[serde(rename = "parentSku")]
    pub parent_sku: Option<String>,

    /// Free-form attribute map (color, size, brand, ...), stored as JSON
    pub attributes: Option<serde_json::Value>,
}

impl Product {
    /// Create a new product row for insertion into the cache.
    /// The SKU doubles as the business code; the name is the description.
    pub fn new_for_insert(
        sku: String,
        name: String,
        kind: ProductKind,
        price: Option<f64>,
        category: Option<String>,
        stock_status: Option<String>,
        parent_sku: Option<String>,
        attributes: Option<serde_json::Value>,
    ) -> Self {
        let base = BaseAggregate::new(ProductId::new_v4(), sku.clone(), name);

        Self {
            base,
            sku,
            kind,
            price,
            category,
            stock_status,
            parent_sku,
            attributes,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() {
            return Err("SKU must not be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating or updating a cached product row
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub id: Option<String>,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub kind: ProductKind,
    pub price: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "stockStatus")]
    pub stock_status: Option<String>,
    #[serde(rename = "parentSku")]
    pub parent_sku: Option<String>,
    pub attributes: Option<serde_json::Value>,
    pub comment: Option<String>,
}
