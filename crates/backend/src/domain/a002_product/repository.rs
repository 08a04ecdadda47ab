use chrono::Utc;
use contracts::domain::a002_product::aggregate::{Product, ProductId, ProductKind};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub sku: String,
    pub kind: String,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock_status: Option<String>,
    pub parent_sku: Option<String>,
    /// Attribute map serialized as a JSON string
    pub attributes: Option<String>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let attributes = m
            .attributes
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok());

        Product {
            base: BaseAggregate::with_metadata(
                ProductId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            sku: m.sku,
            kind: ProductKind::from_str(&m.kind),
            price: m.price,
            category: m.category,
            stock_status: m.stock_status,
            parent_sku: m.parent_sku,
            attributes,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Product) -> ActiveModel {
    let attributes = aggregate
        .attributes
        .as_ref()
        .and_then(|v| serde_json::to_string(v).ok());
    ActiveModel {
        id: Set(aggregate.base.id.0.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        sku: Set(aggregate.sku.clone()),
        kind: Set(aggregate.kind.as_str().to_string()),
        price: Set(aggregate.price),
        category: Set(aggregate.category.clone()),
        stock_status: Set(aggregate.stock_status.clone()),
        parent_sku: Set(aggregate.parent_sku.clone()),
        attributes: Set(attributes),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    let mut items: Vec<Product> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.sku.to_lowercase().cmp(&b.sku.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_sku(sku: &str) -> anyhow::Result<Option<Product>> {
    let result = Entity::find()
        .filter(Column::Sku.eq(sku))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Insert or replace the cache row for this product's SKU.
pub async fn upsert_by_sku(aggregate: &Product) -> anyhow::Result<()> {
    match Entity::find()
        .filter(Column::Sku.eq(aggregate.sku.clone()))
        .one(conn())
        .await?
    {
        Some(existing) => {
            let mut active = to_active(aggregate);
            // Preserve the row identity and creation stamp
            active.id = Set(existing.id.clone());
            active.created_at = sea_orm::ActiveValue::NotSet;
            active.update(conn()).await?;
        }
        None => {
            to_active(aggregate).insert(conn()).await?;
        }
    }
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn clear() -> anyhow::Result<u64> {
    let result = Entity::delete_many().exec(conn()).await?;
    Ok(result.rows_affected)
}
