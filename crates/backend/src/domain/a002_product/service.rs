use super::repository;
use contracts::domain::a002_product::aggregate::{Product, ProductDto, ProductKind};
use contracts::usecases::u102_fetch_catalog::response::{RemoteProduct, RemoteProductKind};
use uuid::Uuid;

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all().await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    repository::get_by_id(id).await
}

pub async fn get_by_sku(sku: &str) -> anyhow::Result<Option<Product>> {
    repository::get_by_sku(sku).await
}

/// Manual upsert of a single cache row, keyed by SKU.
pub async fn upsert(dto: ProductDto) -> anyhow::Result<String> {
    let mut aggregate = Product::new_for_insert(
        dto.sku.clone(),
        dto.name.clone(),
        dto.kind,
        dto.price,
        dto.category.clone(),
        dto.stock_status.clone(),
        dto.parent_sku.clone(),
        dto.attributes.clone(),
    );
    aggregate.base.comment = dto.comment.clone();

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::upsert_by_sku(&aggregate).await?;
    Ok(aggregate.sku)
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

/// Replace the local cache with a freshly fetched full catalog. Parents
/// and their variations are flattened into one row per SKU; rows without
/// a SKU cannot be addressed by the sync engine and are skipped.
pub async fn refresh_from_remote(items: &[RemoteProduct]) -> anyhow::Result<usize> {
    let removed = repository::clear().await?;
    tracing::info!("Refreshing product cache: {} rows out", removed);
    merge_from_remote(items).await
}

/// Upsert one fetched slice of the catalog into the cache, leaving rows
/// outside it untouched. Used for page-limited fetches, which must not
/// discard the rest of the cache.
pub async fn merge_from_remote(items: &[RemoteProduct]) -> anyhow::Result<usize> {
    let mut rows: Vec<Product> = Vec::new();
    for item in items {
        collect_rows(item, None, &mut rows);
    }

    for mut row in rows.drain(..) {
        row.before_write();
        repository::upsert_by_sku(&row).await?;
    }

    repository::list_all().await.map(|all| all.len())
}

fn collect_rows(item: &RemoteProduct, parent_sku: Option<&str>, out: &mut Vec<Product>) {
    if !item.sku.trim().is_empty() {
        let kind = match item.kind {
            RemoteProductKind::Parent => ProductKind::Parent,
            RemoteProductKind::Variation => ProductKind::Variation,
        };
        let attributes = attribute_map(item);
        out.push(Product::new_for_insert(
            item.sku.clone(),
            item.name.clone(),
            kind,
            item.price,
            item.category_name.clone(),
            item.stock_status.clone(),
            parent_sku.map(String::from),
            attributes,
        ));
    }

    for child in &item.variations {
        collect_rows(child, Some(&item.sku), out);
    }
}

fn attribute_map(item: &RemoteProduct) -> Option<serde_json::Value> {
    let mut map = serde_json::Map::new();
    if let Some(color) = &item.color {
        map.insert("color".into(), serde_json::Value::String(color.clone()));
    }
    if let Some(size) = &item.size {
        map.insert("size".into(), serde_json::Value::String(size.clone()));
    }
    if let Some(brand) = &item.brand {
        map.insert("brand".into(), serde_json::Value::String(brand.clone()));
    }
    if map.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_flattened_with_parent_sku() {
        let parent = RemoteProduct {
            remote_id: 500,
            sku: "B".into(),
            name: "Variable".into(),
            kind: RemoteProductKind::Parent,
            variations: vec![RemoteProduct {
                remote_id: 501,
                sku: "B-2".into(),
                name: "Variable - Red".into(),
                kind: RemoteProductKind::Variation,
                parent_remote_id: Some(500),
                color: Some("Red".into()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut rows = Vec::new();
        collect_rows(&parent, None, &mut rows);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku, "B");
        assert_eq!(rows[0].parent_sku, None);
        assert_eq!(rows[1].sku, "B-2");
        assert_eq!(rows[1].parent_sku.as_deref(), Some("B"));
        assert_eq!(rows[1].kind, ProductKind::Variation);
        assert_eq!(
            rows[1].attributes.as_ref().unwrap()["color"],
            serde_json::json!("Red")
        );
    }

    #[test]
    fn rows_without_sku_are_skipped() {
        let item = RemoteProduct {
            remote_id: 7,
            sku: "  ".into(),
            name: "No SKU".into(),
            ..Default::default()
        };
        let mut rows = Vec::new();
        collect_rows(&item, None, &mut rows);
        assert!(rows.is_empty());
    }
}
