use super::repository;
use chrono::Utc;
use contracts::domain::a001_shop::aggregate::{Shop, ShopDto, ShopProbeResult};
use uuid::Uuid;

use crate::shared::woocommerce::{CatalogApi, WooApiClient};

/// Register a new storefront.
pub async fn create(dto: ShopDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| format!("SHOP-{}", Uuid::new_v4()));
    let mut aggregate = Shop::new_for_insert(
        code,
        dto.description.clone(),
        dto.url.clone(),
        dto.api_key.clone(),
        dto.api_secret.clone(),
        dto.comment.clone(),
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

/// Update an existing storefront.
pub async fn update(dto: ShopDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Shop>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Shop>> {
    repository::list_all().await
}

/// Probe the store with a minimal catalog request and persist the
/// resulting connectivity flag. Any failure, from missing credentials
/// to a transport error, collapses into an unsuccessful result rather
/// than an error.
pub async fn test_connection(id: Uuid) -> anyhow::Result<ShopProbeResult> {
    let start = std::time::Instant::now();

    let shop = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    if !shop.has_credentials() {
        return finish_probe(&shop, false, "API credentials are not configured".into(), start).await;
    }

    let client = WooApiClient::new();
    match client.probe(&shop).await {
        Ok(()) => finish_probe(&shop, true, "Connection successful".into(), start).await,
        Err(e) => {
            tracing::warn!("Connection test failed for shop {}: {}", shop.base.description, e);
            finish_probe(&shop, false, format!("Connection failed: {}", e.item_message()), start)
                .await
        }
    }
}

async fn finish_probe(
    shop: &Shop,
    success: bool,
    message: String,
    start: std::time::Instant,
) -> anyhow::Result<ShopProbeResult> {
    // Persisting the flag is best-effort; the probe result stands either way
    if let Err(e) = repository::set_connected(shop.base.id.0, success).await {
        tracing::warn!("Failed to persist connectivity flag: {}", e);
    }
    Ok(ShopProbeResult {
        success,
        message,
        duration_ms: start.elapsed().as_millis() as u64,
        tested_at: Utc::now(),
    })
}
