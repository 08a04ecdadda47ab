use axum::Json;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::domain::a001_shop::registry;
use crate::shared::woocommerce::WooApiClient;
use crate::usecases;

// ============================================================================
// UseCase u101: Sync products to a storefront
// ============================================================================

static SYNC_EXECUTOR: Lazy<Arc<usecases::u101_sync_products::SyncExecutor>> = Lazy::new(|| {
    Arc::new(usecases::u101_sync_products::SyncExecutor::new(
        Arc::new(WooApiClient::new()),
        registry::default_registry(),
    ))
});

/// POST /api/u101/sync
pub async fn u101_sync(
    Json(request): Json<contracts::usecases::u101_sync_products::request::SyncRequest>,
) -> Result<Json<contracts::usecases::u101_sync_products::response::SyncResponse>, axum::http::StatusCode>
{
    match SYNC_EXECUTOR.sync(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Sync failed: {}", e);
            Err(map_usecase_error(&e))
        }
    }
}

// ============================================================================
// UseCase u102: Fetch a storefront catalog
// ============================================================================

static FETCH_EXECUTOR: Lazy<Arc<usecases::u102_fetch_catalog::FetchExecutor>> = Lazy::new(|| {
    Arc::new(usecases::u102_fetch_catalog::FetchExecutor::new(
        Arc::new(WooApiClient::new()),
        registry::default_registry(),
    ))
});

/// POST /api/u102/fetch
pub async fn u102_fetch(
    Json(request): Json<contracts::usecases::u102_fetch_catalog::request::FetchRequest>,
) -> Result<Json<contracts::usecases::u102_fetch_catalog::response::FetchResponse>, axum::http::StatusCode>
{
    match FETCH_EXECUTOR.fetch(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Catalog fetch failed: {}", e);
            Err(map_usecase_error(&e))
        }
    }
}

/// Batch preconditions get their own status codes; everything else is a 500.
fn map_usecase_error(e: &anyhow::Error) -> axum::http::StatusCode {
    let message = e.to_string();
    if message.starts_with("Shop not found") {
        axum::http::StatusCode::NOT_FOUND
    } else if message.starts_with("Missing API credentials") {
        axum::http::StatusCode::BAD_REQUEST
    } else {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}
