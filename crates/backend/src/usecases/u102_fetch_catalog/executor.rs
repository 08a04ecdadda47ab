use anyhow::Result;
use contracts::domain::a001_shop::aggregate::Shop;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u102_fetch_catalog::{
    request::FetchRequest,
    response::{FetchResponse, RemoteProduct, RemoteProductKind},
    FetchCatalog,
};
use std::sync::Arc;
use uuid::Uuid;

use super::attributes::{self, AttributeSlot};
use crate::domain::a001_shop::registry::ShopRegistry;
use crate::domain::a002_product;
use crate::shared::woocommerce::{CatalogApi, WooProduct};

const DEFAULT_PER_PAGE: u32 = 100;
const MAX_PER_PAGE: u32 = 100;

/// Pulls a shop's catalog, expands variable products into their
/// variation trees and refreshes the local product cache.
///
/// Unlike the sync engine this is all-or-nothing: any remote error
/// aborts the fetch and leaves the cache untouched.
pub struct FetchExecutor {
    api: Arc<dyn CatalogApi>,
    registry: Arc<dyn ShopRegistry>,
}

impl FetchExecutor {
    pub fn new(api: Arc<dyn CatalogApi>, registry: Arc<dyn ShopRegistry>) -> Self {
        Self { api, registry }
    }

    pub async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        let shop = self
            .registry
            .get_shop(&request.shop_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Shop not found: {}", request.shop_id))?;

        if !shop.has_credentials() {
            anyhow::bail!("Missing API credentials for shop: {}", shop.base.description);
        }

        let per_page = request
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);

        tracing::info!(
            "[{}] Fetching catalog from shop {} (per_page={})",
            FetchCatalog::full_name(),
            shop.base.description,
            per_page
        );

        let response = self.collect_catalog(&shop, &request, per_page).await?;

        // Only a full walk may replace the cache. A single-page fetch
        // merges its rows in and leaves the rest of the cache alone.
        let cached = if request.page.is_some() {
            a002_product::service::merge_from_remote(&response.items).await?
        } else {
            a002_product::service::refresh_from_remote(&response.items).await?
        };
        tracing::info!("Catalog fetch complete: {} rows cached", cached);

        self.touch_last_sync(&shop).await;

        Ok(response)
    }

    /// Walk the product listing and expand every variable product.
    /// An explicit page in the request limits the walk to that page.
    async fn collect_catalog(
        &self,
        shop: &Shop,
        request: &FetchRequest,
        per_page: u32,
    ) -> Result<FetchResponse> {
        let mut items: Vec<RemoteProduct> = Vec::new();
        let mut total_count = 0u64;
        let mut total_pages = 0u64;

        let mut page = request.page.unwrap_or(1);
        loop {
            let batch = self.api.list_products(shop, page, per_page).await?;
            total_count = batch.total_count;
            total_pages = batch.total_pages as u64;
            let received = batch.items.len();

            for product in &batch.items {
                items.push(self.expand_product(shop, product).await?);
            }

            if request.page.is_some() || received == 0 {
                break;
            }
            // Some stores omit the X-WP-TotalPages header; when it is
            // missing, keep walking while pages come back full.
            if total_pages > 0 {
                if u64::from(page) >= total_pages {
                    break;
                }
            } else if (received as u32) < per_page {
                break;
            }
            page += 1;
        }

        Ok(FetchResponse {
            items,
            total_count,
            total_pages,
        })
    }

    /// Normalize one top-level product and, for variable products,
    /// fetch and attach its variations.
    async fn expand_product(&self, shop: &Shop, product: &WooProduct) -> Result<RemoteProduct> {
        let mut parent = normalize(product, RemoteProductKind::Parent, None);

        if !product.variations.is_empty() {
            let children = self.api.list_variations(shop, product.id).await?;
            parent.variations = children
                .iter()
                .map(|child| {
                    let mut v = normalize(child, RemoteProductKind::Variation, Some(product.id));
                    inherit_from_parent(&mut v, &parent);
                    v
                })
                .collect();
        }

        Ok(parent)
    }

    async fn touch_last_sync(&self, shop: &Shop) {
        // Best-effort; env-configured shops have no DB row to stamp
        if let Ok(uuid) = Uuid::parse_str(&shop.to_string_id()) {
            if let Err(e) = crate::domain::a001_shop::repository::touch_last_sync(uuid).await {
                tracing::debug!("Could not stamp last_sync_at: {}", e);
            }
        }
    }
}

fn parse_price(raw: &Option<String>) -> Option<f64> {
    raw.as_deref()
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| s.trim().parse::<f64>().ok())
}

fn normalize(product: &WooProduct, kind: RemoteProductKind, parent_id: Option<i64>) -> RemoteProduct {
    let mut out = RemoteProduct {
        remote_id: product.id,
        sku: product.sku.clone(),
        name: product.name.clone(),
        kind,
        parent_remote_id: parent_id,
        price: parse_price(&product.price),
        regular_price: parse_price(&product.regular_price),
        sale_price: parse_price(&product.sale_price),
        stock_quantity: product.stock_quantity,
        stock_status: product.stock_status.clone(),
        category_name: product.categories.first().map(|c| c.name.clone()),
        image_url: product
            .images
            .first()
            .map(|i| i.src.clone())
            .filter(|s| !s.is_empty()),
        ..Default::default()
    };

    for attr in &product.attributes {
        let Some(value) = attr.first_value() else {
            continue;
        };
        match attributes::classify(&attr.name) {
            Some(AttributeSlot::Color) => out.color = Some(value.to_string()),
            Some(AttributeSlot::Size) => out.size = Some(value.to_string()),
            Some(AttributeSlot::Brand) => out.brand = Some(value.to_string()),
            None => {}
        }
    }

    out
}

/// Variations rarely repeat catalog-level fields; fill the gaps from
/// the parent so every row stands on its own.
fn inherit_from_parent(child: &mut RemoteProduct, parent: &RemoteProduct) {
    if child.category_name.is_none() {
        child.category_name = parent.category_name.clone();
    }
    if child.brand.is_none() {
        child.brand = parent.brand.clone();
    }
    if child.image_url.is_none() {
        child.image_url = parent.image_url.clone();
    }
}
