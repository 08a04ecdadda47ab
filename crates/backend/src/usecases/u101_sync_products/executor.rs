use anyhow::Result;
use contracts::domain::a001_shop::aggregate::Shop;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u101_sync_products::{
    request::{SyncItem, SyncRequest},
    response::{SyncItemResult, SyncResponse},
    SyncProducts,
};
use std::sync::Arc;

use crate::domain::a001_shop::registry::ShopRegistry;
use crate::shared::woocommerce::{CatalogApi, CategoryRef, ProductPatch, UpdateTarget, WooProduct};

/// Pushes a batch of price/category changes to one storefront.
///
/// Items are processed strictly in request order and each outcome lands
/// at the same index in the response. A failing item never stops the
/// batch; only batch preconditions (unknown shop, missing credentials)
/// fail the request as a whole.
pub struct SyncExecutor {
    api: Arc<dyn CatalogApi>,
    registry: Arc<dyn ShopRegistry>,
}

impl SyncExecutor {
    pub fn new(api: Arc<dyn CatalogApi>, registry: Arc<dyn ShopRegistry>) -> Self {
        Self { api, registry }
    }

    pub async fn sync(&self, request: SyncRequest) -> Result<SyncResponse> {
        let shop = self
            .registry
            .get_shop(&request.shop_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Shop not found: {}", request.shop_id))?;

        if !shop.has_credentials() {
            anyhow::bail!("Missing API credentials for shop: {}", shop.base.description);
        }

        tracing::info!(
            "[{}] Syncing {} products to shop {}",
            SyncProducts::full_name(),
            request.products.len(),
            shop.base.description
        );

        let mut results: Vec<SyncItemResult> = Vec::with_capacity(request.products.len());
        for item in &request.products {
            let result = match self.sync_item(&shop, item).await {
                Ok(()) => SyncItemResult::ok(item.sku.clone()),
                Err(e) => {
                    tracing::warn!("Sync failed for SKU {}: {}", item.sku, e);
                    SyncItemResult::failed(item.sku.clone(), e.to_string())
                }
            };
            results.push(result);
        }

        let success_count = results.iter().filter(|r| r.success).count();
        tracing::info!(
            "Sync finished: {}/{} succeeded",
            success_count,
            results.len()
        );

        Ok(SyncResponse {
            success_count,
            results,
        })
    }

    async fn sync_item(&self, shop: &Shop, item: &SyncItem) -> Result<()> {
        let matches = self
            .api
            .find_by_sku(shop, &item.sku)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e.item_message()))?;

        let product = matches
            .first()
            .ok_or_else(|| anyhow::anyhow!("Product not found"))?;

        let target = resolve_target(product)?;

        let patch = ProductPatch {
            // WooCommerce wants prices as strings
            regular_price: format!("{}", item.price),
            categories: item
                .category
                .as_deref()
                .map(|c| vec![CategoryRef::parse(c)]),
        };

        self.api
            .update_product(shop, target, &patch)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e.item_message()))?;

        Ok(())
    }
}

/// Decide which endpoint an update for this product belongs to.
/// Variations must be addressed through their parent.
fn resolve_target(product: &WooProduct) -> Result<UpdateTarget> {
    if product.kind == "variation" {
        if product.parent_id <= 0 {
            anyhow::bail!("Variation {} has no parent product", product.id);
        }
        Ok(UpdateTarget::Variation {
            parent_id: product.parent_id,
            variation_id: product.id,
        })
    } else {
        Ok(UpdateTarget::Product(product.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::woocommerce::WooError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct InMemoryRegistry {
        shops: Vec<Shop>,
    }

    #[async_trait]
    impl ShopRegistry for InMemoryRegistry {
        async fn get_shop(&self, id: &str) -> Result<Option<Shop>> {
            Ok(self
                .shops
                .iter()
                .find(|s| s.base.code == id || s.to_string_id() == id)
                .cloned())
        }

        async fn list_shops(&self) -> Result<Vec<Shop>> {
            Ok(self.shops.clone())
        }
    }

    /// Records every update call; lookups come from a fixed SKU table.
    struct MockCatalogApi {
        products: HashMap<String, Vec<WooProduct>>,
        updates: Mutex<Vec<(UpdateTarget, String)>>,
        fail_update_for: Option<i64>,
    }

    impl MockCatalogApi {
        fn new(products: HashMap<String, Vec<WooProduct>>) -> Self {
            Self {
                products,
                updates: Mutex::new(Vec::new()),
                fail_update_for: None,
            }
        }

        fn recorded(&self) -> Vec<(UpdateTarget, String)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogApi for MockCatalogApi {
        async fn find_by_sku(&self, _shop: &Shop, sku: &str) -> Result<Vec<WooProduct>, WooError> {
            Ok(self.products.get(sku).cloned().unwrap_or_default())
        }

        async fn list_products(
            &self,
            _shop: &Shop,
            _page: u32,
            _per_page: u32,
        ) -> Result<crate::shared::woocommerce::WooProductPage, WooError> {
            unimplemented!("not used by the sync executor")
        }

        async fn list_variations(
            &self,
            _shop: &Shop,
            _parent_id: i64,
        ) -> Result<Vec<WooProduct>, WooError> {
            unimplemented!("not used by the sync executor")
        }

        async fn update_product(
            &self,
            _shop: &Shop,
            target: UpdateTarget,
            patch: &ProductPatch,
        ) -> Result<(), WooError> {
            if let Some(fail_id) = self.fail_update_for {
                let id = match &target {
                    UpdateTarget::Product(id) => *id,
                    UpdateTarget::Variation { variation_id, .. } => *variation_id,
                };
                if id == fail_id {
                    return Err(WooError::Api {
                        status: 400,
                        message: Some("Invalid price".into()),
                    });
                }
            }
            let body = serde_json::to_string(patch).unwrap();
            self.updates.lock().unwrap().push((target, body));
            Ok(())
        }

        async fn probe(&self, _shop: &Shop) -> Result<(), WooError> {
            Ok(())
        }
    }

    fn test_shop() -> Shop {
        let mut shop = Shop::new_for_insert(
            "shop-1".into(),
            "Test shop".into(),
            "https://shop.test".into(),
            "ck_key".into(),
            "cs_secret".into(),
            None,
        );
        shop.base.code = "shop-1".into();
        shop
    }

    fn simple(id: i64, sku: &str) -> WooProduct {
        WooProduct {
            id,
            sku: sku.into(),
            kind: "simple".into(),
            ..Default::default()
        }
    }

    fn variation(id: i64, parent_id: i64, sku: &str) -> WooProduct {
        WooProduct {
            id,
            sku: sku.into(),
            kind: "variation".into(),
            parent_id,
            ..Default::default()
        }
    }

    fn executor(api: MockCatalogApi, shops: Vec<Shop>) -> (SyncExecutor, Arc<MockCatalogApi>) {
        let api = Arc::new(api);
        let registry = Arc::new(InMemoryRegistry { shops });
        (SyncExecutor::new(api.clone(), registry), api)
    }

    fn item(sku: &str, price: f64, category: Option<&str>) -> SyncItem {
        SyncItem {
            sku: sku.into(),
            price,
            category: category.map(String::from),
        }
    }

    #[tokio::test]
    async fn unknown_shop_fails_the_whole_batch() {
        let (executor, api) = executor(MockCatalogApi::new(HashMap::new()), vec![]);
        let request = SyncRequest {
            shop_id: "missing".into(),
            products: vec![item("A-1", 10.0, None)],
        };
        let err = executor.sync(request).await.unwrap_err();
        assert!(err.to_string().contains("Shop not found"));
        assert!(api.recorded().is_empty());
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_remote_call() {
        let mut shop = test_shop();
        shop.api_secret = String::new();
        let (executor, api) = executor(MockCatalogApi::new(HashMap::new()), vec![shop]);
        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![item("A-1", 10.0, None)],
        };
        let err = executor.sync(request).await.unwrap_err();
        assert!(err.to_string().contains("Missing API credentials"));
        assert!(api.recorded().is_empty());
    }

    #[tokio::test]
    async fn results_keep_request_order_and_failures_do_not_stop_the_batch() {
        let mut products = HashMap::new();
        products.insert("A-1".to_string(), vec![simple(120, "A-1")]);
        // "GONE" resolves to nothing
        products.insert("C-3".to_string(), vec![simple(130, "C-3")]);
        let (executor, api) = executor(MockCatalogApi::new(products), vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![
                item("A-1", 10.0, None),
                item("GONE", 5.0, None),
                item("C-3", 20.0, None),
            ],
        };
        let response = executor.sync(request).await.unwrap();

        assert_eq!(response.results.len(), 3);
        assert_eq!(response.results[0].sku, "A-1");
        assert!(response.results[0].success);
        assert_eq!(response.results[1].sku, "GONE");
        assert!(!response.results[1].success);
        assert_eq!(response.results[1].error.as_deref(), Some("Product not found"));
        assert_eq!(response.results[2].sku, "C-3");
        assert!(response.results[2].success);
        assert_eq!(response.success_count, 2);
        assert_eq!(api.recorded().len(), 2);
    }

    #[tokio::test]
    async fn variations_are_updated_through_their_parent() {
        let mut products = HashMap::new();
        products.insert("B-2".to_string(), vec![variation(501, 500, "B-2")]);
        let (executor, api) = executor(MockCatalogApi::new(products), vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![item("B-2", 99.5, None)],
        };
        let response = executor.sync(request).await.unwrap();
        assert_eq!(response.success_count, 1);

        let recorded = api.recorded();
        assert_eq!(
            recorded[0].0,
            UpdateTarget::Variation {
                parent_id: 500,
                variation_id: 501
            }
        );
        assert!(recorded[0].1.contains(r#""regular_price":"99.5""#));
    }

    #[tokio::test]
    async fn variation_without_parent_fails_that_item_only() {
        let mut products = HashMap::new();
        products.insert("ORPHAN".to_string(), vec![variation(77, 0, "ORPHAN")]);
        products.insert("A-1".to_string(), vec![simple(120, "A-1")]);
        let (executor, _api) = executor(MockCatalogApi::new(products), vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![item("ORPHAN", 1.0, None), item("A-1", 2.0, None)],
        };
        let response = executor.sync(request).await.unwrap();
        assert!(!response.results[0].success);
        assert!(response.results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("no parent"));
        assert!(response.results[1].success);
    }

    #[tokio::test]
    async fn numeric_category_goes_out_by_id_and_text_by_name() {
        let mut products = HashMap::new();
        products.insert("A-1".to_string(), vec![simple(120, "A-1")]);
        products.insert("C-3".to_string(), vec![simple(130, "C-3")]);
        let (executor, api) = executor(MockCatalogApi::new(products), vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![
                item("A-1", 10.0, Some("7")),
                item("C-3", 20.0, Some("Shoes")),
            ],
        };
        executor.sync(request).await.unwrap();

        let recorded = api.recorded();
        assert!(recorded[0].1.contains(r#""categories":[{"id":7}]"#));
        assert!(recorded[1].1.contains(r#""categories":[{"name":"Shoes"}]"#));
    }

    #[tokio::test]
    async fn whole_prices_serialize_without_trailing_zeros() {
        let mut products = HashMap::new();
        products.insert("A-1".to_string(), vec![simple(120, "A-1")]);
        let (executor, api) = executor(MockCatalogApi::new(products), vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![item("A-1", 10.0, None)],
        };
        executor.sync(request).await.unwrap();
        assert!(api.recorded()[0].1.contains(r#""regular_price":"10""#));
    }

    #[tokio::test]
    async fn remote_error_message_is_surfaced_on_the_item() {
        let mut products = HashMap::new();
        products.insert("A-1".to_string(), vec![simple(120, "A-1")]);
        let mut api = MockCatalogApi::new(products);
        api.fail_update_for = Some(120);
        let (executor, _api) = executor(api, vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![item("A-1", 10.0, None)],
        };
        let response = executor.sync(request).await.unwrap();
        assert_eq!(response.success_count, 0);
        assert_eq!(response.results[0].error.as_deref(), Some("Invalid price"));
    }

    #[tokio::test]
    async fn mixed_batch_end_to_end() {
        // A-1 is unknown remotely; B-2 is variation 501 under parent 500
        let mut products = HashMap::new();
        products.insert("B-2".to_string(), vec![variation(501, 500, "B-2")]);
        let (executor, api) = executor(MockCatalogApi::new(products), vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![
                item("A-1", 10.0, Some("7")),
                item("B-2", 10.0, Some("7")),
            ],
        };
        let response = executor.sync(request).await.unwrap();

        assert_eq!(response.success_count, 1);
        assert_eq!(response.results[0].sku, "A-1");
        assert_eq!(response.results[0].error.as_deref(), Some("Product not found"));
        assert!(response.results[1].success);

        let recorded = api.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(
            recorded[0].0,
            UpdateTarget::Variation {
                parent_id: 500,
                variation_id: 501
            }
        );
        assert!(recorded[0].1.contains(r#""regular_price":"10""#));
        assert!(recorded[0].1.contains(r#""categories":[{"id":7}]"#));
    }

    #[tokio::test]
    async fn empty_batch_returns_empty_results() {
        let (executor, _api) = executor(MockCatalogApi::new(HashMap::new()), vec![test_shop()]);
        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![],
        };
        let response = executor.sync(request).await.unwrap();
        assert_eq!(response.success_count, 0);
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn first_match_wins_when_sku_lookup_returns_several() {
        let mut products = HashMap::new();
        products.insert(
            "DUP".to_string(),
            vec![simple(1, "DUP"), simple(2, "DUP")],
        );
        let (executor, api) = executor(MockCatalogApi::new(products), vec![test_shop()]);

        let request = SyncRequest {
            shop_id: "shop-1".into(),
            products: vec![item("DUP", 3.0, None)],
        };
        executor.sync(request).await.unwrap();
        assert_eq!(api.recorded()[0].0, UpdateTarget::Product(1));
    }
}
