use async_trait::async_trait;
use contracts::domain::a001_shop::aggregate::Shop;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::repository;

/// Source of shop records for the executors. The default is the
/// database registry; setting SHOP_CONFIGS switches to a fixed set of
/// shops read from the environment, which is handy for containerized
/// deployments without a seeded DB.
#[async_trait]
pub trait ShopRegistry: Send + Sync {
    async fn get_shop(&self, id: &str) -> anyhow::Result<Option<Shop>>;
    async fn list_shops(&self) -> anyhow::Result<Vec<Shop>>;
}

pub struct DbShopRegistry;

#[async_trait]
impl ShopRegistry for DbShopRegistry {
    async fn get_shop(&self, id: &str) -> anyhow::Result<Option<Shop>> {
        let uuid = match Uuid::parse_str(id) {
            Ok(u) => u,
            Err(_) => return Ok(None),
        };
        repository::get_by_id(uuid).await
    }

    async fn list_shops(&self) -> anyhow::Result<Vec<Shop>> {
        repository::list_all().await
    }
}

/// One entry of the SHOP_CONFIGS JSON array.
#[derive(Debug, Clone, Deserialize)]
struct ShopConfigEntry {
    id: String,
    name: String,
    url: String,
    #[serde(default)]
    consumer_key: String,
    #[serde(default)]
    consumer_secret: String,
}

pub struct EnvShopRegistry {
    shops: Vec<Shop>,
}

impl EnvShopRegistry {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let entries: Vec<ShopConfigEntry> = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Invalid SHOP_CONFIGS JSON: {}", e))?;

        let shops = entries
            .into_iter()
            .map(|entry| {
                let mut shop = Shop::new_for_insert(
                    entry.id.clone(),
                    entry.name,
                    entry.url,
                    entry.consumer_key,
                    entry.consumer_secret,
                    None,
                );
                // Keep the configured id addressable even when it is
                // not a UUID: the code field carries it verbatim.
                shop.base.code = entry.id;
                shop
            })
            .collect();

        Ok(Self { shops })
    }

    pub fn from_env() -> anyhow::Result<Option<Self>> {
        match std::env::var("SHOP_CONFIGS") {
            Ok(json) if !json.trim().is_empty() => Ok(Some(Self::from_json(&json)?)),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl ShopRegistry for EnvShopRegistry {
    async fn get_shop(&self, id: &str) -> anyhow::Result<Option<Shop>> {
        Ok(self
            .shops
            .iter()
            .find(|s| s.base.code == id || s.to_string_id() == id)
            .cloned())
    }

    async fn list_shops(&self) -> anyhow::Result<Vec<Shop>> {
        Ok(self.shops.clone())
    }
}

/// Pick the registry implementation for this process.
pub fn default_registry() -> Arc<dyn ShopRegistry> {
    match EnvShopRegistry::from_env() {
        Ok(Some(env_registry)) => {
            tracing::info!("Using shop registry from SHOP_CONFIGS");
            Arc::new(env_registry)
        }
        Ok(None) => Arc::new(DbShopRegistry),
        Err(e) => {
            tracing::error!("Failed to parse SHOP_CONFIGS, falling back to DB registry: {}", e);
            Arc::new(DbShopRegistry)
        }
    }
}
