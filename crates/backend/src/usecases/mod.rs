pub mod u101_sync_products;
pub mod u102_fetch_catalog;
