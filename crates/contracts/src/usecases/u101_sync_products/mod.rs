pub mod request;
pub mod response;

pub use request::{SyncItem, SyncRequest};
pub use response::{SyncItemResult, SyncResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct SyncProducts;

impl UseCaseMetadata for SyncProducts {
    fn usecase_index() -> &'static str {
        "u101"
    }

    fn usecase_name() -> &'static str {
        "sync_products"
    }

    fn display_name() -> &'static str {
        "Push price/category updates to WooCommerce"
    }

    fn description() -> &'static str {
        "Resolves each SKU against the remote store and applies partial updates with per-item outcome reporting"
    }
}
