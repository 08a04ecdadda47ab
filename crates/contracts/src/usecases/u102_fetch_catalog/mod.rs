pub mod request;
pub mod response;

pub use request::FetchRequest;
pub use response::{FetchResponse, RemoteProduct, RemoteProductKind};

use crate::usecases::common::UseCaseMetadata;

pub struct FetchCatalog;

impl UseCaseMetadata for FetchCatalog {
    fn usecase_index() -> &'static str {
        "u102"
    }

    fn usecase_name() -> &'static str {
        "fetch_catalog"
    }

    fn display_name() -> &'static str {
        "Fetch the remote WooCommerce catalog"
    }

    fn description() -> &'static str {
        "Materializes the remote catalog as normalized products with expanded variations"
    }
}
