pub mod client;
pub mod error;

pub use client::{
    CatalogApi, CategoryRef, ProductPatch, UpdateTarget, WooApiClient, WooProduct, WooProductPage,
};
pub use error::WooError;
