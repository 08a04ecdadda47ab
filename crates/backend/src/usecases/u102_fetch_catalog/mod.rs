pub mod attributes;
pub mod executor;

pub use executor::FetchExecutor;
