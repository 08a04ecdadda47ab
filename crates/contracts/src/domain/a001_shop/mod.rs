pub mod aggregate;

pub use aggregate::{Shop, ShopDto, ShopId, ShopProbeResult};
