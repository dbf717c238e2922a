//! API service modules for Walmart Marketplace endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the Marketplace API.

mod feeds;
mod items;
mod orders;
mod products;

pub use feeds::FeedsService;
pub use items::ItemsService;
pub use orders::OrdersService;
pub use products::ProductsService;
