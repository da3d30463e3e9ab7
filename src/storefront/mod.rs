//! Storefront backend API.
//!
//! # Operations
//! - `login`: POST credentials, expects `{success, message?}`
//! - `list_products`: GET listing, expects an array of products
//! - `lookup_inventory`: GET `{base}/{code}`, expects an array of stock records
//! - `product_detail`: inventory, then prices, then costs for one code

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::{Credentials, LoginReceipt};
pub use client::{ApiEndpoints, StorefrontClient};
pub use error::{StorefrontError, StorefrontResult};
pub use types::{
    filter_products, CostRecord, DetailSection, InventoryRecord, PriceRecord, Product,
    ProductDetail,
};
