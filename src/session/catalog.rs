//! Product list state.

use crate::storefront::{filter_products, Product, StorefrontClient, StorefrontError};

/// What a refresh did to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// The listing was replaced with this many products.
    Loaded(usize),
    /// The load failed; the previous listing is still shown.
    FailedKeptPrevious,
    /// The load failed and there is nothing to show.
    FailedEmpty,
}

/// Products, search text and last load error for one product-list view.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    search: String,
    error: Option<String>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the listing from the backend.
    pub async fn refresh(&mut self, client: &StorefrontClient) -> RefreshStatus {
        let result = client.list_products().await;
        self.apply(result)
    }

    /// Fold a listing result into the state.
    pub fn apply(&mut self, result: Result<Vec<Product>, StorefrontError>) -> RefreshStatus {
        match result {
            Ok(products) => {
                let count = products.len();
                self.products = products;
                self.error = None;
                RefreshStatus::Loaded(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, kept = self.products.len(), "Product refresh failed");
                self.error = Some(e.user_message());
                if self.products.is_empty() {
                    RefreshStatus::FailedEmpty
                } else {
                    RefreshStatus::FailedKeptPrevious
                }
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Products matching the current search.
    pub fn visible(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.search)
    }

    /// Text for an empty visible list.
    pub fn empty_message(&self) -> &'static str {
        if self.error.is_some() {
            "Could not load products"
        } else if !self.search.trim().is_empty() {
            "No products found"
        } else {
            "No products available"
        }
    }
}
