//! Storefront API client.
//!
//! Every operation is one or more fallback scans over the endpoint list
//! configured for that API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, EndpointSet};
use crate::fetch::{EndpointFetcher, EndpointList, PayloadShape, RequestSpec, DEFAULT_TIMEOUT};
use crate::storefront::auth::{Credentials, LoginReceipt};
use crate::storefront::error::{StorefrontError, StorefrontResult};
use crate::storefront::types::{
    CostRecord, DetailSection, InventoryRecord, PriceRecord, Product, ProductDetail,
};

/// Parsed endpoint lists, one per backend API.
#[derive(Debug, Clone, Default)]
pub struct ApiEndpoints {
    pub auth: EndpointList,
    pub products: EndpointList,
    pub inventory: EndpointList,
    pub prices: EndpointList,
    pub costs: EndpointList,
}

impl ApiEndpoints {
    pub fn from_set(set: &EndpointSet) -> StorefrontResult<Self> {
        let parse = |api: &'static str, urls: &[String]| {
            EndpointList::parse(urls).map_err(|source| StorefrontError::Endpoint { api, source })
        };
        Ok(Self {
            auth: parse("auth", &set.auth)?,
            products: parse("products", &set.products)?,
            inventory: parse("inventory", &set.inventory)?,
            prices: parse("prices", &set.prices)?,
            costs: parse("costs", &set.costs)?,
        })
    }
}

/// Client for the storefront backend.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    fetcher: EndpointFetcher,
    endpoints: ApiEndpoints,
    timeout: Duration,
}

impl StorefrontClient {
    pub fn new(fetcher: EndpointFetcher, endpoints: ApiEndpoints) -> Self {
        Self {
            fetcher,
            endpoints,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Per-attempt timeout applied to every call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a client for the config's active profile.
    pub fn from_config(config: &ClientConfig) -> StorefrontResult<Self> {
        let fetcher =
            EndpointFetcher::from_config(&config.timeouts).map_err(StorefrontError::Client)?;
        let endpoints = ApiEndpoints::from_set(config.active_endpoints())?;
        tracing::debug!(
            profile = %config.profile,
            request_secs = config.timeouts.request_secs,
            "Storefront client configured"
        );
        Ok(Self::new(fetcher, endpoints).with_timeout(config.timeouts.request()))
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Authenticate. A `success: false` answer is [`StorefrontError::Rejected`].
    pub async fn login(&self, credentials: &Credentials) -> StorefrontResult<LoginReceipt> {
        let spec = RequestSpec::post(credentials.to_body())
            .named("login")
            .timeout(self.timeout)
            .expect_shape(PayloadShape::SuccessFlag);

        let fetched = self.fetcher.attempt(&self.endpoints.auth, &spec).await?;
        let receipt: LoginReceipt = decode("login answer", fetched.payload)?;
        let receipt = receipt.into_result()?;
        tracing::info!(username = credentials.username(), "Login accepted");
        Ok(receipt)
    }

    /// Full product listing.
    pub async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
        let spec = RequestSpec::get()
            .named("list_products")
            .timeout(self.timeout)
            .expect_shape(PayloadShape::Array);
        let fetched = self.fetcher.attempt(&self.endpoints.products, &spec).await?;
        decode("products", fetched.payload)
    }

    /// Inventory records for a scanned or typed code.
    pub async fn lookup_inventory(&self, code: &str) -> StorefrontResult<Vec<InventoryRecord>> {
        let code = normalize_code(code)?;
        self.records(&self.endpoints.inventory, "lookup_inventory", "inventory", code)
            .await
    }

    /// Inventory, prices and costs for one code, fetched one after another.
    ///
    /// Inventory is required. A failed price or cost lookup is logged and
    /// listed in [`ProductDetail::unavailable`].
    pub async fn product_detail(&self, code: &str) -> StorefrontResult<ProductDetail> {
        let code = normalize_code(code)?;
        let inventory: Vec<InventoryRecord> = self
            .records(&self.endpoints.inventory, "detail_inventory", "inventory", code)
            .await?;

        let mut unavailable = Vec::new();
        let prices: Vec<PriceRecord> = self
            .optional_section(DetailSection::Prices, &self.endpoints.prices, code, &mut unavailable)
            .await;
        let costs: Vec<CostRecord> = self
            .optional_section(DetailSection::Costs, &self.endpoints.costs, code, &mut unavailable)
            .await;

        Ok(ProductDetail {
            code: code.to_string(),
            inventory,
            prices,
            costs,
            unavailable,
        })
    }

    async fn records<T: DeserializeOwned>(
        &self,
        endpoints: &EndpointList,
        operation: &'static str,
        what: &'static str,
        code: &str,
    ) -> StorefrontResult<Vec<T>> {
        let spec = RequestSpec::get()
            .named(operation)
            .segment(code)
            .timeout(self.timeout)
            .expect_shape(PayloadShape::Array);
        let fetched = self.fetcher.attempt(endpoints, &spec).await?;
        decode(what, fetched.payload)
    }

    async fn optional_section<T: DeserializeOwned>(
        &self,
        section: DetailSection,
        endpoints: &EndpointList,
        code: &str,
        unavailable: &mut Vec<DetailSection>,
    ) -> Vec<T> {
        let operation = match section {
            DetailSection::Prices => "detail_prices",
            DetailSection::Costs => "detail_costs",
        };
        match self.records(endpoints, operation, section.as_str(), code).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(code, section = section.as_str(), error = %e, "Detail section unavailable");
                unavailable.push(section);
                Vec::new()
            }
        }
    }
}

fn normalize_code(code: &str) -> StorefrontResult<&str> {
    let code = code.trim();
    if code.is_empty() {
        Err(StorefrontError::EmptyCode)
    } else {
        Ok(code)
    }
}

fn decode<T: DeserializeOwned>(what: &'static str, payload: serde_json::Value) -> StorefrontResult<T> {
    serde_json::from_value(payload).map_err(|source| StorefrontError::Decode { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_active_profile() {
        let mut config = ClientConfig::default();
        let dev = StorefrontClient::from_config(&config).unwrap();
        assert_eq!(dev.endpoints().products.len(), 2);

        config.profile = crate::config::Profile::Production;
        let prod = StorefrontClient::from_config(&config).unwrap();
        assert_eq!(prod.endpoints().products.len(), 1);
    }

    #[test]
    fn test_bad_endpoint_is_reported() {
        let mut config = ClientConfig::default();
        config.development.costs = vec!["nope".into()];
        match StorefrontClient::from_config(&config) {
            Err(StorefrontError::Endpoint { api, .. }) => assert_eq!(api, "costs"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_code_sends_nothing() {
        let client = StorefrontClient::new(EndpointFetcher::default(), ApiEndpoints::default());
        assert!(matches!(
            client.lookup_inventory("  ").await,
            Err(StorefrontError::EmptyCode)
        ));
        assert!(matches!(
            client.product_detail("").await,
            Err(StorefrontError::EmptyCode)
        ));
    }
}
