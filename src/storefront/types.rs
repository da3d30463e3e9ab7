//! Backend records.
//!
//! The backend speaks Spanish field names; they are mapped to English here.

use serde::{Deserialize, Serialize};

/// A catalog entry from the products listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "costoEstandar", default)]
    pub standard_cost: Option<f64>,
}

impl Product {
    /// Standard cost with two decimals, `0.00` when unknown.
    pub fn display_cost(&self) -> String {
        format!("{:.2}", self.standard_cost.unwrap_or(0.0))
    }

    /// Case-insensitive substring match on code or name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.code.to_lowercase().contains(&query) || self.name.to_lowercase().contains(&query)
    }
}

/// Stock of one product at one location.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InventoryRecord {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub total: f64,
}

/// Price of a product in one price list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceRecord {
    #[serde(rename = "codigo", default)]
    pub code: Option<String>,
    #[serde(rename = "lista")]
    pub list: String,
    #[serde(rename = "precio")]
    pub price: f64,
}

/// Cost figures for a product.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CostRecord {
    #[serde(rename = "codigo", default)]
    pub code: Option<String>,
    #[serde(rename = "costoEstandar", default)]
    pub standard_cost: Option<f64>,
    #[serde(rename = "costoPromedio", default)]
    pub average_cost: Option<f64>,
}

/// Part of a product detail that may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSection {
    Prices,
    Costs,
}

impl DetailSection {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailSection::Prices => "prices",
            DetailSection::Costs => "costs",
        }
    }
}

/// Inventory, prices and costs for one product code.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub code: String,
    pub inventory: Vec<InventoryRecord>,
    pub prices: Vec<PriceRecord>,
    pub costs: Vec<CostRecord>,
    /// Sections whose lookup failed; their vectors are empty.
    pub unavailable: Vec<DetailSection>,
}

impl ProductDetail {
    pub fn total_stock(&self) -> f64 {
        self.inventory.iter().map(|r| r.total).sum()
    }

    /// Product name as reported by the first inventory record.
    pub fn name(&self) -> Option<&str> {
        self.inventory.first().map(|r| r.name.as_str())
    }
}

/// Products matching `query`, in their original order. Blank matches all.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim();
    if query.is_empty() {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.matches(query)).collect()
}
