//! Code scanner state.
//!
//! While a result is displayed the scanner ignores further reads, so a code
//! held in front of the camera is looked up once. Closing the result
//! re-enables scanning.

use crate::storefront::{InventoryRecord, StorefrontClient, StorefrontError};

/// Result of feeding one read into the scanner.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanResult {
    /// Scanning is paused until [`Scanner::close`].
    Ignored,
    /// Records found; scanning is paused.
    Found(Vec<InventoryRecord>),
    /// Lookup failed; scanning stays enabled.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Scanner {
    enabled: bool,
    last_code: Option<String>,
    records: Vec<InventoryRecord>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            enabled: true,
            last_code: None,
            records: Vec::new(),
        }
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a read code unless a result is already showing.
    pub async fn scan(&mut self, client: &StorefrontClient, code: &str) -> ScanResult {
        if !self.enabled {
            tracing::debug!(code, "Scanner paused, ignoring read");
            return ScanResult::Ignored;
        }
        let result = client.lookup_inventory(code).await;
        self.apply(code, result)
    }

    /// Fold a lookup result into the state.
    pub fn apply(
        &mut self,
        code: &str,
        result: Result<Vec<InventoryRecord>, StorefrontError>,
    ) -> ScanResult {
        if !self.enabled {
            return ScanResult::Ignored;
        }
        match result {
            Ok(records) => {
                self.last_code = Some(code.trim().to_string());
                self.records = records.clone();
                self.enabled = false;
                ScanResult::Found(records)
            }
            Err(e) => {
                tracing::warn!(code, error = %e, "Inventory lookup failed");
                ScanResult::Failed(e.user_message())
            }
        }
    }

    /// Dismiss the shown result and resume scanning.
    pub fn close(&mut self) {
        self.enabled = true;
        self.records.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_code(&self) -> Option<&str> {
        self.last_code.as_deref()
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }
}
