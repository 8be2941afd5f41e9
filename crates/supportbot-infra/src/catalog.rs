//! Product catalog loader.
//!
//! Reads a JSON array of product objects once at startup. Malformed entries
//! are logged and skipped; only an unreadable file or a non-array root is fatal.

use std::path::Path;

use serde_json::Value;

use supportbot_types::catalog::Product;
use supportbot_types::error::CatalogError;

/// Load the product catalog from `path`.
pub async fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let content = tokio::fs::read_to_string(path).await?;
    let products = parse_catalog(&content)?;
    tracing::info!(
        "Loaded {} products from {}",
        products.len(),
        path.display()
    );
    Ok(products)
}

/// Parse catalog JSON text, skipping entries that cannot become a [`Product`].
pub fn parse_catalog(content: &str) -> Result<Vec<Product>, CatalogError> {
    let root: Value = serde_json::from_str(content)?;
    let entries = root.as_array().ok_or(CatalogError::NotAnArray)?;

    let mut products = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match Product::from_value(index, entry) {
            Ok(product) => products.push(product),
            Err(err) => tracing::warn!("Skipping catalog entry: {err}"),
        }
    }
    Ok(products)
}
