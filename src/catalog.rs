use crate::event::AppEvent;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use thiserror::Error;
use tokio::runtime::Handle;

pub const BUNDLED_CATALOG: &str = include_str!("../assets/products.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

#[derive(Debug, Clone)]
pub enum CatalogStatus {
    Loading,
    Ready(Vec<Product>),
    Failed(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch catalog: {0}")]
    Network(String),
    #[error("catalog request returned HTTP {0}")]
    Status(u16),
    #[error("failed to parse catalog: {0}")]
    Parse(String),
}

pub fn parse_catalog(data: &str) -> Result<Vec<Product>, CatalogError> {
    let document: CatalogDocument =
        serde_json::from_str(data).map_err(|err| CatalogError::Parse(err.to_string()))?;
    Ok(document.products)
}

/// Loads the catalog exactly once at startup. Remote fetches run on the
/// runtime handle; the bundled asset parses inline before the first frame.
pub fn spawn_load(handle: Handle, tx: mpsc::Sender<AppEvent>, url: Option<String>) {
    let Some(url) = url else {
        let event = match parse_catalog(BUNDLED_CATALOG) {
            Ok(products) => AppEvent::CatalogLoaded(products),
            Err(err) => AppEvent::CatalogFailed(err.to_string()),
        };
        let _ = tx.send(event);
        return;
    };

    handle.spawn(async move {
        tracing::debug!(url = %url, "fetching catalog");
        let event = match fetch_catalog(&url).await {
            Ok(products) => AppEvent::CatalogLoaded(products),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "catalog load failed");
                AppEvent::CatalogFailed(err.to_string())
            }
        };
        let _ = tx.send(event);
    });
}

async fn fetch_catalog(url: &str) -> Result<Vec<Product>, CatalogError> {
    let response = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(|err| CatalogError::Network(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|err| CatalogError::Network(err.to_string()))?;
    parse_catalog(&body)
}

#[cfg(test)]
mod tests {
    use super::{parse_catalog, BUNDLED_CATALOG};

    #[test]
    fn parse_catalog_reads_keyed_product_list() {
        let data = r#"{
  "products": [
    {
      "id": 1,
      "name": "Hydrating Cleanser",
      "brand": "CeraVe",
      "category": "skincare",
      "image": "img/cerave-cleanser.png",
      "description": "Gentle daily cleanser with ceramides."
    },
    {
      "id": 2,
      "name": "Great Lash Mascara",
      "brand": "Maybelline",
      "category": "makeup",
      "image": "img/great-lash.png"
    }
  ]
}"#;

        let products = parse_catalog(data).expect("catalog fixture should parse");
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand, "CeraVe");
        assert!(products[1].description.is_none());
    }

    #[test]
    fn parse_catalog_rejects_malformed_document() {
        let error = parse_catalog("{\"products\": 3}").expect_err("malformed catalog should fail");
        assert!(error.to_string().contains("failed to parse catalog"));
    }

    #[test]
    fn bundled_catalog_parses_with_unique_ids() {
        let products = parse_catalog(BUNDLED_CATALOG).expect("bundled catalog should parse");
        assert!(!products.is_empty());

        let mut ids: Vec<u32> = products.iter().map(|product| product.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }
}
