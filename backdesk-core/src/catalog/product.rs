use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Catalog error taxonomy, separate from the account taxonomy: the catalog
/// is an independent bounded context that happens to live behind the same
/// gate.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("Product not found")]
    NotFound,

    #[error("Product with this SKU already exists")]
    DuplicateSku,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }
}

/// A catalog entry. SKU is the human-facing unique key; `id` is the stable
/// identifier used in URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: f64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
