use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::product::{CatalogError, Product};
use crate::error::Result;
use crate::store::ProductStore;

/// Payload for product creation. Missing wire fields deserialize to their
/// zero values and are caught by validation, not by the decoder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: f64,
    pub quantity: i32,
}

/// Partial product update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

/// CRUD over the product catalog with SKU uniqueness. The store's constraint
/// is the authority for conflicts; the service pre-checks only narrow the
/// race window.
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductStore>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn create(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, CatalogError> {
        let name = command.name.trim();
        let sku = command.sku.trim();

        if name.is_empty() {
            return Err(CatalogError::validation("name is required"));
        }
        if sku.is_empty() {
            return Err(CatalogError::validation("sku is required"));
        }

        match self.products.get_by_sku(sku).await {
            Ok(_) => return Err(CatalogError::DuplicateSku),
            Err(CatalogError::NotFound) => {}
            Err(err) => return Err(err),
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            description: command.description,
            sku: sku.to_owned(),
            price: command.price,
            quantity: command.quantity,
            created_at: now,
            updated_at: now,
        };

        self.products.create(&product).await?;
        debug!(product_id = %product.id, sku = %product.sku, "product created");

        Ok(product)
    }

    /// All products, ordered by name.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        self.products.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Product, CatalogError> {
        self.products.get_by_id(id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        command: UpdateProductCommand,
    ) -> Result<Product, CatalogError> {
        let mut product = self.products.get_by_id(id).await?;

        if let Some(raw) = command.sku.as_deref() {
            let sku = raw.trim();
            if sku.is_empty() {
                return Err(CatalogError::validation("sku cannot be empty"));
            }
            if sku != product.sku {
                match self.products.get_by_sku(sku).await {
                    Ok(_) => return Err(CatalogError::DuplicateSku),
                    Err(CatalogError::NotFound) => {}
                    Err(err) => return Err(err),
                }
            }
            product.sku = sku.to_owned();
        }
        if let Some(name) = command.name.as_deref() {
            product.name = name.trim().to_owned();
        }
        if let Some(description) = command.description {
            product.description = description;
        }
        if let Some(price) = command.price {
            product.price = price;
        }
        if let Some(quantity) = command.quantity {
            product.quantity = quantity;
        }
        product.updated_at = Utc::now();

        self.products.update(&product).await?;
        debug!(product_id = %product.id, "product updated");

        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
        self.products.delete(id).await?;
        debug!(product_id = %id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryProductStore;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryProductStore::new()))
    }

    fn widget(sku: &str) -> CreateProductCommand {
        CreateProductCommand {
            name: "Widget".into(),
            description: "A widget".into(),
            sku: sku.into(),
            price: 9.99,
            quantity: 100,
        }
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let catalog = service();
        let created = catalog.create(widget("W-1")).await.unwrap();
        let fetched = catalog.get(created.id).await.unwrap();
        assert_eq!(fetched.sku, "W-1");
        assert_eq!(fetched.quantity, 100);
    }

    #[tokio::test]
    async fn create_requires_name_and_sku() {
        let catalog = service();
        let mut missing_name = widget("W-1");
        missing_name.name = "  ".into();
        assert!(matches!(
            catalog.create(missing_name).await,
            Err(CatalogError::Validation(_))
        ));

        let mut missing_sku = widget(" ");
        missing_sku.sku = "".into();
        assert!(matches!(
            catalog.create(missing_sku).await,
            Err(CatalogError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_sku_is_rejected() {
        let catalog = service();
        catalog.create(widget("W-1")).await.unwrap();
        assert!(matches!(
            catalog.create(widget(" W-1 ")).await,
            Err(CatalogError::DuplicateSku)
        ));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let catalog = service();
        for (name, sku) in [("Bolt", "B-1"), ("Anvil", "A-1"), ("Crate", "C-1")] {
            let mut cmd = widget(sku);
            cmd.name = name.into();
            catalog.create(cmd).await.unwrap();
        }

        let names: Vec<_> = catalog
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Anvil", "Bolt", "Crate"]);
    }

    #[tokio::test]
    async fn partial_update_keeps_unset_fields() {
        let catalog = service();
        let product = catalog.create(widget("W-1")).await.unwrap();

        let updated = catalog
            .update(
                product.id,
                UpdateProductCommand {
                    price: Some(19.99),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 19.99);
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.sku, "W-1");
        assert!(updated.updated_at >= product.updated_at);
    }

    #[tokio::test]
    async fn update_sku_conflicts_with_existing() {
        let catalog = service();
        catalog.create(widget("W-1")).await.unwrap();
        let other = catalog.create(widget("W-2")).await.unwrap();

        assert!(matches!(
            catalog
                .update(
                    other.id,
                    UpdateProductCommand {
                        sku: Some("W-1".into()),
                        ..Default::default()
                    },
                )
                .await,
            Err(CatalogError::DuplicateSku)
        ));

        // Keeping its own SKU is never a conflict.
        assert!(
            catalog
                .update(
                    other.id,
                    UpdateProductCommand {
                        sku: Some("W-2".into()),
                        quantity: Some(5),
                        ..Default::default()
                    },
                )
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let catalog = service();
        let product = catalog.create(widget("W-1")).await.unwrap();
        catalog.delete(product.id).await.unwrap();
        assert!(matches!(
            catalog.get(product.id).await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            catalog.delete(product.id).await,
            Err(CatalogError::NotFound)
        ));
    }
}
