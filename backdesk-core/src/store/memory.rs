//! In-memory store implementations for tests and demos.
//!
//! Behavior mirrors the Postgres stores: uniqueness conflicts and not-found
//! outcomes use the same error variants, so services exercised against these
//! stores see production semantics minus the transport.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::product::{CatalogError, Product};
use crate::error::{AuthError, Result};
use crate::store::{ProductStore, UserFilter, UserStore};
use crate::user::User;

/// Account storage backed by a `HashMap` behind an async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailExists);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AuthError::UserNotFound)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(AuthError::UserNotFound)
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<User>> {
        let users = self.users.read().await;
        let mut matched: Vec<User> = users
            .values()
            .filter(|u| filter.role.is_none_or(|role| u.role == role))
            .cloned()
            .collect();
        // Most recent first; ids are time-ordered and break created_at ties.
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matched)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AuthError::UserNotFound);
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AuthError::EmailExists);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write().await;
        users.remove(&id).map(|_| ()).ok_or(AuthError::UserNotFound)
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(AuthError::UserNotFound)?;
        user.password_hash = Some(password_hash.to_owned());
        user.updated_at = updated_at;
        Ok(())
    }
}

/// Product storage backed by a `HashMap` behind an async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, product: &Product) -> Result<(), CatalogError> {
        let mut products = self.products.write().await;
        if products.values().any(|p| p.sku == product.sku) {
            return Err(CatalogError::DuplicateSku);
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Product, CatalogError> {
        let products = self.products.read().await;
        products.get(&id).cloned().ok_or(CatalogError::NotFound)
    }

    async fn get_by_sku(&self, sku: &str) -> Result<Product, CatalogError> {
        let products = self.products.read().await;
        products
            .values()
            .find(|p| p.sku == sku)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.sku.cmp(&b.sku)));
        Ok(all)
    }

    async fn update(&self, product: &Product) -> Result<(), CatalogError> {
        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(CatalogError::NotFound);
        }
        if products
            .values()
            .any(|p| p.id != product.id && p.sku == product.sku)
        {
            return Err(CatalogError::DuplicateSku);
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
        let mut products = self.products.write().await;
        products
            .remove(&id)
            .map(|_| ())
            .ok_or(CatalogError::NotFound)
    }
}
