//! Storage contracts consumed by the services, plus their implementations.
//!
//! Two backends implement the ports: [`postgres`] for production and
//! [`memory`] for tests and demos. Both carry the same error semantics:
//! `UserNotFound` / `EmailExists` (and the catalog equivalents) for business
//! outcomes, `Storage` for transport failures.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::product::{CatalogError, Product};
use crate::error::Result;
use crate::user::{Role, User};

/// Optional constraints applied to account listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
}

/// Durable account storage.
///
/// Implementations own the email-uniqueness invariant: `create` and `update`
/// must fail with `EmailExists` on a conflict even when the caller's own
/// pre-check passed, since concurrent writers race past any
/// check-then-insert. Listings come back ordered by creation time, most
/// recent first.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> Result<()>;
    async fn get_by_email(&self, email: &str) -> Result<User>;
    async fn get_by_id(&self, id: Uuid) -> Result<User>;
    async fn list(&self, filter: UserFilter) -> Result<Vec<User>>;
    async fn update(&self, user: &User) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;
}

/// Durable product storage; SKU uniqueness mirrors email uniqueness on
/// accounts. Listings come back ordered by name.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, product: &Product) -> Result<(), CatalogError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Product, CatalogError>;
    async fn get_by_sku(&self, sku: &str) -> Result<Product, CatalogError>;
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;
    async fn update(&self, product: &Product) -> Result<(), CatalogError>;
    async fn delete(&self, id: Uuid) -> Result<(), CatalogError>;
}
