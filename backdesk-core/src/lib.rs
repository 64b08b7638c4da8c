//! # Backdesk Core
//!
//! Core library for the Backdesk administrative backend, providing the account
//! and product domain types, credential handling, bearer-token issuance, and
//! the persistence contracts the HTTP server is wired against.
//!
//! ## Overview
//!
//! `backdesk-core` is the foundation of the Backdesk backend, offering:
//!
//! - **Authentication**: Argon2id credential hashing and an HS256 bearer-token
//!   codec with explicit, injected signing settings
//! - **Account Administration**: CRUD over accounts with role assignment
//! - **Product Catalog**: CRUD over products with SKU uniqueness
//! - **Storage Abstraction**: Trait-based store interface with PostgreSQL and
//!   in-memory backends
//! - **Error Taxonomy**: One shared error type whose variants map cleanly onto
//!   transport-level responses
//!
//! ## Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`user`]: Account records, roles, and email normalization
//! - [`auth`]: Credential hasher, token codec, and the authentication service
//! - [`admin`]: Account administration service
//! - [`catalog`]: Product types and the catalog service
//! - [`store`]: Store contracts and their PostgreSQL and in-memory backends
//! - [`error`]: The shared error taxonomy
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use backdesk_core::{
//!     auth::{AuthService, CredentialHasher, TokenCodec, TokenSettings},
//!     store::memory::MemoryUserStore,
//!     user::Credentials,
//! };
//!
//! async fn bootstrap() -> Result<(), Box<dyn std::error::Error>> {
//!     let users = Arc::new(MemoryUserStore::new());
//!     let hasher = Arc::new(CredentialHasher::new()?);
//!     let tokens = Arc::new(TokenCodec::new(TokenSettings {
//!         secret: "change-me".into(),
//!         issuer: "backdesk".into(),
//!         lifetime: chrono::Duration::hours(12),
//!     })?);
//!     let auth = AuthService::new(users, hasher, tokens);
//!
//!     let account = auth.register("ada@example.com", "hunter2!", "Ada").await?;
//!     let (token, _) = auth
//!         .login(&Credentials {
//!             email: "ada@example.com".into(),
//!             password: "hunter2!".into(),
//!         })
//!         .await?;
//!     let verified = auth.verify_token(&token).await?;
//!     assert_eq!(verified.id, account.id);
//!     Ok(())
//! }
//! ```

/// Account administration service with CRUD operations
pub mod admin;

/// Credential hashing, bearer-token codec, and the authentication service
pub mod auth;

/// Product catalog types and service
pub mod catalog;

/// Error taxonomy shared across the crate
pub mod error;

/// Store contracts and their PostgreSQL and in-memory backends
pub mod store;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Account records, roles, and email normalization
pub mod user;

pub use error::{AuthError, Result};
pub use user::{Role, User};
