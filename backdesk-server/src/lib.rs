//! # Backdesk Server
//!
//! HTTP surface for the Backdesk administrative backend: public
//! authentication endpoints, self-service account routes, admin-gated user
//! management, and the product catalog, all served over axum.
//!
//! The binary in `main.rs` wires the domain services from `backdesk-core`
//! against PostgreSQL; the integration tests wire the same router against the
//! in-memory store.

pub mod config;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
