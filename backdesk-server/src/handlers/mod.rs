//! HTTP handlers, grouped by surface: public auth, self-service account
//! endpoints, admin account management, and the product catalog.

pub mod admin;
pub mod auth;
pub mod products;
pub mod users;

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
