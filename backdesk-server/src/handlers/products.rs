//! Product catalog endpoints. Authenticated but not admin-gated: any valid
//! account may manage products.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use backdesk_core::catalog::{CreateProductCommand, Product, UpdateProductCommand};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{errors::AppResult, extract::AppJson, state::AppState};

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let items = state.catalog.list().await?;
    Ok(Json(json!({ "items": items })))
}

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductCommand>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.catalog.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    Ok(Json(state.catalog.get(id).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateProductCommand>,
) -> AppResult<Json<Product>> {
    Ok(Json(state.catalog.update(id, payload).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
