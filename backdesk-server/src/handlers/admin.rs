//! Administrative account management. Every route here sits behind both the
//! authentication middleware and the admin gate.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use backdesk_core::{
    Role, User,
    admin::{CreateUserCommand, UpdateUserCommand},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use super::users::RoleRequest;
use crate::{
    errors::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<Value>> {
    let users = state.admin.list(query.role.as_deref()).await?;
    Ok(Json(json!({ "users": users })))
}

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserCommand>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let user = state.admin.create(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    Ok(Json(state.admin.get(id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateUserCommand>,
) -> AppResult<Json<User>> {
    Ok(Json(state.admin.update(id, payload).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.admin.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let user = state.admin.get(id).await?;
    Ok(Json(json!({ "user": user })))
}

pub async fn set_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<RoleRequest>,
) -> AppResult<Json<User>> {
    let role = payload.role.trim();
    if role.is_empty() {
        return Err(AppError::bad_request("role is required"));
    }

    let user = state
        .admin
        .update(
            id,
            UpdateUserCommand {
                role: Some(role.to_string()),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(user))
}

/// Strip any elevated role, returning the account to the default.
pub async fn reset_user_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = state
        .admin
        .update(
            id,
            UpdateUserCommand {
                role: Some(Role::User.as_str().to_string()),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(user))
}
