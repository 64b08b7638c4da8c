//! Self-service account endpoints for the authenticated principal.

use axum::{Extension, Json, extract::State, http::StatusCode};
use backdesk_core::{
    AuthError, Role, User,
    admin::UpdateUserCommand,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    errors::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoleRequest {
    pub role: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    state
        .auth
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await
        .map_err(|err| match err {
            AuthError::PasswordMismatch => AppError::bad_request("current password is incorrect"),
            other => AppError::from(other),
        })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_role(Extension(user): Extension<User>) -> Json<Value> {
    Json(json!({ "user": user }))
}

/// Change the caller's own role.
///
/// A non-admin asking for the admin role is refused before the update runs;
/// everything else is left to the administration service's role validation.
pub async fn update_my_role(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    AppJson(payload): AppJson<RoleRequest>,
) -> AppResult<Json<Value>> {
    let role = payload.role.trim();
    if role.is_empty() {
        return Err(AppError::bad_request("role is required"));
    }

    if role.eq_ignore_ascii_case(Role::Admin.as_str()) && !user.role.is_admin() {
        return Err(AppError::forbidden(
            "insufficient privileges to assign admin role",
        ));
    }

    let updated = state
        .admin
        .update(
            user.id,
            UpdateUserCommand {
                role: Some(role.to_string()),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(json!({ "user": updated })))
}
