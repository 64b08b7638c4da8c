//! Public authentication endpoints: register, login, token renewal.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap, http::StatusCode};
use backdesk_core::{AuthError, user::Credentials};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    errors::{AppError, AppResult},
    extract::AppJson,
    middleware::bearer_token,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenewRequest {
    token: String,
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let user = state
        .auth
        .register(&payload.email, &payload.password, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> AppResult<Json<Value>> {
    let (token, user) = state.auth.login(&payload).await.map_err(|err| match err {
        AuthError::InvalidCredentials => AppError::unauthorized("invalid email or password"),
        other => AppError::from(other),
    })?;

    Ok(Json(json!({ "token": token, "user": user })))
}

/// Exchange a still-valid token for a fresh one. The token is taken from the
/// `Authorization` header when present, otherwise from a `{"token"}` body.
pub async fn renew(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let mut token = bearer_token(&headers);

    if token.is_none() && !body.is_empty() {
        let payload: RenewRequest = serde_json::from_slice(&body)
            .map_err(|_| AppError::bad_request("invalid JSON payload"))?;
        let trimmed = payload.token.trim();
        if !trimmed.is_empty() {
            token = Some(trimmed.to_string());
        }
    }

    let Some(token) = token else {
        return Err(AppError::bad_request("token required"));
    };

    let renewed = state.auth.renew_token(&token).await?;

    Ok(Json(json!({ "token": renewed })))
}
