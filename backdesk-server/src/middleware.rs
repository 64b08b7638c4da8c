//! Request guards: bearer-token authentication and the admin gate.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use backdesk_core::User;

use crate::{errors::AppError, state::AppState};

/// Authenticate the request and stash the verified account in the request
/// extensions for downstream handlers.
///
/// Verification failures collapse into one 401 message so callers cannot
/// probe for why a token was rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::unauthorized("authorization token required"))?;

    let user = state
        .auth
        .verify_token(&token)
        .await
        .map_err(|_| AppError::unauthorized("invalid or expired token"))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Require the authenticated account to hold the admin role.
///
/// Must run after [`auth_middleware`] in the layer stack; the account is read
/// from the extensions it populated.
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or_else(|| AppError::unauthorized("authentication required"))?;

    if !user.role.is_admin() {
        return Err(AppError::forbidden("admin privileges required"));
    }

    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively; surrounding whitespace on the token is
/// ignored. An empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let (scheme, token) = header.split_at_checked(7)?;
    if !scheme.eq_ignore_ascii_case("bearer ") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
