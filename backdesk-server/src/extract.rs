//! Request extractors shared by the handlers.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON body extractor whose rejection uses the application error envelope.
///
/// axum's stock `Json` answers a malformed body with a plain-text response;
/// this wrapper collapses every decode failure into one 400 with the same
/// `{"error":{"message","status"}}` shape the handlers return.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|err| {
            tracing::debug!(error = %err, "rejected request body");
            AppError::bad_request("invalid JSON payload")
        })?;
        Ok(Self(value))
    }
}
