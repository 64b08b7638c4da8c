use thiserror::Error;

/// Shared error taxonomy for authentication, account management, and the
/// store contract.
///
/// `InvalidCredentials` and `TokenInvalid` are deliberately ambiguous: login
/// never reveals whether the email or the password was wrong, and token
/// verification never reveals whether the token was expired, malformed,
/// carried a bad signature, or referenced a deleted account. `Storage` carries
/// transport failures unchanged so callers can tell infrastructure problems
/// apart from business rejections.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Token invalid or expired")]
    TokenInvalid,

    #[error("Invalid role")]
    InvalidRole,

    #[error("Current password does not match")]
    PasswordMismatch,

    #[error("New password must be different from the current password")]
    PasswordUnchanged,

    #[error("Insufficient privileges")]
    Forbidden,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }
}

pub type Result<T, E = AuthError> = std::result::Result<T, E>;
