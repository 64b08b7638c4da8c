use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::auth::crypto::CredentialHasher;
use crate::auth::token::TokenCodec;
use crate::error::{AuthError, Result};
use crate::store::UserStore;
use crate::user::{Credentials, Role, User, normalize_email};

/// Registration, login, token verification/renewal, and password change.
///
/// Stateless: every call is a pure request/response exchange against the
/// store, the hasher, and the codec. Login collapses unknown-email and
/// wrong-password into the same [`AuthError::InvalidCredentials`] so the
/// endpoint cannot be used to enumerate accounts.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<CredentialHasher>,
    tokens: Arc<TokenCodec>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<CredentialHasher>,
        tokens: Arc<TokenCodec>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Create an account with the default `user` role and return it
    /// sanitized.
    ///
    /// The email pre-check narrows the duplicate window but the store's
    /// uniqueness constraint is the authority: a conflict it reports is
    /// translated to `EmailExists` by the store layer even when the pre-check
    /// passed.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User> {
        let email = normalize_email(email);
        let password = password.trim();
        let name = name.trim();

        if email.is_empty() {
            return Err(AuthError::validation("email is required"));
        }
        if password.is_empty() {
            return Err(AuthError::validation("password is required"));
        }

        match self.users.get_by_email(&email).await {
            Ok(_) => return Err(AuthError::EmailExists),
            Err(AuthError::UserNotFound) => {}
            Err(err) => return Err(err),
        }

        let password_hash = self.hasher.hash_password(password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            name: name.to_owned(),
            role: Role::User,
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        };

        self.users.create(&user).await?;
        debug!(user_id = %user.id, "registered account");

        Ok(user.sanitized())
    }

    /// Authenticate and return a bearer token plus the sanitized account.
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<(String, User)> {
        let email = normalize_email(&credentials.email);
        let password = credentials.password.trim();

        // Never reveal which field was empty or whether the account exists.
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = match self.users.get_by_email(&email).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => return Err(err),
        };

        if !self.hasher.verify_password(password, stored_hash(&user)?)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        debug!(user_id = %user.id, "login succeeded");

        Ok((token, user.sanitized()))
    }

    /// Resolve a bearer token to its sanitized account.
    ///
    /// A token whose subject no longer exists is reported as `TokenInvalid`,
    /// not `UserNotFound`: deleting an account revokes its outstanding tokens
    /// at the next check, and callers must not learn which failure occurred.
    pub async fn verify_token(&self, token: &str) -> Result<User> {
        let claims = self.tokens.verify(token)?;

        let user = match self.users.get_by_id(claims.sub).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                debug!(subject = %claims.sub, "token subject no longer exists");
                return Err(AuthError::TokenInvalid);
            }
            Err(err) => return Err(err),
        };

        Ok(user.sanitized())
    }

    /// Exchange a still-valid token for a fresh one with a new expiry window.
    ///
    /// Runs the full verification path first, so a token for a deleted
    /// account cannot be renewed.
    pub async fn renew_token(&self, token: &str) -> Result<String> {
        let user = self.verify_token(token).await?;
        self.tokens.issue(user.id)
    }

    /// Replace the account's password after verifying the current one.
    ///
    /// The caller's authenticated identity must already equal `id`; the HTTP
    /// layer enforces that before this service runs.
    pub async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let current = current_password.trim();
        let new = new_password.trim();

        if new.is_empty() {
            return Err(AuthError::validation("new password is required"));
        }

        let user = self.users.get_by_id(id).await?;
        let stored = stored_hash(&user)?;

        if !self.hasher.verify_password(current, stored)? {
            return Err(AuthError::PasswordMismatch);
        }
        if self.hasher.verify_password(new, stored)? {
            return Err(AuthError::PasswordUnchanged);
        }

        let new_hash = self.hasher.hash_password(new)?;
        self.users.update_password(id, &new_hash, Utc::now()).await?;
        debug!(user_id = %id, "password changed");

        Ok(())
    }
}

/// Every persisted account carries a hash; a record without one can only be
/// a storage-layer defect.
fn stored_hash(user: &User) -> Result<&str> {
    user.password_hash.as_deref().ok_or_else(|| {
        AuthError::Internal(format!(
            "persisted account {} is missing its password hash",
            user.id
        ))
    })
}
