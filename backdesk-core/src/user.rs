//! Account model shared by authentication and administration.
//!
//! A [`User`] is the durable identity record: normalized email, display
//! name, a closed [`Role`], the Argon2id password hash, and UTC timestamps.
//! The password hash never crosses the service boundary outward. Every
//! service returns records through [`User::sanitized`], and the field is
//! additionally excluded from serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// Role enumeration for role-based access control.
///
/// The set is closed: every boundary that accepts a role from outside goes
/// through [`Role::from_str`], which is the single place a raw string becomes
/// a `Role`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account; may authenticate and manage its own credentials
    #[default]
    User,
    /// Administrator; may manage other accounts and grant roles
    Admin,
}

impl Role {
    /// Get the role name as a string (matches the stored representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Check if this role can access administrative features
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(AuthError::InvalidRole),
        }
    }
}

/// A registered account.
///
/// The password hash is carried as `Option` so a single record type serves
/// both sides of the trust boundary: stores always populate it, services
/// clear it via [`User::sanitized`] before handing records outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique account identifier
    pub id: Uuid,
    /// Unique email, normalized to trimmed lower-case
    pub email: String,
    /// Display name
    pub name: String,
    /// Access role
    pub role: Role,
    /// Argon2id password hash (never serialized)
    #[serde(skip)]
    pub password_hash: Option<String>,
    /// Timestamp of account creation
    pub created_at: DateTime<Utc>,
    /// Timestamp of last mutation
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Strip secret material before the record crosses a trust boundary.
    ///
    /// This is the one sanitization point for the whole crate; both the
    /// authentication service and the administration service return records
    /// through it.
    pub fn sanitized(mut self) -> User {
        self.password_hash = None;
        self
    }
}

/// Transient login input; never persisted. Missing wire fields deserialize
/// to empty strings and fall through to the credential check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Canonical email form: surrounding whitespace removed, lower-cased.
///
/// Applied before every store lookup and before persisting, so email
/// uniqueness is effectively case-insensitive.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
