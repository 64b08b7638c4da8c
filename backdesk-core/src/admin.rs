//! Administrative account management, layered on the same store as
//! authentication. Admin-only access is enforced by the HTTP gate before any
//! of these calls run.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::crypto::CredentialHasher;
use crate::error::{AuthError, Result};
use crate::store::{UserFilter, UserStore};
use crate::user::{Role, User, normalize_email};

/// Payload for administrative account creation. Missing wire fields
/// deserialize to their zero values and are caught by validation, not by the
/// decoder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserCommand {
    pub email: String,
    pub name: String,
    pub password: String,
    /// Raw role value; `None` or empty defaults to `user`
    pub role: Option<String>,
}

/// Partial administrative update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserCommand {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Admin CRUD over accounts: list with role filter, create with an explicit
/// role, partial update, delete. Shares normalization, uniqueness, and
/// sanitization rules with registration.
#[derive(Clone)]
pub struct UserAdminService {
    users: Arc<dyn UserStore>,
    hasher: Arc<CredentialHasher>,
}

impl std::fmt::Debug for UserAdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAdminService").finish_non_exhaustive()
    }
}

impl UserAdminService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<CredentialHasher>,
    ) -> Self {
        Self { users, hasher }
    }

    /// List accounts, most recently created first, optionally restricted to
    /// one role. An unrecognized filter value fails `InvalidRole` rather than
    /// silently returning nothing.
    pub async fn list(&self, role_filter: Option<&str>) -> Result<Vec<User>> {
        let role = parse_optional_role(role_filter)?;
        let users = self.users.list(UserFilter { role }).await?;
        Ok(users.into_iter().map(User::sanitized).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        Ok(self.users.get_by_id(id).await?.sanitized())
    }

    pub async fn create(&self, command: CreateUserCommand) -> Result<User> {
        let email = normalize_email(&command.email);
        let password = command.password.trim();
        let name = command.name.trim();

        if email.is_empty() {
            return Err(AuthError::validation("email is required"));
        }
        if password.is_empty() {
            return Err(AuthError::validation("password is required"));
        }
        let role =
            parse_optional_role(command.role.as_deref())?.unwrap_or_default();

        match self.users.get_by_email(&email).await {
            Ok(_) => return Err(AuthError::EmailExists),
            Err(AuthError::UserNotFound) => {}
            Err(err) => return Err(err),
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            name: name.to_owned(),
            role,
            password_hash: Some(self.hasher.hash_password(password)?),
            created_at: now,
            updated_at: now,
        };

        self.users.create(&user).await?;
        debug!(user_id = %user.id, role = %user.role, "account created by admin");

        Ok(user.sanitized())
    }

    /// Apply a partial update. Email keeps its normalization and uniqueness
    /// rules; an omitted role is left unchanged.
    pub async fn update(
        &self,
        id: Uuid,
        command: UpdateUserCommand,
    ) -> Result<User> {
        let mut user = self.users.get_by_id(id).await?;

        if let Some(raw) = command.email.as_deref() {
            let email = normalize_email(raw);
            if email.is_empty() {
                return Err(AuthError::validation("email cannot be empty"));
            }
            user.email = email;
        }
        if let Some(name) = command.name.as_deref() {
            user.name = name.trim().to_owned();
        }
        if let Some(role) = parse_optional_role(command.role.as_deref())? {
            user.role = role;
        }
        user.updated_at = Utc::now();

        self.users.update(&user).await?;
        debug!(user_id = %user.id, "account updated by admin");

        Ok(user.sanitized())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.users.delete(id).await?;
        debug!(user_id = %id, "account deleted by admin");
        Ok(())
    }
}

/// Single entry point for role values arriving from outside. Empty or absent
/// means "no role given" and is left to the caller's default.
fn parse_optional_role(raw: Option<&str>) -> Result<Option<Role>> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryUserStore;
    use argon2::ParamsBuilder;

    fn light_hasher() -> CredentialHasher {
        let params = ParamsBuilder::new()
            .m_cost(1024)
            .t_cost(1)
            .p_cost(1)
            .output_len(32)
            .build()
            .unwrap();
        CredentialHasher::with_params(params).unwrap()
    }

    fn service() -> (UserAdminService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        let admin = UserAdminService::new(store.clone(), Arc::new(light_hasher()));
        (admin, store)
    }

    fn command(email: &str, role: Option<&str>) -> CreateUserCommand {
        CreateUserCommand {
            email: email.into(),
            name: "Someone".into(),
            password: "secret1".into(),
            role: role.map(Into::into),
        }
    }

    #[tokio::test]
    async fn create_defaults_role_to_user() {
        let (admin, _) = service();
        let user = admin.create(command("a@example.com", None)).await.unwrap();
        assert_eq!(user.role, Role::User);
        assert!(user.password_hash.is_none());

        let explicit = admin
            .create(command("b@example.com", Some("admin")))
            .await
            .unwrap();
        assert_eq!(explicit.role, Role::Admin);
    }

    #[tokio::test]
    async fn create_rejects_unknown_role() {
        let (admin, _) = service();
        assert!(matches!(
            admin.create(command("a@example.com", Some("root"))).await,
            Err(AuthError::InvalidRole)
        ));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let (admin, _) = service();
        admin.create(command("a@example.com", None)).await.unwrap();
        assert!(matches!(
            admin.create(command(" A@example.com", None)).await,
            Err(AuthError::EmailExists)
        ));
    }

    #[tokio::test]
    async fn list_filters_by_role() {
        let (admin, _) = service();
        admin.create(command("a@example.com", None)).await.unwrap();
        admin
            .create(command("b@example.com", Some("admin")))
            .await
            .unwrap();

        let all = admin.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|u| u.password_hash.is_none()));

        let admins = admin.list(Some("admin")).await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "b@example.com");

        // Blank filter means no filter.
        assert_eq!(admin.list(Some("  ")).await.unwrap().len(), 2);

        assert!(matches!(
            admin.list(Some("wizard")).await,
            Err(AuthError::InvalidRole)
        ));
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let (admin, _) = service();
        admin.create(command("a@example.com", None)).await.unwrap();
        admin.create(command("b@example.com", None)).await.unwrap();
        admin.create(command("c@example.com", None)).await.unwrap();

        let all = admin.list(None).await.unwrap();
        let emails: Vec<_> = all.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["c@example.com", "b@example.com", "a@example.com"]);
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let (admin, store) = service();
        let user = admin.create(command("a@example.com", None)).await.unwrap();

        let updated = admin
            .update(
                user.id,
                UpdateUserCommand {
                    name: Some("Renamed".into()),
                    role: Some("admin".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "a@example.com");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.role, Role::Admin);
        assert!(updated.updated_at >= user.updated_at);

        // Password hash survives a profile update untouched.
        let stored = store.get_by_id(user.id).await.unwrap();
        assert!(stored.password_hash.is_some());
    }

    #[tokio::test]
    async fn update_rejects_bad_inputs() {
        let (admin, _) = service();
        let user = admin.create(command("a@example.com", None)).await.unwrap();

        assert!(matches!(
            admin
                .update(
                    user.id,
                    UpdateUserCommand {
                        email: Some("   ".into()),
                        ..Default::default()
                    },
                )
                .await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            admin
                .update(
                    user.id,
                    UpdateUserCommand {
                        role: Some("owner".into()),
                        ..Default::default()
                    },
                )
                .await,
            Err(AuthError::InvalidRole)
        ));
        assert!(matches!(
            admin
                .update(Uuid::now_v7(), UpdateUserCommand::default())
                .await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn update_rejects_email_taken_by_another_account() {
        let (admin, _) = service();
        admin.create(command("a@example.com", None)).await.unwrap();
        let other = admin.create(command("b@example.com", None)).await.unwrap();

        assert!(matches!(
            admin
                .update(
                    other.id,
                    UpdateUserCommand {
                        email: Some("a@example.com".into()),
                        ..Default::default()
                    },
                )
                .await,
            Err(AuthError::EmailExists)
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_account() {
        let (admin, _) = service();
        let user = admin.create(command("a@example.com", None)).await.unwrap();

        admin.delete(user.id).await.unwrap();
        assert!(matches!(
            admin.get(user.id).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            admin.delete(user.id).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
