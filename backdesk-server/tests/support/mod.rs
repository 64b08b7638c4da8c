//! Shared wiring for the integration tests: the real router served by
//! `axum_test::TestServer`, backed by the in-memory store so no database is
//! required.

// Each test binary compiles this module on its own; not every binary
// touches every helper.
#![allow(dead_code)]

use std::sync::Arc;

use argon2::ParamsBuilder;
use axum_test::TestServer;
use backdesk_core::{
    Role, User,
    admin::UserAdminService,
    auth::{AuthService, CredentialHasher, TokenCodec, TokenSettings},
    catalog::CatalogService,
    store::{
        UserStore,
        memory::{MemoryProductStore, MemoryUserStore},
    },
};
use backdesk_server::{routes::create_router, state::AppState};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

pub const TEST_ISSUER: &str = "backdesk-test";

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// A running application instance plus direct handles to its store and
/// hasher for seeding fixtures past the HTTP surface.
pub struct TestApp {
    pub server: TestServer,
    users: Arc<MemoryUserStore>,
    hasher: Arc<CredentialHasher>,
    tokens: Arc<TokenCodec>,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::spawn_with_lifetime(Duration::hours(1))
    }

    /// Spawn with a chosen token lifetime; a negative lifetime mints tokens
    /// that are already expired.
    pub fn spawn_with_lifetime(lifetime: Duration) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let products = Arc::new(MemoryProductStore::new());

        // Minimal Argon2 cost so the suite stays fast.
        let params = ParamsBuilder::new()
            .m_cost(1024)
            .t_cost(1)
            .p_cost(1)
            .build()
            .unwrap();
        let hasher = Arc::new(CredentialHasher::with_params(params).unwrap());

        let tokens = Arc::new(
            TokenCodec::new(TokenSettings {
                secret: "integration-test-secret".to_string(),
                issuer: TEST_ISSUER.to_string(),
                lifetime,
            })
            .unwrap(),
        );

        let state = AppState::new(
            Arc::new(AuthService::new(
                users.clone(),
                hasher.clone(),
                tokens.clone(),
            )),
            Arc::new(UserAdminService::new(users.clone(), hasher.clone())),
            Arc::new(CatalogService::new(products)),
        );

        let server = TestServer::new(create_router(state, &["*".to_string()])).unwrap();

        Self {
            server,
            users,
            hasher,
            tokens,
        }
    }

    /// Insert an account directly into the store, bypassing registration.
    /// This is how admin fixtures come to exist: there is no HTTP path that
    /// creates the first admin.
    pub async fn seed_user(&self, email: &str, password: &str, role: Role) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email: email.to_string(),
            name: "Test Account".to_string(),
            role,
            password_hash: Some(self.hasher.hash_password(password).unwrap()),
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await.unwrap();
        user
    }

    /// Log in over HTTP and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status_code(), 200, "login failed: {}", response.text());
        response.json::<serde_json::Value>()["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Mint a token for an arbitrary subject without going through login.
    pub fn issue_token(&self, subject: Uuid) -> String {
        self.tokens.issue(subject).unwrap()
    }
}
