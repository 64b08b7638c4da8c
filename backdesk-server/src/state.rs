use std::{fmt, sync::Arc};

use backdesk_core::{
    admin::UserAdminService,
    auth::AuthService,
    catalog::CatalogService,
};

/// Shared handler state: the three domain services, each already wired to
/// its store.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub admin: Arc<UserAdminService>,
    pub catalog: Arc<CatalogService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        admin: Arc<UserAdminService>,
        catalog: Arc<CatalogService>,
    ) -> Self {
        Self {
            auth,
            admin,
            catalog,
        }
    }
}
