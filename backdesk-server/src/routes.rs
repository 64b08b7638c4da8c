//! Route table: public authentication endpoints, authenticated self-service
//! and catalog routes, and the admin-gated account management group.

use axum::{
    Router, middleware,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{self, admin, auth, products, users},
    middleware::{admin_middleware, auth_middleware},
    state::AppState,
};

/// Assemble the full application router.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/renew", post(auth::renew))
        .merge(create_protected_routes(state.clone()))
        .merge(create_admin_routes(state.clone()))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Routes that require a valid bearer token.
fn create_protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/users/change-password", post(users::change_password))
        .route(
            "/users/me/role",
            get(users::my_role)
                .put(users::update_my_role)
                .patch(users::update_my_role),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Routes that additionally require the admin role. The authentication layer
/// is added after the admin gate so it runs first and populates the account
/// extension the gate reads.
fn create_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/admin/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .patch(admin::update_user)
                .delete(admin::delete_user),
        )
        .route(
            "/admin/users/{id}/role",
            get(admin::get_user_role)
                .put(admin::set_user_role)
                .patch(admin::set_user_role)
                .delete(admin::reset_user_role),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
