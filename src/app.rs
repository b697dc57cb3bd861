use std::sync::Arc;

use axum::http::Method;
use axum::middleware;
use axum::routing::{any, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::access::AccessEvaluator;
use crate::config::AccessConfig;
use crate::errors::AppError;
use crate::jwt::JwtConfig;
use crate::middleware::require_route_access;
use crate::routes::{access, admin, health};
use crate::session::{ClaimsRoleSource, RoleSource};

#[derive(Clone)]
pub struct AppState {
    pub evaluator: AccessEvaluator,
    pub jwt: Arc<JwtConfig>,
    pub roles: Arc<dyn RoleSource>,
}

impl AppState {
    pub fn new(config: AccessConfig, jwt: JwtConfig) -> Self {
        Self::with_role_source(config, jwt, Arc::new(ClaimsRoleSource))
    }

    pub fn with_role_source(config: AccessConfig, jwt: JwtConfig, roles: Arc<dyn RoleSource>) -> Self {
        Self {
            evaluator: AccessEvaluator::new(config),
            jwt: Arc::new(jwt),
            roles,
        }
    }
}

pub async fn create_app(config: AccessConfig) -> Result<Router, AppError> {
    let jwt_config = JwtConfig::from_env()?;
    Ok(router(AppState::new(config, jwt_config)))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let access_routes = Router::new()
        .route("/navigation", get(access::navigation))
        .route("/check", post(access::check))
        .route("/me", get(access::me))
        .route("/roles", get(access::list_roles))
        .route("/roles/:role", get(access::get_role))
        .route("/routes", get(access::list_routes));

    let admin_routes = Router::new()
        .route("/admin/*path", any(admin::enter))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_route_access));

    Router::new()
        .route("/api/health", get(health::health))
        .nest("/access", access_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
