use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::access::Role;
use crate::app::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub roles: usize,
    pub sections: usize,
    pub routes: usize,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Health check", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.evaluator.config();
    let roles = Role::ALL
        .iter()
        .filter(|role| config.table.permissions_for(**role).is_some())
        .count();

    Json(HealthResponse {
        status: "ok",
        roles,
        sections: config.navigation.sections.len(),
        routes: config.routes.rules().len(),
    })
}
