//! Access API Routes
//!
//! Read-only views of the access configuration for the signed-in caller:
//! filtered navigation, permission checks, the role table and route rules.

use axum::extract::{Path, State};
use axum::Json;

use crate::access::permissions::{MANAGE_SETTINGS, MANAGE_USERS, VIEW_ALL_USERS};
use crate::access::{PermissionGate, Requirement, Role};
use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::access::*;
use crate::session::AuthSession;

fn role_permissions(state: &AppState, role: Role) -> RolePermissions {
    RolePermissions {
        role,
        permissions: state
            .evaluator
            .config()
            .table
            .sorted_permissions(role)
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect(),
    }
}

fn table_viewer_gate() -> PermissionGate {
    PermissionGate::new([MANAGE_SETTINGS, VIEW_ALL_USERS])
}

/// Navigation visible to the caller
#[utoipa::path(
    get,
    path = "/access/navigation",
    tag = "Access",
    responses(
        (status = 200, description = "Filtered navigation", body = NavigationResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearerAuth" = []))
)]
pub async fn navigation(State(state): State<AppState>, auth: AuthSession) -> Json<NavigationResponse> {
    let nav = state.evaluator.accessible_navigation(Some(auth.role));
    Json(NavigationResponse::new(auth.role, nav))
}

/// Evaluate a permission check
#[utoipa::path(
    post,
    path = "/access/check",
    tag = "Access",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Check result", body = CheckResponse),
        (status = 400, description = "Blank permission name"),
        (status = 403, description = "Checking another role requires manage_users"),
    ),
    security(("bearerAuth" = []))
)]
pub async fn check(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<CheckRequest>,
) -> AppResult<Json<CheckResponse>> {
    let role = match req.role.as_deref() {
        None => Some(auth.role),
        Some(name) => {
            let gate = PermissionGate::new(MANAGE_USERS);
            if !gate.allows(&state.evaluator, Some(auth.role)) {
                return Err(AppError::forbidden("checking another role requires manage_users"));
            }
            // Unknown names evaluate as no role and are denied.
            name.parse::<Role>().ok()
        }
    };

    if req.permissions.iter().any(|name| name.trim().is_empty()) {
        return Err(AppError::bad_request("permission names must not be empty"));
    }

    let permissions = req.permissions();
    let allowed = match req.mode {
        CheckMode::Any => state
            .evaluator
            .has_permission(role, Some(&Requirement::AnyOf(permissions))),
        CheckMode::All => state.evaluator.has_all_permissions(role, &permissions),
    };

    Ok(Json(CheckResponse {
        role,
        mode: req.mode,
        allowed,
    }))
}

/// Caller's role and permissions
#[utoipa::path(
    get,
    path = "/access/me",
    tag = "Access",
    responses((status = 200, description = "Current session", body = Profile)),
    security(("bearerAuth" = []))
)]
pub async fn me(State(state): State<AppState>, auth: AuthSession) -> Json<Profile> {
    let RolePermissions { role, permissions } = role_permissions(&state, auth.role);
    Json(Profile {
        user_id: auth.user_id,
        role,
        permissions,
    })
}

/// The whole role table
#[utoipa::path(
    get,
    path = "/access/roles",
    tag = "Access",
    responses(
        (status = 200, description = "Role table", body = Vec<RolePermissions>),
        (status = 403, description = "Requires manage_settings or view_all_users"),
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_roles(State(state): State<AppState>, auth: AuthSession) -> AppResult<Json<Vec<RolePermissions>>> {
    table_viewer_gate()
        .render(&state.evaluator, Some(auth.role), || {
            Json(Role::ALL.iter().map(|role| role_permissions(&state, *role)).collect::<Vec<_>>())
        })
        .ok_or_else(|| AppError::forbidden("viewing the role table requires manage_settings or view_all_users"))
}

/// One role's permissions
#[utoipa::path(
    get,
    path = "/access/roles/{role}",
    tag = "Access",
    params(("role" = String, Path, description = "Role name")),
    responses(
        (status = 200, description = "Role permissions", body = RolePermissions),
        (status = 403, description = "Requires manage_settings or view_all_users"),
        (status = 404, description = "Unknown role"),
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_role(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(name): Path<String>,
) -> AppResult<Json<RolePermissions>> {
    if !table_viewer_gate().allows(&state.evaluator, Some(auth.role)) {
        return Err(AppError::forbidden("viewing the role table requires manage_settings or view_all_users"));
    }

    let role: Role = name
        .parse()
        .map_err(|_| AppError::not_found(format!("role {name} not found")))?;
    Ok(Json(role_permissions(&state, role)))
}

/// Back-office routes the caller may enter
#[utoipa::path(
    get,
    path = "/access/routes",
    tag = "Access",
    responses((status = 200, description = "Accessible routes", body = Vec<RouteRuleView>)),
    security(("bearerAuth" = []))
)]
pub async fn list_routes(State(state): State<AppState>, auth: AuthSession) -> Json<Vec<RouteRuleView>> {
    let routes = state
        .evaluator
        .accessible_routes(Some(auth.role))
        .into_iter()
        .map(RouteRuleView::from)
        .collect();
    Json(routes)
}
