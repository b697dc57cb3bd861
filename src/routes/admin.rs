use axum::extract::Path;
use axum::Extension;
use axum::Json;

use crate::models::access::AdminPageResponse;
use crate::session::AuthSession;

/// Guarded back-office entry point. Reaching it means the route guard let
/// the caller through; the page content itself lives in the SPA.
#[utoipa::path(
    get,
    path = "/admin/{path}",
    tag = "Admin",
    params(("path" = String, Path, description = "Back-office route below /admin")),
    responses(
        (status = 200, description = "Access granted", body = AdminPageResponse),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Role lacks the route's permissions"),
    ),
    security(("bearerAuth" = []))
)]
pub async fn enter(Path(path): Path<String>, Extension(session): Extension<AuthSession>) -> Json<AdminPageResponse> {
    Json(AdminPageResponse {
        path: format!("/admin/{path}"),
        role: session.role,
    })
}
