//! Route guard for the back-office routes

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::access::{GuardDecision, RouteGuard};
use crate::app::AppState;
use crate::errors::AppError;
use crate::session::AuthSession;

/// Resolve the caller and their role, then allow or reject the request using
/// the requirement the route registry declares for its path.
pub async fn require_route_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();

    let (auth, role_state, session) = AuthSession::resolve(&parts, &state).await?;
    let decision = RouteGuard::for_path(&state.evaluator, &path).decide(auth, &role_state);

    match decision {
        GuardDecision::Allow => {}
        GuardDecision::RedirectToLogin => {
            return Err(AppError::unauthorized("Authorization header missing"));
        }
        GuardDecision::Denied => {
            tracing::warn!(
                path = %path,
                role = ?role_state.role(),
                user_id = ?session.as_ref().map(|s| s.user_id),
                "route access denied"
            );
            return Err(AppError::forbidden(format!("access to {path} denied")));
        }
        GuardDecision::Pending => {
            return Err(AppError::internal("access decision still pending"));
        }
    }

    if let (Some(session), Some(role)) = (session, role_state.role()) {
        parts.extensions.insert(AuthSession {
            user_id: session.user_id,
            role,
        });
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}
