use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::access::Role;
use crate::app::AppState;
use crate::errors::AppError;
use crate::jwt::Claims;

/// Whether the caller's identity is known yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Resolving,
    Anonymous,
    Authenticated,
}

/// The caller's role as seen while it is being fetched.
///
/// `Unresolved` is distinct from any role: a pending fetch neither grants
/// nor denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleState {
    #[default]
    Unresolved,
    Resolved(Role),
    Failed,
}

impl RoleState {
    pub fn role(&self) -> Option<Role> {
        match self {
            RoleState::Resolved(role) => Some(*role),
            RoleState::Unresolved | RoleState::Failed => None,
        }
    }
}

impl<E> From<Result<Role, E>> for RoleState {
    fn from(value: Result<Role, E>) -> Self {
        match value {
            Ok(role) => RoleState::Resolved(role),
            Err(_) => RoleState::Failed,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RoleResolutionError {
    #[error("session carries no role")]
    Missing,
    #[error("session role is not recognised: {0}")]
    Unknown(String),
    #[error("role lookup failed: {0}")]
    Backend(String),
}

/// Decoded bearer token, before role resolution.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub role_claim: Option<String>,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role_claim: claims.role,
        }
    }
}

/// Where a session's role comes from.
#[async_trait]
pub trait RoleSource: Send + Sync {
    async fn resolve(&self, session: &Session) -> Result<Role, RoleResolutionError>;
}

/// Reads the role straight from the token's `role` claim.
#[derive(Debug, Clone, Default)]
pub struct ClaimsRoleSource;

#[async_trait]
impl RoleSource for ClaimsRoleSource {
    async fn resolve(&self, session: &Session) -> Result<Role, RoleResolutionError> {
        let claim = session.role_claim.as_deref().ok_or(RoleResolutionError::Missing)?;
        claim
            .parse()
            .map_err(|_| RoleResolutionError::Unknown(claim.to_string()))
    }
}

/// Authenticated caller with a resolved role.
#[derive(Debug, Clone, Copy)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthSession {
    /// Validate the bearer token in `parts` and resolve its role.
    ///
    /// Returns the authentication state and role state so guards can decide
    /// on both; a missing header is `Anonymous`, a bad token is an error.
    pub async fn resolve(parts: &Parts, state: &AppState) -> Result<(AuthState, RoleState, Option<Session>), AppError> {
        let Some(token) = bearer_token(parts) else {
            return Ok((AuthState::Anonymous, RoleState::Unresolved, None));
        };

        let session: Session = state.jwt.decode(token)?.into();
        let resolved = state.roles.resolve(&session).await;
        if let Err(err) = &resolved {
            tracing::warn!(user_id = %session.user_id, error = %err, "role resolution failed");
        }

        Ok((AuthState::Authenticated, resolved.into(), Some(session)))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AuthSession>() {
            return Ok(*session);
        }

        let (_, role_state, session) = AuthSession::resolve(parts, state).await?;
        let session = session.ok_or_else(|| AppError::unauthorized("Authorization header missing"))?;
        let role = role_state
            .role()
            .ok_or_else(|| AppError::forbidden("session role could not be resolved"))?;

        Ok(AuthSession {
            user_id: session.user_id,
            role,
        })
    }
}
