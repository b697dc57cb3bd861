use super::evaluator::AccessEvaluator;
use super::permission::Requirement;
use crate::session::{AuthState, RoleState};

/// Outcome of guarding a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Authentication or role still resolving: show neither content nor denial.
    Pending,
    RedirectToLogin,
    Denied,
    Allow,
}

/// Route guard bound to one route's requirement.
#[derive(Debug, Clone)]
pub struct RouteGuard<'a> {
    evaluator: &'a AccessEvaluator,
    required: Option<&'a Requirement>,
}

impl<'a> RouteGuard<'a> {
    pub fn new(evaluator: &'a AccessEvaluator, required: Option<&'a Requirement>) -> Self {
        Self { evaluator, required }
    }

    /// Guard for `path` using the route registry.
    pub fn for_path(evaluator: &'a AccessEvaluator, path: &str) -> Self {
        Self::new(evaluator, evaluator.route_requirement(path))
    }

    pub fn decide(&self, auth: AuthState, role: &RoleState) -> GuardDecision {
        match auth {
            AuthState::Resolving => GuardDecision::Pending,
            AuthState::Anonymous => GuardDecision::RedirectToLogin,
            AuthState::Authenticated => match role {
                RoleState::Unresolved => GuardDecision::Pending,
                RoleState::Failed => GuardDecision::Denied,
                RoleState::Resolved(role) => {
                    if self.evaluator.has_permission(Some(*role), self.required) {
                        GuardDecision::Allow
                    } else {
                        GuardDecision::Denied
                    }
                }
            },
        }
    }
}
