use super::evaluator::AccessEvaluator;
use super::permission::Requirement;
use super::role::Role;

/// Shows guarded content only to roles that pass the requirement.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    required: Requirement,
    role_override: Option<Role>,
}

impl PermissionGate {
    pub fn new(required: impl Into<Requirement>) -> Self {
        Self {
            required: required.into(),
            role_override: None,
        }
    }

    /// Evaluate for `role` instead of the caller's current role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role_override = Some(role);
        self
    }

    pub fn allows(&self, evaluator: &AccessEvaluator, current: Option<Role>) -> bool {
        evaluator.has_permission(self.role_override.or(current), Some(&self.required))
    }

    /// `Some(content)` when allowed, otherwise nothing.
    pub fn render<T>(&self, evaluator: &AccessEvaluator, current: Option<Role>, content: impl FnOnce() -> T) -> Option<T> {
        self.allows(evaluator, current).then(content)
    }

    pub fn render_or<T>(
        &self,
        evaluator: &AccessEvaluator,
        current: Option<Role>,
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.allows(evaluator, current) {
            content()
        } else {
            fallback()
        }
    }
}
