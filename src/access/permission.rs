use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque capability name. Leaf-level: permissions never imply other permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// What a gate, route or menu entry asks for.
///
/// A sequence is satisfied when the role holds *any* of its permissions.
/// Callers that need every permission use
/// [`AccessEvaluator::has_all_permissions`](super::AccessEvaluator::has_all_permissions)
/// instead; the two semantics are never mixed in one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    Single(Permission),
    AnyOf(Vec<Permission>),
}

impl Requirement {
    pub fn any_of(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::AnyOf(permissions.into_iter().collect())
    }

    pub fn permissions(&self) -> &[Permission] {
        match self {
            Requirement::Single(permission) => std::slice::from_ref(permission),
            Requirement::AnyOf(permissions) => permissions,
        }
    }
}

impl From<Permission> for Requirement {
    fn from(value: Permission) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<Permission>> for Requirement {
    fn from(value: Vec<Permission>) -> Self {
        Self::AnyOf(value)
    }
}

impl<const N: usize> From<[Permission; N]> for Requirement {
    fn from(value: [Permission; N]) -> Self {
        Self::AnyOf(value.into())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Single(permission) => write!(f, "{permission}"),
            Requirement::AnyOf(permissions) => {
                let names: Vec<&str> = permissions.iter().map(Permission::as_str).collect();
                write!(f, "any_of[{}]", names.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn static_and_owned_permissions_compare_by_name() {
        let a = Permission::from_static("view_bookings");
        let b = Permission::new("view_bookings".to_string());
        assert_eq!(a, b);

        let set: HashSet<Permission> = [a].into_iter().collect();
        assert!(set.contains(&b));
        assert!(set.contains("view_bookings"));
    }

    #[test]
    fn requirement_deserializes_from_string_or_list() {
        let single: Requirement = serde_json::from_str("\"manage_blogs\"").unwrap();
        assert_eq!(single, Requirement::Single(Permission::from_static("manage_blogs")));

        let many: Requirement = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(many.permissions().len(), 2);
        assert_eq!(many.to_string(), "any_of[a,b]");
    }
}
