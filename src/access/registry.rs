use serde::{Deserialize, Serialize};

use super::navigation::{NavItem, NavigationManifest};
use super::permission::Requirement;

/// Back-office route declaration: a path prefix and what it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub path: String,
    pub required: Requirement,
}

impl RouteRule {
    pub fn new(path: impl Into<String>, required: impl Into<Requirement>) -> Self {
        Self {
            path: path.into(),
            required: required.into(),
        }
    }

    /// `path` itself or anything below it, on segment boundaries.
    fn matches(&self, path: &str) -> bool {
        let prefix = self.path.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteRegistry {
    rules: Vec<RouteRule>,
}

impl RouteRegistry {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// One rule per navigation and settings entry, so routes and menus agree.
    pub fn from_navigation(manifest: &NavigationManifest, settings: &[NavItem]) -> Self {
        let rules = manifest
            .items()
            .chain(settings.iter())
            .map(|item| RouteRule::new(item.path.clone(), item.required.clone()))
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Most specific rule covering `path`; `None` means the path is not declared.
    pub fn lookup(&self, path: &str) -> Option<&RouteRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .max_by_key(|rule| rule.path.trim_end_matches('/').len())
    }
}
