use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::access::{AccessibleNavigation, NavItem, NavSection, Permission, Requirement, Role, RouteRule};

fn names(required: &Requirement) -> Vec<String> {
    required.permissions().iter().map(|p| p.as_str().to_string()).collect()
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NavItemView {
    #[schema(example = "Bookings")]
    pub title: String,
    #[schema(example = "/admin/bookings")]
    pub path: String,
}

impl From<NavItem> for NavItemView {
    fn from(item: NavItem) -> Self {
        NavItemView {
            title: item.title,
            path: item.path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NavSectionView {
    #[schema(example = "Bookings & Invoices")]
    pub title: String,
    #[schema(example = "calendar-check")]
    pub icon: String,
    pub items: Vec<NavItemView>,
}

impl From<NavSection> for NavSectionView {
    fn from(section: NavSection) -> Self {
        NavSectionView {
            title: section.title,
            icon: section.icon,
            items: section.items.into_iter().map(NavItemView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NavigationResponse {
    pub role: Role,
    pub sections: Vec<NavSectionView>,
    pub settings: Vec<NavItemView>,
}

impl NavigationResponse {
    pub fn new(role: Role, nav: AccessibleNavigation) -> Self {
        NavigationResponse {
            role,
            sections: nav.sections.into_iter().map(NavSectionView::from).collect(),
            settings: nav.settings.into_iter().map(NavItemView::from).collect(),
        }
    }
}

// =============================================================================
// CHECKS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Allowed when any listed permission is held
    #[default]
    Any,
    /// Allowed only when every listed permission is held
    All,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckRequest {
    #[schema(example = json!(["view_customers", "manage_users"]))]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub mode: CheckMode,
    /// Evaluate for another role instead of the caller's (requires `manage_users`)
    #[serde(default)]
    #[schema(example = "employee")]
    pub role: Option<String>,
}

impl CheckRequest {
    pub fn permissions(&self) -> Vec<Permission> {
        self.permissions.iter().map(|p| Permission::new(p.as_str())).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckResponse {
    /// Role the check ran against; absent when the requested role is unknown
    pub role: Option<Role>,
    pub mode: CheckMode,
    pub allowed: bool,
}

// =============================================================================
// ROLES
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub user_id: Uuid,
    pub role: Role,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RolePermissions {
    pub role: Role,
    pub permissions: Vec<String>,
}

// =============================================================================
// ROUTES
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RouteRuleView {
    #[schema(example = "/admin/invoices")]
    pub path: String,
    /// Any of these permissions opens the route
    pub permissions: Vec<String>,
}

impl From<&RouteRule> for RouteRuleView {
    fn from(rule: &RouteRule) -> Self {
        RouteRuleView {
            path: rule.path.clone(),
            permissions: names(&rule.required),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminPageResponse {
    pub path: String,
    pub role: Role,
}
