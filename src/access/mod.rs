//! Access control - role table, navigation filtering and gates
//!
//! This module implements the back-office RBAC model:
//! - One closed `Role` per session, looked up in a static role→permission table
//! - Any-of permission checks (plus an explicit all-of variant)
//! - Navigation and route filtering by role
//! - Route guard and component gate helpers built on the same check

mod evaluator;
mod gate;
mod guard;
mod navigation;
mod permission;
mod registry;
mod role;
mod table;

pub use evaluator::AccessEvaluator;
pub use gate::PermissionGate;
pub use guard::{GuardDecision, RouteGuard};
pub use navigation::{builtin_settings, AccessibleNavigation, NavItem, NavSection, NavigationManifest};
pub use permission::{Permission, Requirement};
pub use registry::{RouteRegistry, RouteRule};
pub use role::{Role, UnknownRole};
pub use table::RolePermissionTable;

/// Well-known permission names
pub mod permissions {
    use super::Permission;

    pub const VIEW_DASHBOARD: Permission = Permission::from_static("view_dashboard");
    pub const VIEW_REPORTS: Permission = Permission::from_static("view_reports");

    // Users and staff
    pub const VIEW_ALL_USERS: Permission = Permission::from_static("view_all_users");
    pub const MANAGE_USERS: Permission = Permission::from_static("manage_users");
    pub const MANAGE_STAFF: Permission = Permission::from_static("manage_staff");

    // Customers
    pub const VIEW_CUSTOMERS: Permission = Permission::from_static("view_customers");
    pub const MANAGE_CUSTOMERS: Permission = Permission::from_static("manage_customers");

    // Bookings and invoices
    pub const VIEW_BOOKINGS: Permission = Permission::from_static("view_bookings");
    pub const MANAGE_BOOKINGS: Permission = Permission::from_static("manage_bookings");
    pub const VIEW_INVOICES: Permission = Permission::from_static("view_invoices");
    pub const MANAGE_INVOICES: Permission = Permission::from_static("manage_invoices");

    // Site content
    pub const MANAGE_DESTINATIONS: Permission = Permission::from_static("manage_destinations");
    pub const MANAGE_VISAS: Permission = Permission::from_static("manage_visas");
    pub const MANAGE_BLOGS: Permission = Permission::from_static("manage_blogs");
    pub const MANAGE_GALLERY: Permission = Permission::from_static("manage_gallery");
    pub const MANAGE_NEWSLETTER: Permission = Permission::from_static("manage_newsletter");

    pub const MANAGE_SETTINGS: Permission = Permission::from_static("manage_settings");
}
