use std::sync::Arc;

use super::navigation::{AccessibleNavigation, NavItem, NavSection};
use super::permission::{Permission, Requirement};
use super::registry::RouteRule;
use super::role::Role;
use crate::config::AccessConfig;

/// Access decisions over the immutable access configuration.
///
/// Every gate in the crate (route guard, component gate, HTTP handlers)
/// goes through [`AccessEvaluator::has_permission`]. All checks fail closed:
/// a missing role, a missing requirement, an empty requirement or a role
/// with no table entry is a denial, never an error.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    config: Arc<AccessConfig>,
}

impl AccessEvaluator {
    pub fn new(config: AccessConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Any-of check: true when `role` holds at least one required permission.
    pub fn has_permission(&self, role: Option<Role>, required: Option<&Requirement>) -> bool {
        let (role, required) = match (role, required) {
            (Some(role), Some(required)) => (role, required),
            _ => {
                tracing::debug!(role = ?role, "permission denied: missing role or requirement");
                return false;
            }
        };

        let allowed = required
            .permissions()
            .iter()
            .any(|permission| self.config.table.grants(role, permission));

        tracing::debug!(role = %role, required = %required, allowed, "permission check");
        allowed
    }

    /// All-of check for gates that need every listed permission. Empty is a denial.
    pub fn has_all_permissions(&self, role: Option<Role>, required: &[Permission]) -> bool {
        let Some(role) = role else {
            return false;
        };
        if required.is_empty() {
            return false;
        }

        let allowed = required
            .iter()
            .all(|permission| self.config.table.grants(role, permission));

        tracing::debug!(role = %role, count = required.len(), allowed, "all-of permission check");
        allowed
    }

    /// Sections and settings entries visible to `role`, in declaration order.
    /// Sections left without items are dropped.
    pub fn accessible_navigation(&self, role: Option<Role>) -> AccessibleNavigation {
        let sections = self
            .config
            .navigation
            .sections
            .iter()
            .filter(|section| self.has_permission(role, Some(&section.required)))
            .filter_map(|section| {
                let items = self.accessible_items(role, &section.items);
                if items.is_empty() {
                    return None;
                }
                Some(NavSection {
                    items,
                    ..section.clone()
                })
            })
            .collect();

        AccessibleNavigation {
            sections,
            settings: self.accessible_items(role, &self.config.settings),
        }
    }

    fn accessible_items(&self, role: Option<Role>, items: &[NavItem]) -> Vec<NavItem> {
        items
            .iter()
            .filter(|item| self.has_permission(role, Some(&item.required)))
            .cloned()
            .collect()
    }

    /// Requirement guarding `path`, if the route registry declares one.
    pub fn route_requirement(&self, path: &str) -> Option<&Requirement> {
        self.config.routes.lookup(path).map(|rule| &rule.required)
    }

    /// Route rules `role` may enter.
    pub fn accessible_routes(&self, role: Option<Role>) -> Vec<&RouteRule> {
        self.config
            .routes
            .rules()
            .iter()
            .filter(|rule| self.has_permission(role, Some(&rule.required)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::navigation::NavigationManifest;
    use crate::access::permissions::*;
    use crate::access::registry::RouteRegistry;
    use crate::access::table::RolePermissionTable;

    fn evaluator() -> AccessEvaluator {
        AccessEvaluator::new(AccessConfig::builtin())
    }

    fn any(perms: &[Permission]) -> Requirement {
        Requirement::AnyOf(perms.to_vec())
    }

    #[test]
    fn every_table_permission_is_granted_to_its_role() {
        let eval = evaluator();
        for role in Role::ALL {
            for permission in eval.config().table.sorted_permissions(role) {
                let required = Requirement::Single(permission.clone());
                assert!(eval.has_permission(Some(role), Some(&required)), "{role} lacks {permission}");
            }
        }
    }

    #[test]
    fn empty_permission_set_denies_everything() {
        let eval = evaluator();
        for permission in eval.config().table.sorted_permissions(Role::Admin) {
            let required = any(&[permission.clone()]);
            assert!(!eval.has_permission(Some(Role::Customer), Some(&required)));
        }
    }

    #[test]
    fn missing_inputs_fail_closed() {
        let eval = evaluator();
        assert!(!eval.has_permission(None, Some(&any(&[MANAGE_USERS]))));
        assert!(!eval.has_permission(Some(Role::Admin), None));
        assert!(!eval.has_permission(Some(Role::Admin), Some(&any(&[]))));
    }

    #[test]
    fn sequence_is_any_of() {
        let eval = evaluator();
        assert!(!eval.has_permission(Some(Role::Employee), Some(&any(&[MANAGE_USERS]))));
        assert!(eval.has_permission(
            Some(Role::Employee),
            Some(&any(&[VIEW_CUSTOMERS, MANAGE_USERS]))
        ));
        assert!(eval.has_permission(
            Some(Role::Employee),
            Some(&any(&[MANAGE_USERS, VIEW_CUSTOMERS]))
        ));
    }

    #[test]
    fn unknown_permission_names_are_denied() {
        let eval = evaluator();
        let required = Requirement::Single(Permission::new("fly_the_plane"));
        assert!(!eval.has_permission(Some(Role::Admin), Some(&required)));
    }

    #[test]
    fn all_of_requires_every_permission() {
        let eval = evaluator();
        assert!(eval.has_all_permissions(Some(Role::Employee), &[VIEW_CUSTOMERS, VIEW_BOOKINGS]));
        assert!(!eval.has_all_permissions(Some(Role::Employee), &[VIEW_CUSTOMERS, MANAGE_USERS]));
        assert!(!eval.has_all_permissions(Some(Role::Admin), &[]));
        assert!(!eval.has_all_permissions(None, &[VIEW_DASHBOARD]));
    }

    #[test]
    fn admin_keeps_users_section_in_order() {
        let nav = evaluator().accessible_navigation(Some(Role::Admin));
        let section = nav
            .sections
            .iter()
            .find(|s| s.title == "Users & Management")
            .expect("admin sees users section");
        let titles: Vec<&str> = section.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["All Users", "Staff"]);
    }

    #[test]
    fn customer_gets_empty_navigation() {
        let nav = evaluator().accessible_navigation(Some(Role::Customer));
        assert!(nav.sections.is_empty());
        assert!(nav.settings.is_empty());
        assert!(evaluator().accessible_navigation(None).is_empty());
    }

    #[test]
    fn navigation_never_has_empty_sections_and_keeps_section_and_item_order() {
        let eval = evaluator();
        let declared: Vec<&str> = eval
            .config()
            .navigation
            .sections
            .iter()
            .map(|s| s.title.as_str())
            .collect();

        for role in Role::ALL {
            let nav = eval.accessible_navigation(Some(role));
            assert!(nav.sections.iter().all(|s| !s.items.is_empty()), "{role}");

            let positions: Vec<usize> = nav
                .sections
                .iter()
                .map(|s| declared.iter().position(|d| *d == s.title).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{role}: {positions:?}");

            for section in &nav.sections {
                let declared_items: Vec<&str> = eval
                    .config()
                    .navigation
                    .sections
                    .iter()
                    .find(|s| s.title == section.title)
                    .unwrap()
                    .items
                    .iter()
                    .map(|i| i.path.as_str())
                    .collect();
                let item_positions: Vec<usize> = section
                    .items
                    .iter()
                    .map(|i| declared_items.iter().position(|d| *d == i.path).unwrap())
                    .collect();
                assert!(
                    item_positions.windows(2).all(|w| w[0] < w[1]),
                    "{role} / {}: {item_positions:?}",
                    section.title
                );
            }

            let declared_settings: Vec<&str> = eval.config().settings.iter().map(|i| i.path.as_str()).collect();
            let setting_positions: Vec<usize> = nav
                .settings
                .iter()
                .map(|i| declared_settings.iter().position(|d| *d == i.path).unwrap())
                .collect();
            assert!(setting_positions.windows(2).all(|w| w[0] < w[1]), "{role}: {setting_positions:?}");
        }
    }

    #[test]
    fn section_passing_its_own_check_but_no_items_is_dropped() {
        let navigation = NavigationManifest::new(vec![
            NavSection::new(
                "Bookings",
                "calendar",
                [VIEW_BOOKINGS, MANAGE_INVOICES],
                vec![NavItem::new("Invoices", "/admin/invoices", MANAGE_INVOICES)],
            ),
            NavSection::new(
                "Customers",
                "contact",
                VIEW_CUSTOMERS,
                vec![NavItem::new("Customers", "/admin/customers", VIEW_CUSTOMERS)],
            ),
        ]);
        let config = AccessConfig {
            table: RolePermissionTable::builtin(),
            routes: RouteRegistry::from_navigation(&navigation, &[]),
            navigation,
            settings: Vec::new(),
        };
        let nav = AccessEvaluator::new(config).accessible_navigation(Some(Role::Employee));
        let titles: Vec<&str> = nav.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Customers"]);
    }

    #[test]
    fn employee_navigation_filters_items_within_sections() {
        let nav = evaluator().accessible_navigation(Some(Role::Employee));
        let dashboard = &nav.sections[0];
        assert_eq!(dashboard.title, "Dashboard");
        let titles: Vec<&str> = dashboard.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Overview"]);

        let settings: Vec<&str> = nav.settings.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(settings, vec!["Profile"]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let eval = evaluator();
        let required = any(&[VIEW_CUSTOMERS, MANAGE_USERS]);
        for role in Role::ALL {
            assert_eq!(
                eval.has_permission(Some(role), Some(&required)),
                eval.has_permission(Some(role), Some(&required))
            );
            assert_eq!(eval.accessible_navigation(Some(role)), eval.accessible_navigation(Some(role)));
        }
    }

    #[test]
    fn routes_follow_the_registry() {
        let eval = evaluator();
        assert!(eval.route_requirement("/admin/users/7").is_some());
        assert!(eval.route_requirement("/admin/nowhere").is_none());

        let employee: Vec<&str> = eval
            .accessible_routes(Some(Role::Employee))
            .iter()
            .map(|r| r.path.as_str())
            .collect();
        assert!(employee.contains(&"/admin/bookings"));
        assert!(!employee.contains(&"/admin/users"));
        assert!(eval.accessible_routes(Some(Role::Customer)).is_empty());
    }
}
