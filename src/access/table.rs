use std::collections::{HashMap, HashSet};

use super::permission::Permission;
use super::permissions::*;
use super::role::Role;
use crate::errors::{AppError, AppResult};

/// Role → permission set. The only place a permission is ever granted.
#[derive(Debug, Clone)]
pub struct RolePermissionTable {
    entries: HashMap<Role, HashSet<Permission>>,
}

impl RolePermissionTable {
    /// Build a table, requiring an entry (possibly empty) for every role.
    pub fn from_entries<I, P>(entries: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let entries: HashMap<Role, HashSet<Permission>> = entries
            .into_iter()
            .map(|(role, perms)| (role, perms.into_iter().collect()))
            .collect();

        let missing: Vec<&str> = Role::ALL
            .iter()
            .filter(|role| !entries.contains_key(role))
            .map(Role::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::configuration(format!(
                "role table has no entry for: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { entries })
    }

    /// Parse role names from configuration. Unknown names are rejected, and so
    /// are two names that parse to the same role (`admin` and `Admin`).
    pub fn from_named<I>(named: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, Vec<Permission>)>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (name, perms) in named {
            let role: Role = name
                .parse()
                .map_err(|err: super::role::UnknownRole| AppError::configuration(err.to_string()))?;
            if !seen.insert(role) {
                return Err(AppError::configuration(format!(
                    "duplicate entry for role {role} (`{name}`)"
                )));
            }
            entries.push((role, perms));
        }
        Self::from_entries(entries)
    }

    pub fn builtin() -> Self {
        let admin = vec![
            VIEW_DASHBOARD,
            VIEW_ALL_USERS,
            MANAGE_USERS,
            MANAGE_STAFF,
            VIEW_CUSTOMERS,
            MANAGE_CUSTOMERS,
            VIEW_BOOKINGS,
            MANAGE_BOOKINGS,
            VIEW_INVOICES,
            MANAGE_INVOICES,
            MANAGE_DESTINATIONS,
            MANAGE_VISAS,
            MANAGE_BLOGS,
            MANAGE_GALLERY,
            MANAGE_NEWSLETTER,
            VIEW_REPORTS,
            MANAGE_SETTINGS,
        ];
        let moderator = vec![
            VIEW_DASHBOARD,
            VIEW_CUSTOMERS,
            VIEW_BOOKINGS,
            MANAGE_DESTINATIONS,
            MANAGE_VISAS,
            MANAGE_BLOGS,
            MANAGE_GALLERY,
            MANAGE_NEWSLETTER,
        ];
        let employee = vec![
            VIEW_DASHBOARD,
            VIEW_CUSTOMERS,
            VIEW_BOOKINGS,
            MANAGE_BOOKINGS,
            VIEW_INVOICES,
        ];

        let entries = [
            (Role::Admin, admin),
            (Role::Moderator, moderator),
            (Role::Employee, employee),
            (Role::Customer, Vec::new()),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(role, perms)| (role, perms.into_iter().collect()))
                .collect(),
        }
    }

    pub fn permissions_for(&self, role: Role) -> Option<&HashSet<Permission>> {
        self.entries.get(&role)
    }

    pub fn grants(&self, role: Role, permission: &Permission) -> bool {
        self.permissions_for(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }

    /// Permissions of `role` in name order, for stable output.
    pub fn sorted_permissions(&self, role: Role) -> Vec<&Permission> {
        let mut perms: Vec<&Permission> = self
            .permissions_for(role)
            .map(|set| set.iter().collect())
            .unwrap_or_default();
        perms.sort();
        perms
    }
}
