use serde::{Deserialize, Serialize};

use super::permission::Requirement;
use super::permissions::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
    pub required: Requirement,
}

impl NavItem {
    pub fn new(title: &str, path: &str, required: impl Into<Requirement>) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
            required: required.into(),
        }
    }
}

/// Sidebar group. `required` lists every permission that unlocks any child item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub icon: String,
    pub required: Requirement,
    pub items: Vec<NavItem>,
}

impl NavSection {
    pub fn new(title: &str, icon: &str, required: impl Into<Requirement>, items: Vec<NavItem>) -> Self {
        Self {
            title: title.to_string(),
            icon: icon.to_string(),
            required: required.into(),
            items,
        }
    }
}

/// Ordered sidebar sections as declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationManifest {
    pub sections: Vec<NavSection>,
}

/// Navigation a role may see: sections and the flat settings list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessibleNavigation {
    pub sections: Vec<NavSection>,
    pub settings: Vec<NavItem>,
}

impl AccessibleNavigation {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.settings.is_empty()
    }
}

impl NavigationManifest {
    pub fn new(sections: Vec<NavSection>) -> Self {
        Self { sections }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            NavSection::new(
                "Dashboard",
                "layout-dashboard",
                [VIEW_DASHBOARD, VIEW_REPORTS],
                vec![
                    NavItem::new("Overview", "/admin/dashboard", VIEW_DASHBOARD),
                    NavItem::new("Reports", "/admin/reports", VIEW_REPORTS),
                ],
            ),
            NavSection::new(
                "Users & Management",
                "users",
                [VIEW_ALL_USERS, MANAGE_STAFF],
                vec![
                    NavItem::new("All Users", "/admin/users", VIEW_ALL_USERS),
                    NavItem::new("Staff", "/admin/staff", MANAGE_STAFF),
                ],
            ),
            NavSection::new(
                "Customers",
                "contact",
                [VIEW_CUSTOMERS, MANAGE_CUSTOMERS],
                vec![NavItem::new("Customers", "/admin/customers", [VIEW_CUSTOMERS, MANAGE_CUSTOMERS])],
            ),
            NavSection::new(
                "Bookings & Invoices",
                "calendar-check",
                [VIEW_BOOKINGS, MANAGE_BOOKINGS, VIEW_INVOICES, MANAGE_INVOICES],
                vec![
                    NavItem::new("Bookings", "/admin/bookings", [VIEW_BOOKINGS, MANAGE_BOOKINGS]),
                    NavItem::new("Invoices", "/admin/invoices", [VIEW_INVOICES, MANAGE_INVOICES]),
                ],
            ),
            NavSection::new(
                "Content",
                "globe",
                [MANAGE_DESTINATIONS, MANAGE_VISAS, MANAGE_BLOGS, MANAGE_GALLERY],
                vec![
                    NavItem::new("Destinations", "/admin/destinations", MANAGE_DESTINATIONS),
                    NavItem::new("Visas", "/admin/visas", MANAGE_VISAS),
                    NavItem::new("Blogs", "/admin/blogs", MANAGE_BLOGS),
                    NavItem::new("Gallery", "/admin/gallery", MANAGE_GALLERY),
                ],
            ),
            NavSection::new(
                "Marketing",
                "mail",
                MANAGE_NEWSLETTER,
                vec![NavItem::new("Newsletter", "/admin/newsletter", MANAGE_NEWSLETTER)],
            ),
        ])
    }

    /// Every item across all sections, in declaration order.
    pub fn items(&self) -> impl Iterator<Item = &NavItem> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }
}

pub fn builtin_settings() -> Vec<NavItem> {
    vec![
        NavItem::new("Profile", "/admin/settings/profile", VIEW_DASHBOARD),
        NavItem::new("General", "/admin/settings/general", MANAGE_SETTINGS),
        NavItem::new(
            "Roles & Permissions",
            "/admin/settings/roles",
            Requirement::any_of([MANAGE_USERS, MANAGE_SETTINGS]),
        ),
    ]
}
