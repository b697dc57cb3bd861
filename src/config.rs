use std::fmt;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::access::{
    builtin_settings, NavItem, NavSection, NavigationManifest, Permission, Requirement, Role, RolePermissionTable,
    RouteRegistry, RouteRule,
};
use crate::errors::{AppError, AppResult};

/// Immutable access configuration, built once at startup and shared.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    pub table: RolePermissionTable,
    pub navigation: NavigationManifest,
    pub settings: Vec<NavItem>,
    pub routes: RouteRegistry,
}

/// On-disk form. Only `roles` is mandatory; the rest falls back to built-ins.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AccessConfigFile {
    #[serde(deserialize_with = "deserialize_role_entries")]
    roles: Vec<(String, Vec<Permission>)>,
    #[serde(default)]
    navigation: Option<Vec<NavSection>>,
    #[serde(default)]
    settings: Option<Vec<NavItem>>,
    #[serde(default)]
    routes: Option<Vec<RouteRule>>,
}

/// `roles` keeps every key in file order; a key written twice is an error
/// rather than the last one silently winning.
fn deserialize_role_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<Permission>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RoleEntriesVisitor;

    impl<'de> Visitor<'de> for RoleEntriesVisitor {
        type Value = Vec<(String, Vec<Permission>)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of role names to permission lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries: Self::Value = Vec::new();
            while let Some(name) = map.next_key::<String>()? {
                if entries.iter().any(|(seen, _)| *seen == name) {
                    return Err(de::Error::custom(format_args!("duplicate role `{name}`")));
                }
                let permissions = map.next_value()?;
                entries.push((name, permissions));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(RoleEntriesVisitor)
}

fn grants_any(table: &RolePermissionTable, role: Role, required: &Requirement) -> bool {
    required.permissions().iter().any(|permission| table.grants(role, permission))
}

/// Routes derived from the menu only carry the item requirement, so every
/// role that passes an item must also pass its section.
fn check_menu_agreement(table: &RolePermissionTable, navigation: &NavigationManifest) -> AppResult<()> {
    for section in &navigation.sections {
        for role in Role::ALL {
            if grants_any(table, role, &section.required) {
                continue;
            }
            if let Some(item) = section
                .items
                .iter()
                .find(|item| grants_any(table, role, &item.required))
            {
                return Err(AppError::configuration(format!(
                    "route {} is open to {role} but its section `{}` is hidden from {role}; \
                     widen the section requirement or declare `routes` explicitly",
                    item.path, section.title
                )));
            }
        }
    }
    Ok(())
}

impl AccessConfig {
    pub fn builtin() -> Self {
        let navigation = NavigationManifest::builtin();
        let settings = builtin_settings();
        let routes = RouteRegistry::from_navigation(&navigation, &settings);

        Self {
            table: RolePermissionTable::builtin(),
            navigation,
            settings,
            routes,
        }
    }

    /// Built-in configuration unless `ACCESS_CONFIG_PATH` names a file.
    pub fn from_env() -> AppResult<Self> {
        match std::env::var("ACCESS_CONFIG_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::from_path(Path::new(path.trim())),
            _ => {
                tracing::info!("using built-in access configuration");
                Ok(Self::builtin())
            }
        }
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| AppError::configuration(format!("failed to read {}: {err}", path.display())))?;
        let config = Self::from_json_str(&raw)
            .map_err(|err| AppError::configuration(format!("{}: {err}", path.display())))?;

        tracing::info!(
            path = %path.display(),
            sections = config.navigation.sections.len(),
            routes = config.routes.rules().len(),
            "loaded access configuration"
        );
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let deserializer = &mut serde_json::Deserializer::from_str(raw);
        let file: AccessConfigFile = serde_path_to_error::deserialize(deserializer)
            .map_err(|err| AppError::configuration(format!("invalid access config at `{}`: {}", err.path(), err.inner())))?;

        let table = RolePermissionTable::from_named(file.roles)?;
        let navigation = file
            .navigation
            .map(NavigationManifest::new)
            .unwrap_or_else(NavigationManifest::builtin);
        let settings = file.settings.unwrap_or_else(builtin_settings);
        let routes = match file.routes {
            Some(rules) => RouteRegistry::new(rules),
            None => {
                check_menu_agreement(&table, &navigation)?;
                RouteRegistry::from_navigation(&navigation, &settings)
            }
        };

        Ok(Self {
            table,
            navigation,
            settings,
            routes,
        })
    }
}
