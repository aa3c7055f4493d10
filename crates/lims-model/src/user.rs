//! Users, groups, and the permission-string scheme.

use serde::{Deserialize, Serialize};

/// Prefix of every resource permission string.
const PERMISSION_PREFIX: &str = "permission/resource";

/// The authenticated user as returned by the user resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppUser {
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
    /// Flattened permission strings, e.g. `permission/resource/screen/read`.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub usergroups: Vec<String>,
}

impl AppUser {
    /// Permission check against the `permission/resource/<key>[/<perm>]`
    /// scheme. Superusers always pass. With no `permission` given, any
    /// suffix under the resource counts.
    pub fn has_permission(&self, resource: &str, permission: Option<&str>) -> bool {
        if self.is_superuser {
            return true;
        }
        let base = format!("{}/{}", PERMISSION_PREFIX, resource);
        match permission {
            Some(perm) => {
                let wanted = format!("{}/{}", base, perm);
                self.permissions.iter().any(|p| p == &wanted)
            }
            None => self
                .permissions
                .iter()
                .any(|p| p == &base || p.starts_with(&format!("{}/", base))),
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self.username.clone(),
        }
    }
}

/// A named user group, as returned by the usergroup resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGroup {
    pub name: String,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// One grantable permission, offered by permission-editing views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOption {
    pub resource: String,
    pub permission: String,
}

impl PermissionOption {
    /// The flattened string form stored on users and groups.
    pub fn as_permission_string(&self) -> String {
        format!("{}/{}/{}", PERMISSION_PREFIX, self.resource, self.permission)
    }
}
