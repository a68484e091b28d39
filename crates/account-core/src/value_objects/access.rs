//! Access policy - maps accounts to roles, and roles to permission grants

use std::collections::{BTreeMap, BTreeSet};

use crate::entities::User;

/// Role names
pub mod role {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
}

/// Permission names
pub mod permission {
    pub const USER_INFO: &str = "user:info";
    pub const USER_UPDATE: &str = "user:update";
    pub const USER_DELETE: &str = "user:delete";
    pub const USER_LIST: &str = "user:list";
    pub const ADMIN_DASHBOARD: &str = "admin:dashboard";
    pub const ADMIN_KICKOUT: &str = "admin:kickout";
}

/// Explicit role assignment and role grants.
///
/// An account whose username is in the elevated set holds the `admin` role;
/// every other account holds `user`. The permissions of an account are the
/// union of the grants of its roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    elevated: BTreeSet<String>,
    grants: BTreeMap<String, BTreeSet<String>>,
}

impl AccessPolicy {
    /// Build a policy with the default grant table and the given elevated usernames
    pub fn new<I, S>(elevated: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base = [permission::USER_INFO, permission::USER_UPDATE];
        let admin = base.iter().chain(&[
            permission::USER_DELETE,
            permission::USER_LIST,
            permission::ADMIN_DASHBOARD,
            permission::ADMIN_KICKOUT,
        ]);

        let mut grants = BTreeMap::new();
        grants.insert(
            role::USER.to_string(),
            base.iter().map(ToString::to_string).collect(),
        );
        grants.insert(
            role::ADMIN.to_string(),
            admin.map(ToString::to_string).collect(),
        );

        Self {
            elevated: elevated.into_iter().map(Into::into).collect(),
            grants,
        }
    }

    /// Add a grant to a role
    pub fn with_grant(mut self, role: impl Into<String>, permission: impl Into<String>) -> Self {
        self.grants
            .entry(role.into())
            .or_default()
            .insert(permission.into());
        self
    }

    /// Check if a username is an elevated account
    pub fn is_elevated(&self, username: &str) -> bool {
        self.elevated.contains(username)
    }

    /// Elevated usernames
    pub fn elevated(&self) -> impl Iterator<Item = &str> {
        self.elevated.iter().map(String::as_str)
    }

    /// Roles held by an account
    pub fn roles_for(&self, user: &User) -> BTreeSet<String> {
        let role = if self.is_elevated(&user.username) {
            role::ADMIN
        } else {
            role::USER
        };
        BTreeSet::from([role.to_string()])
    }

    /// Permissions held by an account
    pub fn permissions_for(&self, user: &User) -> BTreeSet<String> {
        self.roles_for(user)
            .iter()
            .filter_map(|role| self.grants.get(role))
            .flatten()
            .cloned()
            .collect()
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new([role::ADMIN])
    }
}
