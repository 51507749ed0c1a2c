use crate::entitlements::EntitlementMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(s: S) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a user in the user registry.
    UserId
);
string_id!(
    /// Identifier of a role; also a node in the role hierarchy.
    RoleId
);
string_id!(
    /// Identifier of a privilege in the privilege registry.
    PrivilegeId
);
string_id!(
    /// Coarse-grained entitlement (access point) label used by conflict rules.
    EntitlementLabel
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Privilege {
    pub id: PrivilegeId,
    pub name: String,
}

/// Immutable snapshot of the access-control model for one analysis run.
///
/// Populated once by a loader through the `add_*` / `assign_*` methods, then only borrowed.
#[derive(Clone, Debug, Default)]
pub struct AccessModel {
    pub users: BTreeMap<UserId, User>,
    pub roles: BTreeMap<RoleId, Role>,
    pub privileges: BTreeMap<PrivilegeId, Privilege>,

    /// Role -> directly assigned privilege ids.
    pub role_privileges: BTreeMap<RoleId, BTreeSet<PrivilegeId>>,

    /// User -> directly assigned role ids (before hierarchy closure).
    pub user_roles: BTreeMap<UserId, BTreeSet<RoleId>>,

    /// Child role -> parent role. At most one parent per role.
    pub role_parents: BTreeMap<RoleId, RoleId>,

    /// Privilege display name -> entitlement label.
    pub entitlements: EntitlementMap,
}

impl AccessModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. A repeated id replaces the earlier record.
    pub fn add_user(&mut self, id: impl Into<UserId>, name: impl Into<String>) {
        let id = id.into();
        self.users.insert(
            id.clone(),
            User {
                id,
                name: name.into(),
            },
        );
    }

    /// Register a role. A repeated id replaces the earlier record.
    pub fn add_role(&mut self, id: impl Into<RoleId>, name: impl Into<String>) {
        let id = id.into();
        self.roles.insert(
            id.clone(),
            Role {
                id,
                name: name.into(),
            },
        );
    }

    /// Register a privilege. A repeated id replaces the earlier record.
    pub fn add_privilege(&mut self, id: impl Into<PrivilegeId>, name: impl Into<String>) {
        let id = id.into();
        self.privileges.insert(
            id.clone(),
            Privilege {
                id,
                name: name.into(),
            },
        );
    }

    pub fn assign_privilege(&mut self, role: impl Into<RoleId>, privilege: impl Into<PrivilegeId>) {
        self.role_privileges
            .entry(role.into())
            .or_default()
            .insert(privilege.into());
    }

    pub fn assign_role(&mut self, user: impl Into<UserId>, role: impl Into<RoleId>) {
        self.user_roles
            .entry(user.into())
            .or_default()
            .insert(role.into());
    }

    /// Record a hierarchy edge. Returns the previous parent if the child already had one.
    pub fn set_parent(
        &mut self,
        child: impl Into<RoleId>,
        parent: impl Into<RoleId>,
    ) -> Option<RoleId> {
        self.role_parents.insert(child.into(), parent.into())
    }

    /// Map a privilege display name to an entitlement label.
    pub fn map_access_point(
        &mut self,
        privilege_name: &str,
        label: impl Into<EntitlementLabel>,
    ) -> Option<EntitlementLabel> {
        self.entitlements.insert(privilege_name, label.into())
    }

    /// Number of privilege display names shared by more than one privilege id.
    ///
    /// The entitlement join is keyed by name, so such privileges cannot be told apart.
    pub fn ambiguous_privilege_names(&self) -> usize {
        let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
        for privilege in self.privileges.values() {
            let name = crate::entitlements::normalize_name(&privilege.name);
            if name.is_empty() {
                continue;
            }
            *by_name.entry(name).or_default() += 1;
        }
        by_name.values().filter(|&&n| n > 1).count()
    }
}
