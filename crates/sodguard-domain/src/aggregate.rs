//! Privilege aggregation over a role set.

use crate::model::{AccessModel, PrivilegeId, RoleId};
use std::collections::BTreeSet;

/// Privilege display names held through a set of roles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrivilegeSet<'m> {
    pub names: BTreeSet<&'m str>,
    /// Assigned privilege ids with no registry entry (skipped).
    pub unknown: BTreeSet<&'m PrivilegeId>,
}

/// Union the display names of all privileges assigned to `roles`.
///
/// Roles with no assignment contribute nothing. Privilege ids missing from the registry are
/// skipped and collected in `unknown`.
pub fn aggregate<'m, I>(model: &'m AccessModel, roles: I) -> PrivilegeSet<'m>
where
    I: IntoIterator<Item = &'m RoleId>,
{
    let mut out = PrivilegeSet::default();
    for role in roles {
        let Some(assigned) = model.role_privileges.get(role) else {
            continue;
        };
        for id in assigned {
            match model.privileges.get(id) {
                Some(privilege) => {
                    out.names.insert(privilege.name.as_str());
                }
                None => {
                    out.unknown.insert(id);
                }
            }
        }
    }
    out
}

/// Display names of the privileges assigned directly to a single role.
pub fn role_privilege_names<'m>(model: &'m AccessModel, role: &RoleId) -> BTreeSet<&'m str> {
    model
        .role_privileges
        .get(role)
        .into_iter()
        .flatten()
        .filter_map(|id| model.privileges.get(id))
        .map(|p| p.name.as_str())
        .collect()
}
