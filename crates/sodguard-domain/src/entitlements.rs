//! Privilege name -> entitlement label mapping.
//!
//! The join is keyed by privilege *display name*, not id. Two privileges that share a name
//! always map to the same entitlement; see [`AccessModel::ambiguous_privilege_names`].
//!
//! [`AccessModel::ambiguous_privilege_names`]: crate::model::AccessModel::ambiguous_privilege_names

use crate::model::EntitlementLabel;
use std::collections::{BTreeMap, BTreeSet};

/// Normalized lookup key for a privilege display name.
pub fn normalize_name(name: &str) -> &str {
    name.trim()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntitlementMap {
    by_name: BTreeMap<String, EntitlementLabel>,
}

/// Result of mapping a set of privilege names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappedEntitlements<'m, 'n> {
    pub labels: BTreeSet<&'m EntitlementLabel>,
    pub unmapped: BTreeSet<&'n str>,
}

impl EntitlementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mapping. Empty names are ignored; a repeated name replaces the earlier label.
    pub fn insert(&mut self, privilege_name: &str, label: EntitlementLabel) -> Option<EntitlementLabel> {
        let key = normalize_name(privilege_name);
        if key.is_empty() {
            return None;
        }
        self.by_name.insert(key.to_string(), label)
    }

    pub fn get(&self, privilege_name: &str) -> Option<&EntitlementLabel> {
        let key = normalize_name(privilege_name);
        if key.is_empty() {
            return None;
        }
        self.by_name.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Translate privilege names into entitlement labels, dropping unmapped names.
    pub fn map_to_entitlements<'m, 'n, I>(&'m self, names: I) -> MappedEntitlements<'m, 'n>
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut out = MappedEntitlements::default();
        for name in names {
            match self.get(name) {
                Some(label) => {
                    out.labels.insert(label);
                }
                None => {
                    out.unmapped.insert(name);
                }
            }
        }
        out
    }
}

impl<S: AsRef<str>, L: Into<EntitlementLabel>> FromIterator<(S, L)> for EntitlementMap {
    fn from_iter<T: IntoIterator<Item = (S, L)>>(iter: T) -> Self {
        let mut map = EntitlementMap::new();
        for (name, label) in iter {
            map.insert(name.as_ref(), label.into());
        }
        map
    }
}
