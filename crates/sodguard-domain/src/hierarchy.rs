//! Role hierarchy closure.
//!
//! Edges point from child to parent and each role has at most one parent, so the closure
//! of a role is the chain of its ancestors. Input data is not guaranteed acyclic.

use crate::model::RoleId;
use std::collections::{BTreeMap, BTreeSet};

/// Ancestor chain of one role, including the role itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Closure<'m> {
    pub roles: BTreeSet<&'m RoleId>,
    /// The walk revisited a role and was cut short.
    pub cycle: bool,
}

/// Union of closures over a user's directly assigned roles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectiveRoles<'m> {
    pub roles: BTreeSet<&'m RoleId>,
    /// Direct roles whose ancestor walk hit a cycle.
    pub cycles: BTreeSet<&'m RoleId>,
}

#[derive(Clone, Copy, Debug)]
pub struct RoleHierarchy<'m> {
    parents: &'m BTreeMap<RoleId, RoleId>,
}

impl<'m> RoleHierarchy<'m> {
    pub fn new(parents: &'m BTreeMap<RoleId, RoleId>) -> Self {
        Self { parents }
    }

    pub fn parent_of(&self, role: &RoleId) -> Option<&'m RoleId> {
        self.parents.get(role)
    }

    /// Follow child -> parent edges from `start`, collecting every role visited.
    ///
    /// Stops at the first repeated role, so a malformed hierarchy still terminates.
    pub fn closure(&self, start: &'m RoleId) -> Closure<'m> {
        let mut out = Closure::default();
        let mut current = Some(start);
        while let Some(role) = current {
            if !out.roles.insert(role) {
                out.cycle = true;
                break;
            }
            current = self.parent_of(role);
        }
        out
    }

    pub fn effective_roles<I>(&self, direct: I) -> EffectiveRoles<'m>
    where
        I: IntoIterator<Item = &'m RoleId>,
    {
        let mut out = EffectiveRoles::default();
        for role in direct {
            let closure = self.closure(role);
            if closure.cycle {
                out.cycles.insert(role);
            }
            out.roles.extend(closure.roles);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> BTreeMap<RoleId, RoleId> {
        pairs
            .iter()
            .map(|(c, p)| (RoleId::from(*c), RoleId::from(*p)))
            .collect()
    }

    fn ids<'a>(set: &'a BTreeSet<&RoleId>) -> Vec<&'a str> {
        set.iter().map(|r| r.as_str()).collect()
    }

    #[test]
    fn closure_follows_chain_to_root() {
        let parents = edges(&[("A", "B"), ("B", "C")]);
        let hierarchy = RoleHierarchy::new(&parents);
        let a = RoleId::from("A");
        let c = RoleId::from("C");

        let closure = hierarchy.closure(&a);
        assert_eq!(ids(&closure.roles), vec!["A", "B", "C"]);
        assert!(!closure.cycle);

        let closure = hierarchy.closure(&c);
        assert_eq!(ids(&closure.roles), vec!["C"]);
    }

    #[test]
    fn closure_of_unknown_role_is_itself() {
        let parents = BTreeMap::new();
        let hierarchy = RoleHierarchy::new(&parents);
        let x = RoleId::from("X");
        assert_eq!(ids(&hierarchy.closure(&x).roles), vec!["X"]);
    }

    #[test]
    fn two_role_cycle_terminates_with_partial_set() {
        let parents = edges(&[("A", "B"), ("B", "A")]);
        let hierarchy = RoleHierarchy::new(&parents);
        let a = RoleId::from("A");

        let closure = hierarchy.closure(&a);
        assert_eq!(ids(&closure.roles), vec!["A", "B"]);
        assert!(closure.cycle);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let parents = edges(&[("A", "A")]);
        let hierarchy = RoleHierarchy::new(&parents);
        let a = RoleId::from("A");

        let closure = hierarchy.closure(&a);
        assert_eq!(ids(&closure.roles), vec!["A"]);
        assert!(closure.cycle);
    }

    #[test]
    fn cycle_above_the_start_role_is_reported() {
        let parents = edges(&[("X", "A"), ("A", "B"), ("B", "A")]);
        let hierarchy = RoleHierarchy::new(&parents);
        let x = RoleId::from("X");

        let closure = hierarchy.closure(&x);
        assert_eq!(ids(&closure.roles), vec!["A", "B", "X"]);
        assert!(closure.cycle);
    }

    #[test]
    fn effective_roles_unions_closures() {
        let parents = edges(&[("R1", "BASE"), ("R2", "BASE"), ("R3", "R4"), ("R4", "R3")]);
        let hierarchy = RoleHierarchy::new(&parents);
        let direct = [RoleId::from("R1"), RoleId::from("R2"), RoleId::from("R3")];

        let effective = hierarchy.effective_roles(direct.iter());
        assert_eq!(ids(&effective.roles), vec!["BASE", "R1", "R2", "R3", "R4"]);
        assert_eq!(ids(&effective.cycles), vec!["R3"]);
    }
}
