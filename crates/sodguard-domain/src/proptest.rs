//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Hierarchy closure termination on arbitrary parent graphs
//! - Violation ordering determinism and truncation
//! - Strict evidence being a subset of cartesian evidence

use crate::engine::evaluate;
use crate::hierarchy::RoleHierarchy;
use crate::model::{AccessModel, RoleId};
use crate::policy::{EffectiveConfig, EvidencePolicy};
use crate::rules::{ConflictRule, RuleSet};
use proptest::prelude::*;
use sodguard_types::ViolationRecord;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

const ROLES: usize = 6;
const PRIVILEGES: usize = 6;
const NAMES: usize = 4;
const LABELS: usize = 3;

/// Child -> parent edges over a small role space. Cycles and self loops are allowed.
fn arb_parents() -> impl Strategy<Value = BTreeMap<RoleId, RoleId>> {
    prop::collection::btree_map(0..ROLES, 0..ROLES, 0..ROLES).prop_map(|edges| {
        edges
            .into_iter()
            .map(|(c, p)| (RoleId::new(format!("R{c}")), RoleId::new(format!("R{p}"))))
            .collect()
    })
}

#[derive(Clone, Debug)]
struct ModelShape {
    users: usize,
    privilege_names: Vec<usize>,
    role_privileges: Vec<(usize, usize)>,
    user_roles: Vec<(usize, usize)>,
    parents: Vec<(usize, usize)>,
    name_labels: Vec<(usize, usize)>,
}

fn arb_model_shape() -> impl Strategy<Value = ModelShape> {
    (
        1usize..5,
        prop::collection::vec(0..NAMES, PRIVILEGES),
        prop::collection::vec((0..ROLES, 0..PRIVILEGES), 0..16),
        prop::collection::vec((0usize..5, 0..ROLES), 0..12),
        prop::collection::vec((0..ROLES, 0..ROLES), 0..4),
        prop::collection::vec((0..NAMES, 0..LABELS), 0..NAMES),
    )
        .prop_map(
            |(users, privilege_names, role_privileges, user_roles, parents, name_labels)| {
                ModelShape {
                    users,
                    privilege_names,
                    role_privileges,
                    user_roles,
                    parents,
                    name_labels,
                }
            },
        )
}

fn build_model(shape: &ModelShape) -> AccessModel {
    let mut model = AccessModel::new();
    for u in 0..shape.users {
        model.add_user(format!("U{u}"), format!("User {u}"));
    }
    for r in 0..ROLES {
        model.add_role(format!("R{r}"), format!("Role {r}"));
    }
    for (p, name) in shape.privilege_names.iter().enumerate() {
        model.add_privilege(format!("P{p}"), format!("Name {name}"));
    }
    for (r, p) in &shape.role_privileges {
        model.assign_privilege(format!("R{r}"), format!("P{p}"));
    }
    // User indices may exceed `shape.users`, which exercises unknown users.
    for (u, r) in &shape.user_roles {
        model.assign_role(format!("U{u}"), format!("R{r}"));
    }
    for (c, p) in &shape.parents {
        model.set_parent(format!("R{c}"), format!("R{p}"));
    }
    for (n, l) in &shape.name_labels {
        model.map_access_point(&format!("Name {n}"), format!("L{l}"));
    }
    model
}

fn arb_rules() -> impl Strategy<Value = RuleSet> {
    prop::collection::vec((0..LABELS, 0..LABELS), 0..4).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .filter_map(|(i, (a, b))| {
                ConflictRule::new(format!("SOD-{i}"), format!("L{a}"), format!("L{b}")).ok()
            })
            .collect()
    })
}

fn evidence_key(v: &ViolationRecord) -> (String, String, String, String) {
    (
        v.rule_id.clone(),
        v.user_id.clone(),
        v.role_id.clone(),
        v.access_point.clone(),
    )
}

// ============================================================================
// Hierarchy properties
// ============================================================================

proptest! {
    #[test]
    fn closure_terminates_and_contains_start(parents in arb_parents(), start in 0..ROLES) {
        let hierarchy = RoleHierarchy::new(&parents);
        let start = RoleId::new(format!("R{start}"));

        let closure = hierarchy.closure(&start);

        prop_assert!(closure.roles.contains(&start));
        prop_assert!(closure.roles.len() <= ROLES);
    }

    #[test]
    fn acyclic_closure_ends_at_a_root(parents in arb_parents(), start in 0..ROLES) {
        let hierarchy = RoleHierarchy::new(&parents);
        let start = RoleId::new(format!("R{start}"));

        let closure = hierarchy.closure(&start);

        // Every visited role's parent was visited too, unless the walk was cut short.
        if !closure.cycle {
            for role in &closure.roles {
                if let Some(parent) = hierarchy.parent_of(role) {
                    prop_assert!(closure.roles.contains(parent));
                }
            }
        }
    }

    #[test]
    fn effective_roles_is_order_independent(parents in arb_parents(), direct in prop::collection::vec(0..ROLES, 0..5)) {
        let hierarchy = RoleHierarchy::new(&parents);
        let forward: Vec<RoleId> = direct.iter().map(|r| RoleId::new(format!("R{r}"))).collect();
        let backward: Vec<RoleId> = forward.iter().rev().cloned().collect();

        let a = hierarchy.effective_roles(forward.iter());
        let b = hierarchy.effective_roles(backward.iter());

        let a: BTreeSet<&str> = a.roles.iter().map(|r| r.as_str()).collect();
        let b: BTreeSet<&str> = b.roles.iter().map(|r| r.as_str()).collect();
        prop_assert_eq!(a, b);
    }
}

// ============================================================================
// Rule properties
// ============================================================================

proptest! {
    #[test]
    fn rule_legs_are_unordered(a in "[A-Z][a-z_]{0,8}", b in "[A-Z][a-z_]{0,8}") {
        let forward = ConflictRule::new("SOD-1", a.as_str(), b.as_str());
        let backward = ConflictRule::new("SOD-1", b.as_str(), a.as_str());
        prop_assert_eq!(forward, backward);
    }
}

// ============================================================================
// Engine properties
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic_and_sorted(shape in arb_model_shape(), rules in arb_rules()) {
        let model = build_model(&shape);
        let cfg = EffectiveConfig::default();

        let first = evaluate(&model, &rules, &cfg);
        let second = evaluate(&model, &rules, &cfg);

        prop_assert_eq!(&first.violations, &second.violations);
        let keys: Vec<_> = first.violations.iter().map(evidence_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn strict_evidence_is_a_subset_of_cartesian(shape in arb_model_shape(), rules in arb_rules()) {
        let model = build_model(&shape);
        let mut cfg = EffectiveConfig::default();

        let cartesian = evaluate(&model, &rules, &cfg);
        cfg.evidence = EvidencePolicy::Strict;
        let strict = evaluate(&model, &rules, &cfg);

        let cartesian: BTreeSet<_> = cartesian.violations.iter().map(evidence_key).collect();
        let strict: BTreeSet<_> = strict.violations.iter().map(evidence_key).collect();
        prop_assert!(strict.is_subset(&cartesian));
    }

    #[test]
    fn violations_respect_max_violations(shape in arb_model_shape(), rules in arb_rules(), max in 0usize..6) {
        let model = build_model(&shape);
        let cfg = EffectiveConfig { max_violations: max, ..EffectiveConfig::default() };

        let report = evaluate(&model, &rules, &cfg);

        prop_assert!(report.violations.len() <= max);
        prop_assert_eq!(report.data.violations_emitted as usize, report.violations.len());
        prop_assert!(report.data.violations_total >= report.data.violations_emitted);
        prop_assert_eq!(
            report.data.truncated_reason.is_some(),
            report.data.violations_total as usize > max
        );
    }

    #[test]
    fn reported_users_are_registered(shape in arb_model_shape(), rules in arb_rules()) {
        let model = build_model(&shape);
        let report = evaluate(&model, &rules, &EffectiveConfig::default());

        for v in &report.violations {
            prop_assert!(model.users.contains_key(v.user_id.as_str()));
            prop_assert!(model.roles.contains_key(v.role_id.as_str()));
        }
    }
}
