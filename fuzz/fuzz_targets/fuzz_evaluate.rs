//! Fuzz target for conflict evaluation over arbitrary access models.
//!
//! Goal: evaluation should **never panic**, including on hierarchy cycles and dangling
//! references, and must respect `max_violations`.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluate
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sodguard_domain::model::AccessModel;
use sodguard_domain::policy::{EffectiveConfig, EvidencePolicy, RuleMatch};
use sodguard_domain::rules::{ConflictRule, RuleSet};

/// Ids are small integers so references collide often.
#[derive(Arbitrary, Debug)]
struct ModelInput {
    users: Vec<u8>,
    roles: Vec<u8>,
    privileges: Vec<(u8, u8)>,
    role_privileges: Vec<(u8, u8)>,
    user_roles: Vec<(u8, u8)>,
    parents: Vec<(u8, u8)>,
    entitlements: Vec<(u8, u8)>,
    rules: Vec<(u8, u8)>,
    strict_evidence: bool,
    first_match: bool,
    max_violations: u8,
}

fuzz_target!(|input: ModelInput| {
    if input.user_roles.len() > 64 || input.role_privileges.len() > 64 {
        return;
    }

    let mut model = AccessModel::new();
    for u in &input.users {
        model.add_user(format!("U{}", u % 16), format!("User {u}"));
    }
    for r in &input.roles {
        model.add_role(format!("R{}", r % 16), format!("Role {r}"));
    }
    for (p, name) in &input.privileges {
        model.add_privilege(format!("P{}", p % 16), format!("Privilege {}", name % 8));
    }
    for (r, p) in &input.role_privileges {
        model.assign_privilege(format!("R{}", r % 16), format!("P{}", p % 16));
    }
    for (u, r) in &input.user_roles {
        model.assign_role(format!("U{}", u % 16), format!("R{}", r % 16));
    }
    for (child, parent) in &input.parents {
        model.set_parent(format!("R{}", child % 16), format!("R{}", parent % 16));
    }
    for (name, label) in &input.entitlements {
        model.map_access_point(&format!("Privilege {}", name % 8), format!("L{}", label % 4));
    }

    let mut rules = RuleSet::new();
    for (i, (a, b)) in input.rules.iter().take(8).enumerate() {
        let rule = ConflictRule::new(
            format!("SOD-{i}"),
            format!("L{}", a % 4),
            format!("L{}", b % 4),
        );
        if let Ok(rule) = rule {
            rules.insert(rule);
        }
    }

    let cfg = EffectiveConfig {
        max_violations: usize::from(input.max_violations),
        evidence: if input.strict_evidence {
            EvidencePolicy::Strict
        } else {
            EvidencePolicy::Cartesian
        },
        rule_match: if input.first_match {
            RuleMatch::First
        } else {
            RuleMatch::All
        },
        ..EffectiveConfig::default()
    };

    let report = sodguard_domain::evaluate(&model, &rules, &cfg);
    assert!(report.violations.len() <= cfg.max_violations);
});
