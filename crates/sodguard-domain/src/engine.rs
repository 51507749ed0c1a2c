use crate::aggregate::{PrivilegeSet, aggregate, role_privilege_names};
use crate::entitlements::MappedEntitlements;
use crate::exempt::{build_exemptions, is_exempt};
use crate::fingerprint::fingerprint_for_violation;
use crate::hierarchy::{EffectiveRoles, RoleHierarchy};
use crate::model::{AccessModel, PrivilegeId, Role, RoleId, User, UserId};
use crate::policy::{EffectiveConfig, EvidencePolicy, FailOn, RuleMatch};
use crate::report::DomainReport;
use crate::rules::{ConflictRule, RuleSet};
use sodguard_types::{DataQuality, Severity, SodguardData, Verdict, ViolationRecord, ids};
use std::collections::BTreeSet;

/// Everything derived for one user on the way to a conflict decision.
#[derive(Clone, Debug)]
pub struct UserAnalysis<'m, 'r> {
    pub effective: EffectiveRoles<'m>,
    pub privileges: PrivilegeSet<'m>,
    pub entitlements: MappedEntitlements<'m, 'm>,
    pub matched: Vec<&'r ConflictRule>,
}

impl UserAnalysis<'_, '_> {
    pub fn in_conflict(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Resolve one user's effective roles, privileges and entitlements and test them against
/// `rules`.
///
/// Returns `None` when the user has no direct role assignment.
pub fn analyze_user<'m, 'r>(
    model: &'m AccessModel,
    rules: &'r RuleSet,
    rule_match: RuleMatch,
    user_id: &UserId,
) -> Option<UserAnalysis<'m, 'r>> {
    let direct = model.user_roles.get(user_id)?;
    if direct.is_empty() {
        return None;
    }

    let effective = RoleHierarchy::new(&model.role_parents).effective_roles(direct);
    let privileges = aggregate(model, effective.roles.iter().copied());
    let entitlements = model
        .entitlements
        .map_to_entitlements(privileges.names.iter().copied());

    let labels = &entitlements.labels;
    let matched = match rule_match {
        RuleMatch::All => rules.iter().filter(|r| r.matches(labels)).collect(),
        RuleMatch::First => rules.iter().find(|r| r.matches(labels)).into_iter().collect(),
    };

    Some(UserAnalysis {
        effective,
        privileges,
        entitlements,
        matched,
    })
}

pub fn evaluate(model: &AccessModel, rules: &RuleSet, cfg: &EffectiveConfig) -> DomainReport {
    let exempt = build_exemptions(&cfg.exempt_users);
    let mut tally = QualityTally::default();
    let mut violations: Vec<ViolationRecord> = Vec::new();

    let mut users_scanned = 0u32;
    let mut users_in_conflict = 0u32;
    let mut users_exempted = 0u32;

    for user_id in model.user_roles.keys() {
        let Some(analysis) = analyze_user(model, rules, cfg.rule_match, user_id) else {
            continue;
        };
        users_scanned += 1;
        tally.observe(model, &analysis);

        let Some(user) = model.users.get(user_id) else {
            tally.unknown_users += 1;
            continue;
        };
        if !analysis.in_conflict() {
            continue;
        }
        if is_exempt(exempt.as_ref(), user_id.as_str()) {
            users_exempted += 1;
            continue;
        }

        users_in_conflict += 1;
        for rule in &analysis.matched {
            emit_evidence(model, cfg, user, rule, &analysis, &mut violations);
        }
    }

    // Deterministic ordering before truncation.
    violations.sort_by(compare_violations);

    let total = violations.len() as u32;
    // Truncation limits output only; the verdict sees every record.
    let verdict = compute_verdict(&violations, cfg.fail_on);

    let mut emitted = violations;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_violations {
        emitted.truncate(cfg.max_violations);
        truncated_reason = Some(format!(
            "violations truncated to max_violations={}",
            cfg.max_violations
        ));
    }

    let data = SodguardData {
        profile: cfg.profile.clone(),
        rule_ids: rules.ids(),
        rule_match: cfg.rule_match.as_str().to_string(),
        evidence: cfg.evidence.as_str().to_string(),
        users_scanned,
        users_in_conflict,
        users_exempted,
        violations_total: total,
        violations_emitted: emitted.len() as u32,
        truncated_reason,
        quality: tally.finish(model),
        error: None,
    };

    DomainReport {
        verdict,
        violations: emitted,
        data,
    }
}

fn emit_evidence(
    model: &AccessModel,
    cfg: &EffectiveConfig,
    user: &User,
    rule: &ConflictRule,
    analysis: &UserAnalysis<'_, '_>,
    out: &mut Vec<ViolationRecord>,
) {
    for role_id in &analysis.effective.roles {
        // Roles without a registry entry have no name to report.
        let Some(role) = model.roles.get(*role_id) else {
            continue;
        };
        match cfg.evidence {
            EvidencePolicy::Cartesian => {
                for name in &analysis.privileges.names {
                    out.push(violation(cfg, rule, user, role, name));
                }
            }
            EvidencePolicy::Strict => {
                for name in role_privilege_names(model, &role.id) {
                    let carries_leg = model
                        .entitlements
                        .get(name)
                        .is_some_and(|label| rule.involves(label));
                    if carries_leg {
                        out.push(violation(cfg, rule, user, role, name));
                    }
                }
            }
        }
    }
}

fn violation(
    cfg: &EffectiveConfig,
    rule: &ConflictRule,
    user: &User,
    role: &Role,
    access_point: &str,
) -> ViolationRecord {
    let fingerprint = fingerprint_for_violation(
        ids::CHECK_SOD_CONFLICT,
        rule.id(),
        user.id.as_str(),
        role.id.as_str(),
        access_point,
    );
    ViolationRecord {
        severity: cfg.severity,
        check_id: ids::CHECK_SOD_CONFLICT.to_string(),
        code: ids::CODE_CONFLICTING_ENTITLEMENTS.to_string(),
        rule_id: rule.id().to_string(),
        rule_name: rule.name().map(str::to_string),
        user_id: user.id.to_string(),
        user_name: user.name.clone(),
        role_id: role.id.to_string(),
        role_name: role.name.clone(),
        access_point: access_point.to_string(),
        fingerprint: Some(fingerprint),
    }
}

#[derive(Default)]
struct QualityTally<'m> {
    unknown_users: u32,
    unknown_roles: BTreeSet<&'m RoleId>,
    unknown_privileges: BTreeSet<&'m PrivilegeId>,
    cycles: BTreeSet<&'m RoleId>,
    unmapped: BTreeSet<&'m str>,
}

impl<'m> QualityTally<'m> {
    fn observe(&mut self, model: &AccessModel, analysis: &UserAnalysis<'m, '_>) {
        self.unknown_roles.extend(
            analysis
                .effective
                .roles
                .iter()
                .copied()
                .filter(|r| !model.roles.contains_key(*r)),
        );
        self.unknown_privileges
            .extend(analysis.privileges.unknown.iter().copied());
        self.cycles.extend(analysis.effective.cycles.iter().copied());
        self.unmapped
            .extend(analysis.entitlements.unmapped.iter().copied());
    }

    fn finish(self, model: &AccessModel) -> DataQuality {
        DataQuality {
            unknown_users: self.unknown_users,
            unknown_roles: self.unknown_roles.len() as u32,
            unknown_privileges: self.unknown_privileges.len() as u32,
            hierarchy_cycles: self.cycles.len() as u32,
            unmapped_privileges: self.unmapped.len() as u32,
            ambiguous_privilege_names: model.ambiguous_privilege_names() as u32,
        }
    }
}

fn compute_verdict(violations: &[ViolationRecord], fail_on: FailOn) -> Verdict {
    let has_error = violations.iter().any(|v| v.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = violations.iter().any(|v| v.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_violations(a: &ViolationRecord, b: &ViolationRecord) -> std::cmp::Ordering {
    // Ordering priority: rule_id, user_id, role_id, access_point.
    a.rule_id
        .cmp(&b.rule_id)
        .then_with(|| a.user_id.cmp(&b.user_id))
        .then_with(|| a.role_id.cmp(&b.role_id))
        .then_with(|| a.access_point.cmp(&b.access_point))
}
