use crate::model::AccessModel;
use crate::policy::EffectiveConfig;
use crate::rules::{ConflictRule, RuleSet};
use sodguard_types::ViolationRecord;

/// One user holding both halves of the payables conflict through two roles.
///
/// U1 -> R1 (Create Payables Invoices) and R2 (Approve Payables Invoices).
pub fn payables_model() -> AccessModel {
    let mut model = AccessModel::new();
    model.add_user("U1", "John Doe");
    model.add_role("R1", "Accounts Payable Specialist");
    model.add_role("R2", "Accounts Payable Manager");
    model.add_privilege("P1", "Create Payables Invoices");
    model.add_privilege("P2", "Approve Payables Invoices");
    model.assign_privilege("R1", "P1");
    model.assign_privilege("R2", "P2");
    model.assign_role("U1", "R1");
    model.assign_role("U1", "R2");
    model.map_access_point("Create Payables Invoices", "Create_Payables_Invoices");
    model.map_access_point("Approve Payables Invoices", "Approve_Payables_Invoices");
    model
}

pub fn payables_rules() -> RuleSet {
    let rule = ConflictRule::new(
        "SOD-AP-01",
        "Create_Payables_Invoices",
        "Approve_Payables_Invoices",
    )
    .expect("valid rule")
    .with_name("Create vs approve payables invoices");
    std::iter::once(rule).collect()
}

pub fn config() -> EffectiveConfig {
    EffectiveConfig::default()
}

pub fn triples(violations: &[ViolationRecord]) -> Vec<(&str, &str, &str)> {
    violations
        .iter()
        .map(|v| {
            (
                v.user_id.as_str(),
                v.role_id.as_str(),
                v.access_point.as_str(),
            )
        })
        .collect()
}
