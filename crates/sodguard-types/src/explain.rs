//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after table excerpts.
    pub examples: ExamplePair,
}

/// Before and after table excerpts.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Data that would trigger a finding.
    pub before: &'static str,
    /// Data that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_SOD_CONFLICT => Some(explain_sod_conflict()),

        // Codes
        ids::CODE_CONFLICTING_ENTITLEMENTS => Some(explain_conflicting_entitlements()),
        ids::CODE_UNKNOWN_USER => Some(explain_unknown_user()),
        ids::CODE_UNKNOWN_ROLE => Some(explain_unknown_role()),
        ids::CODE_UNKNOWN_PRIVILEGE => Some(explain_unknown_privilege()),
        ids::CODE_HIERARCHY_CYCLE => Some(explain_hierarchy_cycle()),
        ids::CODE_UNMAPPED_PRIVILEGE => Some(explain_unmapped_privilege()),
        ids::CODE_AMBIGUOUS_PRIVILEGE_NAME => Some(explain_ambiguous_privilege_name()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_SOD_CONFLICT]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_CONFLICTING_ENTITLEMENTS,
        ids::CODE_UNKNOWN_USER,
        ids::CODE_UNKNOWN_ROLE,
        ids::CODE_UNKNOWN_PRIVILEGE,
        ids::CODE_HIERARCHY_CYCLE,
        ids::CODE_UNMAPPED_PRIVILEGE,
        ids::CODE_AMBIGUOUS_PRIVILEGE_NAME,
    ]
}

// --- Check-level explanations ---

fn explain_sod_conflict() -> Explanation {
    Explanation {
        title: "Segregation-of-Duty Conflict",
        description: "\
Detects users who hold both entitlements named by a conflict rule.

A user's entitlements are derived in four steps:
1. Every directly assigned role is expanded to itself plus all of its ancestor roles
2. The privileges of all those roles are collected by display name
3. Each privilege name is translated to an entitlement (access point) label
4. Every rule whose two labels are both present is reported

Inherited privileges count exactly like direct ones, so a conflict may be
caused by a parent role the user was never assigned explicitly.",
        remediation: "\
Remove one side of the conflict from the user:
- Unassign one of the roles that grants a conflicting privilege
- Move the conflicting privilege to a role the user does not inherit
- Split a parent role that bundles both sides of the rule

If the combination is an accepted risk, add the user id to `exempt_users`
in sodguard.toml so the decision is recorded in configuration.",
        examples: ExamplePair {
            before: r#"user_roles:  U1 -> R1, U1 -> R2
R1 grants "Create Payables Invoices"   (Create_Payables_Invoices)
R2 grants "Approve Payables Invoices"  (Approve_Payables_Invoices)"#,
            after: r#"user_roles:  U1 -> R1
R1 grants "Create Payables Invoices"   (Create_Payables_Invoices)"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_conflicting_entitlements() -> Explanation {
    Explanation {
        title: "Conflicting Entitlements",
        description: "\
The user's effective entitlements contain both legs of a conflict rule.

Each violation record pairs one of the user's effective roles with one of
the privileges they hold. With `evidence = \"cartesian\"` (the default) every
role is paired with every privilege, so the records describe the user's full
access rather than the minimal cause. With `evidence = \"strict\"` only
roles that directly grant a conflicting privilege are reported.",
        remediation: "\
Use `evidence = \"strict\"` to narrow the report to the roles and privileges
that actually carry the conflicting entitlements, then remove one side.",
        examples: ExamplePair {
            before: r#"SOD Conflict [ UserId=U1, UserName=John Doe, RoleId=R1, Role=AP Specialist, accessPoint=Approve Payables Invoices]"#,
            after: r#"(no records for U1)"#,
        },
    }
}

fn explain_unknown_user() -> Explanation {
    Explanation {
        title: "Unknown User",
        description: "\
A user id appears in the user-role mapping but not in the user registry.

Such users are skipped entirely: no conflict can be reported for them.",
        remediation: "\
Re-export the user details report so it covers every user present in the
user-role mapping, or remove stale assignments.",
        examples: ExamplePair {
            before: r#"user_roles.csv: R1,...,U9   (U9 missing from users.csv)"#,
            after: r#"users.csv: ...,Jane Roe,...,U9"#,
        },
    }
}

fn explain_unknown_role() -> Explanation {
    Explanation {
        title: "Unknown Role",
        description: "\
A role id is assigned to a user (directly or through the hierarchy) but has
no entry in the role registry.

Its privileges still count toward conflict detection, but no violation record
can name it, so evidence for that role is omitted.",
        remediation: "\
Re-export the role master report so it includes every role referenced by the
user-role mapping and the role hierarchy.",
        examples: ExamplePair {
            before: r#"role_hierarchy.csv: ...,R1,R_PARENT   (R_PARENT missing from roles.csv)"#,
            after: r#"roles.csv: R_PARENT,Finance Parent Duty"#,
        },
    }
}

fn explain_unknown_privilege() -> Explanation {
    Explanation {
        title: "Unknown Privilege",
        description: "\
A privilege id is assigned to a role but has no entry in the privilege
registry. It is skipped, which can silently hide a conflict.",
        remediation: "\
Re-export the privilege master report so it covers every privilege id used in
the privilege-to-role relation.",
        examples: ExamplePair {
            before: r#"role_privileges.csv: ...,P9,R1   (P9 missing from privileges.csv)"#,
            after: r#"privileges.csv: ...,Approve Payables Invoices,P9"#,
        },
    }
}

fn explain_hierarchy_cycle() -> Explanation {
    Explanation {
        title: "Role Hierarchy Cycle",
        description: "\
Following child-to-parent edges from a role leads back to a role already
visited. The walk stops at the repeat, so the closure contains every role
found before the loop.",
        remediation: "\
Fix the role-to-role hierarchy export: each role should reach a root role
(one without a parent) in a finite number of steps.",
        examples: ExamplePair {
            before: r#"role_hierarchy.csv: ...,R1,R2
role_hierarchy.csv: ...,R2,R1"#,
            after: r#"role_hierarchy.csv: ...,R1,R2"#,
        },
    }
}

fn explain_unmapped_privilege() -> Explanation {
    Explanation {
        title: "Unmapped Privilege",
        description: "\
A privilege held by a user has no entry in the access-point to entitlement
mapping, so it contributes no entitlement to conflict checks.

The join is by privilege display name, not id.",
        remediation: "\
Add the privilege's display name to the entitlement mapping if it belongs to a
rule leg. Unmapped privileges that are unrelated to any rule can be ignored.",
        examples: ExamplePair {
            before: r#"sod_entitlements.csv: (no row for "Approve Payables Invoices")"#,
            after: r#"sod_entitlements.csv: Approve_Payables_Invoices,Approve Payables Invoices"#,
        },
    }
}

fn explain_ambiguous_privilege_name() -> Explanation {
    Explanation {
        title: "Ambiguous Privilege Name",
        description: "\
Two or more privilege ids share the same display name. Because entitlements
are mapped by name, these privileges are indistinguishable to the engine and
always map to the same entitlement.",
        remediation: "\
Confirm the shared name is intended. If the privileges differ in meaning,
rename one of them in the source system before exporting.",
        examples: ExamplePair {
            before: r#"privileges.csv: ...,Approve Invoices,P1
privileges.csv: ...,Approve Invoices,P7"#,
            after: r#"privileges.csv: ...,Approve Payables Invoices,P1
privileges.csv: ...,Approve Receivables Invoices,P7"#,
        },
    }
}
