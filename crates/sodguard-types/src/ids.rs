//! Stable identifiers for checks, finding codes and verdict reasons.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_SOD_CONFLICT: &str = "sod.conflict";

// Codes: sod.conflict
pub const CODE_CONFLICTING_ENTITLEMENTS: &str = "conflicting_entitlements";

// Data-quality codes (reported as counters in the run summary, never as violations)
pub const CODE_UNKNOWN_USER: &str = "unknown_user";
pub const CODE_UNKNOWN_ROLE: &str = "unknown_role";
pub const CODE_UNKNOWN_PRIVILEGE: &str = "unknown_privilege";
pub const CODE_HIERARCHY_CYCLE: &str = "hierarchy_cycle";
pub const CODE_UNMAPPED_PRIVILEGE: &str = "unmapped_privilege";
pub const CODE_AMBIGUOUS_PRIVILEGE_NAME: &str = "ambiguous_privilege_name";

// Verdict reasons
pub const REASON_RULE_NOT_FOUND: &str = "rule_not_found";
pub const REASON_TRUNCATED: &str = "truncated";
pub const REASON_RUNTIME_ERROR: &str = "runtime_error";
