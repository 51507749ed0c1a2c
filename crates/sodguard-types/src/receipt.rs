use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for sodguard reports.
pub const SCHEMA_REPORT_V1: &str = "sodguard.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
    /// Nothing was evaluated (for example, the requested rule does not exist).
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// One evidentiary unit: a user in conflict, one of their effective roles, and one
/// privilege (access point) they hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ViolationRecord {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,

    pub rule_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,

    pub user_id: String,
    pub user_name: String,
    pub role_id: String,
    pub role_name: String,
    pub access_point: String,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `check_id + rule_id + user_id + role_id + access_point`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Data-quality counters collected during a run.
///
/// None of these abort evaluation; they are reported so silent under-counting is visible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DataQuality {
    /// Users with role assignments but no registry entry.
    pub unknown_users: u32,
    /// Distinct role ids reachable from assignments but absent from the role registry.
    pub unknown_roles: u32,
    /// Distinct privilege ids assigned to roles but absent from the privilege registry.
    pub unknown_privileges: u32,
    /// Distinct roles whose ancestor chain loops back on itself.
    pub hierarchy_cycles: u32,
    /// Distinct privilege names held by some user that map to no entitlement.
    pub unmapped_privileges: u32,
    /// Privilege display names shared by more than one privilege id.
    pub ambiguous_privilege_names: u32,
}

/// Sodguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SodguardData {
    pub profile: String,
    pub rule_ids: Vec<String>,
    pub rule_match: String,
    pub evidence: String,

    pub users_scanned: u32,
    pub users_in_conflict: u32,
    pub users_exempted: u32,

    pub violations_total: u32,
    pub violations_emitted: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,

    #[serde(default)]
    pub quality: DataQuality,

    /// Set when the run aborted before evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A generic report envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = SodguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
    pub violations: Vec<ViolationRecord>,
    pub data: TData,
}

pub type SodguardReport = ReportEnvelope<SodguardData>;
