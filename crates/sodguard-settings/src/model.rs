use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "sodguard.config.v1";

/// `sodguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional and falls back to the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SodguardConfigV1 {
    /// Optional schema string for tooling (`sodguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default), `warn`, or `compat`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the check: `error` or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many violations to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_violations: Option<u32>,

    /// `all` reports every matching rule per user, `first` stops at the first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_match: Option<String>,

    /// `cartesian` or `strict` evidence pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,

    /// Severity attached to each violation: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Glob patterns over user ids that are never reported.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exempt_users: Vec<String>,

    /// Input file names, relative to the data directory.
    #[serde(default)]
    pub inputs: InputsConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InputsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileges: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_privileges: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_roles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_hierarchy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitlements: Option<String>,
}
