use crate::{
    model::{InputsConfig, SCHEMA_CONFIG_V1, SodguardConfigV1},
    presets,
};
use anyhow::Context;
use globset::Glob;
use sodguard_domain::policy::{EffectiveConfig, EvidencePolicy, FailOn, RuleMatch};
use sodguard_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_violations: Option<u32>,
    pub evidence: Option<String>,
    pub rule_match: Option<String>,
}

/// File names of the eight input tables, relative to the data directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputFiles {
    pub users: String,
    pub roles: String,
    pub privileges: String,
    pub role_privileges: String,
    pub user_roles: String,
    pub role_hierarchy: String,
    pub rules: String,
    pub entitlements: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            users: "users.csv".to_string(),
            roles: "roles.csv".to_string(),
            privileges: "privileges.csv".to_string(),
            role_privileges: "role_privileges.csv".to_string(),
            user_roles: "user_roles.csv".to_string(),
            role_hierarchy: "role_hierarchy.csv".to_string(),
            rules: "sod_rules.csv".to_string(),
            entitlements: "sod_entitlements.csv".to_string(),
        }
    }
}

impl InputFiles {
    fn with_overrides(inputs: InputsConfig) -> Self {
        let d = InputFiles::default();
        Self {
            users: inputs.users.unwrap_or(d.users),
            roles: inputs.roles.unwrap_or(d.roles),
            privileges: inputs.privileges.unwrap_or(d.privileges),
            role_privileges: inputs.role_privileges.unwrap_or(d.role_privileges),
            user_roles: inputs.user_roles.unwrap_or(d.user_roles),
            role_hierarchy: inputs.role_hierarchy.unwrap_or(d.role_hierarchy),
            rules: inputs.rules.unwrap_or(d.rules),
            entitlements: inputs.entitlements.unwrap_or(d.entitlements),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub inputs: InputFiles,
}

pub fn resolve_config(
    cfg: SodguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());
    if !presets::is_known_profile(&profile) {
        anyhow::bail!("unknown profile: {profile} (expected strict|warn|compat)");
    }

    let mut effective = presets::preset(&profile);

    if let Some(sev) = cfg.severity.as_deref() {
        effective.severity = parse_severity(sev).context("invalid severity")?;
    }

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    // max violations
    if let Some(mv) = overrides.max_violations.or(cfg.max_violations) {
        effective.max_violations = mv as usize;
    }

    if let Some(rm) = overrides.rule_match.clone().or(cfg.rule_match.clone()) {
        effective.rule_match = parse_rule_match(&rm)?;
    }

    if let Some(ev) = overrides.evidence.clone().or(cfg.evidence.clone()) {
        effective.evidence = parse_evidence(&ev)?;
    }

    if !cfg.exempt_users.is_empty() {
        validate_exemptions(&cfg.exempt_users)?;
        effective.exempt_users = cfg.exempt_users.clone();
    }

    Ok(ResolvedConfig {
        effective,
        inputs: InputFiles::with_overrides(cfg.inputs),
    })
}

fn validate_exemptions(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid exempt_users glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

fn parse_rule_match(v: &str) -> anyhow::Result<RuleMatch> {
    match v {
        "all" => Ok(RuleMatch::All),
        "first" => Ok(RuleMatch::First),
        other => anyhow::bail!("unknown rule_match: {other} (expected all|first)"),
    }
}

fn parse_evidence(v: &str) -> anyhow::Result<EvidencePolicy> {
    match v {
        "cartesian" => Ok(EvidencePolicy::Cartesian),
        "strict" => Ok(EvidencePolicy::Strict),
        other => anyhow::bail!("unknown evidence: {other} (expected cartesian|strict)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    fn resolve(toml: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(toml)?, overrides)
    }

    #[test]
    fn empty_config_is_strict_with_default_inputs() {
        let resolved = resolve("", Overrides::default()).expect("resolve");
        let e = &resolved.effective;
        assert_eq!(e.profile, "strict");
        assert_eq!(e.severity, Severity::Error);
        assert_eq!(e.fail_on, FailOn::Error);
        assert_eq!(e.max_violations, 1000);
        assert_eq!(e.rule_match, RuleMatch::All);
        assert_eq!(e.evidence, EvidencePolicy::Cartesian);
        assert_eq!(resolved.inputs, InputFiles::default());
    }

    #[test]
    fn compat_profile_uses_first_match_and_warnings() {
        let resolved = resolve("profile = \"compat\"", Overrides::default()).expect("resolve");
        assert_eq!(resolved.effective.rule_match, RuleMatch::First);
        assert_eq!(resolved.effective.severity, Severity::Warning);
        assert_eq!(resolved.effective.fail_on, FailOn::Error);
    }

    #[test]
    fn file_values_apply_and_overrides_win() {
        let toml = r#"
profile = "warn"
max_violations = 10
evidence = "strict"
rule_match = "first"
exempt_users = ["SVC_*"]

[inputs]
users = "people.csv"
"#;
        let resolved = resolve(
            toml,
            Overrides {
                profile: Some("strict".to_string()),
                max_violations: Some(3),
                evidence: Some("cartesian".to_string()),
                rule_match: None,
            },
        )
        .expect("resolve");

        let e = &resolved.effective;
        assert_eq!(e.profile, "strict");
        assert_eq!(e.max_violations, 3);
        assert_eq!(e.evidence, EvidencePolicy::Cartesian);
        assert_eq!(e.rule_match, RuleMatch::First);
        assert_eq!(e.exempt_users, vec!["SVC_*".to_string()]);
        assert_eq!(resolved.inputs.users, "people.csv");
        assert_eq!(resolved.inputs.roles, "roles.csv");
    }

    #[test]
    fn invalid_values_are_rejected() {
        for toml in [
            "profile = \"lenient\"",
            "fail_on = \"never\"",
            "severity = \"fatal\"",
            "rule_match = \"any\"",
            "evidence = \"loose\"",
            "exempt_users = [\"[\"]",
            "schema = \"sodguard.config.v2\"",
        ] {
            assert!(
                resolve(toml, Overrides::default()).is_err(),
                "expected error for {toml}"
            );
        }
    }

    #[test]
    fn invalid_override_is_rejected() {
        let err = resolve(
            "",
            Overrides {
                evidence: Some("sometimes".to_string()),
                ..Overrides::default()
            },
        )
        .expect_err("should fail");
        assert!(err.to_string().contains("unknown evidence"));
    }
}
