use sodguard_domain::policy::{EffectiveConfig, EvidencePolicy, FailOn, RuleMatch};
use sodguard_types::Severity;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything else belongs in `sodguard.toml`.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        "compat" => compat_profile(),
        // default
        _ => strict_profile(),
    }
}

pub fn is_known_profile(profile: &str) -> bool {
    matches!(profile, "strict" | "warn" | "compat")
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        severity: Severity::Error,
        fail_on: FailOn::Error,
        max_violations: 1000,
        rule_match: RuleMatch::All,
        evidence: EvidencePolicy::Cartesian,
        exempt_users: Vec::new(),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        severity: Severity::Warning,
        fail_on: FailOn::Warning,
        ..strict_profile()
    }
}

fn compat_profile() -> EffectiveConfig {
    // Reports like the legacy line-oriented tool: one rule per user, never fails the build.
    EffectiveConfig {
        profile: "compat".to_string(),
        severity: Severity::Warning,
        fail_on: FailOn::Error,
        rule_match: RuleMatch::First,
        ..strict_profile()
    }
}
