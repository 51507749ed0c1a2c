use sodguard_types::Severity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// How many matching rules are reported per user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleMatch {
    /// Report every rule the user matches.
    All,
    /// Stop at the first matching rule in rule-set order.
    First,
}

impl RuleMatch {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleMatch::All => "all",
            RuleMatch::First => "first",
        }
    }
}

/// Which (role, privilege) pairs are emitted as evidence for a conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvidencePolicy {
    /// Every effective role paired with every aggregated privilege name.
    Cartesian,
    /// Only roles that directly grant a privilege mapping to one of the rule's legs,
    /// paired with those privileges.
    Strict,
}

impl EvidencePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            EvidencePolicy::Cartesian => "cartesian",
            EvidencePolicy::Strict => "strict",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub severity: Severity,
    pub fail_on: FailOn,
    pub max_violations: usize,
    pub rule_match: RuleMatch,
    pub evidence: EvidencePolicy,
    /// Glob patterns over user ids; matching users are never reported.
    /// Patterns must already be validated (see `sodguard-settings`).
    pub exempt_users: Vec<String>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            severity: Severity::Error,
            fail_on: FailOn::Error,
            max_violations: 1000,
            rule_match: RuleMatch::All,
            evidence: EvidencePolicy::Cartesian,
            exempt_users: Vec::new(),
        }
    }
}
