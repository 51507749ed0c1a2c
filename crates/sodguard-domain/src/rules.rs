//! Conflict rules: unordered pairs of mutually exclusive entitlement labels.

use crate::model::EntitlementLabel;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("conflict rule has an empty id")]
    EmptyId,
    #[error("conflict rule {rule_id} has an empty leg")]
    EmptyLeg { rule_id: String },
    #[error("conflict rule {rule_id} names the same entitlement twice: {label}")]
    IdenticalLegs { rule_id: String, label: String },
}

/// Two entitlement labels that no single user may hold together.
///
/// Legs are stored in sorted order, so `{A, B}` and `{B, A}` compare equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictRule {
    id: String,
    name: Option<String>,
    legs: (EntitlementLabel, EntitlementLabel),
}

impl ConflictRule {
    pub fn new(
        id: impl Into<String>,
        first: impl Into<EntitlementLabel>,
        second: impl Into<EntitlementLabel>,
    ) -> Result<Self, RuleError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RuleError::EmptyId);
        }
        let first = first.into();
        let second = second.into();
        if first.as_str().is_empty() || second.as_str().is_empty() {
            return Err(RuleError::EmptyLeg { rule_id: id });
        }
        if first == second {
            return Err(RuleError::IdenticalLegs {
                rule_id: id,
                label: first.to_string(),
            });
        }
        let legs = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        Ok(Self {
            id,
            name: None,
            legs,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() {
            None
        } else {
            Some(name)
        };
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn legs(&self) -> (&EntitlementLabel, &EntitlementLabel) {
        (&self.legs.0, &self.legs.1)
    }

    pub fn involves(&self, label: &EntitlementLabel) -> bool {
        &self.legs.0 == label || &self.legs.1 == label
    }

    /// True when both legs are present in `labels`.
    pub fn matches(&self, labels: &BTreeSet<&EntitlementLabel>) -> bool {
        labels.contains(&self.legs.0) && labels.contains(&self.legs.1)
    }
}

/// Rules evaluated in one run, in insertion order. Ids and leg pairs are both unique.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<ConflictRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Returns `false` (and keeps the existing rule) when a rule with the same
    /// id or the same leg pair is already present.
    pub fn insert(&mut self, rule: ConflictRule) -> bool {
        if self.rules.iter().any(|r| r.id == rule.id || r.legs == rule.legs) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConflictRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule ids in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.id.clone()).collect()
    }
}

impl FromIterator<ConflictRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = ConflictRule>>(iter: T) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ConflictRule;
    type IntoIter = std::slice::Iter<'a, ConflictRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
