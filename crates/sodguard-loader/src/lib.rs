//! Table adapters: read the exported access-control reports into an [`AccessModel`].
//!
//! This crate is allowed to do filesystem IO. Parsing itself works on strings, see [`fuzz`].

#![forbid(unsafe_code)]

mod tables;

use anyhow::Context;
use camino::Utf8Path;
use sodguard_domain::model::AccessModel;
use sodguard_domain::rules::RuleSet;
use sodguard_settings::InputFiles;
use std::collections::BTreeMap;

pub use tables::{
    TableStats, parse_entitlements_csv, parse_privileges_csv, parse_role_hierarchy_csv,
    parse_role_privileges_csv, parse_roles_csv, parse_rules_csv, parse_user_roles_csv,
    parse_users_csv,
};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as every model table in turn.
    ///
    /// Returns `Err(...)` on the first CSV-level failure. **Never panics** on any input.
    pub fn parse_model_tables(text: &str) -> anyhow::Result<()> {
        let mut model = AccessModel::new();
        parse_users_csv(text, &mut model)?;
        parse_roles_csv(text, &mut model)?;
        parse_privileges_csv(text, &mut model)?;
        parse_role_privileges_csv(text, &mut model)?;
        parse_user_roles_csv(text, &mut model)?;
        parse_role_hierarchy_csv(text, &mut model)?;
        parse_entitlements_csv(text, &mut model)?;
        let _ = model.ambiguous_privilege_names();
        Ok(())
    }

    /// Parse arbitrary text as a rules table and select `rule_id`.
    pub fn parse_rules(text: &str, rule_id: &str) -> anyhow::Result<()> {
        let _ = parse_rules_csv(text, rule_id)?;
        Ok(())
    }
}

/// Per-table row counts from one load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub tables: BTreeMap<&'static str, TableStats>,
}

impl LoadStats {
    pub fn rows_read(&self) -> usize {
        self.tables.values().map(|t| t.read).sum()
    }

    pub fn rows_skipped(&self) -> usize {
        self.tables.values().map(|t| t.skipped).sum()
    }
}

#[derive(Clone, Debug)]
pub struct LoadedTables {
    pub model: AccessModel,
    /// Empty when no valid row exists for the requested rule id.
    pub rules: RuleSet,
    pub stats: LoadStats,
}

type ModelParser = fn(&str, &mut AccessModel) -> anyhow::Result<TableStats>;

/// Read all eight tables from `data_dir` and select the conflict rule `rule_id`.
pub fn load_tables(
    data_dir: &Utf8Path,
    files: &InputFiles,
    rule_id: &str,
) -> anyhow::Result<LoadedTables> {
    let mut model = AccessModel::new();
    let mut stats = LoadStats::default();

    let model_tables: [(&'static str, &str, ModelParser); 7] = [
        ("users", files.users.as_str(), parse_users_csv),
        ("roles", files.roles.as_str(), parse_roles_csv),
        ("privileges", files.privileges.as_str(), parse_privileges_csv),
        ("role_privileges", files.role_privileges.as_str(), parse_role_privileges_csv),
        ("user_roles", files.user_roles.as_str(), parse_user_roles_csv),
        ("role_hierarchy", files.role_hierarchy.as_str(), parse_role_hierarchy_csv),
        ("entitlements", files.entitlements.as_str(), parse_entitlements_csv),
    ];

    for (table, file, parse) in model_tables {
        let path = data_dir.join(file);
        let text = read_table(&path)?;
        let table_stats = parse(&text, &mut model).with_context(|| format!("parse {path}"))?;
        tracing::debug!(
            table,
            path = %path,
            read = table_stats.read,
            skipped = table_stats.skipped,
            "table loaded"
        );
        stats.tables.insert(table, table_stats);
    }

    let rules_path = data_dir.join(&files.rules);
    let text = read_table(&rules_path)?;
    let (rule, rule_stats) =
        parse_rules_csv(&text, rule_id).with_context(|| format!("parse {rules_path}"))?;
    stats.tables.insert("rules", rule_stats);

    let rules: RuleSet = match rule {
        Some(rule) => {
            tracing::info!(rule_id = rule.id(), "conflict rule selected");
            std::iter::once(rule).collect()
        }
        None => {
            tracing::warn!(rule_id, path = %rules_path, "no valid row for conflict rule");
            RuleSet::new()
        }
    };

    tracing::info!(
        users = model.users.len(),
        roles = model.roles.len(),
        privileges = model.privileges.len(),
        rows_skipped = stats.rows_skipped(),
        "access model loaded"
    );

    Ok(LoadedTables {
        model,
        rules,
        stats,
    })
}

fn read_table(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {path}"))
}
