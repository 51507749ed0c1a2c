//! Column layouts of the exported report tables.
//!
//! Every table has a header row. Columns are addressed by position; missing cells read as
//! empty strings and every cell is trimmed.

use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use sodguard_domain::model::AccessModel;
use sodguard_domain::rules::ConflictRule;

/// Rows read and rows skipped (empty key, invalid rule) for one table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub read: usize,
    pub skipped: usize,
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

/// Visit every data row of `text`. The visitor returns `false` to count the row as skipped.
fn for_each_row<F>(table: &str, text: &str, mut visit: F) -> anyhow::Result<TableStats>
where
    F: FnMut(&StringRecord) -> bool,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut stats = TableStats::default();
    for (idx, row) in reader.records().enumerate() {
        // +2: header is line 1.
        let record = row.with_context(|| format!("invalid {table} row at line {}", idx + 2))?;
        stats.read += 1;
        if !visit(&record) {
            stats.skipped += 1;
        }
    }
    Ok(stats)
}

/// Users: id = column 5, display name = column 2.
pub fn parse_users_csv(text: &str, model: &mut AccessModel) -> anyhow::Result<TableStats> {
    for_each_row("users", text, |r| {
        let id = cell(r, 5);
        if id.is_empty() {
            return false;
        }
        model.add_user(id, cell(r, 2));
        true
    })
}

/// Roles: id = column 0, name = column 1.
pub fn parse_roles_csv(text: &str, model: &mut AccessModel) -> anyhow::Result<TableStats> {
    for_each_row("roles", text, |r| {
        let id = cell(r, 0);
        if id.is_empty() {
            return false;
        }
        model.add_role(id, cell(r, 1));
        true
    })
}

/// Privileges: id = column 2, display name = column 1.
pub fn parse_privileges_csv(text: &str, model: &mut AccessModel) -> anyhow::Result<TableStats> {
    for_each_row("privileges", text, |r| {
        let id = cell(r, 2);
        if id.is_empty() {
            return false;
        }
        model.add_privilege(id, cell(r, 1));
        true
    })
}

/// Privilege-to-role relation: role id = column 2, privilege id = column 1.
pub fn parse_role_privileges_csv(
    text: &str,
    model: &mut AccessModel,
) -> anyhow::Result<TableStats> {
    for_each_row("role_privileges", text, |r| {
        let (role, privilege) = (cell(r, 2), cell(r, 1));
        if role.is_empty() || privilege.is_empty() {
            return false;
        }
        model.assign_privilege(role, privilege);
        true
    })
}

/// User-to-role mapping: user id = column 2, role id = column 0.
pub fn parse_user_roles_csv(text: &str, model: &mut AccessModel) -> anyhow::Result<TableStats> {
    for_each_row("user_roles", text, |r| {
        let (user, role) = (cell(r, 2), cell(r, 0));
        if user.is_empty() || role.is_empty() {
            return false;
        }
        model.assign_role(user, role);
        true
    })
}

/// Role hierarchy: child = column 1, parent = column 2. A later row for the same child wins.
pub fn parse_role_hierarchy_csv(
    text: &str,
    model: &mut AccessModel,
) -> anyhow::Result<TableStats> {
    for_each_row("role_hierarchy", text, |r| {
        let (child, parent) = (cell(r, 1), cell(r, 2));
        if child.is_empty() || parent.is_empty() {
            return false;
        }
        model.set_parent(child, parent);
        true
    })
}

/// Entitlements: label = column 0, access point (privilege display name) = column 1.
pub fn parse_entitlements_csv(
    text: &str,
    model: &mut AccessModel,
) -> anyhow::Result<TableStats> {
    for_each_row("entitlements", text, |r| {
        let (label, access_point) = (cell(r, 0), cell(r, 1));
        if label.is_empty() || access_point.is_empty() {
            return false;
        }
        model.map_access_point(access_point, label);
        true
    })
}

/// Rules: id = column 0, legs = columns 1 and 2, optional name = column 3.
///
/// Returns the first row whose id equals `rule_id` and whose legs form a valid rule.
/// Rows for other ids are read but not counted as skipped.
pub fn parse_rules_csv(
    text: &str,
    rule_id: &str,
) -> anyhow::Result<(Option<ConflictRule>, TableStats)> {
    let wanted = rule_id.trim();
    let mut selected: Option<ConflictRule> = None;
    let stats = for_each_row("rules", text, |r| {
        if selected.is_some() || cell(r, 0) != wanted {
            return true;
        }
        match ConflictRule::new(cell(r, 0), cell(r, 1), cell(r, 2)) {
            Ok(rule) => {
                selected = Some(rule.with_name(cell(r, 3)));
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "skipping rule row");
                false
            }
        }
    })?;
    Ok((selected, stats))
}
