//! The `check` use case: load the tables, evaluate one conflict rule and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use sodguard_loader::LoadStats;
use sodguard_settings::{Overrides, ResolvedConfig};
use sodguard_types::{SCHEMA_REPORT_V1, SodguardData, SodguardReport, Verdict, ids};
use time::OffsetDateTime;

use crate::report::tool_meta;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Directory holding the exported CSV tables.
    pub data_dir: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Conflict rule to evaluate.
    pub rule_id: &'a str,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: SodguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    pub load_stats: LoadStats,
}

/// Run the check use case: parse config, load tables, evaluate, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        sodguard_settings::SodguardConfigV1::default()
    } else {
        sodguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = sodguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    let effective = &resolved.effective;
    tracing::debug!(
        profile = %effective.profile,
        rule_match = effective.rule_match.as_str(),
        evidence = effective.evidence.as_str(),
        "config resolved"
    );

    let loaded = sodguard_loader::load_tables(input.data_dir, &resolved.inputs, input.rule_id)
        .context("load tables")?;

    let (verdict, reasons, violations, data) = if loaded.rules.is_empty() {
        let data = SodguardData {
            profile: effective.profile.clone(),
            rule_match: effective.rule_match.as_str().to_string(),
            evidence: effective.evidence.as_str().to_string(),
            ..SodguardData::default()
        };
        (
            Verdict::Skip,
            vec![ids::REASON_RULE_NOT_FOUND.to_string()],
            Vec::new(),
            data,
        )
    } else {
        let domain_report = sodguard_domain::evaluate(&loaded.model, &loaded.rules, effective);
        let sodguard_domain::report::DomainReport {
            verdict,
            violations,
            data,
        } = domain_report;

        let q = &data.quality;
        if *q != sodguard_types::DataQuality::default() {
            tracing::warn!(
                unknown_users = q.unknown_users,
                unknown_roles = q.unknown_roles,
                unknown_privileges = q.unknown_privileges,
                hierarchy_cycles = q.hierarchy_cycles,
                unmapped_privileges = q.unmapped_privileges,
                ambiguous_privilege_names = q.ambiguous_privilege_names,
                "data quality issues in exported tables"
            );
        }

        let mut reasons = Vec::new();
        if data.truncated_reason.is_some() {
            reasons.push(ids::REASON_TRUNCATED.to_string());
        }
        (verdict, reasons, violations, data)
    };

    tracing::info!(
        rule_id = input.rule_id,
        verdict = ?verdict,
        violations = data.violations_total,
        users_in_conflict = data.users_in_conflict,
        "check finished"
    );

    let report = SodguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        reasons,
        violations,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
        load_stats: loaded.stats,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail, 1 = nothing evaluated.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
        Verdict::Skip => 1,
    }
}
