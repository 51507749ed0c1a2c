use anyhow::Context;
use sodguard_render::{
    RenderableData, RenderableQuality, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus, RenderableViolation,
};
use sodguard_types::{
    SCHEMA_REPORT_V1, Severity, SodguardData, SodguardReport, ToolMeta, Verdict, ViolationRecord,
    ids,
};
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "sodguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<SodguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse sodguard report")
}

pub fn serialize_report(report: &SodguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Report written when the run fails before evaluation (unreadable tables, bad config).
pub fn runtime_error_report(rule_id: &str, message: &str) -> SodguardReport {
    let now = OffsetDateTime::now_utc();
    SodguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        reasons: vec![ids::REASON_RUNTIME_ERROR.to_string()],
        violations: Vec::new(),
        data: SodguardData {
            profile: "unknown".to_string(),
            rule_ids: vec![rule_id.to_string()],
            error: Some(message.to_string()),
            ..SodguardData::default()
        },
    }
}

pub fn to_renderable(report: &SodguardReport) -> RenderableReport {
    let q = &report.data.quality;
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
            Verdict::Skip => RenderableVerdictStatus::Skip,
        },
        reasons: report.reasons.clone(),
        violations: report.violations.iter().map(renderable_violation).collect(),
        data: RenderableData {
            profile: report.data.profile.clone(),
            rule_ids: report.data.rule_ids.clone(),
            users_scanned: report.data.users_scanned,
            users_in_conflict: report.data.users_in_conflict,
            violations_emitted: report.data.violations_emitted,
            violations_total: report.data.violations_total,
            truncated_reason: report.data.truncated_reason.clone(),
            quality: RenderableQuality {
                unknown_users: q.unknown_users,
                unknown_roles: q.unknown_roles,
                unknown_privileges: q.unknown_privileges,
                hierarchy_cycles: q.hierarchy_cycles,
                unmapped_privileges: q.unmapped_privileges,
                ambiguous_privilege_names: q.ambiguous_privilege_names,
            },
            error: report.data.error.clone(),
        },
    }
}

fn renderable_violation(v: &ViolationRecord) -> RenderableViolation {
    RenderableViolation {
        severity: match v.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        rule_id: v.rule_id.clone(),
        rule_name: v.rule_name.clone(),
        user_id: v.user_id.clone(),
        user_name: v.user_name.clone(),
        role_id: v.role_id.clone(),
        role_name: v.role_name.clone(),
        access_point: v.access_point.clone(),
    }
}
