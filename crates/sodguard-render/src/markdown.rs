use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Sodguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Skip => "SKIP",
    };
    let rules = if report.data.rule_ids.is_empty() {
        "(none)".to_string()
    } else {
        report
            .data
            .rule_ids
            .iter()
            .map(|r| format!("`{r}`"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Rules: {}\n- Profile: {}\n- Users: {} in conflict / {} scanned\n- Violations: {} (emitted) / {} (total)\n\n",
        verdict,
        rules,
        report.data.profile,
        report.data.users_in_conflict,
        report.data.users_scanned,
        report.data.violations_emitted,
        report.data.violations_total
    ));

    if let Some(e) = &report.data.error {
        out.push_str(&format!("> Error: {}\n\n", e));
    }
    for reason in &report.reasons {
        out.push_str(&format!("> Reason: {}\n\n", reason));
    }
    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    let quality: Vec<_> = report
        .data
        .quality
        .entries()
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .collect();
    if !quality.is_empty() {
        out.push_str("## Data quality\n\n");
        for (label, n) in quality {
            out.push_str(&format!("- {}: {}\n", label, n));
        }
        out.push('\n');
    }

    if report.violations.is_empty() {
        out.push_str("No violations.\n");
        return out;
    }

    out.push_str("## Violations\n\n");
    out.push_str("| Severity | Rule | User | Role | Access point |\n");
    out.push_str("|---|---|---|---|---|\n");

    for v in &report.violations {
        let sev = match v.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };
        let rule = match &v.rule_name {
            Some(name) => format!("`{}` {}", v.rule_id, cell(name)),
            None => format!("`{}`", v.rule_id),
        };
        out.push_str(&format!(
            "| {} | {} | `{}` {} | `{}` {} | {} |\n",
            sev,
            rule,
            v.user_id,
            cell(&v.user_name),
            v.role_id,
            cell(&v.role_name),
            cell(&v.access_point)
        ));
    }

    out
}

/// Escape a value for a Markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
