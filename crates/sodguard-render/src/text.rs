use crate::{RenderableReport, RenderableViolation};

/// One line per violation, in the listing format downstream scripts already parse.
pub fn render_violation_line(v: &RenderableViolation) -> String {
    format!(
        "SOD Conflict [ UserId={}, UserName={}, RoleId={}, Role={}, accessPoint={}]",
        v.user_id, v.user_name, v.role_id, v.role_name, v.access_point
    )
}

pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();
    for v in &report.violations {
        out.push_str(&render_violation_line(v));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        RenderableData, RenderableQuality, RenderableSeverity, RenderableVerdictStatus,
    };

    fn violation(role_id: &str, access_point: &str) -> RenderableViolation {
        RenderableViolation {
            severity: RenderableSeverity::Error,
            rule_id: "SOD-AP-01".to_string(),
            rule_name: None,
            user_id: "U1".to_string(),
            user_name: "John Doe".to_string(),
            role_id: role_id.to_string(),
            role_name: "Accounts Payable Specialist".to_string(),
            access_point: access_point.to_string(),
        }
    }

    #[test]
    fn line_matches_listing_format() {
        assert_eq!(
            render_violation_line(&violation("R1", "Create Payables Invoices")),
            "SOD Conflict [ UserId=U1, UserName=John Doe, RoleId=R1, Role=Accounts Payable Specialist, accessPoint=Create Payables Invoices]"
        );
    }

    #[test]
    fn text_has_one_line_per_violation() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            reasons: Vec::new(),
            violations: vec![violation("R1", "A"), violation("R2", "B")],
            data: RenderableData {
                profile: "strict".to_string(),
                rule_ids: vec!["SOD-AP-01".to_string()],
                users_scanned: 1,
                users_in_conflict: 1,
                violations_emitted: 2,
                violations_total: 2,
                truncated_reason: None,
                quality: RenderableQuality::default(),
                error: None,
            },
        };

        let text = render_text(&report);
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("accessPoint=B]\n"));
    }
}
