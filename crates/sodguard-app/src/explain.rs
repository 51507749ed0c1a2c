//! The `explain` use case: look up guidance for a check id or a code.

use sodguard_types::explain::{self, Explanation};

/// Whether an identifier names a check or a code within a check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    Check,
    Code,
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found {
        kind: IdentifierKind,
        explanation: Explanation,
    },
    /// Unknown identifier; carries every known check id and code for the hint.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let identifier = identifier.trim();
    match explain::lookup_explanation(identifier) {
        Some(explanation) => {
            let kind = if explain::all_check_ids().contains(&identifier) {
                IdentifierKind::Check
            } else {
                IdentifierKind::Code
            };
            ExplainOutput::Found { kind, explanation }
        }
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(kind: IdentifierKind, exp: &Explanation) -> String {
    let mut out = String::new();

    let heading = match kind {
        IdentifierKind::Check => format!("{} (check)", exp.title),
        IdentifierKind::Code => format!("{} (code)", exp.title),
    };
    out.push_str(&heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    push_section(&mut out, "Remediation", exp.remediation);
    out.push_str("Example\n-------\n\n");
    out.push_str("Flagged data:\n");
    push_block(&mut out, exp.examples.before);
    out.push_str("\nAfter the fix:\n");
    push_block(&mut out, exp.examples.after);

    out
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.len()));
    out.push('\n');
    out.push_str(body);
    out.push_str("\n\n");
}

fn push_block(out: &mut String, body: &str) {
    out.push_str("```text\n");
    out.push_str(body);
    out.push_str("\n```\n");
}

/// Format the "not found" message for terminal display.
pub fn format_not_found(identifier: &str, check_ids: &[&str], codes: &[&str]) -> String {
    let mut out = format!("Unknown check_id or code: {identifier}\n\n");
    out.push_str("Checks:\n");
    for id in check_ids {
        out.push_str(&format!("  {id}\n"));
    }
    out.push_str("\nCodes:\n");
    for code in codes {
        out.push_str(&format!("  {code}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_id_is_found_as_check() {
        match run_explain("sod.conflict") {
            ExplainOutput::Found { kind, explanation } => {
                assert_eq!(kind, IdentifierKind::Check);
                assert_eq!(explanation.title, "Segregation-of-Duty Conflict");
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn code_is_found_as_code() {
        let output = run_explain(" hierarchy_cycle ");
        assert!(matches!(
            output,
            ExplainOutput::Found {
                kind: IdentifierKind::Code,
                ..
            }
        ));
    }

    #[test]
    fn unknown_identifier_lists_alternatives() {
        match run_explain("not_a_real_thing") {
            ExplainOutput::NotFound {
                identifier,
                available_check_ids,
                available_codes,
            } => {
                assert_eq!(identifier, "not_a_real_thing");
                assert!(available_check_ids.contains(&"sod.conflict"));
                assert!(available_codes.contains(&"unmapped_privilege"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn formatted_explanation_has_sections() {
        let ExplainOutput::Found { kind, explanation } = run_explain("sod.conflict") else {
            panic!("expected Found");
        };
        let formatted = format_explanation(kind, &explanation);
        assert!(formatted.starts_with("Segregation-of-Duty Conflict (check)\n===="));
        assert!(formatted.contains("Remediation\n-----------\n"));
        assert!(formatted.contains("Flagged data:\n```text\n"));
        assert!(formatted.contains("exempt_users"));
    }

    #[test]
    fn not_found_lists_checks_and_codes() {
        let formatted = format_not_found("missing", &["check.one"], &["code.one", "code.two"]);
        assert!(formatted.contains("Unknown check_id or code: missing"));
        assert!(formatted.contains("Checks:\n  check.one\n"));
        assert!(formatted.contains("Codes:\n  code.one\n  code.two\n"));
    }
}
