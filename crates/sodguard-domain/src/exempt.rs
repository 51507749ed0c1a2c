use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compile exempt-user patterns. Invalid patterns are skipped here; settings resolution
/// rejects them before the engine runs.
pub fn build_exemptions(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // Case-sensitive, like the ids themselves.
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder.build().ok()
}

pub fn is_exempt(exempt: Option<&GlobSet>, user_id: &str) -> bool {
    exempt.map(|set| set.is_match(user_id)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_globs_and_ignores_empty_list() {
        let set = build_exemptions(&["SVC_*".to_string(), "U42".to_string()]);
        assert!(is_exempt(set.as_ref(), "SVC_BATCH"));
        assert!(is_exempt(set.as_ref(), "U42"));
        assert!(!is_exempt(set.as_ref(), "U1"));
        assert!(!is_exempt(build_exemptions(&[]).as_ref(), "SVC_BATCH"));
    }
}
