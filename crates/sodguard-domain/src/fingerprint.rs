use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a violation record.
///
/// Identity fields:
/// - check_id
/// - rule_id
/// - user_id
/// - role_id
/// - access point (privilege display name)
pub fn fingerprint_for_violation(
    check_id: &str,
    rule_id: &str,
    user_id: &str,
    role_id: &str,
    access_point: &str,
) -> String {
    let canonical = [check_id, rule_id, user_id, role_id, access_point].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
