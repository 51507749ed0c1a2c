use sodguard_types::{SodguardData, Verdict, ViolationRecord};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub violations: Vec<ViolationRecord>,
    pub data: SodguardData,
}

impl DomainReport {
    /// Distinct users with at least one emitted violation.
    pub fn users_reported(&self) -> Vec<&str> {
        let mut users: Vec<&str> = self.violations.iter().map(|v| v.user_id.as_str()).collect();
        users.sort_unstable();
        users.dedup();
        users
    }
}
