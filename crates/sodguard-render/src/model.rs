#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableViolation {
    pub severity: RenderableSeverity,
    pub rule_id: String,
    pub rule_name: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub role_id: String,
    pub role_name: String,
    pub access_point: String,
}

/// Data-quality counters; only non-zero ones are rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableQuality {
    pub unknown_users: u32,
    pub unknown_roles: u32,
    pub unknown_privileges: u32,
    pub hierarchy_cycles: u32,
    pub unmapped_privileges: u32,
    pub ambiguous_privilege_names: u32,
}

impl RenderableQuality {
    pub fn entries(&self) -> [(&'static str, u32); 6] {
        [
            ("unknown users", self.unknown_users),
            ("unknown roles", self.unknown_roles),
            ("unknown privileges", self.unknown_privileges),
            ("hierarchy cycles", self.hierarchy_cycles),
            ("unmapped privilege names", self.unmapped_privileges),
            ("ambiguous privilege names", self.ambiguous_privilege_names),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub rule_ids: Vec<String>,
    pub users_scanned: u32,
    pub users_in_conflict: u32,
    pub violations_emitted: u32,
    pub violations_total: u32,
    pub truncated_reason: Option<String>,
    pub quality: RenderableQuality,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub reasons: Vec<String>,
    pub violations: Vec<RenderableViolation>,
    pub data: RenderableData,
}
