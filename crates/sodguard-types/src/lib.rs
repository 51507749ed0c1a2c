//! Stable DTOs and IDs used across the sodguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs, codes and verdict reasons
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    DataQuality, ReportEnvelope, Severity, SodguardData, SodguardReport, ToolMeta, Verdict,
    ViolationRecord, SCHEMA_REPORT_V1,
};
