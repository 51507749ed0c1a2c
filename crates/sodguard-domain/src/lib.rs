//! Pure segregation-of-duty evaluation (no IO).
//!
//! Input: an access model snapshot and a conflict rule set constructed elsewhere.
//! Output: violation records + verdict + summary data.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod entitlements;
pub mod fingerprint;
pub mod hierarchy;
pub mod model;
pub mod policy;
pub mod report;
pub mod rules;

mod engine;
mod exempt;

pub use engine::{UserAnalysis, analyze_user, evaluate};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
