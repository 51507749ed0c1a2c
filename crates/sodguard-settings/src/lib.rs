//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{InputsConfig, SCHEMA_CONFIG_V1, SodguardConfigV1};
pub use resolve::{InputFiles, Overrides, ResolvedConfig};

/// Parse `sodguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SodguardConfigV1> {
    let cfg: SodguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + file values + overrides).
pub fn resolve_config(
    cfg: SodguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
