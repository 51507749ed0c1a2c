//! Developer tasks (schema generation, golden fixture refresh, conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use sodguard_test_util::{normalize_nondeterministic, to_golden_string};
use std::fs;
use std::path::{Path, PathBuf};

/// Every golden fixture is evaluated against this rule.
const FIXTURE_RULE_ID: &str = "SOD-AP-01";
const GOLDEN_FILE: &str = "expected.report.json";

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(sodguard_types::SodguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(sodguard_settings::SodguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "sodguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "sodguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write schema {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &missing {
        eprintln!("missing schema: {name}");
    }
    for name in &mismatched {
        eprintln!("schema out of date: {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Token pattern for verdict reasons.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Fixture directories, sorted by name.
fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let root = fixtures_dir()?;
    let mut dirs = Vec::new();
    for entry in fs::read_dir(&root).with_context(|| format!("read {}", root.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn fixture_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Validate every golden report against the generated report schema and check reason tokens.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("compile report schema: {e}"))?;

    let mut errors = Vec::new();
    let mut checked = 0;

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);
        let golden = dir.join(GOLDEN_FILE);
        if !golden.exists() {
            continue;
        }
        let text = fs::read_to_string(&golden)
            .with_context(|| format!("read {}", golden.display()))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("parse {name}/{GOLDEN_FILE}"))?;

        for err in validator.iter_errors(&value) {
            errors.push(format!("{name}: schema validation: {err}"));
        }

        if let Some(reasons) = value.get("reasons").and_then(|v| v.as_array()) {
            for (i, reason) in reasons.iter().enumerate() {
                let token = reason.as_str().unwrap_or_default();
                if !is_valid_token(token) {
                    errors.push(format!("{name}: reasons[{i}] '{token}' is not a valid token"));
                }
            }
        }

        checked += 1;
        println!("  ✓ {name} validates");
    }

    if checked == 0 {
        bail!("no golden reports found under tests/fixtures/");
    }
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("conformance failed with {} errors", errors.len());
    }

    println!("\n✓ All {checked} golden reports conform.");
    Ok(())
}

/// Re-run the built binary on every fixture and rewrite its golden report.
fn update_golden() -> anyhow::Result<()> {
    let bin = project_root()?.join("target").join("debug").join("sodguard");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "sodguard binary not found at {}.\nRun `cargo build -p sodguard-cli` first.",
            bin.display()
        );
    }

    for dir in fixture_dirs()? {
        let name = fixture_name(&dir);
        let temp = tempfile::tempdir().context("create temp dir")?;
        let report_out = temp.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .arg("--data-dir")
            .arg(&dir)
            .args(["check", FIXTURE_RULE_ID, "--quiet", "--report-out"])
            .arg(&report_out)
            .output()
            .with_context(|| format!("run sodguard on fixture '{name}'"))?;

        if !report_out.exists() {
            bail!(
                "fixture '{name}': no report written (exit {:?}): {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let text = fs::read_to_string(&report_out)?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parse report for fixture '{name}'"))?;
        let golden = to_golden_string(&normalize_nondeterministic(value));
        fs::write(dir.join(GOLDEN_FILE), golden)
            .with_context(|| format!("write golden report for '{name}'"))?;
        println!("  ✓ {name} (exit {:?})", output.status.code());
    }
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use sodguard_types::explain::{all_check_ids, all_codes, lookup_explanation};

    let mut errors = Vec::new();
    for id in all_check_ids().iter().chain(all_codes()) {
        match lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() || exp.description.is_empty() || exp.remediation.is_empty()
                {
                    errors.push(format!("'{id}' has an empty explanation field"));
                }
            }
            None => errors.push(format!("'{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", all_check_ids().len());
        println!("✓ {} codes have explanations", all_codes().len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("explain coverage failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate golden fixture reports against the report schema");
    eprintln!("  update-golden     Regenerate golden reports from the debug binary");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "update-golden" => update_golden(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
