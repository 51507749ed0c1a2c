//! CLI entry point for sodguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `sodguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use sodguard_app::{
    CheckInput, ExplainOutput, format_explanation, format_not_found, parse_report_json,
    render_markdown, render_text, run_check, run_explain, runtime_error_report, serialize_report,
    to_renderable, verdict_exit_code,
};
use sodguard_settings::Overrides;
use sodguard_types::{SodguardReport, Verdict};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sodguard",
    version,
    about = "Segregation-of-duty conflict detection over exported access-control tables"
)]
struct Cli {
    /// Directory holding the exported CSV tables.
    #[arg(long, global = true, default_value = "data")]
    data_dir: Utf8PathBuf,

    /// Path to sodguard config TOML (relative paths resolve against the data directory).
    #[arg(long, global = true, default_value = "sodguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|compat).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override maximum violations to emit.
    #[arg(long, global = true)]
    max_violations: Option<u32>,

    /// Override evidence policy (cartesian|strict).
    #[arg(long, global = true)]
    evidence: Option<String>,

    /// Override rule match policy (all|first).
    #[arg(long, global = true)]
    rule_match: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one conflict rule and write artifacts.
    Check {
        /// Conflict rule id, as found in the first column of the rules table.
        rule_id: String,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/sodguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/sodguard/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Do not print the conflict listing to stdout.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/sodguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "sod.conflict") or code (e.g., "hierarchy_cycle") to explain.
        identifier: String,
    },
}

struct CheckArgs {
    rule_id: String,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Check {
            rule_id,
            report_out,
            write_markdown,
            markdown_out,
            quiet,
        } => {
            let args = CheckArgs {
                rule_id: rule_id.clone(),
                report_out: report_out.clone(),
                write_markdown: *write_markdown,
                markdown_out: markdown_out.clone(),
                quiet: *quiet,
            };
            cmd_check(&cli, args)
        }
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

/// Logs go to stderr so stdout stays reserved for the conflict listing.
fn init_logging() {
    let filter = EnvFilter::try_from_env("SODGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_check(cli: &Cli, args: CheckArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        if !cli.data_dir.is_dir() {
            anyhow::bail!("data directory does not exist: {}", cli.data_dir);
        }
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_path = cli.data_dir.join(&cli.config);
        let cfg_text = read_config_text(&cfg_path);

        let overrides = Overrides {
            profile: cli.profile.clone(),
            max_violations: cli.max_violations,
            evidence: cli.evidence.clone(),
            rule_match: cli.rule_match.clone(),
        };

        let input = CheckInput {
            data_dir: &cli.data_dir,
            config_text: &cfg_text,
            overrides,
            rule_id: &args.rule_id,
        };

        let output = run_check(input)?;
        let report = &output.report;

        write_report_file(&args.report_out, report).context("write report json")?;

        let renderable = to_renderable(report);
        if args.write_markdown {
            let md = render_markdown(&renderable);
            write_text_file(&args.markdown_out, &md).context("write markdown")?;
        }

        if !args.quiet {
            print!("{}", render_text(&renderable));
        }
        if report.verdict == Verdict::Skip {
            eprintln!(
                "sodguard: no valid conflict rule with id {} in {}",
                args.rule_id, output.resolved_config.inputs.rules
            );
        }

        Ok(verdict_exit_code(report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&args.rule_id, &format!("{err:#}"));
            let _ = write_report_file(&args.report_out, &report);
            eprintln!("sodguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn read_config_text(path: &Utf8Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "no config file; using defaults");
            String::new()
        }
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "config file unreadable; using defaults");
            String::new()
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &SodguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    create_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    create_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn create_parent(path: &Utf8Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory: {}", parent)),
        _ => Ok(()),
    }
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{}", md),
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found { kind, explanation } => {
            print!("{}", format_explanation(kind, &explanation));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
