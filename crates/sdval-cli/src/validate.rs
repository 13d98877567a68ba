//! # Validate and Types Subcommands
//!
//! `sdval validate` reads an extracted document, validates it and writes
//! the issue list as a JSON array to stdout. The summary goes through
//! `tracing` so stdout stays machine-readable.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use sdval_core::{Document, Issue, Severity};

use crate::config::ValidatorConfig;

/// Arguments for the `sdval validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Extracted document (JSON with `jsonld`, `microdata`, `rdfa`, `errors`).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// schema.org JSON-LD vocabulary graph.
    #[arg(long, value_name = "PATH")]
    pub vocabulary: Option<PathBuf>,

    /// Skip the schema.org conformance checks even with a vocabulary.
    #[arg(long)]
    pub no_schema_org: bool,

    /// Remove the built-in rule-sets of a type. Repeatable.
    #[arg(long = "disable", value_name = "TYPE")]
    pub disabled_types: Vec<String>,

    /// Exit with a failure code on warnings too.
    #[arg(long)]
    pub fail_on_warnings: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pub pretty: bool,
}

impl ValidateArgs {
    /// Overlay the flags on the file configuration.
    pub fn apply(&self, mut config: ValidatorConfig) -> ValidatorConfig {
        if let Some(vocabulary) = &self.vocabulary {
            config.vocabulary = Some(vocabulary.clone());
        }
        if self.no_schema_org {
            config.schema_org_checks = false;
        }
        config.disabled_types.extend(self.disabled_types.iter().cloned());
        config.fail_on_warnings |= self.fail_on_warnings;
        config
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 without failing issues, 2 with failing issues.
pub fn run_validate(args: &ValidateArgs, config_path: Option<&Path>) -> Result<u8> {
    let config = args.apply(ValidatorConfig::load(config_path)?);
    let issues = validate_document(&config, &args.document)?;

    let mut stdout = std::io::stdout().lock();
    write_report(&mut stdout, &issues, args.pretty)?;

    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    tracing::info!(
        document = %args.document.display(),
        errors,
        warnings = issues.len() - errors,
        "validation complete"
    );
    Ok(exit_code(&issues, config.fail_on_warnings))
}

/// Validate the document at `path` with a validator built from `config`.
pub fn validate_document(config: &ValidatorConfig, path: &Path) -> Result<Vec<Issue>> {
    let validator = config.build_validator()?;
    let mut document = Document::from_path(path)
        .with_context(|| format!("loading document: {}", path.display()))?;
    Ok(validator.validate(&mut document))
}

/// Write `issues` as a JSON array followed by a newline.
pub fn write_report(out: &mut impl Write, issues: &[Issue], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, issues)?;
    } else {
        serde_json::to_writer(&mut *out, issues)?;
    }
    writeln!(out).context("writing report")?;
    Ok(())
}

/// 2 when any issue fails the run, else 0.
pub fn exit_code(issues: &[Issue], fail_on_warnings: bool) -> u8 {
    let failing = issues
        .iter()
        .any(|issue| issue.severity == Severity::Error || fail_on_warnings);
    if failing {
        2
    } else {
        0
    }
}

/// Execute the types subcommand: one registered type name per line.
pub fn run_types(config_path: Option<&Path>) -> Result<u8> {
    let config = ValidatorConfig::load(config_path)?;
    let registry = config.registry();
    let mut stdout = std::io::stdout().lock();
    for type_name in registry.type_names() {
        writeln!(stdout, "{type_name}")?;
    }
    Ok(0)
}
