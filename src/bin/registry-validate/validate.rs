use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use codex_registry::{Config, Issue, Registry, domain::validate};
use tracing::instrument;

use crate::{logging, terminal::Colorize};

/// Check a compiled registry for duplicate ids, inconsistent suits and other
/// data-shape problems
///
/// Compilation itself never performs these checks.
#[derive(Debug, Parser)]
#[command(name = "registry-validate", version, about)]
pub struct Validate {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file [default: registry.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The registry to check [default: the configured output path]
    registry: Option<PathBuf>,

    /// Types of checks to run (can be specified multiple times)
    #[arg(long, value_name = "TYPE")]
    check: Vec<CheckType>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    format: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, PartialEq, Eq)]
enum CheckType {
    /// Check ids and names (duplicates, ids that are not slugs of names)
    Identity,
    /// Check suits agree with card names
    Suits,
    /// Check frequencies are positive and recognised
    Frequencies,
    /// Check list fields for blank or repeated entries
    Lists,
    /// Run all checks
    All,
}

impl CheckType {
    const EACH: [Self; 4] = [Self::Identity, Self::Suits, Self::Frequencies, Self::Lists];

    const fn of(issue: &Issue) -> Self {
        match issue {
            Issue::DuplicateId { .. } | Issue::DuplicateName { .. } | Issue::IdMismatch { .. } => {
                Self::Identity
            }
            Issue::SuitMismatch { .. } => Self::Suits,
            Issue::NonPositiveFrequency { .. } | Issue::UnknownFrequency { .. } => {
                Self::Frequencies
            }
            Issue::BlankListEntry { .. } | Issue::DuplicateListEntry { .. } => Self::Lists,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Identity => "Identity:   ",
            Self::Suits => "Suits:      ",
            Self::Frequencies => "Frequencies:",
            Self::Lists => "Lists:      ",
            Self::All => "All:        ",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

impl Validate {
    pub fn run(self) -> anyhow::Result<()> {
        logging::setup(self.verbose);

        let config = Config::discover(self.config.as_deref())?;
        self.run_checks(&config)
    }

    #[instrument(level = "debug", skip(self, config))]
    fn run_checks(&self, config: &Config) -> anyhow::Result<()> {
        let path = self
            .registry
            .clone()
            .unwrap_or_else(|| config.output().to_path_buf());

        let registry = Registry::load(&path)
            .with_context(|| format!("failed to load registry {}", path.display()))?;

        let checks = if self.check.is_empty() || self.check.contains(&CheckType::All) {
            CheckType::EACH.to_vec()
        } else {
            self.check.clone()
        };

        let issues: Vec<Issue> = validate(registry.cards())
            .into_iter()
            .filter(|issue| checks.contains(&CheckType::of(issue)))
            .collect();

        match self.format {
            OutputFormat::Table => self.output_table(&path, &registry, &checks, &issues),
            OutputFormat::Json => self.output_json(&registry, &issues)?,
            OutputFormat::Summary => Self::output_summary(&issues),
        }

        // Exit with appropriate code
        if !issues.is_empty() {
            std::process::exit(2);
        }

        Ok(())
    }

    fn output_table(
        &self,
        path: &Path,
        registry: &Registry,
        checks: &[CheckType],
        issues: &[Issue],
    ) {
        if self.quiet {
            return;
        }

        println!("Validating {}...\n", path.display());

        for check in checks {
            let found: Vec<&Issue> = issues
                .iter()
                .filter(|issue| CheckType::of(issue) == *check)
                .collect();

            if found.is_empty() {
                println!("✓ {} {} cards, no issues", check.label(), registry.len());
            } else {
                println!(
                    "{}",
                    format!("✗ {} {} issues found", check.label(), found.len()).warning()
                );
                for issue in found {
                    println!("  • {issue}");
                }
            }
        }

        if issues.is_empty() {
            println!("\n{}", "Registry is healthy (0 issues)".success());
        } else {
            println!("\n{}", format!("Summary: {} issues found", issues.len()).warning());

            if issues
                .iter()
                .any(|issue| matches!(issue, Issue::DuplicateId { .. }))
            {
                let hint = "Duplicate ids come from headings that slug to the same text; \
                            rename one of the cards";
                println!("\n{}", hint.dim());
            }
        }
    }

    fn output_json(&self, registry: &Registry, issues: &[Issue]) -> anyhow::Result<()> {
        use serde_json::json;

        if self.quiet {
            return Ok(());
        }

        let output = json!({
            "status": if issues.is_empty() { "healthy" } else { "issues_found" },
            "cards": registry.len(),
            "issues": issues,
            "summary": {
                "total_issues": issues.len(),
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(issues: &[Issue]) {
        println!("issues={}", issues.len());
    }
}
