//! folio-reach CLI
//!
//! Runs the constraint-propagation pipeline over a registry and inspects
//! the reference tables.
//!
//! # Usage
//!
//! ```bash
//! # Batch run, reports to stdout as JSON Lines
//! folio-reach run --entries demos/registry.tsv
//!
//! # Batch run with diagnostics, summary and manifest files
//! folio-reach run --entries registry.jsonl --out reports.jsonl \
//!     --summary summary.json --manifest manifest.json --diagnostics
//!
//! # Decompose tokens
//! folio-reach decompose qokeedy chol daiin
//!
//! # One ad hoc entry
//! folio-reach entry f1r.1 fachys ykal ar ataiin
//!
//! # Validate tables and show the legality monotonicity report
//! folio-reach check-tables --tables tables/
//! ```
//!
//! Tables are taken from `--tables`, then `FOLIO_REACH_TABLES`, then
//! `./tables`. Logs go to stderr; `RUST_LOG` overrides the level.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use folio_reach::reach_core::stages::{decompose_token, middle_class};
use folio_reach::reach_core::{ConstraintPipeline, ReferenceTables, TableLoader};
use folio_reach::reach_types::{Decomposition, EntryReport, ReachStatus, RegistryEntry};
use folio_reach::{
    read_registry, BatchOptions, BatchRunner, BatchSummary, ReportWriter, RunManifest,
    TableFingerprint,
};

#[derive(Parser)]
#[command(name = "folio-reach")]
#[command(version)]
#[command(about = "Label downstream targets per registry entry")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tables directory (falls back to FOLIO_REACH_TABLES, then ./tables)
    #[arg(long, short = 't', global = true)]
    tables: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over a registry file
    Run {
        /// Registry file (.jsonl/.json as JSON Lines, anything else as TSV)
        #[arg(long, short = 'e')]
        entries: PathBuf,

        /// Report file (stdout if not provided)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the batch summary as JSON to this file
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Write the run manifest as JSON to this file
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Include intermediate pipeline state in every report
        #[arg(long)]
        diagnostics: bool,

        /// Propagate every entry separately instead of once per RESTRICTED set
        #[arg(long)]
        no_dedupe: bool,
    },

    /// Decompose tokens into marker, middle and suffix
    Decompose {
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Run a single ad hoc entry
    Entry {
        id: String,
        tokens: Vec<String>,
    },

    /// Load and validate the tables
    CheckTables,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match &cli.command {
        Commands::Run {
            entries,
            out,
            summary,
            manifest,
            diagnostics,
            no_dedupe,
        } => cmd_run(
            &cli,
            RunArgs {
                entries,
                out: out.as_deref(),
                summary: summary.as_deref(),
                manifest: manifest.as_deref(),
                options: BatchOptions {
                    dedupe: !no_dedupe,
                    diagnostics: *diagnostics,
                },
            },
        ),
        Commands::Decompose { tokens } => cmd_decompose(&cli, tokens),
        Commands::Entry { id, tokens } => cmd_entry(&cli, id, tokens),
        Commands::CheckTables => cmd_check_tables(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                let error = serde_json::json!({ "error": format!("{:#}", e) });
                println!("{}", error);
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_tables(cli: &Cli) -> Result<Arc<ReferenceTables>> {
    let loader = match &cli.tables {
        Some(dir) => TableLoader::new(dir),
        None => TableLoader::from_env(),
    };
    Ok(Arc::new(loader.load()?))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

struct RunArgs<'a> {
    entries: &'a Path,
    out: Option<&'a Path>,
    summary: Option<&'a Path>,
    manifest: Option<&'a Path>,
    options: BatchOptions,
}

fn cmd_run(cli: &Cli, args: RunArgs<'_>) -> Result<()> {
    let started_at = Utc::now();
    let tables = load_tables(cli)?;
    let table_fingerprint = TableFingerprint::compute(&tables)?;
    let entries = read_registry(args.entries)?;

    let runner = BatchRunner::new(ConstraintPipeline::new(Arc::clone(&tables)), args.options);
    let batch = runner.run(&entries);
    let reports = runner.reports(&batch);

    let output = match args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = ReportWriter::new(BufWriter::new(file));
            writer.write_all(&reports)?;
            writer.finish()?
        }
        None => {
            let mut writer = ReportWriter::new(io::stdout().lock());
            writer.write_all(&reports)?;
            writer.finish()?
        }
    };

    let summary = BatchSummary::compute(&batch.outcomes, &tables);
    let manifest = RunManifest::new(
        started_at,
        batch.len(),
        batch.distinct_keys,
        batch.duration_ms,
        table_fingerprint,
        output,
    );

    if let Some(path) = args.summary {
        write_json_file(path, &summary)?;
    }
    if let Some(path) = args.manifest {
        write_json_file(path, &manifest)?;
    }

    // stdout carries the reports when no --out is given
    if args.out.is_some() && !cli.quiet {
        match cli.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "manifest": manifest,
                "summary": summary,
            }))?,
            OutputFormat::Pretty => print_summary(&summary, &manifest),
        }
    }

    Ok(())
}

fn print_summary(summary: &BatchSummary, manifest: &RunManifest) {
    println!(
        "{} {} entries, {} distinct restricted sets, {}ms",
        "OK".green().bold(),
        summary.entries,
        manifest.distinct_restricted_sets,
        manifest.duration_ms
    );
    println!("  run:     {}", manifest.run_id);
    println!("  tables:  {}", manifest.tables.short());
    println!("  output:  {}", manifest.output.hash);
    println!();

    println!("{}", "Labels".bold());
    for status in ReachStatus::ALL {
        println!("  {:<12} {}", status.to_string(), summary.labels.get(status));
    }
    println!();

    println!("{}", "Compatible folios".bold());
    for (count, entries) in &summary.compatible_folio_histogram {
        println!("  {:>4} folios: {}", count, entries);
    }
    println!("  mean: {:.2}", summary.compatible_folios_mean);
    println!(
        "  closed entries: {}, unrestricted entries: {}",
        summary.closed_entries, summary.unrestricted_entries
    );
    println!();

    println!("{}", "Effective vocabulary".bold());
    println!(
        "  min {}  mean {:.1}  max {}",
        summary.effective_vocabulary.min,
        summary.effective_vocabulary.mean,
        summary.effective_vocabulary.max
    );
    println!();

    println!("{}", "Mean reachable classes".bold());
    for zone in &summary.zones {
        println!("  {:<6} {:.1}", zone.zone, zone.mean_reachable_classes);
    }

    if summary.monotonicity_violations > 0 {
        println!(
            "\n{} {} entries with widening zone vocabularies",
            "WARN".yellow().bold(),
            summary.monotonicity_violations
        );
    }

    if !summary.expectations.is_empty() {
        println!();
        println!("{}", "Expectations".bold());
        for check in &summary.expectations {
            let mark = if check.passed {
                "PASS".green()
            } else {
                "FAIL".red()
            };
            println!(
                "  {} {} = {:.2} (expected {:.2}..={:.2})",
                mark, check.name, check.observed, check.expected.0, check.expected.1
            );
        }
    }
}

#[derive(Serialize)]
struct DecomposedToken<'a> {
    token: &'a str,
    decomposition: Decomposition,
    #[serde(skip_serializing_if = "Option::is_none")]
    spread: Option<u32>,
}

fn cmd_decompose(cli: &Cli, tokens: &[String]) -> Result<()> {
    let tables = load_tables(cli)?;
    let rows: Vec<DecomposedToken<'_>> = tokens
        .iter()
        .map(|token| {
            let decomposition = decompose_token(token, &tables.markers);
            let spread = decomposition
                .morphology()
                .filter(|m| m.has_middle())
                .map(|m| tables.spreads.spread(&m.middle));
            DecomposedToken {
                token,
                decomposition,
                spread,
            }
        })
        .collect();

    match cli.format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Pretty => {
            let max = tables.settings.restricted_max_spread();
            for row in &rows {
                match &row.decomposition {
                    Decomposition::Infrastructure => {
                        println!("{:<12} {}", row.token, "infrastructure".dimmed())
                    }
                    Decomposition::Invalid => {
                        println!("{:<12} {}", row.token, "invalid".red())
                    }
                    Decomposition::Parsed(m) => {
                        let family = if m.is_extended() {
                            format!(" ({})", m.family)
                        } else {
                            String::new()
                        };
                        let middle = if m.has_middle() {
                            m.middle.bold().to_string()
                        } else {
                            "-".dimmed().to_string()
                        };
                        let class = match row.spread {
                            Some(spread) => {
                                let label = middle_class(spread, max);
                                format!("  [{label} spread {spread}]")
                            }
                            None => String::new(),
                        };
                        println!(
                            "{:<12} {}{} | {} | {}{}",
                            row.token,
                            m.marker.cyan(),
                            family,
                            middle,
                            m.suffix.as_deref().unwrap_or("-"),
                            class,
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn cmd_entry(cli: &Cli, id: &str, tokens: &[String]) -> Result<()> {
    let tables = load_tables(cli)?;
    let pipeline = ConstraintPipeline::new(tables);
    let entry = RegistryEntry::new(id, tokens.iter().map(String::as_str));
    let outcome = pipeline.run_entry(&entry);
    let report = pipeline.report(&outcome, true);

    match cli.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Pretty => print_entry(&report),
    }
    Ok(())
}

fn print_entry(report: &EntryReport) {
    println!("{} {}", "Entry".bold(), report.entry_id);
    if let Some(d) = &report.diagnostics {
        let joined = |set: &std::collections::BTreeSet<String>| {
            set.iter().cloned().collect::<Vec<_>>().join(" ")
        };
        println!("  middles:      {}", joined(&d.bundle.middles));
        println!("  families:     {}", joined(&d.bundle.prefix_families));
        println!("  restricted:   {}", joined(&d.partition.restricted));
        println!("  universal:    {}", joined(&d.partition.universal));
        println!("  unknown:      {}", joined(&d.partition.unknown));
        if !d.invalid_tokens.is_empty() {
            println!("  invalid:      {}", d.invalid_tokens.join(" ").red());
        }
        println!(
            "  folios:       {} ({})",
            d.compatible_folios.len(),
            d.compatible_folios.join(" ")
        );
        println!("  vocabulary:   {}", d.effective_vocabulary_size);
        for zone in &d.zones {
            println!(
                "  zone {:<6}  legal {:>4}  classes {:>2}",
                zone.zone, zone.legal_vocabulary_size, zone.reachable_classes
            );
        }
        println!();
    }

    for verdict in &report.verdicts {
        let status = match verdict.status {
            ReachStatus::Reachable => verdict.status.to_string().green(),
            ReachStatus::Conditional => verdict.status.to_string().yellow(),
            ReachStatus::Unreachable => verdict.status.to_string().red(),
        };
        println!("  {:<12} {}", verdict.target, status);
    }
}

fn cmd_check_tables(cli: &Cli) -> Result<()> {
    let tables = load_tables(cli)?;
    let fingerprint = TableFingerprint::compute(&tables)?;
    let violations = tables.legality.monotonicity_violations(&tables.zones);

    match cli.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "folios": tables.folios.len(),
            "indexed_middles": tables.spreads.len(),
            "zones": tables.zones.labels().collect::<Vec<_>>(),
            "classes": tables.classes.len(),
            "floor_classes": tables.classes.floor().len(),
            "targets": tables.targets.len(),
            "restricted_max_spread": tables.settings.restricted_max_spread(),
            "fingerprint": fingerprint.hash,
            "monotonicity_violations": violations,
        }))?,
        OutputFormat::Pretty => {
            println!("{} {}", "OK".green().bold(), tables.describe());
            println!("  fingerprint: {}", fingerprint.hash);
            println!(
                "  zones:       {}",
                tables.zones.labels().collect::<Vec<_>>().join(" > ")
            );
            println!(
                "  floor:       {} kernel/atomic classes",
                tables.classes.floor().len()
            );
            if violations.is_empty() {
                println!("  legality is monotone across the zone ordering");
            } else {
                println!(
                    "{} legality widens {} times along the zone ordering:",
                    "WARN".yellow().bold(),
                    violations.len()
                );
                for v in &violations {
                    println!("  {:<10} legal in {} but not {}", v.middle, v.later, v.earlier);
                }
            }
        }
    }

    io::stdout().flush()?;
    Ok(())
}
