/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use agesched::config::SimulationConfig;
use agesched::input::{self, InputFormat};
use agesched::report;
use agesched::scheduler::{ScheduleInput, Simulator};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Batch scheduler simulator with dependency resolution and priority aging.
///
/// Example:
///   agesched input.txt taskoutput.txt task_summary.txt
///   agesched workload.yaml out.json summary.txt --config settings.yaml
#[derive(Debug, Parser)]
#[command(
    name = "agesched",
    about = "Dependency-aware batch scheduler simulator",
    long_about = None,
)]
struct Cli {
    /// Workload file (text format, or YAML for .yaml / .yml).
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Destination of the JSON result document.
    #[arg(default_value = "taskoutput.txt")]
    output: PathBuf,

    /// Destination of the human-readable summary.
    #[arg(default_value = "task_summary.txt")]
    summary: PathBuf,

    /// Workload format; `auto` decides from the file extension.
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// Path to a YAML simulation settings file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Log level; overrides RUST_LOG.
    #[arg(long = "log-level", value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Text,
    Yaml,
}

impl FormatArg {
    fn resolve(self, path: &Path) -> InputFormat {
        match self {
            FormatArg::Auto => InputFormat::from_path(path),
            FormatArg::Text => InputFormat::Text,
            FormatArg::Yaml => InputFormat::Yaml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Initialise structured logging on stderr.
    // Level comes from --log-level, then RUST_LOG, then "info".
    let filter = match cli.log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level.as_filter()),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        input   = %cli.input.display(),
        output  = %cli.output.display(),
        summary = %cli.summary.display(),
        config  = ?cli.config,
        "Configuration"
    );

    if let Err(e) = run(&cli) {
        error!("Simulation failed: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Load settings ─────────────────────────────────────────────────────────
    let config = match &cli.config {
        Some(path) => SimulationConfig::load_from_file(path)?,
        None => {
            warn!("No settings file provided, using default simulation settings");
            SimulationConfig::default()
        }
    };

    // ── Read and validate the workload ────────────────────────────────────────
    let workload = input::read_workload(&cli.input, cli.format.resolve(&cli.input))?;
    let schedule_input = ScheduleInput::load(workload.tasks, workload.dependencies)
        .with_context(|| format!("Invalid workload in {}", cli.input.display()))?;

    // ── Simulate ──────────────────────────────────────────────────────────────
    let result = Simulator::new(config).run(&schedule_input)?;

    for m in result.ordered_metrics() {
        info!(
            "Executed: {} | Waiting: {} | Turnaround: {}",
            m.name, m.waiting_time, m.turnaround_time
        );
    }

    // ── Write reports ─────────────────────────────────────────────────────────
    report::write_json(&cli.output, &result)?;
    report::write_summary(&cli.summary, &result)?;

    Ok(())
}
