//! Appium Runner - Parallel Test Suite Orchestrator
//!
//! A CLI tool that runs the Java/TestNG (Gradle) and Python/pytest Appium
//! suites concurrently, streams their output, and aggregates the results
//! into JSON and HTML summary reports.
//!
//! ## Features
//!
//! - Parallel suite execution on a bounded worker pool
//! - Live per-line output streaming tagged by suite
//! - Graceful shutdown on SIGINT/SIGTERM with child termination
//! - Keyword test filtering mapped to each suite's native selection syntax
//! - JSON and HTML summary reports plus relocated per-suite HTML artifacts
//!
//! ## Usage
//!
//! ```bash
//! # Run all suites with 4 parallel workers
//! appium-runner --all --parallel 4
//!
//! # Run the Java quick start tests only
//! appium-runner --gradle --tests quickstart
//!
//! # Run Python Android tests only
//! appium-runner --pytest --platform android
//! ```

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod adapter;
mod cli;
mod config;
mod executor;
mod models;
mod report;
mod shutdown;

use cli::Args;
use config::{CloudEnv, Workspace};
use executor::{Coordinator, SuiteExecutor};
use models::RunSummary;
use report::SummaryWriter;
use shutdown::ShutdownSignal;

const EXIT_FAILURE: u8 = 1;
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("💥 {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(args: Args) -> Result<u8> {
    let workspace = Workspace::new(&args.base_dir);
    let writer = SummaryWriter::new(workspace.clone());

    if args.generate_reports_only {
        return generate_reports_only(&writer);
    }

    // Failures up to here are startup failures: nothing has been dispatched
    // and the process exits with a plain error.
    info!("🔍 validating environment...");
    let kinds = args.selected_kinds();
    workspace.validate(&kinds)?;
    workspace.ensure_dirs()?;
    CloudEnv::load().warn_if_incomplete();
    info!("✅ environment validation complete");

    let requests = args.requests();
    info!("🎯 test execution plan: {} suite run(s)", requests.len());
    for (i, request) in requests.iter().enumerate() {
        info!("  {}. {request}", i + 1);
    }

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_signals();

    let executor = SuiteExecutor::new(workspace.clone(), shutdown.token());
    let coordinator = Coordinator::new(executor, shutdown.token());

    let started = Instant::now();
    let outcomes = coordinator.run_all(requests, args.parallel).await;
    info!(
        "⏱️  total execution time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    let summary = RunSummary::from_outcomes(outcomes);
    writer.persist(&summary)?;
    writer.print_console(&summary);

    if shutdown.is_triggered() {
        info!("🛑 test execution interrupted by user");
        return Ok(EXIT_INTERRUPTED);
    }

    Ok(if summary.all_passed() {
        0
    } else {
        EXIT_FAILURE
    })
}

fn generate_reports_only(writer: &SummaryWriter) -> Result<u8> {
    info!("📊 generating reports from existing results...");
    match writer.load()? {
        Some(summary) => {
            writer.persist(&summary)?;
            writer.print_console(&summary);
            Ok(0)
        }
        None => {
            info!(
                "no persisted summary found at {}",
                writer.json_path().display()
            );
            Ok(0)
        }
    }
}
