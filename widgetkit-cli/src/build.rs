//! The build run: argument mapping, exit codes and the summary report.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory};
use widgetkit_core::Guid;
use widgetkit_sync::{
    pipeline::{self, BuildConfig, BuildSummary},
    EmbedResult, WriteResult,
};

use crate::{Cli, EXIT_FAILED, EXIT_USAGE};

/// Inputs of one build run.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project descriptor to update.
    #[arg(long = "proj", value_name = "PROJECT_FILE")]
    pub project_file: PathBuf,

    /// Factory default provider whose files are embedded.
    #[arg(long = "providerid", value_name = "GUID")]
    pub provider_id: Guid,

    /// Source root containing `defaultwidgets/`.
    #[arg(long = "cfs", value_name = "SOURCE_ROOT")]
    pub source_root: PathBuf,

    /// Generated manifest listing.
    #[arg(long = "out", value_name = "OUTPUT_FILE")]
    pub output: PathBuf,
}

impl BuildArgs {
    pub fn config(&self) -> BuildConfig {
        BuildConfig {
            project_file: self.project_file.clone(),
            provider_id: self.provider_id,
            source_root: self.source_root.clone(),
            output: self.output.clone(),
        }
    }

    pub fn run(self) -> ExitCode {
        let config = self.config();
        tracing::debug!(?config, "build parameters");

        if let Err(err) = config.validate() {
            eprintln!("error: {err}");
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::from(EXIT_USAGE);
        }

        match execute(&config) {
            Ok(summary) => {
                print_summary(&summary);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err:?}");
                ExitCode::from(EXIT_FAILED)
            }
        }
    }
}

fn execute(config: &BuildConfig) -> Result<BuildSummary> {
    pipeline::run(config)
        .with_context(|| format!("build failed for {}", config.project_file.display()))
}

fn print_summary(summary: &BuildSummary) {
    let added = summary
        .reconcile
        .embedded
        .iter()
        .filter(|r| !matches!(r, EmbedResult::AlreadyEmbedded { .. }))
        .count();

    println!(
        "✓ provider {} reconciled ({} embedded, {} added, {} removed, {} listed)",
        summary.provider_id.simple(),
        summary.reconcile.embedded.len(),
        added,
        summary.reconcile.removed.len(),
        summary.listed
    );

    match &summary.listing {
        WriteResult::Written { path } => println!("  ✎  {}", path.display()),
        WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
    }
    if summary.descriptor_saved {
        println!("  ✎  project descriptor saved");
    }
}
