//! Implementation of the default build command.
//!
//! Resolves the NDK, runs every stage, and reports what landed in the
//! dist directory.

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use slangdroid_lib::pipeline::{ProcessRunner, Stage, StageObserver};
use slangdroid_lib::{BuildReport, resolve_ndk, run_build};

use super::BuildArgs;
use crate::output::{
  OutputFormat, format_duration, print_command, print_info, print_json, print_stat, print_success, print_warning,
};

/// Prints stage progress to the terminal. Silent in JSON mode.
struct ConsoleObserver {
  quiet: bool,
}

impl StageObserver for ConsoleObserver {
  fn on_start(&mut self, stage: &Stage) {
    if self.quiet {
      return;
    }
    print_command(&stage.command_line());
    if let Some(cwd) = stage.working_dir() {
      print_stat("in", &cwd.display().to_string());
    }
  }

  fn on_skip(&mut self, stage: &Stage) {
    if self.quiet {
      return;
    }
    if let Some(marker) = stage.satisfied_marker() {
      print_info(&format!("{}: {} already exists, skipping", stage.name, marker.display()));
    }
  }

  fn on_finish(&mut self, stage: &Stage, elapsed: Duration) {
    if !self.quiet {
      print_success(&format!("{} finished in {}", stage.name, format_duration(elapsed)));
    }
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  success: bool,
  include_copied: bool,
  #[serde(flatten)]
  report: &'a BuildReport,
}

pub fn cmd_build(args: BuildArgs, format: OutputFormat) -> Result<()> {
  let json = format.is_json();
  let config = args.config()?;
  let ndk = resolve_ndk(args.ndk.as_deref())?;
  debug!(
    build_dir = %config.build_dir.display(),
    dist_dir = %config.dist_dir.display(),
    "resolved build configuration"
  );

  if !json {
    print_info(&format!("Found Android NDK at {} ({})", ndk.root.display(), ndk.source));
    print_stat("Tag", &config.tag);
    print_stat("ABI", &config.android_abi);
    print_stat("Platform", &config.android_platform);
    println!();
  }

  let mut runner = ProcessRunner::new().stdout_to_stderr(json);
  let mut observer = ConsoleObserver { quiet: json };
  let report = run_build(&config, &ndk, &mut runner, &mut observer)?;

  if !report.is_success() {
    print_warning("No library artifacts were found in the build output");
  }

  if json {
    return print_json(&JsonReport {
      success: report.is_success(),
      include_copied: report.include_dir.is_dir(),
      report: &report,
    });
  }

  println!();
  if report.is_success() {
    print_success(&format!(
      "Built Slang {} into {}",
      report.tag,
      report.dist_dir.display()
    ));
  }
  for artifact in &report.artifacts {
    print_stat("Artifact", &artifact.display().to_string());
  }
  print_stat("Headers", &report.include_dir.display().to_string());
  print_stat("Stages run", &report.pipeline.ran().count().to_string());
  print_stat("Stages skipped", &report.pipeline.skipped().count().to_string());
  print_stat("Total time", &format_duration(report.pipeline.total_duration()));

  Ok(())
}
