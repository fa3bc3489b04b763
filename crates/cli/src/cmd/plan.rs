//! Implementation of `--dry-run`.
//!
//! Shows the stages a build would run without creating directories or
//! spawning anything.

use anyhow::Result;
use serde::Serialize;

use slangdroid_lib::pipeline::{Stage, plan_stages};
use slangdroid_lib::{BuildConfig, Ndk, resolve_ndk};

use super::BuildArgs;
use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols};

#[derive(Serialize)]
struct PlannedStage<'a> {
  skip: bool,
  #[serde(flatten)]
  stage: &'a Stage,
}

#[derive(Serialize)]
struct DryRun<'a> {
  config: &'a BuildConfig,
  ndk: &'a Ndk,
  stages: Vec<PlannedStage<'a>>,
}

pub fn cmd_plan(args: BuildArgs, format: OutputFormat) -> Result<()> {
  let config = args.config()?;
  let ndk = resolve_ndk(args.ndk.as_deref())?;
  let stages = plan_stages(&config, &ndk);

  if format.is_json() {
    let planned = stages
      .iter()
      .map(|stage| PlannedStage {
        skip: stage.satisfied_marker().is_some(),
        stage,
      })
      .collect();
    return print_json(&DryRun {
      config: &config,
      ndk: &ndk,
      stages: planned,
    });
  }

  print_info(&format!("Dry run for Slang {}", config.tag));
  print_stat("NDK", &ndk.root.display().to_string());
  print_stat("Build dir", &config.build_dir.display().to_string());
  print_stat("Dist dir", &config.dist_dir.display().to_string());
  println!();

  for stage in &stages {
    match stage.satisfied_marker() {
      Some(marker) => println!(
        "  {} {} (skip, {} exists)",
        symbols::SKIP,
        stage.name,
        marker.display()
      ),
      None => println!("  {} {}", symbols::ARROW, stage),
    }
  }

  Ok(())
}
