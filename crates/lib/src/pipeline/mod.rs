//! Staged execution of external build tools.
//!
//! Stages run one at a time in the order given. Each stage:
//! - is skipped if its skip marker already exists
//! - fails with [`PipelineError::MissingInput`] if a declared input is absent
//! - gets its output directories created
//! - runs through a [`CommandRunner`], blocking until the process exits
//!
//! The first failure stops the pipeline. Nothing is rolled back.

pub mod plan;
pub mod runner;
pub mod stage;
pub mod types;

use std::fs;
use std::time::{Duration, Instant};

use tracing::{info, warn};

pub use plan::{STAGE_ORDER, plan_stages};
pub use runner::{CommandRunner, ProcessRunner};
pub use stage::Stage;
pub use types::{PipelineError, PipelineReport, StageOutcome, StageStatus};

/// Receives progress notifications as the pipeline advances.
///
/// All methods default to doing nothing.
pub trait StageObserver {
  fn on_start(&mut self, _stage: &Stage) {}
  fn on_skip(&mut self, _stage: &Stage) {}
  fn on_finish(&mut self, _stage: &Stage, _elapsed: Duration) {}
}

impl StageObserver for () {}

/// Runs `stages` in order, stopping at the first failure.
pub fn run_pipeline<R, O>(stages: &[Stage], runner: &mut R, observer: &mut O) -> Result<PipelineReport, PipelineError>
where
  R: CommandRunner + ?Sized,
  O: StageObserver + ?Sized,
{
  let mut report = PipelineReport::default();

  for stage in stages {
    if let Some(marker) = stage.satisfied_marker() {
      info!(stage = %stage.name, marker = %marker.display(), "skipping stage, output already present");
      observer.on_skip(stage);
      report.stages.push(StageOutcome {
        name: stage.name.clone(),
        status: StageStatus::Skipped {
          marker: marker.to_path_buf(),
        },
      });
      continue;
    }

    for dir in &stage.create_dirs {
      fs::create_dir_all(dir).map_err(|source| PipelineError::CreateDir {
        path: dir.clone(),
        source,
      })?;
    }

    if let Some(missing) = stage.inputs.iter().find(|path| !path.exists()) {
      return Err(PipelineError::MissingInput {
        stage: stage.name.clone(),
        path: missing.clone(),
      });
    }

    let cwd = stage.working_dir().unwrap_or_default();
    info!(stage = %stage.name, command = %stage.command_line(), cwd = %cwd.display(), "running stage");
    observer.on_start(stage);

    let started = Instant::now();
    runner.run(stage)?;
    let elapsed = started.elapsed();

    for output in stage.outputs.iter().filter(|path| !path.exists()) {
      warn!(stage = %stage.name, path = %output.display(), "stage finished without producing expected output");
    }

    observer.on_finish(stage, elapsed);
    report.stages.push(StageOutcome {
      name: stage.name.clone(),
      status: StageStatus::Ran { duration: elapsed },
    });
  }

  Ok(report)
}
