//! Error and result types for pipeline execution.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors that abort the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
  /// A path a stage depends on is missing.
  #[error("stage '{stage}' requires {}, which does not exist", path.display())]
  MissingInput { stage: String, path: PathBuf },

  /// A directory the stage writes into could not be created.
  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The stage's program could not be started.
  #[error("failed to run '{program}' for stage '{stage}': {source}")]
  Spawn {
    stage: String,
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The stage's program exited unsuccessfully.
  #[error("stage '{stage}' {}: {command}", exit_description(*code))]
  StageFailed {
    stage: String,
    command: String,
    code: Option<i32>,
  },
}

fn exit_description(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("failed with exit code {code}"),
    None => "was terminated by a signal".to_string(),
  }
}

/// What happened to a single stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageStatus {
  Ran {
    #[serde(with = "duration_secs")]
    duration: Duration,
  },
  Skipped { marker: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutcome {
  pub name: String,
  #[serde(flatten)]
  pub status: StageStatus,
}

impl StageOutcome {
  pub fn was_skipped(&self) -> bool {
    matches!(self.status, StageStatus::Skipped { .. })
  }
}

/// Outcomes of every stage of a completed pipeline, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
  pub stages: Vec<StageOutcome>,
}

impl PipelineReport {
  pub fn ran(&self) -> impl Iterator<Item = &StageOutcome> {
    self.stages.iter().filter(|s| !s.was_skipped())
  }

  pub fn skipped(&self) -> impl Iterator<Item = &StageOutcome> {
    self.stages.iter().filter(|s| s.was_skipped())
  }

  pub fn total_duration(&self) -> Duration {
    self
      .stages
      .iter()
      .map(|s| match s.status {
        StageStatus::Ran { duration } => duration,
        StageStatus::Skipped { .. } => Duration::ZERO,
      })
      .sum()
  }
}

mod duration_secs {
  use std::time::Duration;

  use serde::Serializer;

  pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
  }
}
