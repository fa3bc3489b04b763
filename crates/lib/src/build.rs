//! End-to-end build: prepare directories, run the pipeline, collect outputs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::collect::{self, CollectError};
use crate::config::BuildConfig;
use crate::ndk::{self, Ndk, NdkSource};
use crate::pipeline::{self, CommandRunner, PipelineError, PipelineReport, StageObserver};

/// Exit code when no NDK can be found.
pub const EXIT_NDK_NOT_FOUND: u8 = 3;
/// Exit code when a required file is missing.
pub const EXIT_MISSING_FILE: u8 = 4;
/// Exit code when an external tool fails.
pub const EXIT_STAGE_FAILED: u8 = 5;
/// Exit code for any other failure.
pub const EXIT_OTHER: u8 = 1;

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("could not find the Android NDK; set ANDROID_NDK_HOME to your NDK install directory")]
  NdkNotFound,

  #[error("NDK directory does not exist: {}", path.display())]
  NdkPathMissing { path: PathBuf },

  #[error("required file not found: {}", path.display())]
  MissingFile { path: PathBuf },

  #[error(transparent)]
  Pipeline(PipelineError),

  #[error(transparent)]
  Collect(#[from] CollectError),

  #[error("failed to prepare {}: {source}", path.display())]
  Prepare {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl From<PipelineError> for BuildError {
  fn from(err: PipelineError) -> Self {
    match err {
      PipelineError::MissingInput { path, .. } => BuildError::MissingFile { path },
      other => BuildError::Pipeline(other),
    }
  }
}

impl BuildError {
  /// Process exit code for this failure.
  pub fn exit_code(&self) -> u8 {
    match self {
      BuildError::NdkNotFound | BuildError::NdkPathMissing { .. } => EXIT_NDK_NOT_FOUND,
      BuildError::MissingFile { .. } => EXIT_MISSING_FILE,
      BuildError::Pipeline(PipelineError::Spawn { .. } | PipelineError::StageFailed { .. }) => EXIT_STAGE_FAILED,
      BuildError::Pipeline(_) | BuildError::Collect(_) | BuildError::Prepare { .. } => EXIT_OTHER,
    }
  }
}

/// Resolves the NDK to build with.
///
/// An explicit path must exist; otherwise the environment and conventional
/// SDK locations are searched.
pub fn resolve_ndk(explicit: Option<&Path>) -> Result<Ndk, BuildError> {
  match explicit {
    Some(path) if path.exists() => Ok(Ndk::new(path, NdkSource::Explicit)),
    Some(path) => Err(BuildError::NdkPathMissing {
      path: path.to_path_buf(),
    }),
    None => ndk::locate_ndk().ok_or(BuildError::NdkNotFound),
  }
}

/// Summary of a completed build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
  pub tag: String,
  pub ndk: Ndk,
  pub dist_dir: PathBuf,
  pub pipeline: PipelineReport,
  pub artifacts: Vec<PathBuf>,
  pub include_dir: PathBuf,
}

impl BuildReport {
  /// A build succeeds once at least one library reached the dist directory.
  pub fn is_success(&self) -> bool {
    !self.artifacts.is_empty()
  }
}

/// Runs the whole build with `ndk`.
///
/// The dist directory is recreated from scratch first; the build directory
/// is kept so an existing source checkout is reused.
pub fn run_build<R, O>(
  config: &BuildConfig,
  ndk: &Ndk,
  runner: &mut R,
  observer: &mut O,
) -> Result<BuildReport, BuildError>
where
  R: CommandRunner + ?Sized,
  O: StageObserver + ?Sized,
{
  let layout = config.layout();

  info!(ndk = %ndk.root.display(), tag = %config.tag, abi = %config.android_abi, "starting build");

  fs::create_dir_all(&layout.build_dir).map_err(|source| BuildError::Prepare {
    path: layout.build_dir.clone(),
    source,
  })?;
  recreate_dir(&layout.dist_dir)?;

  let stages = pipeline::plan_stages(config, ndk);
  let pipeline = pipeline::run_pipeline(&stages, runner, observer)?;

  let artifacts = collect::collect_artifacts(&layout.artifact_search_dirs(), &layout.dist_dir)?;

  let include_src = layout.source_include_dir();
  if !include_src.is_dir() {
    return Err(BuildError::MissingFile { path: include_src });
  }
  let include_dir = layout.dist_dir.join("include");
  collect::copy_tree(&include_src, &include_dir)?;

  if artifacts.is_empty() {
    warn!(dist = %layout.dist_dir.display(), "no library artifacts found");
  }

  Ok(BuildReport {
    tag: config.tag.clone(),
    ndk: ndk.clone(),
    dist_dir: layout.dist_dir,
    pipeline,
    artifacts,
    include_dir,
  })
}

fn recreate_dir(dir: &Path) -> Result<(), BuildError> {
  let prepare = |source| BuildError::Prepare {
    path: dir.to_path_buf(),
    source,
  };

  if dir.exists() {
    fs::remove_dir_all(dir).map_err(prepare)?;
  }
  fs::create_dir_all(dir).map_err(prepare)
}
