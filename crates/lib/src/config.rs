//! Build configuration.
//!
//! A [`BuildConfig`] is assembled once at start-up and then only read. The
//! directory tree it implies is described by [`BuildLayout`].

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::{
  ANDROID_ABI, ANDROID_PLATFORM, BUILD_DIR_NAME, DEFAULT_TAG, DIST_DIR_NAME, SLANG_REPO, TAG_ENV_VAR,
};
use crate::platform;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to resolve directory {}: {source}", path.display())]
  Resolve {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(
    "dist directory {} and build directory {} overlap; the dist directory is wiped on every run, so they must be separate",
    dist_dir.display(),
    build_dir.display()
  )]
  OverlappingDirs { build_dir: PathBuf, dist_dir: PathBuf },
}

/// Immutable parameters for one build run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  pub repo_url: String,
  pub tag: String,
  pub android_abi: String,
  pub android_platform: String,
  pub build_dir: PathBuf,
  pub dist_dir: PathBuf,
}

impl BuildConfig {
  pub fn builder() -> BuildConfigBuilder {
    BuildConfigBuilder::default()
  }

  pub fn layout(&self) -> BuildLayout {
    BuildLayout::new(&self.build_dir, &self.dist_dir)
  }
}

/// Collects optional overrides and fills in defaults.
#[derive(Debug, Clone, Default)]
pub struct BuildConfigBuilder {
  repo_url: Option<String>,
  tag: Option<String>,
  android_abi: Option<String>,
  android_platform: Option<String>,
  build_dir: Option<PathBuf>,
  dist_dir: Option<PathBuf>,
}

impl BuildConfigBuilder {
  pub fn repo_url(mut self, url: impl Into<String>) -> Self {
    self.repo_url = Some(url.into());
    self
  }

  pub fn tag(mut self, tag: Option<String>) -> Self {
    self.tag = tag;
    self
  }

  pub fn android_abi(mut self, abi: Option<String>) -> Self {
    self.android_abi = abi;
    self
  }

  pub fn android_platform(mut self, platform: Option<String>) -> Self {
    self.android_platform = platform;
    self
  }

  pub fn build_dir(mut self, dir: Option<PathBuf>) -> Self {
    self.build_dir = dir;
    self
  }

  pub fn dist_dir(mut self, dir: Option<PathBuf>) -> Self {
    self.dist_dir = dir;
    self
  }

  /// Resolves defaults and makes the working directories absolute.
  ///
  /// Relative directories are resolved against the current directory. The
  /// build and dist directories may not be equal or nested in one another.
  pub fn build(self) -> Result<BuildConfig, ConfigError> {
    let build_dir = absolute(&self.build_dir.unwrap_or_else(|| PathBuf::from(BUILD_DIR_NAME)))?;
    let dist_dir = absolute(&self.dist_dir.unwrap_or_else(|| PathBuf::from(DIST_DIR_NAME)))?;

    if build_dir.starts_with(&dist_dir) || dist_dir.starts_with(&build_dir) {
      return Err(ConfigError::OverlappingDirs { build_dir, dist_dir });
    }

    Ok(BuildConfig {
      repo_url: self.repo_url.unwrap_or_else(|| SLANG_REPO.to_string()),
      tag: resolve_tag(self.tag),
      android_abi: self.android_abi.unwrap_or_else(|| ANDROID_ABI.to_string()),
      android_platform: self.android_platform.unwrap_or_else(|| ANDROID_PLATFORM.to_string()),
      build_dir,
      dist_dir,
    })
  }
}

/// Picks the tag to build: explicit value, then `$SLANG_TAG`, then the default.
pub fn resolve_tag(explicit: Option<String>) -> String {
  explicit
    .filter(|tag| !tag.is_empty())
    .or_else(|| platform::env_var(TAG_ENV_VAR))
    .unwrap_or_else(|| DEFAULT_TAG.to_string())
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
  let resolved = std::path::absolute(path).map_err(|source| ConfigError::Resolve {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(normalize(dunce::simplified(&resolved)))
}

/// Drops `.` and folds `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        normalized.pop();
      }
      other => normalized.push(other),
    }
  }
  normalized
}

/// Directory tree used by a build run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildLayout {
  /// Root of all intermediate build state.
  pub build_dir: PathBuf,
  /// Cloned source tree.
  pub source_dir: PathBuf,
  /// Host build of the code generators.
  pub host_build_dir: PathBuf,
  /// Install prefix for the host generators.
  pub host_tools_dir: PathBuf,
  /// Cross-compiled Android build.
  pub android_build_dir: PathBuf,
  /// Collected libraries and headers.
  pub dist_dir: PathBuf,
}

impl BuildLayout {
  pub fn new(build_dir: &Path, dist_dir: &Path) -> Self {
    Self {
      build_dir: build_dir.to_path_buf(),
      source_dir: build_dir.join("slang"),
      host_build_dir: build_dir.join("build-host"),
      host_tools_dir: build_dir.join("host-tools"),
      android_build_dir: build_dir.join("build-android"),
      dist_dir: dist_dir.to_path_buf(),
    }
  }

  /// Directory holding the installed host generator binaries.
  pub fn generators_dir(&self) -> PathBuf {
    self.host_tools_dir.join("bin")
  }

  /// Public header tree inside the cloned source.
  pub fn source_include_dir(&self) -> PathBuf {
    self.source_dir.join("include")
  }

  /// Directories the Android build may place libraries in.
  ///
  /// Which of these exist depends on the CMake generator in use.
  pub fn artifact_search_dirs(&self) -> Vec<PathBuf> {
    let out = &self.android_build_dir;
    vec![
      out.join("lib"),
      out.join("bin"),
      out.join("Release").join("lib"),
      out.join("Release").join("bin"),
    ]
  }
}
