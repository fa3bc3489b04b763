//! Android NDK discovery.
//!
//! The search order is:
//! 1. NDK root variables (`ANDROID_NDK_HOME`, `ANDROID_NDK_ROOT`, `NDK_HOME`)
//! 2. For each SDK root (`ANDROID_HOME`, `ANDROID_SDK_ROOT`, then the
//!    platform's conventional install locations): the greatest-named version
//!    under `<root>/ndk`, else `<root>/ndk-bundle`
//!
//! Failing to find an NDK is an expected outcome, so the search returns
//! `Option` rather than an error.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::consts::{NDK_ENV_VARS, NDK_TOOLCHAIN_FILE, SDK_ENV_VARS};
use crate::platform::paths::conventional_sdk_roots;
use crate::platform::{self, Os};

/// How an NDK root was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NdkSource {
  /// Given directly on the command line.
  Explicit,
  /// Named by an NDK root environment variable.
  EnvVar { name: String },
  /// A versioned install under `<sdk>/ndk/<version>`.
  Versioned { sdk_root: PathBuf },
  /// The legacy `<sdk>/ndk-bundle` install.
  Bundle { sdk_root: PathBuf },
}

impl fmt::Display for NdkSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NdkSource::Explicit => write!(f, "--ndk"),
      NdkSource::EnvVar { name } => write!(f, "${}", name),
      NdkSource::Versioned { sdk_root } => write!(f, "versioned install in {}", sdk_root.display()),
      NdkSource::Bundle { sdk_root } => write!(f, "ndk-bundle in {}", sdk_root.display()),
    }
  }
}

/// A located NDK installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ndk {
  pub root: PathBuf,
  pub source: NdkSource,
}

impl Ndk {
  pub fn new(root: impl Into<PathBuf>, source: NdkSource) -> Self {
    Self {
      root: root.into(),
      source,
    }
  }

  /// Path of the CMake toolchain file shipped with this NDK.
  ///
  /// The file is not guaranteed to exist.
  pub fn toolchain_file(&self) -> PathBuf {
    self.root.join(NDK_TOOLCHAIN_FILE)
  }
}

/// Inputs to an NDK search, resolved up front so the search itself only
/// inspects the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NdkSearch {
  /// `(variable, value)` pairs for NDK root variables that are set, in priority order.
  pub ndk_vars: Vec<(String, PathBuf)>,
  /// SDK roots to scan, in priority order. Missing roots are skipped.
  pub sdk_roots: Vec<PathBuf>,
}

impl NdkSearch {
  /// Builds the search from the process environment and the host OS conventions.
  pub fn from_env() -> Self {
    Self::from_lookup(platform::host_os(), platform::env_var)
  }

  /// Builds the search from an arbitrary environment accessor.
  pub fn from_lookup<F>(os: Os, env: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let ndk_vars: Vec<(String, PathBuf)> = NDK_ENV_VARS
      .iter()
      .filter_map(|name| env(name).map(|value| (name.to_string(), PathBuf::from(value))))
      .collect();

    let mut sdk_roots: Vec<PathBuf> = SDK_ENV_VARS
      .iter()
      .filter_map(|name| env(name).map(PathBuf::from))
      .collect();
    sdk_roots.extend(conventional_sdk_roots(os, &env));

    debug!(os = %os, ndk_vars = ndk_vars.len(), sdk_roots = sdk_roots.len(), "prepared NDK search");

    Self { ndk_vars, sdk_roots }
  }

  /// Runs the search, returning the first match.
  pub fn locate(&self) -> Option<Ndk> {
    for (name, path) in &self.ndk_vars {
      if path.exists() {
        debug!(var = %name, path = %path.display(), "NDK found via environment");
        return Some(Ndk::new(path, NdkSource::EnvVar { name: name.clone() }));
      }
      debug!(var = %name, path = %path.display(), "NDK variable points at a missing path");
    }

    for root in &self.sdk_roots {
      if !root.exists() {
        continue;
      }

      if let Some(version) = latest_version_dir(&root.join("ndk")) {
        debug!(path = %version.display(), "NDK found in SDK versions directory");
        return Some(Ndk::new(version, NdkSource::Versioned { sdk_root: root.clone() }));
      }

      let bundle = root.join("ndk-bundle");
      if bundle.exists() {
        debug!(path = %bundle.display(), "NDK found as SDK bundle");
        return Some(Ndk::new(bundle, NdkSource::Bundle { sdk_root: root.clone() }));
      }
    }

    None
  }
}

/// Locates the NDK using the process environment.
pub fn locate_ndk() -> Option<Ndk> {
  NdkSearch::from_env().locate()
}

/// Picks the subdirectory with the greatest name.
///
/// Names are compared as strings, so `9.0` outranks `10.0`; this is a
/// best-effort "latest" and not a version comparison.
fn latest_version_dir(dir: &Path) -> Option<PathBuf> {
  let entries = fs::read_dir(dir).ok()?;

  entries
    .flatten()
    .map(|entry| entry.path())
    .filter(|path| path.is_dir())
    .max_by(|a, b| compare_names(a, b))
}

fn compare_names(a: &Path, b: &Path) -> Ordering {
  let a = a.file_name().unwrap_or_default().to_string_lossy();
  let b = b.file_name().unwrap_or_default().to_string_lossy();
  a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(&b))
}
