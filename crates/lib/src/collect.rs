//! Artifact collection into the distribution directory.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::consts::{ARTIFACT_EXTENSIONS, ARTIFACT_MARKER};

#[derive(Debug, Error)]
pub enum CollectError {
  #[error("failed to read directory {}: {source}", path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to remove {}: {source}", path.display())]
  Remove {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to walk {}: {source}", root.display())]
  Walk {
    root: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

/// Whether a file name looks like a built library.
pub fn is_artifact(name: &str) -> bool {
  name.contains(ARTIFACT_MARKER) && ARTIFACT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Copies library files from the immediate contents of `search_dirs` into `dist_dir`.
///
/// Directories that don't exist are skipped. Files keep their names; a later
/// directory overwrites an earlier one's file of the same name. Returns the
/// destination paths in copy order.
pub fn collect_artifacts(search_dirs: &[PathBuf], dist_dir: &Path) -> Result<Vec<PathBuf>, CollectError> {
  let mut copied = Vec::new();

  for dir in search_dirs {
    if !dir.is_dir() {
      debug!(dir = %dir.display(), "artifact directory absent");
      continue;
    }

    let entries = fs::read_dir(dir).map_err(|source| CollectError::ReadDir {
      path: dir.clone(),
      source,
    })?;

    let mut matches: Vec<PathBuf> = entries
      .flatten()
      .map(|entry| entry.path())
      .filter(|path| path.is_file())
      .filter(|path| path.file_name().and_then(|n| n.to_str()).is_some_and(is_artifact))
      .collect();
    matches.sort();

    for source in matches {
      let Some(name) = source.file_name() else {
        continue;
      };
      let dest = dist_dir.join(name);
      fs::copy(&source, &dest).map_err(|e| CollectError::Copy {
        from: source.clone(),
        to: dest.clone(),
        source: e,
      })?;
      info!(artifact = %dest.display(), "copied artifact");
      copied.push(dest);
    }
  }

  Ok(copied)
}

/// Replaces `dest` with a recursive copy of `src`.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<(), CollectError> {
  if dest.exists() {
    fs::remove_dir_all(dest).map_err(|source| CollectError::Remove {
      path: dest.to_path_buf(),
      source,
    })?;
  }

  for entry in WalkDir::new(src).follow_links(true) {
    let entry = entry.map_err(|source| CollectError::Walk {
      root: src.to_path_buf(),
      source,
    })?;

    let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
    let target = dest.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).map_err(|source| CollectError::Copy {
        from: entry.path().to_path_buf(),
        to: target.clone(),
        source,
      })?;
    } else {
      fs::copy(entry.path(), &target).map_err(|source| CollectError::Copy {
        from: entry.path().to_path_buf(),
        to: target.clone(),
        source,
      })?;
    }
  }

  debug!(src = %src.display(), dest = %dest.display(), "copied tree");
  Ok(())
}
