use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One external command in the build pipeline.
///
/// Besides the invocation itself, a stage declares the filesystem paths it
/// depends on and the ones it is expected to produce, which is the only
/// hand-off between stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
  pub name: String,
  pub program: String,
  pub args: Vec<String>,
  /// Working directory; `None` inherits the caller's.
  pub cwd: Option<PathBuf>,
  /// Variables layered over the inherited environment.
  pub env: BTreeMap<String, String>,
  /// If this path exists the stage is skipped.
  pub skip_if_exists: Option<PathBuf>,
  /// Directories created before the stage runs.
  pub create_dirs: Vec<PathBuf>,
  /// Paths that must exist before the stage runs.
  pub inputs: Vec<PathBuf>,
  /// Paths the stage promises to produce.
  pub outputs: Vec<PathBuf>,
}

impl Stage {
  pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      program: program.into(),
      args: Vec::new(),
      cwd: None,
      env: BTreeMap::new(),
      skip_if_exists: None,
      create_dirs: Vec::new(),
      inputs: Vec::new(),
      outputs: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Appends a path argument.
  pub fn path_arg(self, path: &Path) -> Self {
    self.arg(path.to_string_lossy())
  }

  pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn skip_if_exists(mut self, path: impl Into<PathBuf>) -> Self {
    self.skip_if_exists = Some(path.into());
    self
  }

  pub fn create_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.create_dirs.push(dir.into());
    self
  }

  pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
    self.inputs.push(path.into());
    self
  }

  pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
    self.outputs.push(path.into());
    self
  }

  /// The full invocation as a single display string.
  pub fn command_line(&self) -> String {
    let mut line = self.program.clone();
    for arg in &self.args {
      line.push(' ');
      line.push_str(arg);
    }
    line
  }

  /// Directory the command runs in: `cwd`, else the caller's current directory.
  pub fn working_dir(&self) -> Option<PathBuf> {
    self.cwd.clone().or_else(|| std::env::current_dir().ok())
  }

  /// The skip marker, if it is already present on disk.
  pub fn satisfied_marker(&self) -> Option<&Path> {
    self.skip_if_exists.as_deref().filter(|path| path.exists())
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.name, self.command_line())
  }
}
