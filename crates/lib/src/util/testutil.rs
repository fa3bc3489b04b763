//! Test utilities for slangdroid-lib.
//!
//! Cross-platform command helpers for exercising the real process runner,
//! and a [`RecordingRunner`] that stands in for git and cmake.

use std::collections::HashMap;
use std::fs;

use crate::pipeline::{CommandRunner, PipelineError, Stage};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// A [`CommandRunner`] that records stage names instead of spawning processes.
///
/// Declared outputs of every successful stage are created as directories, so
/// later stages see the same filesystem hand-off a real build would leave.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  invoked: Vec<String>,
  failures: HashMap<String, i32>,
  files: HashMap<String, Vec<(String, String)>>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes the named stage exit with `code`.
  pub fn fail_on(mut self, stage: &str, code: i32) -> Self {
    self.failures.insert(stage.to_string(), code);
    self
  }

  /// Writes `relative` (under the stage's first output) when the named stage runs.
  pub fn write_on(mut self, stage: &str, relative: &str, content: &str) -> Self {
    self
      .files
      .entry(stage.to_string())
      .or_default()
      .push((relative.to_string(), content.to_string()));
    self
  }

  /// Names of the stages that were run, in order.
  pub fn invoked(&self) -> Vec<&str> {
    self.invoked.iter().map(String::as_str).collect()
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&mut self, stage: &Stage) -> Result<(), PipelineError> {
    self.invoked.push(stage.name.clone());

    if let Some(&code) = self.failures.get(&stage.name) {
      return Err(PipelineError::StageFailed {
        stage: stage.name.clone(),
        command: stage.command_line(),
        code: Some(code),
      });
    }

    for output in &stage.outputs {
      fs::create_dir_all(output).expect("create stage output");
    }

    if let Some(files) = self.files.get(&stage.name) {
      let base = stage.outputs.first().expect("stage writing files must declare an output");
      for (relative, content) in files {
        let path = base.join(relative);
        if let Some(parent) = path.parent() {
          fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write stage file");
      }
    }

    Ok(())
  }
}
