//! Process execution for pipeline stages.

use std::process::{Command, Stdio};

use tracing::debug;

use super::stage::Stage;
use super::types::PipelineError;

/// Runs the external command behind a stage.
///
/// Implementations block until the command finishes. Returning an error stops
/// the pipeline.
pub trait CommandRunner {
  fn run(&mut self, stage: &Stage) -> Result<(), PipelineError>;
}

/// Runs stages as child processes.
///
/// The child inherits stdio and the parent environment, with the stage's
/// overlay applied on top. There is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner {
  stdout_to_stderr: bool,
}

impl ProcessRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sends child stdout to our stderr, keeping stdout free for machine-readable output.
  pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
    self.stdout_to_stderr = enabled;
    self
  }
}

impl CommandRunner for ProcessRunner {
  fn run(&mut self, stage: &Stage) -> Result<(), PipelineError> {
    let mut command = Command::new(&stage.program);
    command.args(&stage.args).envs(&stage.env);

    if let Some(cwd) = &stage.cwd {
      command.current_dir(cwd);
    }

    if self.stdout_to_stderr {
      command.stdout(Stdio::from(std::io::stderr()));
    }

    debug!(stage = %stage.name, program = %stage.program, "spawning process");

    let status = command.status().map_err(|source| PipelineError::Spawn {
      stage: stage.name.clone(),
      program: stage.program.clone(),
      source,
    })?;

    if !status.success() {
      return Err(PipelineError::StageFailed {
        stage: stage.name.clone(),
        command: stage.command_line(),
        code: status.code(),
      });
    }

    Ok(())
  }
}
