//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Isolated test environment.
///
/// Each test gets its own working directory, a fake NDK, and a `bin/`
/// directory of stand-in tools.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// An environment whose NDK ships a toolchain file and whose `git` and
  /// `cmake` succeed.
  pub fn new() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_file("ndk/build/cmake/android.toolchain.cmake", "# toolchain\n");
    env.install_tool("git", "fake-git.sh");
    env.install_tool("cmake", "fake-cmake.sh");
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Installs fixture script `fixture` as `bin/<name>`.
  pub fn install_tool(&self, name: &str, fixture: &str) {
    let dest = self.bin_path().join(name);
    std::fs::copy(fixture_path(fixture), &dest).unwrap();
    std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn bin_path(&self) -> PathBuf {
    let p = self.temp.path().join("bin");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  pub fn ndk_path(&self) -> PathBuf {
    self.root().join("ndk")
  }

  pub fn dist_path(&self) -> PathBuf {
    self.root().join("dist")
  }

  pub fn log_path(&self) -> PathBuf {
    self.temp.path().join("tools.log")
  }

  /// Lines the fake tools appended to the log, one per invocation.
  pub fn tool_log(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .unwrap_or_default()
      .lines()
      .map(str::to_string)
      .collect()
  }

  /// Get a pre-configured Command for the slangdroid binary.
  ///
  /// Runs from the temp directory with:
  /// - `PATH`: the fake tools, then the system shell utilities
  /// - `ANDROID_NDK_HOME`: the fake NDK
  /// - `SLANGDROID_TEST_LOG`: where fake tools record their arguments
  pub fn slangdroid_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("slangdroid");
    cmd.current_dir(self.temp.path());
    cmd.env("PATH", join_path(&self.bin_path()));
    cmd.env("ANDROID_NDK_HOME", self.ndk_path());
    cmd.env("SLANGDROID_TEST_LOG", self.log_path());
    cmd.env_remove("SLANG_TAG");
    cmd
  }
}

fn join_path(bin: &Path) -> String {
  format!("{}:/usr/bin:/bin", bin.display())
}
