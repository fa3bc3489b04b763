//! Conventional Android SDK install locations.
//!
//! Every lookup goes through a caller-supplied environment accessor so the
//! search can be exercised without touching the process environment.

use std::path::PathBuf;

use super::os::Os;

/// Returns the user's home directory.
pub fn home_dir<F>(os: Os, env: F) -> Option<PathBuf>
where
  F: Fn(&str) -> Option<String>,
{
  let var = if os.is_windows() { "USERPROFILE" } else { "HOME" };
  env(var).map(PathBuf::from)
}

/// SDK roots that IDE installers use by default, highest priority first.
///
/// Roots whose base variable is unset are omitted rather than guessed.
pub fn conventional_sdk_roots<F>(os: Os, env: F) -> Vec<PathBuf>
where
  F: Fn(&str) -> Option<String>,
{
  let mut roots = Vec::new();

  match os {
    Os::Windows => {
      if let Some(local_appdata) = env("LOCALAPPDATA") {
        roots.push(PathBuf::from(local_appdata).join("Android").join("Sdk"));
      }
      roots.push(PathBuf::from("C:/Program Files (x86)/Android/android-sdk"));
    }
    Os::Linux | Os::MacOs => {
      if let Some(home) = home_dir(os, &env) {
        roots.push(home.join("Android").join("Sdk"));
        roots.push(home.join("Library").join("Android").join("sdk"));
      }
    }
  }

  roots
}
