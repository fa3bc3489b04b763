pub mod os;
pub mod paths;

pub use os::Os;

/// Reads a process environment variable, treating empty values as unset.
pub fn env_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Returns the host OS, falling back to the Linux conventions for other Unix-likes.
pub fn host_os() -> Os {
  Os::current().unwrap_or(Os::Linux)
}
