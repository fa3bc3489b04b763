//! The fixed stage sequence for a Slang Android build.
//!
//! ```text
//! fetch -> host-configure -> host-build -> host-install -> target-configure -> target-build
//! ```
//!
//! The host build produces the code generators that the cross build runs
//! during compilation, so the target configure stage points CMake at the host
//! install prefix.

use crate::config::{BuildConfig, BuildLayout};
use crate::consts::COMMON_CMAKE_FLAGS;
use crate::ndk::Ndk;

use super::stage::Stage;

pub const FETCH: &str = "fetch";
pub const HOST_CONFIGURE: &str = "host-configure";
pub const HOST_BUILD: &str = "host-build";
pub const HOST_INSTALL: &str = "host-install";
pub const TARGET_CONFIGURE: &str = "target-configure";
pub const TARGET_BUILD: &str = "target-build";

/// Stage names in execution order.
pub const STAGE_ORDER: &[&str] = &[FETCH, HOST_CONFIGURE, HOST_BUILD, HOST_INSTALL, TARGET_CONFIGURE, TARGET_BUILD];

/// Builds the ordered stage list for `config`.
pub fn plan_stages(config: &BuildConfig, ndk: &Ndk) -> Vec<Stage> {
  let layout = config.layout();

  vec![
    fetch(config, &layout),
    host_configure(&layout),
    host_build(&layout),
    host_install(&layout),
    target_configure(config, &layout, ndk),
    target_build(&layout),
  ]
}

fn fetch(config: &BuildConfig, layout: &BuildLayout) -> Stage {
  Stage::new(FETCH, "git")
    .args(["clone", "--recursive", "--branch"])
    .arg(&config.tag)
    .arg(&config.repo_url)
    .path_arg(&layout.source_dir)
    .env("GIT_TERMINAL_PROMPT", "0")
    .skip_if_exists(&layout.source_dir)
    .create_dir(&layout.build_dir)
    .output(&layout.source_dir)
}

fn host_configure(layout: &BuildLayout) -> Stage {
  Stage::new(HOST_CONFIGURE, "cmake")
    .arg("-S")
    .path_arg(&layout.source_dir)
    .arg("-B")
    .path_arg(&layout.host_build_dir)
    .args([
      "-GNinja",
      "-DCMAKE_BUILD_TYPE=Release",
      "-DSLANG_BUILD_GENERATORS=ON",
      "-DSLANG_LIB_TYPE=STATIC",
    ])
    .args(COMMON_CMAKE_FLAGS.iter().copied())
    .create_dir(&layout.host_build_dir)
    .input(&layout.source_dir)
    .output(&layout.host_build_dir)
}

fn host_build(layout: &BuildLayout) -> Stage {
  Stage::new(HOST_BUILD, "cmake")
    .arg("--build")
    .path_arg(&layout.host_build_dir)
    .input(&layout.host_build_dir)
}

fn host_install(layout: &BuildLayout) -> Stage {
  Stage::new(HOST_INSTALL, "cmake")
    .arg("--install")
    .path_arg(&layout.host_build_dir)
    .arg("--prefix")
    .path_arg(&layout.host_tools_dir)
    .args(["--component", "generators"])
    .input(&layout.host_build_dir)
    .output(layout.generators_dir())
}

fn target_configure(config: &BuildConfig, layout: &BuildLayout, ndk: &Ndk) -> Stage {
  let toolchain = ndk.toolchain_file();

  Stage::new(TARGET_CONFIGURE, "cmake")
    .arg("-S")
    .path_arg(&layout.source_dir)
    .arg("-B")
    .path_arg(&layout.android_build_dir)
    .arg("-GNinja")
    .arg(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()))
    .arg(format!("-DANDROID_ABI={}", config.android_abi))
    .arg(format!("-DANDROID_PLATFORM={}", config.android_platform))
    .args(["-DCMAKE_BUILD_TYPE=Release", "-DSLANG_LIB_TYPE=SHARED"])
    .arg(format!("-DSLANG_GENERATORS_PATH={}", layout.generators_dir().display()))
    .arg("-DSLANG_SLANG_LLVM_FLAVOR=DISABLE")
    .args(COMMON_CMAKE_FLAGS.iter().copied())
    .create_dir(&layout.android_build_dir)
    .input(&layout.source_dir)
    .input(toolchain)
    .output(&layout.android_build_dir)
}

fn target_build(layout: &BuildLayout) -> Stage {
  Stage::new(TARGET_BUILD, "cmake")
    .arg("--build")
    .path_arg(&layout.android_build_dir)
    .args(["--target", "slang"])
    .input(&layout.android_build_dir)
    .output(&layout.android_build_dir)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::ndk::NdkSource;

  fn config() -> BuildConfig {
    BuildConfig {
      repo_url: "https://example.com/slang.git".to_string(),
      tag: "v2025.1".to_string(),
      android_abi: "arm64-v8a".to_string(),
      android_platform: "android-30".to_string(),
      build_dir: PathBuf::from("/work"),
      dist_dir: PathBuf::from("/dist"),
    }
  }

  fn ndk() -> Ndk {
    Ndk::new("/ndk", NdkSource::Explicit)
  }

  fn find<'a>(stages: &'a [Stage], name: &str) -> &'a Stage {
    stages.iter().find(|s| s.name == name).unwrap()
  }

  #[test]
  fn stages_follow_dependency_order() {
    let stages = plan_stages(&config(), &ndk());
    let names: Vec<_> = stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, STAGE_ORDER);
  }

  #[test]
  fn fetch_clones_tag_recursively_and_skips_existing_source() {
    let stages = plan_stages(&config(), &ndk());
    let fetch = find(&stages, FETCH);

    assert_eq!(fetch.program, "git");
    assert_eq!(
      fetch.args[..5],
      ["clone", "--recursive", "--branch", "v2025.1", "https://example.com/slang.git"]
    );
    assert_eq!(fetch.args[5], config().layout().source_dir.to_string_lossy());
    assert_eq!(fetch.skip_if_exists, Some(config().layout().source_dir));
  }

  #[test]
  fn host_configure_builds_static_generators() {
    let stages = plan_stages(&config(), &ndk());
    let stage = find(&stages, HOST_CONFIGURE);

    assert!(stage.args.contains(&"-DSLANG_BUILD_GENERATORS=ON".to_string()));
    assert!(stage.args.contains(&"-DSLANG_LIB_TYPE=STATIC".to_string()));
    for flag in COMMON_CMAKE_FLAGS {
      assert!(stage.args.contains(&flag.to_string()), "missing {flag}");
    }
    assert_eq!(stage.inputs, vec![config().layout().source_dir]);
  }

  #[test]
  fn host_install_targets_generators_component() {
    let stages = plan_stages(&config(), &ndk());
    let stage = find(&stages, HOST_INSTALL);
    let layout = config().layout();

    assert_eq!(
      stage.command_line(),
      format!(
        "cmake --install {} --prefix {} --component generators",
        layout.host_build_dir.display(),
        layout.host_tools_dir.display()
      )
    );
    assert_eq!(stage.outputs, vec![layout.generators_dir()]);
  }

  #[test]
  fn target_configure_consumes_host_tools_and_ndk_toolchain() {
    let stages = plan_stages(&config(), &ndk());
    let stage = find(&stages, TARGET_CONFIGURE);
    let layout = config().layout();
    let toolchain = ndk().toolchain_file();

    let expected = [
      format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain.display()),
      "-DANDROID_ABI=arm64-v8a".to_string(),
      "-DANDROID_PLATFORM=android-30".to_string(),
      "-DSLANG_LIB_TYPE=SHARED".to_string(),
      format!("-DSLANG_GENERATORS_PATH={}", layout.generators_dir().display()),
      "-DSLANG_SLANG_LLVM_FLAVOR=DISABLE".to_string(),
    ];
    for flag in &expected {
      assert!(stage.args.contains(flag), "missing {flag}");
    }
    assert!(stage.inputs.contains(&toolchain));
    assert_eq!(stage.create_dirs, vec![layout.android_build_dir]);
  }

  #[test]
  fn target_build_only_builds_slang() {
    let stages = plan_stages(&config(), &ndk());
    let stage = find(&stages, TARGET_BUILD);

    assert!(stage.command_line().ends_with("--target slang"));
  }
}
