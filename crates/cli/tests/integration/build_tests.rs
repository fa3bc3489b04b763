//! Full build runs through the real process runner.

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn build_collects_libraries_and_headers() {
  let env = TestEnv::new();

  env
    .slangdroid_cmd()
    .args(["--tag", "v2025.1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Executing: git clone --recursive --branch v2025.1"))
    .stdout(predicate::str::contains("Built Slang v2025.1"));

  let dist = env.dist_path();
  assert!(dist.join("libslang.so").is_file());
  assert!(dist.join("libslang-glslang.a").is_file());
  assert!(!dist.join("build.log").exists());
  assert!(dist.join("include/slang.h").is_file());
  assert!(dist.join("include/slang-com-ptr.h").is_file());

  let log = env.tool_log();
  assert_eq!(log.len(), 6);
  assert!(log[0].starts_with("git clone"));
  assert!(log[3].contains("--component generators"));
  assert!(log[4].contains(&format!(
    "-DCMAKE_TOOLCHAIN_FILE={}",
    env.ndk_path().join("build/cmake/android.toolchain.cmake").display()
  )));
  assert!(log[5].ends_with("--target slang"));
}

#[test]
fn every_command_is_echoed_with_its_directory() {
  let env = TestEnv::new();

  let output = env.slangdroid_cmd().output().unwrap();

  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  let lines: Vec<&str> = stdout.lines().collect();
  let executing: Vec<usize> = lines
    .iter()
    .enumerate()
    .filter(|(_, line)| line.contains("Executing:"))
    .map(|(i, _)| i)
    .collect();

  assert_eq!(executing.len(), 6);
  let expected = format!("in: {}", env.root().display());
  for i in executing {
    assert_eq!(lines[i + 1].trim(), expected, "after {:?}", lines[i]);
  }
}

#[test]
fn rerun_skips_fetch() {
  let env = TestEnv::new();
  env.slangdroid_cmd().assert().success();

  env
    .slangdroid_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("already exists, skipping"));

  let git_calls = env.tool_log().iter().filter(|l| l.starts_with("git ")).count();
  assert_eq!(git_calls, 1);
  assert!(env.dist_path().join("libslang.so").is_file());
}

#[test]
fn failing_fetch_stops_the_build() {
  let env = TestEnv::new();
  env.install_tool("git", "failing-tool.sh");

  env
    .slangdroid_cmd()
    .assert()
    .code(5)
    .stderr(predicate::str::contains("fetch"));

  let log = env.tool_log();
  assert_eq!(log.len(), 1);
  assert!(log.iter().all(|l| !l.starts_with("cmake")));
}

#[test]
fn failing_cmake_reports_stage() {
  let env = TestEnv::new();
  env.install_tool("cmake", "failing-tool.sh");

  env
    .slangdroid_cmd()
    .assert()
    .code(5)
    .stderr(predicate::str::contains("host-configure"));

  assert_eq!(env.tool_log().len(), 2);
}

#[test]
fn missing_toolchain_file_exits_with_path() {
  let env = TestEnv::new();
  std::fs::remove_file(env.ndk_path().join("build/cmake/android.toolchain.cmake")).unwrap();

  env
    .slangdroid_cmd()
    .assert()
    .code(4)
    .stderr(predicate::str::contains("android.toolchain.cmake"));

  assert!(env.tool_log().iter().all(|l| !l.contains("build-android")));
}

#[test]
fn missing_libraries_is_only_a_warning() {
  let env = TestEnv::new();
  env.write_file(
    "bin/cmake",
    "#!/bin/sh\necho \"cmake $*\" >> \"$SLANGDROID_TEST_LOG\"\n[ \"$1\" = --install ] && mkdir -p \"$4/bin\"\nexit 0\n",
  );

  env
    .slangdroid_cmd()
    .assert()
    .success()
    .stderr(predicate::str::contains("No library artifacts"));

  assert!(env.dist_path().join("include/slang.h").is_file());
}

#[test]
fn json_output_reports_build() {
  let env = TestEnv::new();

  let output = env.slangdroid_cmd().args(["--output", "json"]).output().unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["success"], true);
  assert_eq!(json["include_copied"], true);
  assert_eq!(json["artifacts"].as_array().unwrap().len(), 2);
  assert_eq!(json["pipeline"]["stages"][0]["status"], "ran");
}
