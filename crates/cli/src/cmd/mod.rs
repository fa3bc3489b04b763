mod build;
mod plan;

use std::path::PathBuf;

use anyhow::{Context, Result};

use slangdroid_lib::BuildConfig;

pub use build::cmd_build;
pub use plan::cmd_plan;

/// Command-line overrides shared by the build and dry-run paths.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
  pub tag: Option<String>,
  pub ndk: Option<PathBuf>,
  pub abi: Option<String>,
  pub android_platform: Option<String>,
  pub build_dir: Option<PathBuf>,
  pub dist_dir: Option<PathBuf>,
}

impl BuildArgs {
  pub fn config(&self) -> Result<BuildConfig> {
    BuildConfig::builder()
      .tag(self.tag.clone())
      .android_abi(self.abi.clone())
      .android_platform(self.android_platform.clone())
      .build_dir(self.build_dir.clone())
      .dist_dir(self.dist_dir.clone())
      .build()
      .context("Invalid build configuration")
  }
}
