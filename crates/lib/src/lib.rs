//! slangdroid-lib: cross-compiles the Slang shader compiler for Android.
//!
//! - `ndk`: locates an Android NDK from the environment and SDK install conventions
//! - `config`: immutable build parameters and the directory layout they imply
//! - `pipeline`: the ordered external stages (git, cmake) and their runner
//! - `collect`: copies built libraries and headers into the dist directory
//! - `build`: ties the above together and maps failures to exit codes

pub mod build;
pub mod collect;
pub mod config;
pub mod consts;
pub mod ndk;
pub mod pipeline;
pub mod platform;
pub mod util;

pub use build::{BuildError, BuildReport, resolve_ndk, run_build};
pub use config::{BuildConfig, BuildLayout, ConfigError};
pub use ndk::{Ndk, NdkSearch, NdkSource, locate_ndk};
