pub const SLANG_REPO: &str = "https://github.com/shader-slang/slang.git";
pub const DEFAULT_TAG: &str = "v2025.24.2";
pub const TAG_ENV_VAR: &str = "SLANG_TAG";

pub const ANDROID_ABI: &str = "arm64-v8a";
pub const ANDROID_PLATFORM: &str = "android-30";

pub const BUILD_DIR_NAME: &str = "build_slang";
pub const DIST_DIR_NAME: &str = "dist";

/// NDK root variables, highest priority first.
pub const NDK_ENV_VARS: &[&str] = &["ANDROID_NDK_HOME", "ANDROID_NDK_ROOT", "NDK_HOME"];

/// SDK root variables, highest priority first.
pub const SDK_ENV_VARS: &[&str] = &["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// CMake toolchain file, relative to the NDK root.
pub const NDK_TOOLCHAIN_FILE: &str = "build/cmake/android.toolchain.cmake";

/// Substring an output file name must contain to be collected.
pub const ARTIFACT_MARKER: &str = "lib";
pub const ARTIFACT_EXTENSIONS: &[&str] = &[".so", ".a"];

/// CMake options shared by the host and target configure stages.
pub const COMMON_CMAKE_FLAGS: &[&str] = &[
  "-DSLANG_ENABLE_GFX=OFF",
  "-DSLANG_ENABLE_SLANG_RHI=OFF",
  "-DSLANG_ENABLE_SLANGRT=OFF",
  "-DSLANG_ENABLE_EXAMPLES=OFF",
  "-DSLANG_ENABLE_TESTS=OFF",
];
