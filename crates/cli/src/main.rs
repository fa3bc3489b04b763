use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slangdroid_lib::BuildError;
use slangdroid_lib::build::EXIT_OTHER;

mod cmd;
mod output;

use output::{OutputFormat, print_error};

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0  success (a build with no libraries only warns)
  1  other failure, including overlapping --build-dir/--dist-dir
  2  invalid command-line usage
  3  no Android NDK found, or the --ndk path does not exist
  4  a required file is missing (NDK toolchain file, Slang headers)
  5  git or cmake failed";

/// Cross-compile the Slang shader compiler for Android
#[derive(Parser)]
#[command(name = "slangdroid")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
  /// Slang release tag to build (falls back to SLANG_TAG, then the built-in default)
  #[arg(long)]
  tag: Option<String>,

  /// Android NDK root; skips auto-discovery
  #[arg(long, value_name = "PATH")]
  ndk: Option<PathBuf>,

  /// Target Android ABI
  #[arg(long)]
  abi: Option<String>,

  /// Target Android platform level
  #[arg(long)]
  android_platform: Option<String>,

  /// Working directory for the source checkout and build trees
  #[arg(long, value_name = "DIR")]
  build_dir: Option<PathBuf>,

  /// Directory that receives the libraries and headers
  #[arg(long, value_name = "DIR")]
  dist_dir: Option<PathBuf>,

  /// Print the planned stages without running anything
  #[arg(long)]
  dry_run: bool,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = cmd::BuildArgs {
    tag: cli.tag,
    ndk: cli.ndk,
    abi: cli.abi,
    android_platform: cli.android_platform,
    build_dir: cli.build_dir,
    dist_dir: cli.dist_dir,
  };

  let result = if cli.dry_run {
    cmd::cmd_plan(args, cli.output)
  } else {
    cmd::cmd_build(args, cli.output)
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      let code = err
        .downcast_ref::<BuildError>()
        .map(BuildError::exit_code)
        .unwrap_or(EXIT_OTHER);
      ExitCode::from(code)
    }
  }
}
