//! widgetkit: embeds factory-default widget files into a project and emits
//! the manifest listing the runtime installs from.
//!
//! # Usage
//!
//! ```text
//! widgetkit --proj <PROJECT_FILE> --providerid <GUID> --cfs <SOURCE_ROOT> --out <OUTPUT_FILE>
//! ```
//!
//! The build-step form `/proj:<PROJECT_FILE> /providerid:<GUID> ...` is
//! accepted as well.
//!
//! Exit codes: `0` success, `1` invalid arguments, `2` the run failed.

mod build;

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;

use build::BuildArgs;

pub(crate) const EXIT_USAGE: u8 = 1;
pub(crate) const EXIT_FAILED: u8 = 2;

/// Flags that may also be written as `/name:value`.
const SLASH_FLAGS: [&str; 4] = ["proj", "providerid", "cfs", "out"];

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "widgetkit",
    version,
    about = "Embed factory-default widget files and regenerate their manifest listing",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    init_tracing();
    cli.build.run()
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Rewrite `/name:value` arguments into `--name=value`.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('/') else {
                return arg;
            };
            let Some((name, value)) = rest.split_once(':') else {
                return arg;
            };
            let name = name.to_ascii_lowercase();
            if SLASH_FLAGS.contains(&name.as_str()) {
                OsString::from(format!("--{name}={}", value.trim()))
            } else {
                arg
            }
        })
        .collect()
}
