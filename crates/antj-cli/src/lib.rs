//! Shared code of the `antj` and `antj-embedded` binaries.
//!
//! Both binaries read [`LaunchConfig::from_env`], run one launch and map the
//! outcome to an exit code. `antj` takes the archive path and flags from its
//! command line; `antj-embedded` extracts the zip appended to its own
//! executable and forwards every argument.

pub mod cli;
pub mod error;
pub mod logging;
pub mod output;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use anyhow::bail;
use antj_core::ArchiveSource;
use antj_core::LaunchConfig;
use antj_core::Launcher;
use log::trace;

use crate::error::convert_launch_error;
use crate::output::Output;

/// Runs `antj` for parsed arguments.
///
/// # Errors
///
/// Returns the launch failure with context and a hint where one helps.
pub fn run(cli: &cli::Cli, output: &Output) -> Result<()> {
    let mut config = LaunchConfig::from_env();
    if let Some(program) = &cli.ant {
        config = config.with_ant_program(program.clone());
    }
    if cli.keep_temp {
        config = config.with_keep_temp(true);
    }

    let Some(archive) = cli.archive() else {
        bail!("missing ARCHIVE argument");
    };
    launch(config, &ArchiveSource::Path(archive.to_path_buf()), cli.build_args(), output)
}

/// Runs `antj-embedded` with the arguments after the program name.
///
/// # Errors
///
/// Returns an error if the executable is not a zip container holding the
/// build file, or if the launch fails.
pub fn run_embedded(args: &[OsString], output: &Output) -> Result<()> {
    let source = ArchiveSource::current_executable()
        .map_err(|e| convert_launch_error(e, "antj-embedded".as_ref()))?;
    launch(LaunchConfig::from_env(), &source, args, output)
}

fn launch(
    config: LaunchConfig,
    source: &ArchiveSource,
    args: &[OsString],
    output: &Output,
) -> Result<()> {
    let launcher = Launcher::new(config).map_err(|e| convert_launch_error(e, source.path()))?;
    trace!(
        "launching {} with {:?}",
        source.path().display(),
        launcher.config()
    );
    let report = launcher
        .launch(source, args)
        .map_err(|e| convert_launch_error(e, source.path()))?;
    output.launch_result(&report);
    Ok(())
}

/// Maps a run result to the process exit code, printing the error if any.
#[must_use]
pub fn exit_code(result: Result<()>, output: &Output) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&err);
            ExitCode::FAILURE
        }
    }
}
