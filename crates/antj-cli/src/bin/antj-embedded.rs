//! antj-embedded - runs the build carried in a zip appended to this
//! executable. Every argument goes to the build tool.

use std::env;
use std::ffi::OsString;
use std::process::ExitCode;

use antj_cli::exit_code;
use antj_cli::logging;
use antj_cli::output::Output;
use antj_cli::run_embedded;

fn main() -> ExitCode {
    logging::init(0, false);

    let args: Vec<OsString> = env::args_os().skip(1).collect();
    let output = Output::new(0, false);
    exit_code(run_embedded(&args, &output), &output)
}
