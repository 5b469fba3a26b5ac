//! antj - unpacks a zip archive into a temporary directory and runs Ant on
//! its `.antj/build.xml`.

use std::process::ExitCode;

use antj_cli::cli::Cli;
use antj_cli::exit_code;
use antj_cli::logging;
use antj_cli::output::Output;
use antj_cli::run;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let output = Output::new(cli.verbose, cli.quiet);
    exit_code(run(&cli, &output), &output)
}
