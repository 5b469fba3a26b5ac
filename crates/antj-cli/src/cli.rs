//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use std::ffi::OsString;
use std::path::Path;

/// Command line of the `antj` binary.
///
/// Options are only recognized before the archive. The archive and
/// everything after it are collected into one list, so build arguments that
/// look like antj's own flags (`-v`, `-q`, `-h`) reach the build tool.
#[derive(Parser, Debug)]
#[command(name = "antj")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Arguments after ARCHIVE are passed to the build tool unchanged.")]
pub struct Cli {
    /// Build tool program [default: $ANTJ_ANT or ant]
    #[arg(long, value_name = "PROGRAM")]
    pub ant: Option<OsString>,

    /// Keep the extraction directory and print its path
    #[arg(long)]
    pub keep_temp: bool,

    /// Print more detail (-v entries, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Zip archive holding .antj/build.xml, then the build tool arguments
    #[arg(
        value_name = "ARCHIVE",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<OsString>,
}

impl Cli {
    /// Returns the archive path, the first positional argument.
    #[must_use]
    pub fn archive(&self) -> Option<&Path> {
        self.args.first().map(Path::new)
    }

    /// Returns the arguments after the archive.
    #[must_use]
    pub fn build_args(&self) -> &[OsString] {
        self.args.get(1..).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_options_before_archive() {
        let cli = Cli::try_parse_from([
            "antj",
            "--ant",
            "/opt/ant/bin/ant",
            "-vv",
            "--keep-temp",
            "p.zip",
        ])
        .unwrap();
        assert_eq!(cli.ant.as_deref(), Some("/opt/ant/bin/ant".as_ref()));
        assert_eq!(cli.verbose, 2);
        assert!(cli.keep_temp);
        assert_eq!(cli.archive(), Some(Path::new("p.zip")));
        assert!(cli.build_args().is_empty());
    }

    #[test]
    fn test_build_args_forwarded_verbatim() {
        let cli = Cli::try_parse_from([
            "antj",
            "p.zip",
            "-Dversion=2",
            "clean",
            "-v",
            "--keep-temp",
            "dist",
        ])
        .unwrap();
        assert_eq!(cli.build_args(), ["-Dversion=2", "clean", "-v", "--keep-temp", "dist"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.keep_temp);
    }

    #[test]
    fn test_own_flags_after_archive_are_forwarded() {
        let cli = Cli::try_parse_from(["antj", "p.zip", "-v", "-q"]).unwrap();
        assert_eq!(cli.build_args(), ["-v", "-q"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_help_and_version_after_archive_are_forwarded() {
        for flag in ["-h", "--help", "-V", "--version"] {
            let cli = Cli::try_parse_from(["antj", "p.zip", flag, "dist"]).unwrap();
            assert_eq!(cli.archive(), Some(Path::new("p.zip")));
            assert_eq!(cli.build_args(), [flag, "dist"]);
        }
    }

    #[test]
    fn test_double_dash_after_archive_is_forwarded() {
        let cli = Cli::try_parse_from(["antj", "p.zip", "--", "-q"]).unwrap();
        assert_eq!(cli.build_args(), ["--", "-q"]);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_archive_required() {
        assert!(Cli::try_parse_from(["antj"]).is_err());
        assert!(Cli::try_parse_from(["antj", "-v"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["antj", "-q", "-v", "p.zip"]).is_err());
    }
}
