//! Logger setup for the binaries.

use std::io::Write;

use env_logger::Builder;
use env_logger::Env;
use log::Level;

/// Variable holding an `env_logger` filter that replaces the flag level.
pub const LOG_ENV: &str = "ANTJ_LOG";

/// Returns the default filter for the given `-v` count and `-q` flag.
#[must_use]
pub const fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global logger writing to stderr.
///
/// Info lines (one per extracted entry) are printed as is, other levels
/// carry a level tag.
pub fn init(verbose: u8, quiet: bool) {
    let env = Env::default().filter_or(LOG_ENV, default_filter(verbose, quiet));

    // A second call keeps the first logger.
    let _ = Builder::from_env(env)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{level}: {}", record.args()),
        })
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(0, false), "warn");
        assert_eq!(default_filter(1, false), "info");
        assert_eq!(default_filter(2, false), "debug");
        assert_eq!(default_filter(7, false), "trace");
        assert_eq!(default_filter(0, true), "error");
    }
}
