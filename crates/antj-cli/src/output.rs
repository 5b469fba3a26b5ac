//! Human-readable result and error lines.
//!
//! The build tool owns stdout while it runs. antj writes its own status to
//! stderr, except the kept extraction path, which goes to stdout so scripts
//! can capture it.

use std::io::Write;
use std::path::Path;

use antj_core::LaunchReport;
use console::Term;
use console::style;
use log::warn;

/// Prints launch outcomes.
pub struct Output {
    verbose: u8,
    quiet: bool,
    use_colors: bool,
    stdout: Term,
    stderr: Term,
}

impl Output {
    /// Creates an output for the given `-v` count and `-q` flag.
    #[must_use]
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled_stderr(),
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Reports a finished launch.
    pub fn launch_result(&self, report: &LaunchReport) {
        if report.kept {
            write_kept_root(&mut &self.stdout, &report.extraction_root);
        }

        if self.quiet || self.verbose == 0 {
            return;
        }

        let summary = format!(
            "Build finished: {} files, {} directories extracted in {:.2?}",
            report.extraction.files_extracted,
            report.extraction.directories_created,
            report.extraction.duration
        );
        if self.use_colors {
            let _ = self
                .stderr
                .write_line(&format!("{} {summary}", style("✓").green().bold()));
        } else {
            let _ = self.stderr.write_line(&summary);
        }

        if report.extraction.has_warnings() {
            let _ = self.stderr.write_line(&format!(
                "{} timestamp warning(s) during extraction",
                report.extraction.warnings.len()
            ));
        }
    }

    /// Reports a failed launch.
    pub fn error(&self, err: &anyhow::Error) {
        let label = if self.use_colors {
            style("error:").red().bold().to_string()
        } else {
            "error:".to_string()
        };
        let _ = self.stderr.write_line(&format!("{label} {err:#}"));
    }
}

/// Prints the kept extraction root on its own line.
///
/// A failed write is logged with the path so it still reaches stderr.
fn write_kept_root(out: &mut impl Write, root: &Path) -> bool {
    match writeln!(out, "{}", root.display()).and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            warn!("extraction root kept at {} ({e})", root.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_kept_root_written_as_line() {
        let mut out = Vec::new();
        assert!(write_kept_root(&mut out, Path::new("/tmp/antj123")));
        assert_eq!(out, b"/tmp/antj123\n");
    }

    #[test]
    fn test_kept_root_write_failure_is_reported() {
        assert!(!write_kept_root(&mut Closed, Path::new("/tmp/antj123")));
    }
}
