//! Build tool invocation.

use std::ffi::OsStr;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;

use log::debug;
use log::warn;
use thiserror::Error;

/// One build run: a script inside a working directory plus extra arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    /// Directory the build runs in (the extraction root).
    pub working_dir: PathBuf,
    /// Build script, relative to `working_dir`.
    pub build_file: PathBuf,
    /// Arguments appended after the script flag, in order.
    pub args: Vec<OsString>,
}

impl BuildInvocation {
    /// Returns `<program> -f <build_file> <args...>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use antj_core::BuildInvocation;
    ///
    /// let invocation = BuildInvocation {
    ///     working_dir: "/tmp/antj123".into(),
    ///     build_file: ".antj/build.xml".into(),
    ///     args: vec!["dist".into()],
    /// };
    /// assert_eq!(
    ///     invocation.command_line("ant".as_ref()),
    ///     ["ant", "-f", ".antj/build.xml", "dist"]
    /// );
    /// ```
    #[must_use]
    pub fn command_line(&self, program: &OsStr) -> Vec<OsString> {
        let mut command = Vec::with_capacity(self.args.len() + 3);
        command.push(program.to_os_string());
        command.push(OsString::from("-f"));
        command.push(self.build_file.clone().into_os_string());
        command.extend(self.args.iter().cloned());
        command
    }
}

/// A rendered command line, used in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(pub Vec<OsString>);

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", part.to_string_lossy())?;
        }
        f.write_str("]")
    }
}

/// Errors from running the build tool.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The program could not be started.
    #[error("failed to start {command}: {source}")]
    Spawn {
        /// Attempted command line.
        command: CommandLine,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully.
    #[error("Ant execution of {command} failed ({status})")]
    Failed {
        /// Attempted command line.
        command: CommandLine,
        /// Exit status of the build tool.
        status: ExitStatus,
    },
}

impl BuildError {
    /// Returns the attempted command line.
    #[must_use]
    pub fn command(&self) -> &CommandLine {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }
}

/// Something that can run a build.
pub trait BuildRunner {
    /// Runs the build and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the build cannot be started or does not succeed.
    fn run(&self, invocation: &BuildInvocation) -> Result<(), BuildError>;

    /// Returns the command line this runner would execute.
    fn command_line(&self, invocation: &BuildInvocation) -> Vec<OsString>;
}

/// Runs Ant as a child process with inherited standard streams.
#[derive(Debug, Clone)]
pub struct AntProcess {
    program: OsString,
}

impl AntProcess {
    /// Uses `program` as the build tool.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the configured program.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }
}

impl Default for AntProcess {
    fn default() -> Self {
        Self::new("ant")
    }
}

impl BuildRunner for AntProcess {
    fn run(&self, invocation: &BuildInvocation) -> Result<(), BuildError> {
        let command = CommandLine(self.command_line(invocation));

        if !invocation.working_dir.join(&invocation.build_file).is_file() {
            warn!(
                "build file {} not found in {}",
                invocation.build_file.display(),
                invocation.working_dir.display()
            );
        }
        debug!("running {command} in {}", invocation.working_dir.display());

        let status = Command::new(&self.program)
            .arg("-f")
            .arg(&invocation.build_file)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| BuildError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            debug!("{command} finished successfully");
            Ok(())
        } else {
            Err(BuildError::Failed { command, status })
        }
    }

    fn command_line(&self, invocation: &BuildInvocation) -> Vec<OsString> {
        invocation.command_line(self.program())
    }
}
