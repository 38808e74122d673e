use std::{
    fmt, io,
    path::Path,
    process::{Command, Stdio},
};

/// Runs external programs on behalf of the evaluator.
///
/// The evaluator calls this whenever the head of a call resolves to a plain
/// string. Implementations block until the program exits.
pub trait Shell {
    /// Runs `command` with `args` in `cwd` and returns its standard output.
    ///
    /// Non-empty standard error is handed to `log` rather than treated as a
    /// failure.
    ///
    /// # Errors
    /// - `ShellError::Spawn` if the program could not be started.
    /// - `ShellError::Failed` if it exited unsuccessfully.
    fn execute(&self,
               command: &str,
               args: &[String],
               cwd: &Path,
               log: &dyn Fn(&str))
               -> Result<String, ShellError>;
}

/// Why an external program did not produce a result.
#[derive(Debug)]
pub enum ShellError {
    /// The program could not be launched, e.g. because it does not exist.
    Spawn(io::Error),
    /// The program ran and exited unsuccessfully.
    Failed {
        /// The exit code, if the program was not killed by a signal.
        code: Option<i32>,
    },
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "{e}"),
            Self::Failed { code: Some(code) } => write!(f, "exited with status {code}"),
            Self::Failed { code: None } => write!(f, "terminated by a signal"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(e) => Some(e),
            Self::Failed { .. } => None,
        }
    }
}

/// Runs programs as child processes of the interpreter.
///
/// Standard input is inherited so interactive programs still work; standard
/// output is captured and returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessShell;

impl Shell for ProcessShell {
    fn execute(&self,
               command: &str,
               args: &[String],
               cwd: &Path,
               log: &dyn Fn(&str))
               -> Result<String, ShellError> {
        tracing::debug!(command, ?args, cwd = %cwd.display(), "spawning external command");

        let output = Command::new(command).args(args)
                                          .current_dir(cwd)
                                          .stdin(Stdio::inherit())
                                          .output()
                                          .map_err(ShellError::Spawn)?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            log(&stderr);
        }

        if !output.status.success() {
            tracing::debug!(command, status = ?output.status.code(), "external command failed");
            return Err(ShellError::Failed { code: output.status.code() });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
