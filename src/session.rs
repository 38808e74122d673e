use std::{error::Error, path::PathBuf};

use crate::interpreter::{
    evaluator::{core::Interpreter, function::core::core_scope},
    scope::Scope,
    shell::{ProcessShell, Shell},
    value::core::Value,
};

/// One evaluation session: an interpreter, the core library and the module
/// scope that top-level definitions go to.
///
/// Programs evaluated through the same session share their definitions.
///
/// # Example
/// ```
/// use lish::session::Session;
///
/// let session = Session::with_process_shell(std::env::temp_dir());
/// session.eval("(def $x 20)").unwrap();
///
/// assert_eq!(session.eval("(+ $x 1)").unwrap().to_string(), "21");
/// assert_eq!(session.definitions(), vec!["x".to_string()]);
/// ```
pub struct Session {
    interpreter: Interpreter,
    core:        Scope,
    module:      Scope,
}

impl Session {
    /// Creates a session around `interpreter`.
    #[must_use]
    pub fn new(interpreter: Interpreter) -> Self {
        let core = core_scope();
        let module = Scope::module(&core);
        Self { interpreter,
               core,
               module }
    }

    /// Creates a session running external programs through `shell` in `cwd`.
    #[must_use]
    pub fn with_shell(shell: Box<dyn Shell>, cwd: PathBuf) -> Self {
        Self::new(Interpreter::new(shell, cwd))
    }

    /// Creates a session running external programs as child processes.
    #[must_use]
    pub fn with_process_shell(cwd: PathBuf) -> Self {
        Self::with_shell(Box::new(ProcessShell), cwd)
    }

    /// The interpreter evaluating this session's programs.
    #[must_use]
    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// The module scope.
    #[must_use]
    pub const fn module(&self) -> &Scope {
        &self.module
    }

    /// Evaluates one program in the module scope.
    ///
    /// # Errors
    /// Returns the parse or runtime error that aborted the program. The session
    /// stays usable afterwards.
    pub fn eval(&self, source: &str) -> Result<Value, Box<dyn Error>> {
        self.interpreter.eval(source, &self.module)
    }

    /// Discards every definition by starting over with an empty module scope.
    pub fn reset_module(&mut self) {
        tracing::debug!("resetting module scope");
        self.module = Scope::module(&self.core);
    }

    /// Names defined in the module scope, sorted.
    #[must_use]
    pub fn definitions(&self) -> Vec<String> {
        self.module.local_names()
    }
}
