use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        desugar::core::desugar,
        lexer::lex,
        parser::core::parse_program,
        scope::Scope,
        shell::Shell,
        value::core::{MapKey, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Receives the standard error output of external programs.
pub type LogSink = Box<dyn Fn(&str)>;

/// How deeply call forms may nest before evaluation fails with
/// `CallDepthExceeded` rather than overflowing the native stack.
pub const MAX_CALL_DEPTH: usize = 1000;

/// The tree-walking evaluator.
///
/// Bindings are not kept here: every binding lives in the [`Scope`] chain
/// passed to [`Interpreter::interpret`]. The interpreter holds the session's
/// environment (the [`Shell`] used to run external programs, the sink their
/// standard error goes to and the working directory they run in) plus the
/// current call depth.
pub struct Interpreter {
    shell: Box<dyn Shell>,
    log:   LogSink,
    cwd:   RefCell<PathBuf>,
    /// Nesting depth of the call forms being evaluated.
    pub(super) depth: Cell<usize>,
}

impl Interpreter {
    /// Creates an interpreter running programs through `shell` in `cwd`.
    ///
    /// Standard error of external programs is written to the process's own
    /// standard error until [`Interpreter::with_log_sink`] says otherwise.
    #[must_use]
    pub fn new(shell: Box<dyn Shell>, cwd: PathBuf) -> Self {
        Self { shell,
               log: Box::new(|text| eprint!("{text}")),
               cwd: RefCell::new(cwd),
               depth: Cell::new(0) }
    }

    /// Replaces the sink for standard error output of external programs.
    #[must_use]
    pub fn with_log_sink(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }

    /// The working directory external programs and file functions use.
    #[must_use]
    pub fn cwd(&self) -> PathBuf {
        self.cwd.borrow().clone()
    }

    /// Changes the working directory.
    pub fn set_cwd(&self, cwd: PathBuf) {
        *self.cwd.borrow_mut() = cwd;
    }

    /// Resolves `path` against the working directory.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.borrow().join(path)
        }
    }

    pub(crate) fn shell(&self) -> &dyn Shell {
        self.shell.as_ref()
    }

    pub(crate) fn log_sink(&self) -> &dyn Fn(&str) {
        self.log.as_ref()
    }

    /// Lexes, parses, desugars and evaluates `source` in `scope`.
    ///
    /// This is the entry point used by both the script runner and the REPL.
    ///
    /// # Errors
    /// Returns the `ParseError` or `RuntimeError` that aborted evaluation. Its
    /// message ends in `at <line>:<column>`.
    pub fn eval(&self, source: &str, scope: &Scope) -> Result<Value, Box<dyn std::error::Error>> {
        let program = Self::prepare(source)?;
        tracing::debug!(%program, "evaluating");
        Ok(self.interpret(&program, scope)?)
    }

    /// Lexes, parses and desugars `source` without evaluating it.
    ///
    /// # Errors
    /// Returns the first `ParseError` raised along the way.
    pub fn prepare(source: &str) -> Result<Expr, crate::error::ParseError> {
        let tokens = lex(source)?;
        let mut program = parse_program(&tokens)?;
        desugar(&mut program)?;
        Ok(program)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// - Values and commands evaluate to their literal value.
    /// - Variables are looked up in the scope chain; an unbound variable is
    ///   `null`.
    /// - Array literals evaluate their elements in order.
    /// - Map literals evaluate key then value, pair by pair; a repeated key
    ///   keeps the last value.
    /// - Call forms are dispatched by [`Interpreter::interpret_call`].
    ///
    /// # Errors
    /// Propagates any error raised while evaluating a call.
    pub fn interpret(&self, expr: &Expr, scope: &Scope) -> EvalResult<Value> {
        match expr {
            Expr::Value { value, .. } => Ok(Value::from(value)),
            Expr::Command { name, .. } => Ok(Value::String(name.clone())),
            Expr::Variable { name, .. } => Ok(scope.get_variable(name).unwrap_or(Value::Nil)),
            Expr::ArrayLiteral { body, .. } => {
                let items = body.iter()
                                .map(|e| self.interpret(e, scope))
                                .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(items))
            },
            Expr::MapLiteral { body, .. } => {
                let mut entries = BTreeMap::new();
                for pair in body.chunks(2) {
                    if let [key_expr, value_expr] = pair {
                        let key = self.interpret(key_expr, scope)?;
                        let key = MapKey::from_value(&key, key_expr.location())?;
                        let value = self.interpret(value_expr, scope)?;
                        entries.insert(key, value);
                    }
                }
                Ok(Value::from(entries))
            },
            Expr::Call { body, location } => self.interpret_call(body, *location, scope),
        }
    }
}
