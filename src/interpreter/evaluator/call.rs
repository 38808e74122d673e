use crate::{
    ast::{Expr, Location},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, MAX_CALL_DEPTH},
        scope::Scope,
        shell::ShellError,
        value::{core::Value, function::Function},
    },
};

impl Interpreter {
    /// Evaluates a call form.
    ///
    /// Resolution of the head, in order:
    /// 1. A command head is looked up by name in `scope`. A function found there
    ///    is invoked; anything else falls through.
    /// 2. The head is evaluated. A function is invoked, a string runs the
    ///    external program of that name and anything else is an error.
    ///
    /// An empty call evaluates to `null`.
    ///
    /// # Errors
    /// - `CallDepthExceeded` if calls nest deeper than [`MAX_CALL_DEPTH`].
    /// - `NotCallable` if the head is neither a function nor a string.
    /// - Whatever the invoked function or external program raises.
    pub(crate) fn interpret_call(&self,
                                 body: &[Expr],
                                 location: Location,
                                 scope: &Scope)
                                 -> EvalResult<Value> {
        let depth = self.depth.get();
        if depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH,
                                                         location });
        }

        self.depth.set(depth + 1);
        let result = self.dispatch_call(body, location, scope);
        self.depth.set(depth);
        result
    }

    fn dispatch_call(&self, body: &[Expr], location: Location, scope: &Scope) -> EvalResult<Value> {
        let Some((head, args)) = body.split_first() else {
            return Ok(Value::Nil);
        };

        if let Expr::Command { name, .. } = head
           && let Some(Value::Function(function)) = scope.get_variable(name)
        {
            return self.invoke(&function, args, scope, location);
        }

        match self.interpret(head, scope)? {
            Value::Function(function) => self.invoke(&function, args, scope, location),
            Value::String(command) => self.run_external(&command, args, scope, location),
            other => Err(RuntimeError::NotCallable { found: other.type_name(),
                                                     location }),
        }
    }

    /// Invokes `function` with unevaluated argument expressions.
    ///
    /// Macros receive the expressions as written. Every other convention gets
    /// the arguments evaluated left to right first.
    ///
    /// # Errors
    /// Propagates errors from argument evaluation and from the function.
    pub fn invoke(&self,
                  function: &Function,
                  args: &[Expr],
                  scope: &Scope,
                  location: Location)
                  -> EvalResult<Value> {
        if let Function::Macro { name, func } = function {
            tracing::trace!(name, %location, "expanding special form");
            return func(self, args, scope, location);
        }

        let values = args.iter()
                         .map(|arg| self.interpret(arg, scope))
                         .collect::<EvalResult<Vec<_>>>()?;
        self.apply(function, values, location)
    }

    /// Calls `function` with already evaluated arguments.
    ///
    /// User closures bind their parameters positionally in a fresh child of the
    /// scope they were defined in. Missing arguments are bound to `null` and
    /// surplus arguments are ignored.
    ///
    /// # Errors
    /// - `MacroApplied` if `function` is a special form, which cannot receive
    ///   evaluated values.
    /// - `ArgumentCountMismatch` if a library function gets the wrong number of
    ///   arguments.
    /// - Whatever the function raises.
    pub fn apply(&self, function: &Function, args: Vec<Value>, location: Location) -> EvalResult<Value> {
        match function {
            Function::Macro { name, .. } => Err(RuntimeError::MacroApplied { name: *name, location }),
            Function::Lib { name, arity, func } => {
                arity.check(name, args.len(), location)?;
                func(self, &args, location)
            },
            Function::Bound(bound) => {
                let mut with_receiver = Vec::with_capacity(args.len() + 1);
                with_receiver.push(bound.receiver.clone());
                with_receiver.extend(args);
                bound.arity.check(bound.name, with_receiver.len(), location)?;
                (bound.method)(self, &with_receiver, location)
            },
            Function::User(closure) => {
                let inner = closure.scope.child();
                let mut args = args.into_iter();
                for param in &closure.params {
                    inner.define_local(param, args.next().unwrap_or(Value::Nil));
                }
                self.interpret(&closure.body, &inner)
            },
        }
    }

    /// Runs an external program, passing the evaluated arguments as strings.
    ///
    /// Array arguments are spread into one argument per element. The program's
    /// standard output is the result.
    fn run_external(&self,
                    command: &str,
                    args: &[Expr],
                    scope: &Scope,
                    location: Location)
                    -> EvalResult<Value> {
        let mut argv = Vec::with_capacity(args.len());
        for arg in args {
            match self.interpret(arg, scope)? {
                Value::Array(items) => argv.extend(items.iter().map(Value::to_argument)),
                value => argv.push(value.to_argument()),
            }
        }

        let cwd = self.cwd();
        self.shell()
            .execute(command, &argv, &cwd, self.log_sink())
            .map(Value::String)
            .map_err(|e| match e {
                ShellError::Spawn(cause) => RuntimeError::Spawn { command: command.to_string(),
                                                                  details: cause.to_string(),
                                                                  location },
                ShellError::Failed { code } => RuntimeError::CommandFailed { command:
                                                                                 command.to_string(),
                                                                             code,
                                                                             location },
            })
    }
}
