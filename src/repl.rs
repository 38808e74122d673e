use std::path::{Path, PathBuf};

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    interpreter::{evaluator::core::Interpreter, value::core::Value},
    session::Session,
};

/// What the loop should do after a line has been processed.
#[derive(Debug, PartialEq, Eq)]
pub enum LineResult {
    /// Keep reading, after printing the output if there is any.
    Continue(Option<String>),
    /// Leave the loop.
    Exit,
}

/// Interactive state: the session plus the counter behind `$resultN`.
pub struct Repl {
    session: Session,
    results: usize,
}

impl Repl {
    /// Creates a REPL evaluating in `session`.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session,
               results: 0 }
    }

    /// The session lines are evaluated in.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Processes one line of input.
    ///
    /// Lines starting with a known `/` meta-command run it. Anything else,
    /// including a path such as `/bin/echo hi`, is evaluated as a program; a
    /// result other than `null` or an empty string is bound to
    /// the next `$resultN` and returned for display. Errors are returned as
    /// output and never end the loop.
    pub fn process_line(&mut self, line: &str) -> LineResult {
        let trimmed = line.trim();

        if trimmed.starts_with('/')
           && let Some(result) = self.handle_meta_command(trimmed)
        {
            return result;
        }
        if trimmed == "exit" {
            return LineResult::Exit;
        }
        if trimmed.is_empty() {
            return LineResult::Continue(None);
        }

        match self.session.eval(trimmed) {
            Ok(value) => LineResult::Continue(self.bind_result(value)),
            Err(e) => LineResult::Continue(Some(format!("Error: {e}"))),
        }
    }

    /// Handles a meta-command (starts with /). Returns `None` when the first
    /// word is not one, so the line runs as a program.
    fn handle_meta_command(&mut self, cmd: &str) -> Option<LineResult> {
        let (command, rest) = cmd.split_once(char::is_whitespace).unwrap_or((cmd, ""));

        let result = match command {
            "/quit" | "/q" => LineResult::Exit,
            "/help" | "/h" | "/?" => LineResult::Continue(Some(HELP_TEXT.to_string())),
            "/defs" => {
                let defs = self.session
                               .definitions()
                               .into_iter()
                               .filter(|name| !is_result_name(name))
                               .collect::<Vec<_>>();
                if defs.is_empty() {
                    LineResult::Continue(Some("(no definitions)".to_string()))
                } else {
                    LineResult::Continue(Some(defs.join("\n")))
                }
            },
            "/clear-results" => {
                for name in self.session.definitions() {
                    if is_result_name(&name) {
                        self.session.module().remove_nearest(&name);
                    }
                }
                self.results = 0;
                LineResult::Continue(Some("Results cleared".to_string()))
            },
            "/clear-defs" => {
                self.session.reset_module();
                self.results = 0;
                LineResult::Continue(Some("Definitions cleared".to_string()))
            },
            "/ast" => match Interpreter::prepare(rest.trim()) {
                Ok(program) => LineResult::Continue(Some(program.to_string())),
                Err(e) => LineResult::Continue(Some(format!("Error: {e}"))),
            },
            _ => return None,
        };
        Some(result)
    }

    /// Binds a displayable result to the next `$resultN` and formats it.
    fn bind_result(&mut self, value: Value) -> Option<String> {
        if value.is_nil() || matches!(&value, Value::String(s) if s.is_empty()) {
            return None;
        }

        self.results += 1;
        let name = format!("result{}", self.results);
        let shown = match &value {
            Value::String(s) if s.contains('\n') => format!("${name}:\n{}", s.trim_end()),
            other => format!("${name}: {other}"),
        };
        self.session.module().define_local(&name, value);
        Some(shown)
    }

    /// The prompt, showing the working directory.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{}> ", self.session.interpreter().cwd().display())
    }
}

fn is_result_name(name: &str) -> bool {
    name.strip_prefix("result")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

const HELP_TEXT: &str = r#"lish REPL

Meta Commands:
  /help, /?         Show this help
  /quit, exit       Exit the REPL
  /defs             List definitions
  /clear-results    Forget $result1, $result2, ...
  /clear-defs       Forget every definition
  /ast <program>    Show the desugared form of a program

Language:
  (f a b)           Call a function, or run the program f
  ls -la            A bare line is a command
  $x                Variable reference
  [1 2 3]           Array literal
  {"k" 1}           Map literal
  a | f x           Pipe: (f a x)
  a |> f x          Pipe last: (f x a)
  a ; b             Sequence: run a, then b
  $obj.name         Member access: (get $obj "name")
  (.name $obj v)    Member write: (set $obj "name" v)

Examples:
  (def $files (ls | Parse.lines))
  (for $f in $files (String.upper $f))
  (defn $square [$x] (* $x $x))
"#;

/// Save REPL history to disk.
fn save_history(rl: &mut DefaultEditor, history_path: Option<&Path>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent()
           && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Failed to create history directory: {}", e);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Runs the interactive loop until `/quit`, `exit` or end of input.
///
/// # Errors
/// Returns the line editor's error if it cannot be created or reading input
/// fails for a reason other than an interrupt or end of input.
pub fn run(session: Session) -> Result<(), ReadlineError> {
    println!("lish v{}", env!("CARGO_PKG_VERSION"));
    println!("Type /help for commands, /quit to exit.");

    let mut rl = DefaultEditor::new()?;

    let history_path: Option<PathBuf> =
        directories::BaseDirs::new().map(|b| b.data_dir().join("lish").join("history.txt"));
    if let Some(path) = &history_path
       && let Err(e) = rl.load_history(path)
    {
        let is_not_found =
            matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
        if !is_not_found {
            tracing::warn!("Failed to load history: {}", e);
        }
    }

    let mut repl = Repl::new(session);
    println!();

    let result = loop {
        match rl.readline(&repl.prompt()) {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::warn!("Failed to add history entry: {}", e);
                }

                match repl.process_line(&line) {
                    LineResult::Continue(Some(output)) => println!("{output}"),
                    LineResult::Continue(None) => {},
                    LineResult::Exit => break Ok(()),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            },
            Err(ReadlineError::Eof) => {
                println!("^D");
                break Ok(());
            },
            Err(err) => break Err(err),
        }
    };

    save_history(&mut rl, history_path.as_deref());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::shell::{Shell, ShellError};

    fn repl() -> Repl {
        Repl::new(Session::with_process_shell(std::env::temp_dir()))
    }

    /// Answers every program with its own name and arguments.
    struct EchoShell;

    impl Shell for EchoShell {
        fn execute(&self,
                   command: &str,
                   args: &[String],
                   _: &Path,
                   _: &dyn Fn(&str))
                   -> Result<String, ShellError> {
            Ok(format!("ran {command} {}", args.join(" ")))
        }
    }

    #[test]
    fn results_are_numbered_and_bound() {
        let mut repl = repl();

        assert_eq!(repl.process_line("(+ 1 2)"),
                   LineResult::Continue(Some("$result1: 3".to_string())));
        assert_eq!(repl.process_line("(* $result1 2)"),
                   LineResult::Continue(Some("$result2: 6".to_string())));
    }

    #[test]
    fn null_results_are_not_bound() {
        let mut repl = repl();

        assert_eq!(repl.process_line("(def $x 1)"), LineResult::Continue(None));
        assert_eq!(repl.process_line("$x"), LineResult::Continue(Some("$result1: 1".to_string())));
    }

    #[test]
    fn defs_hide_results() {
        let mut repl = repl();
        repl.process_line("(def $x 1)");
        repl.process_line("(+ 1 1)");

        assert_eq!(repl.process_line("/defs"), LineResult::Continue(Some("x".to_string())));

        repl.process_line("/clear-results");
        assert_eq!(repl.session().definitions(), vec!["x".to_string()]);

        repl.process_line("/clear-defs");
        assert!(repl.session().definitions().is_empty());
    }

    #[test]
    fn errors_do_not_end_the_loop() {
        let mut repl = repl();

        let LineResult::Continue(Some(output)) = repl.process_line("(+ 1") else {
            panic!("expected an error message");
        };
        assert!(output.starts_with("Error: "), "{output}");
        assert_eq!(repl.process_line("(+ 1 1)"),
                   LineResult::Continue(Some("$result1: 2".to_string())));
    }

    #[test]
    fn ast_shows_desugared_program() {
        let mut repl = repl();

        assert_eq!(repl.process_line("/ast 1 | + 2"),
                   LineResult::Continue(Some("(+ 1 2)".to_string())));
    }

    #[test]
    fn absolute_paths_run_as_programs() {
        let mut repl = Repl::new(Session::with_shell(Box::new(EchoShell), std::env::temp_dir()));

        assert_eq!(repl.process_line("/bin/echo hi"),
                   LineResult::Continue(Some("$result1: ran /bin/echo hi".to_string())));
        assert_eq!(repl.process_line("/help"),
                   LineResult::Continue(Some(HELP_TEXT.to_string())));
    }

    #[test]
    fn quit_and_exit() {
        let mut repl = repl();

        assert_eq!(repl.process_line("/quit"), LineResult::Exit);
        assert_eq!(repl.process_line("exit"), LineResult::Exit);
    }
}
