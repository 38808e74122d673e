use std::{
    cell::RefCell,
    io,
    path::{Path, PathBuf},
    rc::Rc,
};

use lish::{
    interpreter::{
        evaluator::core::Interpreter,
        shell::{Shell, ShellError},
    },
    session::Session,
};
use pretty_assertions::assert_eq;

type Calls = Rc<RefCell<Vec<(String, Vec<String>, PathBuf)>>>;

/// Records every program it is asked to run and answers with canned output.
///
/// `fail` exits with status 3, `missing` cannot be launched and `noisy`
/// writes to standard error before succeeding.
struct RecordingShell {
    calls:  Calls,
    output: String,
}

impl Shell for RecordingShell {
    fn execute(&self,
               command: &str,
               args: &[String],
               cwd: &Path,
               log: &dyn Fn(&str))
               -> Result<String, ShellError> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), args.to_vec(), cwd.to_path_buf()));

        match command {
            "fail" => Err(ShellError::Failed { code: Some(3) }),
            "missing" => Err(ShellError::Spawn(io::Error::new(io::ErrorKind::NotFound, "not found"))),
            "noisy" => {
                log("careful\n");
                Ok(self.output.clone())
            },
            _ => Ok(self.output.clone()),
        }
    }
}

fn session_with(output: &str, cwd: PathBuf) -> (Session, Calls) {
    let calls = Calls::default();
    let shell = RecordingShell { calls:  Rc::clone(&calls),
                                 output: output.to_string(), };
    (Session::with_shell(Box::new(shell), cwd), calls)
}

fn session(output: &str) -> (Session, Calls) {
    session_with(output, PathBuf::from("/work"))
}

fn commands(calls: &Calls) -> Vec<(String, Vec<String>)> {
    calls.borrow()
         .iter()
         .map(|(command, args, _)| (command.clone(), args.clone()))
         .collect()
}

#[test]
fn bound_functions_never_spawn() {
    let (session, calls) = session("");

    assert_eq!(session.eval("(+ 1 2)").unwrap().to_string(), "3");
    assert_eq!(session.eval(r#"(defn $greet [$n] (+ "hi " $n)) ; (greet "ada")"#)
                      .unwrap()
                      .to_string(),
               "hi ada");
    assert!(calls.borrow().is_empty());
}

#[test]
fn unbound_heads_run_programs() {
    let (session, calls) = session("out");

    assert_eq!(session.eval("(echo-name x)").unwrap().to_string(), "out");
    assert_eq!(commands(&calls), vec![("echo-name".to_string(), vec!["x".to_string()])]);
}

#[test]
fn arguments_are_stringified_and_arrays_spread() {
    let (session, calls) = session("");

    session.eval(r#"(tool [1 2] "a b" true 2.5)"#).unwrap();

    assert_eq!(commands(&calls),
               vec![("tool".to_string(),
                     ["1", "2", "a b", "true", "2.5"].map(String::from).to_vec())]);
}

#[test]
fn bare_lines_are_commands() {
    let (session, calls) = session("");

    session.eval("ls -la").unwrap();
    session.eval("ls").unwrap();

    assert_eq!(commands(&calls),
               vec![("ls".to_string(), vec!["-la".to_string()]), ("ls".to_string(), vec![])]);
}

#[test]
fn standard_output_is_the_result() {
    let (session, _) = session("a\nb\n");

    assert_eq!(session.eval("(ls -la | Parse.lines)").unwrap().to_string(),
               r#"["a", "b"]"#);
}

#[test]
fn quoted_heads_force_a_program() {
    let (session, calls) = session("");

    session.eval(r#"("echo" hi)"#).unwrap();

    assert_eq!(commands(&calls), vec![("echo".to_string(), vec!["hi".to_string()])]);
}

#[test]
fn string_values_in_head_position_run_programs() {
    let (session, calls) = session("");

    session.eval(r#"(def $tool "grep") ; ($tool -n x)"#).unwrap();

    assert_eq!(commands(&calls),
               vec![("grep".to_string(), vec!["-n".to_string(), "x".to_string()])]);
}

#[test]
fn standard_error_goes_to_the_log_sink() {
    let logged = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&logged);
    let shell = RecordingShell { calls:  Calls::default(),
                                 output: "done".to_string(), };
    let interpreter = Interpreter::new(Box::new(shell), PathBuf::from("/work"))
        .with_log_sink(Box::new(move |text| sink.borrow_mut().push_str(text)));
    let session = Session::new(interpreter);

    assert_eq!(session.eval("(noisy)").unwrap().to_string(), "done");
    assert_eq!(logged.borrow().as_str(), "careful\n");
}

#[test]
fn failures_are_positioned_errors() {
    let (session, _) = session("");

    assert_eq!(session.eval("(do 1 (fail))").unwrap_err().to_string(),
               "Command 'fail' exited with status 3 at 1:7");
    assert_eq!(session.eval("(missing)").unwrap_err().to_string(),
               "Failed to launch 'missing': not found at 1:1");
}

#[test]
fn programs_run_in_the_working_directory() {
    let base = std::env::temp_dir().join(format!("lish-dispatch-{}", std::process::id()));
    std::fs::create_dir_all(base.join("sub")).unwrap();
    let base = base.canonicalize().unwrap();

    let (session, calls) = session_with("", base.clone());
    session.eval("(pwd)").unwrap();
    session.eval(r#"(cd "sub") ; (pwd)"#).unwrap();
    assert_eq!(session.eval("(cwd)").unwrap().to_string(),
               base.join("sub").display().to_string());

    let dirs = calls.borrow().iter().map(|(_, _, cwd)| cwd.clone()).collect::<Vec<_>>();
    assert_eq!(dirs, vec![base.clone(), base.join("sub")]);

    assert!(session.eval(r#"(cd "no-such-dir")"#).is_err());
    std::fs::remove_dir_all(&base).unwrap();
}

#[cfg(unix)]
#[test]
fn process_shell_captures_output() {
    let session = Session::with_process_shell(std::env::temp_dir());

    assert_eq!(session.eval(r#"("echo" hello world)"#).unwrap().to_string(),
               "hello world\n");
    assert!(session.eval(r#"("false")"#).is_err());
    assert!(session.eval("(lish-no-such-program-anywhere)").is_err());
}

#[test]
fn file_functions_resolve_against_the_working_directory() {
    let base = std::env::temp_dir().join(format!("lish-files-{}", std::process::id()));
    std::fs::create_dir_all(&base).unwrap();

    let (session, calls) = session_with("", base.clone());
    session.eval(r#"(File.write "notes.txt" (+ "line " 1))"#).unwrap();

    assert_eq!(std::fs::read_to_string(base.join("notes.txt")).unwrap(), "line 1");
    assert_eq!(session.eval(r#"(File.read "notes.txt")"#).unwrap().to_string(), "line 1");
    assert_eq!(session.eval(r#"(File.exists "notes.txt")"#).unwrap().to_string(), "true");
    assert_eq!(session.eval("(File.list)").unwrap().to_string(), r#"["notes.txt"]"#);
    assert!(session.eval(r#"(File.read "missing.txt")"#).is_err());
    assert!(calls.borrow().is_empty());

    std::fs::remove_dir_all(&base).unwrap();
}
