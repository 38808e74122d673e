use std::fs;

use lish::{
    ast::{Expr, LiteralValue},
    get_result, get_value,
    interpreter::{lexer::lex, parser::core::parse_program},
    session::Session,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_lish_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = get_result(&code, false) {
                panic!("lish example {} in {:?} failed:\n{}\nError: {}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No lish examples found in book/src");
}

fn extract_lish_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```lish") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn eval_to(src: &str, expected: &str) {
    match get_value(src) {
        Ok(value) => assert_eq!(value.to_string(), expected, "evaluating {src}"),
        Err(e) => panic!("Script failed: {src}\nError: {e}"),
    }
}

fn error_of(src: &str) -> String {
    match get_value(src) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail: {src}"),
        Err(e) => e.to_string(),
    }
}

#[test]
fn worked_scenarios() {
    eval_to("(+ 1 2 3)", "6");
    eval_to("(let [$x 2] (* $x $x))", "4");
    eval_to("(for $i in (Array.range 0 3) (* $i $i))", "[0, 1, 4]");
    eval_to(r#"(if (== 1 2) "a" "b")"#, "b");
}

#[test]
fn arithmetic_folds_left() {
    eval_to("(- 10 4 1)", "5");
    eval_to("(- 3)", "-3");
    eval_to("(* 2 3 4)", "24");
    eval_to("(/ 9 2)", "4.5");
    eval_to("(modulus 7 3)", "1");
    eval_to("(^ 2 10)", "1024");
    eval_to(r#"(+ "a" 1 "b")"#, "a1b");
}

#[test]
fn comparisons_and_logic() {
    assert_success("(assert (< 1 2))");
    assert_success(r#"(assert (>= "b" "a"))"#);
    assert_success("(assert (== [1 2] [1 2]))");
    assert_success(r#"(assert (!= 1 "1"))"#);
    assert_success("(assert (not (== 1 2)))");
    assert_success("(assert (xor true false))");
    assert_success("(assert (nil? null))");
    assert_failure("(assert false)");
    assert_failure("(< 1 \"a\")");
}

#[test]
fn truthiness() {
    eval_to(r#"(if "" "yes" "no")"#, "no");
    eval_to("(if 0 \"yes\" \"no\")", "no");
    eval_to("(if [] \"yes\" \"no\")", "yes");
    eval_to("(if false 1)", "null");
}

#[test]
fn and_or_short_circuit() {
    eval_to("(and 1 2 3)", "3");
    eval_to("(and 1 false 3)", "false");
    eval_to(r#"(or null 0 "x")"#, "x");
    eval_to("(and)", "true");
    eval_to("(or)", "false");
    // (1 2) would fail if it were evaluated.
    eval_to("(and false (1 2))", "false");
    eval_to("(or true (1 2))", "true");
}

#[test]
fn let_binds_pairs_in_order() {
    eval_to("(let [[$x 2] [$y (+ $x 1)]] (* $x $y))", "6");
    assert_failure("(let [] 1)");
    assert_failure("(let [x 1] x)");
}

#[test]
fn let_bindings_stay_inside() {
    eval_to("(let [$x 1] $x) ; $x", "null");
}

#[test]
fn def_writes_to_module_scope_from_any_depth() {
    eval_to("(let [$y 1] (let [$z 2] (def $x 5))) ; $x", "5");
    eval_to("(for $i in [1 2 3] (def $last $i)) ; $last", "3");
}

#[test]
fn closures_resolve_free_variables_where_defined() {
    eval_to("(defn $make [$n] (fn [$x] (+ $x $n))) ; (def $add2 ($make 2)) ; (let [$n 100] ($add2 1))",
            "3");
}

#[test]
fn recursion_through_module_scope() {
    eval_to("(defn $fact [$n] (if (<= $n 1) 1 (* $n ($fact (- $n 1))))) ; ($fact 5)", "120");
}

#[test]
fn missing_arguments_are_null() {
    eval_to("((fn [$a $b] (nil? $b)) 1)", "true");
}

#[test]
fn delete_removes_bindings() {
    eval_to("(def $x 1) ; (delete $x) ; (nil? $x)", "true");
}

#[test]
fn pipes_match_their_expansion() {
    eval_to("(10 | - 1)", "9");
    eval_to("(- 10 1)", "9");
    eval_to("(10 |> - 1)", "-9");
    eval_to("(- 1 10)", "-9");
    eval_to("([1 2 3] | Array.map (fn [$x] (* $x 2)) | Array.fold 0 (fn [$a $b] (+ $a $b)))", "12");
}

#[test]
fn sequences_run_in_order() {
    eval_to("(def $x 1) ; (def $x (+ $x 1)) ; $x", "2");
}

#[test]
fn dot_access_reads_and_writes_maps() {
    eval_to(r#"(def $user {"name" "ada"}) ; $user.name"#, "ada");
    eval_to(r#"(def $user {"name" "ada"}) ; (.name $user "grace") ; $user.name"#, "grace");
    eval_to(r#"(def $m {"a" {"b" 1}}) ; $m.a.b"#, "1");
    eval_to(r#"(def $m {"a" {"b" 1}}) ; (.a.b $m 2) ; (.a.b $m)"#, "2");
    eval_to(r#"(def $m {"a" 1}) ; $m.missing.deeper"#, "null");
}

#[test]
fn methods_bind_their_receiver() {
    eval_to("(def $xs [1 2 3]) ; ($xs.map (fn [$x] (* $x 10)))", "[10, 20, 30]");
    eval_to("(def $xs [1 2 3]) ; $xs.length", "3");
    eval_to(r#"(def $s "hello") ; ($s.upper)"#, "HELLO");
    eval_to("(def $xs [4 5 6]) ; (get $xs 1)", "5");
}

#[test]
fn map_literals_keep_the_last_duplicate() {
    eval_to(r#"(get {"a" 1 "a" 2} "a")"#, "2");
    eval_to(r#"{"b" 2 "a" [1 "x"]}"#, r#"{"a": [1, "x"], "b": 2}"#);
}

#[test]
fn string_namespace() {
    eval_to(r#"(String.split "a,b,c" ",")"#, r#"["a", "b", "c"]"#);
    eval_to(r#"(String.split "ab" "")"#, r#"["a", "b"]"#);
    eval_to(r#"(String.split "" "")"#, "[]");
    eval_to(r#"(String.join ", " ["a" "b"])"#, "a, b");
    eval_to(r#"(String.replace "a-b-c" "-" "+")"#, "a+b+c");
    eval_to(r#"(String.trim "  x ")"#, "x");
    assert_success(r#"(assert (String.startsWith "lish" "li"))"#);
}

#[test]
fn parse_namespace() {
    eval_to(r#"(Parse.lines "a\nb\n")"#, r#"["a", "b"]"#);
    eval_to(r#"(Parse.words " one  two ")"#, r#"["one", "two"]"#);
    eval_to(r#"(+ (Parse.number " 42 ") 1)"#, "43");
    eval_to(r#"(Parse.table [name age] "ada 36\ngrace 45")"#,
            r#"[{"age": "36", "name": "ada"}, {"age": "45", "name": "grace"}]"#);
    eval_to(r#"(Parse.table "," [a b] "1,2\n\n3")"#, r#"[{"a": "1", "b": "2"}, {"a": "3", "b": null}]"#);
    eval_to(r#"(Parse.json "{\"a\": [1, true, null]}")"#, "{\"a\": [1, true, null]}");
    assert_failure(r#"(Parse.number "x")"#);
}

#[test]
fn ranges_are_lazy() {
    eval_to("(Array.from (Array.take (Array.range 0) 3))", "[0, 1, 2]");
    eval_to("(Array.take (Array.range 0) 3)", "<sequence>");
    eval_to("(Array.take [1 2 3] 2)", "[1, 2]");
    eval_to("(Array.head (Array.drop (Array.range 5) 2))", "7");
    eval_to("(Array.length (Array.range 0 10 2))", "5");
    eval_to("(Array.from (Array.range 3 0 -1))", "[3, 2, 1]");
    assert_failure("(Array.range 0 10 0)");
}

#[test]
fn array_namespace() {
    eval_to("(Array.filter [1 2 3 4] (fn [$x] (== (modulus $x 2) 0)))", "[2, 4]");
    eval_to("(Array.flatMap [1 2] (fn [$x] [$x $x]))", "[1, 1, 2, 2]");
    eval_to("(Array.tail [1 2 3])", "[2, 3]");
    eval_to("(Array.init [1 2 3])", "[1, 2]");
    eval_to("(Array.last [1 2 3])", "3");
    eval_to("(Array.reverse [1 2 3])", "[3, 2, 1]");
    eval_to("(Array.of 1 \"a\")", r#"[1, "a"]"#);
    eval_to("(Array.join [1 2 3])", "1 2 3");
    eval_to("(Array.head [])", "null");
}

#[test]
fn runaway_recursion_is_an_error() {
    // Debug builds use large frames; give the evaluator room to reach the limit.
    let worker = std::thread::Builder::new().stack_size(64 * 1024 * 1024).spawn(|| {
        let session = Session::with_process_shell(std::env::temp_dir());
        session.eval("(defn $count-down [$n] (if (== $n 0) 0 ($count-down (- $n 1))))")
               .unwrap();

        let message = session.eval("($count-down 5000)").unwrap_err().to_string();
        assert!(message.starts_with("Calls nested deeper than 1000 levels at 1:"), "{message}");
        assert_eq!(session.eval("($count-down 100)").unwrap().to_string(), "0");
    });

    worker.unwrap().join().unwrap();
}

#[test]
fn special_forms_cannot_be_applied() {
    let message = error_of("(Array.map [1] $if)");
    assert!(message.starts_with("Special form 'if' cannot be applied"), "{message}");
}

#[test]
fn errors_carry_their_location() {
    assert_eq!(error_of(r#"(* 1 "a")"#), "Expected number: found string at 1:1");
    assert_eq!(error_of("(if)"), "if takes between 2 and 3 arguments: found 0 at 1:1");
    assert_eq!(error_of("(do 1\n  (not))"), "not takes exactly 1 arguments: found 0 at 2:3");
    assert_eq!(error_of("(1 2)"),
               "Call target is neither a function nor a command: found number at 1:1");
    assert_eq!(error_of("(for $i on [1] $i)"), "Expected keyword in: found on at 1:9");
    assert_eq!(error_of("(fn [x] x)"),
               "Expected variable definition after fn at position 1: found value at 1:6");
    assert_eq!(error_of(r#"(assert false "nope")"#), "Assertion failed: nope at 1:1");
}

#[test]
fn parse_errors_carry_their_location() {
    assert_eq!(error_of("(+ 1"), "Unterminated call form at 1:4");
    assert_eq!(error_of("(echo \"abc"), "Unterminated string at 1:7");
    assert_eq!(error_of("((+ 1 2)))"),
               "Unexpected ')' without a matching opening bracket at 1:10");
    assert_eq!(error_of(r#"{"a"}"#),
               "Map literal must have an even number of values to form key -> value pairs: found 1 at 1:1");
}

#[test]
fn literals_round_trip() {
    for source in ["42", "-3.5", "1e3", r#""a \"quoted\" \\ string\n\twith $dollars""#, "true", "null"] {
        let parsed = parse_program(&lex(source).unwrap()).unwrap();
        let reparsed = parse_program(&lex(&parsed.to_string()).unwrap()).unwrap();

        let (Expr::Value { value: first, .. }, Expr::Value { value: second, .. }) = (&parsed, &reparsed) else {
            panic!("{source} did not parse to a value");
        };
        assert_eq!(first, second, "round trip of {source}");
    }

    let Expr::Value { value, .. } = parse_program(&lex(r#""a\tb""#).unwrap()).unwrap() else {
        panic!("expected a value");
    };
    assert_eq!(value, LiteralValue::String("a\tb".to_string()));
}

#[test]
fn example_works() {
    let contents = fs::read_to_string("tests/example.lish").unwrap();
    assert_success(&contents);
}
