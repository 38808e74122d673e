use lish::{
    ast::{Expr, LiteralValue},
    interpreter::{desugar::core::desugar, lexer::lex, parser::core::parse_program},
};
use pretty_assertions::assert_eq;

fn program(src: &str) -> Expr {
    let mut program = parse_program(&lex(src).unwrap()).unwrap();
    desugar(&mut program).unwrap();
    program
}

fn desugared(src: &str) -> String {
    program(src).to_string()
}

fn desugar_error(src: &str) -> String {
    let mut program = parse_program(&lex(src).unwrap()).unwrap();
    desugar(&mut program).unwrap_err().to_string()
}

#[test]
fn pipe_passes_the_left_side_first() {
    assert_eq!(desugared("(a b c | f x)"), "(f (a b c) x)");
    assert_eq!(desugared("(1 | + 2)"), "(+ 1 2)");
}

#[test]
fn pipe_last_passes_the_left_side_last() {
    assert_eq!(desugared("(a b c |> f x)"), "(f x (a b c))");
}

#[test]
fn chained_pipes_group_to_the_left() {
    assert_eq!(desugared("(a | f | g)"), "(g (f a))");
    assert_eq!(desugared("(a b | f |> g y)"), "(g y (f (a b)))");
}

#[test]
fn pipes_inside_nested_forms() {
    assert_eq!(desugared("(g (a b | f) [x | h])"), "(g (f (a b)) [x | h])");
}

#[test]
fn sequences_wrap_both_sides_in_do() {
    assert_eq!(desugared("(a ; b)"), "($do (a) (b))");
    assert_eq!(desugared("(a x ; $y)"), "($do (a x) $y)");
    assert_eq!(desugared("a ; b ; c"), "($do (a) (b) (c))");
}

#[test]
fn only_sequences_are_flattened() {
    assert_eq!(desugared("(do (do a) b)"), "(do (do a) b)");
    assert_eq!(desugared("(a ; (b ; c))"), "($do (a) (b) (c))");
}

#[test]
fn field_access_becomes_get_and_set() {
    assert_eq!(desugared("(.a.b $o)"), r#"($get $o "a" "b")"#);
    assert_eq!(desugared("(.a $o 1)"), r#"($set $o "a" 1)"#);
}

#[test]
fn dotted_names_become_get() {
    assert_eq!(desugared("(Array.map $xs $f)"), r#"(($get $Array "map") $xs $f)"#);
    assert_eq!(desugared("(echo $user.name)"), r#"(echo ($get $user "name"))"#);
    assert_eq!(desugared(r#"(f $m.a.b "x.y")"#), r#"(f ($get $m "a" "b") "x.y")"#);
}

#[test]
fn file_names_and_paths_are_left_alone() {
    assert_eq!(desugared("(cat notes.txt)"), "(cat notes.txt)");
    assert_eq!(desugared("(./run.sh x)"), "(./run.sh x)");
    assert_eq!(desugared("(../bin/tool.py)"), "(../bin/tool.py)");
}

#[test]
fn heads_are_classified_as_commands() {
    let Expr::Call { body, .. } = program(r#"(ls -la "x" 1)"#) else {
        panic!("expected a call form");
    };

    assert!(matches!(&body[0], Expr::Command { name, .. } if name == "ls"));
    assert!(matches!(&body[1], Expr::Value { value: LiteralValue::String(s), quoted: false, .. } if s == "-la"));
    assert!(matches!(&body[2], Expr::Value { quoted: true, .. }));
    assert!(matches!(&body[3], Expr::Value { value: LiteralValue::Number(_), .. }));

    let Expr::Call { body, .. } = program(r#"("ls" x)"#) else {
        panic!("expected a call form");
    };
    assert!(matches!(&body[0], Expr::Value { quoted: true, .. }));
}

#[test]
fn malformed_sugar_is_rejected() {
    assert_eq!(desugar_error("(| f)"), "Operator '|' needs an expression on both sides at 1:2");
    assert_eq!(desugar_error("(a ;)"), "Operator ';' needs an expression on both sides at 1:4");
    assert_eq!(desugar_error("(.a $o 1 2)"),
               ". access takes between 1 and 2 arguments: found 3 at 1:1");
    assert_eq!(desugar_error("(Array..map)"),
               "Expected non-empty member name in 'Array..map' at 1:2");
    assert_eq!(desugar_error("(echo $.x)"),
               "Expected non-empty member name in '.x' at 1:7");
    assert_eq!(desugar_error("(echo $a.)"),
               "Expected non-empty member name in 'a.' at 1:7");
}

#[test]
fn desugaring_twice_changes_nothing() {
    for src in ["(a b | f x)",
                "(a ; b ; c)",
                "(.a.b $o 1)",
                "(ls -la | Parse.lines |> Array.map $f)",
                "(for $x in $xs.items (echo $x))"]
    {
        let mut once = program(src);
        let copy = once.clone();
        desugar(&mut once).unwrap();
        assert_eq!(once, copy, "desugaring {src} again");
    }
}
