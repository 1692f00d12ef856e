//! Lexer, printer, solver and checker properties

use tiny_checker::{type_check, ConstraintSet, ConstraintSolver, GroundType, Origin, Term, UnionFind};
use tiny_lang::{process_line, ErrorKind, PipelineOptions, Span};
use tiny_parser::{parse_source, tokenize, TokenKind, TypeVar};

#[test]
fn test_integer_literals_lex_to_one_token() {
    for n in [0i64, 1, 7, 42, 1234567, i64::MAX] {
        let tokens = tokenize(&n.to_string()).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Int(n));

        let tokens = tokenize(&format!("-{}", n)).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Int(-n));
    }
}

#[test]
fn test_print_parse_print_is_stable() {
    let sources = [
        "x",
        "-12",
        "false",
        "(+ a 1)",
        "(- a -1)",
        "(* (/ a b) c)",
        "(< 1 2)",
        "(&& p (|| q r))",
        "(! (! p))",
        "(if c then (let y = 2 in y) else 0)",
        "(let x = (if true then 1 else 2) in (< x 3))",
    ];

    for source in sources {
        let printed = parse_source(source).unwrap().to_string();
        let reprinted = parse_source(&printed).unwrap().to_string();
        assert_eq!(printed, reprinted, "{}", source);
    }
}

#[test]
fn test_join_is_idempotent() {
    let mut sets = UnionFind::new(5);
    sets.join(0, 3);
    sets.join(3, 4);
    let before: Vec<usize> = (0..5).map(|id| sets.find(id)).collect();

    sets.join(0, 3);
    sets.join(3, 4);
    let after: Vec<usize> = (0..5).map(|id| sets.find(id)).collect();
    assert_eq!(before, after);
}

#[test]
fn test_closed_expressions_never_fail_syntactically() {
    let options = PipelineOptions { evaluate: false };
    for source in ["(+ 1 2)", "(if true then 1 else false)", "(let z = 4 in (! z))", "(< 1 2)"] {
        match process_line(source, &options) {
            Ok(output) => assert!(output.report_lines().is_empty()),
            Err(error) => assert_eq!(error.kind(), ErrorKind::Type, "{}", source),
        }
    }
}

#[test]
fn test_ground_types_conflict_in_every_order() {
    let var = Term::Var(TypeVar(0));
    let int = Term::Ground(GroundType::Int);
    let boolean = Term::Ground(GroundType::Bool);

    for (first, second) in [
        ((var, int), (var, boolean)),
        ((var, boolean), (var, int)),
        ((int, var), (boolean, var)),
        ((boolean, var), (int, var)),
    ] {
        let mut set = ConstraintSet::new();
        set.equal(first.0, first.1, Origin::Literal, Span::new(0, 1));
        set.equal(second.0, second.1, Origin::Literal, Span::new(0, 1));

        let error = ConstraintSolver::new(1).solve(&set).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("INT") && message.contains("BOOL"), "{}", message);
    }
}

#[test]
fn test_checker_reports_inside_nested_lets() {
    let mut expr = parse_source("(let a = 1 in (let b = (+ a c) in (< b d)))").unwrap();
    let result = type_check(&mut expr).unwrap();
    let free: Vec<&str> = result.free_variables().map(|binding| binding.name.as_str()).collect();
    assert_eq!(free, vec!["c", "d"]);
}
