//! End-to-end checks of hand-built modules.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::Source;
use pretty_assertions::assert_eq;
use tern_diagnostic::{ColorMode, ErrorCode};
use tern_ir::BinaryOp;
use tern_types::{CheckConfig, CheckFlow, Idx, Tag};

fn codes(diags: &[tern_diagnostic::Diagnostic]) -> Vec<ErrorCode> {
    diags.iter().map(|d| d.code).collect()
}

#[test]
fn identity_is_generalized() {
    let mut src = Source::new();
    let body = src.ident("x");
    src.function("id", &["x"], body);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "id"), "('a) -> 'a");
    assert_eq!(typed.flow, None);
}

#[test]
fn int_plus_float_is_one_mismatch() {
    let mut src = Source::new();
    let one = src.int(1);
    let two = src.float(2.0);
    let body = src.binary(BinaryOp::Add, one, two);
    src.function("f", &[], body);

    let (typed, diags) = src.check();
    assert_eq!(codes(&diags), vec![ErrorCode::E2001]);
    assert_eq!(diags[0].message, "operands have incompatible types `i32` and `f64`");
    assert_eq!(diags[0].primary_span(), Some(src.span_of(two)));
    assert!(diags[0].notes.iter().any(|n| n.contains("integer and float")));
    assert_eq!(typed.function_type(src.name("f")), Some(Idx::ERROR));
    assert!(matches!(typed.flow, Some(CheckFlow::Recover(_))));
}

#[test]
fn uncovered_tag_is_named() {
    let mut src = Source::new();
    src.sum("Color", &[], &[("Red", vec![]), ("Green", vec![]), ("Blue", vec![])]);
    let scrutinee = src.ident("c");
    let red = src.tag_pattern("Red", &[]);
    let green = src.tag_pattern("Green", &[]);
    let zero = src.int(0);
    let one = src.int(1);
    let body = src.match_(scrutinee, &[(red, zero), (green, one)]);
    src.function("f", &["c"], body);

    let (_, diags) = src.check();
    assert_eq!(codes(&diags), vec![ErrorCode::E2006]);
    assert_eq!(diags[0].message, "non-exhaustive match: pattern `Blue` not covered");
    assert_eq!(diags[0].primary_span(), Some(src.span_of(body)));
}

#[test]
fn exhaustive_match_types_the_scrutinee() {
    let mut src = Source::new();
    src.sum("Color", &[], &[("Red", vec![]), ("Green", vec![])]);
    let scrutinee = src.ident("c");
    let red = src.tag_pattern("Red", &[]);
    let green = src.tag_pattern("Green", &[]);
    let t = src.boolean(true);
    let f = src.boolean(false);
    let body = src.match_(scrutinee, &[(red, t), (green, f)]);
    src.function("is_red", &["c"], body);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "is_red"), "(Color) -> bool");
}

#[test]
fn residual_operator_obligations_become_given() {
    let mut src = Source::new();
    let x = src.ident("x");
    let y = src.ident("y");
    let body = src.binary(BinaryOp::Add, x, y);
    src.function("add", &["x", "y"], body);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "add"), "('a, 'a) -> 'a given Add 'a");
}

#[test]
fn callers_inherit_given_constraints() {
    let mut src = Source::new();
    let x = src.ident("x");
    let y = src.ident("y");
    let body = src.binary(BinaryOp::Add, x, y);
    src.function("add", &["x", "y"], body);

    let a = src.boolean(true);
    let b = src.boolean(false);
    let call = src.call("add", &[a, b]);
    src.function("main", &[], call);

    let (typed, diags) = src.check();
    assert_eq!(codes(&diags), vec![ErrorCode::E2005]);
    assert_eq!(diags[0].message, "the trait `Add bool` is not implemented");
    assert_eq!(diags[0].primary_span(), Some(src.span_of(call)));
    assert_eq!(typed.function_type(src.name("main")), Some(Idx::ERROR));
    // The callee is unaffected.
    assert_eq!(src.fn_type(&typed, "add"), "('a, 'a) -> 'a given Add 'a");
}

#[test]
fn generic_functions_are_instantiated_per_reference() {
    let mut src = Source::new();
    let x = src.ident("x");
    src.function("id", &["x"], x);

    let one = src.int(1);
    let first = src.call("id", &[one]);
    let yes = src.boolean(true);
    let second = src.call("id", &[yes]);
    let pair = src.tuple(&[first, second]);
    src.function("both", &[], pair);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "both"), "() -> (i32, bool)");
    assert_eq!(typed.expr_type(first), Some(Idx::I32));
    assert_eq!(typed.expr_type(second), Some(Idx::BOOL));
}

#[test]
fn callees_are_checked_before_callers() {
    let mut src = Source::new();
    // `main` comes first but calls `id`, declared after it.
    let two = src.int(2);
    let call = src.call("id", &[two]);
    src.function("main", &[], call);
    let x = src.ident("x");
    src.function("id", &["x"], x);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "main"), "() -> i32");
}

#[test]
fn recursion_uses_the_placeholder() {
    let mut src = Source::new();
    // fun loop n = loop (n - 1)
    let n = src.ident("n");
    let one = src.int(1);
    let minus = src.binary(BinaryOp::Sub, n, one);
    let body = src.call("loop", &[minus]);
    src.function("loop", &["n"], body);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "loop"), "(i32) -> 'a");
}

/// `f x = (g x) + 1` and `g x = f x`.
fn mutually_recursive_pair(src: &mut Source) {
    let x = src.ident("x");
    let gx = src.call("g", &[x]);
    let one = src.int(1);
    let body = src.binary(BinaryOp::Add, gx, one);
    src.function("f", &["x"], body);
    let x = src.ident("x");
    let body = src.call("f", &[x]);
    src.function("g", &["x"], body);
}

#[test]
fn mutual_recursion_is_inferred_together() {
    let mut src = Source::new();
    mutually_recursive_pair(&mut src);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "f"), "('a) -> i32");
    assert_eq!(src.fn_type(&typed, "g"), "('a) -> i32");
}

#[test]
fn callers_see_the_solved_recursive_group() {
    let mut src = Source::new();
    mutually_recursive_pair(&mut src);
    // h = (g 1) and true
    let one = src.int(1);
    let g1 = src.call("g", &[one]);
    let yes = src.boolean(true);
    let body = src.binary(BinaryOp::And, g1, yes);
    src.function("h", &[], body);

    let (typed, diags) = src.check();
    assert_eq!(codes(&diags), vec![ErrorCode::E2001]);
    assert_eq!(diags[0].primary_span(), Some(src.span_of(g1)));
    assert_eq!(src.fn_type(&typed, "g"), "('a) -> i32");
    assert_eq!(typed.function_type(src.name("h")), Some(Idx::ERROR));
}

#[test]
fn non_exhaustive_match_does_not_hide_mismatches() {
    let mut src = Source::new();
    src.sum("Color", &[], &[("Red", vec![]), ("Green", vec![])]);
    let scrutinee = src.ident("c");
    let red = src.tag_pattern("Red", &[]);
    let zero = src.int(0);
    let matched = src.match_(scrutinee, &[(red, zero)]);
    let one = src.int(1);
    let two = src.float(2.0);
    let sum = src.binary(BinaryOp::Add, one, two);
    let body = src.block(&[matched, sum]);
    src.function("f", &["c"], body);

    let (_, diags) = src.check();
    let codes = codes(&diags);
    assert!(codes.contains(&ErrorCode::E2006), "{codes:?}");
    assert!(codes.contains(&ErrorCode::E2001), "{codes:?}");
}

#[test]
fn tag_construction_creates_a_variant() {
    let mut src = Source::new();
    let t = src.ty_var("t");
    src.sum("Maybe", &["t"], &[("Some", vec![t]), ("None", vec![])]);
    let five = src.int(5);
    let body = src.construct("Some", &[five]);
    src.function("wrap", &[], body);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "wrap"), "() -> Maybe i32");
    let maybe_i32 = typed.expr_type(body).unwrap();
    assert_eq!(typed.pool.tag(maybe_i32), Tag::Sum);
    assert!(typed.variants.contains(&maybe_i32));
}

#[test]
fn undeclared_function_is_reported_at_the_reference() {
    let mut src = Source::new();
    let call = src.call("missing", &[]);
    src.function("main", &[], call);

    let (_, diags) = src.check();
    assert_eq!(codes(&diags), vec![ErrorCode::E2002]);
    assert_eq!(diags[0].message, "cannot find value `missing` in this scope");
}

#[test]
fn externs_accept_extra_variadic_arguments() {
    let mut src = Source::new();
    let c8 = src.ty("c8", &[]);
    let fmt = src.ty_ptr(c8);
    let i32_ty = src.ty("i32", &[]);
    src.function_typed("printf", &[("fmt", Some(fmt))], Some(i32_ty), None)
        .is_variadic = true;

    let format = src.name("%d");
    let text = src.expr(tern_ir::ExprKind::String(format));
    let one = src.int(1);
    let call = src.call("printf", &[text, one]);
    src.function("main", &[], call);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "printf"), "(*c8, ...) -> i32");
    assert_eq!(src.fn_type(&typed, "main"), "() -> i32");
}

#[test]
fn declared_given_bounds_are_kept() {
    let mut src = Source::new();
    let t = src.ty_var("t");
    let bool_ty = src.ty("bool", &[]);
    let x = src.ident("x");
    let y = src.ident("y");
    let body = src.binary(BinaryOp::Eq, x, y);
    let given = src.given("Eq", &[t]);
    let decl = src.function_typed("same", &[("x", Some(t)), ("y", Some(t))], Some(bool_ty), Some(body));
    decl.given.push(given);

    let (typed, diags) = src.check();
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(src.fn_type(&typed, "same"), "('a, 'a) -> bool given Eq 'a");
}

#[test]
fn error_limit_aborts() {
    let mut src = Source::new();
    for name in ["a", "b", "c"] {
        let body = src.ident("nowhere");
        src.function(name, &[], body);
    }
    let config = CheckConfig {
        error_limit: 2,
        color: ColorMode::Never,
        ..CheckConfig::default()
    };
    let (typed, diags) = src.check_with(&config);
    assert_eq!(diags.len(), 2);
    assert!(matches!(typed.flow, Some(CheckFlow::Abort(_))));
    assert_eq!(typed.function_type(src.name("c")), None);
}

#[test]
fn colored_mismatch_highlights_the_difference() {
    let mut src = Source::new();
    let one = src.int(1);
    let two = src.float(2.0);
    let body = src.binary(BinaryOp::Add, one, two);
    src.function("f", &[], body);
    let config = CheckConfig {
        color: ColorMode::Always,
        ..CheckConfig::default()
    };
    let (_, diags) = src.check_with(&config);
    assert!(diags[0].message.contains("\x1b[1;31mi32\x1b[0m"), "{:?}", diags[0].message);
}
