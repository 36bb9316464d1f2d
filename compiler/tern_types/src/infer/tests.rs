use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use tern_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use tern_ir::{
    BinaryOp, Expr, ExprArena, ExprId, ExprKind, MatchArm, MatchPattern, Param, PatternRange,
    Span, StringInterner,
};

use super::{ConstraintFinder, FunctionConstraints};
use crate::constraint::{Constraint, EqOrigin};
use crate::type_error::ErrorReporter;
use crate::{Idx, Pool, Tag, TraitRegistry, TypeView};

struct Harness {
    pool: Pool,
    registry: TraitRegistry,
    arena: ExprArena,
    interner: StringInterner,
}

impl Harness {
    fn new() -> Self {
        let interner = StringInterner::new();
        let mut pool = Pool::new();
        let registry = TraitRegistry::with_prelude(&mut pool, &interner);
        Harness {
            pool,
            registry,
            arena: ExprArena::new(),
            interner,
        }
    }

    fn expr(&mut self, kind: ExprKind) -> ExprId {
        let at = u32::try_from(self.arena.expr_count()).unwrap();
        self.arena.alloc_expr(Expr::new(kind, Span::new(at, at + 1)))
    }

    fn ident(&mut self, name: &str) -> ExprId {
        let name = self.interner.intern(name);
        self.expr(ExprKind::Ident(name))
    }

    fn list(&mut self, items: &[ExprId]) -> tern_ir::ExprRange {
        self.arena.alloc_expr_list(items.iter().copied())
    }

    fn find(&mut self, expr: ExprId) -> (Idx, FunctionConstraints, Vec<Diagnostic>) {
        let globals = FxHashMap::default();
        let mut sink = DiagnosticSink::new();
        let reporter = ErrorReporter::new(&mut sink, &self.interner, false);
        let finder = ConstraintFinder::new(
            &mut self.pool,
            &self.registry,
            &self.arena,
            &self.interner,
            &globals,
            reporter,
        );
        let (ty, found) = finder.find_expr(expr);
        (ty, found, sink.diagnostics().to_vec())
    }
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn literals_have_fixed_types() {
    let mut h = Harness::new();
    let one = h.expr(ExprKind::int(1));
    let (ty, found, diags) = h.find(one);
    assert_eq!(ty, Idx::I32);
    assert!(found.constraints.is_empty());
    assert!(diags.is_empty());
    assert_eq!(found.expr_types.get(&one), Some(&Idx::I32));

    let text = h.interner.intern("hi");
    let s = h.expr(ExprKind::String(text));
    let (ty, _, _) = h.find(s);
    assert_eq!(h.pool.view(ty), TypeView::Ptr(Idx::C8));
}

#[test]
fn suffixed_literals() {
    let mut h = Harness::new();
    let suffix = Some(h.interner.intern("u8"));
    let lit = h.expr(ExprKind::Int { value: 3, suffix });
    assert_eq!(h.find(lit).0, Idx::U8);

    let bad = Some(h.interner.intern("bogus"));
    let lit = h.expr(ExprKind::Float { bits: 0, suffix: bad });
    let (ty, _, diags) = h.find(lit);
    assert_eq!(ty, Idx::ERROR);
    assert_eq!(codes(&diags), vec![ErrorCode::E2002]);
}

#[test]
fn addition_shares_one_variable_and_obligates_add() {
    let mut h = Harness::new();
    let one = h.expr(ExprKind::int(1));
    let two = h.expr(ExprKind::int(2));
    let sum = h.expr(ExprKind::Binary {
        op: BinaryOp::Add,
        left: one,
        right: two,
    });
    let (ty, found, diags) = h.find(sum);
    assert!(diags.is_empty());
    assert!(h.pool.is_var(ty));

    let add = h.interner.intern("Add");
    let obligation = h.pool.trait_type(add, ty, &[]);
    let span_of = |id| h.arena.get_expr(id).span;
    assert_eq!(
        found.constraints,
        vec![
            Constraint::Trait {
                obligation,
                span: span_of(sum),
            },
            Constraint::eq(ty, Idx::I32, span_of(one), EqOrigin::Operand),
            Constraint::eq(ty, Idx::I32, span_of(two), EqOrigin::Operand),
        ]
    );
}

#[test]
fn comparison_yields_bool() {
    let mut h = Harness::new();
    let one = h.expr(ExprKind::int(1));
    let two = h.expr(ExprKind::int(2));
    let lt = h.expr(ExprKind::Binary {
        op: BinaryOp::Lt,
        left: one,
        right: two,
    });
    let (ty, found, _) = h.find(lt);
    assert_eq!(ty, Idx::BOOL);
    let traits: Vec<_> = found
        .constraints
        .iter()
        .filter_map(|c| match *c {
            Constraint::Trait { obligation, .. } => h.pool.nominal_name(obligation),
            Constraint::Eq { .. } => None,
        })
        .map(|name| h.interner.lookup(name))
        .collect();
    assert_eq!(traits, vec!["Cmp"]);
}

#[test]
fn undeclared_name_is_reported_at_lookup() {
    let mut h = Harness::new();
    let x = h.ident("x");
    let (ty, _, diags) = h.find(x);
    assert_eq!(ty, Idx::ERROR);
    assert_eq!(codes(&diags), vec![ErrorCode::E2002]);
    assert_eq!(diags[0].message, "cannot find value `x` in this scope");
    assert_eq!(diags[0].primary_span(), Some(h.arena.get_expr(x).span));
}

#[test]
fn if_without_else_is_unit() {
    let mut h = Harness::new();
    let cond = h.expr(ExprKind::Bool(true));
    let then = h.expr(ExprKind::Unit);
    let if_expr = h.expr(ExprKind::If {
        cond,
        then_branch: then,
        else_branch: None,
    });
    let (ty, found, _) = h.find(if_expr);
    assert_eq!(ty, Idx::UNIT);
    assert_eq!(found.constraints.len(), 2);
}

#[test]
fn if_branches_share_a_type() {
    let mut h = Harness::new();
    let cond = h.expr(ExprKind::Bool(true));
    let a = h.expr(ExprKind::int(1));
    let b = h.expr(ExprKind::float(2.0));
    let if_expr = h.expr(ExprKind::If {
        cond,
        then_branch: a,
        else_branch: Some(b),
    });
    let (ty, found, _) = h.find(if_expr);
    assert_eq!(ty, Idx::I32);
    assert_eq!(
        found.constraints[1],
        Constraint::eq(Idx::I32, Idx::F64, h.arena.get_expr(b).span, EqOrigin::Branch)
    );
}

#[test]
fn array_literal_has_static_length() {
    let mut h = Harness::new();
    let a = h.expr(ExprKind::int(1));
    let b = h.expr(ExprKind::int(2));
    let elems = h.list(&[a, b]);
    let arr = h.expr(ExprKind::Array(elems));
    let (ty, found, _) = h.find(arr);
    match h.pool.view(ty) {
        TypeView::Array { elem, len } => {
            assert!(h.pool.is_var(elem));
            assert_eq!(len, Some(2));
        }
        other => panic!("expected an array, got {other:?}"),
    }
    assert_eq!(found.constraints.len(), 2);
}

#[test]
fn let_binding_is_visible_in_its_block_only() {
    let mut h = Harness::new();
    let x = h.interner.intern("x");
    let init = h.expr(ExprKind::int(1));
    let bind = h.expr(ExprKind::Let {
        name: x,
        ty: None,
        init,
    });
    let use_x = h.ident("x");
    let items = h.list(&[bind, use_x]);
    let block = h.expr(ExprKind::Block(items));
    let (ty, _, diags) = h.find(block);
    assert_eq!(ty, Idx::I32);
    assert!(diags.is_empty());

    let outside = h.ident("x");
    let items = h.list(&[block, outside]);
    let outer = h.expr(ExprKind::Block(items));
    let (_, _, diags) = h.find(outer);
    assert_eq!(codes(&diags), vec![ErrorCode::E2002]);
}

#[test]
fn lambda_parameters_are_fresh() {
    let mut h = Harness::new();
    let x = h.interner.intern("x");
    let params = h.arena.alloc_params([Param {
        name: x,
        ty: None,
        span: Span::DUMMY,
    }]);
    let body = h.ident("x");
    let lambda = h.expr(ExprKind::Lambda { params, body });
    let (ty, _, diags) = h.find(lambda);
    assert!(diags.is_empty());
    let sig = h.pool.fn_sig(ty).unwrap();
    assert_eq!(sig.params.len(), 1);
    assert_eq!(sig.ret, sig.params[0]);
    assert!(h.pool.is_var(sig.ret));
}

#[test]
fn call_arity_is_checked_against_known_callee() {
    let mut h = Harness::new();
    let x = h.interner.intern("x");
    let params = h.arena.alloc_params([Param {
        name: x,
        ty: None,
        span: Span::DUMMY,
    }]);
    let body = h.ident("x");
    let lambda = h.expr(ExprKind::Lambda { params, body });
    let a = h.expr(ExprKind::int(1));
    let b = h.expr(ExprKind::int(2));
    let args = h.list(&[a, b]);
    let call = h.expr(ExprKind::Call { func: lambda, args });
    let (_, _, diags) = h.find(call);
    assert_eq!(codes(&diags), vec![ErrorCode::E2004]);
    assert_eq!(diags[0].message, "expected 1 argument, found 2");
}

#[test]
fn call_of_unknown_callee_constrains_its_shape() {
    let mut h = Harness::new();
    let f = h.interner.intern("f");
    let params = h.arena.alloc_params([Param {
        name: f,
        ty: None,
        span: Span::DUMMY,
    }]);
    let callee = h.ident("f");
    let arg = h.expr(ExprKind::Bool(true));
    let args = h.list(&[arg]);
    let call = h.expr(ExprKind::Call { func: callee, args });
    let lambda = h.expr(ExprKind::Lambda { params, body: call });
    let (_, found, diags) = h.find(lambda);
    assert!(diags.is_empty());
    let Constraint::Eq { rhs, origin, .. } = found.constraints[0] else {
        panic!("expected an equality");
    };
    assert_eq!(origin, EqOrigin::General);
    let sig = h.pool.fn_sig(rhs).unwrap();
    assert_eq!(sig.params.as_slice(), &[Idx::BOOL]);
}

fn declare_point(h: &mut Harness, type_name: &str, field: &str) -> Idx {
    let name = h.interner.intern(type_name);
    let decl = h.pool.declare_product(name, &[]).unwrap();
    let field = Some(h.interner.intern(field));
    h.pool
        .define_product_body(decl, vec![Idx::F64, Idx::F64], vec![field, None])
        .unwrap();
    decl
}

#[test]
fn field_access_and_construction() {
    let mut h = Harness::new();
    let point = declare_point(&mut h, "Point", "x");
    let a = h.expr(ExprKind::float(1.0));
    let b = h.expr(ExprKind::float(2.0));
    let args = h.list(&[a, b]);
    let name = h.interner.intern("Point");
    let construct = h.expr(ExprKind::Construct { name, args });
    let field = h.interner.intern("x");
    let access = h.expr(ExprKind::Field {
        receiver: construct,
        field,
    });
    let (ty, found, diags) = h.find(access);
    assert!(diags.is_empty());
    assert_eq!(ty, Idx::F64);
    assert_eq!(found.expr_types.get(&construct), Some(&point));
}

#[test]
fn ambiguous_and_missing_fields() {
    let mut h = Harness::new();
    declare_point(&mut h, "Point", "x");
    declare_point(&mut h, "Vector", "x");
    let receiver = h.expr(ExprKind::Unit);
    let x = h.interner.intern("x");
    let access = h.expr(ExprKind::Field { receiver, field: x });
    let (ty, _, diags) = h.find(access);
    assert_eq!(ty, Idx::ERROR);
    assert_eq!(codes(&diags), vec![ErrorCode::E2007]);

    let z = h.interner.intern("z");
    let access = h.expr(ExprKind::Field { receiver, field: z });
    let (_, _, diags) = h.find(access);
    assert_eq!(codes(&diags), vec![ErrorCode::E2002]);
}

#[test]
fn constructing_a_tag_yields_its_sum() {
    let mut h = Harness::new();
    let t = h.interner.intern("t");
    let maybe = h.pool.declare_sum(h.interner.intern("Maybe"), &[t]).unwrap();
    let some = h.pool.declare_product(h.interner.intern("Some"), &[t]).unwrap();
    let none = h.pool.declare_product(h.interner.intern("None"), &[t]).unwrap();
    let var_t = h.pool.type_var(t);
    h.pool.define_product_body(some, vec![var_t], vec![None]).unwrap();
    h.pool.define_product_body(none, vec![], vec![]).unwrap();
    h.pool.define_sum_tags(maybe, vec![some, none]).unwrap();

    let arg = h.expr(ExprKind::int(5));
    let args = h.list(&[arg]);
    let name = h.interner.intern("Some");
    let construct = h.expr(ExprKind::Construct { name, args });
    let (ty, _, diags) = h.find(construct);
    assert!(diags.is_empty());
    assert_eq!(h.pool.tag(ty), Tag::Sum);
    assert_eq!(h.pool.nominal_name(ty), Some(h.interner.intern("Maybe")));
}

#[test]
fn non_exhaustive_match_is_reported_at_the_match() {
    let mut h = Harness::new();
    let color = h.pool.declare_sum(h.interner.intern("Color"), &[]).unwrap();
    let mut tags = Vec::new();
    for name in ["Red", "Green", "Blue"] {
        let tag = h.pool.declare_product(h.interner.intern(name), &[]).unwrap();
        h.pool.define_product_body(tag, vec![], vec![]).unwrap();
        tags.push(tag);
    }
    h.pool.define_sum_tags(color, tags).unwrap();

    let scrutinee = h.expr(ExprKind::Unit);
    let mut arms = Vec::new();
    for name in ["Red", "Green"] {
        let pattern = h.arena.alloc_pattern(MatchPattern::Tag {
            name: h.interner.intern(name),
            inner: PatternRange::EMPTY,
        });
        let body = h.expr(ExprKind::int(0));
        arms.push(MatchArm {
            pattern,
            body,
            span: Span::DUMMY,
        });
    }
    let arms = h.arena.alloc_arms(arms);
    let matched = h.expr(ExprKind::Match { scrutinee, arms });
    let (_, _, diags) = h.find(matched);
    // `()` against `Color` is a unification error, not a finder error.
    assert_eq!(codes(&diags), vec![ErrorCode::E2006]);
    assert_eq!(diags[0].message, "non-exhaustive match: pattern `Blue` not covered");
    assert_eq!(diags[0].primary_span(), Some(h.arena.get_expr(matched).span));
}
