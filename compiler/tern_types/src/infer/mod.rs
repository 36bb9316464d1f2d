//! Constraint-finding traversal.
//!
//! One pass over a function body assigns every expression a type (often a
//! fresh variable) and emits [`Constraint`]s in traversal order. Nothing is
//! solved here: the constraints go to the [`Unifier`](crate::Unifier),
//! and the recorded types are rewritten afterwards by the applier.
//!
//! Names that cannot be resolved, missing traits, arity errors visible
//! from the callee's shape and non-exhaustive matches are reported as they
//! are found.
//!
//! - `env`: lexical scopes
//! - `expr`: per-construct rules
//! - `patterns`: match patterns
//! - `exhaustive`: match coverage
//! - `type_resolution`: written type annotations to pool types

mod env;
mod exhaustive;
mod expr;
mod patterns;
mod type_resolution;

pub use env::TypeEnv;
pub use exhaustive::missing_patterns;
pub use type_resolution::resolve_parsed_type;

use rustc_hash::FxHashMap;
use tern_ir::{ExprArena, ExprId, FunctionDecl, Name, Span, StringInterner};

use crate::constraint::{Constraint, EqOrigin};
use crate::type_error::{ErrorReporter, TypeCheckError};
use crate::{Idx, Pool, TraitRegistry};

/// A top-level function as seen from other function bodies.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GlobalFn {
    pub ty: Idx,
    /// Inference is complete and `ty` is generalized. References to an
    /// unfinished function use `ty` as it is.
    pub finished: bool,
}

/// A call whose callee carries trait constraints; they are re-checked
/// once the substitution is known.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CallSite {
    pub expr: ExprId,
    /// The callee's type at this call, instantiated.
    pub callee: Idx,
    pub span: Span,
}

/// Everything found in one function.
#[derive(Clone, Debug, Default)]
pub struct FunctionConstraints {
    pub constraints: Vec<Constraint>,
    pub expr_types: FxHashMap<ExprId, Idx>,
    pub call_sites: Vec<CallSite>,
    /// A construct was only partly constrained (an arity error), so
    /// solving would report errors that are consequences of it.
    pub incomplete: bool,
}

pub struct ConstraintFinder<'a, 'd> {
    pool: &'a mut Pool,
    registry: &'a TraitRegistry,
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    globals: &'a FxHashMap<Name, GlobalFn>,
    reporter: ErrorReporter<'a, 'd>,
    env: TypeEnv,
    out: FunctionConstraints,
}

impl<'a, 'd> ConstraintFinder<'a, 'd> {
    pub fn new(
        pool: &'a mut Pool,
        registry: &'a TraitRegistry,
        arena: &'a ExprArena,
        interner: &'a StringInterner,
        globals: &'a FxHashMap<Name, GlobalFn>,
        reporter: ErrorReporter<'a, 'd>,
    ) -> Self {
        ConstraintFinder {
            pool,
            registry,
            arena,
            interner,
            globals,
            reporter,
            env: TypeEnv::new(),
            out: FunctionConstraints::default(),
        }
    }

    /// Find the constraints of a group of functions into one list, in
    /// member order. Each member is paired with its placeholder type:
    /// parameters are bound to its parameter types and the body is
    /// constrained to its return type. Members of a recursive group see
    /// each other through these placeholders, so the list constrains them
    /// together.
    #[tracing::instrument(level = "debug", skip_all, fields(members = members.len()))]
    pub fn find_group(mut self, members: &[(&FunctionDecl, Idx)]) -> FunctionConstraints {
        for &(function, fn_ty) in members {
            self.constrain_function(function, fn_ty);
        }
        tracing::debug!(
            constraints = self.out.constraints.len(),
            exprs = self.out.expr_types.len(),
            "constraints found"
        );
        self.out
    }

    fn constrain_function(&mut self, function: &FunctionDecl, fn_ty: Idx) {
        let (Some(sig), Some(body)) = (self.pool.fn_sig(fn_ty), function.body) else {
            return;
        };
        tracing::trace!(function = self.name(function.name), "constraining body");
        self.env.enter_scope();
        for (param, &ty) in self.arena.get_params(function.params).iter().zip(&sig.params) {
            self.env.bind(param.name, ty);
        }
        let body_ty = self.infer_expr(body);
        let body_span = self.arena.get_expr(body).span;
        self.eq(sig.ret, body_ty, body_span, EqOrigin::Body);
        self.env.exit_scope();
    }

    /// Find constraints for a single expression, outside any function.
    pub fn find_expr(mut self, expr: ExprId) -> (Idx, FunctionConstraints) {
        let ty = self.infer_expr(expr);
        (ty, self.out)
    }

    // === Emission helpers ===

    fn eq(&mut self, lhs: Idx, rhs: Idx, span: Span, origin: EqOrigin) {
        self.out
            .constraints
            .push(Constraint::eq(lhs, rhs, span, origin));
    }

    fn obligation(&mut self, obligation: Idx, span: Span) {
        self.out
            .constraints
            .push(Constraint::Trait { obligation, span });
    }

    fn record(&mut self, expr: ExprId, ty: Idx) -> Idx {
        self.out.expr_types.insert(expr, ty);
        ty
    }

    /// Report an error and yield the error type for the offending node.
    /// `<error>` unifies with everything, so the constraints stay sound.
    fn error(&mut self, error: TypeCheckError) -> Idx {
        self.reporter.report(error);
        Idx::ERROR
    }

    /// Report an error after which the constraints no longer describe the
    /// construct in full.
    fn incomplete(&mut self, error: TypeCheckError) {
        self.reporter.report(error);
        self.out.incomplete = true;
    }

    fn name(&self, name: Name) -> &'a str {
        self.interner.lookup(name)
    }
}

#[cfg(test)]
mod tests;
