//! Substitution applier.
//!
//! After a function's constraints are solved, every recorded expression
//! type is rewritten through the substitution, walking the body with the
//! IR visitor. Calls to callees with trait constraints have those
//! constraints re-checked against the rewritten callee type, and the
//! operator obligations from the solver are discharged the same way.
//!
//! An obligation is discharged by one of three outcomes: an impl covers
//! it and it is dropped; it still mentions type variables and is retained
//! for the caller to turn into a `given` constraint; or it is concrete
//! and unimplemented, and is reported once per location.

use rustc_hash::{FxHashMap, FxHashSet};
use tern_ir::visitor::{walk_expr, Visitor};
use tern_ir::{Expr, ExprArena, ExprId, FunctionDecl, Span};

use crate::infer::{CallSite, FunctionConstraints};
use crate::type_error::{ErrorReporter, TypeCheckError, TypeErrorKind};
use crate::unify::Solution;
use crate::{Idx, Pool, Substitution, TraitRegistry, TypeFormatter};

/// Types of one function after substitution.
#[derive(Clone, Debug, Default)]
pub struct Applied {
    pub expr_types: FxHashMap<ExprId, Idx>,
    /// Obligations over type variables, deduplicated, in discovery order.
    pub retained: Vec<Idx>,
}

pub struct Applier<'a, 'd> {
    pool: &'a mut Pool,
    registry: &'a TraitRegistry,
    reporter: ErrorReporter<'a, 'd>,
    subst: &'a Substitution,
    recorded: FxHashMap<ExprId, Idx>,
    call_sites: FxHashMap<ExprId, CallSite>,
    out: Applied,
    /// Unresolved obligations already reported, by location.
    reported: FxHashSet<(Idx, Span)>,
}

impl<'a, 'd> Applier<'a, 'd> {
    pub fn new(
        pool: &'a mut Pool,
        registry: &'a TraitRegistry,
        reporter: ErrorReporter<'a, 'd>,
        found: FunctionConstraints,
        solution: &'a Solution,
    ) -> Self {
        let call_sites = found
            .call_sites
            .into_iter()
            .map(|site| (site.expr, site))
            .collect();
        Applier {
            pool,
            registry,
            reporter,
            subst: &solution.subst,
            recorded: found.expr_types,
            call_sites,
            out: Applied::default(),
            reported: FxHashSet::default(),
        }
    }

    /// Rewrite the types of every body in a group and discharge
    /// `obligations`.
    #[tracing::instrument(level = "debug", skip_all, fields(members = functions.len()))]
    pub fn apply_group(
        mut self,
        functions: &[&FunctionDecl],
        arena: &ExprArena,
        obligations: &[(Idx, Span)],
    ) -> Applied {
        for &function in functions {
            self.visit_function(function, arena);
        }
        self.finish(obligations)
    }

    /// Rewrite the types of the tree under `root`.
    pub fn apply_expr(mut self, root: ExprId, arena: &ExprArena, obligations: &[(Idx, Span)]) -> Applied {
        self.visit_expr_id(root, arena);
        self.finish(obligations)
    }

    fn finish(mut self, obligations: &[(Idx, Span)]) -> Applied {
        for &(obligation, span) in obligations {
            self.discharge(obligation, span);
        }
        tracing::debug!(
            exprs = self.out.expr_types.len(),
            retained = self.out.retained.len(),
            "substitution applied"
        );
        self.out
    }

    fn discharge(&mut self, obligation: Idx, span: Span) {
        let obligation = self.subst.apply(self.pool, obligation);
        let flags = self.pool.flags(obligation);
        if flags.has_errors() {
            return;
        }
        if flags.has_vars() {
            if !self.out.retained.contains(&obligation) {
                self.out.retained.push(obligation);
            }
            return;
        }
        if self.registry.is_implemented(self.pool, obligation) {
            return;
        }
        if self.reported.insert((obligation, span)) {
            let text = TypeFormatter::new(self.pool, self.reporter.names(), &[obligation])
                .with_color(self.reporter.color())
                .format(obligation);
            self.reporter.report(TypeCheckError::new(
                TypeErrorKind::UnresolvedTraitObligation,
                span,
                format!("the trait `{text}` is not implemented"),
            ));
        }
    }
}

impl<'ast> Visitor<'ast> for Applier<'_, '_> {
    fn visit_expr(&mut self, id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
        if let Some(&ty) = self.recorded.get(&id) {
            let ty = self.subst.apply(self.pool, ty);
            self.out.expr_types.insert(id, ty);
        }
        if let Some(site) = self.call_sites.get(&id).copied() {
            let callee = self.subst.apply(self.pool, site.callee);
            if let Some(sig) = self.pool.fn_sig(callee) {
                for &constraint in &sig.constraints {
                    self.discharge(constraint, site.span);
                }
            }
        }
        walk_expr(self, expr, arena);
    }
}
