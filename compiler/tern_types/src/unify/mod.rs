//! Type unification engine.
//!
//! Substitution-based: unifying two types produces the bindings that make
//! them equal, and [`Unifier::solve`] threads an ordered
//! [`Substitution`] through a constraint list in emission order.
//!
//! Nested failures surface as `Err(UnifyFailure)` carrying the bindings
//! found before the failure, so the solver can render the original
//! constraint with everything known at that point. A failed constraint
//! contributes no bindings; earlier successes are kept.

mod error;

pub use error::{ArityKind, UnifyError, UnifyFailure};

use tern_ir::Span;
use tern_stack::ensure_sufficient_stack;

use crate::constraint::{Constraint, EqOrigin};
use crate::{Idx, Pool, Substitution, TypeView};

/// A top-level constraint that failed, with both sides rewritten by every
/// binding known when it failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintFailure {
    pub error: UnifyError,
    pub lhs: Idx,
    pub rhs: Idx,
    pub span: Span,
    pub origin: EqOrigin,
}

/// Result of solving a constraint list.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    pub subst: Substitution,
    /// Trait obligations, unchanged, in emission order.
    pub obligations: Vec<(Idx, Span)>,
    /// Number of constraints that failed.
    pub failures: usize,
}

pub struct Unifier<'pool> {
    pool: &'pool mut Pool,
    max_steps: u32,
    steps: u32,
}

impl<'pool> Unifier<'pool> {
    pub fn new(pool: &'pool mut Pool, max_steps: u32) -> Self {
        Unifier {
            pool,
            max_steps,
            steps: 0,
        }
    }

    #[inline]
    pub fn pool(&self) -> &Pool {
        self.pool
    }

    /// Solve `constraints` in order, calling `on_failure` for each failing
    /// equality before moving on to the next one.
    #[tracing::instrument(level = "debug", skip_all, fields(constraints = constraints.len()))]
    pub fn solve(
        &mut self,
        constraints: &[Constraint],
        mut on_failure: impl FnMut(&Pool, ConstraintFailure),
    ) -> Solution {
        let mut solution = Solution::default();
        for constraint in constraints {
            match *constraint {
                Constraint::Trait { obligation, span } => {
                    solution.obligations.push((obligation, span));
                }
                Constraint::Eq {
                    lhs,
                    rhs,
                    span,
                    origin,
                } => {
                    let l = solution.subst.apply(self.pool, lhs);
                    let r = solution.subst.apply(self.pool, rhs);
                    match self.unify(l, r) {
                        Ok(found) => {
                            tracing::trace!(?lhs, ?rhs, bindings = found.len(), "constraint solved");
                            solution.subst.prepend_all(found);
                        }
                        Err(failure) => {
                            tracing::debug!(?lhs, ?rhs, error = %failure.error, "constraint failed");
                            let known = solution.subst.composed_after(&failure.partial);
                            let lhs = known.apply(self.pool, lhs);
                            let rhs = known.apply(self.pool, rhs);
                            solution.failures += 1;
                            on_failure(
                                self.pool,
                                ConstraintFailure {
                                    error: failure.error,
                                    lhs,
                                    rhs,
                                    span,
                                    origin,
                                },
                            );
                        }
                    }
                }
            }
        }
        solution
    }

    /// Unify two types with a fresh step budget.
    pub fn unify(&mut self, a: Idx, b: Idx) -> Result<Substitution, UnifyFailure> {
        self.steps = 0;
        self.unify_one(a, b)
    }

    fn unify_one(&mut self, a: Idx, b: Idx) -> Result<Substitution, UnifyFailure> {
        self.steps += 1;
        if self.steps > self.max_steps {
            return Err(UnifyFailure::new(UnifyError::RecursionLimit {
                limit: self.max_steps,
            }));
        }
        if a == b {
            return Ok(Substitution::new());
        }
        let a = self.pool.strip_modifiers(a);
        let b = self.pool.strip_modifiers(b);
        if a == b || a.is_error() || b.is_error() {
            return Ok(Substitution::new());
        }
        if self.pool.is_var(a) {
            return self.bind(a, b);
        }
        if self.pool.is_var(b) {
            return self.bind(b, a);
        }
        if !self.pool.is_generic(a) && !self.pool.is_generic(b) {
            return Err(mismatch(a, b));
        }
        ensure_sufficient_stack(|| self.decompose(a, b))
    }

    fn bind(&mut self, var: Idx, ty: Idx) -> Result<Substitution, UnifyFailure> {
        if self.pool.occurs(var, ty) {
            return Err(UnifyFailure::new(UnifyError::InfiniteType {
                var,
                containing: ty,
            }));
        }
        tracing::trace!(?var, ?ty, "bind");
        Ok(Substitution::single(var, ty))
    }

    /// Unify two same-shaped types constituent by constituent.
    fn decompose(&mut self, a: Idx, b: Idx) -> Result<Substitution, UnifyFailure> {
        match (self.pool.view(a), self.pool.view(b)) {
            (TypeView::Ptr(x), TypeView::Ptr(y)) => self.unify_pairs(&[(x, y)]),
            (
                TypeView::Array { elem: x, len: lx },
                TypeView::Array { elem: y, len: ly },
            ) if lx == ly => self.unify_pairs(&[(x, y)]),
            (TypeView::Tuple(xs), TypeView::Tuple(ys)) => {
                if xs.len() != ys.len() {
                    return Err(arity(xs.len(), ys.len(), ArityKind::Tuple));
                }
                let pairs: Vec<_> = xs.into_iter().zip(ys).collect();
                self.unify_pairs(&pairs)
            }
            (TypeView::Function(f), TypeView::Function(g)) => {
                if f.is_meta != g.is_meta {
                    return Err(mismatch(a, b));
                }
                let variadic = f.is_variadic || g.is_variadic;
                if !variadic && f.params.len() != g.params.len() {
                    return Err(arity(f.params.len(), g.params.len(), ArityKind::Function));
                }
                let mut pairs: Vec<_> = f.params.into_iter().zip(g.params).collect();
                pairs.push((f.ret, g.ret));
                self.unify_pairs(&pairs)
            }
            (
                TypeView::Product { name: n1, args: a1 },
                TypeView::Product { name: n2, args: a2 },
            )
            | (TypeView::Sum { name: n1, args: a1 }, TypeView::Sum { name: n2, args: a2 }) => {
                if n1 != n2 {
                    return Err(mismatch(a, b));
                }
                if a1.len() != a2.len() {
                    return Err(arity(a1.len(), a2.len(), ArityKind::TypeArgs));
                }
                let pairs: Vec<_> = a1.into_iter().zip(a2).collect();
                self.unify_pairs(&pairs)
            }
            (
                TypeView::Trait {
                    name: n1,
                    self_ty: s1,
                    args: a1,
                },
                TypeView::Trait {
                    name: n2,
                    self_ty: s2,
                    args: a2,
                },
            ) => {
                if n1 != n2 {
                    return Err(mismatch(a, b));
                }
                if a1.len() != a2.len() {
                    return Err(arity(a1.len(), a2.len(), ArityKind::TypeArgs));
                }
                let pairs: Vec<_> = std::iter::once((s1, s2)).chain(a1.into_iter().zip(a2)).collect();
                self.unify_pairs(&pairs)
            }
            _ => Err(mismatch(a, b)),
        }
    }

    /// Unify pairs left to right; each pair is rewritten by the bindings
    /// found for the pairs before it.
    fn unify_pairs(&mut self, pairs: &[(Idx, Idx)]) -> Result<Substitution, UnifyFailure> {
        let mut found = Substitution::new();
        for &(x, y) in pairs {
            let x = found.apply(self.pool, x);
            let y = found.apply(self.pool, y);
            match self.unify_one(x, y) {
                Ok(more) => found.prepend_all(more),
                Err(mut failure) => {
                    found.prepend_all(failure.partial);
                    failure.partial = found;
                    return Err(failure);
                }
            }
        }
        Ok(found)
    }
}

fn mismatch(expected: Idx, found: Idx) -> UnifyFailure {
    UnifyFailure::new(UnifyError::Mismatch { expected, found })
}

fn arity(expected: usize, found: usize, kind: ArityKind) -> UnifyFailure {
    UnifyFailure::new(UnifyError::ArityMismatch {
        expected,
        found,
        kind,
    })
}
