//! Structural rewriting: substitution, instantiation and variable queries.
//!
//! Every walk is gated on `HAS_VAR`, so concrete subtrees are returned as
//! they are without being visited.

use rustc_hash::FxHashSet;
use tern_stack::ensure_sufficient_stack;

use super::{FnSig, Parts, Pool, TypeView};
use crate::Idx;

impl Pool {
    /// Rebuild `ty` with the same shape and new constituents, given in
    /// [`Pool::children`] order.
    pub fn rebuild(&mut self, ty: Idx, children: &[Idx]) -> Idx {
        match self.view(ty) {
            TypeView::Primitive(_) | TypeView::Var(_) => ty,
            TypeView::Ptr(_) => self.ptr(children[0]),
            TypeView::Array { len, .. } => self.array(children[0], len),
            TypeView::Tuple(_) => self.tuple(children),
            TypeView::Function(sig) => {
                let param_count = sig.params.len();
                self.function_sig(&FnSig {
                    ret: children[0],
                    params: children[1..=param_count].iter().copied().collect(),
                    constraints: children[1 + param_count..].iter().copied().collect(),
                    ..sig
                })
            }
            TypeView::Product { name, .. } => {
                self.nominal_type(crate::Tag::Product, name, children)
            }
            TypeView::Sum { name, .. } => self.nominal_type(crate::Tag::Sum, name, children),
            TypeView::Trait { name, .. } => self.trait_type(name, children[0], &children[1..]),
            TypeView::Modified { modifier, .. } => self.modified(modifier, children[0]),
        }
    }

    /// Replace every type variable in `ty` by `f(var)`.
    pub fn map_vars<F>(&mut self, ty: Idx, f: &mut F) -> Idx
    where
        F: FnMut(&mut Pool, Idx) -> Idx,
    {
        if !self.is_generic(ty) {
            return ty;
        }
        if self.is_var(ty) {
            return f(self, ty);
        }
        ensure_sufficient_stack(|| {
            let children = self.children(ty);
            let mapped: Parts = children.iter().map(|&c| self.map_vars(c, f)).collect();
            if mapped == children {
                ty
            } else {
                self.rebuild(ty, &mapped)
            }
        })
    }

    /// `ty` with every occurrence of `var` replaced by `with`.
    pub fn replace_var(&mut self, ty: Idx, var: Idx, with: Idx) -> Idx {
        self.map_vars(ty, &mut |_, v| if v == var { with } else { v })
    }

    /// Apply a simultaneous variable mapping.
    pub fn substitute_map(&mut self, ty: Idx, mapping: &[(Idx, Idx)]) -> Idx {
        if mapping.is_empty() {
            return ty;
        }
        self.map_vars(ty, &mut |_, v| {
            mapping
                .iter()
                .find_map(|&(from, to)| (from == v).then_some(to))
                .unwrap_or(v)
        })
    }

    /// Whether `var` occurs in `ty`.
    pub fn occurs(&self, var: Idx, ty: Idx) -> bool {
        if ty == var {
            return true;
        }
        if !self.is_generic(ty) || self.is_var(ty) {
            return false;
        }
        ensure_sufficient_stack(|| self.children(ty).iter().any(|&c| self.occurs(var, c)))
    }

    /// Type variables in `ty`, in order of first appearance.
    pub fn collect_vars(&self, ty: Idx) -> Vec<Idx> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        self.collect_vars_into(ty, &mut seen, &mut out);
        out
    }

    fn collect_vars_into(&self, ty: Idx, seen: &mut FxHashSet<Idx>, out: &mut Vec<Idx>) {
        if !self.is_generic(ty) {
            return;
        }
        if self.is_var(ty) {
            if seen.insert(ty) {
                out.push(ty);
            }
            return;
        }
        ensure_sufficient_stack(|| {
            for child in self.children(ty) {
                self.collect_vars_into(child, seen, out);
            }
        });
    }

    /// A copy of `ty` with every type variable replaced by a fresh one.
    pub fn instantiate_fresh(&mut self, ty: Idx) -> Idx {
        let vars = self.collect_vars(ty);
        let mapping: Vec<(Idx, Idx)> = vars.into_iter().map(|v| (v, self.fresh_var())).collect();
        self.substitute_map(ty, &mapping)
    }
}
