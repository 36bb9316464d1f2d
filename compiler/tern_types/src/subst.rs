//! Ordered substitutions.
//!
//! A substitution is a sequence of `(variable, replacement)` bindings,
//! newest first. Applying it rewrites a type by each binding starting from
//! the oldest, so a binding discovered later is seen through the bindings
//! discovered before it: `['t -> U, 'u -> 't]` sends `'u` to `'t` and then
//! `'t` to `U`.

use crate::{Idx, Pool};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Substitution {
    pairs: Vec<(Idx, Idx)>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// A substitution with a single binding.
    pub fn single(var: Idx, ty: Idx) -> Self {
        Substitution {
            pairs: vec![(var, ty)],
        }
    }

    /// Build from bindings given newest first.
    pub fn from_pairs(pairs: Vec<(Idx, Idx)>) -> Self {
        Substitution { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Bindings, newest first.
    pub fn pairs(&self) -> &[(Idx, Idx)] {
        &self.pairs
    }

    /// Add a binding newer than every existing one.
    pub fn prepend(&mut self, var: Idx, ty: Idx) {
        self.pairs.insert(0, (var, ty));
    }

    /// Add every binding of `newer` ahead of the existing ones, keeping
    /// `newer`'s own order.
    pub fn prepend_all(&mut self, newer: Substitution) {
        let mut pairs = newer.pairs;
        pairs.append(&mut self.pairs);
        self.pairs = pairs;
    }

    /// `newer ++ self` without consuming either.
    #[must_use]
    pub fn composed_after(&self, newer: &Substitution) -> Substitution {
        let mut pairs = newer.pairs.clone();
        pairs.extend_from_slice(&self.pairs);
        Substitution { pairs }
    }

    /// Rewrite `ty` by every binding, oldest first.
    pub fn apply(&self, pool: &mut Pool, ty: Idx) -> Idx {
        if !pool.is_generic(ty) {
            return ty;
        }
        self.pairs
            .iter()
            .rev()
            .fold(ty, |acc, &(var, replacement)| pool.replace_var(acc, var, replacement))
    }
}
