//! Pass 2: function bodies.

use rustc_hash::FxHashSet;
use tern_ir::{FunctionDecl, Name};

use super::ModuleChecker;
use crate::apply::Applier;
use crate::infer::{ConstraintFinder, GlobalFn};
use crate::pool::{FnSig, Parts};
use crate::{Idx, Unifier};

impl ModuleChecker<'_, '_> {
    /// Find, solve and apply for one group of mutually recursive
    /// functions, then generalize each member's type.
    ///
    /// The members share one constraint list and one substitution, so a
    /// binding found in one body reaches every other member before any of
    /// them is generalized.
    #[tracing::instrument(level = "debug", skip_all, fields(members = group.len()))]
    pub(super) fn check_group(&mut self, group: &[&FunctionDecl]) {
        let members: Vec<(&FunctionDecl, Idx)> = group
            .iter()
            .filter_map(|&function| {
                let global = self.globals.get(&function.name)?;
                Some((function, global.ty))
            })
            .collect();
        if members.is_empty() {
            return;
        }
        let checkpoint = self.sink.error_count();

        let found = ConstraintFinder::new(
            &mut self.pool,
            &self.registry,
            self.arena,
            self.interner,
            &self.globals,
            Self::reporter(self.sink, self.interner, self.color),
        )
        .find_group(&members);
        // Names that failed to resolve and uncovered patterns leave the
        // constraints sound; solving still finds the independent errors.
        if found.incomplete {
            return self.fail_group(&members);
        }

        let solution = {
            let mut reporter = Self::reporter(self.sink, self.interner, self.color);
            Unifier::new(&mut self.pool, self.config.max_unify_steps).solve(
                &found.constraints,
                |pool, failure| {
                    let error = reporter.constraint_error(pool, &failure);
                    reporter.report(error);
                },
            )
        };
        if self.sink.errors_since(checkpoint) {
            return self.fail_group(&members);
        }

        let solved: Vec<Idx> = members
            .iter()
            .map(|&(_, ty)| solution.subst.apply(&mut self.pool, ty))
            .collect();
        let functions: Vec<&FunctionDecl> = members.iter().map(|&(function, _)| function).collect();
        let applied = Applier::new(
            &mut self.pool,
            &self.registry,
            Self::reporter(self.sink, self.interner, self.color),
            found,
            &solution,
        )
        .apply_group(&functions, self.arena, &solution.obligations);
        if self.sink.errors_since(checkpoint) {
            return self.fail_group(&members);
        }

        self.expr_types.extend(applied.expr_types);
        for (&(function, _), &ty) in members.iter().zip(&solved) {
            let given = self.given_for(ty, &solved, &applied.retained);
            let ty = self.generalize(ty, &given);
            tracing::debug!(
                function = self.name(function.name),
                ty = %self.pool.format_type(ty, self.interner),
                "function type"
            );
            self.globals
                .insert(function.name, GlobalFn { ty, finished: true });
            self.functions.insert(function.name, ty);
        }
    }

    fn fail_group(&mut self, members: &[(&FunctionDecl, Idx)]) {
        for &(function, _) in members {
            self.fail(function.name);
        }
    }

    fn fail(&mut self, name: Name) {
        tracing::debug!(function = self.name(name), "function failed");
        self.globals.insert(
            name,
            GlobalFn {
                ty: Idx::ERROR,
                finished: true,
            },
        );
        self.functions.insert(name, Idx::ERROR);
    }

    /// The retained obligations that mention a variable of `ty`. An
    /// obligation over no member's variables goes to every member.
    fn given_for(&self, ty: Idx, members: &[Idx], retained: &[Idx]) -> Vec<Idx> {
        let own: FxHashSet<Idx> = self.pool.collect_vars(ty).into_iter().collect();
        let shared: FxHashSet<Idx> = members
            .iter()
            .flat_map(|&member| self.pool.collect_vars(member))
            .collect();
        retained
            .iter()
            .copied()
            .filter(|&obligation| {
                let vars = self.pool.collect_vars(obligation);
                vars.iter().any(|var| own.contains(var)) || !vars.iter().any(|var| shared.contains(var))
            })
            .collect()
    }

    /// Add still-generic obligations to the type's constraints and rename
    /// its variables `'a`, `'b`, ... in order of appearance.
    fn generalize(&mut self, ty: Idx, retained: &[Idx]) -> Idx {
        let Some(sig) = self.pool.fn_sig(ty) else {
            return ty;
        };
        let mut constraints: Parts = sig.constraints.clone();
        for &obligation in retained {
            if !constraints.contains(&obligation) {
                constraints.push(obligation);
            }
        }
        let with_given = self.pool.function_sig(&FnSig { constraints, ..sig });

        let mapping: Vec<(Idx, Idx)> = self
            .pool
            .collect_vars(with_given)
            .into_iter()
            .enumerate()
            .map(|(i, var)| {
                let name = self.interner.intern(&var_name(i));
                (var, self.pool.type_var(name))
            })
            .collect();
        self.pool.substitute_map(with_given, &mapping)
    }
}

/// `a`..`z`, then `a1`..`z1`, and so on.
fn var_name(index: usize) -> String {
    #[allow(clippy::cast_possible_truncation, reason = "index % 26 fits in a u8")]
    let letter = char::from(b'a' + (index % 26) as u8);
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{letter}{round}"),
    }
}
