//! Match patterns.
//!
//! A pattern is checked against the scrutinee's type: it binds names in
//! the arm's scope and constrains the scrutinee to the shape it matches.

use tern_ir::{MatchPattern, MatchPatternId, Span};
use tern_stack::ensure_sufficient_stack;

use super::ConstraintFinder;
use crate::constraint::EqOrigin;
use crate::type_error::TypeCheckError;
use crate::{Idx, Tag};

impl ConstraintFinder<'_, '_> {
    /// Check `pattern` against a value of type `expected`. Patterns carry
    /// no span of their own, so errors point at the arm.
    pub(super) fn check_pattern(&mut self, pattern: MatchPatternId, expected: Idx, span: Span) {
        let arena = self.arena;
        ensure_sufficient_stack(|| match *arena.get_pattern(pattern) {
            MatchPattern::Wildcard => {}
            MatchPattern::Binding(name) => self.env.bind(name, expected),
            MatchPattern::Literal(lit) => {
                let lit_ty = self.infer_expr(lit);
                self.eq(expected, lit_ty, arena.get_expr(lit).span, EqOrigin::Pattern);
            }
            MatchPattern::Tuple(inner) => {
                let inner = arena.get_pattern_list(inner);
                let parts: Vec<Idx> = inner.iter().map(|_| self.pool.fresh_var()).collect();
                let tuple = self.pool.tuple(&parts);
                self.eq(expected, tuple, span, EqOrigin::Pattern);
                for (&sub, &part) in inner.iter().zip(&parts) {
                    self.check_pattern(sub, part, span);
                }
            }
            MatchPattern::Tag { name, inner } => {
                let Some(decl) = self
                    .pool
                    .declared_type(name)
                    .filter(|&decl| self.pool.tag(decl) == Tag::Product)
                else {
                    let text = self.name(name);
                    self.error(TypeCheckError::undeclared("tag", text, span));
                    return;
                };
                let Ok(instance) = self.pool.instantiate_fresh_nominal(decl) else {
                    return;
                };
                let Some(body) = self.pool.product_body(instance).cloned() else {
                    return;
                };
                let target = body.parent_sum.unwrap_or(instance);
                self.eq(expected, target, span, EqOrigin::Pattern);

                let inner = arena.get_pattern_list(inner);
                if inner.len() != body.fields.len() {
                    self.incomplete(TypeCheckError::arity("field", body.fields.len(), inner.len(), span));
                }
                for (&sub, &field) in inner.iter().zip(&body.fields) {
                    self.check_pattern(sub, field, span);
                }
            }
        });
    }
}
