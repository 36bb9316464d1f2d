//! Field access and construction of products and sum tags.

use tern_ir::{ExprId, ExprRange, Name, Span};

use crate::constraint::EqOrigin;
use crate::infer::ConstraintFinder;
use crate::type_error::TypeCheckError;
use crate::{Idx, Tag};

impl ConstraintFinder<'_, '_> {
    /// `e.f`: the one declared product with a field `f` decides the type.
    pub(super) fn infer_field(&mut self, receiver: ExprId, field: Name, span: Span) -> Idx {
        let receiver_ty = self.infer_expr(receiver);
        let owners = self.pool.products_with_field(field);
        let owner = match owners.as_slice() {
            [] => {
                let text = self.name(field);
                return self.error(TypeCheckError::undeclared("field", text, span));
            }
            [owner] => *owner,
            _ => {
                let names: Vec<&str> = owners
                    .iter()
                    .filter_map(|&ty| self.pool.nominal_name(ty))
                    .map(|name| self.name(name))
                    .collect();
                let text = self.name(field);
                return self.error(TypeCheckError::ambiguous_field(text, &names, span));
            }
        };

        let Ok(instance) = self.pool.instantiate_fresh_nominal(owner) else {
            return Idx::ERROR;
        };
        let Some(field_ty) = self.pool.product_body(instance).and_then(|body| {
            body.field_index(field).map(|index| body.fields[index])
        }) else {
            return Idx::ERROR;
        };
        let receiver_span = self.arena.get_expr(receiver).span;
        self.eq(instance, receiver_ty, receiver_span, EqOrigin::Field);
        field_ty
    }

    /// `T(args)` for a product `T` or a sum tag `T`; a tag yields its sum.
    pub(super) fn infer_construct(&mut self, name: Name, args: ExprRange, span: Span) -> Idx {
        let arena = self.arena;
        let arg_ids = arena.get_expr_list(args);
        let arg_tys: Vec<Idx> = arg_ids.iter().map(|&arg| self.infer_expr(arg)).collect();

        let Some(decl) = self
            .pool
            .declared_type(name)
            .filter(|&decl| self.pool.tag(decl) == Tag::Product)
        else {
            let text = self.name(name);
            return self.error(TypeCheckError::undeclared("constructor", text, span));
        };
        let Ok(instance) = self.pool.instantiate_fresh_nominal(decl) else {
            return Idx::ERROR;
        };
        let Some(body) = self.pool.product_body(instance).cloned() else {
            return Idx::ERROR;
        };

        if body.fields.len() != arg_tys.len() {
            self.incomplete(TypeCheckError::arity("field", body.fields.len(), arg_tys.len(), span));
        }
        for ((&field_ty, &arg_ty), &arg) in body.fields.iter().zip(&arg_tys).zip(arg_ids) {
            let arg_span = self.arena.get_expr(arg).span;
            self.eq(field_ty, arg_ty, arg_span, EqOrigin::Field);
        }
        body.parent_sum.unwrap_or(instance)
    }
}
