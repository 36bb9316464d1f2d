//! Tuples, arrays, blocks, bindings and lambdas.

use tern_ir::{ExprId, ExprRange, Name, ParamRange, ParsedTypeId, Span};

use crate::constraint::EqOrigin;
use crate::infer::{resolve_parsed_type, ConstraintFinder};
use crate::Idx;

impl ConstraintFinder<'_, '_> {
    pub(super) fn infer_tuple(&mut self, elems: ExprRange) -> Idx {
        let arena = self.arena;
        let elem_tys: Vec<Idx> = arena
            .get_expr_list(elems)
            .iter()
            .map(|&elem| self.infer_expr(elem))
            .collect();
        self.pool.tuple(&elem_tys)
    }

    /// Array literals share one element type and have a static length.
    pub(super) fn infer_array(&mut self, elems: ExprRange) -> Idx {
        let arena = self.arena;
        let elem = self.pool.fresh_var();
        for &item in arena.get_expr_list(elems) {
            let item_ty = self.infer_expr(item);
            let item_span = self.arena.get_expr(item).span;
            self.eq(elem, item_ty, item_span, EqOrigin::ArrayElement);
        }
        self.pool.array(elem, Some(elems.len() as u64))
    }

    /// A block is a scope whose value is its last item.
    pub(super) fn infer_block(&mut self, items: ExprRange) -> Idx {
        let arena = self.arena;
        self.env.enter_scope();
        let mut last = Idx::UNIT;
        for &item in arena.get_expr_list(items) {
            last = self.infer_expr(item);
        }
        self.env.exit_scope();
        last
    }

    /// `let` binds in the enclosing block's scope and yields `unit`.
    pub(super) fn infer_let(
        &mut self,
        name: Name,
        ty: Option<ParsedTypeId>,
        init: ExprId,
        span: Span,
    ) -> Idx {
        let init_ty = self.infer_expr(init);
        let bound = match ty {
            Some(ty) => {
                let annotated = self.annotation(ty, span);
                let init_span = self.arena.get_expr(init).span;
                self.eq(annotated, init_ty, init_span, EqOrigin::Annotation);
                annotated
            }
            None => init_ty,
        };
        self.env.bind(name, bound);
        Idx::UNIT
    }

    pub(super) fn infer_assign(&mut self, target: ExprId, value: ExprId, span: Span) -> Idx {
        let target_ty = self.infer_expr(target);
        let value_ty = self.infer_expr(value);
        self.eq(target_ty, value_ty, span, EqOrigin::Assign);
        Idx::UNIT
    }

    /// `e : T`
    pub(super) fn infer_annotated(&mut self, expr: ExprId, ty: ParsedTypeId, span: Span) -> Idx {
        let expr_ty = self.infer_expr(expr);
        let annotated = self.annotation(ty, span);
        self.eq(annotated, expr_ty, span, EqOrigin::Annotation);
        annotated
    }

    /// Parameters without annotations get fresh variables.
    pub(super) fn infer_lambda(&mut self, params: ParamRange, body: ExprId) -> Idx {
        let arena = self.arena;
        self.env.enter_scope();
        let mut param_tys = Vec::with_capacity(params.len());
        for param in arena.get_params(params) {
            let ty = match param.ty {
                Some(ty) => self.annotation(ty, param.span),
                None => self.pool.fresh_var(),
            };
            self.env.bind(param.name, ty);
            param_tys.push(ty);
        }
        let body_ty = self.infer_expr(body);
        self.env.exit_scope();
        self.pool.function(body_ty, &param_tys, &[], false)
    }

    /// Resolve a written type; a bad annotation is reported and checks
    /// continue against `<error>`.
    fn annotation(&mut self, ty: ParsedTypeId, span: Span) -> Idx {
        match resolve_parsed_type(self.pool, self.arena, self.interner, ty, span) {
            Ok(resolved) => resolved,
            Err(err) => self.error(err),
        }
    }
}
