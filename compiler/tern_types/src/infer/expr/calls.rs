//! Function application.

use tern_ir::{ExprId, ExprRange, Span};

use crate::constraint::EqOrigin;
use crate::infer::{CallSite, ConstraintFinder};
use crate::type_error::TypeCheckError;
use crate::Idx;

impl ConstraintFinder<'_, '_> {
    pub(super) fn infer_call(&mut self, id: ExprId, func: ExprId, args: ExprRange, span: Span) -> Idx {
        let callee = self.infer_expr(func);
        let arena = self.arena;
        let arg_ids = arena.get_expr_list(args);
        let arg_tys: Vec<Idx> = arg_ids.iter().map(|&arg| self.infer_expr(arg)).collect();

        let callee = self.pool.strip_modifiers(callee);
        let Some(sig) = self.pool.fn_sig(callee) else {
            // Unknown shape: the callee must be a function of these arguments.
            let result = self.pool.fresh_var();
            let shape = self.pool.function(result, &arg_tys, &[], false);
            let func_span = self.arena.get_expr(func).span;
            self.eq(callee, shape, func_span, EqOrigin::General);
            return result;
        };

        let arity_ok = if sig.is_variadic {
            arg_tys.len() >= sig.params.len()
        } else {
            arg_tys.len() == sig.params.len()
        };
        if !arity_ok {
            let mut err = TypeCheckError::arity("argument", sig.params.len(), arg_tys.len(), span);
            if sig.is_variadic {
                err = err.with_note("the function is variadic; extra arguments may follow the declared ones");
            }
            self.incomplete(err);
        }

        for (index, ((&param, &arg_ty), &arg)) in sig.params.iter().zip(&arg_tys).zip(arg_ids).enumerate() {
            let arg_span = self.arena.get_expr(arg).span;
            self.eq(param, arg_ty, arg_span, EqOrigin::Argument { index });
        }

        if !sig.constraints.is_empty() {
            self.out.call_sites.push(CallSite {
                expr: id,
                callee,
                span,
            });
        }

        let result = self.pool.fresh_var();
        self.eq(result, sig.ret, span, EqOrigin::Return);
        result
    }
}
