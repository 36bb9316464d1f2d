//! AST visitor.
//!
//! The visitor mutates its own state; the tree stays immutable. Default
//! `visit_*` methods call the matching `walk_*` function, which visits
//! children depth-first, left to right.

use crate::ast::{
    Expr, ExprKind, FunctionDecl, MatchArm, MatchPattern, MatchPatternId, Module, Param,
};
use crate::{ExprArena, ExprId};

pub trait Visitor<'ast> {
    fn visit_module(&mut self, module: &'ast Module, arena: &'ast ExprArena) {
        walk_module(self, module, arena);
    }

    fn visit_function(&mut self, function: &'ast FunctionDecl, arena: &'ast ExprArena) {
        walk_function(self, function, arena);
    }

    /// Visit an expression. `id` is the expression's own id, so side tables
    /// keyed by `ExprId` can be updated.
    fn visit_expr(&mut self, _id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
        walk_expr(self, expr, arena);
    }

    fn visit_expr_id(&mut self, id: ExprId, arena: &'ast ExprArena) {
        self.visit_expr(id, arena.get_expr(id), arena);
    }

    fn visit_param(&mut self, param: &'ast Param, _arena: &'ast ExprArena) {
        let _ = param;
    }

    fn visit_match_arm(&mut self, arm: &'ast MatchArm, arena: &'ast ExprArena) {
        walk_match_arm(self, arm, arena);
    }

    fn visit_pattern(&mut self, id: MatchPatternId, arena: &'ast ExprArena) {
        walk_pattern(self, id, arena);
    }
}

pub fn walk_module<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    module: &'ast Module,
    arena: &'ast ExprArena,
) {
    for function in &module.functions {
        visitor.visit_function(function, arena);
    }
}

pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    function: &'ast FunctionDecl,
    arena: &'ast ExprArena,
) {
    for param in arena.get_params(function.params) {
        visitor.visit_param(param, arena);
    }
    if let Some(body) = function.body {
        visitor.visit_expr_id(body, arena);
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    expr: &'ast Expr,
    arena: &'ast ExprArena,
) {
    match expr.kind {
        ExprKind::Int { .. }
        | ExprKind::Float { .. }
        | ExprKind::Bool(_)
        | ExprKind::Char(_)
        | ExprKind::String(_)
        | ExprKind::Unit
        | ExprKind::Ident(_) => {}

        ExprKind::Unary { operand, .. } => visitor.visit_expr_id(operand, arena),
        ExprKind::Field { receiver, .. } => visitor.visit_expr_id(receiver, arena),
        ExprKind::Let { init, .. } => visitor.visit_expr_id(init, arena),
        ExprKind::Annotated { expr, .. } => visitor.visit_expr_id(expr, arena),

        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr_id(left, arena);
            visitor.visit_expr_id(right, arena);
        }
        ExprKind::Assign { target, value } => {
            visitor.visit_expr_id(target, arena);
            visitor.visit_expr_id(value, arena);
        }
        ExprKind::While { cond, body } => {
            visitor.visit_expr_id(cond, arena);
            visitor.visit_expr_id(body, arena);
        }

        ExprKind::Call { func, args } => {
            visitor.visit_expr_id(func, arena);
            for &arg in arena.get_expr_list(args) {
                visitor.visit_expr_id(arg, arena);
            }
        }
        ExprKind::Construct { args: items, .. }
        | ExprKind::Tuple(items)
        | ExprKind::Array(items)
        | ExprKind::Block(items) => {
            for &item in arena.get_expr_list(items) {
                visitor.visit_expr_id(item, arena);
            }
        }

        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr_id(cond, arena);
            visitor.visit_expr_id(then_branch, arena);
            if let Some(else_id) = else_branch {
                visitor.visit_expr_id(else_id, arena);
            }
        }
        ExprKind::Match { scrutinee, arms } => {
            visitor.visit_expr_id(scrutinee, arena);
            for arm in arena.get_arms(arms) {
                visitor.visit_match_arm(arm, arena);
            }
        }
        ExprKind::Lambda { params, body } => {
            for param in arena.get_params(params) {
                visitor.visit_param(param, arena);
            }
            visitor.visit_expr_id(body, arena);
        }
    }
}

pub fn walk_match_arm<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    arm: &'ast MatchArm,
    arena: &'ast ExprArena,
) {
    visitor.visit_pattern(arm.pattern, arena);
    visitor.visit_expr_id(arm.body, arena);
}

/// Walk a pattern. Literal patterns visit their literal expression.
pub fn walk_pattern<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: MatchPatternId,
    arena: &'ast ExprArena,
) {
    match *arena.get_pattern(id) {
        MatchPattern::Wildcard | MatchPattern::Binding(_) => {}
        MatchPattern::Literal(expr) => visitor.visit_expr_id(expr, arena),
        MatchPattern::Tuple(inner) | MatchPattern::Tag { inner, .. } => {
            for &sub in arena.get_pattern_list(inner) {
                visitor.visit_pattern(sub, arena);
            }
        }
    }
}
