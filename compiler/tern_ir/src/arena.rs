//! Arena storage for expressions and their side arrays.

use crate::ast::{
    ArmRange, Expr, ExprRange, MatchArm, MatchPattern, MatchPatternId, Param, ParamRange,
    PatternRange,
};
use crate::{ExprId, ParsedType, ParsedTypeId};

/// Converts a side-array length to a `u32` start index.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} arena exceeded u32::MAX entries"))
}

/// Converts a list length to the `u16` stored in ranges.
#[inline]
fn to_u16(len: usize, what: &str) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("{what} list exceeded u16::MAX entries"))
}

/// Flat storage for one module's syntax tree.
///
/// Expressions are addressed by `ExprId`; child lists, match arms,
/// parameters, patterns and type annotations live in side arrays addressed
/// by ranges or ids, so every node is `Copy`.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    arms: Vec<MatchArm>,
    params: Vec<Param>,
    patterns: Vec<MatchPattern>,
    pattern_lists: Vec<MatchPatternId>,
    parsed_types: Vec<ParsedType>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expression"));
        self.exprs.push(expr);
        id
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated in this arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression list");
        self.expr_lists.extend(ids);
        let len = self.expr_lists.len() - start as usize;
        ExprRange::new(start, to_u16(len, "expression"))
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.as_range()]
    }

    pub fn alloc_arms(&mut self, arms: impl IntoIterator<Item = MatchArm>) -> ArmRange {
        let start = to_u32(self.arms.len(), "match arm");
        self.arms.extend(arms);
        let len = self.arms.len() - start as usize;
        ArmRange::new(start, to_u16(len, "match arm"))
    }

    #[inline]
    pub fn get_arms(&self, range: ArmRange) -> &[MatchArm] {
        &self.arms[range.as_range()]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Param>) -> ParamRange {
        let start = to_u32(self.params.len(), "parameter");
        self.params.extend(params);
        let len = self.params.len() - start as usize;
        ParamRange::new(start, to_u16(len, "parameter"))
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Param] {
        &self.params[range.as_range()]
    }

    pub fn alloc_pattern(&mut self, pattern: MatchPattern) -> MatchPatternId {
        let id = MatchPatternId::new(to_u32(self.patterns.len(), "pattern"));
        self.patterns.push(pattern);
        id
    }

    #[inline]
    pub fn get_pattern(&self, id: MatchPatternId) -> &MatchPattern {
        &self.patterns[id.index()]
    }

    pub fn alloc_pattern_list(
        &mut self,
        ids: impl IntoIterator<Item = MatchPatternId>,
    ) -> PatternRange {
        let start = to_u32(self.pattern_lists.len(), "pattern list");
        self.pattern_lists.extend(ids);
        let len = self.pattern_lists.len() - start as usize;
        PatternRange::new(start, to_u16(len, "pattern"))
    }

    #[inline]
    pub fn get_pattern_list(&self, range: PatternRange) -> &[MatchPatternId] {
        &self.pattern_lists[range.as_range()]
    }

    pub fn alloc_parsed_type(&mut self, ty: ParsedType) -> ParsedTypeId {
        let id = ParsedTypeId::new(to_u32(self.parsed_types.len(), "parsed type"));
        self.parsed_types.push(ty);
        id
    }

    #[inline]
    pub fn get_parsed_type(&self, id: ParsedTypeId) -> &ParsedType {
        &self.parsed_types[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn expressions_get_sequential_ids() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::int(1), Span::new(0, 1)));
        let b = arena.alloc_expr(Expr::new(ExprKind::int(2), Span::new(2, 3)));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.get_expr(b).kind, ExprKind::int(2));
        assert_eq!(arena.expr_count(), 2);
    }

    #[test]
    fn lists_do_not_overlap() {
        let mut arena = ExprArena::new();
        let ids: Vec<_> = (0..4)
            .map(|i| arena.alloc_expr(Expr::new(ExprKind::int(i), Span::DUMMY)))
            .collect();
        let first = arena.alloc_expr_list([ids[0], ids[1]]);
        let second = arena.alloc_expr_list([ids[2], ids[3]]);
        let empty = arena.alloc_expr_list([]);
        assert_eq!(arena.get_expr_list(first), &ids[..2]);
        assert_eq!(arena.get_expr_list(second), &ids[2..]);
        assert!(arena.get_expr_list(empty).is_empty());
    }

    #[test]
    fn patterns_and_types_round_trip_through_ids() {
        let mut arena = ExprArena::new();
        let wild = arena.alloc_pattern(MatchPattern::Wildcard);
        let inner = arena.alloc_pattern_list([wild, wild]);
        let tuple = arena.alloc_pattern(MatchPattern::Tuple(inner));
        assert_eq!(arena.get_pattern(tuple), &MatchPattern::Tuple(inner));
        assert_eq!(arena.get_pattern_list(inner), &[wild, wild]);

        let elem = arena.alloc_parsed_type(ParsedType::Tuple(vec![]));
        let ptr = arena.alloc_parsed_type(ParsedType::Ptr(elem));
        assert_eq!(arena.get_parsed_type(ptr), &ParsedType::Ptr(elem));
    }
}
