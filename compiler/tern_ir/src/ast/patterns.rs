//! Match arms and patterns.

use super::ranges::PatternRange;
use crate::{ExprId, Name, Span};

/// Index into the pattern side array of `ExprArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct MatchPatternId(u32);

impl MatchPatternId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        MatchPatternId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A pattern on the left of a match arm.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MatchPattern {
    /// `_`
    Wildcard,
    /// `x`, binds the scrutinee.
    Binding(Name),
    /// `42`, `true`, `'c'`; the id points at a literal expression.
    Literal(ExprId),
    /// `(a, b)`
    Tuple(PatternRange),
    /// `Some(x)`, `None`: a sum tag with its field patterns.
    Tag { name: Name, inner: PatternRange },
}

impl MatchPattern {
    /// Matches every value of its type.
    pub fn is_catch_all(&self) -> bool {
        matches!(self, MatchPattern::Wildcard | MatchPattern::Binding(_))
    }
}

/// `pattern => body`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MatchArm {
    pub pattern: MatchPatternId,
    pub body: ExprId,
    pub span: Span,
}
