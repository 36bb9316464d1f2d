//! Type annotations as written, before the checker resolves them.
//!
//! Primitive names (`i32`, `bool`, ...) are `Named` with no arguments; the
//! checker maps them to pre-interned primitive types.

use crate::Name;

/// Index into the parsed-type side array of `ExprArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ParsedTypeId(u32);

impl ParsedTypeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ParsedTypeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Type qualifier keywords.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum TypeModifier {
    Mut,
    Const,
    Global,
    Comptime,
}

impl TypeModifier {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Mut => "mut",
            Self::Const => "const",
            Self::Global => "global",
            Self::Comptime => "comptime",
        }
    }
}

/// A parsed type expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsedType {
    /// `i32`, `Maybe i32`, `Pair 't u8`
    Named {
        name: Name,
        args: Vec<ParsedTypeId>,
    },
    /// `'t`
    Var(Name),
    /// `*T`
    Ptr(ParsedTypeId),
    /// `[T; n]` or `[T]`
    Array {
        elem: ParsedTypeId,
        len: Option<u64>,
    },
    /// `(T, U)`
    Tuple(Vec<ParsedTypeId>),
    /// `(T, U) -> R`
    Function {
        params: Vec<ParsedTypeId>,
        ret: ParsedTypeId,
    },
    /// `mut T`
    Modified {
        modifier: TypeModifier,
        base: ParsedTypeId,
    },
}
