//! Tern IR: the syntax tree consumed by the type checker.
//!
//! - Spans for source locations
//! - Names for interned identifiers
//! - A flat, arena-allocated AST addressed by `ExprId`
//! - Parsed type annotations
//! - A visitor for read-only traversal
//!
//! Nodes never own their children: `Box<Expr>` is replaced by `ExprId`
//! indices and lists by ranges into the arena, so every node is `Copy` and
//! side tables (such as the checker's expression types) key on `ExprId`.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod parsed_type;
mod span;
pub mod visitor;

pub use arena::ExprArena;
pub use ast::{
    ArmRange, BinaryOp, Expr, ExprKind, ExprRange, FieldDecl, FunctionDecl, GivenBound,
    ImplDecl, MatchArm, MatchPattern, MatchPatternId, Module, Param, ParamRange, PatternRange,
    TagDecl, TraitDecl, TraitMethod, TypeDecl, TypeDeclKind, UnaryOp,
};
pub use expr_id::ExprId;
pub use interner::{InternError, StringInterner, StringLookup};
pub use name::Name;
pub use parsed_type::{ParsedType, ParsedTypeId, TypeModifier};
pub use span::{Span, SpanError};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{ExprId, Name};
    crate::static_assert_size!(Name, 4);
    crate::static_assert_size!(ExprId, 4);
}
