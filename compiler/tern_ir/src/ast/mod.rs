//! Flat AST types using arena allocation.
//!
//! - `expr`: `Expr` and `ExprKind`
//! - `operators`: binary and unary operators
//! - `patterns`: match arms and patterns
//! - `items`: module-level declarations
//! - `ranges`: arena range types

mod expr;
pub mod items;
mod operators;
pub mod patterns;
mod ranges;

pub use expr::{Expr, ExprKind};
pub use items::{
    FieldDecl, FunctionDecl, GivenBound, ImplDecl, Module, Param, TagDecl, TraitDecl, TraitMethod,
    TypeDecl, TypeDeclKind,
};
pub use operators::{BinaryOp, UnaryOp};
pub use patterns::{MatchArm, MatchPattern, MatchPatternId};
pub use ranges::{ArmRange, ExprRange, ParamRange, PatternRange};
