//! Module-level declarations: functions, types, traits and impls.

use super::ranges::ParamRange;
use crate::{ExprId, Name, ParsedTypeId, Span};

/// Function or lambda parameter. The annotation is optional.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: Option<ParsedTypeId>,
    pub span: Span,
}

/// A `given Trait 't` bound on a function.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GivenBound {
    pub trait_name: Name,
    /// Self type first, then extra trait arguments.
    pub args: Vec<ParsedTypeId>,
    pub span: Span,
}

/// A top-level function. `body` is `None` for extern declarations.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: ParamRange,
    pub ret: Option<ParsedTypeId>,
    pub given: Vec<GivenBound>,
    pub is_meta: bool,
    pub is_variadic: bool,
    pub body: Option<ExprId>,
    pub span: Span,
}

/// A product field or sum-tag field; `name` is `None` for positional fields.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    pub name: Option<Name>,
    pub ty: ParsedTypeId,
    pub span: Span,
}

/// One tag of a sum type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TagDecl {
    pub name: Name,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeDeclKind {
    Product(Vec<FieldDecl>),
    Sum(Vec<TagDecl>),
}

/// `type Name 't 'u = ...`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeDecl {
    pub name: Name,
    /// Type variable names (without the leading `'`).
    pub type_params: Vec<Name>,
    pub kind: TypeDeclKind,
    pub span: Span,
}

/// Method signature inside a trait declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TraitMethod {
    pub name: Name,
    pub params: Vec<ParsedTypeId>,
    pub ret: ParsedTypeId,
    pub span: Span,
}

/// `trait Name 'self 'args... { methods }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TraitDecl {
    pub name: Name,
    /// Type variable names; the first is the self type.
    pub params: Vec<Name>,
    pub methods: Vec<TraitMethod>,
    pub span: Span,
}

/// `impl Trait T args...`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImplDecl {
    pub trait_name: Name,
    /// Self type first.
    pub args: Vec<ParsedTypeId>,
    pub span: Span,
}

/// A parsed and name-resolved module.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Module {
    pub types: Vec<TypeDecl>,
    pub traits: Vec<TraitDecl>,
    pub impls: Vec<ImplDecl>,
    pub functions: Vec<FunctionDecl>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }
}
