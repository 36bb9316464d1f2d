//! Literals and names.

use tern_ir::{Name, Span};

use crate::infer::ConstraintFinder;
use crate::type_error::TypeCheckError;
use crate::{Idx, Tag};

impl ConstraintFinder<'_, '_> {
    /// Integer literals are `i32` unless a suffix names another integer or
    /// float type.
    pub(super) fn infer_int(&mut self, suffix: Option<Name>, span: Span) -> Idx {
        match suffix {
            None => Idx::I32,
            Some(suffix) => self.literal_suffix(suffix, span, |tag| tag.is_int() || tag.is_float()),
        }
    }

    /// Float literals are `f64` unless a suffix names another float type.
    pub(super) fn infer_float(&mut self, suffix: Option<Name>, span: Span) -> Idx {
        match suffix {
            None => Idx::F64,
            Some(suffix) => self.literal_suffix(suffix, span, Tag::is_float),
        }
    }

    fn literal_suffix(&mut self, suffix: Name, span: Span, allowed: impl Fn(Tag) -> bool) -> Idx {
        let text = self.name(suffix);
        match Tag::primitive_from_name(text) {
            Some(tag) if allowed(tag) => self.pool.primitive(tag),
            _ => self.error(TypeCheckError::undeclared("literal suffix", text, span)),
        }
    }

    /// Locals first, then top-level functions, then trait methods.
    pub(super) fn infer_ident(&mut self, name: Name, span: Span) -> Idx {
        if let Some(ty) = self.env.lookup(name) {
            return ty;
        }
        if let Some(global) = self.globals.get(&name).copied() {
            return if global.finished {
                self.pool.instantiate_fresh(global.ty)
            } else {
                global.ty
            };
        }
        if let Some(method) = self.registry.lookup_method(name) {
            return self.pool.instantiate_fresh(method);
        }
        let text = self.name(name);
        self.error(TypeCheckError::undeclared("value", text, span))
    }
}
