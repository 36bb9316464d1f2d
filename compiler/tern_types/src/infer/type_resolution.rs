//! Resolution of written type annotations.

use tern_ir::{ExprArena, ParsedType, ParsedTypeId, Span, StringInterner};
use tern_stack::ensure_sufficient_stack;

use crate::type_error::{TypeCheckError, TypeErrorKind};
use crate::{Idx, Pool, Tag};

/// Turn a parsed type into a pool type.
///
/// Primitive names resolve to primitives; other names must be declared
/// products or sums and are instantiated at the written arguments. Errors
/// are located at `span`, the node that carries the annotation.
pub fn resolve_parsed_type(
    pool: &mut Pool,
    arena: &ExprArena,
    interner: &StringInterner,
    id: ParsedTypeId,
    span: Span,
) -> Result<Idx, TypeCheckError> {
    ensure_sufficient_stack(|| match arena.get_parsed_type(id).clone() {
        ParsedType::Named { name, args } => {
            let text = interner.lookup(name);
            if args.is_empty() {
                if let Some(tag) = Tag::primitive_from_name(text) {
                    return Ok(pool.primitive(tag));
                }
            }
            let Some(decl) = pool.declared_type(name) else {
                return Err(TypeCheckError::undeclared("type", text, span));
            };
            let mut resolved = Vec::with_capacity(args.len());
            for arg in args {
                resolved.push(resolve_parsed_type(pool, arena, interner, arg, span)?);
            }
            let expected = pool.nominal_args(decl).len();
            if expected != resolved.len() {
                return Err(TypeCheckError::arity("type argument", expected, resolved.len(), span)
                    .with_note(format!("`{text}` takes {expected} type arguments")));
            }
            pool.instantiate_nominal(decl, &resolved)
                .map_err(|err| TypeCheckError::new(TypeErrorKind::ArityMismatch, span, err.to_string()))
        }
        ParsedType::Var(name) => Ok(pool.type_var(name)),
        ParsedType::Ptr(inner) => {
            let inner = resolve_parsed_type(pool, arena, interner, inner, span)?;
            Ok(pool.ptr(inner))
        }
        ParsedType::Array { elem, len } => {
            let elem = resolve_parsed_type(pool, arena, interner, elem, span)?;
            Ok(pool.array(elem, len))
        }
        ParsedType::Tuple(elems) => {
            let mut resolved = Vec::with_capacity(elems.len());
            for elem in elems {
                resolved.push(resolve_parsed_type(pool, arena, interner, elem, span)?);
            }
            Ok(pool.tuple(&resolved))
        }
        ParsedType::Function { params, ret } => {
            let mut resolved = Vec::with_capacity(params.len());
            for param in params {
                resolved.push(resolve_parsed_type(pool, arena, interner, param, span)?);
            }
            let ret = resolve_parsed_type(pool, arena, interner, ret, span)?;
            Ok(pool.function(ret, &resolved, &[], false))
        }
        ParsedType::Modified { modifier, base } => {
            let base = resolve_parsed_type(pool, arena, interner, base, span)?;
            Ok(pool.modified(modifier, base))
        }
    })
}
