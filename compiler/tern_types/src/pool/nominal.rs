//! Nominal type declarations and bodies.
//!
//! A product or sum is identified by its name and type arguments, like any
//! other pool type. Its body (field types, field names, tag list) lives
//! here, keyed by the type's `Idx`, for the generic declaration and for
//! every variant created from it.

use rustc_hash::FxHashMap;
use tern_ir::Name;

use super::{Parts, Pool};
use crate::{Idx, Tag};

/// Errors from nominal declaration and variant construction.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PoolError {
    #[error("type {0:?} is declared twice")]
    Redeclared(Name),
    #[error("{0:?} is not a declared product, sum or trait")]
    NotNominal(Idx),
    #[error("expected {expected} type arguments, found {found}")]
    ArgCount { expected: usize, found: usize },
    #[error("{0:?} already has a body")]
    BodyAlreadyDefined(Idx),
    #[error("{0:?} has no body")]
    BodyNotDefined(Idx),
    #[error("tag {tag:?} does not share the type parameters of {sum:?}")]
    TagParamsMismatch { tag: Idx, sum: Idx },
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProductBody {
    pub fields: Vec<Idx>,
    /// `None` for positional fields.
    pub field_names: Vec<Option<Name>>,
    /// The sum this product is a tag of. Bound once, never rebound.
    pub parent_sum: Option<Idx>,
}

impl ProductBody {
    pub fn field_index(&self, name: Name) -> Option<usize> {
        self.field_names.iter().position(|n| *n == Some(name))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SumBody {
    /// Product tags, in declaration order.
    pub tags: Vec<Idx>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NominalBody {
    Product(ProductBody),
    Sum(SumBody),
}

#[derive(Default)]
pub(super) struct NominalTable {
    pub(super) bodies: FxHashMap<Idx, NominalBody>,
    /// Variant (or declaration) to its generic declaration.
    pub(super) decl_of: FxHashMap<Idx, Idx>,
    /// User-declared types by name.
    pub(super) declared: FxHashMap<Name, Idx>,
    pub(super) variants: FxHashMap<(Idx, Parts), Idx>,
    /// Variants in creation order.
    pub(super) variant_order: Vec<Idx>,
}

impl Pool {
    // === Declarations ===

    /// Declare a product type `name params...` with no body yet.
    pub fn declare_product(&mut self, name: Name, params: &[Name]) -> Result<Idx, PoolError> {
        self.declare_nominal(Tag::Product, name, params)
    }

    /// Declare a sum type `name params...` with no tags yet.
    pub fn declare_sum(&mut self, name: Name, params: &[Name]) -> Result<Idx, PoolError> {
        self.declare_nominal(Tag::Sum, name, params)
    }

    fn declare_nominal(&mut self, tag: Tag, name: Name, params: &[Name]) -> Result<Idx, PoolError> {
        if self.nominal.declared.contains_key(&name) {
            return Err(PoolError::Redeclared(name));
        }
        let args: Parts = params.iter().map(|&p| self.type_var(p)).collect();
        let decl = self.nominal_type(tag, name, &args);
        self.nominal.declared.insert(name, decl);
        self.nominal.decl_of.insert(decl, decl);
        tracing::debug!(?decl, ?tag, "declared nominal type");
        Ok(decl)
    }

    /// Declare a trait. The first parameter is the self type.
    pub fn declare_trait(&mut self, name: Name, params: &[Name]) -> Idx {
        let vars: Parts = params.iter().map(|&p| self.type_var(p)).collect();
        let (self_ty, args) = vars.split_first().map_or((Idx::UNIT, &[][..]), |(s, a)| (*s, a));
        let decl = self.trait_type(name, self_ty, args);
        self.nominal.decl_of.insert(decl, decl);
        decl
    }

    /// Give a declared product its fields.
    pub fn define_product_body(
        &mut self,
        decl: Idx,
        fields: Vec<Idx>,
        field_names: Vec<Option<Name>>,
    ) -> Result<(), PoolError> {
        if self.tag(decl) != Tag::Product || self.nominal.decl_of.get(&decl) != Some(&decl) {
            return Err(PoolError::NotNominal(decl));
        }
        if self.nominal.bodies.contains_key(&decl) {
            return Err(PoolError::BodyAlreadyDefined(decl));
        }
        debug_assert_eq!(fields.len(), field_names.len());
        self.nominal.bodies.insert(
            decl,
            NominalBody::Product(ProductBody {
                fields,
                field_names,
                parent_sum: None,
            }),
        );
        Ok(())
    }

    /// Give a declared sum its tags. Every tag must be a product with a
    /// body declared over the same type parameters as the sum.
    pub fn define_sum_tags(&mut self, sum: Idx, tags: Vec<Idx>) -> Result<(), PoolError> {
        if self.tag(sum) != Tag::Sum || self.nominal.decl_of.get(&sum) != Some(&sum) {
            return Err(PoolError::NotNominal(sum));
        }
        if self.nominal.bodies.contains_key(&sum) {
            return Err(PoolError::BodyAlreadyDefined(sum));
        }
        let sum_args = self.nominal_args(sum);
        for &tag in &tags {
            if self.tag(tag) != Tag::Product {
                return Err(PoolError::NotNominal(tag));
            }
            if self.nominal_args(tag) != sum_args {
                return Err(PoolError::TagParamsMismatch { tag, sum });
            }
            match self.nominal.bodies.get_mut(&tag) {
                Some(NominalBody::Product(body)) => {
                    body.parent_sum.get_or_insert(sum);
                }
                _ => return Err(PoolError::BodyNotDefined(tag)),
            }
        }
        self.nominal
            .bodies
            .insert(sum, NominalBody::Sum(SumBody { tags }));
        Ok(())
    }

    // === Lookups ===

    /// The user-declared product or sum named `name`.
    pub fn declared_type(&self, name: Name) -> Option<Idx> {
        self.nominal.declared.get(&name).copied()
    }

    /// Reset the user-declared type table between compilation units.
    ///
    /// Types stay interned; declarations, their bodies and their variant
    /// cache entries are forgotten so the names can be declared again.
    pub fn clear_declared_types(&mut self) {
        let NominalTable {
            bodies,
            decl_of,
            declared,
            variants,
            variant_order,
        } = &mut self.nominal;
        let decls: Vec<Idx> = declared.drain().map(|(_, decl)| decl).collect();
        decl_of.retain(|_, decl| !decls.contains(decl));
        bodies.retain(|ty, _| decl_of.contains_key(ty));
        variants.retain(|(decl, _), _| !decls.contains(decl));
        variant_order.retain(|v| decl_of.contains_key(v));
    }

    /// The generic declaration `ty` was instantiated from (a declaration is
    /// its own declaration).
    ///
    /// Types produced by substitution rather than through the variant cache
    /// are resolved by name against the declared table.
    pub fn nominal_decl(&self, ty: Idx) -> Option<Idx> {
        if let Some(&decl) = self.nominal.decl_of.get(&ty) {
            return Some(decl);
        }
        match self.tag(ty) {
            Tag::Product | Tag::Sum => {
                let name = self.nominal_name(ty)?;
                self.declared_type(name)
                    .filter(|&decl| self.tag(decl) == self.tag(ty))
            }
            _ => None,
        }
    }

    pub fn product_body(&self, ty: Idx) -> Option<&ProductBody> {
        match self.nominal.bodies.get(&ty) {
            Some(NominalBody::Product(body)) => Some(body),
            _ => None,
        }
    }

    pub fn sum_body(&self, ty: Idx) -> Option<&SumBody> {
        match self.nominal.bodies.get(&ty) {
            Some(NominalBody::Sum(body)) => Some(body),
            _ => None,
        }
    }

    /// Declared products with a field named `field`, in declaration order.
    pub fn products_with_field(&self, field: Name) -> Vec<Idx> {
        let mut found: Vec<Idx> = self
            .nominal
            .declared
            .values()
            .copied()
            .filter(|&decl| {
                self.product_body(decl)
                    .is_some_and(|body| body.field_index(field).is_some())
            })
            .collect();
        found.sort_unstable();
        found
    }

    /// Every variant created so far, in creation order.
    pub fn variants(&self) -> &[Idx] {
        &self.nominal.variant_order
    }
}
