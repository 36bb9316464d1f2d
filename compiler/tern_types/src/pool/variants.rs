//! Generic variant cache (monomorphization).
//!
//! A variant is a generic declaration instantiated at type arguments. The
//! cache maps `(declaration, args)` to one canonical variant whose `Idx`
//! is stable for the rest of the compilation, so later stages can use it
//! as a key.

use super::nominal::{NominalBody, PoolError, ProductBody, SumBody};
use super::{Parts, Pool};
use crate::{Idx, Tag};

impl Pool {
    /// The variant of `parent` at `args`, with `parts` as its body (field
    /// types for a product, tag variants for a sum, unused for a trait).
    ///
    /// Returns the cached variant if one exists. A new product variant
    /// inherits the declaration's field names, and when the declaration is
    /// a sum tag its parent-sum reference is bound to the sum variant at
    /// the same `args`. A parent reference that is already bound is never
    /// rebound.
    pub fn get_or_create_variant(
        &mut self,
        parent: Idx,
        parts: &[Idx],
        args: &[Idx],
    ) -> Result<Idx, PoolError> {
        let decl = self.nominal_decl(parent).ok_or(PoolError::NotNominal(parent))?;
        let params = self.nominal_args(decl);
        if params.len() != args.len() {
            return Err(PoolError::ArgCount {
                expected: params.len(),
                found: args.len(),
            });
        }
        if params.as_slice() == args {
            return Ok(decl);
        }
        let key: Parts = args.iter().copied().collect();
        if let Some(&variant) = self.nominal.variants.get(&(decl, key.clone())) {
            return Ok(variant);
        }

        let tag = self.tag(decl);
        let name = self
            .nominal_name(decl)
            .ok_or(PoolError::NotNominal(decl))?;
        let variant = match tag {
            Tag::Product | Tag::Sum => self.nominal_type(tag, name, args),
            _ => self.trait_type(name, args[0], &args[1..]),
        };

        // Cache before binding parents so a tag and its sum can find each
        // other while both are being built.
        self.nominal.variants.insert((decl, key), variant);
        self.nominal.decl_of.insert(variant, decl);
        self.nominal.variant_order.push(variant);
        tracing::debug!(?decl, ?variant, "created generic variant");

        match tag {
            Tag::Product => {
                let (field_names, parent_sum) = match self.product_body(decl) {
                    Some(body) => (body.field_names.clone(), body.parent_sum),
                    None => (vec![None; parts.len()], None),
                };
                self.nominal.bodies.entry(variant).or_insert_with(|| {
                    NominalBody::Product(ProductBody {
                        fields: parts.to_vec(),
                        field_names,
                        parent_sum: None,
                    })
                });
                if let Some(sum_decl) = parent_sum {
                    let sum_variant = self.instantiate_nominal(sum_decl, args)?;
                    if let Some(NominalBody::Product(body)) = self.nominal.bodies.get_mut(&variant) {
                        body.parent_sum.get_or_insert(sum_variant);
                    }
                }
            }
            Tag::Sum => {
                self.nominal.bodies.entry(variant).or_insert_with(|| {
                    NominalBody::Sum(SumBody {
                        tags: parts.to_vec(),
                    })
                });
                for tag_variant in parts {
                    if let Some(NominalBody::Product(body)) =
                        self.nominal.bodies.get_mut(tag_variant)
                    {
                        body.parent_sum.get_or_insert(variant);
                    }
                }
            }
            _ => {}
        }
        Ok(variant)
    }

    /// Instantiate the declaration of `ty` at `args`, deriving the body by
    /// substituting the declaration's parameters.
    pub fn instantiate_nominal(&mut self, ty: Idx, args: &[Idx]) -> Result<Idx, PoolError> {
        let decl = self.nominal_decl(ty).ok_or(PoolError::NotNominal(ty))?;
        let params = self.nominal_args(decl);
        if params.len() != args.len() {
            return Err(PoolError::ArgCount {
                expected: params.len(),
                found: args.len(),
            });
        }
        if params.as_slice() == args {
            return Ok(decl);
        }
        let key: Parts = args.iter().copied().collect();
        if let Some(&variant) = self.nominal.variants.get(&(decl, key)) {
            return Ok(variant);
        }

        let mapping: Vec<(Idx, Idx)> = params.iter().copied().zip(args.iter().copied()).collect();
        let parts: Vec<Idx> = match self.tag(decl) {
            Tag::Product => {
                let fields = self
                    .product_body(decl)
                    .map(|body| body.fields.clone())
                    .unwrap_or_default();
                fields
                    .into_iter()
                    .map(|field| self.substitute_map(field, &mapping))
                    .collect()
            }
            Tag::Sum => {
                let tags = self
                    .sum_body(decl)
                    .map(|body| body.tags.clone())
                    .unwrap_or_default();
                let mut parts = Vec::with_capacity(tags.len());
                for tag in tags {
                    parts.push(self.instantiate_nominal(tag, args)?);
                }
                parts
            }
            _ => Vec::new(),
        };
        self.get_or_create_variant(decl, &parts, args)
    }

    /// Instantiate the declaration of `ty` at fresh type variables.
    pub fn instantiate_fresh_nominal(&mut self, ty: Idx) -> Result<Idx, PoolError> {
        let decl = self.nominal_decl(ty).ok_or(PoolError::NotNominal(ty))?;
        let args: Parts = self
            .nominal_args(decl)
            .iter()
            .map(|_| self.fresh_var())
            .collect();
        self.instantiate_nominal(decl, &args)
    }

    /// Make sure a product or sum type has a body, instantiating its
    /// declaration at the type's own arguments if needed.
    pub fn materialize(&mut self, ty: Idx) -> Result<Idx, PoolError> {
        if self.nominal.bodies.contains_key(&ty) {
            return Ok(ty);
        }
        let args = self.nominal_args(ty);
        self.instantiate_nominal(ty, &args)
    }
}
