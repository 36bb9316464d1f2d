//! Registry for traits and their implementations.
//!
//! Traits are indexed by name; implementations are indexed by trait name
//! and matched against obligations either exactly (uniquing makes that an
//! index comparison) or, for impls over type variables, by unifying a
//! fresh copy of the impl with the obligation.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tern_ir::{Name, Span, StringInterner};

use crate::{Idx, Pool, Tag, TypeView, Unifier};

/// Errors from trait and impl registration.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("trait {0:?} is declared twice")]
    DuplicateTrait(Name),
    #[error("no trait named {0:?}")]
    UnknownTrait(Name),
    #[error("trait takes {expected} type arguments, found {found}")]
    ArgCount { expected: usize, found: usize },
}

/// A method signature with its types already resolved against the
/// trait's parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodSig {
    pub name: Name,
    pub params: Vec<Idx>,
    pub ret: Idx,
}

/// A registered trait definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitEntry {
    pub name: Name,
    /// The generic trait type `Name 'self 'args...`.
    pub decl: Idx,
    /// Type parameters; the first is the self type.
    pub params: Vec<Name>,
    /// Method name to its generic function type. Each method type carries
    /// the trait's own obligation as a constraint.
    pub methods: FxHashMap<Name, Idx>,
}

/// A recorded implementation: the trait type it provides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImplEntry {
    pub trait_name: Name,
    pub ty: Idx,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct TraitRegistry {
    traits: Vec<TraitEntry>,
    /// Name to trait index (`BTreeMap` for deterministic iteration).
    traits_by_name: BTreeMap<Name, usize>,
    /// Method name to the trait that declares it.
    methods: FxHashMap<Name, usize>,
    impls: Vec<ImplEntry>,
    impls_by_trait: FxHashMap<Name, Vec<usize>>,
    /// Step budget for matching generic impls.
    max_unify_steps: u32,
}

impl Default for TraitRegistry {
    fn default() -> Self {
        TraitRegistry {
            traits: Vec::new(),
            traits_by_name: BTreeMap::new(),
            methods: FxHashMap::default(),
            impls: Vec::new(),
            impls_by_trait: FxHashMap::default(),
            max_unify_steps: 10_000,
        }
    }
}

/// Operator traits and the primitive types implementing each.
const ARITHMETIC: [&str; 5] = ["Add", "Sub", "Mul", "Div", "Mod"];

impl TraitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_step_limit(mut self, max_unify_steps: u32) -> Self {
        self.max_unify_steps = max_unify_steps;
        self
    }

    /// A registry with the operator traits declared and implemented for
    /// the primitive types:
    ///
    /// - `Add Sub Mul Div Mod` for every integer and float type;
    /// - `Neg` for signed integers and floats;
    /// - `Cmp` for numbers and characters;
    /// - `Eq` for numbers, characters, `bool`, `unit` and every pointer.
    pub fn with_prelude(pool: &mut Pool, interner: &StringInterner) -> Self {
        let mut registry = TraitRegistry::new();
        let self_param = interner.intern("t");
        let numeric: Vec<Tag> = Tag::primitives()
            .iter()
            .copied()
            .filter(|t| t.is_int() || t.is_float())
            .collect();

        let declare = |registry: &mut TraitRegistry, pool: &mut Pool, name: &str| {
            let name = interner.intern(name);
            // Prelude names are distinct, so this cannot fail.
            let _ = registry.register_trait(pool, name, vec![self_param], Vec::new());
            name
        };

        for op in ARITHMETIC {
            let name = declare(&mut registry, pool, op);
            for &tag in &numeric {
                registry.add_prelude_impl(pool, name, tag);
            }
        }

        let neg = declare(&mut registry, pool, "Neg");
        for &tag in numeric.iter().filter(|t| t.is_signed_int() || t.is_float()) {
            registry.add_prelude_impl(pool, neg, tag);
        }

        let cmp = declare(&mut registry, pool, "Cmp");
        for &tag in numeric.iter().chain(&[Tag::C8, Tag::C32]) {
            registry.add_prelude_impl(pool, cmp, tag);
        }

        let eq = declare(&mut registry, pool, "Eq");
        for &tag in numeric
            .iter()
            .chain(&[Tag::C8, Tag::C32, Tag::Bool, Tag::Unit])
        {
            registry.add_prelude_impl(pool, eq, tag);
        }
        let pointee = pool.type_var(self_param);
        let any_ptr = pool.ptr(pointee);
        let eq_ptr = pool.trait_type(eq, any_ptr, &[]);
        registry.add_impl(eq_ptr, eq, Span::DUMMY);

        registry
    }

    fn add_prelude_impl(&mut self, pool: &mut Pool, trait_name: Name, self_tag: Tag) {
        let self_ty = pool.primitive(self_tag);
        let ty = pool.trait_type(trait_name, self_ty, &[]);
        self.add_impl(ty, trait_name, Span::DUMMY);
    }

    // === Traits ===

    /// Register a trait. `params` must be non-empty; the first is the self
    /// type. Method types get the trait itself as their constraint.
    pub fn register_trait(
        &mut self,
        pool: &mut Pool,
        name: Name,
        params: Vec<Name>,
        methods: Vec<MethodSig>,
    ) -> Result<Idx, RegistryError> {
        if self.traits_by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateTrait(name));
        }
        if params.is_empty() {
            return Err(RegistryError::ArgCount {
                expected: 1,
                found: 0,
            });
        }
        let decl = pool.declare_trait(name, &params);
        let index = self.traits.len();
        let mut method_types = FxHashMap::default();
        for method in methods {
            let ty = pool.function(method.ret, &method.params, &[decl], false);
            method_types.insert(method.name, ty);
            self.methods.insert(method.name, index);
        }
        self.traits.push(TraitEntry {
            name,
            decl,
            params,
            methods: method_types,
        });
        self.traits_by_name.insert(name, index);
        tracing::debug!(?name, ?decl, "registered trait");
        Ok(decl)
    }

    pub fn lookup_trait(&self, name: Name) -> Option<&TraitEntry> {
        self.traits_by_name.get(&name).map(|&i| &self.traits[i])
    }

    /// The generic type of a trait method, looked up by method name.
    pub fn lookup_method(&self, name: Name) -> Option<Idx> {
        let &index = self.methods.get(&name)?;
        self.traits[index].methods.get(&name).copied()
    }

    /// The trait type `name self args...`, checking the argument count.
    pub fn obligation(
        &self,
        pool: &mut Pool,
        name: Name,
        self_ty: Idx,
        args: &[Idx],
    ) -> Result<Idx, RegistryError> {
        let entry = self
            .lookup_trait(name)
            .ok_or(RegistryError::UnknownTrait(name))?;
        if entry.params.len() != args.len() + 1 {
            return Err(RegistryError::ArgCount {
                expected: entry.params.len(),
                found: args.len() + 1,
            });
        }
        Ok(pool.trait_type(name, self_ty, args))
    }

    // === Impls ===

    /// Record that trait type `ty` is implemented.
    pub fn add_impl(&mut self, ty: Idx, trait_name: Name, span: Span) {
        let index = self.impls.len();
        self.impls.push(ImplEntry {
            trait_name,
            ty,
            span,
        });
        self.impls_by_trait.entry(trait_name).or_default().push(index);
    }

    pub fn impls_of(&self, trait_name: Name) -> impl Iterator<Item = &ImplEntry> {
        self.impls_by_trait
            .get(&trait_name)
            .into_iter()
            .flatten()
            .map(|&i| &self.impls[i])
    }

    /// Whether an impl covers `obligation`. Modifiers on the obligation's
    /// types are ignored.
    pub fn is_implemented(&self, pool: &mut Pool, obligation: Idx) -> bool {
        let TypeView::Trait {
            name,
            self_ty,
            args,
        } = pool.view(obligation)
        else {
            return false;
        };
        let self_ty = pool.strip_modifiers(self_ty);
        let args: Vec<Idx> = args.iter().map(|&a| pool.strip_modifiers(a)).collect();
        let obligation = pool.trait_type(name, self_ty, &args);

        self.impls_of(name).any(|entry| {
            if entry.ty == obligation {
                return true;
            }
            if !pool.is_generic(entry.ty) {
                return false;
            }
            let candidate = pool.instantiate_fresh(entry.ty);
            Unifier::new(pool, self.max_unify_steps)
                .unify(candidate, obligation)
                .is_ok()
        })
    }
}
