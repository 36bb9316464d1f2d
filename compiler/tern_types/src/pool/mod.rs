//! The type pool: owner and uniquer of every type.
//!
//! Types are created on first request, never mutated and never freed.
//! Structurally equal requests return the same [`Idx`]; the uniquing key
//! is a 64-bit structural hash checked against the stored item, and a hash
//! hit whose stored item differs is an invariant violation.
//!
//! Storage is struct-of-arrays: `items`, `flags` and `weights` are
//! parallel vectors indexed by `Idx`, and every payload lives in the
//! shared `extra` array (see [`Tag`] for per-tag layouts).

mod construct;
mod format;
mod modifiers;
mod nominal;
mod transform;
mod variants;
mod view;

pub use format::{TypeFormatter, VarNamer};
pub use nominal::{NominalBody, PoolError, ProductBody, SumBody};
pub use view::{FnSig, Parts, TypeView, VarKind};

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::{Idx, Item, Modifier, Tag, TypeFlags};
use nominal::NominalTable;

/// The type pool.
///
/// Passed explicitly (`&mut Pool`) to every component that creates types.
pub struct Pool {
    items: Vec<Item>,
    flags: Vec<TypeFlags>,
    weights: Vec<u32>,
    /// Length-prefixed payloads: `extra[start]` is the length.
    extra: Vec<u32>,
    intern_map: FxHashMap<u64, Idx>,
    /// Modified types are uniqued by `(modifier, base)`, apart from the
    /// structural map.
    modified_map: FxHashMap<(Modifier, Idx), Idx>,
    next_var_id: u32,
    nominal: NominalTable,
}

impl Pool {
    /// Create a pool with every primitive pre-interned at its fixed index.
    pub fn new() -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(256),
            flags: Vec::with_capacity(256),
            weights: Vec::with_capacity(256),
            extra: Vec::with_capacity(1024),
            intern_map: FxHashMap::default(),
            modified_map: FxHashMap::default(),
            next_var_id: 0,
            nominal: NominalTable::default(),
        };
        for &tag in Tag::primitives() {
            let mut flags = TypeFlags::IS_PRIMITIVE;
            if tag == Tag::Error {
                flags |= TypeFlags::HAS_ERROR;
            }
            let idx = pool.intern(tag, &[], &[], flags);
            debug_assert_eq!(idx.raw(), tag as u32);
        }
        pool
    }

    /// Number of types in the pool.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // === Queries ===

    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items[idx.index()].tag
    }

    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.flags[idx.index()]
    }

    /// Whether the type or one of its constituents is a type variable.
    #[inline]
    pub fn is_generic(&self, idx: Idx) -> bool {
        self.flags(idx).has_vars()
    }

    /// Number of type nodes structurally contained in `idx`, itself
    /// included. Modifiers do not count.
    #[inline]
    pub fn match_weight(&self, idx: Idx) -> u32 {
        self.weights[idx.index()]
    }

    /// Raw payload words of a type.
    #[inline]
    pub(crate) fn payload(&self, idx: Idx) -> &[u32] {
        let start = self.items[idx.index()].extra_start as usize;
        let len = self.extra[start] as usize;
        &self.extra[start + 1..start + 1 + len]
    }

    // === Interning ===

    fn structural_hash(tag: Tag, payload: &[u32]) -> u64 {
        let mut hasher = FxHasher::default();
        tag.hash(&mut hasher);
        payload.hash(&mut hasher);
        hasher.finish()
    }

    /// Append a new item without consulting any uniquing map.
    fn push_item(&mut self, tag: Tag, payload: &[u32], flags: TypeFlags, weight: u32) -> Idx {
        let idx = Idx::from_raw(
            u32::try_from(self.items.len()).unwrap_or_else(|_| panic!("type pool overflow")),
        );
        let start = u32::try_from(self.extra.len())
            .unwrap_or_else(|_| panic!("type pool extra array overflow"));
        self.extra.push(
            u32::try_from(payload.len()).unwrap_or_else(|_| panic!("type payload too large")),
        );
        self.extra.extend_from_slice(payload);
        self.items.push(Item::new(tag, start));
        self.flags.push(flags);
        self.weights.push(weight);
        idx
    }

    /// Intern a structural type.
    ///
    /// `children` are the type constituents whose presence flags and match
    /// weights roll up into the new type; `own` are its category flags.
    ///
    /// # Panics
    /// Panics if the structural hash collides with a different stored type.
    pub(crate) fn intern(&mut self, tag: Tag, payload: &[u32], children: &[Idx], own: TypeFlags) -> Idx {
        let hash = Self::structural_hash(tag, payload);
        if let Some(&existing) = self.intern_map.get(&hash) {
            if self.tag(existing) == tag && self.payload(existing) == payload {
                return existing;
            }
            tracing::error!(
                ?existing,
                existing_tag = ?self.tag(existing),
                requested_tag = ?tag,
                hash,
                "structural hash collision in type pool"
            );
            panic!(
                "type pool invariant violated: hash {hash:#018x} maps to {existing:?} ({:?}) but a structurally different {tag:?} was requested",
                self.tag(existing)
            );
        }

        let mut flags = own;
        let mut weight = 1u32;
        for &child in children {
            flags |= self.flags(child).propagated();
            weight = weight.saturating_add(self.match_weight(child));
        }
        let idx = self.push_item(tag, payload, flags, weight);
        self.intern_map.insert(hash, idx);
        tracing::trace!(?idx, ?tag, "interned type");
        idx
    }

    /// The pre-interned primitive for `tag`.
    #[inline]
    pub fn primitive(&self, tag: Tag) -> Idx {
        debug_assert!(tag.is_primitive());
        Idx::from_raw(tag as u32)
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("types", &self.items.len())
            .field("vars", &self.next_var_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
