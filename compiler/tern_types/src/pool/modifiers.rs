//! Modifier chains.
//!
//! A modified type is a chain of `Modified` items ending at a base type.
//! Chains are uniqued in their own `(modifier, base)` map, so wrapping a
//! type never changes the identity of the type it wraps.

use smallvec::SmallVec;

use super::view::modifier_to_word;
use super::{Pool, TypeView};
use crate::{Idx, Modifier, Tag, TypeFlags};

impl Pool {
    /// Wrap `base` with `modifier`.
    ///
    /// Adding a modifier already on the chain is a no-op, as is adding
    /// `const` to a chain that carries `mut`. Adding `mut` to a chain that
    /// carries `const` replaces the `const`.
    pub fn modified(&mut self, modifier: Modifier, base: Idx) -> Idx {
        let chain = self.modifiers(base);
        if chain.contains(&modifier) {
            return base;
        }
        match modifier {
            Modifier::Const if chain.contains(&Modifier::Mut) => base,
            Modifier::Mut if chain.contains(&Modifier::Const) => {
                let core = self.strip_modifiers(base);
                let rebuilt = chain
                    .iter()
                    .rev()
                    .filter(|&&m| m != Modifier::Const)
                    .fold(core, |inner, &m| self.wrap(m, inner));
                self.wrap(Modifier::Mut, rebuilt)
            }
            _ => self.wrap(modifier, base),
        }
    }

    fn wrap(&mut self, modifier: Modifier, base: Idx) -> Idx {
        if let Some(&existing) = self.modified_map.get(&(modifier, base)) {
            return existing;
        }
        let flags = self.flags(base).propagated() | TypeFlags::IS_MODIFIED | TypeFlags::HAS_MODIFIER;
        let weight = self.match_weight(base);
        let idx = self.push_item(
            Tag::Modified,
            &[modifier_to_word(modifier), base.raw()],
            flags,
            weight,
        );
        self.modified_map.insert((modifier, base), idx);
        idx
    }

    /// The base type under every modifier. Idempotent.
    pub fn strip_modifiers(&self, mut ty: Idx) -> Idx {
        while let TypeView::Modified { base, .. } = self.view(ty) {
            ty = base;
        }
        ty
    }

    /// Modifiers on the chain, outermost first.
    pub fn modifiers(&self, mut ty: Idx) -> SmallVec<[Modifier; 2]> {
        let mut chain = SmallVec::new();
        while let TypeView::Modified { modifier, base } = self.view(ty) {
            chain.push(modifier);
            ty = base;
        }
        chain
    }

    pub fn has_modifier(&self, ty: Idx, modifier: Modifier) -> bool {
        self.modifiers(ty).contains(&modifier)
    }
}
