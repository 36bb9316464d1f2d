//! Pre-computed type metadata flags.
//!
//! Computed once when a type is interned and cached next to it, so
//! `is_generic` and friends are O(1) and can gate substitution and the
//! occurs check.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence Flags ===
        /// Contains a type variable (the type is generic).
        const HAS_VAR = 1 << 0;
        /// Contains the error placeholder.
        const HAS_ERROR = 1 << 1;
        /// Contains a modifier somewhere in its structure.
        const HAS_MODIFIER = 1 << 2;

        // === Category Flags ===
        const IS_PRIMITIVE = 1 << 8;
        const IS_FUNCTION = 1 << 9;
        /// Product, sum or trait.
        const IS_NOMINAL = 1 << 10;
        const IS_VAR = 1 << 11;
        const IS_MODIFIED = 1 << 12;
    }
}

impl TypeFlags {
    /// Flags inherited by a compound type from its children.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_VAR.bits() | Self::HAS_ERROR.bits() | Self::HAS_MODIFIER.bits(),
    );

    #[inline]
    pub const fn has_vars(self) -> bool {
        self.contains(Self::HAS_VAR)
    }

    #[inline]
    pub const fn has_errors(self) -> bool {
        self.contains(Self::HAS_ERROR)
    }

    /// Flags a parent gains from one child.
    #[inline]
    pub fn propagated(self) -> Self {
        self & Self::PROPAGATE_MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_presence_flags_propagate() {
        let child = TypeFlags::HAS_VAR | TypeFlags::IS_VAR | TypeFlags::IS_PRIMITIVE;
        assert_eq!(child.propagated(), TypeFlags::HAS_VAR);
        assert!(child.has_vars());
        assert!(!child.has_errors());
    }
}
