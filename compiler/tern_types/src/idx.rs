//! Type index handle.
//!
//! `Idx` is the only runtime representation of a type: a 32-bit index into
//! the [`Pool`](crate::Pool). Because the pool uniques every type, type
//! equality is index equality.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-17) ===
    // Pre-interned at pool creation; index equals the primitive's `Tag`.
    pub const I8: Self = Self(0);
    pub const I16: Self = Self(1);
    pub const I32: Self = Self(2);
    pub const I64: Self = Self(3);
    pub const ISZ: Self = Self(4);
    pub const U8: Self = Self(5);
    pub const U16: Self = Self(6);
    pub const U32: Self = Self(7);
    pub const U64: Self = Self(8);
    pub const USZ: Self = Self(9);
    pub const F16: Self = Self(10);
    pub const F32: Self = Self(11);
    pub const F64: Self = Self(12);
    pub const C8: Self = Self(13);
    pub const C32: Self = Self(14);
    pub const BOOL: Self = Self(15);
    pub const UNIT: Self = Self(16);
    /// Placeholder for expressions whose type could not be determined.
    /// Unifies with everything so one error does not cascade.
    pub const ERROR: Self = Self(17);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 18;

    /// Sentinel for "no type".
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "Idx::NONE")
        } else if self.is_primitive() {
            write!(f, "Idx::{}", crate::Tag::from_primitive_index(self.0).name())
        } else {
            write!(f, "Idx({})", self.0)
        }
    }
}

const _: () = assert!(std::mem::size_of::<Idx>() == 4);
