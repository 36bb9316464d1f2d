//! Type kind tag.
//!
//! Every pool item has a `Tag`; the tag decides how its payload in the extra
//! array is laid out:
//!
//! | Tag        | Payload                                               |
//! |------------|-------------------------------------------------------|
//! | primitives | empty                                                 |
//! | `Ptr`      | `[pointee]`                                           |
//! | `Array`    | `[elem, has_len, len_lo, len_hi]`                     |
//! | `Tuple`    | `[elems...]`                                          |
//! | `Function` | `[ret, fn_flags, param_count, params..., constraints...]` |
//! | `Var`      | `[kind, name_or_id]`                                  |
//! | `Product`  | `[name, args...]`                                     |
//! | `Sum`      | `[name, args...]`                                     |
//! | `Trait`    | `[name, self, args...]`                               |
//! | `Modified` | `[modifier, base]`                                    |

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Primitives (0-17) ===
    I8 = 0,
    I16 = 1,
    I32 = 2,
    I64 = 3,
    Isz = 4,
    U8 = 5,
    U16 = 6,
    U32 = 7,
    U64 = 8,
    Usz = 9,
    F16 = 10,
    F32 = 11,
    F64 = 12,
    C8 = 13,
    C32 = 14,
    Bool = 15,
    Unit = 16,
    Error = 17,

    // === Structural (32-47) ===
    Ptr = 32,
    Array = 33,
    Tuple = 34,
    Function = 35,

    // === Variables (48) ===
    Var = 48,

    // === Nominal (64-79) ===
    Product = 64,
    Sum = 65,
    Trait = 66,

    // === Qualified (96) ===
    Modified = 96,
}

impl Tag {
    const PRIMITIVES: [Tag; 18] = [
        Tag::I8,
        Tag::I16,
        Tag::I32,
        Tag::I64,
        Tag::Isz,
        Tag::U8,
        Tag::U16,
        Tag::U32,
        Tag::U64,
        Tag::Usz,
        Tag::F16,
        Tag::F32,
        Tag::F64,
        Tag::C8,
        Tag::C32,
        Tag::Bool,
        Tag::Unit,
        Tag::Error,
    ];

    /// All primitive tags in index order.
    pub const fn primitives() -> &'static [Tag] {
        &Self::PRIMITIVES
    }

    /// Tag of the primitive pre-interned at `index`.
    ///
    /// # Panics
    /// Panics if `index` is not a primitive index.
    pub const fn from_primitive_index(index: u32) -> Tag {
        Self::PRIMITIVES[index as usize]
    }

    /// Look up a primitive by its source name (`i32`, `bool`, ...).
    pub fn primitive_from_name(name: &str) -> Option<Tag> {
        Self::PRIMITIVES
            .iter()
            .copied()
            .find(|t| *t != Tag::Error && t.name() == name)
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        (self as u8) < 18
    }

    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isz)
    }

    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usz)
    }

    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F16 | Self::F32 | Self::F64)
    }

    #[inline]
    pub const fn is_nominal(self) -> bool {
        matches!(self, Self::Product | Self::Sum | Self::Trait)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isz => "isz",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usz => "usz",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::C8 => "c8",
            Self::C32 => "c32",
            Self::Bool => "bool",
            Self::Unit => "unit",
            Self::Error => "<error>",
            Self::Ptr => "pointer",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::Function => "function",
            Self::Var => "type variable",
            Self::Product => "product",
            Self::Sum => "sum",
            Self::Trait => "trait",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const _: () = assert!(std::mem::size_of::<Tag>() == 1);
