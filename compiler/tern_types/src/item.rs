//! Compact type item storage.

use crate::Tag;

/// One type in the pool: its tag plus the start of its payload in the
/// pool's extra array (where `extra[start]` is the payload length).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct Item {
    pub tag: Tag,
    pub extra_start: u32,
}

impl Item {
    #[inline]
    pub const fn new(tag: Tag, extra_start: u32) -> Self {
        Self { tag, extra_start }
    }
}
