//! Decoded views of pool items.

use smallvec::SmallVec;
use tern_ir::Name;

use super::Pool;
use crate::{Idx, Modifier, Tag};

/// Child type list; most types have four or fewer.
pub type Parts = SmallVec<[Idx; 4]>;

/// How a type variable is identified.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VarKind {
    /// A user-written variable such as `'t`, uniqued by name.
    Named(Name),
    /// A variable created by inference.
    Fresh(u32),
}

/// Decoded function signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FnSig {
    pub ret: Idx,
    pub params: Parts,
    /// Trait obligations (trait types) callers must satisfy.
    pub constraints: Parts,
    pub is_meta: bool,
    pub is_variadic: bool,
}

/// A type decoded from its pool payload, for exhaustive matching.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeView {
    Primitive(Tag),
    Ptr(Idx),
    Array { elem: Idx, len: Option<u64> },
    Tuple(Parts),
    Function(FnSig),
    Var(VarKind),
    Product { name: Name, args: Parts },
    Sum { name: Name, args: Parts },
    Trait { name: Name, self_ty: Idx, args: Parts },
    Modified { modifier: Modifier, base: Idx },
}

pub(crate) const FN_META: u32 = 1 << 0;
pub(crate) const FN_VARIADIC: u32 = 1 << 1;

pub(crate) const VAR_NAMED: u32 = 0;
pub(crate) const VAR_FRESH: u32 = 1;

#[inline]
pub(crate) fn idxs(words: &[u32]) -> Parts {
    words.iter().map(|&w| Idx::from_raw(w)).collect()
}

pub(crate) fn modifier_to_word(modifier: Modifier) -> u32 {
    match modifier {
        Modifier::Mut => 0,
        Modifier::Const => 1,
        Modifier::Global => 2,
        Modifier::Comptime => 3,
    }
}

fn modifier_from_word(word: u32) -> Modifier {
    match word {
        0 => Modifier::Mut,
        1 => Modifier::Const,
        2 => Modifier::Global,
        _ => Modifier::Comptime,
    }
}

impl Pool {
    /// Decode a type.
    pub fn view(&self, idx: Idx) -> TypeView {
        let tag = self.tag(idx);
        let p = self.payload(idx);
        match tag {
            Tag::Ptr => TypeView::Ptr(Idx::from_raw(p[0])),
            Tag::Array => TypeView::Array {
                elem: Idx::from_raw(p[0]),
                len: (p[1] != 0).then(|| u64::from(p[2]) | (u64::from(p[3]) << 32)),
            },
            Tag::Tuple => TypeView::Tuple(idxs(p)),
            Tag::Function => TypeView::Function(self.fn_sig_from_payload(p)),
            Tag::Var => TypeView::Var(if p[0] == VAR_NAMED {
                VarKind::Named(Name::from_raw(p[1]))
            } else {
                VarKind::Fresh(p[1])
            }),
            Tag::Product => TypeView::Product {
                name: Name::from_raw(p[0]),
                args: idxs(&p[1..]),
            },
            Tag::Sum => TypeView::Sum {
                name: Name::from_raw(p[0]),
                args: idxs(&p[1..]),
            },
            Tag::Trait => TypeView::Trait {
                name: Name::from_raw(p[0]),
                self_ty: Idx::from_raw(p[1]),
                args: idxs(&p[2..]),
            },
            Tag::Modified => TypeView::Modified {
                modifier: modifier_from_word(p[0]),
                base: Idx::from_raw(p[1]),
            },
            primitive => TypeView::Primitive(primitive),
        }
    }

    fn fn_sig_from_payload(&self, p: &[u32]) -> FnSig {
        let param_count = p[2] as usize;
        FnSig {
            ret: Idx::from_raw(p[0]),
            is_meta: p[1] & FN_META != 0,
            is_variadic: p[1] & FN_VARIADIC != 0,
            params: idxs(&p[3..3 + param_count]),
            constraints: idxs(&p[3 + param_count..]),
        }
    }

    /// Signature of a function type, or `None` for other types.
    pub fn fn_sig(&self, idx: Idx) -> Option<FnSig> {
        (self.tag(idx) == Tag::Function).then(|| self.fn_sig_from_payload(self.payload(idx)))
    }

    /// Name of a product, sum or trait type.
    pub fn nominal_name(&self, idx: Idx) -> Option<Name> {
        self.tag(idx)
            .is_nominal()
            .then(|| Name::from_raw(self.payload(idx)[0]))
    }

    /// Type arguments of a product or sum, or `[self, args...]` of a trait.
    pub fn nominal_args(&self, idx: Idx) -> Parts {
        if self.tag(idx).is_nominal() {
            idxs(&self.payload(idx)[1..])
        } else {
            Parts::new()
        }
    }

    /// Direct constituent types, in payload order.
    pub fn children(&self, idx: Idx) -> Parts {
        match self.view(idx) {
            TypeView::Primitive(_) | TypeView::Var(_) => Parts::new(),
            TypeView::Ptr(inner) | TypeView::Modified { base: inner, .. } => {
                std::iter::once(inner).collect()
            }
            TypeView::Array { elem, .. } => std::iter::once(elem).collect(),
            TypeView::Tuple(parts)
            | TypeView::Product { args: parts, .. }
            | TypeView::Sum { args: parts, .. } => parts,
            TypeView::Function(sig) => std::iter::once(sig.ret)
                .chain(sig.params)
                .chain(sig.constraints)
                .collect(),
            TypeView::Trait { self_ty, args, .. } => {
                std::iter::once(self_ty).chain(args).collect()
            }
        }
    }

    /// The variable identity of a `Var` type.
    pub fn var_kind(&self, idx: Idx) -> Option<VarKind> {
        match self.view(idx) {
            TypeView::Var(kind) => Some(kind),
            _ => None,
        }
    }
}
