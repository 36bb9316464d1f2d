//! Type construction helpers for the Pool.
//!
//! Every constructor returns the unique `Idx` for its structural
//! description, creating it on first request. Constituents are keyed
//! without their modifiers: `*mut i32` and `*i32` are one type.

use tern_ir::Name;

use super::view::{FN_META, FN_VARIADIC, VAR_FRESH, VAR_NAMED};
use super::{FnSig, Parts, Pool};
use crate::{Idx, Tag, TypeFlags};

#[inline]
fn word(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("type has too many constituents"))
}

impl Pool {
    // === Single-Child Constructors ===

    /// Create a pointer type `*pointee`.
    pub fn ptr(&mut self, pointee: Idx) -> Idx {
        let pointee = self.strip_modifiers(pointee);
        self.intern(Tag::Ptr, &[pointee.raw()], &[pointee], TypeFlags::empty())
    }

    /// Create an array type `[elem; len]`, or `[elem]` when the length is
    /// not statically known.
    pub fn array(&mut self, elem: Idx, len: Option<u64>) -> Idx {
        let elem = self.strip_modifiers(elem);
        #[allow(clippy::cast_possible_truncation, reason = "split into two words")]
        let payload = match len {
            Some(n) => [elem.raw(), 1, n as u32, (n >> 32) as u32],
            None => [elem.raw(), 0, 0, 0],
        };
        self.intern(Tag::Array, &payload, &[elem], TypeFlags::empty())
    }

    // === Tuple Constructor ===

    /// Create a tuple type `(elems...)`.
    ///
    /// Empty tuples return `Idx::UNIT`.
    pub fn tuple(&mut self, elems: &[Idx]) -> Idx {
        if elems.is_empty() {
            return Idx::UNIT;
        }
        let elems = self.strip_all(elems);
        let elems = elems.as_slice();
        let payload: Vec<u32> = elems.iter().map(|e| e.raw()).collect();
        self.intern(Tag::Tuple, &payload, elems, TypeFlags::empty())
    }

    /// Create a compound type of the given shape from its constituent parts.
    ///
    /// Parts follow payload order: `[pointee]` for pointers, `[elem]` for
    /// unsized arrays, the elements for tuples, `[ret, params...]` for
    /// plain functions.
    ///
    /// # Panics
    /// Panics for tags that need more than parts to describe (nominal
    /// types, variables, modifiers, sized arrays).
    pub fn aggregate(&mut self, tag: Tag, parts: &[Idx]) -> Idx {
        match tag {
            Tag::Ptr if parts.len() == 1 => self.ptr(parts[0]),
            Tag::Array if parts.len() == 1 => self.array(parts[0], None),
            Tag::Tuple => self.tuple(parts),
            Tag::Function if !parts.is_empty() => self.function(parts[0], &parts[1..], &[], false),
            _ => panic!("cannot build {tag:?} from {} parts", parts.len()),
        }
    }

    // === Function Constructors ===

    /// Create a function type `(params...) -> ret given constraints...`.
    pub fn function(&mut self, ret: Idx, params: &[Idx], constraints: &[Idx], is_meta: bool) -> Idx {
        self.function_with_flags(ret, params, constraints, is_meta, false)
    }

    /// Create a variadic function type: calls may pass extra arguments
    /// after the declared parameters.
    pub fn function_variadic(&mut self, ret: Idx, params: &[Idx], is_meta: bool) -> Idx {
        self.function_with_flags(ret, params, &[], is_meta, true)
    }

    /// Create a function type from a decoded signature.
    pub fn function_sig(&mut self, sig: &FnSig) -> Idx {
        self.function_with_flags(sig.ret, &sig.params, &sig.constraints, sig.is_meta, sig.is_variadic)
    }

    fn function_with_flags(
        &mut self,
        ret: Idx,
        params: &[Idx],
        constraints: &[Idx],
        is_meta: bool,
        is_variadic: bool,
    ) -> Idx {
        let ret = self.strip_modifiers(ret);
        let params = self.strip_all(params);
        let constraints = self.strip_all(constraints);

        // Layout: [ret, fn_flags, param_count, params..., constraints...]
        let mut fn_flags = 0;
        if is_meta {
            fn_flags |= FN_META;
        }
        if is_variadic {
            fn_flags |= FN_VARIADIC;
        }
        let mut payload = Vec::with_capacity(3 + params.len() + constraints.len());
        payload.push(ret.raw());
        payload.push(fn_flags);
        payload.push(word(params.len()));
        payload.extend(params.iter().map(|p| p.raw()));
        payload.extend(constraints.iter().map(|c| c.raw()));

        let mut children = Vec::with_capacity(1 + params.len() + constraints.len());
        children.push(ret);
        children.extend_from_slice(&params);
        children.extend_from_slice(&constraints);
        self.intern(Tag::Function, &payload, &children, TypeFlags::IS_FUNCTION)
    }

    // === Type Variables ===

    /// The type variable named `name` (`'t`). Same name, same variable.
    pub fn type_var(&mut self, name: Name) -> Idx {
        self.intern(
            Tag::Var,
            &[VAR_NAMED, name.raw()],
            &[],
            TypeFlags::IS_VAR | TypeFlags::HAS_VAR,
        )
    }

    /// A type variable distinct from every other.
    pub fn fresh_var(&mut self) -> Idx {
        let id = self.next_var_id;
        self.next_var_id += 1;
        self.intern(
            Tag::Var,
            &[VAR_FRESH, id],
            &[],
            TypeFlags::IS_VAR | TypeFlags::HAS_VAR,
        )
    }

    /// Whether `idx` is a bare type variable.
    #[inline]
    pub fn is_var(&self, idx: Idx) -> bool {
        self.tag(idx) == Tag::Var
    }

    // === Nominal Constructors ===

    /// The trait type `Name self args...`, as used for obligations and
    /// `given` constraints.
    pub fn trait_type(&mut self, name: Name, self_ty: Idx, args: &[Idx]) -> Idx {
        let self_ty = self.strip_modifiers(self_ty);
        let args = self.strip_all(args);
        let mut payload = Vec::with_capacity(2 + args.len());
        payload.push(name.raw());
        payload.push(self_ty.raw());
        payload.extend(args.iter().map(|a| a.raw()));
        let mut children = Vec::with_capacity(1 + args.len());
        children.push(self_ty);
        children.extend_from_slice(&args);
        self.intern(Tag::Trait, &payload, &children, TypeFlags::IS_NOMINAL)
    }

    /// The product or sum `name args...` without touching the nominal
    /// table.
    pub(crate) fn nominal_type(&mut self, tag: Tag, name: Name, args: &[Idx]) -> Idx {
        debug_assert!(matches!(tag, Tag::Product | Tag::Sum));
        let args = self.strip_all(args);
        let mut payload = Vec::with_capacity(1 + args.len());
        payload.push(name.raw());
        payload.extend(args.iter().map(|a| a.raw()));
        self.intern(tag, &payload, &args, TypeFlags::IS_NOMINAL)
    }

    fn strip_all(&self, types: &[Idx]) -> Parts {
        types.iter().map(|&ty| self.strip_modifiers(ty)).collect()
    }
}
