//! Stack growth for the recursive passes of the type checker.
//!
//! Constraint finding, substitution and type formatting all recurse over
//! user-written structure (nested expressions, nested types). A deeply nested
//! program must not overflow the native stack, so every recursive entry point
//! wraps its body in [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate allocates a fresh stack segment when
//! the remaining space drops below [`RED_ZONE`]. On `wasm32` the closure is
//! simply called.

/// Remaining stack below which a new segment is allocated (128KB).
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
