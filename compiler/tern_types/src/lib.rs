//! Type inference for Tern.
//!
//! - `pool`: the uniquing type arena and the generic variant cache
//! - `infer`: the constraint-finding traversal
//! - `unify`: the unification engine and ordered substitutions
//! - `apply`: rewriting recorded types and discharging trait obligations
//! - `registry`: traits and impls
//! - `type_error`: error data, rendering and emission
//! - `check`: the module-level driver
//!
//! Inference is constraint-based: each function body is walked once to
//! emit equality and trait constraints, the constraints are solved in
//! order into a substitution, and the substitution is applied to every
//! recorded expression type. Top-level functions are generalized and
//! instantiated freshly at each use.

mod apply;
mod check;
mod constraint;
mod flags;
mod idx;
pub mod infer;
mod item;
mod pool;
mod registry;
mod subst;
mod tag;
pub mod type_error;
mod unify;

pub use apply::{Applied, Applier};
pub use check::{check_module, CheckConfig, CheckFlow, TypedModule};
pub use constraint::{Constraint, EqOrigin};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use item::Item;
pub use pool::{
    FnSig, NominalBody, Parts, Pool, PoolError, ProductBody, SumBody, TypeFormatter, TypeView,
    VarKind, VarNamer,
};
pub use registry::{ImplEntry, MethodSig, RegistryError, TraitEntry, TraitRegistry};
pub use subst::Substitution;
pub use tag::Tag;
pub use type_error::{TypeCheckError, TypeErrorKind};
pub use unify::{ArityKind, ConstraintFailure, Solution, Unifier, UnifyError, UnifyFailure};

/// Type qualifiers, shared with the parsed-type representation.
pub use tern_ir::TypeModifier as Modifier;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, Item, TypeFlags};
    tern_ir::static_assert_size!(Idx, 4);
    tern_ir::static_assert_size!(Item, 8);
    tern_ir::static_assert_size!(TypeFlags, 4);
}
