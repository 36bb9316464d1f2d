//! Module-level type checker.
//!
//! ```text
//! Pass 0: Registration
//!   0a: prelude operator traits and their primitive impls
//!   0b: product and sum declarations, then their bodies
//!   0c: user traits, then impls
//!
//! Pass 1: Signatures
//!   placeholder types from annotations or fresh variables; `given`
//!   bounds become the function type's constraints
//!
//! Pass 2: Bodies, callees before callers
//!   one group per strongly connected component of the call graph:
//!   find constraints -> solve -> apply -> generalize each member
//! ```
//!
//! A group stops after solving, or after applying, when new errors were
//! reported; its functions' types are then `<error>` so callers do not
//! cascade. Errors found while finding constraints stop the group before
//! solving only when they left a construct partly constrained.

mod bodies;
mod config;
mod registration;
mod signatures;

pub use config::CheckConfig;

use rustc_hash::FxHashMap;
use tern_diagnostic::{DiagnosticSink, ErrorGuaranteed};
use tern_ir::{ExprArena, ExprId, FunctionDecl, Module, Name, StringInterner};

use crate::infer::GlobalFn;
use crate::type_error::ErrorReporter;
use crate::{Idx, Pool, TraitRegistry};

/// How a run with errors ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CheckFlow {
    /// Every function was checked; later stages may run on what succeeded.
    Recover(ErrorGuaranteed),
    /// The error limit stopped checking early.
    Abort(ErrorGuaranteed),
}

/// The result of checking a module.
pub struct TypedModule {
    pub pool: Pool,
    pub registry: TraitRegistry,
    /// Fully substituted type of every expression in a function that
    /// checked cleanly.
    pub expr_types: FxHashMap<ExprId, Idx>,
    /// Final, generalized type of every top-level function; `<error>` for
    /// functions that failed.
    pub functions: FxHashMap<Name, Idx>,
    /// Generic variants created while checking, in creation order. Their
    /// `Idx` values are stable identities for later stages.
    pub variants: Vec<Idx>,
    pub error_count: usize,
    /// `None` when no errors were reported.
    pub flow: Option<CheckFlow>,
}

impl TypedModule {
    pub fn expr_type(&self, expr: ExprId) -> Option<Idx> {
        self.expr_types.get(&expr).copied()
    }

    pub fn function_type(&self, name: Name) -> Option<Idx> {
        self.functions.get(&name).copied()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Type check `module`, emitting diagnostics through `sink` as they are
/// found.
#[tracing::instrument(level = "debug", skip_all, fields(file = %config.file_name))]
pub fn check_module(
    module: &Module,
    arena: &ExprArena,
    interner: &StringInterner,
    config: &CheckConfig,
    sink: &mut DiagnosticSink<'_>,
) -> TypedModule {
    ModuleChecker::new(arena, interner, config, sink).check(module)
}

pub(crate) struct ModuleChecker<'a, 'd> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    config: &'a CheckConfig,
    sink: &'a mut DiagnosticSink<'d>,
    color: bool,

    pool: Pool,
    registry: TraitRegistry,
    globals: FxHashMap<Name, GlobalFn>,

    expr_types: FxHashMap<ExprId, Idx>,
    functions: FxHashMap<Name, Idx>,
}

impl<'a, 'd> ModuleChecker<'a, 'd> {
    fn new(
        arena: &'a ExprArena,
        interner: &'a StringInterner,
        config: &'a CheckConfig,
        sink: &'a mut DiagnosticSink<'d>,
    ) -> Self {
        let mut pool = Pool::new();
        let registry = TraitRegistry::with_prelude(&mut pool, interner)
            .with_step_limit(config.max_unify_steps);
        ModuleChecker {
            arena,
            interner,
            config,
            sink,
            color: config.use_color(),
            pool,
            registry,
            globals: FxHashMap::default(),
            expr_types: FxHashMap::default(),
            functions: FxHashMap::default(),
        }
    }

    fn check(mut self, module: &Module) -> TypedModule {
        self.register_types(module);
        self.register_traits(module);
        self.register_impls(module);
        self.collect_signatures(module);

        let mut aborted = false;
        for group in self.body_groups(module) {
            let group: Vec<&FunctionDecl> = group.iter().map(|&index| &module.functions[index]).collect();
            self.check_group(&group);
            if self.config.limit_reached(self.sink.error_count()) {
                tracing::debug!(errors = self.sink.error_count(), "error limit reached");
                aborted = true;
                break;
            }
        }
        self.materialize_expr_types();
        self.finish(aborted)
    }

    fn finish(self, aborted: bool) -> TypedModule {
        let error_count = self.sink.error_count();
        let flow = self.sink.has_errors().map(|guar| {
            if aborted {
                CheckFlow::Abort(guar)
            } else {
                CheckFlow::Recover(guar)
            }
        });
        tracing::debug!(
            functions = self.functions.len(),
            variants = self.pool.variants().len(),
            error_count,
            "module checked"
        );
        TypedModule {
            variants: self.pool.variants().to_vec(),
            pool: self.pool,
            registry: self.registry,
            expr_types: self.expr_types,
            functions: self.functions,
            error_count,
            flow,
        }
    }

    /// A reporter over the sink. Borrows only the sink, so the pool and
    /// registry stay available.
    fn reporter<'s>(
        sink: &'s mut DiagnosticSink<'d>,
        interner: &'s StringInterner,
        color: bool,
    ) -> ErrorReporter<'s, 'd> {
        ErrorReporter::new(sink, interner, color)
    }

    /// Concrete products and sums recorded for expressions get bodies,
    /// which registers them as variants.
    fn materialize_expr_types(&mut self) {
        let mut types: Vec<Idx> = self.expr_types.values().copied().collect();
        types.sort_unstable();
        types.dedup();
        for ty in types {
            materialize_nominals(&mut self.pool, ty);
        }
    }
}

fn materialize_nominals(pool: &mut Pool, ty: Idx) {
    if pool.is_generic(ty) || pool.flags(ty).has_errors() {
        return;
    }
    tern_stack::ensure_sufficient_stack(|| {
        if pool.tag(ty).is_nominal() && pool.tag(ty) != crate::Tag::Trait {
            // A declared type without a body is reported at its declaration.
            if let Err(err) = pool.materialize(ty) {
                tracing::debug!(%err, ?ty, "type not materialized");
            }
        }
        for child in pool.children(ty) {
            materialize_nominals(pool, child);
        }
    });
}
