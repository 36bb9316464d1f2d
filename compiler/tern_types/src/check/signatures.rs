//! Pass 1: function signatures and body order.

use rustc_hash::{FxHashMap, FxHashSet};
use tern_ir::visitor::{walk_expr, Visitor};
use tern_ir::{Expr, ExprArena, ExprId, ExprKind, FunctionDecl, Module, Name};

use super::ModuleChecker;
use crate::infer::GlobalFn;
use crate::pool::{FnSig, Parts};
use crate::registry::RegistryError;
use crate::type_error::TypeCheckError;
use crate::Idx;

impl ModuleChecker<'_, '_> {
    /// Give every function a placeholder type before any body is checked,
    /// so bodies can refer to functions declared later.
    pub(super) fn collect_signatures(&mut self, module: &Module) {
        for function in &module.functions {
            if self.globals.contains_key(&function.name) {
                let text = self.name(function.name);
                self.report(TypeCheckError::duplicate("function", text, function.span));
                continue;
            }
            let ty = self.signature(function);
            // Externs have nothing to infer.
            let finished = function.body.is_none();
            self.globals.insert(function.name, GlobalFn { ty, finished });
            if finished {
                self.functions.insert(function.name, ty);
            }
            tracing::trace!(function = self.name(function.name), ?ty, "placeholder");
        }
    }

    fn signature(&mut self, function: &FunctionDecl) -> Idx {
        let arena = self.arena;
        let params = arena
            .get_params(function.params)
            .iter()
            .map(|param| match param.ty {
                Some(ty) => self.resolve_type(ty, param.span),
                None => self.pool.fresh_var(),
            })
            .collect();
        let ret = match function.ret {
            Some(ty) => self.resolve_type(ty, function.span),
            None => self.pool.fresh_var(),
        };

        let mut constraints = Parts::new();
        for bound in &function.given {
            let args: Vec<Idx> = bound
                .args
                .iter()
                .map(|&arg| self.resolve_type(arg, bound.span))
                .collect();
            let Some((&self_ty, rest)) = args.split_first() else {
                self.report(TypeCheckError::arity("type argument", 1, 0, bound.span));
                continue;
            };
            match self
                .registry
                .obligation(&mut self.pool, bound.trait_name, self_ty, rest)
            {
                Ok(obligation) => constraints.push(obligation),
                Err(RegistryError::UnknownTrait(name)) => {
                    let text = self.name(name);
                    self.report(TypeCheckError::undeclared("trait", text, bound.span));
                }
                Err(RegistryError::ArgCount { expected, found }) => {
                    self.report(TypeCheckError::arity("type argument", expected, found, bound.span));
                }
                Err(RegistryError::DuplicateTrait(_)) => {}
            }
        }

        self.pool.function_sig(&FnSig {
            ret,
            params,
            constraints,
            is_meta: function.is_meta,
            is_variadic: function.is_variadic,
        })
    }

    /// Functions with bodies grouped by mutual recursion, callees before
    /// callers.
    ///
    /// Each group is a strongly connected component of the call graph,
    /// members in declaration order. Members of one group are inferred
    /// together against each other's placeholder types.
    pub(super) fn body_groups(&self, module: &Module) -> Vec<Vec<usize>> {
        // Later duplicates were rejected with their signatures.
        let mut index_of: FxHashMap<Name, usize> = FxHashMap::default();
        for (index, function) in module.functions.iter().enumerate() {
            index_of.entry(function.name).or_insert(index);
        }
        index_of.retain(|_, &mut index| module.functions[index].body.is_some());
        let callees: Vec<Vec<usize>> = module
            .functions
            .iter()
            .map(|function| {
                let mut refs = References::default();
                refs.visit_function(function, self.arena);
                refs.names
                    .iter()
                    .filter_map(|name| index_of.get(name).copied())
                    .collect()
            })
            .collect();

        let mut tarjan = Tarjan::new(&callees);
        for (index, function) in module.functions.iter().enumerate() {
            if index_of.get(&function.name) == Some(&index) && !tarjan.visited(index) {
                tarjan.connect(index);
            }
        }
        tracing::debug!(groups = ?tarjan.groups, "body groups");
        tarjan.groups
    }
}

/// Tarjan's strongly connected components over function indices. Groups
/// come out in reverse topological order: every group after the groups
/// it calls into.
struct Tarjan<'g> {
    callees: &'g [Vec<usize>],
    next: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    groups: Vec<Vec<usize>>,
}

impl<'g> Tarjan<'g> {
    fn new(callees: &'g [Vec<usize>]) -> Self {
        let n = callees.len();
        Tarjan {
            callees,
            next: 0,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            groups: Vec::new(),
        }
    }

    fn visited(&self, v: usize) -> bool {
        self.index[v].is_some()
    }

    fn connect(&mut self, v: usize) {
        self.index[v] = Some(self.next);
        self.lowlink[v] = self.next;
        self.next += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        let callees = self.callees;
        for &w in &callees[v] {
            match self.index[w] {
                None => {
                    tern_stack::ensure_sufficient_stack(|| self.connect(w));
                    self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                }
                Some(index_w) if self.on_stack[w] => {
                    self.lowlink[v] = self.lowlink[v].min(index_w);
                }
                Some(_) => {}
            }
        }

        if Some(self.lowlink[v]) == self.index[v] {
            let mut group = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                group.push(w);
                if w == v {
                    break;
                }
            }
            group.sort_unstable();
            self.groups.push(group);
        }
    }
}

/// Names referenced by a body, in order of first appearance.
#[derive(Default)]
struct References {
    names: Vec<Name>,
    seen: FxHashSet<Name>,
}

impl<'ast> Visitor<'ast> for References {
    fn visit_expr(&mut self, _id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
        if let ExprKind::Ident(name) = expr.kind {
            if self.seen.insert(name) {
                self.names.push(name);
            }
        }
        walk_expr(self, expr, arena);
    }
}
