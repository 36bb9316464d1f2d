//! Pass 0: types, traits and impls.
//!
//! Types are registered in two phases: every name is declared first, then
//! bodies are resolved, so declarations may refer to each other in any
//! order.

use tern_ir::{FieldDecl, Module, Name, Span, TypeDeclKind};

use super::ModuleChecker;
use crate::infer::resolve_parsed_type;
use crate::pool::PoolError;
use crate::registry::{MethodSig, RegistryError};
use crate::type_error::TypeCheckError;
use crate::Idx;

impl ModuleChecker<'_, '_> {
    pub(super) fn register_types(&mut self, module: &Module) {
        // Phase 1: names.
        let mut declared = Vec::with_capacity(module.types.len());
        for decl in &module.types {
            let entry = match &decl.kind {
                TypeDeclKind::Product(_) => {
                    match self.pool.declare_product(decl.name, &decl.type_params) {
                        Ok(ty) => Declared::Product(ty),
                        Err(err) => {
                            self.report_pool_error(&err, decl.span);
                            Declared::Failed
                        }
                    }
                }
                TypeDeclKind::Sum(tag_decls) => {
                    match self.pool.declare_sum(decl.name, &decl.type_params) {
                        Ok(sum) => {
                            let mut tags = Vec::with_capacity(tag_decls.len());
                            for tag in tag_decls {
                                // Tags share the sum's type parameters.
                                match self.pool.declare_product(tag.name, &decl.type_params) {
                                    Ok(tag_ty) => tags.push(Some(tag_ty)),
                                    Err(err) => {
                                        self.report_pool_error(&err, tag.span);
                                        tags.push(None);
                                    }
                                }
                            }
                            Declared::Sum(sum, tags)
                        }
                        Err(err) => {
                            self.report_pool_error(&err, decl.span);
                            Declared::Failed
                        }
                    }
                }
            };
            declared.push(entry);
        }

        // Phase 2: bodies.
        for (decl, declared) in module.types.iter().zip(declared) {
            match (&decl.kind, declared) {
                (TypeDeclKind::Product(fields), Declared::Product(ty)) => {
                    self.define_fields(ty, fields, decl.span);
                }
                (TypeDeclKind::Sum(tag_decls), Declared::Sum(sum, tags)) => {
                    let mut defined = Vec::with_capacity(tags.len());
                    for (tag_decl, tag) in tag_decls.iter().zip(tags) {
                        if let Some(tag) = tag {
                            self.define_fields(tag, &tag_decl.fields, tag_decl.span);
                            defined.push(tag);
                        }
                    }
                    if let Err(err) = self.pool.define_sum_tags(sum, defined) {
                        self.report_pool_error(&err, decl.span);
                    }
                }
                _ => {}
            }
        }
    }

    fn define_fields(&mut self, ty: Idx, fields: &[FieldDecl], span: Span) {
        let mut types = Vec::with_capacity(fields.len());
        let mut names = Vec::with_capacity(fields.len());
        for field in fields {
            types.push(self.resolve_type(field.ty, field.span));
            names.push(field.name);
        }
        if let Err(err) = self.pool.define_product_body(ty, types, names) {
            self.report_pool_error(&err, span);
        }
    }

    pub(super) fn register_traits(&mut self, module: &Module) {
        for decl in &module.traits {
            let methods = decl
                .methods
                .iter()
                .map(|method| MethodSig {
                    name: method.name,
                    params: method
                        .params
                        .iter()
                        .map(|&param| self.resolve_type(param, method.span))
                        .collect(),
                    ret: self.resolve_type(method.ret, method.span),
                })
                .collect();
            if let Err(err) =
                self.registry
                    .register_trait(&mut self.pool, decl.name, decl.params.clone(), methods)
            {
                self.report_registry_error(&err, decl.name, decl.span);
            }
        }
    }

    pub(super) fn register_impls(&mut self, module: &Module) {
        for decl in &module.impls {
            let args: Vec<Idx> = decl
                .args
                .iter()
                .map(|&arg| self.resolve_type(arg, decl.span))
                .collect();
            let Some((&self_ty, rest)) = args.split_first() else {
                self.report(TypeCheckError::arity("type argument", 1, 0, decl.span));
                continue;
            };
            match self
                .registry
                .obligation(&mut self.pool, decl.trait_name, self_ty, rest)
            {
                Ok(ty) => self.registry.add_impl(ty, decl.trait_name, decl.span),
                Err(err) => self.report_registry_error(&err, decl.trait_name, decl.span),
            }
        }
    }

    // === Shared helpers ===

    /// Resolve a written type, reporting failures and using `<error>`.
    pub(super) fn resolve_type(&mut self, ty: tern_ir::ParsedTypeId, span: Span) -> Idx {
        match resolve_parsed_type(&mut self.pool, self.arena, self.interner, ty, span) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.report(err);
                Idx::ERROR
            }
        }
    }

    pub(super) fn report(&mut self, error: TypeCheckError) {
        Self::reporter(self.sink, self.interner, self.color).report(error);
    }

    fn report_pool_error(&mut self, err: &PoolError, span: Span) {
        let error = match *err {
            PoolError::Redeclared(name) => TypeCheckError::duplicate("type", self.name(name), span),
            PoolError::ArgCount { expected, found } => {
                TypeCheckError::arity("type argument", expected, found, span)
            }
            _ => {
                tracing::error!(%err, "invalid nominal declaration");
                TypeCheckError::new(
                    crate::type_error::TypeErrorKind::TypeMismatch,
                    span,
                    err.to_string(),
                )
            }
        };
        self.report(error);
    }

    fn report_registry_error(&mut self, err: &RegistryError, trait_name: Name, span: Span) {
        let text = self.name(trait_name);
        let error = match *err {
            RegistryError::DuplicateTrait(_) => TypeCheckError::duplicate("trait", text, span),
            RegistryError::UnknownTrait(_) => TypeCheckError::undeclared("trait", text, span),
            RegistryError::ArgCount { expected, found } => {
                TypeCheckError::arity("type argument", expected, found, span)
                    .with_note(format!("the self type counts as the first argument of `{text}`"))
            }
        };
        self.report(error);
    }

    pub(super) fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }
}

/// Outcome of phase 1 for one type declaration.
enum Declared {
    Product(Idx),
    Sum(Idx, Vec<Option<Idx>>),
    Failed,
}
