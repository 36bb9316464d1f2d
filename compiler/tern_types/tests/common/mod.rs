//! Hand-built modules for end-to-end checker tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::RefCell;
use std::rc::Rc;

use tern_diagnostic::{Diagnostic, DiagnosticEmitter, DiagnosticSink};
use tern_ir::{
    ArmRange, BinaryOp, Expr, ExprArena, ExprId, ExprKind, FieldDecl, FunctionDecl, GivenBound,
    MatchArm, MatchPattern, MatchPatternId, Module, Name, Param, ParsedType, ParsedTypeId, Span,
    StringInterner, TagDecl, TypeDecl, TypeDeclKind,
};
use tern_types::{check_module, CheckConfig, Idx, TypedModule};

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An emitter that keeps every diagnostic it is given.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<Diagnostic>>>);

impl Capture {
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl DiagnosticEmitter for Capture {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.0.borrow_mut().push(diagnostic.clone());
    }

    fn flush(&mut self) {}

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {}
}

/// A module under construction. Every expression gets its own span so
/// diagnostics can be traced back to the node that caused them.
pub struct Source {
    pub arena: ExprArena,
    pub interner: StringInterner,
    pub module: Module,
    next_offset: u32,
}

impl Source {
    pub fn new() -> Self {
        Source {
            arena: ExprArena::new(),
            interner: StringInterner::new(),
            module: Module::new(),
            next_offset: 0,
        }
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    fn span(&mut self) -> Span {
        let start = self.next_offset;
        self.next_offset += 2;
        Span::new(start, start + 1)
    }

    // === Expressions ===

    pub fn expr(&mut self, kind: ExprKind) -> ExprId {
        let span = self.span();
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    pub fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    pub fn int(&mut self, value: u64) -> ExprId {
        self.expr(ExprKind::int(value))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.expr(ExprKind::float(value))
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Bool(value))
    }

    pub fn ident(&mut self, text: &str) -> ExprId {
        let name = self.name(text);
        self.expr(ExprKind::Ident(name))
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    pub fn call(&mut self, callee: &str, args: &[ExprId]) -> ExprId {
        let func = self.ident(callee);
        let args = self.arena.alloc_expr_list(args.iter().copied());
        self.expr(ExprKind::Call { func, args })
    }

    pub fn construct(&mut self, tag: &str, args: &[ExprId]) -> ExprId {
        let name = self.name(tag);
        let args = self.arena.alloc_expr_list(args.iter().copied());
        self.expr(ExprKind::Construct { name, args })
    }

    pub fn block(&mut self, items: &[ExprId]) -> ExprId {
        let items = self.arena.alloc_expr_list(items.iter().copied());
        self.expr(ExprKind::Block(items))
    }

    pub fn let_(&mut self, name: &str, init: ExprId) -> ExprId {
        let name = self.name(name);
        self.expr(ExprKind::Let {
            name,
            ty: None,
            init,
        })
    }

    pub fn tuple(&mut self, elems: &[ExprId]) -> ExprId {
        let elems = self.arena.alloc_expr_list(elems.iter().copied());
        self.expr(ExprKind::Tuple(elems))
    }

    pub fn match_(&mut self, scrutinee: ExprId, arms: &[(MatchPatternId, ExprId)]) -> ExprId {
        let arms: Vec<MatchArm> = arms
            .iter()
            .map(|&(pattern, body)| MatchArm {
                pattern,
                body,
                span: self.arena.get_expr(body).span,
            })
            .collect();
        let arms: ArmRange = self.arena.alloc_arms(arms);
        self.expr(ExprKind::Match { scrutinee, arms })
    }

    // === Patterns ===

    pub fn tag_pattern(&mut self, tag: &str, inner: &[MatchPatternId]) -> MatchPatternId {
        let name = self.name(tag);
        let inner = self.arena.alloc_pattern_list(inner.iter().copied());
        self.arena.alloc_pattern(MatchPattern::Tag { name, inner })
    }

    pub fn binding(&mut self, name: &str) -> MatchPatternId {
        let name = self.name(name);
        self.arena.alloc_pattern(MatchPattern::Binding(name))
    }

    pub fn wildcard(&mut self) -> MatchPatternId {
        self.arena.alloc_pattern(MatchPattern::Wildcard)
    }

    // === Types ===

    pub fn ty(&mut self, name: &str, args: &[ParsedTypeId]) -> ParsedTypeId {
        let name = self.name(name);
        self.arena.alloc_parsed_type(ParsedType::Named {
            name,
            args: args.to_vec(),
        })
    }

    pub fn ty_var(&mut self, name: &str) -> ParsedTypeId {
        let name = self.name(name);
        self.arena.alloc_parsed_type(ParsedType::Var(name))
    }

    pub fn ty_ptr(&mut self, pointee: ParsedTypeId) -> ParsedTypeId {
        self.arena.alloc_parsed_type(ParsedType::Ptr(pointee))
    }

    // === Declarations ===

    /// `fun name params = body`, every parameter unannotated.
    pub fn function(&mut self, name: &str, params: &[&str], body: ExprId) -> &mut FunctionDecl {
        let params: Vec<(&str, Option<ParsedTypeId>)> = params.iter().map(|&p| (p, None)).collect();
        self.function_typed(name, &params, None, Some(body))
    }

    pub fn function_typed(
        &mut self,
        name: &str,
        params: &[(&str, Option<ParsedTypeId>)],
        ret: Option<ParsedTypeId>,
        body: Option<ExprId>,
    ) -> &mut FunctionDecl {
        let params: Vec<Param> = params
            .iter()
            .map(|&(param, ty)| Param {
                name: self.name(param),
                ty,
                span: Span::DUMMY,
            })
            .collect();
        let span = self.span();
        let decl = FunctionDecl {
            name: self.name(name),
            params: self.arena.alloc_params(params),
            ret,
            given: Vec::new(),
            is_meta: false,
            is_variadic: false,
            body,
            span,
        };
        self.module.functions.push(decl);
        let last = self.module.functions.len() - 1;
        &mut self.module.functions[last]
    }

    pub fn given(&mut self, trait_name: &str, args: &[ParsedTypeId]) -> GivenBound {
        GivenBound {
            trait_name: self.name(trait_name),
            args: args.to_vec(),
            span: Span::DUMMY,
        }
    }

    /// A sum whose tags have positional fields.
    pub fn sum(&mut self, name: &str, params: &[&str], tags: &[(&str, Vec<ParsedTypeId>)]) {
        let tags = tags
            .iter()
            .map(|(tag, fields)| TagDecl {
                name: self.name(tag),
                fields: fields
                    .iter()
                    .map(|&ty| FieldDecl {
                        name: None,
                        ty,
                        span: Span::DUMMY,
                    })
                    .collect(),
                span: Span::DUMMY,
            })
            .collect();
        let decl = TypeDecl {
            name: self.name(name),
            type_params: params.iter().map(|p| self.name(p)).collect(),
            kind: TypeDeclKind::Sum(tags),
            span: Span::DUMMY,
        };
        self.module.types.push(decl);
    }

    /// A product with named fields.
    pub fn product(&mut self, name: &str, params: &[&str], fields: &[(&str, ParsedTypeId)]) {
        let fields = fields
            .iter()
            .map(|&(field, ty)| FieldDecl {
                name: Some(self.name(field)),
                ty,
                span: Span::DUMMY,
            })
            .collect();
        let decl = TypeDecl {
            name: self.name(name),
            type_params: params.iter().map(|p| self.name(p)).collect(),
            kind: TypeDeclKind::Product(fields),
            span: Span::DUMMY,
        };
        self.module.types.push(decl);
    }

    // === Checking ===

    pub fn check(&self) -> (TypedModule, Vec<Diagnostic>) {
        self.check_with(&CheckConfig::default())
    }

    pub fn check_with(&self, config: &CheckConfig) -> (TypedModule, Vec<Diagnostic>) {
        init_tracing();
        let capture = Capture::default();
        let mut sink = DiagnosticSink::with_emitter(capture.clone());
        let typed = check_module(&self.module, &self.arena, &self.interner, config, &mut sink);
        sink.finish();
        (typed, capture.take())
    }

    /// The printed type of top-level function `name`.
    pub fn fn_type(&self, typed: &TypedModule, name: &str) -> String {
        let ty = typed.function_type(self.name(name)).unwrap_or(Idx::ERROR);
        typed.pool.format_type(ty, &self.interner)
    }
}
