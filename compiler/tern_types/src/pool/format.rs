//! Type formatting for error messages and debugging.
//!
//! A type renders as a sequence of pieces: literal text and child types.
//! Rendering one type flattens the pieces; rendering a pair walks both
//! piece lists together so the structure two types share can be colored
//! apart from the places they differ.

use rustc_hash::{FxHashMap, FxHashSet};
use tern_diagnostic::emitter::colors;
use tern_ir::StringLookup;

use super::{Pool, TypeView, VarKind};
use crate::{Idx, Tag};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Piece {
    Text(String),
    Child(Idx),
}

/// Display names for fresh type variables: `'a`, `'b`, ... in order of
/// first appearance, skipping names user variables already use.
#[derive(Debug, Default)]
pub struct VarNamer {
    assigned: FxHashMap<Idx, String>,
    reserved: FxHashSet<String>,
    next: u32,
}

impl VarNamer {
    /// A namer that will not hand out any of the named variables in
    /// `types`.
    pub fn for_types(pool: &Pool, names: &dyn StringLookup, types: &[Idx]) -> Self {
        let mut namer = VarNamer::default();
        for &ty in types {
            for var in pool.collect_vars(ty) {
                if let Some(VarKind::Named(name)) = pool.var_kind(var) {
                    namer.reserved.insert(names.lookup(name).to_owned());
                }
            }
        }
        namer
    }

    fn name_for(&mut self, var: Idx) -> String {
        if let Some(name) = self.assigned.get(&var) {
            return name.clone();
        }
        let name = loop {
            let n = self.next;
            self.next += 1;
            #[allow(clippy::cast_possible_truncation, reason = "n % 26 fits in a byte")]
            let letter = char::from(b'a' + (n % 26) as u8);
            let candidate = if n < 26 {
                letter.to_string()
            } else {
                format!("{letter}{}", n / 26)
            };
            if !self.reserved.contains(&candidate) {
                break candidate;
            }
        };
        self.assigned.insert(var, name.clone());
        name
    }
}

/// Renders types to text, optionally with ANSI colors.
pub struct TypeFormatter<'a> {
    pool: &'a Pool,
    names: &'a dyn StringLookup,
    namer: VarNamer,
    color: bool,
}

impl<'a> TypeFormatter<'a> {
    /// A formatter for `types`: fresh variables are named consistently
    /// across every type it renders.
    pub fn new(pool: &'a Pool, names: &'a dyn StringLookup, types: &[Idx]) -> Self {
        TypeFormatter {
            pool,
            names,
            namer: VarNamer::for_types(pool, names, types),
            color: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn format(&mut self, ty: Idx) -> String {
        let mut out = String::new();
        self.write_plain(ty, &mut out);
        out
    }

    /// Render two types, coloring shared structure dim and differing
    /// subtrees red when color is on.
    pub fn format_pair(&mut self, a: Idx, b: Idx) -> (String, String) {
        let mut out_a = String::new();
        let mut out_b = String::new();
        self.write_pair(a, b, &mut out_a, &mut out_b);
        (out_a, out_b)
    }

    fn write_plain(&mut self, ty: Idx, out: &mut String) {
        for piece in self.pieces(ty) {
            match piece {
                Piece::Text(text) => out.push_str(&text),
                Piece::Child(child) => self.write_plain(child, out),
            }
        }
    }

    fn write_colored(&mut self, ty: Idx, color: &str, out: &mut String) {
        if self.color {
            out.push_str(color);
            self.write_plain(ty, out);
            out.push_str(colors::RESET);
        } else {
            self.write_plain(ty, out);
        }
    }

    fn push_text(&self, text: &str, color: &str, out: &mut String) {
        if self.color && !text.is_empty() {
            out.push_str(color);
            out.push_str(text);
            out.push_str(colors::RESET);
        } else {
            out.push_str(text);
        }
    }

    fn write_pair(&mut self, a: Idx, b: Idx, out_a: &mut String, out_b: &mut String) {
        if a == b {
            self.write_colored(a, colors::SHARED, out_a);
            self.write_colored(b, colors::SHARED, out_b);
            return;
        }
        let pieces_a = self.pieces(a);
        let pieces_b = self.pieces(b);
        let same_head = pieces_a.len() == pieces_b.len()
            && pieces_a.iter().zip(&pieces_b).all(|pair| match pair {
                (Piece::Text(x), Piece::Text(y)) => x == y,
                (Piece::Child(_), Piece::Child(_)) => true,
                _ => false,
            });
        if !same_head {
            self.write_colored(a, colors::DIFFERS, out_a);
            self.write_colored(b, colors::DIFFERS, out_b);
            return;
        }
        for (pa, pb) in pieces_a.into_iter().zip(pieces_b) {
            match (pa, pb) {
                (Piece::Child(ca), Piece::Child(cb)) => self.write_pair(ca, cb, out_a, out_b),
                (Piece::Text(text), _) => {
                    self.push_text(&text, colors::SHARED, out_a);
                    self.push_text(&text, colors::SHARED, out_b);
                }
                (Piece::Child(_), Piece::Text(_)) => {}
            }
        }
    }

    /// Whether `ty` needs parentheses in argument position.
    fn needs_parens(&self, ty: Idx) -> bool {
        match self.pool.tag(ty) {
            Tag::Function | Tag::Modified => true,
            Tag::Product | Tag::Sum | Tag::Trait => !self.pool.nominal_args(ty).is_empty(),
            _ => false,
        }
    }

    fn push_atom(&self, ty: Idx, pieces: &mut Vec<Piece>) {
        if self.needs_parens(ty) {
            pieces.push(Piece::Text("(".into()));
            pieces.push(Piece::Child(ty));
            pieces.push(Piece::Text(")".into()));
        } else {
            pieces.push(Piece::Child(ty));
        }
    }

    fn push_list(pieces: &mut Vec<Piece>, items: &[Idx]) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                pieces.push(Piece::Text(", ".into()));
            }
            pieces.push(Piece::Child(item));
        }
    }

    fn pieces(&mut self, ty: Idx) -> Vec<Piece> {
        let mut pieces = Vec::new();
        match self.pool.view(ty) {
            TypeView::Primitive(Tag::Error) => pieces.push(Piece::Text("<error>".into())),
            TypeView::Primitive(tag) => pieces.push(Piece::Text(tag.name().into())),
            TypeView::Ptr(inner) => {
                pieces.push(Piece::Text("*".into()));
                self.push_atom(inner, &mut pieces);
            }
            TypeView::Array { elem, len } => {
                pieces.push(Piece::Text("[".into()));
                pieces.push(Piece::Child(elem));
                pieces.push(Piece::Text(match len {
                    Some(n) => format!("; {n}]"),
                    None => "]".into(),
                }));
            }
            TypeView::Tuple(elems) => {
                pieces.push(Piece::Text("(".into()));
                Self::push_list(&mut pieces, &elems);
                pieces.push(Piece::Text(")".into()));
            }
            TypeView::Function(sig) => {
                pieces.push(Piece::Text(if sig.is_meta { "meta (" } else { "(" }.into()));
                Self::push_list(&mut pieces, &sig.params);
                if sig.is_variadic {
                    let dots = if sig.params.is_empty() { "..." } else { ", ..." };
                    pieces.push(Piece::Text(dots.into()));
                }
                pieces.push(Piece::Text(") -> ".into()));
                pieces.push(Piece::Child(sig.ret));
                if !sig.constraints.is_empty() {
                    pieces.push(Piece::Text(" given ".into()));
                    Self::push_list(&mut pieces, &sig.constraints);
                }
            }
            TypeView::Var(VarKind::Named(name)) => {
                pieces.push(Piece::Text(format!("'{}", self.names.lookup(name))));
            }
            TypeView::Var(VarKind::Fresh(_)) => {
                pieces.push(Piece::Text(format!("'{}", self.namer.name_for(ty))));
            }
            TypeView::Product { name, args } | TypeView::Sum { name, args } => {
                pieces.push(Piece::Text(self.names.lookup(name).to_owned()));
                for arg in args {
                    pieces.push(Piece::Text(" ".into()));
                    self.push_atom(arg, &mut pieces);
                }
            }
            TypeView::Trait { name, self_ty, args } => {
                pieces.push(Piece::Text(self.names.lookup(name).to_owned()));
                for arg in std::iter::once(self_ty).chain(args) {
                    pieces.push(Piece::Text(" ".into()));
                    self.push_atom(arg, &mut pieces);
                }
            }
            TypeView::Modified { modifier, base } => {
                pieces.push(Piece::Text(format!("{} ", modifier.keyword())));
                pieces.push(Piece::Child(base));
            }
        }
        pieces
    }
}

impl Pool {
    /// Render a type without color.
    pub fn format_type(&self, ty: Idx, names: &dyn StringLookup) -> String {
        TypeFormatter::new(self, names, &[ty]).format(ty)
    }
}
