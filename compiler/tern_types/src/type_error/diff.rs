//! Type diffing for specific problem identification.
//!
//! Turns a bare "expected X, found Y" into notes that say what is wrong:
//! an integer where a float was expected, a narrower integer, a pointer
//! one level off, a wrong element count.

use crate::{Idx, Pool, Tag, TypeView};

/// A specific problem identified by comparing two types.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeProblem {
    /// Mixing integer and float types; there is no implicit conversion.
    IntFloat {
        expected: &'static str,
        found: &'static str,
    },
    /// Two integer types of different width or signedness.
    IntWidth {
        expected: &'static str,
        found: &'static str,
    },
    /// Two float types of different width.
    FloatWidth {
        expected: &'static str,
        found: &'static str,
    },
    /// A pointer to the expected type, or the reverse.
    PointerLevel { found_is_pointer: bool },
    TupleArity { expected: usize, found: usize },
    FunctionArity { expected: usize, found: usize },
    /// Calling something that is not a function.
    NotCallable,
}

impl TypeProblem {
    pub fn note(&self) -> String {
        match self {
            TypeProblem::IntFloat { expected, found } => format!(
                "`{found}` and `{expected}` do not mix: integer and float types are never converted implicitly"
            ),
            TypeProblem::IntWidth { expected, found } => format!(
                "integer types `{found}` and `{expected}` differ; there is no implicit widening"
            ),
            TypeProblem::FloatWidth { expected, found } => {
                format!("float types `{found}` and `{expected}` differ; there is no implicit widening")
            }
            TypeProblem::PointerLevel {
                found_is_pointer: true,
            } => "found a pointer where its target type was expected; dereference it with `@`".into(),
            TypeProblem::PointerLevel {
                found_is_pointer: false,
            } => "expected a pointer to this value; take its address with `&`".into(),
            TypeProblem::TupleArity { expected, found } => {
                format!("expected a tuple of {expected} elements, found one of {found}")
            }
            TypeProblem::FunctionArity { expected, found } => {
                format!("expected a function of {expected} parameters, found one of {found}")
            }
            TypeProblem::NotCallable => "only functions can be called".into(),
        }
    }
}

/// Compare two types and identify specific problems, outermost first.
pub fn diff_types(pool: &Pool, expected: Idx, found: Idx) -> Vec<TypeProblem> {
    let mut problems = Vec::new();
    diff_types_inner(pool, expected, found, &mut problems);
    problems
}

fn diff_types_inner(pool: &Pool, expected: Idx, found: Idx, problems: &mut Vec<TypeProblem>) {
    let expected = pool.strip_modifiers(expected);
    let found = pool.strip_modifiers(found);
    if expected == found {
        return;
    }
    let (exp_tag, found_tag) = (pool.tag(expected), pool.tag(found));

    match (pool.view(expected), pool.view(found)) {
        (TypeView::Primitive(_), TypeView::Primitive(_)) => {
            let (e, f) = (exp_tag.name(), found_tag.name());
            if (exp_tag.is_int() && found_tag.is_float()) || (exp_tag.is_float() && found_tag.is_int()) {
                problems.push(TypeProblem::IntFloat { expected: e, found: f });
            } else if exp_tag.is_int() && found_tag.is_int() {
                problems.push(TypeProblem::IntWidth { expected: e, found: f });
            } else if exp_tag.is_float() && found_tag.is_float() {
                problems.push(TypeProblem::FloatWidth { expected: e, found: f });
            }
        }
        (TypeView::Ptr(inner), _) if inner == found => {
            problems.push(TypeProblem::PointerLevel {
                found_is_pointer: false,
            });
        }
        (_, TypeView::Ptr(inner)) if inner == expected => {
            problems.push(TypeProblem::PointerLevel {
                found_is_pointer: true,
            });
        }
        (TypeView::Ptr(e), TypeView::Ptr(f)) => diff_types_inner(pool, e, f, problems),
        (TypeView::Array { elem: e, .. }, TypeView::Array { elem: f, .. }) => {
            diff_types_inner(pool, e, f, problems);
        }
        (TypeView::Tuple(es), TypeView::Tuple(fs)) => {
            if es.len() == fs.len() {
                for (e, f) in es.into_iter().zip(fs) {
                    diff_types_inner(pool, e, f, problems);
                }
            } else {
                problems.push(TypeProblem::TupleArity {
                    expected: es.len(),
                    found: fs.len(),
                });
            }
        }
        (TypeView::Function(e), TypeView::Function(f)) => {
            if e.params.len() != f.params.len() && !(e.is_variadic || f.is_variadic) {
                problems.push(TypeProblem::FunctionArity {
                    expected: e.params.len(),
                    found: f.params.len(),
                });
            } else {
                for (ep, fp) in e.params.into_iter().zip(f.params) {
                    diff_types_inner(pool, ep, fp, problems);
                }
                diff_types_inner(pool, e.ret, f.ret, problems);
            }
        }
        (TypeView::Primitive(_) | TypeView::Ptr(_) | TypeView::Tuple(_), TypeView::Function(_))
            if exp_tag != Tag::Error =>
        {
            problems.push(TypeProblem::NotCallable);
        }
        (TypeView::Product { name: n1, args: a1 }, TypeView::Product { name: n2, args: a2 })
        | (TypeView::Sum { name: n1, args: a1 }, TypeView::Sum { name: n2, args: a2 })
            if n1 == n2 && a1.len() == a2.len() =>
        {
            for (e, f) in a1.into_iter().zip(a2) {
                diff_types_inner(pool, e, f, problems);
            }
        }
        _ => {}
    }
}
