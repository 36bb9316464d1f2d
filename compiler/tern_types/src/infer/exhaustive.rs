//! Match coverage.
//!
//! Coverage is decided from the patterns alone, so a match is checked
//! even when its scrutinee's type is still unknown. Sum tags are counted
//! as covered only by an arm whose sub-patterns are all irrefutable; a
//! refutable sub-pattern leaves its tag open.

use tern_ir::{ExprArena, ExprKind, MatchArm, MatchPattern, MatchPatternId, StringInterner};

use crate::Pool;

/// Patterns not covered by `arms`, in a printable form. Empty means the
/// match is exhaustive.
pub fn missing_patterns(
    pool: &Pool,
    arena: &ExprArena,
    interner: &StringInterner,
    arms: &[MatchArm],
) -> Vec<String> {
    let patterns: Vec<MatchPattern> = arms.iter().map(|arm| *arena.get_pattern(arm.pattern)).collect();
    if patterns.iter().any(MatchPattern::is_catch_all) {
        return Vec::new();
    }

    if let Some(first_tag) = patterns.iter().find_map(|p| match p {
        MatchPattern::Tag { name, .. } => Some(*name),
        _ => None,
    }) {
        return missing_tags(pool, arena, interner, first_tag, &patterns);
    }

    let bools: Vec<bool> = patterns
        .iter()
        .filter_map(|p| match p {
            MatchPattern::Literal(lit) => match arena.get_expr(*lit).kind {
                ExprKind::Bool(value) => Some(value),
                _ => None,
            },
            _ => None,
        })
        .collect();
    if !bools.is_empty() {
        return [true, false]
            .into_iter()
            .filter(|value| !bools.contains(value))
            .map(|value| value.to_string())
            .collect();
    }

    let has_unit = patterns.iter().any(|p| {
        matches!(p, MatchPattern::Literal(lit) if arena.get_expr(*lit).kind == ExprKind::Unit)
    });
    let has_full_tuple = patterns
        .iter()
        .any(|p| matches!(p, MatchPattern::Tuple(_)) && is_irrefutable(arena, p));
    if has_unit || has_full_tuple {
        Vec::new()
    } else {
        vec!["_".to_owned()]
    }
}

/// Tags of the sum `first_tag` belongs to that no arm covers, in
/// declaration order. A product matched by name has one "tag": itself.
fn missing_tags(
    pool: &Pool,
    arena: &ExprArena,
    interner: &StringInterner,
    first_tag: tern_ir::Name,
    patterns: &[MatchPattern],
) -> Vec<String> {
    let covered: Vec<tern_ir::Name> = patterns
        .iter()
        .filter_map(|p| match p {
            MatchPattern::Tag { name, .. } if is_irrefutable(arena, p) => Some(*name),
            _ => None,
        })
        .collect();

    let Some(decl) = pool.declared_type(first_tag) else {
        // Undeclared tags are reported when the pattern is checked.
        return Vec::new();
    };
    let tags = match pool.product_body(decl).and_then(|body| body.parent_sum) {
        Some(sum) => pool
            .sum_body(sum)
            .map(|body| body.tags.clone())
            .unwrap_or_default(),
        None => vec![decl],
    };

    tags.into_iter()
        .filter_map(|tag| {
            let name = pool.nominal_name(tag)?;
            if covered.contains(&name) {
                return None;
            }
            let arity = pool.product_body(tag).map_or(0, |body| body.fields.len());
            let text = interner.lookup(name);
            Some(if arity == 0 {
                text.to_owned()
            } else {
                format!("{text}({})", vec!["_"; arity].join(", "))
            })
        })
        .collect()
}

/// Whether the sub-patterns of `pattern` match every value: bindings,
/// wildcards and tuples of those.
fn is_irrefutable(arena: &ExprArena, pattern: &MatchPattern) -> bool {
    let all = |ids: &[MatchPatternId]| {
        ids.iter()
            .all(|&id| sub_irrefutable(arena, arena.get_pattern(id)))
    };
    match pattern {
        MatchPattern::Wildcard | MatchPattern::Binding(_) => true,
        MatchPattern::Literal(_) => false,
        MatchPattern::Tuple(inner) | MatchPattern::Tag { inner, .. } => {
            all(arena.get_pattern_list(*inner))
        }
    }
}

/// Irrefutability below the top level, where a nested tag counts as
/// refutable.
fn sub_irrefutable(arena: &ExprArena, pattern: &MatchPattern) -> bool {
    match pattern {
        MatchPattern::Tag { .. } => false,
        _ => is_irrefutable(arena, pattern),
    }
}
