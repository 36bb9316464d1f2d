use super::*;
use crate::TypeFlags;
use pretty_assertions::assert_eq;
use tern_ir::StringInterner;

#[test]
fn primitives_at_fixed_indices() {
    let pool = Pool::new();
    assert_eq!(pool.len(), Idx::PRIMITIVE_COUNT as usize);
    for &tag in Tag::primitives() {
        assert_eq!(pool.tag(pool.primitive(tag)), tag);
    }
    assert_eq!(pool.primitive(Tag::Bool), Idx::BOOL);
    assert!(pool.flags(Idx::ERROR).has_errors());
    assert!(pool.flags(Idx::I32).contains(TypeFlags::IS_PRIMITIVE));
}

#[test]
fn structural_requests_are_uniqued() {
    let mut pool = Pool::new();
    let a = pool.ptr(Idx::I32);
    let b = pool.ptr(Idx::I32);
    assert_eq!(a, b);
    assert_ne!(a, pool.ptr(Idx::I64));

    let t1 = pool.tuple(&[Idx::I32, Idx::BOOL]);
    let t2 = pool.tuple(&[Idx::I32, Idx::BOOL]);
    assert_eq!(t1, t2);

    let f1 = pool.function(Idx::BOOL, &[Idx::I32], &[], false);
    let f2 = pool.function(Idx::BOOL, &[Idx::I32], &[], false);
    let meta = pool.function(Idx::BOOL, &[Idx::I32], &[], true);
    assert_eq!(f1, f2);
    assert_ne!(f1, meta);
}

#[test]
fn empty_tuple_is_unit() {
    let mut pool = Pool::new();
    assert_eq!(pool.tuple(&[]), Idx::UNIT);
}

#[test]
fn array_length_is_part_of_identity() {
    let mut pool = Pool::new();
    let sized = pool.array(Idx::U8, Some(4));
    let big = pool.array(Idx::U8, Some(u64::from(u32::MAX) + 7));
    let unsized_ = pool.array(Idx::U8, None);
    assert_ne!(sized, unsized_);
    assert_eq!(pool.view(big), TypeView::Array { elem: Idx::U8, len: Some(u64::from(u32::MAX) + 7) });
    assert_eq!(pool.aggregate(Tag::Array, &[Idx::U8]), unsized_);
}

#[test]
fn generic_flag_propagates() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let t = pool.type_var(interner.intern("t"));
    let ptr = pool.ptr(t);
    let tuple = pool.tuple(&[Idx::I32, ptr]);
    assert!(pool.is_generic(t));
    assert!(pool.is_generic(tuple));
    let concrete = pool.ptr(Idx::I32);
    assert!(!pool.is_generic(concrete));
    assert!(pool.flags(t).contains(TypeFlags::IS_VAR));
    assert!(!pool.flags(tuple).contains(TypeFlags::IS_VAR));
}

#[test]
fn match_weight_counts_nodes() {
    let mut pool = Pool::new();
    assert_eq!(pool.match_weight(Idx::I32), 1);
    let ptr = pool.ptr(Idx::I32);
    assert_eq!(pool.match_weight(ptr), 2);
    let pair = pool.tuple(&[ptr, Idx::BOOL]);
    assert_eq!(pool.match_weight(pair), 4);
    let mutable = pool.modified(Modifier::Mut, pair);
    assert_eq!(pool.match_weight(mutable), 4);
}

#[test]
fn named_vars_are_uniqued_fresh_vars_are_not() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let t = interner.intern("t");
    assert_eq!(pool.type_var(t), pool.type_var(t));
    let a = pool.fresh_var();
    let b = pool.fresh_var();
    assert_ne!(a, b);
    let named = pool.type_var(t);
    assert_eq!(pool.var_kind(named), Some(VarKind::Named(t)));
}

#[test]
fn function_view_roundtrips() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let t = pool.type_var(interner.intern("t"));
    let add = pool.trait_type(interner.intern("Add"), t, &[]);
    let f = pool.function(t, &[t, t], &[add], false);
    let sig = pool.fn_sig(f).unwrap();
    assert_eq!(sig.ret, t);
    assert_eq!(sig.params.as_slice(), &[t, t]);
    assert_eq!(sig.constraints.as_slice(), &[add]);
    assert!(!sig.is_variadic);
    assert_eq!(pool.children(f).as_slice(), &[t, t, t, add]);
    assert_eq!(pool.function_sig(&sig), f);
}

// === Modifiers ===

#[test]
fn modifiers_do_not_change_base_identity() {
    let mut pool = Pool::new();
    let base = pool.ptr(Idx::I32);
    let m = pool.modified(Modifier::Mut, base);
    assert_ne!(m, base);
    assert_eq!(pool.strip_modifiers(m), base);
    assert_eq!(pool.ptr(Idx::I32), base);
    assert_eq!(pool.modified(Modifier::Mut, base), m);
}

#[test]
fn modified_constituents_share_the_core_identity() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let mut_i32 = pool.modified(Modifier::Mut, Idx::I32);
    assert_eq!(pool.ptr(mut_i32), pool.ptr(Idx::I32));
    assert_eq!(pool.tuple(&[mut_i32, Idx::BOOL]), pool.tuple(&[Idx::I32, Idx::BOOL]));
    assert_eq!(
        pool.function(mut_i32, &[mut_i32], &[], false),
        pool.function(Idx::I32, &[Idx::I32], &[], false)
    );
    let eq = interner.intern("Eq");
    assert_eq!(pool.trait_type(eq, mut_i32, &[]), pool.trait_type(eq, Idx::I32, &[]));
}

#[test]
fn strip_is_idempotent() {
    let mut pool = Pool::new();
    let g = pool.modified(Modifier::Global, Idx::I64);
    let gm = pool.modified(Modifier::Mut, g);
    let once = pool.strip_modifiers(gm);
    assert_eq!(once, Idx::I64);
    assert_eq!(pool.strip_modifiers(once), once);
}

#[test]
fn duplicate_modifier_is_noop() {
    let mut pool = Pool::new();
    let m = pool.modified(Modifier::Comptime, Idx::I32);
    assert_eq!(pool.modified(Modifier::Comptime, m), m);
}

#[test]
fn const_after_mut_keeps_mut() {
    let mut pool = Pool::new();
    let m = pool.modified(Modifier::Mut, Idx::I32);
    let mc = pool.modified(Modifier::Const, m);
    assert_eq!(mc, m);
    assert!(pool.has_modifier(mc, Modifier::Mut));
    assert!(!pool.has_modifier(mc, Modifier::Const));
}

#[test]
fn mut_replaces_const() {
    let mut pool = Pool::new();
    let c = pool.modified(Modifier::Const, Idx::I32);
    let g = pool.modified(Modifier::Global, c);
    let m = pool.modified(Modifier::Mut, g);
    assert_eq!(pool.modifiers(m).as_slice(), &[Modifier::Mut, Modifier::Global]);
    assert_eq!(pool.strip_modifiers(m), Idx::I32);
}

// === Nominal types and variants ===

struct Maybe {
    sum: Idx,
    some: Idx,
    none: Idx,
}

fn declare_maybe(pool: &mut Pool, interner: &StringInterner) -> Maybe {
    let t = interner.intern("t");
    let sum = pool.declare_sum(interner.intern("Maybe"), &[t]).unwrap();
    let some = pool.declare_product(interner.intern("Some"), &[t]).unwrap();
    let none = pool.declare_product(interner.intern("None"), &[t]).unwrap();
    let t_var = pool.type_var(t);
    pool.define_product_body(some, vec![t_var], vec![Some(interner.intern("value"))])
        .unwrap();
    pool.define_product_body(none, vec![], vec![]).unwrap();
    pool.define_sum_tags(sum, vec![some, none]).unwrap();
    Maybe { sum, some, none }
}

#[test]
fn tags_know_their_sum() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    assert_eq!(pool.product_body(maybe.some).unwrap().parent_sum, Some(maybe.sum));
    assert_eq!(pool.sum_body(maybe.sum).unwrap().tags, vec![maybe.some, maybe.none]);
}

#[test]
fn redeclaration_is_rejected() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let name = interner.intern("Point");
    pool.declare_product(name, &[]).unwrap();
    assert_eq!(pool.declare_product(name, &[]), Err(PoolError::Redeclared(name)));
}

#[test]
fn variants_are_cached() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);

    let first = pool.instantiate_nominal(maybe.sum, &[Idx::I32]).unwrap();
    let second = pool.instantiate_nominal(maybe.sum, &[Idx::I32]).unwrap();
    assert_eq!(first, second);
    assert!(!pool.is_generic(first));

    let count = pool.variants().len();
    pool.instantiate_nominal(maybe.sum, &[Idx::I32]).unwrap();
    assert_eq!(pool.variants().len(), count);
}

#[test]
fn identity_args_return_declaration() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    let t = pool.type_var(interner.intern("t"));
    assert_eq!(pool.instantiate_nominal(maybe.sum, &[t]).unwrap(), maybe.sum);
}

#[test]
fn tag_variant_binds_matching_sum_variant() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);

    let some_i32 = pool.instantiate_nominal(maybe.some, &[Idx::I32]).unwrap();
    let body = pool.product_body(some_i32).unwrap().clone();
    assert_eq!(body.fields, vec![Idx::I32]);
    assert_eq!(body.field_names, vec![Some(interner.intern("value"))]);

    let maybe_i32 = pool.instantiate_nominal(maybe.sum, &[Idx::I32]).unwrap();
    assert_eq!(body.parent_sum, Some(maybe_i32));
    let tags = pool.sum_body(maybe_i32).unwrap().tags.clone();
    assert_eq!(tags[0], some_i32);
    assert_eq!(pool.nominal_decl(tags[1]), Some(maybe.none));
}

#[test]
fn explicit_variant_keeps_bound_parent() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    let maybe_bool = pool.instantiate_nominal(maybe.sum, &[Idx::BOOL]).unwrap();
    let some_bool = pool.instantiate_nominal(maybe.some, &[Idx::BOOL]).unwrap();
    let again = pool.get_or_create_variant(maybe.some, &[Idx::BOOL], &[Idx::BOOL]).unwrap();
    assert_eq!(again, some_bool);
    assert_eq!(pool.product_body(some_bool).unwrap().parent_sum, Some(maybe_bool));
}

#[test]
fn wrong_argument_count_is_an_error() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    assert_eq!(
        pool.instantiate_nominal(maybe.sum, &[Idx::I32, Idx::BOOL]),
        Err(PoolError::ArgCount { expected: 1, found: 2 })
    );
}

#[test]
fn substituted_types_materialize_on_demand() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    let t = pool.type_var(interner.intern("t"));
    let some_t = maybe.some;
    let some_u8 = pool.replace_var(some_t, t, Idx::U8);
    assert!(pool.product_body(some_u8).is_none());
    assert_eq!(pool.materialize(some_u8).unwrap(), some_u8);
    assert_eq!(pool.product_body(some_u8).unwrap().fields, vec![Idx::U8]);
}

#[test]
fn field_lookup_finds_declared_products() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    assert_eq!(pool.products_with_field(interner.intern("value")), vec![maybe.some]);
    assert!(pool.products_with_field(interner.intern("nope")).is_empty());
}

#[test]
fn clearing_declared_types_allows_redeclaration() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    pool.instantiate_nominal(maybe.sum, &[Idx::I32]).unwrap();
    let before = pool.len();

    pool.clear_declared_types();
    assert_eq!(pool.declared_type(interner.intern("Maybe")), None);
    assert!(pool.variants().is_empty());
    assert_eq!(pool.len(), before);

    let again = declare_maybe(&mut pool, &interner);
    assert_eq!(again.sum, maybe.sum);
}

// === Transforms ===

#[test]
fn occurs_finds_nested_vars() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let t = pool.type_var(interner.intern("t"));
    let u = pool.type_var(interner.intern("u"));
    let nested = pool.ptr(t);
    let nested = pool.tuple(&[Idx::I32, nested]);
    assert!(pool.occurs(t, nested));
    assert!(!pool.occurs(u, nested));
    assert!(pool.occurs(t, t));
}

#[test]
fn collect_vars_in_order_of_appearance() {
    let mut pool = Pool::new();
    let a = pool.fresh_var();
    let b = pool.fresh_var();
    let f = pool.function(a, &[b, a], &[], false);
    assert_eq!(pool.collect_vars(f), vec![a, b]);
}

#[test]
fn replace_var_rebuilds_only_generic_parts() {
    let mut pool = Pool::new();
    let a = pool.fresh_var();
    let pair = pool.tuple(&[a, Idx::BOOL]);
    let replaced = pool.replace_var(pair, a, Idx::I32);
    assert_eq!(replaced, pool.tuple(&[Idx::I32, Idx::BOOL]));
    assert_eq!(pool.replace_var(Idx::I64, a, Idx::I32), Idx::I64);
}

#[test]
fn instantiate_fresh_keeps_sharing() {
    let mut pool = Pool::new();
    let a = pool.fresh_var();
    let f = pool.function(a, &[a], &[], false);
    let g = pool.instantiate_fresh(f);
    assert_ne!(f, g);
    let sig = pool.fn_sig(g).unwrap();
    assert_eq!(sig.ret, sig.params[0]);
    assert_ne!(sig.ret, a);
}

// === Formatting ===

#[test]
fn formats_structural_types() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let ptr = pool.ptr(Idx::C8);
    let arr = pool.array(Idx::I32, Some(3));
    let tuple = pool.tuple(&[ptr, arr]);
    assert_eq!(pool.format_type(tuple, &interner), "(*c8, [i32; 3])");
    let f = pool.function_variadic(Idx::I32, &[ptr], false);
    assert_eq!(pool.format_type(f, &interner), "(*c8, ...) -> i32");
    let m = pool.modified(Modifier::Mut, Idx::I32);
    assert_eq!(pool.format_type(m, &interner), "mut i32");
    assert_eq!(pool.format_type(Idx::ERROR, &interner), "<error>");
}

#[test]
fn fresh_vars_get_letters_avoiding_named_ones() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let named = pool.type_var(interner.intern("a"));
    let fresh = pool.fresh_var();
    let add = pool.trait_type(interner.intern("Add"), fresh, &[]);
    let f = pool.function(fresh, &[named, fresh], &[add], false);
    assert_eq!(pool.format_type(f, &interner), "('a, 'b) -> 'b given Add 'b");
}

#[test]
fn nominal_args_are_parenthesized() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let maybe = declare_maybe(&mut pool, &interner);
    let inner = pool.instantiate_nominal(maybe.sum, &[Idx::I32]).unwrap();
    let outer = pool.instantiate_nominal(maybe.sum, &[inner]).unwrap();
    assert_eq!(pool.format_type(outer, &interner), "Maybe (Maybe i32)");
}

#[test]
fn pair_formatting_without_color_is_plain() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let a = pool.tuple(&[Idx::I32, Idx::BOOL]);
    let b = pool.tuple(&[Idx::F64, Idx::BOOL]);
    let mut formatter = TypeFormatter::new(&pool, &interner, &[a, b]);
    assert_eq!(
        formatter.format_pair(a, b),
        ("(i32, bool)".to_owned(), "(f64, bool)".to_owned())
    );
}

#[test]
fn pair_formatting_colors_differences() {
    let interner = StringInterner::new();
    let mut pool = Pool::new();
    let a = pool.ptr(Idx::I32);
    let b = pool.ptr(Idx::F64);
    let mut formatter = TypeFormatter::new(&pool, &interner, &[a, b]).with_color(true);
    let (left, _) = formatter.format_pair(a, b);
    assert_eq!(left, "\x1b[2m*\x1b[0m\x1b[1;31mi32\x1b[0m");
}
