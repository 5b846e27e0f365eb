use super::*;
use crate::class::{Access, BaseSpec};
use crate::types::Quals;

fn class(tree: &mut Tree) -> NodeId {
    tree.make_class_type(NodeKind::RecordType, None)
}

/// `Base` and `Derived : Base`.
fn hierarchy(tree: &mut Tree) -> (NodeId, NodeId) {
    let base = class(tree);
    let derived = class(tree);
    tree.xref_basetypes(
        derived,
        &[BaseSpec {
            class: base,
            access: Access::Public,
            is_virtual: false,
        }],
    );
    (base, derived)
}

fn type_parm(tree: &mut Tree, index: u32) -> NodeId {
    let idx = tree.build_template_parm_index(index, 1, 1, None, None);
    tree.make_template_parm_type(NodeKind::TemplateTypeParm, idx)
}

#[test]
fn builtins_compare_by_identity() {
    let tree = Tree::new();
    assert!(tree.same_type(NodeId::INT_TYPE, NodeId::INT_TYPE));
    assert!(!tree.same_type(NodeId::INT_TYPE, NodeId::LONG_TYPE));
    assert!(!tree.same_type(NodeId::INT_TYPE, NodeId::UNSIGNED_TYPE));
    assert!(!tree.comptypes(NodeId::ERROR_MARK, NodeId::INT_TYPE, CompareMode::STRUCTURAL));
    assert!(tree.same_type(NodeId::ERROR_MARK, NodeId::ERROR_MARK));
}

#[test]
fn qualifiers_matter_at_the_top_level_only_when_asked() {
    let mut tree = Tree::new();
    let c = tree.build_qualified_type(NodeId::INT_TYPE, Quals::CONST);
    let v = tree.build_qualified_type(NodeId::INT_TYPE, Quals::VOLATILE);

    assert!(!tree.same_type(c, NodeId::INT_TYPE));
    assert!(!tree.comptypes(c, v, CompareMode::STRUCTURAL));
    assert!(tree.same_type_ignoring_top_level_qualifiers(c, v));
    let again = tree.build_qualified_type(NodeId::INT_TYPE, Quals::CONST);
    assert!(tree.same_type(c, again));
}

#[test]
fn compound_types_compare_structurally() {
    let mut tree = Tree::new();
    let p_int = tree.build_pointer_type(NodeId::INT_TYPE);
    let p_long = tree.build_pointer_type(NodeId::LONG_TYPE);
    let f1 = tree.build_function_type(NodeId::VOID_TYPE, &[p_int]);
    let f2 = tree.build_function_type(NodeId::VOID_TYPE, &[p_long]);
    let f3 = tree.build_function_type(NodeId::VOID_TYPE, &[p_int, p_int]);

    for mode in [CompareMode::STRICT, CompareMode::STRUCTURAL] {
        assert!(tree.comptypes(f1, f1, mode));
        assert!(!tree.comptypes(f1, f2, mode));
        assert!(!tree.comptypes(f1, f3, mode));
        assert!(!tree.comptypes(p_int, p_long, mode));
    }
}

#[test]
fn equivalent_template_parms_are_the_same_type() {
    let mut tree = Tree::new();
    let first = type_parm(&mut tree, 0);
    let second = type_parm(&mut tree, 0);
    let other = type_parm(&mut tree, 1);

    assert!(tree.same_type(first, second));
    assert!(tree.comptypes(first, second, CompareMode::STRUCTURAL));
    assert!(!tree.same_type(first, other));
    assert!(!tree.comptypes(first, other, CompareMode::STRUCTURAL));

    let p1 = tree.build_pointer_type(first);
    let p2 = tree.build_pointer_type(second);
    assert!(tree.same_type(p1, p2));
    assert!(tree.comptypes(p1, p2, CompareMode::STRUCTURAL));
}

#[test]
fn distinct_classes_differ_strictly() {
    let mut tree = Tree::new();
    let (base, derived) = hierarchy(&mut tree);
    assert!(!tree.same_type(base, derived));
    assert!(!tree.comptypes(base, derived, CompareMode::STRUCTURAL));

    let e1 = tree.make_enum_type(None, Some(NodeId::INT_TYPE), false);
    let e2 = tree.make_enum_type(None, Some(NodeId::INT_TYPE), false);
    assert!(!tree.comptypes(e1, e2, CompareMode::STRUCTURAL));
}

#[test]
fn base_relaxation_goes_one_way() {
    let mut tree = Tree::new();
    let (base, derived) = hierarchy(&mut tree);

    assert!(tree.comptypes(derived, base, CompareMode::BASE));
    assert!(!tree.comptypes(base, derived, CompareMode::BASE));
    assert!(tree.comptypes(base, derived, CompareMode::DERIVED));
    assert!(!tree.comptypes(derived, base, CompareMode::DERIVED));
    assert!(tree.same_or_base_type(base, derived));
    assert!(tree.same_or_base_type(base, base));
    assert!(!tree.same_or_base_type(derived, base));
}

#[test]
fn base_relaxation_reaches_through_one_indirection() {
    let mut tree = Tree::new();
    let (base, derived) = hierarchy(&mut tree);
    let p_base = tree.build_pointer_type(base);
    let p_derived = tree.build_pointer_type(derived);
    let r_base = tree.build_reference_type(base, false);
    let r_derived = tree.build_reference_type(derived, false);
    let pp_base = tree.build_pointer_type(p_base);
    let pp_derived = tree.build_pointer_type(p_derived);

    assert!(tree.comptypes(p_derived, p_base, CompareMode::BASE));
    assert!(tree.comptypes(r_derived, r_base, CompareMode::BASE));
    assert!(!tree.comptypes(pp_derived, pp_base, CompareMode::BASE));
}

#[test]
fn base_relaxation_keeps_qualifiers() {
    let mut tree = Tree::new();
    let (base, derived) = hierarchy(&mut tree);
    let const_derived = tree.build_qualified_type(derived, Quals::CONST);
    let p_base = tree.build_pointer_type(base);
    let p_const_derived = tree.build_pointer_type(const_derived);

    assert!(!tree.comptypes(const_derived, base, CompareMode::BASE));
    assert!(!tree.comptypes(p_const_derived, p_base, CompareMode::BASE));
}

#[test]
fn redeclarations_may_drop_the_array_bound() {
    let mut tree = Tree::new();
    let known = tree.build_array_type(NodeId::INT_TYPE, Some(3));
    let other = tree.build_array_type(NodeId::INT_TYPE, Some(4));
    let unknown = tree.build_array_type(NodeId::INT_TYPE, None);

    assert!(!tree.same_type(known, unknown));
    assert!(tree.comptypes(unknown, known, CompareMode::REDECLARATION));
    assert!(tree.comptypes(known, unknown, CompareMode::REDECLARATION));
    assert!(!tree.comptypes(known, other, CompareMode::REDECLARATION));
}

#[test]
fn decltypes_compare_their_expressions() {
    let mut tree = Tree::new();
    let zero = tree.build_int_cst(NodeId::INT_TYPE, 0);
    let one = tree.build_int_cst(NodeId::INT_TYPE, 1);
    let d0 = tree.build_decltype_type(zero, false);
    let d1 = tree.build_decltype_type(one, false);
    let d0_id = tree.build_decltype_type(zero, true);

    let again = tree.build_decltype_type(zero, false);
    assert!(tree.same_type(d0, again));
    assert!(!tree.same_type(d0, d1));
    assert!(!tree.same_type(d0, d0_id));
}

#[test]
fn template_args_compare_types_structurally_and_values_by_identity() {
    let mut tree = Tree::new();
    let first = type_parm(&mut tree, 0);
    let second = type_parm(&mut tree, 0);
    let p1 = tree.build_pointer_type(first);
    let p2 = tree.build_pointer_type(second);
    let three = tree.build_int_cst(NodeId::INT_TYPE, 3);
    let also_three = tree.build_int_cst(NodeId::INT_TYPE, 3);

    let a = tree.build_tree_vec(&[Some(NodeId::INT_TYPE), Some(p1)]);
    let b = tree.build_tree_vec(&[Some(NodeId::INT_TYPE), Some(p2)]);
    let c = tree.build_tree_vec(&[Some(NodeId::INT_TYPE)]);
    let v1 = tree.build_tree_vec(&[Some(three)]);
    let v2 = tree.build_tree_vec(&[Some(also_three)]);

    assert!(tree.comp_template_args(a, b));
    assert!(!tree.comp_template_args(a, c));
    assert!(tree.comp_template_args(v1, v1));
    assert!(!tree.comp_template_args(v1, v2));
}

#[test]
fn innermost_matching_ignores_outer_levels() {
    let mut tree = Tree::new();
    let outer1 = tree.build_tree_vec(&[Some(NodeId::INT_TYPE)]);
    let outer2 = tree.build_tree_vec(&[Some(NodeId::CHAR_TYPE)]);
    let inner = tree.build_tree_vec(&[Some(NodeId::BOOL_TYPE)]);
    let a = tree.build_tree_vec(&[Some(outer1), Some(inner)]);
    let b = tree.build_tree_vec(&[Some(outer2), Some(inner)]);

    assert!(!tree.comp_template_args_matching(a, b, TmplArgsMatch::Exact));
    assert!(tree.comp_template_args_matching(a, b, TmplArgsMatch::Innermost));
    assert!(!tree.comp_template_args_matching(a, b, TmplArgsMatch::default()));
}
