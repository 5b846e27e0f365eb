use super::*;
use crate::flags::{CallExprFlags, OverloadFlags};
use crate::kind::Arity;
use pretty_assertions::assert_eq;

#[test]
fn predefined_nodes_exist_from_the_start() {
    let tree = Tree::new();
    assert!(tree.len() >= NodeId::PREDEFINED_COUNT as usize);
    assert!(!tree.is_empty());
    assert_eq!(tree.kind(NodeId::ERROR_MARK), NodeKind::ErrorMark);
    assert_eq!(tree.kind(NodeId::VOID_TYPE), NodeKind::VoidType);
    assert_eq!(tree.kind(NodeId::BOOL_TYPE), NodeKind::BooleanType);
    assert_eq!(tree.kind(NodeId::INT_TYPE), NodeKind::IntegerType);
    assert_eq!(tree.kind(NodeId::CTOR_IDENTIFIER), NodeKind::Identifier);
}

#[test]
fn build_nt_checks_arity() {
    let mut tree = Tree::new();
    let one = tree.build_int_cst(NodeId::INT_TYPE, 1);

    let err = tree.try_build_nt(NodeKind::CondExpr, Span::DUMMY, &[Some(one)]);
    assert_eq!(
        err,
        Err(ContractViolation::ArityMismatch {
            accessor: "build_nt",
            kind: NodeKind::CondExpr,
            found: 1,
            expected: Arity::Fixed(3),
        })
    );

    let call = tree.build_nt(NodeKind::CallExpr, Span::new(4, 9), &[Some(one), None, Some(one)]);
    assert_eq!(tree.operand_count(call), 3);
    assert_eq!(tree.operand(call, 1), None);
    assert_eq!(tree.span(call), Span::new(4, 9));
}

#[test]
fn operand_access_is_bounds_checked() {
    let mut tree = Tree::new();
    let one = tree.build_int_cst(NodeId::INT_TYPE, 1);
    let stmt = tree.build_nt(NodeKind::ExprStmt, Span::DUMMY, &[Some(one)]);

    assert_eq!(
        tree.try_operand(stmt, 2, "probe"),
        Err(ContractViolation::OperandOutOfRange {
            accessor: "probe",
            node: stmt,
            kind: NodeKind::ExprStmt,
            index: 2,
            len: 1,
        })
    );
    assert!(matches!(
        tree.try_operand(one, 0, "probe"),
        Err(ContractViolation::VariantMismatch { expected: "operands", .. })
    ));

    tree.set_operand(stmt, 0, None);
    assert_eq!(tree.operands(stmt), &[None]);
}

#[test]
#[should_panic(expected = "set_tree_operand: operand 5 out of range")]
fn writing_past_the_operands_aborts() {
    let mut tree = Tree::new();
    let stmt = tree.build_nt(NodeKind::ExprStmt, Span::DUMMY, &[None]);
    tree.set_operand(stmt, 5, None);
}

#[test]
fn unknown_ids_are_reported() {
    let tree = Tree::new();
    let bogus = NodeId::from_raw(10_000);
    assert_eq!(
        tree.try_node(bogus, "probe").map(Node::kind),
        Err(ContractViolation::UnknownNode {
            accessor: "probe",
            node: bogus,
        })
    );
}

#[test]
fn check_kind_accepts_members_of_the_set() {
    let mut tree = Tree::new();
    let class = tree.make_class_type(NodeKind::RecordType, None);
    assert!(tree.check_kind(class, KindSet::CLASS_TYPES, "probe").is_ok());
    assert!(matches!(
        tree.check_kind(NodeId::INT_TYPE, KindSet::CLASS_TYPES, "probe"),
        Err(ContractViolation::KindMismatch {
            found: NodeKind::IntegerType,
            ..
        })
    ));
}

#[test]
fn chains_link_and_iterate() {
    let mut tree = Tree::new();
    let a = tree.build_int_cst(NodeId::INT_TYPE, 1);
    let b = tree.build_int_cst(NodeId::INT_TYPE, 2);
    let c = tree.build_int_cst(NodeId::INT_TYPE, 3);
    tree.set_chain(a, Some(b));
    tree.set_chain(b, Some(c));
    assert_eq!(tree.chain_iter(Some(a)).collect::<Vec<_>>(), vec![a, b, c]);
    assert_eq!(tree.chain_iter(None).count(), 0);
    assert_eq!(tree.chain(c), None);
}

#[test]
fn flags_are_kind_scoped() {
    let mut tree = Tree::new();
    let call = tree.build_nt(NodeKind::CallExpr, Span::DUMMY, &[None]);

    assert!(!tree.lang_flag(call, CallExprFlags::KOENIG_LOOKUP));
    tree.set_lang_flag(call, CallExprFlags::KOENIG_LOOKUP, true);
    assert!(tree.lang_flag(call, CallExprFlags::KOENIG_LOOKUP));
    assert_eq!(tree.set_flag_names(call), vec!["KOENIG_LOOKUP"]);
    assert_eq!(tree.tree_flags(call).family(), Some("CallExprFlags"));

    assert_eq!(
        tree.try_lang_flags::<OverloadFlags>(call, "ovl_hidden_p"),
        Err(ContractViolation::FlagFamilyMismatch {
            accessor: "ovl_hidden_p",
            node: call,
            kind: NodeKind::CallExpr,
            bank: crate::flags::Bank::Tree,
            family: "OverloadFlags",
        })
    );
}

#[test]
#[should_panic(expected = "has no OverloadFlags")]
fn reading_another_kinds_flag_aborts() {
    let mut tree = Tree::new();
    let call = tree.build_nt(NodeKind::CallExpr, Span::DUMMY, &[None]);
    tree.lang_flag(call, OverloadFlags::HIDDEN);
}

#[test]
fn constants_hold_their_values() {
    let mut tree = Tree::new();
    let int = tree.build_int_cst(NodeId::LONG_TYPE, -42);
    let real = tree.build_real_cst(NodeId::DOUBLE_TYPE, 2.5);
    let text = tree.build_string(Span::new(1, 8), "hello");
    assert_eq!(tree.int_cst_value(int), -42);
    assert_eq!(tree.ty(int), Some(NodeId::LONG_TYPE));
    assert!((tree.real_cst_value(real) - 2.5).abs() < f64::EPSILON);
    assert_eq!(tree.string_cst_text(text), "hello");
}

#[test]
fn vectors_are_fixed_length() {
    let mut tree = Tree::new();
    let one = tree.build_int_cst(NodeId::INT_TYPE, 1);
    let vec = tree.make_tree_vec(3);
    assert_eq!(tree.tree_vec_length(vec), 3);
    tree.set_tree_vec_elt(vec, 1, Some(one));
    assert_eq!(tree.tree_vec(vec), &[None, Some(one), None]);
    assert_eq!(tree.tree_vec_elt(vec, 1), Some(one));
}

#[test]
#[should_panic(expected = "tree_vec_elt: operand 3 out of range")]
fn vector_reads_past_the_end_abort() {
    let mut tree = Tree::new();
    let vec = tree.make_tree_vec(3);
    tree.tree_vec_elt(vec, 3);
}
