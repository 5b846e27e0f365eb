use super::*;
use pretty_assertions::assert_eq;

#[test]
fn all_is_sorted_and_unique() {
    for pair in NodeKind::ALL.windows(2) {
        assert!(pair[0].raw() < pair[1].raw(), "{:?} before {:?}", pair[0], pair[1]);
    }
}

#[test]
fn class_ranges() {
    assert_eq!(NodeKind::Identifier.class(), TreeClass::Exceptional);
    assert_eq!(NodeKind::StringCst.class(), TreeClass::Constant);
    assert_eq!(NodeKind::ConceptDecl.class(), TreeClass::Declaration);
    assert_eq!(NodeKind::TypePackExpansion.class(), TreeClass::Type);
    assert_eq!(NodeKind::StmtExpr.class(), TreeClass::Statement);
    assert_eq!(NodeKind::ThrowExpr.class(), TreeClass::Expression);
    assert_eq!(NodeKind::LambdaExpr.class(), TreeClass::Expression);
    assert_eq!(NodeKind::Overload.class(), TreeClass::Exceptional);
    assert_eq!(NodeKind::Binfo.class(), TreeClass::Exceptional);
}

#[test]
fn names_are_unique() {
    let mut names: Vec<_> = NodeKind::ALL.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(before, names.len());
}

#[test]
fn operand_kinds_are_statements_or_expressions() {
    for &kind in NodeKind::ALL {
        if kind.arity() != Arity::None {
            assert!(kind.is_stmt() || kind.is_expr(), "{kind} has operands");
        }
    }
}

#[test]
fn every_statement_has_operands() {
    for &kind in NodeKind::ALL.iter().filter(|k| k.is_stmt()) {
        assert_ne!(kind.arity(), Arity::None, "{kind}");
    }
}

#[test]
fn arity_accepts() {
    assert!(Arity::Fixed(3).accepts(3));
    assert!(!Arity::Fixed(3).accepts(2));
    assert!(Arity::AtLeast(1).accepts(5));
    assert!(!Arity::AtLeast(1).accepts(0));
    assert!(!Arity::None.accepts(0));
}

#[test]
fn lang_decl_min_kinds_are_decls() {
    for &kind in NodeKind::ALL {
        if kind.has_lang_decl_min() || kind.may_have_template_info() {
            assert!(kind.is_decl(), "{kind}");
        }
    }
    assert!(!NodeKind::ParmDecl.has_lang_decl_min());
    assert!(!NodeKind::NamespaceDecl.has_lang_decl_min());
}

#[test]
fn kind_set_display() {
    assert_eq!(KindSet::CLASS_TYPES.to_string(), "record_type | union_type");
    assert!(KindSet::DECLS.contains(NodeKind::UsingDecl));
    assert!(!KindSet::DECLS.contains(NodeKind::RecordType));
}
