use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn special_identifiers_sit_at_fixed_ids() {
    let tree = Tree::new();
    assert_eq!(tree.identifier_text(NodeId::CTOR_IDENTIFIER), " ctor");
    assert_eq!(tree.identifier_text(NodeId::DELETING_DTOR_IDENTIFIER), " deleting_dtor");
    assert_eq!(tree.identifier_text(NodeId::THIS_IDENTIFIER), "this");
    assert_eq!(tree.identifier_text(NodeId::ANON_IDENTIFIER), " anon");
    assert_eq!(tree.identifier_kind(NodeId::BASE_CTOR_IDENTIFIER), IdentifierKind::Ctor);
    assert_eq!(tree.identifier_kind(NodeId::COMPLETE_DTOR_IDENTIFIER), IdentifierKind::Dtor);
    assert_eq!(tree.identifier_kind(NodeId::CONV_OP_IDENTIFIER), IdentifierKind::ConvOp);
    assert_eq!(tree.identifier_kind(NodeId::THIS_IDENTIFIER), IdentifierKind::Keyword);
    assert_eq!(tree.identifier_kind(NodeId::VTT_PARM_IDENTIFIER), IdentifierKind::Normal);
}

#[test]
fn interning_returns_the_same_node() {
    let mut tree = Tree::new();
    let before = tree.len();
    let a = tree.get_identifier("widget");
    let b = tree.get_identifier("widget");
    assert_eq!(a, b);
    assert_eq!(tree.len(), before + 1);
    assert_eq!(tree.maybe_get_identifier("widget"), Some(a));
    assert_eq!(tree.maybe_get_identifier("gadget"), None);
    assert_eq!(tree.identifier_kind(a), IdentifierKind::Normal);
}

#[test]
fn keywords_are_tagged() {
    let tree = Tree::new();
    for keyword in ["class", "template", "typename", "constexpr"] {
        let id = tree.maybe_get_identifier(keyword);
        assert!(id.is_some(), "{keyword} not interned");
        if let Some(id) = id {
            assert!(tree.identifier_kind(id).is_keyword(), "{keyword}");
        }
    }
}

#[test]
fn operator_identifiers_follow_the_table() {
    let tree = Tree::new();
    let plus = tree.operator_identifier(OperatorName::plain(OvlOpCode::Plus));
    let plus_assign = tree.operator_identifier(OperatorName::assign(OvlOpCode::Plus));
    let assign = tree.operator_identifier(OperatorName::assign(OvlOpCode::Nop));
    assert_eq!(plus.map(|id| tree.identifier_text(id)), Some("operator+"));
    assert_eq!(plus_assign.map(|id| tree.identifier_text(id)), Some("operator+="));
    assert_eq!(assign.map(|id| tree.identifier_text(id)), Some("operator="));
    assert_eq!(tree.operator_identifier(OperatorName::assign(OvlOpCode::Ne)), None);

    if let (Some(plus), Some(plus_assign)) = (plus, plus_assign) {
        assert!(tree.identifier_kind(plus).is_simple_op());
        assert!(tree.identifier_kind(plus_assign).is_assign_op());
        assert_eq!(
            tree.identifier_operator(plus_assign),
            Some(OperatorName::assign(OvlOpCode::Plus))
        );
    }
}

#[test]
fn new_and_delete_are_newdel_ops() {
    let tree = Tree::new();
    let id = |code| tree.operator_identifier(OperatorName::plain(code));
    let new = id(OvlOpCode::VecNew);
    let delete = id(OvlOpCode::Delete);
    let plus = id(OvlOpCode::Plus);
    assert!(new.is_some_and(|n| tree.identifier_newdel_op_p(n)));
    assert!(new.is_some_and(|n| tree.identifier_new_op_p(n)));
    assert!(delete.is_some_and(|d| tree.identifier_newdel_op_p(d)));
    assert!(!delete.is_some_and(|d| tree.identifier_new_op_p(d)));
    assert!(!plus.is_some_and(|p| tree.identifier_newdel_op_p(p)));
}

#[test]
fn conversion_operator_name_records_type() {
    let mut tree = Tree::new();
    let name = tree.make_conv_op_name(NodeId::INT_TYPE);
    assert!(tree.identifier_kind(name).is_conv_op());
    assert!(tree.identifier_kind(name).is_any_op());
    assert!(!tree.identifier_kind(name).is_ovl_op());
    assert_eq!(tree.ty(name), Some(NodeId::INT_TYPE));
    assert_eq!(tree.make_conv_op_name(NodeId::INT_TYPE), name);
}

#[test]
fn setting_the_kind_keeps_other_identifier_flags() {
    let mut tree = Tree::new();
    let id = tree.get_identifier("marked_name");
    tree.set_lang_flag(id, IdentifierFlags::MARKED, true);
    tree.set_identifier_kind(id, IdentifierKind::Dtor);
    assert!(tree.lang_flag(id, IdentifierFlags::MARKED));
    assert_eq!(tree.identifier_kind(id), IdentifierKind::Dtor);
    tree.set_identifier_kind(id, IdentifierKind::Normal);
    assert!(tree.lang_flag(id, IdentifierFlags::MARKED));
}

#[test]
fn type_value_and_binding_round_trip() {
    let mut tree = Tree::new();
    let id = tree.get_identifier("size_t");
    assert_eq!(tree.identifier_type_value(id), None);
    tree.set_identifier_type_value(id, Some(NodeId::SIZE_TYPE));
    assert_eq!(tree.identifier_type_value(id), Some(NodeId::SIZE_TYPE));
    assert_eq!(tree.identifier_binding(id), None);
}

#[test]
#[should_panic(expected = "identifier_text")]
fn text_of_a_type_is_a_violation() {
    let tree = Tree::new();
    let _ = tree.identifier_text(NodeId::INT_TYPE);
}

fn categories(kind: IdentifierKind) -> [bool; 8] {
    [
        kind == IdentifierKind::Normal,
        kind.is_keyword(),
        kind.is_ctor(),
        kind.is_dtor(),
        kind.is_simple_op(),
        kind.is_assign_op(),
        kind.is_conv_op(),
        kind == IdentifierKind::ReservedForUdlit,
    ]
}

proptest! {
    #[test]
    fn exactly_one_category_per_code(code in 0u8..8) {
        let kind = IdentifierKind::from_bits(code);
        prop_assert_eq!(kind.bits(), code);
        let hits = categories(kind).iter().filter(|&&hit| hit).count();
        prop_assert_eq!(hits, 1);
        prop_assert_eq!(kind.is_cdtor(), kind.is_ctor() || kind.is_dtor());
        prop_assert_eq!(kind.is_ovl_op(), kind.is_simple_op() || kind.is_assign_op());
        prop_assert_eq!(kind.is_any_op(), code >= 4);
    }

    #[test]
    fn kind_survives_the_flag_bank(code in 0u8..8, other in any::<bool>()) {
        let kind = IdentifierKind::from_bits(code);
        let mut flags = IdentifierFlags::empty();
        flags.set(IdentifierFlags::VIRTUAL, other);
        let applied = kind.apply(flags);
        prop_assert_eq!(IdentifierKind::from_flags(applied), kind);
        prop_assert_eq!(applied.contains(IdentifierFlags::VIRTUAL), other);
    }
}
