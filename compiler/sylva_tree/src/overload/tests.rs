use super::*;
use crate::Span;
use pretty_assertions::assert_eq;

fn function(tree: &mut Tree, name: &str) -> NodeId {
    let name = tree.get_identifier(name);
    tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(NodeId::VOID_TYPE))
}

fn members(tree: &Tree, set: Option<NodeId>) -> Vec<NodeId> {
    tree.ovl_iter(set).collect()
}

#[test]
fn a_single_function_is_its_own_set() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    let set = tree.ovl_insert(f, None, OvlInsert::Plain);

    assert_eq!(set, f);
    assert!(tree.ovl_single_p(set));
    assert_eq!(tree.ovl_first(set), f);
    assert_eq!(members(&tree, Some(set)), vec![f]);
    assert_eq!(tree.ovl_name(set), tree.decl_name(f));
}

#[test]
fn newer_functions_come_first() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    let g = function(&mut tree, "f");
    let h = function(&mut tree, "f");
    let set = tree.ovl_insert(f, None, OvlInsert::Plain);
    let set = tree.ovl_insert(g, Some(set), OvlInsert::Plain);
    let set = tree.ovl_insert(h, Some(set), OvlInsert::Plain);

    assert_eq!(members(&tree, Some(set)), vec![h, g, f]);
    assert!(!tree.ovl_single_p(set));
    assert_eq!(tree.ovl_function(set), h);
    assert_eq!(tree.ty(set), Some(NodeId::UNKNOWN_TYPE));
    assert_eq!(tree.ovl_iter(None).count(), 0);
}

#[test]
fn hidden_functions_stay_in_front() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    let friend = function(&mut tree, "f");
    let g = function(&mut tree, "f");

    let set = tree.ovl_insert(f, None, OvlInsert::Plain);
    let set = tree.ovl_insert(friend, Some(set), OvlInsert::Hidden);
    assert!(tree.ovl_hidden_p(set));

    let set = tree.ovl_insert(g, Some(set), OvlInsert::Plain);
    assert_eq!(members(&tree, Some(set)), vec![friend, g, f]);

    let visible = tree.ovl_skip_hidden(Some(set));
    assert_eq!(members(&tree, visible), vec![g, f]);
    assert_eq!(tree.ovl_skip_hidden(None), None);
}

#[test]
fn a_lone_template_still_gets_a_set_node() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    let name = tree.decl_name(f);
    let tmpl = tree.build_template_decl(Span::DUMMY, name, f);
    let set = tree.ovl_insert(tmpl, None, OvlInsert::Plain);

    assert_ne!(set, tmpl);
    assert_eq!(tree.kind(set), NodeKind::Overload);
    assert!(tree.ovl_single_p(set));
    assert_eq!(tree.ovl_chain(set), None);
    assert_eq!(tree.ty(set), Some(NodeId::UNKNOWN_TYPE));
}

#[test]
fn using_declarations_mark_their_entries() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    let g = function(&mut tree, "f");
    let h = function(&mut tree, "f");

    let used = tree.ovl_insert(f, None, OvlInsert::Using);
    assert!(tree.ovl_using_p(used));
    assert!(tree.ovl_dedup_p(used));
    assert!(!tree.ovl_export_p(used));

    let exported = tree.ovl_insert(g, Some(used), OvlInsert::ExportedUsing);
    assert!(tree.ovl_export_p(exported));

    // A plain entry in front of a deduplicated set inherits the marker.
    let set = tree.ovl_insert(h, Some(exported), OvlInsert::Plain);
    assert!(tree.ovl_dedup_p(set));
    assert!(!tree.ovl_using_p(set));
}

#[test]
fn nested_sets_are_flattened() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    let g = function(&mut tree, "f");
    let h = function(&mut tree, "f");
    let inner = tree.build_overload(g, Some(f));
    let outer = tree.build_overload(inner, Some(h));

    assert!(tree.ovl_nested_p(outer));
    assert!(!tree.ovl_nested_p(inner));
    assert_eq!(tree.ovl_first(outer), g);
    assert_eq!(members(&tree, Some(outer)), vec![g, f, h]);
}

#[test]
fn lookup_results_are_marked() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    let g = function(&mut tree, "f");

    assert_eq!(tree.lookup_add(f, None), f);
    let result = tree.lookup_add(g, Some(f));
    assert!(tree.ovl_lookup_p(result));
    assert_eq!(members(&tree, Some(result)), vec![g, f]);

    assert_eq!(tree.lookup_add(NodeId::ERROR_MARK, Some(f)), NodeId::ERROR_MARK);
    assert_eq!(tree.lookup_add(f, Some(NodeId::ERROR_MARK)), NodeId::ERROR_MARK);
}

#[test]
#[should_panic(expected = "ovl_chain: node")]
fn functions_have_no_overload_chain() {
    let mut tree = Tree::new();
    let f = function(&mut tree, "f");
    tree.ovl_chain(f);
}

#[test]
fn baselinks_record_where_functions_were_found() {
    let mut tree = Tree::new();
    let class = tree.make_class_type(NodeKind::RecordType, None);
    let binfo = tree.type_binfo(class).unwrap_or(NodeId::ERROR_MARK);
    let f = function(&mut tree, "f");
    let g = function(&mut tree, "f");
    let set = tree.ovl_insert(f, None, OvlInsert::Plain);

    let link = tree.build_baselink(binfo, binfo, set, None);
    assert_eq!(tree.baselink_binfo(link), binfo);
    assert_eq!(tree.baselink_access_binfo(link), binfo);
    assert_eq!(tree.baselink_functions(link), f);
    assert_eq!(tree.baselink_optype(link), None);
    assert_eq!(tree.ty(link), Some(NodeId::UNKNOWN_TYPE));
    assert!(!tree.baselink_qualified_p(link));

    tree.set_baselink_qualified_p(link, true);
    let set = tree.ovl_insert(g, Some(set), OvlInsert::Plain);
    tree.set_baselink_functions(link, set);
    assert!(tree.baselink_qualified_p(link));
    assert_eq!(tree.baselink_functions(link), set);
}

#[test]
#[should_panic(expected = "build_baselink: node")]
fn baselinks_need_binfos() {
    let mut tree = Tree::new();
    let class = tree.make_class_type(NodeKind::RecordType, None);
    let f = function(&mut tree, "f");
    tree.build_baselink(class, class, f, None);
}
