use super::*;
use crate::{NodeKind, Span};
use pretty_assertions::assert_eq;

fn var(tree: &mut Tree, name: &str) -> NodeId {
    let name = tree.get_identifier(name);
    tree.build_decl(NodeKind::VarDecl, Span::DUMMY, Some(name), Some(NodeId::INT_TYPE))
}

fn visited(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    tree.walk_tree(root, |_, id| {
        out.push(id);
        WalkControl::Continue
    });
    out
}

/// `x = &y`.
fn assignment(tree: &mut Tree) -> (NodeId, NodeId, NodeId, NodeId) {
    let x = var(tree, "x");
    let y = var(tree, "y");
    let ptr = tree.build_pointer_type(NodeId::INT_TYPE);
    let addr = tree.build_expr(NodeKind::AddrExpr, Span::DUMMY, Some(ptr), &[Some(y)]);
    let modify = tree.build_expr(NodeKind::ModifyExpr, Span::DUMMY, Some(NodeId::INT_TYPE), &[Some(x), Some(addr)]);
    (modify, x, addr, y)
}

#[test]
fn parents_come_before_children() {
    let mut tree = Tree::new();
    let (modify, x, addr, y) = assignment(&mut tree);
    assert_eq!(visited(&tree, modify), vec![modify, x, addr, y]);
}

#[test]
fn skipped_nodes_keep_their_children_unvisited() {
    let mut tree = Tree::new();
    let (modify, x, addr, _) = assignment(&mut tree);

    let mut seen = Vec::new();
    let found = tree.walk_tree(modify, |_, id| {
        seen.push(id);
        if id == addr {
            WalkControl::SkipChildren
        } else {
            WalkControl::Continue
        }
    });
    assert_eq!(found, None);
    assert_eq!(seen, vec![modify, x, addr]);
}

#[test]
fn stopping_returns_the_node() {
    let mut tree = Tree::new();
    let (modify, x, addr, y) = assignment(&mut tree);

    let mut seen = 0;
    let found = tree.walk_tree(modify, |_, id| {
        seen += 1;
        if id == x {
            WalkControl::Stop
        } else {
            WalkControl::Continue
        }
    });
    assert_eq!(found, Some(x));
    assert_eq!(seen, 2);

    assert!(tree.tree_contains(modify, y));
    assert!(tree.tree_contains(addr, addr));
    assert!(!tree.tree_contains(addr, x));
}

#[test]
fn shared_subtrees_are_visited_once() {
    let mut tree = Tree::new();
    let x = var(&mut tree, "x");
    let sum = tree.build_expr(NodeKind::ModifyExpr, Span::DUMMY, None, &[Some(x), Some(x)]);
    assert_eq!(visited(&tree, sum), vec![sum, x]);
}

#[test]
fn expression_types_and_decl_contexts_are_not_followed() {
    let mut tree = Tree::new();
    let class = tree.make_class_type(NodeKind::RecordType, None);
    let (modify, x, ..) = assignment(&mut tree);
    tree.set_decl_context(x, Some(class));

    assert!(!tree.tree_contains(modify, NodeId::INT_TYPE));
    assert!(!tree.tree_contains(modify, class));
    assert_eq!(visited(&tree, x), vec![x]);
}

#[test]
fn types_walk_into_their_components() {
    let mut tree = Tree::new();
    let ptr = tree.build_pointer_type(NodeId::INT_TYPE);
    let fn_type = tree.build_function_type(NodeId::VOID_TYPE, &[ptr, NodeId::INT_TYPE]);
    assert_eq!(visited(&tree, fn_type), vec![fn_type, NodeId::VOID_TYPE, ptr, NodeId::INT_TYPE]);

    let class = tree.make_class_type(NodeKind::RecordType, None);
    let offset = tree.build_offset_type(class, NodeId::INT_TYPE);
    assert_eq!(visited(&tree, offset), vec![offset, class, NodeId::INT_TYPE]);
    // Class types are leaves; their binfos are not part of the walk.
    assert_eq!(visited(&tree, class), vec![class]);
}

#[test]
fn pointer_to_member_constants_visit_their_type() {
    let mut tree = Tree::new();
    let class = tree.make_class_type(NodeKind::RecordType, None);
    let name = tree.get_identifier("m");
    let field = tree.build_decl(NodeKind::FieldDecl, Span::DUMMY, Some(name), Some(NodeId::INT_TYPE));
    let offset = tree.build_offset_type(class, NodeId::INT_TYPE);
    let cst = tree.build_ptrmem_cst(offset, field);

    assert!(tree.tree_contains(cst, class));
    assert!(!tree.tree_contains(cst, field));
    assert_eq!(tree.subtrees(cst).as_slice(), &[offset]);
}

#[test]
fn qualified_baselinks_visit_the_access_class() {
    let mut tree = Tree::new();
    let class = tree.make_class_type(NodeKind::RecordType, None);
    let binfo = tree.type_binfo(class).unwrap_or(NodeId::ERROR_MARK);
    let name = tree.get_identifier("f");
    let f = tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(NodeId::VOID_TYPE));
    let link = tree.build_baselink(binfo, binfo, f, None);

    assert_eq!(visited(&tree, link), vec![link, f]);
    tree.set_baselink_qualified_p(link, true);
    assert_eq!(visited(&tree, link), vec![link, class, f]);
}

#[test]
fn lists_visit_purpose_value_then_chain() {
    let mut tree = Tree::new();
    let a = var(&mut tree, "a");
    let b = var(&mut tree, "b");
    let tail = tree.tree_cons(None, Some(b), None);
    let head = tree.tree_cons(Some(NodeId::INT_TYPE), Some(a), Some(tail));

    assert_eq!(visited(&tree, head), vec![head, NodeId::INT_TYPE, a, tail, b]);
}

#[test]
fn using_declarations_visit_name_scope_and_decls() {
    let mut tree = Tree::new();
    let name = tree.get_identifier("f");
    let ns = tree.build_decl(NodeKind::NamespaceDecl, Span::DUMMY, None, None);
    let f = tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(NodeId::VOID_TYPE));
    let using = tree.build_decl(NodeKind::UsingDecl, Span::DUMMY, Some(name), None);
    tree.set_using_decl(using, Some(ns), Some(f));

    assert_eq!(visited(&tree, using), vec![using, name, ns, f]);
}

#[test]
fn blocks_visit_vars_and_subblocks() {
    let mut tree = Tree::new();
    let x = var(&mut tree, "x");
    let enclosing = tree.build_block(Span::DUMMY, None, None, None);
    let inner = tree.build_block(Span::DUMMY, None, None, Some(enclosing));
    let outer = tree.build_block(Span::DUMMY, Some(x), Some(inner), None);

    assert_eq!(visited(&tree, outer), vec![outer, x, inner]);
    assert_eq!(visited(&tree, inner), vec![inner]);
}
