use super::*;
use crate::check::ContractViolation;
use crate::{NodeKind, Span, Tree};
use pretty_assertions::assert_eq;

fn setup() -> (Tree, ScopeContext) {
    let mut tree = Tree::new();
    let global = tree.build_lang_decl(NodeKind::NamespaceDecl, Span::DUMMY, None, None);
    let ctx = ScopeContext::new(&mut tree, global);
    (tree, ctx)
}

fn var(tree: &mut Tree, name: NodeId) -> NodeId {
    tree.build_decl(NodeKind::VarDecl, Span::DUMMY, Some(name), Some(NodeId::INT_TYPE))
}

#[test]
fn contexts_start_at_global_scope() {
    let mut tree = Tree::new();
    let global = tree.build_lang_decl(NodeKind::NamespaceDecl, Span::DUMMY, None, None);
    let ctx = ScopeContext::new(&mut tree, global);

    assert!(ctx.at_global_scope());
    assert_eq!(ctx.current_level(), ctx.global_level());
    assert_eq!(tree.namespace_level(global), Some(ctx.global_level()));

    let level = ctx.level(ctx.global_level());
    assert_eq!(level.kind(), ScopeKind::Namespace);
    assert_eq!(level.this_entity, Some(global));
    assert_eq!(level.level_chain, None);
    assert_eq!(level.binding_depth, 0);
    assert_eq!(ctx.state().old_namespace, Some(global));
    assert_eq!(ctx.saved_depth(), 0);
}

#[test]
fn closing_a_level_returns_to_its_parent() {
    let (mut tree, mut ctx) = setup();
    let global = ctx.global_level();

    let block = {
        let guard = ctx.push_level(&mut tree, ScopeKind::Block, None);
        assert!(!guard.at_global_scope());
        assert_eq!(guard.current_level(), guard.id());
        guard.id()
    };

    assert!(ctx.at_global_scope());
    let level = ctx.level(block);
    assert_eq!(level.level_chain, Some(global));
    assert_eq!(level.binding_depth, 1);
    assert_eq!(ctx.enclosing_levels(block).collect::<Vec<_>>(), vec![block, global]);
}

#[test]
fn inner_bindings_shadow_until_their_level_closes() {
    let (mut tree, mut ctx) = setup();
    let x = tree.get_identifier("x");
    let outer_decl = var(&mut tree, x);
    let inner_decl = var(&mut tree, x);
    let outer = ctx.push_binding(&mut tree, x, outer_decl);
    assert!(!ctx.binding(outer).is_local);

    let (block, inner) = {
        let mut guard = ctx.push_level(&mut tree, ScopeKind::Block, None);
        let inner = guard.bind(x, inner_decl);
        assert_eq!(guard.tree().identifier_binding(x), Some(inner));

        let binding = guard.binding(inner);
        assert_eq!(binding.previous, Some(outer));
        assert_eq!(binding.value, Some(inner_decl));
        assert_eq!(binding.scope, guard.id());
        assert!(binding.is_local);
        (guard.id(), inner)
    };

    assert_eq!(tree.identifier_binding(x), Some(outer));
    assert_eq!(ctx.level(block).names, vec![inner_decl]);
    assert_eq!(ctx.binding_in_level(&tree, x, ctx.global_level()), Some(outer));
    assert_eq!(ctx.binding_in_level(&tree, x, block), None);
    assert_eq!(ctx.binding(inner).value, Some(inner_decl));
}

#[test]
fn type_values_are_restored_on_close() {
    let (mut tree, mut ctx) = setup();
    let t = tree.get_identifier("T");
    ctx.push_type_binding(&mut tree, t, NodeId::INT_TYPE);

    {
        let mut guard = ctx.push_level(&mut tree, ScopeKind::Block, None);
        let level = guard.id();
        guard.bind_type(t, NodeId::CHAR_TYPE);
        assert_eq!(guard.tree().identifier_type_value(t), Some(NodeId::CHAR_TYPE));
        assert_eq!(guard.level(level).type_shadowed, vec![(t, Some(NodeId::INT_TYPE))]);
    }

    assert_eq!(tree.identifier_type_value(t), Some(NodeId::INT_TYPE));
}

#[test]
fn repeated_type_shadows_unwind_to_the_outer_value() {
    let (mut tree, mut ctx) = setup();
    let t = tree.get_identifier("T");
    ctx.push_type_binding(&mut tree, t, NodeId::INT_TYPE);

    {
        let mut guard = ctx.push_level(&mut tree, ScopeKind::Block, None);
        guard.bind_type(t, NodeId::CHAR_TYPE);
        guard.bind_type(t, NodeId::SIZE_TYPE);
        assert_eq!(guard.tree().identifier_type_value(t), Some(NodeId::SIZE_TYPE));
    }

    assert_eq!(tree.identifier_type_value(t), Some(NodeId::INT_TYPE));
}

#[test]
fn top_level_jumps_unwind_repeated_type_shadows() {
    let (mut tree, mut ctx) = setup();
    let t = tree.get_identifier("T");
    ctx.push_type_binding(&mut tree, t, NodeId::INT_TYPE);

    let mut outer = ctx.push_level(&mut tree, ScopeKind::Block, None);
    outer.bind_type(t, NodeId::LONG_TYPE);
    let mut inner = outer.push_level(ScopeKind::Block, None);
    inner.bind_type(t, NodeId::CHAR_TYPE);
    inner.bind_type(t, NodeId::SIZE_TYPE);

    {
        let top = inner.push_to_top_level();
        assert_eq!(top.tree().identifier_type_value(t), Some(NodeId::INT_TYPE));
        assert_eq!(top.state().old_bindings.len(), 1);
    }
    assert_eq!(inner.tree().identifier_type_value(t), Some(NodeId::SIZE_TYPE));
}

#[test]
fn explicit_specializations_are_template_parm_levels() {
    let (mut tree, mut ctx) = setup();
    let guard = ctx.push_level(&mut tree, ScopeKind::TemplateSpec, None);
    let level = guard.level(guard.id());
    assert_eq!(level.kind(), ScopeKind::TemplateParms);
    assert_eq!(level.explicit_spec_p(), Some(true));
    drop(guard);

    let guard = ctx.push_level(&mut tree, ScopeKind::TemplateParms, None);
    assert_eq!(guard.level(guard.id()).explicit_spec_p(), Some(false));
    drop(guard);

    assert_eq!(ctx.level(ctx.global_level()).explicit_spec_p(), None);
}

#[test]
fn class_levels_are_tracked_separately() {
    let (mut tree, mut ctx) = setup();
    let class = tree.make_class_type(NodeKind::RecordType, None);

    let class_level = {
        let mut guard = ctx.push_level(&mut tree, ScopeKind::Class, Some(class));
        let class_level = guard.id();
        assert_eq!(guard.state().class_bindings, Some(class_level));
        assert_eq!(guard.innermost_nonclass_level(), guard.global_level());

        let inner = guard.push_level(ScopeKind::FunctionParms, None);
        assert_eq!(inner.innermost_nonclass_level(), inner.id());
        assert_eq!(inner.state().class_bindings, Some(class_level));
        class_level
    };

    assert_eq!(ctx.state().class_bindings, None);
    assert_eq!(ctx.state().previous_class_level, Some(class_level));
}

#[test]
fn top_level_jumps_hide_local_bindings() {
    let (mut tree, mut ctx) = setup();
    let x = tree.get_identifier("x");
    let g = tree.get_identifier("g");
    let local = var(&mut tree, x);
    let global_decl = var(&mut tree, g);
    let shadow = var(&mut tree, g);
    let global_binding = ctx.push_binding(&mut tree, g, global_decl);

    let mut guard = ctx.push_level(&mut tree, ScopeKind::Block, None);
    let block = guard.id();
    let local_binding = guard.bind(x, local);
    let shadow_binding = guard.bind(g, shadow);

    {
        let top = guard.push_to_top_level();
        assert!(top.at_global_scope());
        assert_eq!(top.saved_depth(), 1);
        assert_eq!(top.tree().identifier_binding(x), None);
        assert_eq!(top.tree().identifier_binding(g), Some(global_binding));
        assert_eq!(top.state().old_bindings.len(), 2);
        assert_eq!(top.state().class_bindings, None);
    }

    assert_eq!(guard.current_level(), block);
    assert_eq!(guard.saved_depth(), 0);
    assert_eq!(guard.tree().identifier_binding(x), Some(local_binding));
    assert_eq!(guard.tree().identifier_binding(g), Some(shadow_binding));
}

#[test]
fn levels_opened_at_top_level_hang_off_the_global_level() {
    let (mut tree, mut ctx) = setup();
    let global = ctx.global_level();
    let mut outer = ctx.push_level(&mut tree, ScopeKind::FunctionParms, None);
    let parms = outer.id();

    let mut top = outer.push_to_top_level();
    let nested = top.push_level(ScopeKind::Block, None);
    assert_eq!(nested.level(nested.id()).level_chain, Some(global));
    assert_eq!(nested.level(nested.id()).binding_depth, 1);
    drop(nested);
    assert_eq!(top.current_level(), global);
    drop(top);

    assert_eq!(outer.current_level(), parms);
}

#[test]
fn nested_top_level_jumps_keep_the_outermost_namespace() {
    let (mut tree, mut ctx) = setup();
    let ns = ctx.state().old_namespace;

    let mut first = ctx.push_to_top_level(&mut tree);
    first.state_mut().old_namespace = None;
    let second = first.push_level(ScopeKind::Block, None);
    drop(second);
    {
        let mut inner_ctx = first.push_level(ScopeKind::Block, None);
        let again = inner_ctx.push_to_top_level();
        assert_eq!(again.saved_depth(), 2);
        assert_eq!(again.state().old_namespace, ns);
    }
    assert_eq!(first.saved_depth(), 1);
    drop(first);
    assert_eq!(ctx.saved_depth(), 0);
}

#[test]
fn local_scope_kinds() {
    assert!(ScopeKind::Block.is_local());
    assert!(ScopeKind::FunctionParms.is_local());
    assert!(ScopeKind::Catch.is_local());
    assert!(!ScopeKind::Class.is_local());
    assert!(!ScopeKind::Namespace.is_local());
    assert!(!ScopeKind::TemplateParms.is_local());
}

#[test]
fn statement_trees_default_to_full_expressions() {
    let saved = SavedScope::default();
    assert!(saved.stmt_tree.stmts_are_full_exprs_p);
    assert!(saved.stmt_tree.cur_stmt_list.is_empty());
    assert_eq!(LevelId(3).to_string(), "L3");
    assert_eq!(BindingId(7).to_string(), "B7");
}

#[test]
fn foreign_ids_are_contract_violations() {
    let (_, ctx) = setup();
    assert_eq!(
        ctx.try_level(LevelId(9)).err(),
        Some(ContractViolation::UnknownLevel {
            accessor: "level",
            level: LevelId(9),
        })
    );
    assert!(matches!(
        ctx.try_binding(BindingId(0)),
        Err(ContractViolation::UnknownBinding { .. })
    ));
    assert!(ctx.try_level(ctx.global_level()).is_ok());
}

#[test]
#[should_panic(expected = "level: binding level L5 is not in this scope context")]
fn reading_a_foreign_level_aborts() {
    let (_, ctx) = setup();
    ctx.level(LevelId(5));
}
