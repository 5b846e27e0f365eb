//! End-to-end tests of a class going through the front end: bases are
//! attached, members declared, implicit members synthesized on demand,
//! constructors cloned and virtual functions given thunks.

use pretty_assertions::assert_eq;
use sylva_tree::{
    Access, AdjustStep, BaseSpec, ClassFlags, CloneVariant, NodeId, NodeKind, Quals, Span, SpecialMember,
    SpecialMemberState, ThunkAdjustment, Tree,
};

fn class(tree: &mut Tree, name: &str) -> NodeId {
    let name = tree.get_identifier(name);
    tree.make_class_type(NodeKind::RecordType, Some(name))
}

fn base(class: NodeId, is_virtual: bool) -> BaseSpec {
    BaseSpec {
        class,
        access: Access::Public,
        is_virtual,
    }
}

fn member_function(tree: &mut Tree, class: NodeId, name: NodeId, parms: &[NodeId]) -> NodeId {
    let fn_type = tree.build_method_type(class, NodeId::VOID_TYPE, parms);
    let decl = tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(fn_type));
    tree.add_class_member(class, decl);
    decl
}

#[test]
fn implicit_members_are_declared_on_first_use() {
    let mut tree = Tree::new();
    let s = class(&mut tree, "S");
    assert_eq!(tree.type_has_default_constructor(s), None);

    assert_eq!(tree.resolve_default_ctor(s), SpecialMemberState::Lazy);
    assert!(tree.classtype_lazy_default_ctor(s));
    assert!(tree.classtype_constructors(s).is_empty());

    let ctor = tree.lazily_declare_fn(s, SpecialMember::DefaultCtor);
    assert!(tree.decl_artificial_p(ctor));
    assert!(tree.decl_constructor_p(ctor));
    assert_eq!(tree.decl_context(ctor), Some(s));
    assert_eq!(tree.special_member_state(s, SpecialMember::DefaultCtor), SpecialMemberState::Declared);
    assert_eq!(tree.classtype_constructors(s), vec![ctor]);
    assert!(!tree.type_has_user_constructor(s));

    // Resolving again keeps the declared constructor.
    assert_eq!(tree.resolve_default_ctor(s), SpecialMemberState::Declared);
    assert_eq!(tree.type_has_default_constructor(s), Some(true));
}

#[test]
fn implicit_copy_constructor_takes_a_const_reference() {
    let mut tree = Tree::new();
    let s = class(&mut tree, "S");
    tree.set_special_member_state(s, SpecialMember::CopyCtor, SpecialMemberState::Lazy);

    let copy = tree.lazily_declare_fn(s, SpecialMember::CopyCtor);
    let fn_type = tree.ty(copy).unwrap_or(NodeId::ERROR_MARK);
    let parm = tree.type_arg_types(fn_type)[0];
    let const_s = tree.build_qualified_type(s, Quals::CONST);

    assert!(tree.type_ref_p(parm));
    assert!(!tree.type_ref_is_rvalue(parm));
    assert_eq!(tree.ty(parm), Some(const_s));
    assert_eq!(tree.type_method_basetype(fn_type), s);
    assert_eq!(tree.special_member_kind(s, copy), Some(SpecialMember::CopyCtor));
    assert!(tree.classtype_flags(s).contains(ClassFlags::HAS_CONST_COPY_CTOR));
    assert_eq!(tree.type_has_copy_ctor(s), Some(true));
}

#[test]
fn user_constructors_suppress_the_implicit_default() {
    let mut tree = Tree::new();
    let s = class(&mut tree, "S");
    let ctor = member_function(&mut tree, s, NodeId::CTOR_IDENTIFIER, &[NodeId::INT_TYPE]);

    assert!(tree.type_has_user_constructor(s));
    assert_eq!(tree.special_member_kind(s, ctor), None);
    assert_eq!(tree.resolve_default_ctor(s), SpecialMemberState::Absent);
    assert_eq!(tree.type_has_default_constructor(s), Some(false));
    assert_eq!(tree.classtype_constructors(s), vec![ctor]);
}

#[test]
fn constructors_are_cloned_behind_their_master() {
    let mut tree = Tree::new();
    let s = class(&mut tree, "S");
    tree.resolve_default_ctor(s);
    let ctor = tree.lazily_declare_fn(s, SpecialMember::DefaultCtor);

    let complete = tree.build_clone(ctor, CloneVariant::Complete);
    let base_clone = tree.build_clone(ctor, CloneVariant::Base);
    assert_eq!(tree.build_clone(ctor, CloneVariant::Complete), complete);

    assert_eq!(tree.clones(ctor).collect::<Vec<_>>(), vec![complete, base_clone]);
    assert_eq!(tree.decl_cloned_function(complete), Some(ctor));
    assert_eq!(tree.decl_context(base_clone), Some(s));
    assert!(tree.decl_artificial_p(complete));
    assert_eq!(tree.decl_clone_set(ctor).len(), 2);

    let mut seen = Vec::new();
    tree.for_each_clone(ctor, |clone| seen.push(clone));
    assert_eq!(seen, vec![complete, base_clone]);

    // Clones are not members in their own right.
    assert_eq!(tree.classtype_constructors(s), vec![ctor]);
}

#[test]
fn destructors_get_a_deleting_clone() {
    let mut tree = Tree::new();
    let s = class(&mut tree, "S");
    let dtor = member_function(&mut tree, s, NodeId::DTOR_IDENTIFIER, &[]);
    assert!(tree.type_has_nontrivial_destructor(s));
    assert_eq!(tree.classtype_destructor(s), Some(dtor));

    let deleting = tree.build_clone(dtor, CloneVariant::Deleting);
    let complete = tree.build_clone(dtor, CloneVariant::Complete);
    assert!(tree.decl_deleting_destructor_p(deleting));
    assert!(tree.decl_complete_destructor_p(complete));
    assert_eq!(tree.clones(dtor).collect::<Vec<_>>(), vec![deleting, complete]);
}

#[test]
fn overriders_reach_their_bases_through_thunks() {
    let mut tree = Tree::new();
    let b = class(&mut tree, "B");
    let m = class(&mut tree, "M");
    let d = class(&mut tree, "D");
    tree.xref_basetypes(d, &[base(m, false), base(b, true)]);

    let f = tree.get_identifier("f");
    let base_f = member_function(&mut tree, b, f, &[]);
    tree.set_decl_virtual_p(base_f, true);
    let derived_f = member_function(&mut tree, d, f, &[]);
    tree.set_decl_virtual_p(derived_f, true);

    assert!(tree.type_polymorphic_p(b));
    assert!(tree.type_polymorphic_p(d));
    assert!(!tree.type_polymorphic_p(m));

    let thunk = tree.build_thunk(
        Span::DUMMY,
        derived_f,
        ThunkAdjustment::ThisAdjusting {
            fixed_offset: -8,
            vcall_offset: Some(-24),
        },
    );
    assert_eq!(tree.decl_thunks(derived_f), &[thunk]);
    assert_eq!(tree.thunk_target(thunk), derived_f);
    assert_eq!(tree.decl_context(thunk), Some(d));
    assert_eq!(
        tree.thunk_adjustment(thunk).steps().as_slice(),
        &[AdjustStep::Fixed(-8), AdjustStep::VcallOffset(-24)]
    );
    assert!(tree.decl_thunks(base_f).is_empty());
}

#[test]
fn virtual_bases_are_laid_out_once_in_post_order() {
    let mut tree = Tree::new();
    let a = class(&mut tree, "A");
    let v = class(&mut tree, "V");
    let b = class(&mut tree, "B");
    let c = class(&mut tree, "C");
    let d = class(&mut tree, "D");
    tree.xref_basetypes(v, &[base(a, true)]);
    tree.xref_basetypes(b, &[base(v, true)]);
    tree.xref_basetypes(c, &[base(a, true), base(v, true)]);
    tree.xref_basetypes(d, &[base(b, false), base(c, false)]);

    assert!(tree.classtype_diamond_shaped_p(d));
    assert!(!tree.classtype_repeated_base_p(d));
    assert!(tree.type_uses_virtual_base(d));
    assert_eq!(tree.virtual_bases(d), None);

    let first = tree.layout_virtual_bases(d).to_vec();
    assert_eq!(first, vec![a, v]);
    assert_eq!(tree.layout_virtual_bases(d), first.as_slice());
    assert_eq!(tree.virtual_bases(d), Some(first.as_slice()));

    let a_in_d = tree.lookup_base(d, a).unwrap_or(NodeId::ERROR_MARK);
    assert!(tree.binfo_virtual_p(a_in_d));
    assert!(tree.derived_from_p(a, d));
    assert!(!tree.derived_from_p(d, a));
}
