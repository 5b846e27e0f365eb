//! Property-based tests for the node model.
//!
//! These tests use proptest to build random types, identifiers and
//! overload sets and check that:
//! 1. Type identity agrees with structure, in every comparison mode
//! 2. Identifier categories never overlap
//! 3. Overload sets keep hidden entries in front of visible ones

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use sylva_tree::{CompareMode, IdentifierKind, NodeId, NodeKind, OvlInsert, Quals, Span, Tree, UseTemplate};

// -- Type Strategies --

const BUILTINS: [NodeId; 7] = [
    NodeId::VOID_TYPE,
    NodeId::BOOL_TYPE,
    NodeId::CHAR_TYPE,
    NodeId::INT_TYPE,
    NodeId::UNSIGNED_TYPE,
    NodeId::LONG_TYPE,
    NodeId::DOUBLE_TYPE,
];

/// How to build a type.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Shape {
    Builtin(usize),
    /// Template type parameter at this position of the outermost level.
    Parm(u32),
    Pointer(Box<Shape>),
    Reference(Box<Shape>, bool),
    Array(Box<Shape>, Option<u64>),
    Const(Box<Shape>),
    Function(Box<Shape>, Vec<Shape>),
}

impl Shape {
    /// Fold repeated `const`, which names the same type.
    fn normalize(&self) -> Shape {
        let boxed = |shape: &Shape| Box::new(shape.normalize());
        match self {
            Shape::Builtin(_) | Shape::Parm(_) => self.clone(),
            Shape::Pointer(s) => Shape::Pointer(boxed(s)),
            Shape::Reference(s, rvalue) => Shape::Reference(boxed(s), *rvalue),
            Shape::Array(s, len) => Shape::Array(boxed(s), *len),
            Shape::Const(s) => match s.normalize() {
                already @ Shape::Const(_) => already,
                other => Shape::Const(Box::new(other)),
            },
            Shape::Function(ret, parms) => Shape::Function(boxed(ret), parms.iter().map(Shape::normalize).collect()),
        }
    }
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (0..BUILTINS.len()).prop_map(Shape::Builtin),
        (0u32..2).prop_map(Shape::Parm),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Pointer(Box::new(s))),
            (inner.clone(), any::<bool>()).prop_map(|(s, rvalue)| Shape::Reference(Box::new(s), rvalue)),
            (inner.clone(), prop::option::of(0u64..4)).prop_map(|(s, len)| Shape::Array(Box::new(s), len)),
            inner.clone().prop_map(|s| Shape::Const(Box::new(s))),
            (inner.clone(), prop::collection::vec(inner, 0..3))
                .prop_map(|(ret, parms)| Shape::Function(Box::new(ret), parms)),
        ]
    })
}

/// Two shapes, equal about a third of the time.
fn shape_pair_strategy() -> impl Strategy<Value = (Shape, Shape)> {
    prop_oneof![
        1 => shape_strategy().prop_map(|s| (s.clone(), s)),
        2 => (shape_strategy(), shape_strategy()),
    ]
}

fn build(tree: &mut Tree, shape: &Shape) -> NodeId {
    match shape {
        Shape::Builtin(i) => BUILTINS[*i],
        Shape::Parm(position) => {
            let index = tree.build_template_parm_index(*position, 1, 1, None, None);
            tree.make_template_parm_type(NodeKind::TemplateTypeParm, index)
        }
        Shape::Pointer(s) => {
            let pointee = build(tree, s);
            tree.build_pointer_type(pointee)
        }
        Shape::Reference(s, rvalue) => {
            let referent = build(tree, s);
            tree.build_reference_type(referent, *rvalue)
        }
        Shape::Array(s, len) => {
            let element = build(tree, s);
            tree.build_array_type(element, *len)
        }
        Shape::Const(s) => {
            let ty = build(tree, s);
            tree.build_qualified_type(ty, Quals::CONST)
        }
        Shape::Function(ret, parms) => {
            let ret = build(tree, ret);
            let parms: Vec<NodeId> = parms.iter().map(|p| build(tree, p)).collect();
            tree.build_function_type(ret, &parms)
        }
    }
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn same_type_follows_structure((a, b) in shape_pair_strategy()) {
        let mut tree = Tree::new();
        let t1 = build(&mut tree, &a);
        let t2 = build(&mut tree, &b);
        let expected = a.normalize() == b.normalize();

        prop_assert_eq!(tree.same_type(t1, t2), expected);
        prop_assert_eq!(tree.comptypes(t1, t2, CompareMode::STRUCTURAL), expected);
    }

    #[test]
    fn same_type_is_reflexive_and_symmetric((a, b) in shape_pair_strategy()) {
        let mut tree = Tree::new();
        let t1 = build(&mut tree, &a);
        let t2 = build(&mut tree, &b);

        prop_assert!(tree.same_type(t1, t1));
        prop_assert_eq!(tree.same_type(t1, t2), tree.same_type(t2, t1));
        prop_assert_eq!(
            tree.comptypes(t1, t2, CompareMode::STRUCTURAL),
            tree.comptypes(t2, t1, CompareMode::STRUCTURAL)
        );
    }

    #[test]
    fn base_relaxation_never_rejects_equal_types(a in shape_strategy()) {
        let mut tree = Tree::new();
        let t1 = build(&mut tree, &a);
        let t2 = build(&mut tree, &a);

        prop_assert!(tree.comptypes(t1, t2, CompareMode::BASE));
        prop_assert!(tree.comptypes(t1, t2, CompareMode::DERIVED));
        prop_assert!(tree.comptypes(t1, t2, CompareMode::REDECLARATION));
    }

    #[test]
    fn identifier_kinds_are_exclusive(text in "[a-z_][a-z0-9_]{0,12}", bits in 0u8..8) {
        let mut tree = Tree::new();
        let id = tree.get_identifier(&text);
        tree.set_identifier_kind(id, IdentifierKind::from_bits(bits));
        let kind = tree.identifier_kind(id);

        prop_assert_eq!(kind.bits(), bits);
        let categories = [
            kind == IdentifierKind::Normal,
            kind.is_keyword(),
            kind.is_ctor(),
            kind.is_dtor(),
            kind.is_simple_op(),
            kind.is_assign_op(),
            kind.is_conv_op(),
            kind == IdentifierKind::ReservedForUdlit,
        ];
        prop_assert_eq!(categories.iter().filter(|&&holds| holds).count(), 1);
        prop_assert_eq!(kind.is_cdtor(), kind.is_ctor() || kind.is_dtor());
        prop_assert_eq!(kind.is_ovl_op(), kind.is_simple_op() || kind.is_assign_op());
        prop_assert_eq!(
            kind.is_any_op(),
            kind.is_ovl_op() || kind.is_conv_op() || kind == IdentifierKind::ReservedForUdlit
        );

        prop_assert_eq!(tree.get_identifier(&text), id);
        prop_assert_eq!(tree.identifier_text(id), text.as_str());
    }

    #[test]
    fn hidden_overloads_stay_in_front(hidden in prop::collection::vec(any::<bool>(), 1..12)) {
        let mut tree = Tree::new();
        let name = tree.get_identifier("f");
        let mut set = None;
        let mut in_front = Vec::new();
        let mut visible = Vec::new();

        for &is_hidden in &hidden {
            let f = tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(NodeId::VOID_TYPE));
            let how = if is_hidden { OvlInsert::Hidden } else { OvlInsert::Plain };
            set = Some(tree.ovl_insert(f, set, how));
            if is_hidden {
                in_front.push(f);
            } else {
                visible.insert(0, f);
            }
        }

        let expected: Vec<NodeId> = in_front.iter().chain(&visible).copied().collect();
        prop_assert_eq!(tree.ovl_iter(set).collect::<Vec<_>>(), expected);
        let rest = tree.ovl_skip_hidden(set);
        prop_assert_eq!(tree.ovl_iter(rest).collect::<Vec<_>>(), visible);
    }
}

// -- Exhaustive Checks --

#[test]
fn use_template_survives_the_raw_encoding() {
    let mut tree = Tree::new();
    let name = tree.get_identifier("f");
    let f = tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(NodeId::VOID_TYPE));
    let class = tree.make_class_type(NodeKind::RecordType, None);

    for raw in 0..4 {
        let value = UseTemplate::from_raw(raw).unwrap();
        assert_eq!(value.raw(), raw);

        tree.set_decl_use_template(f, value);
        assert_eq!(tree.decl_use_template(f), value);
        assert_eq!(tree.decl_template_instantiation(f), value.is_instantiation());

        tree.set_classtype_use_template(class, value);
        assert_eq!(tree.classtype_use_template(class), value);
        assert_eq!(tree.classtype_template_specialization(class), value.is_specialization());
    }
    assert_eq!(UseTemplate::from_raw(4), None);
}

#[test]
fn strip_template_reaches_the_templated_entity() {
    let mut tree = Tree::new();
    let name = tree.get_identifier("f");
    let f = tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(NodeId::VOID_TYPE));
    let tmpl = tree.build_template_decl(Span::DUMMY, Some(name), f);

    assert_eq!(tree.strip_template(tmpl), f);
    assert_eq!(tree.strip_template(f), f);
    assert_eq!(tree.decl_template_result(tmpl), f);
    assert_eq!(tree.strip_template(NodeId::INT_TYPE), NodeId::INT_TYPE);
}
