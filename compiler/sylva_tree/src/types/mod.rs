//! Type records, type construction and the type cache.
//!
//! Types are hash-consed: building a pointer to `int` twice yields the same
//! node. Each type has a main variant (its unqualified form) and variants
//! are chained off it; shape data lives on the main variant and variants
//! read through to it.
//!
//! Following the classic layout, `TREE_TYPE` of a compound type is its
//! component: the pointee of a pointer, the referent of a reference, the
//! element of an array, the return type of a function.
//!
//! Canonical types decide type identity. A type whose components are all
//! canonical is its own canonical type; otherwise its canonical type is the
//! same construction over the canonical components. A type built from a
//! component that needs structural comparison needs it too.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::class::{ClassData, ClassFlags};
use crate::flags::{
    ClassTypeFlags, EnumTypeFlags, FunctionTypeFlags, OtherTypeFlags, TemplateTypeParmFlags, TypeDeclFlags,
    TypeLangFlags,
};
use crate::node::{Node, Payload};
use crate::{NodeId, NodeKind, Span, Tree};

const TYPES: crate::KindSet = crate::KindSet(&[
    NodeKind::VoidType,
    NodeKind::BooleanType,
    NodeKind::IntegerType,
    NodeKind::RealType,
    NodeKind::NullptrType,
    NodeKind::UnknownType,
    NodeKind::PointerType,
    NodeKind::ReferenceType,
    NodeKind::OffsetType,
    NodeKind::ArrayType,
    NodeKind::FunctionType,
    NodeKind::MethodType,
    NodeKind::RecordType,
    NodeKind::UnionType,
    NodeKind::EnumeralType,
    NodeKind::TemplateTypeParm,
    NodeKind::TemplateTemplateParm,
    NodeKind::BoundTemplateTemplateParm,
    NodeKind::TypenameType,
    NodeKind::DecltypeType,
    NodeKind::TypePackExpansion,
]);

bitflags! {
    /// cv-qualifiers (`TYPE_QUALS`).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Quals: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
        const RESTRICT = 1 << 2;
    }
}

/// Kind-specific part of a type record.
#[derive(Clone, Debug)]
pub enum TypeShape {
    /// A qualified variant; the shape is the main variant's.
    Variant,
    /// `void`, `bool`, `decltype(nullptr)`, the unknown type.
    Leaf,
    Integer { precision: u16, unsigned: bool },
    Real { precision: u16 },
    /// The pointee is `TREE_TYPE`.
    Pointer,
    Reference { rvalue: bool },
    /// Pointer to data member of `basetype`; the member type is `TREE_TYPE`.
    Offset { basetype: NodeId },
    /// `None` for arrays of unknown bound.
    Array { length: Option<u64> },
    /// Parameter types; the return type is `TREE_TYPE`.
    Function { parms: Box<[NodeId]> },
    /// Non-static member function of `basetype`.
    Method { basetype: NodeId, parms: Box<[NodeId]> },
    Class(Box<ClassData>),
    Enum {
        underlying: Option<NodeId>,
        /// `TreeList` of enumerators (`TYPE_VALUES`).
        values: Option<NodeId>,
        scoped: bool,
    },
    /// Template type or template template parameter; `index` is its
    /// `TemplateParmIndex` node.
    TemplateParm { index: NodeId },
    /// `TT<args>` for a template template parameter `TT`.
    BoundTemplateTemplateParm { index: NodeId, info: NodeId },
    /// `typename context::name`.
    Typename { context: NodeId, name: NodeId },
    Decltype { expr: NodeId, id_expression: bool },
    PackExpansion { pattern: NodeId },
}

impl TypeShape {
    pub fn name(&self) -> &'static str {
        match self {
            TypeShape::Variant => "variant",
            TypeShape::Leaf => "leaf",
            TypeShape::Integer { .. } => "integer",
            TypeShape::Real { .. } => "real",
            TypeShape::Pointer => "pointer",
            TypeShape::Reference { .. } => "reference",
            TypeShape::Offset { .. } => "offset",
            TypeShape::Array { .. } => "array",
            TypeShape::Function { .. } => "function",
            TypeShape::Method { .. } => "method",
            TypeShape::Class(_) => "class",
            TypeShape::Enum { .. } => "enumeration",
            TypeShape::TemplateParm { .. } => "template parameter",
            TypeShape::BoundTemplateTemplateParm { .. } => "bound template template parameter",
            TypeShape::Typename { .. } => "typename",
            TypeShape::Decltype { .. } => "decltype",
            TypeShape::PackExpansion { .. } => "pack expansion",
        }
    }
}

/// Payload of a type node.
#[derive(Clone, Debug)]
pub struct TypeData {
    pub(crate) lang_flags: TypeLangFlags,
    pub(crate) quals: Quals,
    /// `TYPE_MAIN_VARIANT`.
    pub(crate) main_variant: NodeId,
    /// `TYPE_NEXT_VARIANT`.
    pub(crate) next_variant: Option<NodeId>,
    /// `TYPE_CANONICAL`; `None` requires structural comparison.
    pub(crate) canonical: Option<NodeId>,
    /// `TYPE_NAME`: the type's declaration.
    pub(crate) name: Option<NodeId>,
    /// `TYPE_CONTEXT`.
    pub(crate) context: Option<NodeId>,
    /// Size in bytes; `None` while incomplete.
    pub(crate) size: Option<u64>,
    pub(crate) shape: TypeShape,
}

/// Key of the type cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TypeKey {
    Qualified(NodeId, Quals),
    Pointer(NodeId),
    Reference(NodeId, bool),
    Offset(NodeId, NodeId),
    Array(NodeId, Option<u64>),
    Function(NodeId, Box<[NodeId]>),
    Method(NodeId, NodeId, Box<[NodeId]>),
    PackExpansion(NodeId),
    Typename(NodeId, NodeId),
}

/// Identity of a template parameter for canonical-type sharing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct TemplateParmKey {
    kind: NodeKind,
    level: u32,
    index: u32,
    pack: bool,
}

/// Hash-consed types.
#[derive(Clone, Debug, Default)]
pub(crate) struct TypeTable {
    cache: FxHashMap<TypeKey, NodeId>,
    /// Canonical template parameter per (kind, level, index, pack).
    canonical_parms: FxHashMap<TemplateParmKey, NodeId>,
}

/// How a new type's canonical type is decided.
enum Canonical {
    /// The type is its own canonical type.
    Own,
    /// Compare structurally.
    Structural,
    Other(NodeId),
}

/// Canonical forms of a construction's components.
enum CanonicalParts {
    /// All components are canonical already.
    Own,
    Structural,
    Rebuild(Vec<NodeId>),
}

impl Tree {
    // === Construction ===

    fn new_type(
        &mut self,
        kind: NodeKind,
        shape: TypeShape,
        component: Option<NodeId>,
        canonical: Canonical,
        size: Option<u64>,
    ) -> NodeId {
        let data = TypeData {
            lang_flags: TypeLangFlags::for_kind(kind),
            quals: Quals::empty(),
            main_variant: NodeId::ERROR_MARK,
            next_variant: None,
            canonical: None,
            name: None,
            context: None,
            size,
            shape,
        };
        let id = self.push(Node::new(kind, Span::DUMMY, Payload::Type(Box::new(data))));
        self.set_ty(id, component);
        let data = self.type_data_mut(id, "new_type");
        data.main_variant = id;
        data.canonical = match canonical {
            Canonical::Own => Some(id),
            Canonical::Structural => None,
            Canonical::Other(other) => Some(other),
        };
        id
    }

    fn intern_type(&mut self, key: TypeKey, build: impl FnOnce(&mut Tree) -> NodeId) -> NodeId {
        if let Some(&id) = self.types.cache.get(&key) {
            return id;
        }
        let id = build(self);
        trace!(%id, ?key, "interned type");
        self.types.cache.insert(key, id);
        id
    }

    #[track_caller]
    fn canonical_parts(&self, parts: &[NodeId]) -> CanonicalParts {
        let mut canonical = Vec::with_capacity(parts.len());
        for &part in parts {
            match self.type_canonical(part) {
                Some(c) => canonical.push(c),
                None => return CanonicalParts::Structural,
            }
        }
        if canonical.as_slice() == parts {
            CanonicalParts::Own
        } else {
            CanonicalParts::Rebuild(canonical)
        }
    }

    /// Create the builtin types at their fixed ids.
    pub(crate) fn init_builtin_types(&mut self) {
        let builtins = [
            (NodeId::VOID_TYPE, NodeKind::VoidType, TypeShape::Leaf, None),
            (NodeId::BOOL_TYPE, NodeKind::BooleanType, TypeShape::Leaf, Some(1)),
            (
                NodeId::CHAR_TYPE,
                NodeKind::IntegerType,
                TypeShape::Integer {
                    precision: 8,
                    unsigned: false,
                },
                Some(1),
            ),
            (
                NodeId::INT_TYPE,
                NodeKind::IntegerType,
                TypeShape::Integer {
                    precision: 32,
                    unsigned: false,
                },
                Some(4),
            ),
            (
                NodeId::UNSIGNED_TYPE,
                NodeKind::IntegerType,
                TypeShape::Integer {
                    precision: 32,
                    unsigned: true,
                },
                Some(4),
            ),
            (
                NodeId::LONG_TYPE,
                NodeKind::IntegerType,
                TypeShape::Integer {
                    precision: 64,
                    unsigned: false,
                },
                Some(8),
            ),
            (
                NodeId::SIZE_TYPE,
                NodeKind::IntegerType,
                TypeShape::Integer {
                    precision: 64,
                    unsigned: true,
                },
                Some(8),
            ),
            (NodeId::DOUBLE_TYPE, NodeKind::RealType, TypeShape::Real { precision: 64 }, Some(8)),
            (NodeId::NULLPTR_TYPE, NodeKind::NullptrType, TypeShape::Leaf, Some(8)),
            (NodeId::UNKNOWN_TYPE, NodeKind::UnknownType, TypeShape::Leaf, None),
        ];
        for (expected, kind, shape, size) in builtins {
            let id = self.new_type(kind, shape, None, Canonical::Own, size);
            debug_assert_eq!(id, expected);
        }
    }

    /// `build_pointer_type`.
    #[track_caller]
    pub fn build_pointer_type(&mut self, pointee: NodeId) -> NodeId {
        self.intern_type(TypeKey::Pointer(pointee), |tree| {
            let canonical = match tree.canonical_parts(&[pointee]) {
                CanonicalParts::Own => Canonical::Own,
                CanonicalParts::Structural => Canonical::Structural,
                CanonicalParts::Rebuild(parts) => Canonical::Other(tree.build_pointer_type(parts[0])),
            };
            tree.new_type(NodeKind::PointerType, TypeShape::Pointer, Some(pointee), canonical, Some(8))
        })
    }

    /// `cp_build_reference_type`: lvalue or rvalue reference.
    #[track_caller]
    pub fn build_reference_type(&mut self, referent: NodeId, rvalue: bool) -> NodeId {
        self.intern_type(TypeKey::Reference(referent, rvalue), |tree| {
            let canonical = match tree.canonical_parts(&[referent]) {
                CanonicalParts::Own => Canonical::Own,
                CanonicalParts::Structural => Canonical::Structural,
                CanonicalParts::Rebuild(parts) => Canonical::Other(tree.build_reference_type(parts[0], rvalue)),
            };
            tree.new_type(
                NodeKind::ReferenceType,
                TypeShape::Reference { rvalue },
                Some(referent),
                canonical,
                Some(8),
            )
        })
    }

    /// `build_offset_type`: pointer to a data member of type `member` in
    /// class `basetype`.
    #[track_caller]
    pub fn build_offset_type(&mut self, basetype: NodeId, member: NodeId) -> NodeId {
        self.intern_type(TypeKey::Offset(basetype, member), |tree| {
            let canonical = match tree.canonical_parts(&[basetype, member]) {
                CanonicalParts::Own => Canonical::Own,
                CanonicalParts::Structural => Canonical::Structural,
                CanonicalParts::Rebuild(parts) => Canonical::Other(tree.build_offset_type(parts[0], parts[1])),
            };
            tree.new_type(
                NodeKind::OffsetType,
                TypeShape::Offset { basetype },
                Some(member),
                canonical,
                Some(8),
            )
        })
    }

    /// `build_cplus_array_type`; `length` is `None` for an unknown bound.
    #[track_caller]
    pub fn build_array_type(&mut self, element: NodeId, length: Option<u64>) -> NodeId {
        self.intern_type(TypeKey::Array(element, length), |tree| {
            let canonical = match tree.canonical_parts(&[element]) {
                CanonicalParts::Own => Canonical::Own,
                CanonicalParts::Structural => Canonical::Structural,
                CanonicalParts::Rebuild(parts) => Canonical::Other(tree.build_array_type(parts[0], length)),
            };
            let size = length.and_then(|n| tree.type_size(element).map(|s| s * n));
            tree.new_type(NodeKind::ArrayType, TypeShape::Array { length }, Some(element), canonical, size)
        })
    }

    /// `build_function_type`.
    #[track_caller]
    pub fn build_function_type(&mut self, ret: NodeId, parms: &[NodeId]) -> NodeId {
        self.intern_type(TypeKey::Function(ret, parms.into()), |tree| {
            let mut parts = vec![ret];
            parts.extend_from_slice(parms);
            let canonical = match tree.canonical_parts(&parts) {
                CanonicalParts::Own => Canonical::Own,
                CanonicalParts::Structural => Canonical::Structural,
                CanonicalParts::Rebuild(parts) => Canonical::Other(tree.build_function_type(parts[0], &parts[1..])),
            };
            tree.new_type(
                NodeKind::FunctionType,
                TypeShape::Function { parms: parms.into() },
                Some(ret),
                canonical,
                None,
            )
        })
    }

    /// `build_method_type_directly`: a non-static member function of
    /// `basetype`. `parms` excludes the implicit object parameter.
    #[track_caller]
    pub fn build_method_type(&mut self, basetype: NodeId, ret: NodeId, parms: &[NodeId]) -> NodeId {
        self.intern_type(TypeKey::Method(basetype, ret, parms.into()), |tree| {
            let mut parts = vec![basetype, ret];
            parts.extend_from_slice(parms);
            let canonical = match tree.canonical_parts(&parts) {
                CanonicalParts::Own => Canonical::Own,
                CanonicalParts::Structural => Canonical::Structural,
                CanonicalParts::Rebuild(parts) => {
                    Canonical::Other(tree.build_method_type(parts[0], parts[1], &parts[2..]))
                }
            };
            tree.new_type(
                NodeKind::MethodType,
                TypeShape::Method {
                    basetype,
                    parms: parms.into(),
                },
                Some(ret),
                canonical,
                None,
            )
        })
    }

    /// `cp_build_qualified_type`: the variant of `ty` with exactly `quals`.
    #[track_caller]
    pub fn build_qualified_type(&mut self, ty: NodeId, quals: Quals) -> NodeId {
        let main = self.type_main_variant(ty);
        if quals.is_empty() {
            return main;
        }
        self.intern_type(TypeKey::Qualified(main, quals), |tree| {
            let canonical = match tree.type_canonical(main) {
                None => Canonical::Structural,
                Some(c) if c == main => Canonical::Own,
                Some(c) => Canonical::Other(tree.build_qualified_type(c, quals)),
            };
            let main_data = tree.type_data(main, "build_qualified_type");
            let data = TypeData {
                lang_flags: main_data.lang_flags,
                quals,
                main_variant: main,
                next_variant: main_data.next_variant,
                canonical: None,
                name: main_data.name,
                context: main_data.context,
                size: None,
                shape: TypeShape::Variant,
            };
            let kind = tree.kind(main);
            let component = tree.ty(main);
            let id = tree.push(Node::new(kind, Span::DUMMY, Payload::Type(Box::new(data))));
            tree.set_ty(id, component);
            tree.type_data_mut(id, "build_qualified_type").canonical = match canonical {
                Canonical::Own => Some(id),
                Canonical::Structural => None,
                Canonical::Other(other) => Some(other),
            };
            tree.type_data_mut(main, "build_qualified_type").next_variant = Some(id);
            id
        })
    }

    /// Build a class type with its implicit typedef (`make_class_type`).
    #[track_caller]
    pub fn make_class_type(&mut self, kind: NodeKind, name: Option<NodeId>) -> NodeId {
        self.check_kind_of_new(kind, crate::KindSet::CLASS_TYPES, "make_class_type");
        let id = self.new_type(kind, TypeShape::Class(Box::default()), None, Canonical::Own, None);
        self.set_lang_flag(id, ClassTypeFlags::CLASS_TYPE, true);
        self.set_classtype_flag(id, ClassFlags::INTERFACE_UNKNOWN, true);
        self.attach_implicit_typedef(id, name);
        self.init_class_binfo(id);
        id
    }

    /// Build an enumeration type (`start_enum`).
    #[track_caller]
    pub fn make_enum_type(&mut self, name: Option<NodeId>, underlying: Option<NodeId>, scoped: bool) -> NodeId {
        let size = underlying.and_then(|u| self.type_size(u));
        let id = self.new_type(
            NodeKind::EnumeralType,
            TypeShape::Enum {
                underlying,
                values: None,
                scoped,
            },
            None,
            Canonical::Own,
            size,
        );
        self.set_lang_flag(id, EnumTypeFlags::FIXED_UNDERLYING, underlying.is_some());
        self.attach_implicit_typedef(id, name);
        id
    }

    fn attach_implicit_typedef(&mut self, ty: NodeId, name: Option<NodeId>) {
        let Some(name) = name else { return };
        let decl = self.build_lang_decl(NodeKind::TypeDecl, Span::DUMMY, Some(name), Some(ty));
        self.set_lang_flag(decl, TypeDeclFlags::IMPLICIT_TYPEDEF, true);
        self.set_decl_artificial(decl, true);
        self.type_data_mut(ty, "attach_implicit_typedef").name = Some(decl);
    }

    /// Build a template type parameter (`TEMPLATE_TYPE_PARM`) or template
    /// template parameter around its index node. Parameters with the same
    /// level and position share a canonical type.
    #[track_caller]
    pub fn make_template_parm_type(&mut self, kind: NodeKind, index: NodeId) -> NodeId {
        const PARMS: crate::KindSet = crate::KindSet(&[NodeKind::TemplateTypeParm, NodeKind::TemplateTemplateParm]);
        self.check_kind_of_new(kind, PARMS, "make_template_parm_type");
        let key = TemplateParmKey {
            kind,
            level: self.template_parm_level(index),
            index: self.template_parm_idx(index),
            pack: self.template_parm_parameter_pack(index),
        };
        let canonical = self.types.canonical_parms.get(&key).copied();
        let canonical = canonical.map_or(Canonical::Own, Canonical::Other);
        let id = self.new_type(kind, TypeShape::TemplateParm { index }, None, canonical, None);
        self.types.canonical_parms.entry(key).or_insert(id);
        if kind == NodeKind::TemplateTypeParm {
            self.set_lang_flag(id, TemplateTypeParmFlags::DEPENDENT, true);
            self.set_lang_flag(id, TemplateTypeParmFlags::DEPENDENT_VALID, true);
        } else {
            self.set_lang_flag(id, OtherTypeFlags::DEPENDENT, true);
            self.set_lang_flag(id, OtherTypeFlags::DEPENDENT_VALID, true);
        }
        id
    }

    /// `TT<args>` for a template template parameter; `info` is a template
    /// info node naming the parameter and the arguments.
    #[track_caller]
    pub fn make_bound_template_template_parm(&mut self, index: NodeId, info: NodeId) -> NodeId {
        let id = self.new_type(
            NodeKind::BoundTemplateTemplateParm,
            TypeShape::BoundTemplateTemplateParm { index, info },
            None,
            Canonical::Structural,
            None,
        );
        self.set_lang_flag(id, OtherTypeFlags::DEPENDENT, true);
        self.set_lang_flag(id, OtherTypeFlags::DEPENDENT_VALID, true);
        id
    }

    /// `build_typename_type`: `typename context::name`.
    #[track_caller]
    pub fn build_typename_type(&mut self, context: NodeId, name: NodeId) -> NodeId {
        self.intern_type(TypeKey::Typename(context, name), |tree| {
            let id = tree.new_type(
                NodeKind::TypenameType,
                TypeShape::Typename { context, name },
                None,
                Canonical::Own,
                None,
            );
            tree.type_data_mut(id, "build_typename_type").context = Some(context);
            tree.set_lang_flag(id, OtherTypeFlags::DEPENDENT, true);
            tree.set_lang_flag(id, OtherTypeFlags::DEPENDENT_VALID, true);
            id
        })
    }

    /// `finish_decltype_type` for a dependent operand. Always compared
    /// structurally.
    pub fn build_decltype_type(&mut self, expr: NodeId, id_expression: bool) -> NodeId {
        self.new_type(
            NodeKind::DecltypeType,
            TypeShape::Decltype { expr, id_expression },
            None,
            Canonical::Structural,
            None,
        )
    }

    /// `make_pack_expansion` over a type pattern.
    #[track_caller]
    pub fn make_type_pack_expansion(&mut self, pattern: NodeId) -> NodeId {
        self.intern_type(TypeKey::PackExpansion(pattern), |tree| {
            let canonical = match tree.canonical_parts(&[pattern]) {
                CanonicalParts::Own => Canonical::Own,
                CanonicalParts::Structural => Canonical::Structural,
                CanonicalParts::Rebuild(parts) => Canonical::Other(tree.make_type_pack_expansion(parts[0])),
            };
            tree.new_type(
                NodeKind::TypePackExpansion,
                TypeShape::PackExpansion { pattern },
                None,
                canonical,
                None,
            )
        })
    }

    #[track_caller]
    fn check_kind_of_new(&self, kind: NodeKind, kinds: crate::KindSet, accessor: &'static str) {
        if !kinds.contains(kind) {
            crate::check::violation(ContractViolation::KindMismatch {
                accessor,
                node: NodeId::ERROR_MARK,
                found: kind,
                expected: kinds,
            });
        }
    }

    // === Record access ===

    pub(crate) fn try_type_data(&self, id: NodeId, accessor: &'static str) -> Result<&TypeData, ContractViolation> {
        self.try_payload(id, TYPES, accessor, "type", |payload| match payload {
            Payload::Type(data) => Some(&**data),
            _ => None,
        })
    }

    #[track_caller]
    pub(crate) fn type_data(&self, id: NodeId, accessor: &'static str) -> &TypeData {
        self.try_type_data(id, accessor).or_violation()
    }

    #[track_caller]
    pub(crate) fn type_data_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut TypeData {
        self.try_payload_mut(id, TYPES, accessor, "type", |payload| match payload {
            Payload::Type(data) => Some(&mut **data),
            _ => None,
        })
        .or_violation()
    }

    /// Shape of `id`, read through its main variant.
    #[track_caller]
    pub fn type_shape(&self, id: NodeId) -> &TypeShape {
        let main = self.type_main_variant(id);
        &self.type_data(main, "type_shape").shape
    }

    #[track_caller]
    pub(crate) fn type_shape_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut TypeShape {
        let main = self.type_main_variant(id);
        &mut self.type_data_mut(main, accessor).shape
    }

    // === Accessors ===

    /// `TYPE_MAIN_VARIANT`.
    #[track_caller]
    pub fn type_main_variant(&self, id: NodeId) -> NodeId {
        self.type_data(id, "type_main_variant").main_variant
    }

    /// Variants of a main variant, itself first (`TYPE_NEXT_VARIANT` walk).
    #[track_caller]
    pub fn type_variants(&self, id: NodeId) -> Vec<NodeId> {
        let main = self.type_main_variant(id);
        std::iter::successors(Some(main), |&v| self.type_data(v, "type_variants").next_variant).collect()
    }

    /// `TYPE_CANONICAL`.
    #[track_caller]
    pub fn type_canonical(&self, id: NodeId) -> Option<NodeId> {
        self.type_data(id, "type_canonical").canonical
    }

    /// `TYPE_STRUCTURAL_EQUALITY_P`.
    #[track_caller]
    pub fn type_structural_equality_p(&self, id: NodeId) -> bool {
        self.type_canonical(id).is_none()
    }

    /// `cp_type_quals`.
    #[track_caller]
    pub fn type_quals(&self, id: NodeId) -> Quals {
        self.type_data(id, "type_quals").quals
    }

    /// `CP_TYPE_CONST_P`.
    #[track_caller]
    pub fn cp_type_const_p(&self, id: NodeId) -> bool {
        self.type_quals(id).contains(Quals::CONST)
    }

    /// `TYPE_NAME`.
    #[track_caller]
    pub fn type_name(&self, id: NodeId) -> Option<NodeId> {
        self.type_data(id, "type_name").name
    }

    #[track_caller]
    pub fn set_type_name(&mut self, id: NodeId, decl: Option<NodeId>) {
        for variant in self.type_variants(id) {
            self.type_data_mut(variant, "set_type_name").name = decl;
        }
    }

    /// `TYPE_IDENTIFIER`.
    #[track_caller]
    pub fn type_identifier(&self, id: NodeId) -> Option<NodeId> {
        self.type_name(id).and_then(|decl| self.decl_name(decl))
    }

    /// `TYPE_CONTEXT`.
    #[track_caller]
    pub fn type_context(&self, id: NodeId) -> Option<NodeId> {
        self.type_data(id, "type_context").context
    }

    #[track_caller]
    pub fn set_type_context(&mut self, id: NodeId, context: Option<NodeId>) {
        let main = self.type_main_variant(id);
        for variant in self.type_variants(main) {
            self.type_data_mut(variant, "set_type_context").context = context;
        }
    }

    /// Size in bytes of a complete type.
    #[track_caller]
    pub fn type_size(&self, id: NodeId) -> Option<u64> {
        let main = self.type_main_variant(id);
        self.type_data(main, "type_size").size
    }

    /// Complete a type by giving it a size.
    #[track_caller]
    pub fn set_type_size(&mut self, id: NodeId, size: u64) {
        let main = self.type_main_variant(id);
        self.type_data_mut(main, "set_type_size").size = Some(size);
    }

    /// `COMPLETE_TYPE_P`.
    #[track_caller]
    pub fn complete_type_p(&self, id: NodeId) -> bool {
        self.type_size(id).is_some()
    }

    /// `TYPE_PTRDATAMEM_P` and friends: the class of a pointer to member.
    #[track_caller]
    pub fn type_offset_basetype(&self, id: NodeId) -> NodeId {
        match self.type_shape(id) {
            TypeShape::Offset { basetype } => *basetype,
            other => self.shape_mismatch(id, "type_offset_basetype", other, "offset"),
        }
    }

    /// `TYPE_METHOD_BASETYPE`.
    #[track_caller]
    pub fn type_method_basetype(&self, id: NodeId) -> NodeId {
        match self.type_shape(id) {
            TypeShape::Method { basetype, .. } => *basetype,
            other => self.shape_mismatch(id, "type_method_basetype", other, "method"),
        }
    }

    /// Parameter types of a function or method type (`TYPE_ARG_TYPES`
    /// without the object parameter).
    #[track_caller]
    pub fn type_arg_types(&self, id: NodeId) -> &[NodeId] {
        match self.type_shape(id) {
            TypeShape::Function { parms } | TypeShape::Method { parms, .. } => parms,
            other => self.shape_mismatch(id, "type_arg_types", other, "function"),
        }
    }

    /// `TYPE_REF_IS_RVALUE`.
    #[track_caller]
    pub fn type_ref_is_rvalue(&self, id: NodeId) -> bool {
        match self.type_shape(id) {
            TypeShape::Reference { rvalue } => *rvalue,
            other => self.shape_mismatch(id, "type_ref_is_rvalue", other, "reference"),
        }
    }

    /// Bound of an array type.
    #[track_caller]
    pub fn type_array_length(&self, id: NodeId) -> Option<u64> {
        match self.type_shape(id) {
            TypeShape::Array { length } => *length,
            other => self.shape_mismatch(id, "type_array_length", other, "array"),
        }
    }

    /// `TEMPLATE_TYPE_PARM_INDEX`.
    #[track_caller]
    pub fn template_type_parm_index(&self, id: NodeId) -> NodeId {
        match self.type_shape(id) {
            TypeShape::TemplateParm { index } | TypeShape::BoundTemplateTemplateParm { index, .. } => *index,
            other => self.shape_mismatch(id, "template_type_parm_index", other, "template parameter"),
        }
    }

    /// `ENUM_UNDERLYING_TYPE`.
    #[track_caller]
    pub fn enum_underlying_type(&self, id: NodeId) -> Option<NodeId> {
        match self.type_shape(id) {
            TypeShape::Enum { underlying, .. } => *underlying,
            other => self.shape_mismatch(id, "enum_underlying_type", other, "enumeration"),
        }
    }

    /// `SCOPED_ENUM_P`.
    #[track_caller]
    pub fn scoped_enum_p(&self, id: NodeId) -> bool {
        matches!(self.type_shape(id), TypeShape::Enum { scoped: true, .. })
    }

    /// `TYPE_VALUES`.
    #[track_caller]
    pub fn type_values(&self, id: NodeId) -> Option<NodeId> {
        match self.type_shape(id) {
            TypeShape::Enum { values, .. } => *values,
            other => self.shape_mismatch(id, "type_values", other, "enumeration"),
        }
    }

    #[track_caller]
    pub fn set_type_values(&mut self, id: NodeId, list: Option<NodeId>) {
        let accessor = "set_type_values";
        match self.type_shape_mut(id, accessor) {
            TypeShape::Enum { values, .. } => *values = list,
            other => {
                let found = other.name();
                crate::check::violation(ContractViolation::VariantMismatch {
                    accessor,
                    node: id,
                    kind: NodeKind::EnumeralType,
                    found,
                    expected: "enumeration",
                })
            }
        }
    }

    #[track_caller]
    fn shape_mismatch(&self, id: NodeId, accessor: &'static str, found: &TypeShape, expected: &'static str) -> ! {
        crate::check::violation(ContractViolation::VariantMismatch {
            accessor,
            node: id,
            kind: self.kind(id),
            found: found.name(),
            expected,
        })
    }

    // === Dependence ===

    /// Cached dependence of a type: `None` until computed
    /// (`TYPE_DEPENDENT_P_VALID`).
    #[track_caller]
    pub fn type_dependent_cached(&self, id: NodeId) -> Option<bool> {
        let main = self.type_main_variant(id);
        let (dependent, valid) = match self.type_data(main, "type_dependent_cached").lang_flags {
            TypeLangFlags::Class(f) => (
                f.contains(ClassTypeFlags::DEPENDENT),
                f.contains(ClassTypeFlags::DEPENDENT_VALID),
            ),
            TypeLangFlags::Enum(f) => (
                f.contains(EnumTypeFlags::DEPENDENT),
                f.contains(EnumTypeFlags::DEPENDENT_VALID),
            ),
            TypeLangFlags::Function(f) => (
                f.contains(FunctionTypeFlags::DEPENDENT),
                f.contains(FunctionTypeFlags::DEPENDENT_VALID),
            ),
            TypeLangFlags::TemplateTypeParm(f) => (
                f.contains(TemplateTypeParmFlags::DEPENDENT),
                f.contains(TemplateTypeParmFlags::DEPENDENT_VALID),
            ),
            TypeLangFlags::Other(f) => (
                f.contains(OtherTypeFlags::DEPENDENT),
                f.contains(OtherTypeFlags::DEPENDENT_VALID),
            ),
            TypeLangFlags::Unused => (false, false),
        };
        valid.then_some(dependent)
    }

    /// Record the dependence of a type.
    #[track_caller]
    pub fn set_type_dependent(&mut self, id: NodeId, dependent: bool) {
        let main = self.type_main_variant(id);
        match &mut self.type_data_mut(main, "set_type_dependent").lang_flags {
            TypeLangFlags::Class(f) => {
                f.set(ClassTypeFlags::DEPENDENT, dependent);
                f.insert(ClassTypeFlags::DEPENDENT_VALID);
            }
            TypeLangFlags::Enum(f) => {
                f.set(EnumTypeFlags::DEPENDENT, dependent);
                f.insert(EnumTypeFlags::DEPENDENT_VALID);
            }
            TypeLangFlags::Function(f) => {
                f.set(FunctionTypeFlags::DEPENDENT, dependent);
                f.insert(FunctionTypeFlags::DEPENDENT_VALID);
            }
            TypeLangFlags::TemplateTypeParm(f) => {
                f.set(TemplateTypeParmFlags::DEPENDENT, dependent);
                f.insert(TemplateTypeParmFlags::DEPENDENT_VALID);
            }
            TypeLangFlags::Other(f) => {
                f.set(OtherTypeFlags::DEPENDENT, dependent);
                f.insert(OtherTypeFlags::DEPENDENT_VALID);
            }
            TypeLangFlags::Unused => {}
        }
    }

    // === Classification ===

    /// `CLASS_TYPE_P`: a record or union that is a class in the source
    /// sense.
    #[track_caller]
    pub fn class_type_p(&self, id: NodeId) -> bool {
        self.kind(id).is_record_or_union() && self.lang_flag(id, ClassTypeFlags::CLASS_TYPE)
    }

    /// `TYPE_PTR_P`.
    #[track_caller]
    pub fn type_ptr_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::PointerType
    }

    /// `TYPE_REF_P`.
    #[track_caller]
    pub fn type_ref_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::ReferenceType
    }

    /// `INTEGRAL_TYPE_P`.
    #[track_caller]
    pub fn integral_type_p(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::IntegerType | NodeKind::BooleanType)
    }

    /// `TYPE_UNSIGNED`.
    #[track_caller]
    pub fn type_unsigned(&self, id: NodeId) -> bool {
        matches!(self.type_shape(id), TypeShape::Integer { unsigned: true, .. })
    }

    /// `TYPE_PRECISION` of an arithmetic type.
    #[track_caller]
    pub fn type_precision(&self, id: NodeId) -> Option<u16> {
        match self.type_shape(id) {
            TypeShape::Integer { precision, .. } | TypeShape::Real { precision } => Some(*precision),
            _ if self.kind(id) == NodeKind::BooleanType => Some(1),
            _ => None,
        }
    }

    /// `TYPE_PTRMEMFUNC_P`.
    #[track_caller]
    pub fn type_ptrmemfunc_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::RecordType && self.lang_flag(id, ClassTypeFlags::PTRMEMFUNC)
    }

    /// `TYPE_PTRMEM_P`: pointer to data member or to member function.
    #[track_caller]
    pub fn type_ptrmem_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::OffsetType || self.type_ptrmemfunc_p(id)
    }
}
