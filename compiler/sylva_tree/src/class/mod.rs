//! Class-type extension data.
//!
//! Records and unions that are classes in the source sense carry a flat
//! [`ClassData`] in their type shape: base-class layout, special member
//! state, friends, vtable bookkeeping and template information. Qualified
//! variants share the main variant's record.
//!
//! Special members are synthesized lazily. Each of the six starts out
//! [`SpecialMemberState::Pending`]; a user declaration makes it `Declared`,
//! and resolution decides between `Lazy` (implicitly declarable, not built
//! yet) and `Absent`.

mod binfo;

pub use binfo::{Access, BaseInfo, BaseSpec, BinfoFlags, VirtualEntry};

use bitflags::bitflags;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::check::{ContractViolation, OrViolation};
use crate::decl::DeclCoreFlags;
use crate::flags::ClassTypeFlags;
use crate::identifier::{OperatorName, OvlOpCode};
use crate::template::UseTemplate;
use crate::types::{Quals, TypeShape};
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

bitflags! {
    /// Boolean class properties (`CLASSTYPE_*`, `TYPE_HAS_*`).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u32 {
        /// Has a class-specific `operator delete` (`TYPE_GETS_REG_DELETE`).
        const GETS_DELETE = 1 << 0;
        /// Has a class-specific `operator delete[]`.
        const GETS_VEC_DELETE = 1 << 1;
        /// `new[]` of this type needs an array cookie.
        const VEC_NEW_USES_COOKIE = 1 << 2;
        /// Has a conversion operator (`TYPE_HAS_CONVERSION`).
        const HAS_CONVERSION = 1 << 3;
        /// Copy constructor takes a const reference.
        const HAS_CONST_COPY_CTOR = 1 << 4;
        /// Copy assignment takes a const reference.
        const HAS_CONST_COPY_ASSIGN = 1 << 5;
        /// Has an `std::initializer_list` constructor.
        const HAS_LIST_CTOR = 1 << 6;
        /// Has a constexpr constructor other than copy or move.
        const HAS_CONSTEXPR_CTOR = 1 << 7;
        /// Declares `operator new`.
        const HAS_NEW_OPERATOR = 1 << 8;
        /// Declares `operator new[]`.
        const HAS_ARRAY_NEW_OPERATOR = 1 << 9;
        /// Between the opening and closing brace of the definition.
        const BEING_DEFINED = 1 << 10;
        /// A virtual base is reached along more than one path.
        const DIAMOND_SHAPED = 1 << 11;
        /// A non-virtual base appears more than once.
        const REPEATED_BASE = 1 << 12;
        /// Has a mutable member, possibly nested.
        const HAS_MUTABLE = 1 << 13;
        /// Not POD for layout purposes.
        const NON_LAYOUT_POD = 1 << 14;
        /// Not standard layout.
        const NON_STD_LAYOUT = 1 << 15;
        /// Zero-initialization is not all-bits-zero.
        const NON_ZERO_INIT = 1 << 16;
        /// No non-static data members and no virtual bases.
        const EMPTY = 1 << 17;
        /// Only a vtable pointer, no other data (`CLASSTYPE_NEARLY_EMPTY_P`).
        const NEARLY_EMPTY = 1 << 18;
        /// Contains an empty class as a subobject.
        const CONTAINS_EMPTY_CLASS = 1 << 19;
        /// vtables and typeinfo are emitted elsewhere.
        const INTERFACE_ONLY = 1 << 20;
        /// Whether the interface is known has not been decided.
        const INTERFACE_UNKNOWN = 1 << 21;
        /// Not an aggregate (`CLASSTYPE_NON_AGGREGATE`).
        const NON_AGGREGATE = 1 << 22;
        /// Member functions may be emitted lazily.
        const KEY_METHOD_LATE = 1 << 23;
    }
}

/// Synthesis state of one special member.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum SpecialMemberState {
    /// Not decided yet.
    #[default]
    Pending,
    /// Implicitly declarable; will be built on first use.
    Lazy,
    /// Declared, by the user or by synthesis.
    Declared,
    /// Known not to exist.
    Absent,
}

impl SpecialMemberState {
    /// `Some(true)` if the member exists or will, `None` while undecided.
    pub fn exists(self) -> Option<bool> {
        match self {
            SpecialMemberState::Pending => None,
            SpecialMemberState::Lazy | SpecialMemberState::Declared => Some(true),
            SpecialMemberState::Absent => Some(false),
        }
    }
}

/// The six special member functions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpecialMember {
    DefaultCtor,
    CopyCtor,
    MoveCtor,
    CopyAssign,
    MoveAssign,
    Destructor,
}

impl SpecialMember {
    pub const ALL: [SpecialMember; 6] = [
        SpecialMember::DefaultCtor,
        SpecialMember::CopyCtor,
        SpecialMember::MoveCtor,
        SpecialMember::CopyAssign,
        SpecialMember::MoveAssign,
        SpecialMember::Destructor,
    ];

    const fn slot(self) -> usize {
        self as usize
    }

    fn is_ctor(self) -> bool {
        matches!(
            self,
            SpecialMember::DefaultCtor | SpecialMember::CopyCtor | SpecialMember::MoveCtor
        )
    }
}

/// Extension record of a class type (`lang_type`).
#[derive(Clone, Debug, Default)]
pub struct ClassData {
    pub(crate) flags: ClassFlags,
    pub(crate) special: [SpecialMemberState; 6],
    /// `TYPE_BINFO`.
    pub(crate) binfo: Option<NodeId>,
    /// `CLASSTYPE_PRIMARY_BINFO`.
    pub(crate) primary_binfo: Option<NodeId>,
    /// `CLASSTYPE_VBASECLASSES`: `None` until laid out.
    pub(crate) vbases: Option<Vec<NodeId>>,
    /// `CLASSTYPE_AS_BASE`: the type used when this class is a base.
    pub(crate) as_base: Option<NodeId>,
    /// `CLASSTYPE_KEY_METHOD`.
    pub(crate) key_method: Option<NodeId>,
    /// `CLASSTYPE_MEMBER_VEC`.
    pub(crate) members: Vec<NodeId>,
    /// `CLASSTYPE_DECL_LIST`: members and friends in declaration order.
    pub(crate) decl_list: Vec<NodeId>,
    /// `CLASSTYPE_PURE_VIRTUALS`.
    pub(crate) pure_virtuals: Vec<NodeId>,
    /// `CLASSTYPE_FRIEND_CLASSES`.
    pub(crate) friend_classes: Vec<NodeId>,
    /// `CLASSTYPE_BEFRIENDING_CLASSES`.
    pub(crate) befriending_classes: Vec<NodeId>,
    /// `CLASSTYPE_LAMBDA_EXPR`.
    pub(crate) lambda_expr: Option<NodeId>,
    /// `CLASSTYPE_VCALL_INDICES`: function to vcall slot.
    pub(crate) vcall_indices: Vec<(NodeId, u32)>,
    /// `CLASSTYPE_VTABLES`, primary first.
    pub(crate) vtables: Vec<NodeId>,
    /// `CLASSTYPE_TYPEINFO_VAR`.
    pub(crate) typeinfo_var: Option<NodeId>,
    /// `CLASSTYPE_TEMPLATE_INFO`.
    pub(crate) template_info: Option<NodeId>,
    pub(crate) use_template: UseTemplate,
}

impl Tree {
    // === Record access ===

    pub(crate) fn try_class_data(&self, ty: NodeId, accessor: &'static str) -> Result<&ClassData, ContractViolation> {
        self.check_kind(ty, KindSet::CLASS_TYPES, accessor)?;
        let main = self.try_type_data(ty, accessor)?.main_variant;
        match &self.try_type_data(main, accessor)?.shape {
            TypeShape::Class(data) => Ok(&**data),
            other => Err(ContractViolation::VariantMismatch {
                accessor,
                node: ty,
                kind: self.kind(ty),
                found: other.name(),
                expected: "class",
            }),
        }
    }

    #[track_caller]
    pub(crate) fn class_data(&self, ty: NodeId, accessor: &'static str) -> &ClassData {
        self.try_class_data(ty, accessor).or_violation()
    }

    #[track_caller]
    pub(crate) fn class_data_mut(&mut self, ty: NodeId, accessor: &'static str) -> &mut ClassData {
        self.check_kind(ty, KindSet::CLASS_TYPES, accessor).or_violation();
        let kind = self.kind(ty);
        match self.type_shape_mut(ty, accessor) {
            TypeShape::Class(data) => &mut **data,
            other => {
                let found = other.name();
                crate::check::violation(ContractViolation::VariantMismatch {
                    accessor,
                    node: ty,
                    kind,
                    found,
                    expected: "class",
                })
            }
        }
    }

    // === Flags ===

    #[track_caller]
    pub fn classtype_flags(&self, ty: NodeId) -> ClassFlags {
        self.class_data(ty, "classtype_flags").flags
    }

    #[track_caller]
    pub fn set_classtype_flag(&mut self, ty: NodeId, flag: ClassFlags, value: bool) {
        self.class_data_mut(ty, "set_classtype_flag").flags.set(flag, value);
    }

    /// `TYPE_BEING_DEFINED`.
    #[track_caller]
    pub fn type_being_defined_p(&self, ty: NodeId) -> bool {
        self.classtype_flags(ty).contains(ClassFlags::BEING_DEFINED)
    }

    #[track_caller]
    pub fn set_type_being_defined(&mut self, ty: NodeId, value: bool) {
        self.set_classtype_flag(ty, ClassFlags::BEING_DEFINED, value);
    }

    /// Whether names can be looked up in `ty` now: it is complete or its
    /// definition is open (`COMPLETE_OR_OPEN_TYPE_P`).
    #[track_caller]
    pub fn can_lookup_in(&self, ty: NodeId) -> bool {
        self.complete_type_p(ty) || (self.class_type_p(ty) && self.type_being_defined_p(ty))
    }

    /// `CLASSTYPE_EMPTY_P`.
    #[track_caller]
    pub fn classtype_empty_p(&self, ty: NodeId) -> bool {
        self.classtype_flags(ty).contains(ClassFlags::EMPTY)
    }

    /// `CLASSTYPE_NEARLY_EMPTY_P`.
    #[track_caller]
    pub fn classtype_nearly_empty_p(&self, ty: NodeId) -> bool {
        self.classtype_flags(ty).contains(ClassFlags::NEARLY_EMPTY)
    }

    /// `CLASSTYPE_NON_LAYOUT_POD_P`.
    #[track_caller]
    pub fn classtype_non_layout_pod_p(&self, ty: NodeId) -> bool {
        self.classtype_flags(ty).contains(ClassFlags::NON_LAYOUT_POD)
    }

    /// `CLASSTYPE_NON_STD_LAYOUT`.
    #[track_caller]
    pub fn classtype_non_std_layout(&self, ty: NodeId) -> bool {
        self.classtype_flags(ty).contains(ClassFlags::NON_STD_LAYOUT)
    }

    /// `CLASSTYPE_DIAMOND_SHAPED_P`.
    #[track_caller]
    pub fn classtype_diamond_shaped_p(&self, ty: NodeId) -> bool {
        self.classtype_flags(ty).contains(ClassFlags::DIAMOND_SHAPED)
    }

    /// `CLASSTYPE_REPEATED_BASE_P`.
    #[track_caller]
    pub fn classtype_repeated_base_p(&self, ty: NodeId) -> bool {
        self.classtype_flags(ty).contains(ClassFlags::REPEATED_BASE)
    }

    /// `CLASSTYPE_INTERFACE_KNOWN`.
    #[track_caller]
    pub fn classtype_interface_known(&self, ty: NodeId) -> bool {
        !self.classtype_flags(ty).contains(ClassFlags::INTERFACE_UNKNOWN)
    }

    /// `TYPE_HAS_USER_CONSTRUCTOR`.
    #[track_caller]
    pub fn type_has_user_constructor(&self, ty: NodeId) -> bool {
        self.lang_flag(ty, ClassTypeFlags::HAS_USER_CONSTRUCTOR)
    }

    /// `TYPE_HAS_NONTRIVIAL_DESTRUCTOR`.
    #[track_caller]
    pub fn type_has_nontrivial_destructor(&self, ty: NodeId) -> bool {
        self.lang_flag(ty, ClassTypeFlags::HAS_NONTRIVIAL_DESTRUCTOR)
    }

    // === Special members ===

    #[track_caller]
    pub fn special_member_state(&self, ty: NodeId, member: SpecialMember) -> SpecialMemberState {
        self.class_data(ty, "special_member_state").special[member.slot()]
    }

    #[track_caller]
    pub fn set_special_member_state(&mut self, ty: NodeId, member: SpecialMember, state: SpecialMemberState) {
        self.class_data_mut(ty, "set_special_member_state").special[member.slot()] = state;
    }

    /// `CLASSTYPE_LAZY_DEFAULT_CTOR`.
    #[track_caller]
    pub fn classtype_lazy_default_ctor(&self, ty: NodeId) -> bool {
        self.special_member_state(ty, SpecialMember::DefaultCtor) == SpecialMemberState::Lazy
    }

    /// `CLASSTYPE_LAZY_COPY_CTOR`.
    #[track_caller]
    pub fn classtype_lazy_copy_ctor(&self, ty: NodeId) -> bool {
        self.special_member_state(ty, SpecialMember::CopyCtor) == SpecialMemberState::Lazy
    }

    /// `CLASSTYPE_LAZY_MOVE_CTOR`.
    #[track_caller]
    pub fn classtype_lazy_move_ctor(&self, ty: NodeId) -> bool {
        self.special_member_state(ty, SpecialMember::MoveCtor) == SpecialMemberState::Lazy
    }

    /// `CLASSTYPE_LAZY_COPY_ASSIGN`.
    #[track_caller]
    pub fn classtype_lazy_copy_assign(&self, ty: NodeId) -> bool {
        self.special_member_state(ty, SpecialMember::CopyAssign) == SpecialMemberState::Lazy
    }

    /// `CLASSTYPE_LAZY_MOVE_ASSIGN`.
    #[track_caller]
    pub fn classtype_lazy_move_assign(&self, ty: NodeId) -> bool {
        self.special_member_state(ty, SpecialMember::MoveAssign) == SpecialMemberState::Lazy
    }

    /// `CLASSTYPE_LAZY_DESTRUCTOR`.
    #[track_caller]
    pub fn classtype_lazy_destructor(&self, ty: NodeId) -> bool {
        self.special_member_state(ty, SpecialMember::Destructor) == SpecialMemberState::Lazy
    }

    /// `TYPE_HAS_DEFAULT_CONSTRUCTOR`; `None` while undecided.
    #[track_caller]
    pub fn type_has_default_constructor(&self, ty: NodeId) -> Option<bool> {
        self.special_member_state(ty, SpecialMember::DefaultCtor).exists()
    }

    /// `TYPE_HAS_COPY_CTOR`; `None` while undecided.
    #[track_caller]
    pub fn type_has_copy_ctor(&self, ty: NodeId) -> Option<bool> {
        self.special_member_state(ty, SpecialMember::CopyCtor).exists()
    }

    /// `TYPE_HAS_COPY_ASSIGN`; `None` while undecided.
    #[track_caller]
    pub fn type_has_copy_assign(&self, ty: NodeId) -> Option<bool> {
        self.special_member_state(ty, SpecialMember::CopyAssign).exists()
    }

    /// Which special member `decl` declares in class `ty`, judged by its
    /// name and parameter list.
    #[track_caller]
    pub fn special_member_kind(&self, ty: NodeId, decl: NodeId) -> Option<SpecialMember> {
        let decl = self.strip_template(decl);
        if self.kind(decl) != NodeKind::FunctionDecl {
            return None;
        }
        if self.decl_destructor_p(decl) {
            return Some(SpecialMember::Destructor);
        }
        let assign = self.operator_identifier(OperatorName::assign(OvlOpCode::Nop));
        let is_ctor = self.decl_constructor_p(decl);
        if !is_ctor && (assign.is_none() || self.decl_name(decl) != assign) {
            return None;
        }
        let fn_type = self.ty(decl)?;
        let parms = self.type_arg_types(fn_type);
        match parms {
            [] if is_ctor => Some(SpecialMember::DefaultCtor),
            [parm] => {
                let class = self.type_main_variant(ty);
                let parm = *parm;
                if !self.type_ref_p(parm) {
                    return None;
                }
                let referent = self.ty(parm)?;
                if self.type_main_variant(referent) != class {
                    return None;
                }
                Some(match (is_ctor, self.type_ref_is_rvalue(parm)) {
                    (true, false) => SpecialMember::CopyCtor,
                    (true, true) => SpecialMember::MoveCtor,
                    (false, false) => SpecialMember::CopyAssign,
                    (false, true) => SpecialMember::MoveAssign,
                })
            }
            _ => None,
        }
    }

    /// Decide whether the default constructor is implicitly declarable:
    /// it is iff the class has no user-declared constructor. A declared
    /// default constructor stays declared.
    #[track_caller]
    pub fn resolve_default_ctor(&mut self, ty: NodeId) -> SpecialMemberState {
        let state = match self.special_member_state(ty, SpecialMember::DefaultCtor) {
            SpecialMemberState::Pending if self.type_has_user_constructor(ty) => SpecialMemberState::Absent,
            SpecialMemberState::Pending => SpecialMemberState::Lazy,
            decided => decided,
        };
        self.set_special_member_state(ty, SpecialMember::DefaultCtor, state);
        debug!(%ty, ?state, "resolved default constructor");
        state
    }

    /// Declare the implicit special member `member` of `ty`
    /// (`lazily_declare_fn`). The member must be lazy.
    #[track_caller]
    pub fn lazily_declare_fn(&mut self, ty: NodeId, member: SpecialMember) -> NodeId {
        let state = self.special_member_state(ty, member);
        if state != SpecialMemberState::Lazy {
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "lazily_declare_fn",
                node: ty,
                kind: self.kind(ty),
                found: special_state_name(state),
                expected: "lazy",
            });
        }
        let class = self.type_main_variant(ty);
        let const_class = self.build_qualified_type(class, Quals::CONST);
        let (name, ret, parms) = match member {
            SpecialMember::DefaultCtor => (Some(NodeId::CTOR_IDENTIFIER), NodeId::VOID_TYPE, vec![]),
            SpecialMember::CopyCtor => (
                Some(NodeId::CTOR_IDENTIFIER),
                NodeId::VOID_TYPE,
                vec![self.build_reference_type(const_class, false)],
            ),
            SpecialMember::MoveCtor => (
                Some(NodeId::CTOR_IDENTIFIER),
                NodeId::VOID_TYPE,
                vec![self.build_reference_type(class, true)],
            ),
            SpecialMember::CopyAssign => (
                self.operator_identifier(OperatorName::assign(OvlOpCode::Nop)),
                self.build_reference_type(class, false),
                vec![self.build_reference_type(const_class, false)],
            ),
            SpecialMember::MoveAssign => (
                self.operator_identifier(OperatorName::assign(OvlOpCode::Nop)),
                self.build_reference_type(class, false),
                vec![self.build_reference_type(class, true)],
            ),
            SpecialMember::Destructor => (Some(NodeId::DTOR_IDENTIFIER), NodeId::VOID_TYPE, vec![]),
        };
        let fn_type = self.build_method_type(class, ret, &parms);
        let span = self.type_name(class).map_or(Span::DUMMY, |decl| self.span(decl));
        let decl = self.build_lang_decl(NodeKind::FunctionDecl, span, name, Some(fn_type));
        self.set_decl_core_flag(decl, DeclCoreFlags::ARTIFICIAL | DeclCoreFlags::PUBLIC, true);
        if matches!(member, SpecialMember::CopyAssign | SpecialMember::MoveAssign) {
            self.set_decl_overloaded_operator(decl, OperatorName::assign(OvlOpCode::Nop));
        }
        self.add_class_member(class, decl);
        if matches!(member, SpecialMember::CopyCtor) {
            self.set_classtype_flag(class, ClassFlags::HAS_CONST_COPY_CTOR, true);
        }
        if matches!(member, SpecialMember::CopyAssign) {
            self.set_classtype_flag(class, ClassFlags::HAS_CONST_COPY_ASSIGN, true);
        }
        debug!(%class, %decl, ?member, "declared implicit member");
        decl
    }

    // === Members ===

    /// Add a member declaration (`finish_member_declaration`). User
    /// declared special members are recorded as declared.
    #[track_caller]
    pub fn add_class_member(&mut self, ty: NodeId, decl: NodeId) {
        let class = self.type_main_variant(ty);
        self.check_kind(decl, KindSet::DECLS, "add_class_member").or_violation();
        self.set_decl_context(decl, Some(class));
        if self.kind(decl) != NodeKind::LabelDecl {
            self.set_decl_in_aggr_p(decl, true);
        }
        let data = self.class_data_mut(class, "add_class_member");
        data.members.push(decl);
        data.decl_list.push(decl);

        let Some(member) = self.special_member_kind(class, decl) else {
            if self.decl_constructor_p(decl) && !self.decl_artificial_p(decl) {
                self.set_lang_flag(class, ClassTypeFlags::HAS_USER_CONSTRUCTOR, true);
            }
            return;
        };
        self.set_special_member_state(class, member, SpecialMemberState::Declared);
        if self.decl_artificial_p(decl) {
            return;
        }
        if member.is_ctor() {
            self.set_lang_flag(class, ClassTypeFlags::HAS_USER_CONSTRUCTOR, true);
        }
        let const_parm = self
            .ty(decl)
            .and_then(|fn_type| self.type_arg_types(fn_type).first().copied())
            .and_then(|parm| self.ty(parm))
            .is_some_and(|referent| self.cp_type_const_p(referent));
        match member {
            SpecialMember::CopyCtor => self.set_classtype_flag(class, ClassFlags::HAS_CONST_COPY_CTOR, const_parm),
            SpecialMember::CopyAssign => {
                self.set_classtype_flag(class, ClassFlags::HAS_CONST_COPY_ASSIGN, const_parm);
            }
            SpecialMember::Destructor => {
                self.set_lang_flag(class, ClassTypeFlags::HAS_NONTRIVIAL_DESTRUCTOR, true);
            }
            _ => {}
        }
    }

    /// Record a friend declaration in the declaration list only.
    #[track_caller]
    pub fn add_class_friend_decl(&mut self, ty: NodeId, friend: NodeId) {
        self.class_data_mut(ty, "add_class_friend_decl").decl_list.push(friend);
    }

    /// `CLASSTYPE_MEMBER_VEC`.
    #[track_caller]
    pub fn classtype_members(&self, ty: NodeId) -> &[NodeId] {
        &self.class_data(ty, "classtype_members").members
    }

    /// `CLASSTYPE_DECL_LIST`.
    #[track_caller]
    pub fn classtype_decl_list(&self, ty: NodeId) -> &[NodeId] {
        &self.class_data(ty, "classtype_decl_list").decl_list
    }

    /// `CLASSTYPE_CONSTRUCTORS`: constructors and constructor templates.
    #[track_caller]
    pub fn classtype_constructors(&self, ty: NodeId) -> Vec<NodeId> {
        self.classtype_members(ty)
            .iter()
            .copied()
            .filter(|&decl| self.decl_constructor_p(decl) && !self.decl_cloned_function_p(self.strip_template(decl)))
            .collect()
    }

    /// `CLASSTYPE_DESTRUCTOR`.
    #[track_caller]
    pub fn classtype_destructor(&self, ty: NodeId) -> Option<NodeId> {
        self.classtype_members(ty)
            .iter()
            .copied()
            .find(|&decl| self.decl_destructor_p(decl) && !self.decl_cloned_function_p(decl))
    }

    /// `CLASSTYPE_KEY_METHOD`.
    #[track_caller]
    pub fn classtype_key_method(&self, ty: NodeId) -> Option<NodeId> {
        self.class_data(ty, "classtype_key_method").key_method
    }

    #[track_caller]
    pub fn set_classtype_key_method(&mut self, ty: NodeId, decl: Option<NodeId>) {
        self.class_data_mut(ty, "set_classtype_key_method").key_method = decl;
    }

    // === Bases ===

    /// `CLASSTYPE_PRIMARY_BINFO`.
    #[track_caller]
    pub fn classtype_primary_binfo(&self, ty: NodeId) -> Option<NodeId> {
        self.class_data(ty, "classtype_primary_binfo").primary_binfo
    }

    /// Make `binfo` the primary base of `ty` and mark it primary.
    #[track_caller]
    pub fn set_classtype_primary_binfo(&mut self, ty: NodeId, binfo: NodeId) {
        self.set_binfo_flag(binfo, BinfoFlags::PRIMARY, true);
        self.class_data_mut(ty, "set_classtype_primary_binfo").primary_binfo = Some(binfo);
    }

    /// `CLASSTYPE_HAS_PRIMARY_BASE_P`.
    #[track_caller]
    pub fn classtype_has_primary_base_p(&self, ty: NodeId) -> bool {
        self.classtype_primary_binfo(ty).is_some()
    }

    /// Compute `CLASSTYPE_VBASECLASSES`: every virtual base once, in
    /// post-order depth-first left-to-right order over the inheritance
    /// graph. Computed once; later calls return the stored sequence.
    #[track_caller]
    pub fn layout_virtual_bases(&mut self, ty: NodeId) -> &[NodeId] {
        let class = self.type_main_variant(ty);
        if self.class_data(class, "layout_virtual_bases").vbases.is_none() {
            let mut order = Vec::new();
            let mut seen = FxHashSet::default();
            self.collect_virtual_bases(class, &mut order, &mut seen);
            debug!(%class, count = order.len(), "laid out virtual bases");
            self.class_data_mut(class, "layout_virtual_bases").vbases = Some(order);
        }
        self.class_data(class, "layout_virtual_bases").vbases.as_deref().unwrap_or_default()
    }

    /// The virtual bases computed by [`Tree::layout_virtual_bases`], `None`
    /// before layout.
    #[track_caller]
    pub fn virtual_bases(&self, ty: NodeId) -> Option<&[NodeId]> {
        self.class_data(ty, "virtual_bases").vbases.as_deref()
    }

    /// `CLASSTYPE_VBASECLASSES` non-empty; lays nothing out.
    #[track_caller]
    pub fn type_uses_virtual_base(&self, ty: NodeId) -> bool {
        let mut found = false;
        self.walk_bases(ty, &mut |tree, binfo| {
            found |= tree.binfo_virtual_p(binfo);
            !found
        });
        found
    }

    /// `CLASSTYPE_AS_BASE`.
    #[track_caller]
    pub fn classtype_as_base(&self, ty: NodeId) -> Option<NodeId> {
        self.class_data(ty, "classtype_as_base").as_base
    }

    #[track_caller]
    pub fn set_classtype_as_base(&mut self, ty: NodeId, as_base: NodeId) {
        self.class_data_mut(ty, "set_classtype_as_base").as_base = Some(as_base);
    }

    // === Virtual functions ===

    /// `CLASSTYPE_PURE_VIRTUALS`.
    #[track_caller]
    pub fn classtype_pure_virtuals(&self, ty: NodeId) -> &[NodeId] {
        &self.class_data(ty, "classtype_pure_virtuals").pure_virtuals
    }

    #[track_caller]
    pub fn add_classtype_pure_virtual(&mut self, ty: NodeId, decl: NodeId) {
        self.class_data_mut(ty, "add_classtype_pure_virtual").pure_virtuals.push(decl);
    }

    /// `ABSTRACT_CLASS_TYPE_P`.
    #[track_caller]
    pub fn abstract_class_type_p(&self, ty: NodeId) -> bool {
        self.class_type_p(ty) && !self.classtype_pure_virtuals(ty).is_empty()
    }

    /// Vcall slot assigned to `function` (`CLASSTYPE_VCALL_INDICES`).
    #[track_caller]
    pub fn classtype_vcall_index(&self, ty: NodeId, function: NodeId) -> Option<u32> {
        self.class_data(ty, "classtype_vcall_index")
            .vcall_indices
            .iter()
            .find_map(|&(f, index)| (f == function).then_some(index))
    }

    #[track_caller]
    pub fn set_classtype_vcall_index(&mut self, ty: NodeId, function: NodeId, index: u32) {
        let indices = &mut self.class_data_mut(ty, "set_classtype_vcall_index").vcall_indices;
        match indices.iter_mut().find(|(f, _)| *f == function) {
            Some(entry) => entry.1 = index,
            None => indices.push((function, index)),
        }
    }

    /// `CLASSTYPE_VTABLES`.
    #[track_caller]
    pub fn classtype_vtables(&self, ty: NodeId) -> &[NodeId] {
        &self.class_data(ty, "classtype_vtables").vtables
    }

    #[track_caller]
    pub fn add_classtype_vtable(&mut self, ty: NodeId, vtable: NodeId) {
        self.class_data_mut(ty, "add_classtype_vtable").vtables.push(vtable);
    }

    /// `CLASSTYPE_TYPEINFO_VAR`.
    #[track_caller]
    pub fn classtype_typeinfo_var(&self, ty: NodeId) -> Option<NodeId> {
        self.class_data(ty, "classtype_typeinfo_var").typeinfo_var
    }

    #[track_caller]
    pub fn set_classtype_typeinfo_var(&mut self, ty: NodeId, var: NodeId) {
        self.class_data_mut(ty, "set_classtype_typeinfo_var").typeinfo_var = Some(var);
    }

    /// `TYPE_POLYMORPHIC_P`: has a vtable of its own or through a base.
    #[track_caller]
    pub fn type_polymorphic_p(&self, ty: NodeId) -> bool {
        let own = self
            .classtype_members(ty)
            .iter()
            .any(|&decl| self.kind(decl) == NodeKind::FunctionDecl && self.decl_virtual_p(decl));
        if own {
            return true;
        }
        let mut found = false;
        self.walk_bases(ty, &mut |tree, binfo| {
            let base = tree.binfo_type(binfo);
            found |= tree
                .classtype_members(base)
                .iter()
                .any(|&decl| tree.kind(decl) == NodeKind::FunctionDecl && tree.decl_virtual_p(decl));
            !found
        });
        found
    }

    // === Friends ===

    /// `CLASSTYPE_FRIEND_CLASSES`.
    #[track_caller]
    pub fn classtype_friend_classes(&self, ty: NodeId) -> &[NodeId] {
        &self.class_data(ty, "classtype_friend_classes").friend_classes
    }

    /// `CLASSTYPE_BEFRIENDING_CLASSES`.
    #[track_caller]
    pub fn classtype_befriending_classes(&self, ty: NodeId) -> &[NodeId] {
        &self.class_data(ty, "classtype_befriending_classes").befriending_classes
    }

    /// `make_friend_class`: `friend` becomes a friend of `ty`.
    #[track_caller]
    pub fn make_friend_class(&mut self, ty: NodeId, friend: NodeId) {
        let ty = self.type_main_variant(ty);
        let friend = self.type_main_variant(friend);
        let friends = &mut self.class_data_mut(ty, "make_friend_class").friend_classes;
        if friends.contains(&friend) {
            return;
        }
        friends.push(friend);
        self.class_data_mut(friend, "make_friend_class")
            .befriending_classes
            .push(ty);
    }

    // === Lambdas ===

    /// `CLASSTYPE_LAMBDA_EXPR`.
    #[track_caller]
    pub fn classtype_lambda_expr(&self, ty: NodeId) -> Option<NodeId> {
        self.class_data(ty, "classtype_lambda_expr").lambda_expr
    }

    #[track_caller]
    pub fn set_classtype_lambda_expr(&mut self, ty: NodeId, lambda: NodeId) {
        self.class_data_mut(ty, "set_classtype_lambda_expr").lambda_expr = Some(lambda);
    }

    /// `LAMBDA_TYPE_P`.
    #[track_caller]
    pub fn lambda_type_p(&self, ty: NodeId) -> bool {
        self.class_type_p(ty) && self.classtype_lambda_expr(ty).is_some()
    }

    // === Templates ===

    /// `CLASSTYPE_TEMPLATE_INFO`.
    #[track_caller]
    pub fn classtype_template_info(&self, ty: NodeId) -> Option<NodeId> {
        self.class_data(ty, "classtype_template_info").template_info
    }

    #[track_caller]
    pub fn set_classtype_template_info(&mut self, ty: NodeId, info: Option<NodeId>) {
        self.class_data_mut(ty, "set_classtype_template_info").template_info = info;
    }

    /// `CLASSTYPE_TI_TEMPLATE`.
    #[track_caller]
    pub fn classtype_ti_template(&self, ty: NodeId) -> Option<NodeId> {
        self.classtype_template_info(ty).map(|info| self.ti_template(info))
    }

    /// `CLASSTYPE_USE_TEMPLATE`.
    #[track_caller]
    pub fn classtype_use_template(&self, ty: NodeId) -> UseTemplate {
        self.class_data(ty, "classtype_use_template").use_template
    }

    #[track_caller]
    pub fn set_classtype_use_template(&mut self, ty: NodeId, value: UseTemplate) {
        self.class_data_mut(ty, "set_classtype_use_template").use_template = value;
    }

    /// `CLASSTYPE_TEMPLATE_INSTANTIATION`.
    #[track_caller]
    pub fn classtype_template_instantiation(&self, ty: NodeId) -> bool {
        self.classtype_use_template(ty).is_instantiation()
    }

    /// `CLASSTYPE_IMPLICIT_INSTANTIATION`.
    #[track_caller]
    pub fn classtype_implicit_instantiation(&self, ty: NodeId) -> bool {
        self.classtype_use_template(ty).is_implicit_instantiation()
    }

    /// `CLASSTYPE_EXPLICIT_INSTANTIATION`.
    #[track_caller]
    pub fn classtype_explicit_instantiation(&self, ty: NodeId) -> bool {
        self.classtype_use_template(ty).is_explicit_instantiation()
    }

    /// `CLASSTYPE_TEMPLATE_SPECIALIZATION`.
    #[track_caller]
    pub fn classtype_template_specialization(&self, ty: NodeId) -> bool {
        self.classtype_use_template(ty).is_specialization()
    }
}

fn special_state_name(state: SpecialMemberState) -> &'static str {
    match state {
        SpecialMemberState::Pending => "pending",
        SpecialMemberState::Lazy => "lazy",
        SpecialMemberState::Declared => "declared",
        SpecialMemberState::Absent => "absent",
    }
}
