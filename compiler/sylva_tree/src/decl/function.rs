//! Function extension data (`lang_decl_fn`) and thunks.
//!
//! A function declaration is either an ordinary function or a thunk, and
//! the two share no slots: [`FnRole`] holds one or the other. Ordinary
//! functions keep the minimal record, the clone back-reference and the
//! context union; thunks keep their target, alias and pointer adjustment.

use bitflags::bitflags;
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use super::clones::CloneSet;
use super::lang::{LangDeclExt, MinData};
use crate::check::{ContractViolation, OrViolation};
use crate::identifier::OperatorName;
use crate::{NodeId, NodeKind, Span, Tree};

bitflags! {
    /// Boolean properties of a function declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FnFlags: u32 {
        /// Static initialization function (`DECL_GLOBAL_CTOR_P`).
        const GLOBAL_CTOR = 1 << 0;
        const GLOBAL_DTOR = 1 << 1;
        /// Static member function.
        const STATIC_FUNCTION = 1 << 2;
        const PURE_VIRTUAL = 1 << 3;
        /// Explicitly defaulted or implicitly declared.
        const DEFAULTED = 1 << 4;
        /// Takes an in-charge parameter.
        const HAS_IN_CHARGE_PARM = 1 << 5;
        /// Takes a VTT parameter.
        const HAS_VTT_PARM = 1 << 6;
        /// Constructor or conversion declared `explicit`.
        const NONCONVERTING = 1 << 7;
        const OMP_DECLARE_REDUCTION = 1 << 8;
        const HAS_DEPENDENT_EXPLICIT_SPEC = 1 << 9;
        /// `consteval`.
        const IMMEDIATE_FN = 1 << 10;
        /// Defaulted function whose deletedness is not yet decided.
        const MAYBE_DELETED = 1 << 11;
        const COROUTINE = 1 << 12;
        const IMPLICIT_CONSTEXPR = 1 << 13;
    }
}

/// What the `context` slot of an ordinary function holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FnContext {
    #[default]
    None,
    /// Thunks of a virtual function (`DECL_THUNKS`).
    Thunks(Vec<NodeId>),
    /// Constructor an inheriting constructor inherits from
    /// (`DECL_INHERITED_CTOR`).
    InheritedFrom(NodeId),
    /// Class defining a namespace-scope friend (`DECL_FRIEND_CONTEXT`).
    FriendContext(NodeId),
}

impl FnContext {
    pub fn name(&self) -> &'static str {
        match self {
            FnContext::None => "empty context",
            FnContext::Thunks(_) => "thunk list",
            FnContext::InheritedFrom(_) => "inherited constructor",
            FnContext::FriendContext(_) => "friend context",
        }
    }
}

/// Body bookkeeping that is only meaningful before the body is processed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeferredBody {
    #[default]
    None,
    /// Token cache of an inline body to parse later (`DECL_PENDING_INLINE_INFO`).
    PendingInline(u32),
    /// Declared `auto` return type kept while the body deduces the real one
    /// (`DECL_SAVED_AUTO_RETURN_TYPE`).
    SavedAutoReturn(NodeId),
}

/// Data of an ordinary (non-thunk) function.
#[derive(Clone, Debug, Default)]
pub struct OrdinaryFn {
    pub(crate) min: MinData,
    /// Function this is a clone of (`DECL_CLONED_FUNCTION`).
    pub(crate) cloned_from: Option<NodeId>,
    /// Classes that befriend this function (`DECL_BEFRIENDING_CLASSES`).
    pub(crate) befriending_classes: Vec<NodeId>,
    pub(crate) context: FnContext,
    pub(crate) clones: CloneSet,
}

/// Where the virtual part of a thunk adjustment comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdjustStep {
    /// Add a constant to the pointer.
    Fixed(i64),
    /// Add the value found at this offset in the vtable.
    VcallOffset(i64),
    /// Convert to this virtual base (binfo).
    VirtualBase(NodeId),
}

/// Pointer adjustment performed by a thunk.
///
/// A this-adjusting thunk adjusts the incoming `this` pointer: the fixed
/// offset is applied first, then the vcall offset read through the
/// adjusted pointer. A result-adjusting thunk adjusts the returned pointer
/// for a covariant return: the conversion to the virtual base happens
/// first, then the fixed offset inside that base.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThunkAdjustment {
    ThisAdjusting {
        fixed_offset: i64,
        vcall_offset: Option<i64>,
    },
    ResultAdjusting {
        fixed_offset: i64,
        virtual_base: Option<NodeId>,
    },
}

impl ThunkAdjustment {
    /// `THUNK_FIXED_OFFSET`.
    pub fn fixed_offset(self) -> i64 {
        match self {
            ThunkAdjustment::ThisAdjusting { fixed_offset, .. }
            | ThunkAdjustment::ResultAdjusting { fixed_offset, .. } => fixed_offset,
        }
    }

    pub fn is_this_adjusting(self) -> bool {
        matches!(self, ThunkAdjustment::ThisAdjusting { .. })
    }

    /// The adjustment steps in the order they are applied. Zero fixed
    /// offsets are kept so the order is always visible.
    pub fn steps(self) -> SmallVec<[AdjustStep; 2]> {
        match self {
            ThunkAdjustment::ThisAdjusting {
                fixed_offset,
                vcall_offset,
            } => {
                let mut steps: SmallVec<[AdjustStep; 2]> = smallvec![AdjustStep::Fixed(fixed_offset)];
                steps.extend(vcall_offset.map(AdjustStep::VcallOffset));
                steps
            }
            ThunkAdjustment::ResultAdjusting {
                fixed_offset,
                virtual_base,
            } => {
                let mut steps: SmallVec<[AdjustStep; 2]> =
                    virtual_base.map(AdjustStep::VirtualBase).into_iter().collect();
                steps.push(AdjustStep::Fixed(fixed_offset));
                steps
            }
        }
    }
}

/// Data of a thunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThunkData {
    /// Function the thunk forwards to (`THUNK_TARGET`).
    pub(crate) target: NodeId,
    pub(crate) adjustment: ThunkAdjustment,
    /// Equivalent thunk this one is emitted as (`THUNK_ALIAS`).
    pub(crate) alias: Option<NodeId>,
}

/// Ordinary function or thunk.
#[derive(Clone, Debug)]
pub enum FnRole {
    Ordinary(OrdinaryFn),
    Thunk(ThunkData),
}

impl Default for FnRole {
    fn default() -> Self {
        FnRole::Ordinary(OrdinaryFn::default())
    }
}

impl FnRole {
    fn name(&self) -> &'static str {
        match self {
            FnRole::Ordinary(_) => "ordinary function",
            FnRole::Thunk(_) => "thunk",
        }
    }
}

/// `lang_decl_fn`.
#[derive(Clone, Debug, Default)]
pub struct FnData {
    pub(crate) flags: FnFlags,
    /// Operator this function overloads (`DECL_OVERLOADED_OPERATOR_CODE_RAW`).
    pub(crate) ovl_op: Option<OperatorName>,
    pub(crate) deferred: DeferredBody,
    pub(crate) role: FnRole,
}

fn role_mismatch(accessor: &'static str, id: NodeId, found: &FnRole, expected: &'static str) -> ContractViolation {
    ContractViolation::VariantMismatch {
        accessor,
        node: id,
        kind: NodeKind::FunctionDecl,
        found: found.name(),
        expected,
    }
}

impl Tree {
    // === Record access ===

    /// `LANG_DECL_FN_CHECK`: the function record of a function or of the
    /// function a template declares.
    pub(crate) fn try_fn(&self, id: NodeId, accessor: &'static str) -> Result<&FnData, ContractViolation> {
        let fn_id = self.try_strip_template(id, accessor)?;
        self.check_kind(fn_id, super::FUNCTION_DECL, accessor)?;
        match &self.try_lang_decl(fn_id, accessor)?.ext {
            LangDeclExt::Fn(data) => Ok(data),
            other => Err(ContractViolation::SelectorMismatch {
                accessor,
                node: fn_id,
                kind: NodeKind::FunctionDecl,
                found: other.selector(),
                expected: super::Selector::Fn,
            }),
        }
    }

    #[track_caller]
    pub(crate) fn fn_data(&self, id: NodeId, accessor: &'static str) -> &FnData {
        self.try_fn(id, accessor).or_violation()
    }

    #[track_caller]
    pub(crate) fn fn_data_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut FnData {
        self.try_fn(id, accessor).or_violation();
        let fn_id = self.strip_template(id);
        match self.try_lang_decl_mut(fn_id, accessor).map(|lang| &mut lang.ext) {
            Ok(LangDeclExt::Fn(data)) => data,
            _ => unreachable!("checked by try_fn"),
        }
    }

    /// Ordinary-function data, rejecting thunks.
    pub(crate) fn try_ordinary(&self, id: NodeId, accessor: &'static str) -> Result<&OrdinaryFn, ContractViolation> {
        match &self.try_fn(id, accessor)?.role {
            FnRole::Ordinary(ordinary) => Ok(ordinary),
            thunk @ FnRole::Thunk(_) => Err(role_mismatch(accessor, id, thunk, "ordinary function")),
        }
    }

    #[track_caller]
    pub(crate) fn ordinary_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut OrdinaryFn {
        self.try_ordinary(id, accessor).or_violation();
        match &mut self.fn_data_mut(id, accessor).role {
            FnRole::Ordinary(ordinary) => ordinary,
            FnRole::Thunk(_) => unreachable!("checked by try_ordinary"),
        }
    }

    /// Thunk data, rejecting ordinary functions.
    pub fn try_thunk(&self, id: NodeId, accessor: &'static str) -> Result<&ThunkData, ContractViolation> {
        match &self.try_fn(id, accessor)?.role {
            FnRole::Thunk(thunk) => Ok(thunk),
            ordinary @ FnRole::Ordinary(_) => Err(role_mismatch(accessor, id, ordinary, "thunk")),
        }
    }

    #[track_caller]
    fn thunk_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut ThunkData {
        self.try_thunk(id, accessor).or_violation();
        match &mut self.fn_data_mut(id, accessor).role {
            FnRole::Thunk(thunk) => thunk,
            FnRole::Ordinary(_) => unreachable!("checked by try_thunk"),
        }
    }

    // === Flags ===

    /// Test one function flag (`DECL_STATIC_FUNCTION_P`, `DECL_PURE_VIRTUAL_P`, ...).
    #[track_caller]
    pub fn fn_flag(&self, id: NodeId, flag: FnFlags) -> bool {
        self.fn_data(id, "fn_flag").flags.contains(flag)
    }

    #[track_caller]
    pub fn set_fn_flag(&mut self, id: NodeId, flag: FnFlags, value: bool) {
        self.fn_data_mut(id, "set_fn_flag").flags.set(flag, value);
    }

    #[track_caller]
    pub fn decl_static_function_p(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::STATIC_FUNCTION)
    }

    #[track_caller]
    pub fn decl_pure_virtual_p(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::PURE_VIRTUAL)
    }

    /// `DECL_DEFAULTED_FN`.
    #[track_caller]
    pub fn decl_defaulted_fn(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::DEFAULTED)
    }

    #[track_caller]
    pub fn decl_has_in_charge_parm_p(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::HAS_IN_CHARGE_PARM)
    }

    #[track_caller]
    pub fn decl_has_vtt_parm_p(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::HAS_VTT_PARM)
    }

    #[track_caller]
    pub fn decl_nonconverting_p(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::NONCONVERTING)
    }

    /// `DECL_IMMEDIATE_FUNCTION_P`: false without language data.
    #[track_caller]
    pub fn decl_immediate_function_p(&self, id: NodeId) -> bool {
        self.try_fn(id, "decl_immediate_function_p")
            .is_ok_and(|data| data.flags.contains(FnFlags::IMMEDIATE_FN))
    }

    /// `DECL_COROUTINE_P`.
    #[track_caller]
    pub fn decl_coroutine_p(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::COROUTINE)
    }

    #[track_caller]
    pub fn decl_maybe_deleted(&self, id: NodeId) -> bool {
        self.fn_flag(id, FnFlags::MAYBE_DELETED)
    }

    /// `DECL_NONSTATIC_MEMBER_FUNCTION_P`: the function has a method type.
    #[track_caller]
    pub fn decl_nonstatic_member_function_p(&self, id: NodeId) -> bool {
        self.ty(id).is_some_and(|ty| self.kind(ty) == NodeKind::MethodType)
    }

    /// `DECL_FUNCTION_MEMBER_P`.
    #[track_caller]
    pub fn decl_function_member_p(&self, id: NodeId) -> bool {
        self.decl_nonstatic_member_function_p(id) || self.decl_static_function_p(id)
    }

    // === Operators ===

    /// Operator this function overloads.
    #[track_caller]
    pub fn decl_overloaded_operator(&self, id: NodeId) -> Option<OperatorName> {
        self.fn_data(id, "decl_overloaded_operator").ovl_op
    }

    /// Record the operator code of an operator function. The declaration's
    /// name must be the matching operator identifier.
    #[track_caller]
    pub fn set_decl_overloaded_operator(&mut self, id: NodeId, op: OperatorName) {
        self.fn_data_mut(id, "set_decl_overloaded_operator").ovl_op = Some(op);
    }

    /// `DECL_OVERLOADED_OPERATOR_P`.
    #[track_caller]
    pub fn decl_overloaded_operator_p(&self, id: NodeId) -> bool {
        self.decl_name(id)
            .is_some_and(|name| self.identifier_kind(name).is_ovl_op())
    }

    /// `DECL_CONV_FN_P`.
    #[track_caller]
    pub fn decl_conv_fn_p(&self, id: NodeId) -> bool {
        self.decl_name(id)
            .is_some_and(|name| self.identifier_kind(name).is_conv_op())
    }

    /// `DECL_ASSIGNMENT_OPERATOR_P`.
    #[track_caller]
    pub fn decl_assignment_operator_p(&self, id: NodeId) -> bool {
        self.decl_name(id)
            .is_some_and(|name| self.identifier_kind(name).is_assign_op())
    }

    // === Deferred body ===

    /// `DECL_PENDING_INLINE_P`.
    #[track_caller]
    pub fn decl_pending_inline_p(&self, id: NodeId) -> bool {
        matches!(self.fn_data(id, "decl_pending_inline_p").deferred, DeferredBody::PendingInline(_))
    }

    /// `DECL_PENDING_INLINE_INFO`.
    #[track_caller]
    pub fn decl_pending_inline_info(&self, id: NodeId) -> Option<u32> {
        match &self.fn_data(id, "decl_pending_inline_info").deferred {
            DeferredBody::PendingInline(cache) => Some(*cache),
            DeferredBody::None => None,
            DeferredBody::SavedAutoReturn(_) => crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "decl_pending_inline_info",
                node: id,
                kind: NodeKind::FunctionDecl,
                found: "saved auto return type",
                expected: "pending inline body",
            }),
        }
    }

    #[track_caller]
    pub fn set_decl_pending_inline_info(&mut self, id: NodeId, cache: u32) {
        self.fn_data_mut(id, "set_decl_pending_inline_info").deferred = DeferredBody::PendingInline(cache);
    }

    /// `DECL_SAVED_AUTO_RETURN_TYPE`.
    #[track_caller]
    pub fn decl_saved_auto_return_type(&self, id: NodeId) -> Option<NodeId> {
        match &self.fn_data(id, "decl_saved_auto_return_type").deferred {
            DeferredBody::SavedAutoReturn(ty) => Some(*ty),
            DeferredBody::None => None,
            DeferredBody::PendingInline(_) => crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "decl_saved_auto_return_type",
                node: id,
                kind: NodeKind::FunctionDecl,
                found: "pending inline body",
                expected: "saved auto return type",
            }),
        }
    }

    #[track_caller]
    pub fn set_decl_saved_auto_return_type(&mut self, id: NodeId, ty: NodeId) {
        self.fn_data_mut(id, "set_decl_saved_auto_return_type").deferred = DeferredBody::SavedAutoReturn(ty);
    }

    /// Drop pending-body bookkeeping once the body has been processed.
    #[track_caller]
    pub fn clear_decl_deferred_body(&mut self, id: NodeId) {
        self.fn_data_mut(id, "clear_decl_deferred_body").deferred = DeferredBody::None;
    }

    // === Context union ===

    /// `DECL_BEFRIENDING_CLASSES`.
    #[track_caller]
    pub fn decl_befriending_classes(&self, id: NodeId) -> &[NodeId] {
        &self.try_ordinary(id, "decl_befriending_classes").or_violation().befriending_classes
    }

    #[track_caller]
    pub fn add_decl_befriending_class(&mut self, id: NodeId, class: NodeId) {
        self.ordinary_mut(id, "add_decl_befriending_class")
            .befriending_classes
            .push(class);
    }

    /// The context slot of an ordinary function.
    #[track_caller]
    pub fn decl_fn_context(&self, id: NodeId) -> &FnContext {
        &self.try_ordinary(id, "decl_fn_context").or_violation().context
    }

    #[track_caller]
    fn set_fn_context(&mut self, id: NodeId, accessor: &'static str, context: FnContext) {
        let ordinary = self.ordinary_mut(id, accessor);
        let compatible = matches!(
            (&ordinary.context, &context),
            (FnContext::None, _)
                | (FnContext::Thunks(_), FnContext::Thunks(_))
                | (FnContext::InheritedFrom(_), FnContext::InheritedFrom(_))
                | (FnContext::FriendContext(_), FnContext::FriendContext(_))
        );
        if !compatible {
            let found = ordinary.context.name();
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor,
                node: id,
                kind: NodeKind::FunctionDecl,
                found,
                expected: context.name(),
            });
        }
        ordinary.context = context;
    }

    /// `DECL_THUNKS`: thunks of a virtual function. Empty for non-virtual
    /// functions.
    #[track_caller]
    pub fn decl_thunks(&self, id: NodeId) -> &[NodeId] {
        if !self.decl_virtual_p(id) {
            return &[];
        }
        match self.decl_fn_context(id) {
            FnContext::Thunks(thunks) => thunks,
            FnContext::None => &[],
            other => crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "decl_thunks",
                node: id,
                kind: NodeKind::FunctionDecl,
                found: other.name(),
                expected: "thunk list",
            }),
        }
    }

    /// `DECL_INHERITED_CTOR`: the constructor an inheriting constructor
    /// inherits from. `None` for anything but constructors.
    #[track_caller]
    pub fn decl_inherited_ctor(&self, id: NodeId) -> Option<NodeId> {
        if !self.decl_constructor_p(id) {
            return None;
        }
        match self.decl_fn_context(id) {
            FnContext::InheritedFrom(ctor) => Some(*ctor),
            _ => None,
        }
    }

    #[track_caller]
    pub fn set_decl_inherited_ctor(&mut self, id: NodeId, inherited: NodeId) {
        if !self.decl_constructor_p(id) {
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "set_decl_inherited_ctor",
                node: id,
                kind: self.kind(id),
                found: "non-constructor",
                expected: "constructor",
            });
        }
        self.set_fn_context(id, "set_decl_inherited_ctor", FnContext::InheritedFrom(inherited));
    }

    /// `DECL_FRIEND_CONTEXT`.
    #[track_caller]
    pub fn decl_friend_context(&self, id: NodeId) -> Option<NodeId> {
        match self.decl_fn_context(id) {
            FnContext::FriendContext(class) => Some(*class),
            _ => None,
        }
    }

    #[track_caller]
    pub fn set_decl_friend_context(&mut self, id: NodeId, class: NodeId) {
        self.set_fn_context(id, "set_decl_friend_context", FnContext::FriendContext(class));
    }

    // === Thunks ===

    /// Build a thunk forwarding to `target`, a virtual function, and record
    /// it in the target's thunk list.
    #[track_caller]
    #[tracing::instrument(level = "debug", skip_all, fields(%target))]
    pub fn build_thunk(&mut self, span: Span, target: NodeId, adjustment: ThunkAdjustment) -> NodeId {
        if !self.decl_virtual_p(target) {
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "build_thunk",
                node: target,
                kind: self.kind(target),
                found: "non-virtual function",
                expected: "virtual function",
            });
        }
        let name = self.decl_name(target);
        let thunk = self.build_lang_decl(NodeKind::FunctionDecl, span, name, self.ty(target));
        self.fn_data_mut(thunk, "build_thunk").role = FnRole::Thunk(ThunkData {
            target,
            adjustment,
            alias: None,
        });
        let context = self.decl_context(target);
        self.set_decl_context(thunk, context);
        self.set_decl_artificial(thunk, true);

        let mut thunks = match self.decl_fn_context(target) {
            FnContext::Thunks(thunks) => thunks.clone(),
            _ => Vec::new(),
        };
        thunks.push(thunk);
        self.set_fn_context(target, "build_thunk", FnContext::Thunks(thunks));
        debug!(%thunk, this_adjusting = adjustment.is_this_adjusting(), "built thunk");
        thunk
    }

    /// `DECL_THUNK_P`.
    #[track_caller]
    pub fn decl_thunk_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::FunctionDecl
            && self
                .try_fn(id, "decl_thunk_p")
                .is_ok_and(|data| matches!(data.role, FnRole::Thunk(_)))
    }

    /// `DECL_THIS_THUNK_P`.
    #[track_caller]
    pub fn decl_this_thunk_p(&self, id: NodeId) -> bool {
        self.decl_thunk_p(id) && self.thunk_adjustment(id).is_this_adjusting()
    }

    /// `DECL_RESULT_THUNK_P`.
    #[track_caller]
    pub fn decl_result_thunk_p(&self, id: NodeId) -> bool {
        self.decl_thunk_p(id) && !self.thunk_adjustment(id).is_this_adjusting()
    }

    /// `DECL_NON_THUNK_FUNCTION_P`.
    #[track_caller]
    pub fn decl_non_thunk_function_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::FunctionDecl && !self.decl_thunk_p(id)
    }

    #[track_caller]
    pub fn thunk_adjustment(&self, id: NodeId) -> ThunkAdjustment {
        self.try_thunk(id, "thunk_adjustment").or_violation().adjustment
    }

    /// `THUNK_FIXED_OFFSET`.
    #[track_caller]
    pub fn thunk_fixed_offset(&self, id: NodeId) -> i64 {
        self.try_thunk(id, "thunk_fixed_offset")
            .or_violation()
            .adjustment
            .fixed_offset()
    }

    /// `THUNK_VIRTUAL_OFFSET`: the vcall offset of a this-adjusting thunk
    /// or the virtual base binfo of a result-adjusting one.
    #[track_caller]
    pub fn thunk_virtual_offset(&self, id: NodeId) -> Option<AdjustStep> {
        match self.try_thunk(id, "thunk_virtual_offset").or_violation().adjustment {
            ThunkAdjustment::ThisAdjusting { vcall_offset, .. } => vcall_offset.map(AdjustStep::VcallOffset),
            ThunkAdjustment::ResultAdjusting { virtual_base, .. } => virtual_base.map(AdjustStep::VirtualBase),
        }
    }

    /// `THUNK_TARGET`.
    #[track_caller]
    pub fn thunk_target(&self, id: NodeId) -> NodeId {
        self.try_thunk(id, "thunk_target").or_violation().target
    }

    /// `THUNK_ALIAS`.
    #[track_caller]
    pub fn thunk_alias(&self, id: NodeId) -> Option<NodeId> {
        self.try_thunk(id, "thunk_alias").or_violation().alias
    }

    #[track_caller]
    pub fn set_thunk_alias(&mut self, id: NodeId, alias: NodeId) {
        self.thunk_mut(id, "set_thunk_alias").alias = Some(alias);
    }
}
