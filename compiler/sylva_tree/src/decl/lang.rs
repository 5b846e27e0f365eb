//! Language-specific declaration data (`DECL_LANG_SPECIFIC`).
//!
//! The record is a common base plus one extension variant chosen by the
//! declaration kind when the record is created. The variant never changes
//! afterwards; [`Selector`] names it for violation reports.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use super::function::{FnData, FnRole};
use super::FUNCTION_DECL;
use crate::check::{ContractViolation, OrViolation};
use crate::scope::LevelId;
use crate::template::UseTemplate;
use crate::{KindSet, NodeId, NodeKind, Tree};

/// Which extension variant a declaration carries (`lang_decl_selector`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Selector {
    Min,
    Fn,
    Ns,
    Parm,
    Decomp,
}

impl Selector {
    /// Selector assigned to a fresh declaration of `kind`, `None` for kinds
    /// that never carry language-specific data.
    pub const fn for_kind(kind: NodeKind) -> Option<Selector> {
        match kind {
            NodeKind::FunctionDecl => Some(Selector::Fn),
            NodeKind::NamespaceDecl => Some(Selector::Ns),
            NodeKind::ParmDecl => Some(Selector::Parm),
            _ if kind.has_lang_decl_min() => Some(Selector::Min),
            _ => None,
        }
    }
}

/// Source-language linkage (`DECL_LANGUAGE`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Language {
    #[default]
    Cplusplus,
    C,
}

bitflags! {
    /// Bits of the common base record.
    ///
    /// `THREADPRIVATE_OR_DELETED` and `FRIEND_OR_TLS` mean different things
    /// on variables and functions; use the kind-checked accessors on
    /// [`Tree`] rather than testing them directly.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LangDeclBaseFlags: u16 {
        /// Variable or function that is not really `extern`.
        const NOT_REALLY_EXTERN = 1 << 0;
        const INITIALIZED_IN_CLASS = 1 << 1;
        /// Threadprivate variable, or deleted function.
        const THREADPRIVATE_OR_DELETED = 1 << 2;
        /// Privatized member on variables.
        const ANTICIPATED = 1 << 3;
        /// Unique friend function, or `__thread` variable.
        const FRIEND_OR_TLS = 1 << 4;
        const UNKNOWN_BOUND = 1 << 5;
        const ODR_USED = 1 << 6;
        const CONCEPT = 1 << 7;
        const VAR_DECLARED_INLINE = 1 << 8;
        const DEPENDENT_INIT = 1 << 9;
        const MODULE_PURVIEW = 1 << 10;
        const MODULE_IMPORT = 1 << 11;
        const MODULE_ENTITY = 1 << 12;
        const MODULE_ATTACHED = 1 << 13;
    }
}

/// Fields shared by every extension variant.
#[derive(Clone, Debug, Default)]
pub struct LangDeclBase {
    pub(crate) language: Language,
    pub(crate) use_template: UseTemplate,
    pub(crate) flags: LangDeclBaseFlags,
}

/// The multi-purpose `access` slot of the minimal record.
///
/// Which interpretation applies depends on what the declaration is; the
/// slot records it explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AccessSlot {
    #[default]
    Empty,
    /// Access declarations in effect for a class member (`DECL_ACCESS`), a
    /// `TreeList` of (class, access) pairs.
    Access(NodeId),
    /// Number distinguishing same-named local statics or local classes
    /// (`DECL_DISCRIMINATOR`).
    Discriminator(u32),
    /// Variable captured by a lambda capture proxy (`DECL_CAPTURED_VARIABLE`).
    CapturedVariable(NodeId),
    /// Namespace-scope entity a block-scope declaration aliases
    /// (`DECL_LOCAL_DECL_ALIAS`).
    LocalAlias(NodeId),
}

impl AccessSlot {
    pub fn name(&self) -> &'static str {
        match self {
            AccessSlot::Empty => "empty access slot",
            AccessSlot::Access(_) => "access list",
            AccessSlot::Discriminator(_) => "discriminator",
            AccessSlot::CapturedVariable(_) => "captured variable",
            AccessSlot::LocalAlias(_) => "local alias",
        }
    }
}

/// `lang_decl_min`: template info plus the access slot.
#[derive(Clone, Debug, Default)]
pub struct MinData {
    pub(crate) template_info: Option<NodeId>,
    pub(crate) access: AccessSlot,
}

/// `lang_decl_ns`.
#[derive(Clone, Debug, Default)]
pub struct NsData {
    /// Names bound directly in the namespace, identifier to entity.
    pub(crate) bindings: FxHashMap<NodeId, NodeId>,
    /// Inline namespaces nested directly inside this one.
    pub(crate) inlinees: Vec<NodeId>,
    pub(crate) level: Option<LevelId>,
}

/// `lang_decl_parm`: position of a parameter in nested declarators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParmData {
    pub(crate) level: u32,
    pub(crate) index: u32,
}

/// `lang_decl_decomp`: a structured binding.
#[derive(Clone, Debug, Default)]
pub struct DecompData {
    pub(crate) min: MinData,
    /// The artificial variable holding the decomposed object.
    pub(crate) base: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub enum LangDeclExt {
    Min(MinData),
    Fn(Box<FnData>),
    Ns(NsData),
    Parm(ParmData),
    Decomp(DecompData),
}

impl LangDeclExt {
    pub fn selector(&self) -> Selector {
        match self {
            LangDeclExt::Min(_) => Selector::Min,
            LangDeclExt::Fn(_) => Selector::Fn,
            LangDeclExt::Ns(_) => Selector::Ns,
            LangDeclExt::Parm(_) => Selector::Parm,
            LangDeclExt::Decomp(_) => Selector::Decomp,
        }
    }

    pub(crate) fn new(selector: Selector) -> Self {
        match selector {
            Selector::Min => LangDeclExt::Min(MinData::default()),
            Selector::Fn => LangDeclExt::Fn(Box::default()),
            Selector::Ns => LangDeclExt::Ns(NsData::default()),
            Selector::Parm => LangDeclExt::Parm(ParmData::default()),
            Selector::Decomp => LangDeclExt::Decomp(DecompData::default()),
        }
    }
}

/// `struct lang_decl`.
#[derive(Clone, Debug)]
pub struct LangDecl {
    pub(crate) base: LangDeclBase,
    pub(crate) ext: LangDeclExt,
}

impl LangDecl {
    pub(crate) fn new(selector: Selector, language: Language) -> Self {
        LangDecl {
            base: LangDeclBase {
                language,
                ..LangDeclBase::default()
            },
            ext: LangDeclExt::new(selector),
        }
    }

    #[inline]
    pub fn selector(&self) -> Selector {
        self.ext.selector()
    }
}

const NAMESPACE_DECL: KindSet = KindSet(&[NodeKind::NamespaceDecl]);
const PARM_DECL: KindSet = KindSet(&[NodeKind::ParmDecl]);
const VAR_DECL: KindSet = KindSet(&[NodeKind::VarDecl]);
const VAR_OR_FUNCTION_DECL: KindSet = KindSet(&[NodeKind::VarDecl, NodeKind::FunctionDecl]);
const DISCRIMINATED: KindSet = KindSet(&[NodeKind::VarDecl, NodeKind::TypeDecl]);
const MIN_KINDS: KindSet = KindSet(&[
    NodeKind::VarDecl,
    NodeKind::FunctionDecl,
    NodeKind::FieldDecl,
    NodeKind::ConstDecl,
    NodeKind::TypeDecl,
    NodeKind::TemplateDecl,
    NodeKind::UsingDecl,
    NodeKind::ConceptDecl,
]);

fn selector_mismatch(
    accessor: &'static str,
    id: NodeId,
    kind: NodeKind,
    found: Selector,
    expected: Selector,
) -> ContractViolation {
    ContractViolation::SelectorMismatch {
        accessor,
        node: id,
        kind,
        found,
        expected,
    }
}

impl Tree {
    // === Record access ===

    /// `DECL_LANG_SPECIFIC`, or a missing-data violation.
    pub(crate) fn try_lang_decl(
        &self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&LangDecl, ContractViolation> {
        let decl = self.try_decl(id, accessor)?;
        decl.lang.as_ref().ok_or(ContractViolation::MissingLangDecl {
            accessor,
            node: id,
            kind: self.kind(id),
        })
    }

    pub(crate) fn try_lang_decl_mut(
        &mut self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&mut LangDecl, ContractViolation> {
        let kind = self.try_node(id, accessor)?.kind;
        self.try_decl_mut(id, accessor)?
            .lang
            .as_mut()
            .ok_or(ContractViolation::MissingLangDecl {
                accessor,
                node: id,
                kind,
            })
    }

    /// Whether `id` carries language-specific data.
    #[track_caller]
    pub fn decl_lang_specific_p(&self, id: NodeId) -> bool {
        self.try_decl(id, "decl_lang_specific").or_violation().lang.is_some()
    }

    /// Selector of the extension record.
    #[track_caller]
    pub fn decl_selector(&self, id: NodeId) -> Selector {
        self.try_lang_decl(id, "decl_selector").or_violation().selector()
    }

    /// `LANG_DECL_MIN_CHECK`: the minimal record of a declaration that has
    /// one. Thunks reuse those slots and are rejected.
    pub(crate) fn try_min(&self, id: NodeId, accessor: &'static str) -> Result<&MinData, ContractViolation> {
        self.check_kind(id, MIN_KINDS, accessor)?;
        let lang = self.try_lang_decl(id, accessor)?;
        match &lang.ext {
            LangDeclExt::Min(min) | LangDeclExt::Decomp(DecompData { min, .. }) => Ok(min),
            LangDeclExt::Fn(data) => match &data.role {
                FnRole::Ordinary(ordinary) => Ok(&ordinary.min),
                FnRole::Thunk(_) => Err(ContractViolation::VariantMismatch {
                    accessor,
                    node: id,
                    kind: NodeKind::FunctionDecl,
                    found: "thunk",
                    expected: "ordinary function",
                }),
            },
            other => Err(selector_mismatch(accessor, id, self.kind(id), other.selector(), Selector::Min)),
        }
    }

    pub(crate) fn try_min_mut(
        &mut self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&mut MinData, ContractViolation> {
        self.try_min(id, accessor)?;
        match &mut self.try_lang_decl_mut(id, accessor)?.ext {
            LangDeclExt::Min(min) | LangDeclExt::Decomp(DecompData { min, .. }) => Ok(min),
            LangDeclExt::Fn(data) => match &mut data.role {
                FnRole::Ordinary(ordinary) => Ok(&mut ordinary.min),
                FnRole::Thunk(_) => unreachable!("rejected by try_min"),
            },
            _ => unreachable!("rejected by try_min"),
        }
    }

    fn try_ns(&self, id: NodeId, accessor: &'static str) -> Result<&NsData, ContractViolation> {
        self.check_kind(id, NAMESPACE_DECL, accessor)?;
        match &self.try_lang_decl(id, accessor)?.ext {
            LangDeclExt::Ns(ns) => Ok(ns),
            other => Err(selector_mismatch(accessor, id, NodeKind::NamespaceDecl, other.selector(), Selector::Ns)),
        }
    }

    #[track_caller]
    fn ns_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut NsData {
        self.try_ns(id, accessor).or_violation();
        match self.try_lang_decl_mut(id, accessor).map(|lang| &mut lang.ext) {
            Ok(LangDeclExt::Ns(ns)) => ns,
            _ => unreachable!("checked by try_ns"),
        }
    }

    fn try_parm(&self, id: NodeId, accessor: &'static str) -> Result<ParmData, ContractViolation> {
        self.check_kind(id, PARM_DECL, accessor)?;
        match &self.try_lang_decl(id, accessor)?.ext {
            LangDeclExt::Parm(parm) => Ok(*parm),
            other => Err(selector_mismatch(accessor, id, NodeKind::ParmDecl, other.selector(), Selector::Parm)),
        }
    }

    fn try_decomp(&self, id: NodeId, accessor: &'static str) -> Result<&DecompData, ContractViolation> {
        self.check_kind(id, VAR_DECL, accessor)?;
        match &self.try_lang_decl(id, accessor)?.ext {
            LangDeclExt::Decomp(decomp) => Ok(decomp),
            other => Err(selector_mismatch(accessor, id, NodeKind::VarDecl, other.selector(), Selector::Decomp)),
        }
    }

    // === Base record ===

    /// `DECL_LANGUAGE`. Declarations without language-specific data have
    /// C++ linkage.
    #[track_caller]
    pub fn decl_language(&self, id: NodeId) -> Language {
        let decl = self.try_decl(id, "decl_language").or_violation();
        decl.lang.as_ref().map_or(Language::Cplusplus, |lang| lang.base.language)
    }

    #[track_caller]
    pub fn set_decl_language(&mut self, id: NodeId, language: Language) {
        self.try_lang_decl_mut(id, "set_decl_language").or_violation().base.language = language;
    }

    /// `DECL_EXTERN_C_P`.
    #[track_caller]
    pub fn decl_extern_c_p(&self, id: NodeId) -> bool {
        self.decl_language(id) == Language::C
    }

    #[track_caller]
    pub(crate) fn base_flags(&self, id: NodeId, kinds: KindSet, accessor: &'static str) -> LangDeclBaseFlags {
        self.check_kind(id, kinds, accessor)
            .and_then(|_| self.try_lang_decl(id, accessor))
            .or_violation()
            .base
            .flags
    }

    #[track_caller]
    fn set_base_flag(
        &mut self,
        id: NodeId,
        kinds: KindSet,
        accessor: &'static str,
        flag: LangDeclBaseFlags,
        value: bool,
    ) {
        self.check_kind(id, kinds, accessor).or_violation();
        self.try_lang_decl_mut(id, accessor)
            .or_violation()
            .base
            .flags
            .set(flag, value);
    }

    /// `DECL_DELETED_FN`: on functions only, through template wrappers.
    #[track_caller]
    pub fn decl_deleted_fn(&self, id: NodeId) -> bool {
        let fn_id = self.strip_template(id);
        self.base_flags(fn_id, FUNCTION_DECL, "decl_deleted_fn")
            .contains(LangDeclBaseFlags::THREADPRIVATE_OR_DELETED)
    }

    #[track_caller]
    pub fn set_decl_deleted_fn(&mut self, id: NodeId, value: bool) {
        let fn_id = self.strip_template(id);
        self.set_base_flag(
            fn_id,
            FUNCTION_DECL,
            "set_decl_deleted_fn",
            LangDeclBaseFlags::THREADPRIVATE_OR_DELETED,
            value,
        );
    }

    /// `CP_DECL_THREADPRIVATE_P`: on variables only.
    #[track_caller]
    pub fn decl_threadprivate_p(&self, id: NodeId) -> bool {
        self.base_flags(id, VAR_DECL, "decl_threadprivate_p")
            .contains(LangDeclBaseFlags::THREADPRIVATE_OR_DELETED)
    }

    #[track_caller]
    pub fn set_decl_threadprivate_p(&mut self, id: NodeId, value: bool) {
        self.set_base_flag(
            id,
            VAR_DECL,
            "set_decl_threadprivate_p",
            LangDeclBaseFlags::THREADPRIVATE_OR_DELETED,
            value,
        );
    }

    /// `DECL_UNIQUE_FRIEND_P`: on functions only.
    #[track_caller]
    pub fn decl_unique_friend_p(&self, id: NodeId) -> bool {
        self.base_flags(id, FUNCTION_DECL, "decl_unique_friend_p")
            .contains(LangDeclBaseFlags::FRIEND_OR_TLS)
    }

    #[track_caller]
    pub fn set_decl_unique_friend_p(&mut self, id: NodeId, value: bool) {
        self.set_base_flag(
            id,
            FUNCTION_DECL,
            "set_decl_unique_friend_p",
            LangDeclBaseFlags::FRIEND_OR_TLS,
            value,
        );
    }

    /// `DECL_GNU_TLS_P`: on variables only; false without language data.
    #[track_caller]
    pub fn decl_gnu_tls_p(&self, id: NodeId) -> bool {
        self.check_kind(id, VAR_DECL, "decl_gnu_tls_p").or_violation();
        self.try_lang_decl(id, "decl_gnu_tls_p")
            .is_ok_and(|lang| lang.base.flags.contains(LangDeclBaseFlags::FRIEND_OR_TLS))
    }

    #[track_caller]
    pub fn set_decl_gnu_tls_p(&mut self, id: NodeId) {
        self.set_base_flag(id, VAR_DECL, "set_decl_gnu_tls_p", LangDeclBaseFlags::FRIEND_OR_TLS, true);
    }

    /// `DECL_ODR_USED`.
    #[track_caller]
    pub fn decl_odr_used(&self, id: NodeId) -> bool {
        self.base_flags(id, VAR_OR_FUNCTION_DECL, "decl_odr_used")
            .contains(LangDeclBaseFlags::ODR_USED)
    }

    #[track_caller]
    pub fn set_decl_odr_used(&mut self, id: NodeId, value: bool) {
        self.set_base_flag(id, VAR_OR_FUNCTION_DECL, "set_decl_odr_used", LangDeclBaseFlags::ODR_USED, value);
    }

    /// `DECL_INITIALIZED_IN_CLASS_P`.
    #[track_caller]
    pub fn decl_initialized_in_class_p(&self, id: NodeId) -> bool {
        self.base_flags(id, VAR_OR_FUNCTION_DECL, "decl_initialized_in_class_p")
            .contains(LangDeclBaseFlags::INITIALIZED_IN_CLASS)
    }

    #[track_caller]
    pub fn set_decl_initialized_in_class_p(&mut self, id: NodeId, value: bool) {
        self.set_base_flag(
            id,
            VAR_OR_FUNCTION_DECL,
            "set_decl_initialized_in_class_p",
            LangDeclBaseFlags::INITIALIZED_IN_CLASS,
            value,
        );
    }

    /// `DECL_NOT_REALLY_EXTERN`.
    #[track_caller]
    pub fn decl_not_really_extern(&self, id: NodeId) -> bool {
        self.base_flags(id, VAR_OR_FUNCTION_DECL, "decl_not_really_extern")
            .contains(LangDeclBaseFlags::NOT_REALLY_EXTERN)
    }

    #[track_caller]
    pub fn set_decl_not_really_extern(&mut self, id: NodeId, value: bool) {
        self.set_base_flag(
            id,
            VAR_OR_FUNCTION_DECL,
            "set_decl_not_really_extern",
            LangDeclBaseFlags::NOT_REALLY_EXTERN,
            value,
        );
    }

    /// `DECL_VAR_DECLARED_INLINE_P`; false without language data.
    #[track_caller]
    pub fn decl_var_declared_inline_p(&self, id: NodeId) -> bool {
        self.check_kind(id, VAR_DECL, "decl_var_declared_inline_p").or_violation();
        self.try_lang_decl(id, "decl_var_declared_inline_p")
            .is_ok_and(|lang| lang.base.flags.contains(LangDeclBaseFlags::VAR_DECLARED_INLINE))
    }

    #[track_caller]
    pub fn set_decl_var_declared_inline_p(&mut self, id: NodeId) {
        self.set_base_flag(
            id,
            VAR_DECL,
            "set_decl_var_declared_inline_p",
            LangDeclBaseFlags::VAR_DECLARED_INLINE,
            true,
        );
    }

    /// `DECL_DECLARED_CONCEPT_P`.
    #[track_caller]
    pub fn decl_declared_concept_p(&self, id: NodeId) -> bool {
        self.base_flags(id, VAR_OR_FUNCTION_DECL, "decl_declared_concept_p")
            .contains(LangDeclBaseFlags::CONCEPT)
    }

    /// `DECL_MODULE_PURVIEW_P` and the other module bits.
    #[track_caller]
    pub fn decl_module_flags(&self, id: NodeId) -> LangDeclBaseFlags {
        let flags = self.base_flags(id, KindSet::DECLS, "decl_module_flags");
        flags
            & (LangDeclBaseFlags::MODULE_PURVIEW
                | LangDeclBaseFlags::MODULE_IMPORT
                | LangDeclBaseFlags::MODULE_ENTITY
                | LangDeclBaseFlags::MODULE_ATTACHED)
    }

    // === Access slot ===

    #[track_caller]
    fn access_slot(&self, id: NodeId, accessor: &'static str) -> &AccessSlot {
        &self.try_min(id, accessor).or_violation().access
    }

    /// Store into the access slot. The slot may be filled once per
    /// interpretation; switching interpretations is a violation.
    #[track_caller]
    fn set_access_slot(&mut self, id: NodeId, accessor: &'static str, value: AccessSlot) {
        let kind = self.kind(id);
        let min = self.try_min_mut(id, accessor).or_violation();
        if min.access != AccessSlot::Empty
            && std::mem::discriminant(&min.access) != std::mem::discriminant(&value)
        {
            let found = min.access.name();
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor,
                node: id,
                kind,
                found,
                expected: value.name(),
            });
        }
        min.access = value;
    }

    #[track_caller]
    fn access_variant_mismatch(&self, id: NodeId, accessor: &'static str, slot: &AccessSlot, expected: &'static str) -> ! {
        crate::check::violation(ContractViolation::VariantMismatch {
            accessor,
            node: id,
            kind: self.kind(id),
            found: slot.name(),
            expected,
        })
    }

    /// `DECL_ACCESS`: class-member access declarations, if any.
    #[track_caller]
    pub fn decl_access(&self, id: NodeId) -> Option<NodeId> {
        match self.access_slot(id, "decl_access") {
            AccessSlot::Empty => None,
            AccessSlot::Access(list) => Some(*list),
            other => self.access_variant_mismatch(id, "decl_access", other, "access list"),
        }
    }

    #[track_caller]
    pub fn set_decl_access(&mut self, id: NodeId, list: NodeId) {
        self.set_access_slot(id, "set_decl_access", AccessSlot::Access(list));
    }

    /// `DECL_DISCRIMINATOR_P`: static local variables and implicit typedefs.
    #[track_caller]
    pub fn decl_discriminator_p(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::VarDecl => self.decl_core_flags(id).contains(super::DeclCoreFlags::STATIC),
            NodeKind::TypeDecl => self.lang_flag(id, crate::flags::TypeDeclFlags::IMPLICIT_TYPEDEF),
            _ => false,
        }
    }

    /// `DECL_DISCRIMINATOR`.
    #[track_caller]
    pub fn decl_discriminator(&self, id: NodeId) -> Option<u32> {
        self.check_kind(id, DISCRIMINATED, "decl_discriminator").or_violation();
        match self.access_slot(id, "decl_discriminator") {
            AccessSlot::Empty => None,
            AccessSlot::Discriminator(n) => Some(*n),
            other => self.access_variant_mismatch(id, "decl_discriminator", other, "discriminator"),
        }
    }

    #[track_caller]
    pub fn set_decl_discriminator(&mut self, id: NodeId, value: u32) {
        self.check_kind(id, DISCRIMINATED, "set_decl_discriminator").or_violation();
        self.set_access_slot(id, "set_decl_discriminator", AccessSlot::Discriminator(value));
    }

    /// `DECL_CAPTURED_VARIABLE` of a lambda capture proxy.
    #[track_caller]
    pub fn decl_captured_variable(&self, id: NodeId) -> Option<NodeId> {
        self.check_kind(id, VAR_DECL, "decl_captured_variable").or_violation();
        match self.access_slot(id, "decl_captured_variable") {
            AccessSlot::Empty => None,
            AccessSlot::CapturedVariable(var) => Some(*var),
            other => self.access_variant_mismatch(id, "decl_captured_variable", other, "captured variable"),
        }
    }

    #[track_caller]
    pub fn set_decl_captured_variable(&mut self, id: NodeId, var: NodeId) {
        self.check_kind(id, VAR_DECL, "set_decl_captured_variable").or_violation();
        self.set_access_slot(id, "set_decl_captured_variable", AccessSlot::CapturedVariable(var));
    }

    /// `DECL_LOCAL_DECL_ALIAS`: only on block-scope extern declarations.
    #[track_caller]
    pub fn decl_local_decl_alias(&self, id: NodeId) -> Option<NodeId> {
        self.check_kind(id, VAR_OR_FUNCTION_DECL, "decl_local_decl_alias").or_violation();
        match self.access_slot(id, "decl_local_decl_alias") {
            AccessSlot::Empty => None,
            AccessSlot::LocalAlias(alias) => Some(*alias),
            other => self.access_variant_mismatch(id, "decl_local_decl_alias", other, "local alias"),
        }
    }

    #[track_caller]
    pub fn set_decl_local_decl_alias(&mut self, id: NodeId, alias: NodeId) {
        self.check_kind(id, VAR_OR_FUNCTION_DECL, "set_decl_local_decl_alias").or_violation();
        self.set_access_slot(id, "set_decl_local_decl_alias", AccessSlot::LocalAlias(alias));
    }

    // === Namespaces ===

    /// `NAMESPACE_LEVEL`.
    #[track_caller]
    pub fn namespace_level(&self, id: NodeId) -> Option<LevelId> {
        self.try_ns(id, "namespace_level").or_violation().level
    }

    #[track_caller]
    pub fn set_namespace_level(&mut self, id: NodeId, level: LevelId) {
        self.ns_mut(id, "set_namespace_level").level = Some(level);
    }

    /// `DECL_NAMESPACE_INLINEES`.
    #[track_caller]
    pub fn namespace_inlinees(&self, id: NodeId) -> &[NodeId] {
        &self.try_ns(id, "namespace_inlinees").or_violation().inlinees
    }

    #[track_caller]
    pub fn add_namespace_inlinee(&mut self, id: NodeId, inlinee: NodeId) {
        self.ns_mut(id, "add_namespace_inlinee").inlinees.push(inlinee);
    }

    /// Entity bound to `name` directly in namespace `id`.
    #[track_caller]
    pub fn namespace_binding(&self, id: NodeId, name: NodeId) -> Option<NodeId> {
        self.try_ns(id, "namespace_binding")
            .or_violation()
            .bindings
            .get(&name)
            .copied()
    }

    /// Bind `name` in namespace `id`, returning the previous binding.
    #[track_caller]
    pub fn set_namespace_binding(&mut self, id: NodeId, name: NodeId, value: NodeId) -> Option<NodeId> {
        self.ns_mut(id, "set_namespace_binding").bindings.insert(name, value)
    }

    #[track_caller]
    pub fn namespace_binding_count(&self, id: NodeId) -> usize {
        self.try_ns(id, "namespace_binding_count").or_violation().bindings.len()
    }

    // === Parameters ===

    /// `DECL_PARM_LEVEL`.
    #[track_caller]
    pub fn decl_parm_level(&self, id: NodeId) -> u32 {
        self.try_parm(id, "decl_parm_level").or_violation().level
    }

    /// `DECL_PARM_INDEX`.
    #[track_caller]
    pub fn decl_parm_index(&self, id: NodeId) -> u32 {
        self.try_parm(id, "decl_parm_index").or_violation().index
    }

    #[track_caller]
    pub fn set_decl_parm_position(&mut self, id: NodeId, level: u32, index: u32) {
        self.try_parm(id, "set_decl_parm_position").or_violation();
        if let Ok(LangDeclExt::Parm(parm)) = self
            .try_lang_decl_mut(id, "set_decl_parm_position")
            .map(|lang| &mut lang.ext)
        {
            *parm = ParmData { level, index };
        }
    }

    // === Structured bindings ===

    /// `DECL_DECOMPOSITION_P`.
    #[track_caller]
    pub fn decl_decomposition_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::VarDecl
            && self
                .try_lang_decl(id, "decl_decomposition_p")
                .is_ok_and(|lang| lang.selector() == Selector::Decomp)
    }

    /// `DECL_DECOMP_BASE`.
    #[track_caller]
    pub fn decl_decomp_base(&self, id: NodeId) -> Option<NodeId> {
        self.try_decomp(id, "decl_decomp_base").or_violation().base
    }

    #[track_caller]
    pub fn set_decl_decomp_base(&mut self, id: NodeId, base: NodeId) {
        self.try_decomp(id, "set_decl_decomp_base").or_violation();
        if let Ok(LangDeclExt::Decomp(decomp)) = self
            .try_lang_decl_mut(id, "set_decl_decomp_base")
            .map(|lang| &mut lang.ext)
        {
            decomp.base = Some(base);
        }
    }
}
