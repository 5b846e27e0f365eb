//! Declaration records.
//!
//! Every declaration node carries a [`DeclData`]: the generic slots (name,
//! context, initializer), a small set of core flags, the decl flag bank, a
//! kind-specific [`DeclExtra`] and the optional language-specific record
//! ([`LangDecl`]). The language-specific record is created by
//! [`Tree::build_lang_decl`] or attached later by
//! [`Tree::retrofit_lang_decl`]; its [`Selector`] never changes afterwards.

mod clones;
mod function;
mod lang;

pub use clones::{CloneSet, CloneVariant, Clones};
pub use function::{
    AdjustStep, DeferredBody, FnContext, FnData, FnFlags, FnRole, OrdinaryFn, ThunkAdjustment, ThunkData,
};
pub use lang::{
    AccessSlot, DecompData, Language, LangDecl, LangDeclBase, LangDeclBaseFlags, LangDeclExt, MinData, NsData,
    ParmData, Selector,
};

use bitflags::bitflags;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::flags::{
    ConstDeclFlags, DeclLangFlags, FieldDeclFlags, FunctionDeclFlags, OtherDeclFlags, ParmDeclFlags,
    TemplateDeclFlags, TypeDeclFlags, UsingDeclFlags, VarDeclFlags,
};
use crate::node::{Node, Payload};
use crate::template::UseTemplate;
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

pub(crate) const FUNCTION_DECL: KindSet = KindSet(&[NodeKind::FunctionDecl]);
const TEMPLATE_DECL: KindSet = KindSet(&[NodeKind::TemplateDecl]);
const FIELD_DECL: KindSet = KindSet(&[NodeKind::FieldDecl]);
const USING_DECL: KindSet = KindSet(&[NodeKind::UsingDecl]);
const NAMESPACE_DECL: KindSet = KindSet(&[NodeKind::NamespaceDecl]);

/// Declaration kinds built by [`Tree::build_decl`]; templates need their
/// result and go through [`Tree::build_template_decl`].
const PLAIN_DECLS: KindSet = KindSet(&[
    NodeKind::FunctionDecl,
    NodeKind::VarDecl,
    NodeKind::FieldDecl,
    NodeKind::ParmDecl,
    NodeKind::ResultDecl,
    NodeKind::TypeDecl,
    NodeKind::NamespaceDecl,
    NodeKind::UsingDecl,
    NodeKind::ConstDecl,
    NodeKind::LabelDecl,
    NodeKind::ConceptDecl,
]);

/// Declaration kinds that may carry language-specific data.
const LANG_DECLS: KindSet = KindSet(&[
    NodeKind::FunctionDecl,
    NodeKind::VarDecl,
    NodeKind::FieldDecl,
    NodeKind::ParmDecl,
    NodeKind::TypeDecl,
    NodeKind::TemplateDecl,
    NodeKind::NamespaceDecl,
    NodeKind::UsingDecl,
    NodeKind::ConstDecl,
    NodeKind::ConceptDecl,
]);

bitflags! {
    /// Language-independent declaration flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclCoreFlags: u16 {
        /// Created by the compiler (`DECL_ARTIFICIAL`).
        const ARTIFICIAL = 1 << 0;
        /// Defined elsewhere (`DECL_EXTERNAL`).
        const EXTERNAL = 1 << 1;
        /// Static storage (`TREE_STATIC`).
        const STATIC = 1 << 2;
        /// Visible outside the translation unit (`TREE_PUBLIC`).
        const PUBLIC = 1 << 3;
        /// `DECL_VIRTUAL_P`.
        const VIRTUAL = 1 << 4;
        /// `DECL_CXX_CONSTRUCTOR_P`.
        const CXX_CONSTRUCTOR = 1 << 5;
        /// `DECL_CXX_DESTRUCTOR_P`.
        const CXX_DESTRUCTOR = 1 << 6;
        /// `DECL_DECLARED_INLINE_P`.
        const DECLARED_INLINE = 1 << 7;
        /// `TREE_USED`.
        const USED = 1 << 8;
    }
}

/// `DECL_VINDEX` of a function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum VirtualIndex {
    #[default]
    NotVirtual,
    /// Virtual, slot not assigned yet.
    Unknown,
    /// Index into the vtable.
    Index(u32),
}

/// Kind-specific generic slots.
#[derive(Clone, Debug, Default)]
pub enum DeclExtra {
    #[default]
    None,
    Function {
        /// First parameter; the rest follow along the chain (`DECL_ARGUMENTS`).
        arguments: Option<NodeId>,
        /// `DECL_RESULT`.
        result: Option<NodeId>,
        vindex: VirtualIndex,
    },
    Template {
        /// The templated declaration (`DECL_TEMPLATE_RESULT`).
        result: NodeId,
        /// Parameter levels, outermost first (`DECL_TEMPLATE_PARMS`).
        parms: Option<NodeId>,
    },
    Field {
        /// Width of a bit-field (`DECL_BIT_FIELD_TYPE` set).
        bit_width: Option<u32>,
        /// Byte offset once laid out.
        offset: Option<u64>,
    },
    Using {
        /// Scope named by the using-declaration (`USING_DECL_SCOPE`).
        scope: Option<NodeId>,
        /// Declarations brought in (`USING_DECL_DECLS`).
        decls: Option<NodeId>,
    },
    Namespace {
        /// Target of a namespace alias (`ORIGINAL_NAMESPACE`).
        alias: Option<NodeId>,
    },
}

impl DeclExtra {
    fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::FunctionDecl => DeclExtra::Function {
                arguments: None,
                result: None,
                vindex: VirtualIndex::NotVirtual,
            },
            NodeKind::FieldDecl => DeclExtra::Field {
                bit_width: None,
                offset: None,
            },
            NodeKind::UsingDecl => DeclExtra::Using {
                scope: None,
                decls: None,
            },
            NodeKind::NamespaceDecl => DeclExtra::Namespace { alias: None },
            _ => DeclExtra::None,
        }
    }
}

/// Payload of a declaration node.
#[derive(Clone, Debug)]
pub struct DeclData {
    /// `DECL_NAME`.
    pub(crate) name: Option<NodeId>,
    /// Enclosing class, function or namespace (`DECL_CONTEXT`).
    pub(crate) context: Option<NodeId>,
    /// `DECL_INITIAL`.
    pub(crate) initial: Option<NodeId>,
    pub(crate) core: DeclCoreFlags,
    pub(crate) lang_flags: DeclLangFlags,
    pub(crate) extra: DeclExtra,
    /// `DECL_LANG_SPECIFIC`.
    pub(crate) lang: Option<LangDecl>,
}

impl DeclData {
    fn new(kind: NodeKind, name: Option<NodeId>) -> Self {
        DeclData {
            name,
            context: None,
            initial: None,
            core: DeclCoreFlags::empty(),
            lang_flags: DeclLangFlags::for_kind(kind),
            extra: DeclExtra::for_kind(kind),
            lang: None,
        }
    }
}

impl Tree {
    // === Construction ===

    /// Build a declaration without language-specific data (`build_decl`).
    ///
    /// Function names that are constructor or destructor identifiers set
    /// the matching core flag.
    #[track_caller]
    pub fn build_decl(&mut self, kind: NodeKind, span: Span, name: Option<NodeId>, ty: Option<NodeId>) -> NodeId {
        if !PLAIN_DECLS.contains(kind) {
            crate::check::violation(ContractViolation::KindMismatch {
                accessor: "build_decl",
                node: NodeId::ERROR_MARK,
                found: kind,
                expected: PLAIN_DECLS,
            });
        }
        let mut data = DeclData::new(kind, name);
        if kind == NodeKind::FunctionDecl {
            if let Some(name) = name {
                let name_kind = self.identifier_kind(name);
                data.core.set(DeclCoreFlags::CXX_CONSTRUCTOR, name_kind.is_ctor());
                data.core.set(DeclCoreFlags::CXX_DESTRUCTOR, name_kind.is_dtor());
            }
        }
        let id = self.push(Node::new(kind, span, Payload::Decl(Box::new(data))));
        self.set_ty(id, ty);
        id
    }

    /// Build a declaration with its language-specific record attached
    /// (`build_lang_decl`).
    #[track_caller]
    pub fn build_lang_decl(
        &mut self,
        kind: NodeKind,
        span: Span,
        name: Option<NodeId>,
        ty: Option<NodeId>,
    ) -> NodeId {
        let id = self.build_decl(kind, span, name, ty);
        self.retrofit_lang_decl(id);
        id
    }

    /// Attach language-specific data if missing (`retrofit_lang_decl`).
    #[track_caller]
    pub fn retrofit_lang_decl(&mut self, id: NodeId) {
        let kind = self.check_kind(id, LANG_DECLS, "retrofit_lang_decl").or_violation().kind;
        let Some(selector) = Selector::for_kind(kind) else {
            unreachable!("every kind in LANG_DECLS has a selector")
        };
        self.attach_lang_decl(id, selector);
    }

    fn attach_lang_decl(&mut self, id: NodeId, selector: Selector) {
        let decl = self.try_decl_mut(id, "attach_lang_decl").or_violation();
        if decl.lang.is_none() {
            decl.lang = Some(LangDecl::new(selector, Language::default()));
            trace!(%id, ?selector, "attached language-specific data");
        }
    }

    /// Build a template declaration around `result`, the templated
    /// function, class typedef, variable or concept.
    #[track_caller]
    pub fn build_template_decl(&mut self, span: Span, name: Option<NodeId>, result: NodeId) -> NodeId {
        self.check_kind(result, KindSet::DECLS, "build_template_decl").or_violation();
        let mut data = DeclData::new(NodeKind::TemplateDecl, name);
        data.extra = DeclExtra::Template { result, parms: None };
        data.lang = Some(LangDecl::new(Selector::Min, Language::default()));
        let id = self.push(Node::new(NodeKind::TemplateDecl, span, Payload::Decl(Box::new(data))));
        let ty = self.ty(result);
        self.set_ty(id, ty);
        id
    }

    /// Build the variable of a structured binding, referring back to the
    /// artificial variable that holds the decomposed object.
    pub fn build_decomposition_var(
        &mut self,
        span: Span,
        name: Option<NodeId>,
        ty: Option<NodeId>,
        base: NodeId,
    ) -> NodeId {
        let id = self.build_decl(NodeKind::VarDecl, span, name, ty);
        self.attach_lang_decl(id, Selector::Decomp);
        self.set_decl_decomp_base(id, base);
        id
    }

    // === Record access ===

    pub(crate) fn try_decl(&self, id: NodeId, accessor: &'static str) -> Result<&DeclData, ContractViolation> {
        self.try_payload(id, KindSet::DECLS, accessor, "declaration", |payload| match payload {
            Payload::Decl(data) => Some(&**data),
            _ => None,
        })
    }

    pub(crate) fn try_decl_mut(
        &mut self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&mut DeclData, ContractViolation> {
        self.try_payload_mut(id, KindSet::DECLS, accessor, "declaration", |payload| match payload {
            Payload::Decl(data) => Some(&mut **data),
            _ => None,
        })
    }

    #[track_caller]
    fn decl_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut DeclData {
        self.try_decl_mut(id, accessor).or_violation()
    }

    /// `STRIP_TEMPLATE`.
    pub fn try_strip_template(&self, id: NodeId, accessor: &'static str) -> Result<NodeId, ContractViolation> {
        match &self.try_node(id, accessor)?.payload {
            Payload::Decl(data) => match data.extra {
                DeclExtra::Template { result, .. } => Ok(result),
                _ => Ok(id),
            },
            _ => Ok(id),
        }
    }

    #[track_caller]
    pub fn strip_template(&self, id: NodeId) -> NodeId {
        self.try_strip_template(id, "strip_template").or_violation()
    }

    // === Generic slots ===

    #[track_caller]
    pub fn decl_name(&self, id: NodeId) -> Option<NodeId> {
        self.try_decl(id, "decl_name").or_violation().name
    }

    #[track_caller]
    pub fn set_decl_name(&mut self, id: NodeId, name: Option<NodeId>) {
        self.decl_mut(id, "set_decl_name").name = name;
    }

    #[track_caller]
    pub fn decl_context(&self, id: NodeId) -> Option<NodeId> {
        self.try_decl(id, "decl_context").or_violation().context
    }

    #[track_caller]
    pub fn set_decl_context(&mut self, id: NodeId, context: Option<NodeId>) {
        self.decl_mut(id, "set_decl_context").context = context;
    }

    /// `DECL_CLASS_CONTEXT`: the context if it is a class type.
    #[track_caller]
    pub fn decl_class_context(&self, id: NodeId) -> Option<NodeId> {
        self.decl_context(id)
            .filter(|&context| KindSet::CLASS_TYPES.contains(self.kind(context)))
    }

    #[track_caller]
    pub fn decl_initial(&self, id: NodeId) -> Option<NodeId> {
        self.try_decl(id, "decl_initial").or_violation().initial
    }

    #[track_caller]
    pub fn set_decl_initial(&mut self, id: NodeId, initial: Option<NodeId>) {
        self.decl_mut(id, "set_decl_initial").initial = initial;
    }

    // === Core flags ===

    #[track_caller]
    pub fn decl_core_flags(&self, id: NodeId) -> DeclCoreFlags {
        self.try_decl(id, "decl_core_flags").or_violation().core
    }

    #[track_caller]
    pub fn set_decl_core_flag(&mut self, id: NodeId, flag: DeclCoreFlags, value: bool) {
        self.decl_mut(id, "set_decl_core_flag").core.set(flag, value);
    }

    /// `DECL_ARTIFICIAL`.
    #[track_caller]
    pub fn decl_artificial_p(&self, id: NodeId) -> bool {
        self.decl_core_flags(id).contains(DeclCoreFlags::ARTIFICIAL)
    }

    #[track_caller]
    pub fn set_decl_artificial(&mut self, id: NodeId, value: bool) {
        self.set_decl_core_flag(id, DeclCoreFlags::ARTIFICIAL, value);
    }

    /// `DECL_VIRTUAL_P`.
    #[track_caller]
    pub fn decl_virtual_p(&self, id: NodeId) -> bool {
        self.decl_core_flags(id).contains(DeclCoreFlags::VIRTUAL)
    }

    /// Mark a function virtual. Its vtable slot starts out unknown.
    #[track_caller]
    pub fn set_decl_virtual_p(&mut self, id: NodeId, value: bool) {
        self.set_decl_core_flag(id, DeclCoreFlags::VIRTUAL, value);
        if self.kind(id) == NodeKind::FunctionDecl {
            let vindex = if value {
                VirtualIndex::Unknown
            } else {
                VirtualIndex::NotVirtual
            };
            self.set_decl_vindex(id, vindex);
        }
    }

    /// `DECL_CONSTRUCTOR_P`, through template wrappers.
    #[track_caller]
    pub fn decl_constructor_p(&self, id: NodeId) -> bool {
        let fn_id = self.strip_template(id);
        self.kind(fn_id) == NodeKind::FunctionDecl
            && self.decl_core_flags(fn_id).contains(DeclCoreFlags::CXX_CONSTRUCTOR)
    }

    /// `DECL_DESTRUCTOR_P`, through template wrappers.
    #[track_caller]
    pub fn decl_destructor_p(&self, id: NodeId) -> bool {
        let fn_id = self.strip_template(id);
        self.kind(fn_id) == NodeKind::FunctionDecl
            && self.decl_core_flags(fn_id).contains(DeclCoreFlags::CXX_DESTRUCTOR)
    }

    // === Decl flag bank ===

    /// `DECL_IN_AGGR_P`: shared slot 3 of every family but labels'.
    #[track_caller]
    pub fn decl_in_aggr_p(&self, id: NodeId) -> bool {
        match self.try_decl(id, "decl_in_aggr_p").or_violation().lang_flags {
            DeclLangFlags::Var(flags) => flags.contains(VarDeclFlags::IN_AGGR),
            DeclLangFlags::Function(flags) => flags.contains(FunctionDeclFlags::IN_AGGR),
            DeclLangFlags::Field(flags) => flags.contains(FieldDeclFlags::IN_AGGR),
            DeclLangFlags::Parm(flags) => flags.contains(ParmDeclFlags::IN_AGGR),
            DeclLangFlags::Type(flags) => flags.contains(TypeDeclFlags::IN_AGGR),
            DeclLangFlags::Template(flags) => flags.contains(TemplateDeclFlags::IN_AGGR),
            DeclLangFlags::Const(flags) => flags.contains(ConstDeclFlags::IN_AGGR),
            DeclLangFlags::Using(flags) => flags.contains(UsingDeclFlags::IN_AGGR),
            DeclLangFlags::Other(flags) => flags.contains(OtherDeclFlags::IN_AGGR),
            DeclLangFlags::Label(_) | DeclLangFlags::Unused => no_in_aggr(id, self.kind(id), "decl_in_aggr_p"),
        }
    }

    #[track_caller]
    pub fn set_decl_in_aggr_p(&mut self, id: NodeId, value: bool) {
        let kind = self.kind(id);
        match &mut self.decl_mut(id, "set_decl_in_aggr_p").lang_flags {
            DeclLangFlags::Var(flags) => flags.set(VarDeclFlags::IN_AGGR, value),
            DeclLangFlags::Function(flags) => flags.set(FunctionDeclFlags::IN_AGGR, value),
            DeclLangFlags::Field(flags) => flags.set(FieldDeclFlags::IN_AGGR, value),
            DeclLangFlags::Parm(flags) => flags.set(ParmDeclFlags::IN_AGGR, value),
            DeclLangFlags::Type(flags) => flags.set(TypeDeclFlags::IN_AGGR, value),
            DeclLangFlags::Template(flags) => flags.set(TemplateDeclFlags::IN_AGGR, value),
            DeclLangFlags::Const(flags) => flags.set(ConstDeclFlags::IN_AGGR, value),
            DeclLangFlags::Using(flags) => flags.set(UsingDeclFlags::IN_AGGR, value),
            DeclLangFlags::Other(flags) => flags.set(OtherDeclFlags::IN_AGGR, value),
            DeclLangFlags::Label(_) | DeclLangFlags::Unused => no_in_aggr(id, kind, "set_decl_in_aggr_p"),
        }
    }

    // === Functions ===

    #[track_caller]
    fn function_extra(&self, id: NodeId, accessor: &'static str) -> (Option<NodeId>, Option<NodeId>, VirtualIndex) {
        let decl = self
            .check_kind(id, FUNCTION_DECL, accessor)
            .and_then(|_| self.try_decl(id, accessor))
            .or_violation();
        match decl.extra {
            DeclExtra::Function {
                arguments,
                result,
                vindex,
            } => (arguments, result, vindex),
            _ => unreachable!("function declarations are built with function slots"),
        }
    }

    #[track_caller]
    fn function_extra_mut(
        &mut self,
        id: NodeId,
        accessor: &'static str,
    ) -> (&mut Option<NodeId>, &mut Option<NodeId>, &mut VirtualIndex) {
        self.check_kind(id, FUNCTION_DECL, accessor).or_violation();
        match &mut self.decl_mut(id, accessor).extra {
            DeclExtra::Function {
                arguments,
                result,
                vindex,
            } => (arguments, result, vindex),
            _ => unreachable!("function declarations are built with function slots"),
        }
    }

    /// `DECL_ARGUMENTS`: the first parameter.
    #[track_caller]
    pub fn decl_arguments(&self, id: NodeId) -> Option<NodeId> {
        self.function_extra(id, "decl_arguments").0
    }

    /// Parameters of a function in order.
    #[track_caller]
    pub fn decl_parms(&self, id: NodeId) -> Vec<NodeId> {
        self.chain_iter(self.decl_arguments(id)).collect()
    }

    #[track_caller]
    pub fn set_decl_arguments(&mut self, id: NodeId, first: Option<NodeId>) {
        *self.function_extra_mut(id, "set_decl_arguments").0 = first;
    }

    /// `DECL_RESULT`.
    #[track_caller]
    pub fn decl_result(&self, id: NodeId) -> Option<NodeId> {
        self.function_extra(id, "decl_result").1
    }

    #[track_caller]
    pub fn set_decl_result(&mut self, id: NodeId, result: Option<NodeId>) {
        *self.function_extra_mut(id, "set_decl_result").1 = result;
    }

    /// `DECL_VINDEX`.
    #[track_caller]
    pub fn decl_vindex(&self, id: NodeId) -> VirtualIndex {
        self.function_extra(id, "decl_vindex").2
    }

    #[track_caller]
    pub fn set_decl_vindex(&mut self, id: NodeId, vindex: VirtualIndex) {
        *self.function_extra_mut(id, "set_decl_vindex").2 = vindex;
    }

    // === Templates ===

    /// `DECL_TEMPLATE_RESULT`.
    #[track_caller]
    pub fn decl_template_result(&self, id: NodeId) -> NodeId {
        self.check_kind(id, TEMPLATE_DECL, "decl_template_result").or_violation();
        self.strip_template(id)
    }

    /// `DECL_TEMPLATE_PARMS`: a `TreeList` of parameter levels.
    #[track_caller]
    pub fn decl_template_parms(&self, id: NodeId) -> Option<NodeId> {
        let decl = self
            .check_kind(id, TEMPLATE_DECL, "decl_template_parms")
            .and_then(|_| self.try_decl(id, "decl_template_parms"))
            .or_violation();
        match decl.extra {
            DeclExtra::Template { parms, .. } => parms,
            _ => unreachable!("template declarations are built with a result"),
        }
    }

    #[track_caller]
    pub fn set_decl_template_parms(&mut self, id: NodeId, levels: Option<NodeId>) {
        self.check_kind(id, TEMPLATE_DECL, "set_decl_template_parms").or_violation();
        if let DeclExtra::Template { parms, .. } = &mut self.decl_mut(id, "set_decl_template_parms").extra {
            *parms = levels;
        }
    }

    /// `DECL_FUNCTION_TEMPLATE_P`.
    #[track_caller]
    pub fn decl_function_template_p(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::TemplateDecl && self.kind(self.strip_template(id)) == NodeKind::FunctionDecl
    }

    /// `DECL_CLASS_TEMPLATE_P`: the result is the implicit typedef of a class.
    #[track_caller]
    pub fn decl_class_template_p(&self, id: NodeId) -> bool {
        if self.kind(id) != NodeKind::TemplateDecl {
            return false;
        }
        let result = self.strip_template(id);
        self.kind(result) == NodeKind::TypeDecl && self.lang_flag(result, TypeDeclFlags::IMPLICIT_TYPEDEF)
    }

    // === use_template ===

    /// `DECL_USE_TEMPLATE`.
    #[track_caller]
    pub fn decl_use_template(&self, id: NodeId) -> UseTemplate {
        self.try_lang_decl(id, "decl_use_template").or_violation().base.use_template
    }

    #[track_caller]
    pub fn set_decl_use_template(&mut self, id: NodeId, value: UseTemplate) {
        self.try_lang_decl_mut(id, "set_decl_use_template")
            .or_violation()
            .base
            .use_template = value;
    }

    /// `DECL_TEMPLATE_INSTANTIATION`: implicit or explicit instantiation.
    #[track_caller]
    pub fn decl_template_instantiation(&self, id: NodeId) -> bool {
        self.decl_use_template(id).is_instantiation()
    }

    /// `DECL_TEMPLATE_SPECIALIZATION`.
    #[track_caller]
    pub fn decl_template_specialization(&self, id: NodeId) -> bool {
        self.decl_use_template(id).is_specialization()
    }

    // === Fields ===

    /// Width of a bit-field, `None` for ordinary fields.
    #[track_caller]
    pub fn decl_bit_field_width(&self, id: NodeId) -> Option<u32> {
        match self
            .check_kind(id, FIELD_DECL, "decl_bit_field_width")
            .and_then(|_| self.try_decl(id, "decl_bit_field_width"))
            .or_violation()
            .extra
        {
            DeclExtra::Field { bit_width, .. } => bit_width,
            _ => None,
        }
    }

    #[track_caller]
    pub fn set_decl_bit_field_width(&mut self, id: NodeId, width: u32) {
        self.check_kind(id, FIELD_DECL, "set_decl_bit_field_width").or_violation();
        if let DeclExtra::Field { bit_width, .. } = &mut self.decl_mut(id, "set_decl_bit_field_width").extra {
            *bit_width = Some(width);
        }
        self.set_lang_flag(id, FieldDeclFlags::C_BIT_FIELD, true);
    }

    /// Byte offset of a laid-out field.
    #[track_caller]
    pub fn decl_field_offset(&self, id: NodeId) -> Option<u64> {
        match self
            .check_kind(id, FIELD_DECL, "decl_field_offset")
            .and_then(|_| self.try_decl(id, "decl_field_offset"))
            .or_violation()
            .extra
        {
            DeclExtra::Field { offset, .. } => offset,
            _ => None,
        }
    }

    #[track_caller]
    pub fn set_decl_field_offset(&mut self, id: NodeId, value: u64) {
        self.check_kind(id, FIELD_DECL, "set_decl_field_offset").or_violation();
        if let DeclExtra::Field { offset, .. } = &mut self.decl_mut(id, "set_decl_field_offset").extra {
            *offset = Some(value);
        }
    }

    // === Using declarations ===

    /// `USING_DECL_SCOPE`.
    #[track_caller]
    pub fn using_decl_scope(&self, id: NodeId) -> Option<NodeId> {
        self.using_slots(id, "using_decl_scope").0
    }

    /// `USING_DECL_DECLS`.
    #[track_caller]
    pub fn using_decl_decls(&self, id: NodeId) -> Option<NodeId> {
        self.using_slots(id, "using_decl_decls").1
    }

    #[track_caller]
    fn using_slots(&self, id: NodeId, accessor: &'static str) -> (Option<NodeId>, Option<NodeId>) {
        match self
            .check_kind(id, USING_DECL, accessor)
            .and_then(|_| self.try_decl(id, accessor))
            .or_violation()
            .extra
        {
            DeclExtra::Using { scope, decls } => (scope, decls),
            _ => (None, None),
        }
    }

    #[track_caller]
    pub fn set_using_decl(&mut self, id: NodeId, scope: Option<NodeId>, decls: Option<NodeId>) {
        self.check_kind(id, USING_DECL, "set_using_decl").or_violation();
        self.decl_mut(id, "set_using_decl").extra = DeclExtra::Using { scope, decls };
    }

    // === Namespace aliases ===

    /// `ORIGINAL_NAMESPACE`: the namespace an alias stands for, or the
    /// namespace itself.
    pub fn try_original_namespace(&self, id: NodeId) -> Result<NodeId, ContractViolation> {
        let mut seen = FxHashSet::default();
        let mut current = id;
        loop {
            self.check_kind(current, NAMESPACE_DECL, "original_namespace")?;
            let decl = self.try_decl(current, "original_namespace")?;
            match decl.extra {
                DeclExtra::Namespace { alias: Some(target) } => {
                    if !seen.insert(current) {
                        return Err(ContractViolation::AliasCycle {
                            accessor: "original_namespace",
                            node: id,
                        });
                    }
                    current = target;
                }
                _ => return Ok(current),
            }
        }
    }

    #[track_caller]
    pub fn original_namespace(&self, id: NodeId) -> NodeId {
        self.try_original_namespace(id).or_violation()
    }

    /// `DECL_NAMESPACE_ALIAS`.
    #[track_caller]
    pub fn decl_namespace_alias(&self, id: NodeId) -> Option<NodeId> {
        let decl = self
            .check_kind(id, NAMESPACE_DECL, "decl_namespace_alias")
            .and_then(|_| self.try_decl(id, "decl_namespace_alias"))
            .or_violation();
        match decl.extra {
            DeclExtra::Namespace { alias } => alias,
            _ => None,
        }
    }

    #[track_caller]
    pub fn set_decl_namespace_alias(&mut self, id: NodeId, target: NodeId) {
        self.check_kind(id, NAMESPACE_DECL, "set_decl_namespace_alias").or_violation();
        self.decl_mut(id, "set_decl_namespace_alias").extra = DeclExtra::Namespace { alias: Some(target) };
    }
}

#[track_caller]
fn no_in_aggr(id: NodeId, kind: NodeKind, accessor: &'static str) -> ! {
    crate::check::violation(ContractViolation::FlagFamilyMismatch {
        accessor,
        node: id,
        kind,
        bank: crate::flags::Bank::Decl,
        family: "IN_AGGR",
    })
}
