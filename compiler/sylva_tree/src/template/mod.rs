//! Template bookkeeping: instantiation state, template info nodes,
//! template parameter indices and argument vectors.
//!
//! Template arguments are `TreeVec`s. A single-level argument vector holds
//! the arguments directly; a multi-level one holds one `TreeVec` per level,
//! outermost first. Levels are numbered from 1.

use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::flags::TemplateParmIndexFlags;
use crate::node::{Node, Payload};
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

const TEMPLATE_INFO: KindSet = KindSet(&[NodeKind::TemplateInfo]);
const TEMPLATE_PARM_INDEX: KindSet = KindSet(&[NodeKind::TemplateParmIndex]);

/// How a declaration or class relates to a template (`DECL_USE_TEMPLATE`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum UseTemplate {
    /// Not a specialization or instantiation; possibly a primary template.
    #[default]
    NotTemplate = 0,
    ImplicitInstantiation = 1,
    /// Explicit or partial specialization.
    Specialization = 2,
    ExplicitInstantiation = 3,
}

impl UseTemplate {
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(UseTemplate::NotTemplate),
            1 => Some(UseTemplate::ImplicitInstantiation),
            2 => Some(UseTemplate::Specialization),
            3 => Some(UseTemplate::ExplicitInstantiation),
            _ => None,
        }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Implicit or explicit instantiation (`DECL_TEMPLATE_INSTANTIATION`).
    #[inline]
    pub const fn is_instantiation(self) -> bool {
        self.raw() & 1 != 0
    }

    #[inline]
    pub const fn is_implicit_instantiation(self) -> bool {
        matches!(self, UseTemplate::ImplicitInstantiation)
    }

    #[inline]
    pub const fn is_explicit_instantiation(self) -> bool {
        matches!(self, UseTemplate::ExplicitInstantiation)
    }

    #[inline]
    pub const fn is_specialization(self) -> bool {
        matches!(self, UseTemplate::Specialization)
    }
}

/// An access check postponed until instantiation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DeferredAccessCheck {
    /// Base through which the member was named.
    pub binfo: NodeId,
    /// Member being accessed.
    pub decl: NodeId,
    /// Declaration to mention in the diagnostic.
    pub diag_decl: NodeId,
    pub span: Span,
}

/// Deferred checks of a template info node. They are handed out once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DeferredChecks {
    Pending(Vec<DeferredAccessCheck>),
    Consumed,
}

/// Payload of a `TemplateInfo` node.
#[derive(Clone, Debug)]
pub struct TemplateInfoData {
    /// `TI_TEMPLATE`: the template, or an overload set for some friends.
    pub(crate) tmpl: NodeId,
    /// `TI_ARGS`.
    pub(crate) args: Option<NodeId>,
    pub(crate) deferred: DeferredChecks,
}

/// Payload of a `TemplateParmIndex` node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TemplateParmIndexData {
    /// Position within its level, from 0.
    pub(crate) index: u32,
    /// Level, from 1 for the outermost template.
    pub(crate) level: u32,
    /// Level the parameter was declared at, before any reduction.
    pub(crate) orig_level: u32,
    /// The parameter's declaration.
    pub(crate) decl: Option<NodeId>,
}

impl Tree {
    // === Template info ===

    /// Build a template info node (`build_template_info`).
    pub fn build_template_info(
        &mut self,
        tmpl: NodeId,
        args: Option<NodeId>,
        deferred: Vec<DeferredAccessCheck>,
    ) -> NodeId {
        let data = TemplateInfoData {
            tmpl,
            args,
            deferred: DeferredChecks::Pending(deferred),
        };
        self.push(Node::new(
            NodeKind::TemplateInfo,
            Span::DUMMY,
            Payload::TemplateInfo(Box::new(data)),
        ))
    }

    fn try_template_info(&self, id: NodeId, accessor: &'static str) -> Result<&TemplateInfoData, ContractViolation> {
        self.try_payload(id, TEMPLATE_INFO, accessor, "template info", |payload| match payload {
            Payload::TemplateInfo(data) => Some(&**data),
            _ => None,
        })
    }

    /// `TI_TEMPLATE`.
    #[track_caller]
    pub fn ti_template(&self, id: NodeId) -> NodeId {
        self.try_template_info(id, "ti_template").or_violation().tmpl
    }

    /// `TI_ARGS`.
    #[track_caller]
    pub fn ti_args(&self, id: NodeId) -> Option<NodeId> {
        self.try_template_info(id, "ti_args").or_violation().args
    }

    /// Whether the deferred access checks have already been taken.
    #[track_caller]
    pub fn ti_deferred_access_checks_taken(&self, id: NodeId) -> bool {
        self.try_template_info(id, "ti_deferred_access_checks_taken")
            .or_violation()
            .deferred
            == DeferredChecks::Consumed
    }

    /// Hand out the deferred access checks (`TI_DEFERRED_ACCESS_CHECKS`).
    /// Taking them a second time is a contract violation.
    #[track_caller]
    pub fn take_deferred_access_checks(&mut self, id: NodeId) -> Vec<DeferredAccessCheck> {
        let data = self
            .try_payload_mut(id, TEMPLATE_INFO, "take_deferred_access_checks", "template info", |payload| {
                match payload {
                    Payload::TemplateInfo(data) => Some(&mut **data),
                    _ => None,
                }
            })
            .or_violation();
        match std::mem::replace(&mut data.deferred, DeferredChecks::Consumed) {
            DeferredChecks::Pending(checks) => {
                trace!(%id, count = checks.len(), "took deferred access checks");
                checks
            }
            DeferredChecks::Consumed => crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "take_deferred_access_checks",
                node: id,
                kind: NodeKind::TemplateInfo,
                found: "consumed access checks",
                expected: "pending access checks",
            }),
        }
    }

    // === Declaration template info ===

    /// `DECL_TEMPLATE_INFO`. Thunks do not have one.
    #[track_caller]
    pub fn decl_template_info(&self, id: NodeId) -> Option<NodeId> {
        self.try_min(id, "decl_template_info").or_violation().template_info
    }

    #[track_caller]
    pub fn set_decl_template_info(&mut self, id: NodeId, info: Option<NodeId>) {
        if let Some(info) = info {
            self.check_kind(info, TEMPLATE_INFO, "set_decl_template_info").or_violation();
        }
        self.try_min_mut(id, "set_decl_template_info").or_violation().template_info = info;
    }

    /// `DECL_TI_TEMPLATE`.
    #[track_caller]
    pub fn decl_ti_template(&self, id: NodeId) -> Option<NodeId> {
        self.decl_template_info(id).map(|info| self.ti_template(info))
    }

    /// `DECL_TI_ARGS`.
    #[track_caller]
    pub fn decl_ti_args(&self, id: NodeId) -> Option<NodeId> {
        self.decl_template_info(id).and_then(|info| self.ti_args(info))
    }

    /// `PRIMARY_TEMPLATE_P`: the templated declaration names `tmpl` itself
    /// as its template.
    #[track_caller]
    pub fn primary_template_p(&self, tmpl: NodeId) -> bool {
        let result = self.decl_template_result(tmpl);
        self.decl_lang_specific_p(result) && self.decl_ti_template(result) == Some(tmpl)
    }

    // === Template parameter indices ===

    /// Build a template parameter index (`build_template_parm_index`).
    pub fn build_template_parm_index(
        &mut self,
        index: u32,
        level: u32,
        orig_level: u32,
        decl: Option<NodeId>,
        ty: Option<NodeId>,
    ) -> NodeId {
        let data = TemplateParmIndexData {
            index,
            level,
            orig_level,
            decl,
        };
        let id = self.push(Node::new(
            NodeKind::TemplateParmIndex,
            Span::DUMMY,
            Payload::TemplateParmIndex(Box::new(data)),
        ));
        self.set_ty(id, ty);
        id
    }

    fn try_template_parm_index(
        &self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<TemplateParmIndexData, ContractViolation> {
        self.try_payload(id, TEMPLATE_PARM_INDEX, accessor, "template parameter index", |payload| {
            match payload {
                Payload::TemplateParmIndex(data) => Some(&**data),
                _ => None,
            }
        })
        .copied()
    }

    /// `TEMPLATE_PARM_IDX`.
    #[track_caller]
    pub fn template_parm_idx(&self, id: NodeId) -> u32 {
        self.try_template_parm_index(id, "template_parm_idx").or_violation().index
    }

    /// `TEMPLATE_PARM_LEVEL`.
    #[track_caller]
    pub fn template_parm_level(&self, id: NodeId) -> u32 {
        self.try_template_parm_index(id, "template_parm_level").or_violation().level
    }

    /// `TEMPLATE_PARM_ORIG_LEVEL`.
    #[track_caller]
    pub fn template_parm_orig_level(&self, id: NodeId) -> u32 {
        self.try_template_parm_index(id, "template_parm_orig_level")
            .or_violation()
            .orig_level
    }

    /// `TEMPLATE_PARM_DECL`.
    #[track_caller]
    pub fn template_parm_decl(&self, id: NodeId) -> Option<NodeId> {
        self.try_template_parm_index(id, "template_parm_decl").or_violation().decl
    }

    /// `TEMPLATE_PARM_PARAMETER_PACK`.
    #[track_caller]
    pub fn template_parm_parameter_pack(&self, id: NodeId) -> bool {
        self.lang_flag(id, TemplateParmIndexFlags::PARAMETER_PACK)
    }

    // === Argument vectors ===

    /// `TMPL_ARGS_HAVE_MULTIPLE_LEVELS`.
    #[track_caller]
    pub fn tmpl_args_have_multiple_levels(&self, args: Option<NodeId>) -> bool {
        let Some(args) = args else { return false };
        if self.kind(args) != NodeKind::TreeVec {
            return false;
        }
        self.tree_vec(args)
            .first()
            .copied()
            .flatten()
            .is_some_and(|first| self.kind(first) == NodeKind::TreeVec)
    }

    /// `TMPL_ARGS_DEPTH`: number of levels; absent or list-shaped
    /// arguments count as one level.
    #[track_caller]
    pub fn tmpl_args_depth(&self, args: Option<NodeId>) -> usize {
        match args {
            Some(vec) if self.tmpl_args_have_multiple_levels(args) => self.tree_vec_length(vec),
            _ => 1,
        }
    }

    /// `TMPL_ARGS_LEVEL`: level `level` (from 1) of `args`.
    #[track_caller]
    pub fn tmpl_args_level(&self, args: NodeId, level: usize) -> Option<NodeId> {
        if self.tmpl_args_have_multiple_levels(Some(args)) {
            self.tree_vec_elt(args, level.saturating_sub(1))
        } else {
            Some(args)
        }
    }

    /// `TMPL_ARG`: argument `index` of level `level`.
    #[track_caller]
    pub fn tmpl_arg(&self, args: NodeId, level: usize, index: usize) -> Option<NodeId> {
        self.tmpl_args_level(args, level)
            .and_then(|level_args| self.tree_vec_elt(level_args, index))
    }

    /// `INNERMOST_TEMPLATE_ARGS`.
    #[track_caller]
    pub fn innermost_template_args(&self, args: NodeId) -> Option<NodeId> {
        let depth = self.tmpl_args_depth(Some(args));
        self.tmpl_args_level(args, depth)
    }

    /// `NUM_TMPL_ARGS` of one level.
    #[track_caller]
    pub fn num_tmpl_args(&self, level_args: NodeId) -> usize {
        self.tree_vec_length(level_args)
    }

    /// `TMPL_PARMS_DEPTH`: depth recorded in the purpose of a parameter
    /// level list.
    #[track_caller]
    pub fn tmpl_parms_depth(&self, parms: NodeId) -> i64 {
        match self.tree_purpose(parms) {
            Some(depth) => self.int_cst_value(depth),
            None => 0,
        }
    }
}
