//! Overload sets and baselinks.
//!
//! An overload set is a chain of `Overload` nodes, each holding one
//! function (or a nested set) with the rest of the set on its chain.
//! A set of one ordinary function is just the function. Hidden functions,
//! such as friends not yet declared at namespace scope, are kept at the
//! front of the set.

use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::flags::{BaselinkFlags, OverloadFlags};
use crate::node::{Node, Payload};
use crate::{KindSet, NodeId, NodeKind, Tree};

const OVERLOAD: KindSet = KindSet(&[NodeKind::Overload]);
const BASELINK: KindSet = KindSet(&[NodeKind::Baselink]);

/// How [`Tree::ovl_insert`] adds a function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OvlInsert {
    #[default]
    Plain,
    /// Not visible to ordinary lookup.
    Hidden,
    /// Brought in by a using-declaration.
    Using,
    /// Brought in by an exported using-declaration.
    ExportedUsing,
}

/// Payload of a `Baselink` node: a set of member functions named through a
/// base class.
#[derive(Clone, Debug)]
pub struct BaselinkData {
    /// `BASELINK_BINFO`: where the functions were found.
    pub(crate) binfo: NodeId,
    /// `BASELINK_FUNCTIONS`.
    pub(crate) functions: NodeId,
    /// `BASELINK_ACCESS_BINFO`: the base through which they were named.
    pub(crate) access_binfo: NodeId,
    /// `BASELINK_OPTYPE`: target of a conversion operator lookup.
    pub(crate) optype: Option<NodeId>,
}

/// Iterator over the functions of an overload set, flattening nested
/// sets (`ovl_iterator` combined with `lkp_iterator`).
pub struct OvlIter<'a> {
    tree: &'a Tree,
    /// Remaining sets, innermost last.
    stack: Vec<NodeId>,
}

impl Iterator for OvlIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let current = self.stack.pop()?;
            if self.tree.kind(current) != NodeKind::Overload {
                return Some(current);
            }
            if let Some(next) = self.tree.chain(current) {
                self.stack.push(next);
            }
            self.stack.push(self.tree.ovl_function(current));
        }
    }
}

impl Tree {
    // === Overloads ===

    /// `ovl_make`: a set node holding `function` with `next` behind it.
    #[track_caller]
    pub fn build_overload(&mut self, function: NodeId, next: Option<NodeId>) -> NodeId {
        let span = self.span(function);
        let id = self.push(Node::new(NodeKind::Overload, span, Payload::Overload(function)));
        self.set_chain(id, next);
        let ty = if next.is_some() || self.kind(function) == NodeKind::TemplateDecl {
            Some(NodeId::UNKNOWN_TYPE)
        } else {
            self.ty(function)
        };
        self.set_ty(id, ty);
        if self.kind(function) == NodeKind::Overload {
            self.set_lang_flag(id, OverloadFlags::NESTED, true);
        }
        if next.is_some_and(|next| self.kind(next) == NodeKind::Overload && self.ovl_dedup_p(next)) {
            self.set_lang_flag(id, OverloadFlags::DEDUP, true);
        }
        id
    }

    /// Add `function` to the set `set` (`ovl_insert`) and return the new
    /// set. Hidden functions stay in front of visible ones.
    #[track_caller]
    pub fn ovl_insert(&mut self, function: NodeId, set: Option<NodeId>, how: OvlInsert) -> NodeId {
        let mut rest = set;
        let mut insert_after = None;
        while let Some(node) = rest {
            if self.kind(node) != NodeKind::Overload || !self.ovl_hidden_p(node) {
                break;
            }
            insert_after = Some(node);
            rest = self.chain(node);
        }

        let inserted = if rest.is_some() || how != OvlInsert::Plain || self.kind(function) == NodeKind::TemplateDecl {
            let ovl = self.build_overload(function, rest);
            match how {
                OvlInsert::Plain => {}
                OvlInsert::Hidden => self.set_lang_flag(ovl, OverloadFlags::HIDDEN, true),
                OvlInsert::Using | OvlInsert::ExportedUsing => {
                    self.set_lang_flag(ovl, OverloadFlags::DEDUP, true);
                    self.set_lang_flag(ovl, OverloadFlags::USING, true);
                    self.set_lang_flag(ovl, OverloadFlags::EXPORT, how == OvlInsert::ExportedUsing);
                }
            }
            ovl
        } else {
            function
        };
        trace!(%function, ?how, "inserted into overload set");

        match insert_after {
            Some(last_hidden) => {
                self.set_chain(last_hidden, Some(inserted));
                self.set_ty(last_hidden, Some(NodeId::UNKNOWN_TYPE));
                set.unwrap_or(inserted)
            }
            None => inserted,
        }
    }

    /// `lookup_add`: prepend `fns` to a lookup result.
    #[track_caller]
    pub fn lookup_add(&mut self, fns: NodeId, lookup: Option<NodeId>) -> NodeId {
        if fns.is_error() || lookup.is_some_and(NodeId::is_error) {
            return NodeId::ERROR_MARK;
        }
        if lookup.is_some() || self.kind(fns) == NodeKind::TemplateDecl {
            let ovl = self.build_overload(fns, lookup);
            self.set_lang_flag(ovl, OverloadFlags::LOOKUP, true);
            ovl
        } else {
            fns
        }
    }

    /// Skip the hidden functions at the front of a set
    /// (`ovl_skip_hidden`).
    #[track_caller]
    pub fn ovl_skip_hidden(&self, set: Option<NodeId>) -> Option<NodeId> {
        let mut set = set;
        while let Some(node) = set {
            if self.kind(node) != NodeKind::Overload || !self.ovl_hidden_p(node) {
                break;
            }
            set = self.chain(node);
        }
        set
    }

    pub(crate) fn try_ovl_function(&self, id: NodeId, accessor: &'static str) -> Result<NodeId, ContractViolation> {
        self.try_payload(id, OVERLOAD, accessor, "overload", |payload| match payload {
            Payload::Overload(function) => Some(function),
            _ => None,
        })
        .copied()
    }

    /// `OVL_FUNCTION`.
    #[track_caller]
    pub fn ovl_function(&self, id: NodeId) -> NodeId {
        self.try_ovl_function(id, "ovl_function").or_violation()
    }

    /// `OVL_CHAIN`.
    #[track_caller]
    pub fn ovl_chain(&self, id: NodeId) -> Option<NodeId> {
        self.check_kind(id, OVERLOAD, "ovl_chain").or_violation();
        self.chain(id)
    }

    /// `OVL_FIRST`: the first function of a set, or the node itself.
    #[track_caller]
    pub fn ovl_first(&self, node: NodeId) -> NodeId {
        let mut node = node;
        while self.kind(node) == NodeKind::Overload {
            node = self.ovl_function(node);
        }
        node
    }

    /// `OVL_NAME`.
    #[track_caller]
    pub fn ovl_name(&self, node: NodeId) -> Option<NodeId> {
        self.decl_name(self.ovl_first(node))
    }

    /// `OVL_SINGLE_P`: a lone function or a set of one.
    #[track_caller]
    pub fn ovl_single_p(&self, node: NodeId) -> bool {
        self.kind(node) != NodeKind::Overload || self.chain(node).is_none()
    }

    /// Functions of a set in order, nested sets flattened.
    pub fn ovl_iter(&self, set: Option<NodeId>) -> OvlIter<'_> {
        OvlIter {
            tree: self,
            stack: set.into_iter().collect(),
        }
    }

    /// `OVL_HIDDEN_P`.
    #[track_caller]
    pub fn ovl_hidden_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, OverloadFlags::HIDDEN)
    }

    /// `OVL_DEDUP_P`.
    #[track_caller]
    pub fn ovl_dedup_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, OverloadFlags::DEDUP)
    }

    /// `OVL_USING_P`.
    #[track_caller]
    pub fn ovl_using_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, OverloadFlags::USING)
    }

    /// `OVL_NESTED_P`.
    #[track_caller]
    pub fn ovl_nested_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, OverloadFlags::NESTED)
    }

    /// `OVL_LOOKUP_P`.
    #[track_caller]
    pub fn ovl_lookup_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, OverloadFlags::LOOKUP)
    }

    /// `OVL_EXPORT_P`.
    #[track_caller]
    pub fn ovl_export_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, OverloadFlags::EXPORT)
    }

    // === Baselinks ===

    /// `build_baselink`.
    #[track_caller]
    pub fn build_baselink(
        &mut self,
        binfo: NodeId,
        access_binfo: NodeId,
        functions: NodeId,
        optype: Option<NodeId>,
    ) -> NodeId {
        self.try_binfo(binfo, "build_baselink").or_violation();
        self.try_binfo(access_binfo, "build_baselink").or_violation();
        let span = self.span(self.ovl_first(functions));
        let data = BaselinkData {
            binfo,
            functions,
            access_binfo,
            optype,
        };
        let id = self.push(Node::new(NodeKind::Baselink, span, Payload::Baselink(Box::new(data))));
        self.set_ty(id, Some(NodeId::UNKNOWN_TYPE));
        id
    }

    fn baselink(&self, id: NodeId, accessor: &'static str) -> &BaselinkData {
        self.try_payload(id, BASELINK, accessor, "baselink", |payload| match payload {
            Payload::Baselink(data) => Some(&**data),
            _ => None,
        })
        .or_violation()
    }

    /// `BASELINK_BINFO`.
    #[track_caller]
    pub fn baselink_binfo(&self, id: NodeId) -> NodeId {
        self.baselink(id, "baselink_binfo").binfo
    }

    /// `BASELINK_FUNCTIONS`.
    #[track_caller]
    pub fn baselink_functions(&self, id: NodeId) -> NodeId {
        self.baselink(id, "baselink_functions").functions
    }

    #[track_caller]
    pub fn set_baselink_functions(&mut self, id: NodeId, functions: NodeId) {
        self.try_payload_mut(id, BASELINK, "set_baselink_functions", "baselink", |payload| match payload {
            Payload::Baselink(data) => Some(&mut **data),
            _ => None,
        })
        .or_violation()
        .functions = functions;
    }

    /// `BASELINK_ACCESS_BINFO`.
    #[track_caller]
    pub fn baselink_access_binfo(&self, id: NodeId) -> NodeId {
        self.baselink(id, "baselink_access_binfo").access_binfo
    }

    /// `BASELINK_OPTYPE`.
    #[track_caller]
    pub fn baselink_optype(&self, id: NodeId) -> Option<NodeId> {
        self.baselink(id, "baselink_optype").optype
    }

    /// `BASELINK_QUALIFIED_P`.
    #[track_caller]
    pub fn baselink_qualified_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, BaselinkFlags::QUALIFIED)
    }

    #[track_caller]
    pub fn set_baselink_qualified_p(&mut self, id: NodeId, value: bool) {
        self.set_lang_flag(id, BaselinkFlags::QUALIFIED, value);
    }
}

#[cfg(test)]
mod tests;
