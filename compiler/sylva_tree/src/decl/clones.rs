//! Constructor and destructor clones.
//!
//! A "maybe in charge" constructor or destructor is the master of up to
//! three clones: complete object, base object and (destructors only)
//! deleting. The master owns the indexed [`CloneSet`]; the clones are also
//! threaded into the declaration chain directly after the master, so
//! walking the chain and indexing the set see the same clones.

use tracing::debug;

use super::function::FnFlags;
use crate::check::{ContractViolation, OrViolation};
use crate::{NodeId, NodeKind, Tree};

/// Which clone of a constructor or destructor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CloneVariant {
    /// Builds or destroys a complete object, virtual bases included.
    Complete,
    /// Builds or destroys a base subobject.
    Base,
    /// Destroys and then deallocates.
    Deleting,
}

impl CloneVariant {
    /// Name of the clone of a constructor (`ctor`) or destructor.
    fn identifier(self, ctor: bool) -> Option<NodeId> {
        match (self, ctor) {
            (CloneVariant::Complete, true) => Some(NodeId::COMPLETE_CTOR_IDENTIFIER),
            (CloneVariant::Base, true) => Some(NodeId::BASE_CTOR_IDENTIFIER),
            (CloneVariant::Deleting, true) => None,
            (CloneVariant::Complete, false) => Some(NodeId::COMPLETE_DTOR_IDENTIFIER),
            (CloneVariant::Base, false) => Some(NodeId::BASE_DTOR_IDENTIFIER),
            (CloneVariant::Deleting, false) => Some(NodeId::DELETING_DTOR_IDENTIFIER),
        }
    }
}

/// Clones of a master constructor or destructor, by variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CloneSet {
    pub(crate) complete: Option<NodeId>,
    pub(crate) base: Option<NodeId>,
    pub(crate) deleting: Option<NodeId>,
}

impl CloneSet {
    pub fn get(&self, variant: CloneVariant) -> Option<NodeId> {
        match variant {
            CloneVariant::Complete => self.complete,
            CloneVariant::Base => self.base,
            CloneVariant::Deleting => self.deleting,
        }
    }

    fn slot(&mut self, variant: CloneVariant) -> &mut Option<NodeId> {
        match variant {
            CloneVariant::Complete => &mut self.complete,
            CloneVariant::Base => &mut self.base,
            CloneVariant::Deleting => &mut self.deleting,
        }
    }

    pub fn len(&self) -> usize {
        [self.complete, self.base, self.deleting].iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over the clones following a master on the declaration chain
/// (`FOR_EACH_CLONE`).
pub struct Clones<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Clones<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        if self.tree.kind(current) != NodeKind::FunctionDecl || !self.tree.decl_cloned_function_p(current) {
            self.next = None;
            return None;
        }
        self.next = self.tree.chain(current);
        Some(current)
    }
}

impl Tree {
    fn has_name(&self, id: NodeId, name: NodeId) -> bool {
        self.kind(id) == NodeKind::FunctionDecl && self.decl_name(id) == Some(name)
    }

    /// `DECL_MAYBE_IN_CHARGE_CONSTRUCTOR_P`.
    #[track_caller]
    pub fn decl_maybe_in_charge_constructor_p(&self, id: NodeId) -> bool {
        self.has_name(id, NodeId::CTOR_IDENTIFIER)
    }

    /// `DECL_COMPLETE_CONSTRUCTOR_P`.
    #[track_caller]
    pub fn decl_complete_constructor_p(&self, id: NodeId) -> bool {
        self.has_name(id, NodeId::COMPLETE_CTOR_IDENTIFIER)
    }

    /// `DECL_BASE_CONSTRUCTOR_P`.
    #[track_caller]
    pub fn decl_base_constructor_p(&self, id: NodeId) -> bool {
        self.has_name(id, NodeId::BASE_CTOR_IDENTIFIER)
    }

    /// `DECL_MAYBE_IN_CHARGE_DESTRUCTOR_P`.
    #[track_caller]
    pub fn decl_maybe_in_charge_destructor_p(&self, id: NodeId) -> bool {
        self.has_name(id, NodeId::DTOR_IDENTIFIER)
    }

    /// `DECL_COMPLETE_DESTRUCTOR_P`.
    #[track_caller]
    pub fn decl_complete_destructor_p(&self, id: NodeId) -> bool {
        self.has_name(id, NodeId::COMPLETE_DTOR_IDENTIFIER)
    }

    /// `DECL_BASE_DESTRUCTOR_P`.
    #[track_caller]
    pub fn decl_base_destructor_p(&self, id: NodeId) -> bool {
        self.has_name(id, NodeId::BASE_DTOR_IDENTIFIER)
    }

    /// `DECL_DELETING_DESTRUCTOR_P`.
    #[track_caller]
    pub fn decl_deleting_destructor_p(&self, id: NodeId) -> bool {
        self.has_name(id, NodeId::DELETING_DTOR_IDENTIFIER)
    }

    /// `DECL_MAYBE_IN_CHARGE_CDTOR_P`.
    #[track_caller]
    pub fn decl_maybe_in_charge_cdtor_p(&self, id: NodeId) -> bool {
        self.decl_maybe_in_charge_constructor_p(id) || self.decl_maybe_in_charge_destructor_p(id)
    }

    /// `DECL_CLONED_FUNCTION_P`: named like a constructor or destructor
    /// clone.
    #[track_caller]
    pub fn decl_cloned_function_p(&self, id: NodeId) -> bool {
        self.decl_name(id).is_some_and(|name| {
            self.kind(name) == NodeKind::Identifier && self.identifier_kind(name).is_cdtor()
        }) && !self.decl_maybe_in_charge_cdtor_p(id)
    }

    /// `DECL_CLONED_FUNCTION`: the master of a clone. Thunks have no such
    /// slot.
    #[track_caller]
    pub fn decl_cloned_function(&self, id: NodeId) -> Option<NodeId> {
        self.try_ordinary(id, "decl_cloned_function").or_violation().cloned_from
    }

    /// The clone set of a master.
    #[track_caller]
    pub fn decl_clone_set(&self, master: NodeId) -> CloneSet {
        self.try_ordinary(master, "decl_clone_set").or_violation().clones
    }

    /// The clone of `master` for `variant`, if it has been built.
    #[track_caller]
    pub fn clone_of_variant(&self, master: NodeId, variant: CloneVariant) -> Option<NodeId> {
        self.decl_clone_set(master).get(variant)
    }

    /// Clones of `master` in chain order. Empty unless `master` is a
    /// maybe-in-charge constructor or destructor.
    pub fn clones(&self, master: NodeId) -> Clones<'_> {
        let next = if self.decl_maybe_in_charge_cdtor_p(master) {
            self.chain(master)
        } else {
            None
        };
        Clones { tree: self, next }
    }

    /// Run `f` on every clone of `master`.
    pub fn for_each_clone(&self, master: NodeId, mut f: impl FnMut(NodeId)) {
        for clone in self.clones(master) {
            f(clone);
        }
    }

    /// Build the `variant` clone of a maybe-in-charge constructor or
    /// destructor, or return the existing one.
    ///
    /// The clone is threaded into the chain after the master's last clone
    /// and copies the master's type, context and function flags, minus the
    /// in-charge parameter.
    #[track_caller]
    pub fn build_clone(&mut self, master: NodeId, variant: CloneVariant) -> NodeId {
        let ctor = self.decl_maybe_in_charge_constructor_p(master);
        if !ctor && !self.decl_maybe_in_charge_destructor_p(master) {
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "build_clone",
                node: master,
                kind: self.kind(master),
                found: "function",
                expected: "maybe-in-charge constructor or destructor",
            });
        }
        let Some(name) = variant.identifier(ctor) else {
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "build_clone",
                node: master,
                kind: NodeKind::FunctionDecl,
                found: "constructor",
                expected: "destructor",
            })
        };
        if let Some(existing) = self.clone_of_variant(master, variant) {
            return existing;
        }

        let span = self.span(master);
        let ty = self.ty(master);
        let clone = self.build_lang_decl(NodeKind::FunctionDecl, span, Some(name), ty);
        let context = self.decl_context(master);
        self.set_decl_context(clone, context);
        let core = self.decl_core_flags(master);
        self.try_decl_mut(clone, "build_clone").or_violation().core = core;

        let flags = self.fn_data(master, "build_clone").flags - FnFlags::HAS_IN_CHARGE_PARM;
        self.fn_data_mut(clone, "build_clone").flags = flags;
        self.ordinary_mut(clone, "build_clone").cloned_from = Some(master);
        *self.ordinary_mut(master, "build_clone").clones.slot(variant) = Some(clone);

        let last = self.clones(master).filter(|&c| c != clone).last().unwrap_or(master);
        let after = self.chain(last);
        self.set_chain(clone, after);
        self.set_chain(last, Some(clone));
        debug!(%master, %clone, ?variant, "built clone");
        clone
    }
}
