//! The node arena.
//!
//! Every node of a compilation session lives in one [`Tree`] and is
//! addressed by a [`NodeId`]. Nodes are never removed; client passes mutate
//! them monotonically through `&mut Tree`, which is the whole concurrency
//! story: one writer, no sharing.
//!
//! The first [`NodeId::PREDEFINED_COUNT`] slots are filled at construction
//! with the error mark, the builtin types and the well-known identifiers, so
//! the `NodeId` constants are valid in every tree.

mod construct;

use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::flags::{property_table, Bank, BankStorage, LangFlagSet, TreeLangFlags};
use crate::identifier::IdentifierTable;
use crate::node::{Node, Payload};
use crate::types::TypeTable;
use crate::{KindSet, NodeId, NodeKind, Span};

/// Arena of tree nodes.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    pub(crate) identifiers: IdentifierTable,
    pub(crate) types: TypeTable,
    /// Location the front end is currently processing (`input_location`).
    input_location: Span,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding the predefined nodes.
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: Vec::with_capacity(1024),
            identifiers: IdentifierTable::default(),
            types: TypeTable::default(),
            input_location: Span::DUMMY,
        };
        tree.push(Node::new(NodeKind::ErrorMark, Span::DUMMY, Payload::Empty));
        tree.init_builtin_types();
        tree.init_identifiers();
        tree
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the predefined nodes exist from construction on.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        trace!(%id, kind = %node.kind, "new node");
        self.nodes.push(node);
        id
    }

    // === Envelope ===

    /// Node behind `id`, or an unknown-node violation.
    pub fn try_node(&self, id: NodeId, accessor: &'static str) -> Result<&Node, ContractViolation> {
        self.nodes
            .get(id.index())
            .ok_or(ContractViolation::UnknownNode { accessor, node: id })
    }

    #[track_caller]
    pub fn node(&self, id: NodeId) -> &Node {
        self.try_node(id, "node").or_violation()
    }

    pub(crate) fn try_node_mut(
        &mut self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&mut Node, ContractViolation> {
        self.nodes
            .get_mut(id.index())
            .ok_or(ContractViolation::UnknownNode { accessor, node: id })
    }

    /// `TREE_CODE`.
    #[inline]
    #[track_caller]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    #[track_caller]
    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// `input_location`: fallback for nodes without a location of their own.
    #[inline]
    pub fn input_location(&self) -> Span {
        self.input_location
    }

    pub fn set_input_location(&mut self, span: Span) {
        self.input_location = span;
    }

    /// `TREE_TYPE`.
    #[track_caller]
    pub fn ty(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ty
    }

    #[track_caller]
    pub fn set_ty(&mut self, id: NodeId, ty: Option<NodeId>) {
        self.try_node_mut(id, "set_ty").or_violation().ty = ty;
    }

    /// `TREE_CHAIN`.
    #[track_caller]
    pub fn chain(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).chain
    }

    #[track_caller]
    pub fn set_chain(&mut self, id: NodeId, next: Option<NodeId>) {
        self.try_node_mut(id, "set_chain").or_violation().chain = next;
    }

    /// Iterate `start` and its successors along the chain.
    pub fn chain_iter(&self, start: Option<NodeId>) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(start, move |&id| self.nodes.get(id.index()).and_then(|n| n.chain))
    }

    // === Checks ===

    /// Check that `id` is one of `kinds` (`TREE_CHECK` and friends).
    pub fn check_kind(
        &self,
        id: NodeId,
        kinds: KindSet,
        accessor: &'static str,
    ) -> Result<&Node, ContractViolation> {
        let node = self.try_node(id, accessor)?;
        if kinds.contains(node.kind) {
            Ok(node)
        } else {
            Err(ContractViolation::KindMismatch {
                accessor,
                node: id,
                found: node.kind,
                expected: kinds,
            })
        }
    }

    /// Kind-checked projection of a node's payload.
    pub(crate) fn try_payload<'a, T: ?Sized>(
        &'a self,
        id: NodeId,
        kinds: KindSet,
        accessor: &'static str,
        expected: &'static str,
        project: impl FnOnce(&'a Payload) -> Option<&'a T>,
    ) -> Result<&'a T, ContractViolation> {
        let node = self.check_kind(id, kinds, accessor)?;
        project(&node.payload).ok_or(ContractViolation::VariantMismatch {
            accessor,
            node: id,
            kind: node.kind,
            found: node.payload.name(),
            expected,
        })
    }

    pub(crate) fn try_payload_mut<'a, T: ?Sized>(
        &'a mut self,
        id: NodeId,
        kinds: KindSet,
        accessor: &'static str,
        expected: &'static str,
        project: impl FnOnce(&'a mut Payload) -> Option<&'a mut T>,
    ) -> Result<&'a mut T, ContractViolation> {
        let node = self.check_kind(id, kinds, accessor)?;
        let (kind, found) = (node.kind, node.payload.name());
        let node = self.try_node_mut(id, accessor)?;
        project(&mut node.payload).ok_or(ContractViolation::VariantMismatch {
            accessor,
            node: id,
            kind,
            found,
            expected,
        })
    }

    // === Flag banks ===

    /// Node whose bank of `bank` holds the flags of `id`. Type-bank flags
    /// are shared by all variants of a type and live on the main variant.
    fn bank_holder(&self, id: NodeId, bank: Bank) -> NodeId {
        match self.nodes.get(id.index()).map(|node| &node.payload) {
            Some(Payload::Type(data)) if bank == Bank::Type => data.main_variant,
            _ => id,
        }
    }

    /// Flags of family `F` on `id`, or a flag-family violation if the
    /// node's kind stores another family (or nothing) in that bank.
    pub fn try_lang_flags<F: LangFlagSet>(
        &self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<F, ContractViolation> {
        let kind = self.try_node(id, accessor)?.kind;
        let node = self.try_node(self.bank_holder(id, <F::Storage as BankStorage>::BANK), accessor)?;
        <F::Storage as BankStorage>::locate(node)
            .and_then(F::project)
            .ok_or_else(|| family_mismatch::<F>(id, kind, accessor))
    }

    #[track_caller]
    pub fn lang_flags<F: LangFlagSet>(&self, id: NodeId) -> F {
        self.try_lang_flags(id, F::FAMILY).or_violation()
    }

    #[track_caller]
    pub(crate) fn lang_flags_mut<F: LangFlagSet>(
        &mut self,
        id: NodeId,
        accessor: &'static str,
    ) -> &mut F {
        let holder = self.bank_holder(id, <F::Storage as BankStorage>::BANK);
        let result = self.try_node_mut(holder, accessor).and_then(|node| {
            let kind = node.kind;
            <F::Storage as BankStorage>::locate_mut(node)
                .and_then(F::project_mut)
                .ok_or_else(|| family_mismatch::<F>(id, kind, accessor))
        });
        result.or_violation()
    }

    /// Test one flag (`TREE_LANG_FLAG_n` and friends, named per kind).
    #[track_caller]
    pub fn lang_flag<F: LangFlagSet>(&self, id: NodeId, flag: F) -> bool {
        self.lang_flags::<F>(id).contains(flag)
    }

    #[track_caller]
    pub fn set_lang_flag<F: LangFlagSet>(&mut self, id: NodeId, flag: F, value: bool) {
        self.lang_flags_mut::<F>(id, F::FAMILY).set(flag, value);
    }

    /// Names of every flag set on `id`, across all three banks.
    #[track_caller]
    pub fn set_flag_names(&self, id: NodeId) -> Vec<&'static str> {
        let node = self.node(id);
        let holder = self.node(self.bank_holder(id, Bank::Type));
        let banks = [
            (node.flags.family(), node.flags.bits()),
            crate::flags::TypeLangFlags::locate(holder).map_or((None, 0), |b| (b.family(), b.bits())),
            crate::flags::DeclLangFlags::locate(node).map_or((None, 0), |b| (b.family(), b.bits())),
        ];
        let mut names = Vec::new();
        for (family, bits) in banks {
            let Some(family) = family else { continue };
            names.extend(
                property_table()
                    .into_iter()
                    .filter(|slot| slot.family == family && bits & (1 << slot.index) != 0)
                    .map(|slot| slot.name),
            );
        }
        names
    }

    /// The tree bank of `id`.
    #[track_caller]
    pub fn tree_flags(&self, id: NodeId) -> TreeLangFlags {
        self.node(id).flags
    }

    // === Operands ===

    pub(crate) fn try_operands(
        &self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&[Option<NodeId>], ContractViolation> {
        let node = self.try_node(id, accessor)?;
        match &node.payload {
            Payload::Operands(ops) => Ok(ops),
            other => Err(ContractViolation::VariantMismatch {
                accessor,
                node: id,
                kind: node.kind,
                found: other.name(),
                expected: "operands",
            }),
        }
    }

    /// `TREE_OPERAND (id, index)`.
    pub fn try_operand(
        &self,
        id: NodeId,
        index: usize,
        accessor: &'static str,
    ) -> Result<Option<NodeId>, ContractViolation> {
        let ops = self.try_operands(id, accessor)?;
        ops.get(index)
            .copied()
            .ok_or_else(|| ContractViolation::OperandOutOfRange {
                accessor,
                node: id,
                kind: self.nodes[id.index()].kind,
                index,
                len: ops.len(),
            })
    }

    #[track_caller]
    pub fn operand(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.try_operand(id, index, "tree_operand").or_violation()
    }

    #[track_caller]
    pub fn set_operand(&mut self, id: NodeId, index: usize, value: Option<NodeId>) {
        self.set_operand_checked(id, index, value, "set_tree_operand");
    }

    #[track_caller]
    pub(crate) fn set_operand_checked(
        &mut self,
        id: NodeId,
        index: usize,
        value: Option<NodeId>,
        accessor: &'static str,
    ) {
        self.try_operand(id, index, accessor).or_violation();
        if let Some(Node {
            payload: Payload::Operands(ops),
            ..
        }) = self.nodes.get_mut(id.index())
        {
            ops[index] = value;
        }
    }

    /// `TREE_OPERAND_LENGTH`.
    #[track_caller]
    pub fn operand_count(&self, id: NodeId) -> usize {
        self.try_operands(id, "tree_operand_length").or_violation().len()
    }

    /// Operand slice of an expression or statement node.
    #[track_caller]
    pub fn operands(&self, id: NodeId) -> &[Option<NodeId>] {
        self.try_operands(id, "tree_operands").or_violation()
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

fn family_mismatch<F: LangFlagSet>(
    id: NodeId,
    kind: NodeKind,
    accessor: &'static str,
) -> ContractViolation {
    ContractViolation::FlagFamilyMismatch {
        accessor,
        node: id,
        kind,
        bank: <F::Storage as BankStorage>::BANK,
        family: F::FAMILY,
    }
}

#[cfg(test)]
mod tests;
