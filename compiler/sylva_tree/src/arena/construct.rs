//! Generic node constructors: operand nodes, constants and vectors.
//!
//! Kind-specific constructors (declarations, types, lists, overloads) live
//! with the module that owns their payload.

use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::node::{Node, Payload};
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

const INTEGER_CST: KindSet = KindSet(&[NodeKind::IntegerCst]);
const REAL_CST: KindSet = KindSet(&[NodeKind::RealCst]);
const STRING_CST: KindSet = KindSet(&[NodeKind::StringCst]);
const PTRMEM_CST: KindSet = KindSet(&[NodeKind::PtrmemCst]);
const TREE_VEC: KindSet = KindSet(&[NodeKind::TreeVec]);

impl Tree {
    // === Operand Nodes ===

    /// Build an expression or statement of `kind` with the given operand
    /// slots (`build_nt`). The slot count must satisfy the kind's arity.
    pub fn try_build_nt(
        &mut self,
        kind: NodeKind,
        span: Span,
        operands: &[Option<NodeId>],
    ) -> Result<NodeId, ContractViolation> {
        let arity = kind.arity();
        if !arity.accepts(operands.len()) {
            return Err(ContractViolation::ArityMismatch {
                accessor: "build_nt",
                kind,
                found: operands.len(),
                expected: arity,
            });
        }
        Ok(self.push(Node::new(kind, span, Payload::Operands(operands.into()))))
    }

    #[track_caller]
    pub fn build_nt(&mut self, kind: NodeKind, span: Span, operands: &[Option<NodeId>]) -> NodeId {
        self.try_build_nt(kind, span, operands).or_violation()
    }

    /// [`build_nt`](Self::build_nt) plus a type annotation.
    #[track_caller]
    pub fn build_expr(
        &mut self,
        kind: NodeKind,
        span: Span,
        ty: Option<NodeId>,
        operands: &[Option<NodeId>],
    ) -> NodeId {
        let id = self.build_nt(kind, span, operands);
        self.set_ty(id, ty);
        id
    }

    // === Constants ===

    pub fn build_int_cst(&mut self, ty: NodeId, value: i64) -> NodeId {
        let id = self.push(Node::new(NodeKind::IntegerCst, Span::DUMMY, Payload::IntegerCst(value)));
        self.set_ty(id, Some(ty));
        id
    }

    /// `TREE_INT_CST_LOW`, sign-extended.
    #[track_caller]
    pub fn int_cst_value(&self, id: NodeId) -> i64 {
        *self
            .try_payload(id, INTEGER_CST, "int_cst_value", "integer constant", |p| match p {
                Payload::IntegerCst(value) => Some(value),
                _ => None,
            })
            .or_violation()
    }

    pub fn build_real_cst(&mut self, ty: NodeId, value: f64) -> NodeId {
        let id = self.push(Node::new(
            NodeKind::RealCst,
            Span::DUMMY,
            Payload::RealCst(value.to_bits()),
        ));
        self.set_ty(id, Some(ty));
        id
    }

    #[track_caller]
    pub fn real_cst_value(&self, id: NodeId) -> f64 {
        let bits = self
            .try_payload(id, REAL_CST, "real_cst_value", "real constant", |p| match p {
                Payload::RealCst(bits) => Some(bits),
                _ => None,
            })
            .or_violation();
        f64::from_bits(*bits)
    }

    pub fn build_string(&mut self, span: Span, text: &str) -> NodeId {
        self.push(Node::new(NodeKind::StringCst, span, Payload::StringCst(text.into())))
    }

    /// `TREE_STRING_POINTER`.
    #[track_caller]
    pub fn string_cst_text(&self, id: NodeId) -> &str {
        self.try_payload(id, STRING_CST, "string_cst_text", "string constant", |p| match p {
            Payload::StringCst(text) => Some(&**text),
            _ => None,
        })
        .or_violation()
    }

    /// Pointer-to-member constant naming `member`; `ty` is the
    /// pointer-to-member type.
    pub fn build_ptrmem_cst(&mut self, ty: NodeId, member: NodeId) -> NodeId {
        let id = self.push(Node::new(NodeKind::PtrmemCst, Span::DUMMY, Payload::PtrmemCst(member)));
        self.set_ty(id, Some(ty));
        trace!(%id, %member, "pointer-to-member constant");
        id
    }

    /// `PTRMEM_CST_MEMBER`.
    #[track_caller]
    pub fn ptrmem_cst_member(&self, id: NodeId) -> NodeId {
        *self
            .try_payload(id, PTRMEM_CST, "ptrmem_cst_member", "pointer-to-member constant", |p| {
                match p {
                    Payload::PtrmemCst(member) => Some(member),
                    _ => None,
                }
            })
            .or_violation()
    }

    // === Vectors ===

    /// Vector of `len` empty slots (`make_tree_vec`).
    pub fn make_tree_vec(&mut self, len: usize) -> NodeId {
        self.build_tree_vec(&vec![None; len])
    }

    pub fn build_tree_vec(&mut self, elements: &[Option<NodeId>]) -> NodeId {
        self.push(Node::new(NodeKind::TreeVec, Span::DUMMY, Payload::Vec(elements.into())))
    }

    pub(crate) fn try_tree_vec(
        &self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&[Option<NodeId>], ContractViolation> {
        self.try_payload(id, TREE_VEC, accessor, "vector", |p| match p {
            Payload::Vec(elements) => Some(&**elements),
            _ => None,
        })
    }

    /// Elements of a vector (`TREE_VEC_ELT` over `0..TREE_VEC_LENGTH`).
    #[track_caller]
    pub fn tree_vec(&self, id: NodeId) -> &[Option<NodeId>] {
        self.try_tree_vec(id, "tree_vec").or_violation()
    }

    #[track_caller]
    pub fn tree_vec_length(&self, id: NodeId) -> usize {
        self.try_tree_vec(id, "tree_vec_length").or_violation().len()
    }

    #[track_caller]
    pub fn tree_vec_elt(&self, id: NodeId, index: usize) -> Option<NodeId> {
        let elements = self.try_tree_vec(id, "tree_vec_elt").or_violation();
        match elements.get(index) {
            Some(&element) => element,
            None => crate::check::violation(ContractViolation::OperandOutOfRange {
                accessor: "tree_vec_elt",
                node: id,
                kind: NodeKind::TreeVec,
                index,
                len: elements.len(),
            }),
        }
    }

    #[track_caller]
    pub fn set_tree_vec_elt(&mut self, id: NodeId, index: usize, value: Option<NodeId>) {
        let elements = self
            .try_payload_mut(id, TREE_VEC, "set_tree_vec_elt", "vector", |p| match p {
                Payload::Vec(elements) => Some(&mut **elements),
                _ => None,
            })
            .or_violation();
        let len = elements.len();
        match elements.get_mut(index) {
            Some(slot) => *slot = value,
            None => crate::check::violation(ContractViolation::OperandOutOfRange {
                accessor: "set_tree_vec_elt",
                node: id,
                kind: NodeKind::TreeVec,
                index,
                len,
            }),
        }
    }
}
