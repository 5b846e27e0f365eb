//! Unchecked accessors for hot paths.
//!
//! Each function here reads the same field as its checked counterpart but
//! only verifies the node's shape under `debug_assertions`. In release
//! builds a shape mismatch is undefined behavior, so callers must already
//! know the kind, for example because they just matched on it.
#![allow(unsafe_code, reason = "unchecked field access for callers that have verified the node kind")]

use std::hint::unreachable_unchecked;

use crate::node::Payload;
use crate::types::TypeShape;
use crate::{NodeId, NodeKind, Tree};

impl Tree {
    /// # Safety
    ///
    /// `id` must name a node of this tree.
    unsafe fn payload_unchecked(&self, id: NodeId) -> &Payload {
        debug_assert!(id.index() < self.len(), "node {id} is not in this tree");
        // SAFETY: the caller guarantees `id` is in bounds.
        unsafe { &self.nodes().get_unchecked(id.index()).payload }
    }

    /// Unchecked [`operand`](Self::operand).
    ///
    /// # Safety
    ///
    /// `id` must be a node with operand slots and `index` below its
    /// operand count.
    pub unsafe fn operand_unchecked(&self, id: NodeId, index: usize) -> Option<NodeId> {
        debug_assert!(self.try_operand(id, index, "operand_unchecked").is_ok());
        // SAFETY: the caller guarantees an operand node and an in-range index.
        unsafe {
            match self.payload_unchecked(id) {
                Payload::Operands(ops) => *ops.get_unchecked(index),
                _ => unreachable_unchecked(),
            }
        }
    }

    /// Unchecked [`tree_vec_elt`](Self::tree_vec_elt).
    ///
    /// # Safety
    ///
    /// `id` must be a `TreeVec` and `index` below its length.
    pub unsafe fn tree_vec_elt_unchecked(&self, id: NodeId, index: usize) -> Option<NodeId> {
        debug_assert!(self
            .try_tree_vec(id, "tree_vec_elt_unchecked")
            .is_ok_and(|elts| index < elts.len()));
        // SAFETY: the caller guarantees a vector node and an in-range index.
        unsafe {
            match self.payload_unchecked(id) {
                Payload::Vec(elts) => *elts.get_unchecked(index),
                _ => unreachable_unchecked(),
            }
        }
    }

    /// Unchecked [`tree_value`](Self::tree_value).
    ///
    /// # Safety
    ///
    /// `id` must be a `TreeList`.
    pub unsafe fn tree_value_unchecked(&self, id: NodeId) -> Option<NodeId> {
        debug_assert_eq!(self.kind(id), NodeKind::TreeList);
        // SAFETY: the caller guarantees a list node.
        unsafe {
            match self.payload_unchecked(id) {
                Payload::List(data) => data.value,
                _ => unreachable_unchecked(),
            }
        }
    }

    /// Unchecked [`tree_purpose`](Self::tree_purpose).
    ///
    /// # Safety
    ///
    /// `id` must be a `TreeList`.
    pub unsafe fn tree_purpose_unchecked(&self, id: NodeId) -> Option<NodeId> {
        debug_assert_eq!(self.kind(id), NodeKind::TreeList);
        // SAFETY: the caller guarantees a list node.
        unsafe {
            match self.payload_unchecked(id) {
                Payload::List(data) => data.purpose,
                _ => unreachable_unchecked(),
            }
        }
    }

    /// Unchecked [`ovl_function`](Self::ovl_function).
    ///
    /// # Safety
    ///
    /// `id` must be an `Overload`.
    pub unsafe fn ovl_function_unchecked(&self, id: NodeId) -> NodeId {
        debug_assert!(self.try_ovl_function(id, "ovl_function_unchecked").is_ok());
        // SAFETY: the caller guarantees an overload node.
        unsafe {
            match self.payload_unchecked(id) {
                Payload::Overload(function) => *function,
                _ => unreachable_unchecked(),
            }
        }
    }

    /// Unchecked [`decl_name`](Self::decl_name).
    ///
    /// # Safety
    ///
    /// `id` must be a declaration.
    pub unsafe fn decl_name_unchecked(&self, id: NodeId) -> Option<NodeId> {
        debug_assert!(self.kind(id).is_decl(), "node {id} is not a declaration");
        // SAFETY: the caller guarantees a declaration node.
        unsafe {
            match self.payload_unchecked(id) {
                Payload::Decl(data) => data.name,
                _ => unreachable_unchecked(),
            }
        }
    }

    /// Unchecked [`decl_context`](Self::decl_context).
    ///
    /// # Safety
    ///
    /// `id` must be a declaration.
    pub unsafe fn decl_context_unchecked(&self, id: NodeId) -> Option<NodeId> {
        debug_assert!(self.kind(id).is_decl(), "node {id} is not a declaration");
        // SAFETY: the caller guarantees a declaration node.
        unsafe {
            match self.payload_unchecked(id) {
                Payload::Decl(data) => data.context,
                _ => unreachable_unchecked(),
            }
        }
    }

    /// Unchecked [`type_shape`](Self::type_shape). Reads through the main
    /// variant like the checked accessor.
    ///
    /// # Safety
    ///
    /// `id` must be a type.
    pub unsafe fn type_shape_unchecked(&self, id: NodeId) -> &TypeShape {
        debug_assert!(self.kind(id).is_type(), "node {id} is not a type");
        // SAFETY: the caller guarantees a type node, and a type's main
        // variant is always a type node of the same tree.
        unsafe {
            let main = match self.payload_unchecked(id) {
                Payload::Type(data) => data.main_variant,
                _ => unreachable_unchecked(),
            };
            match self.payload_unchecked(main) {
                Payload::Type(data) => &data.shape,
                _ => unreachable_unchecked(),
            }
        }
    }
}
