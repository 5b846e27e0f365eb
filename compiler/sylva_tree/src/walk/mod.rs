//! Pre-order subtree walks.
//!
//! The walk follows the links a client would consider "inside" a node:
//! operand slots, the function and rest of an overload set, the pieces of
//! a baselink or using-declaration, template info, list and vector
//! elements, and the components of compound types. It does not follow
//! `TREE_TYPE` of expressions, declaration contexts or binfo hierarchies.
//!
//! Every node is visited at most once per walk, so shared subtrees and
//! cycles through types are harmless.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::decl::DeclExtra;
use crate::node::Payload;
use crate::stack::ensure_sufficient_stack;
use crate::types::TypeShape;
use crate::{NodeId, Tree};

/// What the visitor wants after seeing a node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum WalkControl {
    /// Go on into the node's children.
    #[default]
    Continue,
    /// Do not descend into this node; continue with its siblings.
    SkipChildren,
    /// End the walk; [`Tree::walk_tree`] returns this node.
    Stop,
}

/// Children of one node, in visiting order.
pub type Subtrees = SmallVec<[NodeId; 4]>;

impl Tree {
    /// Visit `root` and everything reachable from it, parents before
    /// children (`cp_walk_tree_without_duplicates`).
    ///
    /// Returns the node at which the visitor answered
    /// [`WalkControl::Stop`], or `None` if the walk ran to completion.
    pub fn walk_tree(&self, root: NodeId, mut visit: impl FnMut(&Tree, NodeId) -> WalkControl) -> Option<NodeId> {
        let mut seen = FxHashSet::default();
        let found = self.walk_inner(root, &mut visit, &mut seen);
        trace!(%root, visited = seen.len(), ?found, "walked tree");
        found
    }

    fn walk_inner(
        &self,
        id: NodeId,
        visit: &mut dyn FnMut(&Tree, NodeId) -> WalkControl,
        seen: &mut FxHashSet<NodeId>,
    ) -> Option<NodeId> {
        if !seen.insert(id) {
            return None;
        }
        match visit(self, id) {
            WalkControl::Stop => Some(id),
            WalkControl::SkipChildren => None,
            WalkControl::Continue => ensure_sufficient_stack(|| {
                self.subtrees(id)
                    .into_iter()
                    .find_map(|child| self.walk_inner(child, visit, seen))
            }),
        }
    }

    /// Whether `needle` is reachable from `root`.
    pub fn tree_contains(&self, root: NodeId, needle: NodeId) -> bool {
        self.walk_tree(root, |_, id| {
            if id == needle {
                WalkControl::Stop
            } else {
                WalkControl::Continue
            }
        })
        .is_some()
    }

    /// Direct children of `id` that a walk descends into.
    #[track_caller]
    pub fn subtrees(&self, id: NodeId) -> Subtrees {
        let node = self.node(id);
        let mut out = Subtrees::new();
        match &node.payload {
            Payload::Operands(ops) | Payload::Vec(ops) => out.extend(ops.iter().flatten().copied()),
            Payload::Overload(function) => {
                out.push(*function);
                out.extend(node.chain);
            }
            Payload::Baselink(data) => {
                if self.baselink_qualified_p(id) {
                    out.push(self.binfo_type(data.access_binfo));
                }
                out.push(data.functions);
            }
            Payload::List(data) => {
                out.extend(data.purpose);
                out.extend(data.value);
                out.extend(node.chain);
            }
            Payload::Block(data) => {
                out.extend(data.vars);
                out.extend(data.subblocks);
            }
            Payload::Decl(data) => {
                if let DeclExtra::Using { scope, decls } = data.extra {
                    out.extend(data.name);
                    out.extend(scope);
                    out.extend(decls);
                }
            }
            Payload::TemplateInfo(data) => {
                out.push(data.tmpl);
                out.extend(data.args);
            }
            Payload::Type(data) => self.type_subtrees(node.ty, &data.shape, &mut out),
            Payload::PtrmemCst(_) => out.extend(node.ty),
            Payload::Lambda(data) => {
                out.extend(data.captures);
                out.extend(data.this_capture);
            }
            Payload::Trait(data) => {
                out.push(data.type1);
                out.extend(data.type2);
            }
            Payload::StaticAssert(data) => {
                out.push(data.condition);
                out.extend(data.message);
            }
            Payload::Empty
            | Payload::Identifier(_)
            | Payload::IntegerCst(_)
            | Payload::RealCst(_)
            | Payload::StringCst(_)
            | Payload::TemplateParmIndex(_)
            | Payload::Binfo(_) => {}
        }
        out
    }

    /// Components of a type; `component` is its `TREE_TYPE`.
    fn type_subtrees(&self, component: Option<NodeId>, shape: &TypeShape, out: &mut Subtrees) {
        match shape {
            TypeShape::Pointer | TypeShape::Reference { .. } | TypeShape::Array { .. } => out.extend(component),
            TypeShape::Offset { basetype } => {
                out.push(*basetype);
                out.extend(component);
            }
            TypeShape::Function { parms } => {
                out.extend(component);
                out.extend(parms.iter().copied());
            }
            TypeShape::Method { basetype, parms } => {
                out.push(*basetype);
                out.extend(component);
                out.extend(parms.iter().copied());
            }
            TypeShape::BoundTemplateTemplateParm { info, .. } => out.push(*info),
            TypeShape::Typename { context, name } => {
                out.push(*context);
                out.push(*name);
            }
            TypeShape::Decltype { expr, .. } => out.push(*expr),
            TypeShape::PackExpansion { pattern } => out.push(*pattern),
            TypeShape::Variant
            | TypeShape::Leaf
            | TypeShape::Integer { .. }
            | TypeShape::Real { .. }
            | TypeShape::Class(_)
            | TypeShape::Enum { .. }
            | TypeShape::TemplateParm { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests;
