//! Tree lists and lexical blocks.

use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::flags::{BlockFlags, TreeListFlags};
use crate::node::{Node, Payload};
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

const TREE_LIST: KindSet = KindSet(&[NodeKind::TreeList]);
const BLOCK: KindSet = KindSet(&[NodeKind::Block]);

/// What a tree list is used for. Fixes the meaning of the list's single
/// flag slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ListRole {
    /// General purpose/value pair; the flag slot is unused.
    #[default]
    Plain,
    /// Attribute; flag is `ATTR_IS_DEPENDENT`.
    Attribute,
    /// Argument of `abi_tag`; flag is `ABI_TAG_IMPLICIT`.
    AbiTag,
    /// Entry of a lambda capture list; flag is `LAMBDA_CAPTURE_EXPLICIT_P`.
    LambdaCapture,
    /// Parameter declaration list; flag is `PARENTHESIZED_LIST_P`.
    ParameterList,
}

impl ListRole {
    pub const fn name(self) -> &'static str {
        match self {
            ListRole::Plain => "plain list",
            ListRole::Attribute => "attribute list",
            ListRole::AbiTag => "abi tag list",
            ListRole::LambdaCapture => "lambda capture list",
            ListRole::ParameterList => "parameter list",
        }
    }
}

/// Payload of a `TreeList` node.
#[derive(Clone, Debug)]
pub struct ListData {
    /// `TREE_PURPOSE`.
    pub(crate) purpose: Option<NodeId>,
    /// `TREE_VALUE`.
    pub(crate) value: Option<NodeId>,
    pub(crate) role: ListRole,
}

/// Payload of a `Block` node.
#[derive(Clone, Debug, Default)]
pub struct BlockData {
    /// First variable; the rest follow along the chain (`BLOCK_VARS`).
    pub(crate) vars: Option<NodeId>,
    /// First sub-block, chained (`BLOCK_SUBBLOCKS`).
    pub(crate) subblocks: Option<NodeId>,
    /// `BLOCK_SUPERCONTEXT`.
    pub(crate) supercontext: Option<NodeId>,
}

impl Tree {
    // === Lists ===

    /// `build_tree_list`.
    pub fn build_tree_list(&mut self, purpose: Option<NodeId>, value: Option<NodeId>) -> NodeId {
        self.build_list_with_role(ListRole::Plain, purpose, value)
    }

    pub fn build_list_with_role(
        &mut self,
        role: ListRole,
        purpose: Option<NodeId>,
        value: Option<NodeId>,
    ) -> NodeId {
        let data = ListData { purpose, value, role };
        self.push(Node::new(NodeKind::TreeList, Span::DUMMY, Payload::List(Box::new(data))))
    }

    /// `tree_cons`: a plain list node in front of `chain`.
    pub fn tree_cons(&mut self, purpose: Option<NodeId>, value: Option<NodeId>, chain: Option<NodeId>) -> NodeId {
        let id = self.build_tree_list(purpose, value);
        self.set_chain(id, chain);
        id
    }

    fn try_list(&self, id: NodeId, accessor: &'static str) -> Result<&ListData, ContractViolation> {
        self.try_payload(id, TREE_LIST, accessor, "list", |payload| match payload {
            Payload::List(data) => Some(&**data),
            _ => None,
        })
    }

    #[track_caller]
    fn list_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut ListData {
        self.try_payload_mut(id, TREE_LIST, accessor, "list", |payload| match payload {
            Payload::List(data) => Some(&mut **data),
            _ => None,
        })
        .or_violation()
    }

    /// `TREE_PURPOSE`.
    #[track_caller]
    pub fn tree_purpose(&self, id: NodeId) -> Option<NodeId> {
        self.try_list(id, "tree_purpose").or_violation().purpose
    }

    #[track_caller]
    pub fn set_tree_purpose(&mut self, id: NodeId, purpose: Option<NodeId>) {
        self.list_mut(id, "set_tree_purpose").purpose = purpose;
    }

    /// `TREE_VALUE`.
    #[track_caller]
    pub fn tree_value(&self, id: NodeId) -> Option<NodeId> {
        self.try_list(id, "tree_value").or_violation().value
    }

    #[track_caller]
    pub fn set_tree_value(&mut self, id: NodeId, value: Option<NodeId>) {
        self.list_mut(id, "set_tree_value").value = value;
    }

    #[track_caller]
    pub fn list_role(&self, id: NodeId) -> ListRole {
        self.try_list(id, "list_role").or_violation().role
    }

    /// `list_length`: number of nodes along the chain from `list`.
    pub fn list_length(&self, list: Option<NodeId>) -> usize {
        self.chain_iter(list).count()
    }

    /// Read the role flag, which only exists for `role`.
    #[track_caller]
    fn role_flag(&self, id: NodeId, role: ListRole, accessor: &'static str) -> bool {
        self.check_role(id, role, accessor);
        self.lang_flag(id, TreeListFlags::ROLE_MARK)
    }

    #[track_caller]
    fn set_role_flag(&mut self, id: NodeId, role: ListRole, accessor: &'static str, value: bool) {
        self.check_role(id, role, accessor);
        self.set_lang_flag(id, TreeListFlags::ROLE_MARK, value);
    }

    #[track_caller]
    fn check_role(&self, id: NodeId, role: ListRole, accessor: &'static str) {
        let found = self.try_list(id, accessor).or_violation().role;
        if found != role {
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor,
                node: id,
                kind: NodeKind::TreeList,
                found: found.name(),
                expected: role.name(),
            });
        }
    }

    /// `ATTR_IS_DEPENDENT`.
    #[track_caller]
    pub fn attr_is_dependent(&self, id: NodeId) -> bool {
        self.role_flag(id, ListRole::Attribute, "attr_is_dependent")
    }

    #[track_caller]
    pub fn set_attr_is_dependent(&mut self, id: NodeId, value: bool) {
        self.set_role_flag(id, ListRole::Attribute, "set_attr_is_dependent", value);
    }

    /// `ABI_TAG_IMPLICIT`.
    #[track_caller]
    pub fn abi_tag_implicit(&self, id: NodeId) -> bool {
        self.role_flag(id, ListRole::AbiTag, "abi_tag_implicit")
    }

    #[track_caller]
    pub fn set_abi_tag_implicit(&mut self, id: NodeId, value: bool) {
        self.set_role_flag(id, ListRole::AbiTag, "set_abi_tag_implicit", value);
    }

    /// `LAMBDA_CAPTURE_EXPLICIT_P`.
    #[track_caller]
    pub fn lambda_capture_explicit_p(&self, id: NodeId) -> bool {
        self.role_flag(id, ListRole::LambdaCapture, "lambda_capture_explicit_p")
    }

    #[track_caller]
    pub fn set_lambda_capture_explicit_p(&mut self, id: NodeId, value: bool) {
        self.set_role_flag(id, ListRole::LambdaCapture, "set_lambda_capture_explicit_p", value);
    }

    /// `PARENTHESIZED_LIST_P`.
    #[track_caller]
    pub fn parenthesized_list_p(&self, id: NodeId) -> bool {
        self.role_flag(id, ListRole::ParameterList, "parenthesized_list_p")
    }

    #[track_caller]
    pub fn set_parenthesized_list_p(&mut self, id: NodeId, value: bool) {
        self.set_role_flag(id, ListRole::ParameterList, "set_parenthesized_list_p", value);
    }

    // === Blocks ===

    /// Build a lexical block (`make_node (BLOCK)`).
    pub fn build_block(
        &mut self,
        span: Span,
        vars: Option<NodeId>,
        subblocks: Option<NodeId>,
        supercontext: Option<NodeId>,
    ) -> NodeId {
        let data = BlockData {
            vars,
            subblocks,
            supercontext,
        };
        let id = self.push(Node::new(NodeKind::Block, span, Payload::Block(Box::new(data))));
        trace!(%id, "block");
        id
    }

    fn block(&self, id: NodeId, accessor: &'static str) -> &BlockData {
        self.try_payload(id, BLOCK, accessor, "block", |payload| match payload {
            Payload::Block(data) => Some(&**data),
            _ => None,
        })
        .or_violation()
    }

    #[track_caller]
    fn block_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut BlockData {
        self.try_payload_mut(id, BLOCK, accessor, "block", |payload| match payload {
            Payload::Block(data) => Some(&mut **data),
            _ => None,
        })
        .or_violation()
    }

    /// `BLOCK_VARS`.
    #[track_caller]
    pub fn block_vars(&self, id: NodeId) -> Option<NodeId> {
        self.block(id, "block_vars").vars
    }

    #[track_caller]
    pub fn set_block_vars(&mut self, id: NodeId, vars: Option<NodeId>) {
        self.block_mut(id, "set_block_vars").vars = vars;
    }

    /// `BLOCK_SUBBLOCKS`.
    #[track_caller]
    pub fn block_subblocks(&self, id: NodeId) -> Option<NodeId> {
        self.block(id, "block_subblocks").subblocks
    }

    #[track_caller]
    pub fn set_block_subblocks(&mut self, id: NodeId, subblocks: Option<NodeId>) {
        self.block_mut(id, "set_block_subblocks").subblocks = subblocks;
    }

    /// `BLOCK_SUPERCONTEXT`.
    #[track_caller]
    pub fn block_supercontext(&self, id: NodeId) -> Option<NodeId> {
        self.block(id, "block_supercontext").supercontext
    }

    /// `BLOCK_OUTER_CURLY_BRACE_P`.
    #[track_caller]
    pub fn block_outer_curly_brace_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, BlockFlags::OUTER_CURLY_BRACE)
    }

    #[track_caller]
    pub fn set_block_outer_curly_brace_p(&mut self, id: NodeId, value: bool) {
        self.set_lang_flag(id, BlockFlags::OUTER_CURLY_BRACE, value);
    }
}
