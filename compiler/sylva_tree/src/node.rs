//! The generic node envelope.
//!
//! A node is a kind tag, a span, a nullable type annotation, a successor
//! link, the node-generic flag bank, and a payload whose shape is decided by
//! the kind. Payload variants that are large or rare are boxed so that the
//! envelope stays small; most nodes in a translation unit are expressions
//! whose payload is a boxed operand slice.

use crate::class::BaseInfo;
use crate::decl::DeclData;
use crate::expr::{BlockData, LambdaData, ListData, StaticAssertData, TraitData};
use crate::flags::TreeLangFlags;
use crate::identifier::IdentifierData;
use crate::overload::BaselinkData;
use crate::template::{TemplateInfoData, TemplateParmIndexData};
use crate::types::TypeData;
use crate::{NodeId, NodeKind, Span};

/// One entry of the [`Tree`](crate::Tree) arena.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) span: Span,
    /// `TREE_TYPE`: filled in by semantic analysis.
    pub(crate) ty: Option<NodeId>,
    /// `TREE_CHAIN` / `DECL_CHAIN`.
    pub(crate) chain: Option<NodeId>,
    pub(crate) flags: TreeLangFlags,
    pub(crate) payload: Payload,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, span: Span, payload: Payload) -> Self {
        Node {
            kind,
            span,
            ty: None,
            chain: None,
            flags: TreeLangFlags::for_kind(kind),
            payload,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn ty(&self) -> Option<NodeId> {
        self.ty
    }

    #[inline]
    pub fn chain(&self) -> Option<NodeId> {
        self.chain
    }

    /// The node-generic flag bank.
    #[inline]
    pub fn tree_flags(&self) -> TreeLangFlags {
        self.flags
    }
}

/// Kind-dependent payload.
#[derive(Clone, Debug)]
pub(crate) enum Payload {
    /// Nothing beyond the envelope (`error_mark`).
    Empty,
    Identifier(Box<IdentifierData>),
    /// Operand slots of an expression or statement. Length is fixed at
    /// construction and validated against [`NodeKind::arity`].
    Operands(Box<[Option<NodeId>]>),
    Decl(Box<DeclData>),
    Type(Box<TypeData>),
    List(Box<ListData>),
    Vec(Box<[Option<NodeId>]>),
    Block(Box<BlockData>),
    IntegerCst(i64),
    /// Bit pattern of an `f64`.
    RealCst(u64),
    StringCst(Box<str>),
    /// The member named by a pointer-to-member constant.
    PtrmemCst(NodeId),
    /// `OVL_FUNCTION`; the rest of the set hangs off the chain.
    Overload(NodeId),
    Baselink(Box<BaselinkData>),
    TemplateInfo(Box<TemplateInfoData>),
    TemplateParmIndex(Box<TemplateParmIndexData>),
    Lambda(Box<LambdaData>),
    Trait(Box<TraitData>),
    StaticAssert(Box<StaticAssertData>),
    Binfo(Box<BaseInfo>),
}

impl Payload {
    /// Short name of the payload shape, for violation reports.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Identifier(_) => "identifier",
            Payload::Operands(_) => "operands",
            Payload::Decl(_) => "declaration",
            Payload::Type(_) => "type",
            Payload::List(_) => "list",
            Payload::Vec(_) => "vector",
            Payload::Block(_) => "block",
            Payload::IntegerCst(_) => "integer constant",
            Payload::RealCst(_) => "real constant",
            Payload::StringCst(_) => "string constant",
            Payload::PtrmemCst(_) => "pointer-to-member constant",
            Payload::Overload(_) => "overload",
            Payload::Baselink(_) => "baselink",
            Payload::TemplateInfo(_) => "template info",
            Payload::TemplateParmIndex(_) => "template parameter index",
            Payload::Lambda(_) => "lambda",
            Payload::Trait(_) => "trait",
            Payload::StaticAssert(_) => "static assertion",
            Payload::Binfo(_) => "base info",
        }
    }
}

crate::static_assert_size!(NodeId, 4);
crate::static_assert_size!(Span, 8);
crate::static_assert_size!(NodeKind, 1);
crate::static_assert_size!(Payload, 24);
