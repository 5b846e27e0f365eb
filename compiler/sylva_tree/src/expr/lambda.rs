//! Lambda expressions, trait expressions and static assertions.

use tracing::trace;

use super::list::ListRole;
use crate::check::{ContractViolation, OrViolation};
use crate::flags::{LambdaExprFlags, TreeListFlags};
use crate::kind::Arity;
use crate::node::{Node, Payload};
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

const LAMBDA_EXPR: KindSet = KindSet(&[NodeKind::LambdaExpr]);
const TRAIT_EXPR: KindSet = KindSet(&[NodeKind::TraitExpr]);
const STATIC_ASSERT: KindSet = KindSet(&[NodeKind::StaticAssert]);

/// Default capture of a lambda (`LAMBDA_EXPR_DEFAULT_CAPTURE_MODE`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CaptureDefault {
    #[default]
    None,
    /// `[=]`.
    Copy,
    /// `[&]`.
    Reference,
}

/// Payload of a `LambdaExpr` node. The closure type is the node's type.
#[derive(Clone, Debug, Default)]
pub struct LambdaData {
    pub(crate) capture_default: CaptureDefault,
    /// Capture entries, most recent first. Each is a
    /// [`ListRole::LambdaCapture`] list with the field as purpose and the
    /// initializer as value.
    pub(crate) captures: Option<NodeId>,
    /// The capture proxy for `this`, if captured.
    pub(crate) this_capture: Option<NodeId>,
    /// Declaration the lambda is mangled relative to, when it appears in a
    /// default argument or variable initializer.
    pub(crate) extra_scope: Option<NodeId>,
    pub(crate) discriminator: u32,
}

/// Kind of a builtin trait expression (`cp_trait_kind`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CpTraitKind {
    Bases,
    DirectBases,
    HasNothrowAssign,
    HasNothrowConstructor,
    HasNothrowCopy,
    HasTrivialAssign,
    HasTrivialConstructor,
    HasTrivialCopy,
    HasTrivialDestructor,
    HasUniqueObjRepresentations,
    HasVirtualDestructor,
    IsAbstract,
    IsAggregate,
    IsBaseOf,
    IsClass,
    IsEmpty,
    IsEnum,
    IsFinal,
    IsLayoutCompatible,
    IsLiteralType,
    IsPointerInterconvertibleBaseOf,
    IsPod,
    IsPolymorphic,
    IsSameAs,
    IsStdLayout,
    IsTrivial,
    IsTriviallyAssignable,
    IsTriviallyConstructible,
    IsTriviallyCopyable,
    IsUnion,
    UnderlyingType,
    IsAssignable,
    IsConstructible,
    IsNothrowAssignable,
    IsNothrowConstructible,
}

/// How many type operands a trait takes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TraitOperands {
    Unary,
    Binary,
    /// A type followed by a (possibly empty) list of argument types.
    Variadic,
}

impl CpTraitKind {
    pub const fn operands(self) -> TraitOperands {
        use CpTraitKind as K;
        match self {
            K::IsBaseOf
            | K::IsLayoutCompatible
            | K::IsPointerInterconvertibleBaseOf
            | K::IsSameAs
            | K::IsTriviallyAssignable
            | K::IsAssignable
            | K::IsNothrowAssignable => TraitOperands::Binary,
            K::IsTriviallyConstructible | K::IsConstructible | K::IsNothrowConstructible => {
                TraitOperands::Variadic
            }
            _ => TraitOperands::Unary,
        }
    }

    /// Traits that produce a type rather than a truth value.
    pub const fn yields_type(self) -> bool {
        matches!(self, CpTraitKind::Bases | CpTraitKind::DirectBases | CpTraitKind::UnderlyingType)
    }
}

/// Payload of a `TraitExpr` node.
#[derive(Copy, Clone, Debug)]
pub struct TraitData {
    pub(crate) kind: CpTraitKind,
    pub(crate) type1: NodeId,
    pub(crate) type2: Option<NodeId>,
}

/// Payload of a `StaticAssert` node.
#[derive(Copy, Clone, Debug)]
pub struct StaticAssertData {
    pub(crate) condition: NodeId,
    pub(crate) message: Option<NodeId>,
    /// Where the assertion was written; the node span covers the whole
    /// declaration.
    pub(crate) location: Span,
}

impl Tree {
    // === Lambdas ===

    /// `build_lambda_expr`.
    pub fn build_lambda_expr(&mut self, span: Span) -> NodeId {
        self.push(Node::new(
            NodeKind::LambdaExpr,
            span,
            Payload::Lambda(Box::default()),
        ))
    }

    fn lambda(&self, id: NodeId, accessor: &'static str) -> &LambdaData {
        self.try_payload(id, LAMBDA_EXPR, accessor, "lambda", |payload| match payload {
            Payload::Lambda(data) => Some(&**data),
            _ => None,
        })
        .or_violation()
    }

    #[track_caller]
    fn lambda_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut LambdaData {
        self.try_payload_mut(id, LAMBDA_EXPR, accessor, "lambda", |payload| match payload {
            Payload::Lambda(data) => Some(&mut **data),
            _ => None,
        })
        .or_violation()
    }

    /// `LAMBDA_EXPR_CLOSURE`.
    #[track_caller]
    pub fn lambda_expr_closure(&self, id: NodeId) -> Option<NodeId> {
        self.check_kind(id, LAMBDA_EXPR, "lambda_expr_closure").or_violation();
        self.ty(id)
    }

    /// `LAMBDA_EXPR_DEFAULT_CAPTURE_MODE`.
    #[track_caller]
    pub fn lambda_expr_default_capture_mode(&self, id: NodeId) -> CaptureDefault {
        self.lambda(id, "lambda_expr_default_capture_mode").capture_default
    }

    #[track_caller]
    pub fn set_lambda_expr_default_capture_mode(&mut self, id: NodeId, mode: CaptureDefault) {
        self.lambda_mut(id, "set_lambda_expr_default_capture_mode").capture_default = mode;
    }

    /// `LAMBDA_EXPR_CAPTURE_LIST`: first capture entry, most recent first.
    #[track_caller]
    pub fn lambda_expr_capture_list(&self, id: NodeId) -> Option<NodeId> {
        self.lambda(id, "lambda_expr_capture_list").captures
    }

    /// Record a capture of `field` initialized from `init`
    /// (`register_capture`). Returns the new capture entry.
    #[track_caller]
    pub fn add_lambda_capture(&mut self, id: NodeId, field: NodeId, init: Option<NodeId>, explicit: bool) -> NodeId {
        let rest = self.lambda_expr_capture_list(id);
        let entry = self.build_list_with_role(ListRole::LambdaCapture, Some(field), init);
        self.set_chain(entry, rest);
        self.set_lang_flag(entry, TreeListFlags::ROLE_MARK, explicit);
        self.lambda_mut(id, "add_lambda_capture").captures = Some(entry);
        trace!(lambda = %id, %field, explicit, "registered capture");
        entry
    }

    /// `LAMBDA_EXPR_THIS_CAPTURE`.
    #[track_caller]
    pub fn lambda_expr_this_capture(&self, id: NodeId) -> Option<NodeId> {
        self.lambda(id, "lambda_expr_this_capture").this_capture
    }

    #[track_caller]
    pub fn set_lambda_expr_this_capture(&mut self, id: NodeId, capture: Option<NodeId>) {
        self.lambda_mut(id, "set_lambda_expr_this_capture").this_capture = capture;
    }

    /// `LAMBDA_EXPR_CAPTURES_THIS_P`.
    #[track_caller]
    pub fn lambda_expr_captures_this_p(&self, id: NodeId) -> bool {
        self.lambda_expr_this_capture(id).is_some()
    }

    /// `LAMBDA_EXPR_EXTRA_SCOPE`.
    #[track_caller]
    pub fn lambda_expr_extra_scope(&self, id: NodeId) -> Option<NodeId> {
        self.lambda(id, "lambda_expr_extra_scope").extra_scope
    }

    #[track_caller]
    pub fn set_lambda_expr_extra_scope(&mut self, id: NodeId, scope: Option<NodeId>) {
        self.lambda_mut(id, "set_lambda_expr_extra_scope").extra_scope = scope;
    }

    /// `LAMBDA_EXPR_DISCRIMINATOR`.
    #[track_caller]
    pub fn lambda_expr_discriminator(&self, id: NodeId) -> u32 {
        self.lambda(id, "lambda_expr_discriminator").discriminator
    }

    #[track_caller]
    pub fn set_lambda_expr_discriminator(&mut self, id: NodeId, discriminator: u32) {
        self.lambda_mut(id, "set_lambda_expr_discriminator").discriminator = discriminator;
    }

    /// `LAMBDA_EXPR_MUTABLE_P`.
    #[track_caller]
    pub fn lambda_expr_mutable_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, LambdaExprFlags::MUTABLE)
    }

    #[track_caller]
    pub fn set_lambda_expr_mutable_p(&mut self, id: NodeId, value: bool) {
        self.set_lang_flag(id, LambdaExprFlags::MUTABLE, value);
    }

    /// `LAMBDA_EXPR_CAPTURE_OPTIMIZED`.
    #[track_caller]
    pub fn lambda_expr_capture_optimized(&self, id: NodeId) -> bool {
        self.lang_flag(id, LambdaExprFlags::CAPTURE_OPTIMIZED)
    }

    #[track_caller]
    pub fn set_lambda_expr_capture_optimized(&mut self, id: NodeId, value: bool) {
        self.set_lang_flag(id, LambdaExprFlags::CAPTURE_OPTIMIZED, value);
    }

    // === Trait expressions ===

    /// Build a trait expression. Binary traits need a second type, unary
    /// ones must not have one.
    pub fn try_build_trait_expr(
        &mut self,
        span: Span,
        kind: CpTraitKind,
        type1: NodeId,
        type2: Option<NodeId>,
    ) -> Result<NodeId, ContractViolation> {
        let expected: Option<u8> = match kind.operands() {
            TraitOperands::Unary => Some(1),
            TraitOperands::Binary => Some(2),
            TraitOperands::Variadic => None,
        };
        let found = 1 + usize::from(type2.is_some());
        if let Some(expected) = expected.filter(|&n| usize::from(n) != found) {
            return Err(ContractViolation::ArityMismatch {
                accessor: "build_trait_expr",
                kind: NodeKind::TraitExpr,
                found,
                expected: Arity::Fixed(expected),
            });
        }
        let data = TraitData { kind, type1, type2 };
        let id = self.push(Node::new(NodeKind::TraitExpr, span, Payload::Trait(Box::new(data))));
        if !kind.yields_type() {
            self.set_ty(id, Some(NodeId::BOOL_TYPE));
        }
        Ok(id)
    }

    #[track_caller]
    pub fn build_trait_expr(&mut self, span: Span, kind: CpTraitKind, type1: NodeId, type2: Option<NodeId>) -> NodeId {
        self.try_build_trait_expr(span, kind, type1, type2).or_violation()
    }

    fn trait_expr(&self, id: NodeId, accessor: &'static str) -> TraitData {
        *self
            .try_payload(id, TRAIT_EXPR, accessor, "trait", |payload| match payload {
                Payload::Trait(data) => Some(&**data),
                _ => None,
            })
            .or_violation()
    }

    /// `TRAIT_EXPR_KIND`.
    #[track_caller]
    pub fn trait_expr_kind(&self, id: NodeId) -> CpTraitKind {
        self.trait_expr(id, "trait_expr_kind").kind
    }

    /// `TRAIT_EXPR_TYPE1`.
    #[track_caller]
    pub fn trait_expr_type1(&self, id: NodeId) -> NodeId {
        self.trait_expr(id, "trait_expr_type1").type1
    }

    /// `TRAIT_EXPR_TYPE2`.
    #[track_caller]
    pub fn trait_expr_type2(&self, id: NodeId) -> Option<NodeId> {
        self.trait_expr(id, "trait_expr_type2").type2
    }

    // === Static assertions ===

    pub fn build_static_assert(
        &mut self,
        span: Span,
        condition: NodeId,
        message: Option<NodeId>,
        location: Span,
    ) -> NodeId {
        let data = StaticAssertData {
            condition,
            message,
            location,
        };
        self.push(Node::new(
            NodeKind::StaticAssert,
            span,
            Payload::StaticAssert(Box::new(data)),
        ))
    }

    fn static_assert(&self, id: NodeId, accessor: &'static str) -> StaticAssertData {
        *self
            .try_payload(id, STATIC_ASSERT, accessor, "static assertion", |payload| match payload {
                Payload::StaticAssert(data) => Some(&**data),
                _ => None,
            })
            .or_violation()
    }

    /// `STATIC_ASSERT_CONDITION`.
    #[track_caller]
    pub fn static_assert_condition(&self, id: NodeId) -> NodeId {
        self.static_assert(id, "static_assert_condition").condition
    }

    /// `STATIC_ASSERT_MESSAGE`.
    #[track_caller]
    pub fn static_assert_message(&self, id: NodeId) -> Option<NodeId> {
        self.static_assert(id, "static_assert_message").message
    }

    /// `STATIC_ASSERT_SOURCE_LOCATION`.
    #[track_caller]
    pub fn static_assert_source_location(&self, id: NodeId) -> Span {
        self.static_assert(id, "static_assert_source_location").location
    }
}
