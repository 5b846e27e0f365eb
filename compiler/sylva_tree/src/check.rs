//! Contract violations raised by the checked accessor layer.
//!
//! A violation means a client pass asked a node for a field its kind (or
//! extension selector, or union variant) does not have. That is a bug in the
//! client, never a property of the source program, so the public accessors
//! abort through [`violation`] instead of returning an error. The `try_*`
//! accessors and [`Tree::check_kind`](crate::Tree::check_kind) expose the same
//! checks as `Result`s for callers that probe node shapes.

use std::panic::Location;

use crate::decl::Selector;
use crate::flags::Bank;
use crate::kind::Arity;
use crate::scope::{BindingId, LevelId};
use crate::{KindSet, NodeId, NodeKind};

/// A checked access that did not match the node's shape.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    #[error("{accessor}: node {node} is a {found}, expected {expected}")]
    KindMismatch {
        accessor: &'static str,
        node: NodeId,
        found: NodeKind,
        expected: KindSet,
    },

    #[error("{accessor}: node {node} ({kind}) has no language-specific data")]
    MissingLangDecl {
        accessor: &'static str,
        node: NodeId,
        kind: NodeKind,
    },

    #[error("{accessor}: node {node} ({kind}) has {found:?} extension data, expected {expected:?}")]
    SelectorMismatch {
        accessor: &'static str,
        node: NodeId,
        kind: NodeKind,
        found: Selector,
        expected: Selector,
    },

    #[error("{accessor}: node {node} ({kind}) has no {family} in its {bank} flag bank")]
    FlagFamilyMismatch {
        accessor: &'static str,
        node: NodeId,
        kind: NodeKind,
        bank: Bank,
        family: &'static str,
    },

    #[error("{accessor}: node {node} ({kind}) holds the {found} interpretation, not {expected}")]
    VariantMismatch {
        accessor: &'static str,
        node: NodeId,
        kind: NodeKind,
        found: &'static str,
        expected: &'static str,
    },

    #[error("{accessor}: operand {index} out of range for node {node} ({kind}) with {len} operands")]
    OperandOutOfRange {
        accessor: &'static str,
        node: NodeId,
        kind: NodeKind,
        index: usize,
        len: usize,
    },

    #[error("{accessor}: {kind} takes {expected} operands, got {found}")]
    ArityMismatch {
        accessor: &'static str,
        kind: NodeKind,
        found: usize,
        expected: Arity,
    },

    #[error("{accessor}: node {node} is not in this tree")]
    UnknownNode { accessor: &'static str, node: NodeId },

    #[error("{accessor}: namespace alias {node} leads back to itself")]
    AliasCycle { accessor: &'static str, node: NodeId },

    #[error("{accessor}: binding level {level} is not in this scope context")]
    UnknownLevel { accessor: &'static str, level: LevelId },

    #[error("{accessor}: binding {binding} is not in this scope context")]
    UnknownBinding { accessor: &'static str, binding: BindingId },
}

impl ContractViolation {
    /// Name of the accessor that rejected the access.
    pub fn accessor(&self) -> &'static str {
        match self {
            ContractViolation::KindMismatch { accessor, .. }
            | ContractViolation::MissingLangDecl { accessor, .. }
            | ContractViolation::SelectorMismatch { accessor, .. }
            | ContractViolation::FlagFamilyMismatch { accessor, .. }
            | ContractViolation::VariantMismatch { accessor, .. }
            | ContractViolation::OperandOutOfRange { accessor, .. }
            | ContractViolation::ArityMismatch { accessor, .. }
            | ContractViolation::UnknownNode { accessor, .. }
            | ContractViolation::AliasCycle { accessor, .. }
            | ContractViolation::UnknownLevel { accessor, .. }
            | ContractViolation::UnknownBinding { accessor, .. } => accessor,
        }
    }
}

/// Abort on a contract violation, reporting the caller's location.
///
/// Every checked accessor is `#[track_caller]`, so the location is the client
/// call site rather than this function.
#[cold]
#[inline(never)]
#[track_caller]
pub fn violation(error: ContractViolation) -> ! {
    let location = Location::caller();
    tracing::error!(
        accessor = error.accessor(),
        file = location.file(),
        line = location.line(),
        "tree contract violation: {error}"
    );
    panic!("internal compiler error: {error} (checked at {location})");
}

/// Unwrap a checked result, aborting on violation.
pub(crate) trait OrViolation<T> {
    #[track_caller]
    fn or_violation(self) -> T;
}

impl<T> OrViolation<T> for Result<T, ContractViolation> {
    #[inline]
    #[track_caller]
    fn or_violation(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => violation(error),
        }
    }
}
