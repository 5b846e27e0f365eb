//! Sylva Tree - Tagged Tree-Node Model
//!
//! This crate holds the node model shared by the passes of a C++-style
//! front end: declarations, types, expressions, statements, templates and
//! scope metadata, all stored as nodes of one [`Tree`] arena.
//!
//! - Every node has a [`NodeKind`]; what else it carries is decided by the
//!   kind alone.
//! - Boolean properties live in three small flag banks whose slots are
//!   reused across kinds (see [`flags`]).
//! - Declarations carry an optional language-specific record whose
//!   [`Selector`] picks one of several extensions.
//! - Accessors check kind, selector and variant on every call and abort with
//!   a [`ContractViolation`] on mismatch; `try_*` forms return it instead.
//!
//! # Design Philosophy
//!
//! - **Index, don't point**: nodes refer to each other by [`NodeId`]; the
//!   arena owns everything and nodes are never freed.
//! - **Tag every reuse**: where the classic layout overlaid unrelated data
//!   on one slot, the slot is an enum and reading the wrong arm is a
//!   violation.
//! - **One writer**: mutation goes through `&mut Tree`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod check;
mod class;
mod compare;
mod decl;
mod expr;
pub mod flags;
mod id;
mod identifier;
mod kind;
mod node;
mod options;
mod overload;
mod scope;
mod span;
mod stack;
mod template;
mod trusted;
mod types;
mod walk;

use std::sync::Once;

pub use arena::Tree;
pub use check::ContractViolation;
pub use class::{
    Access, BaseInfo, BaseSpec, BinfoFlags, ClassData, ClassFlags, SpecialMember, SpecialMemberState, VirtualEntry,
};
pub use compare::CompareMode;
pub use decl::{
    AccessSlot, AdjustStep, CloneSet, CloneVariant, Clones, DeclCoreFlags, DeclData, DeclExtra, DecompData,
    DeferredBody, FnContext, FnData, FnFlags, FnRole, LangDecl, LangDeclBase, LangDeclBaseFlags, LangDeclExt,
    Language, MinData, NsData, OrdinaryFn, ParmData, Selector, ThunkAdjustment, ThunkData, VirtualIndex,
};
pub use expr::{
    BlockData, CaptureDefault, CpTraitKind, LambdaData, ListData, ListRole, StaticAssertData, TraitData,
    TraitOperands,
};
pub use id::NodeId;
pub use identifier::{
    IdentifierData, IdentifierKind, OperatorFlags, OperatorInfo, OperatorName, OvlOpCode, ASSIGN_OPERATORS,
    KEYWORDS, OPERATORS,
};
pub use kind::{Arity, KindSet, NodeKind, TreeClass};
pub use node::Node;
pub use options::{ConvFlags, ImplConvVoid, LookupFlags, TmplArgsMatch, WantFlags};
pub use overload::{BaselinkData, OvlInsert, OvlIter};
pub use scope::{
    BindingId, BindingLevel, ClassBinding, CxxBinding, LevelFlags, LevelGuard, LevelId, SavedBinding, SavedScope,
    ScopeContext, ScopeKind, StmtTree, TopLevelGuard,
};
pub use span::Span;
pub use template::{DeferredAccessCheck, TemplateInfoData, TemplateParmIndexData, UseTemplate};
pub use types::{Quals, TypeData, TypeShape};
pub use walk::{Subtrees, WalkControl};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for the tree's logs.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect. Filtering follows `RUST_LOG`, e.g. `RUST_LOG=sylva_tree=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
