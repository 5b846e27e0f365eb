//! Scope and binding shapes.
//!
//! Binding levels and bindings live in arenas inside a [`ScopeContext`]
//! and are addressed by [`LevelId`] and [`BindingId`]. A level points at
//! its enclosing level; closing a level only moves the current position,
//! so anything recorded against a closed level stays readable.
//!
//! Name lookup is not done here. The context records what a lookup
//! algorithm needs: which names a level binds, what each binding shadows,
//! and the state saved around a jump to the top level.

mod context;

pub use context::{LevelGuard, ScopeContext, TopLevelGuard};

use std::fmt;

use bitflags::bitflags;

use crate::NodeId;

/// Handle of a [`BindingLevel`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelId(u32);

/// Handle of a [`CxxBinding`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingId(u32);

impl LevelId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl BindingId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// What kind of region a binding level covers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ScopeKind {
    /// Ordinary block scope.
    #[default]
    Block,
    /// Pseudo-scope for cleanups; transparent to lookup.
    Cleanup,
    Try,
    Catch,
    /// Variable declared in a for-init-statement.
    For,
    /// Variable declared in the condition of an `if` or `switch`.
    Cond,
    FunctionParms,
    Class,
    /// Enumerators of a scoped enumeration.
    ScopedEnum,
    /// Namespace members, including the global scope.
    Namespace,
    TemplateParms,
    /// `template <>` of an explicit specialization. Stored as a
    /// template-parameter level with its explicit-spec bit set.
    TemplateSpec,
    /// Synchronized or atomic statement.
    Transaction,
    /// OpenMP structured block.
    Omp,
}

impl ScopeKind {
    /// Scopes that belong to a function body (`sk_block` .. `sk_cond`
    /// plus `sk_function_parms`).
    pub const fn is_local(self) -> bool {
        matches!(
            self,
            ScopeKind::Block
                | ScopeKind::Cleanup
                | ScopeKind::Try
                | ScopeKind::Catch
                | ScopeKind::For
                | ScopeKind::Cond
                | ScopeKind::FunctionParms
                | ScopeKind::Transaction
                | ScopeKind::Omp
        )
    }
}

/// A binding of a name to an entity (`cxx_binding`).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CxxBinding {
    /// The binding of the same name this one shadows.
    pub previous: Option<BindingId>,
    /// Non-type entity.
    pub value: Option<NodeId>,
    /// Type entity.
    pub ty: Option<NodeId>,
    /// Level where the binding was made.
    pub scope: LevelId,
    /// The value comes from a base class.
    pub value_is_inherited: bool,
    /// Made in a function-local scope.
    pub is_local: bool,
    /// The type binding is hidden by the value binding.
    pub type_is_hidden: bool,
}

/// A class member binding, kept on the class level (`cp_class_binding`).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ClassBinding {
    pub base: BindingId,
    pub identifier: NodeId,
}

bitflags! {
    /// Bookkeeping bits of a [`BindingLevel`].
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LevelFlags: u8 {
        /// Make a block for this level regardless.
        const KEEP = 1 << 0;
        /// More cleanup-needing variables may be added.
        const MORE_CLEANUPS_OK = 1 << 1;
        const HAVE_CLEANUPS = 1 << 2;
        /// Class level currently defining its entity.
        const DEFINING_CLASS = 1 << 3;
        /// Parameter level of an immediate function.
        const IMMEDIATE_FN_CTX = 1 << 4;
    }
}

/// One binding contour (`cp_binding_level`).
#[derive(Clone, Debug)]
pub struct BindingLevel {
    kind: ScopeKind,
    explicit_spec: bool,
    /// Declarations made in this level, in declaration order.
    pub names: Vec<NodeId>,
    /// Namespaces nominated by using-directives.
    pub using_directives: Vec<NodeId>,
    /// Members of a class level, with what they shadow.
    pub class_shadowed: Vec<ClassBinding>,
    /// Type names shadowed by this level, with the type value they had
    /// before it was entered.
    pub type_shadowed: Vec<(NodeId, Option<NodeId>)>,
    /// Blocks of the levels entered and left one level down.
    pub blocks: Vec<NodeId>,
    /// Namespace, class or function the level belongs to.
    pub this_entity: Option<NodeId>,
    /// Enclosing level.
    pub level_chain: Option<LevelId>,
    /// Statements of a cleanup level.
    pub statement_list: Option<NodeId>,
    /// Depth of the level when it was opened.
    pub binding_depth: u32,
    pub flags: LevelFlags,
}

impl BindingLevel {
    pub(crate) fn new(kind: ScopeKind, entity: Option<NodeId>, chain: Option<LevelId>, depth: u32) -> Self {
        let (kind, explicit_spec) = match kind {
            ScopeKind::TemplateSpec => (ScopeKind::TemplateParms, true),
            other => (other, false),
        };
        BindingLevel {
            kind,
            explicit_spec,
            names: Vec::new(),
            using_directives: Vec::new(),
            class_shadowed: Vec::new(),
            type_shadowed: Vec::new(),
            blocks: Vec::new(),
            this_entity: entity,
            level_chain: chain,
            statement_list: None,
            binding_depth: depth,
            flags: LevelFlags::empty(),
        }
    }

    /// Kind of the level. Explicit-specialization levels report
    /// [`ScopeKind::TemplateParms`].
    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Whether a template-parameter level is for an explicit
    /// specialization. `None` on every other kind of level.
    pub fn explicit_spec_p(&self) -> Option<bool> {
        (self.kind == ScopeKind::TemplateParms).then_some(self.explicit_spec)
    }
}

/// A name binding saved by [`ScopeContext::push_to_top_level`]
/// (`cxx_saved_binding`).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SavedBinding {
    pub identifier: NodeId,
    pub binding: Option<BindingId>,
    pub real_type_value: Option<NodeId>,
}

/// Statement lists under construction (`stmt_tree_s`).
#[derive(Clone, Debug)]
pub struct StmtTree {
    /// Innermost list last.
    pub cur_stmt_list: Vec<NodeId>,
    /// Statements are full-expressions whose temporaries die at the end.
    pub stmts_are_full_exprs_p: bool,
}

impl Default for StmtTree {
    fn default() -> Self {
        StmtTree {
            cur_stmt_list: Vec::new(),
            stmts_are_full_exprs_p: true,
        }
    }
}

/// Per-context front-end state, saved and restored around a jump to the
/// top level (`saved_scope`).
#[derive(Clone, Debug, Default)]
pub struct SavedScope {
    pub old_bindings: Vec<SavedBinding>,
    pub old_namespace: Option<NodeId>,
    pub class_name: Option<NodeId>,
    pub class_type: Option<NodeId>,
    pub access_specifier: Option<NodeId>,
    pub function_decl: Option<NodeId>,
    pub template_parms: Option<NodeId>,
    pub previous_class_level: Option<LevelId>,
    pub processing_template_decl: u32,
    pub processing_specialization: bool,
    pub processing_explicit_instantiation: bool,
    pub discarded_stmt: bool,
    pub consteval_if_p: bool,
    pub unevaluated_operand: u32,
    pub stmt_tree: StmtTree,
    pub class_bindings: Option<LevelId>,
    pub bindings: Option<LevelId>,
}

#[cfg(test)]
mod tests;
