//! The scope context: level and binding arenas, the current position, and
//! the stack of states saved by jumps to the top level.
//!
//! Opening a level or jumping to the top level returns a guard that undoes
//! the change when dropped, including during unwinding. Guards hold the
//! context and the tree, dereference to the context, and can open nested
//! guards of their own.

use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashSet;
use tracing::debug;

use super::{BindingId, BindingLevel, CxxBinding, LevelId, SavedBinding, SavedScope, ScopeKind};
use crate::check::{ContractViolation, OrViolation};
use crate::{NodeId, NodeKind, Tree};

/// Binding levels, bindings and saved front-end state of one
/// translation unit (`scope_chain` and friends).
#[derive(Clone, Debug)]
pub struct ScopeContext {
    levels: Vec<BindingLevel>,
    bindings: Vec<CxxBinding>,
    /// Identifiers bound in each level, parallel to `levels`.
    bound: Vec<Vec<NodeId>>,
    global: LevelId,
    /// The live state; `state.bindings` is the current level.
    state: SavedScope,
    /// Outer states, innermost last.
    saved: Vec<SavedScope>,
}

impl ScopeContext {
    /// Create a context whose global level belongs to `global_namespace`.
    pub fn new(tree: &mut Tree, global_namespace: NodeId) -> Self {
        let mut ctx = ScopeContext {
            levels: Vec::new(),
            bindings: Vec::new(),
            bound: Vec::new(),
            global: LevelId(0),
            state: SavedScope::default(),
            saved: Vec::new(),
        };
        let global = ctx.alloc_level(tree, ScopeKind::Namespace, Some(global_namespace), None);
        ctx.global = global;
        ctx.state.bindings = Some(global);
        ctx.state.old_namespace = Some(global_namespace);
        ctx
    }

    #[allow(clippy::cast_possible_truncation)]
    fn alloc_level(
        &mut self,
        tree: &mut Tree,
        kind: ScopeKind,
        entity: Option<NodeId>,
        chain: Option<LevelId>,
    ) -> LevelId {
        let depth = chain.map_or(0, |parent| self.level(parent).binding_depth + 1);
        let id = LevelId(self.levels.len() as u32);
        self.levels.push(BindingLevel::new(kind, entity, chain, depth));
        self.bound.push(Vec::new());
        if let Some(ns) = entity.filter(|&ns| kind == ScopeKind::Namespace && tree.kind(ns) == NodeKind::NamespaceDecl) {
            if tree.decl_lang_specific_p(ns) {
                tree.set_namespace_level(ns, id);
            }
        }
        id
    }

    // === Levels ===

    /// `current_binding_level`.
    #[inline]
    pub fn current_level(&self) -> LevelId {
        self.state.bindings.unwrap_or(self.global)
    }

    #[inline]
    pub fn global_level(&self) -> LevelId {
        self.global
    }

    /// Whether the current level is the global one (`global_scope_p`).
    pub fn at_global_scope(&self) -> bool {
        self.current_level() == self.global
    }

    pub fn try_level(&self, id: LevelId) -> Result<&BindingLevel, ContractViolation> {
        self.levels.get(id.index()).ok_or(ContractViolation::UnknownLevel {
            accessor: "level",
            level: id,
        })
    }

    #[track_caller]
    pub fn level(&self, id: LevelId) -> &BindingLevel {
        self.try_level(id).or_violation()
    }

    #[track_caller]
    pub fn level_mut(&mut self, id: LevelId) -> &mut BindingLevel {
        self.levels
            .get_mut(id.index())
            .ok_or(ContractViolation::UnknownLevel {
                accessor: "level_mut",
                level: id,
            })
            .or_violation()
    }

    /// Levels from `start` outward to the global level.
    pub fn enclosing_levels(&self, start: LevelId) -> impl Iterator<Item = LevelId> + '_ {
        std::iter::successors(Some(start), move |&id| self.level(id).level_chain)
    }

    /// Innermost level that is not a class level
    /// (`innermost_nonclass_level`).
    pub fn innermost_nonclass_level(&self) -> LevelId {
        self.enclosing_levels(self.current_level())
            .find(|&id| self.level(id).kind() != ScopeKind::Class)
            .unwrap_or(self.global)
    }

    /// Open a level of `kind` inside the current one (`begin_scope`).
    pub fn push_level<'a>(&'a mut self, tree: &'a mut Tree, kind: ScopeKind, entity: Option<NodeId>) -> LevelGuard<'a> {
        let parent = self.current_level();
        let level = self.alloc_level(tree, kind, entity, Some(parent));
        self.state.bindings = Some(level);
        if kind == ScopeKind::Class {
            self.state.class_bindings = Some(level);
        }
        debug!(%level, ?kind, depth = self.level(level).binding_depth, "opened scope");
        LevelGuard { ctx: self, tree, level }
    }

    /// Close `level` (`leave_scope`): restore the bindings it shadowed and
    /// make its parent current. The level stays in the arena.
    fn pop_level(&mut self, tree: &mut Tree, level: LevelId) {
        debug_assert_eq!(self.current_level(), level, "scopes must close innermost first");
        for &name in self.bound[level.index()].iter().rev() {
            if let Some(binding) = tree.identifier_binding(name) {
                let binding = self.binding(binding);
                if binding.scope == level {
                    tree.set_identifier_binding(name, binding.previous);
                }
            }
        }
        for &(name, old) in self.levels[level.index()].type_shadowed.iter().rev() {
            tree.set_identifier_type_value(name, old);
        }
        let parent = self.level(level).level_chain;
        if self.state.class_bindings == Some(level) {
            self.state.previous_class_level = Some(level);
            let class_bindings = parent
                .into_iter()
                .flat_map(|parent| self.enclosing_levels(parent))
                .find(|&id| self.level(id).kind() == ScopeKind::Class);
            self.state.class_bindings = class_bindings;
        }
        self.state.bindings = parent;
        debug!(%level, "closed scope");
    }

    // === Bindings ===

    pub fn try_binding(&self, id: BindingId) -> Result<CxxBinding, ContractViolation> {
        self.bindings.get(id.index()).copied().ok_or(ContractViolation::UnknownBinding {
            accessor: "binding",
            binding: id,
        })
    }

    #[track_caller]
    pub fn binding(&self, id: BindingId) -> CxxBinding {
        self.try_binding(id).or_violation()
    }

    #[track_caller]
    pub fn binding_mut(&mut self, id: BindingId) -> &mut CxxBinding {
        self.bindings
            .get_mut(id.index())
            .ok_or(ContractViolation::UnknownBinding {
                accessor: "binding_mut",
                binding: id,
            })
            .or_violation()
    }

    /// Bind `name` to `value` in the current level, shadowing any outer
    /// binding (`push_local_binding`).
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_binding(&mut self, tree: &mut Tree, name: NodeId, value: NodeId) -> BindingId {
        let level = self.current_level();
        let binding = CxxBinding {
            previous: tree.identifier_binding(name),
            value: Some(value),
            ty: None,
            scope: level,
            value_is_inherited: false,
            is_local: self.level(level).kind().is_local(),
            type_is_hidden: false,
        };
        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(binding);
        tree.set_identifier_binding(name, Some(id));
        self.bound[level.index()].push(name);
        if tree.kind(value).is_decl() {
            self.levels[level.index()].names.push(value);
        }
        id
    }

    /// Make `ty` the type value of `name` in the current level, remembering
    /// the previous one for when the level closes (`push_shadowed_type`).
    pub fn push_type_binding(&mut self, tree: &mut Tree, name: NodeId, ty: NodeId) {
        let old = tree.identifier_type_value(name);
        let level = self.current_level();
        self.levels[level.index()].type_shadowed.push((name, old));
        tree.set_identifier_type_value(name, Some(ty));
    }

    /// Innermost binding of `name` in `level` itself, if any.
    pub fn binding_in_level(&self, tree: &Tree, name: NodeId, level: LevelId) -> Option<BindingId> {
        let mut current = tree.identifier_binding(name);
        while let Some(id) = current {
            let binding = self.binding(id);
            if binding.scope == level {
                return Some(id);
            }
            current = binding.previous;
        }
        None
    }

    // === Saved state ===

    /// The live front-end state.
    pub fn state(&self) -> &SavedScope {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SavedScope {
        &mut self.state
    }

    /// Number of enclosing states saved by [`push_to_top_level`](Self::push_to_top_level).
    pub fn saved_depth(&self) -> usize {
        self.saved.len()
    }

    /// Suspend the current context and continue at global scope
    /// (`push_to_top_level`), as when instantiating a template from inside
    /// a function body. Every binding made below the global level is
    /// hidden until the guard is dropped; global bindings stay visible.
    pub fn push_to_top_level<'a>(&'a mut self, tree: &'a mut Tree) -> TopLevelGuard<'a> {
        let mut old_bindings = Vec::new();
        let mut seen = FxHashSet::default();
        let (bindings, global) = (&self.bindings, self.global);
        let mut store = |tree: &mut Tree, name: NodeId| {
            let binding = tree.identifier_binding(name);
            let real_type_value = tree.identifier_type_value(name);
            if (binding.is_none() && real_type_value.is_none()) || !seen.insert(name) {
                return;
            }
            old_bindings.push(SavedBinding {
                identifier: name,
                binding,
                real_type_value,
            });
            // Namespace-scope bindings stay visible.
            let outer = std::iter::successors(binding, |id| bindings[id.index()].previous)
                .find(|id| bindings[id.index()].scope == global);
            tree.set_identifier_binding(name, outer);
        };
        if let Some(previous) = self.state.previous_class_level {
            for class_binding in &self.levels[previous.index()].class_shadowed {
                store(tree, class_binding.identifier);
            }
        }
        let current = self.current_level();
        let levels: Vec<LevelId> = std::iter::successors(Some(current), |&id| self.levels[id.index()].level_chain)
            .take_while(|&level| level != global)
            .collect();
        for &level in &levels {
            for &name in &self.bound[level.index()] {
                store(tree, name);
            }
            let data = &self.levels[level.index()];
            if data.kind() == ScopeKind::Class {
                for class_binding in &data.class_shadowed {
                    store(tree, class_binding.identifier);
                }
            }
            for &(name, _) in &data.type_shadowed {
                store(tree, name);
            }
        }
        // Innermost level first, newest shadow first, so each name ends at
        // its value from before the outermost local shadow.
        for &level in &levels {
            for &(name, old) in self.levels[level.index()].type_shadowed.iter().rev() {
                tree.set_identifier_type_value(name, old);
            }
        }

        let fresh = SavedScope {
            old_bindings,
            old_namespace: self.saved.first().map_or(self.state.old_namespace, |outermost| outermost.old_namespace),
            bindings: Some(self.global),
            ..SavedScope::default()
        };
        let outer = std::mem::replace(&mut self.state, fresh);
        self.saved.push(outer);
        debug!(depth = self.saved.len(), saved = self.state.old_bindings.len(), "pushed to top level");
        TopLevelGuard { ctx: self, tree }
    }

    /// Undo [`push_to_top_level`](Self::push_to_top_level).
    fn pop_from_top_level(&mut self, tree: &mut Tree) {
        for saved in &self.state.old_bindings {
            tree.set_identifier_binding(saved.identifier, saved.binding);
            tree.set_identifier_type_value(saved.identifier, saved.real_type_value);
        }
        if let Some(outer) = self.saved.pop() {
            self.state = outer;
        }
        debug!(depth = self.saved.len(), "popped from top level");
    }
}

/// An open binding level; closes it on drop.
pub struct LevelGuard<'a> {
    ctx: &'a mut ScopeContext,
    tree: &'a mut Tree,
    level: LevelId,
}

impl LevelGuard<'_> {
    /// The level this guard keeps open.
    #[inline]
    pub fn id(&self) -> LevelId {
        self.level
    }

    pub fn tree(&self) -> &Tree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }

    /// Bind `name` in this level.
    pub fn bind(&mut self, name: NodeId, value: NodeId) -> BindingId {
        self.ctx.push_binding(self.tree, name, value)
    }

    /// Make `ty` the type value of `name` in this level.
    pub fn bind_type(&mut self, name: NodeId, ty: NodeId) {
        self.ctx.push_type_binding(self.tree, name, ty);
    }

    /// Open a nested level.
    pub fn push_level(&mut self, kind: ScopeKind, entity: Option<NodeId>) -> LevelGuard<'_> {
        self.ctx.push_level(self.tree, kind, entity)
    }

    /// Jump to the top level from inside this one.
    pub fn push_to_top_level(&mut self) -> TopLevelGuard<'_> {
        self.ctx.push_to_top_level(self.tree)
    }
}

impl Deref for LevelGuard<'_> {
    type Target = ScopeContext;

    fn deref(&self) -> &ScopeContext {
        self.ctx
    }
}

impl DerefMut for LevelGuard<'_> {
    fn deref_mut(&mut self) -> &mut ScopeContext {
        self.ctx
    }
}

impl Drop for LevelGuard<'_> {
    fn drop(&mut self) {
        self.ctx.pop_level(self.tree, self.level);
    }
}

/// A suspended context; restores it on drop (`pop_from_top_level`).
pub struct TopLevelGuard<'a> {
    ctx: &'a mut ScopeContext,
    tree: &'a mut Tree,
}

impl TopLevelGuard<'_> {
    pub fn tree(&self) -> &Tree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }

    /// Open a level at global scope.
    pub fn push_level(&mut self, kind: ScopeKind, entity: Option<NodeId>) -> LevelGuard<'_> {
        self.ctx.push_level(self.tree, kind, entity)
    }
}

impl Deref for TopLevelGuard<'_> {
    type Target = ScopeContext;

    fn deref(&self) -> &ScopeContext {
        self.ctx
    }
}

impl DerefMut for TopLevelGuard<'_> {
    fn deref_mut(&mut self) -> &mut ScopeContext {
        self.ctx
    }
}

impl Drop for TopLevelGuard<'_> {
    fn drop(&mut self) {
        self.ctx.pop_from_top_level(self.tree);
    }
}
