//! Type comparison (`comptypes` and its wrappers).
//!
//! Strict comparison of two types with canonical types is a single id
//! comparison. Everything else, including every relaxed mode, compares
//! structurally.
//!
//! Base/derived relaxation works on class types and reaches through one
//! pointer or reference level, so `Derived*` and `Base*` relate the same
//! way `Derived` and `Base` do. Qualifiers always have to match.

use bitflags::bitflags;
use tracing::debug;

use crate::stack::ensure_sufficient_stack;
use crate::options::TmplArgsMatch;
use crate::types::TypeShape;
use crate::{NodeId, NodeKind, Tree};

bitflags! {
    /// Comparison mode (`COMPARE_*`). The empty set is strict comparison.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CompareMode: u8 {
        /// The first type may be a class derived from the second.
        const BASE = 1 << 0;
        /// The second type may be a class derived from the first.
        const DERIVED = 1 << 1;
        /// Comparing a redeclaration: an array of unknown bound matches one
        /// of known bound.
        const REDECLARATION = 1 << 2;
        /// Ignore canonical types.
        const STRUCTURAL = 1 << 3;
    }
}

impl CompareMode {
    pub const STRICT: CompareMode = CompareMode::empty();

    /// Mode for the components of a compound type: the class relaxations
    /// only apply one level down.
    fn component(self) -> CompareMode {
        self - (CompareMode::BASE | CompareMode::DERIVED)
    }
}

impl Tree {
    /// `comptypes`.
    #[track_caller]
    pub fn comptypes(&self, t1: NodeId, t2: NodeId, mode: CompareMode) -> bool {
        let same = self.comptypes_at(t1, t2, mode, true);
        debug!(%t1, %t2, ?mode, same, "compared types");
        same
    }

    /// `same_type_p`.
    #[track_caller]
    pub fn same_type(&self, t1: NodeId, t2: NodeId) -> bool {
        self.comptypes(t1, t2, CompareMode::STRICT)
    }

    /// `same_type_ignoring_top_level_qualifiers_p`.
    #[track_caller]
    pub fn same_type_ignoring_top_level_qualifiers(&self, t1: NodeId, t2: NodeId) -> bool {
        self.same_type(self.type_main_variant(t1), self.type_main_variant(t2))
    }

    /// `same_or_base_type_p`: `base` is `derived` or a base class of it.
    #[track_caller]
    pub fn same_or_base_type(&self, base: NodeId, derived: NodeId) -> bool {
        self.comptypes(derived, base, CompareMode::BASE)
    }

    /// `comp_template_args`: element-wise comparison of two argument
    /// vectors. Type arguments compare as types, others by identity.
    #[track_caller]
    pub fn comp_template_args(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        let (a, b) = (self.tree_vec(a), self.tree_vec(b));
        a.len() == b.len()
            && a.iter().zip(b).all(|(&x, &y)| match (x, y) {
                (Some(x), Some(y)) => self.template_args_equal(x, y),
                (None, None) => true,
                _ => false,
            })
    }

    /// [`comp_template_args`](Self::comp_template_args) over the levels
    /// `how` selects.
    #[track_caller]
    pub fn comp_template_args_matching(&self, a: NodeId, b: NodeId, how: TmplArgsMatch) -> bool {
        match how {
            TmplArgsMatch::Exact => self.comp_template_args(a, b),
            TmplArgsMatch::Innermost => match (self.innermost_template_args(a), self.innermost_template_args(b)) {
                (Some(a), Some(b)) => self.comp_template_args(a, b),
                (None, None) => true,
                _ => false,
            },
        }
    }

    fn template_args_equal(&self, x: NodeId, y: NodeId) -> bool {
        if x == y {
            return true;
        }
        let (kx, ky) = (self.kind(x), self.kind(y));
        if kx.is_type() && ky.is_type() {
            return self.comptypes_at(x, y, CompareMode::STRICT, false);
        }
        if kx == NodeKind::TreeVec && ky == NodeKind::TreeVec {
            return ensure_sufficient_stack(|| self.comp_template_args(x, y));
        }
        false
    }

    fn comptypes_at(&self, t1: NodeId, t2: NodeId, mode: CompareMode, top: bool) -> bool {
        if t1 == t2 {
            return true;
        }
        if t1.is_error() || t2.is_error() {
            return false;
        }
        if mode.is_empty() {
            if let (Some(c1), Some(c2)) = (self.type_canonical(t1), self.type_canonical(t2)) {
                return c1 == c2;
            }
        }
        ensure_sufficient_stack(|| self.structural_comptypes(t1, t2, mode, top))
    }

    fn structural_comptypes(&self, t1: NodeId, t2: NodeId, mode: CompareMode, top: bool) -> bool {
        if self.kind(t1) != self.kind(t2) || self.type_quals(t1) != self.type_quals(t2) {
            return false;
        }
        let (m1, m2) = (self.type_main_variant(t1), self.type_main_variant(t2));
        if m1 == m2 {
            return true;
        }
        let inner = mode.component();
        let same = |a: Option<NodeId>, b: Option<NodeId>, mode: CompareMode, top: bool| match (a, b) {
            (Some(a), Some(b)) => self.comptypes_at(a, b, mode, top),
            (None, None) => true,
            _ => false,
        };
        let parms_equal = |p1: &[NodeId], p2: &[NodeId]| {
            p1.len() == p2.len() && p1.iter().zip(p2).all(|(&a, &b)| self.comptypes_at(a, b, inner, false))
        };

        match (self.type_shape(m1), self.type_shape(m2)) {
            (TypeShape::Leaf, TypeShape::Leaf) => true,
            (
                TypeShape::Integer { precision: p1, unsigned: u1 },
                TypeShape::Integer { precision: p2, unsigned: u2 },
            ) => p1 == p2 && u1 == u2,
            (TypeShape::Real { precision: p1 }, TypeShape::Real { precision: p2 }) => p1 == p2,
            (TypeShape::Pointer, TypeShape::Pointer) => {
                let pointee_mode = if top { mode } else { inner };
                same(self.ty(m1), self.ty(m2), pointee_mode, false)
            }
            (TypeShape::Reference { rvalue: r1 }, TypeShape::Reference { rvalue: r2 }) => {
                let referent_mode = if top { mode } else { inner };
                r1 == r2 && same(self.ty(m1), self.ty(m2), referent_mode, false)
            }
            (TypeShape::Offset { basetype: b1 }, TypeShape::Offset { basetype: b2 }) => {
                self.comptypes_at(*b1, *b2, inner, false) && same(self.ty(m1), self.ty(m2), inner, false)
            }
            (TypeShape::Array { length: l1 }, TypeShape::Array { length: l2 }) => {
                let bounds = l1 == l2 || (mode.contains(CompareMode::REDECLARATION) && (l1.is_none() || l2.is_none()));
                bounds && same(self.ty(m1), self.ty(m2), inner, false)
            }
            (TypeShape::Function { parms: p1 }, TypeShape::Function { parms: p2 }) => {
                same(self.ty(m1), self.ty(m2), inner, false) && parms_equal(p1, p2)
            }
            (
                TypeShape::Method { basetype: b1, parms: p1 },
                TypeShape::Method { basetype: b2, parms: p2 },
            ) => {
                self.comptypes_at(*b1, *b2, inner, false)
                    && same(self.ty(m1), self.ty(m2), inner, false)
                    && parms_equal(p1, p2)
            }
            (TypeShape::Class(_), TypeShape::Class(_)) => {
                (mode.contains(CompareMode::BASE) && self.derived_from_p(m2, m1))
                    || (mode.contains(CompareMode::DERIVED) && self.derived_from_p(m1, m2))
            }
            (TypeShape::TemplateParm { index: i1 }, TypeShape::TemplateParm { index: i2 }) => {
                self.same_template_parm(*i1, *i2)
            }
            (
                TypeShape::BoundTemplateTemplateParm { index: i1, info: n1 },
                TypeShape::BoundTemplateTemplateParm { index: i2, info: n2 },
            ) => {
                self.same_template_parm(*i1, *i2)
                    && match (self.ti_args(*n1), self.ti_args(*n2)) {
                        (Some(a1), Some(a2)) => self.comp_template_args(a1, a2),
                        (None, None) => true,
                        _ => false,
                    }
            }
            (
                TypeShape::Typename { context: c1, name: n1 },
                TypeShape::Typename { context: c2, name: n2 },
            ) => n1 == n2 && self.comptypes_at(*c1, *c2, inner, false),
            (
                TypeShape::Decltype { expr: e1, id_expression: i1 },
                TypeShape::Decltype { expr: e2, id_expression: i2 },
            ) => e1 == e2 && i1 == i2,
            (TypeShape::PackExpansion { pattern: p1 }, TypeShape::PackExpansion { pattern: p2 }) => {
                self.comptypes_at(*p1, *p2, inner, false)
            }
            // Distinct enumerations are distinct types.
            _ => false,
        }
    }

    fn same_template_parm(&self, i1: NodeId, i2: NodeId) -> bool {
        self.template_parm_level(i1) == self.template_parm_level(i2)
            && self.template_parm_idx(i1) == self.template_parm_idx(i2)
            && self.template_parm_parameter_pack(i1) == self.template_parm_parameter_pack(i2)
    }
}

#[cfg(test)]
mod tests;
