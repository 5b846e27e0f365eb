//! Base-class information (binfo) nodes.
//!
//! Every class type owns a binfo describing itself (`TYPE_BINFO`); its
//! `bases` are the binfos of the direct base classes, in declaration order.
//! A base binfo points back at the binfo of the class that inherits from it
//! (`BINFO_INHERITANCE_CHAIN`). Deeper bases are reached through the base
//! class's own binfo, so the hierarchy below a base is shared, not copied.

use bitflags::bitflags;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use crate::check::{ContractViolation, OrViolation};
use crate::node::{Node, Payload};
use crate::stack::ensure_sufficient_stack;
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

const BINFO: KindSet = KindSet(&[NodeKind::Binfo]);

bitflags! {
    /// Binfo flags (`BINFO_FLAG_*` and the named ones).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct BinfoFlags: u8 {
        /// Inherited virtually (`BINFO_VIRTUAL_P`).
        const VIRTUAL = 1 << 0;
        /// Primary base of the class that inherits it (`BINFO_PRIMARY_P`).
        const PRIMARY = 1 << 1;
        /// Its own primary base was claimed elsewhere (`BINFO_LOST_PRIMARY_P`).
        const LOST_PRIMARY = 1 << 2;
        /// Scratch mark for vtable walks (`BINFO_VTABLE_PATH_MARKED`).
        const VTABLE_PATH_MARKED = 1 << 3;
        /// A new vtable is needed for this base (`BINFO_NEW_VTABLE_MARKED`).
        const NEW_VTABLE_MARKED = 1 << 4;
        /// Base type depends on a template parameter (`BINFO_DEPENDENT_BASE_P`).
        const DEPENDENT_BASE = 1 << 5;
    }
}

/// Access of a base or member.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// One entry of `BINFO_VIRTUALS`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct VirtualEntry {
    /// `this` adjustment for the final overrider (`BV_DELTA`).
    pub delta: i64,
    /// `BV_VCALL_INDEX`; `None` until assigned.
    pub vcall_index: Option<u32>,
    /// The final overrider (`BV_FN`).
    pub function: NodeId,
}

/// A base to attach with [`Tree::xref_basetypes`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BaseSpec {
    pub class: NodeId,
    pub access: Access,
    pub is_virtual: bool,
}

/// Payload of a binfo node.
#[derive(Clone, Debug)]
pub struct BaseInfo {
    /// `BINFO_TYPE`.
    pub(crate) ty: NodeId,
    pub(crate) flags: BinfoFlags,
    /// Access of the inheritance that introduced this base.
    pub(crate) access: Access,
    /// `BINFO_OFFSET`, once laid out.
    pub(crate) offset: Option<u64>,
    /// `BINFO_BASE_BINFOS`.
    pub(crate) bases: SmallVec<[NodeId; 2]>,
    /// `BINFO_INHERITANCE_CHAIN`.
    pub(crate) inheritance: Option<NodeId>,
    /// `BINFO_VTABLE`.
    pub(crate) vtable: Option<NodeId>,
    /// `BINFO_VIRTUALS`.
    pub(crate) virtuals: Vec<VirtualEntry>,
}

impl BaseInfo {
    fn new(ty: NodeId) -> Self {
        BaseInfo {
            ty,
            flags: BinfoFlags::empty(),
            access: Access::Public,
            offset: None,
            bases: SmallVec::new(),
            inheritance: None,
            vtable: None,
            virtuals: Vec::new(),
        }
    }
}

impl Tree {
    fn push_binfo(&mut self, info: BaseInfo) -> NodeId {
        self.push(Node::new(NodeKind::Binfo, Span::DUMMY, Payload::Binfo(Box::new(info))))
    }

    /// Give a new class type its own binfo.
    pub(crate) fn init_class_binfo(&mut self, class: NodeId) {
        let binfo = self.push_binfo(BaseInfo::new(class));
        self.class_data_mut(class, "init_class_binfo").binfo = Some(binfo);
    }

    pub(crate) fn try_binfo(&self, id: NodeId, accessor: &'static str) -> Result<&BaseInfo, ContractViolation> {
        self.try_payload(id, BINFO, accessor, "base info", |payload| match payload {
            Payload::Binfo(info) => Some(&**info),
            _ => None,
        })
    }

    #[track_caller]
    fn binfo(&self, id: NodeId, accessor: &'static str) -> &BaseInfo {
        self.try_binfo(id, accessor).or_violation()
    }

    #[track_caller]
    fn binfo_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut BaseInfo {
        self.try_payload_mut(id, BINFO, accessor, "base info", |payload| match payload {
            Payload::Binfo(info) => Some(&mut **info),
            _ => None,
        })
        .or_violation()
    }

    /// Attach the direct bases of `class` (`xref_basetypes`).
    ///
    /// Marks the class diamond shaped when a base is reached along more
    /// than one path, and records repeated non-virtual bases. Bases are
    /// attached once: a class that already has bases, or whose virtual
    /// bases were laid out, is rejected.
    #[track_caller]
    #[tracing::instrument(level = "debug", skip_all, fields(%class))]
    pub fn xref_basetypes(&mut self, class: NodeId, bases: &[BaseSpec]) {
        let Some(class_binfo) = self.type_binfo(class) else {
            unreachable!("class types get their binfo at construction")
        };
        if !self.binfo(class_binfo, "xref_basetypes").bases.is_empty() || self.virtual_bases(class).is_some() {
            crate::check::violation(ContractViolation::VariantMismatch {
                accessor: "xref_basetypes",
                node: class,
                kind: self.kind(class),
                found: "class with its bases attached",
                expected: "class without bases",
            });
        }
        for spec in bases {
            let mut info = BaseInfo::new(self.type_main_variant(spec.class));
            info.flags.set(BinfoFlags::VIRTUAL, spec.is_virtual);
            info.access = spec.access;
            info.inheritance = Some(class_binfo);
            if self.type_dependent_cached(spec.class) == Some(true) {
                info.flags.insert(BinfoFlags::DEPENDENT_BASE);
            }
            let binfo = self.push_binfo(info);
            self.binfo_mut(class_binfo, "xref_basetypes").bases.push(binfo);
        }

        let mut seen = FxHashSet::default();
        let mut repeated_virtual = false;
        let mut repeated_plain = false;
        self.walk_bases(class, &mut |tree, binfo| {
            let ty = tree.binfo_type(binfo);
            if seen.insert(ty) {
                return true;
            }
            if tree.binfo_virtual_p(binfo) {
                repeated_virtual = true;
                // The shared subobject's own bases were counted on first visit.
                return false;
            }
            repeated_plain = true;
            true
        });
        let data = self.class_data_mut(class, "xref_basetypes");
        data.flags.set(super::ClassFlags::DIAMOND_SHAPED, repeated_virtual);
        data.flags.set(super::ClassFlags::REPEATED_BASE, repeated_plain);
        debug!(bases = bases.len(), repeated_virtual, repeated_plain, "attached bases");
    }

    /// Visit every base binfo reachable from `class`, depth first, left to
    /// right, in pre-order. Bases reached along several paths are visited
    /// once per path; `visit` returns whether to descend into a base.
    pub(crate) fn walk_bases(&self, class: NodeId, visit: &mut dyn FnMut(&Tree, NodeId) -> bool) {
        let Some(binfo) = self.type_binfo(class) else { return };
        for &base in &self.binfo(binfo, "walk_bases").bases {
            if visit(self, base) {
                let ty = self.binfo_type(base);
                ensure_sufficient_stack(|| self.walk_bases(ty, visit));
            }
        }
    }

    /// `TYPE_BINFO`: `None` for non-class types.
    #[track_caller]
    pub fn type_binfo(&self, class: NodeId) -> Option<NodeId> {
        if !KindSet::CLASS_TYPES.contains(self.kind(class)) {
            return None;
        }
        self.class_data(class, "type_binfo").binfo
    }

    /// `BINFO_TYPE`.
    #[track_caller]
    pub fn binfo_type(&self, binfo: NodeId) -> NodeId {
        self.binfo(binfo, "binfo_type").ty
    }

    /// `BINFO_BASE_BINFOS`.
    #[track_caller]
    pub fn binfo_base_binfos(&self, binfo: NodeId) -> &[NodeId] {
        &self.binfo(binfo, "binfo_base_binfos").bases
    }

    /// `BINFO_BASE_ACCESS`.
    #[track_caller]
    pub fn binfo_access(&self, binfo: NodeId) -> Access {
        self.binfo(binfo, "binfo_access").access
    }

    /// `BINFO_INHERITANCE_CHAIN`.
    #[track_caller]
    pub fn binfo_inheritance_chain(&self, binfo: NodeId) -> Option<NodeId> {
        self.binfo(binfo, "binfo_inheritance_chain").inheritance
    }

    #[track_caller]
    pub fn binfo_flags(&self, binfo: NodeId) -> BinfoFlags {
        self.binfo(binfo, "binfo_flags").flags
    }

    #[track_caller]
    pub fn set_binfo_flag(&mut self, binfo: NodeId, flag: BinfoFlags, value: bool) {
        self.binfo_mut(binfo, "set_binfo_flag").flags.set(flag, value);
    }

    /// `BINFO_VIRTUAL_P`.
    #[track_caller]
    pub fn binfo_virtual_p(&self, binfo: NodeId) -> bool {
        self.binfo_flags(binfo).contains(BinfoFlags::VIRTUAL)
    }

    /// `BINFO_PRIMARY_P`.
    #[track_caller]
    pub fn binfo_primary_p(&self, binfo: NodeId) -> bool {
        self.binfo_flags(binfo).contains(BinfoFlags::PRIMARY)
    }

    /// `BINFO_OFFSET`.
    #[track_caller]
    pub fn binfo_offset(&self, binfo: NodeId) -> Option<u64> {
        self.binfo(binfo, "binfo_offset").offset
    }

    #[track_caller]
    pub fn set_binfo_offset(&mut self, binfo: NodeId, offset: u64) {
        self.binfo_mut(binfo, "set_binfo_offset").offset = Some(offset);
    }

    /// `BINFO_VTABLE`.
    #[track_caller]
    pub fn binfo_vtable(&self, binfo: NodeId) -> Option<NodeId> {
        self.binfo(binfo, "binfo_vtable").vtable
    }

    #[track_caller]
    pub fn set_binfo_vtable(&mut self, binfo: NodeId, vtable: NodeId) {
        self.binfo_mut(binfo, "set_binfo_vtable").vtable = Some(vtable);
    }

    /// `BINFO_VIRTUALS`.
    #[track_caller]
    pub fn binfo_virtuals(&self, binfo: NodeId) -> &[VirtualEntry] {
        &self.binfo(binfo, "binfo_virtuals").virtuals
    }

    /// Append a virtual function entry; returns its vtable index.
    #[track_caller]
    #[allow(clippy::cast_possible_truncation, reason = "vtables stay far below u32::MAX entries")]
    pub fn add_binfo_virtual(&mut self, binfo: NodeId, entry: VirtualEntry) -> u32 {
        let virtuals = &mut self.binfo_mut(binfo, "add_binfo_virtual").virtuals;
        virtuals.push(entry);
        (virtuals.len() - 1) as u32
    }

    /// Set `BV_VCALL_INDEX` of entry `index`.
    #[track_caller]
    pub fn set_bv_vcall_index(&mut self, binfo: NodeId, index: usize, vcall_index: u32) {
        let len = self.binfo_virtuals(binfo).len();
        match self.binfo_mut(binfo, "set_bv_vcall_index").virtuals.get_mut(index) {
            Some(entry) => entry.vcall_index = Some(vcall_index),
            None => crate::check::violation(ContractViolation::OperandOutOfRange {
                accessor: "set_bv_vcall_index",
                node: binfo,
                kind: NodeKind::Binfo,
                index,
                len,
            }),
        }
    }

    /// Binfo for `base` within the hierarchy of `derived` (`lookup_base`),
    /// `derived`'s own binfo when they are the same class.
    #[track_caller]
    pub fn lookup_base(&self, derived: NodeId, base: NodeId) -> Option<NodeId> {
        let base = self.type_main_variant(base);
        let derived = self.type_main_variant(derived);
        if derived == base {
            return self.type_binfo(derived);
        }
        let mut found = None;
        self.walk_bases(derived, &mut |tree, binfo| {
            if found.is_none() && tree.binfo_type(binfo) == base {
                found = Some(binfo);
            }
            found.is_none()
        });
        found
    }

    /// `DERIVED_FROM_P (parent, ty)`: `ty` is `parent` or derives from it.
    #[track_caller]
    pub fn derived_from_p(&self, parent: NodeId, ty: NodeId) -> bool {
        KindSet::CLASS_TYPES.contains(self.kind(ty))
            && KindSet::CLASS_TYPES.contains(self.kind(parent))
            && self.lookup_base(ty, parent).is_some()
    }

    /// Virtual bases below `class` in post-order, depth first, left to
    /// right. `seen` keeps each one to its first position.
    pub(crate) fn collect_virtual_bases(&self, class: NodeId, out: &mut Vec<NodeId>, seen: &mut FxHashSet<NodeId>) {
        let Some(binfo) = self.type_binfo(class) else { return };
        for &base in &self.binfo(binfo, "collect_virtual_bases").bases {
            let ty = self.binfo_type(base);
            ensure_sufficient_stack(|| self.collect_virtual_bases(ty, out, seen));
            if self.binfo_virtual_p(base) && seen.insert(ty) {
                out.push(ty);
            }
        }
    }
}
