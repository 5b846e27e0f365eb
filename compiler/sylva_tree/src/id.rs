//! Node handles.
//!
//! Every node lives in the [`Tree`](crate::Tree) arena and is addressed by a
//! 32-bit [`NodeId`]. Handles are `Copy`; identity comparison is index
//! comparison. A small set of nodes is created by [`Tree::new`](crate::Tree::new)
//! at fixed indices so that the shared singletons (`error_mark`, the builtin
//! types, the special constructor/destructor names) are plain constants.

use std::fmt;

/// A 32-bit index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    // === Singletons (indices 0-10) ===

    /// The error node. Stands in for anything that failed to parse or check.
    pub const ERROR_MARK: Self = Self(0);
    /// `void`.
    pub const VOID_TYPE: Self = Self(1);
    /// `bool`.
    pub const BOOL_TYPE: Self = Self(2);
    /// `char` (8-bit, signed).
    pub const CHAR_TYPE: Self = Self(3);
    /// `int` (32-bit, signed).
    pub const INT_TYPE: Self = Self(4);
    /// `unsigned int`.
    pub const UNSIGNED_TYPE: Self = Self(5);
    /// `long` (64-bit, signed).
    pub const LONG_TYPE: Self = Self(6);
    /// `size_t` (64-bit, unsigned).
    pub const SIZE_TYPE: Self = Self(7);
    /// `double`.
    pub const DOUBLE_TYPE: Self = Self(8);
    /// `decltype(nullptr)`.
    pub const NULLPTR_TYPE: Self = Self(9);
    /// Type of an unresolved overload set.
    pub const UNKNOWN_TYPE: Self = Self(10);

    // === Special identifiers (indices 11-22) ===

    /// Name of the maybe-in-charge constructor.
    pub const CTOR_IDENTIFIER: Self = Self(11);
    /// Name of the complete-object constructor clone.
    pub const COMPLETE_CTOR_IDENTIFIER: Self = Self(12);
    /// Name of the base-object constructor clone.
    pub const BASE_CTOR_IDENTIFIER: Self = Self(13);
    /// Name of the maybe-in-charge destructor.
    pub const DTOR_IDENTIFIER: Self = Self(14);
    /// Name of the complete-object destructor clone.
    pub const COMPLETE_DTOR_IDENTIFIER: Self = Self(15);
    /// Name of the base-object destructor clone.
    pub const BASE_DTOR_IDENTIFIER: Self = Self(16);
    /// Name of the deleting destructor clone.
    pub const DELETING_DTOR_IDENTIFIER: Self = Self(17);
    /// Generic name shared by all conversion operators.
    pub const CONV_OP_IDENTIFIER: Self = Self(18);
    /// `this`.
    pub const THIS_IDENTIFIER: Self = Self(19);
    /// The hidden in-charge parameter.
    pub const IN_CHARGE_IDENTIFIER: Self = Self(20);
    /// The hidden VTT parameter.
    pub const VTT_PARM_IDENTIFIER: Self = Self(21);
    /// Name given to anonymous aggregates.
    pub const ANON_IDENTIFIER: Self = Self(22);

    /// Number of nodes created by `Tree::new` before any client node.
    pub const PREDEFINED_COUNT: u32 = 23;

    /// Create a handle from a raw index.
    ///
    /// The index is not validated here; the arena rejects unknown ids on access.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position in the arena's node vector.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this handle names one of the predefined singletons.
    #[inline]
    pub const fn is_predefined(self) -> bool {
        self.0 < Self::PREDEFINED_COUNT
    }

    /// Check if this is the error node.
    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR_MARK.0
    }

    /// Check if this is one of the constructor/destructor names
    /// (`IDENTIFIER_CDTOR_P` restricted to the predefined ones).
    #[inline]
    pub const fn is_cdtor_identifier(self) -> bool {
        self.0 >= Self::CTOR_IDENTIFIER.0 && self.0 <= Self::DELETING_DTOR_IDENTIFIER.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_ids_are_dense() {
        assert_eq!(NodeId::ERROR_MARK.raw(), 0);
        assert_eq!(NodeId::UNKNOWN_TYPE.raw(), 10);
        assert_eq!(NodeId::CTOR_IDENTIFIER.raw(), 11);
        assert_eq!(NodeId::ANON_IDENTIFIER.raw() + 1, NodeId::PREDEFINED_COUNT);
    }

    #[test]
    fn cdtor_identifier_range() {
        assert!(NodeId::CTOR_IDENTIFIER.is_cdtor_identifier());
        assert!(NodeId::DELETING_DTOR_IDENTIFIER.is_cdtor_identifier());
        assert!(!NodeId::CONV_OP_IDENTIFIER.is_cdtor_identifier());
        assert!(!NodeId::INT_TYPE.is_cdtor_identifier());
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(format!("{}", NodeId::from_raw(42)), "#42");
        assert_eq!(format!("{:?}", NodeId::from_raw(42)), "NodeId(42)");
    }
}
