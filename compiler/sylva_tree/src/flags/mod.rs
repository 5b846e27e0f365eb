//! Flag banks and the partitioning discipline.
//!
//! Every node has up to three small banks of boolean flags:
//!
//! | Bank | Width | Present on |
//! |------|-------|------------|
//! | [`Bank::Tree`] | 7 | almost every kind |
//! | [`Bank::Type`] | 7 | type kinds |
//! | [`Bank::Decl`] | 9 | declaration kinds |
//!
//! The meaning of a slot depends on the node kind alone. Instead of one
//! shared bit-word per bank, each bank is a sum type ([`TreeLangFlags`],
//! [`TypeLangFlags`], [`DeclLangFlags`]) with one variant per *flag family*.
//! A family is a `bitflags` set naming the slots for a group of kinds, so a
//! flag can only be spelled through the family of the node's own kind.
//! Reading `OverloadFlags::HIDDEN` on a call expression is a contract
//! violation, not a silent read of `CALL_EXPR_ORDERED_ARGS`.
//!
//! Slot indices are kept: they document which flags share storage in the
//! classic layout and they bound each family to its bank width. The full
//! kind × slot → meaning map is available at runtime through
//! [`property_table`] and is what the collision tests run against.

use std::fmt;

use bitflags::Flags;

use crate::node::{Node, Payload};
use crate::NodeKind;

/// Declares a flag family: a `bitflags` set plus the kinds it applies to
/// and the bank variant that stores it.
macro_rules! lang_flags {
    (
        $(#[$outer:meta])*
        pub struct $name:ident in $storage:ident::$variant:ident for [$($kind:ident),+ $(,)?] {
            $(
                $(#[$($inner:tt)*])*
                const $flag:ident = $index:literal;
            )+
        }
    ) => {
        bitflags::bitflags! {
            $(#[$outer])*
            #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
            pub struct $name: u16 {
                $(
                    $(#[$($inner)*])*
                    const $flag = 1 << $index;
                )+
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl $crate::flags::LangFlagSet for $name {
            type Storage = $storage;
            const FAMILY: &'static str = stringify!($name);
            const KINDS: &'static [$crate::NodeKind] = &[$($crate::NodeKind::$kind),+];

            fn project(storage: &$storage) -> Option<Self> {
                match storage {
                    $storage::$variant(flags) => Some(*flags),
                    _ => None,
                }
            }

            fn project_mut(storage: &mut $storage) -> Option<&mut Self> {
                match storage {
                    $storage::$variant(flags) => Some(flags),
                    _ => None,
                }
            }
        }
    };
}

/// Declares a bank: the sum type over its families, with zero-initialisation
/// per kind and the property-table hook.
macro_rules! flag_bank {
    (
        $(#[$outer:meta])*
        pub enum $storage:ident {
            $( $variant:ident($family:ident), )+
        }
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
        pub enum $storage {
            /// The node's kind has no flags in this bank.
            #[default]
            Unused,
            $( $variant($family), )+
        }

        impl $storage {
            /// Zeroed bank for a freshly built node of `kind`.
            pub fn for_kind(kind: $crate::NodeKind) -> Self {
                $(
                    if <$family as $crate::flags::LangFlagSet>::KINDS.contains(&kind) {
                        return Self::$variant($family::empty());
                    }
                )+
                Self::Unused
            }

            /// Name of the family stored here, `None` for an unused bank.
            pub fn family(&self) -> Option<&'static str> {
                match self {
                    Self::Unused => None,
                    $( Self::$variant(_) => Some(<$family as $crate::flags::LangFlagSet>::FAMILY), )+
                }
            }

            /// Raw slot bits, for dumps.
            pub fn bits(&self) -> u16 {
                match self {
                    Self::Unused => 0,
                    $( Self::$variant(flags) => flags.bits(), )+
                }
            }

            pub(crate) fn describe(table: &mut Vec<$crate::flags::FlagSlot>) {
                $( $crate::flags::describe_family::<$family>(table); )+
            }
        }
    };
}

mod decl;
mod tree;
mod types;

pub use decl::*;
pub use tree::*;
pub use types::*;

/// Which of the three banks a family lives in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Bank {
    /// Node-generic flags (`TREE_LANG_FLAG_*`).
    Tree,
    /// Type flags (`TYPE_LANG_FLAG_*`).
    Type,
    /// Declaration flags (`DECL_LANG_FLAG_*`).
    Decl,
}

impl Bank {
    /// Number of slots in the bank.
    pub const fn width(self) -> u8 {
        match self {
            Bank::Tree | Bank::Type => 7,
            Bank::Decl => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Bank::Tree => "tree",
            Bank::Type => "type",
            Bank::Decl => "decl",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage for one bank on a node.
pub trait BankStorage: Sized + 'static {
    const BANK: Bank;

    /// The bank on `node`, if the node's payload carries one.
    fn locate(node: &Node) -> Option<&Self>;

    fn locate_mut(node: &mut Node) -> Option<&mut Self>;
}

/// A flag family: named slots of one bank for a fixed set of kinds.
pub trait LangFlagSet: Flags<Bits = u16> + Copy + fmt::Debug + 'static {
    type Storage: BankStorage;

    /// Type name of the family, for reports.
    const FAMILY: &'static str;

    /// Kinds whose bank holds this family.
    const KINDS: &'static [NodeKind];

    /// Current flags if `storage` holds this family.
    fn project(storage: &Self::Storage) -> Option<Self>;

    fn project_mut(storage: &mut Self::Storage) -> Option<&mut Self>;
}

impl BankStorage for TreeLangFlags {
    const BANK: Bank = Bank::Tree;

    fn locate(node: &Node) -> Option<&Self> {
        Some(&node.flags)
    }

    fn locate_mut(node: &mut Node) -> Option<&mut Self> {
        Some(&mut node.flags)
    }
}

impl BankStorage for TypeLangFlags {
    const BANK: Bank = Bank::Type;

    fn locate(node: &Node) -> Option<&Self> {
        match &node.payload {
            Payload::Type(data) => Some(&data.lang_flags),
            _ => None,
        }
    }

    fn locate_mut(node: &mut Node) -> Option<&mut Self> {
        match &mut node.payload {
            Payload::Type(data) => Some(&mut data.lang_flags),
            _ => None,
        }
    }
}

impl BankStorage for DeclLangFlags {
    const BANK: Bank = Bank::Decl;

    fn locate(node: &Node) -> Option<&Self> {
        match &node.payload {
            Payload::Decl(data) => Some(&data.lang_flags),
            _ => None,
        }
    }

    fn locate_mut(node: &mut Node) -> Option<&mut Self> {
        match &mut node.payload {
            Payload::Decl(data) => Some(&mut data.lang_flags),
            _ => None,
        }
    }
}

/// One row of the property table.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FlagSlot {
    pub bank: Bank,
    /// Slot index inside the bank.
    pub index: u8,
    /// Number of slots the flag spans (1 for every boolean flag).
    pub span: u8,
    pub family: &'static str,
    pub name: &'static str,
    pub kinds: &'static [NodeKind],
}

pub(crate) fn describe_family<F: LangFlagSet>(table: &mut Vec<FlagSlot>) {
    for flag in F::FLAGS {
        let bits = flag.value().bits();
        table.push(FlagSlot {
            bank: <F::Storage as BankStorage>::BANK,
            index: u8::try_from(bits.trailing_zeros()).unwrap_or(u8::MAX),
            span: u8::try_from(bits.count_ones()).unwrap_or(u8::MAX),
            family: F::FAMILY,
            name: flag.name(),
            kinds: F::KINDS,
        });
    }
}

/// The complete kind × slot → meaning map of all three banks.
///
/// Generated from the family definitions, so it cannot drift from the
/// storage it documents.
pub fn property_table() -> Vec<FlagSlot> {
    let mut table = Vec::new();
    TreeLangFlags::describe(&mut table);
    TypeLangFlags::describe(&mut table);
    DeclLangFlags::describe(&mut table);
    table
}

/// Meaning of slot `index` of `bank` on nodes of `kind`, if any.
pub fn flag_meaning(kind: NodeKind, bank: Bank, index: u8) -> Option<&'static str> {
    property_table()
        .into_iter()
        .find(|slot| slot.bank == bank && slot.index == index && slot.kinds.contains(&kind))
        .map(|slot| slot.name)
}

/// Family name used by `kind` in `bank`.
pub fn family_for(kind: NodeKind, bank: Bank) -> Option<&'static str> {
    match bank {
        Bank::Tree => TreeLangFlags::for_kind(kind).family(),
        Bank::Type => TypeLangFlags::for_kind(kind).family(),
        Bank::Decl => DeclLangFlags::for_kind(kind).family(),
    }
}

#[cfg(test)]
mod tests;
