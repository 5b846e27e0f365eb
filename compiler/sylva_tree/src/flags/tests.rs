use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

const BANKS: [Bank; 3] = [Bank::Tree, Bank::Type, Bank::Decl];

fn slots_for(table: &[FlagSlot], kind: NodeKind, bank: Bank) -> Vec<FlagSlot> {
    table
        .iter()
        .filter(|slot| slot.bank == bank && slot.kinds.contains(&kind))
        .copied()
        .collect()
}

#[test]
fn no_same_kind_collision() {
    let table = property_table();
    for &kind in NodeKind::ALL {
        for bank in BANKS {
            let mut seen: FxHashMap<u8, &'static str> = FxHashMap::default();
            for slot in slots_for(&table, kind, bank) {
                if let Some(previous) = seen.insert(slot.index, slot.name) {
                    panic!(
                        "{kind}: {bank} slot {} claimed by both {previous} and {}",
                        slot.index, slot.name
                    );
                }
            }
        }
    }
}

#[test]
fn every_flag_is_one_slot_inside_its_bank() {
    for slot in property_table() {
        assert_eq!(slot.span, 1, "{}::{}", slot.family, slot.name);
        assert!(
            slot.index < slot.bank.width(),
            "{}::{} at {} exceeds {} bank width",
            slot.family,
            slot.name,
            slot.index,
            slot.bank
        );
    }
}

#[test]
fn at_most_one_family_per_kind_and_bank() {
    let table = property_table();
    for &kind in NodeKind::ALL {
        for bank in BANKS {
            let families: FxHashSet<_> = slots_for(&table, kind, bank)
                .iter()
                .map(|slot| slot.family)
                .collect();
            assert!(families.len() <= 1, "{kind} has {families:?} in the {bank} bank");
        }
    }
}

#[test]
fn storage_variant_matches_table() {
    let table = property_table();
    for &kind in NodeKind::ALL {
        for bank in BANKS {
            let from_table = slots_for(&table, kind, bank).first().map(|slot| slot.family);
            assert_eq!(family_for(kind, bank), from_table, "{kind} in {bank} bank");
        }
    }
}

#[test]
fn type_bank_covers_exactly_the_type_kinds() {
    for &kind in NodeKind::ALL {
        assert_eq!(
            family_for(kind, Bank::Type).is_some(),
            kind.is_type(),
            "{kind}"
        );
    }
}

#[test]
fn decl_bank_covers_exactly_the_decl_kinds() {
    for &kind in NodeKind::ALL {
        assert_eq!(
            family_for(kind, Bank::Decl).is_some(),
            kind.is_decl(),
            "{kind}"
        );
    }
}

#[test]
fn every_decl_and_type_has_tree_flags() {
    for &kind in NodeKind::ALL.iter().filter(|k| k.is_decl() || k.is_type()) {
        assert!(family_for(kind, Bank::Tree).is_some(), "{kind}");
    }
}

#[test]
fn shared_slots_mean_different_things_on_unrelated_kinds() {
    assert_eq!(flag_meaning(NodeKind::Overload, Bank::Tree, 2), Some("HIDDEN"));
    assert_eq!(flag_meaning(NodeKind::IfStmt, Bank::Tree, 2), Some("CONSTEVAL"));
    assert_eq!(flag_meaning(NodeKind::TargetExpr, Bank::Tree, 2), Some("DIRECT_INIT"));
    assert_eq!(flag_meaning(NodeKind::CallExpr, Bank::Tree, 2), None);
    assert_eq!(flag_meaning(NodeKind::FieldDecl, Bank::Decl, 0), Some("MUTABLE"));
    assert_eq!(flag_meaning(NodeKind::UsingDecl, Bank::Decl, 0), Some("DEPENDENT"));
    assert_eq!(flag_meaning(NodeKind::RecordType, Bank::Type, 5), Some("CLASS_TYPE"));
    assert_eq!(flag_meaning(NodeKind::EnumeralType, Bank::Type, 5), Some("FIXED_UNDERLYING"));
}

#[test]
fn parm_slot_two_is_constraint_var_only() {
    assert_eq!(flag_meaning(NodeKind::ParmDecl, Bank::Decl, 2), Some("CONSTRAINT_VAR"));
    assert_eq!(flag_meaning(NodeKind::VarDecl, Bank::Decl, 2), Some("THIS_EXTERN"));
}

#[test]
fn for_kind_starts_zeroed() {
    for &kind in NodeKind::ALL {
        assert_eq!(TreeLangFlags::for_kind(kind).bits(), 0);
        assert_eq!(TypeLangFlags::for_kind(kind).bits(), 0);
        assert_eq!(DeclLangFlags::for_kind(kind).bits(), 0);
    }
}

#[test]
fn projection_rejects_other_families() {
    let bank = TreeLangFlags::for_kind(NodeKind::Overload);
    assert!(OverloadFlags::project(&bank).is_some());
    assert!(CallExprFlags::project(&bank).is_none());
    assert!(IdentifierFlags::project(&TreeLangFlags::Unused).is_none());
}

proptest! {
    #[test]
    fn truncated_bits_stay_inside_bank(bits in any::<u16>()) {
        let overload = OverloadFlags::from_bits_truncate(bits);
        prop_assert!(overload.bits() < 1 << Bank::Tree.width());
        let var = VarDeclFlags::from_bits_truncate(bits);
        prop_assert!(var.bits() < 1 << Bank::Decl.width());
        let class = ClassTypeFlags::from_bits_truncate(bits);
        prop_assert!(class.bits() < 1 << Bank::Type.width());
    }
}
