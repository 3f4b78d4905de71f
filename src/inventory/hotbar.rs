use rand::seq::SliceRandom;
use rand::Rng;

use crate::inventory::Inventory;

/// Hotbar positions free for temporary promotion; 0 and 8 are reserved
pub const TEMP_HOTBAR_SLOTS: std::ops::Range<usize> = 1..8;

/// Pick a hotbar position in 1-7 to host a promoted item.
///
/// Empty allowed slots are preferred. When none is empty, any allowed slot
/// is used and its item gets displaced. Returns `None` only when every
/// position is disallowed.
pub fn temp_hotbar_slot<R, F>(inventory: &Inventory, disallowed: F, rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> bool,
{
    let mut candidates: Vec<usize> = TEMP_HOTBAR_SLOTS
        .filter(|&i| inventory.is_empty_slot(i) && !disallowed(i))
        .collect();
    if candidates.is_empty() {
        candidates = TEMP_HOTBAR_SLOTS.filter(|&i| !disallowed(i)).collect();
    }
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemStack;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn full_hotbar() -> Inventory {
        let mut inv = Inventory::new();
        for i in 0..9 {
            inv.set_slot(i, Some(ItemStack::new("stick", 1)));
        }
        inv
    }

    #[test]
    fn test_prefers_empty_slot() {
        let mut inv = full_hotbar();
        inv.set_slot(5, None);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            assert_eq!(temp_hotbar_slot(&inv, |_| false, &mut rng), Some(5));
        }
    }

    #[test]
    fn test_skips_disallowed_empty_slot() {
        let mut inv = full_hotbar();
        inv.set_slot(5, None);
        inv.set_slot(6, None);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            assert_eq!(temp_hotbar_slot(&inv, |i| i == 5, &mut rng), Some(6));
        }
    }

    #[test]
    fn test_displaces_when_all_occupied() {
        let inv = full_hotbar();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let slot = temp_hotbar_slot(&inv, |_| false, &mut rng).unwrap();
            assert!(TEMP_HOTBAR_SLOTS.contains(&slot));
        }
    }

    #[test]
    fn test_reserved_slots_never_chosen() {
        let inv = Inventory::new();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let slot = temp_hotbar_slot(&inv, |_| false, &mut rng).unwrap();
            assert!(slot != 0 && slot != 8);
        }
    }

    #[test]
    fn test_exhaustion() {
        let mut rng = StdRng::seed_from_u64(1);

        // occupied and disallowed
        assert_eq!(temp_hotbar_slot(&full_hotbar(), |_| true, &mut rng), None);
        // empty but disallowed
        assert_eq!(temp_hotbar_slot(&Inventory::new(), |_| true, &mut rng), None);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let inv = Inventory::new();
        let a = temp_hotbar_slot(&inv, |_| false, &mut StdRng::seed_from_u64(99));
        let b = temp_hotbar_slot(&inv, |_| false, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
