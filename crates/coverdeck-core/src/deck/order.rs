use rand::seq::SliceRandom;
use rand::Rng;

/// Carousel traversal order: a permutation of deck indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOrder {
    slots: Vec<usize>,
}

impl NavigationOrder {
    /// Identity order over `len` items
    pub fn identity(len: usize) -> Self {
        Self {
            slots: (0..len).collect(),
        }
    }

    /// Uniformly shuffled order over `len` items (Fisher-Yates)
    pub fn shuffled<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut order = Self::identity(len);
        order.slots.shuffle(rng);
        order
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Deck index shown at `slot`
    pub fn deck_index(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    /// Slot that shows deck index `deck_index`
    pub fn slot_of(&self, deck_index: usize) -> Option<usize> {
        self.slots.iter().position(|&i| i == deck_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [0usize, 1, 2, 5, 33] {
            let order = NavigationOrder::shuffled(n, &mut rng);
            let mut seen: Vec<usize> = order.iter().collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_slot_lookup_roundtrip() {
        let mut rng = StdRng::seed_from_u64(7);
        let order = NavigationOrder::shuffled(6, &mut rng);
        for slot in 0..6 {
            let idx = order.deck_index(slot).unwrap();
            assert_eq!(order.slot_of(idx), Some(slot));
        }
        assert_eq!(order.deck_index(6), None);
        assert_eq!(order.slot_of(99), None);
    }
}
