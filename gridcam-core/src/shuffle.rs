use rand::Rng;

/// In-place Fisher-Yates shuffle: walk from the last element backward,
/// swapping each index with a uniformly chosen index at or below it.
/// Every permutation is equally likely given an unbiased `rng`. Empty and
/// singleton slices are no-ops.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
