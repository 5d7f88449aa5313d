use rand::Rng;

/// In-place Fisher-Yates shuffle; every permutation is equally likely.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Pick `amount` items uniformly without replacement.
///
/// Runs only the first `amount` steps of a Fisher-Yates pass over the
/// indices, so the order of the returned items is random as well.
pub fn sample<T: Clone, R: Rng>(items: &[T], amount: usize, rng: &mut R) -> Vec<T> {
    let amount = amount.min(items.len());
    let mut indices: Vec<usize> = (0..items.len()).collect();

    for i in 0..amount {
        let j = rng.random_range(i..indices.len());
        indices.swap(i, j);
    }

    indices[..amount].iter().map(|&i| items[i].clone()).collect()
}
