use rand::Rng;

/// Shuffles `items` in place with an unbiased Fisher–Yates pass.
///
/// Walks `i` from the last index down to 1 and swaps it with a uniformly drawn
/// `j` in `0..=i`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns a uniformly shuffled copy of `items`; the input is left untouched.
#[must_use]
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}
