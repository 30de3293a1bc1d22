//! Hashing helpers for cache slot indexing.

/// Folds the identities of two operand handles into one slot hash.
///
/// The operation caches are direct-mapped over an *ordered* pair of node
/// identities, so the fold must keep `(a, b)` and `(b, a)` apart: the two
/// orientations of a non-commutative operation own distinct slots. Szudzik
/// pairing has that property while staying collision-free for small inputs:
///
/// ```text
/// pair(a, b) = max² + a        when a < b
///              max² + a + b    otherwise
/// ```
///
/// Node identities are pointer values, far past the bijective range of the
/// pairing, so the arithmetic wraps; this is a hash, not an encoding.
pub fn pair_ids(a: u64, b: u64) -> u64 {
    let max = a.max(b);
    let square = max.wrapping_mul(max);
    if a < b {
        square.wrapping_add(a)
    } else {
        square.wrapping_add(a).wrapping_add(b)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_orientation_matters() {
        // cache(L, R) and cache(R, L) are separate slots.
        assert_ne!(pair_ids(1, 2), pair_ids(2, 1));
        assert_ne!(pair_ids(0, 7), pair_ids(7, 0));
    }

    #[test]
    fn test_zero_id_pairs_with_anything() {
        // The null handle hashes as identity 0 and must still separate
        // cleanly from non-null operands.
        assert_ne!(pair_ids(0, 3), pair_ids(3, 3));
        assert_ne!(pair_ids(0, 0), pair_ids(0, 1));
    }

    #[test]
    fn test_no_collisions_below_wrap() {
        // Below the wrapping threshold the pairing is a bijection, so a
        // dense block of ordered pairs must hash without collisions.
        let mut seen = HashSet::new();
        for a in 0..16u64 {
            for b in 0..16u64 {
                assert!(seen.insert(pair_ids(a, b)), "collision at ({}, {})", a, b);
            }
        }
    }
}
