//! Tree-shape arithmetic for append-only Merkle trees
//!
//! An audit path for leaf `index` in a tree of `size` leaves splits into two
//! segments. The *inner* segment climbs the smallest complete subtree that
//! holds both `index` and the last leaf `size - 1`; the *border* segment then
//! folds in the left-hand siblings along the right border up to the root.
//! Both lengths follow from bit arithmetic alone.

/// Calculate the position of the most significant bit
pub fn bit_length(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        64 - n.leading_zeros()
    }
}

/// Number of inner proof hashes for `index` in a tree of `size` leaves
///
/// Requires `size > 0`.
pub fn inner_proof_size(index: u64, size: u64) -> usize {
    bit_length(index ^ (size - 1)) as usize
}

/// Split an inclusion proof into `(inner, border)` segment lengths
///
/// `inner + border` is the exact length of a valid inclusion proof for
/// `index` in a tree of `size` leaves. Requires `size > 0`.
pub fn decompose_inclusion_proof(index: u64, size: u64) -> (usize, usize) {
    let inner = inner_proof_size(index, size);
    let border = (index >> inner).count_ones() as usize;
    (inner, border)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(2), 2);
        assert_eq!(bit_length(3), 2);
        assert_eq!(bit_length(4), 3);
        assert_eq!(bit_length(255), 8);
        assert_eq!(bit_length(256), 9);
        assert_eq!(bit_length(u64::MAX), 64);
    }

    #[test]
    fn test_decompose_inclusion_proof() {
        // Single leaf: the leaf is the root
        assert_eq!(decompose_inclusion_proof(0, 1), (0, 0));

        // 0 ^ 1 = 1, one inner sibling
        assert_eq!(decompose_inclusion_proof(0, 2), (1, 0));

        // 1 ^ 1 = 0, so no inner hashes; the left leaf is a border sibling
        assert_eq!(decompose_inclusion_proof(1, 2), (0, 1));

        // Complete tree of 4. Leaves on the right border need no inner
        // hashes even here: their left siblings chain as border hashes.
        assert_eq!(decompose_inclusion_proof(0, 4), (2, 0));
        assert_eq!(decompose_inclusion_proof(2, 4), (1, 1));
        assert_eq!(decompose_inclusion_proof(3, 4), (0, 2));

        // Last leaf of 5 is promoted twice and only needs the left subtree
        assert_eq!(decompose_inclusion_proof(4, 5), (0, 1));

        // Tree of 7
        assert_eq!(decompose_inclusion_proof(6, 7), (0, 2));
        assert_eq!(decompose_inclusion_proof(5, 7), (2, 1));
        assert_eq!(decompose_inclusion_proof(0, 7), (3, 0));
    }

    #[test]
    fn test_decomposition_matches_level_walk() {
        // Count siblings by walking levels bottom-up, promoting the last node
        // of odd-sized levels.
        fn walked_proof_len(mut index: u64, mut size: u64) -> usize {
            let mut count = 0;
            while size > 1 {
                if !(size % 2 == 1 && index == size - 1) {
                    count += 1;
                }
                index /= 2;
                size = size.div_ceil(2);
            }
            count
        }

        for size in 1..=130u64 {
            for index in 0..size {
                let (inner, border) = decompose_inclusion_proof(index, size);
                assert_eq!(
                    inner + border,
                    walked_proof_len(index, size),
                    "index {} size {}",
                    index,
                    size
                );
            }
        }
    }
}
