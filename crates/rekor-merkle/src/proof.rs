//! Merkle proof verification
//!
//! Implements inclusion proof and consistency proof verification as specified in RFC 6962.
//! Verification is split into shape decomposition, hash chaining and a final
//! root comparison. Nothing here allocates beyond the running hash.

use crate::error::{Error, Result};
use crate::hasher::LogHasher;
use crate::tree::decompose_inclusion_proof;

/// Verify an inclusion proof for a leaf in a Merkle tree
///
/// # Arguments
/// * `hasher` - The tree's hash function
/// * `index` - Index of the leaf in the tree (0-based)
/// * `size` - Total number of leaves in the tree
/// * `leaf_hash` - The leaf hash, `hasher.hash_leaf(entry)`
/// * `proof` - The audit path, ordered from the leaf upwards
/// * `root` - The expected root hash to verify against
///
/// # Returns
/// * `Ok(())` if the proof is valid
/// * `Err(...)` naming the first check that failed
pub fn verify_inclusion<H, P>(
    hasher: &H,
    index: u64,
    size: u64,
    leaf_hash: &[u8],
    proof: &[P],
    root: &[u8],
) -> Result<()>
where
    H: LogHasher + ?Sized,
    P: AsRef<[u8]>,
{
    let calculated = root_from_inclusion_proof(hasher, index, size, leaf_hash, proof)?;
    verify_match(&calculated, root)
}

/// Recompute the root of a tree from an inclusion proof
///
/// Performs the same validation as [`verify_inclusion`] but returns the
/// calculated root instead of comparing it.
pub fn root_from_inclusion_proof<H, P>(
    hasher: &H,
    index: u64,
    size: u64,
    leaf_hash: &[u8],
    proof: &[P],
) -> Result<Vec<u8>>
where
    H: LogHasher + ?Sized,
    P: AsRef<[u8]>,
{
    if index >= size {
        return Err(Error::IndexOutOfRange { index, size });
    }

    if leaf_hash.len() != hasher.size() {
        return Err(Error::InvalidLeafHashSize {
            got: leaf_hash.len(),
            want: hasher.size(),
        });
    }

    let (inner, border) = decompose_inclusion_proof(index, size);
    if proof.len() != inner + border {
        return Err(Error::WrongProofSize {
            got: proof.len(),
            want: inner + border,
        });
    }

    let hash = chain_inner(hasher, leaf_hash, &proof[..inner], index);
    Ok(chain_border_right(hasher, &hash, &proof[inner..]))
}

/// Verify a consistency proof between two tree states
///
/// Succeeds when the tree of `old_size` leaves with root `old_root` is a
/// prefix of the tree of `new_size` leaves with root `new_root`.
///
/// # Arguments
/// * `hasher` - The tree's hash function
/// * `old_size` - Size of the older tree
/// * `new_size` - Size of the newer tree
/// * `proof` - The hashes in the consistency proof
/// * `old_root` - Root hash of the older tree
/// * `new_root` - Root hash of the newer tree
pub fn verify_consistency<H, P>(
    hasher: &H,
    old_size: u64,
    new_size: u64,
    proof: &[P],
    old_root: &[u8],
    new_root: &[u8],
) -> Result<()>
where
    H: LogHasher + ?Sized,
    P: AsRef<[u8]>,
{
    if new_size < old_size {
        return Err(Error::SizeRegression { old_size, new_size });
    }

    if old_size == new_size {
        if !proof.is_empty() {
            return Err(Error::UnexpectedProofData { got: proof.len() });
        }
        return verify_match(old_root, new_root);
    }

    // An empty tree is a prefix of every tree
    if old_size == 0 {
        if !proof.is_empty() {
            return Err(Error::UnexpectedProofData { got: proof.len() });
        }
        return Ok(());
    }

    if proof.is_empty() {
        return Err(Error::EmptyProof);
    }

    // The old tree's rightmost complete subtree has 2^shift leaves. Its root
    // is the common seed of both chains.
    let shift = old_size.trailing_zeros() as usize;
    let (inner, border) = decompose_inclusion_proof(old_size - 1, new_size);
    let inner = inner.saturating_sub(shift);

    // The proof includes the root hash for the sub-tree of size 2^shift,
    // unless old_size is exactly 2^shift, in which case that root is old_root.
    let (seed, start) = if old_size == 1 << shift {
        (old_root, 0)
    } else {
        (proof[0].as_ref(), 1)
    };

    let want = start + inner + border;
    if proof.len() != want {
        return Err(Error::WrongProofSize {
            got: proof.len(),
            want,
        });
    }

    let proof = &proof[start..];
    let mask = (old_size - 1) >> shift;

    // The old root only folds in hashes that sit left of the path
    let hash1 = chain_inner_right(hasher, seed, &proof[..inner], mask);
    let calc_old_root = chain_border_right(hasher, &hash1, &proof[inner..]);
    verify_match(&calc_old_root, old_root)?;

    let hash2 = chain_inner(hasher, seed, &proof[..inner], mask);
    let calc_new_root = chain_border_right(hasher, &hash2, &proof[inner..]);
    verify_match(&calc_new_root, new_root)
}

/// Compare a calculated root against the expected one
pub fn verify_match(calculated: &[u8], expected: &[u8]) -> Result<()> {
    if calculated != expected {
        return Err(Error::RootMismatch {
            expected: expected.to_vec(),
            calculated: calculated.to_vec(),
        });
    }
    Ok(())
}

/// Chain hashes along the inner proof path
///
/// Bit `i` of `index` tells whether the running hash is the left (0) or the
/// right (1) child at level `i`.
pub fn chain_inner<H, P>(hasher: &H, seed: &[u8], proof: &[P], index: u64) -> Vec<u8>
where
    H: LogHasher + ?Sized,
    P: AsRef<[u8]>,
{
    proof
        .iter()
        .enumerate()
        .fold(seed.to_vec(), |hash, (i, sibling)| {
            if (index >> i) & 1 == 0 {
                hasher.hash_children(&hash, sibling.as_ref())
            } else {
                hasher.hash_children(sibling.as_ref(), &hash)
            }
        })
}

/// Chain hashes along the inner proof path for the older tree
///
/// Only hashes when the index bit is 1 (sibling on the left). Siblings on the
/// right were appended after the older tree was committed, so skipping them
/// yields the earlier version of the subtree.
pub fn chain_inner_right<H, P>(hasher: &H, seed: &[u8], proof: &[P], index: u64) -> Vec<u8>
where
    H: LogHasher + ?Sized,
    P: AsRef<[u8]>,
{
    proof
        .iter()
        .enumerate()
        .fold(seed.to_vec(), |hash, (i, sibling)| {
            if (index >> i) & 1 == 1 {
                hasher.hash_children(sibling.as_ref(), &hash)
            } else {
                hash
            }
        })
}

/// Chain hashes along the right border (all proof hashes go on the left)
pub fn chain_border_right<H, P>(hasher: &H, seed: &[u8], proof: &[P]) -> Vec<u8>
where
    H: LogHasher + ?Sized,
    P: AsRef<[u8]>,
{
    proof.iter().fold(seed.to_vec(), |hash, sibling| {
        hasher.hash_children(sibling.as_ref(), &hash)
    })
}
