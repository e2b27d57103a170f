//! Reference Merkle tree built straight from the recursive definitions in
//! RFC 6962 section 2.1 (MTH, PATH and SUBPROOF).

#![allow(dead_code)]

use rekor_merkle::LogHasher;

/// Largest power of two strictly smaller than `n` (requires `n > 1`)
fn split(n: usize) -> usize {
    let mut k = 1;
    while k * 2 < n {
        k *= 2;
    }
    k
}

/// An in-memory append-only tree over already-hashed leaves
pub struct ReferenceTree<'h> {
    hasher: &'h dyn LogHasher,
    leaves: Vec<Vec<u8>>,
}

impl<'h> ReferenceTree<'h> {
    pub fn new(hasher: &'h dyn LogHasher) -> Self {
        Self {
            hasher,
            leaves: Vec::new(),
        }
    }

    pub fn from_entries<I, E>(hasher: &'h dyn LogHasher, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: AsRef<[u8]>,
    {
        let mut tree = Self::new(hasher);
        for entry in entries {
            tree.append(entry.as_ref());
        }
        tree
    }

    pub fn append(&mut self, entry: &[u8]) {
        self.leaves.push(self.hasher.hash_leaf(entry));
    }

    pub fn size(&self) -> u64 {
        self.leaves.len() as u64
    }

    pub fn leaf_hash(&self, index: u64) -> Vec<u8> {
        self.leaves[index as usize].clone()
    }

    /// Root of the first `size` leaves
    pub fn root(&self, size: u64) -> Vec<u8> {
        self.mth(&self.leaves[..size as usize])
    }

    /// Audit path for leaf `index` in the tree of the first `size` leaves
    pub fn inclusion_proof(&self, index: u64, size: u64) -> Vec<Vec<u8>> {
        self.path(index as usize, &self.leaves[..size as usize])
    }

    /// Consistency proof from `old_size` to `new_size` (`0 < old_size <= new_size`)
    pub fn consistency_proof(&self, old_size: u64, new_size: u64) -> Vec<Vec<u8>> {
        self.subproof(old_size as usize, &self.leaves[..new_size as usize], true)
    }

    fn mth(&self, leaves: &[Vec<u8>]) -> Vec<u8> {
        match leaves.len() {
            0 => self.hasher.empty_root(),
            1 => leaves[0].clone(),
            n => {
                let k = split(n);
                self.hasher
                    .hash_children(&self.mth(&leaves[..k]), &self.mth(&leaves[k..]))
            }
        }
    }

    fn path(&self, m: usize, leaves: &[Vec<u8>]) -> Vec<Vec<u8>> {
        let n = leaves.len();
        if n <= 1 {
            return Vec::new();
        }
        let k = split(n);
        let (mut proof, sibling) = if m < k {
            (self.path(m, &leaves[..k]), self.mth(&leaves[k..]))
        } else {
            (self.path(m - k, &leaves[k..]), self.mth(&leaves[..k]))
        };
        proof.push(sibling);
        proof
    }

    fn subproof(&self, m: usize, leaves: &[Vec<u8>], complete: bool) -> Vec<Vec<u8>> {
        let n = leaves.len();
        if m == n {
            return if complete {
                Vec::new()
            } else {
                vec![self.mth(leaves)]
            };
        }
        let k = split(n);
        let (mut proof, sibling) = if m <= k {
            (
                self.subproof(m, &leaves[..k], complete),
                self.mth(&leaves[k..]),
            )
        } else {
            (
                self.subproof(m - k, &leaves[k..], false),
                self.mth(&leaves[..k]),
            )
        };
        proof.push(sibling);
        proof
    }
}
