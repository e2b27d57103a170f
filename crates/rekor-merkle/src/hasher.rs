//! RFC 6962 leaf and node hashing
//!
//! Hashing is domain separated: leaves are hashed as `H(0x00 || data)` and
//! interior nodes as `H(0x01 || left || right)`, so a leaf can never be
//! passed off as an interior node.
//!
//! The digest is a capability ([`LogHasher`]) rather than a fixed function,
//! which lets callers swap in another algorithm or a toy digest in tests.

use std::fmt;
use std::marker::PhantomData;

use digest::Digest;
use sha2::Sha256;

/// Prefix for leaf nodes in RFC 6962 Merkle tree
pub const LEAF_HASH_PREFIX: u8 = 0x00;

/// Prefix for internal nodes in RFC 6962 Merkle tree
pub const NODE_HASH_PREFIX: u8 = 0x01;

/// A domain-separated hash function for an append-only log tree
///
/// Implementations are stateless per call and shared freely across threads.
pub trait LogHasher: Send + Sync {
    /// Returns `H(0x00 || leaf)`
    fn hash_leaf(&self, leaf: &[u8]) -> Vec<u8>;

    /// Returns `H(0x01 || left || right)`
    ///
    /// `left` and `right` must both be [`size`](LogHasher::size) bytes long.
    /// This is not checked.
    fn hash_children(&self, left: &[u8], right: &[u8]) -> Vec<u8>;

    /// Digest length in bytes
    fn size(&self) -> usize;

    /// Root of the empty tree, `H("")`
    fn empty_root(&self) -> Vec<u8>;
}

/// [`LogHasher`] over any [`Digest`] implementation
pub struct Rfc6962Hasher<D> {
    _digest: PhantomData<fn() -> D>,
}

/// The SHA-256 hasher used by Rekor and Certificate Transparency logs
pub type Sha256Hasher = Rfc6962Hasher<Sha256>;

/// Shared SHA-256 hasher instance
pub const DEFAULT_HASHER: Sha256Hasher = Rfc6962Hasher::new();

impl<D> Rfc6962Hasher<D> {
    /// Create a hasher for the digest `D`
    pub const fn new() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D> Default for Rfc6962Hasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for Rfc6962Hasher<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Rfc6962Hasher<D> {}

impl<D> fmt::Debug for Rfc6962Hasher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rfc6962Hasher")
            .field("digest", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D: Digest> LogHasher for Rfc6962Hasher<D> {
    fn hash_leaf(&self, leaf: &[u8]) -> Vec<u8> {
        let mut hasher = D::new();
        hasher.update([LEAF_HASH_PREFIX]);
        hasher.update(leaf);
        hasher.finalize().to_vec()
    }

    fn hash_children(&self, left: &[u8], right: &[u8]) -> Vec<u8> {
        let mut hasher = D::new();
        hasher.update([NODE_HASH_PREFIX]);
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().to_vec()
    }

    fn size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn empty_root(&self) -> Vec<u8> {
        D::digest(b"").to_vec()
    }
}

/// Compute the leaf hash of a raw log entry body
///
/// The body must already be transport-decoded (Rekor serves it base64).
pub fn compute_leaf_hash<H: LogHasher + ?Sized>(hasher: &H, body: &[u8]) -> Vec<u8> {
    hasher.hash_leaf(body)
}
