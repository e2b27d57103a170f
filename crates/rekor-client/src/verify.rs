//! Verification of Rekor responses against the Merkle tree they commit to

use crate::error::{Error, Result};
use rekor_merkle::{
    compute_leaf_hash, root_from_inclusion_proof, verify_consistency, verify_match, LogHasher,
};
use rekor_types::{Checkpoint, ConsistencyProof, LogEntry, LogInfo, SignedCheckpoint};

/// Verify that a log entry is included in the tree its inclusion proof names
///
/// The leaf hash is computed from the entry body, the root is recomputed from
/// the proof path and compared to the proof's root hash. When the proof
/// carries a checkpoint, its tree size and root hash must agree with the
/// proof as well.
pub fn verify_entry_inclusion<H: LogHasher + ?Sized>(hasher: &H, entry: &LogEntry) -> Result<()> {
    let proof = entry
        .inclusion_proof()
        .ok_or_else(|| Error::MissingInclusionProof(entry.uuid.clone()))?;

    let body = entry.body.decode()?;
    let leaf_hash = compute_leaf_hash(hasher, &body);
    let hashes = proof.decode_hashes()?;
    let expected_root = proof.decode_root_hash()?;

    tracing::debug!(
        uuid = %entry.uuid,
        log_index = proof.log_index,
        tree_size = proof.tree_size,
        leaf_hash = %hex::encode(&leaf_hash),
        "verifying inclusion proof with {} hashes",
        hashes.len()
    );

    let calculated_root =
        root_from_inclusion_proof(hasher, proof.log_index, proof.tree_size, &leaf_hash, &hashes)?;

    tracing::debug!(
        calculated = %hex::encode(&calculated_root),
        expected = %hex::encode(&expected_root),
        "recomputed root hash"
    );

    verify_match(&calculated_root, &expected_root)?;

    if let Some(checkpoint) = proof.signed_checkpoint()? {
        check_signed_checkpoint(&checkpoint, proof.tree_size, &expected_root)?;
    }

    Ok(())
}

/// Verify that `latest` is an append-only extension of `previous`
pub fn verify_consistency_with<H: LogHasher + ?Sized>(
    hasher: &H,
    previous: &Checkpoint,
    latest: &Checkpoint,
    proof: &ConsistencyProof,
) -> Result<()> {
    if previous.tree_id != latest.tree_id {
        return Err(Error::CheckpointMismatch(format!(
            "tree ID {} does not match {}",
            previous.tree_id, latest.tree_id
        )));
    }

    let old_root = previous.root_hash.decode()?;
    let new_root = latest.root_hash.decode()?;

    if let Some(proof_root) = &proof.root_hash {
        if proof_root.decode()? != new_root {
            return Err(Error::CheckpointMismatch(format!(
                "proof root {} does not match checkpoint root {}",
                proof_root, latest.root_hash
            )));
        }
    }

    let hashes = proof.decode_hashes()?;

    tracing::debug!(
        tree_id = %latest.tree_id,
        old_size = previous.tree_size,
        new_size = latest.tree_size,
        "verifying consistency proof with {} hashes",
        hashes.len()
    );

    verify_consistency(
        hasher,
        previous.tree_size,
        latest.tree_size,
        &hashes,
        &old_root,
        &new_root,
    )?;

    Ok(())
}

/// Check that the signed tree head of a log info response describes the same
/// tree as its plain fields
pub fn verify_log_info(info: &LogInfo) -> Result<()> {
    let signed = info.signed_checkpoint()?;
    let root_hash = info.root_hash.decode()?;
    check_signed_checkpoint(&signed, info.tree_size, &root_hash)
}

fn check_signed_checkpoint(
    checkpoint: &SignedCheckpoint,
    tree_size: u64,
    root_hash: &[u8],
) -> Result<()> {
    if checkpoint.tree_size != tree_size {
        return Err(Error::CheckpointMismatch(format!(
            "checkpoint tree size {} does not match {}",
            checkpoint.tree_size, tree_size
        )));
    }

    if checkpoint.root_hash != root_hash {
        return Err(Error::CheckpointMismatch(format!(
            "checkpoint root hash {} does not match {}",
            hex::encode(&checkpoint.root_hash),
            hex::encode(root_hash)
        )));
    }

    Ok(())
}
