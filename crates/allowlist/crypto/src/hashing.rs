//! Digest construction.
//!
//! Issuers (wallet tooling, tree builders) and the gates must derive these digests
//! identically; any divergence makes every check fail silently.

use allowlist_types::{Hash, Identity};
use sha3::{Digest, Keccak256};

/// Prefix applied by wallet `signMessage` to a 32-byte payload (EIP-191, version 0x45).
const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 (the pre-standard variant, not NIST SHA3-256).
pub fn keccak256(data: impl AsRef<[u8]>) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    finish(hasher)
}

fn finish(hasher: Keccak256) -> Hash {
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    Hash::from_bytes(out)
}

/// Digest of an identity's packed 20-byte encoding.
pub fn identity_digest(identity: &Identity) -> Hash {
    keccak256(identity.as_bytes())
}

/// EIP-191 personal-message hash of a 32-byte digest.
pub fn personal_message_hash(digest: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(digest.as_bytes());
    finish(hasher)
}

/// The prehash a trusted signer signs to vouch for `candidate`.
pub fn credential_message(candidate: &Identity) -> Hash {
    personal_message_hash(&identity_digest(candidate))
}

/// Merkle leaf for an identity.
pub fn leaf_hash(identity: &Identity) -> Hash {
    keccak256(identity.as_bytes())
}

/// Hash two nodes smaller-first, so callers never track left/right position.
pub fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(first.as_bytes());
    hasher.update(second.as_bytes());
    finish(hasher)
}
