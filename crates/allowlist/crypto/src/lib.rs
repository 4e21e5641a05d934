//! Cryptographic primitives shared by the allowlist gates.
//!
//! - [`hashing`]: Keccak-256 and the derived digests (identity digest, EIP-191
//!   personal message, Merkle leaf, sorted pair).
//! - [`signature`]: 65-byte recoverable secp256k1 signatures, signer recovery and the
//!   off-band issuing key.
//! - [`merkle`]: proof folding and a sorted-pairs tree builder for publishing roots.
//!
//! Everything here is pure: no I/O, no global state.

#![deny(unsafe_code)]

pub mod error;
pub mod hashing;
pub mod merkle;
pub mod signature;

pub use error::SignatureError;
pub use hashing::{
    credential_message, hash_sorted_pair, identity_digest, keccak256, leaf_hash,
    personal_message_hash,
};
pub use merkle::{reconstruct_root, verify_proof, MerkleTree};
pub use signature::{
    identity_from_verifying_key, recover_signer, Credential, RecoverableSignature, SignerKey,
};
