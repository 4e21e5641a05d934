//! Allowlist gates: three interchangeable answers to "is this caller authorized?"
//!
//! | Gate | Evidence | Administrative state |
//! |---|---|---|
//! | [`MembershipSet`] | none | owner-maintained member map |
//! | [`SignatureGate`] | 65-byte signature | fixed trusted signer |
//! | [`MerkleGate`] | sibling-hash proof | owner-rotated root |
//!
//! All three implement [`WhitelistGate`]. The caller identity is always an explicit
//! argument; nothing reads an ambient "current caller".
//!
//! ## Invariants
//!
//! - Only the owner mutates administrative state; a rejected mutation changes nothing.
//! - Checks are total: `Ok(())` or a specific [`GateError`], never a panic.
//! - Mutations take `&mut self`, so every call on one instance is serialized.
//! - Every state change is appended to the gate's [`EventLog`].

#![deny(unsafe_code)]

pub mod config;
pub mod contract;
pub mod error;
pub mod events;
pub mod membership;
pub mod merkle;
pub mod signature;
pub mod telemetry;

mod owner;

pub use config::{AllowlistConfig, MembershipConfig, MerkleConfig, SignatureConfig, TelemetryConfig};
pub use contract::{Strategy, WhitelistGate};
pub use error::{ConfigError, GateError};
pub use events::{EventLog, EventRecord, WhitelistEvent};
pub use membership::MembershipSet;
pub use merkle::MerkleGate;
pub use signature::SignatureGate;

pub use allowlist_types::{Hash, Identity};
