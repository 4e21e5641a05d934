//! Shared data model for the allowlist gates.
//!
//! An [`Identity`] is the unit of authorization (a 20-byte account address) and a
//! [`Hash`] is the 32-byte digest used for leaves, roots and signed messages.
//! Both parse from hex in any letter case and always render as lower-case `0x` hex,
//! so issuance and verification agree on a single byte-level representation.

#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod identity;

mod hexfmt;

pub use error::ParseError;
pub use hash::Hash;
pub use identity::Identity;
