//! Merkle-root gate.

use allowlist_crypto::{leaf_hash, verify_proof};
use allowlist_types::{Hash, Identity};

use crate::config::MerkleConfig;
use crate::contract::{log_outcome, Strategy, WhitelistGate};
use crate::error::{ConfigError, GateError};
use crate::events::{EventLog, WhitelistEvent};
use crate::owner::Ownership;

/// Accepts callers that present a sibling path from their leaf to the current root.
///
/// A zero root means "unset": every check fails with [`GateError::InvalidRoot`]
/// until the owner publishes one. Rotating the root implicitly invalidates every
/// proof built for the previous one.
#[derive(Clone, Debug)]
pub struct MerkleGate {
    root: Hash,
    ownership: Ownership,
    events: EventLog,
}

impl MerkleGate {
    pub fn new(owner: Identity) -> Self {
        Self::with_root(owner, Hash::ZERO)
    }

    pub fn with_root(owner: Identity, root: Hash) -> Self {
        Self {
            root,
            ownership: Ownership::new(owner),
            events: EventLog::new(),
        }
    }

    pub fn from_config(config: &MerkleConfig) -> Result<Self, ConfigError> {
        let owner = config.owner.ok_or(ConfigError::Missing("merkle.owner"))?;
        Ok(Self::with_root(owner, config.root.unwrap_or(Hash::ZERO)))
    }

    pub fn root(&self) -> &Hash {
        &self.root
    }

    pub fn is_root_set(&self) -> bool {
        !self.root.is_zero()
    }

    pub fn owner(&self) -> &Identity {
        self.ownership.owner()
    }

    /// Replace the root unconditionally. `Hash::ZERO` unsets it.
    pub fn set_merkle_root(&mut self, caller: &Identity, new_root: Hash) -> Result<(), GateError> {
        self.ownership.ensure_owner(caller, "set_merkle_root")?;

        let previous = std::mem::replace(&mut self.root, new_root);
        self.events.emit(WhitelistEvent::RootUpdated {
            previous,
            current: new_root,
        });
        Ok(())
    }

    /// Fold `proof` onto the caller's leaf and compare with the current root.
    ///
    /// Wrong length, wrong sibling, wrong caller and stale root are indistinguishable:
    /// all yield [`GateError::InvalidProof`].
    pub fn whitelist_check(&self, caller: &Identity, proof: &[Hash]) -> Result<(), GateError> {
        let outcome = if !self.is_root_set() {
            Err(GateError::InvalidRoot)
        } else if verify_proof(&self.root, leaf_hash(caller), proof) {
            Ok(())
        } else {
            Err(GateError::InvalidProof)
        };

        log_outcome(Strategy::Merkle, caller, &outcome);
        outcome
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Identity,
        new_owner: Identity,
    ) -> Result<(), GateError> {
        let previous = self.ownership.transfer(caller, new_owner)?;
        self.events.emit(WhitelistEvent::OwnershipTransferred {
            previous,
            current: new_owner,
        });
        Ok(())
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }
}

impl WhitelistGate for MerkleGate {
    type Evidence = [Hash];

    fn strategy(&self) -> Strategy {
        Strategy::Merkle
    }

    fn whitelist_check(&self, caller: &Identity, evidence: &[Hash]) -> Result<(), GateError> {
        MerkleGate::whitelist_check(self, caller, evidence)
    }
}
