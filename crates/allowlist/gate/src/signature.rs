//! Trusted-signer credential gate.
//!
//! The signed message binds only an identity, never the gate or a nonce. Because the
//! digest is derived from the caller passed to [`SignatureGate::whitelist_check`]
//! (there is no separate candidate argument), a credential captured from X
//! authorizes X and nobody else.

use allowlist_crypto::{credential_message, recover_signer};
use allowlist_types::Identity;
use tracing::debug;

use crate::config::SignatureConfig;
use crate::contract::{log_outcome, Strategy, WhitelistGate};
use crate::error::{ConfigError, GateError};

/// Accepts callers holding a signature from one fixed trusted signer.
#[derive(Clone, Debug)]
pub struct SignatureGate {
    trusted_signer: Identity,
}

impl SignatureGate {
    pub fn new(trusted_signer: Identity) -> Self {
        Self { trusted_signer }
    }

    pub fn from_config(config: &SignatureConfig) -> Result<Self, ConfigError> {
        let trusted_signer = config
            .trusted_signer
            .ok_or(ConfigError::Missing("signature.trusted_signer"))?;
        Ok(Self::new(trusted_signer))
    }

    pub fn trusted_signer(&self) -> &Identity {
        &self.trusted_signer
    }

    /// Recover the signer of `caller`'s credential message and compare it to the
    /// trusted signer. Malformed signatures are a denial, not an error path of their own.
    pub fn whitelist_check(&self, caller: &Identity, signature: &[u8]) -> Result<(), GateError> {
        let message = credential_message(caller);

        let outcome = match recover_signer(&message, signature) {
            Ok(signer) if signer == self.trusted_signer => Ok(()),
            Ok(signer) => {
                debug!(caller = %caller, recovered = %signer, "Recovered signer is not trusted");
                Err(GateError::SignatureValidationFailed)
            }
            Err(e) => {
                debug!(caller = %caller, error = %e, "Signature could not be recovered");
                Err(GateError::SignatureValidationFailed)
            }
        };

        log_outcome(Strategy::Signature, caller, &outcome);
        outcome
    }
}

impl WhitelistGate for SignatureGate {
    type Evidence = [u8];

    fn strategy(&self) -> Strategy {
        Strategy::Signature
    }

    fn whitelist_check(&self, caller: &Identity, evidence: &[u8]) -> Result<(), GateError> {
        SignatureGate::whitelist_check(self, caller, evidence)
    }
}
