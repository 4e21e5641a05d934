//! The shared `whitelistCheck` contract.

use std::fmt;

use allowlist_types::Identity;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GateError;

/// Which verification strategy a gate uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Membership,
    Signature,
    Merkle,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Membership => "membership",
            Strategy::Signature => "signature",
            Strategy::Merkle => "merkle",
        };
        f.write_str(name)
    }
}

/// A backend that decides whether `caller` is authorized, given strategy-specific evidence.
///
/// `Ok(())` means Authorized; any `Err` is a definite denial reason.
pub trait WhitelistGate {
    /// What the caller must present: nothing, a signature, or a proof.
    type Evidence: ?Sized;

    fn strategy(&self) -> Strategy;

    fn whitelist_check(
        &self,
        caller: &Identity,
        evidence: &Self::Evidence,
    ) -> Result<(), GateError>;
}

pub(crate) fn log_outcome(strategy: Strategy, caller: &Identity, outcome: &Result<(), GateError>) {
    match outcome {
        Ok(()) => debug!(strategy = %strategy, caller = %caller, "Whitelist check authorized"),
        Err(e) => warn!(
            strategy = %strategy,
            caller = %caller,
            code = e.code(),
            "Whitelist check denied"
        ),
    }
}
