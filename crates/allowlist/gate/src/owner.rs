use allowlist_types::Identity;
use tracing::warn;

use crate::error::GateError;

/// Single-writer guard shared by the gates that have administrative state.
#[derive(Clone, Debug)]
pub(crate) struct Ownership {
    owner: Identity,
}

impl Ownership {
    pub(crate) fn new(owner: Identity) -> Self {
        Self { owner }
    }

    pub(crate) fn owner(&self) -> &Identity {
        &self.owner
    }

    /// Must run before any mutation touches state.
    pub(crate) fn ensure_owner(
        &self,
        caller: &Identity,
        operation: &'static str,
    ) -> Result<(), GateError> {
        if *caller == self.owner {
            return Ok(());
        }
        warn!(
            caller = %caller,
            owner = %self.owner,
            operation,
            "Mutation rejected: caller is not the owner"
        );
        Err(GateError::AuthorizationDenied { caller: *caller })
    }

    /// Hand ownership to `new_owner`, returning the previous owner.
    pub(crate) fn transfer(
        &mut self,
        caller: &Identity,
        new_owner: Identity,
    ) -> Result<Identity, GateError> {
        self.ensure_owner(caller, "transfer_ownership")?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}
