//! Administrator-maintained membership set.

use std::collections::HashMap;

use allowlist_types::Identity;
use tracing::debug;

use crate::config::MembershipConfig;
use crate::contract::{log_outcome, Strategy, WhitelistGate};
use crate::error::{ConfigError, GateError};
use crate::events::{EventLog, WhitelistEvent};
use crate::owner::Ownership;

/// An explicit set of authorized identities, mutated only by its owner.
///
/// Absence means not authorized; removed identities leave no tombstone.
#[derive(Clone, Debug)]
pub struct MembershipSet {
    members: HashMap<Identity, bool>,
    ownership: Ownership,
    events: EventLog,
}

impl MembershipSet {
    /// Empty set owned by `owner` (the deployer).
    pub fn new(owner: Identity) -> Self {
        Self {
            members: HashMap::new(),
            ownership: Ownership::new(owner),
            events: EventLog::new(),
        }
    }

    pub fn from_config(config: &MembershipConfig) -> Result<Self, ConfigError> {
        let owner = config.owner.ok_or(ConfigError::Missing("membership.owner"))?;
        Ok(Self::new(owner))
    }

    pub fn owner(&self) -> &Identity {
        self.ownership.owner()
    }

    /// Mark every identity in `identities` as a member.
    ///
    /// Already-present identities are skipped and emit nothing.
    pub fn add_to_whitelist(
        &mut self,
        caller: &Identity,
        identities: &[Identity],
    ) -> Result<(), GateError> {
        self.ownership.ensure_owner(caller, "add_to_whitelist")?;

        for identity in identities {
            if self.is_member(identity) {
                continue;
            }
            self.members.insert(*identity, true);
            self.events.emit(WhitelistEvent::Added {
                identity: *identity,
            });
        }

        debug!(requested = identities.len(), members = self.len(), "Whitelist batch added");
        Ok(())
    }

    /// Drop every identity in `identities` from the set.
    pub fn remove_from_whitelist(
        &mut self,
        caller: &Identity,
        identities: &[Identity],
    ) -> Result<(), GateError> {
        self.ownership.ensure_owner(caller, "remove_from_whitelist")?;

        for identity in identities {
            if self.members.remove(identity).unwrap_or(false) {
                self.events.emit(WhitelistEvent::Removed {
                    identity: *identity,
                });
            }
        }

        debug!(requested = identities.len(), members = self.len(), "Whitelist batch removed");
        Ok(())
    }

    pub fn is_member(&self, identity: &Identity) -> bool {
        self.members.get(identity).copied().unwrap_or(false)
    }

    pub fn whitelist_check(&self, caller: &Identity) -> Result<(), GateError> {
        let outcome = if self.is_member(caller) {
            Ok(())
        } else {
            Err(GateError::NotInWhitelist { caller: *caller })
        };
        log_outcome(Strategy::Membership, caller, &outcome);
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

    /// Current members, in no particular order.
    pub fn members(&self) -> impl Iterator<Item = &Identity> + '_ {
        self.members.keys()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }
}

impl WhitelistGate for MembershipSet {
    type Evidence = ();

    fn strategy(&self) -> Strategy {
        Strategy::Membership
    }

    fn whitelist_check(&self, caller: &Identity, _evidence: &()) -> Result<(), GateError> {
        MembershipSet::whitelist_check(self, caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> Identity {
        Identity::from_bytes([byte; 20])
    }

    #[test]
    fn add_marks_members() {
        let admin = id(0xad);
        let mut set = MembershipSet::new(admin);
        set.add_to_whitelist(&admin, &[id(1), id(2), id(3)]).unwrap();

        assert!(set.is_member(&id(1)));
        assert!(set.is_member(&id(2)));
        assert!(set.is_member(&id(3)));
        assert!(!set.is_member(&id(4)));
        assert_eq!(set.len(), 3);
        assert_eq!(set.events().len(), 3);
    }

    #[test]
    fn remove_subset() {
        let admin = id(0xad);
        let mut set = MembershipSet::new(admin);
        set.add_to_whitelist(&admin, &[id(1), id(2), id(3)]).unwrap();
        set.remove_from_whitelist(&admin, &[id(1), id(3)]).unwrap();

        assert!(!set.is_member(&id(1)));
        assert!(set.is_member(&id(2)));
        assert!(!set.is_member(&id(3)));
        assert_eq!(
            set.events().last().map(|r| &r.event),
            Some(&WhitelistEvent::Removed { identity: id(3) })
        );
    }

    #[test]
    fn check_denies_non_member_and_admits_member() {
        let admin = id(0xad);
        let user = id(0x05);
        let mut set = MembershipSet::new(admin);

        assert_eq!(
            set.whitelist_check(&user),
            Err(GateError::NotInWhitelist { caller: user })
        );

        set.add_to_whitelist(&admin, &[user]).unwrap();
        assert_eq!(set.whitelist_check(&user), Ok(()));
    }

    #[test]
    fn removed_entries_do_not_linger() {
        let admin = id(0xad);
        let mut set = MembershipSet::new(admin);
        set.add_to_whitelist(&admin, &[id(1), id(2), id(3)]).unwrap();
        set.remove_from_whitelist(&admin, &[id(2)]).unwrap();

        let mut listed: Vec<Identity> = set.members().copied().collect();
        listed.sort();
        assert_eq!(listed, vec![id(1), id(3)]);
        assert_eq!(set.len(), 2);

        set.remove_from_whitelist(&admin, &[id(1), id(3)]).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.members().count(), 0);
    }

    #[test]
    fn duplicates_in_one_batch_emit_once() {
        let admin = id(0xad);
        let mut set = MembershipSet::new(admin);
        set.add_to_whitelist(&admin, &[id(1), id(1), id(1)]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.events().len(), 1);
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let admin = id(0xad);
        let mut set = MembershipSet::new(admin);
        set.add_to_whitelist(&admin, &[]).unwrap();
        set.remove_from_whitelist(&admin, &[]).unwrap();
        assert!(set.is_empty());
        assert!(set.events().is_empty());
    }

    #[test]
    fn transfer_ownership_changes_writer() {
        let admin = id(0xad);
        let next = id(0xbe);
        let mut set = MembershipSet::new(admin);

        set.transfer_ownership(&admin, next).unwrap();
        assert_eq!(set.owner(), &next);
        assert!(set.add_to_whitelist(&admin, &[id(1)]).is_err());
        assert!(set.add_to_whitelist(&next, &[id(1)]).is_ok());
    }

    #[test]
    fn from_config_requires_owner() {
        let missing = MembershipSet::from_config(&MembershipConfig::default());
        assert!(matches!(missing, Err(ConfigError::Missing("membership.owner"))));

        let config = MembershipConfig { owner: Some(id(0xad)) };
        let set = MembershipSet::from_config(&config).unwrap();
        assert_eq!(set.owner(), &id(0xad));
    }
}
