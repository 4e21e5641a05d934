//! State-change events observable by external collaborators.

use allowlist_types::{Hash, Identity};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One administrative state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WhitelistEvent {
    Added { identity: Identity },
    Removed { identity: Identity },
    RootUpdated { previous: Hash, current: Hash },
    OwnershipTransferred { previous: Identity, current: Identity },
}

/// An event with its position in the gate's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub sequence: u64,
    pub event: WhitelistEvent,
}

/// Append-only event history for one gate instance.
///
/// Sequence numbers keep increasing across [`EventLog::drain`], so a collaborator
/// that drains periodically can still detect gaps.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
    next_sequence: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn emit(&mut self, event: WhitelistEvent) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        info!(sequence, event = ?event, "Whitelist event emitted");
        self.records.push(EventRecord { sequence, event });
        sequence
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hand pending records to a collaborator.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }
}
