//! # Event Log
//!
//! The ledger's side channel for external observers. Every successful
//! state-changing operation appends exactly one [`EventRecord`] after its
//! mutation commits; failed operations append nothing. The log is
//! append-only -- records are never rewritten or removed -- so the sequence
//! number doubles as a resumption cursor for subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Address;

/// A notification emitted by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Tokens moved between accounts. A `from` of `None` marks newly
    /// minted supply entering circulation.
    Transfer {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        from: Option<Address>,
        to: Address,
        value: u128,
    },
    /// An owner set a spender's allowance.
    Approval {
        owner: Address,
        spender: Address,
        value: u128,
    },
    /// Supply was destroyed out of an account.
    Burn { from: Address, value: u128 },
    /// Economic activity was halted by the tagged admin.
    Paused { account: Address },
    /// Economic activity was resumed by the tagged admin.
    Unpaused { account: Address },
}

/// A committed event together with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Zero-based, strictly increasing position in the log.
    pub seq: u64,
    /// UTC timestamp at commit time.
    pub recorded_at: DateTime<Utc>,
    /// The notification itself.
    pub event: Event,
}

/// Append-only store of committed events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event, assigning it the next sequence number.
    ///
    /// Callers must only invoke this after the corresponding mutation has
    /// fully committed.
    pub(crate) fn emit(&mut self, event: Event) -> &EventRecord {
        let record = EventRecord {
            seq: self.records.len() as u64,
            recorded_at: Utc::now(),
            event,
        };
        self.records.push(record);
        self.records.last().expect("just pushed")
    }

    /// All committed records, oldest first.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records with `seq >= since`, for subscribers resuming from a cursor.
    pub fn since(&self, since: u64) -> &[EventRecord] {
        let start = since.min(self.records.len() as u64) as usize;
        &self.records[start..]
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ADDRESS_LEN;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; ADDRESS_LEN])
    }

    #[test]
    fn emit_assigns_increasing_seq() {
        let mut log = EventLog::new();
        log.emit(Event::Paused { account: addr(1) });
        log.emit(Event::Unpaused { account: addr(1) });

        let seqs: Vec<u64> = log.records().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
    }

    #[test]
    fn since_slices_from_cursor() {
        let mut log = EventLog::new();
        for i in 0..5 {
            log.emit(Event::Burn {
                from: addr(1),
                value: i,
            });
        }

        assert_eq!(log.since(0).len(), 5);
        assert_eq!(log.since(3).len(), 2);
        assert_eq!(log.since(3)[0].seq, 3);
        assert!(log.since(5).is_empty());
        assert!(log.since(u64::MAX).is_empty());
    }

    #[test]
    fn mint_transfer_omits_from_field() {
        let mut log = EventLog::new();
        log.emit(Event::Transfer {
            from: None,
            to: addr(2),
            value: 100,
        });

        let json = serde_json::to_string(&log.records()[0]).unwrap();
        assert!(!json.contains("\"from\""));
        assert!(json.contains("\"transfer\""));
    }

    #[test]
    fn serde_roundtrip() {
        let mut log = EventLog::new();
        log.emit(Event::Approval {
            owner: addr(1),
            spender: addr(2),
            value: 50,
        });

        let json = serde_json::to_string(&log).unwrap();
        let recovered: EventLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log, recovered);
    }
}
