//! Snapshot scope and its ordering contract.

use super::{CandidateRecord, ClientId};
use std::cmp::{Ordering, Reverse};
use std::fmt;

/// Which records a snapshot contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotScope {
    /// Every record, for the recruiter view.
    All,
    /// Records belonging to one client, for the client view.
    Client(ClientId),
}

impl SnapshotScope {
    /// Returns `true` when `record` belongs in this scope.
    #[must_use]
    pub fn contains(&self, record: &CandidateRecord) -> bool {
        match self {
            Self::All => true,
            Self::Client(client_id) => record.client_id() == client_id,
        }
    }

    /// Sorts records into the order this scope is presented in.
    ///
    /// The recruiter scope puts flagged records first, then newest intake
    /// first with undated records last. The client scope is newest created
    /// first. Ties keep their incoming order.
    pub fn sort(&self, records: &mut [CandidateRecord]) {
        match self {
            Self::All => records.sort_by(recruiter_order),
            Self::Client(_) => records.sort_by_key(|record| Reverse(record.created_at())),
        }
    }
}

fn recruiter_order(left: &CandidateRecord, right: &CandidateRecord) -> Ordering {
    right
        .fadv()
        .is_flagged()
        .cmp(&left.fadv().is_flagged())
        .then_with(|| match (left.intake_date(), right.intake_date()) {
            (Some(l), Some(r)) => r.cmp(&l),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

impl fmt::Display for SnapshotScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Client(client_id) => write!(f, "client:{client_id}"),
        }
    }
}
