//! Notifications produced by committed operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Address, ProposalId, WorkflowPhase};

/// What a successful operation did. Returned to the caller and appended to
/// the election's event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    VoterRegistered(Address),
    PhaseChanged {
        from: WorkflowPhase,
        to: WorkflowPhase,
    },
    ProposalRegistered(ProposalId),
    Voted {
        voter: Address,
        proposal: ProposalId,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::VoterRegistered(voter) => write!(f, "voter {voter} registered"),
            Event::PhaseChanged { from, to } => {
                write!(f, "phase changed: {} -> {}", from.index(), to.index())
            }
            Event::ProposalRegistered(id) => write!(f, "proposal {id} registered"),
            Event::Voted { voter, proposal } => write!(f, "{voter} voted for proposal {proposal}"),
        }
    }
}
