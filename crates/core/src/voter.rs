//! Voter records and the registry that holds them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Address, ProposalId};

/// A registered voter. Created by registration, mutated once by voting,
/// never removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    pub voted_proposal_id: Option<ProposalId>,
}

impl Voter {
    fn registered() -> Self {
        Self {
            is_registered: true,
            has_voted: false,
            voted_proposal_id: None,
        }
    }
}

/// Voters keyed by address. Membership is a set: an address appears once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct VoterRegistry {
    voters: BTreeMap<Address, Voter>,
}

impl VoterRegistry {
    pub fn get(&self, address: &Address) -> Option<&Voter> {
        self.voters.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.voters.get(address).is_some_and(|v| v.is_registered)
    }

    /// Insert a fresh voter. Returns false if the address is already present.
    pub fn register(&mut self, address: Address) -> bool {
        if self.voters.contains_key(&address) {
            return false;
        }
        self.voters.insert(address, Voter::registered());
        true
    }

    /// Mark a voter as having voted. Returns false if the voter is unknown
    /// or has already voted.
    pub fn record_vote(&mut self, address: &Address, proposal: ProposalId) -> bool {
        match self.voters.get_mut(address) {
            Some(voter) if !voter.has_voted => {
                voter.has_voted = true;
                voter.voted_proposal_id = Some(proposal);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Address, &Voter)> {
        self.voters.iter()
    }
}
