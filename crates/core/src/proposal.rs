//! Proposals and the append-only list that holds them.

use serde::{Deserialize, Serialize};

/// Proposals are numbered densely from 0 in submission order.
pub type ProposalId = u64;

/// Id of the sentinel proposal created when proposal registration opens.
pub const GENESIS_PROPOSAL_ID: ProposalId = 0;

/// Default description of the sentinel proposal.
pub const GENESIS_DESCRIPTION: &str = "GENESIS";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    fn new(description: String) -> Self {
        Self {
            description,
            vote_count: 0,
        }
    }
}

/// Proposals indexed by id. Nothing is ever removed or reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct ProposalRegistry {
    proposals: Vec<Proposal>,
}

impl ProposalRegistry {
    /// Append a proposal and return its id.
    pub fn push(&mut self, description: String) -> ProposalId {
        let id = self.next_id();
        self.proposals.push(Proposal::new(description));
        id
    }

    /// The id the next pushed proposal will receive.
    pub fn next_id(&self) -> ProposalId {
        self.proposals.len() as ProposalId
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        usize::try_from(id).ok().and_then(|i| self.proposals.get(i))
    }

    pub fn contains(&self, id: ProposalId) -> bool {
        self.get(id).is_some()
    }

    /// Add one vote. Returns false for an unknown id.
    pub fn record_vote(&mut self, id: ProposalId) -> bool {
        let Some(proposal) = usize::try_from(id)
            .ok()
            .and_then(|i| self.proposals.get_mut(i))
        else {
            return false;
        };
        proposal.vote_count += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn as_slice(&self) -> &[Proposal] {
        &self.proposals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut registry = ProposalRegistry::default();
        assert_eq!(registry.push(GENESIS_DESCRIPTION.into()), GENESIS_PROPOSAL_ID);
        assert_eq!(registry.push("same".into()), 1);
        assert_eq!(registry.push("same".into()), 2);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(2).unwrap().description, "same");
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn votes_only_land_on_known_proposals() {
        let mut registry = ProposalRegistry::default();
        registry.push("only".into());

        assert!(registry.record_vote(0));
        assert!(registry.record_vote(0));
        assert!(!registry.record_vote(1));
        assert!(!registry.record_vote(u64::MAX));
        assert_eq!(registry.get(0).unwrap().vote_count, 2);
    }
}
