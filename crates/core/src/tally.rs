//! Tally computation.

use crate::{GENESIS_PROPOSAL_ID, Proposal, ProposalId};

/// Pick the proposal with the most votes in one ascending pass.
///
/// A later proposal takes the lead only with a strictly greater count, so
/// ties go to the lowest id. An empty slice yields the sentinel id.
pub fn winning_proposal(proposals: &[Proposal]) -> ProposalId {
    let mut winner = GENESIS_PROPOSAL_ID;
    let mut best: Option<u64> = None;

    for (id, proposal) in (0..).zip(proposals) {
        if best.is_none_or(|count| proposal.vote_count > count) {
            winner = id;
            best = Some(proposal.vote_count);
        }
    }

    winner
}
