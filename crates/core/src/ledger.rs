//! The ledger: applies signed calls to an election, one at a time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::{Address, Call, Election, Error, Event, SignedCall};

/// Record of a committed call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub caller: Address,
    pub nonce: u64,
    pub event: Event,
}

/// Owns an election and serializes calls into it.
///
/// Each call must carry a valid signature and the caller's next nonce. A
/// rejected call changes neither the election nor the caller's nonce.
pub struct Ledger {
    election: Election,

    /// Next expected nonce per caller.
    nonces: BTreeMap<Address, u64>,

    /// Committed calls in order of application.
    receipts: Vec<Receipt>,
}

impl Ledger {
    pub fn new(election: Election) -> Self {
        Self {
            election,
            nonces: BTreeMap::new(),
            receipts: Vec::new(),
        }
    }

    pub fn election(&self) -> &Election {
        &self.election
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// The nonce the caller must use for its next call.
    pub fn next_nonce(&self, caller: &Address) -> u64 {
        self.nonces.get(caller).copied().unwrap_or(0)
    }

    /// Verify and apply a signed call.
    pub fn submit(&mut self, signed: SignedCall) -> Result<Event, Error> {
        let caller = signed.verify().inspect_err(|e| {
            warn!("rejected call with bad credentials: {}", e);
        })?;

        let expected = self.next_nonce(&caller);
        if signed.nonce != expected {
            debug!(%caller, expected, got = signed.nonce, "rejected call with stale nonce");
            return Err(Error::InvalidNonce {
                caller,
                expected,
                got: signed.nonce,
            });
        }

        let event = self.dispatch(&caller, signed.call)?;

        self.nonces.insert(caller, expected + 1);
        self.receipts.push(Receipt {
            caller,
            nonce: expected,
            event: event.clone(),
        });

        Ok(event)
    }

    fn dispatch(&mut self, caller: &Address, call: Call) -> Result<Event, Error> {
        let election = &mut self.election;
        match call {
            Call::RegisterVoter { voter } => election.register_voter(caller, voter),
            Call::StartProposalsRegistration => election.start_proposals_registration(caller),
            Call::SubmitProposal { description } => election.submit_proposal(caller, description),
            Call::EndProposalsRegistration => election.end_proposals_registration(caller),
            Call::StartVotingSession => election.start_voting_session(caller),
            Call::CastVote { proposal } => election.cast_vote(caller, proposal),
            Call::EndVotingSession => election.end_voting_session(caller),
            Call::TallyVotes => election.tally_votes(caller),
        }
    }
}
