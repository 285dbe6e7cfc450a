//! The election aggregate: phase, voters, proposals and the tally result.
//!
//! Every operation checks all of its preconditions before writing anything,
//! so a call either commits completely or leaves the election as it was.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::proposal::ProposalRegistry;
use crate::voter::VoterRegistry;
use crate::{
    Address, Authorizer, ElectionConfig, Error, Event, GENESIS_DESCRIPTION, GENESIS_PROPOSAL_ID,
    Hash, OwnerAuthorizer, PhaseTransition, Proposal, ProposalId, Role, Voter, WorkflowPhase,
    winning_proposal,
};

/// A single election.
pub struct Election {
    phase: WorkflowPhase,
    voters: VoterRegistry,
    proposals: ProposalRegistry,
    winning_proposal_id: ProposalId,

    /// Events of every committed operation, oldest first.
    events: Vec<Event>,

    authorizer: Box<dyn Authorizer>,
    genesis_description: String,
    max_description_len: Option<usize>,
}

/// The persisted part of an election, in a serializable form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    pub phase: WorkflowPhase,
    pub voters: BTreeMap<Address, Voter>,
    pub proposals: Vec<Proposal>,
    pub winning_proposal_id: ProposalId,
}

/// Borrowed view used for hashing without cloning the registries.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    phase: WorkflowPhase,
    voters: &'a VoterRegistry,
    proposals: &'a ProposalRegistry,
    winning_proposal_id: ProposalId,
}

impl Election {
    /// Create an election in the `RegisteringVoters` phase.
    pub fn new(authorizer: impl Authorizer + 'static) -> Self {
        Self {
            phase: WorkflowPhase::default(),
            voters: VoterRegistry::default(),
            proposals: ProposalRegistry::default(),
            winning_proposal_id: GENESIS_PROPOSAL_ID,
            events: Vec::new(),
            authorizer: Box::new(authorizer),
            genesis_description: GENESIS_DESCRIPTION.to_string(),
            max_description_len: None,
        }
    }

    /// Create an election owned by the configured administrator.
    pub fn from_config(config: &ElectionConfig) -> Self {
        let mut election = Self::new(OwnerAuthorizer::new(config.administrator));
        election.genesis_description = config.genesis_description.clone();
        election.max_description_len = config.max_description_len;
        election
    }

    // =========================================================================
    // Read side
    // =========================================================================

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// The tallied winner. Only meaningful once the phase is `VotesTallied`;
    /// before that it is the sentinel id.
    pub fn winning_proposal_id(&self) -> ProposalId {
        self.winning_proposal_id
    }

    pub fn administrator(&self) -> Address {
        self.authorizer.administrator()
    }

    pub fn is_registered(&self, address: &Address) -> bool {
        self.voters.contains(address)
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Look up a voter. The caller must be a registered voter.
    pub fn voter(&self, caller: &Address, address: &Address) -> Result<&Voter, Error> {
        self.require_voter(caller)?;
        self.voters
            .get(address)
            .ok_or(Error::VoterNotFound(*address))
    }

    /// Look up a proposal. The caller must be a registered voter.
    pub fn proposal(&self, caller: &Address, id: ProposalId) -> Result<&Proposal, Error> {
        self.require_voter(caller)?;
        self.proposals.get(id).ok_or(Error::ProposalNotFound(id))
    }

    /// Copy out the persisted state.
    pub fn snapshot(&self) -> ElectionSnapshot {
        ElectionSnapshot {
            phase: self.phase,
            voters: self
                .voters
                .entries()
                .map(|(a, v)| (*a, v.clone()))
                .collect(),
            proposals: self.proposals.as_slice().to_vec(),
            winning_proposal_id: self.winning_proposal_id,
        }
    }

    /// BLAKE3 hash of the CBOR encoded persisted state.
    pub fn state_hash(&self) -> Result<Hash, Error> {
        Hash::of_value(&SnapshotRef {
            phase: self.phase,
            voters: &self.voters,
            proposals: &self.proposals,
            winning_proposal_id: self.winning_proposal_id,
        })
    }

    // =========================================================================
    // Voter registration
    // =========================================================================

    /// Register a voter. Administrator only, while voters are being registered.
    pub fn register_voter(&mut self, caller: &Address, voter: Address) -> Result<Event, Error> {
        self.require_admin(caller)?;
        self.require_phase("voter registration", WorkflowPhase::RegisteringVoters)?;
        if !self.voters.register(voter) {
            return Err(self.reject(Error::DuplicateVoter(voter)));
        }

        debug!(%voter, "voter registered");
        Ok(self.emit(Event::VoterRegistered(voter)))
    }

    // =========================================================================
    // Phase transitions
    // =========================================================================

    /// Open proposal registration. Creates the sentinel proposal.
    pub fn start_proposals_registration(&mut self, caller: &Address) -> Result<Event, Error> {
        self.advance(caller, PhaseTransition::StartProposalsRegistration)
    }

    pub fn end_proposals_registration(&mut self, caller: &Address) -> Result<Event, Error> {
        self.advance(caller, PhaseTransition::EndProposalsRegistration)
    }

    pub fn start_voting_session(&mut self, caller: &Address) -> Result<Event, Error> {
        self.advance(caller, PhaseTransition::StartVotingSession)
    }

    pub fn end_voting_session(&mut self, caller: &Address) -> Result<Event, Error> {
        self.advance(caller, PhaseTransition::EndVotingSession)
    }

    fn advance(&mut self, caller: &Address, transition: PhaseTransition) -> Result<Event, Error> {
        self.require_admin(caller)?;
        if self.phase != transition.source() {
            return Err(self.reject(Error::InvalidPhaseTransition {
                transition,
                expected: transition.source(),
                actual: self.phase,
            }));
        }

        if transition == PhaseTransition::StartProposalsRegistration {
            let id = self.proposals.push(self.genesis_description.clone());
            debug!(id, "sentinel proposal created");
        }

        Ok(self.commit_phase(transition))
    }

    fn commit_phase(&mut self, transition: PhaseTransition) -> Event {
        let from = self.phase;
        self.phase = transition.target();
        info!("election phase changed: {} -> {}", from, self.phase);
        self.emit(Event::PhaseChanged {
            from,
            to: self.phase,
        })
    }

    // =========================================================================
    // Proposals
    // =========================================================================

    /// Submit a proposal. Registered voters only, while proposals are open.
    pub fn submit_proposal(
        &mut self,
        caller: &Address,
        description: impl Into<String>,
    ) -> Result<Event, Error> {
        let description = description.into();

        self.require_voter(caller)?;
        self.require_phase(
            "proposal registration",
            WorkflowPhase::ProposalsRegistrationStarted,
        )?;
        if description.trim().is_empty() {
            return Err(self.reject(Error::EmptyProposal));
        }
        if let Some(limit) = self.max_description_len {
            if description.len() > limit {
                return Err(self.reject(Error::ProposalTooLong {
                    len: description.len(),
                    limit,
                }));
            }
        }

        let id = self.proposals.push(description);
        debug!(id, proposer = %caller, "proposal registered");
        Ok(self.emit(Event::ProposalRegistered(id)))
    }

    // =========================================================================
    // Voting
    // =========================================================================

    /// Cast the caller's one vote.
    pub fn cast_vote(&mut self, caller: &Address, proposal: ProposalId) -> Result<Event, Error> {
        self.require_voter(caller)?;
        self.require_phase("voting session", WorkflowPhase::VotingSessionStarted)?;
        if self.voters.get(caller).is_some_and(|v| v.has_voted) {
            return Err(self.reject(Error::AlreadyVoted(*caller)));
        }
        if !self.proposals.contains(proposal) {
            return Err(self.reject(Error::ProposalNotFound(proposal)));
        }

        // Both checks above make these infallible.
        self.voters.record_vote(caller, proposal);
        self.proposals.record_vote(proposal);

        debug!(voter = %caller, proposal, "vote cast");
        Ok(self.emit(Event::Voted {
            voter: *caller,
            proposal,
        }))
    }

    // =========================================================================
    // Tally
    // =========================================================================

    /// Compute the winner and close the election.
    pub fn tally_votes(&mut self, caller: &Address) -> Result<Event, Error> {
        self.require_admin(caller)?;
        self.require_phase("vote tally", WorkflowPhase::VotingSessionEnded)?;

        self.winning_proposal_id = winning_proposal(self.proposals.as_slice());
        info!(
            winner = self.winning_proposal_id,
            proposals = self.proposals.len(),
            "votes tallied"
        );
        Ok(self.commit_phase(PhaseTransition::TallyVotes))
    }

    // =========================================================================
    // Guards
    // =========================================================================

    fn require_admin(&self, caller: &Address) -> Result<(), Error> {
        if self.authorizer.is_administrator(caller) {
            return Ok(());
        }
        Err(self.reject(Error::Unauthorized {
            caller: *caller,
            required: Role::Administrator,
        }))
    }

    fn require_voter(&self, caller: &Address) -> Result<(), Error> {
        if self.voters.contains(caller) {
            return Ok(());
        }
        Err(self.reject(Error::Unauthorized {
            caller: *caller,
            required: Role::RegisteredVoter,
        }))
    }

    fn require_phase(&self, operation: &'static str, expected: WorkflowPhase) -> Result<(), Error> {
        if self.phase == expected {
            return Ok(());
        }
        Err(self.reject(Error::PhaseNotOpen {
            operation,
            expected,
            actual: self.phase,
        }))
    }

    fn reject(&self, error: Error) -> Error {
        debug!(phase = %self.phase, "rejected: {}", error);
        error
    }

    fn emit(&mut self, event: Event) -> Event {
        self.events.push(event.clone());
        event
    }
}
