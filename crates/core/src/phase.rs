//! Workflow phases and the transitions between them.
//!
//! ```text
//! RegisteringVoters
//!   -> ProposalsRegistrationStarted
//!   -> ProposalsRegistrationEnded
//!   -> VotingSessionStarted
//!   -> VotingSessionEnded
//!   -> VotesTallied
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stage an election is in. Ordered; only ever advances by one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WorkflowPhase {
    #[default]
    RegisteringVoters,
    ProposalsRegistrationStarted,
    ProposalsRegistrationEnded,
    VotingSessionStarted,
    VotingSessionEnded,
    VotesTallied,
}

impl WorkflowPhase {
    /// Every phase, in workflow order.
    pub const ALL: [WorkflowPhase; 6] = [
        WorkflowPhase::RegisteringVoters,
        WorkflowPhase::ProposalsRegistrationStarted,
        WorkflowPhase::ProposalsRegistrationEnded,
        WorkflowPhase::VotingSessionStarted,
        WorkflowPhase::VotingSessionEnded,
        WorkflowPhase::VotesTallied,
    ];

    /// The phase that follows this one, or `None` once votes are tallied.
    pub fn next(self) -> Option<WorkflowPhase> {
        use WorkflowPhase::*;
        match self {
            RegisteringVoters => Some(ProposalsRegistrationStarted),
            ProposalsRegistrationStarted => Some(ProposalsRegistrationEnded),
            ProposalsRegistrationEnded => Some(VotingSessionStarted),
            VotingSessionStarted => Some(VotingSessionEnded),
            VotingSessionEnded => Some(VotesTallied),
            VotesTallied => None,
        }
    }

    /// Position in the workflow, starting at 0.
    pub fn index(self) -> u8 {
        use WorkflowPhase::*;
        match self {
            RegisteringVoters => 0,
            ProposalsRegistrationStarted => 1,
            ProposalsRegistrationEnded => 2,
            VotingSessionStarted => 3,
            VotingSessionEnded => 4,
            VotesTallied => 5,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Human readable name used in error messages.
    pub fn name(self) -> &'static str {
        use WorkflowPhase::*;
        match self {
            RegisteringVoters => "registering voters",
            ProposalsRegistrationStarted => "proposals registration started",
            ProposalsRegistrationEnded => "proposals registration ended",
            VotingSessionStarted => "voting session started",
            VotingSessionEnded => "voting session ended",
            VotesTallied => "votes tallied",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the five administrator-driven steps through the workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseTransition {
    StartProposalsRegistration,
    EndProposalsRegistration,
    StartVotingSession,
    EndVotingSession,
    TallyVotes,
}

impl PhaseTransition {
    /// The phase the election must be in for this transition to apply.
    pub fn source(self) -> WorkflowPhase {
        use PhaseTransition::*;
        match self {
            StartProposalsRegistration => WorkflowPhase::RegisteringVoters,
            EndProposalsRegistration => WorkflowPhase::ProposalsRegistrationStarted,
            StartVotingSession => WorkflowPhase::ProposalsRegistrationEnded,
            EndVotingSession => WorkflowPhase::VotingSessionStarted,
            TallyVotes => WorkflowPhase::VotingSessionEnded,
        }
    }

    /// The phase the election is in once this transition commits.
    pub fn target(self) -> WorkflowPhase {
        use PhaseTransition::*;
        match self {
            StartProposalsRegistration => WorkflowPhase::ProposalsRegistrationStarted,
            EndProposalsRegistration => WorkflowPhase::ProposalsRegistrationEnded,
            StartVotingSession => WorkflowPhase::VotingSessionStarted,
            EndVotingSession => WorkflowPhase::VotingSessionEnded,
            TallyVotes => WorkflowPhase::VotesTallied,
        }
    }

    fn verb(self) -> &'static str {
        use PhaseTransition::*;
        match self {
            StartProposalsRegistration => "start proposals registration",
            EndProposalsRegistration => "end proposals registration",
            StartVotingSession => "start voting session",
            EndVotingSession => "end voting session",
            TallyVotes => "tally votes",
        }
    }
}

impl fmt::Display for PhaseTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}
