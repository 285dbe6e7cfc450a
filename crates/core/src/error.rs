//! Error types for ezballot-core.

use thiserror::Error;

use crate::{Address, PhaseTransition, ProposalId, Role, WorkflowPhase};

/// Core errors. Every variant is a rejected precondition; a call that
/// returns one of these has left the election untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller lacks the role the operation requires.
    #[error("{caller} is not authorized: {required} required")]
    Unauthorized { caller: Address, required: Role },

    /// Operation attempted outside the phase it is allowed in.
    #[error("{operation} is not open: requires phase '{expected}', election is in '{actual}'")]
    PhaseNotOpen {
        operation: &'static str,
        expected: WorkflowPhase,
        actual: WorkflowPhase,
    },

    /// Attempt to skip, repeat, or reverse a phase.
    #[error("cannot {transition}: requires phase '{expected}', election is in '{actual}'")]
    InvalidPhaseTransition {
        transition: PhaseTransition,
        expected: WorkflowPhase,
        actual: WorkflowPhase,
    },

    #[error("voter {0} is already registered")]
    DuplicateVoter(Address),

    #[error("proposal description is empty")]
    EmptyProposal,

    #[error("proposal description is {len} bytes, limit is {limit}")]
    ProposalTooLong { len: usize, limit: usize },

    #[error("voter not found: {0}")]
    VoterNotFound(Address),

    #[error("proposal not found: {0}")]
    ProposalNotFound(ProposalId),

    #[error("voter {0} has already voted")]
    AlreadyVoted(Address),

    /// Signature on a submitted call does not verify.
    #[error("invalid signature for caller {0}")]
    InvalidSignature(Address),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Call nonce is not the next one expected from this caller.
    #[error("invalid nonce for {caller}: expected {expected}, got {got}")]
    InvalidNonce {
        caller: Address,
        expected: u64,
        got: u64,
    },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(#[from] confique::Error),
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(e: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for Error {
    fn from(e: ciborium::de::Error<std::io::Error>) -> Self {
        Error::Serialization(e.to_string())
    }
}
