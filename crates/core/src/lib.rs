//! ezballot-core: Core types and workflow state machine for a single-election ledger.
//!
//! An [`Election`] moves through six ordered phases:
//! - voters are registered by the administrator
//! - registered voters submit proposals
//! - each registered voter casts exactly one vote
//! - the administrator tallies, and the proposal with the most votes wins
//!
//! The administrator is identified by an [`Authorizer`]. Callers are always
//! passed explicitly; [`Ledger`] is the dispatcher that derives them from
//! signed calls.

mod address;
mod auth;
mod call;
mod config;
mod election;
mod error;
mod event;
mod hash;
mod ledger;
mod phase;
mod proposal;
mod tally;
mod voter;

pub use address::Address;
pub use auth::{Authorizer, OwnerAuthorizer, Role};
pub use call::{Call, SignedCall};
pub use config::ElectionConfig;
pub use election::{Election, ElectionSnapshot};
pub use error::Error;
pub use event::Event;
pub use hash::Hash;
pub use ledger::{Ledger, Receipt};
pub use phase::{PhaseTransition, WorkflowPhase};
pub use proposal::{GENESIS_DESCRIPTION, GENESIS_PROPOSAL_ID, Proposal, ProposalId};
pub use tally::winning_proposal;
pub use voter::Voter;

/// Re-export for convenience
pub use ed25519_dalek::{Signature, SigningKey, VerifyingKey};
