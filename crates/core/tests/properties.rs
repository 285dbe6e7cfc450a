//! Property tests over arbitrary sequences of election operations.

use ezballot_core::{
    Address, Election, Error, Event, OwnerAuthorizer, Proposal, ProposalId, WorkflowPhase,
    winning_proposal,
};
use proptest::prelude::*;

const OWNER: Address = Address([0xff; 20]);

fn voter(n: u8) -> Address {
    Address([n; 20])
}

/// One operation attempted by some caller. Callers are drawn from a small
/// pool so collisions (duplicate registration, double votes) are common.
#[derive(Clone, Debug)]
enum Op {
    Register { caller: u8, who: u8 },
    Advance { caller: u8, step: u8 },
    Submit { caller: u8, text: String },
    Vote { caller: u8, proposal: ProposalId },
    Tally { caller: u8 },
}

fn caller(n: u8) -> Address {
    // 0 stands for the owner.
    if n == 0 { OWNER } else { voter(n) }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 1u8..6).prop_map(|(caller, who)| Op::Register { caller, who }),
        (0u8..3, 0u8..4).prop_map(|(caller, step)| Op::Advance { caller, step }),
        (0u8..6, "[ a-z]{0,6}").prop_map(|(caller, text)| Op::Submit { caller, text }),
        (0u8..6, 0u64..5).prop_map(|(caller, proposal)| Op::Vote { caller, proposal }),
        (0u8..3).prop_map(|caller| Op::Tally { caller }),
    ]
}

fn apply(election: &mut Election, op: &Op) -> Result<Event, Error> {
    match op {
        Op::Register { caller: c, who } => election.register_voter(&caller(*c), voter(*who)),
        Op::Advance { caller: c, step } => {
            let c = caller(*c);
            match step {
                0 => election.start_proposals_registration(&c),
                1 => election.end_proposals_registration(&c),
                2 => election.start_voting_session(&c),
                _ => election.end_voting_session(&c),
            }
        }
        Op::Submit { caller: c, text } => election.submit_proposal(&caller(*c), text.clone()),
        Op::Vote { caller: c, proposal } => election.cast_vote(&caller(*c), *proposal),
        Op::Tally { caller: c } => election.tally_votes(&caller(*c)),
    }
}

proptest! {
    /// The phase never moves backwards and never skips a step, and failed
    /// operations never change state.
    #[test]
    fn phase_is_monotonic(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut election = Election::new(OwnerAuthorizer::new(OWNER));

        for op in &ops {
            let before_phase = election.phase();
            let before_hash = election.state_hash().unwrap();

            match apply(&mut election, op) {
                Ok(Event::PhaseChanged { from, to }) => {
                    prop_assert_eq!(from, before_phase);
                    prop_assert_eq!(from.next(), Some(to));
                    prop_assert_eq!(election.phase(), to);
                }
                Ok(_) => prop_assert_eq!(election.phase(), before_phase),
                Err(_) => {
                    prop_assert_eq!(election.phase(), before_phase);
                    prop_assert_eq!(election.state_hash().unwrap(), before_hash);
                }
            }
        }
    }

    /// Vote totals equal the number of voters who voted, and each voter's
    /// recorded choice matches a counted vote.
    #[test]
    fn votes_are_conserved(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut election = Election::new(OwnerAuthorizer::new(OWNER));
        let mut voted = std::collections::BTreeSet::new();

        for op in &ops {
            if let Ok(Event::Voted { voter, .. }) = apply(&mut election, op) {
                // A second vote can never succeed.
                prop_assert!(voted.insert(voter));
            }
        }

        let snapshot = election.snapshot();
        let total: u64 = snapshot.proposals.iter().map(|p| p.vote_count).sum();
        prop_assert_eq!(total, voted.len() as u64);

        for (address, record) in &snapshot.voters {
            prop_assert_eq!(record.has_voted, voted.contains(address));
            prop_assert_eq!(record.has_voted, record.voted_proposal_id.is_some());
        }

        if election.phase() == WorkflowPhase::VotesTallied {
            prop_assert_eq!(
                election.winning_proposal_id(),
                winning_proposal(&snapshot.proposals)
            );
        }
    }

    /// The winner has the maximum count and no lower id has the same count.
    #[test]
    fn tally_prefers_lowest_maximal_id(counts in prop::collection::vec(0u64..5, 1..12)) {
        let proposals: Vec<Proposal> = counts
            .iter()
            .map(|&vote_count| Proposal { description: "p".into(), vote_count })
            .collect();

        let winner = winning_proposal(&proposals) as usize;
        let max = *counts.iter().max().unwrap();

        prop_assert_eq!(counts[winner], max);
        prop_assert!(counts[..winner].iter().all(|&c| c < max));
    }

    /// Registering the same address twice always fails.
    #[test]
    fn registry_is_a_set(whos in prop::collection::vec(1u8..20, 1..30)) {
        let mut election = Election::new(OwnerAuthorizer::new(OWNER));
        let mut seen = std::collections::BTreeSet::new();

        for who in whos {
            let result = election.register_voter(&OWNER, voter(who));
            if seen.insert(who) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(matches!(result, Err(Error::DuplicateVoter(_))));
            }
        }
        prop_assert_eq!(election.voter_count(), seen.len());
    }
}
