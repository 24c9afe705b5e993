//! Draft order generation for a series
//!
//! A draft hands out events to participants. Participants are shuffled into a
//! round, the next round runs the same order backwards (snake draft), and
//! this repeats for as many full rounds as the events allow. Events that do
//! not fill a full round are the remainder.

pub mod claim;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub use claim::SeriesDraft;

/// How many times a shuffle that repeats an earlier round is retried before
/// the repeat is accepted. Small participant sets run out of fresh orders.
const MAX_SHUFFLE_RETRIES: usize = 16;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("series has no participants to draft")]
    NoParticipants,

    #[error("the draft is already complete")]
    DraftComplete,

    #[error("it is participant {expected}'s turn, not participant {user}'s")]
    NotYourTurn { expected: u64, user: u64 },

    #[error("event {0} is not part of this series")]
    UnknownEvent(u64),

    #[error("event {event} is already hosted by participant {host}")]
    EventTaken { event: u64, host: u64 },
}

/// Rounds of picks. Each inner vec is one round, each element one pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftOrder {
    pub rounds: Vec<Vec<u64>>,
    /// Events left over after the full rounds
    pub remainder: usize,
}

impl DraftOrder {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "The draft order has been calculated. There will be {} game(s) not included in the draft. \
             Visit the individual Series page to view the draft order.",
            self.remainder
        )
    }
}

/// Build a snake draft over `participants` for `event_count` events.
pub fn generate<R: Rng + ?Sized>(
    participants: &[u64],
    event_count: usize,
    rng: &mut R,
) -> Result<DraftOrder, DraftError> {
    if participants.is_empty() {
        return Err(DraftError::NoParticipants);
    }

    let max_rounds = event_count / participants.len();
    let mut rounds: Vec<Vec<u64>> = Vec::with_capacity(max_rounds);
    let mut retries = 0;

    while rounds.len() < max_rounds {
        let mut order = participants.to_vec();
        order.shuffle(rng);

        if rounds.contains(&order) && retries < MAX_SHUFFLE_RETRIES {
            retries += 1;
            continue;
        }
        retries = 0;

        rounds.push(order.clone());
        if rounds.len() < max_rounds {
            order.reverse();
            rounds.push(order);
        }
    }

    let remainder = event_count - participants.len() * rounds.len();
    tracing::debug!(
        "Generated draft: {} participants, {} rounds, remainder {}",
        participants.len(),
        rounds.len(),
        remainder
    );

    Ok(DraftOrder { rounds, remainder })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(mut v: Vec<u64>) -> Vec<u64> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_single_round() {
        let mut rng = StdRng::seed_from_u64(7);
        let draft = generate(&[1, 2, 3, 4, 5], 5, &mut rng).unwrap();
        assert_eq!(draft.round_count(), 1);
        assert_eq!(draft.remainder, 0);
        assert_eq!(sorted(draft.rounds[0].clone()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_even_rounds_reverse_previous() {
        let mut rng = StdRng::seed_from_u64(42);
        let draft = generate(&[1, 2, 3, 4, 5], 15, &mut rng).unwrap();
        assert_eq!(draft.round_count(), 3);

        let mut reversed = draft.rounds[0].clone();
        reversed.reverse();
        assert_eq!(draft.rounds[1], reversed);

        for round in &draft.rounds {
            assert_eq!(sorted(round.clone()), vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn test_remainder() {
        let mut rng = StdRng::seed_from_u64(1);
        let draft = generate(&[1, 2, 3, 4, 5], 12, &mut rng).unwrap();
        assert_eq!(draft.round_count(), 2);
        assert_eq!(draft.remainder, 2);
    }

    #[test]
    fn test_fewer_events_than_participants() {
        let mut rng = StdRng::seed_from_u64(1);
        let draft = generate(&[1, 2, 3], 2, &mut rng).unwrap();
        assert!(draft.rounds.is_empty());
        assert_eq!(draft.remainder, 2);
    }

    #[test]
    fn test_shuffled_rounds_do_not_repeat() {
        let mut rng = StdRng::seed_from_u64(8);
        let draft = generate(&[1, 2, 3, 4, 5], 30, &mut rng).unwrap();
        assert_eq!(draft.round_count(), 6);

        let shuffled: Vec<&Vec<u64>> = draft.rounds.iter().step_by(2).collect();
        assert_eq!(shuffled.len(), 3);
        for (i, a) in shuffled.iter().enumerate() {
            for b in &shuffled[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_small_sets_terminate() {
        let mut rng = StdRng::seed_from_u64(3);
        let draft = generate(&[1, 2], 38, &mut rng).unwrap();
        assert_eq!(draft.round_count(), 19);
        assert_eq!(draft.remainder, 0);

        let solo = generate(&[9], 4, &mut rng).unwrap();
        assert_eq!(solo.rounds, vec![vec![9]; 4]);
    }

    #[test]
    fn test_no_participants() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate(&[], 10, &mut rng), Err(DraftError::NoParticipants));
    }

    #[test]
    fn test_same_seed_same_draft() {
        let a = generate(&[1, 2, 3, 4], 16, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate(&[1, 2, 3, 4], 16, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary_mentions_remainder() {
        let draft = DraftOrder {
            rounds: vec![vec![1, 2]],
            remainder: 3,
        };
        assert!(draft.summary().contains("There will be 3 game(s) not included"));
    }
}
