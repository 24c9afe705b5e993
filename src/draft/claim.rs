use rand::Rng;
use serde::Serialize;

use super::{generate, DraftError, DraftOrder};
use crate::series::Series;

/// A game night or similar that a participant can claim to host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: u64,
    pub description: String,
    pub host: Option<u64>,
}

impl Event {
    pub fn is_available(&self) -> bool {
        self.host.is_none()
    }
}

/// Unhosted events numbered 1..=count
pub fn numbered_events(count: usize) -> Vec<Event> {
    (1..=count as u64)
        .map(|id| Event {
            id,
            description: format!("Event {}", id),
            host: None,
        })
        .collect()
}

/// Where the draft currently stands. Both counters are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DraftProgress {
    pub round: usize,
    pub pick: usize,
    pub complete: bool,
}

impl DraftProgress {
    fn start(order: &DraftOrder) -> Self {
        Self {
            round: 1,
            pick: 1,
            complete: order.rounds.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub user: u64,
    pub event: u64,
    pub description: String,
    pub progress: DraftProgress,
}

impl ClaimReceipt {
    pub fn message(&self) -> String {
        if self.progress.complete {
            return format!(
                "Congrats! Participant {} has successfully claimed {}. The draft is now complete.",
                self.user, self.description
            );
        }
        format!(
            "Congrats! Participant {} has successfully claimed {}. It is now the next person's turn in the draft. \
             We are at Pick number {} of Round {}.",
            self.user, self.description, self.progress.pick, self.progress.round
        )
    }
}

/// A series with a generated draft and the events being claimed
#[derive(Debug, Clone, Serialize)]
pub struct SeriesDraft {
    pub series_id: u64,
    pub events: Vec<Event>,
    pub order: DraftOrder,
    pub progress: DraftProgress,
}

impl SeriesDraft {
    pub fn new<R: Rng + ?Sized>(
        series: &Series,
        events: Vec<Event>,
        rng: &mut R,
    ) -> Result<Self, DraftError> {
        let order = generate(&series.participants, events.len(), rng)?;
        let progress = DraftProgress::start(&order);
        tracing::info!(
            "Draft generated for series {}: {} rounds, {} left over",
            series.id,
            order.round_count(),
            order.remainder
        );

        Ok(Self {
            series_id: series.id,
            events,
            order,
            progress,
        })
    }

    /// Participant whose turn it is, or None once the draft is complete
    pub fn current_picker(&self) -> Option<u64> {
        if self.progress.complete {
            return None;
        }
        self.order
            .rounds
            .get(self.progress.round - 1)?
            .get(self.progress.pick - 1)
            .copied()
    }

    pub fn first_available(&self) -> Option<&Event> {
        self.events.iter().find(|e| e.is_available())
    }

    /// Assign `event_id` to `user` and advance to the next pick.
    pub fn claim(&mut self, user: u64, event_id: u64) -> Result<ClaimReceipt, DraftError> {
        let expected = self.current_picker().ok_or(DraftError::DraftComplete)?;
        if user != expected {
            return Err(DraftError::NotYourTurn { expected, user });
        }

        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or(DraftError::UnknownEvent(event_id))?;
        if let Some(host) = event.host {
            return Err(DraftError::EventTaken {
                event: event_id,
                host,
            });
        }
        event.host = Some(user);
        let description = event.description.clone();

        self.advance();
        tracing::info!(
            "Participant {} claimed event {} in series {}",
            user,
            event_id,
            self.series_id
        );

        Ok(ClaimReceipt {
            user,
            event: event_id,
            description,
            progress: self.progress,
        })
    }

    fn advance(&mut self) {
        let picks_per_round = self
            .order
            .rounds
            .get(self.progress.round - 1)
            .map(Vec::len)
            .unwrap_or(0);

        self.progress.pick += 1;
        if self.progress.pick > picks_per_round {
            self.progress.pick = 1;
            self.progress.round += 1;
        }
        if self.progress.round > self.order.round_count() {
            self.progress.complete = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with(rounds: Vec<Vec<u64>>, events: usize) -> SeriesDraft {
        let order = DraftOrder {
            remainder: events - rounds.iter().map(Vec::len).sum::<usize>(),
            rounds,
        };
        SeriesDraft {
            series_id: 1,
            events: numbered_events(events),
            progress: DraftProgress::start(&order),
            order,
        }
    }

    #[test]
    fn test_claim_advances_pick_then_round() {
        let mut draft = draft_with(vec![vec![2, 1], vec![1, 2]], 4);
        assert_eq!(draft.current_picker(), Some(2));

        let receipt = draft.claim(2, 1).unwrap();
        assert!(receipt
            .message()
            .starts_with("Congrats! Participant 2 has successfully claimed Event 1."));
        assert_eq!(receipt.progress.pick, 2);
        assert_eq!(receipt.progress.round, 1);
        assert_eq!(draft.events[0].host, Some(2));

        let receipt = draft.claim(1, 2).unwrap();
        assert_eq!((receipt.progress.pick, receipt.progress.round), (1, 2));
        assert_eq!(draft.current_picker(), Some(1));
        assert!(receipt.message().contains("Pick number 1 of Round 2"));
    }

    #[test]
    fn test_claim_completes_draft() {
        let mut draft = draft_with(vec![vec![1]], 2);
        let receipt = draft.claim(1, 2).unwrap();
        assert!(receipt.progress.complete);
        assert!(receipt.message().contains("complete"));
        assert_eq!(draft.current_picker(), None);
        assert_eq!(draft.claim(1, 1), Err(DraftError::DraftComplete));
    }

    #[test]
    fn test_claim_out_of_turn() {
        let mut draft = draft_with(vec![vec![1, 2]], 2);
        assert_eq!(
            draft.claim(2, 1),
            Err(DraftError::NotYourTurn { expected: 1, user: 2 })
        );
        assert!(draft.events.iter().all(Event::is_available));
    }

    #[test]
    fn test_claim_taken_or_unknown_event() {
        let mut draft = draft_with(vec![vec![1, 2]], 2);
        draft.claim(1, 1).unwrap();
        assert_eq!(
            draft.claim(2, 1),
            Err(DraftError::EventTaken { event: 1, host: 1 })
        );
        assert_eq!(draft.claim(2, 7), Err(DraftError::UnknownEvent(7)));
        assert_eq!(draft.progress.pick, 2);
    }

    #[test]
    fn test_empty_draft_starts_complete() {
        let draft = draft_with(vec![], 1);
        assert!(draft.progress.complete);
        assert_eq!(draft.current_picker(), None);
    }

    #[test]
    fn test_new_from_series() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let series = crate::series::sample_series().remove(0);
        let draft =
            SeriesDraft::new(&series, numbered_events(5), &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(draft.order.round_count(), 2);
        assert_eq!(draft.order.remainder, 1);
        assert_eq!(draft.first_available().map(|e| e.id), Some(1));
    }
}
