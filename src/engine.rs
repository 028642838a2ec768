use crate::draw::{select_winner, DrawConfig, DrawSession, Reveal, Winner};
use crate::error::{RaffleError, Result};
use crate::roster::{AddOutcome, BulkSummary, Participant, Roster};
use rand::Rng;
use tracing::{debug, info};

/// Owns the roster and the winners of the current draw.
///
/// A draw runs one step at a time: [`begin_draw`](Self::begin_draw) validates
/// and seeds a pool, [`reveal_next`](Self::reveal_next) picks the next winner
/// without touching any state, and [`settle`](Self::settle) records that
/// winner and spends their ticket. Callers animate between the last two.
#[derive(Debug, Default)]
pub struct DrawEngine {
    roster: Roster,
    winners: Vec<Winner>,
    drawing: bool,
}

impl DrawEngine {
    pub fn new() -> Self {
        DrawEngine {
            roster: Roster::new(),
            winners: Vec::new(),
            drawing: false,
        }
    }

    pub fn add_or_merge_participant(
        &mut self,
        name: &str,
        class: &str,
        weight: u32,
    ) -> Result<AddOutcome> {
        self.ensure_idle()?;
        let outcome = self.roster.add_or_merge(name, class, weight)?;
        debug!(?outcome, name = name.trim(), "participant added");
        Ok(outcome)
    }

    pub fn bulk_add_participants<I, S>(&mut self, lines: I) -> Result<BulkSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_idle()?;
        let summary = self.roster.bulk_add(lines);
        info!(
            created = summary.created,
            merged = summary.merged,
            skipped = summary.skipped,
            "bulk add"
        );
        Ok(summary)
    }

    pub fn remove_participant(&mut self, id: u64) -> Result<Option<Participant>> {
        self.ensure_idle()?;
        Ok(self.roster.remove(id))
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.ensure_idle()?;
        info!(removed = self.roster.len(), "roster cleared");
        self.roster.clear();
        Ok(())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn participants(&self) -> &[Participant] {
        self.roster.participants()
    }

    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Validate a draw and start it. Nothing changes if validation fails.
    pub fn begin_draw(&mut self, config: DrawConfig) -> Result<DrawSession> {
        self.ensure_idle()?;
        if self.roster.is_empty() {
            return Err(RaffleError::EmptyRoster);
        }
        if config.num_winners == 0 {
            return Err(RaffleError::InvalidWinnerCount);
        }
        if !config.allow_duplicates && config.num_winners > self.roster.len() {
            return Err(RaffleError::InsufficientPool {
                requested: config.num_winners,
                available: self.roster.len(),
            });
        }

        info!(
            num_winners = config.num_winners,
            allow_duplicates = config.allow_duplicates,
            use_weights = config.use_weights,
            participants = self.roster.len(),
            "draw started"
        );
        self.winners.clear();
        self.drawing = true;
        Ok(DrawSession::new(config, self.roster.participants().to_vec()))
    }

    /// Pick the next winner from the session pool. Returns the pending reveal
    /// again if it has not been settled yet, and `None` once the draw is done.
    pub fn reveal_next<R: Rng + ?Sized>(
        &self,
        session: &mut DrawSession,
        rng: &mut R,
    ) -> Option<Reveal> {
        if session.pending.is_none() {
            if session.remaining() == 0 {
                return None;
            }
            let index = select_winner(&session.pool, session.config.use_weights, rng)?;
            session.pending = Some(session.pool[index].clone());
        }

        let winner = session.pending.clone()?;
        Some(Reveal {
            rank: session.drawn + 1,
            winner,
            pool: session.pool.clone(),
        })
    }

    /// Record the pending winner and, without duplicates, spend one of their
    /// tickets in both the pool and the roster.
    pub fn settle(&mut self, session: &mut DrawSession) -> Option<Winner> {
        let picked = session.pending.take()?;
        session.drawn += 1;

        let winner = Winner {
            rank: session.drawn,
            participant_id: picked.id,
            name: picked.name.clone(),
            class: picked.class.clone(),
        };
        info!(rank = winner.rank, name = %winner.name, class = %winner.class, "winner drawn");
        self.winners.push(winner.clone());

        if !session.config.allow_duplicates {
            session.take_ticket(picked.id);
            if self.roster.take_ticket(picked.id) == Some(0) {
                debug!(id = picked.id, "participant out of tickets");
            }
        }

        if session.remaining() == 0 || session.pool.is_empty() {
            self.drawing = false;
            info!(winners = self.winners.len(), "draw finished");
        }

        Some(winner)
    }

    /// Run a whole draw without pausing between winners
    pub fn draw<R: Rng + ?Sized>(&mut self, config: DrawConfig, rng: &mut R) -> Result<Vec<Winner>> {
        let mut session = self.begin_draw(config)?;
        while self.reveal_next(&mut session, rng).is_some() {
            self.settle(&mut session);
        }
        self.drawing = false;
        Ok(self.winners.clone())
    }

    /// Forget the winners. Spent tickets stay spent.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.winners.clear();
        Ok(())
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.drawing {
            Err(RaffleError::DrawInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn config(num_winners: usize, allow_duplicates: bool, use_weights: bool) -> DrawConfig {
        DrawConfig {
            num_winners,
            allow_duplicates,
            use_weights,
        }
    }

    fn engine_with(names: &[(&str, u32)]) -> DrawEngine {
        let mut engine = DrawEngine::new();
        for (name, weight) in names {
            engine.add_or_merge_participant(name, "", *weight).unwrap();
        }
        engine
    }

    #[test]
    fn test_draw_empty_roster_fails() {
        let mut engine = DrawEngine::new();
        let mut rng = StdRng::seed_from_u64(1);
        let result = engine.draw(config(1, false, true), &mut rng);
        assert!(matches!(result, Err(RaffleError::EmptyRoster)));
    }

    #[test]
    fn test_zero_winners_rejected() {
        let mut engine = engine_with(&[("A", 1)]);
        let mut rng = StdRng::seed_from_u64(1);
        let result = engine.draw(config(0, true, true), &mut rng);
        assert!(matches!(result, Err(RaffleError::InvalidWinnerCount)));
    }

    #[test]
    fn test_insufficient_pool_leaves_state_untouched() {
        let mut engine = engine_with(&[("A", 5), ("B", 5)]);
        let mut rng = StdRng::seed_from_u64(3);
        engine.draw(config(1, true, true), &mut rng).unwrap();
        let before_roster = engine.participants().to_vec();
        let before_winners = engine.winners().to_vec();

        let result = engine.draw(config(3, false, true), &mut rng);
        assert!(matches!(
            result,
            Err(RaffleError::InsufficientPool { requested: 3, available: 2 })
        ));
        assert_eq!(engine.participants(), before_roster.as_slice());
        assert_eq!(engine.winners(), before_winners.as_slice());
        assert!(!engine.is_drawing());
    }

    #[test]
    fn test_unique_draw_returns_distinct_winners() {
        let mut rng = StdRng::seed_from_u64(11);
        for k in 1..=5 {
            let mut engine = engine_with(&[("A", 1), ("B", 1), ("C", 1), ("D", 1), ("E", 1)]);
            let winners = engine.draw(config(k, false, true), &mut rng).unwrap();
            assert_eq!(winners.len(), k);
            let ids: HashSet<u64> = winners.iter().map(|w| w.participant_id).collect();
            assert_eq!(ids.len(), k);
            assert_eq!(engine.participants().len(), 5 - k);
            let ranks: Vec<usize> = winners.iter().map(|w| w.rank).collect();
            assert_eq!(ranks, (1..=k).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_unique_draw_spends_one_ticket_per_win() {
        let mut engine = engine_with(&[("A", 3), ("B", 2), ("C", 1), ("D", 4)]);
        let before: Vec<Participant> = engine.participants().to_vec();
        let mut rng = StdRng::seed_from_u64(5);

        let winners = engine.draw(config(3, false, true), &mut rng).unwrap();
        assert_eq!(winners.len(), 3);

        for original in &before {
            let wins = winners
                .iter()
                .filter(|w| w.participant_id == original.id)
                .count() as u32;
            let expected = original.weight - wins;
            match engine.participants().iter().find(|p| p.id == original.id) {
                Some(p) => assert_eq!(p.weight, expected),
                None => assert_eq!(expected, 0),
            }
        }
    }

    #[test]
    fn test_single_participant_draw_empties_roster() {
        let mut engine = DrawEngine::new();
        engine.add_or_merge_participant("A", "class1", 1).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let winners = engine.draw(config(1, false, false), &mut rng).unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].name, "A");
        assert_eq!(winners[0].class, "class1");
        assert!(engine.participants().is_empty());
    }

    #[test]
    fn test_duplicates_allowed_leaves_roster_alone() {
        let mut engine = engine_with(&[("A", 1), ("B", 2)]);
        let before = engine.participants().to_vec();
        let mut rng = StdRng::seed_from_u64(13);

        let winners = engine.draw(config(10, true, true), &mut rng).unwrap();
        assert_eq!(winners.len(), 10);
        assert_eq!(engine.participants(), before.as_slice());
    }

    #[test]
    fn test_winner_snapshot_survives_roster_changes() {
        let mut engine = engine_with(&[("A", 2)]);
        let mut rng = StdRng::seed_from_u64(17);
        engine.draw(config(1, true, true), &mut rng).unwrap();

        let id = engine.participants()[0].id;
        engine.remove_participant(id).unwrap();
        assert_eq!(engine.winners()[0].name, "A");
    }

    #[test]
    fn test_stepwise_draw_blocks_reentry() {
        let mut engine = engine_with(&[("A", 1), ("B", 1)]);
        let mut rng = StdRng::seed_from_u64(19);
        let mut session = engine.begin_draw(config(2, false, false)).unwrap();

        assert!(matches!(
            engine.begin_draw(config(1, false, false)),
            Err(RaffleError::DrawInProgress)
        ));
        assert!(matches!(
            engine.add_or_merge_participant("C", "", 1),
            Err(RaffleError::DrawInProgress)
        ));
        assert!(matches!(engine.reset(), Err(RaffleError::DrawInProgress)));

        let first = engine.reveal_next(&mut session, &mut rng).unwrap();
        assert_eq!(first.rank, 1);
        assert_eq!(first.pool.len(), 2);
        let again = engine.reveal_next(&mut session, &mut rng).unwrap();
        assert_eq!(again.winner.id, first.winner.id);

        let settled = engine.settle(&mut session).unwrap();
        assert_eq!(settled.participant_id, first.winner.id);
        assert_eq!(engine.participants().len(), 1);

        let second = engine.reveal_next(&mut session, &mut rng).unwrap();
        assert_eq!(second.rank, 2);
        assert_eq!(second.pool.len(), 1);
        assert_ne!(second.winner.id, first.winner.id);
        engine.settle(&mut session);

        assert_eq!(session.remaining(), 0);
        assert!(engine.reveal_next(&mut session, &mut rng).is_none());
        assert!(!engine.is_drawing());
        assert_eq!(engine.winners().len(), 2);
    }

    #[test]
    fn test_reset_keeps_spent_tickets() {
        let mut engine = engine_with(&[("A", 2)]);
        let mut rng = StdRng::seed_from_u64(23);
        engine.draw(config(1, false, true), &mut rng).unwrap();

        engine.reset().unwrap();
        assert!(engine.winners().is_empty());
        assert_eq!(engine.participants()[0].weight, 1);
    }

    #[test]
    fn test_new_draw_clears_previous_winners() {
        let mut engine = engine_with(&[("A", 1), ("B", 1), ("C", 1)]);
        let mut rng = StdRng::seed_from_u64(29);
        engine.draw(config(2, true, false), &mut rng).unwrap();
        let winners = engine.draw(config(1, true, false), &mut rng).unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(engine.winners().len(), 1);
    }
}
