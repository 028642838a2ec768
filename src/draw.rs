use crate::roster::Participant;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawConfig {
    pub num_winners: usize,
    pub allow_duplicates: bool,
    pub use_weights: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        DrawConfig {
            num_winners: 1,
            allow_duplicates: false,
            use_weights: true,
        }
    }
}

/// A drawn participant, copied out of the roster when drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    /// 1-based draw order
    pub rank: usize,
    pub participant_id: u64,
    pub name: String,
    pub class: String,
}

/// One pending step of a draw: who was picked and the pool they came from
#[derive(Debug, Clone)]
pub struct Reveal {
    pub rank: usize,
    pub winner: Participant,
    pub pool: Vec<Participant>,
}

/// Working state of a draw between reveal steps
#[derive(Debug)]
pub struct DrawSession {
    pub(crate) config: DrawConfig,
    pub(crate) pool: Vec<Participant>,
    pub(crate) pending: Option<Participant>,
    pub(crate) drawn: usize,
}

impl DrawSession {
    pub(crate) fn new(config: DrawConfig, pool: Vec<Participant>) -> Self {
        DrawSession {
            config,
            pool,
            pending: None,
            drawn: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.config.num_winners.saturating_sub(self.drawn)
    }

    pub(crate) fn take_ticket(&mut self, id: u64) {
        let Some(index) = self.pool.iter().position(|p| p.id == id) else {
            return;
        };
        let participant = &mut self.pool[index];
        participant.weight = participant.weight.saturating_sub(1);
        if participant.weight == 0 {
            self.pool.remove(index);
        }
    }
}

/// Pick the index of a winner from `pool`.
///
/// Unweighted picks are uniform over entries. Weighted picks draw a value in
/// `[0, total)` and walk the pool in order subtracting each entry's tickets
/// until the remainder drops to zero or below; the last entry is the fallback.
/// Only an empty pool yields `None`.
pub fn select_winner<R: Rng + ?Sized>(
    pool: &[Participant],
    use_weights: bool,
    rng: &mut R,
) -> Option<usize> {
    if pool.is_empty() {
        return None;
    }

    if !use_weights {
        return Some(rng.gen_range(0..pool.len()));
    }

    let total: u64 = pool.iter().map(|p| u64::from(p.weight)).sum();
    let mut remainder = rng.r#gen::<f64>() * total as f64;

    for (index, participant) in pool.iter().enumerate() {
        remainder -= f64::from(participant.weight);
        if remainder <= 0.0 {
            return Some(index);
        }
    }

    Some(pool.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn participant(id: u64, name: &str, weight: u32) -> Participant {
        Participant {
            id,
            name: name.to_string(),
            class: "N/A".to_string(),
            weight,
        }
    }

    #[test]
    fn test_empty_pool_has_no_winner() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_winner(&[], true, &mut rng), None);
        assert_eq!(select_winner(&[], false, &mut rng), None);
    }

    #[test]
    fn test_single_entry_always_wins() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = vec![participant(1, "Solo", 7)];
        for _ in 0..100 {
            assert_eq!(select_winner(&pool, true, &mut rng), Some(0));
            assert_eq!(select_winner(&pool, false, &mut rng), Some(0));
        }
    }

    #[test]
    fn test_weighted_selection_favors_heavy_entry() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = vec![participant(1, "Light", 1), participant(2, "Heavy", 99)];
        let trials = 10_000;
        let heavy = (0..trials)
            .filter(|_| select_winner(&pool, true, &mut rng) == Some(1))
            .count();
        let ratio = heavy as f64 / trials as f64;
        assert!(ratio > 0.97 && ratio < 1.0, "heavy ratio was {}", ratio);
    }

    #[test]
    fn test_unweighted_selection_ignores_tickets() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = vec![participant(1, "Light", 1), participant(2, "Heavy", 99)];
        let trials = 10_000;
        let heavy = (0..trials)
            .filter(|_| select_winner(&pool, false, &mut rng) == Some(1))
            .count();
        let ratio = heavy as f64 / trials as f64;
        assert!(ratio > 0.45 && ratio < 0.55, "heavy ratio was {}", ratio);
    }

    #[test]
    fn test_session_take_ticket() {
        let pool = vec![participant(1, "A", 2), participant(2, "B", 1)];
        let mut session = DrawSession::new(DrawConfig::default(), pool);

        session.take_ticket(1);
        assert_eq!(session.pool[0].weight, 1);
        session.take_ticket(2);
        assert_eq!(session.pool.len(), 1);
        session.take_ticket(99);
        assert_eq!(session.pool.len(), 1);
    }
}
