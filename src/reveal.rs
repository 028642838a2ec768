use crate::draw::Reveal;
use crate::roster::Participant;
use rand::seq::SliceRandom;
use rand::Rng;

/// Names shown on the spinning wheel per frame
pub const WHEEL_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Spinning { frame: u32 },
    Pausing { remaining: u32 },
    Done,
}

/// Frame-by-frame reveal of one winner: a spin over random pool names that
/// lands on the winner, then a pause before the next draw step.
#[derive(Debug, Clone)]
pub struct RevealAnimation {
    reveal: Reveal,
    frames: u32,
    pause_frames: u32,
    phase: RevealPhase,
    wheel: Vec<String>,
    current_name: String,
}

impl RevealAnimation {
    pub fn new(reveal: Reveal, frames: u32, pause_frames: u32) -> Self {
        let frames = frames.max(1);
        RevealAnimation {
            reveal,
            frames,
            pause_frames,
            phase: RevealPhase::Spinning { frame: 0 },
            wheel: Vec::new(),
            current_name: String::new(),
        }
    }

    /// Move one frame forward
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.phase = match self.phase {
            RevealPhase::Spinning { frame } => {
                self.spin(frame, rng);
                let next = frame + 1;
                if next < self.frames {
                    RevealPhase::Spinning { frame: next }
                } else if self.pause_frames > 0 {
                    RevealPhase::Pausing {
                        remaining: self.pause_frames,
                    }
                } else {
                    RevealPhase::Done
                }
            }
            RevealPhase::Pausing { remaining } if remaining > 1 => RevealPhase::Pausing {
                remaining: remaining - 1,
            },
            RevealPhase::Pausing { .. } | RevealPhase::Done => RevealPhase::Done,
        };
    }

    fn spin<R: Rng + ?Sized>(&mut self, frame: u32, rng: &mut R) {
        let mut shuffled: Vec<&Participant> = self.reveal.pool.iter().collect();
        shuffled.shuffle(rng);
        self.wheel = shuffled
            .into_iter()
            .take(WHEEL_SIZE)
            .map(|p| p.name.clone())
            .collect();

        self.current_name = if frame + 1 >= self.frames {
            self.reveal.winner.name.clone()
        } else {
            self.reveal
                .pool
                .choose(rng)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| self.reveal.winner.name.clone())
        };
    }

    /// The spin has landed on the winner
    pub fn winner_revealed(&self) -> bool {
        !matches!(self.phase, RevealPhase::Spinning { .. })
    }

    pub fn is_done(&self) -> bool {
        self.phase == RevealPhase::Done
    }

    pub fn wheel(&self) -> &[String] {
        &self.wheel
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn rank(&self) -> usize {
        self.reveal.rank
    }

    /// Fraction of the spin completed, for progress gauges
    pub fn progress(&self) -> f64 {
        match self.phase {
            RevealPhase::Spinning { frame } => f64::from(frame) / f64::from(self.frames),
            _ => 1.0,
        }
    }
}
