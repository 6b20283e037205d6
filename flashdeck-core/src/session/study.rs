use super::{entropy_rng, require_cards};
use crate::shuffle::shuffled;
use crate::{Card, CoreError, Phase, Recall, Score, MIN_STUDY_CARDS};
use rand::rngs::StdRng;

/// Self-assessed walk through every card once.
pub struct StudySession {
    source: Vec<Card>,
    order: Vec<Card>,
    position: usize,
    score: Score,
    revealed: bool,
    phase: Phase,
    rng: StdRng,
}

impl StudySession {
    pub fn start(cards: &[Card]) -> Result<Self, CoreError> {
        Self::with_rng(cards, entropy_rng())
    }

    pub fn with_rng(cards: &[Card], mut rng: StdRng) -> Result<Self, CoreError> {
        require_cards(cards, MIN_STUDY_CARDS)?;
        let order = shuffled(cards, &mut rng);
        Ok(Self {
            source: cards.to_vec(),
            order,
            position: 0,
            score: Score::default(),
            revealed: false,
            phase: Phase::InProgress,
            rng,
        })
    }

    pub fn current(&self) -> Option<&Card> {
        match self.phase {
            Phase::InProgress => self.order.get(self.position),
            Phase::Finished => None,
        }
    }

    pub fn order(&self) -> &[Card] {
        &self.order
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Result in whole percent once the run is over.
    pub fn percentage(&self) -> Option<u32> {
        if self.is_finished() {
            self.score.percentage()
        } else {
            None
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Turns the current card over.
    pub fn flip(&mut self) {
        if self.phase == Phase::InProgress {
            self.revealed = !self.revealed;
        }
    }

    pub fn answer(&mut self, recall: Recall) {
        if self.phase == Phase::Finished {
            return;
        }
        self.score.record(recall == Recall::Known);
        self.revealed = false;
        self.position += 1;
        if self.position >= self.order.len() {
            self.phase = Phase::Finished;
        }
    }

    pub fn restart(&mut self) {
        self.order = shuffled(&self.source, &mut self.rng);
        self.position = 0;
        self.score = Score::default();
        self.revealed = false;
        self.phase = Phase::InProgress;
    }
}
