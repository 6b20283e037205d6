use super::{entropy_rng, require_cards};
use crate::shuffle::{shuffle, shuffled};
use crate::{Card, CoreError, Phase, Score, MIN_QUIZ_CARDS};
use rand::rngs::StdRng;
use rand::Rng;

/// Number of wrong options shown beside the correct one.
pub const WRONG_OPTIONS: usize = 3;

/// Appended to the correct answer when the deck has too few distinct
/// backs to fill every wrong slot.
pub const PLACEHOLDER_SUFFIX: &str = " (not correct)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub answered: bool,
}

impl Question {
    pub fn is_correct_option(&self, index: usize) -> bool {
        self.options
            .get(index)
            .map(|o| *o == self.correct_answer)
            .unwrap_or(false)
    }

    /// Whether the locked-in choice matched; `None` until answered.
    pub fn was_correct(&self) -> Option<bool> {
        self.selected.map(|i| self.is_correct_option(i))
    }
}

/// Options for the card at `index` of `snapshot`: its back plus
/// [`WRONG_OPTIONS`] distractors, in random order.
pub fn build_options<R: Rng + ?Sized>(snapshot: &[Card], index: usize, rng: &mut R) -> Vec<String> {
    let Some(card) = snapshot.get(index) else {
        return Vec::new();
    };
    let correct = card.back.as_str();

    let mut wrong: Vec<String> = Vec::new();
    for (i, other) in snapshot.iter().enumerate() {
        if i == index || other.back == correct || wrong.contains(&other.back) {
            continue;
        }
        wrong.push(other.back.clone());
    }
    shuffle(&mut wrong, rng);
    wrong.truncate(WRONG_OPTIONS);
    while wrong.len() < WRONG_OPTIONS {
        wrong.push(format!("{correct}{PLACEHOLDER_SUFFIX}"));
    }

    let mut options = Vec::with_capacity(WRONG_OPTIONS + 1);
    options.push(correct.to_string());
    options.extend(wrong);
    shuffle(&mut options, rng);
    options
}

/// Multiple-choice run. Answering and moving on are separate steps so the
/// outcome can be shown in between.
pub struct QuizSession {
    source: Vec<Card>,
    order: Vec<Card>,
    position: usize,
    score: Score,
    question: Option<Question>,
    phase: Phase,
    rng: StdRng,
}

impl QuizSession {
    pub fn start(cards: &[Card]) -> Result<Self, CoreError> {
        Self::with_rng(cards, entropy_rng())
    }

    pub fn with_rng(cards: &[Card], mut rng: StdRng) -> Result<Self, CoreError> {
        require_cards(cards, MIN_QUIZ_CARDS)?;
        let order = shuffled(cards, &mut rng);
        let mut session = Self {
            source: cards.to_vec(),
            order,
            position: 0,
            score: Score::default(),
            question: None,
            phase: Phase::InProgress,
            rng,
        };
        session.ask();
        Ok(session)
    }

    fn ask(&mut self) {
        let Some(card) = self.order.get(self.position) else {
            self.question = None;
            return;
        };
        let options = build_options(&self.order, self.position, &mut self.rng);
        self.question = Some(Question {
            prompt: card.front.clone(),
            correct_answer: card.back.clone(),
            options,
            selected: None,
            answered: false,
        });
    }

    pub fn question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress => self.question.as_ref(),
            Phase::Finished => None,
        }
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

    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.order.len()
    }

    pub fn percentage(&self) -> Option<u32> {
        if self.is_finished() {
            self.score.percentage()
        } else {
            None
        }
    }

    /// Locks in option `index`. Returns whether it was right, or `None` when
    /// the question is already answered or there is no such option.
    pub fn select(&mut self, index: usize) -> Option<bool> {
        if self.phase == Phase::Finished {
            return None;
        }
        let q = self.question.as_mut()?;
        if q.answered || index >= q.options.len() {
            return None;
        }
        q.selected = Some(index);
        q.answered = true;
        let correct = q.options[index] == q.correct_answer;
        self.score.record(correct);
        Some(correct)
    }

    /// Moves past an answered question. Returns false if there was nothing
    /// to move past yet.
    pub fn next(&mut self) -> bool {
        if self.phase == Phase::Finished {
            return false;
        }
        if !self.question.as_ref().map(|q| q.answered).unwrap_or(false) {
            return false;
        }
        self.position += 1;
        if self.position >= self.order.len() {
            self.phase = Phase::Finished;
            self.question = None;
        } else {
            self.ask();
        }
        true
    }

    pub fn restart(&mut self) {
        self.order = shuffled(&self.source, &mut self.rng);
        self.position = 0;
        self.score = Score::default();
        self.phase = Phase::InProgress;
        self.ask();
    }
}
