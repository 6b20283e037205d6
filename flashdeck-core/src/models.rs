use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CardId = i64;

/// Minimum number of cards a quiz needs: one to ask, one to borrow a distractor from.
pub const MIN_QUIZ_CARDS: usize = 2;
pub const MIN_STUDY_CARDS: usize = 1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Card {
    pub fn new(id: CardId, front: impl Into<String>, back: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            front: front.into(),
            back: back.into(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Form state behind the add and edit screens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
}

impl CardDraft {
    pub fn from_card(card: &Card) -> Self {
        Self {
            front: card.front.clone(),
            back: card.back.clone(),
        }
    }

    /// Trimmed `(front, back)` when both sides have content.
    pub fn validated(&self) -> Option<(&str, &str)> {
        validate_sides(&self.front, &self.back)
    }
}

pub(crate) fn validate_sides<'a>(front: &'a str, back: &'a str) -> Option<(&'a str, &'a str)> {
    let (front, back) = (front.trim(), back.trim());
    if front.is_empty() || back.is_empty() {
        None
    } else {
        Some((front, back))
    }
}

/// Hands out card ids seeded from the wall clock but never repeating.
#[derive(Clone, Debug, Default)]
pub struct IdSequence {
    last: CardId,
}

impl IdSequence {
    pub fn starting_after(last: CardId) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> CardId {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recall {
    Known,
    StillLearning,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Share of correct answers in whole percent, rounding halves up.
    pub fn percentage(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let (c, t) = (self.correct as u64, self.total as u64);
        Some(((200 * c + t) / (2 * t)) as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Finished,
}
