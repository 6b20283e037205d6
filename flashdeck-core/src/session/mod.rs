//! Study and quiz runs over a shuffled snapshot of the card list.
//!
//! A session exists only once started; dropping it is how a run is
//! abandoned. Both kinds own their random source so that tests can seed it.

pub mod quiz;
pub mod study;

pub use quiz::{build_options, Question, QuizSession, PLACEHOLDER_SUFFIX, WRONG_OPTIONS};
pub use study::StudySession;

use crate::{Card, CoreError};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

pub(crate) fn require_cards(cards: &[Card], required: usize) -> Result<(), CoreError> {
    if cards.len() < required {
        return Err(CoreError::NotEnoughCards {
            required,
            available: cards.len(),
        });
    }
    Ok(())
}
