use crate::codec::{decode_cards, encode_cards};
use crate::kv::KeyValueStore;
use crate::models::validate_sides;
use crate::{Card, CardId, CoreError, IdSequence};
use chrono::Utc;
use tracing::{debug, warn};

/// The canonical, ordered card list, mirrored into one key-value slot.
///
/// Memory is authoritative: a failed write is recorded in [`CardStore::error`]
/// and the mutation stays applied.
pub struct CardStore<S: KeyValueStore> {
    kv: S,
    key: String,
    cards: Vec<Card>,
    ids: IdSequence,
    error: Option<CoreError>,
}

impl<S: KeyValueStore> CardStore<S> {
    pub fn load(kv: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (cards, error) = match kv.get(&key) {
            Ok(None) => (Vec::new(), None),
            Ok(Some(payload)) => match decode_cards(&payload) {
                Ok(cards) => (cards, None),
                Err(e) => {
                    warn!(key = %key, error = %e, "stored cards are unreadable, starting empty");
                    (Vec::new(), Some(e))
                }
            },
            Err(e) => {
                warn!(key = %key, error = %e, "failed to load flashcards");
                (Vec::new(), Some(e))
            }
        };
        let last = cards.iter().map(|c| c.id).max().unwrap_or(0);
        debug!(key = %key, count = cards.len(), "card store loaded");
        Self {
            kv,
            key,
            cards,
            ids: IdSequence::starting_after(last),
            error,
        }
    }

    pub fn list(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn error(&self) -> Option<&CoreError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn storage_available(&self) -> bool {
        self.kv.probe()
    }

    /// Appends a new card. Returns `None` without touching anything when
    /// either side is blank.
    pub fn add(&mut self, front: &str, back: &str) -> Option<Card> {
        let (front, back) = validate_sides(front, back)?;
        let card = Card::new(self.ids.next_id(), front, back);
        self.cards.push(card.clone());
        debug!(id = card.id, "card added");
        self.persist();
        Some(card)
    }

    pub fn update(&mut self, id: CardId, front: &str, back: &str) -> Option<Card> {
        let (front, back) = validate_sides(front, back)?;
        let card = self.cards.iter_mut().find(|c| c.id == id)?;
        card.front = front.to_string();
        card.back = back.to_string();
        card.updated_at = Some(Utc::now());
        let updated = card.clone();
        debug!(id, "card updated");
        self.persist();
        Some(updated)
    }

    pub fn delete(&mut self, id: CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == before {
            return false;
        }
        debug!(id, "card deleted");
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        match self.kv.remove(&self.key) {
            Ok(()) => self.error = None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to clear flashcards");
                self.error = Some(e);
            }
        }
    }

    fn persist(&mut self) {
        let result = encode_cards(&self.cards).and_then(|payload| self.kv.set(&self.key, &payload));
        match result {
            Ok(()) => self.error = None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to save flashcards");
                self.error = Some(e);
            }
        }
    }
}
