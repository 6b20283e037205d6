use crate::{Card, CoreError};

pub fn encode_cards(cards: &[Card]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(cards)?)
}

pub fn decode_cards(payload: &str) -> Result<Vec<Card>, CoreError> {
    Ok(serde_json::from_str(payload)?)
}

/// Indented variant used for files a person might open.
pub fn encode_cards_pretty(cards: &[Card]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(cards)?)
}
