use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("malformed card data: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("need at least {required} cards, have {available}")]
    NotEnoughCards { required: usize, available: usize },
}

impl CoreError {
    pub fn storage(msg: impl Into<String>) -> Self {
        CoreError::Storage(msg.into())
    }
}
