use thiserror::Error;

use crate::cards::Card;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid board notation: {0}")]
    InvalidBoardNotation(String),

    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),

    #[error("Need at least {need} cards, got {got}")]
    NotEnoughCards { need: usize, got: usize },

    #[error("Cannot deal {requested} cards, only {available} remaining")]
    NotEnoughDeck { requested: usize, available: usize },

    #[error("Hand must be exactly 2 cards, got {0}")]
    InvalidHandSize(usize),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl AdvisorError {
    /// True for malformed card text, as opposed to misuse of valid cards.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AdvisorError::InvalidRank(_)
                | AdvisorError::InvalidSuit(_)
                | AdvisorError::InvalidCardNotation(_)
                | AdvisorError::InvalidBoardNotation(_)
                | AdvisorError::DuplicateCard(_)
        )
    }
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;
