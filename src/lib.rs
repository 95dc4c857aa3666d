pub mod advisor;
pub mod cards;
pub mod cli;
pub mod display;
pub mod equity;
pub mod error;
pub mod hand_evaluator;
pub mod math_engine;
pub mod preflop;

pub use cards::{build_deck, parse_card, parse_cards, Card, Rank, Suit};
pub use equity::{estimate_equity, estimate_equity_with_rng, simulate_equity, EquityResult};
pub use error::{AdvisorError, AdvisorResult};
pub use hand_evaluator::{compare, evaluate, EvaluatedHand, HandCategory};
pub use preflop::score_preflop;
