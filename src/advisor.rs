//! Heuristic action advice on top of the ranking and equity kernel.
//!
//! Chip amounts are in big blinds. Preflop decisions use the closed-form
//! starting-hand score scaled by seat; postflop decisions use simulated
//! equity against the remaining opponents.

use std::fmt;
use std::str::FromStr;

use crate::cards::{format_cards, Card};
use crate::equity::{estimate_equity_with_config, SimulationConfig};
use crate::error::{AdvisorError, AdvisorResult};
use crate::math_engine::{implied_odds, pot_odds};
use crate::preflop::score_preflop;

const OPEN_LARGE_BB: f64 = 3.0;
const OPEN_STANDARD_BB: f64 = 2.5;
const OPEN_MIN_BB: f64 = 2.0;
const RERAISE_MULTIPLIER: f64 = 3.0;
const BET_LARGE_POT: f64 = 1.0;
const BET_MEDIUM_POT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    UTG,
    MP,
    CO,
    BTN,
    SB,
    BB,
}

pub const ALL_POSITIONS: [Position; 6] = [
    Position::UTG,
    Position::MP,
    Position::CO,
    Position::BTN,
    Position::SB,
    Position::BB,
];

impl Position {
    /// 6-max seat weight; larger means a wider playable range.
    pub fn weight(self) -> f64 {
        match self {
            Position::UTG => 1.0,
            Position::MP => 1.2,
            Position::CO => 1.5,
            Position::BTN => 1.8,
            Position::SB => 0.8,
            Position::BB => 1.0,
        }
    }

    pub fn is_late(self) -> bool {
        matches!(self, Position::CO | Position::BTN)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::UTG => "UTG",
            Position::MP => "MP",
            Position::CO => "CO",
            Position::BTN => "BTN",
            Position::SB => "SB",
            Position::BB => "BB",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = AdvisorError;

    fn from_str(s: &str) -> AdvisorResult<Position> {
        let upper = s.trim().to_uppercase();
        ALL_POSITIONS
            .iter()
            .copied()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| {
                AdvisorError::InvalidValue(format!(
                    "Invalid position '{}'. Valid: UTG, MP, CO, BTN, SB, BB",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Stage {
    pub fn from_board(board: &[Card]) -> AdvisorResult<Stage> {
        match board.len() {
            0 => Ok(Stage::Preflop),
            3 => Ok(Stage::Flop),
            4 => Ok(Stage::Turn),
            5 => Ok(Stage::River),
            n => Err(AdvisorError::InvalidValue(format!(
                "Board must have 0, 3, 4 or 5 cards, got {}",
                n
            ))),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Preflop => write!(f, "preflop"),
            Stage::Flop => write!(f, "flop"),
            Stage::Turn => write!(f, "turn"),
            Stage::River => write!(f, "river"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call => write!(f, "CALL"),
            Action::Raise => write!(f, "RAISE"),
        }
    }
}

/// Everything the advisor needs to know about the current decision.
#[derive(Debug, Clone)]
pub struct Spot {
    pub hand: Vec<Card>,
    pub board: Vec<Card>,
    pub position: Position,
    pub stack: f64,
    pub to_call: f64,
    pub pot: f64,
    pub opponents: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub amount: f64,
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

impl Decision {
    fn new(action: Action, amount: f64, confidence: f64, reasoning: Vec<String>) -> Self {
        Decision {
            action,
            amount,
            confidence,
            reasoning,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount > 0.0 {
            write!(
                f,
                "{} {:.1} (confidence {:.2})",
                self.action, self.amount, self.confidence
            )
        } else {
            write!(f, "{} (confidence {:.2})", self.action, self.confidence)
        }
    }
}

/// A legal action for a spot and the amounts it may be taken for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionOption {
    pub action: Action,
    pub min_amount: f64,
    pub max_amount: f64,
}

impl ActionOption {
    fn fixed(action: Action, amount: f64) -> Self {
        ActionOption {
            action,
            min_amount: amount,
            max_amount: amount,
        }
    }

    pub fn allows(&self, amount: f64) -> bool {
        match self.action {
            Action::Fold | Action::Check => amount == 0.0,
            Action::Call | Action::Raise => {
                amount >= self.min_amount && amount <= self.max_amount
            }
        }
    }
}

/// Actions the player can take with `spot.stack` behind. Folding is always
/// legal, checking only when there is nothing to call, calling only when the
/// stack covers it. A raise needs chips beyond the call and is sized between
/// `max(2 * to_call, pot / 2)` and the whole stack; a short stack may still
/// go all-in below that minimum.
pub fn valid_actions(spot: &Spot) -> Vec<ActionOption> {
    let mut options = vec![ActionOption::fixed(Action::Fold, 0.0)];
    if spot.to_call == 0.0 {
        options.push(ActionOption::fixed(Action::Check, 0.0));
    }
    if spot.to_call > 0.0 && spot.to_call <= spot.stack {
        options.push(ActionOption::fixed(Action::Call, spot.to_call));
    }
    if spot.stack > spot.to_call {
        let min_raise = (spot.to_call * 2.0).max(spot.pot * 0.5).min(spot.stack);
        options.push(ActionOption {
            action: Action::Raise,
            min_amount: min_raise,
            max_amount: spot.stack,
        });
    }
    options
}

pub fn validate_action(spot: &Spot, action: Action, amount: f64) -> bool {
    valid_actions(spot)
        .iter()
        .any(|opt| opt.action == action && opt.allows(amount))
}

/// Fits a heuristic decision to what the stack allows. Raises are clamped
/// into the legal range; an unaffordable raise falls back to call, check or
/// fold in that order.
fn fit_to_stack(spot: &Spot, mut decision: Decision) -> Decision {
    let options = valid_actions(spot);
    let find = |action: Action| options.iter().find(|opt| opt.action == action).copied();

    if decision.action == Action::Raise {
        if let Some(raise) = find(Action::Raise) {
            let amount = decision.amount.clamp(raise.min_amount, raise.max_amount);
            if amount < decision.amount {
                decision
                    .reasoning
                    .push(format!("Raise capped at stack ({:.1})", amount));
            }
            decision.amount = amount;
            return decision;
        }
        decision.reasoning.push("Stack too short to raise".to_string());
        decision.action = if find(Action::Call).is_some() {
            Action::Call
        } else if find(Action::Check).is_some() {
            Action::Check
        } else {
            Action::Fold
        };
    }

    if decision.action == Action::Call && find(Action::Call).is_none() {
        decision.reasoning.push("Stack cannot cover the call".to_string());
        decision.action = Action::Fold;
    }
    decision.amount = match decision.action {
        Action::Call => spot.to_call,
        Action::Fold | Action::Check => 0.0,
        Action::Raise => decision.amount,
    };
    decision
}

pub fn preflop_advice(spot: &Spot) -> AdvisorResult<Decision> {
    let strength = score_preflop(&spot.hand)?;
    let adjusted = strength * spot.position.weight();
    let mut reasoning = vec![
        format!("Hand strength: {:.2}", strength),
        format!("Position-adjusted strength ({}): {:.2}", spot.position, adjusted),
    ];

    if spot.to_call == 0.0 {
        if adjusted > 0.7 {
            reasoning.push("Strong hand, open large".to_string());
            return Ok(Decision::new(Action::Raise, OPEN_LARGE_BB, 0.9, reasoning));
        }
        if adjusted > 0.5 {
            reasoning.push("Medium strength, standard open".to_string());
            return Ok(Decision::new(Action::Raise, OPEN_STANDARD_BB, 0.8, reasoning));
        }
        if adjusted > 0.3 && spot.position.is_late() {
            reasoning.push("Steal from late position".to_string());
            return Ok(Decision::new(Action::Raise, OPEN_MIN_BB, 0.6, reasoning));
        }
        reasoning.push("Too weak to open".to_string());
        return Ok(Decision::new(Action::Fold, 0.0, 0.7, reasoning));
    }

    let odds = pot_odds(spot.to_call, spot.pot)?;
    reasoning.push(format!("Pot odds: {:.2}", odds));
    if adjusted > 0.8 {
        reasoning.push("Premium hand, re-raise".to_string());
        let amount = spot.to_call * RERAISE_MULTIPLIER;
        return Ok(Decision::new(Action::Raise, amount, 0.9, reasoning));
    }
    if adjusted > odds * 1.5 {
        reasoning.push("Strong enough to call".to_string());
        return Ok(Decision::new(Action::Call, spot.to_call, 0.8, reasoning));
    }
    reasoning.push("Odds do not justify a call".to_string());
    Ok(Decision::new(Action::Fold, 0.0, 0.7, reasoning))
}

pub fn postflop_advice(spot: &Spot, config: &SimulationConfig) -> AdvisorResult<Decision> {
    let equity = estimate_equity_with_config(&spot.hand, &spot.board, spot.opponents, config)?;
    let odds = pot_odds(spot.to_call, spot.pot)?;
    let mut reasoning = vec![
        format!("Equity vs {} opponent(s): {:.2}", spot.opponents, equity),
        format!("Pot odds: {:.2}", odds),
    ];

    if spot.to_call == 0.0 {
        if equity > 0.7 {
            reasoning.push("Strong hand, bet big".to_string());
            let amount = spot.pot * BET_LARGE_POT;
            return Ok(Decision::new(Action::Raise, amount, 0.9, reasoning));
        }
        if equity > 0.5 {
            reasoning.push("Medium strength, value bet".to_string());
            let amount = spot.pot * BET_MEDIUM_POT;
            return Ok(Decision::new(Action::Raise, amount, 0.8, reasoning));
        }
        reasoning.push("Weak hand, check".to_string());
        return Ok(Decision::new(Action::Check, 0.0, 0.7, reasoning));
    }

    let implied = implied_odds(spot.to_call, spot.pot, spot.stack)?;
    reasoning.push(format!("Implied odds: {:.2}", implied));
    if equity > 0.8 {
        reasoning.push("Strong hand, raise".to_string());
        let amount = spot.to_call * RERAISE_MULTIPLIER;
        return Ok(Decision::new(Action::Raise, amount, 0.9, reasoning));
    }
    if equity > odds {
        reasoning.push("Direct odds justify a call".to_string());
        return Ok(Decision::new(Action::Call, spot.to_call, 0.8, reasoning));
    }
    if equity * implied > odds {
        reasoning.push("Implied odds justify a call".to_string());
        return Ok(Decision::new(Action::Call, spot.to_call, 0.6, reasoning));
    }
    reasoning.push("Odds do not justify a call".to_string());
    Ok(Decision::new(Action::Fold, 0.0, 0.7, reasoning))
}

/// Picks the preflop or postflop heuristic from the board size, then fits
/// the result to the player's stack.
pub fn advise(spot: &Spot, config: &SimulationConfig) -> AdvisorResult<Decision> {
    if spot.stack < 0.0 {
        return Err(AdvisorError::InvalidValue(
            "Stack must be non-negative".to_string(),
        ));
    }
    let stage = Stage::from_board(&spot.board)?;
    let decision = match stage {
        Stage::Preflop => preflop_advice(spot)?,
        _ => postflop_advice(spot, config)?,
    };
    let decision = fit_to_stack(spot, decision);
    log::debug!(
        "{} {} from {}: {}",
        stage,
        format_cards(&spot.hand),
        spot.position,
        decision
    );
    Ok(decision)
}
