use std::cmp::Ordering;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::cards::{build_deck, ensure_distinct, format_cards, Card};
use crate::error::{AdvisorError, AdvisorResult};
use crate::hand_evaluator::{compare, evaluate};

pub const DEFAULT_TRIALS: usize = 1000;

/// Trials per parallel batch. Each batch owns its own RNG stream, so a
/// seeded run gives the same tally whatever the thread count.
const BATCH_SIZE: usize = 1000;

const BOARD_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub trials: usize,
    /// `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

/// Tally of simulated trials from the reference hand's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EquityResult {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    pub trials: u64,
}

impl EquityResult {
    /// Fraction of trials where the hand strictly beat every opponent.
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    pub fn lose_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Pot share with ties split evenly.
    pub fn equity(&self) -> f64 {
        self.win_rate() + self.tie_rate() / 2.0
    }

    fn rate(&self, count: u64) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            count as f64 / self.trials as f64
        }
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.trials += 1;
    }

    fn merge(self, other: EquityResult) -> EquityResult {
        EquityResult {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
            trials: self.trials + other.trials,
        }
    }
}

impl fmt::Display for EquityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.1}% | Tie {:.1}% | Lose {:.1}% ({} trials)",
            self.win_rate() * 100.0,
            self.tie_rate() * 100.0,
            self.lose_rate() * 100.0,
            self.trials,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Win,
    Tie,
    Loss,
}

/// Validated inputs shared by every trial of one simulation.
struct Table {
    hero: [Card; 2],
    board: [Card; BOARD_SIZE],
    known_board: usize,
    opponents: usize,
    deck: Vec<Card>,
}

impl Table {
    fn new(
        hand: &[Card],
        board: &[Card],
        num_opponents: usize,
        num_trials: usize,
    ) -> AdvisorResult<Table> {
        if hand.len() != 2 {
            return Err(AdvisorError::InvalidHandSize(hand.len()));
        }
        if board.len() > BOARD_SIZE {
            return Err(AdvisorError::InvalidValue(format!(
                "Board holds at most {} cards, got {}",
                BOARD_SIZE,
                board.len()
            )));
        }
        if num_opponents == 0 {
            return Err(AdvisorError::InvalidValue(
                "Need at least one opponent".to_string(),
            ));
        }
        if num_trials == 0 {
            return Err(AdvisorError::InvalidValue(
                "Need at least one trial".to_string(),
            ));
        }
        ensure_distinct(&[hand, board])?;

        let mut known: Vec<Card> = Vec::with_capacity(hand.len() + board.len());
        known.extend_from_slice(hand);
        known.extend_from_slice(board);
        let deck = build_deck(&known);

        let requested = 2 * num_opponents + (BOARD_SIZE - board.len());
        if requested > deck.len() {
            return Err(AdvisorError::NotEnoughDeck {
                requested,
                available: deck.len(),
            });
        }

        let mut full_board = [hand[0]; BOARD_SIZE];
        full_board[..board.len()].copy_from_slice(board);
        Ok(Table {
            hero: [hand[0], hand[1]],
            board: full_board,
            known_board: board.len(),
            opponents: num_opponents,
            deck,
        })
    }

    /// Shuffles `deck` in place, deals opponents from the front followed by
    /// the board runout, and scores the hero against the field.
    fn run_trial<R: Rng + ?Sized>(
        &self,
        deck: &mut [Card],
        rng: &mut R,
    ) -> AdvisorResult<Outcome> {
        deck.shuffle(rng);
        let (villains, rest) = deck.split_at(2 * self.opponents);

        let mut board = self.board;
        let missing = BOARD_SIZE - self.known_board;
        board[self.known_board..].copy_from_slice(&rest[..missing]);

        let mut seven = [self.hero[0]; 7];
        seven[2..].copy_from_slice(&board);
        seven[..2].copy_from_slice(&self.hero);
        let hero = evaluate(&seven)?;

        let mut outcome = Outcome::Win;
        for villain in villains.chunks_exact(2) {
            seven[..2].copy_from_slice(villain);
            match compare(&hero, &evaluate(&seven)?) {
                Ordering::Less => return Ok(Outcome::Loss),
                Ordering::Equal => outcome = Outcome::Tie,
                Ordering::Greater => {}
            }
        }
        Ok(outcome)
    }

    fn run_batch<R: Rng + ?Sized>(
        &self,
        trials: usize,
        rng: &mut R,
    ) -> AdvisorResult<EquityResult> {
        let mut deck = self.deck.clone();
        let mut tally = EquityResult::default();
        for _ in 0..trials {
            tally.record(self.run_trial(&mut deck, rng)?);
        }
        Ok(tally)
    }
}

fn batch_seed(seed: u64, batch_idx: usize) -> u64 {
    seed ^ (batch_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Runs the simulation across rayon workers in fixed-size batches.
pub fn simulate_equity(
    hand: &[Card],
    board: &[Card],
    num_opponents: usize,
    num_trials: usize,
    seed: Option<u64>,
) -> AdvisorResult<EquityResult> {
    let table = Table::new(hand, board, num_opponents, num_trials)?;
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let num_batches = num_trials.div_ceil(BATCH_SIZE);
    log::debug!(
        "simulating {} trials in {} batches: {} vs {} opponent(s), {} board card(s), seed {}",
        num_trials,
        num_batches,
        format_cards(hand),
        num_opponents,
        board.len(),
        seed
    );

    let batches: Vec<EquityResult> = (0..num_batches)
        .into_par_iter()
        .map(|batch_idx| -> AdvisorResult<EquityResult> {
            let trials = if batch_idx == num_batches - 1 {
                num_trials - batch_idx * BATCH_SIZE
            } else {
                BATCH_SIZE
            };
            let mut rng = StdRng::seed_from_u64(batch_seed(seed, batch_idx));
            let tally = table.run_batch(trials, &mut rng)?;
            log::trace!("batch {} done: {}", batch_idx, tally);
            Ok(tally)
        })
        .collect::<AdvisorResult<Vec<_>>>()?;

    let result = batches
        .into_iter()
        .fold(EquityResult::default(), EquityResult::merge);
    log::debug!("simulation finished: {}", result);
    Ok(result)
}

/// Sequential simulation driven by a caller-supplied random source.
pub fn simulate_equity_with_rng<R: Rng + ?Sized>(
    hand: &[Card],
    board: &[Card],
    num_opponents: usize,
    num_trials: usize,
    rng: &mut R,
) -> AdvisorResult<EquityResult> {
    let table = Table::new(hand, board, num_opponents, num_trials)?;
    table.run_batch(num_trials, rng)
}

/// Estimated probability that `hand` strictly beats `num_opponents` random
/// hands once the board is completed. Ties count as non-wins.
pub fn estimate_equity(
    hand: &[Card],
    board: &[Card],
    num_opponents: usize,
    num_trials: usize,
    seed: Option<u64>,
) -> AdvisorResult<f64> {
    simulate_equity(hand, board, num_opponents, num_trials, seed).map(|r| r.win_rate())
}

pub fn estimate_equity_with_rng<R: Rng + ?Sized>(
    hand: &[Card],
    board: &[Card],
    num_opponents: usize,
    num_trials: usize,
    rng: &mut R,
) -> AdvisorResult<f64> {
    simulate_equity_with_rng(hand, board, num_opponents, num_trials, rng).map(|r| r.win_rate())
}

pub fn estimate_equity_with_config(
    hand: &[Card],
    board: &[Card],
    num_opponents: usize,
    config: &SimulationConfig,
) -> AdvisorResult<f64> {
    estimate_equity(hand, board, num_opponents, config.trials, config.seed)
}
