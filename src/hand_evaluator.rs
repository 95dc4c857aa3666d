use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;

use crate::cards::{Card, RANKS_STR};
use crate::error::{AdvisorError, AdvisorResult};

pub const MIN_CARDS: usize = 5;
const TIEBREAK_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandCategory::HighCard => write!(f, "High Card"),
            HandCategory::OnePair => write!(f, "One Pair"),
            HandCategory::TwoPair => write!(f, "Two Pair"),
            HandCategory::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandCategory::Straight => write!(f, "Straight"),
            HandCategory::Flush => write!(f, "Flush"),
            HandCategory::FullHouse => write!(f, "Full House"),
            HandCategory::FourOfAKind => write!(f, "Four of a Kind"),
            HandCategory::StraightFlush => write!(f, "Straight Flush"),
            HandCategory::RoyalFlush => write!(f, "Royal Flush"),
        }
    }
}

/// Result of ranking a set of cards: the category plus the rank values that
/// break ties within it, most significant first. The tiebreak lives in a
/// fixed buffer so evaluation never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluatedHand {
    pub category: HandCategory,
    tiebreak: [u8; TIEBREAK_LEN],
    len: u8,
}

impl EvaluatedHand {
    /// Values past the fifth are dropped. Only the evaluator builds hands, so
    /// each category always carries the same tiebreak length.
    pub(crate) fn new(category: HandCategory, values: &[u8]) -> Self {
        let len = values.len().min(TIEBREAK_LEN);
        let mut tiebreak = [0u8; TIEBREAK_LEN];
        tiebreak[..len].copy_from_slice(&values[..len]);
        EvaluatedHand {
            category,
            tiebreak,
            len: len as u8,
        }
    }

    pub fn tiebreak(&self) -> &[u8] {
        &self.tiebreak[..self.len as usize]
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks = self.tiebreak().iter().map(|&v| value_char(v)).join(" ");
        write!(f, "{} [{}]", self.category, ranks)
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.category.cmp(&other.category) {
            Ordering::Equal => self.tiebreak().cmp(other.tiebreak()),
            ord => ord,
        }
    }
}

fn value_char(value: u8) -> char {
    RANKS_STR
        .chars()
        .nth(value.saturating_sub(2) as usize)
        .unwrap_or('?')
}

/// Rank presence as a bitmask keyed by rank value (bit 14 is the ace).
/// The ace is mirrored into bit 1 so the wheel forms a run.
fn straight_top(mut mask: u16) -> Option<u8> {
    if mask & (1 << 14) != 0 {
        mask |= 1 << 1;
    }
    (5..=14u8).rev().find(|&top| {
        let run = 0b1_1111u16 << (top - 4);
        mask & run == run
    })
}

/// Fills `out` with the highest present rank values, skipping the listed
/// rank indices.
fn top_ranks(counts: &[u8; 13], skip: &[usize], out: &mut [u8]) {
    let mut filled = 0;
    for idx in (0..13).rev() {
        if filled == out.len() {
            break;
        }
        if counts[idx] > 0 && !skip.contains(&idx) {
            out[filled] = idx as u8 + 2;
            filled += 1;
        }
    }
}

fn highest_with_count(counts: &[u8; 13], min: u8, skip: Option<usize>) -> Option<usize> {
    (0..13)
        .rev()
        .find(|&idx| counts[idx] >= min && Some(idx) != skip)
}

/// Ranks any set of five or more cards by its best five-card hand.
pub fn evaluate(cards: &[Card]) -> AdvisorResult<EvaluatedHand> {
    if cards.len() < MIN_CARDS {
        return Err(AdvisorError::NotEnoughCards {
            need: MIN_CARDS,
            got: cards.len(),
        });
    }

    let mut rank_counts = [0u8; 13];
    let mut suit_counts = [0u8; 4];
    let mut suit_masks = [0u16; 4];
    let mut rank_mask = 0u16;
    for card in cards {
        rank_counts[card.rank.index()] += 1;
        suit_counts[card.suit.index()] += 1;
        suit_masks[card.suit.index()] |= 1 << card.value();
        rank_mask |= 1 << card.value();
    }

    if let Some(top) = (0..4usize)
        .filter(|&s| suit_counts[s] >= 5)
        .filter_map(|s| straight_top(suit_masks[s]))
        .max()
    {
        let category = if top == 14 {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        };
        return Ok(EvaluatedHand::new(category, &[top]));
    }

    if let Some(quad) = highest_with_count(&rank_counts, 4, None) {
        let mut kicker = [0u8; 1];
        top_ranks(&rank_counts, &[quad], &mut kicker);
        return Ok(EvaluatedHand::new(
            HandCategory::FourOfAKind,
            &[quad as u8 + 2, kicker[0]],
        ));
    }

    let trips = highest_with_count(&rank_counts, 3, None);
    if let Some(trips) = trips {
        if let Some(pair) = highest_with_count(&rank_counts, 2, Some(trips)) {
            return Ok(EvaluatedHand::new(
                HandCategory::FullHouse,
                &[trips as u8 + 2, pair as u8 + 2],
            ));
        }
    }

    if let Some(best) = (0..4usize)
        .filter(|&s| suit_counts[s] >= 5)
        .map(|s| {
            let mut values = [0u8; TIEBREAK_LEN];
            let mut filled = 0;
            for value in (2..=14u8).rev() {
                if filled < TIEBREAK_LEN && suit_masks[s] & (1 << value) != 0 {
                    values[filled] = value;
                    filled += 1;
                }
            }
            EvaluatedHand::new(HandCategory::Flush, &values)
        })
        .max()
    {
        return Ok(best);
    }

    if let Some(top) = straight_top(rank_mask) {
        return Ok(EvaluatedHand::new(HandCategory::Straight, &[top]));
    }

    if let Some(trips) = trips {
        let mut values = [trips as u8 + 2, 0, 0];
        top_ranks(&rank_counts, &[trips], &mut values[1..]);
        return Ok(EvaluatedHand::new(HandCategory::ThreeOfAKind, &values));
    }

    if let Some(high_pair) = highest_with_count(&rank_counts, 2, None) {
        if let Some(low_pair) = highest_with_count(&rank_counts, 2, Some(high_pair)) {
            let mut values = [high_pair as u8 + 2, low_pair as u8 + 2, 0];
            top_ranks(&rank_counts, &[high_pair, low_pair], &mut values[2..]);
            return Ok(EvaluatedHand::new(HandCategory::TwoPair, &values));
        }

        let mut values = [high_pair as u8 + 2, 0, 0, 0];
        top_ranks(&rank_counts, &[high_pair], &mut values[1..]);
        return Ok(EvaluatedHand::new(HandCategory::OnePair, &values));
    }

    let mut values = [0u8; TIEBREAK_LEN];
    top_ranks(&rank_counts, &[], &mut values);
    Ok(EvaluatedHand::new(HandCategory::HighCard, &values))
}

pub fn compare(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    a.cmp(b)
}

/// Evaluates both hole-card pairs on a shared board and compares them.
pub fn compare_hands(hand1: &[Card], hand2: &[Card], board: &[Card]) -> AdvisorResult<Ordering> {
    let mut cards1: Vec<Card> = Vec::with_capacity(hand1.len() + board.len());
    cards1.extend_from_slice(hand1);
    cards1.extend_from_slice(board);
    let mut cards2: Vec<Card> = Vec::with_capacity(hand2.len() + board.len());
    cards2.extend_from_slice(hand2);
    cards2.extend_from_slice(board);

    let r1 = evaluate(&cards1)?;
    let r2 = evaluate(&cards2)?;
    Ok(compare(&r1, &r2))
}
