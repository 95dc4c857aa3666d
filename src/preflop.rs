use crate::cards::{Card, Rank};
use crate::error::{AdvisorError, AdvisorResult};

const PAIR_BONUS: f64 = 0.5;
const ACES_BONUS: f64 = 0.5;
const SUITED_BONUS: f64 = 0.2;
const HIGH_CARD_WEIGHT: f64 = 0.2;
const LOW_CARD_WEIGHT: f64 = 0.1;

fn rank_scale(rank: Rank) -> f64 {
    (rank.value() as f64 - 2.0) / 12.0
}

/// Closed-form starting-hand strength in [0, 1], independent of any board.
///
/// Pairs earn 0.5 (aces another 0.5), suited hands 0.2, and both cards add
/// a share scaled by rank: up to 0.2 for the higher card, 0.1 for the lower.
pub fn score_preflop(hand: &[Card]) -> AdvisorResult<f64> {
    let [c1, c2] = hand else {
        return Err(AdvisorError::InvalidHandSize(hand.len()));
    };
    let (high, low) = if c1.rank >= c2.rank {
        (c1.rank, c2.rank)
    } else {
        (c2.rank, c1.rank)
    };

    let mut score = 0.0;
    if high == low {
        score += PAIR_BONUS;
        if high == Rank::Ace {
            score += ACES_BONUS;
        }
    }
    if c1.suit == c2.suit {
        score += SUITED_BONUS;
    }
    score += HIGH_CARD_WEIGHT * rank_scale(high) + LOW_CARD_WEIGHT * rank_scale(low);

    Ok(score.clamp(0.0, 1.0))
}
