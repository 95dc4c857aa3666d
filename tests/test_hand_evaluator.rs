use std::cmp::Ordering;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use poker_advisor::cards::*;
use poker_advisor::error::AdvisorError;
use poker_advisor::hand_evaluator::*;

fn eval(notation: &str) -> EvaluatedHand {
    evaluate(&parse_cards(notation).unwrap()).unwrap()
}

fn c(notation: &str) -> Card {
    parse_card(notation).unwrap()
}

#[test]
fn test_royal_flush() {
    let result = eval("AhKhQhJhTh2c2d");
    assert_eq!(result.category, HandCategory::RoyalFlush);
    assert_eq!(result.tiebreak(), &[14]);
}

#[test]
fn test_straight_flush() {
    let result = eval("9h8h7h6h5hAcKd");
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert_eq!(result.tiebreak(), &[9]);
}

#[test]
fn test_steel_wheel() {
    let result = eval("Ad2d3d4d5dKcKh");
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert_eq!(result.tiebreak(), &[5]);
}

#[test]
fn test_straight_flush_needs_suited_run() {
    // Straight and flush both present, but not in the same cards.
    let result = eval("9h8h7h6c5hAhKd");
    assert_eq!(result.category, HandCategory::Flush);
    assert_eq!(result.tiebreak(), &[14, 9, 8, 7, 5]);
}

#[test]
fn test_four_of_a_kind() {
    let result = eval("KsKhKdKc5s2h3d");
    assert_eq!(result.category, HandCategory::FourOfAKind);
    assert_eq!(result.tiebreak(), &[13, 5]);
}

#[test]
fn test_four_of_a_kind_kicker_from_pair() {
    let result = eval("7s7h7d7cQsQh3d");
    assert_eq!(result.tiebreak(), &[7, 12]);
}

#[test]
fn test_full_house() {
    let result = eval("2h2d2c3h3d9s4c");
    assert_eq!(result.category, HandCategory::FullHouse);
    assert_eq!(result.tiebreak(), &[2, 3]);
}

#[test]
fn test_full_house_two_trips_uses_highest() {
    let result = eval("5h5d5c9h9d9sKc");
    assert_eq!(result.category, HandCategory::FullHouse);
    assert_eq!(result.tiebreak(), &[9, 5]);
}

#[test]
fn test_full_house_picks_highest_pair() {
    let result = eval("4h4d4cJhJd8s8c");
    assert_eq!(result.tiebreak(), &[4, 11]);
}

#[test]
fn test_flush() {
    let result = eval("AsTs8s5s2sKdQh");
    assert_eq!(result.category, HandCategory::Flush);
    assert_eq!(result.tiebreak(), &[14, 10, 8, 5, 2]);
}

#[test]
fn test_flush_keeps_five_highest() {
    let result = eval("As9s8s5s3s2sKh");
    assert_eq!(result.tiebreak(), &[14, 9, 8, 5, 3]);
}

#[test]
fn test_straight() {
    let result = eval("9s8h7d6c5sAhKd");
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.tiebreak(), &[9]);
}

#[test]
fn test_straight_takes_highest_run() {
    let result = eval("As2h3d4c5s6h9d");
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.tiebreak(), &[6]);
}

#[test]
fn test_wheel() {
    let result = eval("As2h3d4c5sKhQd");
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.tiebreak(), &[5]);
}

#[test]
fn test_broadway_straight() {
    let result = eval("AsKhQdJcTs3h2d");
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.tiebreak(), &[14]);
}

#[test]
fn test_no_wraparound_straight() {
    let result = eval("QsKhAd2c3s8h9d");
    assert_eq!(result.category, HandCategory::HighCard);
}

#[test]
fn test_three_of_a_kind() {
    let result = eval("QsQhQd7s3h2cKd");
    assert_eq!(result.category, HandCategory::ThreeOfAKind);
    assert_eq!(result.tiebreak(), &[12, 13, 7]);
}

#[test]
fn test_two_pair() {
    let result = eval("AsKhAdKs5c2h3d");
    assert_eq!(result.category, HandCategory::TwoPair);
    assert_eq!(result.tiebreak(), &[14, 13, 5]);
}

#[test]
fn test_two_pair_from_three_pairs() {
    let result = eval("AsAh8d8s4c4h2d");
    assert_eq!(result.category, HandCategory::TwoPair);
    assert_eq!(result.tiebreak(), &[14, 8, 4]);
}

#[test]
fn test_one_pair() {
    let result = eval("7h7d2c9sKc4hJd");
    assert_eq!(result.category, HandCategory::OnePair);
    assert_eq!(result.tiebreak(), &[7, 13, 11, 9]);
}

#[test]
fn test_high_card() {
    let result = eval("AsKhQd9s3c2h5d");
    assert_eq!(result.category, HandCategory::HighCard);
    assert_eq!(result.tiebreak(), &[14, 13, 12, 9, 5]);
}

#[test]
fn test_exactly_five_cards() {
    let result = eval("2s4h6d8cTs");
    assert_eq!(result.category, HandCategory::HighCard);
    assert_eq!(result.tiebreak(), &[10, 8, 6, 4, 2]);
}

#[test]
fn test_six_cards() {
    let result = eval("2s2h6d8cTsJh");
    assert_eq!(result.category, HandCategory::OnePair);
    assert_eq!(result.tiebreak(), &[2, 11, 10, 8]);
}

#[test]
fn test_not_enough_cards() {
    let cards = [c("As"), c("Kh"), c("Qd"), c("Jc")];
    assert_eq!(
        evaluate(&cards),
        Err(AdvisorError::NotEnoughCards { need: 5, got: 4 })
    );
    assert!(evaluate(&[]).is_err());
}

#[test]
fn test_order_invariance() {
    let cards = parse_cards("7h7d2c9sKc4hJd").unwrap();
    let expected = evaluate(&cards).unwrap();
    for perm in cards.iter().copied().permutations(cards.len()).step_by(97) {
        assert_eq!(evaluate(&perm).unwrap(), expected);
    }
}

#[test]
fn test_order_invariance_random_hands() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let mut deck = build_deck(&[]);
        deck.shuffle(&mut rng);
        let mut hand: Vec<Card> = deck[..7].to_vec();
        let expected = evaluate(&hand).unwrap();
        hand.shuffle(&mut rng);
        assert_eq!(evaluate(&hand).unwrap(), expected);
        hand.reverse();
        assert_eq!(evaluate(&hand).unwrap(), expected);
    }
}

#[test]
fn test_seven_cards_match_best_five_card_subset() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let mut deck = build_deck(&[]);
        deck.shuffle(&mut rng);
        let hand = &deck[..7];
        let best = hand
            .iter()
            .copied()
            .combinations(5)
            .map(|five| evaluate(&five).unwrap())
            .max()
            .unwrap();
        assert_eq!(evaluate(hand).unwrap(), best);
    }
}

#[test]
fn test_category_dominates_tiebreak() {
    let low_straight = eval("As2h3d4c5s9hJd");
    let high_trips = eval("AsAhAdKcQs9h2d");
    assert_eq!(compare(&low_straight, &high_trips), Ordering::Greater);
    assert_eq!(compare(&high_trips, &low_straight), Ordering::Less);

    let high = eval("AsKhQdJc9s");
    let pair = eval("2s2h5d4c3s");
    assert!(pair > high);
}

#[test]
fn test_tiebreak_length_fixed_per_category() {
    let cases = [
        ("AsKhQd9s3c2h5d", 5),
        ("7h7d2c9sKc4hJd", 4),
        ("AsKhAdKs5c2h3d", 3),
        ("AsAh8d8s4c4h2d", 3),
        ("QsQhQd7s3h2cKd", 3),
        ("9s8h7d6c5sAhKd", 1),
        ("As2h3d4c5sKhQd", 1),
        ("As9s8s5s3s2sKh", 5),
        ("5h5d5c9h9d9sKc", 2),
        ("7s7h7d7cQsQh3d", 2),
        ("9h8h7h6h5hAcKd", 1),
        ("AhKhQhJhTh2c2d", 1),
    ];
    for (notation, len) in cases {
        assert_eq!(eval(notation).tiebreak().len(), len, "{}", notation);
    }
}

#[test]
fn test_category_order() {
    let hands = [
        eval("AsKhQd9s3c2h5d"),
        eval("7h7d2c9sKc4hJd"),
        eval("AsKhAdKs5c2h3d"),
        eval("QsQhQd7s3h2cKd"),
        eval("9s8h7d6c5sAhKd"),
        eval("AsTs8s5s2sKdQh"),
        eval("2h2d2c3h3d9s4c"),
        eval("KsKhKdKc5s2h3d"),
        eval("9h8h7h6h5hAcKd"),
        eval("AhKhQhJhTh2c2d"),
    ];
    for pair in hands.windows(2) {
        assert!(pair[0].category < pair[1].category);
        assert_eq!(compare(&pair[0], &pair[1]), Ordering::Less);
    }
}

#[test]
fn test_kicker_decides() {
    let a = eval("AdKhAs5d8cTh3d");
    let b = eval("AhQdAs5d8cTh3d");
    assert_eq!(compare(&a, &b), Ordering::Greater);
}

#[test]
fn test_equal_hands_tie() {
    let a = eval("2h3dAsKdQhJsTs");
    let b = eval("4h5dAsKdQhJsTs");
    assert_eq!(compare(&a, &b), Ordering::Equal);
    assert_eq!(a, b);
}

#[test]
fn test_compare_hands_on_board() {
    let board = parse_cards("7s6s5s4dAh").unwrap();
    assert_eq!(
        compare_hands(&[c("As"), c("2s")], &[c("8h"), c("9h")], &board).unwrap(),
        Ordering::Greater
    );

    let board = parse_cards("AsAd5s5d2c").unwrap();
    assert_eq!(
        compare_hands(&[c("Kh"), c("3c")], &[c("Qh"), c("3d")], &board).unwrap(),
        Ordering::Greater
    );
}

#[test]
fn test_evaluated_hand_display() {
    assert_eq!(eval("7h7d2c9sKc4hJd").to_string(), "One Pair [7 K J 9]");
    assert_eq!(HandCategory::RoyalFlush.to_string(), "Royal Flush");
}
