use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

use crate::error::{AdvisorError, AdvisorResult};

pub const RANKS_STR: &str = "23456789TJQKA";
pub const SUITS_STR: &str = "shdc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    /// Parses a rank symbol, ignoring case.
    pub fn from_char(c: char) -> AdvisorResult<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(AdvisorError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Ordering value, 2..=14 with the ace high.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Zero-based ordinal used to index fixed-size count tables.
    pub fn index(self) -> usize {
        self as usize - 2
    }
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_char(c: char) -> AdvisorResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(AdvisorError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

/// A playing card. Equality and hashing use rank and suit; ordering uses
/// rank only, so two cards of the same rank compare equal under `cmp`.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// All 52 cards except the excluded ones, in rank-major order.
pub fn build_deck(excluded: &[Card]) -> Vec<Card> {
    let excluded: HashSet<Card> = excluded.iter().copied().collect();
    ALL_RANKS
        .iter()
        .flat_map(|&r| ALL_SUITS.iter().map(move |&s| Card::new(r, s)))
        .filter(|c| !excluded.contains(c))
        .collect()
}

pub fn parse_card(notation: &str) -> AdvisorResult<Card> {
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(AdvisorError::InvalidCardNotation(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parses concatenated card notation such as `"AhKh"` or `"As Kd, Qh"`.
/// An empty string yields no cards; a card may not appear twice.
pub fn parse_cards(notation: &str) -> AdvisorResult<Vec<Card>> {
    let chars: Vec<char> = notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if chars.len() % 2 != 0 {
        return Err(AdvisorError::InvalidBoardNotation(notation.trim().to_string()));
    }

    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(chars.len() / 2);
    for (r, s) in chars.into_iter().tuples() {
        let card = Card::new(Rank::from_char(r)?, Suit::from_char(s)?);
        if !seen.insert(card) {
            return Err(AdvisorError::DuplicateCard(card));
        }
        cards.push(card);
    }
    Ok(cards)
}

/// Fails with `DuplicateCard` on the first card seen twice across the slices.
pub fn ensure_distinct(groups: &[&[Card]]) -> AdvisorResult<()> {
    let mut seen = HashSet::new();
    for card in groups.iter().flat_map(|g| g.iter()) {
        if !seen.insert(*card) {
            return Err(AdvisorError::DuplicateCard(*card));
        }
    }
    Ok(())
}

pub fn simplify_hand(cards: &[Card]) -> AdvisorResult<String> {
    if cards.len() != 2 {
        return Err(AdvisorError::InvalidHandSize(cards.len()));
    }
    let (c1, c2) = (cards[0], cards[1]);
    let (r1, r2) = if c1.rank >= c2.rank {
        (c1.rank, c2.rank)
    } else {
        (c2.rank, c1.rank)
    };

    if r1 == r2 {
        return Ok(format!("{}{}", r1.to_char(), r2.to_char()));
    }

    let suffix = if c1.suit == c2.suit { "s" } else { "o" };
    Ok(format!("{}{}{}", r1.to_char(), r2.to_char(), suffix))
}

pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().join("")
}
