//! Card types shared between the engine and the wire format.
//!
//! On the wire a card is its two-character label: rank character followed by
//! suit letter, e.g. `"AS"` or `"TH"`. Serde goes through that label in both
//! directions.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Card rank. Numeric values follow the usual high mapping, Ace = 14.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardRank {
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

/// All ranks in deck order, deuce first.
pub const RANKS: [CardRank; 13] = [
    CardRank::Two,
    CardRank::Three,
    CardRank::Four,
    CardRank::Five,
    CardRank::Six,
    CardRank::Seven,
    CardRank::Eight,
    CardRank::Nine,
    CardRank::Ten,
    CardRank::Jack,
    CardRank::Queen,
    CardRank::King,
    CardRank::Ace,
];

impl CardRank {
    /// Numeric value with Ace high (2..=14). The wheel straight treats the
    /// Ace as 1 separately, inside the evaluator.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Rank character as used in card labels (2..9, T, J, Q, K, A).
    pub fn as_char(self) -> char {
        match self {
            CardRank::Two => '2',
            CardRank::Three => '3',
            CardRank::Four => '4',
            CardRank::Five => '5',
            CardRank::Six => '6',
            CardRank::Seven => '7',
            CardRank::Eight => '8',
            CardRank::Nine => '9',
            CardRank::Ten => 'T',
            CardRank::Jack => 'J',
            CardRank::Queen => 'Q',
            CardRank::King => 'K',
            CardRank::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        RANKS.iter().copied().find(|r| r.as_char() == c)
    }
}

/// Card suit, identified on the wire by its first letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardSuit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

/// All suits in deck order.
pub const SUITS: [CardSuit; 4] = [
    CardSuit::Spades,
    CardSuit::Hearts,
    CardSuit::Diamonds,
    CardSuit::Clubs,
];

impl CardSuit {
    pub fn letter(self) -> char {
        match self {
            CardSuit::Spades => 'S',
            CardSuit::Hearts => 'H',
            CardSuit::Diamonds => 'D',
            CardSuit::Clubs => 'C',
        }
    }

    /// Glyph for console output.
    pub fn glyph(self) -> char {
        match self {
            CardSuit::Spades => '♠',
            CardSuit::Hearts => '♥',
            CardSuit::Diamonds => '♦',
            CardSuit::Clubs => '♣',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        SUITS.iter().copied().find(|s| s.letter() == c)
    }
}

/// A playing card. Immutable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: CardRank,
    pub suit: CardSuit,
}

impl Card {
    pub fn new(rank: CardRank, suit: CardSuit) -> Self {
        Card { rank, suit }
    }

    /// Two-character wire label, e.g. `"AS"`.
    pub fn label(self) -> String {
        let mut s = String::with_capacity(2);
        s.push(self.rank.as_char());
        s.push(self.suit.letter());
        s
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        let rank = CardRank::from_char(chars.next()?)?;
        let suit = CardSuit::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Card { rank, suit })
    }

    /// Console form with the suit glyph, e.g. `A♠`.
    pub fn pretty(self) -> String {
        format!("{}{}", self.rank.as_char(), self.suit.glyph())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Card::from_label(&label)
            .ok_or_else(|| de::Error::custom(format!("invalid card label '{}'", label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for &rank in &RANKS {
            for &suit in &SUITS {
                let card = Card::new(rank, suit);
                assert_eq!(Card::from_label(&card.label()), Some(card));
            }
        }
    }

    #[test]
    fn serde_uses_labels() {
        let card = Card::new(CardRank::Ten, CardSuit::Hearts);
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"TH\"");
        let back: Card = serde_json::from_str("\"TH\"").unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn rejects_garbage_labels() {
        assert!(Card::from_label("").is_none());
        assert!(Card::from_label("A").is_none());
        assert!(Card::from_label("1S").is_none());
        assert!(Card::from_label("ASX").is_none());
    }
}
