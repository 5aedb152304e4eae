//! Hand-strength types produced by the evaluator.

use serde::{Deserialize, Serialize};

/// Categories of poker hands, weakest to strongest. The derived `Ord`
/// matches the category numbering used on the wire (0 = high card,
/// 8 = straight flush).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeKind,
    Straight,
    Flush,
    FullHouse,
    FourKind,
    StraightFlush,
}

impl HandCategory {
    /// Display name as shown in winner entries.
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_matches_table() {
        assert!(HandCategory::StraightFlush > HandCategory::FourKind);
        assert!(HandCategory::FourKind > HandCategory::FullHouse);
        assert!(HandCategory::FullHouse > HandCategory::Flush);
        assert!(HandCategory::Flush > HandCategory::Straight);
        assert!(HandCategory::Straight > HandCategory::ThreeKind);
        assert!(HandCategory::ThreeKind > HandCategory::TwoPair);
        assert!(HandCategory::TwoPair > HandCategory::Pair);
        assert!(HandCategory::Pair > HandCategory::HighCard);
    }
}
