//! Five-to-seven card hand evaluation.
//!
//! [`evaluate_best_hand`] enumerates every 5-card subset of hole ∪ board
//! (at most 21 with 7 cards) and keeps the maximum under
//! [`compare_strength`]. Kicker conventions per category follow the usual
//! ordering rules; the wheel A-2-3-4-5 counts as a 5-high straight.

use std::cmp::Ordering;

use poker_shared::{Card, HandCategory};

/// A comparable hand strength: category, ordered tie-break kickers, and the
/// five cards that produced it.
#[derive(Clone, Debug)]
pub struct HandStrength {
    pub category: HandCategory,
    pub kickers: Vec<u8>,
    pub cards: Vec<Card>,
}

/// Best 5-card hand from hole cards plus board.
///
/// Requires at least 5 cards in total; the engine only evaluates at
/// showdown, where the board has been dealt out.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandStrength {
    let mut cards: Vec<Card> = Vec::with_capacity(hole.len() + board.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    debug_assert!(cards.len() >= 5);

    let n = cards.len();
    let mut best: Option<HandStrength> = None;
    for i in 0..n.saturating_sub(4) {
        for j in (i + 1)..(n - 3) {
            for k in (j + 1)..(n - 2) {
                for l in (k + 1)..(n - 1) {
                    for m in (l + 1)..n {
                        let combo = [cards[i], cards[j], cards[k], cards[l], cards[m]];
                        let strength = evaluate_five(&combo);
                        match &best {
                            Some(b) if compare_strength(&strength, b) <= Ordering::Equal => {}
                            _ => best = Some(strength),
                        }
                    }
                }
            }
        }
    }
    // The debug_assert above guards the only way this could be empty.
    best.unwrap_or_else(|| evaluate_five(&[cards[0]; 5]))
}

/// Categorize exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let mut counts = [0u8; 15];
    for &v in &values {
        counts[v as usize] += 1;
    }
    // (value, count) pairs ordered by count, then value, descending.
    let mut ordered: Vec<(u8, u8)> = (2u8..=14)
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (v, counts[v as usize]))
        .collect();
    ordered.sort_unstable_by(|a, b| (b.1, b.0).cmp(&(a.1, a.0)));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = detect_straight(&values);
    let cards = cards.to_vec();

    if is_flush {
        if let Some(high) = straight_high {
            return HandStrength {
                category: HandCategory::StraightFlush,
                kickers: vec![high],
                cards,
            };
        }
    }

    let (top_value, top_count) = ordered[0];
    if top_count == 4 {
        let kicker = max_value_excluding(&values, &[top_value]);
        return HandStrength {
            category: HandCategory::FourKind,
            kickers: vec![top_value, kicker],
            cards,
        };
    }
    if top_count == 3 && ordered.len() > 1 && ordered[1].1 >= 2 {
        return HandStrength {
            category: HandCategory::FullHouse,
            kickers: vec![top_value, ordered[1].0],
            cards,
        };
    }
    if is_flush {
        return HandStrength {
            category: HandCategory::Flush,
            kickers: values,
            cards,
        };
    }
    if let Some(high) = straight_high {
        return HandStrength {
            category: HandCategory::Straight,
            kickers: vec![high],
            cards,
        };
    }
    if top_count == 3 {
        let mut kickers = vec![top_value];
        kickers.extend(values.iter().copied().filter(|&v| v != top_value).take(2));
        return HandStrength {
            category: HandCategory::ThreeKind,
            kickers,
            cards,
        };
    }
    if top_count == 2 && ordered.len() > 1 && ordered[1].1 == 2 {
        let (pair_high, pair_low) = (top_value.max(ordered[1].0), top_value.min(ordered[1].0));
        let kicker = max_value_excluding(&values, &[pair_high, pair_low]);
        return HandStrength {
            category: HandCategory::TwoPair,
            kickers: vec![pair_high, pair_low, kicker],
            cards,
        };
    }
    if top_count == 2 {
        let mut kickers = vec![top_value];
        kickers.extend(values.iter().copied().filter(|&v| v != top_value).take(3));
        return HandStrength {
            category: HandCategory::Pair,
            kickers,
            cards,
        };
    }
    HandStrength {
        category: HandCategory::HighCard,
        kickers: values,
        cards,
    }
}

/// Highest straight ending value among `values`, if any. The wheel
/// {A,2,3,4,5} is reported with high 5.
pub fn detect_straight(values: &[u8]) -> Option<u8> {
    let mut unique: Vec<u8> = values.to_vec();
    unique.sort_unstable();
    unique.dedup();
    if [14u8, 5, 4, 3, 2].iter().all(|v| unique.contains(v)) {
        return Some(5);
    }
    for window in unique.windows(5) {
        if window[4] == window[0] + 4 {
            return Some(window[4]);
        }
    }
    None
}

/// Category first, then kickers position by position with missing entries
/// treated as zero.
pub fn compare_strength(left: &HandStrength, right: &HandStrength) -> Ordering {
    match left.category.cmp(&right.category) {
        Ordering::Equal => {}
        other => return other,
    }
    let len = left.kickers.len().max(right.kickers.len());
    for i in 0..len {
        let l = left.kickers.get(i).copied().unwrap_or(0);
        let r = right.kickers.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

fn max_value_excluding(values: &[u8], excluded: &[u8]) -> u8 {
    values
        .iter()
        .copied()
        .filter(|v| !excluded.contains(v))
        .max()
        .unwrap_or(0)
}
