//! Human-readable console formatting for table events.

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use poker_shared::Card;

/// Space-separated board with suit glyphs, e.g. `A♠ T♥ 7♦`.
pub fn board_line(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.pretty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Winner announcement, bold green on a terminal.
pub fn winner_banner(event: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}", event.bold().green())
    } else {
        event.to_string()
    }
}

/// One-line header printed when a hand starts.
pub fn hand_header(room_id: &str, dealer_name: &str, small_blind: u32, big_blind: u32) -> String {
    let line = format!(
        "room {} | dealer {} | blinds {}/{}",
        room_id, dealer_name, small_blind, big_blind
    );
    if std::io::stdout().is_terminal() {
        format!("{}", line.bold())
    } else {
        line
    }
}
