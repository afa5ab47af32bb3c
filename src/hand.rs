use crate::card::{Card, Suit};

/// Fixed score for three cards of the same rank.
pub const THREE_OF_A_KIND: f64 = 30.5;
pub const THIRTY_ONE: f64 = 31.0;

pub fn is_three_of_a_kind(hand: &[Card]) -> bool {
    match hand {
        [first, rest @ ..] if hand.len() == 3 => rest.iter().all(|c| c.rank == first.rank),
        _ => false,
    }
}

/// Per-suit totals, indexed like `Suit::ALL`. `None` for suits not in the hand.
pub fn suit_totals(hand: &[Card]) -> [Option<u32>; 4] {
    let mut totals = [None; 4];
    for card in hand {
        let slot = &mut totals[card.suit.index()];
        *slot = Some(slot.unwrap_or(0) + u32::from(card.value()));
    }
    totals
}

/// Best suit for the hand and its total. Ties go to the earlier suit in `Suit::ALL`.
pub fn best_suit(hand: &[Card]) -> Option<(Suit, u32)> {
    let mut best: Option<(Suit, u32)> = None;
    for (suit, total) in Suit::ALL.into_iter().zip(suit_totals(hand)) {
        if let Some(total) = total {
            if best.map_or(true, |(_, current)| total > current) {
                best = Some((suit, total));
            }
        }
    }
    best
}

pub fn score_hand(hand: &[Card]) -> f64 {
    if is_three_of_a_kind(hand) {
        return THREE_OF_A_KIND;
    }
    best_suit(hand).map_or(0.0, |(_, total)| f64::from(total))
}

pub fn has_winning_hand(hand: &[Card]) -> bool {
    let score = score_hand(hand);
    score == THIRTY_ONE || score == THREE_OF_A_KIND
}
