use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

use crate::card::{Card, Rank, Suit};

pub const STANDARD_DECK_SIZE: usize = 52;

/// Builds an RNG from a fixed seed, or from OS entropy when none is given.
pub fn table_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// An ordered pile of cards whose top is the end of the sequence.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    /// The 52 unique cards, suit by suit, ace to king.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Deck { cards }
    }

    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Deck::standard();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    pub fn draw_into(&mut self, hand: &mut Vec<Card>) -> Option<Card> {
        draw_card(&mut self.cards, hand)
    }

    /// Puts cards back under the existing ones and reshuffles the whole pile.
    pub fn restock(&mut self, cards: impl IntoIterator<Item = Card>, rng: &mut impl Rng) {
        self.cards.extend(cards);
        self.cards.shuffle(rng);
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Moves the top card of `deck` into `hand`. An empty deck leaves both untouched.
pub fn draw_card(deck: &mut Vec<Card>, hand: &mut Vec<Card>) -> Option<Card> {
    let card = deck.pop()?;
    hand.push(card);
    Some(card)
}

/// Moves `hand[index]` onto the discard pile. Out-of-range indices are a no-op.
pub fn discard_card(hand: &mut Vec<Card>, index: usize, discard_pile: &mut Vec<Card>) -> Option<Card> {
    if index >= hand.len() {
        return None;
    }
    let card = hand.remove(index);
    discard_pile.push(card);
    Some(card)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.remaining_cards(), STANDARD_DECK_SIZE);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), STANDARD_DECK_SIZE);
        assert_eq!(deck.cards()[0], card("As"));
        assert_eq!(deck.cards().last(), Some(&card("Kc")));
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let a = Deck::shuffled(&mut table_rng(Some(7)));
        let b = Deck::shuffled(&mut table_rng(Some(7)));
        let c = Deck::shuffled(&mut table_rng(Some(8)));
        assert_eq!(a.cards(), b.cards());
        assert_ne!(a.cards(), c.cards());
    }

    #[test]
    fn draw_takes_from_the_end() {
        let mut deck = vec![card("2h"), card("3h"), card("4h")];
        let mut hand = Vec::new();
        assert_eq!(draw_card(&mut deck, &mut hand), Some(card("4h")));
        assert_eq!(deck, vec![card("2h"), card("3h")]);
        assert_eq!(hand, vec![card("4h")]);
    }

    #[test]
    fn draw_from_empty_deck_is_a_no_op() {
        let mut deck = Vec::new();
        let mut hand = Vec::new();
        assert_eq!(draw_card(&mut deck, &mut hand), None);
        assert!(deck.is_empty());
        assert!(hand.is_empty());
    }

    #[test]
    fn discard_shifts_remaining_cards() {
        let mut hand = vec![card("As"), card("Ks"), card("Qs")];
        let mut pile = vec![card("2c")];
        assert_eq!(discard_card(&mut hand, 1, &mut pile), Some(card("Ks")));
        assert_eq!(hand, vec![card("As"), card("Qs")]);
        assert_eq!(pile, vec![card("2c"), card("Ks")]);
    }

    #[test]
    fn discard_out_of_range_is_a_no_op() {
        let mut hand = vec![card("As"), card("Ks")];
        let mut pile = Vec::new();
        assert_eq!(discard_card(&mut hand, 2, &mut pile), None);
        assert_eq!(discard_card(&mut hand, 99, &mut pile), None);
        assert_eq!(hand.len(), 2);
        assert!(pile.is_empty());
    }

    #[test]
    fn restock_keeps_every_card() {
        let mut rng = table_rng(Some(1));
        let mut deck = Deck::from_cards(vec![card("2h")]);
        deck.restock(vec![card("3h"), card("4h")], &mut rng);
        let mut cards = deck.cards().to_vec();
        cards.sort_by_key(|c| c.rank);
        assert_eq!(cards, vec![card("2h"), card("3h"), card("4h")]);
    }
}
