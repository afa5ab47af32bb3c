use log::{debug, info, warn};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::{
    card::Card,
    deck::{discard_card, table_rng, Deck},
    error::{GameError, GameResult},
    hand::{has_winning_hand, score_hand},
    rules::TableConfig,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub hand: Vec<Card>,
}

impl Player {
    pub fn with_hand(hand: Vec<Card>) -> Self {
        Player { hand }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: Vec<Player>,
    #[serde(default)]
    pub knocked_by: Option<usize>,
    #[serde(default)]
    pub final_turn: bool,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Self {
        GameState {
            players,
            knocked_by: None,
            final_turn: false,
        }
    }

    pub fn with_players(num_players: usize) -> Self {
        GameState::new(vec![Player::default(); num_players])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub scores: Vec<f64>,
    pub winner: usize,
    pub loser: usize,
}

/// Marks the final turn. A later knock replaces the earlier knocker.
pub fn knock(state: &mut GameState, player_index: usize) {
    if let Some(previous) = state.knocked_by {
        warn!("player {player_index} knocked after player {previous}; overwriting knocker");
    }
    state.knocked_by = Some(player_index);
    state.final_turn = true;
}

/// Scores every hand in player order. Ties for best and worst go to the
/// lowest seat.
pub fn resolve_round(state: &GameState) -> GameResult<RoundResult> {
    if state.players.is_empty() {
        return Err(GameError::NoPlayers);
    }
    let scores: Vec<f64> = state.players.iter().map(|p| score_hand(&p.hand)).collect();

    let mut winner = 0;
    let mut loser = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[winner] {
            winner = index;
        }
        if score < scores[loser] {
            loser = index;
        }
    }

    Ok(RoundResult { scores, winner, loser })
}

/// Everything a UI needs to draw the table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub players: Vec<Player>,
    pub scores: Vec<f64>,
    pub top_discard: Option<Card>,
    pub remaining_cards: usize,
    pub current_player: usize,
    pub knocked_by: Option<usize>,
    pub final_turn: bool,
    pub round_over: bool,
}

/// Owns the deck, the discard pile and the game state of one table.
pub struct Table {
    deck: Deck,
    discard_pile: Vec<Card>,
    state: GameState,
    current: usize,
    round_over: bool,
    rng: SmallRng,
}

impl Table {
    /// Shuffles, deals `hand_size` cards round-robin and turns up the first discard.
    pub fn new(config: &TableConfig) -> GameResult<Self> {
        config.validate()?;
        let mut rng = table_rng(config.seed);
        let mut deck = Deck::shuffled(&mut rng);
        let mut state = GameState::with_players(config.num_players);

        for _ in 0..config.hand_size {
            for player in &mut state.players {
                deck.draw_into(&mut player.hand);
            }
        }
        let mut discard_pile = Vec::new();
        deck.draw_into(&mut discard_pile);

        debug!(
            "dealt {} cards to {} players, {} left in deck",
            config.hand_size,
            config.num_players,
            deck.remaining_cards()
        );

        Ok(Table {
            deck,
            discard_pile,
            state,
            current: 0,
            round_over: false,
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hand(&self, player: usize) -> GameResult<&[Card]> {
        self.check_player(player)?;
        Ok(&self.state.players[player].hand)
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn remaining_cards(&self) -> usize {
        self.deck.remaining_cards()
    }

    pub fn is_round_over(&self) -> bool {
        self.round_over
    }

    /// Draws from the deck. An empty deck is refilled from the discard pile,
    /// leaving its top card in place. Nothing moves once the round is over.
    pub fn draw(&mut self, player: usize) -> GameResult<Option<Card>> {
        self.check_player(player)?;
        if self.round_over {
            return Ok(None);
        }
        if self.deck.is_empty() && self.discard_pile.len() > 1 {
            self.recycle_discards();
        }
        let card = self.deck.draw_into(&mut self.state.players[player].hand);
        debug!("player {player} drew {card:?}");
        Ok(card)
    }

    pub fn take_discard(&mut self, player: usize) -> GameResult<Option<Card>> {
        self.check_player(player)?;
        if self.round_over {
            return Ok(None);
        }
        let card = self.discard_pile.pop();
        if let Some(card) = card {
            self.state.players[player].hand.push(card);
        }
        debug!("player {player} took discard {card:?}");
        Ok(card)
    }

    pub fn discard(&mut self, player: usize, index: usize) -> GameResult<Option<Card>> {
        self.check_player(player)?;
        if self.round_over {
            return Ok(None);
        }
        let card = discard_card(&mut self.state.players[player].hand, index, &mut self.discard_pile);
        debug!("player {player} discarded {card:?} from slot {index}");
        Ok(card)
    }

    /// The seat on turn knocks. Returns false once the round is over.
    pub fn knock(&mut self) -> bool {
        if self.round_over {
            return false;
        }
        knock(&mut self.state, self.current);
        debug!("player {} knocked", self.current);
        true
    }

    /// Passes play to the next seat. After a knock, the round ends when play
    /// comes back around to the knocker.
    pub fn end_turn(&mut self) -> usize {
        if self.round_over {
            return self.current;
        }
        self.current = (self.current + 1) % self.state.players.len();
        if self.state.final_turn && self.state.knocked_by == Some(self.current) {
            self.round_over = true;
            info!("round over, player {} knocked", self.current);
        }
        self.current
    }

    pub fn has_winning_hand(&self, player: usize) -> GameResult<bool> {
        Ok(has_winning_hand(self.hand(player)?))
    }

    pub fn resolve(&self) -> GameResult<RoundResult> {
        let result = resolve_round(&self.state)?;
        info!(
            "round resolved: winner {} loser {} scores {:?}",
            result.winner, result.loser, result.scores
        );
        Ok(result)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            players: self.state.players.clone(),
            scores: self.state.players.iter().map(|p| score_hand(&p.hand)).collect(),
            top_discard: self.top_discard(),
            remaining_cards: self.deck.remaining_cards(),
            current_player: self.current,
            knocked_by: self.state.knocked_by,
            final_turn: self.state.final_turn,
            round_over: self.round_over,
        }
    }

    fn recycle_discards(&mut self) {
        let top = self.discard_pile.pop();
        let recycled = self.discard_pile.len();
        self.deck.restock(self.discard_pile.drain(..), &mut self.rng);
        self.discard_pile.extend(top);
        debug!("deck empty, shuffled {recycled} discards back in");
    }

    fn check_player(&self, index: usize) -> GameResult<()> {
        let players = self.state.players.len();
        if index >= players {
            return Err(GameError::PlayerOutOfRange { index, players });
        }
        Ok(())
    }
}
