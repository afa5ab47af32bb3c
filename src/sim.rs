use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    deck::{table_rng, Deck},
    error::GameResult,
    game::{resolve_round, GameState},
    hand::{is_three_of_a_kind, THREE_OF_A_KIND, THIRTY_ONE},
    rules::{default_hand_size, default_num_players, TableConfig},
};

fn default_progress_interval() -> u32 {
    10_000
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    #[serde(default = "default_num_players")]
    pub num_players: usize,
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
    pub iterations: u32,
    pub seed: u64,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub total_rounds: u32,
    pub wins_by_seat: Vec<u32>,
    pub losses_by_seat: Vec<u32>,
    pub score_histogram: HashMap<String, u32>,
    pub winning_hands: u32,
    pub three_of_a_kinds: u32,
    pub average_score: f64,
    pub average_winning_score: f64,
}

pub fn run(input: SimulationInput) -> GameResult<SimulationResult> {
    run_with_progress(input, |_current, _total| {})
}

pub fn run_with_progress<F>(input: SimulationInput, mut progress_cb: F) -> GameResult<SimulationResult>
where
    F: FnMut(u32, u32),
{
    let config = TableConfig {
        num_players: input.num_players,
        hand_size: input.hand_size,
        seed: Some(input.seed),
    };
    config.validate()?;

    let mut rng = table_rng(config.seed);
    let mut wins_by_seat = vec![0; input.num_players];
    let mut losses_by_seat = vec![0; input.num_players];
    let mut score_histogram: HashMap<String, u32> = HashMap::new();
    let mut winning_hands = 0;
    let mut three_of_a_kinds = 0;
    let mut score_sum = 0.0;
    let mut winning_score_sum = 0.0;
    let progress_interval = input.progress_interval.max(1);

    for round in 0..input.iterations {
        let mut deck = Deck::shuffled(&mut rng);
        let mut state = GameState::with_players(input.num_players);
        for _ in 0..input.hand_size {
            for player in &mut state.players {
                deck.draw_into(&mut player.hand);
            }
        }

        let result = resolve_round(&state)?;
        wins_by_seat[result.winner] += 1;
        losses_by_seat[result.loser] += 1;
        winning_score_sum += result.scores[result.winner];

        for (player, &score) in state.players.iter().zip(&result.scores) {
            *score_histogram.entry(score.to_string()).or_default() += 1;
            score_sum += score;
            if score == THIRTY_ONE || score == THREE_OF_A_KIND {
                winning_hands += 1;
            }
            if is_three_of_a_kind(&player.hand) {
                three_of_a_kinds += 1;
            }
        }

        let completed = round + 1;
        if completed % progress_interval == 0 || completed == input.iterations {
            progress_cb(completed, input.iterations);
        }
    }

    let total_hands = input.iterations as f64 * input.num_players as f64;
    let average_score = if total_hands > 0.0 {
        score_sum / total_hands
    } else {
        0.0
    };
    let average_winning_score = if input.iterations > 0 {
        winning_score_sum / input.iterations as f64
    } else {
        0.0
    };

    info!(
        "simulated {} rounds, {} winning hands, average score {:.2}",
        input.iterations, winning_hands, average_score
    );

    Ok(SimulationResult {
        total_rounds: input.iterations,
        wins_by_seat,
        losses_by_seat,
        score_histogram,
        winning_hands,
        three_of_a_kinds,
        average_score,
        average_winning_score,
    })
}
