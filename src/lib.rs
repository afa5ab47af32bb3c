use js_sys::Function;
use wasm_bindgen::prelude::*;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod rules;
pub mod sim;

pub use card::{Card, Rank, Suit};
pub use deck::{discard_card, draw_card, Deck};
pub use error::{GameError, GameResult};
pub use game::{knock, resolve_round, GameState, Player, RoundResult, Table};
pub use hand::{has_winning_hand, score_hand};
pub use rules::TableConfig;

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

fn cards_from_js(cards: &JsValue) -> Result<Vec<Card>, JsValue> {
    serde_wasm_bindgen::from_value(cards.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid hand: {err}")))
}

/// Routes `log` records to the browser console. `level` defaults to "info".
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) {
    console_error_panic_hook::set_once();
    let level = level
        .and_then(|l| l.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));
}

#[wasm_bindgen(js_name = score_hand)]
pub fn score_hand_js(cards: &JsValue) -> Result<f64, JsValue> {
    console_error_panic_hook::set_once();
    let hand = cards_from_js(cards)?;
    Ok(score_hand(&hand))
}

#[wasm_bindgen(js_name = has_winning_hand)]
pub fn has_winning_hand_js(cards: &JsValue) -> Result<bool, JsValue> {
    console_error_panic_hook::set_once();
    let hand = cards_from_js(cards)?;
    Ok(has_winning_hand(&hand))
}

#[wasm_bindgen(js_name = resolve_round)]
pub fn resolve_round_js(state: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let state: GameState = serde_wasm_bindgen::from_value(state.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let result = resolve_round(&state)
        .map_err(|err| JsValue::from_str(&format!("Round failed: {err}")))?;

    to_js(&result)
}

#[wasm_bindgen]
pub fn run_simulation(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SimulationInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let result = sim::run(input)
        .map_err(|err| JsValue::from_str(&format!("Simulation failed: {err}")))?;

    to_js(&result)
}

#[wasm_bindgen]
pub fn run_simulation_with_progress(
    params: &JsValue,
    progress_callback: &Function,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: sim::SimulationInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let mut progress_cb = |current: u32, total: u32| {
        let _ = progress_callback.call2(
            &JsValue::NULL,
            &JsValue::from(current),
            &JsValue::from(total),
        );
    };

    let result = sim::run_with_progress(input, &mut progress_cb)
        .map_err(|err| JsValue::from_str(&format!("Simulation failed: {err}")))?;

    to_js(&result)
}

/// One table of play, held by the UI between clicks.
#[wasm_bindgen]
pub struct ThirtyOneTable {
    table: Table,
}

#[wasm_bindgen]
impl ThirtyOneTable {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue) -> Result<ThirtyOneTable, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config.clone())
                .map_err(|err| JsValue::from_str(&format!("Invalid config: {err}")))?
        };
        let table = Table::new(&config).map_err(table_err)?;
        Ok(ThirtyOneTable { table })
    }

    pub fn draw(&mut self, player: usize) -> Result<JsValue, JsValue> {
        let card = self.table.draw(player).map_err(table_err)?;
        to_js(&card)
    }

    pub fn take_discard(&mut self, player: usize) -> Result<JsValue, JsValue> {
        let card = self.table.take_discard(player).map_err(table_err)?;
        to_js(&card)
    }

    pub fn discard(&mut self, player: usize, index: usize) -> Result<JsValue, JsValue> {
        let card = self.table.discard(player, index).map_err(table_err)?;
        to_js(&card)
    }

    /// Knocks for the seat on turn. `false` once the round is over.
    pub fn knock(&mut self) -> bool {
        self.table.knock()
    }

    pub fn end_turn(&mut self) -> usize {
        self.table.end_turn()
    }

    pub fn has_winning_hand(&self, player: usize) -> Result<bool, JsValue> {
        self.table.has_winning_hand(player).map_err(table_err)
    }

    pub fn resolve(&self) -> Result<JsValue, JsValue> {
        let result = self.table.resolve().map_err(table_err)?;
        to_js(&result)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.table.snapshot())
    }
}

fn table_err(err: GameError) -> JsValue {
    JsValue::from_str(&format!("Table error: {err}"))
}
