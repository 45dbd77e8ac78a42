//! Comparison and pattern game runners.

use mathwalk_core::compare::{ComparisonAnswer, ComparisonRound};
use mathwalk_core::pattern;
use wasm_bindgen::prelude::*;

/// One run of the number-comparison game.
#[wasm_bindgen]
pub struct WasmComparisonRound {
    inner: ComparisonRound,
}

#[wasm_bindgen]
impl WasmComparisonRound {
    /// A shuffled standard deck.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmComparisonRound {
        console_error_panic_hook::set_once();
        WasmComparisonRound {
            inner: ComparisonRound::shuffled(&mut rand::thread_rng()),
        }
    }

    /// The current question, or null once the round is complete.
    pub fn question(&self) -> Result<JsValue, JsValue> {
        match self.inner.question() {
            Some(question) if !self.inner.is_complete() => {
                serde_wasm_bindgen::to_value(question).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            _ => Ok(JsValue::NULL),
        }
    }

    pub fn question_number(&self) -> usize {
        self.inner.question_number()
    }

    pub fn total(&self) -> usize {
        self.inner.total()
    }

    /// Scores one of the `"<"`, `">"`, `"="` buttons.
    pub fn answer(&mut self, symbol: &str) -> Result<bool, JsValue> {
        let answer = match symbol {
            "<" => ComparisonAnswer::Less,
            ">" => ComparisonAnswer::Greater,
            "=" => ComparisonAnswer::Equal,
            other => {
                return Err(JsValue::from_str(&format!(
                    "Unknown comparison answer: {other}"
                )))
            }
        };
        Ok(self.inner.answer(answer))
    }

    pub fn next_question(&mut self) {
        self.inner.next_question();
    }

    pub fn score(&self) -> usize {
        self.inner.score()
    }

    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Reshuffles the deck and clears the score.
    pub fn reset(&mut self) {
        self.inner.reset(&mut rand::thread_rng());
    }
}

impl Default for WasmComparisonRound {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh find-the-next-shape puzzle for the level.
#[wasm_bindgen]
pub fn shape_puzzle(level: u8) -> Result<JsValue, JsValue> {
    let puzzle = pattern::shape_puzzle(level, &mut rand::thread_rng());
    serde_wasm_bindgen::to_value(&puzzle).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// A fresh growing-number puzzle for the level.
#[wasm_bindgen]
pub fn growing_puzzle(level: u8) -> Result<JsValue, JsValue> {
    let puzzle = pattern::growing_puzzle(level, &mut rand::thread_rng());
    serde_wasm_bindgen::to_value(&puzzle).map_err(|e| JsValue::from_str(&e.to_string()))
}
