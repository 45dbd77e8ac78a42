//! Core WASM lesson session and stepping methods.

use mathwalk_core::cursor::{LessonCursor, Navigation, AUTO_PLAY_INTERVAL_MS, REVEAL_DELAY_MS};
use mathwalk_core::problem::{ClassLevel, OperationKind, Problem};
use mathwalk_core::script::{build_steps, StepScript};
use mathwalk_core::timer::RevealTimers;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Speech-synthesis parameters for one narrated line. Rate is slightly
/// slow and pitch slightly high for young listeners.
pub(crate) const NARRATION_RATE: f32 = 0.9;
pub(crate) const NARRATION_PITCH: f32 = 1.1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Narration<'a> {
    text: &'a str,
    rate: f32,
    pitch: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvanceOutcome {
    moved: bool,
    completed: bool,
    cue: Option<&'static str>,
}

/// One on-screen lesson: a problem, its step script, the presentation
/// cursor, and the reveal timers the screen owns. Dropped and rebuilt
/// whenever the problem changes.
#[wasm_bindgen]
pub struct WasmLesson {
    pub(crate) problem: Problem,
    pub(crate) script: StepScript,
    pub(crate) cursor: LessonCursor,
    pub(crate) timers: RevealTimers,
}

pub(crate) fn build_lesson(
    problem: Problem,
    navigation: Navigation,
) -> Result<WasmLesson, JsValue> {
    let script = build_steps(&problem);
    let cursor = LessonCursor::new(script.len(), navigation)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(WasmLesson {
        problem,
        script,
        cursor,
        timers: RevealTimers::new(),
    })
}

#[wasm_bindgen]
impl WasmLesson {
    /// Builds a fresh randomly generated lesson from the route's
    /// operation and class-level path segments.
    #[wasm_bindgen(constructor)]
    pub fn new(operation: &str, level: &str) -> Result<WasmLesson, JsValue> {
        console_error_panic_hook::set_once();

        let kind = OperationKind::from_route_segment(operation)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let level = ClassLevel::from_route_segment(level)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let problem = Problem::generate(kind, level, &mut rand::thread_rng());
        build_lesson(problem, Navigation::ForwardOnly)
    }

    pub fn step_count(&self) -> usize {
        self.script.len()
    }

    pub fn current_index(&self) -> usize {
        self.cursor.current()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor.is_complete()
    }

    /// Advances the cursor. Returns `{ moved, completed, cue }`; `cue`
    /// names the sound asset to play, or null when already on the last
    /// step.
    pub fn next_step(&mut self) -> Result<JsValue, JsValue> {
        let cue = self.cursor.advance();
        let outcome = AdvanceOutcome {
            moved: cue.is_some(),
            completed: self.cursor.is_complete(),
            cue: cue.map(|c| c.asset()),
        };
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Steps back one step. Only lessons built with full navigation
    /// (the long-division visualizer) move; others report false.
    pub fn prev_step(&mut self) -> bool {
        self.cursor.back()
    }

    /// Rewinds a full-navigation lesson to its first step and cancels
    /// every pending reveal.
    pub fn restart(&mut self) -> bool {
        if !self.cursor.restart() {
            return false;
        }
        self.timers.cancel_all();
        true
    }

    /// The current step, serialized for rendering.
    pub fn current_step(&self) -> Result<JsValue, JsValue> {
        let step = self
            .script
            .get(self.cursor.current())
            .ok_or_else(|| JsValue::from_str("Cursor is outside the script."))?;
        serde_wasm_bindgen::to_value(step).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Short label of the current step.
    pub fn current_instruction(&self) -> String {
        self.script
            .get(self.cursor.current())
            .map(|step| step.instruction.clone())
            .unwrap_or_default()
    }

    /// Narration text of the current step.
    pub fn narration_text(&self) -> String {
        self.script
            .get(self.cursor.current())
            .map(|step| step.voice.clone())
            .unwrap_or_default()
    }

    /// Utterance request for the current step:
    /// `{ text, rate: 0.9, pitch: 1.1 }`. Queueing and overlap are the
    /// speech engine's concern, not ours.
    pub fn narration(&self) -> Result<JsValue, JsValue> {
        let step = self
            .script
            .get(self.cursor.current())
            .ok_or_else(|| JsValue::from_str("Cursor is outside the script."))?;
        serde_wasm_bindgen::to_value(&Narration {
            text: &step.voice,
            rate: NARRATION_RATE,
            pitch: NARRATION_PITCH,
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The lesson's problem, serialized for the digit-block layout.
    pub fn problem(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.problem).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Issues a reveal token for a timeout this screen schedules. The
    /// fired callback must pass it back through `is_token_live` before
    /// touching any state.
    pub fn issue_reveal_token(&self) -> u64 {
        self.timers.issue().generation()
    }

    pub fn is_token_live(&self, generation: u64) -> bool {
        self.timers.is_live_generation(generation)
    }

    /// Cancels every pending reveal, for teardown and problem changes.
    pub fn cancel_timers(&mut self) {
        self.timers.cancel_all();
    }

    pub fn auto_play_interval_ms() -> u32 {
        AUTO_PLAY_INTERVAL_MS
    }

    pub fn reveal_delay_ms() -> u32 {
        REVEAL_DELAY_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routed_lesson_builds_a_walkable_script() {
        let mut lesson = WasmLesson::new("addition", "2").expect("lesson");
        assert!(lesson.step_count() >= 3);
        assert_eq!(lesson.current_index(), 0);
        assert!(!lesson.is_complete());
        assert!(!lesson.current_instruction().is_empty());

        while !lesson.is_complete() {
            let before = lesson.current_index();
            lesson.cursor.advance();
            assert_eq!(lesson.current_index(), before + 1);
        }
        assert_eq!(lesson.current_index(), lesson.step_count() - 1);
    }

    #[test]
    fn forward_only_lessons_refuse_prev_and_restart() {
        let mut lesson = WasmLesson::new("subtraction", "3").expect("lesson");
        lesson.cursor.advance();
        assert!(!lesson.prev_step());
        assert!(!lesson.restart());
    }

    #[test]
    #[cfg(target_arch = "wasm32")]
    fn unknown_route_segments_are_rejected() {
        assert!(WasmLesson::new("calculus", "2").is_err());
        assert!(WasmLesson::new("addition", "9").is_err());
    }

    #[test]
    fn narration_text_matches_the_current_step() {
        let lesson = WasmLesson::new("multiplication", "1").expect("lesson");
        assert!(lesson.narration_text().contains("step by step"));
    }

    #[test]
    fn reveal_tokens_die_with_cancel() {
        let mut lesson = WasmLesson::new("addition", "1").expect("lesson");
        let token = lesson.issue_reveal_token();
        assert!(lesson.is_token_live(token));
        lesson.cancel_timers();
        assert!(!lesson.is_token_live(token));
        assert!(lesson.is_token_live(lesson.issue_reveal_token()));
    }

    #[test]
    fn pacing_constants_are_exposed_to_the_scheduler() {
        assert_eq!(WasmLesson::auto_play_interval_ms(), 1500);
        assert_eq!(WasmLesson::reveal_delay_ms(), 1000);
    }
}
