//! The `mathwalk_core` crate provides the arithmetic lesson engine for
//! the MathWalk UI. Everything here is pure and synchronous: given a
//! problem, the builders produce the full ordered step script (labels,
//! narration sentences, highlight metadata) that the presentation layer
//! walks with a cursor.
//!
//! Key components:
//! - **Digits**: place-value access over unsigned integers.
//! - **Carry/Borrow**: the single padded calculator for carried and
//!   borrowed places.
//! - **Partial**: per-digit partial products and the long-division trace.
//! - **Script**: the tagged `Step` type and per-operation builders.
//! - **Problem/Level/Validate**: problem generation, the per-level bound
//!   table, and the editor-facing validation taxonomy.
//! - **Cursor/Timer**: the presentation cursor state machine and
//!   cancellable reveal-timer tokens.

pub mod carry;
pub mod compare;
pub mod cursor;
pub mod digits;
pub mod level;
pub mod partial;
pub mod pattern;
pub mod problem;
pub mod script;
pub mod timer;
pub mod traits;
pub mod validate;
