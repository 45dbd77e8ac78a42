//! WASM bridge for the MathWalk lesson engine.

pub mod editor;
pub mod games;
pub mod lesson;
