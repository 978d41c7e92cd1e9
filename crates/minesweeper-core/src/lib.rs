//! Core engine for a knowledge-based minesweeper agent.
//!
//! The crate has two halves. [`Board`] is the hidden mine field: it
//! places mines and answers the two oracle queries the game exposes
//! (`is_mine`, `nearby_mines`). [`Agent`] is the player: it never sees
//! the board directly, only the per-probe neighbor counts, and folds
//! each report into a base of [`Sentence`] statements from which it
//! deduces provably safe and provably mined cells.

pub mod agent;
pub mod board;
pub mod cell;
pub mod rng;
pub mod sentence;

pub use agent::Agent;
pub use board::{Board, Difficulty};
pub use cell::Cell;
pub use rng::SimpleRng;
pub use sentence::Sentence;
