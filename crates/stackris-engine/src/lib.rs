//! Core rules for a self-playing falling-block game.
//!
//! [`core`] holds the pure data model: the playfield grid, the shape catalog
//! with its rotation tables, and the immutable falling piece. [`engine`]
//! layers session mechanics on top: the 7-bag randomizer, the single-turn
//! field, scoring, and the frame-driven session driver.
//!
//! Nothing in this crate decides where pieces should go; planning lives in
//! the companion AI crate and feeds the session through its action queue.

use derive_more::{Display, Error};

pub mod core;
pub mod engine;

/// A piece update was rejected because the target position collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("piece collides with the board")]
pub struct PieceCollisionError;

/// A freshly spawned piece overlapped the stack, ending the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("spawn position is blocked")]
pub struct SpawnCollisionError;
