//! # Connect Four
//!
//! Rule engine for the two-player vertical-drop game on a 6 × 7 grid.
//! Presentation layers drive a [`GameEngine`](game::GameEngine) with column
//! indices and render the [`GameState`](game::GameState) snapshot it returns.
//!
//! ## Modules
//!
//! - [`game`] — Board, player, game state and the move engine
//! - [`config`] — TOML configuration for the command-line driver
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
