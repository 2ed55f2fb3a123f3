//! Game rules and state transitions.
//!
//! This module drives the core grid and shapes through a game:
//!
//! - [`BoardEngine`] - Grid, falling piece, next-piece preview and phase
//! - [`EngineConfig`] - Grid size and optional seed
//! - [`ScoreState`] / [`GameSummary`] - Score, cleared lines and play time
//! - [`PieceSeed`] - Seed for deterministic shapes and spawn columns
//! - [`score_for`] / [`speed_for`] - Line-clear reward and fall speed tables
//!
//! # Game Flow
//!
//! 1. Create a [`BoardEngine`] in [`GamePhase::NotStarted`]
//! 2. [`BoardEngine::start`] spawns the first piece on the top row
//! 3. Input moves, rotates and drops the piece; the host calls
//!    [`BoardEngine::tick`] every [`BoardEngine::fall_interval`]
//! 4. A piece that cannot fall further locks, full rows are cleared and the
//!    previewed piece spawns
//! 5. A spawn that overlaps settled cells ends the game until
//!    [`BoardEngine::reset`]

pub use self::{board_engine::*, config::*, phase::*, piece_source::*, scoring::*};

mod board_engine;
mod config;
mod phase;
mod piece_source;
mod scoring;
