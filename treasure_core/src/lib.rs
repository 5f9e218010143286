//! # Treasure Core
//!
//! The game engine of Hanbao. This crate reads the `hanzi_atlas` reference
//! data, finds character roots in words a player types, builds quiz levels
//! around them, and assembles the treasure map that closes a session.
//!
//! ## Core Components
//!
//! - **detector**: Root detection and the unlock ceremony insights
//! - **levels**: Randomized level generation and answer validation
//! - **treasure_map**: Map assembly, achievements, recommendations and the text report
//! - **session**: Per-player progress and derived metrics
//! - **config**: Tunable limits and thresholds, loadable from TOML
//!
//! ## Design Philosophy
//!
//! - **Read-only data**: The atlas is loaded once and shared by reference
//! - **Injected randomness**: Every random choice takes a caller-supplied `Rng`
//! - **Ephemeral results**: Levels, maps and achievements are rebuilt on request

pub mod config;
pub mod detector;
pub mod error;
pub mod levels;
pub mod session;
pub mod treasure_map;

pub use config::*;
pub use detector::*;
pub use error::{EngineError, Result};
pub use levels::*;
pub use session::*;
pub use treasure_map::*;
