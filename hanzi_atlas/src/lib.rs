//! # Hanzi Atlas
//!
//! The reference data crate for Hanbao - character roots, the Japanese and
//! Korean words that borrow them, and dialect readings. The atlas is loaded
//! once and is read-only afterwards; it contains no quiz or scoring logic.

pub mod dataset;
pub mod entities;
pub mod error;

pub use dataset::*;
pub use entities::*;
pub use error::*;
