//! ascii-reel library crate.
//!
//! Converts images and GIFs into compressed terminal text animations and
//! plays them back. The binary is a thin layer over these modules.

pub mod ascii;
pub mod cli;
pub mod codec;
pub mod compositor;
pub mod config;
pub mod convert;
pub mod logging;
pub mod player;
pub mod signal;
pub mod terminal;
