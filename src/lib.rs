//! Void Prospector library
//!
//! A drone asteroid-scanning arcade game.  The simulation core
//! ([`simulation`], [`economy`], [`world`], [`player`]) is plain Rust over
//! value types and can be driven without a window; [`app`] wires it into a
//! Bevy state machine and [`render`] and [`menu`] put it on screen.

pub mod app;
pub mod audio;
pub mod camera;
pub mod config;
pub mod constants;
pub mod economy;
pub mod error;
pub mod input;
pub mod math;
pub mod menu;
pub mod mineral;
pub mod particles;
pub mod player;
pub mod render;
pub mod save;
pub mod simulation;
pub mod world;
