//! Frame-update engine for a single-screen alien shooter.
//!
//! The library holds every decision the game makes: settings, kinematics,
//! formation stepping, collision resolution and the run state machine.
//! The binary only wires a terminal renderer and input source around it.

pub mod collision;
pub mod compute;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod kinematics;
pub mod render;
pub mod run_state;
pub mod scoreboard;
pub mod settings;
