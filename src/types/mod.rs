//! Core types for decision-sim.

pub mod generation;
pub mod message;

pub use generation::GenerationSettings;
pub use message::{transcript, Message, Role};
