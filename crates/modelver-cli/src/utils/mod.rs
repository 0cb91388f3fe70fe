//! Shared CLI utilities.

pub mod input;

pub use input::prompt_confirmation;
