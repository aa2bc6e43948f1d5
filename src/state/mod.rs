//! State management modules for the timeline viewer.
//!
//! State-only logic with no drawing: interaction state of the timeline canvas.

mod interaction;

pub use interaction::InteractionState;
