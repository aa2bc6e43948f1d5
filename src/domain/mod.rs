//! Domain logic modules for the timeline viewer.
//!
//! Viewport operations (coordinate transformations, time axis scales).

pub mod viewport_operations;
