//! Desktop shell for the trainer.
//!
//! `controller` owns the session and turns button presses into state changes;
//! `ui` lays out panels and hands the rendered scene to `painter`.

pub mod controller;
pub mod painter;
pub mod state;
mod style;
pub mod ui;
