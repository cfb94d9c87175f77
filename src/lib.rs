//! Interactive perceptron trainer.
//!
//! A learner walks a two-feature dataset point by point, says whether the
//! current linear rule classifies each point correctly, and watches the rule
//! move when a perceptron update is applied. The crate is split into a pure
//! core (model, session, geometry, layout, scene rendering) and thin shells:
//! an egui window, a headless SVG renderer and a JSON-lines host bridge.

/// Application directory resolution.
pub mod app_dirs;
/// Dataset files and the embedded sample.
pub mod dataset;
/// Desktop window built on egui.
pub mod egui_app;
/// Data/screen coordinates, bounds and clipping.
pub mod geometry;
/// Messaging with an embedding host document.
pub mod host;
/// Label placement for equations and point IDs.
pub mod layout;
/// Tracing subscriber setup.
pub mod logging;
/// Linear rule, update step and metrics.
pub mod perceptron;
/// Scene construction and SVG output.
pub mod render;
/// The point-by-point training state machine.
pub mod session;
/// Persisted user settings.
pub mod settings;
/// Arrows showing how the boundary moved.
pub mod transition;
