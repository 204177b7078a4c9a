/// Transport state machine and file loading.
pub mod controller;
/// Plain state shared between the controller and the renderer.
pub mod state;
/// eframe application and painting.
pub mod ui;
/// Geometry helpers that turn player state into screen coordinates.
pub mod view_model;
