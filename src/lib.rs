pub mod analysis;
pub mod config;
pub mod error;
pub mod event;
pub mod event_window;
pub mod input;
pub mod loader;
pub mod model;
pub mod network;
#[cfg(feature = "render")]
pub mod render;
pub mod report;
pub mod ui;
