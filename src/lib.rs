pub use wander_tui::cli;
pub use wander_tui::commands;
pub use wander_tui::config;
pub use wander_tui::logging;
pub use wander_tui::tui;
pub use wander_tui::AppConfig;

pub use wander_core as core;
pub use wander_core::filter;
pub use wander_core::likes;
pub use wander_core::model;
pub use wander_core::tap;
