pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use wander_core as core;
pub use wander_core::filter;
pub use wander_core::likes;
pub use wander_core::model;
pub use wander_core::tap;

pub use wander_core::AppConfig;
