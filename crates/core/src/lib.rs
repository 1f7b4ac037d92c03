pub mod config;
pub mod filter;
pub mod likes;
pub mod model;
pub mod services;
pub mod store;
pub mod tap;

pub use config::AppConfig;
pub use filter::{filter, FilterSpec};
pub use likes::LikedSet;
pub use model::*;
pub use services::{FeedService, FeedSnapshot};
pub use tap::{TapDisambiguator, TapOutcome, DOUBLE_TAP_WINDOW};
