mod feed;

pub use feed::{FeedService, FeedSnapshot};
