// Blog feed module.
// Fetches an RSS or Atom feed conditionally and normalizes it into posts.

pub mod fetch;
pub mod parser;
pub mod types;

pub use fetch::{FeedClient, FeedFetch};
pub use parser::parse_feed;
pub use types::Post;
