// Markdown block renderers.
// Turns feed posts and contribution summaries into README fragments.

pub mod blog;
pub mod stats;

pub use blog::{DEFAULT_DATE_FORMAT, render_blog_block};
pub use stats::render_stats_block;
