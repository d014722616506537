// Cache module for state persisted between runs.
// Holds the workspace file layout and the conditional-fetch state store.

pub mod paths;
pub mod store;

pub use paths::WorkspacePaths;
pub use store::{CacheState, read_text, write_atomic};
