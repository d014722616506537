// readme-pulse library.
// Keeps the generated blog and GitHub activity blocks of a profile README current.

pub mod app;
pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod feed;
pub mod github;
pub mod render;

#[cfg(test)]
mod test_utils;

pub use app::{App, RunReport};
pub use error::{PulseError, Result};
