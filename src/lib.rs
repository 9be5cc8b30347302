pub mod config;
pub mod error;
pub mod git_ops;
pub mod layout;
pub mod orchestrator;
pub mod patch;
pub mod tools;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
