pub mod adapter;
pub mod config;
pub mod content;
pub mod error;
pub mod io;
pub mod metrics;
pub mod paths;
pub mod provider;
pub mod results;
pub mod scenario;
pub mod score;
pub mod session;
pub mod state;
pub mod types;

pub use error::{Result, RogueError};
