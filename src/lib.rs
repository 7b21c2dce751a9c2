pub mod app;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;

pub use config::*;
pub use diff::*;
pub use error::*;
