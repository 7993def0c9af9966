pub mod assets;
pub mod config;
pub mod error;
pub mod format;
pub mod parse;
pub mod types;
