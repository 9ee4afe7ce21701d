pub mod analyzer;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod format;
pub mod parser;
