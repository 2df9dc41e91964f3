pub mod args;
pub mod commands;
pub mod prompt;
pub mod select;

pub use args::OutputFormat;
