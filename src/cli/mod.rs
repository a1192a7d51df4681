// CLI module for tagprobe
//
// Thin front end over the library: argument parsing, output formatting and
// the subcommands that call `tagprobe::AudioFile`.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::run;
pub use config::Config;
