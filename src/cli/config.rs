// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};

/// tagprobe - Audio metadata CLI tool
#[derive(Parser, Debug)]
#[command(name = "tagprobe")]
#[command(about = "Read tags, duration and bitrate from MP3 and FLAC files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (log recovered parse problems)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON, one object per line
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read metadata from audio file(s)
    Read {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Read metadata from every file in a directory matching a pattern
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: String,

        /// File pattern (e.g., "*.mp3", "**/*.flac")
        #[arg(short, long, default_value = "*")]
        pattern: String,
    },

    /// Show which parser a path would be handled by
    Detect {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,
    },
}

impl Config {
    /// Default log filter for the chosen verbosity
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            "tagprobe=error"
        } else if self.verbose {
            "tagprobe=debug"
        } else {
            "tagprobe=warn"
        }
    }
}
