//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "rep-counter")]
#[command(about = "An exercise rep/set/break countdown timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Storage file holding the exercise list
    /// [default: <data dir>/rep-counter/storage.json]
    #[arg(short, long)]
    pub storage: Option<PathBuf>,

    /// Start with audio cues muted
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub muted: bool,

    /// Command used to play cue sound files, e.g. `paplay` or `afplay`
    #[arg(long)]
    pub player: Option<String>,

    /// Sound file played when moving to the next rep
    #[arg(long)]
    pub short_cue: Option<PathBuf>,

    /// Sound file played on start, break and completion
    #[arg(long)]
    pub long_cue: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Storage file path, falling back to the platform data directory
    pub fn storage_path(&self) -> PathBuf {
        self.storage.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rep-counter")
                .join("storage.json")
        })
    }
}
