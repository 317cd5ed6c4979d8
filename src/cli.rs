use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The transcript text, one caption per line
    Text,
    /// The timed entries as JSON
    Json,
}

macro_rules! arg_env {
    ($v:literal) => {
        concat!("YTW_", $v)
    };
}

/// Print the transcript of web videos, read from the captions of their watch page.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Video IDs or URLs (`https://www.youtube.com/watch?v=<id>`, `https://youtu.be/<id>`).
    /// Several videos are fetched concurrently
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Language code of the transcript, e.g. "fr" or "en-GB".
    /// Any track whose code starts with it matches.
    ///
    /// Without it, an English track is preferred, else the first track is used
    #[arg(long, env=arg_env!("LANGUAGE"))]
    pub lang: Option<String>,

    /// List the available caption tracks instead of printing a transcript
    #[arg(long)]
    pub list: bool,

    #[arg(long, value_enum, default_value_t=Format::Text, env=arg_env!("FORMAT"))]
    pub format: Format,

    /// Proxy URL for every request. Invalid values are ignored
    #[arg(long, env=arg_env!("PROXY"))]
    pub proxy: Option<String>,

    /// The path to a TOML settings file
    #[arg(long, env=arg_env!("CONFIG"))]
    pub config: Option<PathBuf>,

    /// Maximum level of the log messages written to stderr
    #[arg(long, default_value_t=tracing::Level::INFO, env=arg_env!("LOG_LEVEL"))]
    pub log_level: tracing::Level,
}
