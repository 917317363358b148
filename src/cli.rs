use std::io;
use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use regexplain::Flags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "regexplain",
    version,
    about = "Break a regular expression into explained tokens and flag slow constructs"
)]
pub struct Config {
    /// Pattern to inspect; read from stdin when omitted
    pub pattern: Option<String>,

    /// Regex flags, any of g, i, m, s, u, y (e.g. "gm")
    #[arg(short, long)]
    pub flags: Option<Flags>,

    /// Print the token tree and warnings as JSON
    #[arg(long)]
    pub json: bool,

    /// Add a beginner-friendly explanation under each token
    #[arg(short, long)]
    pub explain: bool,

    /// When to color output: auto, always or never
    #[arg(long, value_enum, default_value_t = ColorWhen::Never)]
    pub color: ColorWhen,

    /// Exit with status 1 when the pattern has warnings
    #[arg(long)]
    pub deny_warnings: bool,
}

pub fn resolve_use_color(color: ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stdout().is_terminal(),
    }
}
