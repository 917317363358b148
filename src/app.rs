use std::io::{self, Read};

use anyhow::{Context, Result};
use regexplain::analyze_warnings;

use crate::cli::{Config, resolve_use_color};
use crate::output::{render_json, render_text};

pub fn run(cfg: Config) -> Result<i32> {
    let use_color = resolve_use_color(cfg.color);
    let flags = cfg.flags.unwrap_or_default();

    let pattern = match cfg.pattern {
        Some(pattern) => pattern,
        None => read_pattern(io::stdin().lock()).context("failed to read pattern from stdin")?,
    };
    let analysis = analyze_warnings(&pattern, flags);

    let mut out = io::stdout().lock();
    if cfg.json {
        render_json(&mut out, flags, &analysis)
    } else {
        render_text(&mut out, &analysis, cfg.explain, use_color)
    }
    .context("failed to write output")?;

    Ok(if cfg.deny_warnings && !analysis.warnings.is_empty() {
        1
    } else {
        0
    })
}

/// Reads the whole input as the pattern, minus one trailing line ending.
fn read_pattern<R: Read>(mut input: R) -> Result<String> {
    let mut buffer = String::new();
    input.read_to_string(&mut buffer)?;
    let trimmed = buffer
        .strip_suffix("\r\n")
        .or_else(|| buffer.strip_suffix('\n'))
        .unwrap_or(&buffer);
    Ok(trimmed.to_string())
}
