use std::io::{self, Write};

use regexplain::{Analysis, Flags, PatternToken, TokenKind, beginner_description, pattern::visit};
use serde::Serialize;

const COLOR_RESET: &str = "\x1b[m";
const COLOR_WARNING: &str = "\x1b[01;33m";

fn kind_color(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Literal => "\x1b[37m",
        TokenKind::Escape => "\x1b[35m",
        TokenKind::CharacterClass => "\x1b[36m",
        TokenKind::Quantifier => "\x1b[01;31m",
        TokenKind::Anchor | TokenKind::Wildcard => "\x1b[32m",
        TokenKind::Alternation => "\x1b[01;34m",
        TokenKind::Group => "\x1b[34m",
    }
}

pub fn maybe_colorize(s: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{color}{s}{COLOR_RESET}")
    } else {
        s.to_string()
    }
}

pub fn render_text<W: Write>(
    out: &mut W,
    analysis: &Analysis,
    explain: bool,
    use_color: bool,
) -> io::Result<()> {
    let mut result = Ok(());
    visit(&analysis.tokens, &mut |token: &PatternToken, depth| {
        if result.is_ok() {
            result = write_token(out, token, depth, explain, use_color);
        }
    });
    result?;

    for warning in &analysis.warnings {
        let label = maybe_colorize("warning:", COLOR_WARNING, use_color);
        writeln!(out, "{label} {warning}")?;
    }
    Ok(())
}

fn write_token<W: Write>(
    out: &mut W,
    token: &PatternToken,
    depth: usize,
    explain: bool,
    use_color: bool,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    // pad before colorizing, escape codes would throw the columns off
    let kind = format!("{:<15}", token.kind.as_str());
    let kind = maybe_colorize(&kind, kind_color(token.kind), use_color);
    let description = token.description.as_deref().unwrap_or_default();
    writeln!(out, "{indent}{kind} {:<12} {description}", token.value)?;

    if explain {
        let beginner = beginner_description(token);
        writeln!(out, "{indent}  = {}", beginner.simple)?;
        if let Some(example) = beginner.example {
            writeln!(out, "{indent}    e.g. {example}")?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    flags: Flags,
    tokens: &'a [PatternToken],
    warnings: &'a [String],
}

pub fn render_json<W: Write>(out: &mut W, flags: Flags, analysis: &Analysis) -> io::Result<()> {
    let report = Report {
        flags,
        tokens: &analysis.tokens,
        warnings: &analysis.warnings,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
