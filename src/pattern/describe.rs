use serde::Serialize;

use crate::pattern::ast::{GroupKind, PatternToken, TokenKind};
use crate::pattern::parser::{Repeat, has_range, is_syntax_char};

/// A plain-language explanation of a single token, for tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeginnerDescription {
    pub simple: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl BeginnerDescription {
    fn new(simple: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            simple: simple.into(),
            example: Some(example.into()),
        }
    }

    fn plain(simple: impl Into<String>) -> Self {
        Self {
            simple: simple.into(),
            example: None,
        }
    }
}

pub fn beginner_description(token: &PatternToken) -> BeginnerDescription {
    let described = match token.kind {
        TokenKind::Literal => Some(literal(&token.value)),
        TokenKind::Escape => escape(&token.value),
        TokenKind::Quantifier => quantifier(&token.value),
        TokenKind::Anchor => anchor(token),
        TokenKind::Wildcard => Some(wildcard(token)),
        TokenKind::Alternation => Some(BeginnerDescription::new(
            "OR: matches either what comes before or what comes after",
            "cat|dog matches \"cat\" or \"dog\"",
        )),
        TokenKind::CharacterClass => character_class(&token.value),
        TokenKind::Group => group(token),
    };

    described.unwrap_or_else(|| match &token.description {
        Some(description) => BeginnerDescription::plain(description.clone()),
        None => BeginnerDescription::plain(format!("{}: {}", token.kind.as_str(), token.value)),
    })
}

fn literal(value: &str) -> BeginnerDescription {
    if value == " " {
        return BeginnerDescription::new("A space character", "a b matches \"a b\"");
    }
    BeginnerDescription::new(
        format!("The exact character \"{value}\""),
        format!("{value} matches \"{value}\""),
    )
}

fn escape(value: &str) -> Option<BeginnerDescription> {
    let (simple, example) = match value {
        "\\d" => ("Any digit from 0 to 9", "\\d matches \"7\" in \"abc7\""),
        "\\D" => ("Any character that is not a digit", "\\D matches \"a\" in \"1a2\""),
        "\\w" => ("Any letter, digit or underscore", "\\w+ matches \"user_42\""),
        "\\W" => (
            "Any character that is not a letter, digit or underscore",
            "\\W matches \"!\" in \"hi!\"",
        ),
        "\\s" => (
            "Any whitespace: a space, tab or line break",
            "\\s matches the space in \"a b\"",
        ),
        "\\S" => ("Any character that is not whitespace", "\\S+ matches \"word\" in \" word \""),
        "\\b" => (
            "The edge of a word (a position, not a character)",
            "\\bcat\\b matches \"cat\" but not the \"cat\" in \"category\"",
        ),
        "\\B" => (
            "A position that is not the edge of a word",
            "\\Bcat matches the \"cat\" in \"bobcat\"",
        ),
        "\\n" => ("A line break (newline)", "a\\nb matches \"a\" and \"b\" on two lines"),
        "\\t" => ("A tab character", "a\\tb matches \"a\" and \"b\" separated by a tab"),
        "\\r" => ("A carriage return (part of Windows line endings)", "\\r\\n matches a Windows line ending"),
        "\\f" => ("A form feed character", "\\f matches a page break character"),
        "\\v" => ("A vertical tab character", "\\v matches a vertical tab"),
        "\\0" => ("The null character (code 0)", "\\0 matches a NUL byte"),
        _ => return escape_by_shape(value),
    };
    Some(BeginnerDescription::new(simple, example))
}

fn escape_by_shape(value: &str) -> Option<BeginnerDescription> {
    let body = value.strip_prefix('\\')?;

    if let Some(name) = body.strip_prefix("k<").and_then(|rest| rest.strip_suffix('>')) {
        return Some(BeginnerDescription::new(
            format!("Repeats exactly the text captured by the group named \"{name}\""),
            format!("(?<{name}>\\w)\\k<{name}> matches doubled letters like \"ee\""),
        ));
    }

    if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
        return Some(BeginnerDescription::new(
            format!("Repeats exactly the text captured by group {body}"),
            "(\\w)\\1 matches doubled letters like \"ee\"",
        ));
    }

    let code = body
        .strip_prefix('x')
        .filter(|hex| hex.len() == 2)
        .or_else(|| body.strip_prefix("u{").and_then(|hex| hex.strip_suffix('}')))
        .or_else(|| body.strip_prefix('u').filter(|hex| hex.len() == 4));
    if let Some(hex) = code {
        let c = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)?;
        return Some(BeginnerDescription::new(
            format!("The character with code {}", hex.to_ascii_uppercase()),
            format!("{value} matches \"{}\"", c.escape_default()),
        ));
    }

    if let Some(letter) = body.strip_prefix('c').filter(|l| l.len() == 1) {
        return Some(BeginnerDescription::plain(format!(
            "A control character (Ctrl+{})",
            letter.to_ascii_uppercase()
        )));
    }

    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_syntax_char(c) => Some(BeginnerDescription::new(
            format!("The literal character \"{c}\" (escaped so it is not treated as special)"),
            format!("{value} matches \"{c}\""),
        )),
        _ => None,
    }
}

fn quantifier(value: &str) -> Option<BeginnerDescription> {
    let (base, lazy) = match value.strip_suffix('?') {
        Some(base) if !base.is_empty() => (base, true),
        _ => (value, false),
    };

    let mut described = match base {
        "*" => BeginnerDescription::new(
            "Zero or more of the previous item",
            "a* matches \"\", \"a\" or \"aaa\"",
        ),
        "+" => BeginnerDescription::new(
            "One or more of the previous item",
            "a+ matches \"a\" or \"aaa\"",
        ),
        "?" => BeginnerDescription::new(
            "The previous item is optional (zero or one)",
            "colou?r matches \"color\" and \"colour\"",
        ),
        _ => match Repeat::from_token(base)? {
            repeat @ Repeat::Between(m, n) if repeat.out_of_order() => {
                return Some(BeginnerDescription::plain(format!(
                    "A broken repeat count: the minimum {m} is larger than the maximum {n}, so regex engines reject it"
                )));
            }
            Repeat::Exactly(n) => BeginnerDescription::new(
                format!("Exactly {n} of the previous item"),
                format!("\\d{{{n}}} matches exactly {n} digits"),
            ),
            Repeat::AtLeast(n) => BeginnerDescription::new(
                format!("{n} or more of the previous item"),
                format!("\\d{{{n},}} matches {n} or more digits"),
            ),
            Repeat::Between(m, n) => BeginnerDescription::new(
                format!("Between {m} and {n} of the previous item"),
                format!("\\d{{{m},{n}}} matches {m} to {n} digits"),
            ),
        },
    };

    if lazy {
        described.simple.push_str(", matching as few as possible (lazy)");
        described.example = Some(format!("<.{value}> stops at the first \">\" in \"<a><b>\""));
    }
    Some(described)
}

fn anchor(token: &PatternToken) -> Option<BeginnerDescription> {
    let multiline = token
        .description
        .as_deref()
        .is_some_and(|d| d.contains("line"));
    let described = match (token.value.as_str(), multiline) {
        ("^", false) => BeginnerDescription::new(
            "The start of the text",
            "^Hello matches \"Hello world\" but not \"Say Hello\"",
        ),
        ("^", true) => BeginnerDescription::new(
            "The start of any line",
            "^- matches the dash starting each line of a list",
        ),
        ("$", false) => BeginnerDescription::new(
            "The end of the text",
            "world$ matches \"Hello world\" but not \"world peace\"",
        ),
        ("$", true) => BeginnerDescription::new(
            "The end of any line",
            ";$ matches a semicolon ending any line",
        ),
        _ => return None,
    };
    Some(described)
}

fn wildcard(token: &PatternToken) -> BeginnerDescription {
    let dot_all = token
        .description
        .as_deref()
        .is_some_and(|d| d.contains("including"));
    let simple = if dot_all {
        "Any single character, including line breaks"
    } else {
        "Any single character except a line break"
    };
    BeginnerDescription::new(simple, "c.t matches \"cat\", \"cot\" and \"c9t\"")
}

// body text, the noun it stands for, and a sample member
const KNOWN_SETS: &[(&[&str], &str, char)] = &[
    (&["a-z"], "lowercase letter (a to z)", 'q'),
    (&["A-Z"], "uppercase letter (A to Z)", 'Q'),
    (&["0-9", "\\d"], "digit (0 to 9)", '7'),
    (&["a-zA-Z", "A-Za-z"], "letter", 'g'),
    (&["a-zA-Z0-9", "A-Za-z0-9", "0-9a-zA-Z"], "letter or digit", '5'),
    (&["a-zA-Z0-9_", "A-Za-z0-9_", "\\w"], "letter, digit or underscore", '_'),
    (&["0-9a-fA-F", "a-fA-F0-9", "0-9A-Fa-f", "A-Fa-f0-9"], "hexadecimal digit", 'f'),
    (&["\\s"], "whitespace character", ' '),
];

fn with_article(noun: &str) -> String {
    let article = if noun.starts_with(['a', 'e', 'i', 'o', 'u']) { "an" } else { "a" };
    format!("{article} {noun}")
}

fn character_class(value: &str) -> Option<BeginnerDescription> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    let (negated, body) = match inner.strip_prefix('^') {
        Some(body) => (true, body),
        None => (false, inner),
    };

    if let Some((_, noun, sample)) = KNOWN_SETS.iter().find(|(bodies, _, _)| bodies.contains(&body)) {
        let noun = with_article(noun);
        return Some(if negated {
            BeginnerDescription::new(
                format!("Any character except {noun}"),
                format!("{value} does not match \"{sample}\""),
            )
        } else {
            BeginnerDescription::new(
                format!("Any one {}", noun.split_once(' ').map_or(noun.as_str(), |(_, n)| n)),
                format!("{value} matches \"{sample}\""),
            )
        });
    }

    if body.is_empty() || body.contains('\\') || has_range(body) {
        let simple = if negated {
            format!("Any character not in the set {value}")
        } else {
            format!("One character from the set {value}")
        };
        return Some(BeginnerDescription::plain(simple));
    }

    let members: Vec<String> = body.chars().map(String::from).collect();
    let first = members.first()?;
    Some(if negated {
        BeginnerDescription::new(
            format!("Any character except {}", members.join(", ")),
            format!("{value} does not match \"{first}\""),
        )
    } else {
        BeginnerDescription::new(
            format!("Any one of: {}", members.join(", ")),
            format!("{value} matches \"{first}\""),
        )
    })
}

fn group(token: &PatternToken) -> Option<BeginnerDescription> {
    let inner = token.interior();
    let described = match token.group_kind()? {
        GroupKind::Capturing => BeginnerDescription::new(
            format!("Groups \"{inner}\" together and remembers the text it matched"),
            "(ha)+ matches \"hahaha\" and remembers the last \"ha\"",
        ),
        GroupKind::Named(name) => BeginnerDescription::new(
            format!("Groups \"{inner}\" together and remembers the match under the name \"{name}\""),
            format!("\\k<{name}> later repeats whatever this group matched"),
        ),
        GroupKind::NonCapturing => BeginnerDescription::new(
            format!("Groups \"{inner}\" together without remembering the match"),
            "(?:ab)+ matches \"abab\"",
        ),
        GroupKind::PositiveLookahead => BeginnerDescription::new(
            format!("Checks that \"{inner}\" comes next, without including it in the match"),
            "\\d+(?=px) matches \"10\" in \"10px\"",
        ),
        GroupKind::NegativeLookahead => BeginnerDescription::new(
            format!("Checks that \"{inner}\" does not come next"),
            "\\d+(?!px) matches \"10\" in \"10em\"",
        ),
        GroupKind::PositiveLookbehind => BeginnerDescription::new(
            format!("Checks that \"{inner}\" comes right before this point"),
            "(?<=\\$)\\d+ matches \"5\" in \"$5\"",
        ),
        GroupKind::NegativeLookbehind => BeginnerDescription::new(
            format!("Checks that \"{inner}\" does not come right before this point"),
            "(?<!\\$)\\d+ matches \"5\" in \"€5\"",
        ),
    };
    Some(described)
}
