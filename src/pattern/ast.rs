use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Literal,        // a
    Escape,         // \d, \x41, \1, \k<name>
    CharacterClass, // [abc], [^a-z]
    Quantifier,     // *, +, ?, {n}, {n,}, {n,m}, each optionally lazy
    Anchor,         // ^, $
    Wildcard,       // .
    Alternation,    // |
    Group,          // (...), (?:...), (?<name>...), lookarounds
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Literal => "literal",
            TokenKind::Escape => "escape",
            TokenKind::CharacterClass => "character-class",
            TokenKind::Quantifier => "quantifier",
            TokenKind::Anchor => "anchor",
            TokenKind::Wildcard => "wildcard",
            TokenKind::Alternation => "alternation",
            TokenKind::Group => "group",
        }
    }
}

/// The flavour of a group, read off its opening delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    Capturing,          // (...)
    Named(String),      // (?<name>...)
    NonCapturing,       // (?:...)
    PositiveLookahead,  // (?=...)
    NegativeLookahead,  // (?!...)
    PositiveLookbehind, // (?<=...)
    NegativeLookbehind, // (?<!...)
}

impl GroupKind {
    /// Classifies the group opening at the start of `text` (which must begin
    /// with `(`) and returns the byte length of its opening delimiter.
    pub fn from_opening(text: &str) -> (GroupKind, usize) {
        let Some(rest) = text.strip_prefix("(?") else {
            return (GroupKind::Capturing, 1);
        };

        if rest.starts_with(':') {
            (GroupKind::NonCapturing, 3)
        } else if rest.starts_with('=') {
            (GroupKind::PositiveLookahead, 3)
        } else if rest.starts_with('!') {
            (GroupKind::NegativeLookahead, 3)
        } else if rest.starts_with("<=") {
            (GroupKind::PositiveLookbehind, 4)
        } else if rest.starts_with("<!") {
            (GroupKind::NegativeLookbehind, 4)
        } else if let Some(name) = rest
            .strip_prefix('<')
            .and_then(|after| after.split_once('>'))
            .map(|(name, _)| name)
            .filter(|name| is_group_name(name))
        {
            (GroupKind::Named(name.to_string()), 3 + name.len() + 1)
        } else {
            (GroupKind::Capturing, 1)
        }
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self, GroupKind::Capturing | GroupKind::Named(_))
    }

    pub fn is_lookaround(&self) -> bool {
        matches!(
            self,
            GroupKind::PositiveLookahead
                | GroupKind::NegativeLookahead
                | GroupKind::PositiveLookbehind
                | GroupKind::NegativeLookbehind
        )
    }
}

fn is_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// One node of the token tree. `value` is always `&pattern[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternToken {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PatternToken>>,
}

impl PatternToken {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn group_kind(&self) -> Option<GroupKind> {
        if self.kind != TokenKind::Group {
            return None;
        }
        Some(GroupKind::from_opening(&self.value).0)
    }

    pub fn children(&self) -> &[PatternToken] {
        self.children.as_deref().unwrap_or_default()
    }

    /// The text between the group's opening delimiter and its closing `)`.
    /// Empty for non-group tokens.
    pub fn interior(&self) -> &str {
        // children cover the interior exactly, so their outer spans delimit it
        match (self.children().first(), self.children().last()) {
            (Some(first), Some(last)) => &self.value[first.start - self.start..last.end - self.start],
            _ => "",
        }
    }
}

/// Pre-order walk over a token tree; the callback receives each token and its
/// nesting depth (0 for top-level tokens).
pub fn visit<'a, F>(tokens: &'a [PatternToken], f: &mut F)
where
    F: FnMut(&'a PatternToken, usize),
{
    visit_at(tokens, 0, f);
}

fn visit_at<'a, F>(tokens: &'a [PatternToken], depth: usize, f: &mut F)
where
    F: FnMut(&'a PatternToken, usize),
{
    for token in tokens {
        f(token, depth);
        visit_at(token.children(), depth + 1, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_group_openings() {
        assert_eq!(GroupKind::from_opening("(abc)"), (GroupKind::Capturing, 1));
        assert_eq!(GroupKind::from_opening("(?:a)"), (GroupKind::NonCapturing, 3));
        assert_eq!(GroupKind::from_opening("(?=a)"), (GroupKind::PositiveLookahead, 3));
        assert_eq!(GroupKind::from_opening("(?!a)"), (GroupKind::NegativeLookahead, 3));
        assert_eq!(GroupKind::from_opening("(?<=a)"), (GroupKind::PositiveLookbehind, 4));
        assert_eq!(GroupKind::from_opening("(?<!a)"), (GroupKind::NegativeLookbehind, 4));
        assert_eq!(
            GroupKind::from_opening("(?<year>\\d{4})"),
            (GroupKind::Named("year".to_string()), 8)
        );
    }

    #[test]
    fn rejects_malformed_group_names() {
        assert_eq!(GroupKind::from_opening("(?<a)b>)"), (GroupKind::Capturing, 1));
        assert_eq!(GroupKind::from_opening("(?<>x)"), (GroupKind::Capturing, 1));
        assert_eq!(GroupKind::from_opening("(?<1a>x)"), (GroupKind::Capturing, 1));
        assert_eq!(GroupKind::from_opening("(?<abc"), (GroupKind::Capturing, 1));
    }

    #[test]
    fn lookarounds_are_not_capturing() {
        assert!(GroupKind::PositiveLookbehind.is_lookaround());
        assert!(!GroupKind::PositiveLookbehind.is_capturing());
        assert!(GroupKind::Named("x".into()).is_capturing());
        assert!(!GroupKind::NonCapturing.is_lookaround());
    }
}
