use crate::pattern::ast::{GroupKind, PatternToken, TokenKind};
use crate::pattern::flags::Flags;

/// Groups nested deeper than this are not opened; their `(` becomes a literal.
pub const MAX_GROUP_DEPTH: usize = 100;

pub fn tokenize(pattern: &str, flags: Flags) -> Vec<PatternToken> {
    let mut scanner = Scanner {
        src: pattern,
        bytes: pattern.as_bytes(),
        flags,
        group_counter: 0,
    };
    scanner.scan(0, pattern.len(), 0)
}

// All syntax characters are ASCII, so the scanner walks bytes and only decodes
// a full char where a token has to cover one (literals and escaped chars).
struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    flags: Flags,
    group_counter: usize,
}

impl Scanner<'_> {
    fn scan(&mut self, lo: usize, hi: usize, depth: usize) -> Vec<PatternToken> {
        let mut tokens = Vec::new();
        let mut i = lo;

        while i < hi {
            let token = match self.bytes[i] {
                b'[' => self.character_class(i, hi),
                b'\\' => Some(self.escape(i, hi)),
                b'*' | b'+' | b'?' => Some(self.simple_quantifier(i, hi)),
                b'{' => self.brace_quantifier(i, hi),
                b'^' | b'$' => Some(self.anchor(i)),
                b'(' if depth < MAX_GROUP_DEPTH => Some(self.group(i, hi, depth)),
                b'|' => Some(self.leaf(
                    TokenKind::Alternation,
                    i,
                    i + 1,
                    "Alternation (OR)".to_string(),
                )),
                b'.' => Some(self.wildcard(i)),
                _ => None,
            };
            let token = token.unwrap_or_else(|| self.literal(i, hi));
            i = token.end;
            tokens.push(token);
        }
        tokens
    }

    fn leaf(&self, kind: TokenKind, start: usize, end: usize, description: String) -> PatternToken {
        PatternToken {
            kind,
            value: self.src[start..end].to_string(),
            start,
            end,
            description: Some(description),
            children: None,
        }
    }

    fn literal(&self, start: usize, hi: usize) -> PatternToken {
        let c = self.src[start..hi].chars().next().unwrap_or_default();
        let end = (start + c.len_utf8()).min(hi);
        self.leaf(
            TokenKind::Literal,
            start,
            end,
            format!("Matches the character \"{c}\""),
        )
    }

    /// Index of the `]` closing the class opened at `start`, if any before `hi`.
    /// `[]` and `[^]` take the bracket right after the opener as a member.
    fn class_end(&self, start: usize, hi: usize) -> Option<usize> {
        let mut j = start + 1;
        if j < hi && self.bytes[j] == b'^' {
            j += 1;
        }
        if j < hi && self.bytes[j] == b']' {
            j += 1;
        }

        let mut escaped = false;
        while j < hi {
            match self.bytes[j] {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b']' => return Some(j),
                _ => {}
            }
            j += 1;
        }
        None
    }

    fn character_class(&self, start: usize, hi: usize) -> Option<PatternToken> {
        let close = self.class_end(start, hi)?;
        let negated = self.bytes[start + 1] == b'^';
        let body_start = if negated { start + 2 } else { start + 1 };
        let body = &self.src[body_start..close];

        let mut description = if negated {
            "Negated character class: matches any character not in the set".to_string()
        } else {
            "Character class: matches any one character in the set".to_string()
        };
        if body.contains('\\') {
            description.push_str(" (contains escape sequences)");
        } else if has_range(body) {
            description.push_str(" (contains ranges)");
        }
        Some(self.leaf(TokenKind::CharacterClass, start, close + 1, description))
    }

    fn escape(&self, start: usize, hi: usize) -> PatternToken {
        let Some(next) = self.src[start + 1..hi].chars().next() else {
            return self.leaf(
                TokenKind::Escape,
                start,
                start + 1,
                "Incomplete escape sequence".to_string(),
            );
        };
        let after = start + 1 + next.len_utf8();

        let fixed = |text: &str| (after, text.to_string());
        let (end, description) = match next {
            'd' => fixed("Digit character [0-9]"),
            'D' => fixed("Non-digit character [^0-9]"),
            'w' => fixed("Word character [A-Za-z0-9_]"),
            'W' => fixed("Non-word character [^A-Za-z0-9_]"),
            's' => fixed("Whitespace character"),
            'S' => fixed("Non-whitespace character"),
            'b' => fixed("Word boundary"),
            'B' => fixed("Non-word boundary"),
            'n' => fixed("Newline character"),
            't' => fixed("Tab character"),
            'r' => fixed("Carriage return character"),
            'f' => fixed("Form feed character"),
            'v' => fixed("Vertical tab character"),
            '0' => fixed("Null character"),
            'x' => self.hex_escape(start, hi),
            'u' => self.unicode_escape(start, hi),
            'c' => match self.bytes.get(start + 2) {
                Some(letter) if start + 2 < hi && letter.is_ascii_alphabetic() => (
                    start + 3,
                    format!("Control character Ctrl+{}", letter.to_ascii_uppercase() as char),
                ),
                _ => fixed("Escaped c character"),
            },
            '1'..='9' => {
                let end = self.digits_end(start + 1, hi);
                (
                    end,
                    format!("Backreference to capture group {}", &self.src[start + 1..end]),
                )
            }
            'k' => match self.named_reference(start, hi) {
                Some((end, name)) => (end, format!("Backreference to group named \"{name}\"")),
                None => fixed("Escaped k character"),
            },
            c if is_syntax_char(c) => (after, format!("Literal \"{c}\"")),
            c => (after, format!("Escaped {c} character")),
        };
        self.leaf(TokenKind::Escape, start, end, description)
    }

    fn digits_end(&self, from: usize, hi: usize) -> usize {
        let mut end = from;
        while end < hi && self.bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    }

    /// Counts hex digits starting at `from`, reading at most `max` and never past `hi`.
    fn hex_run(&self, from: usize, hi: usize, max: usize) -> usize {
        self.bytes[from.min(hi)..hi]
            .iter()
            .take(max)
            .take_while(|b| b.is_ascii_hexdigit())
            .count()
    }

    fn hex_escape(&self, start: usize, hi: usize) -> (usize, String) {
        let digits = self.hex_run(start + 2, hi, 2);
        let end = start + 2 + digits;
        if digits == 2 {
            let code = self.src[start + 2..end].to_ascii_uppercase();
            (end, format!("Hexadecimal escape (character code 0x{code})"))
        } else {
            (end, "Incomplete hexadecimal escape".to_string())
        }
    }

    fn unicode_escape(&self, start: usize, hi: usize) -> (usize, String) {
        let open = start + 2;
        if open < hi && self.bytes[open] == b'{' {
            let digits = self.hex_run(open + 1, hi, usize::MAX);
            let close = open + 1 + digits;
            if digits > 0 && close < hi && self.bytes[close] == b'}' {
                let code = self.src[open + 1..close].to_ascii_uppercase();
                let description = if code_point_in_range(&code) {
                    format!("Unicode code point escape U+{code}")
                } else {
                    format!("Invalid unicode code point escape U+{code} (above U+10FFFF)")
                };
                return (close + 1, description);
            }
            return (close, "Incomplete unicode escape".to_string());
        }

        let digits = self.hex_run(open, hi, 4);
        let end = open + digits;
        if digits == 4 {
            let code = self.src[open..end].to_ascii_uppercase();
            (end, format!("Unicode escape U+{code}"))
        } else {
            (end, "Incomplete unicode escape".to_string())
        }
    }

    fn named_reference(&self, start: usize, hi: usize) -> Option<(usize, &str)> {
        let rest = self.src[start + 2..hi].strip_prefix('<')?;
        let (name, _) = rest.split_once('>')?;
        if name.is_empty() || name.contains(['\\', '(', ')', '[', '<']) {
            return None;
        }
        Some((start + 3 + name.len() + 1, name))
    }

    fn lazy_end(&self, end: usize, hi: usize) -> (usize, bool) {
        if end < hi && self.bytes[end] == b'?' {
            (end + 1, true)
        } else {
            (end, false)
        }
    }

    fn simple_quantifier(&self, start: usize, hi: usize) -> PatternToken {
        let count = match self.bytes[start] {
            b'*' => "0 or more",
            b'+' => "1 or more",
            _ => "0 or 1",
        };
        let (end, lazy) = self.lazy_end(start + 1, hi);
        self.leaf(TokenKind::Quantifier, start, end, quantifier_description(count, lazy))
    }

    fn brace_quantifier(&self, start: usize, hi: usize) -> Option<PatternToken> {
        let close = start + self.src[start..hi].find('}')?;
        let repeat = Repeat::parse(&self.src[start + 1..close])?;
        let (end, lazy) = self.lazy_end(close + 1, hi);
        Some(self.leaf(
            TokenKind::Quantifier,
            start,
            end,
            quantifier_description(&repeat.to_string(), lazy),
        ))
    }

    fn anchor(&self, start: usize) -> PatternToken {
        let description = match (self.bytes[start], self.flags.multiline) {
            (b'^', true) => "Start of line (multiline mode)",
            (b'^', false) => "Start of string",
            (_, true) => "End of line (multiline mode)",
            (_, false) => "End of string",
        };
        self.leaf(TokenKind::Anchor, start, start + 1, description.to_string())
    }

    fn wildcard(&self, start: usize) -> PatternToken {
        let description = if self.flags.dot_all {
            "Matches any character including line terminators (dotAll mode)"
        } else {
            "Matches any character except line terminators"
        };
        self.leaf(TokenKind::Wildcard, start, start + 1, description.to_string())
    }

    /// Index of the `)` balancing the `(` at `start`. Escaped characters and
    /// complete character classes are skipped over.
    fn group_close(&self, start: usize, hi: usize) -> Option<usize> {
        let mut depth = 1usize;
        let mut j = start + 1;
        while j < hi {
            match self.bytes[j] {
                b'\\' => j += 1,
                b'[' => {
                    if let Some(close) = self.class_end(j, hi) {
                        j = close;
                    }
                }
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j);
                    }
                }
                _ => {}
            }
            j += 1;
        }
        None
    }

    fn group(&mut self, start: usize, hi: usize, depth: usize) -> PatternToken {
        let (kind, prefix) = GroupKind::from_opening(&self.src[start..hi]);
        // numbered in order of the opening paren, before any nested group
        let number = if kind.is_capturing() {
            self.group_counter += 1;
            Some(self.group_counter)
        } else {
            None
        };

        let close = self.group_close(start, hi);
        let (interior_end, end) = match close {
            Some(close) => (close, close + 1),
            None => (hi, hi),
        };
        let interior_start = (start + prefix).min(interior_end);
        let children = self.scan(interior_start, interior_end, depth + 1);

        let mut description = group_description(&kind, number);
        if close.is_none() {
            description.push_str(" (unclosed)");
        }

        PatternToken {
            kind: TokenKind::Group,
            value: self.src[start..end].to_string(),
            start,
            end,
            description: Some(description),
            children: Some(children),
        }
    }
}

pub(crate) fn is_syntax_char(c: char) -> bool {
    matches!(
        c,
        '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '/' | '-'
    )
}

fn code_point_in_range(hex: &str) -> bool {
    let hex = hex.trim_start_matches('0');
    hex.len() <= 6 && u32::from_str_radix(hex, 16).map_or(true, |n| n <= 0x10FFFF)
}

/// An unescaped `-` with something on both sides of it.
pub(crate) fn has_range(body: &str) -> bool {
    let chars: Vec<char> = body.chars().collect();
    let mut escaped = false;
    for (k, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '-' if k > 0 && k + 1 < chars.len() => return true,
            _ => {}
        }
    }
    false
}

fn quantifier_description(count: &str, lazy: bool) -> String {
    let mode = if lazy { "lazy" } else { "greedy" };
    format!("{count}, {mode}")
}

fn group_description(kind: &GroupKind, number: Option<usize>) -> String {
    let number = number.unwrap_or_default();
    match kind {
        GroupKind::Capturing => format!("Capturing group #{number}"),
        GroupKind::Named(name) => format!("Named capturing group \"{name}\" (#{number})"),
        GroupKind::NonCapturing => "Non-capturing group".to_string(),
        GroupKind::PositiveLookahead => "Positive lookahead".to_string(),
        GroupKind::NegativeLookahead => "Negative lookahead".to_string(),
        GroupKind::PositiveLookbehind => "Positive lookbehind".to_string(),
        GroupKind::NegativeLookbehind => "Negative lookbehind".to_string(),
    }
}

/// Bounds of a `{m}`, `{m,}` or `{m,n}` quantifier. Kept as digit text so
/// that oversized counts never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat<'a> {
    Exactly(&'a str),
    AtLeast(&'a str),
    Between(&'a str, &'a str),
}

impl<'a> Repeat<'a> {
    /// Parses the text between the braces.
    pub fn parse(body: &'a str) -> Option<Self> {
        let is_count = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        match body.split_once(',') {
            None if is_count(body) => Some(Repeat::Exactly(body)),
            Some((min, "")) if is_count(min) => Some(Repeat::AtLeast(min)),
            Some((min, max)) if is_count(min) && is_count(max) => Some(Repeat::Between(min, max)),
            _ => None,
        }
    }

    /// Parses a whole brace quantifier token value such as `{2,5}?`.
    pub fn from_token(value: &'a str) -> Option<Self> {
        let value = value.strip_suffix('?').unwrap_or(value);
        Self::parse(value.strip_prefix('{')?.strip_suffix('}')?)
    }

    /// `{m,n}` with `m > n`, which regex engines reject.
    pub fn out_of_order(&self) -> bool {
        let Repeat::Between(min, max) = *self else {
            return false;
        };
        let (min, max) = (min.trim_start_matches('0'), max.trim_start_matches('0'));
        (min.len(), min) > (max.len(), max)
    }

    pub fn bounds(&self) -> impl Iterator<Item = &'a str> {
        let (min, max) = match *self {
            Repeat::Exactly(n) => (n, None),
            Repeat::AtLeast(n) => (n, None),
            Repeat::Between(m, n) => (m, Some(n)),
        };
        std::iter::once(min).chain(max)
    }
}

impl std::fmt::Display for Repeat<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Repeat::Exactly(n) => write!(f, "Exactly {n}"),
            Repeat::AtLeast(n) => write!(f, "At least {n}"),
            Repeat::Between(m, n) if self.out_of_order() => {
                write!(f, "Between {m} and {n} (out of order: minimum exceeds maximum)")
            }
            Repeat::Between(m, n) => write!(f, "Between {m} and {n}"),
        }
    }
}

/// Compares a run of ASCII digits against `limit` without parsing it.
pub(crate) fn count_exceeds(digits: &str, limit: u64) -> bool {
    let digits = digits.trim_start_matches('0');
    if digits.len() > 19 {
        return true;
    }
    digits.parse::<u64>().is_ok_and(|n| n > limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[PatternToken]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn values(tokens: &[PatternToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    fn desc(token: &PatternToken) -> &str {
        token.description.as_deref().unwrap_or_default()
    }

    #[test]
    fn empty_pattern_has_no_tokens() {
        assert!(tokenize("", Flags::default()).is_empty());
    }

    #[test]
    fn simple_quantifiers() {
        let tokens = tokenize("a*b+c?", Flags::default());
        assert_eq!(values(&tokens), ["a", "*", "b", "+", "c", "?"]);
        assert_eq!(desc(&tokens[1]), "0 or more, greedy");
        assert_eq!(desc(&tokens[3]), "1 or more, greedy");
        assert_eq!(desc(&tokens[5]), "0 or 1, greedy");
        assert_eq!(desc(&tokens[0]), "Matches the character \"a\"");
    }

    #[test]
    fn lazy_quantifiers_absorb_question_mark() {
        let tokens = tokenize("a+?b{2,3}?", Flags::default());
        assert_eq!(values(&tokens), ["a", "+?", "b", "{2,3}?"]);
        assert_eq!(desc(&tokens[1]), "1 or more, lazy");
        assert_eq!(desc(&tokens[3]), "Between 2 and 3, lazy");
    }

    #[test]
    fn brace_quantifier_forms() {
        let tokens = tokenize("a{3}b{2,}", Flags::default());
        assert_eq!(desc(&tokens[1]), "Exactly 3, greedy");
        assert_eq!(desc(&tokens[3]), "At least 2, greedy");
    }

    #[test]
    fn malformed_braces_degrade_to_literals() {
        let tokens = tokenize("a{", Flags::default());
        assert_eq!(kinds(&tokens), [TokenKind::Literal, TokenKind::Literal]);

        let tokens = tokenize("x{a,b}", Flags::default());
        assert!(tokens.iter().all(|t| t.is(TokenKind::Literal)));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn huge_brace_count_is_one_quantifier() {
        let tokens = tokenize("a{999999999999999999999999}", Flags::default());
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].is(TokenKind::Quantifier));
    }

    #[test]
    fn group_with_alternation_children() {
        let tokens = tokenize("(cat|dog)", Flags::default());
        assert_eq!(tokens.len(), 1);
        let children = tokens[0].children();
        assert_eq!(values(children), ["c", "a", "t", "|", "d", "o", "g"]);
        assert!(children[3].is(TokenKind::Alternation));
        assert_eq!(desc(&children[3]), "Alternation (OR)");
        assert_eq!(children[0].start, 1);
        assert_eq!(desc(&tokens[0]), "Capturing group #1");
    }

    #[test]
    fn empty_groups_have_empty_children() {
        for pattern in ["()", "(?:)", "(?=)", "(?<n>)"] {
            let tokens = tokenize(pattern, Flags::default());
            assert_eq!(tokens.len(), 1, "{pattern}");
            assert_eq!(tokens[0].children, Some(vec![]), "{pattern}");
        }
    }

    #[test]
    fn capturing_groups_are_numbered_by_opening_paren() {
        let tokens = tokenize("((a)(?:b)(?<c>d))", Flags::default());
        assert_eq!(desc(&tokens[0]), "Capturing group #1");
        let inner = tokens[0].children();
        assert_eq!(desc(&inner[0]), "Capturing group #2");
        assert_eq!(desc(&inner[1]), "Non-capturing group");
        assert_eq!(desc(&inner[2]), "Named capturing group \"c\" (#3)");
    }

    #[test]
    fn lookaround_prefixes_are_excluded_from_children() {
        let tokens = tokenize("(?<=\\$)\\d+(?!px)", Flags::default());
        assert_eq!(desc(&tokens[0]), "Positive lookbehind");
        assert_eq!(values(tokens[0].children()), ["\\$"]);
        assert_eq!(desc(&tokens[3]), "Negative lookahead");
        assert_eq!(values(tokens[3].children()), ["p", "x"]);
    }

    #[test]
    fn unclosed_group_runs_to_end() {
        let tokens = tokenize("a(bc", Flags::default());
        assert_eq!(values(&tokens), ["a", "(bc"]);
        assert_eq!(desc(&tokens[1]), "Capturing group #1 (unclosed)");
        assert_eq!(values(tokens[1].children()), ["b", "c"]);

        let tokens = tokenize("(", Flags::default());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].children, Some(vec![]));
    }

    #[test]
    fn stray_close_paren_is_literal() {
        let tokens = tokenize("a)", Flags::default());
        assert_eq!(kinds(&tokens), [TokenKind::Literal, TokenKind::Literal]);
    }

    #[test]
    fn escaped_parens_do_not_nest() {
        let tokens = tokenize("(\\))", Flags::default());
        assert_eq!(tokens.len(), 1);
        assert_eq!(values(tokens[0].children()), ["\\)"]);
        assert_eq!(desc(&tokens[0].children()[0]), "Literal \")\"");
    }

    #[test]
    fn class_inside_group_may_hold_parens() {
        let tokens = tokenize("([)])", Flags::default());
        assert_eq!(tokens.len(), 1);
        assert_eq!(values(tokens[0].children()), ["[)]"]);
    }

    #[test]
    fn leading_bracket_is_a_class_member() {
        for pattern in ["[]]", "[^]]"] {
            let tokens = tokenize(pattern, Flags::default());
            assert_eq!(tokens.len(), 1, "{pattern}");
            assert!(tokens[0].is(TokenKind::CharacterClass));
        }
    }

    #[test]
    fn unterminated_class_degrades_to_literal_bracket() {
        let tokens = tokenize("[abc", Flags::default());
        assert_eq!(values(&tokens), ["[", "a", "b", "c"]);
        assert!(tokens[0].is(TokenKind::Literal));
    }

    #[test]
    fn escaped_backslash_does_not_escape_the_close() {
        let tokens = tokenize("[\\\\]a", Flags::default());
        assert_eq!(values(&tokens), ["[\\\\]", "a"]);
    }

    #[test]
    fn class_descriptions() {
        let tokens = tokenize("[^a-z][a\\d-z][abc]", Flags::default());
        assert_eq!(
            desc(&tokens[0]),
            "Negated character class: matches any character not in the set (contains ranges)"
        );
        assert!(desc(&tokens[1]).ends_with("(contains escape sequences)"));
        assert_eq!(desc(&tokens[2]), "Character class: matches any one character in the set");
    }

    #[test]
    fn hyphen_at_class_edges_is_not_a_range() {
        assert!(!has_range("-ab"));
        assert!(!has_range("ab-"));
        assert!(!has_range("a\\-b"));
        assert!(has_range("a-b"));
    }

    #[test]
    fn word_boundaries() {
        let tokens = tokenize("\\bword\\b", Flags::default());
        assert_eq!(values(&tokens), ["\\b", "w", "o", "r", "d", "\\b"]);
        assert_eq!(desc(&tokens[0]), "Word boundary");
        assert!(tokens[5].is(TokenKind::Escape));
    }

    #[test]
    fn escape_forms() {
        let cases = [
            ("\\x41", "Hexadecimal escape (character code 0x41)"),
            ("\\u00e9", "Unicode escape U+00E9"),
            ("\\u{1F600}", "Unicode code point escape U+1F600"),
            ("\\cJ", "Control character Ctrl+J"),
            ("\\12", "Backreference to capture group 12"),
            ("\\k<year>", "Backreference to group named \"year\""),
            ("\\0", "Null character"),
            ("\\.", "Literal \".\""),
            ("\\q", "Escaped q character"),
        ];
        for (pattern, expected) in cases {
            let tokens = tokenize(pattern, Flags::default());
            assert_eq!(tokens.len(), 1, "{pattern}");
            assert_eq!(tokens[0].value, pattern);
            assert_eq!(desc(&tokens[0]), expected, "{pattern}");
        }
    }

    #[test]
    fn code_points_past_the_unicode_range_are_invalid() {
        for pattern in ["\\u{110000}", "\\u{FFFFFFFFFFFF}"] {
            let tokens = tokenize(pattern, Flags::default());
            assert_eq!(values(&tokens), [pattern]);
            assert!(desc(&tokens[0]).starts_with("Invalid unicode code point escape"), "{pattern}");
        }
        let tokens = tokenize("\\u{0010FFFF}", Flags::default());
        assert_eq!(desc(&tokens[0]), "Unicode code point escape U+0010FFFF");
    }

    #[test]
    fn incomplete_escapes_stop_at_end_of_pattern() {
        let tokens = tokenize("\\x", Flags::default());
        assert_eq!(values(&tokens), ["\\x"]);
        assert_eq!(desc(&tokens[0]), "Incomplete hexadecimal escape");

        let tokens = tokenize("\\u12", Flags::default());
        assert_eq!(values(&tokens), ["\\u12"]);
        assert_eq!(desc(&tokens[0]), "Incomplete unicode escape");

        let tokens = tokenize("\\u{12", Flags::default());
        assert_eq!(values(&tokens), ["\\u{12"]);

        let tokens = tokenize("ab\\", Flags::default());
        assert_eq!(values(&tokens), ["a", "b", "\\"]);
        assert_eq!(desc(&tokens[2]), "Incomplete escape sequence");
    }

    #[test]
    fn incomplete_escape_does_not_leave_its_group() {
        let tokens = tokenize("(\\x)", Flags::default());
        assert_eq!(tokens.len(), 1);
        assert_eq!(values(tokens[0].children()), ["\\x"]);
    }

    #[test]
    fn anchors_follow_multiline_flag() {
        let plain = tokenize("^abc$", Flags::default());
        assert_eq!(desc(&plain[0]), "Start of string");
        assert_eq!(desc(&plain[4]), "End of string");

        let flags = Flags {
            multiline: true,
            ..Flags::default()
        };
        let multi = tokenize("^abc$", flags);
        assert!(desc(&multi[0]).contains("line"));
        assert!(desc(&multi[4]).contains("line"));
    }

    #[test]
    fn wildcard_follows_dot_all_flag() {
        let flags = Flags {
            dot_all: true,
            ..Flags::default()
        };
        assert!(desc(&tokenize(".", flags)[0]).contains("including line terminators"));
        assert!(desc(&tokenize(".", Flags::default())[0]).contains("except"));
    }

    #[test]
    fn multibyte_literals_span_whole_chars() {
        let tokens = tokenize("é+", Flags::default());
        assert_eq!(values(&tokens), ["é", "+"]);
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
    }

    #[test]
    fn depth_guard_turns_deep_parens_into_literals() {
        let depth = MAX_GROUP_DEPTH + 5;
        let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let tokens = tokenize(&pattern, Flags::default());

        let mut level = 0;
        let mut current = &tokens;
        while let [only] = current.as_slice() {
            if !only.is(TokenKind::Group) {
                break;
            }
            level += 1;
            current = only.children.as_ref().unwrap();
        }
        assert_eq!(level, MAX_GROUP_DEPTH);
        assert!(current.iter().all(|t| t.is(TokenKind::Literal)));
    }

    #[test]
    fn repeat_parsing() {
        assert_eq!(Repeat::parse("3"), Some(Repeat::Exactly("3")));
        assert_eq!(Repeat::parse("3,"), Some(Repeat::AtLeast("3")));
        assert_eq!(Repeat::parse("3,5"), Some(Repeat::Between("3", "5")));
        assert_eq!(Repeat::parse(",5"), None);
        assert_eq!(Repeat::parse(""), None);
        assert_eq!(Repeat::from_token("{2,}?"), Some(Repeat::AtLeast("2")));
    }

    #[test]
    fn reversed_brace_bounds_are_called_out() {
        assert!(Repeat::Between("5", "2").out_of_order());
        assert!(Repeat::Between("10", "9").out_of_order());
        assert!(!Repeat::Between("2", "5").out_of_order());
        assert!(!Repeat::Between("007", "7").out_of_order());

        let tokens = tokenize("a{5,2}", Flags::default());
        assert_eq!(
            desc(&tokens[1]),
            "Between 5 and 2 (out of order: minimum exceeds maximum), greedy"
        );
    }

    #[test]
    fn count_comparison_handles_long_digit_runs() {
        assert!(count_exceeds("10001", 10_000));
        assert!(!count_exceeds("10000", 10_000));
        assert!(!count_exceeds("000000000000000000000005", 10_000));
        assert!(count_exceeds("99999999999999999999999999", 10_000));
    }
}
