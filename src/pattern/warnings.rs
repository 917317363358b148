use std::collections::HashSet;

use serde::Serialize;

use crate::pattern::ast::{GroupKind, PatternToken, TokenKind, visit};
use crate::pattern::flags::Flags;
use crate::pattern::parser::{Repeat, count_exceeds, tokenize};

/// Brace quantifier bounds above this are reported as slow.
pub const LARGE_REPEAT_LIMIT: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub tokens: Vec<PatternToken>,
    pub warnings: Vec<String>,
}

pub fn analyze_warnings(pattern: &str, flags: Flags) -> Analysis {
    let tokens = tokenize(pattern, flags);
    let warnings = collect_warnings(&tokens);
    Analysis { tokens, warnings }
}

type Check = fn(&[PatternToken]) -> Option<String>;

// Each check reports at most once; this order is the order of the output.
const CHECKS: &[Check] = &[
    nested_quantifiers,
    quantified_alternation,
    oversized_repeat,
    invalid_backreference,
    undefined_named_backreference,
    zero_width_quantifier,
    duplicate_group_names,
];

pub fn collect_warnings(tokens: &[PatternToken]) -> Vec<String> {
    CHECKS.iter().filter_map(|check| check(tokens)).collect()
}

/// Every (token, quantifier) sibling pair, top level first, then group
/// interiors in pre-order.
fn quantified_pairs(tokens: &[PatternToken]) -> Vec<(&PatternToken, &PatternToken)> {
    let mut scopes = vec![tokens];
    visit(tokens, &mut |token, _| {
        if token.is(TokenKind::Group) {
            scopes.push(token.children());
        }
    });

    scopes
        .into_iter()
        .flat_map(|scope| scope.windows(2))
        .filter(|pair| pair[1].is(TokenKind::Quantifier))
        .map(|pair| (&pair[0], &pair[1]))
        .collect()
}

/// False for quantifiers that allow at most one occurrence (`?`, `{0,1}`, `{1}`).
fn is_repeating(quantifier: &PatternToken) -> bool {
    let value = quantifier.value.as_str();
    if value.starts_with('*') || value.starts_with('+') {
        return true;
    }
    match Repeat::from_token(value) {
        Some(Repeat::AtLeast(_)) => true,
        Some(Repeat::Exactly(max)) | Some(Repeat::Between(_, max)) => count_exceeds(max, 1),
        None => false,
    }
}

fn ends_quantified(group: &PatternToken) -> bool {
    group
        .children()
        .split(|t| t.is(TokenKind::Alternation))
        .any(|branch| match branch.last() {
            Some(last) if last.is(TokenKind::Quantifier) => true,
            Some(last) if last.is(TokenKind::Group) => ends_quantified(last),
            _ => false,
        })
}

/// A `|` anywhere in the group, looking through nested groups but not into
/// lookarounds, which never consume the text they test.
fn contains_alternation(group: &PatternToken) -> bool {
    group.children().iter().any(|child| match child.kind {
        TokenKind::Alternation => true,
        TokenKind::Group => {
            !child.group_kind().is_some_and(|kind| kind.is_lookaround())
                && contains_alternation(child)
        }
        _ => false,
    })
}

fn nested_quantifiers(tokens: &[PatternToken]) -> Option<String> {
    quantified_pairs(tokens)
        .into_iter()
        .find(|(target, quantifier)| {
            target.is(TokenKind::Group) && is_repeating(quantifier) && ends_quantified(target)
        })
        .map(|(group, quantifier)| {
            format!(
                "Nested quantifiers in {}{} may be slow: they can cause catastrophic backtracking",
                group.value, quantifier.value
            )
        })
}

fn quantified_alternation(tokens: &[PatternToken]) -> Option<String> {
    quantified_pairs(tokens)
        .into_iter()
        .find(|(target, quantifier)| {
            target.is(TokenKind::Group)
                && is_repeating(quantifier)
                && contains_alternation(target)
        })
        .map(|(group, quantifier)| {
            format!(
                "Quantified alternation {}{} may be slow: every repetition retries each branch",
                group.value, quantifier.value
            )
        })
}

fn oversized_repeat(tokens: &[PatternToken]) -> Option<String> {
    let mut found = None;
    visit(tokens, &mut |token, _| {
        if found.is_some() || !token.is(TokenKind::Quantifier) {
            return;
        }
        let oversized = Repeat::from_token(&token.value)
            .is_some_and(|repeat| repeat.bounds().any(|n| count_exceeds(n, LARGE_REPEAT_LIMIT)));
        if oversized {
            found = Some(format!(
                "Quantifier {} exceeds {LARGE_REPEAT_LIMIT} repetitions and may be slow",
                token.value
            ));
        }
    });
    found
}

fn group_kinds(tokens: &[PatternToken]) -> Vec<GroupKind> {
    let mut kinds = Vec::new();
    visit(tokens, &mut |token, _| kinds.extend(token.group_kind()));
    kinds
}

fn escapes(tokens: &[PatternToken]) -> Vec<&PatternToken> {
    let mut found = Vec::new();
    visit(tokens, &mut |token, _| {
        if token.is(TokenKind::Escape) {
            found.push(token);
        }
    });
    found
}

fn invalid_backreference(tokens: &[PatternToken]) -> Option<String> {
    let captures = group_kinds(tokens)
        .iter()
        .filter(|kind| kind.is_capturing())
        .count();

    escapes(tokens).into_iter().find_map(|token| {
        let digits = token.value.strip_prefix('\\')?;
        let numbered = digits.starts_with(|c: char| ('1'..='9').contains(&c))
            && digits.bytes().all(|b| b.is_ascii_digit());
        (numbered && count_exceeds(digits, captures as u64)).then(|| {
            format!(
                "Backreference {} refers to group {digits}, but the pattern only has {captures} capture group(s)",
                token.value
            )
        })
    })
}

fn named_reference(token: &PatternToken) -> Option<&str> {
    token.value.strip_prefix("\\k<")?.strip_suffix('>')
}

fn undefined_named_backreference(tokens: &[PatternToken]) -> Option<String> {
    let names: HashSet<String> = group_kinds(tokens)
        .into_iter()
        .filter_map(|kind| match kind {
            GroupKind::Named(name) => Some(name),
            _ => None,
        })
        .collect();

    escapes(tokens).into_iter().find_map(|token| {
        let name = named_reference(token)?;
        (!names.contains(name)).then(|| {
            format!(
                "Backreference {} refers to a group named '{name}' that does not exist",
                token.value
            )
        })
    })
}

fn is_zero_width(token: &PatternToken) -> bool {
    match token.kind {
        TokenKind::Anchor => true,
        TokenKind::Escape => matches!(token.value.as_str(), "\\b" | "\\B"),
        TokenKind::Group => token.group_kind().is_some_and(|kind| kind.is_lookaround()),
        _ => false,
    }
}

fn zero_width_quantifier(tokens: &[PatternToken]) -> Option<String> {
    quantified_pairs(tokens)
        .into_iter()
        .find(|(target, _)| is_zero_width(target))
        .map(|(target, quantifier)| {
            format!(
                "Quantifier {} on a zero-width position ({}) has no useful effect",
                quantifier.value, target.value
            )
        })
}

fn duplicate_group_names(tokens: &[PatternToken]) -> Option<String> {
    let mut seen = HashSet::new();
    group_kinds(tokens).into_iter().find_map(|kind| match kind {
        GroupKind::Named(name) if !seen.insert(name.clone()) => Some(format!(
            "Two groups named '{name}': duplicate names are only allowed in separate alternatives"
        )),
        _ => None,
    })
}
