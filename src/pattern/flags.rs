use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// ECMAScript regex flags. Only `m` and `s` influence tokenization, and only
/// through the descriptions attached to anchors and wildcards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Flags {
    #[serde(rename = "g")]
    pub global: bool,
    #[serde(rename = "i")]
    pub ignore_case: bool,
    #[serde(rename = "m")]
    pub multiline: bool,
    #[serde(rename = "s")]
    pub dot_all: bool,
    #[serde(rename = "u")]
    pub unicode: bool,
    #[serde(rename = "y")]
    pub sticky: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagsError {
    #[error("unknown regex flag '{0}' (expected any of g, i, m, s, u, y)")]
    Unknown(char),
    #[error("regex flag '{0}' given more than once")]
    Repeated(char),
}

impl Flags {
    fn slot(&mut self, flag: char) -> Option<&mut bool> {
        match flag {
            'g' => Some(&mut self.global),
            'i' => Some(&mut self.ignore_case),
            'm' => Some(&mut self.multiline),
            's' => Some(&mut self.dot_all),
            'u' => Some(&mut self.unicode),
            'y' => Some(&mut self.sticky),
            _ => None,
        }
    }
}

impl FromStr for Flags {
    type Err = FlagsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::default();
        for c in s.chars() {
            let slot = flags.slot(c).ok_or(FlagsError::Unknown(c))?;
            if *slot {
                return Err(FlagsError::Repeated(c));
            }
            *slot = true;
        }
        Ok(flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ];
        for (set, letter) in pairs {
            if set {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
