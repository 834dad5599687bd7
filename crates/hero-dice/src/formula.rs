//! Formula rendering and parsing.
//!
//! A formula is the canonical text of a term sequence, one chunk per group:
//! `"11 - 3 + 2 - 3d6 + ½d6 + 9d6 + 1"`. Rendering only looks at the units
//! that are currently present, so it works before rolling, after rolling and
//! after any reduction.

use serde::{Deserialize, Serialize};

use crate::dice::{Sign, Term, TermGroup, TermKind};
use crate::error::{RollError, RollResult};

/// Render a unit sequence as formula text.
///
/// An empty sequence renders as the empty string. A leading subtracted group
/// renders with a bare `-` prefix.
pub fn render(terms: &[Term]) -> String {
    let mut out = String::new();
    for group in TermGroup::split(terms) {
        if out.is_empty() {
            if group.sign == Sign::Minus {
                out.push('-');
            }
        } else {
            out.push_str(group.sign.joiner());
        }
        out.push_str(&group.to_string());
    }
    out
}

/// One builder call described as data: the sign, kind and count of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSpec {
    /// Added or subtracted.
    pub sign: Sign,
    /// The kind of every unit in the group.
    pub kind: TermKind,
    /// Number of dice, or the magnitude of a flat group.
    pub count: u32,
}

impl TermSpec {
    /// Parse a single chunk such as `3d6`, `-2(½d6)`, `1d6-1` or `+7`.
    ///
    /// Accepts `1/2d6` as an ASCII spelling of `½d6`.
    pub fn parse(chunk: &str) -> RollResult<Self> {
        let trimmed = chunk.trim();
        let invalid = || RollError::InvalidTerm(chunk.to_string());

        let (sign, body) = if let Some(rest) = trimmed.strip_prefix('-') {
            (Sign::Minus, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (Sign::Plus, rest)
        } else {
            (Sign::Plus, trimmed)
        };
        let body = body.replace("1/2", "½");

        let (kind, count) = if let Ok(n) = body.parse::<u32>() {
            (TermKind::Flat, n)
        } else if body == "½d6" {
            (TermKind::HalfDie, 1)
        } else if body == "1d6-1" || body == "d6-1" {
            (TermKind::DieMinusOne, 1)
        } else if let Some(n) = body.strip_suffix("(½d6)") {
            (TermKind::HalfDie, n.parse().map_err(|_| invalid())?)
        } else if let Some(n) = body.strip_suffix("(d6-1)") {
            (TermKind::DieMinusOne, n.parse().map_err(|_| invalid())?)
        } else if let Some(n) = body.strip_suffix("d6") {
            let count = if n.is_empty() {
                1
            } else {
                n.parse().map_err(|_| invalid())?
            };
            (TermKind::Die, count)
        } else {
            return Err(invalid());
        };

        Ok(Self { sign, kind, count })
    }
}

impl std::fmt::Display for TermSpec {
    /// Render the spec as a formula chunk with an explicit sign.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self.sign {
            Sign::Plus => '+',
            Sign::Minus => '-',
        };
        match (self.kind, self.count) {
            (TermKind::Flat, n) => write!(f, "{sign}{n}"),
            (TermKind::Die, n) => write!(f, "{sign}{n}d6"),
            (TermKind::HalfDie, 1) => write!(f, "{sign}½d6"),
            (TermKind::HalfDie, n) => write!(f, "{sign}{n}(½d6)"),
            (TermKind::DieMinusOne, 1) => write!(f, "{sign}1d6-1"),
            (TermKind::DieMinusOne, n) => write!(f, "{sign}{n}(d6-1)"),
        }
    }
}

/// Parse a rendered formula back into the builder calls that produce it.
///
/// Chunks are separated by ` + ` and ` - ` joiners, exactly as [`render`]
/// writes them. The empty string parses to no calls.
pub fn parse(formula: &str) -> RollResult<Vec<TermSpec>> {
    let mut specs = Vec::new();
    let mut sign = Sign::Plus;
    let mut expect_chunk = true;

    for token in formula.split_whitespace() {
        match (expect_chunk, token) {
            (false, "+") => {
                sign = Sign::Plus;
                expect_chunk = true;
            }
            (false, "-") => {
                sign = Sign::Minus;
                expect_chunk = true;
            }
            (true, chunk) => {
                let mut spec = TermSpec::parse(chunk)?;
                if sign == Sign::Minus {
                    spec.sign = match spec.sign {
                        Sign::Plus => Sign::Minus,
                        Sign::Minus => Sign::Plus,
                    };
                }
                specs.push(spec);
                sign = Sign::Plus;
                expect_chunk = false;
            }
            (false, other) => return Err(RollError::InvalidTerm(other.to_string())),
        }
    }

    if expect_chunk && !specs.is_empty() {
        return Err(RollError::InvalidTerm(formula.to_string()));
    }
    Ok(specs)
}
