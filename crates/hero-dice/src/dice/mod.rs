//! Dice terms and the sources that roll them.
//!
//! Every HERO System damage formula is built from four kinds of unit: whole
//! six-sided dice, half dice, "1d6-1" dice and flat pips. Each unit carries
//! the sign of the builder call that created it.

pub mod source;
pub mod term;

pub use source::{CyclicSource, DieSource, FixedSource, RngSource, ScriptedSource};
pub use term::{Term, TermGroup};

use serde::{Deserialize, Serialize};

/// The category of a term unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    /// A literal number. Never rolled.
    Flat,
    /// A full six-sided die.
    Die,
    /// Half a die: a d6 halved, rounding up (1-3).
    HalfDie,
    /// A d6 minus one (0-5).
    DieMinusOne,
}

impl TermKind {
    /// Returns true for every kind that asks a [`DieSource`] for a face.
    pub fn is_rolled(self) -> bool {
        !matches!(self, Self::Flat)
    }

    /// The numeric value a unit of this kind resolves to for a raw face.
    ///
    /// For [`TermKind::Flat`] the "face" is the literal magnitude.
    pub fn resolve(self, face: u32) -> u32 {
        match self {
            Self::Flat | Self::Die => face,
            Self::HalfDie => face.div_ceil(2),
            Self::DieMinusOne => face.saturating_sub(1),
        }
    }
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Die => write!(f, "d6"),
            Self::HalfDie => write!(f, "½d6"),
            Self::DieMinusOne => write!(f, "d6-1"),
        }
    }
}

/// Whether a unit adds to or subtracts from the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    /// Added (`add*` builder calls).
    #[default]
    Plus,
    /// Subtracted (`sub*` builder calls).
    Minus,
}

impl Sign {
    /// Apply this sign to an unsigned value. Magnitudes past `i32::MAX`
    /// saturate.
    pub fn apply(self, value: u32) -> i32 {
        let value = i32::try_from(value).unwrap_or(i32::MAX);
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }

    /// The joiner placed in front of a chunk with this sign.
    pub fn joiner(self) -> &'static str {
        match self {
            Self::Plus => " + ",
            Self::Minus => " - ",
        }
    }
}

/// Sum signed unit values, saturating at the `i32` bounds.
pub fn signed_total(values: &[i32]) -> i32 {
    values.iter().fold(0, |total, &v| total.saturating_add(v))
}
