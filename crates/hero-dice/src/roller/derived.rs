//! Mode-gated derived values.
//!
//! Each accessor is valid only for the modes that define it. Asking for
//! anything else, or asking before the roll executed, is an error rather
//! than a silent zero.

use crate::dice::{Term, TermKind, signed_total};
use crate::error::{RollError, RollResult};
use crate::location::HitLocation;
use crate::mode::RollMode;

use super::HeroRoller;

/// BODY of one unit of normal damage, from its resolved value.
pub fn normal_body(kind: TermKind, value: u32) -> u32 {
    match kind {
        TermKind::Flat => 0,
        TermKind::HalfDie => u32::from(value > 1),
        TermKind::Die | TermKind::DieMinusOne => match value {
            0 | 1 => 0,
            6 => 2,
            _ => 1,
        },
    }
}

/// Segments of flash from one unit: the die value minus 4, never negative.
pub fn flash_segments(kind: TermKind, value: u32) -> u32 {
    match kind {
        TermKind::Flat => 0,
        _ => value.saturating_sub(4),
    }
}

impl HeroRoller {
    pub(super) fn require_rolled(&self) -> RollResult<()> {
        if self.rolled {
            Ok(())
        } else {
            Err(RollError::NotRolled)
        }
    }

    fn wrong_mode(&self, value: &'static str) -> RollError {
        RollError::WrongMode {
            value,
            active: self.mode.kind(),
        }
    }

    /// Rolled units with their resolved values.
    fn resolved(&self) -> impl Iterator<Item = (&Term, u32)> {
        self.terms
            .iter()
            .map(|term| (term, term.value().unwrap_or_default()))
    }

    fn signed_map(&self, per_unit: impl Fn(TermKind, u32) -> u32) -> Vec<i32> {
        self.resolved()
            .map(|(term, value)| term.sign.apply(per_unit(term.kind, value)))
            .collect()
    }

    // --- Basic ---

    /// Signed resolved value of every unit. Valid in every mode.
    pub fn basic_terms(&self) -> RollResult<Vec<i32>> {
        self.require_rolled()?;
        Ok(self.signed_map(|_, value| value))
    }

    /// Sum of [`basic_terms`](Self::basic_terms).
    pub fn basic_total(&self) -> RollResult<i32> {
        Ok(signed_total(&self.basic_terms()?))
    }

    // --- Success ---

    /// Signed values of a success roll, e.g. `[11, -4, -2, -5]` for `11 - 3d6`.
    pub fn success_terms(&self) -> RollResult<Vec<i32>> {
        self.require_rolled()?;
        match self.mode {
            RollMode::Success { .. } => Ok(self.signed_map(|_, value| value)),
            _ => Err(self.wrong_mode("success")),
        }
    }

    /// The success margin. Zero or more succeeds.
    pub fn success_total(&self) -> RollResult<i32> {
        Ok(signed_total(&self.success_terms()?))
    }

    /// `Some(true)` when the whole dice rolled at or below the auto-success
    /// threshold, `Some(false)` when every whole die rolled a 6, `None`
    /// otherwise or when no whole dice were rolled.
    pub fn auto_success(&self) -> RollResult<Option<bool>> {
        self.require_rolled()?;
        let RollMode::Success {
            auto_success_threshold,
        } = self.mode
        else {
            return Err(self.wrong_mode("auto success"));
        };

        let faces: Vec<u32> = self
            .terms
            .iter()
            .filter(|t| t.kind == TermKind::Die)
            .filter_map(|t| t.face)
            .collect();
        if faces.is_empty() {
            return Ok(None);
        }

        let sum = faces.iter().fold(0u32, |sum, &face| sum.saturating_add(face));
        let sum = i32::try_from(sum).unwrap_or(i32::MAX);
        let dice = i32::try_from(faces.len()).unwrap_or(i32::MAX);
        if sum <= auto_success_threshold.unwrap_or(dice) {
            Ok(Some(true))
        } else if faces.iter().all(|&face| face == 6) {
            Ok(Some(false))
        } else {
            Ok(None)
        }
    }

    /// Whether the success roll succeeded: the automatic result if any,
    /// else a non-negative margin.
    pub fn is_success(&self) -> RollResult<bool> {
        match self.auto_success()? {
            Some(auto) => Ok(auto),
            None => Ok(self.success_total()? >= 0),
        }
    }

    // --- Normal / Killing damage ---

    /// STUN per unit. Normal: the resolved values. Killing: each BODY term
    /// times the STUN multiplier.
    pub fn stun_terms(&self) -> RollResult<Vec<i32>> {
        self.require_rolled()?;
        match self.mode {
            RollMode::Normal => Ok(self.signed_map(|_, value| value)),
            RollMode::Killing { .. } => {
                let multiplier = self.stun_multiplier()?;
                Ok(self
                    .body_terms()?
                    .into_iter()
                    .map(|body| body.saturating_mul(multiplier))
                    .collect())
            }
            _ => Err(self.wrong_mode("STUN")),
        }
    }

    /// Sum of [`stun_terms`](Self::stun_terms).
    pub fn stun_total(&self) -> RollResult<i32> {
        Ok(signed_total(&self.stun_terms()?))
    }

    /// BODY per unit. Normal: counted from each die (1 → 0, 6 → 2, else 1;
    /// half dice 0 or 1; pips 0). Killing: the resolved values.
    pub fn body_terms(&self) -> RollResult<Vec<i32>> {
        self.require_rolled()?;
        match self.mode {
            RollMode::Normal => Ok(self.signed_map(normal_body)),
            RollMode::Killing { .. } => Ok(self.signed_map(|_, value| value)),
            _ => Err(self.wrong_mode("BODY")),
        }
    }

    /// Sum of [`body_terms`](Self::body_terms).
    pub fn body_total(&self) -> RollResult<i32> {
        Ok(signed_total(&self.body_terms()?))
    }

    /// The killing STUN multiplier: half the dedicated d6 rounded up, plus
    /// every [`add_stun_multiplier`](Self::add_stun_multiplier) delta,
    /// never below 1.
    pub fn stun_multiplier(&self) -> RollResult<i32> {
        self.require_rolled()?;
        match (self.mode, self.stun_multiplier_face) {
            (RollMode::Killing { .. }, Some(face)) => {
                let base = i32::try_from(face.div_ceil(2)).unwrap_or(i32::MAX);
                Ok(base.saturating_add(self.stun_multiplier_delta).max(1))
            }
            _ => Err(self.wrong_mode("STUN multiplier")),
        }
    }

    /// The hit location, when one was requested on a Normal or Killing roll.
    pub fn hit_location(&self) -> RollResult<&HitLocation> {
        self.require_rolled()?;
        if !self.mode.is_damage() {
            return Err(self.wrong_mode("hit location"));
        }
        self.hit_location
            .as_ref()
            .ok_or(RollError::HitLocationNotRequested)
    }

    // --- Adjustment / Entangle / Flash ---

    /// Active points adjusted, per unit.
    pub fn adjustment_terms(&self) -> RollResult<Vec<i32>> {
        self.require_rolled()?;
        match self.mode {
            RollMode::Adjustment => Ok(self.signed_map(|_, value| value)),
            _ => Err(self.wrong_mode("adjustment")),
        }
    }

    /// Sum of [`adjustment_terms`](Self::adjustment_terms).
    pub fn adjustment_total(&self) -> RollResult<i32> {
        Ok(signed_total(&self.adjustment_terms()?))
    }

    /// Entangle BODY per unit, counted like normal damage BODY.
    pub fn entangle_terms(&self) -> RollResult<Vec<i32>> {
        self.require_rolled()?;
        match self.mode {
            RollMode::Entangle => Ok(self.signed_map(normal_body)),
            _ => Err(self.wrong_mode("entangle")),
        }
    }

    /// Sum of [`entangle_terms`](Self::entangle_terms).
    pub fn entangle_total(&self) -> RollResult<i32> {
        Ok(signed_total(&self.entangle_terms()?))
    }

    /// Flash segments per unit.
    pub fn flash_terms(&self) -> RollResult<Vec<i32>> {
        self.require_rolled()?;
        match self.mode {
            RollMode::Flash => Ok(self.signed_map(flash_segments)),
            _ => Err(self.wrong_mode("flash")),
        }
    }

    /// Sum of [`flash_terms`](Self::flash_terms).
    pub fn flash_total(&self) -> RollResult<i32> {
        Ok(signed_total(&self.flash_terms()?))
    }
}
