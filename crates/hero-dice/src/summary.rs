//! A serializable snapshot of a rolled formula.
//!
//! Chat cards and logs want one value object instead of a dozen accessor
//! calls. [`RollSummary`] carries the formula plus every derived value that
//! is valid for the active mode; the rest are left out.

use serde::Serialize;

use crate::dice::signed_total;
use crate::error::RollResult;
use crate::location::HitLocation;
use crate::mode::{ModeKind, RollMode};
use crate::roller::HeroRoller;

/// Per-unit terms and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
    /// Signed value per unit, in formula order.
    pub terms: Vec<i32>,
    /// Sum of `terms`.
    pub total: i32,
}

impl Pool {
    fn new(terms: Vec<i32>) -> Self {
        let total = signed_total(&terms);
        Self { terms, total }
    }
}

/// Result of a success roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessSummary {
    /// The success margin.
    pub total: i32,
    /// Automatic success (`true`) or failure (`false`), if any.
    pub auto_success: Option<bool>,
    /// Whether the roll succeeded.
    pub is_success: bool,
}

/// Everything a consumer needs to display a rolled formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollSummary {
    /// The canonical formula of the remaining units.
    pub formula: String,
    /// The active interpretation.
    pub mode: ModeKind,
    /// Signed sum of every unit.
    pub basic_total: i32,
    /// Standard effect was applied.
    pub standard_effect: bool,
    /// Success roll result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<SuccessSummary>,
    /// STUN damage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stun: Option<Pool>,
    /// BODY damage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Pool>,
    /// Killing STUN multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stun_multiplier: Option<i32>,
    /// Killing attack adds STR damage.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub adds_strength: bool,
    /// Active points adjusted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Pool>,
    /// Entangle BODY.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entangle: Option<Pool>,
    /// Flash segments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Pool>,
    /// Hit location, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_location: Option<HitLocation>,
}

impl HeroRoller {
    /// Snapshot the rolled formula and the derived values of its mode.
    pub fn summary(&self) -> RollResult<RollSummary> {
        let mut summary = RollSummary {
            formula: self.formula(),
            mode: self.mode().kind(),
            basic_total: self.basic_total()?,
            standard_effect: self.is_standard_effect(),
            success: None,
            stun: None,
            body: None,
            stun_multiplier: None,
            adds_strength: self.adds_strength(),
            adjustment: None,
            entangle: None,
            flash: None,
            hit_location: None,
        };

        match self.mode() {
            RollMode::Basic => {}
            RollMode::Success { .. } => {
                summary.success = Some(SuccessSummary {
                    total: self.success_total()?,
                    auto_success: self.auto_success()?,
                    is_success: self.is_success()?,
                });
            }
            RollMode::Normal | RollMode::Killing { .. } => {
                summary.stun = Some(Pool::new(self.stun_terms()?));
                summary.body = Some(Pool::new(self.body_terms()?));
                if let RollMode::Killing { .. } = self.mode() {
                    summary.stun_multiplier = Some(self.stun_multiplier()?);
                }
                summary.hit_location = self.hit_location().ok().cloned();
            }
            RollMode::Adjustment => {
                summary.adjustment = Some(Pool::new(self.adjustment_terms()?));
            }
            RollMode::Entangle => {
                summary.entangle = Some(Pool::new(self.entangle_terms()?));
            }
            RollMode::Flash => {
                summary.flash = Some(Pool::new(self.flash_terms()?));
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::FixedSource;
    use crate::error::RollError;
    use crate::mode::Apply;

    #[test]
    fn summary_requires_roll() {
        let roller = HeroRoller::new().add_dice(1);
        assert_eq!(roller.summary(), Err(RollError::NotRolled));
    }

    #[test]
    fn killing_summary() {
        let mut roller = HeroRoller::new()
            .make_killing_roll(Apply::Yes, true)
            .add_dice(3);
        roller.roll(&mut FixedSource(6)).unwrap();
        let summary = roller.summary().unwrap();
        assert_eq!(summary.formula, "3d6");
        assert_eq!(summary.mode, ModeKind::Killing);
        assert_eq!(summary.body.as_ref().map(|p| p.total), Some(18));
        assert_eq!(summary.stun.as_ref().map(|p| p.total), Some(54));
        assert_eq!(summary.stun_multiplier, Some(3));
        assert!(summary.adds_strength);
        assert!(summary.flash.is_none());
        assert!(summary.hit_location.is_none());
    }

    #[test]
    fn summary_json_omits_other_modes() {
        let mut roller = HeroRoller::new()
            .make_flash_roll(Apply::Yes)
            .add_dice(2);
        roller.roll(&mut FixedSource(6)).unwrap();
        let summary = roller.summary().unwrap();
        insta::assert_json_snapshot!(summary, @r#"
        {
          "formula": "2d6",
          "mode": "flash",
          "basic_total": 12,
          "standard_effect": false,
          "flash": {
            "terms": [
              2,
              2
            ],
            "total": 4
          }
        }
        "#);
    }
}
