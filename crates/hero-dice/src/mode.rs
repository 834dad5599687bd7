//! Roll interpretations.
//!
//! A roll is read in exactly one way. The active [`RollMode`] is chosen by
//! the `make_*_roll` builder calls on [`HeroRoller`](crate::HeroRoller); the
//! last applied call wins.

use serde::{Deserialize, Serialize};

/// Whether a conditional builder call takes effect.
///
/// Lets callers forward a rules flag straight into the chain, e.g.
/// `.make_killing_roll(power.is_killing, power.uses_strength)`, without
/// branching. `Skip` leaves the previous mode and its extras untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Apply {
    /// Apply the call.
    #[default]
    Yes,
    /// Ignore the call.
    Skip,
}

impl Apply {
    /// Returns true if the call should take effect.
    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Apply {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::Skip }
    }
}

impl<T> From<Option<T>> for Apply {
    /// `None` skips, `Some(_)` applies.
    fn from(value: Option<T>) -> Self {
        value.is_some().into()
    }
}

/// The active interpretation of a roll, with its mode-specific extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RollMode {
    /// A plain dice total. The initial mode.
    #[default]
    Basic,
    /// A skill or attack roll compared against zero (`11 - 3d6`).
    Success {
        /// Summed die faces at or below which the roll succeeds outright.
        auto_success_threshold: Option<i32>,
    },
    /// Normal damage: STUN and BODY are counted from the same dice.
    Normal,
    /// Killing damage: BODY is rolled, STUN is BODY times a multiplier.
    Killing {
        /// The attack adds the character's STR damage.
        adds_strength: bool,
    },
    /// Adjustment powers (Aid, Drain, ...): active points adjusted.
    Adjustment,
    /// Entangle: BODY of the entangle, counted as normal damage.
    Entangle,
    /// Flash: segments of flash.
    Flash,
}

impl RollMode {
    /// The fieldless kind of this mode.
    pub fn kind(self) -> ModeKind {
        match self {
            Self::Basic => ModeKind::Basic,
            Self::Success { .. } => ModeKind::Success,
            Self::Normal => ModeKind::Normal,
            Self::Killing { .. } => ModeKind::Killing,
            Self::Adjustment => ModeKind::Adjustment,
            Self::Entangle => ModeKind::Entangle,
            Self::Flash => ModeKind::Flash,
        }
    }

    /// Returns true for the modes that resolve STUN and BODY damage, which
    /// are the only ones that honour standard effect and hit locations.
    pub fn is_damage(self) -> bool {
        matches!(self, Self::Normal | Self::Killing { .. })
    }
}

/// A roll interpretation without its extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// See [`RollMode::Basic`].
    Basic,
    /// See [`RollMode::Success`].
    Success,
    /// See [`RollMode::Normal`].
    Normal,
    /// See [`RollMode::Killing`].
    Killing,
    /// See [`RollMode::Adjustment`].
    Adjustment,
    /// See [`RollMode::Entangle`].
    Entangle,
    /// See [`RollMode::Flash`].
    Flash,
}

impl ModeKind {
    /// All kinds, in declaration order.
    pub fn all() -> &'static [ModeKind] {
        &[
            Self::Basic,
            Self::Success,
            Self::Normal,
            Self::Killing,
            Self::Adjustment,
            Self::Entangle,
            Self::Flash,
        ]
    }

    /// Parse a mode name such as "killing" or "KA".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "success" | "skill" => Some(Self::Success),
            "normal" => Some(Self::Normal),
            "killing" | "ka" => Some(Self::Killing),
            "adjustment" | "adjust" => Some(Self::Adjustment),
            "entangle" => Some(Self::Entangle),
            "flash" => Some(Self::Flash),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Success => write!(f, "success"),
            Self::Normal => write!(f, "normal"),
            Self::Killing => write!(f, "killing"),
            Self::Adjustment => write!(f, "adjustment"),
            Self::Entangle => write!(f, "entangle"),
            Self::Flash => write!(f, "flash"),
        }
    }
}
