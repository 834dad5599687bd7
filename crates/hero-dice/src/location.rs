//! Hit location table.
//!
//! A 3d6 location roll picks a body part. Paired parts also roll a d6 for
//! the side (1-3 left, 4-6 right). Each part carries the STUN and BODY
//! multipliers the consumer applies after the damage roll.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dice::DieSource;
use crate::error::{RollError, RollResult};

/// A body part on the hit location table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// 3-5.
    Head,
    /// 6.
    Hands,
    /// 7-8.
    Arms,
    /// 9.
    Shoulders,
    /// 10-11.
    Chest,
    /// 12.
    Stomach,
    /// 13.
    Vitals,
    /// 14.
    Thighs,
    /// 15-16.
    Legs,
    /// 17-18.
    Feet,
}

/// Multipliers for one row of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Row {
    low: u32,
    high: u32,
    killing_stun: f64,
    normal_stun: f64,
    body: f64,
    paired: bool,
}

impl Row {
    const fn new(
        (low, high): (u32, u32),
        killing_stun: f64,
        normal_stun: f64,
        body: f64,
        paired: bool,
    ) -> Self {
        Self { low, high, killing_stun, normal_stun, body, paired }
    }
}

const ALL: [Location; 10] = [
    Location::Head,
    Location::Hands,
    Location::Arms,
    Location::Shoulders,
    Location::Chest,
    Location::Stomach,
    Location::Vitals,
    Location::Thighs,
    Location::Legs,
    Location::Feet,
];

impl Location {
    /// All locations, head to feet.
    pub fn all() -> impl Iterator<Item = Location> {
        ALL.into_iter()
    }

    /// The location for a 3d6 total, or `None` outside 3-18.
    pub fn from_roll(roll: u32) -> Option<Self> {
        ALL.into_iter().find(|location| {
            let (low, high) = location.roll_range();
            (low..=high).contains(&roll)
        })
    }

    /// The location for a rolled total. A total outside 3-18 breaks the d6
    /// contract of the source; it is logged and lands on the nearer end.
    fn for_total(total: u32) -> Self {
        match Self::from_roll(total) {
            Some(location) => location,
            None => {
                warn!(total, "location roll outside 3-18");
                if total < 3 { Self::Head } else { Self::Feet }
            }
        }
    }

    /// Parse a location name, case-insensitively. Singular forms are
    /// accepted ("arm", "hand").
    pub fn parse(s: &str) -> RollResult<Self> {
        let name = s.trim().to_lowercase();
        let location = match name.as_str() {
            "head" => Self::Head,
            "hands" | "hand" => Self::Hands,
            "arms" | "arm" => Self::Arms,
            "shoulders" | "shoulder" => Self::Shoulders,
            "chest" => Self::Chest,
            "stomach" => Self::Stomach,
            "vitals" => Self::Vitals,
            "thighs" | "thigh" => Self::Thighs,
            "legs" | "leg" => Self::Legs,
            "feet" | "foot" => Self::Feet,
            _ => return Err(RollError::UnknownLocation(s.to_string())),
        };
        Ok(location)
    }

    /// Parse a forced location, where `"none"` (or blank) means "not forced".
    pub fn parse_forced(s: &str) -> RollResult<Option<Self>> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        Self::parse(trimmed).map(Some)
    }

    /// The 3d6 range that lands on this location.
    pub fn roll_range(self) -> (u32, u32) {
        let row = self.row();
        (row.low, row.high)
    }

    /// True for the parts that come in left/right pairs.
    pub fn is_paired(self) -> bool {
        self.row().paired
    }

    /// STUN multiplier against killing attacks.
    pub fn killing_stun_multiplier(self) -> f64 {
        self.row().killing_stun
    }

    /// STUN multiplier against normal attacks.
    pub fn normal_stun_multiplier(self) -> f64 {
        self.row().normal_stun
    }

    /// BODY multiplier.
    pub fn body_multiplier(self) -> f64 {
        self.row().body
    }

    #[rustfmt::skip]
    fn row(self) -> Row {
        match self {
            Self::Head => Row::new((3, 5), 5.0, 2.0, 2.0, false),
            Self::Hands => Row::new((6, 6), 1.0, 0.5, 0.5, true),
            Self::Arms => Row::new((7, 8), 2.0, 0.5, 0.5, true),
            Self::Shoulders => Row::new((9, 9), 3.0, 1.0, 1.0, true),
            Self::Chest => Row::new((10, 11), 3.0, 1.0, 1.0, false),
            Self::Stomach => Row::new((12, 12), 4.0, 1.5, 1.0, false),
            Self::Vitals => Row::new((13, 13), 4.0, 1.5, 2.0, false),
            Self::Thighs => Row::new((14, 14), 2.0, 1.0, 1.0, true),
            Self::Legs => Row::new((15, 16), 2.0, 0.5, 0.5, true),
            Self::Feet => Row::new((17, 18), 1.0, 0.5, 0.5, true),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Head => "Head",
            Self::Hands => "Hands",
            Self::Arms => "Arms",
            Self::Shoulders => "Shoulders",
            Self::Chest => "Chest",
            Self::Stomach => "Stomach",
            Self::Vitals => "Vitals",
            Self::Thighs => "Thighs",
            Self::Legs => "Legs",
            Self::Feet => "Feet",
        };
        write!(f, "{name}")
    }
}

/// Left or right, for paired locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Side roll 1-3.
    Left,
    /// Side roll 4-6.
    Right,
}

impl Side {
    /// The side for a d6 face.
    pub fn from_roll(face: u32) -> Self {
        if face <= 3 { Self::Left } else { Self::Right }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// The resolved hit location of a damage roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitLocation {
    /// The body part.
    pub name: Location,
    /// The side, for paired parts.
    pub side: Option<Side>,
    /// Display name, e.g. "Left Arms" or "Head".
    pub full_name: String,
    /// STUN multiplier for the attack's damage type.
    pub stun_multiplier: f64,
    /// BODY multiplier.
    pub body_multiplier: f64,
    /// The 3d6 location roll, or `None` if the location was forced.
    pub roll: Option<u32>,
}

impl HitLocation {
    /// Roll a location with `source`, or use `forced` when given.
    ///
    /// The side of a paired location is always rolled.
    pub fn resolve<S: DieSource + ?Sized>(
        source: &mut S,
        forced: Option<Location>,
        killing: bool,
    ) -> Self {
        let (name, roll) = match forced {
            Some(location) => (location, None),
            None => {
                let total = source
                    .roll_d6s(3)
                    .into_iter()
                    .fold(0u32, u32::saturating_add);
                (Location::for_total(total), Some(total))
            }
        };

        let side = name.is_paired().then(|| Side::from_roll(source.roll_d6()));
        let full_name = match side {
            Some(side) => format!("{side} {name}"),
            None => name.to_string(),
        };
        let stun_multiplier = if killing {
            name.killing_stun_multiplier()
        } else {
            name.normal_stun_multiplier()
        };

        Self {
            name,
            side,
            full_name,
            stun_multiplier,
            body_multiplier: name.body_multiplier(),
            roll,
        }
    }
}
