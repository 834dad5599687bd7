//! HERO System dice formula and damage roll engine.
//!
//! Builds a dice formula from typed terms (dice, half dice, d6-1, flat
//! numbers), rolls it against a pluggable [`DieSource`], and reads the
//! result as one of seven interpretations: basic, success, normal damage,
//! killing damage, adjustment, entangle or flash. Rolled formulas can be
//! reduced afterwards to model explosions, damage negation and damage
//! reduction.

pub mod config;
pub mod dice;
pub mod error;
pub mod formula;
pub mod location;
pub mod mode;
pub mod roller;
pub mod summary;

pub use config::RollerConfig;
pub use dice::{
    CyclicSource, DieSource, FixedSource, RngSource, ScriptedSource, Sign, Term, TermGroup,
    TermKind,
};
pub use error::{RollError, RollResult};
pub use formula::TermSpec;
pub use location::{HitLocation, Location, Side};
pub use mode::{Apply, ModeKind, RollMode};
pub use roller::HeroRoller;
pub use roller::reduce::DcScale;
pub use summary::{Pool, RollSummary, SuccessSummary};
