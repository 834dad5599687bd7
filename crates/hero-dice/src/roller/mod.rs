//! The roll engine.
//!
//! A [`HeroRoller`] is built with a fluent chain, rolled exactly once against
//! a [`DieSource`], and then read through mode-gated accessors
//! ([`derived`]) or rewritten by the damage-modifying reductions
//! ([`reduce`]).
//!
//! ```
//! use hero_dice::{Apply, FixedSource, HeroRoller};
//!
//! let mut roller = HeroRoller::new()
//!     .make_killing_roll(Apply::Yes, false)
//!     .add_dice(3);
//! roller.roll(&mut FixedSource(6)).unwrap();
//!
//! assert_eq!(roller.body_total().unwrap(), 18);
//! assert_eq!(roller.stun_multiplier().unwrap(), 3);
//! assert_eq!(roller.stun_total().unwrap(), 54);
//! ```

pub mod derived;
pub mod reduce;

use tracing::{debug, warn};

use crate::config::RollerConfig;
use crate::dice::{DieSource, Sign, Term, TermGroup, TermKind};
use crate::error::{RollError, RollResult};
use crate::formula::{self, TermSpec};
use crate::location::{HitLocation, Location};
use crate::mode::{Apply, RollMode};

/// Builds, rolls and interprets one HERO System dice formula.
///
/// An instance covers a single roll request: build it, call
/// [`roll`](Self::roll) once, read what you need, drop it.
#[derive(Debug, Clone, Default)]
pub struct HeroRoller {
    config: RollerConfig,
    mode: RollMode,
    terms: Vec<Term>,
    next_group: usize,
    standard_effect: bool,
    hit_location_requested: bool,
    forced_location: Option<Location>,
    stun_multiplier_delta: i32,
    stun_multiplier_face: Option<u32>,
    hit_location: Option<HitLocation>,
    rolled: bool,
}

impl HeroRoller {
    /// An empty Basic roll with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty Basic roll with an explicit configuration.
    pub fn with_config(config: RollerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // --- Mode selection ---

    fn set_mode(mut self, apply: Apply, mode: RollMode) -> Self {
        if apply.is_yes() && self.building("make_roll") {
            self.mode = mode;
        }
        self
    }

    /// Read the roll as a plain total.
    pub fn make_basic_roll(self, apply: impl Into<Apply>) -> Self {
        self.set_mode(apply.into(), RollMode::Basic)
    }

    /// Read the roll as a success roll. `auto_success_threshold` is the
    /// summed die faces at or below which the roll succeeds regardless of
    /// the total; `None` means "every die shows 1".
    pub fn make_success_roll(
        self,
        apply: impl Into<Apply>,
        auto_success_threshold: Option<i32>,
    ) -> Self {
        self.set_mode(
            apply.into(),
            RollMode::Success {
                auto_success_threshold,
            },
        )
    }

    /// Read the roll as normal damage.
    pub fn make_normal_roll(self, apply: impl Into<Apply>) -> Self {
        self.set_mode(apply.into(), RollMode::Normal)
    }

    /// Read the roll as killing damage.
    pub fn make_killing_roll(self, apply: impl Into<Apply>, adds_strength: bool) -> Self {
        self.set_mode(apply.into(), RollMode::Killing { adds_strength })
    }

    /// Read the roll as an adjustment power.
    pub fn make_adjustment_roll(self, apply: impl Into<Apply>) -> Self {
        self.set_mode(apply.into(), RollMode::Adjustment)
    }

    /// Read the roll as an entangle.
    pub fn make_entangle_roll(self, apply: impl Into<Apply>) -> Self {
        self.set_mode(apply.into(), RollMode::Entangle)
    }

    /// Read the roll as a flash.
    pub fn make_flash_roll(self, apply: impl Into<Apply>) -> Self {
        self.set_mode(apply.into(), RollMode::Flash)
    }

    // --- Terms ---

    /// Append one group described by `spec`.
    ///
    /// A flat group of magnitude 0 and a dice group of size 0 add nothing.
    pub fn add_term(mut self, spec: TermSpec) -> Self {
        if !self.building("add_term") {
            return self;
        }
        let group = self.next_group;
        self.next_group += 1;

        match spec.kind {
            TermKind::Flat if spec.count > 0 => {
                self.terms.push(Term::flat(spec.sign, group, spec.count));
            }
            TermKind::Flat => {}
            kind => {
                self.terms.extend(
                    (0..spec.count).map(|_| Term::unrolled(kind, spec.sign, group)),
                );
            }
        }
        self
    }

    /// Append every group of a rendered formula, e.g. `"11 - 3d6"`.
    pub fn add_formula(self, formula: &str) -> RollResult<Self> {
        let specs = formula::parse(formula)?;
        Ok(specs.into_iter().fold(self, Self::add_term))
    }

    fn push(self, sign: Sign, kind: TermKind, count: u32) -> Self {
        self.add_term(TermSpec { sign, kind, count })
    }

    /// Add a flat number.
    pub fn add_number(self, n: u32) -> Self {
        self.push(Sign::Plus, TermKind::Flat, n)
    }

    /// Subtract a flat number.
    pub fn sub_number(self, n: u32) -> Self {
        self.push(Sign::Minus, TermKind::Flat, n)
    }

    /// Add `n` whole dice.
    pub fn add_dice(self, n: u32) -> Self {
        self.push(Sign::Plus, TermKind::Die, n)
    }

    /// Subtract `n` whole dice.
    pub fn sub_dice(self, n: u32) -> Self {
        self.push(Sign::Minus, TermKind::Die, n)
    }

    /// Add `n` half dice.
    pub fn add_half_dice(self, n: u32) -> Self {
        self.push(Sign::Plus, TermKind::HalfDie, n)
    }

    /// Add `n` d6-1 dice.
    pub fn add_dice_minus1(self, n: u32) -> Self {
        self.push(Sign::Plus, TermKind::DieMinusOne, n)
    }

    // --- Mode-specific flags ---

    /// Adjust the killing STUN multiplier by `delta`. Ignored outside
    /// Killing mode.
    pub fn add_stun_multiplier(mut self, delta: i32) -> Self {
        if self.building("add_stun_multiplier") {
            self.stun_multiplier_delta = self.stun_multiplier_delta.saturating_add(delta);
        }
        self
    }

    /// Resolve every die to a fixed face instead of rolling. Only Normal and
    /// Killing rolls honour it.
    pub fn modify_to_standard_effect(mut self, apply: impl Into<Apply>) -> Self {
        if apply.into().is_yes() && self.building("modify_to_standard_effect") {
            self.standard_effect = true;
        }
        self
    }

    /// Request a hit location. `forced` skips the location roll. Only Normal
    /// and Killing rolls honour it.
    pub fn add_to_hit_location(mut self, enabled: bool, forced: Option<Location>) -> Self {
        if self.building("add_to_hit_location") {
            self.hit_location_requested = enabled;
            self.forced_location = forced.filter(|_| enabled);
        }
        self
    }

    fn building(&self, call: &str) -> bool {
        if self.rolled {
            warn!(call, "builder call after the roll executed; ignored");
        }
        !self.rolled
    }

    // --- Execution ---

    /// Resolve every die through `source`.
    ///
    /// Valid exactly once per instance; a second call is
    /// [`RollError::AlreadyRolled`].
    pub fn roll<S: DieSource + ?Sized>(&mut self, source: &mut S) -> RollResult<()> {
        if self.rolled {
            return Err(RollError::AlreadyRolled);
        }

        let damage = self.mode.is_damage();
        let standard_effect = self.standard_effect && damage;
        if self.standard_effect && !damage {
            warn!(mode = %self.mode.kind(), "standard effect ignored for this mode");
        }

        if standard_effect {
            for term in self.terms.iter_mut().filter(|t| t.kind.is_rolled()) {
                term.face = Some(match term.kind {
                    TermKind::HalfDie => self.config.standard_effect_half_die,
                    _ => self.config.standard_effect_die,
                });
            }
        } else {
            let count = self.terms.iter().filter(|t| t.kind.is_rolled()).count();
            let faces = source.roll_d6s(count);
            for (term, face) in self
                .terms
                .iter_mut()
                .filter(|t| t.kind.is_rolled())
                .zip(faces)
            {
                term.face = Some(face);
            }
        }

        if matches!(self.mode, RollMode::Killing { .. }) {
            self.stun_multiplier_face = Some(source.roll_d6());
        }

        if self.hit_location_requested {
            if damage {
                let killing = matches!(self.mode, RollMode::Killing { .. });
                self.hit_location = Some(HitLocation::resolve(
                    source,
                    self.forced_location,
                    killing,
                ));
            } else {
                warn!(mode = %self.mode.kind(), "hit location ignored for this mode");
            }
        }

        self.rolled = true;
        debug!(
            mode = %self.mode.kind(),
            units = self.terms.len(),
            standard_effect,
            formula = %self.formula(),
            "roll executed"
        );
        Ok(())
    }

    // --- Plain reads ---

    /// The canonical formula of the units currently present.
    pub fn formula(&self) -> String {
        formula::render(&self.terms)
    }

    /// The active mode.
    pub fn mode(&self) -> RollMode {
        self.mode
    }

    /// True once [`roll`](Self::roll) has run.
    pub fn is_rolled(&self) -> bool {
        self.rolled
    }

    /// Every unit, in insertion order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The rendering groups of the current units.
    pub fn groups(&self) -> Vec<TermGroup<'_>> {
        TermGroup::split(&self.terms)
    }

    /// True if standard effect was requested and the mode honours it.
    pub fn is_standard_effect(&self) -> bool {
        self.standard_effect && self.mode.is_damage()
    }

    /// True if this is a killing roll that adds STR damage.
    pub fn adds_strength(&self) -> bool {
        matches!(
            self.mode,
            RollMode::Killing {
                adds_strength: true
            }
        )
    }
}
