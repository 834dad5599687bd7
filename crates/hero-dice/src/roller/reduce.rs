//! Post-roll reductions that model damage-modifying effects.
//!
//! All three work on the flat unit sequence and leave every surviving unit
//! in its original group. Asking for more than is left empties the formula;
//! that is a legitimate outcome (the damage was fully negated), not an error.

use tracing::debug;

use crate::dice::{Sign, Term, TermKind};
use crate::error::RollResult;
use crate::mode::RollMode;

use super::HeroRoller;

/// How damage classes are counted for a roll.
///
/// Steps are the smallest removable amount: whole DC for killing damage,
/// half DC for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcScale {
    /// 1d6 = 3 DC, ½d6 and 1d6-1 = 2 DC, +1 = 1 DC.
    Killing,
    /// 1d6 and 1d6-1 = 1 DC, ½d6 and +1 = ½ DC.
    Normal,
}

impl DcScale {
    /// The scale that applies to `mode`.
    pub fn for_mode(mode: RollMode) -> Self {
        match mode {
            RollMode::Killing { .. } => Self::Killing,
            _ => Self::Normal,
        }
    }

    /// Steps in one damage class.
    pub fn steps_per_dc(self) -> u32 {
        match self {
            Self::Killing => 1,
            Self::Normal => 2,
        }
    }

    /// Steps a unit is worth. Flat units are worth one step per pip.
    pub fn worth(self, term: &Term) -> u32 {
        match (self, term.kind) {
            (_, TermKind::Flat) => term.face.unwrap_or_default(),
            (Self::Killing, TermKind::Die) => 3,
            (Self::Killing, TermKind::HalfDie | TermKind::DieMinusOne) => 2,
            (Self::Normal, TermKind::Die | TermKind::DieMinusOne) => 2,
            (Self::Normal, TermKind::HalfDie) => 1,
        }
    }

    /// Rewrite `term` so it is worth `left` steps (less than it is worth now).
    ///
    /// Dice degrade to a half die when `left` is exactly a half die's worth,
    /// and to a flat pip count otherwise. Flat units just shrink.
    fn degrade(self, term: &mut Term, left: u32) {
        let half_die = match self {
            Self::Killing => 2,
            Self::Normal => 1,
        };
        if term.kind != TermKind::Flat && left == half_die {
            term.kind = TermKind::HalfDie;
        } else {
            term.kind = TermKind::Flat;
            term.face = Some(left);
        }
    }
}

impl HeroRoller {
    /// Remove the `n` highest-valued units (explosion).
    ///
    /// Units are ranked by signed resolved value; ties go to the earlier
    /// unit. Survivors keep their original order. Returns the removed units
    /// in removal order.
    pub fn remove_n_highest_rank_terms(&mut self, n: u32) -> RollResult<Vec<Term>> {
        self.require_rolled()?;
        let terms = &mut self.terms;

        let mut ranked: Vec<usize> = (0..terms.len()).collect();
        ranked.sort_by_key(|&i| std::cmp::Reverse(terms[i].signed_value().unwrap_or_default()));
        ranked.truncate(n as usize);

        let removed: Vec<Term> = ranked.iter().map(|&i| terms[i].clone()).collect();
        let mut index = 0;
        terms.retain(|_| {
            let keep = !ranked.contains(&index);
            index += 1;
            keep
        });

        debug!(
            requested = n,
            removed = removed.len(),
            formula = %self.formula(),
            "removed highest terms"
        );
        Ok(removed)
    }

    /// Remove the first `n` units in insertion order (damage negation).
    /// Returns the removed units.
    pub fn remove_first_n_terms(&mut self, n: u32) -> RollResult<Vec<Term>> {
        self.require_rolled()?;
        let terms = &mut self.terms;
        let count = (n as usize).min(terms.len());
        let removed: Vec<Term> = terms.drain(..count).collect();

        debug!(
            requested = n,
            removed = removed.len(),
            formula = %self.formula(),
            "removed leading terms"
        );
        Ok(removed)
    }

    /// Remove `n` damage classes, working backwards from the last unit.
    ///
    /// A unit worth more than what is left to remove degrades to a smaller
    /// unit instead of disappearing (1d6 → ½d6 → +1 for killing damage).
    /// Subtracted units are left alone. Returns the number of
    /// [`DcScale`] steps actually removed.
    pub fn remove_n_dc(&mut self, n: u32) -> RollResult<u32> {
        self.require_rolled()?;
        let scale = DcScale::for_mode(self.mode);
        let mut budget = n.saturating_mul(scale.steps_per_dc());
        let mut removed = 0;

        let terms = &mut self.terms;
        let mut i = terms.len();
        while budget > 0 && i > 0 {
            i -= 1;
            if terms[i].sign == Sign::Minus {
                continue;
            }
            let worth = scale.worth(&terms[i]);
            if worth <= budget {
                terms.remove(i);
                budget -= worth;
                removed += worth;
            } else {
                scale.degrade(&mut terms[i], worth - budget);
                removed += budget;
                budget = 0;
            }
        }

        debug!(
            requested = n,
            steps = removed,
            formula = %self.formula(),
            "removed damage classes"
        );
        Ok(removed)
    }

    /// Damage still present, in [`DcScale`] steps for the active mode.
    /// Subtracted units do not count.
    pub fn dc_steps(&self) -> u32 {
        let scale = DcScale::for_mode(self.mode);
        self.terms
            .iter()
            .filter(|t| t.sign == Sign::Plus)
            .fold(0, |steps, t| steps.saturating_add(scale.worth(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{FixedSource, ScriptedSource};
    use crate::error::RollError;
    use crate::mode::Apply;

    fn rolled(roller: HeroRoller, faces: &[u32]) -> HeroRoller {
        let mut roller = roller;
        roller
            .roll(&mut ScriptedSource::new(faces.to_vec()))
            .unwrap();
        roller
    }

    #[test]
    fn reductions_need_a_roll() {
        let mut roller = HeroRoller::new().add_dice(3);
        assert_eq!(roller.remove_first_n_terms(1), Err(RollError::NotRolled));
        assert_eq!(
            roller.remove_n_highest_rank_terms(1),
            Err(RollError::NotRolled)
        );
        assert_eq!(roller.remove_n_dc(1), Err(RollError::NotRolled));
    }

    #[test]
    fn highest_removes_top_values() {
        let mut roller = rolled(HeroRoller::new().add_dice(5), &[2, 6, 3, 6, 1]);
        let removed = roller.remove_n_highest_rank_terms(3).unwrap();
        let removed: Vec<_> = removed.iter().filter_map(Term::value).collect();
        assert_eq!(removed, vec![6, 6, 3]);
        assert_eq!(roller.basic_terms().unwrap(), vec![2, 1]);
        assert_eq!(roller.formula(), "2d6");
    }

    #[test]
    fn highest_spans_groups() {
        let mut roller = rolled(
            HeroRoller::new().add_dice(2).add_half_dice(1).add_number(4),
            &[1, 2, 6],
        );
        roller.remove_n_highest_rank_terms(2).unwrap();
        assert_eq!(roller.formula(), "2d6");
        assert_eq!(roller.basic_total().unwrap(), 3);
    }

    #[test]
    fn highest_over_removal_empties() {
        let mut roller = rolled(HeroRoller::new().add_dice(2), &[4]);
        assert_eq!(roller.remove_n_highest_rank_terms(9).unwrap().len(), 2);
        assert_eq!(roller.formula(), "");
        assert_eq!(roller.basic_total().unwrap(), 0);
        assert!(roller.remove_n_highest_rank_terms(1).unwrap().is_empty());
    }

    #[test]
    fn first_n_in_insertion_order() {
        let mut roller = rolled(
            HeroRoller::new().add_dice(2).add_half_dice(2).add_number(3),
            &[6, 5, 4, 3],
        );
        let removed = roller.remove_first_n_terms(3).unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(roller.formula(), "½d6 + 3");
        assert_eq!(roller.basic_terms().unwrap(), vec![2, 3]);
    }

    #[test]
    fn killing_dc_degrades_die_to_half_die() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_killing_roll(Apply::Yes, false)
                .add_dice(1),
            &[5],
        );
        assert_eq!(roller.remove_n_dc(1).unwrap(), 1);
        assert_eq!(roller.formula(), "½d6");
        assert_eq!(roller.body_total().unwrap(), 3);
    }

    #[test]
    fn killing_dc_splits_a_group() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_killing_roll(Apply::Yes, false)
                .add_dice(2),
            &[4],
        );
        roller.remove_n_dc(1).unwrap();
        assert_eq!(roller.formula(), "1d6 + ½d6");
        roller.remove_n_dc(1).unwrap();
        assert_eq!(roller.formula(), "1d6 + 1");
        roller.remove_n_dc(1).unwrap();
        assert_eq!(roller.formula(), "1d6");
    }

    #[test]
    fn killing_dc_consumes_half_die_whole() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_killing_roll(Apply::Yes, false)
                .add_dice(2)
                .add_half_dice(1),
            &[1],
        );
        assert_eq!(roller.remove_n_dc(2).unwrap(), 2);
        assert_eq!(roller.formula(), "2d6");
    }

    #[test]
    fn normal_dc_is_one_die() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_normal_roll(Apply::Yes)
                .add_dice(3)
                .add_half_dice(1),
            &[2],
        );
        assert_eq!(roller.dc_steps(), 7);
        roller.remove_n_dc(1).unwrap();
        assert_eq!(roller.formula(), "2d6 + ½d6");
        assert_eq!(roller.dc_steps(), 5);
    }

    #[test]
    fn normal_dc_degrades_die_minus_one() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_normal_roll(Apply::Yes)
                .add_dice_minus1(1)
                .add_half_dice(1),
            &[6],
        );
        roller.remove_n_dc(1).unwrap();
        assert_eq!(roller.formula(), "½d6");
        assert_eq!(roller.stun_terms().unwrap(), vec![3]);
    }

    #[test]
    fn dc_shrinks_flat_pips() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_killing_roll(Apply::Yes, false)
                .add_dice(1)
                .add_number(3),
            &[6],
        );
        roller.remove_n_dc(2).unwrap();
        assert_eq!(roller.formula(), "1d6 + 1");
    }

    #[test]
    fn dc_skips_subtracted_units() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_normal_roll(Apply::Yes)
                .add_dice(2)
                .sub_number(1),
            &[3],
        );
        roller.remove_n_dc(1).unwrap();
        assert_eq!(roller.formula(), "1d6 - 1");
    }

    #[test]
    fn dc_steps_saturate_on_huge_flats() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_normal_roll(Apply::Yes)
                .add_number(u32::MAX)
                .add_number(5),
            &[1],
        );
        assert_eq!(roller.dc_steps(), u32::MAX);
        assert_eq!(roller.remove_n_dc(1).unwrap(), 2);
        assert_eq!(roller.formula(), format!("{} + 3", u32::MAX));
    }

    #[test]
    fn dc_over_removal_empties() {
        let mut roller = rolled(
            HeroRoller::new()
                .make_normal_roll(Apply::Yes)
                .add_dice(5),
            &[1],
        );
        assert_eq!(roller.remove_n_dc(50).unwrap(), 10);
        assert_eq!(roller.formula(), "");
        assert_eq!(roller.stun_total().unwrap(), 0);
        assert_eq!(roller.remove_n_dc(1).unwrap(), 0);
    }

    #[test]
    fn reductions_keep_mode_gating() {
        let mut roller = HeroRoller::new().add_dice(3);
        roller.roll(&mut FixedSource(2)).unwrap();
        roller.remove_n_dc(1).unwrap();
        assert!(roller.stun_total().is_err());
        assert_eq!(roller.basic_total().unwrap(), 4);
    }
}
