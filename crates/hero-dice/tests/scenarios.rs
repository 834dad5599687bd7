//! End-to-end roll scenarios against deterministic sources.

use hero_dice::{
    Apply, CyclicSource, FixedSource, HeroRoller, Location, ModeKind, RollError, RollMode,
    ScriptedSource,
};

fn roll_fixed(mut roller: HeroRoller, face: u32) -> HeroRoller {
    roller.roll(&mut FixedSource(face)).unwrap();
    roller
}

// ---------------------------------------------------------------------------
// formula
// ---------------------------------------------------------------------------

#[test]
fn flat_number_formula() {
    let roller = roll_fixed(HeroRoller::new().add_number(7), 1);
    assert_eq!(roller.formula(), "7");
    assert_eq!(roller.basic_total().unwrap(), 7);
}

#[test]
fn long_formula_renders_every_group() {
    let roller = HeroRoller::new()
        .add_number(11)
        .sub_number(3)
        .add_number(2)
        .sub_dice(3)
        .add_half_dice(1)
        .add_dice(9)
        .add_number(1);
    insta::assert_snapshot!(roller.formula(), @"11 - 3 + 2 - 3d6 + ½d6 + 9d6 + 1");
}

#[test]
fn grouped_half_and_minus_one_dice() {
    let roller = HeroRoller::new()
        .add_half_dice(2)
        .add_dice_minus1(1)
        .add_dice_minus1(3);
    insta::assert_snapshot!(roller.formula(), @"2(½d6) + 1d6-1 + 3(d6-1)");
}

// ---------------------------------------------------------------------------
// derived values
// ---------------------------------------------------------------------------

#[test]
fn die_minus_one_normal_damage() {
    let roller = roll_fixed(
        HeroRoller::new()
            .make_normal_roll(Apply::Yes)
            .add_dice_minus1(1),
        6,
    );
    assert_eq!(roller.stun_terms().unwrap(), vec![5]);
    assert_eq!(roller.body_terms().unwrap(), vec![1]);
}

#[test]
fn killing_attack_all_sixes() {
    let roller = roll_fixed(
        HeroRoller::new()
            .make_killing_roll(true, false)
            .add_dice(3),
        6,
    );
    assert_eq!(roller.body_total().unwrap(), 18);
    assert_eq!(roller.stun_multiplier().unwrap(), 3);
    assert_eq!(roller.stun_total().unwrap(), 54);
}

#[test]
fn killing_pips_are_multiplied() {
    let roller = roll_fixed(
        HeroRoller::new()
            .make_killing_roll(Apply::Yes, false)
            .add_number(2),
        4,
    );
    assert_eq!(roller.body_total().unwrap(), 2);
    assert_eq!(roller.stun_total().unwrap(), 4);
}

#[test]
fn killing_standard_effect_still_rolls_multiplier() {
    let mut roller = HeroRoller::new()
        .make_killing_roll(Apply::Yes, false)
        .modify_to_standard_effect(Apply::Yes)
        .add_dice(2);
    roller.roll(&mut ScriptedSource::new([5])).unwrap();
    assert_eq!(roller.body_total().unwrap(), 6);
    assert_eq!(roller.stun_multiplier().unwrap(), 3);
    assert_eq!(roller.stun_total().unwrap(), 18);
}

#[test]
fn flash_cyclic_dice() {
    let mut roller = HeroRoller::new().make_flash_roll(Apply::Yes).add_dice(6);
    roller.roll(&mut CyclicSource::new()).unwrap();
    assert_eq!(roller.flash_terms().unwrap(), vec![0, 0, 0, 0, 1, 2]);
    assert_eq!(roller.flash_total().unwrap(), 3);
}

#[test]
fn skill_roll_eleven_or_less() {
    let mut roller = HeroRoller::new()
        .make_success_roll(Apply::Yes, None)
        .add_number(11)
        .sub_dice(3);
    roller.roll(&mut ScriptedSource::new([6, 5, 3])).unwrap();
    assert_eq!(roller.formula(), "11 - 3d6");
    assert_eq!(roller.success_total().unwrap(), -3);
    assert!(!roller.is_success().unwrap());
}

#[test]
fn normal_hit_location_with_forced_name() {
    let forced = Location::parse_forced("stomach").unwrap();
    let roller = roll_fixed(
        HeroRoller::new()
            .make_normal_roll(Apply::Yes)
            .add_dice(2)
            .add_to_hit_location(true, forced),
        2,
    );
    let hit = roller.hit_location().unwrap();
    assert_eq!(hit.full_name, "Stomach");
    assert_eq!(hit.stun_multiplier, 1.5);
    assert_eq!(hit.body_multiplier, 1.0);
}

#[test]
fn forced_none_rolls_the_location() {
    let forced = Location::parse_forced("none").unwrap();
    let roller = roll_fixed(
        HeroRoller::new()
            .make_killing_roll(Apply::Yes, false)
            .add_dice(1)
            .add_to_hit_location(true, forced),
        6,
    );
    let hit = roller.hit_location().unwrap();
    assert_eq!(hit.roll, Some(18));
    assert_eq!(hit.full_name, "Right Feet");
}

// ---------------------------------------------------------------------------
// reductions
// ---------------------------------------------------------------------------

#[test]
fn explosion_removes_two_highest() {
    let mut roller = roll_fixed(HeroRoller::new().add_dice(10), 6);
    roller.remove_n_highest_rank_terms(2).unwrap();
    assert_eq!(roller.formula(), "8d6");
    assert_eq!(roller.basic_total().unwrap(), 48);
}

#[test]
fn damage_reduction_wipes_normal_attack() {
    let mut roller = roll_fixed(
        HeroRoller::new().make_normal_roll(Apply::Yes).add_dice(5),
        1,
    );
    roller.remove_n_dc(5).unwrap();
    assert_eq!(roller.formula(), "");
    assert_eq!(roller.stun_total().unwrap(), 0);
}

#[test]
fn damage_reduction_takes_killing_half_die_first() {
    let mut roller = roll_fixed(
        HeroRoller::new()
            .make_killing_roll(Apply::Yes, false)
            .add_dice(2)
            .add_half_dice(1),
        1,
    );
    roller.remove_n_dc(2).unwrap();
    assert_eq!(roller.formula(), "2d6");
}

#[test]
fn negation_removes_leading_dice_and_keeps_the_rest() {
    let mut roller = HeroRoller::new()
        .make_normal_roll(Apply::Yes)
        .add_dice(4)
        .add_number(2);
    roller.roll(&mut ScriptedSource::new([6, 5, 4, 3])).unwrap();
    let before = roller.formula();
    roller.remove_first_n_terms(2).unwrap();
    assert_eq!(before, "4d6 + 2");
    assert_eq!(roller.formula(), "2d6 + 2");
    assert_eq!(roller.stun_total().unwrap(), 9);
    assert_eq!(roller.body_total().unwrap(), 2);
}

// ---------------------------------------------------------------------------
// misuse
// ---------------------------------------------------------------------------

#[test]
fn rolling_twice_fails() {
    let mut roller = HeroRoller::new().add_dice(1);
    roller.roll(&mut FixedSource(1)).unwrap();
    assert_eq!(
        roller.roll(&mut FixedSource(1)),
        Err(RollError::AlreadyRolled)
    );
}

#[test]
fn every_other_mode_rejects_killing_accessors() {
    for kind in ModeKind::all() {
        let roller = match kind {
            ModeKind::Basic => HeroRoller::new(),
            ModeKind::Success => HeroRoller::new().make_success_roll(Apply::Yes, None),
            ModeKind::Normal => HeroRoller::new().make_normal_roll(Apply::Yes),
            ModeKind::Killing => HeroRoller::new().make_killing_roll(Apply::Yes, false),
            ModeKind::Adjustment => HeroRoller::new().make_adjustment_roll(Apply::Yes),
            ModeKind::Entangle => HeroRoller::new().make_entangle_roll(Apply::Yes),
            ModeKind::Flash => HeroRoller::new().make_flash_roll(Apply::Yes),
        };
        let roller = roll_fixed(roller.add_dice(2), 4);
        assert_eq!(roller.mode().kind(), *kind);
        assert_eq!(
            roller.stun_multiplier().is_ok(),
            *kind == ModeKind::Killing,
            "{kind}"
        );
    }
}

#[test]
fn conditional_mode_calls_chain_without_branching() {
    let is_killing = false;
    let roller = HeroRoller::new()
        .make_normal_roll(Apply::Yes)
        .make_killing_roll(is_killing, true)
        .make_entangle_roll(Apply::Skip);
    assert_eq!(roller.mode(), RollMode::Normal);
}
