use planner_core::{
    Attribute, CharacterState, ChoosePerk, DecreaseAttribute, ExecuteError, ExecutionOutcome,
    IncreaseAttribute, Intent, IntentRequest, LowerSkill, Perk, PlannerEngine, RaiseSkill,
    RejectionKind, RemovePerk, RuleError, Skill, TagSkill, ToggleTrait, Trait, skill_cost,
};

fn run(state: &mut CharacterState, intent: Intent) -> Result<ExecutionOutcome, ExecuteError> {
    PlannerEngine::new(state).execute(&intent)
}

fn increase(attribute: Attribute) -> Intent {
    Intent::IncreaseAttribute(IncreaseAttribute(attribute))
}

fn tag(skill: Skill) -> Intent {
    Intent::TagSkill(TagSkill(skill))
}

fn raise(skill: Skill) -> Intent {
    Intent::RaiseSkill(RaiseSkill(skill))
}

fn lower(skill: Skill) -> Intent {
    Intent::LowerSkill(LowerSkill(skill))
}

/// Intelligence 10, tags on small guns / unarmed / speech, still level 1.
fn finished_creation() -> CharacterState {
    let mut state = CharacterState::default();
    for _ in 0..5 {
        run(&mut state, increase(Attribute::Intelligence)).unwrap();
    }
    for skill in [Skill::SmallGuns, Skill::Unarmed, Skill::Speech] {
        run(&mut state, tag(skill)).unwrap();
    }
    state
}

fn leveled_to(level: u32) -> CharacterState {
    let mut state = finished_creation();
    while state.level() < level {
        run(&mut state, Intent::LevelUp).unwrap();
    }
    state
}

#[test]
fn increase_then_decrease_restores_snapshot() {
    for attribute in Attribute::ALL {
        let mut state = CharacterState::default();
        let before = state.clone();
        run(&mut state, increase(attribute)).unwrap();
        assert_ne!(state, before);
        run(&mut state, Intent::DecreaseAttribute(DecreaseAttribute(attribute))).unwrap();
        assert_eq!(state, before, "{attribute}");
    }
}

#[test]
fn increase_at_cap_leaves_state_untouched() {
    let mut state = CharacterState::default();
    for _ in 0..5 {
        run(&mut state, increase(Attribute::Agility)).unwrap();
    }
    assert_eq!(state.primary().get(Attribute::Agility), 10);
    run(&mut state, Intent::DecreaseAttribute(DecreaseAttribute(Attribute::Strength))).unwrap();
    assert_eq!(state.primary().unspent_points, 1);

    let before = state.clone();
    let err = run(&mut state, increase(Attribute::Agility)).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::BoundViolation);
    assert_eq!(state, before);
}

#[test]
fn creation_scenario_agility_build() {
    let mut state = CharacterState::default();
    for _ in 0..5 {
        run(&mut state, increase(Attribute::Agility)).unwrap();
    }
    assert_eq!(state.primary().get(Attribute::Agility), 10);
    assert_eq!(state.primary().unspent_points, 0);

    for skill in [Skill::SmallGuns, Skill::Unarmed, Skill::Speech] {
        run(&mut state, tag(skill)).unwrap();
    }
    assert_eq!(state.tag_points(), 0);

    let skill_rate = state.derived().skill_rate;
    assert_eq!(skill_rate, 15);
    let outcome = run(&mut state, Intent::LevelUp).unwrap();
    assert_eq!(outcome.levels_gained, 1);
    assert_eq!(state.level(), 2);
    assert_eq!(state.skill_points(), 15);

    // 5 + 4×10 + 20 tag bonus
    assert_eq!(state.final_skill(Skill::SmallGuns), 65);
    run(&mut state, raise(Skill::SmallGuns)).unwrap();
    assert_eq!(state.skill_points(), 14);
    assert_eq!(state.raised_skills().get(Skill::SmallGuns), 2);
}

#[test]
fn gifted_toggles_all_attributes_exactly() {
    let mut state = CharacterState::default();
    let before = state.clone();

    run(&mut state, Intent::ToggleTrait(ToggleTrait(Trait::Gifted))).unwrap();
    assert!(state.primary().iter().all(|(_, value)| value == 6));
    assert_eq!(state.traits(), &[Trait::Gifted]);

    run(&mut state, Intent::ToggleTrait(ToggleTrait(Trait::Gifted))).unwrap();
    assert_eq!(state, before);
}

#[test]
fn third_trait_is_rejected_without_side_effects() {
    let mut state = CharacterState::default();
    run(&mut state, Intent::ToggleTrait(ToggleTrait(Trait::Bruiser))).unwrap();
    run(&mut state, Intent::ToggleTrait(ToggleTrait(Trait::SmallFrame))).unwrap();

    let before = state.clone();
    let err = run(&mut state, Intent::ToggleTrait(ToggleTrait(Trait::Gifted))).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::BoundViolation);
    assert_eq!(state, before);
    assert_eq!(state.primary().get(Attribute::Strength), 7);
    assert_eq!(state.primary().get(Attribute::Agility), 6);
}

#[test]
fn tagging_doubles_growth() {
    let mut state = leveled_to(2);
    let tagged_before = state.raised_skills().get(Skill::SmallGuns);
    let untagged_before = state.raised_skills().get(Skill::BigGuns);
    for _ in 0..3 {
        run(&mut state, raise(Skill::SmallGuns)).unwrap();
        run(&mut state, raise(Skill::BigGuns)).unwrap();
    }
    assert_eq!(state.raised_skills().get(Skill::SmallGuns) - tagged_before, 6);
    assert_eq!(state.raised_skills().get(Skill::BigGuns) - untagged_before, 3);
}

#[test]
fn raise_then_lower_is_point_neutral_for_every_skill() {
    let mut state = leveled_to(2);
    for skill in Skill::ALL {
        let before = state.clone();
        run(&mut state, raise(skill)).unwrap();
        run(&mut state, lower(skill)).unwrap();
        assert_eq!(state, before, "{skill}");
    }
}

#[test]
fn cost_tiers_hold_at_each_boundary() {
    let mut state = leveled_to(25);
    let skill = Skill::Science;
    assert!(!state.is_tagged(skill));

    for (boundary, low, high) in [(100, 1, 2), (125, 2, 3), (150, 3, 4), (175, 4, 5), (200, 5, 6)] {
        while state.final_skill(skill) < boundary {
            run(&mut state, raise(skill)).unwrap();
        }
        assert_eq!(state.final_skill(skill), boundary);
        let points = state.skill_points();

        run(&mut state, raise(skill)).unwrap();
        assert_eq!(points - state.skill_points(), low, "raise at {boundary}");
        run(&mut state, raise(skill)).unwrap();
        assert_eq!(points - state.skill_points(), low + high, "raise at {}", boundary + 1);

        run(&mut state, lower(skill)).unwrap();
        assert_eq!(points - state.skill_points(), low, "lower from {}", boundary + 2);
        run(&mut state, lower(skill)).unwrap();
        assert_eq!(state.skill_points(), points, "lower from {}", boundary + 1);
        assert_eq!(state.final_skill(skill), boundary);
    }
}

#[test]
fn tagged_refund_is_priced_below_the_step() {
    let mut state = leveled_to(25);
    let skill = Skill::SmallGuns;
    // 5 + 4×5 + 20 = 45, then steps of two land on odd values
    while state.final_skill(skill) < 99 {
        run(&mut state, raise(skill)).unwrap();
    }
    assert_eq!(state.final_skill(skill), 99);

    let points = state.skill_points();
    run(&mut state, raise(skill)).unwrap();
    assert_eq!(points - state.skill_points(), skill_cost(99));
    assert_eq!(state.final_skill(skill), 101);
    run(&mut state, lower(skill)).unwrap();
    assert_eq!(state.skill_points(), points);
}

#[test]
fn lower_without_investment_is_rejected() {
    let mut state = leveled_to(2);
    let err = run(&mut state, lower(Skill::Doctor)).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::BoundViolation);
}

#[test]
fn level_up_gates() {
    let mut state = CharacterState::default();
    let err = run(&mut state, Intent::LevelUp).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::PrerequisiteNotMet);

    let mut state = finished_creation();
    run(&mut state, Intent::DecreaseAttribute(DecreaseAttribute(Attribute::Luck))).unwrap();
    assert!(run(&mut state, Intent::LevelUp).is_err());
    run(&mut state, increase(Attribute::Luck)).unwrap();

    run(&mut state, tag(Skill::Speech)).unwrap();
    assert_eq!(state.tag_points(), 1);
    assert!(run(&mut state, Intent::LevelUp).is_err());
    run(&mut state, tag(Skill::Speech)).unwrap();

    // Gifted pushes intelligence to 11
    run(&mut state, Intent::ToggleTrait(ToggleTrait(Trait::Gifted))).unwrap();
    assert_eq!(state.primary().get(Attribute::Intelligence), 11);
    let before = state.clone();
    assert!(run(&mut state, Intent::LevelUp).is_err());
    assert_eq!(state, before);
}

#[test]
fn perk_points_follow_perk_rate() {
    let state = leveled_to(12);
    assert_eq!(state.perk_points(), 4);
    // intelligence 10: 5 + 2×10 per level, eleven level-ups
    assert_eq!(state.skill_points(), 11 * 25);
}

#[test]
fn creation_tags_lock_after_level_one() {
    let mut state = leveled_to(2);
    let before = state.clone();
    let err = run(&mut state, tag(Skill::SmallGuns)).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::PrerequisiteNotMet);
    assert_eq!(state, before);

    let err = run(&mut state, tag(Skill::Doctor)).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::BudgetExhausted);
}

#[test]
fn tag_perk_opens_one_removable_slot() {
    let mut state = leveled_to(12);
    run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::Tag))).unwrap();
    assert_eq!(state.tag_points(), 1);

    let doctor_base = state.base_skills().get(Skill::Doctor);
    run(&mut state, tag(Skill::Doctor)).unwrap();
    assert_eq!(state.tag_points(), 0);
    assert_eq!(state.tags().len(), 4);
    // no creation bonus for a late tag
    assert_eq!(state.base_skills().get(Skill::Doctor), doctor_base);

    run(&mut state, tag(Skill::Doctor)).unwrap();
    assert_eq!(state.tag_points(), 1);
    run(&mut state, tag(Skill::Repair)).unwrap();
    assert_eq!(planner_core::intent::raise_step(&state, Skill::Repair), 2);

    let err = run(&mut state, tag(Skill::Speech)).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::PrerequisiteNotMet);

    let err = run(&mut state, Intent::RemovePerk(RemovePerk(Perk::Tag))).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::PrerequisiteNotMet);
}

#[test]
fn here_and_now_levels_up_immediately() {
    let mut state = leveled_to(3);
    assert_eq!(state.perk_points(), 1);
    let points = state.skill_points();

    let outcome = run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::HereAndNow))).unwrap();
    assert_eq!(outcome.levels_gained, 1);
    assert_eq!(state.level(), 4);
    assert_eq!(state.skill_points(), points + 25);
    assert_eq!(state.perk_points(), 0);
    assert_eq!(state.perk_ranks(Perk::HereAndNow), 1);
    assert_eq!(state.perks().acquired(Perk::HereAndNow).level_selected, vec![3]);
}

#[test]
fn here_and_now_is_atomic_when_level_up_is_blocked() {
    let mut state = leveled_to(3);
    run(&mut state, Intent::DecreaseAttribute(DecreaseAttribute(Attribute::Charisma))).unwrap();

    let before = state.clone();
    let err = run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::HereAndNow))).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::PrerequisiteNotMet);
    assert_eq!(state, before);
    assert_eq!(state.perks().remaining(Perk::HereAndNow), 1);
}

#[test]
fn rank_sums_survive_choose_and_remove() {
    let mut state = leveled_to(12);
    let rate = state.derived().skill_rate;

    for _ in 0..3 {
        run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::Educated))).unwrap();
    }
    assert_eq!(state.derived().skill_rate, rate + 6);
    let err = run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::Educated))).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::BoundViolation);

    run(&mut state, Intent::RemovePerk(RemovePerk(Perk::Educated))).unwrap();
    assert_eq!(state.perk_ranks(Perk::Educated), 2);
    assert_eq!(state.perk_points(), 2);

    for perk in Perk::ALL {
        assert_eq!(
            state.perks().remaining(perk) + state.perk_ranks(perk),
            perk.max_ranks(),
            "{perk}"
        );
    }
}

#[test]
fn gain_perk_effect_is_reversible() {
    let mut state = leveled_to(12);
    run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::GainLuck))).unwrap();
    assert_eq!(state.primary().get(Attribute::Luck), 6);

    run(&mut state, Intent::RemovePerk(RemovePerk(Perk::GainLuck))).unwrap();
    assert_eq!(state.primary().get(Attribute::Luck), 5);
    assert_eq!(state.perk_points(), 4);
}

#[test]
fn gain_perk_removal_respects_attribute_floor() {
    let mut state = leveled_to(12);
    run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::GainLuck))).unwrap();
    for _ in 0..5 {
        run(&mut state, Intent::DecreaseAttribute(DecreaseAttribute(Attribute::Luck))).unwrap();
    }
    assert_eq!(state.primary().get(Attribute::Luck), 1);

    let before = state.clone();
    let err = run(&mut state, Intent::RemovePerk(RemovePerk(Perk::GainLuck))).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::BoundViolation);
    assert_eq!(state, before);
}

#[test]
fn perk_skill_bonus_feeds_requirements() {
    let mut state = leveled_to(6);
    run(&mut state, Intent::ChoosePerk(ChoosePerk(Perk::Thief))).unwrap();
    assert_eq!(state.base_skills().get(Skill::Steal), 15 + 10);

    let offered = state.offered_perks();
    let thief = offered.iter().find(|o| o.perk == Perk::Thief);
    assert!(thief.is_none(), "single-rank perk no longer offered");
}

#[test]
fn traits_lock_after_creation() {
    let mut state = leveled_to(2);
    let err = run(&mut state, Intent::ToggleTrait(ToggleTrait(Trait::Finesse))).unwrap_err();
    assert_eq!(err.kind(), RejectionKind::PrerequisiteNotMet);
}

#[test]
fn unknown_names_are_rejected_as_references() {
    let mut state = CharacterState::default();
    let before = state.clone();
    let err = PlannerEngine::new(&mut state)
        .execute_request(&IntentRequest::new("raiseSkill", "Alchemy"))
        .unwrap_err();
    assert!(matches!(err, ExecuteError::UnknownReference(_)));
    assert_eq!(err.kind(), RejectionKind::UnknownReference);
    assert_eq!(err.phase(), None);
    assert_eq!(state, before);
}
