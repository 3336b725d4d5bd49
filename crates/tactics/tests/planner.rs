//! Sequence planning against static battlefields.

use squad_core::{
    Ability, ActionEconomy, Combatant, DecisionEnv, DecisionError, DecisionResult, Env, Faction,
    Position, RangePreference, RetreatOracle, Role, StaticBattlefield, TacticsConfig, UnitId,
    UnitView,
};
use squad_tactics::{FieldCache, SequenceKind, SequencePlanner, Situation, SituationBuilder};

const TOLERANCE: f32 = 1e-3;

fn hero(role: Role, preference: RangePreference) -> UnitView {
    UnitView::new(UnitId(1), Faction::PARTY, Position::ORIGIN)
        .with_role(role, preference)
        .with_speed(9.0)
}

fn enemy_at(x: f32) -> UnitView {
    UnitView::new(UnitId(2), Faction::HOSTILE, Position::new(x, 0.0))
}

fn snapshot(
    field: &StaticBattlefield,
    config: &TacticsConfig,
    budget: ActionEconomy,
) -> Situation {
    let mut cache = FieldCache::new();
    SituationBuilder::new(DecisionEnv::from_bundle(field), config).build(
        UnitId(1),
        Some(budget),
        &mut cache,
    )
}

fn target(situation: &Situation) -> UnitView {
    situation
        .enemy(UnitId(2))
        .cloned()
        .expect("enemy should be in the snapshot")
}

#[test]
fn unreachable_ability_never_appears() {
    let config = TacticsConfig::default();
    let bow = Ability::attack(1, 10.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Dps, RangePreference::Melee)).with_ability(bow.clone()),
        )
        .with_unit(enemy_at(25.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL.without_move());
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    let candidates = planner.candidates(&situation, &[bow.clone()], &enemy, Role::Dps);
    assert!(candidates.is_empty(), "got {candidates:?}");
    assert!(planner.plan(&situation, &[bow], &enemy, Role::Dps).is_none());
}

#[test]
fn move_then_attack_ends_within_reach() {
    let config = TacticsConfig::default();
    let bow = Ability::attack(1, 10.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Dps, RangePreference::Melee)).with_ability(bow.clone()),
        )
        .with_unit(enemy_at(25.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    let plan = planner
        .plan(&situation, &[bow], &enemy, Role::Dps)
        .expect("target is reachable with one move");
    assert_eq!(plan.kind, SequenceKind::MoveThenAttack);
    assert!(plan.final_position.distance(enemy.position) <= 10.0 + TOLERANCE);
    // minimal move: 25 - 10
    assert!((plan.final_position.distance(Position::ORIGIN) - 15.0).abs() < TOLERANCE);
    assert_eq!(plan.target(), Some(UnitId(2)));
}

#[test]
fn endangered_support_prefers_to_hold_back() {
    let config = TacticsConfig::default();
    let wand = Ability::attack(1, 10.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Support, RangePreference::Ranged))
                .with_ability(wand.clone()),
        )
        .with_unit(enemy_at(3.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL.without_move());
    assert!(situation.in_danger());

    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);
    let candidates = planner.candidates(&situation, &[wand.clone()], &enemy, Role::Support);

    let skip = candidates
        .iter()
        .find(|c| c.is_skip())
        .expect("skip is generated for endangered ranged supports");
    assert!(candidates.iter().any(|c| c.kind == SequenceKind::DirectAttack));
    for candidate in &candidates {
        assert!(skip.total >= candidate.total, "{candidate} beats {skip}");
    }
    assert!(planner.plan(&situation, &[wand], &enemy, Role::Support).is_none());
}

#[test]
fn endangered_support_does_not_walk_into_an_attack() {
    let config = TacticsConfig::default();
    let wand = Ability::attack(1, 25.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Support, RangePreference::Ranged))
                .with_ability(wand.clone()),
        )
        .with_unit(enemy_at(-35.0))
        .with_unit(UnitView::new(UnitId(3), Faction::HOSTILE, Position::new(3.0, 0.0)));

    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    assert!(situation.in_danger());

    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);
    let candidates = planner.candidates(&situation, &[wand.clone()], &enemy, Role::Support);

    let skip = candidates
        .iter()
        .find(|c| c.is_skip())
        .expect("skip is generated for endangered ranged supports");
    let advance = candidates
        .iter()
        .find(|c| c.kind == SequenceKind::MoveThenAttack)
        .expect("target is one move away");
    // still 13 from the nearby enemy after moving
    assert!(advance.final_position.distance(Position::new(3.0, 0.0)) < config.safe_distance);
    assert!(advance.exposed);
    assert!(skip.total >= advance.total, "{advance} beats {skip}");
    assert!(planner.plan(&situation, &[wand], &enemy, Role::Support).is_none());
}

#[test]
fn skip_is_not_offered_to_melee_units() {
    let config = TacticsConfig::default();
    let sword = Ability::attack(1, 2.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Support, RangePreference::Melee).with_hp(2, 10))
                .with_ability(sword.clone()),
        )
        .with_unit(enemy_at(1.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    let candidates = planner.candidates(&situation, &[sword], &enemy, Role::Support);
    assert!(candidates.iter().all(|c| !c.is_skip()));
}

#[test]
fn ranged_unit_falls_back_before_attacking() {
    let config = TacticsConfig::default();
    let bow = Ability::attack(1, 30.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Dps, RangePreference::Ranged).with_speed(10.0))
                .with_ability(bow.clone()),
        )
        .with_unit(enemy_at(5.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    let candidates = planner.candidates(&situation, &[bow.clone()], &enemy, Role::Dps);
    let kinds: Vec<SequenceKind> = candidates.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SequenceKind::Skip,
            SequenceKind::DirectAttack,
            SequenceKind::RetreatThenAttack
        ]
    );

    let plan = planner
        .plan(&situation, &[bow], &enemy, Role::Dps)
        .expect("retreating and shooting beats standing still");
    assert_eq!(plan.kind, SequenceKind::RetreatThenAttack);
    assert!(plan.final_position.x < 0.0);
    assert!(plan.final_position.distance(enemy.position) <= 30.0 + TOLERANCE);
}

#[test]
fn retreat_is_dropped_when_target_falls_out_of_range() {
    let config = TacticsConfig::default();
    let dagger = Ability::attack(1, 6.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Dps, RangePreference::Ranged).with_speed(10.0))
                .with_ability(dagger.clone()),
        )
        .with_unit(enemy_at(5.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    let candidates = planner.candidates(&situation, &[dagger], &enemy, Role::Dps);
    assert!(
        candidates
            .iter()
            .all(|c| c.kind != SequenceKind::RetreatThenAttack)
    );
}

#[test]
fn tank_is_penalised_for_opening_distance() {
    let config = TacticsConfig::default();
    let javelin = Ability::attack(1, 20.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Tank, RangePreference::Ranged))
                .with_ability(javelin.clone()),
        )
        .with_unit(enemy_at(2.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    let candidates = planner.candidates(&situation, &[javelin], &enemy, Role::Tank);
    let direct = candidates
        .iter()
        .find(|c| c.kind == SequenceKind::DirectAttack)
        .expect("enemy is in range");
    assert_eq!(direct.role_fit, 0.0);

    // falls back 13 to the safe distance, still within javelin range
    let retreat = candidates
        .iter()
        .find(|c| c.kind == SequenceKind::RetreatThenAttack)
        .expect("the javelin still reaches from the retreat point");
    assert!(retreat.final_position.x < 0.0);
    assert_eq!(retreat.role_fit, -30.0);
    assert!(retreat.total < retreat.offense + retreat.safety);
}

struct BrokenRetreat;

impl RetreatOracle for BrokenRetreat {
    fn retreat_position(
        &self,
        _unit: &UnitView,
        _enemies: &[UnitView],
        _safe_distance: f32,
    ) -> DecisionResult<Option<Position>> {
        Err(DecisionError::collaborator("retreat", "navmesh unavailable"))
    }
}

#[test]
fn failing_retreat_oracle_only_drops_the_retreat() {
    let config = TacticsConfig::default();
    let bow = Ability::attack(1, 30.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Dps, RangePreference::Ranged).with_speed(10.0))
                .with_ability(bow.clone()),
        )
        .with_unit(enemy_at(5.0));
    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    let enemy = target(&situation);

    let broken = BrokenRetreat;
    let env = Env::new(&field, &field, &field, &broken).into_decision_env();
    let planner = SequencePlanner::new(env, &config);

    let kinds: Vec<SequenceKind> = planner
        .candidates(&situation, &[bow], &enemy, Role::Dps)
        .iter()
        .map(|c| c.kind)
        .collect();
    assert_eq!(kinds, vec![SequenceKind::Skip, SequenceKind::DirectAttack]);
}

#[test]
fn planning_is_deterministic() {
    let config = TacticsConfig::default();
    let abilities = [Ability::attack(1, 6.0), Ability::attack(2, 12.0)];
    let field = StaticBattlefield::new()
        .with_combatant(
            abilities.iter().cloned().fold(
                Combatant::new(hero(Role::Dps, RangePreference::Ranged)),
                Combatant::with_ability,
            ),
        )
        .with_unit(enemy_at(9.0))
        .with_unit(UnitView::new(UnitId(3), Faction::HOSTILE, Position::new(0.0, 12.0)));

    let situation = snapshot(&field, &config, ActionEconomy::FULL);
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    let first = planner.plan(&situation, &abilities, &enemy, Role::Dps);
    let second = planner.plan(&situation, &abilities, &enemy, Role::Dps);
    assert_eq!(first, second);
}

#[test]
fn spent_standard_action_plans_nothing() {
    let config = TacticsConfig::default();
    let sword = Ability::attack(1, 2.0);
    let field = StaticBattlefield::new()
        .with_combatant(
            Combatant::new(hero(Role::Tank, RangePreference::Melee)).with_ability(sword.clone()),
        )
        .with_unit(enemy_at(1.0));

    let situation = snapshot(&field, &config, ActionEconomy::FULL.without_standard());
    let planner = SequencePlanner::new(DecisionEnv::from_bundle(&field), &config);
    let enemy = target(&situation);

    assert!(planner.plan(&situation, &[sword], &enemy, Role::Tank).is_none());
}
