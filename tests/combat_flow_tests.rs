//! Turn controller tests.
//!
//! These drive whole combats through the public command surface and observe
//! them the way a presentation layer would: through closure subscribers.

use std::cell::RefCell;
use std::rc::Rc;

use deck_combat::cards::{CardDefinition, CardId, CardRegistry, CardType};
use deck_combat::combat::{CombatBuilder, CombatEngine, CombatError};
use deck_combat::core::{CombatConfig, CombatPhase, InstanceAllocator, Player};
use deck_combat::effects::Effect;
use deck_combat::enemies::{EnemyDefinition, EnemyMove, EnemyTypeId, IntentKind, MoveId};
use deck_combat::events::{CombatEvent, DamageBreakdown, EventCategory};
use deck_combat::zones::PileKind;

const STRIKE: CardId = CardId::new(1);
const DEFEND: CardId = CardId::new(2);
const BASH: CardId = CardId::new(3);

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    registry.register(
        CardDefinition::new(STRIKE, "Strike", CardType::Attack, 1)
            .with_effect(Effect::Damage { amount: 8 }),
    );
    registry.register(
        CardDefinition::new(DEFEND, "Defend", CardType::Skill, 1)
            .with_effect(Effect::Block { amount: 10 }),
    );
    registry.register(
        CardDefinition::new(BASH, "Bash", CardType::Attack, 2)
            .with_effect(Effect::Damage { amount: 30 }),
    );
    registry
}

fn player(recipe: &[(CardId, usize)]) -> Player {
    let deck = registry().build_deck(recipe, &mut InstanceAllocator::new());
    Player::new(80, 3, deck)
}

fn slime(damage: i32) -> EnemyDefinition {
    EnemyDefinition::new(EnemyTypeId::new(1), "Slime", 30).with_move(EnemyMove::new(
        MoveId::new(0),
        "Tackle",
        IntentKind::Attack {
            damage,
            lifesteal: false,
        },
    ))
}

/// Subscribe a recorder that captures every published event.
fn record(engine: &mut CombatEngine) -> Rc<RefCell<Vec<CombatEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn hand_position(engine: &CombatEngine, name: &str) -> usize {
    engine
        .state()
        .player
        .piles
        .hand()
        .iter()
        .position(|card| card.name() == name)
        .expect("card should be in hand")
}

/// Test a single strike against a fresh enemy.
#[test]
fn test_strike_damage_breakdown() {
    init_tracing();
    let mut engine = CombatBuilder::new(player(&[(STRIKE, 5)])).enemy(slime(6)).build(42);
    engine.start().unwrap();
    let events = record(&mut engine);

    let report = engine.play_card(0, Some(0)).unwrap();

    assert_eq!(engine.state().enemies[0].health, 22);
    assert!(report.log.iter().any(|line| line == "Dealt 8 damage to Slime"));
    assert!(events.borrow().contains(&CombatEvent::EnemyDamaged {
        enemy: 0,
        breakdown: DamageBreakdown {
            damage: 8,
            blocked: 0,
            hp_damage: 8,
        },
        health: 22,
    }));
    assert!(matches!(events.borrow()[0], CombatEvent::ResolveChanged { old: 3, new: 2, .. }));
    assert!(matches!(events.borrow()[1], CombatEvent::CardPlayed { cost: 1, target: Some(0), .. }));
}

/// Test block absorbing an enemy attack, then resetting for the next turn.
#[test]
fn test_block_absorbs_then_resets() {
    let mut engine = CombatBuilder::new(player(&[(DEFEND, 5)])).enemy(slime(6)).build(42);
    engine.start().unwrap();
    engine.play_card(0, None).unwrap();
    assert_eq!(engine.state().player.block, 10);

    let events = record(&mut engine);
    engine.end_turn().unwrap();

    let block_changes: Vec<(i32, i32)> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            CombatEvent::PlayerBlockChanged { old, new } => Some((*old, *new)),
            _ => None,
        })
        .collect();
    assert_eq!(block_changes, vec![(10, 4), (4, 0)]);
    assert_eq!(engine.state().player.health, 80);
    assert_eq!(engine.state().player.block, 0);
    assert_eq!(engine.phase(), CombatPhase::PlayerAction);
}

/// Test a card costing more than the remaining resolve.
#[test]
fn test_insufficient_resolve_leaves_state_untouched() {
    let mut engine = CombatBuilder::new(player(&[(STRIKE, 5)])).enemy(slime(6)).build(42);
    engine.start().unwrap();
    for _ in 0..3 {
        engine.play_card(0, Some(0)).unwrap();
    }
    assert_eq!(engine.state().player.resolve, 0);

    let before = engine.snapshot();
    let events = record(&mut engine);

    let result = engine.play_card(0, Some(0));

    assert_eq!(result, Err(CombatError::InsufficientResolve { cost: 1, available: 0 }));
    assert_eq!(engine.snapshot(), before);
    assert!(events.borrow().is_empty());
}

/// Test a draw that runs out of draw pile and reshuffles the discard pile.
#[test]
fn test_draw_reshuffles_discard() {
    let mut engine = CombatBuilder::new(player(&[(DEFEND, 7)])).enemy(slime(1)).build(9);
    engine.start().unwrap();
    assert_eq!(engine.state().player.piles.len(PileKind::Draw), 2);

    let events = record(&mut engine);
    let report = engine.end_turn().unwrap();

    let piles = &engine.state().player.piles;
    assert_eq!(report.cards.len(), 5);
    assert_eq!(piles.len(PileKind::Hand), 5);
    assert_eq!(piles.len(PileKind::Draw), 2);
    assert_eq!(piles.len(PileKind::Discard), 0);
    assert_eq!(piles.total(), 7);
    assert!(events.borrow().contains(&CombatEvent::DeckReshuffled { cards: 5 }));
}

/// Test drawing when the whole deck is smaller than a hand.
#[test]
fn test_draw_stops_when_both_piles_empty() {
    let mut engine = CombatBuilder::new(player(&[(DEFEND, 3)])).enemy(slime(1)).build(9);
    let report = engine.start().unwrap();

    assert_eq!(report.cards.len(), 3);
    assert_eq!(engine.state().player.piles.len(PileKind::Hand), 3);
}

/// Test that the hand is discarded before enemies act.
#[test]
fn test_hand_discarded_before_enemy_phase() {
    let mut engine = CombatBuilder::new(player(&[(DEFEND, 10)])).enemy(slime(6)).build(5);
    engine.start().unwrap();
    let events = record(&mut engine);

    engine.end_turn().unwrap();

    let events = events.borrow();
    let enemy_phase = events
        .iter()
        .position(|e| {
            *e == CombatEvent::PhaseChanged {
                from: CombatPhase::PlayerAction,
                to: CombatPhase::EnemyAction,
            }
        })
        .unwrap();
    let discards: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, CombatEvent::CardDiscarded { .. }))
        .map(|(i, _)| i)
        .collect();

    assert_eq!(discards.len(), 5);
    assert!(discards.iter().all(|&i| i < enemy_phase));
}

/// Test that enemies stop acting once the player falls.
#[test]
fn test_defeat_stops_enemy_phase() {
    let weak_player = player(&[(DEFEND, 5)]).with_health(5);
    let mut engine = CombatBuilder::new(weak_player)
        .enemy(slime(6))
        .enemy(slime(6))
        .build(1);
    engine.start().unwrap();
    let events = record(&mut engine);

    let report = engine.end_turn().unwrap();

    assert!(report.game_over);
    assert_eq!(engine.phase(), CombatPhase::Defeat);
    assert!(report.log.iter().any(|line| line == "Defeat..."));

    let events = events.borrow();
    let hits = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::PlayerDamaged { .. }))
        .count();
    assert_eq!(hits, 1);
    assert_eq!(events.last(), Some(&CombatEvent::GameOver { victory: false }));
    assert!(!events.iter().any(|e| matches!(e, CombatEvent::IntentSet { .. })));
}

/// Test winning a fight and the terminal state that follows.
#[test]
fn test_victory() {
    let mut engine = CombatBuilder::new(player(&[(BASH, 5)])).enemy(slime(6)).build(3);
    engine.start().unwrap();
    let events = record(&mut engine);

    let report = engine.play_card(0, Some(0)).unwrap();

    assert!(report.game_over);
    assert!(engine.is_over());
    assert!(engine.state().is_victory());
    assert_eq!(engine.phase(), CombatPhase::Victory);
    assert!(!engine.can_act());
    assert!(events.borrow().contains(&CombatEvent::EnemyDied { enemy: 0 }));
    assert_eq!(events.borrow().last(), Some(&CombatEvent::GameOver { victory: true }));

    assert!(engine.end_turn().unwrap().is_empty());
    assert_eq!(
        engine.play_card(0, Some(0)),
        Err(CombatError::InvalidPhase {
            phase: CombatPhase::Victory
        })
    );
}

/// Test that dead enemies are no longer valid targets.
#[test]
fn test_dead_enemy_not_targetable() {
    let mut engine = CombatBuilder::new(player(&[(BASH, 2), (STRIKE, 3)]))
        .enemy(slime(6))
        .enemy(slime(6))
        .build(3);
    engine.start().unwrap();

    let bash = hand_position(&engine, "Bash");
    engine.play_card(bash, Some(0)).unwrap();

    assert_eq!(engine.valid_target_indices(), vec![1]);
    let strike = hand_position(&engine, "Strike");
    assert_eq!(
        engine.play_card(strike, Some(0)),
        Err(CombatError::InvalidTarget { index: Some(0) })
    );
}

/// Test filtered subscriptions.
#[test]
fn test_category_subscription() {
    let mut engine = CombatBuilder::new(player(&[(STRIKE, 5)])).enemy(slime(6)).build(8);
    let intents = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&intents);
    engine.subscribe_to(&[EventCategory::Enemy], move |event| {
        sink.borrow_mut().push(event.clone());
    });

    engine.start().unwrap();

    let intents = intents.borrow();
    assert_eq!(intents.len(), 1);
    match &intents[0] {
        CombatEvent::IntentSet { enemy, intent } => {
            assert_eq!(*enemy, 0);
            assert_eq!(intent.to_string(), "Tackle (attack for 6)");
        }
        other => panic!("unexpected event {:?}", other),
    }
}

/// Test a custom draw count and hand limit.
#[test]
fn test_config_hand_limits() {
    let config = CombatConfig::new().with_draw_per_turn(4).with_max_hand_size(3);
    let mut engine = CombatBuilder::new(player(&[(DEFEND, 8)]))
        .enemy(slime(1))
        .config(config)
        .build(4);

    engine.start().unwrap();

    assert_eq!(engine.config().draw_per_turn, 4);
    assert_eq!(engine.state().player.piles.len(PileKind::Hand), 3);
    assert_eq!(engine.state().player.piles.len(PileKind::Discard), 1);
}

/// Play what the hand allows, then end the turn.
fn play_out_turn(engine: &mut CombatEngine) {
    while let Some(&index) = engine.playable_hand_indices().first() {
        let target = engine.valid_target_indices().first().copied();
        engine.play_card(index, target).unwrap();
    }
    engine.end_turn().unwrap();
}

/// Test that a saved snapshot and RNG state resume the same combat.
#[test]
fn test_restore_resumes_combat() {
    let mut original = CombatBuilder::new(player(&[(STRIKE, 4), (DEFEND, 4)]))
        .enemy(slime(6))
        .build(77);
    original.start().unwrap();
    original.end_turn().unwrap();

    let saved = serde_json::to_string(&original.snapshot()).unwrap();
    let mut restored = CombatEngine::restore(
        serde_json::from_str(&saved).unwrap(),
        &original.rng_state(),
        original.catalog().clone(),
        original.config().clone(),
    );
    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(restored.rng_state(), original.rng_state());

    let events = record(&mut restored);
    for _ in 0..3 {
        play_out_turn(&mut original);
        play_out_turn(&mut restored);
    }

    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(restored.rng_state(), original.rng_state());
    assert!(!events.borrow().is_empty());
}
