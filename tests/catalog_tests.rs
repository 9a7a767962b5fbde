//! Catalog data tests.
//!
//! Cards and enemies arrive as serde data. These verify that catalogs load
//! from JSON, that unknown effect and intent kinds degrade to no-ops, and
//! that snapshots survive serialization for persistence collaborators.

use deck_combat::cards::{CardDefinition, CardId, CardRegistry, CardType, Price};
use deck_combat::combat::CombatBuilder;
use deck_combat::core::{CombatState, InstanceAllocator, Player};
use deck_combat::effects::Effect;
use deck_combat::enemies::{EnemyCatalog, EnemyDefinition, EnemyRank, EnemyTypeId, IntentKind};
use deck_combat::ledger::{ResourceKind, StatusKind};
use deck_combat::zones::PileKind;

const CARDS: &str = r#"[
    {
        "id": 1,
        "name": "Strike",
        "cost": 1,
        "card_type": "attack",
        "effects": [{ "kind": "damage", "amount": 6 }]
    },
    {
        "id": 2,
        "name": "Prayer",
        "cost": 1,
        "card_type": "skill",
        "effects": [
            { "kind": "heal", "amount": 4 },
            { "kind": "summon_dragon", "size": 3 },
            { "kind": "gain_resource", "resource": "luck", "amount": 2 }
        ]
    },
    {
        "id": 3,
        "name": "Blood Oath",
        "cost": 0,
        "card_type": "power",
        "exhaust": true,
        "price": { "health": 2, "turns": 3 },
        "effects": [
            { "kind": "apply_status", "target": "player", "status": "strength", "amount": 2 }
        ]
    }
]"#;

const ENEMIES: &str = r#"[
    {
        "id": 7,
        "name": "Warden",
        "max_health": 120,
        "rank": "elite",
        "phases": [
            {
                "name": "Guard",
                "moves": [
                    { "id": 0, "name": "Brace", "intent": { "kind": "defend", "block": 8 } },
                    {
                        "id": 1,
                        "name": "Ponder",
                        "weight": 2,
                        "intent": { "kind": "recite_poetry" }
                    }
                ]
            },
            {
                "name": "Break",
                "moves": [
                    {
                        "id": 2,
                        "name": "Shatter",
                        "intent": { "kind": "multi_attack", "damage": 4, "hits": 3 }
                    }
                ]
            }
        ],
        "thresholds": [0.5]
    }
]"#;

fn load_cards() -> CardRegistry {
    let definitions: Vec<CardDefinition> = serde_json::from_str(CARDS).unwrap();
    let mut registry = CardRegistry::new();
    for definition in definitions {
        registry.register(definition);
    }
    registry
}

#[test]
fn test_card_catalog_loads() {
    let registry = load_cards();
    assert_eq!(registry.len(), 3);

    let prayer = registry.get(CardId::new(2)).unwrap();
    assert_eq!(prayer.card_type, CardType::Skill);
    assert_eq!(prayer.effects[1], Effect::Unrecognized);
    assert!(!prayer.exhaust);

    let oath = registry.get(CardId::new(3)).unwrap();
    assert!(oath.exhaust);
    assert_eq!(oath.price, Some(Price { health: 2, turns: 3 }));
}

#[test]
fn test_enemy_catalog_loads() {
    let definitions: Vec<EnemyDefinition> = serde_json::from_str(ENEMIES).unwrap();
    let catalog: EnemyCatalog = definitions.into_iter().collect();

    let warden = catalog.get(EnemyTypeId::new(7)).unwrap();
    assert_eq!(warden.rank, EnemyRank::Elite);
    assert_eq!(warden.active_moves(0).len(), 2);
    assert_eq!(warden.active_moves(0)[1].intent, IntentKind::Unrecognized);
    assert_eq!(warden.active_moves(0)[1].weight, 2);
    assert_eq!(warden.active_moves(0)[0].weight, 1);
    assert_eq!(warden.active_moves(1)[0].name, "Shatter");
    assert_eq!(warden.thresholds, vec![0.5]);
}

/// Test that an unknown effect is skipped while its neighbours resolve.
#[test]
fn test_unknown_effect_is_noop() {
    let registry = load_cards();
    let deck = registry.build_deck(&[(CardId::new(2), 5)], &mut InstanceAllocator::new());
    let player = Player::new(80, 3, deck).with_health(70);
    let warden: Vec<EnemyDefinition> = serde_json::from_str(ENEMIES).unwrap();
    let mut engine = CombatBuilder::new(player).enemies(warden).build(12);
    engine.start().unwrap();

    let report = engine.play_card(0, None).unwrap();

    let player = &engine.state().player;
    assert_eq!(player.health, 74);
    assert_eq!(player.resources.get(ResourceKind::Devotion), 1);
    assert_eq!(player.resources.get(ResourceKind::Luck), 2);
    assert_eq!(player.resolve, 2);
    assert_eq!(report.log, vec!["Played Prayer", "Healed 4 health", "luck is now 2"]);
}

/// Test that an unknown intent resolves as a no-op.
#[test]
fn test_unknown_intent_is_noop() {
    let mut warden: Vec<EnemyDefinition> = serde_json::from_str(ENEMIES).unwrap();
    // Keep only the unknown move
    warden[0].phases[0].moves.remove(0);
    let mut engine = CombatBuilder::new(Player::new(80, 3, Vec::new()))
        .enemies(warden)
        .build(3);
    engine.start().unwrap();

    engine.end_turn().unwrap();

    let state = engine.state();
    assert_eq!(state.player.health, 80);
    assert_eq!(state.enemies[0].block, 0);
    assert_eq!(state.turn, 2);
}

#[test]
fn test_priced_card_from_data() {
    let registry = load_cards();
    let deck = registry.build_deck(&[(CardId::new(3), 1)], &mut InstanceAllocator::new());
    let warden: Vec<EnemyDefinition> = serde_json::from_str(ENEMIES).unwrap();
    let mut engine = CombatBuilder::new(Player::new(80, 3, deck)).enemies(warden).build(3);
    engine.start().unwrap();

    engine.play_card(0, None).unwrap();

    let player = &engine.state().player;
    assert_eq!(player.statuses.amount(StatusKind::Strength), 2);
    assert_eq!(player.statuses.amount(StatusKind::Debt), 2);
    assert_eq!(player.piles.len(PileKind::Exhaust), 1);
}

/// Test that a mid-combat snapshot survives a JSON round trip.
#[test]
fn test_snapshot_serialization() {
    let registry = load_cards();
    let recipe = [(CardId::new(1), 4), (CardId::new(2), 4)];
    let deck = registry.build_deck(&recipe, &mut InstanceAllocator::new());
    let warden: Vec<EnemyDefinition> = serde_json::from_str(ENEMIES).unwrap();
    let mut engine = CombatBuilder::new(Player::new(80, 3, deck)).enemies(warden).build(21);
    engine.start().unwrap();
    engine.end_turn().unwrap();

    let snapshot = engine.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: CombatState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, snapshot);
    assert_eq!(restored.phase(), snapshot.phase());
}
