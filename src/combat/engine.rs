//! The turn controller.
//!
//! `CombatEngine` exclusively owns a `CombatState` and drives it through
//! its phases:
//!
//! ```text
//! NotStarted ─start─▶ Draw ─▶ PlayerAction ─end_turn─▶ EnemyAction ─▶ Cleanup ─▶ Draw ─▶ …
//!                                                                   └──▶ Victory | Defeat
//! ```
//!
//! Every command validates before it mutates, so a returned error means
//! nothing changed and no events were published. Successful commands run
//! to completion, then publish their queued events to subscribers in
//! order before returning.

use std::sync::Arc;

use tracing::debug;

use super::enemy_turn::run_enemy_phase;
use super::error::{CombatError, Result};
use super::report::{PlayReport, TurnReport};
use crate::cards::CardType;
use crate::core::config::CombatConfig;
use crate::core::entity::InstanceId;
use crate::core::enemy::Enemy;
use crate::core::player::Player;
use crate::core::rng::{GameRng, GameRngState};
use crate::core::state::{CombatPhase, CombatState};
use crate::effects::{
    random_targetable, resolve_card_target, EffectContext, EffectInterpreter, Outcome,
};
use crate::enemies::{EnemyCatalog, EnemyDefinition};
use crate::events::{CombatEvent, EventBus, EventCategory, StatusHolder, SubscriptionId};
use crate::ledger::{StatusEffect, StatusKind, VowRestriction};
use crate::zones::PileKind;

/// Builder for creating a `CombatEngine`.
///
/// Roster definitions are registered in the enemy catalog automatically.
#[derive(Debug)]
pub struct CombatBuilder {
    player: Player,
    roster: Vec<EnemyDefinition>,
    catalog: EnemyCatalog,
    config: CombatConfig,
}

impl CombatBuilder {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            roster: Vec::new(),
            catalog: EnemyCatalog::new(),
            config: CombatConfig::default(),
        }
    }

    /// Add an enemy to the starting roster.
    pub fn enemy(mut self, definition: EnemyDefinition) -> Self {
        self.roster.push(definition);
        self
    }

    /// Add several enemies to the starting roster.
    pub fn enemies(mut self, definitions: impl IntoIterator<Item = EnemyDefinition>) -> Self {
        self.roster.extend(definitions);
        self
    }

    /// Catalog used to resolve summons.
    pub fn catalog(mut self, catalog: EnemyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Build an engine whose randomness comes from `seed`.
    pub fn build(self, seed: u64) -> CombatEngine {
        let mut catalog = self.catalog;
        let enemies = self
            .roster
            .into_iter()
            .map(|definition| {
                let enemy = Enemy::from_definition(&definition);
                catalog.register(definition);
                enemy
            })
            .collect();

        CombatEngine {
            state: CombatState::new(self.player, enemies),
            rng: GameRng::new(seed),
            catalog,
            config: self.config,
            bus: EventBus::new(),
        }
    }
}

/// Combat resolution engine.
///
/// ## Example
///
/// ```
/// use deck_combat::combat::CombatBuilder;
/// use deck_combat::core::{CombatPhase, Player};
/// use deck_combat::enemies::{EnemyDefinition, EnemyTypeId};
///
/// let mut engine = CombatBuilder::new(Player::new(80, 3, Vec::new()))
///     .enemy(EnemyDefinition::new(EnemyTypeId::new(1), "Slime", 30))
///     .build(42);
///
/// engine.start().unwrap();
/// assert_eq!(engine.phase(), CombatPhase::PlayerAction);
/// ```
#[derive(Debug)]
pub struct CombatEngine {
    state: CombatState,
    rng: GameRng,
    catalog: EnemyCatalog,
    config: CombatConfig,
    bus: EventBus,
}

impl CombatEngine {
    /// Rebuild an engine from a saved snapshot and RNG state.
    ///
    /// The catalog must hold every enemy type the snapshot refers to, or
    /// those enemies fall back to the default attack. Subscribers are not
    /// part of the saved state and must be attached again.
    pub fn restore(
        state: CombatState,
        rng: &GameRngState,
        catalog: EnemyCatalog,
        config: CombatConfig,
    ) -> Self {
        debug!(seed = rng.seed, turn = state.turn, phase = %state.phase(), "combat restored");
        Self {
            state,
            rng: GameRng::from_state(rng),
            catalog,
            config,
            bus: EventBus::new(),
        }
    }

    /// Run a mutation with a fresh context, then publish its events.
    fn run<T>(&mut self, op: impl FnOnce(&mut EffectContext<'_>) -> T) -> (T, Vec<String>) {
        let mut ctx =
            EffectContext::new(&mut self.state, &mut self.rng, &self.catalog, &self.config);
        let value = op(&mut ctx);
        let Outcome { events, log } = ctx.finish();
        self.bus.publish_all(&events);
        (value, log)
    }

    // === Commands ===

    /// Begin the combat: shuffle, telegraph intents, draw the opening hand.
    pub fn start(&mut self) -> Result<TurnReport> {
        let phase = self.state.phase();
        if phase != CombatPhase::NotStarted {
            return Err(CombatError::InvalidPhase { phase });
        }

        debug!(seed = self.rng.seed(), enemies = self.state.enemies.len(), "combat starting");
        let (cards, log) = self.run(|ctx| {
            ctx.state.player.piles.shuffle_draw(ctx.rng);
            for index in 0..ctx.state.enemies.len() {
                ctx.roll_intent(index);
            }

            ctx.set_phase(CombatPhase::Draw);
            let before = ctx.events().len();
            ctx.draw_cards(ctx.config.draw_per_turn);
            let cards = drawn_cards(&ctx.events()[before..]);
            ctx.refill_resolve();

            if !ctx.check_outcome() {
                ctx.set_phase(CombatPhase::PlayerAction);
                ctx.log(format!("Turn {}", ctx.state.turn));
            }
            cards
        });

        Ok(TurnReport {
            log,
            cards,
            game_over: self.state.is_over(),
        })
    }

    /// Play the card at `hand_index`, optionally against an enemy.
    pub fn play_card(&mut self, hand_index: usize, target: Option<usize>) -> Result<PlayReport> {
        let target = self.validate_play(hand_index, target)?;
        let card = self
            .state
            .player
            .piles
            .take_from_hand(hand_index)
            .ok_or(CombatError::InvalidCard { index: hand_index })?;
        let definition = Arc::clone(&card.definition);
        let card_id = card.id;

        debug!(
            card = %card.id,
            name = %definition.name,
            cost = definition.cost,
            ?target,
            "playing card"
        );
        let (_, log) = self.run(|ctx| {
            let resolve = ctx.state.player.resolve;
            ctx.set_resolve(resolve - definition.cost);
            ctx.emit(CombatEvent::CardPlayed {
                card: card.id,
                name: definition.name.clone(),
                cost: definition.cost,
                target,
            });
            ctx.log(format!("Played {}", definition.name));

            if let Some(price) = definition.price {
                let debt = StatusEffect::new(StatusKind::Debt, price.health, Some(price.turns));
                ctx.apply_status(StatusHolder::Player, debt);
            }

            EffectInterpreter::apply_all(ctx, &definition.effects, target);

            if definition.exhaust {
                ctx.state.player.piles.push(PileKind::Exhaust, card);
                ctx.emit(CombatEvent::CardExhausted { card: card_id });
            } else {
                ctx.state.player.piles.push(PileKind::Discard, card);
                ctx.emit(CombatEvent::CardDiscarded { card: card_id });
            }

            ctx.check_outcome();
        });

        Ok(PlayReport {
            card: card_id,
            message: format!("Played {}", definition.name),
            target,
            log,
            game_over: self.state.is_over(),
        })
    }

    /// End the player's turn and run the enemy phase.
    ///
    /// Returns an empty report outside `PlayerAction`.
    pub fn end_turn(&mut self) -> Result<TurnReport> {
        if !self.can_act() {
            return Ok(TurnReport::default());
        }

        let (cards, log) = self.run(|ctx| {
            end_of_turn_cards(ctx);
            if ctx.check_outcome() {
                return Vec::new();
            }
            minion_strikes(ctx);
            if ctx.check_outcome() {
                return Vec::new();
            }

            let discarded = ctx.state.player.piles.discard_hand();
            for card in &discarded {
                ctx.emit(CombatEvent::CardDiscarded { card: card.id });
            }
            let changes = ctx.state.player.statuses.expire_durations();
            ctx.emit_status_changes(StatusHolder::Player, changes);

            ctx.set_phase(CombatPhase::EnemyAction);
            run_enemy_phase(ctx);
            if ctx.state.is_over() {
                return Vec::new();
            }

            ctx.set_phase(CombatPhase::Cleanup);
            ctx.reset_player_block();
            if ctx.check_outcome() {
                return Vec::new();
            }

            ctx.state.turn += 1;
            ctx.set_phase(CombatPhase::Draw);
            upkeep(ctx);
            if ctx.check_outcome() {
                return Vec::new();
            }

            ctx.refill_resolve();
            let before = ctx.events().len();
            ctx.draw_cards(ctx.config.draw_per_turn);
            let drawn = drawn_cards(&ctx.events()[before..]);
            ctx.set_phase(CombatPhase::PlayerAction);
            ctx.log(format!("Turn {}", ctx.state.turn));
            drawn
        });

        Ok(TurnReport {
            log,
            cards,
            game_over: self.state.is_over(),
        })
    }

    /// Add an enemy mid-combat.
    ///
    /// The definition is registered in the catalog. Returns the new roster
    /// index.
    pub fn add_enemy(&mut self, definition: EnemyDefinition) -> Result<usize> {
        if self.state.is_over() {
            return Err(CombatError::InvalidPhase {
                phase: self.state.phase(),
            });
        }

        let definition = self.catalog.register(definition);
        let (index, _) = self.run(|ctx| ctx.add_enemy(&definition));
        Ok(index)
    }

    /// Discard random cards from hand.
    ///
    /// Driven by an external timer in certain boss fights. Returns an empty
    /// report outside `PlayerAction`.
    pub fn force_discard(&mut self, count: usize) -> TurnReport {
        if !self.can_act() {
            return TurnReport::default();
        }

        let (cards, log) = self.run(|ctx| {
            let mut discarded = Vec::new();
            for _ in 0..count {
                let held = ctx.state.player.piles.len(PileKind::Hand);
                let Some(index) = ctx.rng.choose_index(held) else {
                    break;
                };
                let Some(card) = ctx.state.player.piles.take_from_hand(index) else {
                    break;
                };
                ctx.log(format!("{} slips from your grasp", card.name()));
                ctx.emit(CombatEvent::CardDiscarded { card: card.id });
                discarded.push(card.id);
                ctx.state.player.piles.push(PileKind::Discard, card);
            }
            discarded
        });

        TurnReport {
            log,
            cards,
            game_over: false,
        }
    }

    // === Subscriptions ===

    /// Receive every event.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&CombatEvent) + 'static,
    {
        self.bus.subscribe(handler)
    }

    /// Receive events in the given categories.
    pub fn subscribe_to<F>(&mut self, categories: &[EventCategory], handler: F) -> SubscriptionId
    where
        F: FnMut(&CombatEvent) + 'static,
    {
        self.bus.subscribe_to(categories, handler)
    }

    /// Stop receiving events.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // === Queries ===

    /// A defensive copy of the combat state.
    #[must_use]
    pub fn snapshot(&self) -> CombatState {
        self.state.clone()
    }

    /// Borrow the combat state.
    #[must_use]
    pub fn state(&self) -> &CombatState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> CombatPhase {
        self.state.phase()
    }

    /// Check if the player may currently act.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.state.phase() == CombatPhase::PlayerAction && !self.state.is_over()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Enemy definitions known to this combat, roster included.
    #[must_use]
    pub fn catalog(&self) -> &EnemyCatalog {
        &self.catalog
    }

    /// Hand indices that `play_card` would currently accept with some target.
    #[must_use]
    pub fn playable_hand_indices(&self) -> Vec<usize> {
        if !self.can_act() {
            return Vec::new();
        }
        let has_target = !self.state.targetable_enemies().is_empty();
        (0..self.state.player.piles.len(PileKind::Hand))
            .filter(|&i| self.check_card(i).is_ok())
            .filter(|&i| {
                self.state
                    .player
                    .piles
                    .hand_card(i)
                    .is_some_and(|c| !c.definition.requires_target() || has_target)
            })
            .collect()
    }

    /// Roster indices that may be targeted.
    #[must_use]
    pub fn valid_target_indices(&self) -> Vec<usize> {
        self.state.targetable_enemies()
    }

    /// Capture the RNG state for persistence.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Validation ===

    fn check_card(&self, index: usize) -> Result<()> {
        let phase = self.state.phase();
        if !self.can_act() {
            return Err(CombatError::InvalidPhase { phase });
        }

        let player = &self.state.player;
        let card = player
            .piles
            .hand_card(index)
            .ok_or(CombatError::InvalidCard { index })?;
        let definition = &card.definition;

        let vow_blocks_skill = definition.card_type == CardType::Skill
            && player.vow.is_some_and(|v| v.forbids(VowRestriction::NoSkills));
        let vow_missing = definition.requires_vow && player.vow.is_none();
        if !definition.is_playable() || vow_missing || vow_blocks_skill {
            return Err(CombatError::InvalidCard { index });
        }

        if definition.cost > player.resolve {
            return Err(CombatError::InsufficientResolve {
                cost: definition.cost,
                available: player.resolve,
            });
        }
        Ok(())
    }

    fn validate_play(&self, index: usize, target: Option<usize>) -> Result<Option<usize>> {
        self.check_card(index)?;
        let card = self
            .state
            .player
            .piles
            .hand_card(index)
            .ok_or(CombatError::InvalidCard { index })?;
        resolve_card_target(&self.state, &card.definition, target)
    }
}

/// Ids of cards drawn in a slice of events.
fn drawn_cards(events: &[CombatEvent]) -> Vec<InstanceId> {
    events
        .iter()
        .filter_map(|event| match event {
            CombatEvent::CardDrawn { card, .. } => Some(*card),
            _ => None,
        })
        .collect()
}

/// Resolve the effects of `end_of_turn` cards still held in hand.
fn end_of_turn_cards(ctx: &mut EffectContext<'_>) {
    let held: Vec<_> = ctx
        .state
        .player
        .piles
        .hand()
        .iter()
        .filter(|card| card.definition.end_of_turn)
        .map(|card| Arc::clone(&card.definition))
        .collect();

    for definition in held {
        let target = ctx.state.targetable_enemies().first().copied();
        ctx.log(format!("{} takes hold", definition.name));
        EffectInterpreter::apply_all(ctx, &definition.effects, target);
        if ctx.state.player.is_dead() || ctx.state.all_enemies_dead() {
            return;
        }
    }
}

/// Every minion strikes a random targetable enemy.
fn minion_strikes(ctx: &mut EffectContext<'_>) {
    let minions: Vec<i32> = ctx.state.player.minions.iter().map(|m| m.attack).collect();

    for attack in minions {
        let Some(target) = random_targetable(ctx.state, ctx.rng) else {
            return;
        };
        if let Some(hit) = ctx.damage_enemy(target, attack) {
            let name = ctx.state.enemies[target].name.clone();
            ctx.log(format!("Your minion hits {} for {}", name, hit.hp_damage));
        }
    }
}

/// Start-of-turn bookkeeping on the player.
fn upkeep(ctx: &mut EffectContext<'_>) {
    let holder = StatusHolder::Player;

    let debt = ctx.state.player.statuses.amount(StatusKind::Debt);
    if debt > 0 {
        let paid = ctx.player_lose_health(debt);
        ctx.log(format!("Paid {} health to your debts", paid));
        let change = ctx.state.player.statuses.tick_duration(StatusKind::Debt);
        ctx.emit_status_changes(holder, change.into_iter().collect());
    }

    if let Some((amount, change)) = ctx.state.player.statuses.tick_counter(StatusKind::Poison) {
        ctx.emit_status_changes(holder, vec![change]);
        let lost = ctx.player_lose_health(amount);
        ctx.log(format!("You take {} poison damage", lost));
    }

    let regeneration = ctx.state.player.statuses.tick_counter(StatusKind::Regeneration);
    if let Some((amount, change)) = regeneration {
        ctx.emit_status_changes(holder, vec![change]);
        ctx.heal_player(amount);
    }

    for change in ctx.state.player.resources.decay_all() {
        ctx.emit_resource(Some(change));
    }

    if let Some(mut vow) = ctx.state.player.vow {
        if vow.tick() {
            ctx.state.player.vow = Some(vow);
        } else {
            ctx.set_vow(None);
            ctx.log("Your vow is fulfilled");
        }
    }
}
