//! Mutation context shared by the interpreter and the turn controller.
//!
//! An `EffectContext` borrows the combat state, the RNG, the enemy catalog
//! and the configuration for the duration of one engine operation. Every
//! state change goes through one of its helpers, which clamps values and
//! queues the matching `CombatEvent`. The engine publishes the queued
//! events once the operation has finished.

use tracing::{debug, trace, warn};

use crate::core::config::CombatConfig;
use crate::core::enemy::Enemy;
use crate::core::rng::GameRng;
use crate::core::state::{CombatPhase, CombatState};
use crate::enemies::{advance_phase, select_intent, EnemyCatalog, EnemyDefinition, EnemyTypeId};
use crate::events::{CombatEvent, DamageBreakdown, StatusHolder};
use crate::ledger::{
    ActiveVow, ResourceChange, ResourceKind, StatusChange, StatusEffect, StatusKind,
};

/// Events and log lines produced by one operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub events: Vec<CombatEvent>,
    pub log: Vec<String>,
}

/// Borrowed view of everything an operation may touch.
pub struct EffectContext<'a> {
    pub state: &'a mut CombatState,
    pub rng: &'a mut GameRng,
    pub catalog: &'a EnemyCatalog,
    pub config: &'a CombatConfig,
    events: Vec<CombatEvent>,
    log: Vec<String>,
}

impl<'a> EffectContext<'a> {
    /// Create a context for one operation.
    pub fn new(
        state: &'a mut CombatState,
        rng: &'a mut GameRng,
        catalog: &'a EnemyCatalog,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            state,
            rng,
            catalog,
            config,
            events: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Queue an event.
    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Add a human-readable log line.
    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// Events queued so far.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Take the queued events and log lines.
    #[must_use]
    pub fn finish(self) -> Outcome {
        Outcome {
            events: self.events,
            log: self.log,
        }
    }

    // === Flow ===

    /// Move to a non-terminal phase.
    pub fn set_phase(&mut self, phase: CombatPhase) {
        let from = self.state.set_phase(phase);
        if from != phase && self.state.phase() == phase {
            debug!(%from, to = %phase, turn = self.state.turn, "phase changed");
            self.emit(CombatEvent::PhaseChanged { from, to: phase });
        }
    }

    /// Set the player's current resolve.
    pub fn set_resolve(&mut self, value: i32) {
        let player = &mut self.state.player;
        let old = player.resolve;
        player.resolve = value.max(0);
        if old != player.resolve {
            let (new, max) = (player.resolve, player.max_resolve);
            self.emit(CombatEvent::ResolveChanged { old, new, max });
        }
    }

    /// Refill resolve to maximum at the start of a turn.
    ///
    /// Always publishes a resolve change, even when nothing was spent.
    pub fn refill_resolve(&mut self) {
        let player = &mut self.state.player;
        let old = player.resolve;
        player.resolve = player.max_resolve.max(0);
        let (new, max) = (player.resolve, player.max_resolve);
        self.emit(CombatEvent::ResolveChanged { old, new, max });
    }

    /// End the combat if either side has been wiped out.
    ///
    /// Returns true if the combat is over.
    pub fn check_outcome(&mut self) -> bool {
        if self.state.is_over() {
            return true;
        }
        if self.state.player.is_dead() {
            self.end_combat(false);
        } else if self.state.all_enemies_dead() {
            self.end_combat(true);
        }
        self.state.is_over()
    }

    fn end_combat(&mut self, victory: bool) {
        if let Some(from) = self.state.finish(victory) {
            let to = self.state.phase();
            debug!(victory, turn = self.state.turn, "combat over");
            self.emit(CombatEvent::PhaseChanged { from, to });
            self.emit(CombatEvent::GameOver { victory });
            self.log(if victory { "Victory!" } else { "Defeat..." });
        }
    }

    // === Damage pipeline ===

    /// Damage of a player attack against an enemy.
    ///
    /// `base + strength + vow bonus`, then weak, then the target's
    /// vulnerability.
    #[must_use]
    pub fn player_attack_damage(&self, base: i32, target: usize) -> i32 {
        let player = &self.state.player;
        let mut damage = base + player.strength() + player.vow_bonus();
        if player.statuses.has(StatusKind::Weak) {
            damage = CombatConfig::scale(damage, self.config.weak_percent);
        }
        if self
            .state
            .enemy(target)
            .is_some_and(|e| e.statuses.has(StatusKind::Vulnerable))
        {
            damage = CombatConfig::scale(damage, self.config.vulnerable_percent);
        }
        damage.max(0)
    }

    /// Damage of an enemy attack against the player.
    ///
    /// `base + bonus + strength`, then the enemy's weakness, then the
    /// player's vulnerability.
    #[must_use]
    pub fn enemy_attack_damage(&self, actor: usize, base: i32, bonus: i32) -> i32 {
        let Some(enemy) = self.state.enemy(actor) else {
            return 0;
        };
        let mut damage = base + bonus + enemy.strength();
        if enemy.statuses.has(StatusKind::Weak) {
            damage = CombatConfig::scale(damage, self.config.weak_percent);
        }
        if self.state.player.statuses.has(StatusKind::Vulnerable) {
            damage = CombatConfig::scale(damage, self.config.vulnerable_percent);
        }
        damage.max(0)
    }

    /// Hit an enemy. Block absorbs first, then health.
    ///
    /// Announces a death, or checks for a phase promotion if the enemy
    /// survives. Returns `None` if the enemy is missing or already dead.
    pub fn damage_enemy(&mut self, index: usize, amount: i32) -> Option<DamageBreakdown> {
        let enemy = self.state.enemies.get_mut(index).filter(|e| e.is_alive())?;
        let old_block = enemy.block;
        let hit = enemy.absorb(amount);
        let (new_block, health, alive) = (enemy.block, enemy.health, enemy.is_alive());
        let name = enemy.name.clone();

        trace!(
            enemy = index,
            damage = hit.damage,
            blocked = hit.blocked,
            hp = hit.hp_damage,
            "enemy hit"
        );
        if old_block != new_block {
            self.emit(CombatEvent::EnemyBlockChanged {
                enemy: index,
                old: old_block,
                new: new_block,
            });
        }
        self.emit(CombatEvent::EnemyDamaged {
            enemy: index,
            breakdown: hit,
            health,
        });

        if alive {
            self.check_enemy_phase(index);
        } else {
            debug!(enemy = index, %name, "enemy died");
            self.emit(CombatEvent::EnemyDied { enemy: index });
            self.log(format!("{} is defeated", name));
        }
        Some(hit)
    }

    /// Lose enemy health directly, ignoring block.
    pub fn enemy_lose_health(&mut self, index: usize, amount: i32) -> i32 {
        let Some(enemy) = self.state.enemies.get_mut(index).filter(|e| e.is_alive()) else {
            return 0;
        };
        let lost = enemy.lose_health(amount);
        let (health, alive) = (enemy.health, enemy.is_alive());
        if lost == 0 {
            return 0;
        }

        self.emit(CombatEvent::EnemyDamaged {
            enemy: index,
            breakdown: DamageBreakdown {
                damage: lost,
                blocked: 0,
                hp_damage: lost,
            },
            health,
        });
        if alive {
            self.check_enemy_phase(index);
        } else {
            debug!(enemy = index, "enemy died");
            self.emit(CombatEvent::EnemyDied { enemy: index });
        }
        lost
    }

    /// Hit the player. Block absorbs first, then fortify, then health.
    pub fn damage_player(&mut self, amount: i32) -> DamageBreakdown {
        let damage = amount.max(0);
        let player = &mut self.state.player;

        let old_block = player.block;
        let from_block = damage.min(player.block);
        player.block -= from_block;

        let (from_fortify, fortify_change) = player
            .resources
            .consume(ResourceKind::Fortify, damage - from_block);
        let hp_damage = player.lose_health(damage - from_block - from_fortify);
        let (new_block, health) = (player.block, player.health);

        let breakdown = DamageBreakdown {
            damage,
            blocked: from_block + from_fortify,
            hp_damage,
        };
        trace!(damage, blocked = breakdown.blocked, hp = hp_damage, "player hit");

        if old_block != new_block {
            self.emit(CombatEvent::PlayerBlockChanged {
                old: old_block,
                new: new_block,
            });
        }
        self.emit_resource(fortify_change);
        self.emit(CombatEvent::PlayerDamaged { breakdown, health });
        breakdown
    }

    /// Player loses health directly, ignoring block and fortify.
    pub fn player_lose_health(&mut self, amount: i32) -> i32 {
        let lost = self.state.player.lose_health(amount);
        if lost > 0 {
            let health = self.state.player.health;
            self.emit(CombatEvent::PlayerDamaged {
                breakdown: DamageBreakdown {
                    damage: lost,
                    blocked: 0,
                    hp_damage: lost,
                },
                health,
            });
        }
        lost
    }

    // === Healing and block ===

    /// Restore player health. Returns the amount restored.
    pub fn heal_player(&mut self, amount: i32) -> i32 {
        let restored = self.state.player.restore_health(amount);
        if restored > 0 {
            let health = self.state.player.health;
            self.emit(CombatEvent::PlayerHealed {
                amount: restored,
                health,
            });
        }
        restored
    }

    /// Restore enemy health. Returns the amount restored.
    pub fn heal_enemy(&mut self, index: usize, amount: i32) -> i32 {
        let Some(enemy) = self.state.enemies.get_mut(index).filter(|e| e.is_alive()) else {
            return 0;
        };
        let restored = enemy.restore_health(amount);
        let health = enemy.health;
        if restored > 0 {
            self.emit(CombatEvent::EnemyHealed {
                enemy: index,
                amount: restored,
                health,
            });
        }
        restored
    }

    /// Add player block, reduced while frail. Returns the block gained.
    pub fn gain_player_block(&mut self, amount: i32) -> i32 {
        let mut amount = amount.max(0);
        if self.state.player.statuses.has(StatusKind::Frail) {
            amount = CombatConfig::scale(amount, self.config.frail_percent);
        }
        let old = self.state.player.block;
        let new = self.state.player.add_block(amount);
        if old != new {
            self.emit(CombatEvent::PlayerBlockChanged { old, new });
        }
        new - old
    }

    /// Add enemy block. Returns the block gained.
    pub fn gain_enemy_block(&mut self, index: usize, amount: i32) -> i32 {
        let Some(enemy) = self.state.enemies.get_mut(index) else {
            return 0;
        };
        let old = enemy.block;
        enemy.block += amount.max(0);
        let new = enemy.block;
        if old != new {
            self.emit(CombatEvent::EnemyBlockChanged { enemy: index, old, new });
        }
        new - old
    }

    /// Drop the player's block to zero.
    pub fn reset_player_block(&mut self) {
        let old = std::mem::take(&mut self.state.player.block);
        if old != 0 {
            self.emit(CombatEvent::PlayerBlockChanged { old, new: 0 });
        }
    }

    /// Drop an enemy's block to zero.
    pub fn reset_enemy_block(&mut self, index: usize) {
        let Some(enemy) = self.state.enemies.get_mut(index) else {
            return;
        };
        let old = std::mem::take(&mut enemy.block);
        if old != 0 {
            self.emit(CombatEvent::EnemyBlockChanged { enemy: index, old, new: 0 });
        }
    }

    // === Ledger ===

    /// Add to a player resource.
    pub fn add_resource(&mut self, kind: ResourceKind, delta: i32) -> Option<ResourceChange> {
        let change = self.state.player.resources.add(kind, delta);
        self.emit_resource(change);
        change
    }

    /// Announce a resource change, if any.
    pub fn emit_resource(&mut self, change: Option<ResourceChange>) {
        if let Some(ResourceChange { kind, old, new }) = change {
            trace!(%kind, old, new, "resource changed");
            self.emit(CombatEvent::ResourceChanged { kind, old, new });
        }
    }

    /// Apply a status to the player or an enemy.
    ///
    /// Returns the merged entry, or `None` if nothing was applied.
    pub fn apply_status(
        &mut self,
        holder: StatusHolder,
        status: StatusEffect,
    ) -> Option<StatusEffect> {
        let merged = match holder {
            StatusHolder::Player => self.state.player.statuses.apply(status),
            StatusHolder::Enemy(index) => self
                .state
                .enemies
                .get_mut(index)
                .filter(|e| e.is_alive())
                .and_then(|e| e.statuses.apply(status)),
        }?;

        self.emit(CombatEvent::StatusChanged {
            holder,
            status: merged.kind,
            amount: merged.amount,
            duration: merged.duration,
        });
        Some(merged)
    }

    /// Announce status bookkeeping results.
    pub fn emit_status_changes(&mut self, holder: StatusHolder, changes: Vec<StatusChange>) {
        for change in changes {
            let event = match change {
                StatusChange::Updated(effect) => CombatEvent::StatusChanged {
                    holder,
                    status: effect.kind,
                    amount: effect.amount,
                    duration: effect.duration,
                },
                StatusChange::Removed(kind) => CombatEvent::StatusChanged {
                    holder,
                    status: kind,
                    amount: 0,
                    duration: None,
                },
            };
            self.emit(event);
        }
    }

    /// Replace the player's vow.
    pub fn set_vow(&mut self, vow: Option<ActiveVow>) {
        self.state.player.vow = vow;
        self.emit(CombatEvent::VowChanged { vow });
    }

    // === Cards ===

    /// Draw cards, reshuffling the discard pile as needed.
    ///
    /// Returns the number of cards drawn (including overflow discards).
    pub fn draw_cards(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            let max_hand = self.config.max_hand_size;
            let Some(draw) = self.state.player.piles.draw(self.rng, max_hand) else {
                break;
            };

            if draw.reshuffled {
                let cards = self.state.player.piles.len(crate::zones::PileKind::Draw) + 1;
                trace!(cards, "reshuffled discard pile");
                self.emit(CombatEvent::DeckReshuffled { cards });
                self.log("Shuffled the discard pile into the draw pile");
            }

            trace!(
                card = %draw.card.id,
                name = draw.card.name(),
                to = %draw.destination,
                "drew card"
            );
            self.emit(CombatEvent::CardDrawn {
                card: draw.card.id,
                name: draw.card.name().to_string(),
                destination: draw.destination,
            });
            drawn += 1;
        }
        drawn
    }

    // === Enemies ===

    fn definition(&self, type_id: EnemyTypeId) -> Option<std::sync::Arc<EnemyDefinition>> {
        self.catalog.get(type_id).cloned()
    }

    /// Pick and telegraph an enemy's next intent.
    pub fn roll_intent(&mut self, index: usize) {
        let Some(enemy) = self.state.enemies.get(index).filter(|e| e.is_alive()) else {
            return;
        };
        let definition = self.catalog.get(enemy.type_id);
        let fallback = self.config.fallback_attack;
        let intent = select_intent(enemy, definition.map(|d| d.as_ref()), self.rng, fallback);

        debug!(enemy = index, intent = %intent, "intent set");
        self.state.enemies[index].intent = Some(intent.clone());
        self.emit(CombatEvent::IntentSet { enemy: index, intent });
    }

    fn check_enemy_phase(&mut self, index: usize) {
        let Some(type_id) = self.state.enemy(index).map(|e| e.type_id) else {
            return;
        };
        let Some(definition) = self.definition(type_id) else {
            return;
        };
        let Some(change) = advance_phase(&mut self.state.enemies[index], &definition) else {
            return;
        };

        debug!(enemy = index, old = change.old, new = change.new, "enemy phase advanced");
        self.emit(CombatEvent::EnemyPhaseChanged {
            enemy: index,
            old: change.old,
            new: change.new,
        });
        if let Some(phase) = definition.phases.get(change.new) {
            let line = format!("{} enters {}", definition.name, phase.name);
            self.log(line);
        }
        self.roll_intent(index);
    }

    /// Add an enemy to the roster and roll its first intent.
    ///
    /// Returns the new roster index.
    pub fn add_enemy(&mut self, definition: &EnemyDefinition) -> usize {
        self.state.enemies.push_back(Enemy::from_definition(definition));
        let index = self.state.enemies.len() - 1;

        debug!(enemy = index, type_id = %definition.id, "enemy summoned");
        self.emit(CombatEvent::EnemySummoned {
            enemy: index,
            type_id: definition.id,
        });
        self.log(format!("{} appears", definition.name));
        self.roll_intent(index);
        index
    }

    /// Summon an enemy by catalog ID.
    ///
    /// Unknown IDs skip the summon.
    pub fn summon_enemy(&mut self, type_id: EnemyTypeId) -> Option<usize> {
        let Some(definition) = self.definition(type_id) else {
            warn!(%type_id, "summon skipped: enemy type not in catalog");
            return None;
        };
        Some(self.add_enemy(&definition))
    }
}
