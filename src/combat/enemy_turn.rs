//! The enemy action phase.
//!
//! Enemies act in roster order. Each living enemy drops its block and
//! shroud, takes poison, resolves its telegraphed intent, counts down its
//! statuses and rolls its next intent. Enemies summoned during the phase
//! wait for the next one. The phase stops as soon as the combat is decided.

use tracing::{debug, warn};

use crate::effects::{most_damaged_ally, random_ally, EffectContext};
use crate::enemies::{Intent, IntentKind};
use crate::events::StatusHolder;
use crate::ledger::{StatusEffect, StatusKind};

/// Run every enemy's turn.
pub(crate) fn run_enemy_phase(ctx: &mut EffectContext<'_>) {
    let roster = ctx.state.enemies.len();

    for index in 0..roster {
        if !ctx.state.enemies[index].is_alive() {
            continue;
        }
        take_turn(ctx, index);
        if ctx.check_outcome() {
            debug!(enemy = index, "enemy phase cut short");
            return;
        }
        ctx.roll_intent(index);
    }
}

fn take_turn(ctx: &mut EffectContext<'_>, index: usize) {
    ctx.reset_enemy_block(index);
    ctx.state.enemies[index].untargetable = false;

    tick_counters(ctx, index);
    if !ctx.state.enemies[index].is_alive() {
        return;
    }

    let intent = ctx.state.enemies[index].intent.take();
    if let Some(intent) = intent {
        resolve_intent(ctx, index, &intent);
        if intent.once_per_combat {
            ctx.state.enemies[index].record_move(intent.move_id);
        }
    }

    let changes = ctx.state.enemies[index].statuses.expire_durations();
    ctx.emit_status_changes(StatusHolder::Enemy(index), changes);
}

fn tick_counters(ctx: &mut EffectContext<'_>, index: usize) {
    let holder = StatusHolder::Enemy(index);

    let poison = ctx.state.enemies[index].statuses.tick_counter(StatusKind::Poison);
    if let Some((amount, change)) = poison {
        ctx.emit_status_changes(holder, vec![change]);
        let lost = ctx.enemy_lose_health(index, amount);
        let name = ctx.state.enemies[index].name.clone();
        ctx.log(format!("{} takes {} poison damage", name, lost));
    }

    if let Some((amount, change)) = ctx.state.enemies[index]
        .statuses
        .tick_counter(StatusKind::Regeneration)
    {
        ctx.emit_status_changes(holder, vec![change]);
        ctx.heal_enemy(index, amount);
    }
}

/// Resolve one enemy's intent.
fn resolve_intent(ctx: &mut EffectContext<'_>, index: usize, intent: &Intent) {
    let name = ctx.state.enemies[index].name.clone();
    debug!(enemy = index, intent = %intent, "resolving intent");

    match &intent.kind {
        IntentKind::Attack { damage, lifesteal } => {
            let bonus = std::mem::take(&mut ctx.state.enemies[index].bonus_damage);
            let amount = ctx.enemy_attack_damage(index, *damage, bonus);
            let hit = ctx.damage_player(amount);
            ctx.log(format!("{} attacks for {} ({} blocked)", name, hit.damage, hit.blocked));
            if *lifesteal && hit.hp_damage > 0 {
                let healed = ctx.heal_enemy(index, hit.hp_damage);
                ctx.log(format!("{} drains {} health", name, healed));
            }
        }

        IntentKind::MultiAttack { damage, hits } => {
            let bonus = std::mem::take(&mut ctx.state.enemies[index].bonus_damage);
            let mut landed = 0;
            for _ in 0..*hits {
                if ctx.state.player.is_dead() {
                    break;
                }
                let amount = ctx.enemy_attack_damage(index, *damage, bonus);
                ctx.damage_player(amount);
                landed += 1;
            }
            ctx.log(format!("{} strikes {} times", name, landed));
        }

        IntentKind::Defend { block } => {
            let gained = ctx.gain_enemy_block(index, *block);
            ctx.log(format!("{} gains {} block", name, gained));
        }

        IntentKind::Buff => {
            ctx.state.enemies[index].untargetable = true;
            ctx.log(format!("{} fades from view", name));
        }

        IntentKind::BuffAlly { bonus } => match random_ally(ctx.state, index, ctx.rng) {
            Some(ally) => {
                ctx.state.enemies[ally].bonus_damage += bonus;
                let ally_name = ctx.state.enemies[ally].name.clone();
                ctx.log(format!("{} empowers {} (+{} damage)", name, ally_name, bonus));
            }
            None => ctx.log(format!("{} has no ally to empower", name)),
        },

        IntentKind::Debuff {
            status,
            amount,
            duration,
        } => {
            let effect = StatusEffect::new(*status, *amount, *duration);
            if ctx.apply_status(StatusHolder::Player, effect).is_some() {
                ctx.log(format!("{} inflicts {} {}", name, amount, status));
            }
        }

        IntentKind::Heal { amount, self_damage } => {
            let target = most_damaged_ally(ctx.state, index);
            let healed = ctx.heal_enemy(target, *amount);
            let target_name = ctx.state.enemies[target].name.clone();
            ctx.log(format!("{} heals {} for {}", name, target_name, healed));
            if *self_damage > 0 {
                let lost = ctx.enemy_lose_health(index, *self_damage);
                ctx.log(format!("{} sacrifices {} health", name, lost));
            }
        }

        IntentKind::Summon { enemies } => {
            for &type_id in enemies {
                ctx.summon_enemy(type_id);
            }
        }

        IntentKind::Unrecognized => {
            warn!(enemy = index, "skipping unrecognized intent");
        }
    }
}
