//! Effect interpretation - applying card effects to combat state.
//!
//! `EffectInterpreter` applies one atomic effect at a time through an
//! `EffectContext` and returns a log fragment describing what happened.
//! Application is synchronous and all-or-nothing; unrecognized effects
//! produce no fragment and change nothing.

use tracing::{trace, warn};

use super::context::EffectContext;
use super::effect::{Effect, WhimsyOutcome};
use super::targeting::StatusTarget;
use crate::core::player::Minion;
use crate::events::{CombatEvent, StatusHolder};
use crate::ledger::{ActiveVow, ResourceKind, StatusEffect, VowRestriction};
use crate::zones::PileKind;

/// Applies effects to combat state.
pub struct EffectInterpreter;

impl EffectInterpreter {
    /// Apply effects in order, logging each fragment.
    ///
    /// Stops early if the player falls. A card that kills the last enemy
    /// still resolves the rest of its effects.
    pub fn apply_all(ctx: &mut EffectContext<'_>, effects: &[Effect], target: Option<usize>) {
        for effect in effects {
            if let Some(line) = Self::apply(ctx, effect, target) {
                ctx.log(line);
            }
            if ctx.state.player.is_dead() {
                break;
            }
        }
    }

    /// Apply one effect against an optional target enemy.
    pub fn apply(
        ctx: &mut EffectContext<'_>,
        effect: &Effect,
        target: Option<usize>,
    ) -> Option<String> {
        trace!(?effect, ?target, "applying effect");

        match effect {
            Effect::Damage { amount } => {
                let target = Self::living_target(ctx, target)?;
                let empower = Self::take_empower(ctx);
                let damage = ctx.player_attack_damage(amount + empower, target);
                let hit = ctx.damage_enemy(target, damage)?;
                Some(format!("Dealt {} damage to {}", hit.hp_damage, Self::enemy_name(ctx, target)))
            }

            Effect::DamageAll { amount } => {
                let targets = ctx.state.targetable_enemies();
                if targets.is_empty() {
                    return None;
                }
                let empower = Self::take_empower(ctx);
                let mut total = 0;
                for index in targets {
                    let damage = ctx.player_attack_damage(amount + empower, index);
                    if let Some(hit) = ctx.damage_enemy(index, damage) {
                        total += hit.hp_damage;
                    }
                }
                Some(format!("Dealt {} damage across all enemies", total))
            }

            Effect::MultiHit { amount, hits } => {
                let target = Self::living_target(ctx, target)?;
                let empower = Self::take_empower(ctx);
                let mut landed = 0;
                let mut total = 0;
                for _ in 0..*hits {
                    let damage = ctx.player_attack_damage(amount + empower, target);
                    let Some(hit) = ctx.damage_enemy(target, damage) else {
                        break;
                    };
                    landed += 1;
                    total += hit.hp_damage;
                }
                Some(format!(
                    "Hit {} {} times for {} damage",
                    Self::enemy_name(ctx, target),
                    landed,
                    total
                ))
            }

            Effect::Block { amount } => Some(Self::block(ctx, *amount)),

            Effect::Heal { amount } => {
                let forbidden = ctx
                    .state
                    .player
                    .vow
                    .is_some_and(|v| v.forbids(VowRestriction::NoHealing));
                let restored = if forbidden { 0 } else { ctx.heal_player(*amount) };
                // Devotion is earned by the attempt, not the result
                ctx.add_resource(ResourceKind::Devotion, 1);
                Some(format!("Healed {} health", restored))
            }

            Effect::LoseHealth { amount } => {
                let lost = ctx.player_lose_health(*amount);
                Some(format!("Lost {} health", lost))
            }

            Effect::Draw { count } => {
                let drawn = ctx.draw_cards(*count);
                Some(format!("Drew {} cards", drawn))
            }

            Effect::GainResolve { amount } => {
                let before = ctx.state.player.resolve;
                ctx.set_resolve(before + amount);
                let delta = ctx.state.player.resolve - before;
                if delta < 0 {
                    Some(format!("Lost {} resolve", -delta))
                } else {
                    Some(format!("Gained {} resolve", delta))
                }
            }

            Effect::GainResource { resource, amount } => {
                let change = ctx.add_resource(*resource, *amount)?;
                Some(format!("{} is now {}", resource, change.new))
            }

            Effect::ApplyStatus {
                target: recipient,
                status,
                amount,
                duration,
            } => {
                let effect = StatusEffect::new(*status, *amount, *duration);
                match recipient {
                    StatusTarget::Player => {
                        ctx.apply_status(StatusHolder::Player, effect)?;
                        Some(format!("Gained {} {}", amount, status))
                    }
                    StatusTarget::Target => {
                        let target = Self::living_target(ctx, target)?;
                        ctx.apply_status(StatusHolder::Enemy(target), effect)?;
                        let name = Self::enemy_name(ctx, target);
                        Some(format!("Applied {} {} to {}", amount, status, name))
                    }
                    StatusTarget::AllEnemies => {
                        let mut applied = 0;
                        for index in ctx.state.living_enemies() {
                            if ctx.apply_status(StatusHolder::Enemy(index), effect).is_some() {
                                applied += 1;
                            }
                        }
                        (applied > 0)
                            .then(|| format!("Applied {} {} to all enemies", amount, status))
                    }
                }
            }

            Effect::DamagePerResource { resource, per, consume } => {
                let target = Self::living_target(ctx, target)?;
                let stacks = Self::spend(ctx, *resource, *consume);
                let empower = Self::take_empower(ctx);
                let damage = ctx.player_attack_damage(stacks * per + empower, target);
                let hit = ctx.damage_enemy(target, damage)?;
                Some(format!(
                    "Channelled {} {} into {} damage",
                    stacks, resource, hit.hp_damage
                ))
            }

            Effect::BlockPerResource { resource, per, consume } => {
                let stacks = Self::spend(ctx, *resource, *consume);
                Some(Self::block(ctx, stacks * per))
            }

            Effect::Whimsy { outcomes } => Self::whimsy(ctx, outcomes, target),

            Effect::TakeVow {
                bonus,
                restriction,
                turns,
            } => {
                ctx.set_vow(Some(ActiveVow::new(*bonus, *restriction, *turns)));
                Some(format!("Swore a vow: +{} damage, {} for {} turns", bonus, restriction, turns))
            }

            Effect::SummonMinion { attack } => {
                if ctx.state.player.minions.len() >= ctx.config.max_minions {
                    return Some("No room for another minion".to_string());
                }
                ctx.state.player.minions.push_back(Minion { attack: *attack });
                let count = ctx.state.player.minions.len();
                ctx.emit(CombatEvent::MinionSummoned {
                    attack: *attack,
                    count,
                });
                Some(format!("Summoned a minion with {} attack", attack))
            }

            Effect::Fracture { pile, count } => Some(Self::fracture(ctx, *pile, *count)),

            Effect::Unrecognized => {
                warn!("skipping unrecognized effect");
                None
            }
        }
    }

    fn living_target(ctx: &EffectContext<'_>, target: Option<usize>) -> Option<usize> {
        target.filter(|&i| ctx.state.enemy(i).is_some_and(|e| e.is_alive()))
    }

    fn enemy_name(ctx: &EffectContext<'_>, index: usize) -> String {
        ctx.state
            .enemy(index)
            .map_or_else(|| "nobody".to_string(), |e| e.name.clone())
    }

    fn take_empower(ctx: &mut EffectContext<'_>) -> i32 {
        let (taken, change) = ctx.state.player.resources.take_all(ResourceKind::Empower);
        ctx.emit_resource(change);
        taken
    }

    fn spend(ctx: &mut EffectContext<'_>, resource: ResourceKind, consume: bool) -> i32 {
        if consume {
            let (taken, change) = ctx.state.player.resources.take_all(resource);
            ctx.emit_resource(change);
            taken
        } else {
            ctx.state.player.resources.get(resource)
        }
    }

    fn block(ctx: &mut EffectContext<'_>, amount: i32) -> String {
        let forbidden = ctx
            .state
            .player
            .vow
            .is_some_and(|v| v.forbids(VowRestriction::NoBlock));
        if forbidden {
            return "The vow forbids block".to_string();
        }
        let gained = ctx.gain_player_block(amount);
        format!("Gained {} block", gained)
    }

    fn whimsy(
        ctx: &mut EffectContext<'_>,
        outcomes: &[WhimsyOutcome],
        target: Option<usize>,
    ) -> Option<String> {
        let luck = ctx.state.player.resources.get(ResourceKind::Luck);
        let weights: Vec<u32> = outcomes.iter().map(|o| o.weight_with_luck(luck)).collect();
        let chosen = ctx.rng.roll_weighted(&weights)?;
        let outcome = &outcomes[chosen];

        let mut fragments = Vec::new();
        for effect in &outcome.effects {
            if let Some(line) = Self::apply(ctx, effect, target) {
                fragments.push(line);
            }
        }

        let lucky = if outcome.lucky { " (lucky!)" } else { "" };
        Some(format!("Whimsy{}: {}", lucky, fragments.join(", ")))
    }

    fn fracture(ctx: &mut EffectContext<'_>, pile: PileKind, count: usize) -> String {
        let mut removed = Vec::new();
        for _ in 0..count {
            let Some(card) = ctx.state.player.piles.remove_random(pile, ctx.rng) else {
                break;
            };
            ctx.emit(CombatEvent::CardFractured { card: card.id, from: pile });
            removed.push(card.name().to_string());
        }

        if removed.is_empty() {
            format!("Nothing in the {} to fracture", pile)
        } else {
            format!("Fractured {} from the {}", removed.join(", "), pile)
        }
    }
}
