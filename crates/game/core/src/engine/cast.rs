//! Cast validation and resolution.
//!
//! A cast happens in two steps. [`Duel::begin_cast`] validates, pays the
//! cost and snapshots the target; [`Duel::resolve_cast`] (reached through
//! [`Duel::on_arrived_at_engagement_range`]) applies the hit once the caster
//! is in range. [`Duel::cast_action`] does both at once.

use super::Duel;
use crate::action::{ActorRef, CastError, CastOutcome, PendingCast, Target};
use crate::combat::counter_damage;
use crate::events::GameEvent;
use crate::spell::SpellId;
use crate::state::{NpcId, Side};

impl Duel {
    /// Casts `spell` at `side`'s currently selected target.
    pub fn request_cast(&mut self, side: Side, spell: SpellId) -> Result<PendingCast, CastError> {
        let target = self.combatant(side).selected_target();
        self.begin_cast(side, spell, target)
    }

    /// Validates and pays for a cast, leaving it pending until the caster
    /// reaches engagement range.
    ///
    /// Checks run in order: casting flag, pending cast, known action,
    /// target, resource. A resource failure also emits
    /// [`GameEvent::NoResourceForAction`]. On success the side's target
    /// selection is cleared.
    pub fn begin_cast(
        &mut self,
        side: Side,
        spell: SpellId,
        target: Option<Target>,
    ) -> Result<PendingCast, CastError> {
        let pending = self.prepare_cast(side, spell, target)?;
        self.combatant_mut(side).pending = Some(pending);
        Ok(pending)
    }

    /// Movement signal from the host: resolves `side`'s pending cast.
    ///
    /// Returns `None` when nothing is pending.
    pub fn on_arrived_at_engagement_range(&mut self, side: Side) -> Option<CastOutcome> {
        self.resolve_cast(side)
    }

    pub fn resolve_cast(&mut self, side: Side) -> Option<CastOutcome> {
        let pending = self.combatant_mut(side).pending.take()?;
        Some(self.apply_cast(side, pending))
    }

    /// Begins and immediately resolves a cast.
    pub fn cast_action(
        &mut self,
        side: Side,
        spell: SpellId,
        target: Option<Target>,
    ) -> Result<CastOutcome, CastError> {
        let pending = self.prepare_cast(side, spell, target)?;
        Ok(self.apply_cast(side, pending))
    }

    fn prepare_cast(
        &mut self,
        side: Side,
        spell: SpellId,
        target: Option<Target>,
    ) -> Result<PendingCast, CastError> {
        if !self.turns.casting_enabled(side) {
            return Err(CastError::CastingDisabled);
        }

        let caster = self.combatant(side);
        if caster.pending.is_some() {
            return Err(CastError::ActionPending);
        }
        let entry = *caster
            .actions()
            .get(spell)
            .ok_or(CastError::UnknownAction)?;

        let target = target.ok_or(CastError::NoTarget)?.resolve(side);
        let target_position = match target {
            ActorRef::Combatant(other) => self.combatant(other).position,
            ActorRef::Npc(id) => {
                let npc = self.npc(id);
                if !npc.is_alive() {
                    return Err(CastError::NoTarget);
                }
                npc.position
            }
        };

        let available = caster.ledger.resource();
        if entry.cost > available {
            let display_for = self.config.turns.no_resource_display();
            self.push_event(GameEvent::NoResourceForAction {
                side,
                spell,
                required: entry.cost,
                available,
                display_for,
            });
            return Err(CastError::InsufficientResource {
                required: entry.cost,
                available,
            });
        }

        let caster = self.combatant_mut(side);
        caster.ledger.adjust_resource(-i64::from(entry.cost));
        caster.select_target(None);

        Ok(PendingCast {
            spell,
            spell_level: entry.level,
            target,
            target_position,
            resource_spent: entry.cost,
        })
    }

    fn apply_cast(&mut self, side: Side, pending: PendingCast) -> CastOutcome {
        let damage = self
            .catalog
            .lookup(pending.spell)
            .map_or(0, |def| def.damage_at_level(pending.spell_level));

        let mut outcome = CastOutcome {
            spell: pending.spell,
            target: pending.target,
            damage_dealt: 0,
            counter_damage: 0,
            target_defeated: false,
        };

        match pending.target {
            ActorRef::Npc(id) => self.hit_npc(side, id, damage, &pending, &mut outcome),
            ActorRef::Combatant(defender) => {
                let health = self
                    .combatant_mut(defender)
                    .ledger
                    .adjust_health(-i64::from(damage));
                self.push_event(GameEvent::DamageDealt {
                    attacker: side,
                    target: pending.target,
                    amount: damage,
                    position: pending.target_position,
                });
                outcome.damage_dealt = damage;
                outcome.target_defeated = health == 0;
            }
        }

        self.turns.record_action(side);
        self.check_match_over();
        outcome
    }

    /// Counterattack, then damage, then defeat and rewards.
    fn hit_npc(
        &mut self,
        side: Side,
        id: NpcId,
        damage: u32,
        pending: &PendingCast,
        outcome: &mut CastOutcome,
    ) {
        // Target died while the caster was moving; the cost stays spent.
        if !self.npc(id).is_alive() {
            return;
        }

        let attacker_level = self.combatant(side).ledger.level();
        let npc = self.npc(id);
        let counter = counter_damage(attacker_level, npc.level, npc.melee_damage);
        self.combatant_mut(side)
            .ledger
            .adjust_health(-i64::from(counter));
        self.push_event(GameEvent::CounterAttack {
            npc: id,
            attacker: side,
            amount: counter,
        });
        outcome.counter_damage = counter;

        let respawn_delay = self.config.turns.respawn_delay();
        let defeated = self.npcs.get_mut(id).apply_damage(damage, respawn_delay);
        self.push_event(GameEvent::DamageDealt {
            attacker: side,
            target: pending.target,
            amount: damage,
            position: pending.target_position,
        });
        outcome.damage_dealt = damage;

        if defeated {
            outcome.target_defeated = true;
            let npc = self.npc(id);
            let (xp, gold) = (npc.xp_reward, npc.gold_reward);
            self.grant_rewards(side, xp, gold);
            self.push_event(GameEvent::ActorDefeated {
                actor: ActorRef::Npc(id),
            });
        }
    }
}
