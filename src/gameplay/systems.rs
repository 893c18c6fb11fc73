//! Per-tick gameplay systems
//!
//! Order within a tick: key spin, guard decisions, prisoner decisions,
//! movement, then contact handling. Decisions read positions from the end of
//! the previous tick.

use hecs::Entity;

use super::registry::{self, Role};
use super::{
    GameFlow, GameSession, Guard, GuardShift, KeyPickup, Outlook, Prisoner, ScriptedWalker,
    collect_key,
};
use crate::core::{DestroyCause, EventQueue, GameEvent};
use crate::ecs::{Transform, World};
use crate::physics::{Contact, ContactTracker};

/// Everything a tick needs, borrowed from the simulation.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub session: &'a mut GameSession,
    pub events: &'a mut EventQueue,
    pub contacts: &'a mut ContactTracker,
    pub flow: Option<&'a mut dyn GameFlow>,
}

/// Advance all gameplay by `dt` seconds.
pub fn run_tick(ctx: &mut TickContext<'_>, dt: f32) {
    spin_keys(ctx.world, dt);
    update_guards(ctx.world, ctx.session, ctx.events, dt);
    update_prisoners(ctx.world, ctx.session, ctx.events, dt);
    step_movement(ctx.world, dt);

    let contacts = ctx.contacts.detect(ctx.world);
    for contact in contacts {
        match contact {
            Contact::Collision { a, b } => {
                on_collision(ctx, a, b);
                on_collision(ctx, b, a);
            }
            Contact::TriggerEnter { trigger, other } => on_trigger(ctx, trigger, other),
        }
    }
}

pub fn spin_keys(world: &mut World, dt: f32) {
    for (_, (key, transform)) in world.query_mut::<(&KeyPickup, &mut Transform)>() {
        key.spin(transform, dt);
    }
}

pub fn update_guards(world: &mut World, session: &GameSession, events: &mut EventQueue, dt: f32) {
    let player = registry::player(world);
    let prisoners = registry::prisoners(world);

    for (entity, (guard, transform)) in world.query_mut::<(&mut Guard, &Transform)>() {
        let outlook = Outlook {
            delta_time: dt,
            position: transform.position,
            forward: transform.forward(),
            key_collected: session.key_collected(),
            player,
            prisoners: prisoners.clone(),
        };
        if let Some(shift) = guard.update(outlook) {
            report_shift(events, entity, shift);
        }
    }
}

pub fn update_prisoners(
    world: &mut World,
    session: &GameSession,
    events: &mut EventQueue,
    dt: f32,
) {
    let player = registry::player(world).map(|p| p.position);
    let exit = registry::exit(world);

    for (entity, (prisoner, transform)) in world.query_mut::<(&mut Prisoner, &mut Transform)>() {
        if prisoner.update(transform, session.key_collected(), player, exit, dt) {
            log::info!("prisoner {entity:?} is making a run for it");
            events.push(GameEvent::PrisonerEscaping { prisoner: entity });
        }
    }
}

pub fn step_movement(world: &mut World, dt: f32) {
    for (_, (walker, transform)) in world.query_mut::<(&mut ScriptedWalker, &mut Transform)>() {
        walker.update(transform, dt);
    }
    for (_, (guard, transform)) in world.query_mut::<(&mut Guard, &mut Transform)>() {
        guard.step_movement(transform, dt);
    }
    for (_, (prisoner, transform)) in world.query_mut::<(&mut Prisoner, &mut Transform)>() {
        prisoner.step_movement(transform, dt);
    }
}

fn report_shift(events: &mut EventQueue, guard: Entity, shift: GuardShift) {
    match shift {
        GuardShift::Alerted { target } => {
            log::info!("guard {guard:?} spotted {target:?}");
            events.push(GameEvent::GuardAlerted { guard, target });
        }
        GuardShift::StoodDown => {
            log::info!("guard {guard:?} returning to patrol");
            events.push(GameEvent::GuardStoodDown { guard });
        }
    }
}

fn destroy(ctx: &mut TickContext<'_>, entity: Entity, cause: DestroyCause) {
    if ctx.world.despawn(entity).is_ok() {
        log::debug!("{entity:?} destroyed ({cause:?})");
        ctx.events.push(GameEvent::EntityDestroyed { entity, cause });
    }
}

/// Solid contact, seen from `subject`'s side.
fn on_collision(ctx: &mut TickContext<'_>, subject: Entity, other: Entity) {
    if registry::role(ctx.world, subject) != Role::Guard {
        return;
    }

    match registry::role(ctx.world, other) {
        Role::Player => {
            ctx.events.push(GameEvent::GameOver { guard: subject });
            match ctx.flow.as_deref_mut() {
                Some(flow) => flow.end_game(),
                None => log::error!("player caught but no game flow is attached"),
            }
        }
        Role::Prisoner => {
            destroy(ctx, other, DestroyCause::Caught);
            let shift = ctx
                .world
                .get_mut::<Guard>(subject)
                .ok()
                .and_then(|mut guard| guard.stand_down());
            if let Some(shift) = shift {
                report_shift(ctx.events, subject, shift);
            }
        }
        _ => {}
    }
}

fn on_trigger(ctx: &mut TickContext<'_>, trigger: Entity, other: Entity) {
    match (registry::role(ctx.world, trigger), registry::role(ctx.world, other)) {
        (Role::Exit, Role::Guard | Role::Prisoner) => {
            destroy(ctx, other, DestroyCause::ReachedExit);
        }
        (Role::Exit, Role::Player) => {
            ctx.events.push(GameEvent::LevelCompleted);
            match ctx.flow.as_deref_mut() {
                Some(flow) => flow.complete_level(),
                None => log::error!("level completed but no game flow is attached"),
            }
        }
        (Role::Key, Role::Player) => {
            if let Some(collected) = collect_key(ctx.world, ctx.session, trigger) {
                ctx.events.push(GameEvent::EntityDestroyed {
                    entity: trigger,
                    cause: DestroyCause::Unlocked,
                });
                for &barrier in &collected.barriers {
                    ctx.events.push(GameEvent::EntityDestroyed {
                        entity: barrier,
                        cause: DestroyCause::Unlocked,
                    });
                }
                ctx.events.push(GameEvent::KeyCollected {
                    barriers_removed: collected.barriers.len(),
                });
            }
        }
        _ => {}
    }
}
