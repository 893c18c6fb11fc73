//! Populating the world from a level description

use hecs::Entity;

use super::{Guard, KeyPickup, Prisoner, ScriptedWalker};
use crate::assets::AssetHandle;
use crate::core::Level;
use crate::ecs::{Barrier, ExitZone, Name, Player, Transform, World};
use crate::physics::Collider;
use crate::visual::AlertVisual;

/// Entities created for a level.
#[derive(Debug, Clone)]
pub struct SpawnedLevel {
    pub player: Entity,
    pub guards: Vec<Entity>,
    pub prisoners: Vec<Entity>,
    pub key: Option<Entity>,
    pub barriers: Vec<Entity>,
    pub exit: Option<Entity>,
}

/// Spawn everything `level` describes into `world`.
pub fn spawn_level(world: &mut World, level: &Level) -> SpawnedLevel {
    let player = world.spawn((
        Name::new("Player"),
        Player,
        Transform::from_position(level.player.position),
        Collider::solid(level.player.radius),
        ScriptedWalker::new(&level.player.script, level.player.position),
    ));

    let guards = level
        .guards
        .iter()
        .enumerate()
        .map(|(i, spawn)| {
            let visual = AlertVisual::new(
                AssetHandle::new(spawn.material.clone()),
                spawn.spotlight,
                AssetHandle::new(spawn.alert_material.clone()),
                spawn.config.alert_light_color,
            );
            world.spawn((
                Name::new(format!("Guard {}", i + 1)),
                Guard::new(spawn.config, spawn.route.clone(), spawn.position, visual),
                Transform::from_position_yaw(spawn.position, spawn.yaw_degrees),
                Collider::solid(spawn.radius),
            ))
        })
        .collect();

    let prisoners = level
        .prisoners
        .iter()
        .enumerate()
        .map(|(i, spawn)| {
            world.spawn((
                Name::new(format!("Prisoner {}", i + 1)),
                Prisoner::new(spawn.config, spawn.position),
                Transform::from_position_yaw(spawn.position, spawn.yaw_degrees),
                Collider::solid(spawn.radius),
            ))
        })
        .collect();

    let key = level.key.as_ref().map(|spawn| {
        world.spawn((
            Name::new("Key"),
            KeyPickup::new(spawn.config),
            Transform::from_position(spawn.position),
            Collider::trigger(spawn.radius),
        ))
    });

    let barriers = level
        .barriers
        .iter()
        .map(|spawn| {
            world.spawn((
                Name::new("Bars"),
                Barrier,
                Transform::from_position(spawn.position),
                Collider::solid(spawn.radius),
            ))
        })
        .collect();

    let exit = level.exit.as_ref().map(|spawn| {
        world.spawn((
            Name::new("Exit"),
            ExitZone,
            Transform::from_position(spawn.position),
            Collider::trigger(spawn.radius),
        ))
    });

    if exit.is_none() {
        log::warn!("level {:?} has no exit; prisoners cannot escape", level.name);
    }

    SpawnedLevel {
        player,
        guards,
        prisoners,
        key,
        barriers,
        exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::registry;

    #[test]
    fn test_demo_level_spawns_everything() {
        let mut world = World::new();
        let level = Level::demo();

        let spawned = spawn_level(&mut world, &level);

        assert_eq!(spawned.guards.len(), 1);
        assert_eq!(spawned.prisoners.len(), 1);
        assert_eq!(spawned.barriers.len(), 2);
        assert!(spawned.key.is_some());
        assert_eq!(registry::player(&world).map(|p| p.entity), Some(spawned.player));
        assert_eq!(registry::exit(&world), level.exit.map(|e| e.position));
        assert_eq!(
            world.get::<Name>(spawned.guards[0]).unwrap().0,
            "Guard 1".to_string()
        );
    }

    #[test]
    fn test_guard_faces_spawn_yaw() {
        let mut world = World::new();
        let mut level = Level::demo();
        level.guards[0].yaw_degrees = 90.0;

        let spawned = spawn_level(&mut world, &level);
        let forward = world.get::<Transform>(spawned.guards[0]).unwrap().forward();
        assert!((forward - glam::Vec3::NEG_X).length() < 1e-5);
    }
}
