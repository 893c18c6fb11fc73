//! Simulation struct and main tick loop

use std::time::Instant;

use crate::core::debug::TickStats;
use crate::core::{EventQueue, GameEvent, Level, Time};
use crate::ecs::World;
use crate::gameplay::{
    GameFlow, GameSession, SceneRequest, SpawnedLevel, TickContext, spawn_level, systems,
};
use crate::physics::ContactTracker;

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Name used in logs
    pub title: String,
    /// Fixed step used by [`Simulation::run`], in seconds
    pub timestep: f32,
    /// Stop `run` after this many ticks (0 for no limit)
    pub max_ticks: u64,
    /// Log tick statistics every N ticks (0 to disable)
    pub stats_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            title: String::from("Cellblock"),
            timestep: 1.0 / 60.0,
            max_ticks: 60 * 60 * 5,
            stats_interval: 600,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the fixed timestep
    pub fn with_timestep(mut self, seconds: f32) -> Self {
        self.timestep = seconds;
        self
    }

    /// Set the tick limit for `run`
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = ticks;
        self
    }

    /// Set how often stats are logged
    pub fn with_stats_interval(mut self, ticks: u64) -> Self {
        self.stats_interval = ticks;
        self
    }
}

/// Owns the world and steps gameplay one explicit tick at a time.
pub struct Simulation {
    config: SimulationConfig,
    levels: Vec<Level>,
    world: World,
    session: GameSession,
    events: EventQueue,
    contacts: ContactTracker,
    flow: Option<Box<dyn GameFlow>>,
    time: Time,
    stats: TickStats,
    spawned: Option<SpawnedLevel>,
}

impl Simulation {
    /// Create a simulation over an ordered list of levels. Nothing is
    /// spawned until [`start`](Self::start) or [`load_level`](Self::load_level).
    pub fn new(config: SimulationConfig, levels: Vec<Level>) -> Self {
        Self {
            config,
            levels,
            world: World::new(),
            session: GameSession::new(),
            events: EventQueue::new(),
            contacts: ContactTracker::new(),
            flow: None,
            time: Time::new(),
            stats: TickStats::new(),
            spawned: None,
        }
    }

    /// Attach the end-screen / scene-change collaborator
    pub fn with_flow(mut self, flow: impl GameFlow + 'static) -> Self {
        self.flow = Some(Box::new(flow));
        self
    }

    /// Load the first level.
    pub fn start(&mut self) -> bool {
        log::info!("Starting simulation: {}", self.config.title);
        self.load_level(0)
    }

    /// Replace the world with level `index`.
    ///
    /// Returns `false` (and leaves the current level running) if there is no
    /// such level.
    pub fn load_level(&mut self, index: usize) -> bool {
        let Some(level) = self.levels.get(index) else {
            log::warn!("no level at index {index} ({} loaded)", self.levels.len());
            return false;
        };

        self.world.clear();
        self.contacts.clear();
        self.events.clear();
        self.time.reset();
        self.session.begin(index);
        self.spawned = Some(spawn_level(&mut self.world, level));

        log::info!(
            "loaded level {index} \"{}\" (attempt {})",
            level.name,
            self.session.attempts()
        );
        self.events.push(GameEvent::LevelLoaded {
            index,
            name: level.name.clone(),
        });
        if let Some(flow) = self.flow.as_mut() {
            flow.scene_loaded();
        }
        true
    }

    /// Reload the current level from its description.
    pub fn restart(&mut self) -> bool {
        self.load_level(self.session.level_index())
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Events raised during the tick are readable from
    /// [`events`](Self::events) once this returns.
    pub fn tick(&mut self, dt: f32) {
        let started = Instant::now();
        self.time.advance(dt);

        {
            let mut ctx = TickContext {
                world: &mut self.world,
                session: &mut self.session,
                events: &mut self.events,
                contacts: &mut self.contacts,
                flow: self.flow.as_deref_mut().map(|flow| flow as &mut dyn GameFlow),
            };
            systems::run_tick(&mut ctx, dt);
        }

        let request = self.flow.as_mut().and_then(|flow| flow.take_scene_request());
        match request {
            Some(SceneRequest::Reload) => {
                self.restart();
            }
            Some(SceneRequest::Next) => {
                let next = self.session.level_index() + 1;
                self.load_level(next);
            }
            None => {}
        }

        self.events.swap();
        self.stats.record_tick(started.elapsed());

        let interval = self.config.stats_interval;
        if interval > 0 && self.stats.total_ticks() % interval == 0 {
            log::debug!("{}", self.stats.format_stats());
        }
    }

    /// Tick at the configured timestep until an end screen shows or the tick
    /// limit is hit. Returns the number of ticks run.
    pub fn run(&mut self) -> u64 {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `after_tick` once every tick so the
    /// caller can read events before the next swap.
    pub fn run_with(&mut self, mut after_tick: impl FnMut(&mut Self)) -> u64 {
        if self.spawned.is_none() && !self.start() {
            log::error!("nothing to run: no levels loaded");
            return 0;
        }

        let dt = self.config.timestep;
        let mut ticks = 0;
        while !self.is_finished() {
            if self.config.max_ticks > 0 && ticks >= self.config.max_ticks {
                log::info!("stopping after {ticks} ticks");
                break;
            }
            self.tick(dt);
            ticks += 1;
            after_tick(self);
        }
        ticks
    }

    /// Whether the flow is showing an end screen
    pub fn is_finished(&self) -> bool {
        self.flow.as_ref().is_some_and(|flow| flow.is_finished())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    pub fn flow(&self) -> Option<&dyn GameFlow> {
        self.flow.as_deref()
    }

    pub fn flow_mut(&mut self) -> Option<&mut (dyn GameFlow + 'static)> {
        self.flow.as_deref_mut()
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Entities of the current level, as spawned
    pub fn spawned(&self) -> Option<&SpawnedLevel> {
        self.spawned.as_ref()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::gameplay::UiFlow;

    fn empty_room() -> Level {
        let mut level = Level::new("Empty");
        level.player.position = Vec3::ZERO;
        level
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::default()
            .with_title("Test")
            .with_timestep(0.1)
            .with_max_ticks(5)
            .with_stats_interval(0);
        assert_eq!(config.title, "Test");
        assert_eq!(config.timestep, 0.1);
        assert_eq!(config.max_ticks, 5);
        assert_eq!(config.stats_interval, 0);
    }

    #[test]
    fn test_load_level_out_of_range() {
        let mut sim = Simulation::new(SimulationConfig::default(), vec![empty_room()]);
        assert!(sim.start());
        assert!(!sim.load_level(3));
        assert_eq!(sim.session().level_index(), 0);
    }

    #[test]
    fn test_load_emits_level_loaded() {
        let mut sim = Simulation::new(SimulationConfig::default(), vec![empty_room()]);
        sim.start();
        sim.tick(0.1);

        let loaded: Vec<_> = sim
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelLoaded { index: 0, .. }))
            .collect();
        assert_eq!(loaded.len(), 1);
        assert_eq!(sim.time().tick(), 1);
    }

    #[test]
    fn test_run_stops_at_tick_limit() {
        let config = SimulationConfig::default().with_max_ticks(10);
        let mut sim = Simulation::new(config, vec![empty_room()]).with_flow(UiFlow::new());
        assert_eq!(sim.run(), 10);
        assert!(!sim.is_finished());
        assert_eq!(sim.stats().total_ticks(), 10);
    }

    #[test]
    fn test_failed_next_keeps_end_screen() {
        let mut level = empty_room();
        level.player.script.waypoints = vec![Vec3::new(0.0, 0.0, -2.0)];
        level.player.script.speed = 4.0;
        level.exit = Some(crate::core::ExitSpawn {
            position: Vec3::new(0.0, 0.0, -2.0),
            radius: 1.5,
        });
        let mut sim = Simulation::new(SimulationConfig::default(), vec![level])
            .with_flow(UiFlow::new());
        sim.start();
        for _ in 0..20 {
            sim.tick(0.1);
        }
        assert!(sim.is_finished());

        sim.flow_mut().unwrap().load_next_scene();
        sim.tick(0.1);

        assert_eq!(sim.session().level_index(), 0);
        assert!(sim.is_finished());
    }

    #[test]
    fn test_successful_reload_hides_end_screen() {
        let mut sim = Simulation::new(SimulationConfig::default(), vec![empty_room()])
            .with_flow(UiFlow::new());
        sim.start();
        sim.flow_mut().unwrap().end_game();
        assert!(sim.is_finished());

        sim.flow_mut().unwrap().reload_scene();
        sim.tick(0.1);

        assert!(!sim.is_finished());
        assert_eq!(sim.session().attempts(), 2);
    }

    #[test]
    fn test_run_with_sees_every_tick() {
        let config = SimulationConfig::default().with_max_ticks(4);
        let mut sim = Simulation::new(config, vec![empty_room()]);
        let mut seen = Vec::new();

        let ticks = sim.run_with(|sim| {
            seen.push(sim.time().tick());
            sim.events_mut().drain().for_each(drop);
        });

        assert_eq!(ticks, 4);
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_run_without_levels() {
        let mut sim = Simulation::new(SimulationConfig::default(), Vec::new());
        assert_eq!(sim.run(), 0);
    }

    #[test]
    fn test_restart_counts_attempts() {
        let mut sim = Simulation::new(SimulationConfig::default(), vec![empty_room()]);
        sim.start();
        sim.restart();
        assert_eq!(sim.session().attempts(), 2);
        assert_eq!(sim.world().len(), 1);
    }
}
