//! The game session: owns the world, spawner, active state, RNG and the
//! input/render adapters, and drives the fixed-rate loop.

use super::pacing::{Clock, Pacer, SystemClock};
use super::state::GameState;
use crate::config::{ConfigError, GameConfig, GameMode};
use crate::io::{GameInput, KeySource, Renderer};
use crate::spawner::Spawner;
use crate::world::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;

pub struct Game<K: KeySource, R: Renderer> {
    pub world: World,
    pub spawner: Spawner,
    /// Mode chosen on the start screen; applied when play begins.
    pub mode: GameMode,
    pub config: GameConfig,
    pub state: GameState,
    pub is_running: bool,
    /// Ticks survived in the current life.
    pub tick: u64,
    /// Seeded once per session and never reseeded, so lives share one stream.
    pub rng: StdRng,
    pub keys: K,
    pub renderer: R,
}

impl<K: KeySource, R: Renderer> Game<K, R> {
    /// Build a session on the start screen. Fails if `config` is invalid.
    pub fn new(config: GameConfig, keys: K, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mode = config.mode;

        Ok(Self {
            world: World::new(config.width, config.height, config.bird_x),
            spawner: mode.spawner(),
            mode,
            state: GameState::Start,
            is_running: true,
            tick: 0,
            rng,
            keys,
            renderer,
            config,
        })
    }

    pub fn set_state(&mut self, state: GameState) {
        if state != self.state {
            log::info!("{} -> {}", self.state.name(), state.name());
        }
        self.state = state;
    }

    /// Start a fresh life: centered bird, no pipes, zero score and tick,
    /// re-armed spawner and no stale keys.
    pub fn reset_world(&mut self) {
        self.world.reset();
        self.tick = 0;
        self.spawner.reset();
        self.keys.flush();
        log::debug!("world reset ({} mode)", self.mode.name());
    }

    pub fn flap(&mut self) {
        self.world.bird.flap(self.config.flap_velocity);
    }

    pub fn stop(&mut self) {
        log::info!("quit requested in {} state", self.state.name());
        self.is_running = false;
    }

    /// One tick: input, update and render on whichever state is active at
    /// each step.
    pub fn step_once(&mut self, key: Option<char>) -> io::Result<()> {
        if let Some(key) = key {
            let state = self.state;
            state.handle_input(self, GameInput::from_key(key));
        }
        let state = self.state;
        state.update(self);
        let state = self.state;
        state.render(self)
    }

    /// Run until quit, paced by the system clock.
    pub fn run(&mut self) -> io::Result<()> {
        self.run_with_clock(&mut SystemClock)
    }

    pub fn run_with_clock<C: Clock>(&mut self, clock: &mut C) -> io::Result<()> {
        let mut pacer = Pacer::new(self.config.fps, clock.now());
        log::info!(
            "session started: {}x{} at {} fps",
            self.world.width,
            self.world.height,
            self.config.fps
        );

        while self.is_running {
            let key = self.keys.read_key()?;
            self.step_once(key)?;
            pacer.wait(clock);
        }
        Ok(())
    }
}
