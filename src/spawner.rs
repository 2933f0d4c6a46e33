//! Pipe spawning policies.
//!
//! A spawner decides *when* a pipe appears (`should_spawn`) and *where* its
//! gap sits (`make_pipe`). Two policies exist: a fixed tick interval, and an
//! interval that shrinks as the score grows.

use crate::world::{Pipe, World};
use rand::Rng;

/// Tick at which a freshly armed spawner first fires.
pub const FIRST_SPAWN_TICK: u64 = 1;

/// Spawns a pipe every `interval_ticks` ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIntervalSpawner {
    pub interval_ticks: u32,
    pub gap_h: u16,
    pub next_spawn_tick: u64,
}

impl FixedIntervalSpawner {
    pub fn new(interval_ticks: u32, gap_h: u16) -> Self {
        Self {
            interval_ticks,
            gap_h,
            next_spawn_tick: FIRST_SPAWN_TICK,
        }
    }
}

/// Spawn interval drops by one tick every `every_points` points, down to
/// `min_interval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingIntervalSpawner {
    pub start_interval: u32,
    pub min_interval: u32,
    pub every_points: u32,
    pub gap_h: u16,
    pub next_spawn_tick: u64,
}

impl ScalingIntervalSpawner {
    pub fn new(start_interval: u32, min_interval: u32, every_points: u32, gap_h: u16) -> Self {
        Self {
            start_interval,
            min_interval,
            every_points,
            gap_h,
            next_spawn_tick: FIRST_SPAWN_TICK,
        }
    }

    /// `max(min_interval, start_interval - score / every_points)`.
    pub fn current_interval(&self, score: u32) -> u32 {
        // every_points == 0 means "never speed up"
        let decrease = score.checked_div(self.every_points).unwrap_or(0);
        self.start_interval
            .saturating_sub(decrease)
            .max(self.min_interval)
    }
}

/// The active spawning policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spawner {
    Fixed(FixedIntervalSpawner),
    Scaling(ScalingIntervalSpawner),
}

impl Spawner {
    /// Re-arm the schedule for a new life.
    pub fn reset(&mut self) {
        *self.next_spawn_tick_mut() = FIRST_SPAWN_TICK;
    }

    pub fn next_spawn_tick(&self) -> u64 {
        match self {
            Self::Fixed(s) => s.next_spawn_tick,
            Self::Scaling(s) => s.next_spawn_tick,
        }
    }

    fn next_spawn_tick_mut(&mut self) -> &mut u64 {
        match self {
            Self::Fixed(s) => &mut s.next_spawn_tick,
            Self::Scaling(s) => &mut s.next_spawn_tick,
        }
    }

    pub fn gap_h(&self) -> u16 {
        match self {
            Self::Fixed(s) => s.gap_h,
            Self::Scaling(s) => s.gap_h,
        }
    }

    /// Interval that would be scheduled if a pipe spawned now.
    pub fn interval(&self, score: u32) -> u32 {
        match self {
            Self::Fixed(s) => s.interval_ticks,
            Self::Scaling(s) => s.current_interval(score),
        }
    }

    /// Returns true when a pipe is due at `tick`, and if so schedules the
    /// next one. The schedule is only touched on a positive answer.
    pub fn should_spawn(&mut self, tick: u64, world: &World) -> bool {
        if tick < self.next_spawn_tick() {
            return false;
        }
        let interval = self.interval(world.score) as u64;
        *self.next_spawn_tick_mut() = tick + interval;
        true
    }

    /// Build a pipe at the right edge with a uniformly random gap.
    ///
    /// The gap top is drawn from `0..=max(0, height - gap_h)`, so a gap as
    /// tall as the world always starts at row 0.
    pub fn make_pipe<R: Rng>(&self, world: &World, rng: &mut R) -> Pipe {
        let gap_h = self.gap_h() as i32;
        let max_top = (world.height as i32 - gap_h).max(0);
        let gap_y = rng.gen_range(0..=max_top);
        Pipe::new(world.spawn_column(), gap_y, gap_h)
    }
}
