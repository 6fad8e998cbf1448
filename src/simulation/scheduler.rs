//! Fixed-interval vehicle spawning
//!
//! A recurring timer driven by the host's `tick`. Each time the interval
//! elapses one spawn is attempted and the timer restarts, whether or not the
//! attempt succeeded.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::config::ParkingConfig;
use super::coordinator::ParkingCoordinator;
use super::error::ParkingError;
use super::types::{Position, SpotId, VehicleId};

/// What happened on a spawn attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnOutcome {
    /// A vehicle left the pool; `spot` is `None` when none was free
    Spawned {
        vehicle: VehicleId,
        position: Position,
        spot: Option<SpotId>,
    },
    /// Preconditions failed; nothing changed
    Skipped(ParkingError),
}

pub struct SpawnScheduler {
    spawn_interval: f32,
    /// Seconds since the last attempt
    elapsed: f32,
    spawn_anchor: Position,
    /// Half-extents of the spawn rectangle on x and z
    spawn_area: Position,
    /// Optional seeded RNG for reproducible runs
    rng: Option<StdRng>,
    stopped: bool,
}

impl SpawnScheduler {
    pub fn new(spawn_interval: f32, spawn_anchor: Position, spawn_area: Position) -> Self {
        Self {
            spawn_interval,
            elapsed: 0.0,
            spawn_anchor,
            spawn_area,
            rng: None,
            stopped: false,
        }
    }

    pub fn from_config(config: &ParkingConfig) -> Self {
        let scheduler = Self::new(config.spawn_interval, config.spawn_anchor, config.spawn_area);
        match config.seed {
            Some(seed) => scheduler.with_seed(seed),
            None => scheduler,
        }
    }

    /// Use a seeded RNG for spawn positions
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Stop spawning. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        info!("Spawn scheduler stopped");
    }

    /// Corners (min, max) of the rectangle spawn positions fall in
    pub fn spawn_bounds(&self) -> (Position, Position) {
        let a = self.spawn_anchor;
        let sx = usable_extent(self.spawn_area.x);
        let sz = usable_extent(self.spawn_area.z);
        (
            Position::new(a.x - sx, a.y, a.z - sz),
            Position::new(a.x + sx, a.y, a.z + sz),
        )
    }

    /// Advance the timer; attempts a spawn once the interval has elapsed
    pub fn tick(
        &mut self,
        delta_secs: f32,
        coordinator: &mut ParkingCoordinator,
    ) -> Option<SpawnOutcome> {
        if self.stopped {
            return None;
        }

        self.elapsed += delta_secs;
        if self.elapsed < self.spawn_interval {
            return None;
        }

        self.elapsed = 0.0;
        Some(self.attempt_spawn(coordinator))
    }

    /// Try to spawn one vehicle right now
    pub fn attempt_spawn(&mut self, coordinator: &mut ParkingCoordinator) -> SpawnOutcome {
        if let Err(reason) = coordinator.check_spawn() {
            debug!("Spawn skipped: {}", reason);
            return SpawnOutcome::Skipped(reason);
        }

        let Some(vehicle) = coordinator.acquire_vehicle() else {
            debug!("Spawn skipped: pool empty");
            return SpawnOutcome::Skipped(ParkingError::PoolExhausted);
        };

        let position = self.random_spawn_position();
        let spot = coordinator.on_vehicle_spawned(vehicle, position);

        SpawnOutcome::Spawned {
            vehicle,
            position,
            spot,
        }
    }

    fn random_spawn_position(&mut self) -> Position {
        let dx = self.random_range(self.spawn_area.x);
        let dz = self.random_range(self.spawn_area.z);
        self.spawn_anchor.offset(dx, 0.0, dz)
    }

    /// Uniform value in `[-extent, extent]`, using seeded RNG if available
    fn random_range(&mut self, extent: f32) -> f32 {
        let extent = usable_extent(extent);
        match &mut self.rng {
            Some(rng) => rng.random_range(-extent..=extent),
            None => rand::rng().random_range(-extent..=extent),
        }
    }
}

/// Half-extent safe to sample from; non-finite extents collapse onto the anchor
fn usable_extent(extent: f32) -> f32 {
    if extent.is_finite() {
        extent.abs()
    } else {
        0.0
    }
}
