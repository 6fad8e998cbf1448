//! Core types for the parking simulation
//!
//! These are standalone types that don't depend on any host engine.

use serde::Deserialize;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct SimId(pub usize);

/// A wrapper type for parking spot IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct SpotId(pub SimId);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub SimId);

impl SpotId {
    pub fn new(raw: usize) -> Self {
        Self(SimId(raw))
    }
}

impl VehicleId {
    pub fn new(raw: usize) -> Self {
        Self(SimId(raw))
    }
}

/// A 3D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn offset(&self, dx: f32, dy: f32, dz: f32) -> Position {
        Position::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Lifecycle state of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleState {
    /// Inactive, waiting in the pool
    Pooled,
    /// Spawned and looking for a spot
    Seeking,
    /// Holding a spot
    Parked,
    /// Leaving its spot on the way back to the pool
    Returning,
}

/// Semantic state of a spot's visual indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Free,
    Occupied,
}

/// A spot handed to a vehicle by the coordinator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotAssignment {
    pub spot: SpotId,
    pub position: Position,
}

/// Default number of pooled vehicles
pub const DEFAULT_MAX_CARS: usize = 10;

/// Default seconds between spawn attempts
pub const DEFAULT_SPAWN_INTERVAL: f32 = 5.0;

/// Default seconds a vehicle stays parked before leaving
pub const DEFAULT_DWELL_TIME: f32 = 20.0;

/// Default half-extents of the spawn rectangle
pub const DEFAULT_SPAWN_AREA: Position = Position {
    x: 3.0,
    y: 0.0,
    z: 2.0,
};
