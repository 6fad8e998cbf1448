//! Load-time configuration for the parking simulation
//!
//! Values are read once when the world is built and never change afterwards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::types::{
    Position, SpotId, DEFAULT_DWELL_TIME, DEFAULT_MAX_CARS, DEFAULT_SPAWN_AREA,
    DEFAULT_SPAWN_INTERVAL,
};

/// Describes one parking spot: a stable id and where it is
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpotDescriptor {
    pub id: SpotId,
    #[serde(default)]
    pub name: Option<String>,
    pub position: Position,
}

impl SpotDescriptor {
    pub fn new(id: SpotId, position: Position) -> Self {
        Self {
            id,
            name: None,
            position,
        }
    }

    pub fn named(id: SpotId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: Some(name.into()),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParkingConfig {
    /// Size of the vehicle pool and the cap on active vehicles
    pub max_cars: usize,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    /// Half-extents of the spawn rectangle; `y` is ignored
    pub spawn_area: Position,
    /// Center of the spawn rectangle
    pub spawn_anchor: Position,
    /// Seconds a vehicle stays parked before it leaves
    pub dwell_time: f32,
    /// Seed for reproducible spawn positions
    pub seed: Option<u64>,
    pub spots: Vec<SpotDescriptor>,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            max_cars: DEFAULT_MAX_CARS,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            spawn_area: DEFAULT_SPAWN_AREA,
            spawn_anchor: Position::default(),
            dwell_time: DEFAULT_DWELL_TIME,
            seed: None,
            spots: Vec::new(),
        }
    }
}

impl ParkingConfig {
    /// Read and validate a RON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_ron(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate a configuration from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: ParkingConfig = ron::from_str(text).context("Failed to parse RON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            anyhow::bail!(
                "spawn_interval must be positive and finite, got {}",
                self.spawn_interval
            );
        }
        if !self.spawn_area.is_finite() || self.spawn_area.x < 0.0 || self.spawn_area.z < 0.0 {
            anyhow::bail!("spawn_area extents must be finite and not negative");
        }
        if !self.spawn_anchor.is_finite() {
            anyhow::bail!("spawn_anchor must be finite");
        }
        if !self.dwell_time.is_finite() || self.dwell_time < 0.0 {
            anyhow::bail!(
                "dwell_time must be finite and not negative, got {}",
                self.dwell_time
            );
        }

        let mut seen = HashSet::new();
        for spot in &self.spots {
            if !seen.insert(spot.id) {
                anyhow::bail!("duplicate spot id {:?}", spot.id);
            }
        }

        Ok(())
    }
}
