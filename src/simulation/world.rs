//! Main parking world that ties everything together
//!
//! This is the entry point for running the parking simulation from a host
//! loop: build it once, call `tick` at a regular cadence, `shutdown` to stop
//! spawning.

use anyhow::{Context, Result};
use log::{debug, info};

use super::collaborators::{DwellAgent, IndicatorRenderer, NavigationAgent, StatsDisplay};
use super::config::{ParkingConfig, SpotDescriptor};
use super::coordinator::ParkingCoordinator;
use super::scheduler::{SpawnOutcome, SpawnScheduler};
use super::spot_registry::SpotRegistry;
use super::stats::ParkingStats;
use super::types::{Position, SpotId, VehicleState};
use super::vehicle_pool::VehiclePool;

pub struct ParkingWorld {
    pub coordinator: ParkingCoordinator,
    pub scheduler: SpawnScheduler,
    /// Simulation time
    pub time: f32,
}

impl ParkingWorld {
    /// Build a world whose vehicles park for `config.dwell_time` and leave
    pub fn new(config: &ParkingConfig) -> Result<Self> {
        Self::with_collaborators(config, None, None)
    }

    /// Build a world with optional indicator and statistics display
    pub fn with_collaborators(
        config: &ParkingConfig,
        indicator: Option<Box<dyn IndicatorRenderer>>,
        display: Option<Box<dyn StatsDisplay>>,
    ) -> Result<Self> {
        config.validate()?;

        let mut registry = SpotRegistry::new();
        if let Some(indicator) = indicator {
            registry = registry.with_indicator(indicator);
        }
        registry
            .initialize(&config.spots)
            .context("Failed to initialize parking spots")?;

        let dwell_time = config.dwell_time;
        let pool = VehiclePool::with_agents(config.max_cars, |_| {
            Some(Box::new(DwellAgent::new(dwell_time)) as Box<dyn NavigationAgent>)
        });

        let mut coordinator = ParkingCoordinator::new(registry, pool);
        if let Some(display) = display {
            coordinator = coordinator.with_display(display);
        }

        Ok(Self::from_parts(coordinator, SpawnScheduler::from_config(config)))
    }

    /// Assemble a world from hand-built components
    pub fn from_parts(coordinator: ParkingCoordinator, scheduler: SpawnScheduler) -> Self {
        Self {
            coordinator,
            scheduler,
            time: 0.0,
        }
    }

    /// Create a demo lot: two facing rows of spots north of the entrance
    pub fn demo_config() -> ParkingConfig {
        let mut spots = Vec::new();
        let spacing = 4.0;
        for (row, z) in [10.0_f32, 18.0].into_iter().enumerate() {
            for col in 0..5 {
                let id = row * 5 + col;
                let x = (col as f32 - 2.0) * spacing;
                spots.push(SpotDescriptor::named(
                    SpotId::new(id),
                    format!("{}{}", if row == 0 { 'A' } else { 'B' }, col + 1),
                    Position::new(x, 0.0, z),
                ));
            }
        }

        ParkingConfig {
            spots,
            ..ParkingConfig::default()
        }
    }

    /// Main simulation tick
    pub fn tick(&mut self, delta_secs: f32) -> Option<SpawnOutcome> {
        self.time += delta_secs;

        // Departures first so their spots are available to this tick's spawn
        let departed = self.coordinator.update_vehicles(delta_secs);
        if !departed.is_empty() {
            debug!("{} vehicle(s) departed at {:.1}s", departed.len(), self.time);
        }

        self.scheduler.tick(delta_secs, &mut self.coordinator)
    }

    /// Stop spawning. Vehicles already parked stay until they depart.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
    }

    pub fn stats(&self) -> ParkingStats {
        self.coordinator.stats()
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        let stats = self.stats();
        println!("=== Parking Simulation Summary ===");
        println!("Time: {:.2}s", self.time);
        println!("{}", stats);
        println!(
            "Occupied now: {}/{}, Active vehicles: {}/{}",
            stats.occupied_now,
            stats.total_spots,
            stats.active_vehicles,
            self.coordinator.max_cars()
        );

        println!("--- Spots ---");
        for spot in self.coordinator.registry().spots() {
            println!(
                "  {} at ({:.1}, {:.1}): {}",
                spot.name,
                spot.position.x,
                spot.position.z,
                match spot.occupant() {
                    Some(vehicle) => format!("vehicle {}", vehicle.0 .0),
                    None => "free".to_string(),
                }
            );
        }

        let active: Vec<_> = self
            .coordinator
            .pool()
            .vehicles()
            .filter(|v| v.state != VehicleState::Pooled)
            .collect();
        if !active.is_empty() {
            println!("--- Active Vehicles ---");
            for vehicle in active {
                println!(
                    "  Vehicle {:?}: state={:?}, position=({:.1}, {:.1})",
                    vehicle.id.0 .0, vehicle.state, vehicle.position.x, vehicle.position.z
                );
            }
        }
    }

    /// Log the final statistics in a fixed, greppable format
    pub fn log_final_stats(&self) {
        let stats = self.stats();
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.time);
        info!("Total cars spawned: {}", stats.total_spawned);
        info!("Total cars parked: {}", stats.total_parked);
        info!("Occupied now: {}", stats.occupied_now);
        info!("Total spots: {}", stats.total_spots);
        info!(
            "Occupancy rate: {:.1}%",
            stats.occupancy_rate_percent.unwrap_or(0.0)
        );
    }
}
