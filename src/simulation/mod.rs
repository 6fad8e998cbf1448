//! Standalone parking simulation module
//!
//! This module contains the parking lot logic: spot registry, vehicle pool,
//! spawn scheduler and the coordinator tying them together. Rendering,
//! navigation and UI are reached only through the traits in `collaborators`.

mod collaborators;
mod config;
mod coordinator;
mod error;
mod scheduler;
mod spot_registry;
mod stats;
mod types;
mod vehicle_pool;
mod world;

// Re-export public types for external use
#[allow(unused_imports)]
pub use collaborators::{
    AgentUpdate, DwellAgent, IndicatorRenderer, LogIndicator, LogStatsDisplay, NavigationAgent,
    StatsDisplay,
};
#[allow(unused_imports)]
pub use config::{ParkingConfig, SpotDescriptor};
#[allow(unused_imports)]
pub use coordinator::ParkingCoordinator;
#[allow(unused_imports)]
pub use error::ParkingError;
#[allow(unused_imports)]
pub use scheduler::{SpawnOutcome, SpawnScheduler};
#[allow(unused_imports)]
pub use spot_registry::{ParkingSpot, SpotRegistry};
#[allow(unused_imports)]
pub use stats::ParkingStats;
#[allow(unused_imports)]
pub use types::{
    IndicatorState, Position, SimId, SpotAssignment, SpotId, VehicleId, VehicleState,
    DEFAULT_DWELL_TIME, DEFAULT_MAX_CARS, DEFAULT_SPAWN_AREA, DEFAULT_SPAWN_INTERVAL,
};
#[allow(unused_imports)]
pub use vehicle_pool::{Vehicle, VehiclePool};
#[allow(unused_imports)]
pub use world::ParkingWorld;
