//! Spot assignment and bookkeeping for the parking simulation
//!
//! The coordinator owns the spot registry and the vehicle pool. It is the
//! only place that changes occupancy, and it refreshes the statistics
//! display after every spawn, park, free and return.

use log::{debug, info, warn};

use super::collaborators::{AgentUpdate, StatsDisplay};
use super::error::{ParkingError, Result};
use super::spot_registry::SpotRegistry;
use super::stats::ParkingStats;
use super::types::{Position, SpotAssignment, SpotId, VehicleId, VehicleState};
use super::vehicle_pool::VehiclePool;

pub struct ParkingCoordinator {
    registry: SpotRegistry,
    pool: VehiclePool,
    /// Cap on simultaneously active vehicles
    max_cars: usize,
    total_spawned: u64,
    total_parked: u64,
    display: Option<Box<dyn StatsDisplay>>,
}

impl ParkingCoordinator {
    pub fn new(registry: SpotRegistry, pool: VehiclePool) -> Self {
        let max_cars = pool.capacity();
        Self {
            registry,
            pool,
            max_cars,
            total_spawned: 0,
            total_parked: 0,
            display: None,
        }
    }

    /// Attach the display that receives the statistics block
    pub fn with_display(mut self, display: Box<dyn StatsDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn registry(&self) -> &SpotRegistry {
        &self.registry
    }

    pub fn pool(&self) -> &VehiclePool {
        &self.pool
    }

    pub fn max_cars(&self) -> usize {
        self.max_cars
    }

    /// Check every precondition of a spawn attempt
    pub fn check_spawn(&self) -> Result<()> {
        if self.pool.active_count() >= self.max_cars {
            return Err(ParkingError::CapacityExceeded {
                max_cars: self.max_cars,
            });
        }
        if self.pool.available() == 0 {
            return Err(ParkingError::PoolExhausted);
        }
        if !self.registry.has_free_spot() {
            return Err(ParkingError::NoFreeSpot);
        }
        Ok(())
    }

    /// Take a vehicle out of the pool
    pub fn acquire_vehicle(&mut self) -> Option<VehicleId> {
        self.pool.acquire()
    }

    /// Place a freshly acquired vehicle and give it the nearest free spot
    ///
    /// Returns the assigned spot. `None` leaves the vehicle seeking.
    pub fn on_vehicle_spawned(&mut self, id: VehicleId, position: Position) -> Option<SpotId> {
        let Some(vehicle) = self.pool.get_mut(id) else {
            warn!("Spawn reported for unknown vehicle {:?}", id.0 .0);
            return None;
        };
        if !vehicle.is_active() {
            warn!("Spawn reported for pooled vehicle {:?}", id.0 .0);
            return None;
        }

        vehicle.position = position;
        vehicle.state = VehicleState::Seeking;
        if let Some(agent) = &mut vehicle.agent {
            agent.initialize(id, position);
        }

        self.total_spawned += 1;
        info!(
            "Spawned vehicle {:?} (#{}) at ({:.1}, {:.1})",
            id.0 .0, self.total_spawned, position.x, position.z
        );

        let assignment = self.assign_nearest_spot(id, position);

        if let Some(agent) = self.pool.get_mut(id).and_then(|v| v.agent.as_mut()) {
            agent.seek_assigned_spot(assignment);
        }

        self.refresh();
        assignment.map(|a| a.spot)
    }

    fn assign_nearest_spot(&mut self, id: VehicleId, position: Position) -> Option<SpotAssignment> {
        let Some(spot) = self.registry.find_nearest_free(position) else {
            debug!("No free spot for vehicle {:?}, left seeking", id.0 .0);
            return None;
        };

        if let Err(e) = self.registry.occupy(spot, id) {
            warn!("Could not assign spot to vehicle {:?}: {}", id.0 .0, e);
            return None;
        }

        self.total_parked += 1;
        let spot_position = self.registry.get(spot).map(|s| s.position)?;

        if let Some(vehicle) = self.pool.get_mut(id) {
            vehicle.state = VehicleState::Parked;
            vehicle.spot = Some(spot);
        }

        Some(SpotAssignment {
            spot,
            position: spot_position,
        })
    }

    /// Vehicle leaves `spot`: free the spot, then return the vehicle to the pool
    pub fn on_vehicle_departed(&mut self, id: VehicleId, spot: SpotId) -> Result<()> {
        let vehicle = self.pool.get(id).ok_or(ParkingError::UnknownVehicle(id))?;
        if !vehicle.is_active() {
            warn!("Departure reported for pooled vehicle {:?}", id.0 .0);
            return Err(ParkingError::VehicleNotActive(id));
        }

        // A vehicle can only leave the spot it was given
        if let Some(assigned) = vehicle.spot {
            if assigned != spot {
                warn!(
                    "Vehicle {:?} reported leaving spot {:?} but holds spot {:?}",
                    id.0 .0, spot.0 .0, assigned.0 .0
                );
                return Err(ParkingError::WrongSpot {
                    vehicle: id,
                    assigned,
                    reported: spot,
                });
            }
        }

        // Never evict a different vehicle
        if let Some(occupant) = self.registry.get(spot).and_then(|s| s.occupant()) {
            if occupant != id {
                warn!(
                    "Vehicle {:?} cannot leave spot {:?} held by vehicle {:?}",
                    id.0 .0, spot.0 .0, occupant.0 .0
                );
                return Err(ParkingError::AlreadyOccupied { spot, occupant });
            }
        }

        if let Some(vehicle) = self.pool.get_mut(id) {
            vehicle.state = VehicleState::Returning;
        }

        match self.registry.free(spot) {
            Ok(_) => self.refresh(),
            Err(e) => debug!("Free skipped: {}", e),
        }

        self.pool.release(id)?;
        self.refresh();
        Ok(())
    }

    /// Depart using whatever spot the vehicle was assigned, if any
    pub fn depart_vehicle(&mut self, id: VehicleId) -> Result<()> {
        let vehicle = self.pool.get(id).ok_or(ParkingError::UnknownVehicle(id))?;
        match vehicle.spot {
            Some(spot) => self.on_vehicle_departed(id, spot),
            None => {
                self.pool.release(id)?;
                self.refresh();
                Ok(())
            }
        }
    }

    /// Advance every active vehicle's agent and process departures
    ///
    /// Returns the vehicles that went back to the pool.
    pub fn update_vehicles(&mut self, delta_secs: f32) -> Vec<VehicleId> {
        let departing: Vec<VehicleId> = self
            .pool
            .active_vehicles_mut()
            .filter_map(|vehicle| {
                let agent = vehicle.agent.as_mut()?;
                match agent.update(delta_secs) {
                    AgentUpdate::Continue => None,
                    AgentUpdate::Depart => Some(vehicle.id),
                }
            })
            .collect();

        let mut departed = Vec::with_capacity(departing.len());
        for id in departing {
            match self.depart_vehicle(id) {
                Ok(()) => departed.push(id),
                Err(e) => warn!("Departure of vehicle {:?} failed: {}", id.0 .0, e),
            }
        }
        departed
    }

    /// Statistics computed fresh from the current state
    pub fn stats(&self) -> ParkingStats {
        ParkingStats::compute(
            self.registry.len(),
            self.total_spawned,
            self.total_parked,
            self.registry.occupied_count(),
            self.pool.active_count(),
        )
    }

    fn refresh(&mut self) {
        let stats = self.stats();
        debug!(
            "Stats refresh: spawned={}, parked={}, occupied_now={}",
            stats.total_spawned, stats.total_parked, stats.occupied_now
        );
        if let Some(display) = &mut self.display {
            display.render(&stats.to_string());
        }
    }
}
