//! Fixed-size pool of reusable vehicles
//!
//! Vehicles are created once and never destroyed. Every vehicle is either
//! queued in the pool or active, so `available() + active_count()` always
//! equals `capacity()`.

use log::{info, warn};
use std::collections::VecDeque;

use super::collaborators::NavigationAgent;
use super::error::{ParkingError, Result};
use super::types::{Position, SimId, SpotId, VehicleId, VehicleState};

/// A pooled vehicle
#[derive(Debug)]
pub struct Vehicle {
    pub id: VehicleId,
    pub state: VehicleState,
    pub position: Position,
    /// Spot the coordinator handed to this vehicle
    pub spot: Option<SpotId>,
    /// Optional movement behavior; the vehicle works without one
    pub agent: Option<Box<dyn NavigationAgent>>,
}

impl Vehicle {
    pub fn new(id: VehicleId, agent: Option<Box<dyn NavigationAgent>>) -> Self {
        Self {
            id,
            state: VehicleState::Pooled,
            position: Position::default(),
            spot: None,
            agent,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != VehicleState::Pooled
    }
}

#[derive(Debug, Default)]
pub struct VehiclePool {
    /// Every vehicle, indexed by its id
    vehicles: Vec<Vehicle>,
    /// Vehicles waiting to be spawned, front is next
    queue: VecDeque<VehicleId>,
}

impl VehiclePool {
    /// Pre-create `capacity` vehicles without agents
    pub fn new(capacity: usize) -> Self {
        Self::with_agents(capacity, |_| None)
    }

    /// Pre-create `capacity` vehicles, asking `factory` for each one's agent
    pub fn with_agents<F>(capacity: usize, mut factory: F) -> Self
    where
        F: FnMut(VehicleId) -> Option<Box<dyn NavigationAgent>>,
    {
        let mut vehicles = Vec::with_capacity(capacity);
        let mut queue = VecDeque::with_capacity(capacity);

        for i in 0..capacity {
            let id = VehicleId(SimId(i));
            vehicles.push(Vehicle::new(id, factory(id)));
            queue.push_back(id);
        }

        info!("Created a pool of {} vehicles", capacity);
        Self { vehicles, queue }
    }

    pub fn capacity(&self) -> usize {
        self.vehicles.len()
    }

    pub fn available(&self) -> usize {
        self.queue.len()
    }

    pub fn active_count(&self) -> usize {
        self.vehicles.len() - self.queue.len()
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.0 .0)
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.0 .0)
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn active_vehicles_mut(&mut self) -> impl Iterator<Item = &mut Vehicle> {
        self.vehicles.iter_mut().filter(|v| v.is_active())
    }

    /// Take the vehicle that has waited longest
    pub fn acquire(&mut self) -> Option<VehicleId> {
        let id = self.queue.pop_front()?;
        if let Some(vehicle) = self.vehicles.get_mut(id.0 .0) {
            vehicle.state = VehicleState::Seeking;
        }
        Some(id)
    }

    /// Deactivate a vehicle, reset it and queue it at the back
    pub fn release(&mut self, id: VehicleId) -> Result<()> {
        let vehicle = self
            .vehicles
            .get_mut(id.0 .0)
            .ok_or(ParkingError::UnknownVehicle(id))?;

        if !vehicle.is_active() {
            warn!("Vehicle {:?} is already in the pool", id.0 .0);
            return Err(ParkingError::VehicleNotActive(id));
        }

        vehicle.state = VehicleState::Pooled;
        vehicle.spot = None;
        if let Some(agent) = &mut vehicle.agent {
            agent.reset();
        }

        self.queue.push_back(id);
        info!("Vehicle {:?} returned to the pool", id.0 .0);
        Ok(())
    }
}
