//! Parking spots and their occupancy
//!
//! Only the coordinator drives occupancy changes. Vehicles never touch the
//! registry directly.

use log::{info, warn};
use ordered_float::OrderedFloat;
use std::collections::HashMap;

use super::collaborators::IndicatorRenderer;
use super::config::SpotDescriptor;
use super::error::{ParkingError, Result};
use super::types::{IndicatorState, Position, SpotId, VehicleId};

/// A single parking spot
#[derive(Debug, Clone)]
pub struct ParkingSpot {
    pub id: SpotId,
    pub name: String,
    pub position: Position,
    /// The vehicle holding this spot, if any
    occupant: Option<VehicleId>,
}

impl ParkingSpot {
    fn new(descriptor: &SpotDescriptor) -> Self {
        let name = descriptor
            .name
            .clone()
            .unwrap_or_else(|| format!("Spot {}", descriptor.id.0 .0));
        Self {
            id: descriptor.id,
            name,
            position: descriptor.position,
            occupant: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<VehicleId> {
        self.occupant
    }
}

/// The fixed set of parking spots, kept in insertion order
#[derive(Default)]
pub struct SpotRegistry {
    spots: Vec<ParkingSpot>,
    index: HashMap<SpotId, usize>,
    indicator: Option<Box<dyn IndicatorRenderer>>,
}

impl SpotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the renderer that shows spot occupancy
    pub fn with_indicator(mut self, indicator: Box<dyn IndicatorRenderer>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Replace the registry contents with the given spots, all unoccupied
    pub fn initialize(&mut self, descriptors: &[SpotDescriptor]) -> Result<()> {
        let mut spots = Vec::with_capacity(descriptors.len());
        let mut index = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if index.insert(descriptor.id, spots.len()).is_some() {
                return Err(ParkingError::DuplicateSpot(descriptor.id));
            }
            spots.push(ParkingSpot::new(descriptor));
        }

        self.spots = spots;
        self.index = index;

        let ids: Vec<SpotId> = self.spots.iter().map(|s| s.id).collect();
        for id in ids {
            self.show(id, IndicatorState::Free);
        }

        info!("Initialized {} parking spots", self.spots.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn get(&self, spot: SpotId) -> Option<&ParkingSpot> {
        self.index.get(&spot).map(|&i| &self.spots[i])
    }

    pub fn spots(&self) -> impl Iterator<Item = &ParkingSpot> {
        self.spots.iter()
    }

    pub fn occupied_count(&self) -> usize {
        self.spots.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn has_free_spot(&self) -> bool {
        self.spots.iter().any(|s| !s.is_occupied())
    }

    /// Free spot closest to `position`. Ties go to the spot inserted first.
    pub fn find_nearest_free(&self, position: Position) -> Option<SpotId> {
        self.spots
            .iter()
            .filter(|s| !s.is_occupied())
            .min_by_key(|s| OrderedFloat(s.position.distance(&position)))
            .map(|s| s.id)
    }

    /// Mark a spot as held by `vehicle`
    pub fn occupy(&mut self, spot: SpotId, vehicle: VehicleId) -> Result<()> {
        let slot = self.spot_mut(spot)?;
        if let Some(occupant) = slot.occupant {
            warn!(
                "Vehicle {:?} cannot take {}: held by vehicle {:?}",
                vehicle.0 .0, slot.name, occupant.0 .0
            );
            return Err(ParkingError::AlreadyOccupied { spot, occupant });
        }

        slot.occupant = Some(vehicle);
        info!("Vehicle {:?} took {}", vehicle.0 .0, slot.name);
        self.show(spot, IndicatorState::Occupied);
        Ok(())
    }

    /// Release a spot; returns the vehicle that held it
    pub fn free(&mut self, spot: SpotId) -> Result<VehicleId> {
        let slot = self.spot_mut(spot)?;
        let Some(vehicle) = slot.occupant.take() else {
            warn!("{} is already free", slot.name);
            return Err(ParkingError::AlreadyFree(spot));
        };

        info!("{} freed", slot.name);
        self.show(spot, IndicatorState::Free);
        Ok(vehicle)
    }

    fn spot_mut(&mut self, spot: SpotId) -> Result<&mut ParkingSpot> {
        match self.index.get(&spot) {
            Some(&i) => Ok(&mut self.spots[i]),
            None => {
                warn!("Unknown spot {:?}", spot.0 .0);
                Err(ParkingError::UnknownSpot(spot))
            }
        }
    }

    fn show(&mut self, spot: SpotId, state: IndicatorState) {
        if let Some(indicator) = &mut self.indicator {
            indicator.set_indicator_state(spot, state);
        }
    }
}
