//! Error taxonomy for the parking simulation
//!
//! None of these are fatal. Callers log them and skip the operation.

use thiserror::Error;

use super::types::{SpotId, VehicleId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    #[error("active vehicle limit of {max_cars} reached")]
    CapacityExceeded { max_cars: usize },

    #[error("no pooled vehicle available")]
    PoolExhausted,

    #[error("no free parking spot")]
    NoFreeSpot,

    #[error("spot {spot:?} is already occupied by vehicle {occupant:?}")]
    AlreadyOccupied { spot: SpotId, occupant: VehicleId },

    #[error("spot {0:?} is already free")]
    AlreadyFree(SpotId),

    #[error("vehicle {vehicle:?} holds spot {assigned:?}, not {reported:?}")]
    WrongSpot {
        vehicle: VehicleId,
        assigned: SpotId,
        reported: SpotId,
    },

    #[error("unknown spot {0:?}")]
    UnknownSpot(SpotId),

    #[error("unknown vehicle {0:?}")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {0:?} is not active")]
    VehicleNotActive(VehicleId),

    #[error("duplicate spot id {0:?}")]
    DuplicateSpot(SpotId),
}

pub type Result<T> = std::result::Result<T, ParkingError>;
