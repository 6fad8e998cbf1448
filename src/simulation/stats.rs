//! Parking statistics
//!
//! `total_parked` counts every successful park over the lifetime of the
//! simulation and is never decremented on departure. `free_spots` and
//! `occupancy_rate_percent` are derived from it, so both drift once vehicles
//! start leaving. `occupied_now` is the live count.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParkingStats {
    pub total_spots: usize,
    /// Vehicles spawned since start
    pub total_spawned: u64,
    /// Successful parks since start
    pub total_parked: u64,
    /// `total_spots - total_parked`; negative after enough turnover
    pub free_spots: i64,
    /// `total_parked / total_spots * 100`, `None` for an empty lot
    pub occupancy_rate_percent: Option<f32>,
    /// Spots occupied right now
    pub occupied_now: usize,
    /// Vehicles currently out of the pool
    pub active_vehicles: usize,
}

impl ParkingStats {
    pub fn compute(
        total_spots: usize,
        total_spawned: u64,
        total_parked: u64,
        occupied_now: usize,
        active_vehicles: usize,
    ) -> Self {
        let free_spots = total_spots as i64 - total_parked as i64;
        let occupancy_rate_percent = if total_spots == 0 {
            None
        } else {
            Some(total_parked as f32 / total_spots as f32 * 100.0)
        };

        Self {
            total_spots,
            total_spawned,
            total_parked,
            free_spots,
            occupancy_rate_percent,
            occupied_now,
            active_vehicles,
        }
    }

    /// Occupancy as a live percentage of spots held right now
    pub fn live_occupancy_percent(&self) -> Option<f32> {
        if self.total_spots == 0 {
            None
        } else {
            Some(self.occupied_now as f32 / self.total_spots as f32 * 100.0)
        }
    }
}

/// The four-line block shown on the statistics display
impl fmt::Display for ParkingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total cars: {}", self.total_spawned)?;
        writeln!(f, "Parked: {}", self.total_parked)?;
        writeln!(f, "Free spots: {}", self.free_spots)?;
        write!(
            f,
            "Occupancy: {:.1}%",
            self.occupancy_rate_percent.unwrap_or(0.0)
        )
    }
}
