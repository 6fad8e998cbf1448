//! Interfaces to the host: spot indicators, the statistics display and the
//! per-vehicle navigation agent
//!
//! The simulation only talks to these traits. Log-backed implementations are
//! provided for headless runs.

use log::info;
use std::fmt::Debug;

use super::types::{IndicatorState, Position, SpotAssignment, SpotId, VehicleId};

/// Visual feedback for spot occupancy
pub trait IndicatorRenderer {
    fn set_indicator_state(&mut self, spot: SpotId, state: IndicatorState);
}

/// Consumer of the formatted statistics block
pub trait StatsDisplay {
    fn render(&mut self, text: &str);
}

/// Result of an agent update indicating what the world should do with the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentUpdate {
    /// Vehicle keeps doing what it does
    Continue,
    /// Vehicle leaves its spot and goes back to the pool
    Depart,
}

/// Movement and parking behavior attached to a single vehicle
pub trait NavigationAgent: Debug {
    /// Called when the vehicle is taken out of the pool
    fn initialize(&mut self, vehicle: VehicleId, position: Position);

    /// Called once the coordinator has looked for a spot. `None` means the
    /// lot was full and the agent is on its own.
    fn seek_assigned_spot(&mut self, assignment: Option<SpotAssignment>);

    /// Advance the agent by `delta_secs`
    fn update(&mut self, delta_secs: f32) -> AgentUpdate;

    /// Clear all seeking/parked state before the vehicle is pooled again
    fn reset(&mut self);
}

/// Indicator that writes state changes to the log
#[derive(Debug, Default)]
pub struct LogIndicator;

impl IndicatorRenderer for LogIndicator {
    fn set_indicator_state(&mut self, spot: SpotId, state: IndicatorState) {
        info!("Indicator {:?} -> {:?}", spot.0 .0, state);
    }
}

/// Statistics display that writes every refresh to the log
#[derive(Debug, Default)]
pub struct LogStatsDisplay;

impl StatsDisplay for LogStatsDisplay {
    fn render(&mut self, text: &str) {
        for line in text.lines() {
            info!("{}", line);
        }
    }
}

/// Agent that parks immediately on its assigned spot, waits `dwell_time`
/// seconds, then departs
#[derive(Debug, Clone)]
pub struct DwellAgent {
    dwell_time: f32,
    vehicle: Option<VehicleId>,
    assignment: Option<SpotAssignment>,
    remaining: f32,
}

impl DwellAgent {
    pub fn new(dwell_time: f32) -> Self {
        Self {
            dwell_time,
            vehicle: None,
            assignment: None,
            remaining: 0.0,
        }
    }

    pub fn vehicle(&self) -> Option<VehicleId> {
        self.vehicle
    }

    pub fn assignment(&self) -> Option<SpotAssignment> {
        self.assignment
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

impl NavigationAgent for DwellAgent {
    fn initialize(&mut self, vehicle: VehicleId, _position: Position) {
        self.vehicle = Some(vehicle);
        self.assignment = None;
        self.remaining = 0.0;
    }

    fn seek_assigned_spot(&mut self, assignment: Option<SpotAssignment>) {
        self.assignment = assignment;
        self.remaining = self.dwell_time;
    }

    fn update(&mut self, delta_secs: f32) -> AgentUpdate {
        // Without a spot there is nothing to leave from
        if self.assignment.is_none() {
            return AgentUpdate::Continue;
        }

        self.remaining -= delta_secs;
        if self.remaining <= 0.0 {
            AgentUpdate::Depart
        } else {
            AgentUpdate::Continue
        }
    }

    fn reset(&mut self) {
        self.vehicle = None;
        self.assignment = None;
        self.remaining = 0.0;
    }
}
