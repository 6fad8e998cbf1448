//! Parking Lot Simulation Library
//!
//! A headless parking lot simulation: cars spawn on a timer, take the nearest
//! free spot, stay a while and go back to the pool.

pub mod simulation;
