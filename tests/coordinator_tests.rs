//! Parking coordinator validation tests

use std::cell::RefCell;
use std::rc::Rc;

use parking_sim::simulation::{
    DwellAgent, NavigationAgent, ParkingCoordinator, ParkingError, ParkingStats, Position,
    SpotDescriptor, SpotId, SpotRegistry, StatsDisplay, VehicleId, VehiclePool, VehicleState,
};

#[derive(Clone, Default)]
struct RecordingDisplay(Rc<RefCell<Vec<String>>>);

impl StatsDisplay for RecordingDisplay {
    fn render(&mut self, text: &str) {
        self.0.borrow_mut().push(text.to_string());
    }
}

fn registry(positions: &[(f32, f32)]) -> SpotRegistry {
    let spots: Vec<_> = positions
        .iter()
        .enumerate()
        .map(|(i, &(x, z))| SpotDescriptor::new(SpotId::new(i), Position::new(x, 0.0, z)))
        .collect();
    let mut registry = SpotRegistry::new();
    registry.initialize(&spots).unwrap();
    registry
}

fn spawn(lot: &mut ParkingCoordinator, position: Position) -> (VehicleId, Option<SpotId>) {
    let vehicle = lot.acquire_vehicle().expect("pool has a vehicle");
    (vehicle, lot.on_vehicle_spawned(vehicle, position))
}

fn assert_stats_invariants(stats: &ParkingStats) {
    assert!(stats.total_spawned >= stats.total_parked);
    assert_eq!(
        stats.free_spots,
        stats.total_spots as i64 - stats.total_parked as i64
    );
}

#[test]
fn test_spawned_vehicle_takes_nearest_spot() {
    let mut lot = ParkingCoordinator::new(
        registry(&[(10.0, 0.0), (1.0, 1.0), (-4.0, 0.0)]),
        VehiclePool::new(3),
    );

    let (vehicle, spot) = spawn(&mut lot, Position::new(0.0, 0.0, 0.0));
    assert_eq!(spot, Some(SpotId::new(1)));

    let parked = lot.pool().get(vehicle).unwrap();
    assert_eq!(parked.state, VehicleState::Parked);
    assert_eq!(parked.spot, Some(SpotId::new(1)));
    assert_eq!(
        lot.registry().get(SpotId::new(1)).unwrap().occupant(),
        Some(vehicle)
    );

    let stats = lot.stats();
    assert_eq!(stats.total_spawned, 1);
    assert_eq!(stats.total_parked, 1);
    assert_eq!(stats.free_spots, 2);
}

#[test]
fn test_spawn_without_free_spot_leaves_vehicle_seeking() {
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0)]), VehiclePool::new(2));
    spawn(&mut lot, Position::default());

    let (vehicle, spot) = spawn(&mut lot, Position::default());
    assert_eq!(spot, None);
    assert_eq!(
        lot.pool().get(vehicle).unwrap().state,
        VehicleState::Seeking
    );

    let stats = lot.stats();
    assert_eq!(stats.total_spawned, 2);
    assert_eq!(stats.total_parked, 1);
    assert_stats_invariants(&stats);
}

#[test]
fn test_spawn_report_for_pooled_vehicle_is_ignored() {
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0)]), VehiclePool::new(1));
    assert_eq!(
        lot.on_vehicle_spawned(VehicleId::new(0), Position::default()),
        None
    );
    assert_eq!(lot.stats().total_spawned, 0);
    assert_eq!(lot.registry().occupied_count(), 0);
}

#[test]
fn test_departure_frees_spot_and_returns_vehicle() {
    let mut lot = ParkingCoordinator::new(
        registry(&[(0.0, 0.0), (20.0, 0.0)]),
        VehiclePool::new(2),
    );
    let (vehicle, spot) = spawn(&mut lot, Position::default());
    let spot = spot.unwrap();

    lot.on_vehicle_departed(vehicle, spot).unwrap();

    assert!(!lot.registry().get(spot).unwrap().is_occupied());
    assert_eq!(lot.registry().find_nearest_free(Position::default()), Some(spot));
    assert_eq!(lot.pool().get(vehicle).unwrap().state, VehicleState::Pooled);
    assert_eq!(lot.pool().available(), 2);

    // Vehicle 1 has waited longer, then the returned vehicle comes back
    assert_eq!(lot.acquire_vehicle(), Some(VehicleId::new(1)));
    assert_eq!(lot.acquire_vehicle(), Some(vehicle));
}

#[test]
fn test_departure_never_evicts_another_vehicle() {
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0)]), VehiclePool::new(2));
    let (first, first_spot) = spawn(&mut lot, Position::default());
    let (second, second_spot) = spawn(&mut lot, Position::default());
    assert_eq!(second_spot, None);

    let first_spot = first_spot.unwrap();
    assert_eq!(
        lot.on_vehicle_departed(second, first_spot),
        Err(ParkingError::AlreadyOccupied {
            spot: first_spot,
            occupant: first
        })
    );

    assert_eq!(
        lot.registry().get(first_spot).unwrap().occupant(),
        Some(first)
    );
    assert_eq!(lot.pool().get(second).unwrap().state, VehicleState::Seeking);
}

#[test]
fn test_departure_from_wrong_spot_changes_nothing() {
    let mut lot = ParkingCoordinator::new(
        registry(&[(0.0, 0.0), (30.0, 0.0)]),
        VehiclePool::new(1),
    );
    let (vehicle, spot) = spawn(&mut lot, Position::default());
    let held = spot.unwrap();
    let other = SpotId::new(1);
    assert_eq!(held, SpotId::new(0));

    assert_eq!(
        lot.on_vehicle_departed(vehicle, other),
        Err(ParkingError::WrongSpot {
            vehicle,
            assigned: held,
            reported: other
        })
    );
    assert_eq!(
        lot.on_vehicle_departed(vehicle, SpotId::new(9)),
        Err(ParkingError::WrongSpot {
            vehicle,
            assigned: held,
            reported: SpotId::new(9)
        })
    );

    let parked = lot.pool().get(vehicle).unwrap();
    assert_eq!(parked.state, VehicleState::Parked);
    assert_eq!(parked.spot, Some(held));
    assert_eq!(lot.registry().get(held).unwrap().occupant(), Some(vehicle));
    assert!(!lot.registry().get(other).unwrap().is_occupied());
    assert_eq!(lot.pool().available(), 0);

    // The real spot can still be left and reused
    lot.on_vehicle_departed(vehicle, held).unwrap();
    let (again, spot) = spawn(&mut lot, Position::default());
    assert_eq!(again, vehicle);
    assert_eq!(spot, Some(held));
    assert!(!lot.registry().get(other).unwrap().is_occupied());
}

#[test]
fn test_departure_of_pooled_vehicle_is_rejected() {
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0)]), VehiclePool::new(1));
    let vehicle = VehicleId::new(0);
    assert_eq!(
        lot.on_vehicle_departed(vehicle, SpotId::new(0)),
        Err(ParkingError::VehicleNotActive(vehicle))
    );
    assert_eq!(lot.pool().available(), 1);
}

#[test]
fn test_parked_counter_is_cumulative() {
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0)]), VehiclePool::new(1));

    for _ in 0..3 {
        let (vehicle, spot) = spawn(&mut lot, Position::default());
        assert_stats_invariants(&lot.stats());
        lot.on_vehicle_departed(vehicle, spot.unwrap()).unwrap();
        assert_stats_invariants(&lot.stats());
    }

    let stats = lot.stats();
    assert_eq!(stats.total_parked, 3);
    assert_eq!(stats.free_spots, -2);
    assert_eq!(stats.occupancy_rate_percent, Some(300.0));
    assert_eq!(stats.occupied_now, 0);
    assert_eq!(stats.live_occupancy_percent(), Some(0.0));
}

#[test]
fn test_empty_lot_stats_do_not_divide_by_zero() {
    let mut lot = ParkingCoordinator::new(SpotRegistry::new(), VehiclePool::new(2));
    let (_, spot) = spawn(&mut lot, Position::default());
    assert_eq!(spot, None);

    let stats = lot.stats();
    assert_eq!(stats.total_spots, 0);
    assert_eq!(stats.occupancy_rate_percent, None);
    assert_eq!(stats.live_occupancy_percent(), None);
    assert!(stats.to_string().ends_with("Occupancy: 0.0%"));
}

#[test]
fn test_stats_block_format() {
    let stats = ParkingStats::compute(4, 3, 2, 2, 3);
    assert_eq!(
        stats.to_string(),
        "Total cars: 3\nParked: 2\nFree spots: 2\nOccupancy: 50.0%"
    );

    let third = ParkingStats::compute(3, 1, 1, 1, 1);
    assert!(third.to_string().ends_with("Occupancy: 33.3%"));
}

#[test]
fn test_display_refreshed_on_every_event() {
    let display = RecordingDisplay::default();
    let renders = display.0.clone();
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0)]), VehiclePool::new(1))
        .with_display(Box::new(display));

    let (vehicle, spot) = spawn(&mut lot, Position::default());
    assert_eq!(renders.borrow().len(), 1);
    assert_eq!(renders.borrow()[0].lines().count(), 4);

    // One refresh for the freed spot, one for the returned vehicle
    lot.on_vehicle_departed(vehicle, spot.unwrap()).unwrap();
    assert_eq!(renders.borrow().len(), 3);
}

#[test]
fn test_dwell_agents_depart_after_dwell_time() {
    let pool = VehiclePool::with_agents(2, |_| {
        Some(Box::new(DwellAgent::new(3.0)) as Box<dyn NavigationAgent>)
    });
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0), (5.0, 0.0)]), pool);

    let (vehicle, spot) = spawn(&mut lot, Position::default());
    assert!(spot.is_some());

    assert!(lot.update_vehicles(1.0).is_empty());
    assert!(lot.update_vehicles(1.0).is_empty());
    assert_eq!(lot.update_vehicles(1.0), vec![vehicle]);

    assert_eq!(lot.registry().occupied_count(), 0);
    assert_eq!(lot.pool().available(), 2);
    assert_eq!(lot.stats().total_parked, 1);
}

#[test]
fn test_pool_conservation_through_coordinator() {
    let pool = VehiclePool::with_agents(3, |_| {
        Some(Box::new(DwellAgent::new(2.0)) as Box<dyn NavigationAgent>)
    });
    let mut lot = ParkingCoordinator::new(registry(&[(0.0, 0.0), (4.0, 0.0)]), pool);

    for step in 0..12 {
        if step % 2 == 0 && lot.check_spawn().is_ok() {
            spawn(&mut lot, Position::new(step as f32, 0.0, 0.0));
        }
        lot.update_vehicles(1.0);

        let pool = lot.pool();
        assert_eq!(pool.available() + pool.active_count(), 3);
        assert_stats_invariants(&lot.stats());
    }
}
