//! Vehicle roster and per-tick vehicle updates
//!
//! The roster is the arena every vehicle lives in. It keeps insertion order,
//! hands out nothing but ids and shared borrows, and runs the two-phase
//! vehicle update: decide everything against one snapshot, then commit.

use log::debug;

use super::config::{LaneConfig, MotionRules, VehicleSpec};
use super::signal::SimSignal;
use super::types::VehicleId;
use super::vehicle::{MotionDecision, SimVehicle, VehicleSnapshot, VehicleUpdateResult};

/// Ordered collection of live vehicles, oldest first
#[derive(Debug, Clone, Default)]
pub struct Roster {
    vehicles: Vec<SimVehicle>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Append a vehicle at the end of the roster
    pub fn push(&mut self, id: VehicleId, position: f32, spec: &VehicleSpec) -> VehicleId {
        self.vehicles.push(SimVehicle::new(id, position, spec));
        debug!("Vehicle {:?} spawned at x={:.1}", id.0, position);
        id
    }

    /// Remove the most recently added vehicle
    pub fn pop(&mut self) -> Option<SimVehicle> {
        let vehicle = self.vehicles.pop()?;
        debug!("Vehicle {:?} removed at x={:.1}", vehicle.id.0, vehicle.position);
        Some(vehicle)
    }

    pub fn get(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimVehicle> {
        self.vehicles.iter()
    }

    pub fn ids(&self) -> Vec<VehicleId> {
        self.vehicles.iter().map(|vehicle| vehicle.id).collect()
    }

    /// Positions of every vehicle as they stand right now
    pub fn snapshot(&self) -> Vec<VehicleSnapshot> {
        self.vehicles.iter().map(SimVehicle::snapshot).collect()
    }
}

/// Update all vehicles in the roster
///
/// Every decision is computed from the same snapshot before any position
/// changes, so the outcome does not depend on roster order.
/// Returns a (vehicle_id, result) tuple per vehicle, in roster order.
pub fn update_vehicles(
    roster: &mut Roster,
    signal: &SimSignal,
    rules: &MotionRules,
    lane: &LaneConfig,
) -> Vec<(VehicleId, VehicleUpdateResult)> {
    let snapshot = roster.snapshot();

    let decisions: Vec<MotionDecision> = roster
        .vehicles
        .iter()
        .map(|vehicle| vehicle.decide(&snapshot, signal, rules))
        .collect();

    roster
        .vehicles
        .iter_mut()
        .zip(decisions)
        .map(|(vehicle, decision)| (vehicle.id, vehicle.apply(decision, lane)))
        .collect()
}
