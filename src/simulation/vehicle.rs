//! Vehicle movement logic for the lane simulation
//!
//! A vehicle never holds references to other vehicles. It decides from a
//! snapshot of the roster taken at the start of the tick, and the decision is
//! committed separately so that no vehicle observes a half-updated lane.

use ordered_float::OrderedFloat;

use super::config::{LaneConfig, MotionRules, VehicleSpec};
use super::signal::SimSignal;
use super::types::{Drawable, Extent, Rgb, VehicleId};

/// What a vehicle will do on the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionDecision {
    Advance,
    Hold,
}

/// Result of committing a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdateResult {
    Moved,
    Held,
    /// Crossed the right bound and re-entered from the left
    Wrapped,
}

/// Position of a vehicle as it stood when the tick started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: f32,
}

/// A vehicle on the lane
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    pub id: VehicleId,
    /// Left edge of the footprint
    pub position: f32,
    pub length: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
}

impl SimVehicle {
    pub fn new(id: VehicleId, position: f32, spec: &VehicleSpec) -> Self {
        Self {
            id,
            position,
            length: spec.length,
            height: spec.height,
            speed: spec.speed,
            color: spec.color,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Right edge of the footprint
    pub fn front(&self) -> f32 {
        self.position + self.length
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            position: self.position,
        }
    }

    /// Gap to the closest vehicle strictly ahead, `None` when nothing is ahead
    pub fn nearest_ahead(&self, snapshot: &[VehicleSnapshot]) -> Option<f32> {
        let front = self.front();
        snapshot
            .iter()
            .filter(|other| other.id != self.id && other.position > self.position)
            .map(|other| OrderedFloat(other.position - front))
            .min()
            .map(OrderedFloat::into_inner)
    }

    /// Distance this vehicle may still cover before hitting an obstacle.
    ///
    /// Combines the vehicle ahead with a red signal inside the look-ahead
    /// window. `None` means nothing constrains the vehicle.
    pub fn clearance(
        &self,
        snapshot: &[VehicleSnapshot],
        signal: &SimSignal,
        rules: &MotionRules,
    ) -> Option<f32> {
        let signal_gap = signal.position() - self.front();
        let signal_limit = (!signal.is_green() && signal_gap < rules.look_ahead)
            .then(|| OrderedFloat(signal_gap - rules.signal_margin));

        self.nearest_ahead(snapshot)
            .map(OrderedFloat)
            .into_iter()
            .chain(signal_limit)
            .min()
            .map(OrderedFloat::into_inner)
    }

    /// Decide whether to move this tick. Does not mutate anything.
    pub fn decide(
        &self,
        snapshot: &[VehicleSnapshot],
        signal: &SimSignal,
        rules: &MotionRules,
    ) -> MotionDecision {
        match self.clearance(snapshot, signal, rules) {
            Some(clearance) if clearance < rules.stopping_threshold => MotionDecision::Hold,
            _ => MotionDecision::Advance,
        }
    }

    /// Commit a decision computed by [`SimVehicle::decide`]
    pub fn apply(&mut self, decision: MotionDecision, lane: &LaneConfig) -> VehicleUpdateResult {
        if decision == MotionDecision::Hold {
            return VehicleUpdateResult::Held;
        }

        self.position += self.speed;
        if self.position > lane.right_bound {
            self.position = lane.reentry_offset;
            return VehicleUpdateResult::Wrapped;
        }
        VehicleUpdateResult::Moved
    }
}

impl Drawable for SimVehicle {
    fn x(&self) -> f32 {
        self.position
    }

    fn extent(&self) -> Extent {
        Extent::new(self.length, self.height)
    }

    fn rgb(&self) -> Rgb {
        self.color
    }
}
