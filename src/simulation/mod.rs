//! Standalone lane simulation module
//!
//! This module contains the signal state machine, the vehicle go/no-go logic
//! and the world that owns them. Nothing here draws or polls input; a driver
//! calls `Simulation::tick` once per frame and reads state back through the
//! `Drawable` capability.

mod config;
mod roster;
mod signal;
mod types;
mod vehicle;
mod world;

pub use config::{LaneConfig, MotionRules, SignalConfig, SimConfig, VehicleSpec};
pub use roster::{update_vehicles, Roster};
pub use signal::SimSignal;
pub use types::{
    Drawable, Extent, Rgb, SignalColor, SimId, VehicleId, INITIAL_VEHICLES, LANE_LENGTH,
    REENTRY_OFFSET, SIGNAL_LOOK_AHEAD, SIGNAL_MARGIN, SIGNAL_PERIOD, SIGNAL_SIZE, SPAWN_SPACING,
    STOPPING_THRESHOLD, VEHICLE_HEIGHT, VEHICLE_LENGTH, VEHICLE_SPEED,
};
pub use vehicle::{MotionDecision, SimVehicle, VehicleSnapshot, VehicleUpdateResult};
pub use world::{CommandOutcome, SimCommand, SimStats, Simulation, TickReport};
