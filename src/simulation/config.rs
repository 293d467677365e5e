//! Configuration for the lane simulation
//!
//! Defaults reproduce the classic single-lane demo: an 800 unit lane, a
//! signal halfway along it and five vehicles spaced 140 units apart.

use anyhow::{ensure, Context, Result};

use super::types::{
    Rgb, INITIAL_VEHICLES, LANE_LENGTH, REENTRY_OFFSET, SIGNAL_LOOK_AHEAD, SIGNAL_MARGIN,
    SIGNAL_PERIOD, SIGNAL_SIZE, SPAWN_SPACING, STOPPING_THRESHOLD, VEHICLE_HEIGHT, VEHICLE_LENGTH,
    VEHICLE_SPEED,
};

/// Horizontal bounds of the closed-loop lane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneConfig {
    /// A vehicle whose position exceeds this value wraps around
    pub right_bound: f32,
    /// Position a wrapped vehicle re-enters at
    pub reentry_offset: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            right_bound: LANE_LENGTH,
            reentry_offset: REENTRY_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalConfig {
    pub position: f32,
    /// Seconds spent in each color
    pub period: f32,
    pub size: f32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            position: LANE_LENGTH / 2.0,
            period: SIGNAL_PERIOD,
            size: SIGNAL_SIZE,
        }
    }
}

/// Physical template for a new vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSpec {
    pub length: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            length: VEHICLE_LENGTH,
            height: VEHICLE_HEIGHT,
            speed: VEHICLE_SPEED,
            color: Rgb::WHITE,
        }
    }
}

impl VehicleSpec {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.length.is_finite() && self.length > 0.0,
            "vehicle length must be positive, got {}",
            self.length
        );
        ensure!(
            self.height.is_finite() && self.height > 0.0,
            "vehicle height must be positive, got {}",
            self.height
        );
        ensure!(
            self.speed.is_finite() && self.speed > 0.0,
            "vehicle speed must be positive, got {}",
            self.speed
        );
        Ok(())
    }
}

/// Distances that drive the go/no-go decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRules {
    /// A red signal only matters once the gap to it is below this
    pub look_ahead: f32,
    /// Subtracted from the gap to a red signal
    pub signal_margin: f32,
    /// Vehicles with less clearance than this hold position
    pub stopping_threshold: f32,
}

impl Default for MotionRules {
    fn default() -> Self {
        Self {
            look_ahead: SIGNAL_LOOK_AHEAD,
            signal_margin: SIGNAL_MARGIN,
            stopping_threshold: STOPPING_THRESHOLD,
        }
    }
}

/// Full simulation configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub lane: LaneConfig,
    pub signal: SignalConfig,
    /// Template used by `Simulation::add_vehicle`
    pub vehicle: VehicleSpec,
    pub rules: MotionRules,
    pub spawn_spacing: f32,
    pub initial_vehicles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lane: LaneConfig::default(),
            signal: SignalConfig::default(),
            vehicle: VehicleSpec::default(),
            rules: MotionRules::default(),
            spawn_spacing: SPAWN_SPACING,
            initial_vehicles: INITIAL_VEHICLES,
        }
    }
}

impl SimConfig {
    /// Check every precondition the simulation relies on.
    ///
    /// Degenerate values would otherwise produce silently wrong motion, so
    /// they are rejected here before any entity is created.
    pub fn validate(&self) -> Result<()> {
        let lane = &self.lane;
        ensure!(
            lane.right_bound.is_finite() && lane.right_bound > 0.0,
            "lane right bound must be positive, got {}",
            lane.right_bound
        );
        ensure!(
            lane.reentry_offset.is_finite() && lane.reentry_offset < lane.right_bound,
            "re-entry offset {} must lie left of the right bound {}",
            lane.reentry_offset,
            lane.right_bound
        );

        let signal = &self.signal;
        ensure!(
            signal.period.is_finite() && signal.period > 0.0,
            "signal period must be positive, got {}",
            signal.period
        );
        ensure!(
            signal.position.is_finite()
                && (0.0..=lane.right_bound).contains(&signal.position),
            "signal position {} is outside the lane [0, {}]",
            signal.position,
            lane.right_bound
        );
        ensure!(
            signal.size.is_finite() && signal.size > 0.0,
            "signal size must be positive, got {}",
            signal.size
        );

        self.vehicle
            .validate()
            .context("invalid default vehicle")?;

        let rules = &self.rules;
        for (name, value) in [
            ("look-ahead", rules.look_ahead),
            ("signal margin", rules.signal_margin),
            ("stopping threshold", rules.stopping_threshold),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{} must be a non-negative distance, got {}",
                name,
                value
            );
        }

        ensure!(
            self.spawn_spacing.is_finite() && self.spawn_spacing > 0.0,
            "spawn spacing must be positive, got {}",
            self.spawn_spacing
        );
        Ok(())
    }
}
