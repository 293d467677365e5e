//! Main simulation world that ties everything together
//!
//! `Simulation` is the single owner of the signal and the roster. A driver
//! (the headless CLI, a renderer, a test) applies user commands between ticks
//! and calls `tick` once per frame.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::config::{SimConfig, VehicleSpec};
use super::roster::{update_vehicles, Roster};
use super::signal::SimSignal;
use super::types::{SimId, VehicleId};
use super::vehicle::{SimVehicle, VehicleUpdateResult};

/// Lane units covered by one character of the text rendering
const CELL_SIZE: f32 = 10.0;

/// A command coming from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCommand {
    AddVehicle,
    RemoveVehicle,
}

/// What applying a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(VehicleId),
    Removed(VehicleId),
    /// Remove was requested on an empty roster
    Empty,
}

/// Summary of a single tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub time: f64,
    pub signal_changed: bool,
    pub moved: usize,
    pub held: usize,
    pub wrapped: usize,
    /// Per-vehicle results in roster order
    pub results: Vec<(VehicleId, VehicleUpdateResult)>,
}

/// Cumulative counters over the lifetime of a simulation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub signal_changes: u64,
    pub moves: u64,
    pub holds: u64,
    pub wraps: u64,
    pub vehicles_added: u64,
    pub vehicles_removed: u64,
}

impl SimStats {
    /// Share of vehicle updates that ended in a hold, as a percentage
    pub fn hold_rate(&self) -> f32 {
        let updates = self.moves + self.holds + self.wraps;
        if updates == 0 {
            0.0
        } else {
            self.holds as f32 / updates as f32 * 100.0
        }
    }

    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        if report.signal_changed {
            self.signal_changes += 1;
        }
        self.moves += report.moved as u64;
        self.holds += report.held as u64;
        self.wraps += report.wrapped as u64;
    }
}

/// The lane simulation
pub struct Simulation {
    config: SimConfig,

    signal: SimSignal,

    roster: Roster,

    /// Next ID to assign
    next_id: usize,

    /// Timestamp of the latest tick, in seconds
    time: f64,

    stats: SimStats,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::with_config_unchecked(SimConfig::default(), 0.0)
    }
}

impl Simulation {
    /// Create a simulation, spawning `config.initial_vehicles` vehicles
    ///
    /// Fails if the configuration is degenerate.
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::new_at(config, 0.0)
    }

    /// Create a simulation whose clock starts at `start`
    ///
    /// Drivers that feed absolute monotonic timestamps pass their current
    /// time here so the signal's first period is measured from it.
    pub fn new_at(config: SimConfig, start: f64) -> Result<Self> {
        config
            .validate()
            .context("Invalid simulation configuration")?;
        anyhow::ensure!(start.is_finite(), "start time must be finite, got {}", start);
        Ok(Self::with_config_unchecked(config, start))
    }

    fn with_config_unchecked(config: SimConfig, start: f64) -> Self {
        let mut sim = Self {
            signal: SimSignal::new(&config.signal, start),
            roster: Roster::new(),
            next_id: 0,
            time: start,
            stats: SimStats::default(),
            config,
        };
        for _ in 0..sim.config.initial_vehicles {
            sim.add_vehicle();
        }
        sim
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(SimId(self.next_id));
        self.next_id += 1;
        id
    }

    /// Spawn slot for the next vehicle, derived from the roster size
    pub fn next_spawn_position(&self) -> f32 {
        (self.roster.len() as f32 * self.config.spawn_spacing) % self.config.lane.right_bound
    }

    /// Add a vehicle with the default template at the next spawn slot
    pub fn add_vehicle(&mut self) -> VehicleId {
        let position = self.next_spawn_position();
        let spec = self.config.vehicle;
        let id = self.next_vehicle_id();
        self.stats.vehicles_added += 1;
        self.roster.push(id, position, &spec)
    }

    /// Add a vehicle at an explicit position with its own physical template
    pub fn add_vehicle_with(&mut self, position: f32, spec: VehicleSpec) -> Result<VehicleId> {
        spec.validate().context("Invalid vehicle spawn parameters")?;
        let lane = &self.config.lane;
        anyhow::ensure!(
            position.is_finite()
                && (lane.reentry_offset..=lane.right_bound).contains(&position),
            "vehicle position {} is outside the lane [{}, {}]",
            position,
            lane.reentry_offset,
            lane.right_bound
        );
        let id = self.next_vehicle_id();
        self.stats.vehicles_added += 1;
        Ok(self.roster.push(id, position, &spec))
    }

    /// Remove the most recently added vehicle
    ///
    /// Returns `None` without changing anything when the roster is empty.
    pub fn remove_vehicle(&mut self) -> Option<VehicleId> {
        let vehicle = self.roster.pop()?;
        self.stats.vehicles_removed += 1;
        Some(vehicle.id)
    }

    /// Apply a presentation-layer command. Must be called between ticks,
    /// which holding `&mut self` guarantees.
    pub fn apply(&mut self, command: SimCommand) -> CommandOutcome {
        match command {
            SimCommand::AddVehicle => CommandOutcome::Added(self.add_vehicle()),
            SimCommand::RemoveVehicle => match self.remove_vehicle() {
                Some(id) => CommandOutcome::Removed(id),
                None => {
                    debug!("Remove requested with no vehicles on the lane");
                    CommandOutcome::Empty
                }
            },
        }
    }

    /// Main simulation tick
    ///
    /// Advances the signal to `now`, then moves every vehicle based on the
    /// positions at the start of this tick.
    pub fn tick(&mut self, now: f64) -> TickReport {
        if now < self.time {
            warn!(
                "Clock went backwards ({:.3}s -> {:.3}s); signal timing may stall",
                self.time, now
            );
        }
        self.time = now;

        let signal_changed = self.signal.tick(now);

        let results = update_vehicles(
            &mut self.roster,
            &self.signal,
            &self.config.rules,
            &self.config.lane,
        );

        let mut report = TickReport {
            time: now,
            signal_changed,
            results,
            ..TickReport::default()
        };
        for (id, result) in &report.results {
            match result {
                VehicleUpdateResult::Moved => report.moved += 1,
                VehicleUpdateResult::Held => report.held += 1,
                VehicleUpdateResult::Wrapped => {
                    report.wrapped += 1;
                    debug!("Vehicle {:?} wrapped around at t={:.2}s", id.0, now);
                }
            }
        }

        self.stats.record(&report);
        report
    }

    /// Advance the internal clock by `delta_secs` and tick
    pub fn advance(&mut self, delta_secs: f64) -> TickReport {
        let now = self.time + delta_secs;
        self.tick(now)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn signal(&self) -> &SimSignal {
        &self.signal
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &SimVehicle> {
        self.roster.iter()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&SimVehicle> {
        self.roster.get(id)
    }

    pub fn vehicle_count(&self) -> usize {
        self.roster.len()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Lane Simulation Summary ===");
        println!("Time: {:.2}s", self.time);
        println!(
            "Signal: {:?} at x={:.0} (period {:.1}s)",
            self.signal.color(),
            self.signal.position(),
            self.signal.period()
        );
        println!("Vehicles: {}", self.roster.len());
        for vehicle in self.roster.iter() {
            println!(
                "  Vehicle {:?}: x={:.1}, length={:.0}, speed={:.1}",
                vehicle.id.0, vehicle.position, vehicle.length, vehicle.speed
            );
        }
    }

    /// Render the lane as two lines of text: the signal row and the road row.
    ///
    /// Each character covers `CELL_SIZE` lane units. Vehicles are drawn as
    /// `#` over their footprint, the signal as `G` or `R`.
    pub fn render_lane(&self) -> String {
        let columns = (self.config.lane.right_bound / CELL_SIZE).ceil() as usize;
        let column_of = |x: f32| -> Option<usize> {
            if x < 0.0 {
                return None;
            }
            let col = (x / CELL_SIZE) as usize;
            (col < columns).then_some(col)
        };

        let mut signal_row = vec![' '; columns];
        if let Some(col) = column_of(self.signal.position()) {
            signal_row[col] = if self.signal.is_green() { 'G' } else { 'R' };
        }

        let mut road_row = vec!['='; columns];
        for vehicle in self.roster.iter() {
            let end = vehicle.front();
            if end <= 0.0 {
                continue;
            }
            let Some(first) = column_of(vehicle.position.max(0.0)) else {
                continue;
            };
            // Last column the footprint reaches into, clipped to the lane
            let last = ((end / CELL_SIZE).ceil() as usize).min(columns);
            for cell in &mut road_row[first..last.max(first + 1)] {
                *cell = '#';
            }
        }

        let signal_line: String = signal_row.into_iter().collect();
        let road_line: String = road_row.into_iter().collect();
        format!("{}\n{}", signal_line.trim_end(), road_line)
    }

    /// Draw the lane in the terminal
    pub fn draw_lane(&self) {
        println!("\n=== Lane ===");
        println!("Legend: G/R=Signal, #=Vehicle, ==Road");
        println!("{}", self.render_lane());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lane_marks_vehicles_and_signal() {
        let sim = Simulation::default();
        let lane = sim.render_lane();
        let mut lines = lane.lines();
        let signal_line = lines.next().unwrap();
        let road_line = lines.next().unwrap();

        assert_eq!(road_line.chars().count(), 80);
        assert_eq!(signal_line.chars().nth(40), Some('G'));
        // Vehicle 0 covers [0, 40)
        assert_eq!(&road_line[0..4], "####");
        assert_eq!(road_line.chars().nth(4), Some('='));
    }

    #[test]
    fn test_render_lane_clips_vehicles_left_of_lane() {
        let config = SimConfig {
            initial_vehicles: 0,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.add_vehicle_with(-50.0, VehicleSpec::default()).unwrap();

        let lane = sim.render_lane();
        let road_line = lane.lines().nth(1).unwrap();
        assert!(!road_line.contains('#'));
    }

    #[test]
    fn test_render_lane_clips_vehicles_at_right_bound() {
        let config = SimConfig {
            initial_vehicles: 0,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.add_vehicle_with(795.0, VehicleSpec::default()).unwrap();
        sim.add_vehicle_with(800.0, VehicleSpec::default()).unwrap();
        sim.add_vehicle_with(-30.0, VehicleSpec::default()).unwrap();

        let lane = sim.render_lane();
        let road_line = lane.lines().nth(1).unwrap();
        assert_eq!(road_line.chars().count(), 80);
        assert_eq!(road_line.matches('#').count(), 2);
        assert!(road_line.starts_with("#="));
        assert!(road_line.ends_with("=#"));
    }

    #[test]
    fn test_hold_rate_without_updates_is_zero() {
        assert_eq!(SimStats::default().hold_rate(), 0.0);
    }
}
