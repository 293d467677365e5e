use anyhow::{ensure, Result};
use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use traffic_light_sim::simulation::{
    CommandOutcome, SignalConfig, SimCommand, SimConfig, Simulation, VehicleSpec,
    INITIAL_VEHICLES, SIGNAL_PERIOD, VEHICLE_SPEED,
};

#[derive(Parser)]
#[command(name = "traffic_light_sim")]
#[command(about = "Single-lane traffic light simulation (headless)")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "300")]
    ticks: u32,

    /// Time delta per tick in seconds (30 frames per second by default)
    #[arg(long, default_value_t = 1.0 / 30.0)]
    delta: f64,

    /// Number of vehicles on the lane at startup
    #[arg(long, default_value_t = INITIAL_VEHICLES)]
    vehicles: usize,

    /// Distance a vehicle moves per tick
    #[arg(long, default_value_t = VEHICLE_SPEED)]
    speed: f32,

    /// Seconds the signal stays in each color
    #[arg(long, default_value_t = SIGNAL_PERIOD)]
    period: f32,

    /// Probability per tick that the simulated user clicks Add or Remove
    #[arg(long, default_value = "0.0")]
    churn: f64,

    /// Seed for the simulated user, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the lane every N ticks (0 disables periodic output)
    #[arg(long, default_value = "30")]
    report_every: u32,
}

/// Stand-in for a user clicking the Add and Remove buttons
struct UserChurn {
    probability: f64,
    /// Optional seeded RNG for reproducible runs
    rng: Option<StdRng>,
}

impl UserChurn {
    fn new(probability: f64, seed: Option<u64>) -> Self {
        Self {
            probability,
            rng: seed.map(StdRng::seed_from_u64),
        }
    }

    fn random_bool(&mut self, p: f64) -> bool {
        match &mut self.rng {
            Some(rng) => rng.random_bool(p),
            None => rand::rng().random_bool(p),
        }
    }

    /// Command issued before the next tick, if any
    fn next_command(&mut self) -> Option<SimCommand> {
        if self.probability <= 0.0 || !self.random_bool(self.probability) {
            return None;
        }
        if self.random_bool(0.5) {
            Some(SimCommand::AddVehicle)
        } else {
            Some(SimCommand::RemoveVehicle)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,traffic_light_sim=info"),
    )
    .init();

    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    ensure!(
        cli.delta.is_finite() && cli.delta > 0.0,
        "tick delta must be positive, got {}",
        cli.delta
    );
    ensure!(
        (0.0..=1.0).contains(&cli.churn),
        "churn must be a probability in [0, 1], got {}",
        cli.churn
    );

    let defaults = SimConfig::default();
    let config = SimConfig {
        initial_vehicles: cli.vehicles,
        vehicle: VehicleSpec {
            speed: cli.speed,
            ..defaults.vehicle
        },
        signal: SignalConfig {
            period: cli.period,
            ..defaults.signal
        },
        ..defaults
    };

    let mut sim = Simulation::new(config)?;
    let mut churn = UserChurn::new(cli.churn, cli.seed);

    println!("Running lane simulation in headless mode...");
    println!("Ticks: {}, Delta: {:.4}s", cli.ticks, cli.delta);
    println!();
    println!("Initial state:");
    sim.print_summary();
    sim.draw_lane();

    for tick in 1..=cli.ticks {
        // Commands land strictly between ticks
        if let Some(command) = churn.next_command() {
            match sim.apply(command) {
                CommandOutcome::Added(id) => debug!("User added vehicle {:?}", id.0),
                CommandOutcome::Removed(id) => debug!("User removed vehicle {:?}", id.0),
                CommandOutcome::Empty => debug!("User clicked Remove on an empty lane"),
            }
        }

        let report = sim.advance(cli.delta);
        if report.signal_changed {
            info!(
                "Signal turned {:?} at {:.2}s",
                sim.signal().color(),
                report.time
            );
        }

        if cli.report_every > 0 && tick % cli.report_every == 0 {
            println!(
                "--- After tick {} ({:.1}s simulated time) ---",
                tick,
                sim.time()
            );
            sim.print_summary();
            sim.draw_lane();
        }
    }

    let stats = sim.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Simulated time: {:.2}s", sim.time());
    info!("Ticks: {}", stats.ticks);
    info!("Signal changes: {}", stats.signal_changes);
    info!("Vehicles added: {}", stats.vehicles_added);
    info!("Vehicles removed: {}", stats.vehicles_removed);
    info!("Active vehicles: {}", sim.vehicle_count());
    info!("Wraparounds: {}", stats.wraps);
    info!("Hold rate: {:.1}%", stats.hold_rate());

    println!("=== Final State ===");
    sim.print_summary();
    sim.draw_lane();
    Ok(())
}
