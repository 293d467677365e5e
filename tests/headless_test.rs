use std::process::{Command, Output};

fn run_headless(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_traffic_light_sim"))
        .args(args)
        .env("RUST_LOG", "warn,traffic_light_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--ticks", "90", "--report-every", "0"]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
    assert!(stderr.contains("Ticks: 90"), "Missing tick count. stderr: {}", stderr);
    assert!(stderr.contains("Active vehicles: 5"), "Missing vehicle count");
    assert!(stderr.contains("Hold rate:"), "Missing hold rate");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="));
    assert!(stdout.contains("=== Lane ==="));
}

/// 7 simulated seconds at 30 ticks per second crosses one signal change
#[test]
fn test_signal_change_is_logged() {
    let output = run_headless(&["--ticks", "210", "--report-every", "0"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Signal turned Red"),
        "No signal change logged. stderr: {}",
        stderr
    );
    assert!(stderr.contains("Signal changes: 1"));
}

#[test]
fn test_seeded_churn_runs() {
    let output = run_headless(&[
        "--ticks",
        "120",
        "--churn",
        "0.5",
        "--seed",
        "7",
        "--report-every",
        "60",
    ]);
    assert!(
        output.status.success(),
        "Simulation failed with churn. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- After tick 60"));
    assert!(stdout.contains("--- After tick 120"));
}

#[test]
fn test_degenerate_speed_is_rejected() {
    let output = run_headless(&["--speed", "0", "--ticks", "1"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("vehicle speed must be positive"),
        "Unexpected error output: {}",
        stderr
    );
}

#[test]
fn test_degenerate_delta_is_rejected() {
    let output = run_headless(&["--delta", "0", "--ticks", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tick delta must be positive"));
}
