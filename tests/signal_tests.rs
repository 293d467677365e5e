//! Signal state machine tests

use traffic_light_sim::simulation::{
    Drawable, Extent, Rgb, SignalColor, SignalConfig, SimSignal, SIGNAL_PERIOD,
};

fn new_signal() -> SimSignal {
    SimSignal::new(&SignalConfig::default(), 0.0)
}

#[test]
fn test_signal_starts_green() {
    let signal = new_signal();
    assert_eq!(signal.color(), SignalColor::Green);
    assert!(signal.is_green());
    assert_eq!(signal.position(), 400.0);
    assert_eq!(signal.period(), SIGNAL_PERIOD);
}

#[test]
fn test_signal_holds_color_within_period() {
    let mut signal = new_signal();
    assert!(!signal.tick(1.0));
    assert!(!signal.tick(4.9));
    assert!(signal.is_green());
}

#[test]
fn test_signal_flips_when_period_elapses() {
    let mut signal = new_signal();

    assert!(signal.tick(5.0));
    assert_eq!(signal.color(), SignalColor::Red);
    assert_eq!(signal.last_transition(), 5.0);

    assert!(!signal.tick(9.9));
    assert_eq!(signal.color(), SignalColor::Red);

    assert!(signal.tick(10.0));
    assert_eq!(signal.color(), SignalColor::Green);
}

/// Ticking at every period boundary flips exactly once per period
#[test]
fn test_signal_periodicity() {
    for k in 0..8u32 {
        let mut signal = new_signal();
        let mut flips = 0;
        for i in 1..=k {
            if signal.tick(i as f64 * f64::from(SIGNAL_PERIOD)) {
                flips += 1;
            }
        }
        assert_eq!(flips, k);
        let expected = if k % 2 == 0 {
            SignalColor::Green
        } else {
            SignalColor::Red
        };
        assert_eq!(signal.color(), expected, "after {} periods", k);
    }
}

/// Finer ticks inside each period do not add extra flips
#[test]
fn test_signal_periodicity_with_sub_period_ticks() {
    let mut signal = new_signal();
    let flips = (1..=20).filter(|i| signal.tick(*i as f64)).count();
    assert_eq!(flips, 4);
    assert!(signal.is_green());
}

/// A long gap between ticks still only produces one flip, and the timer
/// restarts from that tick
#[test]
fn test_signal_flips_once_per_tick() {
    let mut signal = new_signal();
    assert!(signal.tick(12.0));
    assert_eq!(signal.color(), SignalColor::Red);
    assert_eq!(signal.last_transition(), 12.0);

    assert!(!signal.tick(16.0));
    assert!(signal.tick(17.0));
    assert!(signal.is_green());
}

#[test]
fn test_signal_drawable() {
    let mut signal = new_signal();
    assert_eq!(signal.x(), 400.0);
    assert_eq!(signal.extent(), Extent::new(50.0, 50.0));
    assert_eq!(signal.rgb(), Rgb::GREEN);

    signal.tick(5.0);
    assert_eq!(signal.rgb(), Rgb::RED);
}
