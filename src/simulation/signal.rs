//! Signal light logic for the lane simulation

use log::debug;

use super::config::SignalConfig;
use super::types::{Drawable, Extent, Rgb, SignalColor};

/// The signal light standing beside the lane
#[derive(Debug, Clone)]
pub struct SimSignal {
    position: f32,
    color: SignalColor,
    /// Timestamp of the last color change (or of creation)
    last_transition: f64,
    /// Time spent in each color
    period: f32,
    size: f32,
}

impl SimSignal {
    /// Create a green signal whose timer starts at `now`
    pub fn new(config: &SignalConfig, now: f64) -> Self {
        Self {
            position: config.position,
            color: SignalColor::Green,
            last_transition: now,
            period: config.period,
            size: config.size,
        }
    }

    /// Advance the timer. Flips the color once a full period has elapsed
    /// since the last change and returns whether a flip happened.
    pub fn tick(&mut self, now: f64) -> bool {
        if now - self.last_transition < f64::from(self.period) {
            return false;
        }

        self.color = self.color.flipped();
        self.last_transition = now;
        debug!("Signal turned {:?} at t={:.2}s", self.color, now);
        true
    }

    pub fn color(&self) -> SignalColor {
        self.color
    }

    pub fn is_green(&self) -> bool {
        self.color == SignalColor::Green
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn last_transition(&self) -> f64 {
        self.last_transition
    }
}

impl Drawable for SimSignal {
    fn x(&self) -> f32 {
        self.position
    }

    fn extent(&self) -> Extent {
        Extent::new(self.size, self.size)
    }

    fn rgb(&self) -> Rgb {
        self.color.rgb()
    }
}
