//! Core types for the lane simulation
//!
//! These are standalone types shared by the signal, the vehicles and the
//! simulation world.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub SimId);

/// The two states of the signal light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalColor {
    Green,
    Red,
}

impl SignalColor {
    /// The other color
    pub fn flipped(self) -> Self {
        match self {
            SignalColor::Green => SignalColor::Red,
            SignalColor::Red => SignalColor::Green,
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            SignalColor::Green => Rgb::GREEN,
            SignalColor::Red => Rgb::RED,
        }
    }
}

/// An 8-bit RGB fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// Width (along the lane) and height of a drawable footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Anything the presentation layer can draw as a filled rectangle on the lane.
///
/// The simulation never draws; a renderer only needs the left x coordinate,
/// the footprint and the fill color.
pub trait Drawable {
    /// Left edge on the lane axis
    fn x(&self) -> f32;

    fn extent(&self) -> Extent;

    fn rgb(&self) -> Rgb;
}

/// Default lane width in world units
pub const LANE_LENGTH: f32 = 800.0;

/// Where a vehicle re-enters after crossing the right bound
pub const REENTRY_OFFSET: f32 = -50.0;

/// Seconds between signal color changes
pub const SIGNAL_PERIOD: f32 = 5.0;

/// Side of the square signal footprint
pub const SIGNAL_SIZE: f32 = 50.0;

/// Default vehicle footprint
pub const VEHICLE_LENGTH: f32 = 40.0;
pub const VEHICLE_HEIGHT: f32 = 20.0;

/// Distance a moving vehicle covers per tick
pub const VEHICLE_SPEED: f32 = 5.0;

/// Distance between consecutive spawn slots
pub const SPAWN_SPACING: f32 = 140.0;

/// Vehicles on the lane when a simulation starts
pub const INITIAL_VEHICLES: usize = 5;

/// How far before a red signal vehicles start reacting to it
pub const SIGNAL_LOOK_AHEAD: f32 = 100.0;

/// Extra distance kept from a red signal
pub const SIGNAL_MARGIN: f32 = 10.0;

/// Clearance below which a vehicle holds position
pub const STOPPING_THRESHOLD: f32 = 20.0;
