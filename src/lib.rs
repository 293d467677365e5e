//! Single-lane traffic light simulation library
//!
//! A signal light cycling between green and red and a set of vehicles on one
//! closed-loop lane, each deciding every tick whether to advance or hold.

pub mod simulation;
