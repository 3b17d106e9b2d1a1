//! Domain models shared by the parser, resolver and travel matrix
//!
//! Value types for coordinates, travel modes and the per-landmark results
//! produced by the travel matrix.

pub mod location;
pub mod travel;

// Re-export commonly used types
pub use location::{Coordinates, Landmark, TravelMode};
pub use travel::{DistancePoint, LegMeasurement, TravelLegResult};
