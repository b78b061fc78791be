//! Coordinate value types: ellipsoidal geodetic points and ECEF cartesians.

pub mod cartesian;
pub mod geodetic;

pub use cartesian::Cartesian;
pub use geodetic::Geodetic;
