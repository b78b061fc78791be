//! Geodetic coordinate conversion: latitude/longitude ↔ ECEF cartesian,
//! Helmert datum shifts routed through WGS84, and UTM grid references.

pub mod batch;
pub mod coords;
pub mod datum;
pub mod dms;
pub mod error;
pub mod proj;

#[cfg(feature = "python")]
mod py;

pub use coords::{Cartesian, Geodetic};
pub use datum::Datum;
pub use error::GeoError;
pub use proj::ellipsoid::Ellipsoid;
pub use proj::utm::{Hemisphere, UtmCoordinate};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
