//! Parallel conversions over slices of points.
//!
//! Output order matches input order. Fallible operations report each point's
//! result separately so one bad point does not sink the batch.

use rayon::prelude::*;

use crate::coords::{Cartesian, Geodetic};
use crate::datum::Datum;
use crate::error::ProjError;
use crate::proj::utm::{self, UtmCoordinate};

pub fn to_cartesian(points: &[Geodetic]) -> Vec<Cartesian> {
    points.par_iter().map(Geodetic::to_cartesian).collect()
}

pub fn to_geodetic(points: &[Cartesian], datum: &'static Datum) -> Vec<Geodetic> {
    points.par_iter().map(|c| c.to_geodetic(datum)).collect()
}

/// Convert every point to `to`; points may start on different datums.
pub fn convert(points: &[Geodetic], to: &'static Datum) -> Vec<Geodetic> {
    points.par_iter().map(|p| p.convert_datum(to)).collect()
}

pub fn to_utm(points: &[Geodetic]) -> Vec<Result<UtmCoordinate, ProjError>> {
    points.par_iter().map(utm::forward).collect()
}

pub fn from_utm(
    coords: &[UtmCoordinate],
    datum: &'static Datum,
) -> Vec<Result<Geodetic, ProjError>> {
    coords.par_iter().map(|u| utm::inverse(u, datum)).collect()
}
