//! PyO3 bindings for batch datum conversion and UTM projection.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::batch;
use crate::coords::Geodetic;
use crate::datum::Datum;
use crate::dms;
use crate::proj::utm::{Hemisphere, UtmCoordinate};

type Array<'py, T> = Bound<'py, PyArray1<T>>;

fn datum(name: &str) -> PyResult<&'static Datum> {
    Datum::by_name(name).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn check_lengths(lens: &[usize]) -> PyResult<()> {
    if lens.windows(2).any(|w| w[0] != w[1]) {
        return Err(PyValueError::new_err(format!(
            "input arrays must have the same length, got {lens:?}"
        )));
    }
    Ok(())
}

fn to_py<T: numpy::Element>(py: Python<'_>, v: Vec<T>) -> Array<'_, T> {
    PyArray1::from_owned_array(py, ndarray::Array1::from(v))
}

/// Convert arrays of geodetic coordinates from one datum to another.
///
/// Args:
///     lat: 1D array of latitudes (degrees).
///     lon: 1D array of longitudes (degrees).
///     height: 1D array of ellipsoidal heights (metres).
///     src_datum: Source datum name (e.g. "OSGB36").
///     dst_datum: Destination datum name.
///
/// Returns:
///     Tuple of (lat, lon, height) arrays on the destination datum.
#[pyfunction]
#[pyo3(signature = (lat, lon, height, src_datum, dst_datum="WGS84"))]
#[allow(clippy::type_complexity)]
pub fn convert_datum<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
    height: PyReadonlyArray1<'py, f64>,
    src_datum: &str,
    dst_datum: &str,
) -> PyResult<(Array<'py, f64>, Array<'py, f64>, Array<'py, f64>)> {
    let (lat, lon, height) = (lat.as_array(), lon.as_array(), height.as_array());
    check_lengths(&[lat.len(), lon.len(), height.len()])?;

    let src = datum(src_datum)?;
    let dst = datum(dst_datum)?;
    let points: Vec<Geodetic> = lat
        .iter()
        .zip(lon.iter())
        .zip(height.iter())
        .map(|((&la, &lo), &h)| Geodetic::on_datum(la, lo, h, src))
        .collect();

    let out = py.allow_threads(move || batch::convert(&points, dst));

    let lats = out.iter().map(|p| p.lat).collect();
    let lons = out.iter().map(|p| p.lon).collect();
    let heights = out.iter().map(|p| p.height).collect();
    Ok((to_py(py, lats), to_py(py, lons), to_py(py, heights)))
}

/// Project arrays of geodetic coordinates to UTM.
///
/// Args:
///     lat: 1D array of latitudes (degrees), each within [-80, 84].
///     lon: 1D array of longitudes (degrees).
///     datum: Datum whose ellipsoid the projection uses.
///
/// Returns:
///     Tuple of (zone, north, easting, northing) arrays.
#[pyfunction]
#[pyo3(signature = (lat, lon, datum="WGS84"))]
#[allow(clippy::type_complexity)]
pub fn to_utm<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
    datum: &str,
) -> PyResult<(Array<'py, u8>, Array<'py, bool>, Array<'py, f64>, Array<'py, f64>)> {
    let (lat, lon) = (lat.as_array(), lon.as_array());
    check_lengths(&[lat.len(), lon.len()])?;

    let d = self::datum(datum)?;
    let points: Vec<Geodetic> = lat
        .iter()
        .zip(lon.iter())
        .map(|(&la, &lo)| Geodetic::on_datum(la, lo, 0.0, d))
        .collect();

    let coords = py.allow_threads(move || {
        batch::to_utm(&points)
            .into_iter()
            .collect::<Result<Vec<UtmCoordinate>, _>>()
    });
    let coords = coords.map_err(|e| PyValueError::new_err(e.to_string()))?;

    let zones = coords.iter().map(|u| u.zone).collect();
    let north = coords
        .iter()
        .map(|u| u.hemisphere == Hemisphere::North)
        .collect();
    let eastings = coords.iter().map(|u| u.easting).collect();
    let northings = coords.iter().map(|u| u.northing).collect();
    Ok((
        to_py(py, zones),
        to_py(py, north),
        to_py(py, eastings),
        to_py(py, northings),
    ))
}

/// Unproject arrays of UTM coordinates to latitude/longitude.
///
/// Args:
///     zone: 1D array of zone numbers (1–60).
///     north: 1D array of hemisphere flags (True for northern).
///     easting: 1D array of eastings (metres).
///     northing: 1D array of northings (metres).
///     datum: Datum whose ellipsoid the projection uses.
///
/// Returns:
///     Tuple of (lat, lon) arrays in degrees.
#[pyfunction]
#[pyo3(signature = (zone, north, easting, northing, datum="WGS84"))]
pub fn from_utm<'py>(
    py: Python<'py>,
    zone: PyReadonlyArray1<'py, u8>,
    north: PyReadonlyArray1<'py, bool>,
    easting: PyReadonlyArray1<'py, f64>,
    northing: PyReadonlyArray1<'py, f64>,
    datum: &str,
) -> PyResult<(Array<'py, f64>, Array<'py, f64>)> {
    let (zone, north) = (zone.as_array(), north.as_array());
    let (easting, northing) = (easting.as_array(), northing.as_array());
    check_lengths(&[zone.len(), north.len(), easting.len(), northing.len()])?;

    let d = self::datum(datum)?;
    let coords = zone
        .iter()
        .zip(north.iter())
        .zip(easting.iter().zip(northing.iter()))
        .map(|((&z, &is_north), (&e, &n))| {
            let hemisphere = if is_north {
                Hemisphere::North
            } else {
                Hemisphere::South
            };
            UtmCoordinate::new(z, hemisphere, e, n)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let points = py.allow_threads(move || {
        batch::from_utm(&coords, d)
            .into_iter()
            .collect::<Result<Vec<Geodetic>, _>>()
    });
    let points = points.map_err(|e| PyValueError::new_err(e.to_string()))?;

    let lats = points.iter().map(|p| p.lat).collect();
    let lons = points.iter().map(|p| p.lon).collect();
    Ok((to_py(py, lats), to_py(py, lons)))
}

/// Parse degree/minute/second strings into decimal degrees.
#[pyfunction]
pub fn parse_dms<'py>(py: Python<'py>, texts: Vec<String>) -> PyResult<Array<'py, f64>> {
    let values = texts
        .iter()
        .map(|t| dms::parse_dms(t))
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(to_py(py, values))
}
