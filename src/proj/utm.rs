//! Universal Transverse Mercator grid on top of the Krüger-series projection.
//!
//! Zones are 6° wide with the Norway (31V/32V) and Svalbard (31X–37X)
//! irregularities. Latitude bands follow the MGRS 8° banding, with band X
//! stretched to 84°N.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::coords::Geodetic;
use crate::datum::Datum;
use crate::error::ProjError;
use crate::proj::transverse_mercator::TransverseMercator;

/// Central meridian scale factor.
pub const K0: f64 = 0.9996;
/// False easting (metres).
pub const FALSE_EASTING: f64 = 500_000.0;
/// False northing in the southern hemisphere (metres).
pub const FALSE_NORTHING: f64 = 10_000_000.0;

pub const MIN_LAT: f64 = -80.0;
pub const MAX_LAT: f64 = 84.0;

/// MGRS latitude bands, 8° each from 80°S; the last X covers 72°N–84°N.
pub const LAT_BANDS: &str = "CDEFGHJKLMNPQRSTUVWXX";

const MAX_EASTING: f64 = 1_000_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
        }
    }
}

/// A UTM grid reference.
///
/// Convergence (degrees) and scale are filled in by [`forward`]; parsed or
/// hand-built coordinates leave them empty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    #[serde(default)]
    pub band: Option<char>,
    pub easting: f64,
    pub northing: f64,
    #[serde(default)]
    pub convergence: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
}

impl UtmCoordinate {
    pub fn new(
        zone: u8,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
    ) -> Result<Self, ProjError> {
        let coord = Self {
            zone,
            hemisphere,
            band: None,
            easting,
            northing,
            convergence: None,
            scale: None,
        };
        coord.validate()?;
        Ok(coord)
    }

    /// Build from a zone and latitude band letter; bands N and above are northern.
    pub fn with_band(zone: u8, band: char, easting: f64, northing: f64) -> Result<Self, ProjError> {
        let band = band.to_ascii_uppercase();
        if !LAT_BANDS.contains(band) {
            return Err(ProjError::InvalidParameter(format!(
                "latitude band {band:?} not in {LAT_BANDS}"
            )));
        }
        let hemisphere = if band >= 'N' {
            Hemisphere::North
        } else {
            Hemisphere::South
        };
        let mut coord = Self::new(zone, hemisphere, easting, northing)?;
        coord.band = Some(band);
        Ok(coord)
    }

    /// Check the zone and that easting/northing lie on the grid.
    pub fn validate(&self) -> Result<(), ProjError> {
        if !(1..=60).contains(&self.zone) {
            return Err(ProjError::OutOfRange(format!(
                "zone {} outside 1..=60",
                self.zone
            )));
        }
        if !(0.0..=MAX_EASTING).contains(&self.easting) {
            return Err(ProjError::OutOfRange(format!(
                "easting {} outside [0, {MAX_EASTING}]",
                self.easting
            )));
        }
        if !(0.0..=FALSE_NORTHING).contains(&self.northing) {
            return Err(ProjError::OutOfRange(format!(
                "northing {} outside [0, {FALSE_NORTHING}]",
                self.northing
            )));
        }
        Ok(())
    }

    /// Unproject onto `datum`.
    pub fn to_geodetic(&self, datum: &'static Datum) -> Result<Geodetic, ProjError> {
        inverse(self, datum)
    }

    /// Render with `dp` decimal places on easting and northing.
    pub fn to_string_with(&self, dp: usize) -> String {
        let prefix = match self.band {
            Some(band) => format!("{}{}", self.zone, band),
            None => format!("{} {}", self.zone, self.hemisphere.letter()),
        };
        format!("{prefix} {:.dp$} {:.dp$}", self.easting, self.northing)
    }
}

impl fmt::Display for UtmCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(3))
    }
}

impl FromStr for UtmCoordinate {
    type Err = ProjError;

    /// Accepts `"34T 388360.123 5263231.456"` (zone with band) and
    /// `"34 N 388360.123 5263231.456"` (zone, then hemisphere or band).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ProjError::InvalidParameter(format!("invalid UTM coordinate: {s:?}"));
        let tokens: Vec<&str> = s.split_whitespace().collect();

        let (zone_text, letter, rest) = match tokens.as_slice() {
            [zone_band, e, n] => {
                let (split, _) = zone_band.char_indices().last().ok_or_else(bad)?;
                let (zone, band) = zone_band.split_at(split);
                (zone, band, [*e, *n])
            }
            [zone, letter, e, n] => (*zone, *letter, [*e, *n]),
            _ => return Err(bad()),
        };

        let zone: u8 = zone_text.parse().map_err(|_| bad())?;
        let mut letters = letter.chars();
        let letter = match (letters.next(), letters.next()) {
            (Some(c), None) => c.to_ascii_uppercase(),
            _ => return Err(bad()),
        };
        let easting: f64 = rest[0].parse().map_err(|_| bad())?;
        let northing: f64 = rest[1].parse().map_err(|_| bad())?;

        // A separate N/S is a hemisphere; glued to the zone it is a band
        match (tokens.len(), letter) {
            (4, 'N') => Self::new(zone, Hemisphere::North, easting, northing),
            (4, 'S') => Self::new(zone, Hemisphere::South, easting, northing),
            _ => Self::with_band(zone, letter, easting, northing),
        }
    }
}

/// Inverse projection result with the grid convergence (degrees) and point scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtmInverse {
    pub point: Geodetic,
    pub convergence: f64,
    pub scale: f64,
}

/// Longitude normalised to [-180°, 180°).
pub fn wrap_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to the modulus itself
    if wrapped >= 180.0 {
        -180.0
    } else {
        wrapped
    }
}

/// Latitude band letter, or `None` outside the UTM latitude range.
pub fn lat_band(lat: f64) -> Option<char> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return None;
    }
    let idx = (lat / 8.0 + 10.0).floor() as usize;
    LAT_BANDS.chars().nth(idx)
}

/// Zone number and latitude band for a point, applying the Norway/Svalbard exceptions.
///
/// Any finite longitude is accepted and wrapped to [-180°, 180°) first.
pub fn grid_zone(lat: f64, lon: f64) -> Result<(u8, char), ProjError> {
    let band = lat_band(lat).ok_or_else(|| {
        ProjError::OutOfRange(format!("latitude {lat} outside [{MIN_LAT}, {MAX_LAT}]"))
    })?;
    if !lon.is_finite() {
        return Err(ProjError::OutOfRange(format!("longitude {lon} is not finite")));
    }
    let lon = wrap_lon(lon);
    let regular = (((lon + 180.0) / 6.0).floor() as u8 + 1).clamp(1, 60);

    let zone = match (regular, band) {
        (31, 'V') if lon >= 3.0 => 32,
        (32, 'X') if lon < 9.0 => 31,
        (32, 'X') => 33,
        (34, 'X') if lon < 21.0 => 33,
        (34, 'X') => 35,
        (36, 'X') if lon < 33.0 => 35,
        (36, 'X') => 37,
        _ => regular,
    };
    if zone != regular {
        debug!("zone {regular}{band} exception at lon {lon}: using zone {zone}");
    }
    Ok((zone, band))
}

/// Project a geodetic point to UTM on its datum's ellipsoid.
pub fn forward(point: &Geodetic) -> Result<UtmCoordinate, ProjError> {
    let lat = point.lat;
    let lon = wrap_lon(point.lon);
    let (zone, band) = grid_zone(lat, lon)?;
    let hemisphere = if lat >= 0.0 {
        Hemisphere::North
    } else {
        Hemisphere::South
    };

    let tm = TransverseMercator::utm_zone(
        point.datum.ellipsoid,
        zone,
        hemisphere == Hemisphere::North,
    );
    let p = tm.project(lon.to_radians(), lat.to_radians());

    Ok(UtmCoordinate {
        zone,
        hemisphere,
        band: Some(band),
        easting: p.x,
        northing: p.y,
        convergence: Some(p.convergence.to_degrees()),
        scale: Some(p.scale),
    })
}

/// Unproject a UTM coordinate onto `datum`, with convergence and scale.
pub fn unproject(coord: &UtmCoordinate, datum: &'static Datum) -> Result<UtmInverse, ProjError> {
    coord.validate()?;

    let tm = TransverseMercator::utm_zone(
        datum.ellipsoid,
        coord.zone,
        coord.hemisphere == Hemisphere::North,
    );
    let u = tm.unproject(coord.easting, coord.northing);
    let lat = u.lat.to_degrees();
    let lon = wrap_lon(u.lon.to_degrees());

    if let Some(band) = coord.band {
        let actual = lat_band(lat);
        if actual != Some(band) {
            warn!(
                "{coord}: latitude {lat:.6} falls in band {}, not {band}",
                actual.map_or_else(|| "-".to_string(), String::from)
            );
        }
    }

    Ok(UtmInverse {
        point: Geodetic::on_datum(lat, lon, 0.0, datum),
        convergence: u.convergence.to_degrees(),
        scale: u.scale,
    })
}

/// Unproject a UTM coordinate onto `datum`.
pub fn inverse(coord: &UtmCoordinate, datum: &'static Datum) -> Result<Geodetic, ProjError> {
    unproject(coord, datum).map(|u| u.point)
}
