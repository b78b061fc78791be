//! Geodetic datums: an ellipsoid plus a Helmert transform from WGS84.
//!
//! The table is closed. Every datum is reached from the WGS84 reference datum
//! through its own transform; WGS84's transform is the identity.

pub mod convert;
pub mod helmert;

use crate::error::DatumError;
use crate::proj::ellipsoid::{self, Ellipsoid};
use helmert::{Rotation, Transformation, Translation};

pub use convert::convert;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datum {
    pub name: &'static str,
    pub ellipsoid: Ellipsoid,
    /// Transform from the reference datum (WGS84) to this datum.
    pub transform: Transformation,
}

impl Datum {
    /// Look up a datum by name (case-insensitive).
    pub fn by_name(name: &str) -> Result<&'static Datum, DatumError> {
        DATUMS
            .iter()
            .copied()
            .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| DatumError::UnknownDatum(name.to_string()))
    }

    /// All datums, reference datum first.
    pub fn all() -> impl Iterator<Item = &'static Datum> {
        DATUMS.iter().copied()
    }

    /// The reference datum every conversion is routed through.
    pub fn reference() -> &'static Datum {
        &WGS84
    }

    pub fn is_reference(&self) -> bool {
        self.name == WGS84.name
    }
}

pub static WGS84: Datum = Datum {
    name: "WGS84",
    ellipsoid: ellipsoid::WGS84,
    transform: Transformation::IDENTITY,
};

// Functionally equivalent to WGS84 (2009); a real WGS84<->NAD83 conversion
// needs epoch-aware modelling.
pub static NAD83: Datum = Datum {
    name: "NAD83",
    ellipsoid: ellipsoid::GRS80,
    transform: Transformation::new(
        Translation::new(1.004, -1.910, -0.515),
        Rotation::new(0.0267, 0.00034, 0.011, -0.0015),
    ),
};

pub static OSGB36: Datum = Datum {
    name: "OSGB36",
    ellipsoid: ellipsoid::AIRY_1830,
    transform: Transformation::new(
        Translation::new(-446.448, 125.157, -542.060),
        Rotation::new(-0.1502, -0.2470, -0.8421, 20.4894),
    ),
};

pub static ED50: Datum = Datum {
    name: "ED50",
    ellipsoid: ellipsoid::INTL_1924,
    transform: Transformation::new(
        Translation::new(89.5, 93.8, 123.1),
        Rotation::new(0.0, 0.0, 0.156, -1.2),
    ),
};

pub static IRL1975: Datum = Datum {
    name: "Irl1975",
    ellipsoid: ellipsoid::AIRY_MODIFIED,
    transform: Transformation::new(
        Translation::new(-482.530, 130.596, -564.557),
        Rotation::new(-1.042, -0.214, -0.631, -8.150),
    ),
};

pub static TOKYO_JAPAN: Datum = Datum {
    name: "TokyoJapan",
    ellipsoid: ellipsoid::BESSEL_1841,
    transform: Transformation::new(
        Translation::new(148.0, -507.0, -685.0),
        Rotation::new(0.0, 0.0, 0.0, 0.0),
    ),
};

pub static NAD27: Datum = Datum {
    name: "NAD27",
    ellipsoid: ellipsoid::CLARKE_1866,
    transform: Transformation::new(
        Translation::new(8.0, -160.0, -176.0),
        Rotation::new(0.0, 0.0, 0.0, 0.0),
    ),
};

pub static WGS72: Datum = Datum {
    name: "WGS72",
    ellipsoid: ellipsoid::WGS72,
    transform: Transformation::new(
        Translation::new(0.0, 0.0, -4.5),
        Rotation::new(0.0, 0.0, 0.554, -0.22),
    ),
};

static DATUMS: [&Datum; 8] = [
    &WGS84,
    &NAD83,
    &OSGB36,
    &ED50,
    &IRL1975,
    &TOKYO_JAPAN,
    &NAD27,
    &WGS72,
];

/// Serde adapter that stores a datum by its table name.
pub(crate) mod serde_by_name {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Datum;

    pub fn serialize<S: Serializer>(datum: &&'static Datum, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(datum.name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<&'static Datum, D::Error> {
        let name = String::deserialize(d)?;
        Datum::by_name(&name).map_err(serde::de::Error::custom)
    }
}
