//! Reference ellipsoids and the named ellipsoid table.

use serde::{Deserialize, Serialize};

use crate::error::DatumError;

/// Largest accepted relative mismatch between `f` and `(a - b) / a`.
///
/// Published tables quote `b` and `f` independently and round them differently
/// (WGS72 is off by ~1e-6 relative).
const FLATTENING_TOLERANCE: f64 = 1e-5;

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EllipsoidParams", into = "EllipsoidParams")]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// Flattening (dimensionless)
    pub f: f64,
    /// First eccentricity squared: f(2 - f)
    pub e2: f64,
    /// Second eccentricity squared: e^2 / (1 - e^2)
    pub ep2: f64,
    /// Third flattening: f / (2 - f)
    pub n: f64,
}

/// The three defining parameters, as they appear in configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EllipsoidParams {
    pub a: f64,
    pub b: f64,
    pub f: f64,
}

impl Ellipsoid {
    /// Build an ellipsoid from trusted constants without validation.
    const fn from_parts(a: f64, b: f64, f: f64) -> Self {
        let e2 = 2.0 * f - f * f;
        let ep2 = e2 / (1.0 - e2);
        let n = f / (2.0 - f);
        Self {
            a,
            b,
            f,
            e2,
            ep2,
            n,
        }
    }

    /// Build a user-supplied ellipsoid, checking that it is physically valid.
    pub fn try_new(a: f64, b: f64, f: f64) -> Result<Self, DatumError> {
        if !(a.is_finite() && b.is_finite() && f.is_finite()) {
            return Err(DatumError::InvalidEllipsoid(format!(
                "non-finite parameters a={a}, b={b}, f={f}"
            )));
        }
        if !(a > b && b > 0.0) {
            return Err(DatumError::InvalidEllipsoid(format!(
                "semi-axes must satisfy a > b > 0, got a={a}, b={b}"
            )));
        }
        if !(f > 0.0 && f < 1.0) {
            return Err(DatumError::InvalidEllipsoid(format!(
                "flattening must lie in (0, 1), got {f}"
            )));
        }
        let f_axes = (a - b) / a;
        if ((f - f_axes) / f).abs() > FLATTENING_TOLERANCE {
            return Err(DatumError::InvalidEllipsoid(format!(
                "flattening {f} does not match (a - b) / a = {f_axes}"
            )));
        }
        Ok(Self::from_parts(a, b, f))
    }

    /// Look up a named ellipsoid (case-insensitive).
    pub fn by_name(name: &str) -> Result<Self, DatumError> {
        ELLIPSOIDS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|&(_, e)| e)
            .ok_or_else(|| DatumError::UnknownEllipsoid(name.to_string()))
    }

    /// All named ellipsoids, in table order.
    pub fn all() -> impl Iterator<Item = (&'static str, Ellipsoid)> {
        ELLIPSOIDS.iter().copied()
    }

    /// Get the first eccentricity.
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// Radius of curvature in the prime vertical at latitude `phi` (radians).
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        let s = phi.sin();
        self.a / (1.0 - self.e2 * s * s).sqrt()
    }
}

impl TryFrom<EllipsoidParams> for Ellipsoid {
    type Error = DatumError;

    fn try_from(p: EllipsoidParams) -> Result<Self, Self::Error> {
        Ellipsoid::try_new(p.a, p.b, p.f)
    }
}

impl From<Ellipsoid> for EllipsoidParams {
    fn from(e: Ellipsoid) -> Self {
        Self {
            a: e.a,
            b: e.b,
            f: e.f,
        }
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::from_parts(6_378_137.0, 6_356_752.314_245, 1.0 / 298.257_223_563);
pub const GRS80: Ellipsoid = Ellipsoid::from_parts(6_378_137.0, 6_356_752.314_140, 1.0 / 298.257_222_101);
pub const AIRY_1830: Ellipsoid = Ellipsoid::from_parts(6_377_563.396, 6_356_256.909, 1.0 / 299.324_964_6);
pub const AIRY_MODIFIED: Ellipsoid = Ellipsoid::from_parts(6_377_340.189, 6_356_034.448, 1.0 / 299.324_964_6);
pub const BESSEL_1841: Ellipsoid = Ellipsoid::from_parts(6_377_397.155, 6_356_078.962_818, 1.0 / 299.152_812_8);
pub const CLARKE_1866: Ellipsoid = Ellipsoid::from_parts(6_378_206.4, 6_356_583.8, 1.0 / 294.978_698_214);
// aka Hayford
pub const INTL_1924: Ellipsoid = Ellipsoid::from_parts(6_378_388.0, 6_356_911.946, 1.0 / 297.0);
pub const WGS72: Ellipsoid = Ellipsoid::from_parts(6_378_135.0, 6_356_750.5, 1.0 / 298.26);

static ELLIPSOIDS: [(&str, Ellipsoid); 8] = [
    ("WGS84", WGS84),
    ("GRS80", GRS80),
    ("Airy1830", AIRY_1830),
    ("AiryModified", AIRY_MODIFIED),
    ("Bessel1841", BESSEL_1841),
    ("Clarke1866", CLARKE_1866),
    ("Intl1924", INTL_1924),
    ("WGS72", WGS72),
];
