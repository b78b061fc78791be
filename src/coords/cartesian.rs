//! Earth-centred, earth-fixed cartesian points and the cartesian → geodetic
//! conversion (Bowring 1985, closed form).

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::coords::Geodetic;
use crate::datum::Datum;

/// Below this distance from the minor axis (metres) the point is treated as polar.
const POLAR_AXIS_EPSILON: f64 = 1e-12;

/// ECEF point in metres. x → 0°N 0°E, y → 0°N 90°E, z → 90°N.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert to latitude/longitude/height on `datum`.
    ///
    /// Uses Bowring's (1985) formulation for μm precision without iteration.
    /// Points on the polar axis get latitude ±90° by the sign of z.
    pub fn to_geodetic(&self, datum: &'static Datum) -> Geodetic {
        let Cartesian { x, y, z } = *self;
        let ell = &datum.ellipsoid;
        let (a, b, e2, ep2) = (ell.a, ell.b, ell.e2, ell.ep2);

        let p = x.hypot(y); // distance from minor axis
        let lon = y.atan2(x);

        let phi = if p < POLAR_AXIS_EPSILON {
            trace!("point on the polar axis (z = {z}), latitude set to a pole");
            if z < 0.0 {
                -FRAC_PI_2
            } else {
                FRAC_PI_2
            }
        } else {
            let r = p.hypot(z); // polar radius

            // parametric latitude (Bowring eqn 17, replacing tanβ = z·a / p·b)
            let tan_beta = (b * z) / (a * p) * (1.0 + ep2 * b / r);
            let cos_beta = 1.0 / (1.0 + tan_beta * tan_beta).sqrt();
            let sin_beta = tan_beta * cos_beta;

            // geodetic latitude (Bowring eqn 18: tanφ = z+ε²bsin³β / p−e²cos³β)
            (z + ep2 * b * sin_beta.powi(3)).atan2(p - e2 * a * cos_beta.powi(3))
        };

        // height above ellipsoid (Bowring eqn 7)
        let (sin_phi, cos_phi) = phi.sin_cos();
        let nu = ell.prime_vertical_radius(phi);
        let height = p * cos_phi + z * sin_phi - (a * a / nu);

        Geodetic::on_datum(phi.to_degrees(), lon.to_degrees(), height, datum)
    }

    /// Render as `[x,y,z]` with `dp` decimal places.
    pub fn to_string_with(&self, dp: usize) -> String {
        format!("[{:.dp$},{:.dp$},{:.dp$}]", self.x, self.y, self.z)
    }
}

impl fmt::Display for Cartesian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(0))
    }
}
