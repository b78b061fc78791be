//! Latitude/longitude points on an ellipsoidal earth, tagged with their datum.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coords::Cartesian;
use crate::datum::{self, Datum};
use crate::dms::{self, DmsForm};
use crate::error::{GeoError, ProjError};
use crate::proj::utm::{self, UtmCoordinate};

/// Geodetic point: latitude/longitude in degrees, height in metres above the ellipsoid.
///
/// Latitude in [-90, 90] and longitude in (-180, 180] are expected but not enforced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(with = "datum::serde_by_name", default = "Datum::reference")]
    pub datum: &'static Datum,
}

impl Geodetic {
    /// Point on the reference datum at zero height.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self::on_datum(lat, lon, 0.0, Datum::reference())
    }

    /// Point on the reference datum.
    pub fn with_height(lat: f64, lon: f64, height: f64) -> Self {
        Self::on_datum(lat, lon, height, Datum::reference())
    }

    pub fn on_datum(lat: f64, lon: f64, height: f64, datum: &'static Datum) -> Self {
        Self {
            lat,
            lon,
            height,
            datum,
        }
    }

    /// Point on the reference datum from angle text such as `51° 28′ 40.12″ N`.
    pub fn from_dms(lat: &str, lon: &str, height: Option<f64>) -> Result<Self, GeoError> {
        let lat = dms::parse_dms(lat)?;
        let lon = dms::parse_dms(lon)?;
        Ok(Self::with_height(lat, lon, height.unwrap_or(0.0)))
    }

    /// Convert to ECEF using the datum's ellipsoid.
    pub fn to_cartesian(&self) -> Cartesian {
        let phi = self.lat.to_radians();
        let lambda = self.lon.to_radians();
        let h = self.height;
        let ell = &self.datum.ellipsoid;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let nu = ell.prime_vertical_radius(phi);

        Cartesian::new(
            (nu + h) * cos_phi * cos_lambda,
            (nu + h) * cos_phi * sin_lambda,
            (nu * (1.0 - ell.e2) + h) * sin_phi,
        )
    }

    /// This point expressed on another datum.
    pub fn convert_datum(&self, to: &'static Datum) -> Geodetic {
        datum::convert(self, to)
    }

    /// Project to UTM on this point's ellipsoid.
    pub fn to_utm(&self) -> Result<UtmCoordinate, ProjError> {
        utm::forward(self)
    }

    /// Render as `lat, lon` in the given form, optionally followed by the height.
    pub fn to_string_with(&self, form: DmsForm, dp: Option<usize>, height_dp: Option<usize>) -> String {
        let mut s = format!(
            "{}, {}",
            dms::to_lat(self.lat, form, dp),
            dms::to_lon(self.lon, form, dp)
        );
        if let Some(hdp) = height_dp {
            s.push_str(&format!(" {:+.hdp$}m", self.height));
        }
        s
    }
}

impl fmt::Display for Geodetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(DmsForm::DegMinSec, None, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::{NAD27, OSGB36, WGS84};
    use crate::error::AngleError;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_cartesian_known_point() {
        let c = Geodetic::new(51.4778, -0.0016).to_cartesian();
        assert_relative_eq!(c.x, 3_980_581.210, epsilon = 1e-3);
        assert_relative_eq!(c.y, -111.159, epsilon = 1e-3);
        assert_relative_eq!(c.z, 4_966_824.522, epsilon = 1e-3);
    }

    #[test]
    fn test_equator_prime_meridian() {
        let c = Geodetic::with_height(0.0, 0.0, 100.0).to_cartesian();
        assert_relative_eq!(c.x, 6_378_237.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 0.0);
        assert_relative_eq!(c.z, 0.0);
    }

    #[test]
    fn test_roundtrip_all_datums() {
        let cases = [(0.0, 0.0, 0.0), (45.0, 90.0, 1000.0), (-33.9, 151.2, -30.0), (89.9, -179.9, 5.0)];
        for datum in Datum::all() {
            for &(lat, lon, h) in &cases {
                let g = Geodetic::on_datum(lat, lon, h, datum);
                let back = g.to_cartesian().to_geodetic(datum);
                assert_relative_eq!(back.lat, lat, epsilon = 1e-9);
                assert_relative_eq!(back.lon, lon, epsilon = 1e-9);
                assert_relative_eq!(back.height, h, epsilon = 1e-6);
                assert_eq!(back.datum, datum);
            }
        }
    }

    #[test]
    fn test_pole_roundtrip() {
        let g = Geodetic::with_height(90.0, 0.0, 100.0);
        let back = g.to_cartesian().to_geodetic(&WGS84);
        assert_relative_eq!(back.lat, 90.0, epsilon = 1e-9);
        assert_relative_eq!(back.height, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_from_dms() {
        let g = Geodetic::from_dms("51° 28′ 40.12″ N", "000° 00′ 05.31″ W", Some(12.5)).unwrap();
        assert_relative_eq!(g.lat, 51.4778, epsilon = 1e-4);
        assert_relative_eq!(g.lon, -0.0015, epsilon = 1e-4);
        assert_relative_eq!(g.height, 12.5);
        assert!(g.datum.is_reference());
    }

    #[test]
    fn test_from_dms_malformed() {
        let err = Geodetic::from_dms("51 28 40 12", "0", None).unwrap_err();
        assert_eq!(
            err,
            GeoError::Angle(AngleError::MalformedAngleText("51 28 40 12".into()))
        );
    }

    #[test]
    fn test_display() {
        let g = Geodetic::with_height(51.4778, -0.0016, 3.0);
        assert_eq!(g.to_string(), "51°28′40″N, 000°00′06″W");
        assert_eq!(
            g.to_string_with(DmsForm::Deg, Some(4), Some(1)),
            "51.4778°N, 000.0016°W +3.0m"
        );
    }

    #[test]
    fn test_convert_datum_tags_result() {
        let g = Geodetic::new(51.4778, -0.0016).convert_datum(&OSGB36);
        assert_eq!(g.datum.name, "OSGB36");
    }

    #[test]
    fn test_serde_by_datum_name() {
        let g = Geodetic::on_datum(40.0, -100.0, 10.0, &NAD27);
        let json = serde_json::to_value(g).unwrap();
        assert_eq!(json["datum"], "NAD27");

        let back: Geodetic = serde_json::from_value(json).unwrap();
        assert_eq!(back, g);

        let defaulted: Geodetic = serde_json::from_str(r#"{"lat":1.0,"lon":2.0}"#).unwrap();
        assert!(defaulted.datum.is_reference());
        assert_eq!(defaulted.height, 0.0);

        let unknown = serde_json::from_str::<Geodetic>(r#"{"lat":1.0,"lon":2.0,"datum":"Potsdam"}"#);
        assert!(unknown.is_err());
    }
}
