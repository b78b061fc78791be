//! Datum-to-datum conversion routed through the reference datum.

use log::debug;

use crate::coords::Geodetic;
use crate::datum::Datum;

/// Convert a geodetic point to another datum.
///
/// Polar → cartesian, Helmert transform, cartesian → polar. When neither end is
/// the reference datum the point is first taken to the reference datum, so every
/// conversion factors through WGS84 (at the cost of a second linearization).
pub fn convert(point: &Geodetic, to: &'static Datum) -> Geodetic {
    if point.datum == to {
        return *point;
    }

    let (source, transform) = if point.datum.is_reference() {
        (*point, to.transform)
    } else if to.is_reference() {
        (*point, point.datum.transform.inverse())
    } else {
        debug!(
            "converting {} -> {} via {}",
            point.datum.name,
            to.name,
            Datum::reference().name
        );
        (convert(point, Datum::reference()), to.transform)
    };

    let cartesian = source.to_cartesian();
    transform.apply(&cartesian).to_geodetic(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::{ED50, NAD27, OSGB36, TOKYO_JAPAN, WGS84};
    use approx::assert_relative_eq;

    #[test]
    fn test_same_datum_is_unchanged() {
        let p = Geodetic::on_datum(52.1, 0.3, 12.0, &OSGB36);
        assert_eq!(convert(&p, &OSGB36), p);
        let w = Geodetic::new(47.5, 19.0);
        assert_eq!(convert(&w, &WGS84), w);
    }

    #[test]
    fn test_greenwich_to_osgb36() {
        // Royal Observatory: 51.4778°N, 0.0016°W on WGS84 sits on the OSGB36 prime meridian
        let p = Geodetic::new(51.4778, -0.0016);
        let osgb = convert(&p, &OSGB36);
        assert_eq!(osgb.datum.name, "OSGB36");
        assert_relative_eq!(osgb.lat, 51.477_284, epsilon = 1e-6);
        assert_relative_eq!(osgb.lon, 0.000_020, epsilon = 1e-6);
        assert_relative_eq!(osgb.height, -45.905, epsilon = 1e-3);
    }

    #[test]
    fn test_round_trip_through_reference() {
        let p = Geodetic::with_height(35.6586, 139.7454, 40.0);
        let tokyo = convert(&p, &TOKYO_JAPAN);
        // Pure translation of several hundred metres moves the point noticeably
        assert!((tokyo.lat - p.lat).abs() > 1e-3);
        let back = convert(&tokyo, &WGS84);
        assert_relative_eq!(back.lat, p.lat, epsilon = 1e-9);
        assert_relative_eq!(back.lon, p.lon, epsilon = 1e-9);
        assert_relative_eq!(back.height, p.height, epsilon = 1e-6);
    }

    #[test]
    fn test_non_reference_pair_goes_through_reference() {
        let p = Geodetic::on_datum(40.0, -100.0, 0.0, &NAD27);
        let direct = convert(&p, &ED50);
        let via = convert(&convert(&p, &WGS84), &ED50);
        assert_eq!(direct, via);
        assert_eq!(direct.datum.name, "ED50");
    }
}
