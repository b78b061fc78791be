//! Seven-parameter Helmert transform, linearized for small rotations.
//!
//!   x' = tx + x·(1+s) − y·rz + z·ry
//!   y' = ty + x·rz + y·(1+s) − z·rx
//!   z' = tz − x·ry + y·rx + z·(1+s)
//!
//! Rotations are given in arc-seconds and the scale in parts per million.
//! `inverse` negates every parameter, which is only a first-order inverse:
//! the round trip leaves a residual proportional to the square of the
//! rotation/scale magnitudes.

use serde::{Deserialize, Serialize};

use crate::coords::Cartesian;

/// Translation component (metres).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Rotation (arc-seconds) and scale (ppm) components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub scale: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub translation: Translation,
    pub rotation: Rotation,
}

impl Translation {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Rotation {
    pub const fn new(rx: f64, ry: f64, rz: f64, scale: f64) -> Self {
        Self { rx, ry, rz, scale }
    }
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation::new(
        Translation::new(0.0, 0.0, 0.0),
        Rotation::new(0.0, 0.0, 0.0, 0.0),
    );

    pub const fn new(translation: Translation, rotation: Rotation) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Negate every parameter. Not a true matrix inverse.
    pub fn inverse(&self) -> Transformation {
        let t = self.translation;
        let r = self.rotation;
        Transformation::new(
            Translation::new(-t.x, -t.y, -t.z),
            Rotation::new(-r.rx, -r.ry, -r.rz, -r.scale),
        )
    }

    /// Apply the linearized similarity transform to an ECEF point.
    pub fn apply(&self, point: &Cartesian) -> Cartesian {
        let Translation { x: tx, y: ty, z: tz } = self.translation;

        // normalise seconds to radians
        let rx = (self.rotation.rx / 3600.0).to_radians();
        let ry = (self.rotation.ry / 3600.0).to_radians();
        let rz = (self.rotation.rz / 3600.0).to_radians();

        // normalise ppm to (s+1)
        let s1 = self.rotation.scale / 1e6 + 1.0;

        let Cartesian { x, y, z } = *point;
        Cartesian::new(
            tx + x * s1 - y * rz + z * ry,
            ty + x * rz + y * s1 - z * rx,
            tz - x * ry + y * rx + z * s1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const POINT: Cartesian = Cartesian {
        x: 3_980_581.210,
        y: -111.159,
        z: 4_966_824.522,
    };

    fn distance(a: &Cartesian, b: &Cartesian) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2) + (a.z - b.z).powi(2)).sqrt()
    }

    #[test]
    fn test_identity_is_noop() {
        let out = Transformation::IDENTITY.apply(&POINT);
        assert_eq!(out, POINT);
        assert!(Transformation::default().is_identity());
    }

    #[test]
    fn test_pure_translation() {
        let t = Transformation::new(Translation::new(8.0, -160.0, -176.0), Rotation::default());
        let out = t.apply(&POINT);
        assert_relative_eq!(out.x, POINT.x + 8.0);
        assert_relative_eq!(out.y, POINT.y - 160.0);
        assert_relative_eq!(out.z, POINT.z - 176.0);
    }

    #[test]
    fn test_scale_only() {
        // 1 ppm on a 6.4e6 m radius vector moves it by ~6.4 m
        let t = Transformation::new(Translation::default(), Rotation::new(0.0, 0.0, 0.0, 1.0));
        let out = t.apply(&POINT);
        assert_relative_eq!(out.x, POINT.x * (1.0 + 1e-6), epsilon = 1e-9);
        assert_relative_eq!(out.z, POINT.z * (1.0 + 1e-6), epsilon = 1e-9);
    }

    #[test]
    fn test_osgb36_parameters() {
        let t = Transformation::new(
            Translation::new(-446.448, 125.157, -542.060),
            Rotation::new(-0.1502, -0.2470, -0.8421, 20.4894),
        );
        let out = t.apply(&POINT);
        assert_relative_eq!(out.x, 3_980_210.373_545, epsilon = 1e-5);
        assert_relative_eq!(out.y, 1.361_331, epsilon = 1e-5);
        assert_relative_eq!(out.z, 4_966_388.996_041, epsilon = 1e-5);
    }

    #[test]
    fn test_inverse_negates_every_parameter() {
        let t = Transformation::new(
            Translation::new(1.0, -2.0, 3.0),
            Rotation::new(0.1, -0.2, 0.3, -4.0),
        );
        let inv = t.inverse();
        assert_eq!(inv.translation, Translation::new(-1.0, 2.0, -3.0));
        assert_eq!(inv.rotation, Rotation::new(-0.1, 0.2, -0.3, 4.0));
        assert_eq!(inv.inverse(), t);
    }

    #[test]
    fn test_inverse_is_only_first_order() {
        let t = Transformation::new(
            Translation::new(-446.448, 125.157, -542.060),
            Rotation::new(-0.1502, -0.2470, -0.8421, 20.4894),
        );
        let back = t.inverse().apply(&t.apply(&POINT));
        let residual = distance(&back, &POINT);
        assert!(residual > 1e-3, "residual unexpectedly small: {residual}");
        assert!(residual < 0.05, "residual too large: {residual}");
    }

    #[test]
    fn test_round_trip_residual_is_quadratic() {
        let residual = |m: f64| {
            let t = Transformation::new(
                Translation::default(),
                Rotation::new(0.5 * m, -0.3 * m, 0.8 * m, 5.0 * m),
            );
            distance(&t.inverse().apply(&t.apply(&POINT)), &POINT)
        };
        let ratio = residual(2.0) / residual(1.0);
        assert!((ratio - 4.0).abs() < 0.1, "ratio = {ratio}");
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = Transformation::new(
            Translation::new(0.0, 0.0, -4.5),
            Rotation::new(0.0, 0.0, 0.554, -0.22),
        );
        let json = serde_json::to_string(&t).unwrap();
        let back: Transformation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
