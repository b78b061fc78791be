//! Transverse Mercator projection: Krüger n-series, 6th order.
//!
//! Implements the Karney (2011) formulation with 6th-order α/β series coefficients,
//! including grid convergence and point scale (Eq 23–26).
//! This is the projection underlying all UTM zones. Accurate to 5 nm within
//! 3900 km of the central meridian.

use crate::error::ProjError;
use crate::proj::common::{asinh, tau_prime_to_tau, tau_to_tau_prime};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::{utm, Projection};

/// Forward projection result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Grid convergence (radians, clockwise from true north to grid north)
    pub convergence: f64,
    /// Point scale factor
    pub scale: f64,
}

/// Inverse projection result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unprojected {
    pub lon: f64,
    pub lat: f64,
    /// Grid convergence (radians)
    pub convergence: f64,
    /// Point scale factor
    pub scale: f64,
}

#[derive(Clone, Debug)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lon0: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    // Precomputed constants
    e: f64,          // First eccentricity
    a_hat: f64,      // A = a/(1+n) * (1 + n²/4 + n⁴/64 + n⁶/256)
    alpha: [f64; 6], // Forward series coefficients
    beta: [f64; 6],  // Inverse series coefficients
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.n;
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        // 2πA is the circumference of a meridian
        let a_hat = ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = Self::alpha_coefficients(n, n2, n3, n4, n5, n6);
        let beta = Self::beta_coefficients(n, n2, n3, n4, n5, n6);

        Self {
            ellipsoid,
            lon0,
            k0,
            false_easting,
            false_northing,
            e: ellipsoid.eccentricity(),
            a_hat,
            alpha,
            beta,
        }
    }

    /// Create a Transverse Mercator for a UTM zone on the given ellipsoid.
    pub fn utm_zone(ellipsoid: Ellipsoid, zone: u8, north: bool) -> Self {
        let lon0 = utm_central_meridian(zone).to_radians();
        let false_northing = if north { 0.0 } else { utm::FALSE_NORTHING };
        Self::new(ellipsoid, lon0, utm::K0, utm::FALSE_EASTING, false_northing)
    }

    /// Forward series coefficients α₁..α₆ (Krüger, 6th order).
    fn alpha_coefficients(n: f64, n2: f64, n3: f64, n4: f64, n5: f64, n6: f64) -> [f64; 6] {
        [
            // α₁
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4 - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            // α₂
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1983433.0 / 1935360.0 * n6,
            // α₃
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4
                + 15061.0 / 26880.0 * n5
                + 167603.0 / 181440.0 * n6,
            // α₄
            49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
            // α₅
            34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
            // α₆
            212378941.0 / 319334400.0 * n6,
        ]
    }

    /// Inverse series coefficients β₁..β₆ (Krüger, 6th order).
    fn beta_coefficients(n: f64, n2: f64, n3: f64, n4: f64, n5: f64, n6: f64) -> [f64; 6] {
        [
            // β₁
            n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
                + 96199.0 / 604800.0 * n6,
            // β₂
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1118711.0 / 3870720.0 * n6,
            // β₃
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5 + 5569.0 / 90720.0 * n6,
            // β₄
            4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
            // β₅
            4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
            // β₆
            20648693.0 / 638668800.0 * n6,
        ]
    }

    /// Project (lon, lat) in radians, returning grid coordinates plus convergence and scale.
    pub fn project(&self, lon: f64, lat: f64) -> Projected {
        let dlam = lon - self.lon0;
        let (sin_lam, cos_lam) = dlam.sin_cos();

        // Convert geodetic tangent to conformal tangent
        let tau = lat.tan();
        let tau_prime = tau_to_tau_prime(tau, self.e);

        // ξ' = atan2(τ', cos(Δλ))
        let xi_prime = tau_prime.atan2(cos_lam);
        // η' = asinh(sin(Δλ) / hypot(τ', cos(Δλ)))
        let eta_prime = asinh(sin_lam / (tau_prime * tau_prime + cos_lam * cos_lam).sqrt());

        // Apply α series (forward), accumulating the derivative sums p', q'
        let mut xi = xi_prime;
        let mut eta = eta_prime;
        let mut p_prime = 1.0;
        let mut q_prime = 0.0;
        for (j, &a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            let (sin_xi, cos_xi) = (k * xi_prime).sin_cos();
            let (sinh_eta, cosh_eta) = ((k * eta_prime).sinh(), (k * eta_prime).cosh());
            xi += a * sin_xi * cosh_eta;
            eta += a * cos_xi * sinh_eta;
            p_prime += k * a * cos_xi * cosh_eta;
            q_prime += k * a * sin_xi * sinh_eta;
        }

        // Convergence: Karney 2011 Eq 23, 24
        let gamma_prime = (tau_prime / (1.0 + tau_prime * tau_prime).sqrt() * dlam.tan()).atan();
        let gamma_second = q_prime.atan2(p_prime);

        // Scale: Karney 2011 Eq 25
        let sin_phi = lat.sin();
        let k_prime = (1.0 - self.ellipsoid.e2 * sin_phi * sin_phi).sqrt()
            * (1.0 + tau * tau).sqrt()
            / (tau_prime * tau_prime + cos_lam * cos_lam).sqrt();
        let k_second = self.a_hat / self.ellipsoid.a * (p_prime * p_prime + q_prime * q_prime).sqrt();

        Projected {
            x: self.k0 * self.a_hat * eta + self.false_easting,
            y: self.k0 * self.a_hat * xi + self.false_northing,
            convergence: gamma_prime + gamma_second,
            scale: self.k0 * k_prime * k_second,
        }
    }

    /// Unproject grid (x, y), returning (lon, lat) in radians plus convergence and scale.
    pub fn unproject(&self, x: f64, y: f64) -> Unprojected {
        let eta = (x - self.false_easting) / (self.k0 * self.a_hat);
        let xi = (y - self.false_northing) / (self.k0 * self.a_hat);

        // Apply β series (inverse), accumulating the derivative sums p, q
        let mut xi_prime = xi;
        let mut eta_prime = eta;
        let mut p = 1.0;
        let mut q = 0.0;
        for (j, &b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            let (sin_xi, cos_xi) = (k * xi).sin_cos();
            let (sinh_eta, cosh_eta) = ((k * eta).sinh(), (k * eta).cosh());
            xi_prime -= b * sin_xi * cosh_eta;
            eta_prime -= b * cos_xi * sinh_eta;
            p -= k * b * cos_xi * cosh_eta;
            q += k * b * sin_xi * sinh_eta;
        }

        // τ' = sin(ξ') / hypot(sinh(η'), cos(ξ'))
        let sinh_eta = eta_prime.sinh();
        let (sin_xi, cos_xi) = xi_prime.sin_cos();
        let tau_prime = sin_xi / (sinh_eta * sinh_eta + cos_xi * cos_xi).sqrt();

        // Recover geodetic tangent τ from conformal tangent τ'
        let tau = tau_prime_to_tau(tau_prime, self.e);

        let lat = tau.atan();
        let lon = self.lon0 + sinh_eta.atan2(cos_xi);

        let gamma_prime = (xi_prime.tan() * eta_prime.tanh()).atan();
        let gamma_second = q.atan2(p);

        let sin_phi = lat.sin();
        let k_prime = (1.0 - self.ellipsoid.e2 * sin_phi * sin_phi).sqrt()
            * (1.0 + tau * tau).sqrt()
            * (sinh_eta * sinh_eta + cos_xi * cos_xi).sqrt();
        let k_second = self.a_hat / self.ellipsoid.a / (p * p + q * q).sqrt();

        Unprojected {
            lon,
            lat,
            convergence: gamma_prime + gamma_second,
            scale: self.k0 * k_prime * k_second,
        }
    }
}

/// Central meridian of a UTM zone, in degrees.
pub fn utm_central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let p = self.project(lon, lat);
        Ok((p.x, p.y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let u = self.unproject(x, y);
        Ok((u.lon, u.lat))
    }
}
