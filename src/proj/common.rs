//! Common helpers for projection math (hyperbolic inverses, conformal latitude).
//!
//! The hyperbolic inverses are spelled out in closed form so results do not
//! depend on the platform libm.

/// Inverse hyperbolic tangent: ½·ln((1+x)/(1−x)).
pub fn atanh(x: f64) -> f64 {
    0.5 * ((1.0 + x) / (1.0 - x)).ln()
}

/// Inverse hyperbolic sine: ln(x + √(x²+1)).
pub fn asinh(x: f64) -> f64 {
    (x + (x * x + 1.0).sqrt()).ln()
}

/// Convert geodetic tangent τ = tanφ to conformal tangent τ' = tanφ'.
pub fn tau_to_tau_prime(tau: f64, e: f64) -> f64 {
    let tau1 = (1.0 + tau * tau).sqrt(); // = sec(φ)
    let sigma = (e * atanh(e * tau / tau1)).sinh();
    tau * (1.0 + sigma * sigma).sqrt() - sigma * tau1
}

/// Convert conformal tangent τ' back to geodetic tangent τ via Newton iteration
/// (Karney 2011 Eq 19–21).
pub fn tau_prime_to_tau(tau_prime: f64, e: f64) -> f64 {
    let e2 = e * e;
    let mut tau = tau_prime; // initial guess

    for _ in 0..15 {
        let tau1 = (1.0 + tau * tau).sqrt();
        let tau_prime_est = tau_to_tau_prime(tau, e);
        let dtau = (tau_prime - tau_prime_est) * (1.0 + (1.0 - e2) * tau * tau)
            / ((1.0 - e2) * tau1 * (1.0 + tau_prime_est * tau_prime_est).sqrt());
        tau += dtau;
        if dtau.abs() < 1e-12 * (1.0 + tau.abs()) {
            break;
        }
    }
    tau
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;

    #[test]
    fn test_closed_forms_match_std() {
        for &x in &[-0.9, -0.3, 0.0, 0.05, 0.5, 0.99] {
            assert_relative_eq!(atanh(x), x.atanh(), epsilon = 1e-14);
        }
        for &x in &[-20.0, -1.0, 0.0, 0.3, 2.5, 100.0] {
            assert_relative_eq!(asinh(x), x.asinh(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_conformal_latitude_is_smaller() {
        // Conformal latitude lies slightly equatorward of geodetic latitude.
        let e = WGS84.eccentricity();
        let tau = 45.0_f64.to_radians().tan();
        let tp = tau_to_tau_prime(tau, e);
        assert!(tp < tau);
        assert_relative_eq!(tp.atan().to_degrees(), 44.807_684, epsilon = 1e-5);
    }

    #[test]
    fn test_conformal_roundtrip() {
        let e = WGS84.eccentricity();
        for &lat in &[-84.0_f64, -45.0, -1.0, 0.0, 12.5, 60.0, 84.0] {
            let tau = lat.to_radians().tan();
            let back = tau_prime_to_tau(tau_to_tau_prime(tau, e), e);
            assert_relative_eq!(back.atan(), tau.atan(), epsilon = 1e-12);
        }
    }
}
