//! Degrees/minutes/seconds text: parsing, formatting and compass points.
//!
//! Parsing accepts signed decimal degrees or 1–3 numeric tokens separated by
//! any non-numeric characters (`51° 28′ 40.12″ N`, `51 28 40.12N`, `-3.5`),
//! optionally suffixed by a compass letter. A leading `-` or a `W`/`S` suffix
//! makes the value negative.

use crate::error::AngleError;

/// Output form for degree formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DmsForm {
    Deg,
    DegMin,
    DegMinSec,
}

impl DmsForm {
    /// Parse from a short or long name (`d`, `dm`, `dms`, `deg_min_sec`, ...).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "d" | "deg" => Some(Self::Deg),
            "dm" | "deg_min" => Some(Self::DegMin),
            "dms" | "deg_min_sec" => Some(Self::DegMinSec),
            _ => None,
        }
    }

    /// Decimal places used when none are requested.
    pub fn default_dp(&self) -> usize {
        match self {
            Self::Deg => 4,
            Self::DegMin => 2,
            Self::DegMinSec => 0,
        }
    }
}

/// Number of compass points to resolve a bearing to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompassPrecision {
    /// N, E, S, W
    Cardinal = 4,
    /// adds NE, SE, SW, NW
    Intercardinal = 8,
    /// adds NNE, ENE, ...
    SecondaryIntercardinal = 16,
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Parse degree text into signed decimal degrees.
pub fn parse_dms(text: &str) -> Result<f64, AngleError> {
    let malformed = || AngleError::MalformedAngleText(text.to_string());

    let trimmed = text.trim();
    let negative = trimmed.starts_with('-') || trimmed.ends_with(['W', 'w', 'S', 's']);

    let body = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let body = body
        .strip_suffix(['N', 'n', 'S', 's', 'E', 'e', 'W', 'w'])
        .unwrap_or(body);

    let values = body
        .split(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace(',', ".").parse::<f64>().map_err(|_| malformed()))
        .collect::<Result<Vec<f64>, AngleError>>()?;

    let deg = match values.as_slice() {
        [d] => *d,
        [d, m] => d + m / 60.0,
        [d, m, s] => d + m / 60.0 + s / 3600.0,
        _ => return Err(malformed()),
    };

    Ok(if negative { -deg } else { deg })
}

fn round_to(value: f64, dp: usize) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// Width of a zero-padded field with `int_digits` integer digits and `dp` decimals.
fn field_width(int_digits: usize, dp: usize) -> usize {
    if dp > 0 {
        int_digits + 1 + dp
    } else {
        int_digits
    }
}

/// Format unsigned degrees as d°, d°m′ or d°m′s″ with 3-digit zero-padded degrees.
///
/// The sign is discarded; callers append a compass letter.
pub fn to_dms(deg: f64, form: DmsForm, dp: Option<usize>) -> String {
    let dp = dp.unwrap_or_else(|| form.default_dp());
    let deg = deg.abs();

    match form {
        DmsForm::Deg => {
            let d = round_to(deg, dp);
            format!("{:0w$.dp$}°", d, w = field_width(3, dp))
        }
        DmsForm::DegMin => {
            let min = round_to(deg * 60.0, dp);
            let d = (min / 60.0).floor();
            let m = min - d * 60.0;
            format!("{d:03.0}°{m:0w$.dp$}′", w = field_width(2, dp))
        }
        DmsForm::DegMinSec => {
            let sec = round_to(deg * 3600.0, dp);
            let d = (sec / 3600.0).floor();
            let m = (sec / 60.0).floor() % 60.0;
            let s = sec - (sec / 60.0).floor() * 60.0;
            format!("{d:03.0}°{m:02.0}′{s:0w$.dp$}″", w = field_width(2, dp))
        }
    }
}

/// Latitude with 2-digit degrees and an N/S suffix.
pub fn to_lat(deg: f64, form: DmsForm, dp: Option<usize>) -> String {
    let s = to_dms(deg, form, dp);
    // knock off the leading '0' of the 3-digit degrees
    let s = s.strip_prefix('0').unwrap_or(&s);
    format!("{s}{}", if deg < 0.0 { 'S' } else { 'N' })
}

/// Longitude with 3-digit degrees and an E/W suffix.
pub fn to_lon(deg: f64, form: DmsForm, dp: Option<usize>) -> String {
    format!("{}{}", to_dms(deg, form, dp), if deg < 0.0 { 'W' } else { 'E' })
}

/// Bearing normalised to [0°, 360°).
pub fn to_brng(deg: f64, form: DmsForm, dp: Option<usize>) -> String {
    let s = to_dms(deg.rem_euclid(360.0), form, dp);
    // rounding may carry up to 360°
    match s.strip_prefix("360") {
        Some(rest) => format!("000{rest}"),
        None => s,
    }
}

/// Altitude in metres.
pub fn to_alt(alt: f64, dp: usize) -> String {
    format!("{alt:.dp$}m")
}

/// Nearest compass point for a bearing in degrees from north.
pub fn compass_point(bearing: f64, precision: CompassPrecision) -> &'static str {
    let k = precision as usize;
    let bearing = bearing.rem_euclid(360.0);
    let idx = (bearing * k as f64 / 360.0).round() as usize % k;
    COMPASS_POINTS[idx * (16 / k)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_dms_symbols() {
        assert_relative_eq!(parse_dms("51° 28′ 40.12″ N").unwrap(), 51.4778, epsilon = 1e-4);
        assert_relative_eq!(parse_dms("000° 00′ 05.31″ W").unwrap(), -0.0015, epsilon = 1e-4);
    }

    #[test]
    fn test_parse_decimal_and_sign() {
        assert_relative_eq!(parse_dms("51.4778°N").unwrap(), 51.4778);
        assert_relative_eq!(parse_dms("000.0015°W").unwrap(), -0.0015);
        assert_relative_eq!(parse_dms("-3.5").unwrap(), -3.5);
        assert_relative_eq!(parse_dms("  33 52 S ").unwrap(), -(33.0 + 52.0 / 60.0));
        assert_relative_eq!(parse_dms("12,5e").unwrap(), 12.5);
    }

    #[test]
    fn test_parse_rejects_bad_token_counts() {
        assert!(parse_dms("").is_err());
        assert!(parse_dms("N").is_err());
        assert!(parse_dms("1 2 3 4").is_err());
        assert_eq!(
            parse_dms("1.2.3"),
            Err(AngleError::MalformedAngleText("1.2.3".into()))
        );
    }

    #[test]
    fn test_to_dms_forms() {
        assert_eq!(to_dms(51.4778, DmsForm::DegMinSec, None), "051°28′40″");
        assert_eq!(to_dms(51.4778, DmsForm::DegMinSec, Some(2)), "051°28′40.08″");
        assert_eq!(to_dms(51.4778, DmsForm::DegMin, None), "051°28.67′");
        assert_eq!(to_dms(-0.0015, DmsForm::Deg, None), "000.0015°");
        assert_eq!(to_dms(7.5, DmsForm::Deg, Some(0)), "008°");
    }

    #[test]
    fn test_to_dms_rounding_carries() {
        // 59.9999″ rounds up into the next minute and degree
        let deg = 9.0 + 59.0 / 60.0 + 59.9999 / 3600.0;
        assert_eq!(to_dms(deg, DmsForm::DegMinSec, None), "010°00′00″");
    }

    #[test]
    fn test_huge_degrees_do_not_saturate() {
        let deg = 4_294_967_296.5;
        assert_eq!(to_dms(deg, DmsForm::DegMin, Some(0)), "4294967296°30′");
        assert_eq!(
            to_dms(4_294_967_296.0, DmsForm::DegMinSec, None),
            "4294967296°00′00″"
        );
    }

    #[test]
    fn test_lat_lon_suffixes() {
        assert_eq!(to_lat(-33.8688, DmsForm::Deg, Some(2)), "33.87°S");
        assert_eq!(to_lat(51.4778, DmsForm::DegMinSec, None), "51°28′40″N");
        assert_eq!(to_lon(151.2093, DmsForm::DegMin, Some(0)), "151°13′E");
        assert_eq!(to_lon(-0.0015, DmsForm::DegMinSec, Some(2)), "000°00′05.40″W");
    }

    #[test]
    fn test_bearing_normalised() {
        assert_eq!(to_brng(-90.0, DmsForm::Deg, Some(0)), "270°");
        assert_eq!(to_brng(359.9999, DmsForm::Deg, Some(2)), "000.00°");
        assert_eq!(to_brng(193.5798, DmsForm::DegMinSec, Some(0)), "193°34′47″");
    }

    #[test]
    fn test_alt() {
        assert_eq!(to_alt(200.8, 2), "200.80m");
    }

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(24.0, CompassPrecision::SecondaryIntercardinal), "NNE");
        assert_eq!(compass_point(24.0, CompassPrecision::Cardinal), "N");
        assert_eq!(compass_point(50.0, CompassPrecision::Intercardinal), "NE");
        assert_eq!(compass_point(-90.0, CompassPrecision::Cardinal), "W");
        assert_eq!(compass_point(359.0, CompassPrecision::Intercardinal), "N");
        assert_eq!(compass_point(200.0, CompassPrecision::SecondaryIntercardinal), "SSW");
    }

    #[test]
    fn test_form_names() {
        assert_eq!(DmsForm::from_name("DMS"), Some(DmsForm::DegMinSec));
        assert_eq!(DmsForm::from_name("deg_min"), Some(DmsForm::DegMin));
        assert_eq!(DmsForm::from_name("x"), None);
    }
}
