//! # Utility Module
//!
//! Angle helpers shared by the motion model and the scenario generator.
//!
//! Headings are handled in degrees wherever they are sampled and in radians
//! wherever trigonometry is applied. Every conversion goes through this module
//! so that the two never drift apart.

/// Reduces an angle in degrees into `[0, 360)`.
///
/// # Examples
///
/// ```
/// use flight_control::utils::util::normalize_degrees;
///
/// assert_eq!(normalize_degrees(370.0), 10.0);
/// assert_eq!(normalize_degrees(-90.0), 270.0);
/// assert_eq!(normalize_degrees(360.0), 0.0);
/// ```
pub fn normalize_degrees(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Converts degrees to radians.
///
/// # Examples
///
/// ```
/// use flight_control::utils::util::to_radians;
///
/// assert!((to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}
