// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale computation: from a projection scale and a pixel budget to a round distance.
//!
//! The ladder runs `{1, 2, 5} × 10^n` down to [`MIN_STEP`] (1 cm or 0.01 ft), so short views
//! get fractional labels such as `0.5 m` instead of a bar longer than its label says.
//!
//! The calculator never fails. Degenerate inputs fall back to the smallest step on the ladder
//! so an indicator can always be drawn.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use log::{debug, trace};

use crate::format::format_distance;
use crate::units::{DistanceUnit, MeasurementSystem};

/// Pixel length reported when the inputs are unusable (non-positive or non-finite).
pub const MIN_PIXEL_LENGTH: f64 = 1.0;

/// The smallest value on the 1-2-5 ladder, in units of the active tier.
pub const MIN_STEP: f64 = 0.01;

/// Relative slack when comparing a ladder step to the maximum value.
const STEP_EPSILON: f64 = 1e-9;

/// A computed scale: the distance to show and how many pixels represent it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleResult {
    /// The round distance shown by the indicator, in `unit`.
    pub distance: f64,
    /// The unit tier `distance` is expressed in.
    pub unit: DistanceUnit,
    /// Length of the indicator in pixels.
    pub pixel_length: f64,
}

impl ScaleResult {
    /// Short unit label (`m`, `km`, `ft`, `mi`).
    pub fn unit_label(&self) -> &'static str {
        self.unit.label()
    }

    /// The shown distance converted back to meters.
    pub fn distance_meters(&self) -> f64 {
        self.unit.to_meters(self.distance)
    }

    /// The full label, e.g. `"200 m"`.
    pub fn label(&self) -> String {
        format_distance(self.distance, self.unit)
    }
}

/// Computes the scale for a given projection scale and pixel budget.
///
/// `meters_per_pixel` is the ground distance covered by one pixel at the rendering latitude,
/// `max_pixel_width` is the largest length the indicator may occupy.
///
/// The result's `pixel_length` never exceeds `max_pixel_width` when both inputs are positive,
/// and is always positive. It equals the shown distance divided by `meters_per_pixel` unless
/// even [`MIN_STEP`] does not fit the budget.
pub fn compute_scale(
    meters_per_pixel: f64,
    max_pixel_width: f64,
    system: MeasurementSystem,
) -> ScaleResult {
    let base = system.base_unit();
    let max_meters = meters_per_pixel * max_pixel_width;
    let usable = meters_per_pixel.is_finite()
        && meters_per_pixel > 0.0
        && max_pixel_width.is_finite()
        && max_pixel_width > 0.0
        && max_meters.is_finite();
    if !usable {
        debug!(
            "degenerate scale input (meters_per_pixel={meters_per_pixel}, \
             max_pixel_width={max_pixel_width}), using fallback step"
        );
        return ScaleResult {
            distance: MIN_STEP,
            unit: base,
            pixel_length: MIN_PIXEL_LENGTH,
        };
    }

    let unit = system.tier_for(max_meters);
    let result = match nice_step_floor(unit.from_meters(max_meters)) {
        Some(distance) => ScaleResult {
            distance,
            unit,
            pixel_length: (unit.to_meters(distance) / meters_per_pixel).min(max_pixel_width),
        },
        None => ScaleResult {
            distance: MIN_STEP,
            unit: base,
            pixel_length: (base.to_meters(MIN_STEP) / meters_per_pixel).min(max_pixel_width),
        },
    };
    trace!(
        "scale {} {} over {:.1}px (meters_per_pixel={meters_per_pixel})",
        result.distance,
        result.unit_label(),
        result.pixel_length
    );
    result
}

/// Returns the largest `{1, 2, 5} × 10^n` (with `n >= -2`) that does not exceed `value`.
///
/// Returns `None` when `value` is below [`MIN_STEP`] or not finite.
pub fn nice_step_floor(value: f64) -> Option<f64> {
    if !value.is_finite() || value < MIN_STEP {
        return None;
    }
    let exponent = {
        let e = value.log10().floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "value is finite and >= MIN_STEP, so the exponent lies in -3..=308"
        )]
        {
            e as i32
        }
    };
    // Negative decades as a reciprocal, so 0.1 and 0.01 are the closest doubles.
    let mut base = if exponent >= 0 {
        10_f64.powi(exponent)
    } else {
        10_f64.powi(-exponent).recip()
    };
    // `log10` can land one decade off right at powers of ten.
    if base > value * (1.0 + STEP_EPSILON) {
        base /= 10.0;
    } else if base * 10.0 <= value * (1.0 + STEP_EPSILON) {
        base *= 10.0;
    }

    let mantissa = value / base * (1.0 + STEP_EPSILON);
    let nice = if mantissa >= 5.0 {
        5.0
    } else if mantissa >= 2.0 {
        2.0
    } else {
        1.0
    };
    Some((nice * base).max(MIN_STEP))
}

/// Returns `true` if `value` is on the 1-2-5 ladder (`{1, 2, 5} × 10^n`, `n >= -2`).
pub fn is_nice_step(value: f64) -> bool {
    nice_step_floor(value).is_some_and(|step| (step - value).abs() <= value * STEP_EPSILON)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn nice_step_picks_largest_ladder_value() {
        assert_eq!(nice_step_floor(1.0), Some(1.0));
        assert_eq!(nice_step_floor(1.9), Some(1.0));
        assert_eq!(nice_step_floor(2.0), Some(2.0));
        assert_eq!(nice_step_floor(4.99), Some(2.0));
        assert_eq!(nice_step_floor(5.0), Some(5.0));
        assert_eq!(nice_step_floor(9.99), Some(5.0));
        assert_eq!(nice_step_floor(10.0), Some(10.0));
        assert_eq!(nice_step_floor(300.0), Some(200.0));
        assert_eq!(nice_step_floor(1000.0), Some(1000.0));
        assert_eq!(nice_step_floor(999.0), Some(500.0));
    }

    #[test]
    fn nice_step_continues_below_one() {
        assert_close(nice_step_floor(0.99).unwrap(), 0.5);
        assert_close(nice_step_floor(0.3).unwrap(), 0.2);
        assert_close(nice_step_floor(0.1).unwrap(), 0.1);
        assert_close(nice_step_floor(0.049).unwrap(), 0.02);
        assert_close(nice_step_floor(0.01).unwrap(), 0.01);
    }

    #[test]
    fn nice_step_below_floor_is_none() {
        assert_eq!(nice_step_floor(0.009), None);
        assert_eq!(nice_step_floor(0.0), None);
        assert_eq!(nice_step_floor(-5.0), None);
        assert_eq!(nice_step_floor(f64::NAN), None);
        assert_eq!(nice_step_floor(f64::INFINITY), None);
    }

    #[test]
    fn ladder_membership() {
        assert!(is_nice_step(1.0));
        assert!(is_nice_step(20.0));
        assert!(is_nice_step(5000.0));
        assert!(!is_nice_step(3.0));
        assert!(!is_nice_step(437.0));
        assert!(is_nice_step(0.5));
        assert!(is_nice_step(0.02));
        assert!(!is_nice_step(0.3));
        assert!(!is_nice_step(0.001));
    }

    #[test]
    fn one_meter_per_pixel_gives_200_m() {
        let r = compute_scale(1.0, 300.0, MeasurementSystem::Metric);
        assert_eq!(r.unit, DistanceUnit::Meters);
        assert_close(r.distance, 200.0);
        assert_close(r.pixel_length, 200.0);
        assert_eq!(r.label(), "200 m");
    }

    #[test]
    fn fifty_meters_per_pixel_switches_to_km() {
        let r = compute_scale(50.0, 300.0, MeasurementSystem::Metric);
        assert_eq!(r.unit, DistanceUnit::Kilometers);
        assert_close(r.distance, 10.0);
        assert_close(r.pixel_length, 200.0);
        assert_eq!(r.unit_label(), "km");
    }

    #[test]
    fn imperial_uses_feet_then_miles() {
        // 300 px * 1 m = 984.25 ft -> 500 ft.
        let r = compute_scale(1.0, 300.0, MeasurementSystem::Imperial);
        assert_eq!(r.unit, DistanceUnit::Feet);
        assert_close(r.distance, 500.0);
        assert_close(r.pixel_length, 500.0 * 0.3048);

        // 300 px * 100 m = 30 km = 18.64 mi -> 10 mi.
        let r = compute_scale(100.0, 300.0, MeasurementSystem::Imperial);
        assert_eq!(r.unit, DistanceUnit::Miles);
        assert_close(r.distance, 10.0);
        assert_close(r.pixel_length, 10.0 * 1609.344 / 100.0);
    }

    #[test]
    fn degenerate_inputs_fall_back_to_min_step() {
        for (mpp, width) in [
            (0.0, 300.0),
            (-1.0, 300.0),
            (1.0, 0.0),
            (1.0, -10.0),
            (f64::NAN, 300.0),
            (f64::INFINITY, 300.0),
        ] {
            let r = compute_scale(mpp, width, MeasurementSystem::Metric);
            assert_eq!(r.distance, MIN_STEP);
            assert_eq!(r.unit, DistanceUnit::Meters);
            assert!(r.pixel_length > 0.0);
        }
    }

    #[test]
    fn short_view_uses_fractional_step() {
        // 0.001 m/px over 300 px is 0.3 m.
        let r = compute_scale(0.001, 300.0, MeasurementSystem::Metric);
        assert_eq!(r.unit, DistanceUnit::Meters);
        assert_close(r.distance, 0.2);
        assert_close(r.pixel_length, 200.0);
        assert_close(r.distance_meters() / 0.001, r.pixel_length);
        assert_eq!(r.label(), "0.2 m");
    }

    #[test]
    fn budget_below_min_step_is_clamped_to_width() {
        // 1e-5 m/px over 300 px is 3 mm, below the 1 cm floor.
        let r = compute_scale(1e-5, 300.0, MeasurementSystem::Metric);
        assert_eq!(r.distance, MIN_STEP);
        assert_eq!(r.pixel_length, 300.0);
    }
}
