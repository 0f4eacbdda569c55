// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance label formatting.

extern crate alloc;

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::units::DistanceUnit;

/// Formats a distance with its unit label, e.g. `"200 m"` or `"0.5 mi"`.
///
/// Whole numbers print without a fractional part; other values keep at most three decimals.
pub fn format_distance(value: f64, unit: DistanceUnit) -> String {
    format!("{} {}", format_value(value), unit.label())
}

fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == rounded.floor() {
        format!("{rounded:.0}")
    } else {
        let s = format!("{rounded:.3}");
        s.trim_end_matches('0').to_owned()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn whole_numbers_have_no_fraction() {
        assert_eq!(format_distance(200.0, DistanceUnit::Meters), "200 m");
        assert_eq!(format_distance(10.0, DistanceUnit::Kilometers), "10 km");
        assert_eq!(format_distance(5000.0, DistanceUnit::Feet), "5000 ft");
    }

    #[test]
    fn fractions_are_trimmed() {
        assert_eq!(format_distance(0.5, DistanceUnit::Miles), "0.5 mi");
        assert_eq!(format_distance(0.25, DistanceUnit::Kilometers), "0.25 km");
        assert_eq!(format_distance(0.1 + 0.2, DistanceUnit::Miles), "0.3 mi");
    }
}
