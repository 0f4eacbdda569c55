// Copyright 2025 the Scalebar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement systems and the distance units of their tier ladders.
//!
//! Each system has a two-tier ladder: a base unit for short distances and a larger unit that
//! takes over once the distance reaches one whole larger unit.
//!
//! | System   | Base tier | Larger tier | Cutover    |
//! |----------|-----------|-------------|------------|
//! | Metric   | `m`       | `km`        | 1000 m     |
//! | Imperial | `ft`      | `mi`        | 5280 ft    |

/// Length of one international foot, in meters.
pub const METERS_PER_FOOT: f64 = 0.3048;
/// Number of feet in a statute mile.
pub const FEET_PER_MILE: f64 = 5280.0;
/// Length of one statute mile, in meters.
pub const METERS_PER_MILE: f64 = METERS_PER_FOOT * FEET_PER_MILE;
/// Length of one kilometer, in meters.
pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Regions whose locale convention is the imperial/customary system.
const IMPERIAL_REGIONS: &[&str] = &["US", "LR", "MM"];

/// The measurement system used to label the scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MeasurementSystem {
    /// Meters and kilometers.
    #[default]
    Metric,
    /// Feet and miles.
    Imperial,
}

impl MeasurementSystem {
    /// Converts a "uses metric" flag, as reported by most platform locale APIs.
    pub fn from_metric_flag(metric: bool) -> Self {
        if metric { Self::Metric } else { Self::Imperial }
    }

    /// Resolves the conventional system for a locale identifier.
    ///
    /// Accepts POSIX (`en_US.UTF-8`, `en_US@euro`) and BCP-47 (`en-US`, `zh-Hant-TW`) shapes.
    /// Only the region subtag matters; identifiers without a region (`C`, `POSIX`, `fr`) resolve
    /// to metric.
    pub fn from_locale(locale: &str) -> Self {
        let tag = locale.split(['.', '@']).next().unwrap_or_default();
        let region = tag
            .split(['-', '_'])
            .skip(1)
            .find(|sub| is_region_subtag(sub));
        match region {
            Some(region)
                if IMPERIAL_REGIONS
                    .iter()
                    .any(|r| r.eq_ignore_ascii_case(region)) =>
            {
                Self::Imperial
            }
            _ => Self::Metric,
        }
    }

    /// The short-distance tier of this system.
    pub fn base_unit(self) -> DistanceUnit {
        match self {
            Self::Metric => DistanceUnit::Meters,
            Self::Imperial => DistanceUnit::Feet,
        }
    }

    /// The long-distance tier of this system.
    pub fn large_unit(self) -> DistanceUnit {
        match self {
            Self::Metric => DistanceUnit::Kilometers,
            Self::Imperial => DistanceUnit::Miles,
        }
    }

    /// Picks the tier used to express `meters`.
    ///
    /// The larger tier is chosen as soon as `meters` reaches one whole larger unit, so the
    /// choice is monotonic in `meters`.
    pub fn tier_for(self, meters: f64) -> DistanceUnit {
        let large = self.large_unit();
        if meters >= large.meters() {
            large
        } else {
            self.base_unit()
        }
    }
}

fn is_region_subtag(sub: &str) -> bool {
    (sub.len() == 2 && sub.bytes().all(|b| b.is_ascii_alphabetic()))
        || (sub.len() == 3 && sub.bytes().all(|b| b.is_ascii_digit()))
}

/// A unit on one of the tier ladders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    /// Meters (`m`).
    Meters,
    /// Kilometers (`km`).
    Kilometers,
    /// International feet (`ft`).
    Feet,
    /// Statute miles (`mi`).
    Miles,
}

impl DistanceUnit {
    /// Short label shown next to the distance.
    pub fn label(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Feet => "ft",
            Self::Miles => "mi",
        }
    }

    /// Length of one unit, in meters.
    pub fn meters(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => METERS_PER_KILOMETER,
            Self::Feet => METERS_PER_FOOT,
            Self::Miles => METERS_PER_MILE,
        }
    }

    /// The measurement system this unit belongs to.
    pub fn system(self) -> MeasurementSystem {
        match self {
            Self::Meters | Self::Kilometers => MeasurementSystem::Metric,
            Self::Feet | Self::Miles => MeasurementSystem::Imperial,
        }
    }

    /// Converts a length in meters into this unit.
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters()
    }

    /// Converts a length in this unit into meters.
    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters()
    }
}
