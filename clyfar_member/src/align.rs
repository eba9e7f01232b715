/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::collections::HashMap;
use chrono::{DateTime,Utc};

use clyfar_nwp::VariableSeries;

/// align `series` onto `canonical` valid-times by nearest-neighbor lookup (§4.3 step 2,
/// mslp only - it may be coarser than the snow series' cadence).
pub fn align_to (canonical: &[DateTime<Utc>], series: &VariableSeries) -> Vec<f64> {
    if series.is_empty() {
        return vec![f64::NAN; canonical.len()];
    }

    canonical.iter().map(|t| {
        let idx = series.valid_times.iter().enumerate()
            .min_by_key(|(_, candidate)| (**candidate - *t).num_seconds().abs())
            .map(|(i, _)| i)
            .unwrap();
        series.values[idx]
    }).collect()
}

/// align `series` onto `canonical` valid-times by exact timestamp match (§4.3 step 2,
/// wind/solar/temp - same delta_h as the canonical snow series). A canonical timestamp
/// with no exact match (notably t=0 for solar, which is undefined at analysis time)
/// yields NaN rather than borrowing a neighboring lead.
pub fn align_exact (canonical: &[DateTime<Utc>], series: &VariableSeries) -> Vec<f64> {
    let by_time: HashMap<DateTime<Utc>,f64> = series.valid_times.iter().copied().zip(series.values.iter().copied()).collect();
    canonical.iter().map(|t| by_time.get(t).copied().unwrap_or(f64::NAN)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn nearest_neighbor_picks_closest_sample () {
        let t0 = Utc::now();
        let mut series = VariableSeries::new();
        series.push(t0, 0, 10.0);
        series.push(t0 + Duration::hours(12), 12, 20.0);

        let canonical = vec![t0 + Duration::hours(1), t0 + Duration::hours(10)];
        let aligned = align_to(&canonical, &series);
        assert_eq!(aligned, vec![10.0, 20.0]);
    }

    #[test]
    fn empty_series_aligns_to_all_nan () {
        let canonical = vec![Utc::now()];
        let aligned = align_to(&canonical, &VariableSeries::new());
        assert!(aligned[0].is_nan());
    }

    #[test]
    fn exact_align_leaves_unmatched_timestamps_as_nan () {
        let t0 = Utc::now();
        let mut series = VariableSeries::new();
        series.push(t0 + Duration::hours(6), 6, 400.0); // solar skips fxx=0

        let canonical = vec![t0, t0 + Duration::hours(6)];
        let aligned = align_exact(&canonical, &series);
        assert!(aligned[0].is_nan());
        assert_eq!(aligned[1], 400.0);
    }
}
