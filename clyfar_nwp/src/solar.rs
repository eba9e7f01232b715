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
use chrono::{DateTime,Utc,TimeZone};
use chrono_tz::Tz;

use crate::series::VariableSeries;
use crate::errors::{Result,op_failed};

/// deterministic late-range (>240h) solar persistence filler (§4.1c, component S).
/// pure and idempotent: re-applying to an already-filled series reproduces the same
/// late-range values, since it only ever reads the <=240h anchor subset.
///
/// `anchor_cutoff_h` is 240 per §4.1; `late_range_targets` are the canonical
/// `(valid_time, fxx)` pairs for the lo-resolution leads the filler must populate.
pub fn fill_late_range (series: &VariableSeries, anchor_cutoff_h: i64, late_range_targets: &[(DateTime<Utc>, i64)], zone: Tz) -> Result<VariableSeries> {
    let anchor: Vec<(DateTime<Utc>, f64)> = (0..series.len())
        .filter(|&i| series.fxx[i] <= anchor_cutoff_h && series.values[i].is_finite())
        .map(|i| (series.valid_times[i], series.values[i]))
        .collect();

    let mut result = VariableSeries::new();
    for i in 0..series.len() {
        if series.fxx[i] <= anchor_cutoff_h {
            result.push(series.valid_times[i], series.fxx[i], series.values[i]);
        }
    }

    if anchor.is_empty() {
        for (t, fxx) in late_range_targets {
            result.push(*t, *fxx, 0.0);
        }
        result.sort_and_validate().map_err(op_failed)?;
        return Ok(result);
    }

    let by_hour = hourly_medians(&anchor, zone);
    let overall_median = median(&mut anchor.iter().map(|(_, v)| *v).collect::<Vec<_>>());

    for (t, fxx) in late_range_targets {
        let h = zone.from_utc_datetime(&t.naive_utc()).hour_24();
        let value = by_hour.get(&h).copied()
            .unwrap_or_else(|| nearest_hour_value(&by_hour, h).unwrap_or(overall_median));
        result.push(*t, *fxx, value);
    }

    result.sort_and_validate().map_err(op_failed)?;
    Ok(result)
}

trait Hour24 { fn hour_24 (&self) -> u32; }
impl<Tz2: chrono::TimeZone> Hour24 for DateTime<Tz2> {
    fn hour_24 (&self) -> u32 { use chrono::Timelike; self.hour() }
}

fn hourly_medians (anchor: &[(DateTime<Utc>, f64)], zone: Tz) -> HashMap<u32, f64> {
    let mut by_hour: HashMap<u32, Vec<f64>> = HashMap::new();
    for (t, v) in anchor {
        let h = zone.from_utc_datetime(&t.naive_utc()).hour_24();
        by_hour.entry(h).or_default().push(*v);
    }
    by_hour.into_iter().map(|(h, mut vs)| (h, median(&mut vs))).collect()
}

fn median (values: &mut Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = values.len();
    if n == 0 { return f64::NAN; }
    if n % 2 == 1 { values[n / 2] } else { (values[n / 2 - 1] + values[n / 2]) / 2.0 }
}

/// nearest available local hour to `h` on a cyclic 24-hour ring, ties broken by smaller hour.
fn nearest_hour_value (by_hour: &HashMap<u32, f64>, h: u32) -> Option<f64> {
    if by_hour.is_empty() { return None; }
    let best = by_hour.keys().copied().min_by_key(|&cand| {
        let d = ring_distance(h, cand);
        (d, cand) // tie-break: smaller hour wins since it sorts first
    }).unwrap();
    by_hour.get(&best).copied()
}

fn ring_distance (a: u32, b: u32) -> u32 {
    let diff = if a > b { a - b } else { b - a };
    diff.min(24 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn denver () -> Tz { chrono_tz::America::Denver }

    // Scenario 4 - solar late-range persistence (spec.md §8)
    #[test]
    fn local_hour_median_persists_into_late_range () {
        let zone = denver();
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let hourly_pattern = [0.0,0.0,0.0,100.0,400.0,700.0,700.0,400.0,100.0,0.0,0.0,0.0,
                              0.0,0.0,0.0,100.0,400.0,700.0,700.0,400.0,100.0,0.0,0.0,0.0];

        let mut series = VariableSeries::new();
        // 10 days of hourly anchor samples (well within the <=240h range)
        for h in 1..=240i64 {
            let t = init + Duration::hours(h);
            let local_hour = zone.from_utc_datetime(&t.naive_utc()).hour_24() as usize;
            series.push(t, h, hourly_pattern[local_hour]);
        }

        let target_t = init + Duration::hours(250);
        let local_hour = zone.from_utc_datetime(&target_t.naive_utc()).hour_24();
        let filled = fill_late_range(&series, 240, &[(target_t, 250)], zone).unwrap();

        let emitted = filled.values[filled.fxx.iter().position(|f| *f == 250).unwrap()];
        let expected = hourly_pattern[local_hour as usize];
        assert_eq!(emitted, expected);
    }

    #[test]
    fn filler_is_idempotent_on_late_range () {
        let zone = denver();
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut series = VariableSeries::new();
        for h in 1..=240i64 {
            series.push(init + Duration::hours(h), h, 300.0);
        }
        let targets: Vec<_> = (241..=260i64).map(|h| (init + Duration::hours(h), h)).collect();

        let once = fill_late_range(&series, 240, &targets, zone).unwrap();
        let twice = fill_late_range(&once, 240, &targets, zone).unwrap();

        let late_once: Vec<f64> = once.values.iter().zip(&once.fxx).filter(|(_, f)| **f > 240).map(|(v, _)| *v).collect();
        let late_twice: Vec<f64> = twice.values.iter().zip(&twice.fxx).filter(|(_, f)| **f > 240).map(|(v, _)| *v).collect();
        assert_eq!(late_once, late_twice);
    }

    #[test]
    fn empty_anchor_emits_zero () {
        let zone = denver();
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series = VariableSeries::new();
        let targets = vec![(init + Duration::hours(250), 250i64)];
        let filled = fill_late_range(&series, 240, &targets, zone).unwrap();
        assert_eq!(filled.values, vec![0.0]);
    }
}
