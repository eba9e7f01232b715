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

use std::collections::BTreeMap;
use chrono::{NaiveDate,TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use clyfar_fis::PossibilityVector;
use clyfar_member::MemberFrame;

/// per-local-day maximum of an hourly [`MemberFrame`] (component D, §4.5). Each cell is
/// the max over the day ignoring NaN; if every hour in a day is NaN for a column, the
/// cell stays NaN.
#[derive(Debug,Clone,Serialize)]
pub struct DailyMaxFrame {
    pub days: Vec<NaiveDate>,
    pub background: Vec<f64>,
    pub moderate: Vec<f64>,
    pub elevated: Vec<f64>,
    pub extreme: Vec<f64>,
    pub percentiles: BTreeMap<u8,Vec<f64>>,
}

impl DailyMaxFrame {
    pub fn len (&self) -> usize { self.days.len() }
}

fn nan_max (a: f64, b: f64) -> f64 {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => a.max(b),
        (true, false) => a,
        (false, true) => b,
        (false, false) => f64::NAN,
    }
}

/// group an hourly [`MemberFrame`] by local calendar day in `zone` and reduce every
/// column to its NaN-aware daily maximum (§4.5).
pub fn aggregate (frame: &MemberFrame, zone: Tz) -> DailyMaxFrame {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    let mut background: Vec<f64> = Vec::new();
    let mut moderate: Vec<f64> = Vec::new();
    let mut elevated: Vec<f64> = Vec::new();
    let mut extreme: Vec<f64> = Vec::new();
    let mut percentiles: BTreeMap<u8,Vec<f64>> = frame.percentiles.keys().map(|p| (*p, Vec::new())).collect();

    for i in 0..frame.len() {
        let local_day = zone.from_utc_datetime(&frame.valid_times[i].naive_utc()).date_naive();
        let row = *by_day.entry(local_day).or_insert_with(|| {
            order.push(local_day);
            background.push(f64::NAN);
            moderate.push(f64::NAN);
            elevated.push(f64::NAN);
            extreme.push(f64::NAN);
            for col in percentiles.values_mut() {
                col.push(f64::NAN);
            }
            order.len() - 1
        });

        let pv: &PossibilityVector = &frame.possibilities[i];
        background[row] = nan_max(background[row], pv.background);
        moderate[row] = nan_max(moderate[row], pv.moderate);
        elevated[row] = nan_max(elevated[row], pv.elevated);
        extreme[row] = nan_max(extreme[row], pv.extreme);

        for (p, col) in frame.percentiles.iter() {
            let slot = percentiles.get_mut(p).unwrap();
            slot[row] = nan_max(slot[row], col[i]);
        }
    }

    DailyMaxFrame { days: order, background, moderate, elevated, extreme, percentiles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Utc,TimeZone as ChronoTimeZone,Duration};
    use clyfar_fis::PossibilityVector;

    fn denver () -> Tz { chrono_tz::America::Denver }

    #[test]
    fn collapses_hourly_rows_into_daily_maxima () {
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap(); // 23:00 local day before in winter MST
        let mut frame = MemberFrame {
            valid_times: vec![],
            snow: vec![], mslp: vec![], wind: vec![], solar: vec![], temp: vec![],
            possibilities: vec![],
            percentiles: BTreeMap::new(),
            snow_clipped: vec![], mslp_clipped: vec![], wind_clipped: vec![], solar_clipped: vec![],
        };
        for (h, bg) in [(0, 0.2), (6, 0.9), (12, 0.1), (30, 0.4)] {
            frame.valid_times.push(init + Duration::hours(h));
            frame.possibilities.push(PossibilityVector { background: bg, moderate: 0.0, elevated: 0.0, extreme: 0.0 });
        }

        let daily = aggregate(&frame, denver());
        assert_eq!(daily.len(), 2);
        assert_eq!(daily.background[0], 0.9); // max of the first local day's rows
        assert_eq!(daily.background[1], 0.4);
    }

    #[test]
    fn all_nan_day_stays_nan () {
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        let mut frame = MemberFrame {
            valid_times: vec![init],
            snow: vec![f64::NAN], mslp: vec![f64::NAN], wind: vec![f64::NAN], solar: vec![f64::NAN], temp: vec![f64::NAN],
            possibilities: vec![PossibilityVector::NAN],
            percentiles: BTreeMap::new(),
            snow_clipped: vec![false], mslp_clipped: vec![false], wind_clipped: vec![false], solar_clipped: vec![false],
        };
        let daily = aggregate(&frame, denver());
        assert!(daily.background[0].is_nan());
    }
}
