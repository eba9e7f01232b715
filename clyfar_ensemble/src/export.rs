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
use chrono::{DateTime,NaiveDate,Utc};
use serde::Serialize;

use clyfar_member::MemberFrame;
use clyfar_nwp::Member;
use clyfar_nwp::reduction::hazen_quantile;

use crate::dailymax::DailyMaxFrame;
use crate::rounding::{round_or_null,round_vec};

const EXCEEDANCE_THRESHOLDS_PPB: [u32; 4] = [30, 50, 60, 75];

/// component X, artefact 1: `forecast_possibility_heatmap_<clyfar_member>_<init>.json` (§6).
#[derive(Debug,Clone,Serialize)]
pub struct HeatmapMetadata {
    pub init_datetime: DateTime<Utc>,
    pub member: String,
    pub product_type: &'static str,
    pub categories: [&'static str; 4],
    pub num_days: usize,
    pub num_missing: usize,
    pub data_source: String,
    pub units: &'static str,
}

#[derive(Debug,Clone,Serialize)]
pub struct Heatmap {
    pub background: Vec<Option<f64>>,
    pub moderate: Vec<Option<f64>>,
    pub elevated: Vec<Option<f64>>,
    pub extreme: Vec<Option<f64>>,
}

#[derive(Debug,Clone,Serialize)]
pub struct PossibilityHeatmapArtefact {
    pub metadata: HeatmapMetadata,
    pub forecast_dates: Vec<NaiveDate>,
    pub missing_dates: Vec<NaiveDate>,
    pub heatmap: Heatmap,
}

pub fn build_possibility_heatmap (
    init: DateTime<Utc>, member: Member, daily: &DailyMaxFrame, data_source: &str,
) -> PossibilityHeatmapArtefact {
    let missing_dates: Vec<NaiveDate> = daily.days.iter()
        .zip(daily.background.iter())
        .filter(|(_, bg)| !bg.is_finite())
        .map(|(d, _)| *d)
        .collect();

    PossibilityHeatmapArtefact {
        metadata: HeatmapMetadata {
            init_datetime: init,
            member: member.output_label(),
            product_type: "possibility_heatmap",
            categories: ["background", "moderate", "elevated", "extreme"],
            num_days: daily.len(),
            num_missing: missing_dates.len(),
            data_source: data_source.to_string(),
            units: "possibility (0-1)",
        },
        forecast_dates: daily.days.clone(),
        missing_dates,
        heatmap: Heatmap {
            background: round_vec(&daily.background, 2),
            moderate: round_vec(&daily.moderate, 2),
            elevated: round_vec(&daily.elevated, 2),
            extreme: round_vec(&daily.extreme, 2),
        },
    }
}

/// component X, artefact 2: `forecast_exceedance_probabilities_<init>.json` (§6).
#[derive(Debug,Clone,Serialize)]
pub struct ExceedanceMetadata {
    pub init_datetime: DateTime<Utc>,
    pub num_members: usize,
    pub thresholds_ppb: [u32; 4],
    pub percentile_used: &'static str,
    pub units: &'static str,
}

#[derive(Debug,Clone,Serialize)]
pub struct ExceedanceProbabilitiesArtefact {
    pub metadata: ExceedanceMetadata,
    pub forecast_dates: Vec<NaiveDate>,
    pub exceedance_probabilities: BTreeMap<String, Vec<Option<f64>>>,
}

/// fraction of members whose daily-max ozone_50pc strictly exceeds each threshold, over
/// members with a finite value that day; members missing that day contribute to neither
/// numerator nor denominator (§6 artefact 2, Scenario 5).
pub fn build_exceedance_probabilities (
    init: DateTime<Utc>, members: &[DailyMaxFrame],
) -> ExceedanceProbabilitiesArtefact {
    let forecast_dates = members.first().map(|f| f.days.clone()).unwrap_or_default();
    let mut exceedance_probabilities: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();

    for threshold in EXCEEDANCE_THRESHOLDS_PPB {
        let mut column = Vec::with_capacity(forecast_dates.len());
        for day_idx in 0..forecast_dates.len() {
            let mut exceed = 0usize;
            let mut total = 0usize;
            for frame in members {
                let Some(p50) = frame.percentiles.get(&50) else { continue };
                let Some(v) = p50.get(day_idx) else { continue };
                if v.is_finite() {
                    total += 1;
                    if *v > threshold as f64 { exceed += 1; }
                }
            }
            let fraction = if total > 0 { exceed as f64 / total as f64 } else { f64::NAN };
            column.push(round_or_null(fraction, 2));
        }
        exceedance_probabilities.insert(format!("{threshold}ppb"), column);
    }

    ExceedanceProbabilitiesArtefact {
        metadata: ExceedanceMetadata {
            init_datetime: init,
            num_members: members.len(),
            thresholds_ppb: EXCEEDANCE_THRESHOLDS_PPB,
            percentile_used: "ozone_50pc",
            units: "probability (0-1)",
        },
        forecast_dates,
        exceedance_probabilities,
    }
}

/// component X, artefact 3: `forecast_percentile_scenarios_<clyfar_member>_<init>.json` (§6).
#[derive(Debug,Clone,Serialize)]
pub struct PercentileScenariosMetadata {
    pub init_datetime: DateTime<Utc>,
    pub member: String,
    pub percentiles: Vec<u8>,
    pub units: &'static str,
}

#[derive(Debug,Clone,Serialize)]
pub struct PercentileScenariosArtefact {
    pub metadata: PercentileScenariosMetadata,
    pub forecast_dates: Vec<NaiveDate>,
    pub scenarios: BTreeMap<String, Vec<Option<f64>>>,
}

pub fn build_percentile_scenarios (
    init: DateTime<Utc>, member: Member, daily: &DailyMaxFrame, percentiles: &[u8],
) -> PercentileScenariosArtefact {
    let mut scenarios: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
    for p in percentiles {
        if let Some(col) = daily.percentiles.get(p) {
            scenarios.insert(format!("p{p}"), round_vec(col, 1));
        }
    }

    PercentileScenariosArtefact {
        metadata: PercentileScenariosMetadata {
            init_datetime: init,
            member: member.output_label(),
            percentiles: percentiles.to_vec(),
            units: "ppb (ozone concentration)",
        },
        forecast_dates: daily.days.clone(),
        scenarios,
    }
}

/// component X, artefact 4a: `forecast_gefs_weather_<clyfar_member>_<init>.json` — one
/// member's full-resolution hourly series (§6). Precision: snow 0 dp, wind 1 dp,
/// temp 1 dp, mslp 1 dp, solar 0 dp.
#[derive(Debug,Clone,Serialize)]
pub struct WeatherSeries {
    pub valid_times: Vec<DateTime<Utc>>,
    pub snow: Vec<Option<f64>>,
    pub wind: Vec<Option<f64>>,
    pub temp: Vec<Option<f64>>,
    pub mslp: Vec<Option<f64>>,
    pub solar: Vec<Option<f64>>,
}

#[derive(Debug,Clone,Serialize)]
pub struct GefsWeatherArtefact {
    pub metadata: GefsWeatherMetadata,
    pub series: WeatherSeries,
}

#[derive(Debug,Clone,Serialize)]
pub struct GefsWeatherMetadata {
    pub init_datetime: DateTime<Utc>,
    pub member: String,
    pub units: BTreeMap<&'static str, &'static str>,
}

pub fn build_gefs_weather (init: DateTime<Utc>, member: Member, frame: &MemberFrame) -> GefsWeatherArtefact {
    let mut units = BTreeMap::new();
    units.insert("snow", "mm");
    units.insert("wind", "m s-1");
    units.insert("temp", "degC");
    units.insert("mslp", "hPa");
    units.insert("solar", "W m-2");

    GefsWeatherArtefact {
        metadata: GefsWeatherMetadata { init_datetime: init, member: member.output_label(), units },
        series: WeatherSeries {
            valid_times: frame.valid_times.clone(),
            snow: round_vec(&frame.snow, 0),
            wind: round_vec(&frame.wind, 1),
            temp: round_vec(&frame.temp, 1),
            mslp: round_vec(&frame.mslp, 1),
            solar: round_vec(&frame.solar, 0),
        },
    }
}

/// component X, artefact 4b: `forecast_gefs_weather_percentiles_<init>.json` — per-timestep
/// ensemble p10/p50/p90 across members, by Hazen interpolation over the finite cross-member
/// samples at each timestamp (§6). Assumes every member frame shares the same canonical
/// valid-time index (true whenever all members were driven with the same start/max/delta
/// horizon, which the ensemble driver enforces).
#[derive(Debug,Clone,Serialize)]
pub struct WeatherPercentileSeries {
    pub p10: Vec<Option<f64>>,
    pub p50: Vec<Option<f64>>,
    pub p90: Vec<Option<f64>>,
}

#[derive(Debug,Clone,Serialize)]
pub struct GefsWeatherPercentilesArtefact {
    pub init_datetime: DateTime<Utc>,
    pub valid_times: Vec<DateTime<Utc>>,
    pub snow: WeatherPercentileSeries,
    pub wind: WeatherPercentileSeries,
    pub temp: WeatherPercentileSeries,
    pub mslp: WeatherPercentileSeries,
    pub solar: WeatherPercentileSeries,
}

/// a single finite cross-member sample at a timestep is not an undefined quantile the
/// way a single surviving grid cell is for `reduce_masked` (§4.1) — it is simply every
/// percentile's value for that timestep, so it is reported directly rather than
/// deferring to `hazen_quantile`'s n<2 -> NaN grid-reduction contract.
fn quantile_or_single (sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        _ => hazen_quantile(sorted, q),
    }
}

fn cross_member_percentiles (columns: &[&Vec<f64>], dp: i32) -> WeatherPercentileSeries {
    let len = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut p10 = Vec::with_capacity(len);
    let mut p50 = Vec::with_capacity(len);
    let mut p90 = Vec::with_capacity(len);

    for i in 0..len {
        let mut samples: Vec<f64> = columns.iter()
            .filter_map(|c| c.get(i))
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
        p10.push(round_or_null(quantile_or_single(&samples, 0.10), dp));
        p50.push(round_or_null(quantile_or_single(&samples, 0.50), dp));
        p90.push(round_or_null(quantile_or_single(&samples, 0.90), dp));
    }

    WeatherPercentileSeries { p10, p50, p90 }
}

pub fn build_gefs_weather_percentiles (init: DateTime<Utc>, members: &[MemberFrame]) -> GefsWeatherPercentilesArtefact {
    let valid_times = members.iter().map(|f| f.valid_times.len())
        .zip(members.iter())
        .max_by_key(|(len, _)| *len)
        .map(|(_, f)| f.valid_times.clone())
        .unwrap_or_default();

    let snow_cols: Vec<&Vec<f64>> = members.iter().map(|f| &f.snow).collect();
    let wind_cols: Vec<&Vec<f64>> = members.iter().map(|f| &f.wind).collect();
    let temp_cols: Vec<&Vec<f64>> = members.iter().map(|f| &f.temp).collect();
    let mslp_cols: Vec<&Vec<f64>> = members.iter().map(|f| &f.mslp).collect();
    let solar_cols: Vec<&Vec<f64>> = members.iter().map(|f| &f.solar).collect();

    GefsWeatherPercentilesArtefact {
        init_datetime: init,
        valid_times,
        snow: cross_member_percentiles(&snow_cols, 0),
        wind: cross_member_percentiles(&wind_cols, 1),
        temp: cross_member_percentiles(&temp_cols, 1),
        mslp: cross_member_percentiles(&mslp_cols, 1),
        solar: cross_member_percentiles(&solar_cols, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;
    use chrono::{TimeZone,Duration};
    use clyfar_fis::PossibilityVector;

    fn day (y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

    fn sample_daily (backgrounds: Vec<f64>, p50: Vec<f64>) -> DailyMaxFrame {
        let days: Vec<NaiveDate> = (1..=backgrounds.len() as u32).map(|d| day(2024, 1, d)).collect();
        let mut percentiles = Map::new();
        percentiles.insert(50, p50);
        DailyMaxFrame {
            days,
            moderate: vec![0.0; backgrounds.len()],
            elevated: vec![0.0; backgrounds.len()],
            extreme: vec![0.0; backgrounds.len()],
            background: backgrounds,
            percentiles,
        }
    }

    #[test]
    fn heatmap_rounds_and_flags_missing_days () {
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let daily = sample_daily(vec![0.123, f64::NAN], vec![10.0, 20.0]);
        let artefact = build_possibility_heatmap(init, Member::Control, &daily, "gefs");
        assert_eq!(artefact.heatmap.background, vec![Some(0.12), None]);
        assert_eq!(artefact.missing_dates, vec![day(2024, 1, 2)]);
        assert_eq!(artefact.metadata.num_missing, 1);
    }

    #[test]
    fn exceedance_excludes_nan_members_from_numerator_and_denominator () {
        // Scenario 5: members {55, 60, NaN, 45, 80} against thresholds {50, 75} -> p(>50)=0.75, p(>75)=0.25
        let members = vec![
            sample_daily(vec![0.0], vec![55.0]),
            sample_daily(vec![0.0], vec![60.0]),
            sample_daily(vec![0.0], vec![f64::NAN]),
            sample_daily(vec![0.0], vec![45.0]),
            sample_daily(vec![0.0], vec![80.0]),
        ];
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let artefact = build_exceedance_probabilities(init, &members);
        assert_eq!(artefact.exceedance_probabilities["50ppb"][0], Some(0.75));
        assert_eq!(artefact.exceedance_probabilities["75ppb"][0], Some(0.25));
    }

    #[test]
    fn exceedance_is_nan_when_no_member_has_a_finite_value () {
        let members = vec![sample_daily(vec![0.0], vec![f64::NAN])];
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let artefact = build_exceedance_probabilities(init, &members);
        assert_eq!(artefact.exceedance_probabilities["30ppb"][0], None);
    }

    fn empty_member_frame (valid_times: Vec<DateTime<Utc>>, snow: Vec<f64>, solar: Vec<f64>) -> MemberFrame {
        let n = valid_times.len();
        MemberFrame {
            valid_times,
            snow,
            mslp: vec![1000.0; n],
            wind: vec![3.0; n],
            solar,
            temp: vec![0.0; n],
            possibilities: vec![PossibilityVector::ZERO; n],
            percentiles: Map::new(),
            snow_clipped: vec![false; n],
            mslp_clipped: vec![false; n],
            wind_clipped: vec![false; n],
            solar_clipped: vec![false; n],
        }
    }

    #[test]
    fn weather_percentiles_skip_nan_across_members () {
        let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let times = vec![init, init + Duration::hours(6)];
        let members = vec![
            empty_member_frame(times.clone(), vec![10.0, f64::NAN], vec![f64::NAN, 100.0]),
            empty_member_frame(times.clone(), vec![20.0, 30.0], vec![f64::NAN, 200.0]),
        ];
        let artefact = build_gefs_weather_percentiles(init, &members);
        assert_eq!(artefact.solar.p50[0], None); // both members NaN at t=0 (solar's "by design" gap)
        // snow at t=6h has exactly one finite cross-member sample (30.0); that single
        // sample is reported directly rather than treated as an undefined quantile.
        assert_eq!(artefact.snow.p10[1], Some(30.0));
        assert_eq!(artefact.snow.p50[1], Some(30.0));
        assert_eq!(artefact.snow.p90[1], Some(30.0));
    }

    #[test]
    fn single_finite_sample_reports_as_every_percentile () {
        assert_eq!(quantile_or_single(&[42.0], 0.10), 42.0);
        assert_eq!(quantile_or_single(&[42.0], 0.90), 42.0);
        assert!(quantile_or_single(&[], 0.50).is_nan());
    }
}
