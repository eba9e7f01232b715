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

use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime,Utc,TimeZone};

use clyfar_nwp::{Grid,VariableQuery,Resolution,Member,GridProvider,ElevationProvider,MaskCache,ReductionConfig};
use clyfar_fis::{Fis,FisConfig};
use clyfar_ensemble::{EnsembleConfig,run_ensemble,dailymax};
use clyfar_ensemble::export::{build_possibility_heatmap,build_exceedance_probabilities,build_gefs_weather_percentiles};

/// every (variable, lead) returns the same basin-wide field; exercises the pool/export
/// path end-to-end without depending on a live NWP data source.
struct ConstantProvider { snow_mm: f64, mslp_hpa: f64, wind_ms: f64, solar_wm2: f64 }

fn constant_grid (value: f64, resolution: Resolution) -> Grid {
    Grid::new(vec![41.0, 40.0], vec![-110.0, -109.0], vec![vec![value, value], vec![value, value]], Utc::now(), resolution)
}

#[async_trait]
impl GridProvider for ConstantProvider {
    async fn fetch (&self, _init: DateTime<Utc>, _lead_h: u32, variable: VariableQuery, resolution: Resolution, _member: Member) -> clyfar_nwp::Result<Grid> {
        let value = match variable {
            VariableQuery::SnowDepth => self.snow_mm / 1000.0,
            VariableQuery::MeanSeaLevelPressure => self.mslp_hpa * 100.0,
            VariableQuery::Wind10m => self.wind_ms,
            VariableQuery::DownwardShortwaveRadiation => self.solar_wm2,
            VariableQuery::Temperature2m => 0.0,
        };
        Ok(constant_grid(value, resolution))
    }
}

#[async_trait]
impl ElevationProvider for ConstantProvider {
    async fn elevation (&self, _resolution: Resolution) -> clyfar_nwp::Result<(Vec<f64>,Vec<f64>,Vec<Vec<f64>>)> {
        Ok((vec![41.0, 40.0], vec![-110.0, -109.0], vec![vec![1000.0, 1000.0], vec![1000.0, 1000.0]]))
    }
}

#[tokio::test]
async fn ensemble_pool_collects_every_member_and_exports_without_nan_tokens () {
    let grid_provider = Arc::new(ConstantProvider { snow_mm: 20.0, mslp_hpa: 1005.0, wind_ms: 4.0, solar_wm2: 600.0 });
    let elev_provider = ConstantProvider { snow_mm: 20.0, mslp_hpa: 1005.0, wind_ms: 4.0, solar_wm2: 600.0 };
    let masks = Arc::new(MaskCache::new(elev_provider, 1850.0, 250.0));
    let fis = Arc::new(Fis::new(FisConfig::default()).unwrap());
    let cfg = EnsembleConfig { member_count: 3, concurrency: 2, ..EnsembleConfig::default() };
    let nwp_cfg = ReductionConfig::default();
    let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let members = Member::all(3);

    let frames = run_ensemble(grid_provider, masks, fis, init, &members, 0, 24, 6, &cfg, &nwp_cfg).await.unwrap();
    assert_eq!(frames.len(), 3);

    let denver = chrono_tz::America::Denver;
    let daily_frames: Vec<_> = frames.iter().map(|f| dailymax::aggregate(f, denver)).collect();

    let heatmap = build_possibility_heatmap(init, Member::Control, &daily_frames[0], "gefs");
    let exceedance = build_exceedance_probabilities(init, &daily_frames);
    let weather_percentiles = build_gefs_weather_percentiles(init, &frames);

    for payload in [
        serde_json::to_string(&heatmap).unwrap(),
        serde_json::to_string(&exceedance).unwrap(),
        serde_json::to_string(&weather_percentiles).unwrap(),
    ] {
        assert!(!payload.contains("NaN"), "payload leaked a NaN token: {payload}");
        assert!(!payload.contains("Infinity"), "payload leaked an Infinity token: {payload}");
    }
}

#[tokio::test]
async fn ensemble_pool_discards_members_that_fail_and_errors_when_none_survive () {
    struct AlwaysFailingProvider;
    #[async_trait]
    impl GridProvider for AlwaysFailingProvider {
        async fn fetch (&self, _init: DateTime<Utc>, _lead_h: u32, _variable: VariableQuery, _resolution: Resolution, _member: Member) -> clyfar_nwp::Result<Grid> {
            Err(clyfar_nwp::op_failed("no data source configured for this scenario"))
        }
    }
    #[async_trait]
    impl ElevationProvider for AlwaysFailingProvider {
        async fn elevation (&self, _resolution: Resolution) -> clyfar_nwp::Result<(Vec<f64>,Vec<f64>,Vec<Vec<f64>>)> {
            Err(clyfar_nwp::op_failed("no elevation cache configured for this scenario"))
        }
    }

    let grid_provider = Arc::new(AlwaysFailingProvider);
    let masks = Arc::new(MaskCache::new(AlwaysFailingProvider, 1850.0, 250.0));
    let fis = Arc::new(Fis::new(FisConfig::default()).unwrap());
    let cfg = EnsembleConfig { member_count: 2, concurrency: 2, ..EnsembleConfig::default() };
    let nwp_cfg = ReductionConfig::default();
    let init = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let members = Member::all(2);

    let result = run_ensemble(grid_provider, masks, fis, init, &members, 0, 24, 6, &cfg, &nwp_cfg).await;
    assert!(matches!(result, Err(clyfar_ensemble::ClyfarEnsembleError::NoValidMembers)));
}
