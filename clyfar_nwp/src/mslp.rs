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

use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use tracing::warn;

use crate::series::VariableSeries;
use crate::grid::{Grid,VariableQuery};
use crate::resolution::{Resolution,Member};
use crate::provider::GridProvider;
use crate::retry::with_retry;
use crate::errors::Result;

const FETCH_RETRY_ATTEMPTS: u8 = 3;

/// mean-sea-level pressure point coordinates (§4.1b), default 40.0891N, 109.6774W.
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct MslpPoint {
    pub lat: f64,
    pub lon: f64,
}

impl Default for MslpPoint {
    fn default () -> Self { MslpPoint { lat: 40.0891, lon: -109.6774 } }
}

const PA_PER_HPA: f64 = 100.0;

/// component-specific mslp reduction: a nearest-gridpoint lookup rather than an
/// area quantile (§4.1b). Iterates the hi range then the lo range, retries a transient
/// per-lead fetch failure with backoff and records NaN once retries are exhausted, then
/// collapses duplicate timestamps (earliest wins), sorts, and converts Pa -> hPa.
pub async fn reduce_mslp<P: GridProvider> (
    provider: &P,
    init: DateTime<Utc>,
    member: Member,
    hi_leads: &[u32],
    lo_leads: &[u32],
    point: MslpPoint,
) -> Result<VariableSeries> {
    let mut series = VariableSeries::new();

    for &lead in hi_leads.iter().chain(lo_leads.iter()) {
        let resolution = if hi_leads.contains(&lead) { Resolution::Hi } else { Resolution::Lo };
        let valid_time = init + chrono::Duration::hours(lead as i64);
        let value = match with_retry(FETCH_RETRY_ATTEMPTS, || provider.fetch(init, lead, VariableQuery::MeanSeaLevelPressure, resolution, member)).await {
            Ok(grid) => grid.nearest(point.lat, point.lon) / PA_PER_HPA,
            Err(e) => {
                warn!("mslp fetch failed at lead {lead} after retries: {e}");
                f64::NAN
            }
        };
        series.push(valid_time, lead as i64, value);
    }

    let mut series = series.dedup_keep_earliest();
    series.sort_and_validate().map_err(crate::errors::op_failed)?;
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct ConstantProvider { value_pa: f64 }

    #[async_trait]
    impl GridProvider for ConstantProvider {
        async fn fetch (&self, _init: DateTime<Utc>, _lead_h: u32, _variable: VariableQuery, resolution: Resolution, _member: Member) -> Result<Grid> {
            Ok(Grid::new(vec![40.0891], vec![-109.6774], vec![vec![self.value_pa]], Utc::now(), resolution))
        }
    }

    #[tokio::test]
    async fn converts_pa_to_hpa_and_sorts () {
        let provider = ConstantProvider { value_pa: 101_500.0 };
        let init = Utc::now();
        let series = reduce_mslp(&provider, init, Member::Control, &[0, 6], &[246], MslpPoint::default()).await.unwrap();
        assert_eq!(series.len(), 3);
        assert!((series.values[0] - 1015.0).abs() < 1e-9);
        assert_eq!(series.fxx, vec![0, 6, 246]);
    }
}
