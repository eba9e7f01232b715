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
use chrono_tz::Tz;
use tracing::warn;

use crate::config::ReductionConfig;
use crate::grid::VariableQuery;
use crate::resolution::{Resolution,Member};
use crate::provider::{GridProvider,ElevationProvider};
use crate::mask::MaskCache;
use crate::reduction::reduce_masked;
use crate::series::VariableSeries;
use crate::horizon;
use crate::solar;
use crate::mslp::{self,MslpPoint};
use crate::retry::with_retry;
use crate::errors::Result;

const FETCH_RETRY_ATTEMPTS: u8 = 3;

/// fetch + area-reduce every lead in `leads` at a single resolution (component G+E+R, §4.1
/// steps 2-3). A transient fetch failure retries with backoff (§4.3, §5); a lead that
/// exhausts its retries is recorded as NaN rather than aborting the series.
async fn reduce_range<P: GridProvider, Elv: ElevationProvider> (
    provider: &P,
    masks: &MaskCache<Elv>,
    init: DateTime<Utc>,
    member: Member,
    variable: VariableQuery,
    resolution: Resolution,
    leads: &[u32],
    q: f64,
) -> Result<VariableSeries> {
    let mask = masks.get(resolution).await?;
    let mut series = VariableSeries::new();
    for &lead in leads {
        let valid_time = init + chrono::Duration::hours(lead as i64);
        let value = match with_retry(FETCH_RETRY_ATTEMPTS, || provider.fetch(init, lead, variable, resolution, member)).await {
            Ok(grid) => reduce_masked(&grid, &mask, q),
            Err(e) => {
                warn!("{variable} fetch failed at lead {lead} ({resolution}) after retries: {e}");
                f64::NAN
            }
        };
        series.push(valid_time, lead as i64, value);
    }
    Ok(series)
}

/// component pipeline for snow depth: area quantile at both resolutions (raw grid values
/// are metres), stitched, then converted metres -> millimetres (§4.1 step 3).
pub async fn reduce_snow<P: GridProvider, Elv: ElevationProvider> (
    provider: &P, masks: &MaskCache<Elv>, init: DateTime<Utc>, member: Member,
    hi_leads: &[u32], lo_leads: &[u32], cfg: &ReductionConfig,
) -> Result<VariableSeries> {
    let hi = reduce_range(provider, masks, init, member, VariableQuery::SnowDepth, Resolution::Hi, hi_leads, cfg.quantiles.snow_q).await?;
    let lo = reduce_range(provider, masks, init, member, VariableQuery::SnowDepth, Resolution::Lo, lo_leads, cfg.quantiles.snow_q).await?;
    let mut stitched = horizon::stitch(hi, lo, cfg.hi_cutoff_h)?;
    for v in stitched.values.iter_mut() {
        if v.is_finite() { *v *= 1000.0; }
    }
    Ok(stitched)
}

/// component pipeline for 10 m wind speed: area quantile at both resolutions, stitched.
pub async fn reduce_wind<P: GridProvider, Elv: ElevationProvider> (
    provider: &P, masks: &MaskCache<Elv>, init: DateTime<Utc>, member: Member,
    hi_leads: &[u32], lo_leads: &[u32], cfg: &ReductionConfig,
) -> Result<VariableSeries> {
    let hi = reduce_range(provider, masks, init, member, VariableQuery::Wind10m, Resolution::Hi, hi_leads, cfg.quantiles.wind_q).await?;
    let lo = reduce_range(provider, masks, init, member, VariableQuery::Wind10m, Resolution::Lo, lo_leads, cfg.quantiles.wind_q).await?;
    horizon::stitch(hi, lo, cfg.hi_cutoff_h)
}

/// component pipeline for downward shortwave radiation: area quantile within the hi
/// range, then deterministic local-hour persistence for the lo range (§4.1c) - solar
/// radiation beyond the model's reliable horizon is not fetched at all.
pub async fn reduce_solar<P: GridProvider, Elv: ElevationProvider> (
    provider: &P, masks: &MaskCache<Elv>, init: DateTime<Utc>, member: Member,
    hi_leads: &[u32], lo_valid_times: &[(DateTime<Utc>, i64)], cfg: &ReductionConfig,
) -> Result<VariableSeries> {
    let hi = reduce_range(provider, masks, init, member, VariableQuery::DownwardShortwaveRadiation, Resolution::Hi, hi_leads, cfg.quantiles.solar_q).await?;
    let zone: Tz = cfg.solar_filler_zone.parse().unwrap_or(chrono_tz::America::Denver);
    solar::fill_late_range(&hi, cfg.hi_cutoff_h, lo_valid_times, zone)
}

/// component pipeline for 2 m temperature: informational only, not a FIS input (§4.3).
pub async fn reduce_temp<P: GridProvider, Elv: ElevationProvider> (
    provider: &P, masks: &MaskCache<Elv>, init: DateTime<Utc>, member: Member,
    hi_leads: &[u32], lo_leads: &[u32], cfg: &ReductionConfig,
) -> Result<VariableSeries> {
    let hi = reduce_range(provider, masks, init, member, VariableQuery::Temperature2m, Resolution::Hi, hi_leads, 0.50).await?;
    let lo = reduce_range(provider, masks, init, member, VariableQuery::Temperature2m, Resolution::Lo, lo_leads, 0.50).await?;
    horizon::stitch(hi, lo, cfg.hi_cutoff_h)
}

/// component pipeline for mean-sea-level pressure: a point lookup, not an area quantile (§4.1b).
pub async fn reduce_mslp<P: GridProvider> (
    provider: &P, init: DateTime<Utc>, member: Member,
    hi_leads: &[u32], lo_leads: &[u32], point: MslpPoint,
) -> Result<VariableSeries> {
    mslp::reduce_mslp(provider, init, member, hi_leads, lo_leads, point).await
}

/// snow-depth observation-offset adjustment (§4.1 step 6): `new = old - (s0 - r)`, clamped
/// at zero. `s0` is the model's own snow depth at the observation's valid time and `r` is
/// the ground-truth observation; both are supplied by an external collaborator. Kept as a
/// single scalar offset applied uniformly across the series rather than decaying with lead
/// time (§9 open question).
pub fn apply_snow_offset (series: &VariableSeries, s0: f64, r: f64) -> VariableSeries {
    let offset = s0 - r;
    let mut out = series.clone();
    for v in out.values.iter_mut() {
        if v.is_finite() {
            *v = (*v - offset).max(0.0);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snow_offset_clamps_at_zero () {
        let mut series = VariableSeries::new();
        let t0 = Utc::now();
        series.push(t0, 0, 5.0);
        series.push(t0 + chrono::Duration::hours(6), 6, 50.0);
        let adjusted = apply_snow_offset(&series, 40.0, 10.0); // offset = 30
        assert_eq!(adjusted.values[0], 0.0); // 5 - 30 clamps to 0
        assert_eq!(adjusted.values[1], 20.0); // 50 - 30
    }
}
