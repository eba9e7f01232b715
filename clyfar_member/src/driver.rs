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
use chrono::{DateTime,Utc,Duration};

use clyfar_nwp::{GridProvider,ElevationProvider,MaskCache,ReductionConfig,reduce,horizon};
use clyfar_fis::{Fis,FisInputs,Variable,PercentileMap};

use crate::frame::MemberFrame;
use crate::align::{align_to,align_exact};
use crate::errors::Result;

/// run the full per-member pipeline (§4.3): four variable reductions, alignment onto
/// the snow series' time grid, then a per-timestamp FIS evaluation.
pub async fn run_member<P: GridProvider, Elv: ElevationProvider> (
    provider: &P,
    masks: &MaskCache<Elv>,
    fis: &Fis,
    init: DateTime<Utc>,
    member: clyfar_nwp::Member,
    start_h: u32,
    max_h: u32,
    delta_h: u32,
    percentiles: &[u8],
    cfg: &ReductionConfig,
) -> Result<MemberFrame> {
    let hi_cutoff = cfg.hi_cutoff_h as u32;

    let (snow_hi, snow_lo) = horizon::split_leads(start_h, max_h, delta_h, hi_cutoff, false);
    let (wind_hi, wind_lo) = horizon::split_leads(start_h, max_h, delta_h, hi_cutoff, false);
    let (solar_hi, solar_lo) = horizon::split_leads(start_h, max_h, delta_h, hi_cutoff, true);
    let (temp_hi, temp_lo) = horizon::split_leads(start_h, max_h, delta_h, hi_cutoff, false);
    let (mslp_hi, mslp_lo) = horizon::split_leads(start_h, max_h, delta_h, hi_cutoff, false);

    let solar_lo_targets: Vec<(DateTime<Utc>, i64)> = solar_lo.iter()
        .map(|h| (init + Duration::hours(*h as i64), *h as i64))
        .collect();

    let snow = reduce::reduce_snow(provider, masks, init, member, &snow_hi, &snow_lo, cfg).await?;
    let wind = reduce::reduce_wind(provider, masks, init, member, &wind_hi, &wind_lo, cfg).await?;
    let solar = reduce::reduce_solar(provider, masks, init, member, &solar_hi, &solar_lo_targets, cfg).await?;
    let temp = reduce::reduce_temp(provider, masks, init, member, &temp_hi, &temp_lo, cfg).await?;
    let mslp = reduce::reduce_mslp(provider, init, member, &mslp_hi, &mslp_lo, cfg.mslp_point).await?;

    // snow is canonical (§4.3 step 2)
    let valid_times = snow.valid_times.clone();
    let snow_values = snow.values.clone();
    let mslp_aligned = align_to(&valid_times, &mslp);
    let wind_aligned = align_exact(&valid_times, &wind);
    let solar_aligned = align_exact(&valid_times, &solar);
    let temp_aligned = align_exact(&valid_times, &temp);

    let n = valid_times.len();
    let mut possibilities = Vec::with_capacity(n);
    let mut percentile_cols: BTreeMap<u8,Vec<f64>> = percentiles.iter().map(|p| (*p, Vec::with_capacity(n))).collect();
    let mut snow_clipped = Vec::with_capacity(n);
    let mut mslp_clipped = Vec::with_capacity(n);
    let mut wind_clipped = Vec::with_capacity(n);
    let mut solar_clipped = Vec::with_capacity(n);

    for i in 0..n {
        let (snow_v, snow_c) = fis.clip(Variable::Snow, snow_values[i]);
        let (mslp_v, mslp_c) = fis.clip(Variable::Mslp, mslp_aligned[i]);
        let (wind_v, wind_c) = fis.clip(Variable::Wind, wind_aligned[i]);
        let (solar_v, solar_c) = fis.clip(Variable::Solar, solar_aligned[i]);

        snow_clipped.push(snow_c);
        mslp_clipped.push(mslp_c);
        wind_clipped.push(wind_c);
        solar_clipped.push(solar_c);

        let inputs = FisInputs { snow: snow_v, mslp: mslp_v, wind: wind_v, solar: solar_v };
        let (pv, pm) = if inputs.all_finite() {
            let pv = fis.evaluate(inputs);
            let pm = fis.defuzzify_percentiles(pv, percentiles);
            (pv, pm)
        } else {
            (clyfar_fis::PossibilityVector::NAN, PercentileMap::all_nan(percentiles))
        };

        possibilities.push(pv);
        for p in percentiles {
            percentile_cols.get_mut(p).unwrap().push(pm.get(*p).unwrap_or(f64::NAN));
        }
    }

    let frame = MemberFrame {
        valid_times,
        snow: snow_values,
        mslp: mslp_aligned,
        wind: wind_aligned,
        solar: solar_aligned,
        temp: temp_aligned,
        possibilities,
        percentiles: percentile_cols,
        snow_clipped,
        mslp_clipped,
        wind_clipped,
        solar_clipped,
    };
    frame.validate().map_err(crate::errors::op_failed)?;
    Ok(frame)
}
