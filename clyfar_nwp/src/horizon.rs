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

use tracing::warn;

use crate::series::VariableSeries;
use crate::errors::{Result,ClyfarNwpError,op_failed};

/// split a requested horizon into hi-range and lo-range lead lists (§4.1 step 1):
/// L_hi = {start_h, start_h+delta_h, ..., min(240, max_h)}, L_lo = {240+delta_lo, ..., max_h}
/// with delta_lo = max(delta_h, 6). `skip_zero` drops fxx=0 from L_hi (solar is undefined
/// at analysis time).
pub fn split_leads (start_h: u32, max_h: u32, delta_h: u32, hi_cutoff_h: u32, skip_zero: bool) -> (Vec<u32>, Vec<u32>) {
    let hi_max = max_h.min(hi_cutoff_h);
    let hi: Vec<u32> = (start_h..=hi_max).step_by(delta_h.max(1) as usize)
        .filter(|h| !(skip_zero && *h == 0))
        .collect();

    let delta_lo = delta_h.max(6);
    let lo: Vec<u32> = if max_h > hi_cutoff_h {
        let first = hi_cutoff_h + delta_lo;
        (first..=max_h).step_by(delta_lo as usize).collect()
    } else {
        Vec::new()
    };

    (hi, lo)
}

/// component H: concatenate the hi-range and lo-range series in time order (§4.1 steps
/// 1,4). The lead at exactly `hi_cutoff_h` (240h) belongs to the hi stream only; a
/// duplicate lo-stream sample at the same lead is dropped rather than kept as a second
/// point at an identical timestamp.
///
/// either stream may be empty (provider outage for that resolution); only when both
/// are empty does stitching fail, since a series with zero leads is useless downstream.
pub fn stitch (hi: VariableSeries, lo: VariableSeries, hi_cutoff_h: i64) -> Result<VariableSeries> {
    if hi.is_empty() && lo.is_empty() {
        return Err(ClyfarNwpError::NoForecastHours);
    }

    if hi.is_empty() {
        warn!("hi-range series empty, falling back to lo-range only");
        let mut lo = lo;
        lo.sort_and_validate().map_err(op_failed)?;
        return Ok(lo);
    }
    if lo.is_empty() {
        warn!("lo-range series empty, falling back to hi-range only");
        let mut hi = hi;
        hi.sort_and_validate().map_err(op_failed)?;
        return Ok(hi);
    }

    let mut stitched = VariableSeries::new();
    for i in 0..hi.len() {
        stitched.push(hi.valid_times[i], hi.fxx[i], hi.values[i]);
    }
    for i in 0..lo.len() {
        if lo.fxx[i] <= hi_cutoff_h {
            continue; // already covered by the hi stream
        }
        stitched.push(lo.valid_times[i], lo.fxx[i], lo.values[i]);
    }

    stitched.sort_and_validate().map_err(op_failed)?;
    Ok(stitched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Utc,Duration};

    fn series_over (leads: &[i64], init: chrono::DateTime<Utc>) -> VariableSeries {
        let mut s = VariableSeries::new();
        for &h in leads {
            s.push(init + Duration::hours(h), h, h as f64);
        }
        s
    }

    #[test]
    fn stitches_and_drops_duplicate_cutoff_sample () {
        let init = Utc::now();
        let hi = series_over(&[0, 6, 240], init);
        let lo = series_over(&[240, 246, 252], init);
        let stitched = stitch(hi, lo, 240).unwrap();
        assert_eq!(stitched.fxx, vec![0, 6, 240, 246, 252]);
    }

    #[test]
    fn hi_only_when_lo_missing () {
        let init = Utc::now();
        let hi = series_over(&[0, 6, 240], init);
        let stitched = stitch(hi, VariableSeries::new(), 240).unwrap();
        assert_eq!(stitched.fxx, vec![0, 6, 240]);
    }

    #[test]
    fn lo_only_when_hi_missing () {
        let init = Utc::now();
        let lo = series_over(&[246, 252], init);
        let stitched = stitch(VariableSeries::new(), lo, 240).unwrap();
        assert_eq!(stitched.fxx, vec![246, 252]);
    }

    #[test]
    fn both_empty_is_an_error () {
        let result = stitch(VariableSeries::new(), VariableSeries::new(), 240);
        assert!(matches!(result, Err(ClyfarNwpError::NoForecastHours)));
    }

    #[test]
    fn split_leads_covers_hi_and_lo_ranges () {
        let (hi, lo) = split_leads(0, 384, 6, 240, false);
        assert_eq!(hi.first(), Some(&0));
        assert_eq!(hi.last(), Some(&240));
        assert_eq!(lo.first(), Some(&246));
        assert_eq!(lo.last(), Some(&384));
    }

    #[test]
    fn split_leads_skips_zero_for_solar () {
        let (hi, _) = split_leads(0, 240, 6, 240, true);
        assert_eq!(hi.first(), Some(&6));
    }

    #[test]
    fn split_leads_empty_lo_when_horizon_within_hi_cutoff () {
        let (_, lo) = split_leads(0, 240, 6, 240, false);
        assert!(lo.is_empty());
    }
}
