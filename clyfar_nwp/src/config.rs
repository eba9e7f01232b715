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

use serde::{Serialize,Deserialize};

use crate::mslp::MslpPoint;

/// per-variable Hazen quantile used by component R (§4.1). mslp bypasses this and uses
/// a point lookup instead ([`crate::mslp`]).
#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct QuantilePolicy {
    pub snow_q: f64,
    pub wind_q: f64,
    pub solar_q: f64,
}

impl Default for QuantilePolicy {
    fn default () -> Self { QuantilePolicy { snow_q: 0.75, wind_q: 0.5, solar_q: 0.90 } }
}

/// basin-wide reduction configuration: bounding box, low-terrain mask parameters,
/// horizon cutoffs, mslp point coordinates, and the solar filler time zone.
#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct ReductionConfig {
    pub quantiles: QuantilePolicy,

    /// basin bounding box (west,south,east,north) in degrees (§4.1, §9).
    pub basin_bbox: (f64,f64,f64,f64),

    pub mask_threshold_m: f64,
    pub mask_buffer_m: f64,

    /// elevation smoothing is an open question resolved to "off by default" (§9);
    /// a positive value enables a moving-average pre-step over the raw elevation field.
    pub mask_smoothing_radius_cells: u32,

    /// hi-range cutoff in hours; the lo-range step must be at least this much (§4.1).
    pub hi_cutoff_h: i64,
    pub hi_step_h: i64,
    pub lo_step_h: i64,

    pub mslp_point: MslpPoint,

    /// IANA zone name for the solar late-range local-hour filler (§4.1c); default America/Denver.
    pub solar_filler_zone: String,

    pub member_count: u8,
}

impl Default for ReductionConfig {
    fn default () -> Self {
        ReductionConfig {
            quantiles: QuantilePolicy::default(),
            basin_bbox: (-110.9, 39.2, -108.2, 41.3),
            mask_threshold_m: 1850.0,
            mask_buffer_m: 250.0,
            mask_smoothing_radius_cells: 0,
            hi_cutoff_h: 240,
            hi_step_h: 6,
            lo_step_h: 6,
            mslp_point: MslpPoint { lat: 40.0891, lon: -109.6774 },
            solar_filler_zone: "America/Denver".to_string(),
            member_count: 31,
        }
    }
}

impl ReductionConfig {
    /// the effective lo-range step: max(lo_step_h, hi_step_h) per §4.1.
    pub fn effective_lo_step_h (&self) -> i64 {
        self.lo_step_h.max(self.hi_step_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_lo_step_is_at_least_hi_step () {
        let mut cfg = ReductionConfig::default();
        cfg.lo_step_h = 3;
        cfg.hi_step_h = 6;
        assert_eq!(cfg.effective_lo_step_h(), 6);
    }
}
