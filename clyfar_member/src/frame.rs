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
use chrono::{DateTime,Utc};
use serde::Serialize;

use clyfar_fis::PossibilityVector;

/// aligned, time-indexed table of one member's inputs, possibilities, and percentile
/// ppb values (§3). `percentiles` keys match whatever list the driver was configured
/// with; column order otherwise follows §4.3 step 4.
#[derive(Debug,Clone,Serialize)]
pub struct MemberFrame {
    pub valid_times: Vec<DateTime<Utc>>,
    pub snow: Vec<f64>,
    pub mslp: Vec<f64>,
    pub wind: Vec<f64>,
    pub solar: Vec<f64>,
    pub temp: Vec<f64>,
    pub possibilities: Vec<PossibilityVector>,
    pub percentiles: BTreeMap<u8,Vec<f64>>,
    pub snow_clipped: Vec<bool>,
    pub mslp_clipped: Vec<bool>,
    pub wind_clipped: Vec<bool>,
    pub solar_clipped: Vec<bool>,
}

impl MemberFrame {
    pub fn len (&self) -> usize { self.valid_times.len() }
    pub fn is_empty (&self) -> bool { self.valid_times.is_empty() }

    /// strictly-increasing valid-time index (§8 invariants).
    pub fn validate (&self) -> Result<(), String> {
        for w in self.valid_times.windows(2) {
            if w[0] >= w[1] {
                return Err(format!("valid-time not strictly increasing: {} >= {}", w[0], w[1]));
            }
        }
        let n = self.len();
        for (name, col) in [("snow", &self.snow), ("mslp", &self.mslp), ("wind", &self.wind), ("solar", &self.solar), ("temp", &self.temp)] {
            if col.len() != n {
                return Err(format!("column {name} has length {} but index has length {n}", col.len()));
            }
        }
        if self.possibilities.len() != n {
            return Err("possibilities column length mismatch".into());
        }
        for (p, col) in &self.percentiles {
            if col.len() != n {
                return Err(format!("percentile {p} column length mismatch"));
            }
        }
        Ok(())
    }
}
