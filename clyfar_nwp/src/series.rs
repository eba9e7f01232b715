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

/// ordered (valid-time, scalar) pairs for one variable and member, with a parallel
/// lead-hour column. Built up in time order by the reduction/stitching pipeline;
/// NaN is allowed in `values` (a missing lead), but `valid_times`/`fxx` must stay
/// strictly increasing once [`VariableSeries::sort_and_validate`] has run.
#[derive(Debug,Clone,Default)]
pub struct VariableSeries {
    pub valid_times: Vec<DateTime<Utc>>,
    pub fxx: Vec<i64>,
    pub values: Vec<f64>,
}

impl VariableSeries {
    pub fn new () -> Self { Self::default() }

    pub fn push (&mut self, valid_time: DateTime<Utc>, fxx: i64, value: f64) {
        self.valid_times.push(valid_time);
        self.fxx.push(fxx);
        self.values.push(value);
    }

    pub fn len (&self) -> usize { self.values.len() }
    pub fn is_empty (&self) -> bool { self.values.is_empty() }

    /// sort by valid-time, then check the strictly-increasing invariants (§3).
    pub fn sort_and_validate (&mut self) -> Result<(), String> {
        let mut idx: Vec<usize> = (0..self.len()).collect();
        idx.sort_by_key(|&i| self.valid_times[i]);
        self.valid_times = idx.iter().map(|&i| self.valid_times[i]).collect();
        self.fxx = idx.iter().map(|&i| self.fxx[i]).collect();
        self.values = idx.iter().map(|&i| self.values[i]).collect();

        for w in self.valid_times.windows(2) {
            if w[0] >= w[1] {
                return Err(format!("valid-time not strictly increasing: {} >= {}", w[0], w[1]));
            }
        }
        for w in self.fxx.windows(2) {
            if w[0] >= w[1] {
                return Err(format!("fxx not strictly increasing: {} >= {}", w[0], w[1]));
            }
        }
        if self.fxx.iter().any(|f| *f < 0) {
            return Err("fxx must be non-negative".into());
        }
        Ok(())
    }

    /// collapse duplicate valid-times, keeping the earliest-pushed value seen for each
    /// timestamp (used by the mslp point pipeline, §4.1b). Caller should sort afterwards.
    pub fn dedup_keep_earliest (mut self) -> Self {
        use std::collections::HashSet;
        let mut seen: HashSet<DateTime<Utc>> = HashSet::new();
        let mut out = VariableSeries::new();
        for i in 0..self.len() {
            if seen.insert(self.valid_times[i]) {
                out.push(self.valid_times[i], self.fxx[i], self.values[i]);
            }
        }
        out
    }
}
