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

use crate::dailymax::DailyMaxFrame;

/// one member's contribution to the clustering input: its daily-max frame plus a
/// per-day validity mask (a day may be outside the requested horizon or otherwise
/// excluded upstream; `true` means the day counts).
#[derive(Debug,Clone)]
pub struct MemberDailyMax {
    pub member_label: String,
    pub frame: DailyMaxFrame,
    pub day_valid: Vec<bool>,
}

/// the data contract handed to the external scenario-clustering collaborator (§4.5, §J).
/// this core does not implement the agglomerative-clustering algorithm itself, only
/// the inputs it needs plus the one predicate (strict background) that is pure and
/// needs no external state.
#[derive(Debug,Clone)]
pub struct ClusteringInput {
    pub init_datetime: DateTime<Utc>,
    pub members: Vec<MemberDailyMax>,
}

/// a member is "strict background" when every valid local day in its horizon has
/// background >= 1-epsilon and the other three categories <= epsilon (§4.5 step 1).
/// a day flagged invalid by `day_valid` is skipped rather than counted against the
/// member. An empty (no valid days) frame trivially qualifies.
pub fn is_strict_background (frame: &DailyMaxFrame, day_valid: &[bool], epsilon: f64) -> bool {
    for i in 0..frame.len() {
        if !day_valid.get(i).copied().unwrap_or(true) {
            continue;
        }
        let strict = frame.background[i] >= 1.0 - epsilon
            && frame.moderate[i] <= epsilon
            && frame.elevated[i] <= epsilon
            && frame.extreme[i] <= epsilon;
        if !strict {
            return false;
        }
    }
    true
}

impl ClusteringInput {
    /// cluster 0 membership per §4.5 step 2: every member whose daily-max frame is
    /// strict background across its valid days.
    pub fn strict_background_labels (&self, epsilon: f64) -> Vec<String> {
        self.members.iter()
            .filter(|m| is_strict_background(&m.frame, &m.day_valid, epsilon))
            .map(|m| m.member_label.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn day (y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

    #[test]
    fn strict_background_requires_every_valid_day () {
        let frame = DailyMaxFrame {
            days: vec![day(2024, 1, 1), day(2024, 1, 2)],
            background: vec![1.0, 0.3],
            moderate: vec![0.0, 0.7],
            elevated: vec![0.0, 0.0],
            extreme: vec![0.0, 0.0],
            percentiles: BTreeMap::new(),
        };
        assert!(!is_strict_background(&frame, &[true, true], 1e-6));
        assert!(is_strict_background(&frame, &[true, false], 1e-6)); // second day excluded by mask
    }

    #[test]
    fn all_background_is_strict () {
        let frame = DailyMaxFrame {
            days: vec![day(2024, 1, 1)],
            background: vec![1.0],
            moderate: vec![0.0],
            elevated: vec![0.0],
            extreme: vec![0.0],
            percentiles: BTreeMap::new(),
        };
        assert!(is_strict_background(&frame, &[true], 1e-6));
    }

    #[test]
    fn nan_day_fails_unless_masked () {
        let frame = DailyMaxFrame {
            days: vec![day(2024, 1, 1)],
            background: vec![f64::NAN],
            moderate: vec![f64::NAN],
            elevated: vec![f64::NAN],
            extreme: vec![f64::NAN],
            percentiles: BTreeMap::new(),
        };
        assert!(!is_strict_background(&frame, &[true], 1e-6));
        assert!(is_strict_background(&frame, &[false], 1e-6));
    }
}
