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

use std::fmt;
use serde::{Serialize,Deserialize};

/// the horizon is served from two distinct grid resolutions, stitched by [`crate::horizon`].
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Resolution { Hi, Lo }

impl Resolution {
    pub fn degrees (&self) -> f64 {
        match self { Resolution::Hi => 0.25, Resolution::Lo => 0.5 }
    }

    pub fn max_lead_hours (&self) -> u32 {
        match self { Resolution::Hi => 240, Resolution::Lo => 384 }
    }
}

impl fmt::Display for Resolution {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Resolution::Hi => write!(f, "hi"), Resolution::Lo => write!(f, "lo") }
    }
}

/// an ensemble member identifier: the control run or one of 30 perturbations.
/// maps to both the provider-specific label G expects and the stable output
/// label (`clyfar000`/`clyfar{k:03d}`) the exporter writes.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Member {
    Control,
    Perturbation(u8),
}

impl Member {
    pub fn index (&self) -> u8 {
        match self { Member::Control => 0, Member::Perturbation(k) => *k }
    }

    /// the stable on-disk/in-JSON output label: control -> clyfar000, perturbation_k -> clyfar{k:03d}
    pub fn output_label (&self) -> String {
        format!("clyfar{:03}", self.index())
    }

    pub fn all (count: u8) -> Vec<Member> {
        let mut v = vec![Member::Control];
        v.extend((1..count).map(Member::Perturbation));
        v
    }
}

impl fmt::Display for Member {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.output_label()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_labels () {
        assert_eq!(Member::Control.output_label(), "clyfar000");
        assert_eq!(Member::Perturbation(7).output_label(), "clyfar007");
        assert_eq!(Member::Perturbation(30).output_label(), "clyfar030");
    }

    #[test]
    fn all_members_default_count () {
        let members = Member::all(31);
        assert_eq!(members.len(), 31);
        assert_eq!(members[0], Member::Control);
        assert_eq!(members[30], Member::Perturbation(30));
    }
}
