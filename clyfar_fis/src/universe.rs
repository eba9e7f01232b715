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
use odin_common::ranges::LinearRange;

use crate::errors::{ClyfarFisError,Result};

/// a finite uniform grid a variable's membership functions are evaluated and
/// aggregated over. Serialized as plain bounds/step (not as a `LinearRange`
/// directly, which has no serde impl) and turned into one on demand via
/// [`Universe::grid`].
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Universe {
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Universe {
    pub fn new (unit: impl Into<String>, min: f64, max: f64, step: f64) -> Self {
        Universe { unit: unit.into(), min, max, step }
    }

    pub fn validate (&self) -> Result<()> {
        if !(self.step > 0.0) {
            return Err(ClyfarFisError::InvalidUniverse(format!("non-positive step {}", self.step)));
        }
        if !(self.max > self.min) {
            return Err(ClyfarFisError::InvalidUniverse(format!("max {} <= min {}", self.max, self.min)));
        }
        Ok(())
    }

    pub fn len (&self) -> usize {
        (((self.max - self.min) / self.step).round() as usize) + 1
    }

    pub fn grid (&self) -> LinearRange<f64> {
        LinearRange::new(self.min, self.step, self.len())
    }

    /// clip a value into [min,max], returning the clipped value and whether clipping occurred.
    /// idempotent and order-preserving: clip(clip(x)) == clip(x).
    pub fn clip (&self, v: f64) -> (f64, bool) {
        let c = v.clamp(self.min, self.max);
        (c, c != v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_is_idempotent_and_monotone () {
        let u = Universe::new("mm", 0.0, 250.0, 2.0);
        let (c1, clipped1) = u.clip(1000.0);
        assert_eq!(c1, 250.0);
        assert!(clipped1);
        let (c2, clipped2) = u.clip(c1);
        assert_eq!(c2, c1);
        assert!(!clipped2);

        let (lo, _) = u.clip(-10.0);
        let (hi, _) = u.clip(300.0);
        assert!(lo <= hi);
    }

    #[test]
    fn grid_matches_len () {
        let u = Universe::new("ppb", 20.0, 140.0, 0.5);
        assert_eq!(u.grid().len(), u.len());
        assert_eq!(u.grid().first(), 20.0);
    }
}
