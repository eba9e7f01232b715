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

use std::collections::{BTreeMap,HashMap};
use serde::{Serialize,Deserialize};
use tracing::warn;

use crate::config::FisConfig;
use crate::variable::{Variable,OzoneCategory};
use crate::errors::Result;

/// per-category activation over the ozone categories. Not required to sum to 1
/// (sub-normal distributions are allowed, per §3).
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct PossibilityVector {
    pub background: f64,
    pub moderate: f64,
    pub elevated: f64,
    pub extreme: f64,
}

impl PossibilityVector {
    pub const NAN: PossibilityVector = PossibilityVector {
        background: f64::NAN, moderate: f64::NAN, elevated: f64::NAN, extreme: f64::NAN,
    };

    pub const ZERO: PossibilityVector = PossibilityVector {
        background: 0.0, moderate: 0.0, elevated: 0.0, extreme: 0.0,
    };

    pub fn get (&self, cat: OzoneCategory) -> f64 {
        match cat {
            OzoneCategory::Background => self.background,
            OzoneCategory::Moderate => self.moderate,
            OzoneCategory::Elevated => self.elevated,
            OzoneCategory::Extreme => self.extreme,
        }
    }

    fn set_max (&mut self, cat: OzoneCategory, v: f64) {
        let slot = match cat {
            OzoneCategory::Background => &mut self.background,
            OzoneCategory::Moderate => &mut self.moderate,
            OzoneCategory::Elevated => &mut self.elevated,
            OzoneCategory::Extreme => &mut self.extreme,
        };
        if v > *slot { *slot = v }
    }

    pub fn has_any_nonzero (&self) -> bool {
        OzoneCategory::ALL.iter().any(|c| self.get(*c) > 0.0)
    }
}

/// percentile -> defuzzified ozone ppb value. NaN when the aggregated possibility
/// mass is zero (§4.2 step 2 of `defuzzify_percentiles`).
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PercentileMap(pub BTreeMap<u8,f64>);

impl PercentileMap {
    pub fn get (&self, p: u8) -> Option<f64> { self.0.get(&p).copied() }

    pub fn all_nan (percentiles: &[u8]) -> Self {
        PercentileMap(percentiles.iter().map(|p| (*p, f64::NAN)).collect())
    }
}

/// the four fuzzy inputs to one evaluation, already clipped into their universes.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct FisInputs {
    pub snow: f64,
    pub mslp: f64,
    pub wind: f64,
    pub solar: f64,
}

impl FisInputs {
    pub fn get (&self, v: Variable) -> f64 {
        match v {
            Variable::Snow => self.snow,
            Variable::Mslp => self.mslp,
            Variable::Wind => self.wind,
            Variable::Solar => self.solar,
        }
    }

    pub fn all_finite (&self) -> bool {
        self.snow.is_finite() && self.mslp.is_finite() && self.wind.is_finite() && self.solar.is_finite()
    }
}

/// a validated, immutable fuzzy inference engine. Construction fails (fatal, per §7)
/// if the configuration violates any invariant in §4.2.
#[derive(Debug,Clone)]
pub struct Fis {
    config: FisConfig,
}

impl Fis {
    pub fn new (config: FisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Fis { config })
    }

    pub fn config (&self) -> &FisConfig { &self.config }

    /// clip a raw value into its variable's universe, returning (clipped, was_clipped).
    /// callers (the member driver) are responsible for logging/recording the flag.
    pub fn clip (&self, v: Variable, value: f64) -> (f64, bool) {
        self.config.variables[&v].universe.clip(value)
    }

    /// membership degree of every configured category of `variable` at `value`.
    pub fn fuzzify (&self, variable: Variable, value: f64) -> HashMap<String,f64> {
        let spec = &self.config.variables[&variable];
        spec.categories.iter().map(|(name, mf)| (name.clone(), mf.eval(value))).collect()
    }

    /// evaluate all rules against the four (already-clipped) inputs and aggregate
    /// per-category activation by max over firing rules (§4.2 steps 1-4).
    /// NaN inputs short-circuit to an all-NaN possibility vector, never panicking.
    pub fn evaluate (&self, inputs: FisInputs) -> PossibilityVector {
        if !inputs.all_finite() {
            return PossibilityVector::NAN;
        }

        let memberships: HashMap<Variable, HashMap<String,f64>> = Variable::ALL.iter()
            .map(|v| (*v, self.fuzzify(*v, inputs.get(*v))))
            .collect();

        let mut result = PossibilityVector::ZERO;
        for rule in &self.config.rules {
            let a_r = rule.antecedent.activation(&memberships);
            result.set_max(rule.consequent, a_r);
        }
        result
    }

    /// aggregate shape A(u) = max over categories of min(activation_c, mu_c(u)), then
    /// return the smallest u with cumulative-area-fraction >= p/100 for each requested
    /// percentile (right-continuous; a forward scan over the uniform grid resolving
    /// ties at flat plateaus to the smallest such u).
    pub fn defuzzify_percentiles (&self, pv: PossibilityVector, percentiles: &[u8]) -> PercentileMap {
        if !(pv.background.is_finite() && pv.moderate.is_finite() && pv.elevated.is_finite() && pv.extreme.is_finite()) {
            return PercentileMap::all_nan(percentiles);
        }

        let universe = &self.config.ozone_universe;
        let grid = universe.grid();
        let n = grid.len();

        let shape: Vec<f64> = (0..n).map(|i| {
            let u = grid.at(i);
            OzoneCategory::ALL.iter()
                .map(|c| pv.get(*c).min(self.config.ozone_membership(*c).eval(u)))
                .fold(0.0, f64::max)
        }).collect();

        let total: f64 = shape.iter().sum();
        if total <= 0.0 {
            return PercentileMap::all_nan(percentiles);
        }

        let mut result = BTreeMap::new();
        for &p in percentiles {
            let target = (p as f64 / 100.0) * total;
            let mut running = 0.0;
            let mut found = None;
            for i in 0..n {
                running += shape[i];
                if running >= target {
                    found = Some(grid.at(i));
                    break;
                }
            }
            result.insert(p, found.unwrap_or_else(|| grid.at(n - 1)));
        }
        PercentileMap(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FisConfig;

    fn fis () -> Fis { Fis::new(FisConfig::default()).expect("default config is valid") }

    // Scenario 1 - background rule dominates (spec.md §8)
    #[test]
    fn scenario_background_dominates () {
        let f = fis();
        let inputs = FisInputs { snow: 20.0, mslp: 1005.0, wind: 4.0, solar: 600.0 };
        let pv = f.evaluate(inputs);
        assert_eq!(pv, PossibilityVector { background: 1.0, moderate: 0.0, elevated: 0.0, extreme: 0.0 });

        let pm = f.defuzzify_percentiles(pv, &[50]);
        let p50 = pm.get(50).unwrap();
        assert!(p50 >= 30.0 && p50 <= 40.0, "p50={p50} expected in [30,40]");
    }

    // Scenario 2 - extreme buildup
    #[test]
    fn scenario_extreme_buildup () {
        let f = fis();
        let inputs = FisInputs { snow: 200.0, mslp: 1038.0, wind: 0.5, solar: 750.0 };
        let pv = f.evaluate(inputs);
        assert_eq!(pv.extreme, 1.0);
        assert_eq!(pv.background, 0.0);

        let pm = f.defuzzify_percentiles(pv, &[90]);
        assert!(pm.get(90).unwrap() >= 75.0);
    }

    // Scenario 3 - cusp moderate
    #[test]
    fn scenario_cusp_moderate () {
        let f = fis();
        let inputs = FisInputs { snow: 150.0, mslp: 1022.0, wind: 1.0, solar: 400.0 };
        let pv = f.evaluate(inputs);
        assert!(pv.moderate > 0.0);
        assert_eq!(pv.elevated, 0.0);
        assert_eq!(pv.background, 0.0);
    }

    // Scenario 6 - clip flag
    #[test]
    fn scenario_clip_flag () {
        let f = fis();
        let (clipped, was_clipped) = f.clip(Variable::Snow, 1000.0);
        assert_eq!(clipped, 250.0);
        assert!(was_clipped);

        let inputs = FisInputs { snow: clipped, mslp: 1005.0, wind: 4.0, solar: 600.0 };
        let pv = f.evaluate(inputs);
        assert!(pv.background >= 0.0); // evaluation proceeds with the clipped value, never panics
    }

    #[test]
    fn nan_input_short_circuits () {
        let f = fis();
        let inputs = FisInputs { snow: 20.0, mslp: 1005.0, wind: 4.0, solar: f64::NAN };
        let pv = f.evaluate(inputs);
        assert!(pv.background.is_nan() && pv.moderate.is_nan() && pv.elevated.is_nan() && pv.extreme.is_nan());
    }

    #[test]
    fn percentiles_are_ordered () {
        let f = fis();
        let inputs = FisInputs { snow: 200.0, mslp: 1038.0, wind: 0.5, solar: 750.0 };
        let pv = f.evaluate(inputs);
        let pm = f.defuzzify_percentiles(pv, &[10, 50, 90]);
        let p10 = pm.get(10).unwrap();
        let p50 = pm.get(50).unwrap();
        let p90 = pm.get(90).unwrap();
        assert!(p10 <= p50 && p50 <= p90);
    }

    #[test]
    fn zero_activation_yields_nan_percentiles () {
        // an input combination not close to any category boundary of any rule: all possibilities near 0
        // is hard to construct exactly with the default config (R1 is broad), so exercise the all-zero
        // path directly against the aggregation step instead.
        let f = fis();
        let pm = f.defuzzify_percentiles(PossibilityVector::ZERO, &[10, 50, 90]);
        assert!(pm.get(10).unwrap().is_nan());
        assert!(pm.get(50).unwrap().is_nan());
        assert!(pm.get(90).unwrap().is_nan());
    }
}
