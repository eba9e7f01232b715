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

use std::collections::HashMap;
use serde::{Serialize,Deserialize};

use crate::universe::Universe;
use crate::membership::MembershipFn;
use crate::variable::{Variable,OzoneCategory};
use crate::rule::{Rule,Antecedent};
use crate::errors::{ClyfarFisError,Result};

/// universe + named category shapes for one input variable.
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct VariableSpec {
    pub universe: Universe,
    pub categories: Vec<(String, MembershipFn)>,
}

impl VariableSpec {
    pub fn category (&self, name: &str) -> Option<&MembershipFn> {
        self.categories.iter().find(|(n,_)| n == name).map(|(_,f)| f)
    }
}

/// static configuration of the fuzzy inference engine: universes, membership
/// functions and rules. Immutable for the lifetime of a run; loaded once via
/// `odin_build::define_load_config!` from `clyfar_fis.ron`, falling back to
/// the frozen v0.9 production defaults below. Construction-time validation
/// (§4.2/§7: "configuration errors...fatal at initialization") is performed
/// by [`crate::engine::Fis::new`], not here, so a config can still be built
/// and inspected (e.g. by tooling) before it's used operationally.
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct FisConfig {
    pub variables: HashMap<Variable, VariableSpec>,
    pub ozone_universe: Universe,
    pub ozone_categories: Vec<(OzoneCategory, MembershipFn)>,
    pub rules: Vec<Rule>,
    pub percentiles: Vec<u8>,
}

impl FisConfig {
    pub fn validate (&self) -> Result<()> {
        for v in Variable::ALL {
            let spec = self.variables.get(&v)
                .ok_or_else(|| ClyfarFisError::InvalidUniverse(format!("missing universe for variable {v}")))?;
            spec.universe.validate()?;
            if spec.categories.is_empty() {
                return Err(ClyfarFisError::InvalidMembershipFn(format!("variable {v} has no categories")));
            }
            for (name, mf) in &spec.categories {
                mf.validate().map_err(|e| ClyfarFisError::InvalidMembershipFn(format!("{v}.{name}: {e}")))?;
            }
        }

        self.ozone_universe.validate()?;
        if self.ozone_categories.len() != OzoneCategory::ALL.len() {
            return Err(ClyfarFisError::InvalidMembershipFn("ozone categories must cover background/moderate/elevated/extreme exactly once".into()));
        }
        for (cat, mf) in &self.ozone_categories {
            mf.validate().map_err(|e| ClyfarFisError::InvalidMembershipFn(format!("ozone.{cat}: {e}")))?;
        }

        if self.rules.is_empty() {
            return Err(ClyfarFisError::InvalidRule("rule list must not be empty".into()));
        }
        for rule in &self.rules {
            let mut leaves = Vec::new();
            rule.antecedent.leaves(&mut leaves);
            for (v, cat) in leaves {
                let spec = self.variables.get(&v)
                    .ok_or_else(|| ClyfarFisError::InvalidRule(format!("rule {} references unknown variable {v}", rule.name)))?;
                if spec.category(&cat).is_none() {
                    return Err(ClyfarFisError::InvalidRule(
                        format!("rule {} references unknown category {v}={cat}", rule.name)));
                }
            }
        }

        Ok(())
    }

    pub fn ozone_membership (&self, cat: OzoneCategory) -> &MembershipFn {
        self.ozone_categories.iter().find(|(c,_)| *c == cat).map(|(_,f)| f)
            .expect("validated config always carries all four ozone categories")
    }
}

impl Default for FisConfig {
    /// the v0.9 production universes and rule set of §4.2; see `DESIGN.md` for the
    /// open-question resolution on why v0.9 (not v1.0, which used Pa for mslp) is authoritative.
    fn default () -> Self {
        let mut variables = HashMap::new();

        variables.insert(Variable::Snow, VariableSpec {
            universe: Universe::new("mm", 0.0, 250.0, 2.0),
            categories: vec![
                ("negligible".into(), MembershipFn::pls(1.0, 60.0, 90.0, 0.0)),
                ("sufficient".into(), MembershipFn::pls(0.0, 100.0, 150.0, 1.0)),
            ],
        });

        variables.insert(Variable::Mslp, VariableSpec {
            universe: Universe::new("hPa", 995.0, 1050.0, 0.5),
            categories: vec![
                ("low".into(), MembershipFn::pls(1.0, 1000.0, 1010.0, 0.0)),
                ("moderate".into(), MembershipFn::trap(1008.0, 1015.0, 1022.0, 1030.0)),
                ("high".into(), MembershipFn::pls(0.0, 1025.0, 1035.0, 1.0)),
            ],
        });

        variables.insert(Variable::Wind, VariableSpec {
            universe: Universe::new("m/s", 0.0, 15.0, 0.25),
            categories: vec![
                ("calm".into(), MembershipFn::pls(1.0, 1.5, 3.0, 0.0)),
                ("breezy".into(), MembershipFn::pls(0.0, 2.0, 4.0, 1.0)),
            ],
        });

        variables.insert(Variable::Solar, VariableSpec {
            universe: Universe::new("W/m2", 0.0, 800.0, 5.0),
            categories: vec![
                ("low".into(), MembershipFn::pls(1.0, 200.0, 350.0, 0.0)),
                ("moderate".into(), MembershipFn::trap(250.0, 350.0, 450.0, 550.0)),
                ("high".into(), MembershipFn::pls(0.0, 500.0, 650.0, 1.0)),
            ],
        });

        let ozone_categories = vec![
            (OzoneCategory::Background, MembershipFn::trap(20.0, 25.0, 32.0, 45.0)),
            (OzoneCategory::Moderate, MembershipFn::trap(30.0, 45.0, 65.0, 80.0)),
            (OzoneCategory::Elevated, MembershipFn::trap(55.0, 75.0, 95.0, 110.0)),
            (OzoneCategory::Extreme, MembershipFn::trap(65.0, 80.0, 130.0, 140.0)),
        ];

        let rules = vec![
            Rule {
                name: "R1".into(),
                antecedent: Antecedent::Or(vec![
                    Antecedent::Is(Variable::Snow, "negligible".into()),
                    Antecedent::Is(Variable::Mslp, "low".into()),
                    Antecedent::Is(Variable::Wind, "breezy".into()),
                ]),
                consequent: OzoneCategory::Background,
            },
            Rule {
                name: "R2".into(),
                antecedent: Antecedent::And(vec![
                    Antecedent::Is(Variable::Snow, "sufficient".into()),
                    Antecedent::Is(Variable::Mslp, "high".into()),
                    Antecedent::Is(Variable::Wind, "calm".into()),
                    Antecedent::Is(Variable::Solar, "high".into()),
                ]),
                consequent: OzoneCategory::Extreme,
            },
            Rule {
                name: "R3".into(),
                antecedent: Antecedent::And(vec![
                    Antecedent::Is(Variable::Snow, "sufficient".into()),
                    Antecedent::Is(Variable::Mslp, "high".into()),
                    Antecedent::Is(Variable::Wind, "calm".into()),
                    Antecedent::Is(Variable::Solar, "moderate".into()),
                ]),
                consequent: OzoneCategory::Elevated,
            },
            Rule {
                name: "R4".into(),
                antecedent: Antecedent::And(vec![
                    Antecedent::Is(Variable::Snow, "sufficient".into()),
                    Antecedent::Is(Variable::Mslp, "high".into()),
                    Antecedent::Is(Variable::Wind, "calm".into()),
                    Antecedent::Is(Variable::Solar, "low".into()),
                ]),
                consequent: OzoneCategory::Moderate,
            },
            Rule {
                name: "R5".into(),
                antecedent: Antecedent::And(vec![
                    Antecedent::Is(Variable::Snow, "sufficient".into()),
                    Antecedent::Is(Variable::Mslp, "moderate".into()),
                    Antecedent::Is(Variable::Wind, "calm".into()),
                    Antecedent::Is(Variable::Solar, "high".into()),
                ]),
                consequent: OzoneCategory::Elevated,
            },
            Rule {
                name: "R6".into(),
                antecedent: Antecedent::And(vec![
                    Antecedent::Is(Variable::Snow, "sufficient".into()),
                    Antecedent::Is(Variable::Mslp, "moderate".into()),
                    Antecedent::Is(Variable::Wind, "calm".into()),
                    Antecedent::Is(Variable::Solar, "moderate".into()),
                ]),
                consequent: OzoneCategory::Moderate,
            },
        ];

        FisConfig {
            variables,
            ozone_universe: Universe::new("ppb", 20.0, 140.0, 0.5),
            ozone_categories,
            rules,
            percentiles: vec![10, 50, 90],
        }
    }
}
