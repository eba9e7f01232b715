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

use crate::variable::{Variable,OzoneCategory};

/// a boolean tree over "variable has category" leaves, combined with AND (min)/OR (max).
#[derive(Debug,Clone,Serialize,Deserialize)]
pub enum Antecedent {
    Is(Variable, String),
    And(Vec<Antecedent>),
    Or(Vec<Antecedent>),
}

impl Antecedent {
    /// recursively apply min/max over the per-variable fuzzified category memberships.
    /// a leaf referencing an unknown category is treated as non-activating (0.0) rather
    /// than panicking, since that is a configuration error caught at FIS construction time.
    pub fn activation (&self, memberships: &HashMap<Variable, HashMap<String,f64>>) -> f64 {
        match self {
            Antecedent::Is(v, cat) => {
                memberships.get(v).and_then(|m| m.get(cat)).copied().unwrap_or(0.0)
            }
            Antecedent::And(children) => {
                children.iter().map(|c| c.activation(memberships)).fold(1.0, f64::min)
            }
            Antecedent::Or(children) => {
                children.iter().map(|c| c.activation(memberships)).fold(0.0, f64::max)
            }
        }
    }

    /// collect every (variable,category) leaf referenced, used to validate rules
    /// against the configured category sets at construction time.
    pub fn leaves (&self, out: &mut Vec<(Variable,String)>) {
        match self {
            Antecedent::Is(v, cat) => out.push((*v, cat.clone())),
            Antecedent::And(children) | Antecedent::Or(children) => {
                for c in children { c.leaves(out) }
            }
        }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Rule {
    pub name: String,
    pub antecedent: Antecedent,
    pub consequent: OzoneCategory,
}
