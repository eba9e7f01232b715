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
#![allow(unused)]

//! four-input/one-output fuzzy inference engine for the ozone possibility
//! distribution: universes of discourse, piecewise-linear membership shapes,
//! a fixed rule list, and percentile defuzzification.

pub mod errors;
pub mod variable;
pub mod universe;
pub mod membership;
pub mod rule;
pub mod config;
pub mod engine;

pub use errors::*;
pub use variable::{Variable,OzoneCategory};
pub use universe::Universe;
pub use membership::MembershipFn;
pub use rule::{Rule,Antecedent};
pub use config::{FisConfig,VariableSpec};
pub use engine::{Fis,FisInputs,PossibilityVector,PercentileMap};

odin_build::define_load_config!{}
