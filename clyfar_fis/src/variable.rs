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

//! the fixed set of FIS input variables, replacing the dynamic name-indexed
//! lookups of the source with a compile-time enum (see the member driver for
//! the matching table of per-variable reduction policy).

use std::fmt;
use serde::{Serialize,Deserialize};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Variable { Snow, Mslp, Wind, Solar }

impl Variable {
    pub const ALL: [Variable; 4] = [Variable::Snow, Variable::Mslp, Variable::Wind, Variable::Solar];

    pub fn name (&self)->&'static str {
        match self {
            Variable::Snow => "snow",
            Variable::Mslp => "mslp",
            Variable::Wind => "wind",
            Variable::Solar => "solar",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}

/// the four ozone possibility categories, in the fixed order every `PossibilityVector`
/// and export artefact uses.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum OzoneCategory { Background, Moderate, Elevated, Extreme }

impl OzoneCategory {
    pub const ALL: [OzoneCategory; 4] = [
        OzoneCategory::Background, OzoneCategory::Moderate, OzoneCategory::Elevated, OzoneCategory::Extreme
    ];

    pub fn name (&self)->&'static str {
        match self {
            OzoneCategory::Background => "background",
            OzoneCategory::Moderate => "moderate",
            OzoneCategory::Elevated => "elevated",
            OzoneCategory::Extreme => "extreme",
        }
    }
}

impl fmt::Display for OzoneCategory {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}
