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

//! NWP ensemble-member reduction: pulls gridded snow depth, mean-sea-level pressure,
//! 10 m wind and downward shortwave radiation down to a single basin-representative
//! time series per variable per member, stitching the hi- and lo-resolution model
//! ranges and filling the solar series past its reliable horizon.

pub mod errors;
pub mod resolution;
pub mod grid;
pub mod provider;
pub mod mask;
pub mod reduction;
pub mod series;
pub mod retry;
pub mod solar;
pub mod horizon;
pub mod mslp;
pub mod config;
pub mod reduce;

pub use errors::*;
pub use resolution::{Resolution,Member};
pub use grid::{Grid,VariableQuery};
pub use provider::{GridProvider,ElevationProvider};
pub use mask::{Mask,MaskCache};
pub use series::VariableSeries;
pub use config::{ReductionConfig,QuantilePolicy};
pub use mslp::MslpPoint;

odin_build::define_load_config!{}
