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

//! Ensemble-level orchestration: fans the member driver out across the GEFS membership
//! under a bounded worker pool, collapses each member's hourly frame into a daily-max
//! table, and serializes the fixed family of export artefacts.

pub mod errors;
pub mod config;
pub mod dailymax;
pub mod cluster_input;
pub mod rounding;
pub mod pool;
pub mod export;
pub mod persist;

pub use errors::*;
pub use config::EnsembleConfig;
pub use dailymax::DailyMaxFrame;
pub use cluster_input::{ClusteringInput,MemberDailyMax,is_strict_background};
pub use pool::run_ensemble;
pub use persist::{write_member_frame,write_daily_max};

odin_build::define_load_config!{}
