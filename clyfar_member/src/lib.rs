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

//! per-member pipeline orchestration: runs the four NWP reductions, aligns them onto
//! a common time grid, and drives the fuzzy inference engine timestamp-by-timestamp
//! to produce an aligned [`frame::MemberFrame`].

pub mod errors;
pub mod frame;
pub mod align;
pub mod driver;

pub use errors::*;
pub use frame::MemberFrame;
pub use driver::run_member;

odin_build::define_load_config!{}
