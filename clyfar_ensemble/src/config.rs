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

/// top-level ensemble driver configuration (§4.4, §5).
#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct EnsembleConfig {
    pub member_count: u8,
    /// bounded worker pool size W (§4.4, §5).
    pub concurrency: usize,
    pub global_timeout_secs: u64,
    pub percentiles: Vec<u8>,
    /// IANA zone for the daily-max local-day boundary (§4.5); default America/Denver.
    pub local_zone: String,
    pub output_root: String,
}

impl Default for EnsembleConfig {
    fn default () -> Self {
        EnsembleConfig {
            member_count: 31,
            concurrency: 8,
            global_timeout_secs: 3600,
            percentiles: vec![10, 50, 90],
            local_zone: "America/Denver".to_string(),
            output_root: "./data".to_string(),
        }
    }
}
