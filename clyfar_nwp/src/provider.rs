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

use async_trait::async_trait;

use crate::grid::{Grid,VariableQuery};
use crate::resolution::{Resolution,Member};
use crate::errors::Result;
use chrono::{DateTime,Utc};

/// component G: given (init time, lead hour, variable, resolution, member), returns a grid.
/// the core depends only on this capability; the actual network/file retrieval is an
/// external collaborator injected at the driver boundary (§6).
#[async_trait]
pub trait GridProvider: Send + Sync {
    async fn fetch (&self, init: DateTime<Utc>, lead_h: u32, variable: VariableQuery, resolution: Resolution, member: Member) -> Result<Grid>;
}

/// component E: given a resolution, returns the (cached) basin low-terrain mask.
/// elevation retrieval is likewise an external collaborator; the mask computation
/// itself (threshold + buffer) lives in [`crate::mask`].
#[async_trait]
pub trait ElevationProvider: Send + Sync {
    /// raw elevation in meters over the resolution's coordinate grid, same shape as a [`Grid`]'s values.
    async fn elevation (&self, resolution: Resolution) -> Result<(Vec<f64>, Vec<f64>, Vec<Vec<f64>>)>;
}
