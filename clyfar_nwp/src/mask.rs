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
use std::sync::RwLock;
use tracing::info;

use crate::resolution::Resolution;
use crate::provider::ElevationProvider;
use crate::errors::Result;

/// boolean low-terrain mask over a resolution's coordinate grid (component E).
/// never NaN (§3 invariant); shape matches the resolution's coordinate vectors.
#[derive(Debug,Clone)]
pub struct Mask {
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    pub selected: Vec<Vec<bool>>,
}

impl Mask {
    /// elevation < threshold + buffer selects low-terrain cells (§3, §9 open question:
    /// elevation smoothing is a configurable pre-step but disabled by default).
    pub fn from_elevation (latitude: Vec<f64>, longitude: Vec<f64>, elevation: Vec<Vec<f64>>, threshold_m: f64, buffer_m: f64) -> Self {
        let cutoff = threshold_m + buffer_m;
        let selected = elevation.iter().map(|row| row.iter().map(|e| *e < cutoff).collect()).collect();
        Mask { latitude, longitude, selected }
    }

    pub fn n_selected (&self) -> usize {
        self.selected.iter().flatten().filter(|b| **b).count()
    }
}

/// computed once per resolution and cached in memory for the lifetime of the mask cache
/// (disk caching of the mask is an external-collaborator concern - the persisted-state
/// layout in §6 names the file, writing it is outside the core's responsibility here).
pub struct MaskCache<E: ElevationProvider> {
    elevation: E,
    threshold_m: f64,
    buffer_m: f64,
    cache: RwLock<HashMap<Resolution, Mask>>,
}

impl<E: ElevationProvider> MaskCache<E> {
    pub fn new (elevation: E, threshold_m: f64, buffer_m: f64) -> Self {
        MaskCache { elevation, threshold_m, buffer_m, cache: RwLock::new(HashMap::new()) }
    }

    pub async fn get (&self, resolution: Resolution) -> Result<Mask> {
        if let Some(m) = self.cache.read().unwrap().get(&resolution) {
            return Ok(m.clone());
        }

        let (lat, lon, elev) = self.elevation.elevation(resolution).await?;
        let mask = Mask::from_elevation(lat, lon, elev, self.threshold_m, self.buffer_m);
        info!("computed {} mask: {}/{} cells selected", resolution, mask.n_selected(), mask.selected.iter().map(|r| r.len()).sum::<usize>());
        self.cache.write().unwrap().insert(resolution, mask.clone());
        Ok(mask)
    }
}
