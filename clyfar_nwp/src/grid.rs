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

use std::fmt;
use chrono::{DateTime,Utc};

use crate::resolution::Resolution;

/// the variable queries a [`crate::provider::GridProvider`] must understand (§6).
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum VariableQuery {
    SnowDepth,
    MeanSeaLevelPressure,
    DownwardShortwaveRadiation,
    Wind10m,
    Temperature2m,
}

impl VariableQuery {
    pub fn as_str (&self) -> &'static str {
        match self {
            VariableQuery::SnowDepth => "snow depth",
            VariableQuery::MeanSeaLevelPressure => "mean-sea-level pressure",
            VariableQuery::DownwardShortwaveRadiation => "downward shortwave radiation at surface",
            VariableQuery::Wind10m => "10 m wind speed",
            VariableQuery::Temperature2m => "2 m temperature",
        }
    }
}

impl fmt::Display for VariableQuery {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// a 2-D lat x lon field as delivered by the grid provider (§3). Latitudes are stored
/// in whatever order the provider delivers them (commonly descending); reductions
/// (`crate::reduction`) are orientation-agnostic and only care about cell identity,
/// not row/column order.
#[derive(Debug,Clone)]
pub struct Grid {
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    /// row-major values(latitude_index, longitude_index); may contain NaN.
    pub values: Vec<Vec<f64>>,
    pub valid_time: DateTime<Utc>,
    pub resolution: Resolution,
}

impl Grid {
    pub fn new (latitude: Vec<f64>, longitude: Vec<f64>, values: Vec<Vec<f64>>, valid_time: DateTime<Utc>, resolution: Resolution) -> Self {
        debug_assert_eq!(values.len(), latitude.len(), "grid row count must match latitude vector");
        if let Some(row) = values.first() {
            debug_assert_eq!(row.len(), longitude.len(), "grid column count must match longitude vector");
        }
        Grid { latitude, longitude, values, valid_time, resolution }
    }

    pub fn n_lat (&self) -> usize { self.latitude.len() }
    pub fn n_lon (&self) -> usize { self.longitude.len() }

    /// nearest grid cell to (lat,lon), by simple linear scan over coordinate vectors
    /// (grids here are small enough - basin-scale subsets - that this is not a bottleneck).
    pub fn nearest (&self, lat: f64, lon: f64) -> f64 {
        let i = nearest_index(&self.latitude, lat);
        let j = nearest_index(&self.longitude, lon);
        self.values[i][j]
    }
}

fn nearest_index (coords: &[f64], target: f64) -> usize {
    coords.iter().enumerate()
        .min_by(|(_, a), (_, b)| (**a - target).abs().partial_cmp(&(**b - target).abs()).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_cell_lookup () {
        let grid = Grid::new(
            vec![41.0, 40.5, 40.0],
            vec![-110.0, -109.5, -109.0],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]],
            Utc::now(),
            Resolution::Hi,
        );
        assert_eq!(grid.nearest(40.0891, -109.6774), 5.0);
    }
}
