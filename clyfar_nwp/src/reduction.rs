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

use tracing::warn;

use crate::grid::Grid;
use crate::mask::Mask;

/// the Hazen quantile of `sorted` (ascending, finite) samples at rank q*n+0.5,
/// linearly interpolated between the two bracketing order statistics.
/// fewer than two samples is undefined and returns NaN.
pub fn hazen_quantile (sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n < 2 { return f64::NAN; }

    let rank = q * n as f64 + 0.5;
    if rank <= 1.0 { return sorted[0]; }
    if rank >= n as f64 { return sorted[n - 1]; }

    let lo = rank.floor() as usize; // 1-indexed
    let hi = lo + 1;
    let frac = rank - lo as f64;
    let x_lo = sorted[lo - 1];
    let x_hi = sorted[hi - 1];
    x_lo + frac * (x_hi - x_lo)
}

/// component R: reduce a masked grid to a single scalar via Hazen interpolation at quantile q.
/// zero or one surviving finite cells logs a warning and yields NaN; the series remains
/// well-defined (§4.1 edge cases).
pub fn reduce_masked (grid: &Grid, mask: &Mask, q: f64) -> f64 {
    let mut samples: Vec<f64> = Vec::with_capacity(grid.n_lat() * grid.n_lon());
    for (i, row) in grid.values.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            if *mask.selected.get(i).and_then(|r| r.get(j)).unwrap_or(&false) && v.is_finite() {
                samples.push(*v);
            }
        }
    }

    if samples.len() < 2 {
        warn!("mask selects {} finite cell(s) at {:?}: emitting NaN", samples.len(), grid.valid_time);
        return f64::NAN;
    }

    samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
    hazen_quantile(&samples, q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::resolution::Resolution;

    #[test]
    fn hazen_median_of_four () {
        // n=4, q=0.5 -> rank = 2.5 -> interpolate between sorted[1] and sorted[2]
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(hazen_quantile(&sorted, 0.5), 2.5);
    }

    #[test]
    fn hazen_below_rank_one_clamps_to_min () {
        let sorted = vec![10.0, 20.0, 30.0];
        assert_eq!(hazen_quantile(&sorted, 0.0), 10.0);
    }

    #[test]
    fn fewer_than_two_samples_is_nan () {
        assert!(hazen_quantile(&[5.0], 0.5).is_nan());
        assert!(hazen_quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn zero_cell_mask_yields_nan () {
        let grid = Grid::new(vec![41.0], vec![-110.0], vec![vec![5.0]], Utc::now(), Resolution::Hi);
        let mask = Mask { latitude: vec![41.0], longitude: vec![-110.0], selected: vec![vec![false]] };
        assert!(reduce_masked(&grid, &mask, 0.75).is_nan());
    }
}
