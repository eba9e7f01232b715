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

/// round a floating value to `dp` decimal places, or `None` for any non-finite input.
/// `serde_json` serializes `None` as JSON `null`, which is the NaN/Inf policy for every
/// exported artefact (§6).
pub fn round_or_null (value: f64, dp: i32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let scale = 10f64.powi(dp);
    Some((value * scale).round() / scale)
}

pub fn round_vec (values: &[f64], dp: i32) -> Vec<Option<f64>> {
    values.iter().map(|v| round_or_null(*v, dp)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_finite_values () {
        assert_eq!(round_or_null(30.456, 2), Some(30.46));
        assert_eq!(round_or_null(30.0, 0), Some(30.0));
    }

    #[test]
    fn non_finite_becomes_none () {
        assert_eq!(round_or_null(f64::NAN, 2), None);
        assert_eq!(round_or_null(f64::INFINITY, 2), None);
    }

    #[test]
    fn rounding_is_stable_under_reapplication () {
        let once = round_or_null(30.456, 2).unwrap();
        let twice = round_or_null(once, 2).unwrap();
        assert_eq!(once, twice);
    }
}
