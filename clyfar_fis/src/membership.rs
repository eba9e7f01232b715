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

use crate::errors::{ClyfarFisError,Result};

/// a piecewise-linear membership function shape, evaluated in closed form at
/// any real-valued input (equivalent to interpolating over the discretized
/// universe since both shapes are themselves piecewise-linear).
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub enum MembershipFn {
    /// constant h_left for u <= x_left, linear to h_right between x_left and x_right, constant h_right for u >= x_right.
    Pls { h_left: f64, x_left: f64, x_right: f64, h_right: f64 },

    /// zero outside [x_left,x_right], rising to 1 on [x_left,m_lower], flat at 1 on [m_lower,m_upper], falling to 0 on [m_upper,x_right].
    Trap { x_left: f64, m_lower: f64, m_upper: f64, x_right: f64 },
}

impl MembershipFn {
    pub fn pls (h_left: f64, x_left: f64, x_right: f64, h_right: f64) -> Self {
        MembershipFn::Pls { h_left, x_left, x_right, h_right }
    }

    pub fn trap (x_left: f64, m_lower: f64, m_upper: f64, x_right: f64) -> Self {
        MembershipFn::Trap { x_left, m_lower, m_upper, x_right }
    }

    pub fn validate (&self) -> Result<()> {
        match self {
            MembershipFn::Pls { h_left, x_left, x_right, h_right } => {
                if !(x_left < x_right) {
                    return Err(ClyfarFisError::InvalidMembershipFn(format!("PLS x_left {x_left} >= x_right {x_right}")));
                }
                if !(0.0..=1.0).contains(h_left) || !(0.0..=1.0).contains(h_right) {
                    return Err(ClyfarFisError::InvalidMembershipFn(format!("PLS heights {h_left},{h_right} outside [0,1]")));
                }
                Ok(())
            }
            MembershipFn::Trap { x_left, m_lower, m_upper, x_right } => {
                if !(x_left < m_lower && m_lower <= m_upper && m_upper < x_right) {
                    return Err(ClyfarFisError::InvalidMembershipFn(
                        format!("trapezoid ordering violated: {x_left} < {m_lower} <= {m_upper} < {x_right}")));
                }
                Ok(())
            }
        }
    }

    pub fn eval (&self, u: f64) -> f64 {
        match *self {
            MembershipFn::Pls { h_left, x_left, x_right, h_right } => {
                if u <= x_left { h_left }
                else if u >= x_right { h_right }
                else {
                    let t = (u - x_left) / (x_right - x_left);
                    h_left + t * (h_right - h_left)
                }
            }
            MembershipFn::Trap { x_left, m_lower, m_upper, x_right } => {
                if u <= x_left || u >= x_right { 0.0 }
                else if u < m_lower { (u - x_left) / (m_lower - x_left) }
                else if u <= m_upper { 1.0 }
                else { (x_right - u) / (x_right - m_upper) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq (a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn pls_shape () {
        let f = MembershipFn::pls(1.0, 60.0, 90.0, 0.0);
        assert!(approx_eq(f.eval(20.0), 1.0));
        assert!(approx_eq(f.eval(60.0), 1.0));
        assert!(approx_eq(f.eval(75.0), 0.5));
        assert!(approx_eq(f.eval(90.0), 0.0));
        assert!(approx_eq(f.eval(200.0), 0.0));
    }

    #[test]
    fn trap_shape () {
        let f = MembershipFn::trap(20.0, 25.0, 32.0, 45.0);
        assert!(approx_eq(f.eval(10.0), 0.0));
        assert!(approx_eq(f.eval(22.5), 0.5));
        assert!(approx_eq(f.eval(28.0), 1.0));
        assert!(approx_eq(f.eval(32.0), 1.0));
        assert!(approx_eq(f.eval(38.5), 0.5));
        assert!(approx_eq(f.eval(50.0), 0.0));
    }

    #[test]
    fn invalid_shapes_rejected () {
        assert!(MembershipFn::pls(0.0, 10.0, 10.0, 1.0).validate().is_err());
        assert!(MembershipFn::pls(1.5, 0.0, 10.0, 0.0).validate().is_err());
        assert!(MembershipFn::trap(10.0, 10.0, 20.0, 30.0).validate().is_err());
        assert!(MembershipFn::trap(10.0, 20.0, 30.0, 30.0).validate().is_err());
        assert!(MembershipFn::trap(10.0, 25.0, 20.0, 30.0).validate().is_err());
    }
}
