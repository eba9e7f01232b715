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

use std::fs::{self,File};
use std::path::{Path,PathBuf};
use chrono::{DateTime,Utc};
use serde::Serialize;

use clyfar_nwp::Member;
use clyfar_member::MemberFrame;

use crate::dailymax::DailyMaxFrame;
use crate::errors::{Result,op_failed};

/// `<data_root>/<init>` (§4.4 step 5, §6), e.g. `./data/2024-01-01T00`.
fn init_dir (data_root: &str, init: DateTime<Utc>) -> PathBuf {
    Path::new(data_root).join(init.format("%Y-%m-%dT%H").to_string())
}

fn ensure_dir (path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(op_failed)?;
    }
    Ok(())
}

fn write_json<T: Serialize> (path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(op_failed)?;
    serde_json::to_writer_pretty(file, value).map_err(op_failed)
}

/// persist one member's aligned hourly frame to
/// `<data_root>/<init>/<member>_df.json` (§4.4 step 5, §6). The layout names a
/// parquet-equivalent table; no parquet/arrow crate is part of this workspace's stack,
/// so the table is written as JSON instead, same encoding the export artefacts already use.
pub fn write_member_frame (data_root: &str, init: DateTime<Utc>, member: Member, frame: &MemberFrame) -> Result<()> {
    let dir = init_dir(data_root, init);
    ensure_dir(&dir)?;
    write_json(&dir.join(format!("{member}_df.json")), frame)
}

/// persist one member's daily-max table to `<data_root>/<init>/dailymax/<member>_dailymax.json`
/// (§4.4 step 5, §6), same JSON-for-parquet substitution as [`write_member_frame`].
pub fn write_daily_max (data_root: &str, init: DateTime<Utc>, member: Member, daily: &DailyMaxFrame) -> Result<()> {
    let dir = init_dir(data_root, init).join("dailymax");
    ensure_dir(&dir)?;
    write_json(&dir.join(format!("{member}_dailymax.json")), daily)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn init_time () -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() }

    fn empty_daily () -> DailyMaxFrame {
        DailyMaxFrame {
            days: vec![],
            background: vec![], moderate: vec![], elevated: vec![], extreme: vec![],
            percentiles: BTreeMap::new(),
        }
    }

    fn empty_member () -> MemberFrame {
        MemberFrame {
            valid_times: vec![],
            snow: vec![], mslp: vec![], wind: vec![], solar: vec![], temp: vec![],
            possibilities: vec![],
            percentiles: BTreeMap::new(),
            snow_clipped: vec![], mslp_clipped: vec![], wind_clipped: vec![], solar_clipped: vec![],
        }
    }

    #[test]
    fn writes_member_frame_under_init_dir () {
        let root = tempdir("member_frame");
        let init = init_time();
        write_member_frame(root.to_str().unwrap(), init, Member::Control, &empty_member()).unwrap();
        let path = init_dir(root.to_str().unwrap(), init).join("clyfar000_df.json");
        assert!(path.is_file());
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn writes_daily_max_under_dailymax_subdir () {
        let root = tempdir("daily_max");
        let init = init_time();
        write_daily_max(root.to_str().unwrap(), init, Member::Perturbation(3), &empty_daily()).unwrap();
        let path = init_dir(root.to_str().unwrap(), init).join("dailymax").join("clyfar003_dailymax.json");
        assert!(path.is_file());
        fs::remove_dir_all(&root).ok();
    }

    fn tempdir (tag: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("clyfar_persist_test_{}_{tag}", std::process::id()));
        p
    }
}
