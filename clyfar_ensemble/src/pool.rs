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

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime,Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info,error};

use clyfar_nwp::{GridProvider,ElevationProvider,MaskCache,ReductionConfig,Member};
use clyfar_fis::Fis;
use clyfar_member::MemberFrame;

use crate::config::EnsembleConfig;
use crate::errors::{ClyfarEnsembleError,Result};

/// component P: fan `clyfar_member::run_member` out across the member set under a
/// bounded worker pool, gated by a `tokio::sync::Semaphore` (§4.4, §5). One spawned task
/// per member rather than per (member, variable) job, which keeps the member pipeline's
/// internal ordering guarantee (percentiles computed only once all four inputs are
/// ready) intact without extra coordination.
pub async fn run_ensemble<P, Elv> (
    provider: Arc<P>,
    masks: Arc<MaskCache<Elv>>,
    fis: Arc<Fis>,
    init: DateTime<Utc>,
    members: &[Member],
    start_h: u32,
    max_h: u32,
    delta_h: u32,
    cfg: &EnsembleConfig,
    nwp_cfg: &ReductionConfig,
) -> Result<Vec<MemberFrame>>
    where P: GridProvider + 'static, Elv: ElevationProvider + 'static
{
    let semaphore = Arc::new(Semaphore::new(cfg.concurrency.max(1)));
    let mut set = JoinSet::new();

    for &member in members {
        let provider = provider.clone();
        let masks = masks.clone();
        let fis = fis.clone();
        let semaphore = semaphore.clone();
        let percentiles = cfg.percentiles.clone();
        let nwp_cfg = nwp_cfg.clone();

        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore is never closed");
            clyfar_member::run_member(provider.as_ref(), masks.as_ref(), fis.as_ref(), init, member, start_h, max_h, delta_h, &percentiles, &nwp_cfg)
                .await
                .map(|frame| (member, frame))
        });
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(cfg.global_timeout_secs);
    let mut frames = Vec::new();

    loop {
        match tokio::time::timeout_at(deadline, set.join_next()).await {
            Ok(Some(Ok(Ok((member, frame))))) => {
                info!("member {member} complete");
                frames.push(frame);
            }
            Ok(Some(Ok(Err(e)))) => {
                error!("member pipeline failed, discarding member: {e}");
            }
            Ok(Some(Err(join_err))) => {
                error!("member task panicked, discarding member: {join_err}");
            }
            Ok(None) => break, // all members accounted for
            Err(_elapsed) => {
                error!("global timeout reached with members still in flight; discarding the rest");
                break;
            }
        }
    }
    set.abort_all();

    if frames.is_empty() {
        return Err(ClyfarEnsembleError::NoValidMembers);
    }
    info!("ensemble complete: {}/{} members", frames.len(), members.len());
    Ok(frames)
}
