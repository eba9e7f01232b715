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

use std::future::Future;
use std::time::Duration;
use rand::Rng;
use tracing::warn;

/// bounded retries with exponential backoff (1s * 2^k) plus uniform[0,1)s jitter, applied
/// to a single grid fetch (§4.3, §5), generalized over any fallible async operation
/// rather than a fixed download-a-file signature.
pub async fn with_retry<T, E, F, Fut> (max_attempts: u8, mut op: F) -> Result<T, E>
    where F: FnMut() -> Fut, Fut: Future<Output = Result<T, E>>, E: std::fmt::Display
{
    let mut attempt = 0u8;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                if attempt >= max_attempts {
                    return Err(e);
                }
                let backoff = Duration::from_secs(1u64 << attempt);
                let jitter = Duration::from_secs_f64(rand::rng().random::<f64>());
                warn!("attempt {}/{} failed: {e}, retrying in {:?}", attempt + 1, max_attempts, backoff + jitter);
                tokio::time::sleep(backoff + jitter).await;
                attempt += 1;
            }
        }
    }
}
