/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Helper utilities shared by the run selector and the evaluator

use futures::future::join_all;
use tokio::sync::Semaphore;

/// Execute futures with at most `max_concurrent` of them in flight.
///
/// Results come back in input order.
pub async fn semaphore_gather<T, F>(futures: Vec<F>, max_concurrent: usize) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send,
    T: Send,
{
    let semaphore = Semaphore::new(max_concurrent.max(1));

    let tasks: Vec<_> = futures
        .into_iter()
        .map(|future| {
            let semaphore = &semaphore;
            async move {
                // The semaphore is never closed, so acquiring cannot fail
                let _permit = semaphore.acquire().await.ok();
                future.await
            }
        })
        .collect();

    join_all(tasks).await
}

/// Round half away from zero to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_semaphore_gather_keeps_order() {
        let futures: Vec<_> = (0..5u64)
            .map(|i| async move {
                tokio::time::sleep(Duration::from_millis(5 * (5 - i))).await;
                i
            })
            .collect();

        assert_eq!(semaphore_gather(futures, 3).await, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_semaphore_gather_limits_concurrency() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let futures: Vec<_> = (0..6)
            .map(|_| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .collect();

        semaphore_gather(futures, 2).await;
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_semaphore_gather_empty() {
        let futures: Vec<std::future::Ready<u8>> = Vec::new();
        assert!(tokio_test::block_on(semaphore_gather(futures, 0)).is_empty());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.666666, 4), 0.6667);
        assert_eq!(round_to(0.5, 0), 1.0);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}
