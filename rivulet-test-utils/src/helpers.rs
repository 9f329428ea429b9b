// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Polls `condition` until it holds, panicking after `timeout_ms`.
///
/// For tests whose events arrive from spawned tasks or threads.
pub async fn wait_until<F>(mut condition: F, timeout_ms: u64)
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    while !condition() {
        assert!(
            Instant::now() < deadline,
            "condition not reached within {timeout_ms}ms"
        );
        sleep(Duration::from_millis(1)).await;
    }
}

/// Sleeps long enough for in-flight deliveries to land, then runs `check`.
///
/// Use to assert that nothing further arrives.
pub async fn assert_quiet_for<F>(timeout_ms: u64, check: F)
where
    F: FnOnce(),
{
    sleep(Duration::from_millis(timeout_ms)).await;
    check();
}
