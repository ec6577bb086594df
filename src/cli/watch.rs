#![forbid(unsafe_code)]

//! Timer-driven refresh loop for `check --watch`
//!
//! The loop renders once immediately, then once per interval tick, until the
//! cancellation future resolves. Render passes are synchronous, so a
//! cancellation is only observed between complete passes.

use std::future::Future;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// How a watch loop ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Interrupted by the user after `passes` renders
    Cancelled { passes: u64 },
}

/// Runs `pass` now and on every tick of `period` until `cancel` resolves
///
/// The first failing pass ends the loop and its error is returned; there is
/// no retry.
pub async fn watch<C, F, E>(period: Duration, cancel: C, mut pass: F) -> Result<WatchOutcome, E>
where
    C: Future<Output = ()>,
    F: FnMut() -> Result<(), E>,
{
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(cancel);

    // The first tick completes immediately
    ticker.tick().await;
    pass()?;
    let mut passes: u64 = 1;

    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => {
                debug!(passes, "watch cancelled");
                return Ok(WatchOutcome::Cancelled { passes });
            }
            _ = ticker.tick() => {
                pass()?;
                passes += 1;
                debug!(passes, "watch refreshed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const MINUTE: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_renders_immediately_and_on_each_tick() {
        let passes = Cell::new(0u32);
        let cancel = tokio::time::sleep(25 * MINUTE);

        let outcome = watch(10 * MINUTE, cancel, || {
            passes.set(passes.get() + 1);
            Ok::<(), String>(())
        })
        .await
        .unwrap();

        // t=0, t=10, t=20, cancelled at t=25
        assert_eq!(passes.get(), 3);
        assert_eq!(outcome, WatchOutcome::Cancelled { passes: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_tick_still_renders_once() {
        let outcome = watch(10 * MINUTE, std::future::ready(()), || Ok::<(), String>(()))
            .await
            .unwrap();

        assert_eq!(outcome, WatchOutcome::Cancelled { passes: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_pass_ends_loop() {
        let passes = Cell::new(0u32);
        let cancel = std::future::pending::<()>();

        let result = watch(MINUTE, cancel, || {
            passes.set(passes.get() + 1);
            if passes.get() == 2 {
                Err("disk on fire".to_string())
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(result, Err("disk on fire".to_string()));
        assert_eq!(passes.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_pass_failure() {
        let result = watch(MINUTE, std::future::pending::<()>(), || {
            Err::<(), _>("unreadable")
        })
        .await;

        assert_eq!(result, Err("unreadable"));
    }
}
