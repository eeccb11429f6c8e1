//! Browser timer for the refresh loop.

use std::time::Duration;

use session::Sleeper;

/// [`Sleeper`] backed by `setTimeout` via `gloo-timers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSleeper;

#[async_trait::async_trait(?Send)]
impl Sleeper for BrowserSleeper {
    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "csr")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "csr"))]
        {
            // Never resolves natively; the loop only ends through its handle.
            let _ = duration;
            std::future::pending::<()>().await;
        }
    }
}
