//! Drives a replay script against an override router.

use std::sync::Arc;

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::router::OverrideRouter;

use super::script::ReplayScript;

/// Replay behavior settings.
#[derive(Debug, Clone, Default)]
pub struct ReplayConfig {
    /// Restart the script from the beginning when it ends.
    pub looping: bool,
}

/// Walks a [`ReplayScript`] against a router, installing each fix as the
/// override at its scheduled offset.
///
/// When the script ends (or the driver is cancelled) the override is
/// cleared, re-attaching all subscriptions to the fallback provider.
pub struct ReplayDriver {
    script: ReplayScript,
    router: Arc<OverrideRouter>,
    config: ReplayConfig,
    cancellation: CancellationToken,
}

impl ReplayDriver {
    /// Creates a driver for the given script and router.
    pub fn new(script: ReplayScript, router: Arc<OverrideRouter>, config: ReplayConfig) -> Self {
        Self {
            script,
            router,
            config,
            cancellation: CancellationToken::new(),
        }
    }

    /// Token that stops the replay when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Runs the replay to completion (or cancellation).
    ///
    /// Always clears the override on exit so consumers resume real
    /// updates even after a cancelled replay.
    pub async fn run(self) {
        info!(
            fixes = self.script.len(),
            duration_ms = self.script.duration().as_millis() as u64,
            looping = self.config.looping,
            "Starting replay"
        );

        'replay: loop {
            let start = Instant::now();
            for fix in self.script.fixes() {
                let deadline = start + fix.offset();
                tokio::select! {
                    _ = self.cancellation.cancelled() => break 'replay,
                    _ = sleep_until(deadline) => {}
                }
                debug!(
                    offset_ms = fix.offset_ms,
                    latitude = fix.position.latitude,
                    longitude = fix.position.longitude,
                    "Installing replay fix"
                );
                self.router.set_override(Some(fix.position.clone()));
            }

            // An empty script has no await point, so looping it would
            // spin without ever yielding to the cancel path.
            if !self.config.looping || self.script.is_empty() || self.cancellation.is_cancelled() {
                break;
            }
        }

        info!("Replay finished; restoring fallback provider");
        self.router.set_override(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::provider::{
        CallbackRef, DeliveryContext, IntentToken, LocationProvider, UpdateRequest,
    };
    use crate::replay::ReplayFix;
    use crate::router::RouterMode;
    use parking_lot::Mutex;

    struct NullProvider;

    impl LocationProvider for NullProvider {
        fn last_location(&self, _callback: CallbackRef) {}
        fn request_updates(
            &self,
            _request: &UpdateRequest,
            _callback: CallbackRef,
            _context: DeliveryContext,
        ) {
        }
        fn remove_updates(&self, _callback: &CallbackRef) {}
        fn request_updates_by_token(&self, _request: &UpdateRequest, _token: IntentToken) {}
        fn remove_updates_by_token(&self, _token: IntentToken) {}
    }

    fn fix(offset_ms: u64, lat: f64) -> ReplayFix {
        ReplayFix {
            offset_ms,
            position: Position::new(lat, 0.0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_run_delivers_every_fix_and_restores_fallback() {
        let router = Arc::new(OverrideRouter::new(Arc::new(NullProvider)));
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let delivered_clone = Arc::clone(&delivered);

        router.request_updates(
            &UpdateRequest::default(),
            CallbackRef::from_fn(move |update| {
                delivered_clone.lock().push(update.last().unwrap().latitude);
            }),
            DeliveryContext::default(),
        );

        let script = ReplayScript::new(vec![fix(0, 1.0), fix(0, 2.0), fix(0, 3.0)]).unwrap();
        ReplayDriver::new(script, Arc::clone(&router), ReplayConfig::default())
            .run()
            .await;

        assert_eq!(*delivered.lock(), vec![1.0, 2.0, 3.0]);
        assert_eq!(router.mode(), RouterMode::FallbackActive);
    }

    #[tokio::test]
    async fn test_cancelled_driver_exits_and_clears_override() {
        let router = Arc::new(OverrideRouter::new(Arc::new(NullProvider)));
        // A long-dated fix that would otherwise stall the test.
        let script = ReplayScript::new(vec![fix(60_000, 1.0)]).unwrap();

        let driver = ReplayDriver::new(script, Arc::clone(&router), ReplayConfig::default());
        driver.cancellation_token().cancel();
        driver.run().await;

        assert_eq!(router.mode(), RouterMode::FallbackActive);
    }

    #[tokio::test]
    async fn test_empty_looping_script_terminates() {
        let router = Arc::new(OverrideRouter::new(Arc::new(NullProvider)));
        let script = ReplayScript::new(vec![]).unwrap();
        let driver = ReplayDriver::new(
            script,
            Arc::clone(&router),
            ReplayConfig { looping: true },
        );

        tokio::time::timeout(std::time::Duration::from_secs(1), driver.run())
            .await
            .expect("empty looping replay should finish immediately");
        assert_eq!(router.mode(), RouterMode::FallbackActive);
    }

    #[tokio::test]
    async fn test_empty_script_is_a_clean_noop() {
        let router = Arc::new(OverrideRouter::new(Arc::new(NullProvider)));
        let script = ReplayScript::new(vec![]).unwrap();

        ReplayDriver::new(script, Arc::clone(&router), ReplayConfig::default())
            .run()
            .await;

        assert_eq!(router.mode(), RouterMode::FallbackActive);
    }
}
