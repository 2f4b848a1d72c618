use anyhow::{Result, anyhow};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag telling a frame load cycle that its results are no longer wanted.
///
/// Cancelling never aborts decodes that are already running; it only stops the
/// loader from issuing the next batch.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn check_cancelled(&self, generation: u64, stage: &'static str) -> Result<()> {
        if self.is_cancelled() {
            return Err(anyhow!(
                "frame load generation={generation} cancelled at stage={stage}"
            ));
        }
        Ok(())
    }
}
