//! Async driver for a `LoadCycle`.
//!
//! Each batch is fetched concurrently on tokio's blocking pool; the next batch
//! is only issued after every member of the current one has settled.

use crate::frame_store::{LoadCycle, LoadEvent};
use anyhow::{Context, Result, anyhow, bail};
use image::RgbaImage;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Anything that can turn a frame path into decoded pixels.
pub trait FrameSource: Send + Sync + 'static {
    fn fetch(&self, path: &Path) -> Result<RgbaImage>;
}

/// Reads and decodes frames from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFrameSource;

impl FrameSource for FsFrameSource {
    fn fetch(&self, path: &Path) -> Result<RgbaImage> {
        let image = image::open(path)
            .with_context(|| format!("Failed to decode frame {}", path.display()))?;
        Ok(image.into_rgba8())
    }
}

/// Run `cycle` to completion, reporting every settlement through `on_event`.
///
/// Returns an error when the cycle is cancelled between batches or the
/// runtime drops a batch before it settles. Individual frame failures are not
/// errors.
pub async fn load_frames<S, F>(mut cycle: LoadCycle, source: Arc<S>, mut on_event: F) -> Result<()>
where
    S: FrameSource + ?Sized,
    F: FnMut(LoadEvent),
{
    let generation = cycle.generation();
    let token = cycle.token();
    let started = Instant::now();

    while let Some(batch) = cycle.next_batch() {
        token.check_cancelled(generation, "before batch")?;
        let expected = batch.len();
        let (tx, mut rx) = mpsc::unbounded_channel();
        for request in batch {
            let source = Arc::clone(&source);
            let tx = tx.clone();
            tokio::task::spawn_blocking(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| source.fetch(&request.path)))
                    .unwrap_or_else(|_| Err(anyhow!("frame decoder panicked")));
                let _ = tx.send((request.index, outcome));
            });
        }
        drop(tx);

        let mut received = 0usize;
        while let Some((index, outcome)) = rx.recv().await {
            received += 1;
            if let Some(progress) = cycle.settle(index, outcome) {
                on_event(LoadEvent::Progress {
                    generation,
                    progress,
                });
            }
        }
        if received < expected {
            bail!(
                "frame load generation={generation} lost {} of {expected} results",
                expected - received
            );
        }
        debug!(
            generation,
            settled = cycle.progress().settled,
            total = cycle.total(),
            "Frame batch settled"
        );
    }

    if token.is_cancelled() {
        debug!(generation, "Frame load finished after cancellation");
    }
    let frames = cycle.finish();
    info!(
        generation,
        loaded = frames.loaded_count(),
        total = frames.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "All frame loads settled"
    );
    on_event(LoadEvent::Complete { generation, frames });
    Ok(())
}
