//! Load-cycle bookkeeping for frame sequences.
//!
//! `LoadCycle` is pure state: it hands out batches in order, records each
//! settlement and reports progress. The async driver in `loader` performs the
//! actual fetches. `FrameStore` owns the current generation so results from a
//! superseded cycle can be recognised and dropped.

use crate::cancellation::CancellationToken;
use crate::frames::{Frame, FrameSet};
use crate::variant::{AssetLayout, Variant};
use anyhow::Result;
use image::RgbaImage;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, trace};

pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Settled-out-of-total counter for one load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub settled: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn start(total: usize) -> Self {
        Self { settled: 0, total }
    }

    /// Progress in `[0, 100]`.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.settled.min(self.total) as f32 / self.total as f32) * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.settled >= self.total
    }
}

/// One frame to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRequest {
    pub index: usize,
    pub path: PathBuf,
}

/// Messages produced by a running load cycle.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    Progress {
        generation: u64,
        progress: LoadProgress,
    },
    Complete {
        generation: u64,
        frames: FrameSet,
    },
}

impl LoadEvent {
    pub fn generation(&self) -> u64 {
        match self {
            LoadEvent::Progress { generation, .. } | LoadEvent::Complete { generation, .. } => {
                *generation
            }
        }
    }
}

/// State of a single variant load.
pub struct LoadCycle {
    generation: u64,
    variant: Variant,
    batch_size: usize,
    paths: Vec<PathBuf>,
    slots: Vec<Option<Frame>>,
    settled: Vec<bool>,
    settled_count: usize,
    issued: usize,
    token: CancellationToken,
}

impl LoadCycle {
    fn new(
        generation: u64,
        variant: Variant,
        layout: &AssetLayout,
        batch_size: usize,
        token: CancellationToken,
    ) -> Self {
        let total = layout.frame_count;
        Self {
            generation,
            variant,
            batch_size: batch_size.max(1),
            paths: (0..total)
                .map(|index| layout.frame_path(variant, index))
                .collect(),
            slots: vec![None; total],
            settled: vec![false; total],
            settled_count: 0,
            issued: 0,
            token,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn total(&self) -> usize {
        self.paths.len()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            settled: self.settled_count,
            total: self.total(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.settled_count >= self.total()
    }

    /// Indices of the next batch, or `None` while the previous batch still has
    /// unsettled members or when every frame has been issued.
    pub fn next_batch_range(&mut self) -> Option<Range<usize>> {
        if self.settled_count < self.issued || self.issued >= self.total() {
            return None;
        }
        let start = self.issued;
        let end = (start + self.batch_size).min(self.total());
        self.issued = end;
        trace!(
            generation = self.generation,
            start,
            end,
            "Issuing frame batch"
        );
        Some(start..end)
    }

    pub fn next_batch(&mut self) -> Option<Vec<FrameRequest>> {
        let range = self.next_batch_range()?;
        Some(
            range
                .map(|index| FrameRequest {
                    index,
                    path: self.paths[index].clone(),
                })
                .collect(),
        )
    }

    /// Record the outcome of one fetch. Failures leave the slot empty but still
    /// count towards progress. Returns `None` for indices that were never issued
    /// or have already settled.
    pub fn settle(&mut self, index: usize, outcome: Result<RgbaImage>) -> Option<LoadProgress> {
        if index >= self.issued || self.settled[index] {
            trace!(index, generation = self.generation, "Ignoring duplicate settlement");
            return None;
        }
        match outcome {
            Ok(image) => self.slots[index] = Some(Arc::new(image)),
            Err(err) => debug!(
                index,
                path = %self.paths[index].display(),
                "Frame failed to load: {err:#}"
            ),
        }
        self.settled[index] = true;
        self.settled_count += 1;
        Some(self.progress())
    }

    pub fn finish(self) -> FrameSet {
        FrameSet::new(self.variant, self.slots)
    }
}

/// Result of feeding a `LoadEvent` back into the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Progress(LoadProgress),
    Complete,
    Stale,
}

/// Owner of the active frame set and its load lifecycle.
pub struct FrameStore {
    layout: AssetLayout,
    batch_size: usize,
    generation: u64,
    variant: Option<Variant>,
    progress: LoadProgress,
    frames: Option<FrameSet>,
    token: Option<CancellationToken>,
}

impl FrameStore {
    pub fn new(layout: AssetLayout, batch_size: usize) -> Self {
        let progress = LoadProgress::start(layout.frame_count);
        Self {
            layout,
            batch_size: batch_size.max(1),
            generation: 0,
            variant: None,
            progress,
            frames: None,
            token: None,
        }
    }

    pub fn layout(&self) -> &AssetLayout {
        &self.layout
    }

    pub fn frame_count(&self) -> usize {
        self.layout.frame_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    pub fn frames(&self) -> Option<&FrameSet> {
        self.frames.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.token.is_some()
    }

    /// Start a fresh cycle for `variant`, superseding any cycle still in flight.
    pub fn begin(&mut self, variant: Variant) -> LoadCycle {
        if let Some(previous) = self.token.take() {
            previous.cancel();
        }
        self.generation += 1;
        self.variant = Some(variant);
        self.frames = None;
        self.progress = LoadProgress::start(self.layout.frame_count);
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        info!(
            generation = self.generation,
            %variant,
            frames = self.layout.frame_count,
            batch_size = self.batch_size,
            dir = %self.layout.variant_dir(variant).display(),
            "Starting frame load"
        );
        LoadCycle::new(
            self.generation,
            variant,
            &self.layout,
            self.batch_size,
            token,
        )
    }

    pub fn apply(&mut self, event: LoadEvent) -> Applied {
        if event.generation() != self.generation || self.token.is_none() {
            debug!(
                event_generation = event.generation(),
                current = self.generation,
                "Discarding stale frame load event"
            );
            return Applied::Stale;
        }
        match event {
            LoadEvent::Progress { progress, .. } => {
                if progress.settled > self.progress.settled {
                    self.progress = progress;
                }
                Applied::Progress(self.progress)
            }
            LoadEvent::Complete { frames, .. } => {
                info!(
                    generation = self.generation,
                    variant = %frames.variant(),
                    loaded = frames.loaded_count(),
                    total = frames.len(),
                    "Frame load complete"
                );
                self.progress = LoadProgress {
                    settled: frames.len(),
                    total: frames.len(),
                };
                self.frames = Some(frames);
                self.token = None;
                Applied::Complete
            }
        }
    }
}
