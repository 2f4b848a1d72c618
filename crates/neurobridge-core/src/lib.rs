//! Scroll-driven image-sequence playback.
//!
//! Frames for a visual variant are preloaded in bounded batches
//! (`frame_store`, `loader`), raw scroll progress is smoothed by a spring
//! (`smoother`), mapped to a frame index (`selector`), and drawn cropped onto a
//! surface (`compositor`). The same smoothed progress drives the text overlay
//! fades (`overlay`). `engine` ties the pieces together for a host UI.

pub mod cancellation;
pub mod compositor;
pub mod engine;
pub mod frame_store;
pub mod frames;
pub mod loader;
pub mod overlay;
pub mod selector;
pub mod signal;
pub mod smoother;
pub mod variant;

pub use cancellation::CancellationToken;
pub use compositor::{Compositor, CropInsets, CropRect, PixelSurface, Surface};
pub use engine::{EngineConfig, PlaybackEngine, TickOutcome};
pub use frame_store::{
    Applied, DEFAULT_BATCH_SIZE, FrameRequest, FrameStore, LoadCycle, LoadEvent, LoadProgress,
};
pub use frames::{Frame, FrameSet};
pub use loader::{FrameSource, FsFrameSource, load_frames};
pub use overlay::{FADE_SPAN, Overlay, OverlayPosition, OverlaySchedule, OverlayWindow};
pub use selector::{FrameSelector, frame_index};
pub use signal::{ProgressSignal, Unsubscribe};
pub use smoother::{SpringConfig, SpringSmoother};
pub use variant::{AssetLayout, Variant};
