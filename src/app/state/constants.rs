use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Assumed duration of the first animation frame after the ticker restarts.
pub(crate) const FIRST_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
pub(crate) const OVERLAY_TITLE_SIZE_PX: f32 = 56.0;
pub(crate) const OVERLAY_BODY_SIZE_PX: f32 = 20.0;
pub(crate) const OVERLAY_ACTION_SIZE_PX: f32 = 16.0;
pub(crate) const OVERLAY_MAX_WIDTH_PX: f32 = 560.0;
pub(crate) const OVERLAY_SIDE_PADDING_PX: u16 = 72;
pub(crate) const LOADING_BAR_WIDTH_PX: f32 = 240.0;
pub(crate) const LOADING_BAR_HEIGHT_PX: f32 = 6.0;
pub(crate) static PLAYBACK_SCROLL_ID: Lazy<ScrollId> =
    Lazy::new(|| ScrollId::new("playback-scroll"));
