use iced::widget::scrollable::RelativeOffset;
use neurobridge_core::LoadEvent;
use std::time::Instant;

/// Messages emitted by the UI and the frame loader.
#[derive(Debug, Clone)]
pub enum Message {
    ToggleTheme,
    Scrolled {
        offset: RelativeOffset,
        viewport_height: f32,
        content_height: f32,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    AnimationFrame(Instant),
    FrameLoad(LoadEvent),
    FrameLoadFinished {
        generation: u64,
        error: Option<String>,
    },
    OverlayAction(String),
}
