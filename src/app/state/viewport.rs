use iced::widget::image::Handle;

/// Window and scroll-region geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(in crate::app) struct ViewportState {
    pub(in crate::app) width: f32,
    pub(in crate::app) height: f32,
    pub(in crate::app) scroll_height_multiple: f32,
}

impl ViewportState {
    pub(in crate::app) fn new(width: f32, height: f32, scroll_height_multiple: f32) -> Self {
        Self {
            width: finite_or_zero(width),
            height: finite_or_zero(height),
            scroll_height_multiple,
        }
    }

    pub(in crate::app) fn resize(&mut self, width: f32, height: f32) {
        self.width = finite_or_zero(width);
        self.height = finite_or_zero(height);
    }

    /// Height of the scrollable track that maps onto the whole sequence.
    pub(in crate::app) fn scroll_content_height(&self) -> f32 {
        self.height * self.scroll_height_multiple
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Last surface contents handed to the renderer.
#[derive(Debug, Clone, Default)]
pub(in crate::app) struct FramePresentation {
    pub(in crate::app) handle: Option<Handle>,
    pub(in crate::app) presented_draws: u64,
}
