use super::super::state::{App, FIRST_FRAME_INTERVAL};
use iced::widget::scrollable::RelativeOffset;
use std::time::Instant;
use tracing::{debug, trace};

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        offset: RelativeOffset,
        viewport_height: f32,
        content_height: f32,
    ) {
        let progress = Self::sanitize_offset(offset);
        trace!(
            progress,
            viewport_height,
            content_height,
            "Scroll progress changed"
        );
        self.scroll.set(progress);
    }

    pub(super) fn handle_window_resized(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            scroll_height = self.viewport.scroll_content_height(),
            "Window resized"
        );
    }

    pub(super) fn handle_animation_frame(&mut self, now: Instant) {
        let elapsed = self
            .last_frame_at
            .map(|previous| now.saturating_duration_since(previous))
            .unwrap_or(FIRST_FRAME_INTERVAL);
        self.last_frame_at = Some(now);

        let outcome = self.engine.tick(elapsed);
        if let Some(index) = outcome.frame_changed {
            trace!(index, "Frame index changed");
        }
        if outcome.drew {
            self.present_frame();
        }
        if !self.engine.needs_tick() {
            self.last_frame_at = None;
        }
    }

    /// Vertical scroll ratio clamped to `[0, 1]`; content that fits the
    /// viewport reports NaN, which maps to the start.
    pub(super) fn sanitize_offset(offset: RelativeOffset) -> f32 {
        if offset.y.is_finite() {
            offset.y.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Effect;
    use super::super::testing::{load_variant, run_animation, test_app};
    use super::*;
    use crate::app::messages::Message;
    use neurobridge_core::Variant;

    fn offset(y: f32) -> RelativeOffset {
        RelativeOffset { x: 0.0, y }
    }

    #[test]
    fn sanitize_offset_clamps_and_rejects_nan() {
        assert_eq!(App::sanitize_offset(offset(0.4)), 0.4);
        assert_eq!(App::sanitize_offset(offset(-0.1)), 0.0);
        assert_eq!(App::sanitize_offset(offset(1.7)), 1.0);
        assert_eq!(App::sanitize_offset(offset(f32::NAN)), 0.0);
    }

    #[test]
    fn startup_queries_the_actual_window_size() {
        let mut app = test_app(30);
        assert_eq!(
            app.startup_effects(),
            vec![
                Effect::StartFrameLoad(Variant::Light),
                Effect::QueryWindowSize,
            ]
        );
        assert_eq!(app.viewport.height, 800.0);

        app.reduce(Message::WindowResized {
            width: 1024.0,
            height: 600.0,
        });

        assert_eq!(app.viewport.width, 1024.0);
        assert_eq!(app.viewport.height, 600.0);
        assert_eq!(
            app.viewport.scroll_content_height(),
            600.0 * app.viewport.scroll_height_multiple
        );
    }

    #[test]
    fn scrolling_requests_animation_until_settled() {
        let mut app = test_app(30);
        load_variant(&mut app, Variant::Light);
        assert!(!app.engine.needs_tick());

        app.handle_scrolled(offset(1.0), 800.0, 3200.0);
        assert!(app.engine.needs_tick());

        run_animation(&mut app);

        assert!(!app.engine.needs_tick());
        assert_eq!(app.engine.current_frame(), Some(29));
        assert_eq!(app.engine.smoothed_progress(), 1.0);
        assert!(app.last_frame_at.is_none());
    }

    #[test]
    fn animation_frames_refresh_the_presented_image() {
        let mut app = test_app(30);
        load_variant(&mut app, Variant::Light);
        let presented = app.frame.presented_draws;

        app.handle_scrolled(offset(0.5), 800.0, 3200.0);
        run_animation(&mut app);

        assert!(app.frame.presented_draws > presented);
        assert_eq!(app.frame.presented_draws, app.engine.draw_count());
        assert!(app.frame.handle.is_some());
    }

    #[test]
    fn resize_updates_scroll_track_height() {
        let mut app = test_app(30);
        app.handle_window_resized(1000.0, 500.0);
        assert_eq!(app.viewport.scroll_content_height(), 2000.0);
        app.handle_window_resized(f32::NAN, 500.0);
        assert_eq!(app.viewport.width, 0.0);
    }
}
