use super::super::state::App;
use super::Effect;
use iced::widget::scrollable::RelativeOffset;
use neurobridge_core::{Applied, LoadEvent};
use tracing::{debug, trace, warn};

impl App {
    pub(super) fn handle_frame_load(&mut self, event: LoadEvent, effects: &mut Vec<Effect>) {
        match self.engine.apply_load_event(event) {
            Applied::Progress(progress) => {
                trace!(
                    settled = progress.settled,
                    total = progress.total,
                    "Frame load progress"
                );
            }
            Applied::Complete => {
                let loaded = self
                    .engine
                    .frames()
                    .map(|frames| frames.loaded_count())
                    .unwrap_or_default();
                debug!(
                    variant = ?self.engine.variant(),
                    loaded,
                    total = self.engine.frame_count(),
                    "Presenting first frame"
                );
                self.present_frame();
                // The scroll track was rebuilt while loading; put it back where
                // playback is.
                effects.push(Effect::SnapScroll(RelativeOffset {
                    x: 0.0,
                    y: self.scroll.get(),
                }));
            }
            Applied::Stale => debug!("Dropped frame load event from a superseded cycle"),
        }
    }

    pub(super) fn handle_frame_load_finished(&mut self, generation: u64, error: Option<String>) {
        if generation != self.engine.load_generation() {
            debug!(generation, "Superseded frame load finished");
            return;
        }
        match error {
            Some(err) if self.engine.is_loading() => {
                warn!(generation, "Frame load failed: {err}");
                self.load_error = Some(err);
            }
            Some(err) => debug!(generation, "Frame load ended after completion: {err}"),
            None => trace!(generation, "Frame load driver finished"),
        }
    }

    pub(in crate::app) fn loading_percent(&self) -> f32 {
        self.engine.load_progress().percent()
    }
}
