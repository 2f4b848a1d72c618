mod constants;
mod viewport;

use crate::config::AppConfig;
use iced::Task;
use iced::widget::image::Handle;
use neurobridge_core::{FrameSource, FsFrameSource, PixelSurface, PlaybackEngine, ProgressSignal};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::messages::Message;
use super::update::Effect;

pub(crate) use constants::*;
pub(in crate::app) use viewport::{FramePresentation, ViewportState};

/// Core application state.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) engine: PlaybackEngine<PixelSurface>,
    pub(super) scroll: ProgressSignal,
    pub(super) source: Arc<dyn FrameSource>,
    pub(super) viewport: ViewportState,
    pub(super) frame: FramePresentation,
    pub(super) last_frame_at: Option<Instant>,
    pub(super) load_error: Option<String>,
}

impl App {
    pub(super) fn new(config: AppConfig, source: Arc<dyn FrameSource>) -> Self {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = PlaybackEngine::new(config.engine_config(), PixelSurface::new());
        engine.mount(&scroll);
        let viewport = ViewportState::new(
            config.window_width,
            config.window_height,
            config.scroll_height_multiple(),
        );
        debug!(
            overlays = engine.overlays().len(),
            frames = engine.frame_count(),
            "Playback engine ready"
        );

        App {
            config,
            engine,
            scroll,
            source,
            viewport,
            frame: FramePresentation::default(),
            last_frame_at: None,
            load_error: None,
        }
    }

    pub fn bootstrap(config: AppConfig) -> (App, Task<Message>) {
        let mut app = App::new(config, Arc::new(FsFrameSource));
        info!(variant = %app.config.theme.variant(), "Loading initial frame variant");
        let tasks: Vec<Task<Message>> = app
            .startup_effects()
            .into_iter()
            .map(|effect| app.run_effect(effect))
            .collect();
        (app, Task::batch(tasks))
    }

    /// Work issued once the window opens: the first frame load, plus a size
    /// query because the window manager may not honor the configured size.
    pub(super) fn startup_effects(&self) -> Vec<Effect> {
        vec![
            Effect::StartFrameLoad(self.config.theme.variant()),
            Effect::QueryWindowSize,
        ]
    }

    /// Hand the latest surface contents to the renderer if a draw happened
    /// since the last call.
    pub(super) fn present_frame(&mut self) {
        let draws = self.engine.draw_count();
        if draws == self.frame.presented_draws {
            return;
        }
        let pixels = self.engine.surface().pixels();
        let (width, height) = pixels.dimensions();
        self.frame.handle = Some(Handle::from_rgba(width, height, pixels.as_raw().clone()));
        self.frame.presented_draws = draws;
    }
}
