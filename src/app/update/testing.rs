use super::super::messages::Message;
use super::super::state::App;
use crate::config::AppConfig;
use anyhow::Result;
use image::RgbaImage;
use neurobridge_core::{FrameSource, LoadEvent, Variant};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct BlankSource;

impl FrameSource for BlankSource {
    fn fetch(&self, _path: &Path) -> Result<RgbaImage> {
        Ok(RgbaImage::new(40, 40))
    }
}

pub(super) fn test_app(frame_count: usize) -> App {
    let config = AppConfig {
        frame_count,
        batch_size: 4,
        window_width: 1200.0,
        window_height: 800.0,
        ..AppConfig::default()
    };
    App::new(config, Arc::new(BlankSource))
}

/// Run a full load cycle for `variant` synchronously through the reducer.
pub(super) fn load_variant(app: &mut App, variant: Variant) {
    let mut cycle = app.engine.begin_load(variant);
    let generation = cycle.generation();
    while let Some(range) = cycle.next_batch_range() {
        for index in range {
            if let Some(progress) = cycle.settle(index, Ok(RgbaImage::new(40, 40))) {
                app.reduce(Message::FrameLoad(LoadEvent::Progress {
                    generation,
                    progress,
                }));
            }
        }
    }
    app.reduce(Message::FrameLoad(LoadEvent::Complete {
        generation,
        frames: cycle.finish(),
    }));
}

/// Feed 60 Hz animation frames until the engine goes idle.
pub(super) fn run_animation(app: &mut App) {
    let start = Instant::now();
    for step in 0..2_000u32 {
        if !app.engine.needs_tick() {
            return;
        }
        let now = start + Duration::from_micros(16_667) * step;
        app.reduce(Message::AnimationFrame(now));
    }
    panic!("animation did not settle");
}
