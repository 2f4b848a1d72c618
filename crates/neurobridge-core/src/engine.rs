//! Scroll-driven playback: raw scroll progress in, drawn frames and overlay
//! opacities out.
//!
//! The engine is driven by two host calls: scroll changes arrive through the
//! `ProgressSignal` it is mounted on, and `tick` is called once per animation
//! frame while `needs_tick` reports work to do.

use crate::compositor::{Compositor, CropInsets, Surface};
use crate::frame_store::{Applied, DEFAULT_BATCH_SIZE, FrameStore, LoadCycle, LoadEvent, LoadProgress};
use crate::frames::FrameSet;
use crate::overlay::OverlaySchedule;
use crate::selector::FrameSelector;
use crate::signal::{ProgressSignal, Unsubscribe};
use crate::smoother::{SpringConfig, SpringSmoother};
use crate::variant::{AssetLayout, Variant};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub layout: AssetLayout,
    pub batch_size: usize,
    pub spring: SpringConfig,
    pub crop: CropInsets,
    pub overlays: OverlaySchedule,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            layout: AssetLayout::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            spring: SpringConfig::default(),
            crop: CropInsets::default(),
            overlays: OverlaySchedule::neurobridge(),
        }
    }
}

/// What happened during one animation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    pub smoothed: Option<f32>,
    pub frame_changed: Option<usize>,
    pub drew: bool,
}

pub struct PlaybackEngine<S> {
    store: FrameStore,
    smoother: SpringSmoother,
    selector: FrameSelector,
    compositor: Compositor<S>,
    overlays: OverlaySchedule,
    smoothed: ProgressSignal,
    raw_inbox: Rc<Cell<Option<f32>>>,
    scroll_subscription: Option<Unsubscribe>,
    mounted: bool,
}

fn sanitize_progress(raw: f32) -> Option<f32> {
    raw.is_finite().then(|| raw.clamp(0.0, 1.0))
}

impl<S: Surface> PlaybackEngine<S> {
    pub fn new(config: EngineConfig, surface: S) -> Self {
        let frame_count = config.layout.frame_count;
        Self {
            store: FrameStore::new(config.layout, config.batch_size),
            smoother: SpringSmoother::new(config.spring),
            selector: FrameSelector::new(frame_count),
            compositor: Compositor::new(surface, config.crop),
            overlays: config.overlays,
            smoothed: ProgressSignal::new(0.0),
            raw_inbox: Rc::new(Cell::new(None)),
            scroll_subscription: None,
            mounted: false,
        }
    }

    /// Start following `scroll`. Any previous subscription is released first,
    /// and drawing resumes if an earlier `unmount` stopped it.
    pub fn mount(&mut self, scroll: &ProgressSignal) {
        self.scroll_subscription = None;
        self.compositor.enable();
        let inbox = Rc::clone(&self.raw_inbox);
        self.scroll_subscription = Some(scroll.on_change(move |raw| inbox.set(Some(raw))));
        self.smoother.reset(sanitize_progress(scroll.get()).unwrap_or(0.0));
        self.smoothed.set(self.smoother.value());
        self.mounted = true;
        debug!(initial = self.smoother.value(), "Playback engine mounted");
    }

    /// Release the scroll subscription and every smoothed-progress listener.
    /// No draws happen afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.scroll_subscription = None;
        self.smoothed.clear();
        self.compositor.disable();
        self.raw_inbox.set(None);
        self.mounted = false;
        info!("Playback engine unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Begin loading `variant`, discarding the current frame set.
    pub fn begin_load(&mut self, variant: Variant) -> LoadCycle {
        self.selector.reset();
        self.compositor.reset();
        self.store.begin(variant)
    }

    pub fn apply_load_event(&mut self, event: LoadEvent) -> Applied {
        let applied = self.store.apply(event);
        if applied == Applied::Complete {
            self.present_first_frame();
        }
        applied
    }

    fn present_first_frame(&mut self) {
        if self.compositor.draw_now(0, self.store.frames()) {
            self.selector.mark_shown(0);
        } else {
            self.selector.reset();
        }
        if let Some(index) = self.selector.select(self.smoother.value()) {
            self.compositor.request(index);
        }
    }

    pub fn needs_tick(&self) -> bool {
        self.mounted
            && (self.raw_inbox.get().is_some()
                || !self.smoother.is_idle()
                || self.compositor.has_pending())
    }

    /// Advance one animation frame.
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.mounted {
            return outcome;
        }
        if let Some(raw) = self.raw_inbox.take().and_then(sanitize_progress) {
            self.smoother.update(raw);
        }
        if let Some(value) = self.smoother.tick(dt) {
            self.smoothed.set(value);
            outcome.smoothed = Some(value);
            if let Some(index) = self.selector.select(value) {
                self.compositor.request(index);
                outcome.frame_changed = Some(index);
            }
        }
        outcome.drew = self.compositor.on_animation_frame(self.store.frames());
        outcome
    }

    pub fn smoothed_signal(&self) -> &ProgressSignal {
        &self.smoothed
    }
}

impl<S> PlaybackEngine<S> {
    pub fn smoothed_progress(&self) -> f32 {
        self.smoothed.get()
    }

    pub fn overlays(&self) -> &OverlaySchedule {
        &self.overlays
    }

    pub fn overlay_opacities(&self) -> Vec<f32> {
        self.overlays.opacities(self.smoothed_progress())
    }

    pub fn load_progress(&self) -> LoadProgress {
        self.store.progress()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn load_generation(&self) -> u64 {
        self.store.generation()
    }

    pub fn frames(&self) -> Option<&FrameSet> {
        self.store.frames()
    }

    pub fn frame_count(&self) -> usize {
        self.store.frame_count()
    }

    pub fn variant(&self) -> Option<Variant> {
        self.store.variant()
    }

    pub fn current_frame(&self) -> Option<usize> {
        self.compositor.drawn()
    }

    pub fn draw_count(&self) -> u64 {
        self.compositor.draw_count()
    }

    pub fn surface(&self) -> &S {
        self.compositor.surface()
    }
}

impl<S> Drop for PlaybackEngine<S> {
    fn drop(&mut self) {
        self.scroll_subscription = None;
        self.smoothed.clear();
        self.compositor.disable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::PixelSurface;
    use image::RgbaImage;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn engine(frame_count: usize) -> PlaybackEngine<PixelSurface> {
        let config = EngineConfig {
            layout: AssetLayout {
                frame_count,
                ..AssetLayout::default()
            },
            batch_size: 8,
            ..EngineConfig::default()
        };
        PlaybackEngine::new(config, PixelSurface::new())
    }

    fn load_all(engine: &mut PlaybackEngine<PixelSurface>, variant: Variant) {
        let mut cycle = engine.begin_load(variant);
        let generation = cycle.generation();
        while let Some(range) = cycle.next_batch_range() {
            for index in range {
                if let Some(progress) = cycle.settle(index, Ok(RgbaImage::new(20, 20))) {
                    engine.apply_load_event(LoadEvent::Progress {
                        generation,
                        progress,
                    });
                }
            }
        }
        engine.apply_load_event(LoadEvent::Complete {
            generation,
            frames: cycle.finish(),
        });
    }

    fn run_until_idle(engine: &mut PlaybackEngine<PixelSurface>) -> Vec<TickOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..1_000 {
            if !engine.needs_tick() {
                break;
            }
            outcomes.push(engine.tick(FRAME));
        }
        outcomes
    }

    #[test]
    fn first_frame_is_drawn_once_frames_arrive() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(24);
        engine.mount(&scroll);
        assert_eq!(engine.current_frame(), None);

        load_all(&mut engine, Variant::Light);

        assert_eq!(engine.current_frame(), Some(0));
        assert_eq!(engine.draw_count(), 1);
        assert_eq!(engine.load_progress().percent(), 100.0);
        assert!(!engine.is_loading());
        assert!(!engine.needs_tick());
    }

    #[test]
    fn scrolling_to_the_end_lands_on_last_frame() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(24);
        engine.mount(&scroll);
        load_all(&mut engine, Variant::Light);

        scroll.set(1.0);
        let outcomes = run_until_idle(&mut engine);

        assert!(!outcomes.is_empty());
        assert_eq!(engine.current_frame(), Some(23));
        assert_eq!(engine.smoothed_progress(), 1.0);
        let draws = outcomes.iter().filter(|o| o.drew).count() as u64;
        assert_eq!(engine.draw_count(), draws + 1);
        assert!(draws <= 23);
    }

    #[test]
    fn overlays_follow_smoothed_progress() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(24);
        engine.mount(&scroll);

        scroll.set(0.6);
        engine.tick(FRAME);
        let early = engine.overlay_opacities();
        assert!(engine.smoothed_progress() < 0.5);
        assert_eq!(early[2], 0.0);

        run_until_idle(&mut engine);
        let settled = engine.overlay_opacities();
        assert_eq!(settled, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn smoothed_signal_reaches_listeners() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(24);
        engine.mount(&scroll);
        let seen = Rc::new(Cell::new(0.0f32));
        let sink = Rc::clone(&seen);
        let _guard = engine
            .smoothed_signal()
            .on_change(move |value| sink.set(value));

        scroll.set(0.3);
        run_until_idle(&mut engine);

        assert_eq!(seen.get(), 0.3);
    }

    #[test]
    fn unmount_releases_subscriptions_and_stops_drawing() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(24);
        engine.mount(&scroll);
        load_all(&mut engine, Variant::Light);
        let _listener = engine.smoothed_signal().on_change(|_| {});
        assert_eq!(scroll.listener_count(), 1);

        engine.unmount();
        scroll.set(1.0);

        assert_eq!(scroll.listener_count(), 0);
        assert_eq!(engine.smoothed_signal().listener_count(), 0);
        assert!(!engine.needs_tick());
        assert_eq!(engine.tick(FRAME), TickOutcome::default());
        assert_eq!(engine.draw_count(), 1);
    }

    #[test]
    fn remounted_engine_draws_again() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(4);
        engine.mount(&scroll);
        engine.unmount();
        engine.mount(&scroll);
        assert!(engine.is_mounted());
        assert_eq!(scroll.listener_count(), 1);

        load_all(&mut engine, Variant::Light);
        assert_eq!(engine.current_frame(), Some(0));

        scroll.set(1.0);
        run_until_idle(&mut engine);

        assert_eq!(engine.current_frame(), Some(3));
        assert!(engine.draw_count() >= 2);
    }

    #[test]
    fn dropping_engine_releases_scroll_subscription() {
        let scroll = ProgressSignal::new(0.0);
        {
            let mut engine = engine(4);
            engine.mount(&scroll);
            assert_eq!(scroll.listener_count(), 1);
        }
        assert_eq!(scroll.listener_count(), 0);
    }

    #[test]
    fn variant_switch_redraws_current_position() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(24);
        engine.mount(&scroll);
        load_all(&mut engine, Variant::Light);
        scroll.set(0.5);
        run_until_idle(&mut engine);
        assert_eq!(engine.current_frame(), Some(11));

        let cycle = engine.begin_load(Variant::Dark);
        assert_eq!(engine.load_progress().percent(), 0.0);
        assert!(engine.frames().is_none());
        drop(cycle);

        load_all(&mut engine, Variant::Dark);
        assert_eq!(engine.current_frame(), Some(0));
        assert!(engine.needs_tick());
        run_until_idle(&mut engine);
        assert_eq!(engine.current_frame(), Some(11));
        assert_eq!(engine.variant(), Some(Variant::Dark));
    }

    #[test]
    fn scrolling_before_frames_load_draws_nothing() {
        let scroll = ProgressSignal::new(0.0);
        let mut engine = engine(24);
        engine.mount(&scroll);
        scroll.set(0.8);
        let outcomes = run_until_idle(&mut engine);
        assert!(outcomes.iter().all(|o| !o.drew));
        assert_eq!(engine.draw_count(), 0);
    }
}
