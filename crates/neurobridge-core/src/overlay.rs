//! Text overlays that fade in and out over fixed windows of scroll progress.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Length of each fade ramp as a fraction of the full scroll range.
pub const FADE_SPAN: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayPosition {
    #[default]
    Center,
    Left,
    Right,
}

/// Range of progress over which an overlay is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayWindow {
    show_start: f32,
    show_end: f32,
    position: OverlayPosition,
}

impl OverlayWindow {
    pub fn new(show_start: f32, show_end: f32, position: OverlayPosition) -> Result<Self> {
        if !show_start.is_finite() || !show_end.is_finite() {
            bail!("overlay window bounds must be finite ({show_start}, {show_end})");
        }
        if show_start < 0.0 || show_end > 1.0 || show_start >= show_end {
            bail!(
                "overlay window must satisfy 0 <= start < end <= 1, got ({show_start}, {show_end})"
            );
        }
        Ok(Self {
            show_start,
            show_end,
            position,
        })
    }

    pub fn show_start(&self) -> f32 {
        self.show_start
    }

    pub fn show_end(&self) -> f32 {
        self.show_end
    }

    pub fn position(&self) -> OverlayPosition {
        self.position
    }

    /// Fade length; windows narrower than two fades shrink the ramps so the
    /// plateau collapses to a single point instead of inverting.
    fn fade_span(&self) -> f32 {
        FADE_SPAN.min((self.show_end - self.show_start) / 2.0)
    }

    pub fn opacity(&self, progress: f32) -> f32 {
        let fade_in = self.show_start;
        let fade_out = self.show_end;
        if !(progress >= fade_in && progress <= fade_out) {
            return 0.0;
        }
        let fade = self.fade_span();
        let peak_start = fade_in + fade;
        let peak_end = fade_out - fade;

        let opacity = if progress < peak_start {
            (progress - fade_in) / (peak_start - fade_in)
        } else if progress > peak_end {
            1.0 - (progress - peak_end) / (fade_out - peak_end)
        } else {
            1.0
        };
        opacity.clamp(0.0, 1.0)
    }
}

/// Text block shown inside a window.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub window: OverlayWindow,
    pub title: String,
    pub body: String,
    pub action: Option<String>,
}

impl Overlay {
    pub fn new(window: OverlayWindow, title: &str, body: &str) -> Self {
        Self {
            window,
            title: title.to_string(),
            body: body.to_string(),
            action: None,
        }
    }

    pub fn with_action(mut self, label: &str) -> Self {
        self.action = Some(label.to_string());
        self
    }
}

/// Independent overlays keyed by scroll progress; windows may overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySchedule {
    overlays: Vec<Overlay>,
}

impl OverlaySchedule {
    pub fn new(overlays: Vec<Overlay>) -> Self {
        Self { overlays }
    }

    /// The four product story beats shown over the frame sequence.
    pub fn neurobridge() -> Self {
        let window = |start, end, position| OverlayWindow {
            show_start: start,
            show_end: end,
            position,
        };
        Self::new(vec![
            Overlay::new(
                window(0.0, 0.2, OverlayPosition::Center),
                "NeuroBridge.",
                "Intent-Based Communication",
            ),
            Overlay::new(
                window(0.25, 0.45, OverlayPosition::Left),
                "See the World.",
                "Advanced vision sensors capture your environment in real-time, \
                 providing context for natural communication.",
            ),
            Overlay::new(
                window(0.5, 0.7, OverlayPosition::Right),
                "Think in Intent.",
                "Neural processing transforms your intentions into meaningful \
                 expressions, powered by cutting-edge AI.",
            ),
            Overlay::new(
                window(0.8, 1.0, OverlayPosition::Center),
                "Speak Naturally.",
                "Experience communication without barriers. \
                 NeuroBridge gives voice to your thoughts.",
            )
            .with_action("Learn More"),
        ])
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn opacities(&self, progress: f32) -> Vec<f32> {
        self.overlays
            .iter()
            .map(|overlay| overlay.window.opacity(progress))
            .collect()
    }

    /// Overlays with non-zero opacity at `progress`.
    pub fn visible(&self, progress: f32) -> impl Iterator<Item = (&Overlay, f32)> + '_ {
        self.overlays
            .iter()
            .map(move |overlay| (overlay, overlay.window.opacity(progress)))
            .filter(|(_, opacity)| *opacity > 0.0)
    }
}
