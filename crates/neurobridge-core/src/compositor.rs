//! Crops frames and draws them onto a drawing surface.
//!
//! Index changes are recorded as a single pending request and only drawn on
//! the next animation frame, so bursts of changes cost one draw.

use crate::frames::FrameSet;
use image::{RgbaImage, imageops};
use tracing::trace;

/// Fractions of the source trimmed before drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropInsets {
    pub top: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for CropInsets {
    fn default() -> Self {
        CropInsets {
            top: 0.20,
            bottom: 0.20,
            right: 0.03,
        }
    }
}

impl CropInsets {
    pub fn sanitized(self) -> Self {
        let clamp = |v: f32| {
            if v.is_finite() {
                v.clamp(0.0, 0.9)
            } else {
                0.0
            }
        };
        CropInsets {
            top: clamp(self.top),
            bottom: clamp(self.bottom),
            right: clamp(self.right),
        }
    }
}

/// Source rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn for_source(width: u32, height: u32, insets: CropInsets) -> Self {
        let insets = insets.sanitized();
        let margin = |size: u32, fraction: f32| (size as f64 * fraction as f64).round() as u32;

        let top = margin(height, insets.top).min(height.saturating_sub(1));
        let bottom = margin(height, insets.bottom);
        let right = margin(width, insets.right);

        CropRect {
            x: 0,
            y: top,
            width: width.saturating_sub(right).max(1),
            height: height.saturating_sub(top).saturating_sub(bottom).max(1),
        }
    }
}

/// A resizable drawing target.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    /// Resize the surface; prior content is discarded.
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    /// Draw `crop` of `image` scaled to fill the whole surface.
    fn draw(&mut self, image: &RgbaImage, crop: CropRect);
}

/// In-memory RGBA surface.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    buffer: RgbaImage,
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self {
            buffer: RgbaImage::new(0, 0),
        }
    }
}

impl PixelSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.buffer
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.buffer = RgbaImage::new(width, height);
    }

    fn clear(&mut self) {
        self.buffer.pixels_mut().for_each(|pixel| pixel.0 = [0; 4]);
    }

    fn draw(&mut self, image: &RgbaImage, crop: CropRect) {
        let view = imageops::crop_imm(image, crop.x, crop.y, crop.width, crop.height).to_image();
        let (width, height) = self.size();
        if view.dimensions() == (width, height) {
            imageops::replace(&mut self.buffer, &view, 0, 0);
        } else {
            let scaled = imageops::resize(&view, width, height, imageops::FilterType::Triangle);
            imageops::replace(&mut self.buffer, &scaled, 0, 0);
        }
    }
}

pub struct Compositor<S> {
    surface: S,
    insets: CropInsets,
    pending: Option<usize>,
    drawn: Option<usize>,
    draw_count: u64,
    enabled: bool,
}

impl<S> Compositor<S> {
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub fn drawn(&self) -> Option<usize> {
        self.drawn
    }

    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Queue `index` for the next animation frame, replacing any earlier request.
    pub fn request(&mut self, index: usize) {
        if self.enabled {
            self.pending = Some(index);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.drawn = None;
    }

    /// Stop drawing until `enable` is called; used on teardown.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.pending = None;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<S: Surface> Compositor<S> {
    pub fn new(surface: S, insets: CropInsets) -> Self {
        Self {
            surface,
            insets: insets.sanitized(),
            pending: None,
            drawn: None,
            draw_count: 0,
            enabled: true,
        }
    }

    /// Draw the latest pending index, if any. Returns whether anything was drawn.
    pub fn on_animation_frame(&mut self, frames: Option<&FrameSet>) -> bool {
        match self.pending.take() {
            Some(index) => self.draw_now(index, frames),
            None => false,
        }
    }

    /// Draw `index` immediately. Missing frames leave the surface untouched.
    pub fn draw_now(&mut self, index: usize, frames: Option<&FrameSet>) -> bool {
        if !self.enabled {
            return false;
        }
        let Some(image) = frames.and_then(|frames| frames.get(index)) else {
            trace!(index, "No frame available to draw");
            return false;
        };
        let crop = CropRect::for_source(image.width(), image.height(), self.insets);
        if self.surface.size() != (crop.width, crop.height) {
            self.surface.resize(crop.width, crop.height);
        }
        self.surface.clear();
        self.surface.draw(image, crop);
        self.drawn = Some(index);
        self.draw_count += 1;
        true
    }
}
