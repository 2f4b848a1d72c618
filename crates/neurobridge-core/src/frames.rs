use crate::variant::Variant;
use image::RgbaImage;
use std::sync::Arc;

/// Decoded frame shared between the store and the compositor.
pub type Frame = Arc<RgbaImage>;

/// Ordered, possibly sparse, decoded frames for one variant.
///
/// A slot is `None` when its load failed; the slot is still counted so indices
/// stay contiguous.
#[derive(Clone)]
pub struct FrameSet {
    variant: Variant,
    slots: Vec<Option<Frame>>,
}

impl FrameSet {
    pub fn new(variant: Variant, slots: Vec<Option<Frame>>) -> Self {
        Self { variant, slots }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RgbaImage> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl std::fmt::Debug for FrameSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSet")
            .field("variant", &self.variant)
            .field("len", &self.slots.len())
            .field("loaded", &self.loaded_count())
            .finish()
    }
}
