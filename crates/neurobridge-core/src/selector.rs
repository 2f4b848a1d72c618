/// Map a progress ratio onto `[0, total - 1]`.
///
/// Out-of-range progress is clamped and NaN maps to the first frame.
pub fn frame_index(progress: f32, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let last = total - 1;
    if !(progress > 0.0) {
        return 0;
    }
    let scaled = (progress as f64 * last as f64).floor();
    if scaled >= last as f64 {
        last
    } else {
        scaled as usize
    }
}

/// Emits a frame index only when it differs from the previously emitted one.
#[derive(Debug, Clone)]
pub struct FrameSelector {
    total: usize,
    last: Option<usize>,
}

impl FrameSelector {
    pub fn new(total: usize) -> Self {
        Self { total, last: None }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn last(&self) -> Option<usize> {
        self.last
    }

    pub fn select(&mut self, progress: f32) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let index = frame_index(progress, self.total);
        if self.last == Some(index) {
            return None;
        }
        self.last = Some(index);
        Some(index)
    }

    /// Mark `index` as already shown, e.g. after an eager draw.
    pub fn mark_shown(&mut self, index: usize) {
        self.last = Some(index.min(self.total.saturating_sub(1)));
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_progress_to_floor_index() {
        assert_eq!(frame_index(0.0, 240), 0);
        assert_eq!(frame_index(1.0, 240), 239);
        assert_eq!(frame_index(0.5, 240), 119);
        assert_eq!(frame_index(0.999, 240), 238);
    }

    #[test]
    fn clamps_out_of_range_progress() {
        assert_eq!(frame_index(-0.2, 240), 0);
        assert_eq!(frame_index(1.3, 240), 239);
        assert_eq!(frame_index(f32::NAN, 240), 0);
        assert_eq!(frame_index(f32::INFINITY, 240), 239);
        assert_eq!(frame_index(0.7, 1), 0);
        assert_eq!(frame_index(0.7, 0), 0);
    }

    #[test]
    fn repeated_indices_are_deduplicated() {
        let mut selector = FrameSelector::new(240);
        assert_eq!(selector.select(0.5), Some(119));
        assert_eq!(selector.select(0.5001), None);
        assert_eq!(selector.select(0.51), Some(121));
        assert_eq!(selector.select(0.51), None);

        selector.reset();
        assert_eq!(selector.select(0.51), Some(121));
    }

    #[test]
    fn mark_shown_suppresses_matching_selection() {
        let mut selector = FrameSelector::new(10);
        selector.mark_shown(0);
        assert_eq!(selector.select(0.0), None);
        assert_eq!(selector.select(1.0), Some(9));
    }
}
