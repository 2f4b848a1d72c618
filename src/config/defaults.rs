use crate::config::LogLevel;
use neurobridge_core::{AssetLayout, CropInsets, DEFAULT_BATCH_SIZE, SpringConfig};

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_frames_root() -> String {
    AssetLayout::default().root.display().to_string()
}

pub(crate) fn default_light_dir() -> String {
    AssetLayout::default().light_dir
}

pub(crate) fn default_dark_dir() -> String {
    AssetLayout::default().dark_dir
}

pub(crate) fn default_frame_prefix() -> String {
    AssetLayout::default().prefix
}

pub(crate) fn default_frame_extension() -> String {
    AssetLayout::default().extension
}

pub(crate) fn default_frame_count() -> usize {
    AssetLayout::default().frame_count
}

pub(crate) fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

pub(crate) fn default_stiffness() -> f32 {
    SpringConfig::default().stiffness
}

pub(crate) fn default_damping() -> f32 {
    SpringConfig::default().damping
}

pub(crate) fn default_mass() -> f32 {
    SpringConfig::default().mass
}

pub(crate) fn default_rest_delta() -> f32 {
    SpringConfig::default().rest_delta
}

pub(crate) fn default_rest_speed() -> f32 {
    SpringConfig::default().rest_speed
}

pub(crate) fn default_scroll_height_multiple() -> f32 {
    4.0
}

pub(crate) fn default_crop_top() -> f32 {
    CropInsets::default().top
}

pub(crate) fn default_crop_bottom() -> f32 {
    CropInsets::default().bottom
}

pub(crate) fn default_crop_right() -> f32 {
    CropInsets::default().right
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Info
}
