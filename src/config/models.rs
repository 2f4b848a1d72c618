use neurobridge_core::{
    AssetLayout, CropInsets, EngineConfig, Overlay, OverlayPosition, OverlaySchedule,
    OverlayWindow, SpringConfig, Variant,
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// High-level app configuration, flattened from the TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub theme: ThemeMode,
    pub window_width: f32,
    pub window_height: f32,
    pub frames_root: String,
    pub light_dir: String,
    pub dark_dir: String,
    pub frame_prefix: String,
    pub frame_extension: String,
    pub frame_count: usize,
    pub batch_size: usize,
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub rest_delta: f32,
    pub rest_speed: f32,
    pub scroll_height_multiple: f32,
    pub crop_top: f32,
    pub crop_bottom: f32,
    pub crop_right: f32,
    pub log_level: LogLevel,
    pub overlays: Vec<OverlayConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        use crate::config::defaults::*;
        AppConfig {
            theme: ThemeMode::default(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            frames_root: default_frames_root(),
            light_dir: default_light_dir(),
            dark_dir: default_dark_dir(),
            frame_prefix: default_frame_prefix(),
            frame_extension: default_frame_extension(),
            frame_count: default_frame_count(),
            batch_size: default_batch_size(),
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
            scroll_height_multiple: default_scroll_height_multiple(),
            crop_top: default_crop_top(),
            crop_bottom: default_crop_bottom(),
            crop_right: default_crop_right(),
            log_level: default_log_level(),
            overlays: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn asset_layout(&self) -> AssetLayout {
        AssetLayout {
            root: PathBuf::from(&self.frames_root),
            light_dir: self.light_dir.clone(),
            dark_dir: self.dark_dir.clone(),
            prefix: self.frame_prefix.clone(),
            extension: self.frame_extension.clone(),
            frame_count: self.frame_count,
        }
    }

    pub fn spring(&self) -> SpringConfig {
        SpringConfig {
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
            rest_delta: self.rest_delta,
            rest_speed: self.rest_speed,
        }
        .sanitized()
    }

    pub fn crop(&self) -> CropInsets {
        CropInsets {
            top: self.crop_top,
            bottom: self.crop_bottom,
            right: self.crop_right,
        }
        .sanitized()
    }

    /// Configured overlays; invalid entries are skipped and an empty list
    /// selects the built-in story.
    pub fn overlay_schedule(&self) -> OverlaySchedule {
        if self.overlays.is_empty() {
            return OverlaySchedule::neurobridge();
        }
        let overlays = self
            .overlays
            .iter()
            .filter_map(|entry| match entry.to_overlay() {
                Ok(overlay) => Some(overlay),
                Err(err) => {
                    warn!(title = %entry.title, "Skipping overlay: {err}");
                    None
                }
            })
            .collect();
        OverlaySchedule::new(overlays)
    }

    pub fn scroll_height_multiple(&self) -> f32 {
        if self.scroll_height_multiple.is_finite() && self.scroll_height_multiple >= 1.0 {
            self.scroll_height_multiple
        } else {
            crate::config::defaults::default_scroll_height_multiple()
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            layout: self.asset_layout(),
            batch_size: self.batch_size.max(1),
            spring: self.spring(),
            crop: self.crop(),
            overlays: self.overlay_schedule(),
        }
    }
}

/// One `[[overlays]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct OverlayConfig {
    pub show_start: f32,
    pub show_end: f32,
    #[serde(default)]
    pub position: OverlayPosition,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl OverlayConfig {
    fn to_overlay(&self) -> anyhow::Result<Overlay> {
        let window = OverlayWindow::new(self.show_start, self.show_end, self.position)?;
        let overlay = Overlay::new(window, &self.title, &self.body);
        Ok(match &self.action {
            Some(label) => overlay.with_action(label),
            None => overlay,
        })
    }
}

/// Day/night appearance; each maps to one frame variant.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }

    pub fn variant(self) -> Variant {
        match self {
            ThemeMode::Day => Variant::Light,
            ThemeMode::Night => Variant::Dark,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overlay_list_uses_built_in_story() {
        let config = AppConfig::default();
        assert_eq!(config.overlay_schedule(), OverlaySchedule::neurobridge());
    }

    #[test]
    fn invalid_overlays_are_skipped() {
        let config = AppConfig {
            overlays: vec![
                OverlayConfig {
                    show_start: 0.1,
                    show_end: 0.3,
                    position: OverlayPosition::Left,
                    title: "Kept".to_string(),
                    body: String::new(),
                    action: Some("Go".to_string()),
                },
                OverlayConfig {
                    show_start: 0.6,
                    show_end: 0.4,
                    position: OverlayPosition::Center,
                    title: "Inverted".to_string(),
                    body: String::new(),
                    action: None,
                },
            ],
            ..AppConfig::default()
        };
        let schedule = config.overlay_schedule();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.overlays()[0].title, "Kept");
        assert_eq!(schedule.overlays()[0].action.as_deref(), Some("Go"));
    }

    #[test]
    fn engine_config_sanitizes_tunables() {
        let config = AppConfig {
            stiffness: -4.0,
            batch_size: 0,
            crop_top: 3.0,
            scroll_height_multiple: f32::NAN,
            ..AppConfig::default()
        };
        let engine = config.engine_config();
        assert_eq!(engine.spring.stiffness, SpringConfig::default().stiffness);
        assert_eq!(engine.batch_size, 1);
        assert_eq!(engine.crop.top, 0.9);
        assert_eq!(config.scroll_height_multiple(), 4.0);
    }

    #[test]
    fn theme_modes_map_to_variants() {
        assert_eq!(ThemeMode::Day.variant(), Variant::Light);
        assert_eq!(ThemeMode::Night.variant(), Variant::Dark);
        assert_eq!(ThemeMode::Day.toggled(), ThemeMode::Night);
    }
}
