use super::defaults;
use super::models::{AppConfig, LogLevel, OverlayConfig, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    frames: FramesConfig,
    #[serde(default)]
    playback: PlaybackConfig,
    #[serde(default)]
    crop: CropConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    overlays: Vec<OverlayConfig>,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            window_width: tables.window.width,
            window_height: tables.window.height,
            frames_root: tables.frames.root,
            light_dir: tables.frames.light_dir,
            dark_dir: tables.frames.dark_dir,
            frame_prefix: tables.frames.prefix,
            frame_extension: tables.frames.extension,
            frame_count: tables.frames.count,
            batch_size: tables.frames.batch_size,
            stiffness: tables.playback.stiffness,
            damping: tables.playback.damping,
            mass: tables.playback.mass,
            rest_delta: tables.playback.rest_delta,
            rest_speed: tables.playback.rest_speed,
            scroll_height_multiple: tables.playback.scroll_height_multiple,
            crop_top: tables.crop.top,
            crop_bottom: tables.crop.bottom,
            crop_right: tables.crop.right,
            log_level: tables.logging.log_level,
            overlays: tables.overlays,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
            },
            window: WindowConfig {
                width: config.window_width,
                height: config.window_height,
            },
            frames: FramesConfig {
                root: config.frames_root.clone(),
                light_dir: config.light_dir.clone(),
                dark_dir: config.dark_dir.clone(),
                prefix: config.frame_prefix.clone(),
                extension: config.frame_extension.clone(),
                count: config.frame_count,
                batch_size: config.batch_size,
            },
            playback: PlaybackConfig {
                stiffness: config.stiffness,
                damping: config.damping,
                mass: config.mass,
                rest_delta: config.rest_delta,
                rest_speed: config.rest_speed,
                scroll_height_multiple: config.scroll_height_multiple,
            },
            crop: CropConfig {
                top: config.crop_top,
                bottom: config.crop_bottom,
                right: config.crop_right,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            overlays: config.overlays.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    width: f32,
    #[serde(default = "defaults::default_window_height")]
    height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct FramesConfig {
    #[serde(default = "defaults::default_frames_root")]
    root: String,
    #[serde(default = "defaults::default_light_dir")]
    light_dir: String,
    #[serde(default = "defaults::default_dark_dir")]
    dark_dir: String,
    #[serde(default = "defaults::default_frame_prefix")]
    prefix: String,
    #[serde(default = "defaults::default_frame_extension")]
    extension: String,
    #[serde(default = "defaults::default_frame_count")]
    count: usize,
    #[serde(default = "defaults::default_batch_size")]
    batch_size: usize,
}

impl Default for FramesConfig {
    fn default() -> Self {
        FramesConfig {
            root: defaults::default_frames_root(),
            light_dir: defaults::default_light_dir(),
            dark_dir: defaults::default_dark_dir(),
            prefix: defaults::default_frame_prefix(),
            extension: defaults::default_frame_extension(),
            count: defaults::default_frame_count(),
            batch_size: defaults::default_batch_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PlaybackConfig {
    #[serde(default = "defaults::default_stiffness")]
    stiffness: f32,
    #[serde(default = "defaults::default_damping")]
    damping: f32,
    #[serde(default = "defaults::default_mass")]
    mass: f32,
    #[serde(default = "defaults::default_rest_delta")]
    rest_delta: f32,
    #[serde(default = "defaults::default_rest_speed")]
    rest_speed: f32,
    #[serde(default = "defaults::default_scroll_height_multiple")]
    scroll_height_multiple: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            stiffness: defaults::default_stiffness(),
            damping: defaults::default_damping(),
            mass: defaults::default_mass(),
            rest_delta: defaults::default_rest_delta(),
            rest_speed: defaults::default_rest_speed(),
            scroll_height_multiple: defaults::default_scroll_height_multiple(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct CropConfig {
    #[serde(default = "defaults::default_crop_top")]
    top: f32,
    #[serde(default = "defaults::default_crop_bottom")]
    bottom: f32,
    #[serde(default = "defaults::default_crop_right")]
    right: f32,
}

impl Default for CropConfig {
    fn default() -> Self {
        CropConfig {
            top: defaults::default_crop_top(),
            bottom: defaults::default_crop_bottom(),
            right: defaults::default_crop_right(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
