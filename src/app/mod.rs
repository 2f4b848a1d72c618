mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use crate::theme::iced_theme;
use iced::{Size, window};

/// Launch the viewer with the loaded config.
pub fn run_app(config: AppConfig) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        min_size: Some(Size::new(480.0, 360.0)),
        ..window::Settings::default()
    };

    iced::application("NeuroBridge", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| iced_theme(app.config.theme))
        .run_with(move || App::bootstrap(config))
}
